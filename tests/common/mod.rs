//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::Path;
use std::sync::Arc;

use locale_injector::i18n::{HostStore, StoreProvider};
use locale_injector::{Coordinator, DirectoryRegistry, Settings};

/// What: Write one locale file for a plugin under `root`.
///
/// Inputs:
/// - `root`: Plugins directory
/// - `plugin`: Plugin folder name
/// - `file`: File name relative to the plugin's `Locale/` folder
/// - `json`: File content
pub fn write_locale(root: &Path, plugin: &str, file: &str, json: &str) {
    let path = root.join(plugin).join("Locale").join(file);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create locale directory");
    }
    fs::write(&path, json).expect("Failed to write locale file");
}

/// What: Build a coordinator over a plugins directory with a ready store.
///
/// Output:
/// - `(coordinator, host store)` pair
pub fn coordinator_for(root: &Path, settings: Settings) -> (Arc<Coordinator>, Arc<HostStore>) {
    let host = Arc::new(HostStore::ready());
    let coordinator = Arc::new(Coordinator::new(
        settings,
        Arc::new(DirectoryRegistry::new(root)),
        Arc::clone(&host) as Arc<dyn StoreProvider>,
    ));
    (coordinator, host)
}
