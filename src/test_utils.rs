//! Test utilities for common test setup.
//!
//! This module provides shared test helpers used across multiple test modules.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock};

use crate::plugins::PluginInfo;

/// What: Provide a process-wide mutex to serialize environment-mutating tests.
///
/// Output: Shared reference to a lazily-initialized `Mutex<()>`.
pub fn env_mutex() -> &'static Mutex<()> {
    static ENV_MUTEX: OnceLock<Mutex<()>> = OnceLock::new();
    ENV_MUTEX.get_or_init(|| Mutex::new(()))
}

/// What: Create a plugin directory with locale files.
///
/// Inputs:
/// - `root`: Directory holding all test plugins
/// - `id`: Plugin id (also its directory name)
/// - `files`: `(relative file name, JSON content)` pairs written under `Locale/`
///
/// Output: `PluginInfo` pointing at the new plugin directory
pub fn plugin_with_locales(root: &Path, id: &str, files: &[(&str, &str)]) -> PluginInfo {
    let directory: PathBuf = root.join(id);
    let locale_dir = directory.join("Locale");
    std::fs::create_dir_all(&locale_dir).expect("Failed to create test locale directory");
    for (name, content) in files {
        let path = locale_dir.join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create nested locale directory");
        }
        std::fs::write(&path, content).expect("Failed to write test locale file");
    }
    PluginInfo::new(id, directory)
}
