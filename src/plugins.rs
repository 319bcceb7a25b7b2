//! Plugin registry collaborators.
//!
//! The host decides what a plugin is; this crate only needs an id and a
//! directory that may contain a locale folder.

use std::fs;
use std::path::{Path, PathBuf};

/// One loaded plugin as seen by the locale injector.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PluginInfo {
    /// Stable plugin identifier (GUID, crate name, folder name...).
    pub id: String,
    /// Directory the plugin was loaded from.
    pub directory: PathBuf,
}

impl PluginInfo {
    /// Plugin with the given id and directory.
    pub fn new(id: impl Into<String>, directory: impl Into<PathBuf>) -> Self {
        Self {
            id: id.into(),
            directory: directory.into(),
        }
    }

    /// What: Plugin described by the path of its main file.
    ///
    /// Inputs:
    /// - `id`: Plugin identifier
    /// - `location`: Path of the plugin's entry file (library, manifest...)
    ///
    /// Output:
    /// - `PluginInfo` rooted at the file's parent directory, or `None` when the
    ///   location has no parent
    pub fn from_location(id: impl Into<String>, location: &Path) -> Option<Self> {
        let parent = location.parent()?;
        if parent.as_os_str().is_empty() {
            return None;
        }
        Some(Self::new(id, parent))
    }

    /// Locale folder of this plugin, e.g. `<directory>/Locale`.
    #[must_use]
    pub fn locale_dir(&self, folder_name: &str) -> PathBuf {
        self.directory.join(folder_name)
    }
}

/// Source of the currently loaded plugins.
pub trait PluginRegistry: Send + Sync {
    /// Snapshot of loaded plugins.
    fn plugins(&self) -> Vec<PluginInfo>;
}

/// Fixed plugin list supplied by the host.
#[derive(Debug, Clone, Default)]
pub struct StaticRegistry {
    plugins: Vec<PluginInfo>,
}

impl StaticRegistry {
    /// Registry over `plugins`.
    #[must_use]
    pub const fn new(plugins: Vec<PluginInfo>) -> Self {
        Self { plugins }
    }
}

impl PluginRegistry for StaticRegistry {
    fn plugins(&self) -> Vec<PluginInfo> {
        self.plugins.clone()
    }
}

/// Treats every sub-directory of `root` as one plugin.
#[derive(Debug, Clone)]
pub struct DirectoryRegistry {
    root: PathBuf,
}

impl DirectoryRegistry {
    /// Registry over the plugin folders in `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl PluginRegistry for DirectoryRegistry {
    /// Plugins sorted by id; an unreadable root yields no plugins.
    fn plugins(&self) -> Vec<PluginInfo> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(root = %self.root.display(), error = %e, "cannot list plugins");
                return Vec::new();
            }
        };
        let mut plugins: Vec<PluginInfo> = entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| path.is_dir())
            .filter_map(|path| {
                let id = path.file_name()?.to_string_lossy().into_owned();
                Some(PluginInfo::new(id, path))
            })
            .collect();
        plugins.sort_by(|a, b| a.id.cmp(&b.id));
        plugins
    }
}
