//! Runtime API for adding locale messages outside the load-completed hook.
//!
//! These calls take the same coordination lock as event-driven injection, so
//! they never interleave with a running batch. They do not touch dedup state
//! and do not run locale selection: every document is merged as-is.

use std::path::Path;

use crate::error::{LocaleError, Result};
use crate::i18n::document::LocaleDocument;
use crate::i18n::loader::{load_all, load_locale_file};
use crate::i18n::merge::merge_into;
use crate::plugins::PluginInfo;

use super::Coordinator;

/// Locale code attached to messages added one at a time.
const SINGLE_MESSAGE_LOCALE: &str = "en-US";

impl Coordinator {
    /// What: Add one message at runtime.
    ///
    /// Inputs:
    /// - `key`: Message key
    /// - `value`: Message text
    /// - `force`: Overwrite an existing message for `key`
    /// - `authors`: Comma-separated author list (`"A, B"`); settings default when `None`/blank
    ///
    /// Output:
    /// - Messages written (1, or 0 when skipped or the store is not ready)
    pub fn add_locale_string(
        &self,
        key: &str,
        value: &str,
        force: bool,
        authors: Option<&str>,
    ) -> usize {
        let document = LocaleDocument::new(SINGLE_MESSAGE_LOCALE)
            .with_authors(self.resolve_authors(authors))
            .with_message(key, value);
        report_merge(self.merge_documents(std::slice::from_ref(&document), force))
    }

    /// What: Add every message from one locale file.
    ///
    /// Inputs:
    /// - `path`: Locale JSON file
    ///
    /// Output:
    /// - Messages written; 0 when the file is unusable or the store is not ready
    ///
    /// Details:
    /// - Always overwrites (`force = true`)
    pub fn add_locale_from_file(&self, path: &Path) -> usize {
        match load_locale_file(path) {
            Ok(document) => {
                tracing::debug!(
                    locale = document.display_locale(),
                    messages = document.len(),
                    file = %path.display(),
                    "adding locale file"
                );
                report_merge(self.merge_documents(std::slice::from_ref(&document), true))
            }
            Err(e) => {
                tracing::warn!(error = %e, "skipping locale file");
                0
            }
        }
    }

    /// What: Add every message from a plugin's locale folder.
    ///
    /// Inputs:
    /// - `plugin`: Plugin whose `Locale/` files are merged
    ///
    /// Output:
    /// - Messages written across all of the plugin's files
    ///
    /// Details:
    /// - Every file is merged regardless of its locale code (`force = true`)
    /// - The plugin is recorded in the index when it has at least one file
    pub fn add_locale_from_plugin(&self, plugin: &PluginInfo) -> usize {
        let files = self.locale_files(plugin);
        if files.is_empty() {
            return 0;
        }
        tracing::debug!(plugin = %plugin.id, files = files.len(), "adding plugin locales");

        let documents = load_all(&files);
        let merged = report_merge(self.merge_documents(&documents, true));
        self.index.track(&plugin.id);
        merged
    }

    /// What: Add the locale folders of every registered plugin.
    ///
    /// Output:
    /// - Messages written across all plugins
    ///
    /// Details:
    /// - Used for the startup load; does nothing when no plugin is loaded
    pub fn add_locales_from_all_plugins(&self) -> usize {
        let plugins = self.registry.plugins();
        if plugins.is_empty() {
            tracing::debug!("no plugins loaded, skipping startup locale load");
            return 0;
        }
        let total: usize = plugins
            .iter()
            .map(|plugin| self.add_locale_from_plugin(plugin))
            .sum();
        tracing::info!(
            messages = total,
            plugins = plugins.len(),
            "startup locale load finished"
        );
        total
    }

    /// What: Merge documents under the coordination lock.
    ///
    /// # Errors
    /// - `LocaleError::StoreUnavailable` when the host store is not initialized
    fn merge_documents(&self, documents: &[LocaleDocument], force: bool) -> Result<usize> {
        let _guard = self.lock_state();
        let store = self.stores.store().ok_or(LocaleError::StoreUnavailable)?;
        Ok(documents
            .iter()
            .map(|doc| merge_into(store.as_ref(), doc, force))
            .sum())
    }

    /// Authors for a runtime-added message.
    fn resolve_authors(&self, authors: Option<&str>) -> Vec<String> {
        let split = |list: &str| -> Vec<String> {
            list.split(", ")
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()
        };
        if let Some(list) = authors.filter(|a| !a.trim().is_empty()) {
            return split(list);
        }
        if !self.settings.default_authors.is_empty() {
            return self.settings.default_authors.clone();
        }
        vec![env!("CARGO_PKG_NAME").to_string()]
    }
}

/// Message count of a runtime merge; failures are logged and count as zero.
fn report_merge(result: Result<usize>) -> usize {
    result.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "cannot inject locale data");
        0
    })
}
