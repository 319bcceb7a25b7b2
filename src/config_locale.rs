//! Locale keys for plugin settings.
//!
//! A plugin setting `(section, key)` of plugin `guid` is displayed through two
//! message keys: `Settings.{guid}.{section}.{key}` for its name and
//! `Settings.{guid}.{section}.{key}.Description` for its description. Plugins
//! ship those keys in their `Locale/` files.

use crate::i18n::store::MessageStore;

/// Name and description message keys of one plugin setting.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConfigLocale {
    /// Message key of the setting's display name.
    pub name: String,
    /// Message key of the setting's description.
    pub description: String,
}

impl ConfigLocale {
    /// Explicit key pair.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }

    /// What: Keys for a plugin setting.
    ///
    /// Inputs:
    /// - `guid`: Plugin identifier, keeps keys unique across plugins
    /// - `section`: Setting group
    /// - `key`: Setting name
    ///
    /// Output:
    /// - `ConfigLocale` with `Settings.{guid}.{section}.{key}` and its `.Description`
    #[must_use]
    pub fn for_setting(guid: &str, section: &str, key: &str) -> Self {
        let name = format!("Settings.{guid}.{section}.{key}");
        let description = format!("{name}.Description");
        Self { name, description }
    }

    /// Resolved `(name, description)`, raw keys when not injected.
    #[must_use]
    pub fn resolve(&self, store: &MessageStore) -> (String, String) {
        (store.translate(&self.name), store.translate(&self.description))
    }
}
