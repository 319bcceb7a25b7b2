//! In-memory message store and the provider handle hosts expose.

use std::sync::{Arc, OnceLock, PoisonError, RwLock};

use crate::i18n::document::LocaleDocument;
use crate::i18n::merge::LocaleStore;
use crate::i18n::translations::{TranslationMap, format_message, format_outer, translate_or_key};

/// Process-wide message table: key -> message.
///
/// Only ever grows or overwrites; nothing here removes a key.
#[derive(Debug, Default)]
pub struct MessageStore {
    messages: RwLock<TranslationMap>,
    authors: RwLock<Vec<String>>,
}

impl MessageStore {
    /// Empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Message for `key`, if present.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        self.messages
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    /// Message for `key`, or the key itself when it was never injected.
    #[must_use]
    pub fn translate(&self, key: &str) -> String {
        translate_or_key(
            key,
            &self.messages.read().unwrap_or_else(PoisonError::into_inner),
        )
    }

    /// What: Look up `key` and substitute named placeholders.
    ///
    /// Inputs:
    /// - `key`: Message key
    /// - `args`: Named arguments for `{name}` markers
    ///
    /// Output:
    /// - Formatted message, or the formatted raw key when missing
    #[must_use]
    pub fn format(&self, key: &str, args: &[(&str, &dyn std::fmt::Display)]) -> String {
        format_message(&self.translate(key), args)
    }

    /// What: Format `key` like [`Self::format`], then wrap it in an outer template.
    ///
    /// Inputs:
    /// - `key`: Message key
    /// - `outer`: Optional template; its `{0}` markers receive the formatted message
    /// - `args`: Named arguments for the message's `{name}` markers
    ///
    /// Output:
    /// - Wrapped message, or just the formatted message when `outer` is `None`
    #[must_use]
    pub fn format_with(
        &self,
        key: &str,
        outer: Option<&str>,
        args: &[(&str, &dyn std::fmt::Display)],
    ) -> String {
        let formatted = self.format(key, args);
        match outer {
            Some(template) => format_outer(template, &formatted),
            None => formatted,
        }
    }

    /// Number of stored messages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.messages
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether the store holds no messages.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copy of the whole table.
    #[must_use]
    pub fn snapshot(&self) -> TranslationMap {
        self.messages
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Distinct authors credited by loaded documents, first-seen order.
    #[must_use]
    pub fn authors(&self) -> Vec<String> {
        self.authors
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl LocaleStore for MessageStore {
    fn has_key(&self, key: &str) -> bool {
        self.messages
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(key)
    }

    fn additive_load(&self, document: &LocaleDocument) {
        {
            let mut messages = self.messages.write().unwrap_or_else(PoisonError::into_inner);
            for (key, value) in document.messages() {
                messages.insert(key.to_string(), value.to_string());
            }
        }
        let mut authors = self.authors.write().unwrap_or_else(PoisonError::into_inner);
        for author in &document.authors {
            if !authors.contains(author) {
                authors.push(author.clone());
            }
        }
    }
}

/// Access to the host's store, which may not be initialized yet.
pub trait StoreProvider: Send + Sync {
    /// The live store, or `None` while the host is still starting up.
    fn store(&self) -> Option<Arc<dyn LocaleStore>>;
}

/// Host-owned slot holding the shared `MessageStore` once it exists.
#[derive(Debug, Default)]
pub struct HostStore {
    slot: OnceLock<Arc<MessageStore>>,
}

impl HostStore {
    /// Slot with no store yet; injections are abandoned until [`Self::initialize`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Slot that is ready immediately.
    #[must_use]
    pub fn ready() -> Self {
        let host = Self::new();
        host.initialize();
        host
    }

    /// Create the store if needed and return it.
    pub fn initialize(&self) -> Arc<MessageStore> {
        Arc::clone(self.slot.get_or_init(|| Arc::new(MessageStore::new())))
    }

    /// The concrete store, if initialized.
    #[must_use]
    pub fn messages(&self) -> Option<Arc<MessageStore>> {
        self.slot.get().cloned()
    }
}

impl StoreProvider for HostStore {
    fn store(&self) -> Option<Arc<dyn LocaleStore>> {
        self.slot
            .get()
            .map(|store| Arc::clone(store) as Arc<dyn LocaleStore>)
    }
}
