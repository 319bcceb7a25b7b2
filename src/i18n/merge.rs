//! Additive merge of locale documents into a message store.

use crate::i18n::document::LocaleDocument;

/// Narrow view of the host's message store.
///
/// Implementations must never remove keys; `additive_load` inserts or replaces
/// the document's messages and leaves every other entry alone.
pub trait LocaleStore: Send + Sync {
    /// Whether `key` already has a message.
    fn has_key(&self, key: &str) -> bool;

    /// Write every message of `document` into the store.
    fn additive_load(&self, document: &LocaleDocument);
}

/// What: Merge one document into a store.
///
/// Inputs:
/// - `store`: Destination store
/// - `document`: Messages to merge
/// - `force`: Overwrite unconditionally when `true`
///
/// Output:
/// - Number of keys processed (not only the newly added ones), or 0 when skipped
///
/// Details:
/// - Without `force`, the document is skipped whole when its first key is
///   already in the store. This is an "already merged" probe on a single key,
///   not a per-key diff.
/// - Callers must hold the coordination lock while calling this.
pub fn merge_into(store: &dyn LocaleStore, document: &LocaleDocument, force: bool) -> usize {
    if !force
        && let Some(first_key) = document.first_key()
        && store.has_key(first_key)
    {
        tracing::debug!(
            locale = document.display_locale(),
            key = first_key,
            "first key already present, skipping document"
        );
        return 0;
    }

    store.additive_load(document);
    document.len()
}
