//! Locale documents, matching, selection and additive merging.
//!
//! # Overview
//!
//! - **Documents**: One JSON file per locale per plugin, parsed into a [`LocaleDocument`]
//! - **Matching**: `en-US` matches `en-us` exactly and `en`/`en-GB` by primary subtag
//! - **Selection**: All documents matching the target, else all matching the default locale
//! - **Merging**: Additive writes into a [`LocaleStore`]; keys are never removed
//! - **Lookup**: [`MessageStore::translate`] returns the raw key when a message is missing
//!
//! # Locale Files
//!
//! Locale files live in `<plugin dir>/Locale/**/*.json`:
//!
//! ```json
//! {
//!   // comments and trailing commas are accepted
//!   "localeCode": "en-US",
//!   "authors": ["Name1", "Name2"],
//!   "messages": { "some.key": "Some Text", },
//! }
//! ```
//!
//! Field names are case-insensitive. `messages` is required; a file without it
//! is skipped. `localeCode` and `authors` are optional.
//!
//! # Error Handling
//!
//! - Unreadable or malformed files are logged and skipped
//! - Missing keys display as the key itself
//! - Nothing here aborts a batch

mod detection;
pub mod document;
pub mod loader;
pub mod matcher;
pub mod merge;
pub mod selection;
pub mod store;
pub mod translations;

pub use detection::detect_system_locale;
pub use document::{LocaleDocument, UNKNOWN_LOCALE};
pub use loader::{load_all, load_locale_file, plugin_locale_files};
pub use matcher::{matches, primary_subtag};
pub use merge::{LocaleStore, merge_into};
pub use selection::{DEFAULT_FALLBACK_LOCALE, Selection, select};
pub use store::{HostStore, MessageStore, StoreProvider};
pub use translations::{TranslationMap, format_message, format_outer, translate_or_key};
