//! Candidate selection with default-language fallback.

use crate::i18n::document::LocaleDocument;
use crate::i18n::matcher::{matches, matches_opt};

/// Locale used when nothing matches the requested target.
pub const DEFAULT_FALLBACK_LOCALE: &str = "en";

/// Result of selecting candidates for a target locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection<'a> {
    /// Documents to merge, in candidate order.
    pub selected: Vec<&'a LocaleDocument>,
    /// Whether `selected` came from the fallback locale.
    pub used_fallback: bool,
}

impl Selection<'_> {
    /// Nothing selected, no fallback used.
    const fn empty() -> Self {
        Self {
            selected: Vec::new(),
            used_fallback: false,
        }
    }
}

/// What: Pick the candidates that apply to a target locale.
///
/// Inputs:
/// - `candidates`: All documents loaded for one plugin
/// - `target`: Locale the host is switching to
/// - `default_locale`: Fallback locale (normally `en`)
///
/// Output:
/// - `Selection` with every matching document, or every fallback-matching
///   document with `used_fallback = true`
///
/// Details:
/// - All documents matching the same locale are kept; key collisions are the
///   merge step's concern
/// - No fallback pass runs when the target already matches the default locale,
///   since that pass would find the same (empty) set again
#[must_use]
pub fn select<'a>(
    candidates: &'a [LocaleDocument],
    target: &str,
    default_locale: &str,
) -> Selection<'a> {
    let direct: Vec<&LocaleDocument> = candidates
        .iter()
        .filter(|doc| matches_opt(doc.locale_code.as_deref(), target))
        .collect();
    if !direct.is_empty() {
        return Selection {
            selected: direct,
            used_fallback: false,
        };
    }

    if matches(target, default_locale) {
        return Selection::empty();
    }

    let fallback: Vec<&LocaleDocument> = candidates
        .iter()
        .filter(|doc| matches_opt(doc.locale_code.as_deref(), default_locale))
        .collect();
    tracing::debug!(
        target_locale = target,
        fallback = default_locale,
        found = fallback.len(),
        "no candidates for target locale, using fallback"
    );
    Selection {
        selected: fallback,
        used_fallback: true,
    }
}
