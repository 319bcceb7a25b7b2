//! Locale code matching.

/// What: Reduce a locale code to its primary language subtag.
///
/// Inputs:
/// - `code`: Locale code such as `en-US`, `zh_Hans_CN` or `fr`
///
/// Output:
/// - Leading language portion (`en`, `zh`, `fr`), original case preserved
///
/// Details:
/// - Both `-` and `_` count as subtag separators
/// - A code without a separator is its own primary subtag
#[must_use]
pub fn primary_subtag(code: &str) -> &str {
    code.split(['-', '_']).next().unwrap_or(code)
}

/// What: Decide whether a document's locale satisfies the requested target.
///
/// Inputs:
/// - `candidate`: Locale code carried by a locale document
/// - `target`: Locale code the host wants active
///
/// Output:
/// - `true` on a case-insensitive exact match or a primary-subtag match
///
/// Details:
/// - Empty input on either side never matches
/// - Symmetric: `matches("fr-CA", "fr") == matches("fr", "fr-CA")`
/// - No wildcard matching beyond the primary subtag
#[must_use]
pub fn matches(candidate: &str, target: &str) -> bool {
    let candidate = candidate.trim();
    let target = target.trim();
    if candidate.is_empty() || target.is_empty() {
        return false;
    }
    if candidate.eq_ignore_ascii_case(target) {
        return true;
    }
    let candidate_base = primary_subtag(candidate);
    let target_base = primary_subtag(target);
    !candidate_base.is_empty() && candidate_base.eq_ignore_ascii_case(target_base)
}

/// Same as [`matches`] for an optional candidate code; `None` never matches.
#[must_use]
pub fn matches_opt(candidate: Option<&str>, target: &str) -> bool {
    candidate.is_some_and(|code| matches(code, target))
}
