//! System locale detection utilities.

use std::env;

/// What: Detect system locale from environment variables.
///
/// Inputs:
/// - None (reads from environment)
///
/// Output:
/// - `Option<String>` containing locale code (e.g., "de-DE") or None if not detectable
///
/// Details:
/// - Checks `LC_ALL`, `LC_MESSAGES`, and `LANG` in order; first parsable value wins
/// - `C` and `POSIX` carry no language and are skipped
#[must_use]
pub fn detect_system_locale() -> Option<String> {
    ["LC_ALL", "LC_MESSAGES", "LANG"]
        .iter()
        .filter_map(|var_name| env::var(var_name).ok())
        .find_map(|value| parse_locale_string(&value))
}

/// What: Parse a POSIX locale string into a hyphenated locale code.
///
/// Inputs:
/// - `locale_str`: Locale string like "de_DE.UTF-8", "de-DE", "sr_RS@latin"
///
/// Output:
/// - `Option<String>` like "de-DE", or None for empty/`C`/`POSIX` values
///
/// Details:
/// - Drops the encoding (`.UTF-8`) and modifier (`@euro`) suffixes
/// - Language is lower-cased, a two-letter region upper-cased, a four-letter
///   script title-cased (`zh_hans_cn` -> `zh-Hans-CN`)
fn parse_locale_string(locale_str: &str) -> Option<String> {
    let trimmed = locale_str.trim();
    let code = trimmed.split(['.', '@']).next()?;
    if code.is_empty() || code.eq_ignore_ascii_case("c") || code.eq_ignore_ascii_case("posix") {
        return None;
    }

    let mut parts = code.split(['_', '-']).filter(|p| !p.is_empty());
    let language = parts.next()?.to_lowercase();
    let mut out = language;
    for part in parts {
        out.push('-');
        if part.len() == 4 {
            let mut chars = part.chars();
            if let Some(first) = chars.next() {
                out.extend(first.to_uppercase());
                out.push_str(&chars.as_str().to_lowercase());
            }
        } else {
            out.push_str(&part.to_uppercase());
        }
    }
    Some(out)
}
