//! Translation map, lookup and placeholder formatting.

use std::collections::HashMap;

/// Translation map: dot-notation key -> translated string.
pub type TranslationMap = HashMap<String, String>;

/// What: Look up a translation, falling back to the raw key.
///
/// Inputs:
/// - `key`: Dot-notation key
/// - `translations`: Translation map to search
///
/// Output:
/// - Translated string, or the key itself when missing
///
/// Details:
/// - Missing keys are the accepted degraded mode for plugin strings that were
///   never injected; they are logged at debug level only
#[must_use]
pub fn translate_or_key(key: &str, translations: &TranslationMap) -> String {
    if let Some(translation) = translations.get(key) {
        return translation.clone();
    }
    tracing::debug!("Missing translation key: '{}'. Returning key as-is.", key);
    key.to_string()
}

/// What: Replace named `{placeholder}` markers in a message.
///
/// Inputs:
/// - `template`: Message text, e.g. `"Loaded {count} files from {plugin}"`
/// - `args`: Named arguments
///
/// Output:
/// - Formatted string
///
/// Details:
/// - Unknown placeholders and unbalanced braces are left verbatim
/// - No pluralization or placeholder validation
#[must_use]
pub fn format_message(template: &str, args: &[(&str, &dyn std::fmt::Display)]) -> String {
    let mut result = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        result.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let Some(close) = after.find('}') else {
            result.push_str(&rest[open..]);
            return result;
        };
        let name = &after[..close];
        match args.iter().find(|(arg, _)| *arg == name) {
            Some((_, value)) => result.push_str(&value.to_string()),
            None => {
                result.push('{');
                result.push_str(name);
                result.push('}');
            }
        }
        rest = &after[close + 1..];
    }
    result.push_str(rest);
    result
}

/// What: Wrap an already formatted message in an outer template.
///
/// Inputs:
/// - `outer`: Template whose `{0}` markers receive the message, e.g. `"[{0}]"`
/// - `message`: Formatted message text
///
/// Output:
/// - Wrapped string; other markers stay verbatim
#[must_use]
pub fn format_outer(outer: &str, message: &str) -> String {
    format_message(outer, &[("0", &message)])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translate_or_key() {
        let mut translations = HashMap::new();
        translations.insert("app.titles.search".to_string(), "Suche".to_string());

        assert_eq!(translate_or_key("app.titles.search", &translations), "Suche");
        assert_eq!(
            translate_or_key("app.titles.missing", &translations),
            "app.titles.missing"
        );
    }

    #[test]
    fn test_format_message() {
        let count = 3;
        assert_eq!(
            format_message(
                "Loaded {count} files from {plugin}",
                &[("count", &count), ("plugin", &"demo")]
            ),
            "Loaded 3 files from demo"
        );
        assert_eq!(
            format_message("Hi {who} {missing}", &[("who", &"you")]),
            "Hi you {missing}"
        );
        assert_eq!(format_message("open { brace", &[]), "open { brace");
        assert_eq!(format_message("", &[]), "");
    }

    #[test]
    fn test_format_outer() {
        assert_eq!(format_outer("<b>{0}</b>", "Hello"), "<b>Hello</b>");
        assert_eq!(format_outer("{0} / {0}", "x"), "x / x");
        assert_eq!(format_outer("no marker {1}", "x"), "no marker {1}");
    }
}
