//! The locale document model and its lenient JSON reader.

use std::path::Path;

use serde_json::{Map, Value};

use crate::error::{LocaleError, Result};

/// Display name used for documents that carry no locale code.
pub const UNKNOWN_LOCALE: &str = "unknown";

/// One parsed locale file: a locale code, its authors and its message table.
///
/// Messages keep document order so the "first key" of a document is stable.
/// Keys are unique; inserting an existing key replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocaleDocument {
    /// Locale code such as `en-US`; `None` when the file omitted it.
    pub locale_code: Option<String>,
    /// Authors credited by the document, in file order.
    pub authors: Vec<String>,
    messages: Vec<(String, String)>,
}

impl LocaleDocument {
    /// What: Create an empty document for a locale.
    ///
    /// Inputs:
    /// - `locale_code`: Locale code; an empty string is stored as `None`
    ///
    /// Output:
    /// - Document with no authors and no messages
    #[must_use]
    pub fn new(locale_code: &str) -> Self {
        Self {
            locale_code: (!locale_code.is_empty()).then(|| locale_code.to_string()),
            authors: Vec::new(),
            messages: Vec::new(),
        }
    }

    /// Builder-style author list.
    #[must_use]
    pub fn with_authors<I, S>(mut self, authors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.authors = authors.into_iter().map(Into::into).collect();
        self
    }

    /// Builder-style message insertion.
    #[must_use]
    pub fn with_message(mut self, key: &str, value: &str) -> Self {
        self.insert(key, value);
        self
    }

    /// What: Insert or replace a message.
    ///
    /// Details:
    /// - A new key is appended; an existing key keeps its position and takes the new value
    pub fn insert(&mut self, key: &str, value: &str) {
        if let Some(slot) = self.messages.iter_mut().find(|(k, _)| k == key) {
            slot.1 = value.to_string();
        } else {
            self.messages.push((key.to_string(), value.to_string()));
        }
    }

    /// Locale code for logs and reports; `"unknown"` when absent.
    #[must_use]
    pub fn display_locale(&self) -> &str {
        self.locale_code.as_deref().unwrap_or(UNKNOWN_LOCALE)
    }

    /// Messages in document order.
    pub fn messages(&self) -> impl Iterator<Item = (&str, &str)> {
        self.messages.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// First message key in document order.
    #[must_use]
    pub fn first_key(&self) -> Option<&str> {
        self.messages.first().map(|(k, _)| k.as_str())
    }

    /// Number of messages.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.messages.len()
    }

    /// Whether the document has no messages.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// What: Parse a locale document from JSON text.
    ///
    /// Inputs:
    /// - `content`: File contents
    /// - `path`: Source path, used only for error reporting
    ///
    /// Output:
    /// - Parsed document, or `LocaleError::Parse` / `LocaleError::Invalid`
    ///
    /// # Errors
    /// - `Parse` when the text is not JSON even after relaxation
    /// - `Invalid` when the root is not an object, `messages` is absent or null,
    ///   or a field has the wrong shape
    ///
    /// Details:
    /// - Field names match case-insensitively (`LocaleCode`, `MESSAGES`, ...)
    /// - `//` and `/* */` comments and trailing commas are tolerated
    /// - A leading UTF-8 byte order mark is ignored
    pub fn from_json(content: &str, path: &Path) -> Result<Self> {
        let relaxed = relax_json(content);
        let value: Value =
            serde_json::from_str(&relaxed).map_err(|source| LocaleError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        let invalid = |reason: &str| LocaleError::Invalid {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        };

        let Value::Object(root) = value else {
            return Err(invalid("root is not a JSON object"));
        };

        let locale_code = match field(&root, "localeCode") {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) if s.is_empty() => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(_) => return Err(invalid("localeCode must be a string")),
        };

        let authors = match field(&root, "authors") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| item.as_str().map(str::to_string))
                .collect::<Option<Vec<_>>>()
                .ok_or_else(|| invalid("authors must be a list of strings"))?,
            Some(_) => return Err(invalid("authors must be a list of strings")),
        };

        let messages = match field(&root, "messages") {
            None | Some(Value::Null) => return Err(invalid("missing messages")),
            Some(Value::Object(table)) => {
                let mut messages = Vec::with_capacity(table.len());
                for (key, value) in table {
                    let Some(text) = value.as_str() else {
                        return Err(invalid(&format!("message '{key}' is not a string")));
                    };
                    messages.push((key.clone(), text.to_string()));
                }
                messages
            }
            Some(_) => return Err(invalid("messages must be an object")),
        };

        Ok(Self {
            locale_code,
            authors,
            messages,
        })
    }
}

/// Case-insensitive field lookup; the last spelling wins when a name repeats.
fn field<'a>(root: &'a Map<String, Value>, name: &str) -> Option<&'a Value> {
    root.iter()
        .rev()
        .find(|(k, _)| k.eq_ignore_ascii_case(name))
        .map(|(_, v)| v)
}

/// What: Turn commented JSON with trailing commas into strict JSON.
///
/// Details:
/// - String literals (including escaped quotes) are copied untouched
/// - Line comments keep their newline so parser line numbers stay close
/// - An unterminated block comment leaves the input untouched so the parser
///   rejects it
fn relax_json(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.trim_start_matches('\u{feff}').chars().peekable();
    let mut in_string = false;

    while let Some(c) = chars.next() {
        if in_string {
            out.push(c);
            match c {
                '\\' => {
                    if let Some(escaped) = chars.next() {
                        out.push(escaped);
                    }
                }
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' => {
                in_string = true;
                out.push(c);
            }
            '/' if chars.peek() == Some(&'/') => {
                for next in chars.by_ref() {
                    if next == '\n' {
                        out.push('\n');
                        break;
                    }
                }
            }
            '/' if chars.peek() == Some(&'*') => {
                chars.next();
                let mut prev = '\0';
                let mut closed = false;
                for next in chars.by_ref() {
                    if prev == '*' && next == '/' {
                        closed = true;
                        break;
                    }
                    if next == '\n' {
                        out.push('\n');
                    }
                    prev = next;
                }
                if !closed {
                    return input.to_string();
                }
                out.push(' ');
            }
            _ => out.push(c),
        }
    }

    strip_trailing_commas(&out)
}

/// Drop commas whose next significant character closes an object or array.
fn strip_trailing_commas(input: &str) -> String {
    let chars: Vec<char> = input.chars().collect();
    let mut out = String::with_capacity(input.len());
    let mut in_string = false;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if in_string {
            out.push(c);
            if c == '\\' {
                if let Some(&escaped) = chars.get(i + 1) {
                    out.push(escaped);
                    i += 1;
                }
            } else if c == '"' {
                in_string = false;
            }
        } else if c == '"' {
            in_string = true;
            out.push(c);
        } else if c == ',' {
            let next = chars[i + 1..].iter().find(|ch| !ch.is_whitespace());
            if !matches!(next, Some('}' | ']')) {
                out.push(c);
            }
        } else {
            out.push(c);
        }
        i += 1;
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(content: &str) -> Result<LocaleDocument> {
        LocaleDocument::from_json(content, Path::new("test.json"))
    }

    #[test]
    fn test_parse_full_document() {
        let doc = parse(
            r#"{
                "localeCode": "en-US",
                "authors": ["Name1", "Name2"],
                "messages": { "some.key": "Some Text", "other.key": "Other" }
            }"#,
        )
        .expect("document should parse");

        assert_eq!(doc.locale_code.as_deref(), Some("en-US"));
        assert_eq!(doc.authors, vec!["Name1", "Name2"]);
        assert_eq!(doc.len(), 2);
        assert_eq!(doc.first_key(), Some("some.key"));
    }

    #[test]
    fn test_parse_keeps_document_order() {
        let doc = parse(r#"{"messages": {"z.last": "1", "a.first": "2", "m.mid": "3"}}"#)
            .expect("document should parse");
        let keys: Vec<&str> = doc.messages().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["z.last", "a.first", "m.mid"]);
        assert_eq!(doc.first_key(), Some("z.last"));
    }

    #[test]
    fn test_parse_case_insensitive_fields() {
        let doc = parse(r#"{"LOCALECODE": "fr", "Authors": ["A"], "Messages": {"k": "v"}}"#)
            .expect("document should parse");
        assert_eq!(doc.locale_code.as_deref(), Some("fr"));
        assert_eq!(doc.authors, vec!["A"]);
        assert_eq!(doc.len(), 1);
    }

    #[test]
    fn test_parse_tolerates_comments_and_trailing_commas() {
        let doc = parse(
            r#"
            // header comment
            {
                "localeCode": "de", /* inline */
                "messages": {
                    "url": "http://example.com/path", // not a comment start inside the string
                    "quote": "say \"hi\", then /* stay */",
                },
            }
            "#,
        )
        .expect("relaxed JSON should parse");
        assert_eq!(doc.locale_code.as_deref(), Some("de"));
        let messages: Vec<(&str, &str)> = doc.messages().collect();
        assert_eq!(
            messages,
            vec![
                ("url", "http://example.com/path"),
                ("quote", "say \"hi\", then /* stay */"),
            ]
        );
    }

    #[test]
    fn test_parse_rejects_unterminated_block_comment() {
        let result = parse(r#"{"messages":{"a":"b"}} /* junk"#);
        assert!(matches!(result, Err(LocaleError::Parse { .. })));

        let inside = parse(r#"{"messages": /* never closed {"a":"b"}}"#);
        assert!(matches!(inside, Err(LocaleError::Parse { .. })));
    }

    #[test]
    fn test_parse_defaults_for_optional_fields() {
        let doc = parse(r#"{"messages": {}}"#).expect("document should parse");
        assert_eq!(doc.locale_code, None);
        assert_eq!(doc.display_locale(), UNKNOWN_LOCALE);
        assert!(doc.authors.is_empty());
        assert!(doc.is_empty());
    }

    #[test]
    fn test_parse_rejects_missing_or_null_messages() {
        let missing = parse(r#"{"localeCode": "en"}"#);
        assert!(matches!(missing, Err(LocaleError::Invalid { .. })));

        let null = parse(r#"{"localeCode": "en", "messages": null}"#);
        assert!(matches!(null, Err(LocaleError::Invalid { .. })));
    }

    #[test]
    fn test_parse_rejects_malformed_shapes() {
        assert!(matches!(parse("{ not json"), Err(LocaleError::Parse { .. })));
        assert!(matches!(parse("[1, 2]"), Err(LocaleError::Invalid { .. })));
        assert!(matches!(
            parse(r#"{"messages": {"k": 3}}"#),
            Err(LocaleError::Invalid { .. })
        ));
        assert!(matches!(
            parse(r#"{"messages": ["k"]}"#),
            Err(LocaleError::Invalid { .. })
        ));
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let doc = LocaleDocument::new("en")
            .with_message("a", "1")
            .with_message("b", "2")
            .with_message("a", "3");
        let messages: Vec<(&str, &str)> = doc.messages().collect();
        assert_eq!(messages, vec![("a", "3"), ("b", "2")]);
    }

    #[test]
    fn test_new_with_empty_code_is_unknown() {
        let doc = LocaleDocument::new("");
        assert_eq!(doc.locale_code, None);
        assert_eq!(doc.display_locale(), "unknown");
    }
}
