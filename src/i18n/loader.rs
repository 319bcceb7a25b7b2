//! Locale file discovery and loading.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{LocaleError, Result};
use crate::i18n::document::LocaleDocument;

/// What: Load one locale file and parse it into a `LocaleDocument`.
///
/// Inputs:
/// - `path`: Path to a `*.json` locale file
///
/// Output:
/// - `Result<LocaleDocument>` with the parsed document
///
/// # Errors
/// - `LocaleError::Read` when the file does not exist or cannot be read
/// - `LocaleError::Invalid` when the file is empty or lacks `messages`
/// - `LocaleError::Parse` when the content is not JSON
pub fn load_locale_file(path: &Path) -> Result<LocaleDocument> {
    let contents = fs::read_to_string(path).map_err(|source| LocaleError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    if contents.trim().is_empty() {
        return Err(LocaleError::Invalid {
            path: path.to_path_buf(),
            reason: "file is empty".to_string(),
        });
    }

    LocaleDocument::from_json(&contents, path)
}

/// What: Load every readable, valid locale document from a list of paths.
///
/// Inputs:
/// - `paths`: Candidate files, in the order they should be applied
///
/// Output:
/// - Parsed documents in input order; failed paths produce no entry
///
/// Details:
/// - Read and parse failures are logged and skipped, never fatal for the batch
/// - Never touches a message store
#[must_use]
pub fn load_all<P: AsRef<Path>>(paths: &[P]) -> Vec<LocaleDocument> {
    paths
        .iter()
        .filter_map(|path| {
            let path = path.as_ref();
            match load_locale_file(path) {
                Ok(doc) => {
                    tracing::debug!(
                        file = %path.display(),
                        locale = doc.display_locale(),
                        messages = doc.len(),
                        "loaded locale file"
                    );
                    Some(doc)
                }
                Err(e) => {
                    tracing::warn!(error = %e, "skipping locale file");
                    None
                }
            }
        })
        .collect()
}

/// What: Find every locale file under a plugin's locale folder.
///
/// Inputs:
/// - `locale_dir`: The plugin's `Locale/` folder
/// - `extension`: File extension to collect, without the dot (usually `json`)
///
/// Output:
/// - Sorted list of matching files, searched recursively
///
/// Details:
/// - A missing or unreadable folder yields an empty list
/// - Extension comparison is case-insensitive
#[must_use]
pub fn plugin_locale_files(locale_dir: &Path, extension: &str) -> Vec<PathBuf> {
    let mut files = Vec::new();
    if locale_dir.is_dir() {
        collect_files(locale_dir, extension, &mut files);
    }
    files.sort();
    files
}

/// Recursive walk helper for [`plugin_locale_files`].
fn collect_files(dir: &Path, extension: &str, out: &mut Vec<PathBuf>) {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!(dir = %dir.display(), error = %e, "cannot list locale folder");
            return;
        }
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_files(&path, extension, out);
        } else if path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(extension))
        {
            out.push(path);
        }
    }
}
