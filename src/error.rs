//! Error taxonomy for locale loading and injection.
//!
//! Every variant here is recoverable: callers log it and move on. Nothing in
//! the injection path is allowed to surface one of these to the host.

use std::path::PathBuf;

use thiserror::Error;

/// Failures raised while loading, merging, or injecting locale documents.
#[derive(Error, Debug)]
pub enum LocaleError {
    /// The locale file could not be read from disk.
    #[error("failed to read locale file {}: {source}", .path.display())]
    Read {
        /// File that failed to read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The locale file is not valid JSON (after comment/trailing-comma relaxation).
    #[error("failed to parse locale file {}: {source}", .path.display())]
    Parse {
        /// File that failed to parse.
        path: PathBuf,
        /// Underlying JSON failure.
        #[source]
        source: serde_json::Error,
    },

    /// The document parsed but is structurally unusable (e.g. no `messages`).
    #[error("invalid locale file {}: {reason}", .path.display())]
    Invalid {
        /// Offending file.
        path: PathBuf,
        /// Human-readable reason.
        reason: String,
    },

    /// The destination message store has not finished initializing.
    #[error("locale store is not available yet")]
    StoreUnavailable,

    /// The settings file exists but could not be used.
    #[error("invalid configuration {}: {reason}", .path.display())]
    Config {
        /// Settings file path.
        path: PathBuf,
        /// Human-readable reason.
        reason: String,
    },

    /// A fire-and-forget task failed to join or panicked.
    #[error("background locale task failed: {0}")]
    Task(String),
}

impl From<tokio::task::JoinError> for LocaleError {
    fn from(e: tokio::task::JoinError) -> Self {
        Self::Task(e.to_string())
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, LocaleError>;
