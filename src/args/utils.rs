//! Shared utilities for argument processing.

/// What: Determine the log level based on command-line arguments.
///
/// Inputs:
/// - `args`: Parsed command-line arguments.
///
/// Output:
/// - Log level string (trace, debug, info, warn, error).
///
/// Details:
/// - Verbose flag overrides `log_level` argument.
pub fn determine_log_level(args: &crate::args::Args) -> String {
    if args.verbose {
        "debug".to_string()
    } else {
        args.log_level.clone()
    }
}

/// What: Pick the locale to inject.
///
/// Inputs:
/// - `explicit`: `--locale` value, if given
/// - `detected`: System locale, if detectable
/// - `default_locale`: Configured default locale
///
/// Output:
/// - First non-blank value in that order
pub fn resolve_target_locale(
    explicit: Option<&str>,
    detected: Option<String>,
    default_locale: &str,
) -> String {
    explicit
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .or_else(|| detected.filter(|l| !l.trim().is_empty()))
        .unwrap_or_else(|| default_locale.to_string())
}
