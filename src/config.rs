//! Settings for the locale injector and where to find them.
//!
//! Settings live in `locale-injector.yml`:
//!
//! ```yaml
//! default_locale: en
//! dedup_window_ms: 500
//! refresh_sentinel: "-"
//! locale_dir: Locale
//! file_extension: json
//! default_authors: ["My Mod Team"]
//! startup_delay_ms: 5000
//! ```
//!
//! Every key is optional.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::error::{LocaleError, Result};
use crate::i18n::selection::DEFAULT_FALLBACK_LOCALE;

/// Application directory name under the XDG config home.
const APP_DIR: &str = "locale-injector";
/// Settings file name.
const CONFIG_FILE: &str = "locale-injector.yml";

/// Tunables for selection, deduplication and discovery.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Fallback locale, also the target when an event names no variant.
    pub default_locale: String,
    /// Repeated triggers for the same target inside this window are dropped.
    pub dedup_window_ms: u64,
    /// Target value meaning "refresh", never a real locale switch.
    pub refresh_sentinel: String,
    /// Name of the per-plugin locale folder.
    pub locale_dir: String,
    /// Locale file extension, without the dot.
    pub file_extension: String,
    /// Authors credited for runtime-added strings when the caller names none.
    pub default_authors: Vec<String>,
    /// Delay between "engine ready" and the startup load of all plugin folders.
    pub startup_delay_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_locale: DEFAULT_FALLBACK_LOCALE.to_string(),
            dedup_window_ms: 500,
            refresh_sentinel: "-".to_string(),
            locale_dir: "Locale".to_string(),
            file_extension: "json".to_string(),
            default_authors: Vec::new(),
            startup_delay_ms: 5000,
        }
    }
}

impl Settings {
    /// Dedup window as a `Duration`.
    #[must_use]
    pub const fn dedup_window(&self) -> Duration {
        Duration::from_millis(self.dedup_window_ms)
    }

    /// Startup delay as a `Duration`.
    #[must_use]
    pub const fn startup_delay(&self) -> Duration {
        Duration::from_millis(self.startup_delay_ms)
    }

    /// What: Read settings from a YAML file.
    ///
    /// Inputs:
    /// - `path`: Settings file
    ///
    /// Output:
    /// - Parsed settings; missing keys take their defaults
    ///
    /// # Errors
    /// - `LocaleError::Config` when the file cannot be read or parsed
    pub fn from_file(path: &Path) -> Result<Self> {
        let config_error = |reason: String| LocaleError::Config {
            path: path.to_path_buf(),
            reason,
        };
        let contents = fs::read_to_string(path).map_err(|e| config_error(e.to_string()))?;
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        let settings: Self =
            serde_norway::from_str(&contents).map_err(|e| config_error(e.to_string()))?;
        if settings.default_locale.trim().is_empty() {
            return Err(config_error("default_locale cannot be empty".to_string()));
        }
        Ok(settings)
    }

    /// What: Load settings, never failing.
    ///
    /// Inputs:
    /// - `explicit`: Path given on the command line, if any
    ///
    /// Output:
    /// - Settings from the first config file found, or defaults
    ///
    /// Details:
    /// - Unreadable or malformed files are logged and replaced by defaults
    #[must_use]
    pub fn load(explicit: Option<&Path>) -> Self {
        let Some(path) = find_config_file(
            explicit,
            env::var("XDG_CONFIG_HOME").ok().as_deref(),
            env::var("HOME").ok().as_deref(),
        ) else {
            tracing::debug!("no settings file found, using defaults");
            return Self::default();
        };
        match Self::from_file(&path) {
            Ok(settings) => {
                tracing::debug!(path = %path.display(), "loaded settings");
                settings
            }
            Err(e) => {
                tracing::warn!(error = %e, "ignoring settings file, using defaults");
                Self::default()
            }
        }
    }
}

/// What: Find the settings file.
///
/// Inputs:
/// - `explicit`: Path from the command line
/// - `xdg_config_home`: Value of `XDG_CONFIG_HOME`, if set
/// - `home`: Value of `HOME`, if set
///
/// Output:
/// - `Some(PathBuf)` pointing to the first existing file found, or `None`
///
/// Details:
/// - An explicit path is returned even when missing so the caller reports it
/// - Then `$XDG_CONFIG_HOME/locale-injector/locale-injector.yml`, then
///   `$HOME/.config/locale-injector/locale-injector.yml`
#[must_use]
pub fn find_config_file(
    explicit: Option<&Path>,
    xdg_config_home: Option<&str>,
    home: Option<&str>,
) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    let mut candidates: Vec<PathBuf> = Vec::new();
    if let Some(xdg) = xdg_config_home.filter(|x| !x.trim().is_empty()) {
        candidates.push(Path::new(xdg).join(APP_DIR).join(CONFIG_FILE));
    }
    if let Some(h) = home {
        candidates.push(Path::new(h).join(".config").join(APP_DIR).join(CONFIG_FILE));
    }
    candidates.into_iter().find(|p| p.is_file())
}

/// Config directory: `$XDG_CONFIG_HOME/locale-injector` or `$HOME/.config/locale-injector`.
#[must_use]
pub fn config_dir() -> PathBuf {
    if let Ok(p) = env::var("XDG_CONFIG_HOME")
        && !p.trim().is_empty()
    {
        return PathBuf::from(p).join(APP_DIR);
    }
    let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".config").join(APP_DIR)
}

/// Logs directory under config (ensured to exist when possible).
#[must_use]
pub fn logs_dir() -> PathBuf {
    let dir = config_dir().join("logs");
    let _ = fs::create_dir_all(&dir);
    dir
}
