//! Runtime locale injection for plugin hosts.
//!
//! Plugins ship `Locale/*.json` files. When the host finishes loading a locale
//! variant, the [`injection::Coordinator`] picks each plugin's documents for
//! that locale (falling back to English) and merges them into the host's live
//! message store without dropping existing entries.

pub mod config;
pub mod config_locale;
pub mod error;
pub mod i18n;
pub mod injection;
pub mod plugins;

#[cfg(test)]
mod test_utils;

pub use config::Settings;
pub use config_locale::ConfigLocale;
pub use error::{LocaleError, Result};
pub use injection::hook::{on_target_variant_loaded, schedule_startup_load, spawn_reported};
pub use injection::{Coordinator, InjectionOutcome, InjectionReport, PluginLocaleIndex};
pub use plugins::{DirectoryRegistry, PluginInfo, PluginRegistry, StaticRegistry};
