//! Injection of plugin locales into the live message store.
//!
//! # Overview
//!
//! The host loads a locale variant, then notifies us ("load completed for
//! target T"). For every such event the [`Coordinator`]:
//!
//! 1. ignores the refresh sentinel (`-`) outright,
//! 2. takes the coordination lock (all injections and runtime merges are serialized),
//! 3. abandons the attempt when the host store is not initialized,
//! 4. drops the event when the same target was injected less than the dedup
//!    window ago (500ms by default),
//! 5. otherwise records `(T, now)`, then for every plugin loads its `Locale/`
//!    files, selects the documents matching T (or the default locale as a
//!    fallback) and merges them with `force = true`.
//!
//! Nothing in here returns an error to the event source. Per-file failures are
//! logged and skipped; failures escaping a whole event are caught by
//! [`hook::spawn_reported`].

pub mod api;
pub mod hook;

use std::collections::BTreeSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Instant;

use crate::config::Settings;
use crate::i18n::loader::{load_all, plugin_locale_files};
use crate::i18n::merge::{LocaleStore, merge_into};
use crate::i18n::selection::select;
use crate::i18n::store::StoreProvider;
use crate::plugins::{PluginInfo, PluginRegistry};

/// Last injected target and when it ran.
#[derive(Debug, Default, Clone)]
struct DedupState {
    last_target: Option<String>,
    last_at: Option<Instant>,
}

impl DedupState {
    /// Whether `target` at `now` repeats the previous injection inside `window`.
    ///
    /// Targets compare case-insensitively; the stored target keeps its original case.
    fn is_duplicate(&self, target: &str, now: Instant, window: std::time::Duration) -> bool {
        match (&self.last_target, self.last_at) {
            (Some(last), Some(at)) => {
                last.eq_ignore_ascii_case(target) && now.saturating_duration_since(at) < window
            }
            _ => false,
        }
    }
}

/// Plugins known to ship at least one locale file.
///
/// Append-only bookkeeping; merging never consults it.
#[derive(Debug, Default)]
pub struct PluginLocaleIndex {
    plugins: Mutex<BTreeSet<String>>,
}

impl PluginLocaleIndex {
    /// Record a plugin id.
    pub fn track(&self, plugin_id: &str) {
        self.plugins
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(plugin_id.to_string());
    }

    /// Whether a plugin id was recorded.
    #[must_use]
    pub fn contains(&self, plugin_id: &str) -> bool {
        self.plugins
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(plugin_id)
    }

    /// Recorded ids, sorted.
    #[must_use]
    pub fn snapshot(&self) -> Vec<String> {
        self.plugins
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .cloned()
            .collect()
    }
}

/// Aggregate counts of one completed injection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InjectionReport {
    /// Target locale the injection ran for.
    pub target: String,
    /// Plugins that had at least one locale file.
    pub plugins: usize,
    /// Messages written (every key of every merged document).
    pub messages: usize,
    /// Plugins whose documents came from the default-locale fallback.
    pub fallback_plugins: usize,
    /// Locale files that failed to read or parse.
    pub skipped_files: usize,
}

/// What happened to one load-completed event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InjectionOutcome {
    /// Refresh sentinel; nothing done, dedup state untouched.
    Refresh,
    /// Same target inside the dedup window; nothing done.
    Duplicate,
    /// Host store not initialized; nothing done.
    StoreUnavailable,
    /// Injection ran.
    Completed(InjectionReport),
}

/// Serializes locale injection and runtime merges into the host store.
///
/// Build one per host process and share it (`Arc<Coordinator>`) with the event
/// hook and the runtime API. Tests build a fresh one each.
pub struct Coordinator {
    settings: Settings,
    registry: Arc<dyn PluginRegistry>,
    stores: Arc<dyn StoreProvider>,
    state: Mutex<DedupState>,
    index: PluginLocaleIndex,
}

impl std::fmt::Debug for Coordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Coordinator")
            .field("settings", &self.settings)
            .field("state", &self.state)
            .field("index", &self.index)
            .finish_non_exhaustive()
    }
}

impl Coordinator {
    /// Coordinator over a plugin registry and the host's store slot.
    pub fn new(
        settings: Settings,
        registry: Arc<dyn PluginRegistry>,
        stores: Arc<dyn StoreProvider>,
    ) -> Self {
        Self {
            settings,
            registry,
            stores,
            state: Mutex::new(DedupState::default()),
            index: PluginLocaleIndex::default(),
        }
    }

    /// Active settings.
    #[must_use]
    pub const fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Plugins seen with locale files so far.
    #[must_use]
    pub const fn index(&self) -> &PluginLocaleIndex {
        &self.index
    }

    /// What: Handle "locale variant load completed".
    ///
    /// Inputs:
    /// - `variant`: Locale code of the loaded variant; `None` means the default locale
    ///
    /// Output:
    /// - `InjectionOutcome` describing what was done
    ///
    /// Details:
    /// - Blocks while another injection or runtime merge holds the lock
    pub fn on_load_completed(&self, variant: Option<&str>) -> InjectionOutcome {
        self.run(variant, Instant::now)
    }

    /// Same as [`Self::on_load_completed`] with the event time supplied by the caller.
    pub fn on_load_completed_at(&self, variant: Option<&str>, now: Instant) -> InjectionOutcome {
        self.run(variant, || now)
    }

    /// Shared body of the event handlers; `clock` is read after the lock is taken.
    fn run(&self, variant: Option<&str>, clock: impl FnOnce() -> Instant) -> InjectionOutcome {
        let target = variant.unwrap_or(&self.settings.default_locale);
        if target == self.settings.refresh_sentinel {
            tracing::debug!(target_locale = target, "skipping locale injection for refresh trigger");
            return InjectionOutcome::Refresh;
        }

        let mut state = self.lock_state();

        let Some(store) = self.stores.store() else {
            tracing::warn!(
                target_locale = target,
                "locale load completed but store is not ready, skipping locale injection"
            );
            return InjectionOutcome::StoreUnavailable;
        };

        let now = clock();
        if state.is_duplicate(target, now, self.settings.dedup_window()) {
            tracing::debug!(target_locale = target, "duplicate locale trigger suppressed");
            return InjectionOutcome::Duplicate;
        }
        state.last_target = Some(target.to_string());
        state.last_at = Some(now);

        tracing::debug!(target_locale = target, "injecting plugin locales");
        let report = self.inject_all(store.as_ref(), target);
        if report.plugins > 0 {
            tracing::info!(
                target_locale = target,
                messages = report.messages,
                plugins = report.plugins,
                fallback_plugins = report.fallback_plugins,
                "injected plugin locale messages"
            );
        }
        InjectionOutcome::Completed(report)
    }

    /// Merge matching documents of every plugin. Caller holds the lock.
    fn inject_all(&self, store: &dyn LocaleStore, target: &str) -> InjectionReport {
        let mut report = InjectionReport {
            target: target.to_string(),
            ..InjectionReport::default()
        };
        let plugins = self.registry.plugins();
        if plugins.is_empty() {
            tracing::debug!("no plugins loaded, nothing to inject");
            return report;
        }

        for plugin in &plugins {
            let files = self.locale_files(plugin);
            if files.is_empty() {
                continue;
            }
            tracing::debug!(plugin = %plugin.id, files = files.len(), "loading plugin locales");

            let candidates = load_all(&files);
            report.skipped_files += files.len() - candidates.len();

            let selection = select(&candidates, target, &self.settings.default_locale);
            if selection.used_fallback && !selection.selected.is_empty() {
                report.fallback_plugins += 1;
            }
            for doc in &selection.selected {
                let merged = merge_into(store, doc, true);
                tracing::debug!(
                    plugin = %plugin.id,
                    locale = doc.display_locale(),
                    messages = merged,
                    fallback = selection.used_fallback,
                    "merged locale document"
                );
                report.messages += merged;
            }

            self.index.track(&plugin.id);
            report.plugins += 1;
        }
        report
    }

    /// Locale files of one plugin according to the settings.
    fn locale_files(&self, plugin: &PluginInfo) -> Vec<std::path::PathBuf> {
        plugin_locale_files(
            &plugin.locale_dir(&self.settings.locale_dir),
            &self.settings.file_extension,
        )
    }

    /// Take the coordination lock; a panic in a previous holder leaves the
    /// state consistent, so poisoning is ignored.
    fn lock_state(&self) -> MutexGuard<'_, DedupState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::store::HostStore;
    use crate::plugins::StaticRegistry;
    use crate::test_utils::plugin_with_locales;
    use std::time::Duration;
    use tempfile::TempDir;

    fn coordinator(plugins: Vec<PluginInfo>, host: &Arc<HostStore>) -> Coordinator {
        Coordinator::new(
            Settings::default(),
            Arc::new(StaticRegistry::new(plugins)),
            Arc::clone(host) as Arc<dyn StoreProvider>,
        )
    }

    fn two_plugins(root: &std::path::Path) -> Vec<PluginInfo> {
        vec![
            plugin_with_locales(
                root,
                "plugin-a",
                &[("en.json", r#"{"localeCode":"en","messages":{"a.b":"Hello"}}"#)],
            ),
            plugin_with_locales(
                root,
                "plugin-b",
                &[("fr.json", r#"{"localeCode":"fr","messages":{"a.b":"Bonjour"}}"#)],
            ),
        ]
    }

    fn completed(outcome: InjectionOutcome) -> InjectionReport {
        match outcome {
            InjectionOutcome::Completed(report) => report,
            other => panic!("expected completed injection, got {other:?}"),
        }
    }

    #[test]
    fn test_dedup_suppresses_repeat_inside_window() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory for test");
        let host = Arc::new(HostStore::ready());
        let coordinator = coordinator(two_plugins(temp_dir.path()), &host);
        let start = Instant::now();

        let first = completed(coordinator.on_load_completed_at(Some("en"), start));
        assert_eq!(first.messages, 1);
        assert_eq!(
            coordinator.on_load_completed_at(Some("en"), start + Duration::from_millis(100)),
            InjectionOutcome::Duplicate
        );
        let third = completed(
            coordinator.on_load_completed_at(Some("en"), start + Duration::from_millis(700)),
        );
        assert_eq!(third.messages, 1);
    }

    #[test]
    fn test_dedup_window_measured_from_last_injection() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory for test");
        let host = Arc::new(HostStore::ready());
        let coordinator = coordinator(two_plugins(temp_dir.path()), &host);
        let start = Instant::now();

        completed(coordinator.on_load_completed_at(Some("en"), start));
        // Suppressed attempts do not refresh the timestamp.
        assert_eq!(
            coordinator.on_load_completed_at(Some("en"), start + Duration::from_millis(400)),
            InjectionOutcome::Duplicate
        );
        completed(coordinator.on_load_completed_at(Some("en"), start + Duration::from_millis(600)));
    }

    #[test]
    fn test_dedup_ignores_target_case() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory for test");
        let host = Arc::new(HostStore::ready());
        let coordinator = coordinator(two_plugins(temp_dir.path()), &host);
        let start = Instant::now();

        let first = completed(coordinator.on_load_completed_at(Some("en"), start));
        assert_eq!(first.target, "en");
        assert_eq!(
            coordinator.on_load_completed_at(Some("EN"), start + Duration::from_millis(100)),
            InjectionOutcome::Duplicate
        );
        let later = completed(
            coordinator.on_load_completed_at(Some("EN"), start + Duration::from_millis(600)),
        );
        assert_eq!(later.target, "EN");
    }

    #[test]
    fn test_different_target_is_not_a_duplicate() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory for test");
        let host = Arc::new(HostStore::ready());
        let coordinator = coordinator(two_plugins(temp_dir.path()), &host);
        let start = Instant::now();

        completed(coordinator.on_load_completed_at(Some("en"), start));
        let report = completed(
            coordinator.on_load_completed_at(Some("fr"), start + Duration::from_millis(10)),
        );
        assert_eq!(report.target, "fr");
        let store = host.messages().expect("store is ready");
        assert_eq!(store.get("a.b").as_deref(), Some("Bonjour"));
    }

    #[test]
    fn test_refresh_sentinel_never_injects_or_updates_state() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory for test");
        let host = Arc::new(HostStore::ready());
        let coordinator = coordinator(two_plugins(temp_dir.path()), &host);
        let start = Instant::now();

        assert_eq!(
            coordinator.on_load_completed_at(Some("-"), start),
            InjectionOutcome::Refresh
        );
        assert!(host.messages().expect("store is ready").is_empty());

        completed(coordinator.on_load_completed_at(Some("en"), start));
        assert_eq!(
            coordinator.on_load_completed_at(Some("-"), start + Duration::from_millis(50)),
            InjectionOutcome::Refresh
        );
        // The sentinel did not reset the window for "en".
        assert_eq!(
            coordinator.on_load_completed_at(Some("en"), start + Duration::from_millis(100)),
            InjectionOutcome::Duplicate
        );
    }

    #[test]
    fn test_store_unavailable_abandons_without_dedup_update() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory for test");
        let host = Arc::new(HostStore::new());
        let coordinator = coordinator(two_plugins(temp_dir.path()), &host);
        let start = Instant::now();

        assert_eq!(
            coordinator.on_load_completed_at(Some("en"), start),
            InjectionOutcome::StoreUnavailable
        );
        host.initialize();
        let report = completed(
            coordinator.on_load_completed_at(Some("en"), start + Duration::from_millis(10)),
        );
        assert_eq!(report.messages, 1);
    }

    #[test]
    fn test_missing_variant_targets_default_locale() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory for test");
        let host = Arc::new(HostStore::ready());
        let coordinator = coordinator(two_plugins(temp_dir.path()), &host);

        let report = completed(coordinator.on_load_completed(None));
        assert_eq!(report.target, "en");
        assert_eq!(
            host.messages().expect("store is ready").get("a.b").as_deref(),
            Some("Hello")
        );
    }

    #[test]
    fn test_fallback_and_bad_files_are_counted() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory for test");
        let plugin = plugin_with_locales(
            temp_dir.path(),
            "plugin-c",
            &[
                ("en.json", r#"{"localeCode":"en","messages":{"c.one":"One","c.two":"Two"}}"#),
                ("broken.json", "{ broken"),
                ("nested/invalid.json", r#"{"localeCode":"es"}"#),
            ],
        );
        let host = Arc::new(HostStore::ready());
        let coordinator = coordinator(vec![plugin], &host);

        let report = completed(coordinator.on_load_completed(Some("es")));
        assert_eq!(report.plugins, 1);
        assert_eq!(report.messages, 2);
        assert_eq!(report.fallback_plugins, 1);
        assert_eq!(report.skipped_files, 2);
        assert!(coordinator.index().contains("plugin-c"));
    }

    #[test]
    fn test_no_plugins_is_a_noop() {
        let host = Arc::new(HostStore::ready());
        let coordinator = coordinator(Vec::new(), &host);
        let report = completed(coordinator.on_load_completed(Some("en")));
        assert_eq!(report.plugins, 0);
        assert_eq!(report.messages, 0);
    }

    #[test]
    fn test_plugins_without_locale_folder_are_not_tracked() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory for test");
        let bare = PluginInfo::new("bare", temp_dir.path().join("bare"));
        let host = Arc::new(HostStore::ready());
        let coordinator = coordinator(vec![bare], &host);

        let report = completed(coordinator.on_load_completed(Some("en")));
        assert_eq!(report.plugins, 0);
        assert!(coordinator.index().snapshot().is_empty());
    }
}
