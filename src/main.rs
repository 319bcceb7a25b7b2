//! locale-injector binary: runs one injection against a plugin directory the
//! way a host would, then optionally prints the merged store.

mod args;

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, OnceLock};

use clap::Parser;
use locale_injector::i18n::{HostStore, StoreProvider, detect_system_locale};
use locale_injector::{Coordinator, DirectoryRegistry, Settings, on_target_variant_loaded};

/// Local-time timestamps for log lines.
struct LocalTimer;

impl tracing_subscriber::fmt::time::FormatTime for LocalTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> fmt::Result {
        w.write_str(&chrono::Local::now().format("%Y-%m-%d-T %H:%M:%S").to_string())
    }
}

/// Keeps the non-blocking log writer flushing until exit.
static LOG_GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();

/// What: Initialize tracing, preferring the log file over stderr.
///
/// Inputs:
/// - `level`: Default filter when `RUST_LOG` is unset
fn init_logging(level: &str) {
    let env_filter = || {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level))
    };
    let mut log_path = locale_injector::config::logs_dir();
    log_path.push("locale-injector.log");
    match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
    {
        Ok(file) => {
            let (non_blocking, guard) = tracing_appender::non_blocking(file);
            tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_target(false)
                .with_ansi(false)
                .with_writer(non_blocking)
                .with_timer(LocalTimer)
                .init();
            let _ = LOG_GUARD.set(guard);
            tracing::info!(path = %log_path.display(), "logging initialized");
        }
        Err(e) => {
            // Fallback: stderr logger so a read-only config dir does not block the run
            tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_target(false)
                .with_ansi(true)
                .with_writer(std::io::stderr)
                .with_timer(LocalTimer)
                .init();
            tracing::warn!(error = %e, "failed to open log file; using stderr");
        }
    }
}

#[tokio::main]
async fn main() {
    let args = args::Args::parse();
    init_logging(&args::determine_log_level(&args));

    let settings = Settings::load(args.config.as_deref());
    let target = args::resolve_target_locale(
        args.locale.as_deref(),
        detect_system_locale(),
        &settings.default_locale,
    );
    tracing::info!(target_locale = %target, plugins = %args.plugins.display(), "locale-injector starting");

    let host = Arc::new(HostStore::ready());
    let coordinator = Arc::new(Coordinator::new(
        settings,
        Arc::new(DirectoryRegistry::new(&args.plugins)),
        Arc::clone(&host) as Arc<dyn StoreProvider>,
    ));

    let host_load = async { Ok::<(), std::convert::Infallible>(()) };
    if let Err(e) = on_target_variant_loaded(Arc::clone(&coordinator), host_load, Some(target)).await
    {
        tracing::error!(error = %e, "injection task did not finish");
    }

    let Some(store) = host.messages() else {
        tracing::error!("message store missing after injection");
        return;
    };
    tracing::info!(
        messages = store.len(),
        plugins = coordinator.index().snapshot().len(),
        "locale-injector finished"
    );

    if args.print {
        let sorted: BTreeMap<String, String> = store.snapshot().into_iter().collect();
        match serde_json::to_string_pretty(&sorted) {
            Ok(json) => println!("{json}"),
            Err(e) => tracing::error!(error = %e, "failed to render message store"),
        }
    }
}
