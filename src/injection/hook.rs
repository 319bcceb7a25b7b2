//! Fire-and-forget glue between host events and the coordinator.
//!
//! Host notifications are not awaited by anyone, so failures cannot travel
//! back. Every task started here goes through [`spawn_reported`], which logs
//! errors and panics at the task boundary and always completes normally.

use std::any::Any;
use std::fmt::Display;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use tokio::task::JoinHandle;

use crate::error::{LocaleError, Result};

use super::{Coordinator, InjectionOutcome};

/// What: Spawn a background task whose failures are only reported.
///
/// Inputs:
/// - `label`: Task name for logs
/// - `task`: Future returning `Result<()>`
///
/// Output:
/// - `JoinHandle<()>` that never yields a panic or error
///
/// Details:
/// - `Err` results are logged at error level
/// - Panics are caught and logged with their message
pub fn spawn_reported<F>(label: &'static str, task: F) -> JoinHandle<()>
where
    F: Future<Output = Result<()>> + Send + 'static,
{
    tokio::spawn(async move {
        match AssertUnwindSafe(task).catch_unwind().await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => tracing::error!(task = label, error = %e, "background locale task failed"),
            Err(payload) => tracing::error!(
                task = label,
                panic = %panic_message(payload.as_ref()),
                "background locale task panicked"
            ),
        }
    })
}

/// Best-effort text of a panic payload.
fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| (*s).to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string())
}

/// What: Hook the host's locale-variant load.
///
/// Inputs:
/// - `coordinator`: Shared coordinator
/// - `host_load`: The host's own load of the target variant
/// - `variant`: Locale code being loaded (`None` for the default locale)
///
/// Output:
/// - Handle of the reporting task (hosts may drop it)
///
/// Details:
/// - Waits for `host_load`, then injects on a blocking thread since the
///   coordination lock may block
/// - A failed host load is reported and no injection runs
pub fn on_target_variant_loaded<F, E>(
    coordinator: Arc<Coordinator>,
    host_load: F,
    variant: Option<String>,
) -> JoinHandle<()>
where
    F: Future<Output = std::result::Result<(), E>> + Send + 'static,
    E: Display + Send + 'static,
{
    spawn_reported("locale injection", async move {
        host_load
            .await
            .map_err(|e| LocaleError::Task(format!("host locale load failed: {e}")))?;

        let outcome =
            tokio::task::spawn_blocking(move || coordinator.on_load_completed(variant.as_deref()))
                .await?;
        if let InjectionOutcome::Completed(report) = &outcome {
            tracing::debug!(
                target_locale = %report.target,
                messages = report.messages,
                "locale injection task finished"
            );
        }
        Ok(())
    })
}

/// What: Schedule the startup load of every plugin's locale folder.
///
/// Inputs:
/// - `coordinator`: Shared coordinator
///
/// Output:
/// - Handle of the reporting task
///
/// Details:
/// - Sleeps for the configured startup delay after "engine ready", then merges
///   all locale files of all plugins without locale selection
pub fn schedule_startup_load(coordinator: Arc<Coordinator>) -> JoinHandle<()> {
    spawn_reported("startup locale load", async move {
        tokio::time::sleep(coordinator.settings().startup_delay()).await;
        tokio::task::spawn_blocking(move || coordinator.add_locales_from_all_plugins()).await?;
        Ok(())
    })
}
