//! File-based logging setup.
//!
//! The TUI owns stdout/stderr, so logs go to daily-rolling files under
//! `<home>/logs/`. Level selection follows `RUST_LOG` with an info default
//! for the shelf crates.

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

const DEFAULT_DIRECTIVES: &str = "shelf=info,shelf_core=info,shelf_tui=info";

/// Initializes the global tracing subscriber writing to the logs directory.
///
/// Returns the appender guard; hold it for the life of the process or
/// buffered lines are lost on exit.
///
/// # Errors
/// Returns an error if the logs directory cannot be created.
pub fn init() -> Result<WorkerGuard> {
    init_in(&crate::config::paths::logs_dir())
}

/// Initializes logging into a specific directory.
///
/// # Errors
/// Returns an error if the directory cannot be created.
pub fn init_in(dir: &std::path::Path) -> Result<WorkerGuard> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;

    let appender = tracing_appender::rolling::daily(dir, "shelf.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .init();

    Ok(guard)
}
