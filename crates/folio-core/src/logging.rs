//! Log file setup.
//!
//! The TUI owns stdout, so logs go to `$FOLIO_HOME/logs/folio.log` through a
//! non-blocking writer. The returned guard must be held until exit or
//! buffered lines are lost.

use std::path::Path;

use anyhow::{Context, Result, anyhow};
pub use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Environment variable holding an env-filter directive.
pub const LOG_ENV: &str = "FOLIO_LOG";

pub const LOG_FILE: &str = "folio.log";

/// Builds the filter: `FOLIO_LOG` wins over `default_level`.
///
/// # Errors
/// Returns an error if the directive is not valid env-filter syntax.
pub fn filter(default_level: &str) -> Result<EnvFilter> {
    match std::env::var(LOG_ENV) {
        Ok(directive) if !directive.trim().is_empty() => EnvFilter::try_new(&directive)
            .with_context(|| format!("Invalid {LOG_ENV} directive '{directive}'")),
        _ => EnvFilter::try_new(default_level)
            .with_context(|| format!("Invalid log_level '{default_level}'")),
    }
}

/// Installs the global subscriber writing to `dir/folio.log`.
///
/// # Errors
/// Returns an error if the directory cannot be created, the filter is
/// invalid or a global subscriber is already installed.
pub fn init(dir: &Path, default_level: &str) -> Result<WorkerGuard> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;

    let filter = filter(default_level)?;
    let appender = tracing_appender::rolling::never(dir, LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|e| anyhow!(e))
        .context("Failed to install log subscriber")?;

    Ok(guard)
}
