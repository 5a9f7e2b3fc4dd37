//! Logging setup. The TUI owns the terminal, so logs go to a file.

use anyhow::Result;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const LOG_FILE: &str = "portal.log";

/// Directory for the log file (~/.local/state/mob-portal, or the data dir elsewhere)
pub fn log_dir() -> Option<PathBuf> {
    dirs::state_dir()
        .or_else(dirs::data_local_dir)
        .map(|d| d.join("mob-portal"))
}

/// RUST_LOG wins, then the configured level, then "info"
fn build_filter(config_level: Option<&str>) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config_level.unwrap_or("info")))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Initialize logging. Keep the returned guard alive so buffered lines are flushed.
/// Returns None (logging disabled) when no writable log directory exists.
pub fn init(config_level: Option<&str>) -> Result<Option<WorkerGuard>> {
    let Some(dir) = log_dir() else {
        return Ok(None);
    };
    if std::fs::create_dir_all(&dir).is_err() {
        return Ok(None);
    }

    let appender = tracing_appender::rolling::never(&dir, LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false),
        )
        .with(build_filter(config_level))
        .try_init()?;

    tracing::info!("mob-portal v{} started", env!("CARGO_PKG_VERSION"));
    Ok(Some(guard))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_level_falls_back() {
        // Must not panic on garbage from the config file
        let _ = build_filter(Some("[[not a filter"));
        let _ = build_filter(None);
    }
}
