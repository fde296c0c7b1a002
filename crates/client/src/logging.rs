//! File logging for the terminal client.
//!
//! The terminal is the game screen, so logs only go to a file under the
//! platform cache directory.
use std::path::PathBuf;

use anyhow::Result;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Platform-specific log directory.
///
/// - macOS: `~/Library/Caches/dungeon/logs`
/// - Linux: `~/.cache/dungeon/logs` (or `$XDG_CACHE_HOME/dungeon/logs`)
/// - Windows: `%LOCALAPPDATA%\dungeon\logs`
/// - Fallback: `/tmp/dungeon/logs`
pub fn log_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "dungeon")
        .map(|dirs| dirs.cache_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("/tmp/dungeon"))
        .join("logs")
}

/// Install the global subscriber. Keep the returned guard alive until exit
/// so buffered lines are flushed.
pub fn setup_logging() -> Result<WorkerGuard> {
    let log_dir = log_dir();
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = tracing_appender::rolling::never(&log_dir, "client.log");
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .try_init()?;

    tracing::info!("Log file: {}/client.log", log_dir.display());
    Ok(guard)
}
