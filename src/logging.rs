//! File-based logging.
//!
//! Logs never go to stdout: the TUI owns the terminal and `run` owns stdout.

use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{InitError, RollingFileAppender, Rotation};

/// Errors raised while setting up the log file.
#[derive(Debug, thiserror::Error)]
pub enum LogError {
    #[error("log file path {0} has no file name")]
    NoFileName(PathBuf),

    #[error("failed to open log file {path}: {source}")]
    Open { path: PathBuf, source: InitError },
}

/// Open (creating directories as needed) the log file at `log_path`.
///
/// Appends to an existing file and never rotates.
pub fn file_appender(log_path: &Path) -> Result<RollingFileAppender, LogError> {
    let file_name = log_path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| LogError::NoFileName(log_path.to_path_buf()))?;
    let log_dir = match log_path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };

    RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name)
        .build(log_dir)
        .map_err(|source| LogError::Open {
            path: log_path.to_path_buf(),
            source,
        })
}

/// Initialise the global subscriber writing to `log_path`.
///
/// `RUST_LOG` takes precedence over `level`. The returned guard must live
/// until exit so buffered lines are flushed.
pub fn init_logging(level: &str, log_path: &Path) -> Result<WorkerGuard, LogError> {
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender(log_path)?);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(env_filter)
        .with_ansi(false)
        .init();

    Ok(guard)
}
