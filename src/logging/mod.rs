//! Tracing subscriber initialization.
//!
//! The library only emits `tracing` events; hosts that have no subscriber of their own can
//! route them to a file with [`init`] and watch it with `tail -f`.

use crate::config::ResolvedConfig;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "info";

/// Error type for logging initialization failures.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// Failed to create log directory
    #[error("Failed to create log directory at {path:?}: {source}")]
    DirectoryCreation {
        /// The directory path that failed to be created
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Invalid log file path (no filename component)
    #[error("Invalid log file path: {0:?}")]
    InvalidPath(PathBuf),

    /// Log path has no parent directory
    #[error("Log path has no parent directory: {0:?}")]
    NoParentDirectory(PathBuf),

    /// Tracing subscriber already initialized
    #[error("Tracing subscriber already initialized")]
    SubscriberAlreadySet,
}

/// Split a log file path into the directory and file name the appender needs.
///
/// # Errors
/// [`LoggingError::InvalidPath`] without a UTF-8 file name,
/// [`LoggingError::NoParentDirectory`] without a parent.
pub fn split_log_path(log_path: &Path) -> Result<(&Path, &str), LoggingError> {
    let file_name = log_path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| LoggingError::InvalidPath(log_path.to_path_buf()))?;

    let directory = log_path
        .parent()
        .ok_or_else(|| LoggingError::NoParentDirectory(log_path.to_path_buf()))?;

    Ok((directory, file_name))
}

/// Initialize file logging with the [`DEFAULT_FILTER`].
///
/// See [`init_with_filter`].
pub fn init(log_path: &Path) -> Result<(), LoggingError> {
    init_with_filter(log_path, DEFAULT_FILTER)
}

/// Initialize file logging at the configured log path.
pub fn init_from_config(config: &ResolvedConfig) -> Result<(), LoggingError> {
    init(&config.log_file_path)
}

/// Initialize the tracing subscriber with file-based logging.
///
/// Respects `RUST_LOG`; falls back to `default_filter` when it is unset or invalid.
/// Creates the log directory if it doesn't exist; the directory is created even when a
/// subscriber is already installed.
///
/// # Errors
/// `Err(LoggingError)` if the path is unusable, directory creation failed, or a global
/// subscriber was already set.
pub fn init_with_filter(log_path: &Path, default_filter: &str) -> Result<(), LoggingError> {
    use tracing_subscriber::EnvFilter;

    let (directory, file_name) = split_log_path(log_path)?;

    std::fs::create_dir_all(directory).map_err(|source| LoggingError::DirectoryCreation {
        path: directory.to_path_buf(),
        source,
    })?;

    let file_appender = tracing_appender::rolling::never(directory, file_name);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(file_appender)
        .with_ansi(false) // No ANSI colors in log files
        .try_init()
        .map_err(|_| LoggingError::SubscriberAlreadySet)
}
