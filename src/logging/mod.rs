//! Logging and observability
//!
//! Structured logging with the `tracing` crate: a console layer for the
//! operator and, when a work directory is known, a JSON file layer writing
//! `aspex-export.log` inside it. Per-item export detail goes to the log;
//! the console carries run lifecycle and the final report.

use crate::domain::{AspexError, Result};
use std::path::Path;
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Name of the run log file inside the work directory
pub const LOG_FILE_NAME: &str = "aspex-export.log";

/// Guard that must be kept alive for the duration of the program
/// to ensure file logs are flushed properly
pub struct LoggingGuard {
    _file_guard: Option<WorkerGuard>,
}

/// Initialize the logging system
///
/// Sets up a console layer filtered to `log_level_str`, plus a JSON file
/// layer when `log_dir` is given. Returns a [`LoggingGuard`] that must be
/// kept alive for the duration of the program.
///
/// # Errors
///
/// Returns an error if the level string is invalid or the log directory
/// cannot be created.
pub fn init_logging(log_level_str: &str, log_dir: Option<&Path>) -> Result<LoggingGuard> {
    let log_level = parse_log_level(log_level_str)?;
    let filter = || {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(format!("aspex={log_level}")))
    };

    let mut layers = Vec::new();

    let console_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_filter(filter());
    layers.push(console_layer.boxed());

    let file_guard = if let Some(dir) = log_dir {
        std::fs::create_dir_all(dir).map_err(|e| {
            AspexError::Io(format!(
                "failed to create log directory {}: {e}",
                dir.display()
            ))
        })?;

        let file_appender = tracing_appender::rolling::never(dir, LOG_FILE_NAME);
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        let file_layer = tracing_subscriber::fmt::layer()
            .json()
            .with_ansi(false)
            .with_writer(non_blocking)
            .with_filter(filter());
        layers.push(file_layer.boxed());

        Some(guard)
    } else {
        None
    };

    tracing_subscriber::registry().with(layers).init();

    tracing::info!(
        level = log_level_str,
        file_logging = log_dir.is_some(),
        "logging initialized"
    );

    Ok(LoggingGuard { _file_guard: file_guard })
}

/// Parse log level from string
fn parse_log_level(level_str: &str) -> Result<Level> {
    match level_str.to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        _ => Err(AspexError::Configuration(format!(
            "Invalid log level: {level_str}. Must be one of: trace, debug, info, warn, error"
        ))),
    }
}
