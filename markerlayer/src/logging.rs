//! Logging infrastructure for MarkerLayer.
//!
//! Provides structured logging with file output and optional console output:
//! - Writes to the configured log file (cleared on session start)
//! - Optionally mirrors to stderr, keeping stdout free for command output
//! - Configurable via RUST_LOG environment variable

use std::fs;
use std::io;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Guard that must be kept alive for the duration of logging.
///
/// Dropping this guard will flush and close the log file writer.
pub struct LoggingGuard {
    _file_guard: WorkerGuard,
}

/// Initialize logging system.
///
/// Creates the log directory if needed, clears the previous log file and
/// installs the global subscriber.
///
/// # Arguments
///
/// * `log_dir` - Directory for log files
/// * `log_file` - Log filename (e.g., "markerlayer.log")
/// * `console` - Also print log lines to stderr
/// * `default_level` - Filter used when RUST_LOG is not set
///
/// # Errors
///
/// Returns error if the log directory cannot be created, the log file
/// cannot be cleared, or a global subscriber is already installed.
pub fn init_logging(
    log_dir: &Path,
    log_file: &str,
    console: bool,
    default_level: &str,
) -> Result<LoggingGuard, io::Error> {
    prepare_log_file(log_dir, log_file)?;

    let file_appender = tracing_appender::rolling::never(log_dir, log_file);
    let (non_blocking_file, file_guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);

    let console_layer = console.then(|| {
        tracing_subscriber::fmt::layer()
            .with_writer(io::stderr)
            .with_ansi(true)
            .compact()
    });

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(console_layer)
        .try_init()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;

    Ok(LoggingGuard {
        _file_guard: file_guard,
    })
}

/// Create `log_dir` and truncate `log_file` inside it.
pub fn prepare_log_file(log_dir: &Path, log_file: &str) -> Result<(), io::Error> {
    fs::create_dir_all(log_dir)?;
    fs::write(log_dir.join(log_file), "")
}

/// Get default log file name.
pub fn default_log_file() -> &'static str {
    crate::config::DEFAULT_LOG_FILE_NAME
}
