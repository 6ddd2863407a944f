//! CLI runner for common setup and operations.
//!
//! Encapsulates config loading, logging initialization, marker loading and
//! map creation to reduce duplication across command handlers.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use markerlayer::config::{config_file_path, ConfigFile};
use markerlayer::log::TracingLogger;
use markerlayer::logging::{default_log_file, init_logging, LoggingGuard};
use markerlayer::map::{MapOptions, MarkerMap, Viewport};
use markerlayer::marker::Record;
use markerlayer::source::load_records;
use tracing::info;

use crate::error::CliError;

/// Global options shared by every command.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Config file to use instead of ~/.markerlayer/config.ini
    pub config: Option<PathBuf>,
    /// Marker file overriding `[markers] file`
    pub markers: Option<PathBuf>,
    /// Debug-level logging mirrored to stderr
    pub debug: bool,
}

impl GlobalOptions {
    /// Config file path in effect.
    pub fn config_path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(config_file_path)
    }
}

/// Runner that manages CLI lifecycle and common operations.
pub struct CliRunner {
    /// Logging guard - keeps logging active while runner exists
    #[allow(dead_code)]
    logging_guard: LoggingGuard,
    /// Loaded configuration file
    config: ConfigFile,
    markers: Option<PathBuf>,
}

impl CliRunner {
    /// Create a new CLI runner, loading config and initializing logging.
    pub fn new(options: &GlobalOptions) -> Result<Self, CliError> {
        // Load config file (or use defaults if not present)
        let config = ConfigFile::load_from(&options.config_path())?;

        let log_path = &config.logging.file;
        let log_dir = log_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        let log_file = log_path
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| default_log_file().to_string());
        let level = if options.debug { "debug" } else { "info" };

        let logging_guard = init_logging(&log_dir, &log_file, options.debug, level)
            .map_err(|e| CliError::LoggingInit(e.to_string()))?;

        let markers = options.markers.clone().or_else(|| config.markers.file.clone());

        Ok(Self {
            logging_guard,
            config,
            markers,
        })
    }

    /// Get the loaded configuration.
    pub fn config(&self) -> &ConfigFile {
        &self.config
    }

    /// Log startup information for a command.
    pub fn log_startup(&self, command: &str) {
        info!("MarkerLayer v{}", markerlayer::VERSION);
        info!("MarkerLayer CLI: {} command", command);
    }

    /// Load the marker records from the file given on the command line or
    /// in config.ini.
    pub fn load_records(&self) -> Result<Vec<Record>, CliError> {
        let path = self.markers.as_ref().ok_or(CliError::NoMarkerFile)?;
        Ok(load_records(path)?)
    }

    /// Build a map over the configured records.
    ///
    /// Library logging goes through [`TracingLogger`].
    pub fn create_map(&self, viewport: Arc<dyn Viewport>) -> Result<MarkerMap, CliError> {
        let records = self.load_records()?;
        let options = MapOptions::from_config(&self.config);
        Ok(MarkerMap::new(options, records, viewport, Arc::new(TracingLogger)))
    }

    /// Write `content` to `path`.
    pub fn write_output(&self, path: &Path, content: &str) -> Result<(), CliError> {
        std::fs::write(path, content).map_err(|e| CliError::FileWrite {
            path: path.display().to_string(),
            error: e,
        })?;
        info!("Wrote {} bytes to {}", content.len(), path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_path_override() {
        let options = GlobalOptions {
            config: Some(PathBuf::from("/tmp/other.ini")),
            ..Default::default()
        };
        assert_eq!(options.config_path(), PathBuf::from("/tmp/other.ini"));
        assert_eq!(GlobalOptions::default().config_path(), config_file_path());
    }
}
