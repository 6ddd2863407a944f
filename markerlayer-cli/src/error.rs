//! CLI error handling with user-friendly messages.
//!
//! Centralizes error handling for the CLI, providing consistent formatting
//! and appropriate exit codes.

use std::fmt;
use std::process;

use markerlayer::config::ConfigFileError;
use markerlayer::source::RecordSourceError;

/// CLI-specific errors with user-friendly messages.
#[derive(Debug)]
pub enum CliError {
    /// Failed to initialize logging
    LoggingInit(String),
    /// Configuration file could not be read or written
    ConfigFile(ConfigFileError),
    /// No marker file was given on the command line or in config.ini
    NoMarkerFile,
    /// Marker file could not be loaded
    Records(RecordSourceError),
    /// The active layer has no filter with this label
    UnknownFilter { layer: String, label: String },
    /// Search found no record
    NotFound { field: String, value: String },
    /// Failed to serialize the GeoJSON export
    Export(serde_json::Error),
    /// Failed to write output file
    FileWrite { path: String, error: std::io::Error },
    /// Failed to start the async runtime
    Runtime(std::io::Error),
}

impl CliError {
    /// Exit the process with an appropriate error message and code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        match self {
            CliError::NoMarkerFile => {
                eprintln!();
                eprintln!("Pass a marker file with --markers <FILE>, or set it in config.ini:");
                eprintln!("  [markers]");
                eprintln!("  file = ~/markers.json");
            }
            CliError::UnknownFilter { .. } => {
                eprintln!();
                eprintln!("Use 'markerlayer layers' to list the filters of each layer.");
            }
            CliError::NotFound { .. } => {
                eprintln!();
                eprintln!("Only fields listed in [markers] identifier_fields are searchable.");
                process::exit(2)
            }
            _ => {}
        }

        process::exit(1)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(msg) => write!(f, "Failed to initialize logging: {}", msg),
            CliError::ConfigFile(e) => write!(f, "{}", e),
            CliError::NoMarkerFile => write!(f, "No marker file configured"),
            CliError::Records(e) => write!(f, "Failed to load markers: {}", e),
            CliError::UnknownFilter { layer, label } => {
                write!(f, "Layer '{}' has no filter '{}'", layer, label)
            }
            CliError::NotFound { field, value } => {
                write!(f, "No marker with {} = '{}'", field, value)
            }
            CliError::Export(e) => write!(f, "Failed to serialize GeoJSON: {}", e),
            CliError::FileWrite { path, error } => {
                write!(f, "Failed to write file '{}': {}", path, error)
            }
            CliError::Runtime(e) => write!(f, "Failed to start async runtime: {}", e),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::ConfigFile(e) => Some(e),
            CliError::Records(e) => Some(e),
            CliError::Export(e) => Some(e),
            CliError::FileWrite { error, .. } => Some(error),
            CliError::Runtime(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigFileError> for CliError {
    fn from(e: ConfigFileError) -> Self {
        CliError::ConfigFile(e)
    }
}

impl From<RecordSourceError> for CliError {
    fn from(e: RecordSourceError) -> Self {
        CliError::Records(e)
    }
}
