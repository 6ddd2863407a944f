//! User configuration.
//!
//! Settings are read from `~/.markerlayer/config.ini`. Every key is optional;
//! missing keys keep their defaults.
//!
//! ```ini
//! [map]
//! cluster_zoom_threshold = 15
//!
//! [markers]
//! file = ~/stops.json
//! identifier_fields = name, code
//!
//! [layer:Streets]
//! style = #3388ff
//! filter = Open | #00aa00 | status | "open"
//! ```
//!
//! # Example
//!
//! ```
//! use markerlayer::config::ConfigFile;
//! use markerlayer::map::MapOptions;
//!
//! let config = ConfigFile::default();
//! let options = MapOptions::from_config(&config);
//! assert_eq!(options.identifier_fields, vec!["name".to_string()]);
//! ```

mod defaults;
mod file;
mod parser;
mod settings;
mod writer;

pub use defaults::{
    config_directory, config_file_path, default_log_path, CONFIG_DIR_NAME, CONFIG_FILE_NAME,
    DEFAULT_LOG_FILE_NAME,
};
pub use file::ConfigFileError;
pub use parser::LAYER_SECTION_PREFIX;
pub use settings::{ConfigFile, LoggingSettings, MapSettings, MarkerSettings};
