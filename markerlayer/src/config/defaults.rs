//! Default values and the `ConfigFile::default()` implementation.

use std::path::PathBuf;

use super::settings::*;
use crate::map::{
    MarkerStyle, DEFAULT_CLUSTER_ZOOM_THRESHOLD, DEFAULT_FLY_TO_DURATION,
    DEFAULT_IDENTIFIER_FIELD, DEFAULT_TILE_ATTRIBUTION, DEFAULT_TILE_URL,
};
use crate::marker::{DEFAULT_LAT_FIELD, DEFAULT_LNG_FIELD};

/// Name of the per-user configuration directory under `$HOME`.
pub const CONFIG_DIR_NAME: &str = ".markerlayer";

/// Configuration file name inside [`CONFIG_DIR_NAME`].
pub const CONFIG_FILE_NAME: &str = "config.ini";

/// Default log file name.
pub const DEFAULT_LOG_FILE_NAME: &str = "markerlayer.log";

/// Get the path to the config directory (~/.markerlayer).
pub fn config_directory() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_DIR_NAME)
}

/// Get the path to the config file (~/.markerlayer/config.ini).
pub fn config_file_path() -> PathBuf {
    config_directory().join(CONFIG_FILE_NAME)
}

/// Default log file (~/.markerlayer/logs/markerlayer.log).
pub fn default_log_path() -> PathBuf {
    config_directory().join("logs").join(DEFAULT_LOG_FILE_NAME)
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            tile_url: DEFAULT_TILE_URL.to_string(),
            tile_attribution: DEFAULT_TILE_ATTRIBUTION.to_string(),
            cluster_zoom_threshold: DEFAULT_CLUSTER_ZOOM_THRESHOLD,
            enable_popup: true,
            fly_to_duration_ms: DEFAULT_FLY_TO_DURATION.as_millis() as u64,
        }
    }
}

impl Default for MarkerSettings {
    fn default() -> Self {
        Self {
            file: None,
            lat_field: DEFAULT_LAT_FIELD.to_string(),
            lng_field: DEFAULT_LNG_FIELD.to_string(),
            identifier_fields: vec![DEFAULT_IDENTIFIER_FIELD.to_string()],
        }
    }
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            map: MapSettings::default(),
            markers: MarkerSettings::default(),
            marker_style: MarkerStyle::default(),
            logging: LoggingSettings {
                file: default_log_path(),
            },
            layers: Vec::new(),
        }
    }
}
