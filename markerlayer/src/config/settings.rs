//! Settings structs for all configuration sections.
//!
//! Each struct represents one `[section]` of the INI config file.
//! These are pure data types with no parsing or serialization logic.

use std::path::PathBuf;

use crate::map::{MapLayer, MarkerStyle};

/// Complete application configuration loaded from config.ini.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigFile {
    /// Base map and interaction settings
    pub map: MapSettings,
    /// Marker source and field names
    pub markers: MarkerSettings,
    /// Circle marker appearance
    pub marker_style: MarkerStyle,
    /// Logging settings
    pub logging: LoggingSettings,
    /// Base layers, one per `[layer:<label>]` section, in file order
    pub layers: Vec<MapLayer>,
}

/// `[map]` section.
#[derive(Debug, Clone, PartialEq)]
pub struct MapSettings {
    pub tile_url: String,
    pub tile_attribution: String,
    /// Markers are clustered below this zoom level
    pub cluster_zoom_threshold: u8,
    pub enable_popup: bool,
    /// Search fly-to animation length
    pub fly_to_duration_ms: u64,
}

/// `[markers]` section.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerSettings {
    /// JSON file holding the marker records
    pub file: Option<PathBuf>,
    pub lat_field: String,
    pub lng_field: String,
    /// Searchable fields, comma separated in the file
    pub identifier_fields: Vec<String>,
}

/// `[logging]` section.
#[derive(Debug, Clone, PartialEq)]
pub struct LoggingSettings {
    /// Log file path
    pub file: PathBuf,
}
