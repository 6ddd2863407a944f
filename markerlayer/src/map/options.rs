//! Options a [`MarkerMap`](super::MarkerMap) is created with.

use std::time::Duration;

use super::layer::MapLayer;
use super::surface::MarkerStyle;
use crate::config::ConfigFile;
use crate::marker::CoordinateFields;

/// Identifier field used when none is configured.
pub const DEFAULT_IDENTIFIER_FIELD: &str = "name";

/// Zoom level at and above which markers are no longer clustered.
pub const DEFAULT_CLUSTER_ZOOM_THRESHOLD: u8 = 15;

/// Default duration of a search fly-to animation.
pub const DEFAULT_FLY_TO_DURATION: Duration = Duration::from_millis(800);

/// Default base tile URL (OpenStreetMap).
pub const DEFAULT_TILE_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";

/// Default tile attribution text.
pub const DEFAULT_TILE_ATTRIBUTION: &str =
    "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors";

/// Host-facing map configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct MapOptions {
    pub tile_url: String,
    pub tile_attribution: String,
    pub fields: CoordinateFields,
    /// Fields enabled for search. The first one also labels popup options.
    pub identifier_fields: Vec<String>,
    pub layers: Vec<MapLayer>,
    pub enable_popup: bool,
    pub cluster_zoom_threshold: u8,
    pub fly_to_duration: Duration,
    pub marker_style: MarkerStyle,
}

impl MapOptions {
    /// Build options from a loaded configuration file.
    pub fn from_config(config: &ConfigFile) -> Self {
        Self {
            tile_url: config.map.tile_url.clone(),
            tile_attribution: config.map.tile_attribution.clone(),
            fields: CoordinateFields::new(&config.markers.lat_field, &config.markers.lng_field),
            identifier_fields: config.markers.identifier_fields.clone(),
            layers: config.layers.clone(),
            enable_popup: config.map.enable_popup,
            cluster_zoom_threshold: config.map.cluster_zoom_threshold,
            fly_to_duration: Duration::from_millis(config.map.fly_to_duration_ms),
            marker_style: config.marker_style.clone(),
        }
    }

    pub fn with_layers(mut self, layers: Vec<MapLayer>) -> Self {
        self.layers = layers;
        self
    }

    pub fn with_identifier_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.identifier_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_fields(mut self, fields: CoordinateFields) -> Self {
        self.fields = fields;
        self
    }

    pub fn with_popup(mut self, enabled: bool) -> Self {
        self.enable_popup = enabled;
        self
    }

    pub fn with_fly_to_duration(mut self, duration: Duration) -> Self {
        self.fly_to_duration = duration;
        self
    }

    /// Whether markers are clustered at `zoom`.
    pub fn clustering_enabled(&self, zoom: u8) -> bool {
        zoom < self.cluster_zoom_threshold
    }
}

impl Default for MapOptions {
    fn default() -> Self {
        Self {
            tile_url: DEFAULT_TILE_URL.to_string(),
            tile_attribution: DEFAULT_TILE_ATTRIBUTION.to_string(),
            fields: CoordinateFields::default(),
            identifier_fields: vec![DEFAULT_IDENTIFIER_FIELD.to_string()],
            layers: Vec::new(),
            enable_popup: true,
            cluster_zoom_threshold: DEFAULT_CLUSTER_ZOOM_THRESHOLD,
            fly_to_duration: DEFAULT_FLY_TO_DURATION,
            marker_style: MarkerStyle::default(),
        }
    }
}
