//! INI serialization logic for converting `ConfigFile` → INI string.
//!
//! This module contains the `to_config_string()` function that produces
//! the commented INI representation written to `config.ini`.

use std::fmt::Write;
use std::path::Path;

use super::parser::LAYER_SECTION_PREFIX;
use super::settings::ConfigFile;
use crate::map::{LayerFilter, MapLayer};

/// Convert a `ConfigFile` to a commented INI string for saving.
pub(super) fn to_config_string(config: &ConfigFile) -> String {
    let marker_file = config
        .markers
        .file
        .as_ref()
        .map(|p| path_to_string(p))
        .unwrap_or_default();

    let mut out = format!(
        r#"[map]
; Tile layer URL template ({{s}}, {{z}}, {{x}}, {{y}} are substituted by the renderer)
tile_url = {}
tile_attribution = {}
; Markers are clustered below this zoom level
cluster_zoom_threshold = {}
; Show a popup with the grouped records when a marker is selected
enable_popup = {}
; Length of the search fly-to animation in milliseconds
fly_to_duration_ms = {}

[markers]
; JSON file holding an array of marker records (overridden by --markers)
file = {}
; Record fields holding the latitude and longitude
lat_field = {}
lng_field = {}
; Comma separated fields enabled for search; the first labels popup options
identifier_fields = {}

[marker_style]
radius = {}
fill_color = {}
opacity = {}
stroke = {}

[logging]
file = {}
"#,
        config.map.tile_url,
        config.map.tile_attribution,
        config.map.cluster_zoom_threshold,
        config.map.enable_popup,
        config.map.fly_to_duration_ms,
        marker_file,
        config.markers.lat_field,
        config.markers.lng_field,
        config.markers.identifier_fields.join(", "),
        config.marker_style.radius,
        config.marker_style.fill_color,
        config.marker_style.opacity,
        config.marker_style.stroke,
        path_to_string(&config.logging.file),
    );

    if config.layers.is_empty() {
        out.push_str(
            r#"
; Base layers are declared one section each, in display order:
;
; [layer:Streets]
; style = #3388ff
; filter = Open | #00aa00 | status | "open"
; filter = Level 1 | #aa0000 | level | 1
"#,
        );
    }
    for layer in &config.layers {
        write_layer(&mut out, layer);
    }

    out
}

fn write_layer(out: &mut String, layer: &MapLayer) {
    let _ = writeln!(out, "\n[{}{}]", LAYER_SECTION_PREFIX, layer.label);
    if let Some(style) = &layer.style {
        let _ = writeln!(out, "style = {}", style);
    }
    for filter in &layer.filters {
        let _ = writeln!(out, "filter = {}", filter_to_string(filter));
    }
}

fn filter_to_string(filter: &LayerFilter) -> String {
    format!(
        "{} | {} | {} | {}",
        filter.label, filter.color, filter.filter.field, filter.filter.value
    )
}

fn path_to_string(path: &Path) -> String {
    if let Some(home) = dirs::home_dir() {
        if let Ok(stripped) = path.strip_prefix(&home) {
            return format!("~/{}", stripped.display());
        }
    }
    path.display().to_string()
}
