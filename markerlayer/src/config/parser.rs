//! INI parsing logic for converting `Ini` → `ConfigFile`.
//!
//! This module contains the `parse_ini()` function and its helpers.
//! It is the single place where INI key names are mapped to struct fields.

use std::path::PathBuf;

use ini::{Ini, Properties};
use serde_json::Value;

use super::file::ConfigFileError;
use super::settings::ConfigFile;
use crate::map::{find_layer, LayerFilter, MapLayer};
use crate::marker::FilterPredicate;

/// Prefix of the section name declaring a base layer, e.g. `[layer:Streets]`.
pub const LAYER_SECTION_PREFIX: &str = "layer:";

/// Parse an `Ini` object into a `ConfigFile`.
///
/// Starts from `ConfigFile::default()` and overlays any values found in the INI.
pub(super) fn parse_ini(ini: &Ini) -> Result<ConfigFile, ConfigFileError> {
    let mut config = ConfigFile::default();

    // [map] section
    if let Some(section) = ini.section(Some("map")) {
        if let Some(v) = non_empty(section.get("tile_url")) {
            config.map.tile_url = v.to_string();
        }
        if let Some(v) = non_empty(section.get("tile_attribution")) {
            config.map.tile_attribution = v.to_string();
        }
        if let Some(v) = section.get("cluster_zoom_threshold") {
            config.map.cluster_zoom_threshold =
                v.trim().parse().map_err(|_| ConfigFileError::InvalidValue {
                    section: "map".to_string(),
                    key: "cluster_zoom_threshold".to_string(),
                    value: v.to_string(),
                    reason: "must be a zoom level between 0 and 255".to_string(),
                })?;
        }
        if let Some(v) = section.get("enable_popup") {
            config.map.enable_popup = parse_bool(v);
        }
        if let Some(v) = section.get("fly_to_duration_ms") {
            config.map.fly_to_duration_ms =
                v.trim().parse().map_err(|_| ConfigFileError::InvalidValue {
                    section: "map".to_string(),
                    key: "fly_to_duration_ms".to_string(),
                    value: v.to_string(),
                    reason: "must be a positive integer (milliseconds)".to_string(),
                })?;
        }
    }

    // [markers] section
    if let Some(section) = ini.section(Some("markers")) {
        if let Some(v) = non_empty(section.get("file")) {
            config.markers.file = Some(expand_tilde(v));
        }
        if let Some(v) = non_empty(section.get("lat_field")) {
            config.markers.lat_field = v.to_string();
        }
        if let Some(v) = non_empty(section.get("lng_field")) {
            config.markers.lng_field = v.to_string();
        }
        if let Some(v) = section.get("identifier_fields") {
            config.markers.identifier_fields = parse_list(v);
        }
    }

    // [marker_style] section
    if let Some(section) = ini.section(Some("marker_style")) {
        if let Some(v) = section.get("radius") {
            config.marker_style.radius = v
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|r| r.is_finite() && *r > 0.0)
                .ok_or_else(|| ConfigFileError::InvalidValue {
                    section: "marker_style".to_string(),
                    key: "radius".to_string(),
                    value: v.to_string(),
                    reason: "must be a positive number of pixels".to_string(),
                })?;
        }
        if let Some(v) = non_empty(section.get("fill_color")) {
            config.marker_style.fill_color = v.to_string();
        }
        if let Some(v) = section.get("opacity") {
            config.marker_style.opacity = v
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|o| (0.0..=1.0).contains(o))
                .ok_or_else(|| ConfigFileError::InvalidValue {
                    section: "marker_style".to_string(),
                    key: "opacity".to_string(),
                    value: v.to_string(),
                    reason: "must be between 0.0 and 1.0".to_string(),
                })?;
        }
        if let Some(v) = section.get("stroke") {
            config.marker_style.stroke = parse_bool(v);
        }
    }

    // [logging] section
    if let Some(section) = ini.section(Some("logging")) {
        if let Some(v) = non_empty(section.get("file")) {
            config.logging.file = expand_tilde(v);
        }
    }

    // [layer:<label>] sections, in file order
    for (name, section) in ini.iter() {
        let Some(label) = name.and_then(|n| n.strip_prefix(LAYER_SECTION_PREFIX)) else {
            continue;
        };
        let layer = parse_layer(name.unwrap_or_default(), label.trim(), section)?;
        if find_layer(&config.layers, &layer.label).is_some() {
            return Err(ConfigFileError::InvalidValue {
                section: name.unwrap_or_default().to_string(),
                key: "label".to_string(),
                value: layer.label,
                reason: "layer labels must be unique".to_string(),
            });
        }
        config.layers.push(layer);
    }

    Ok(config)
}

fn parse_layer(
    section_name: &str,
    label: &str,
    section: &Properties,
) -> Result<MapLayer, ConfigFileError> {
    if label.is_empty() {
        return Err(ConfigFileError::InvalidValue {
            section: section_name.to_string(),
            key: "label".to_string(),
            value: String::new(),
            reason: "layer label must not be empty".to_string(),
        });
    }

    let mut layer = MapLayer::new(label);
    if let Some(v) = non_empty(section.get("style")) {
        layer = layer.with_style(v);
    }
    for entry in section.get_all("filter") {
        let filter = parse_filter(entry).ok_or_else(|| ConfigFileError::InvalidValue {
            section: section_name.to_string(),
            key: "filter".to_string(),
            value: entry.to_string(),
            reason: "expected 'label | color | field | value'".to_string(),
        })?;
        layer = layer.with_filter(filter);
    }
    Ok(layer)
}

/// Parse a `label | color | field | value` filter entry.
///
/// The value is read as a JSON literal (`1`, `true`, `"1"`) and falls back
/// to a bare string when it is not one.
pub(super) fn parse_filter(entry: &str) -> Option<LayerFilter> {
    let mut parts = entry.splitn(4, '|').map(str::trim);
    let label = parts.next().filter(|s| !s.is_empty())?;
    let color = parts.next()?;
    let field = parts.next().filter(|s| !s.is_empty())?;
    let raw = parts.next()?;

    let value = serde_json::from_str::<Value>(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
    Some(LayerFilter::new(label, color, FilterPredicate::new(field, value)))
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Parse a boolean value from config.
pub(super) fn parse_bool(value: &str) -> bool {
    let v = value.trim().to_lowercase();
    v == "true" || v == "1" || v == "yes" || v == "on"
}

/// Expand ~ to home directory in paths.
pub(super) fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn load(content: &str) -> Result<ConfigFile, ConfigFileError> {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.ini");
        std::fs::write(&config_path, content).unwrap();
        ConfigFile::load_from(&config_path)
    }

    #[test]
    fn test_map_and_marker_sections() {
        let config = load(
            r#"
[map]
cluster_zoom_threshold = 12
enable_popup = false
fly_to_duration_ms = 250

[markers]
file = /data/stops.json
lat_field = latitude
lng_field = longitude
identifier_fields = name, code
"#,
        )
        .unwrap();

        assert_eq!(config.map.cluster_zoom_threshold, 12);
        assert!(!config.map.enable_popup);
        assert_eq!(config.map.fly_to_duration_ms, 250);
        assert_eq!(config.markers.file, Some(PathBuf::from("/data/stops.json")));
        assert_eq!(config.markers.lat_field, "latitude");
        assert_eq!(config.markers.lng_field, "longitude");
        assert_eq!(
            config.markers.identifier_fields,
            vec!["name".to_string(), "code".to_string()]
        );
    }

    #[test]
    fn test_empty_identifier_list_disables_search() {
        let config = load("[markers]\nidentifier_fields =\n").unwrap();
        assert!(config.markers.identifier_fields.is_empty());
    }

    #[test]
    fn test_invalid_zoom_threshold() {
        let err = load("[map]\ncluster_zoom_threshold = high\n").unwrap_err();
        assert!(err.to_string().contains("map.cluster_zoom_threshold"));
    }

    #[test]
    fn test_marker_style() {
        let config = load(
            r#"
[marker_style]
radius = 5.5
fill_color = #3388ff
opacity = 0.6
stroke = yes
"#,
        )
        .unwrap();

        assert_eq!(config.marker_style.radius, 5.5);
        assert_eq!(config.marker_style.fill_color, "#3388ff");
        assert_eq!(config.marker_style.opacity, 0.6);
        assert!(config.marker_style.stroke);
    }

    #[test]
    fn test_opacity_out_of_range() {
        let err = load("[marker_style]\nopacity = 1.5\n").unwrap_err();
        assert!(matches!(err, ConfigFileError::InvalidValue { ref key, .. } if key == "opacity"));
    }

    #[test]
    fn test_layers_keep_file_order() {
        let config = load(
            r#"
[layer:Streets]
style = #ff0000
filter = Open | #00aa00 | status | "open"
filter = Closed | #aa0000 | status | "closed"

[layer:Satellite]
style = #333333
"#,
        )
        .unwrap();

        assert_eq!(config.layers.len(), 2);
        let streets = &config.layers[0];
        assert_eq!(streets.label, "Streets");
        assert_eq!(streets.style.as_deref(), Some("#ff0000"));
        assert_eq!(streets.filters.len(), 2);
        assert_eq!(streets.filters[1].label, "Closed");
        assert_eq!(streets.filters[1].filter.value, json!("closed"));
        assert_eq!(config.layers[1].label, "Satellite");
        assert!(config.layers[1].filters.is_empty());
    }

    #[test]
    fn test_filter_values_are_typed() {
        let numeric = parse_filter("One | red | kind | 1").unwrap();
        assert_eq!(numeric.filter.value, json!(1));

        let text = parse_filter("One | red | kind | \"1\"").unwrap();
        assert_eq!(text.filter.value, json!("1"));

        let bare = parse_filter("Parks | green | kind | park").unwrap();
        assert_eq!(bare.filter.value, json!("park"));
        assert_eq!(bare.filter.field, "kind");
        assert_eq!(bare.color, "green");
    }

    #[test]
    fn test_malformed_filter() {
        assert!(parse_filter("Parks | green").is_none());
        assert!(parse_filter(" | green | kind | 1").is_none());

        let err = load("[layer:Streets]\nfilter = Parks | green\n").unwrap_err();
        assert!(err.to_string().contains("layer:Streets.filter"));
    }

    #[test]
    fn test_empty_layer_label() {
        assert!(load("[layer:]\nstyle = red\n").is_err());
    }

    #[test]
    fn test_parse_bool() {
        assert!(parse_bool("true"));
        assert!(parse_bool(" ON "));
        assert!(parse_bool("1"));
        assert!(!parse_bool("no"));
        assert!(!parse_bool(""));
    }

    #[test]
    fn test_expand_tilde() {
        assert_eq!(expand_tilde("/abs/path"), PathBuf::from("/abs/path"));
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_tilde("~/markers.json"), home.join("markers.json"));
        }
    }
}
