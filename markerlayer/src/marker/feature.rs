//! Point features and the collection handed to the map renderer.
//!
//! A [`FeatureCollection`] serializes as GeoJSON. Each feature's
//! `properties` is the array of records sharing its coordinate rather than a
//! single object, which is the shape the popup works from.

use std::fmt;

use serde::ser::{SerializeStruct, Serializer};
use serde::Serialize;

use super::record::Record;
use crate::search::RecordLocation;

/// A geographic position in GeoJSON axis order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    /// Longitude in degrees.
    pub lon: f64,
    /// Latitude in degrees.
    pub lat: f64,
}

impl Coordinates {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// Returns `[lon, lat]`.
    pub fn to_array(self) -> [f64; 2] {
        [self.lon, self.lat]
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.lon, self.lat)
    }
}

/// A single map point aggregating every record at one coordinate.
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    pub coordinates: Coordinates,
    /// Records in input order. Never empty for aggregated features.
    pub properties: Vec<Record>,
}

impl Feature {
    /// The record at `index` within this feature.
    pub fn record(&self, index: usize) -> Option<&Record> {
        self.properties.get(index)
    }

    /// The first record, which supplied the feature's coordinates.
    pub fn first_record(&self) -> Option<&Record> {
        self.properties.first()
    }
}

#[derive(Serialize)]
struct PointGeometry {
    #[serde(rename = "type")]
    kind: &'static str,
    coordinates: [f64; 2],
}

impl Serialize for Feature {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Feature", 3)?;
        state.serialize_field("type", "Feature")?;
        state.serialize_field(
            "geometry",
            &PointGeometry {
                kind: "Point",
                coordinates: self.coordinates.to_array(),
            },
        )?;
        state.serialize_field("properties", &self.properties)?;
        state.end()
    }
}

/// Ordered features for the current data and filter state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureCollection {
    features: Vec<Feature>,
}

impl FeatureCollection {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_features(features: Vec<Feature>) -> Self {
        Self { features }
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Feature> {
        self.features.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Feature> {
        self.features.iter()
    }

    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    /// Resolve a search location to its record.
    pub fn record(&self, location: RecordLocation) -> Option<&Record> {
        self.get(location.feature)?.record(location.record)
    }

    /// Number of records across all features.
    pub fn record_count(&self) -> usize {
        self.features.iter().map(|f| f.properties.len()).sum()
    }

    /// Serialize as a GeoJSON string.
    pub fn to_geojson(&self, pretty: bool) -> serde_json::Result<String> {
        if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        }
    }
}

impl Serialize for FeatureCollection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("FeatureCollection", 2)?;
        state.serialize_field("type", "FeatureCollection")?;
        state.serialize_field("features", &self.features)?;
        state.end()
    }
}

impl<'a> IntoIterator for &'a FeatureCollection {
    type Item = &'a Feature;
    type IntoIter = std::slice::Iter<'a, Feature>;

    fn into_iter(self) -> Self::IntoIter {
        self.features.iter()
    }
}
