//! Initial map bounds derived from marker positions.

use crate::marker::{CoordinateFields, Coordinates, Record};

/// Latitude of the fallback center used when no markers are loaded.
pub const DEFAULT_CENTER_LAT: f64 = -29.8258;

/// Longitude of the fallback center used when no markers are loaded.
pub const DEFAULT_CENTER_LON: f64 = -51.1481;

/// Bounding box over a set of marker positions.
#[derive(Debug, Clone, PartialEq)]
pub struct Bounds {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
    /// Every marker as `[lat, lng]`, in record order.
    pub points: Vec<[f64; 2]>,
}

impl Bounds {
    /// Degenerate bounds at the default center.
    pub fn default_center() -> Self {
        Self::around(Coordinates::new(DEFAULT_CENTER_LON, DEFAULT_CENTER_LAT))
    }

    /// Degenerate bounds at a single point.
    pub fn around(point: Coordinates) -> Self {
        Self {
            south: point.lat,
            west: point.lon,
            north: point.lat,
            east: point.lon,
            points: vec![[point.lat, point.lon]],
        }
    }

    /// Fit all records, falling back to the default center when empty.
    pub fn from_records(records: &[Record], fields: &CoordinateFields) -> Self {
        let mut coordinates = records.iter().map(|r| fields.coordinates_of(r));
        let Some(first) = coordinates.next() else {
            return Self::default_center();
        };

        let mut bounds = Self::around(first);
        for point in coordinates {
            bounds.south = bounds.south.min(point.lat);
            bounds.north = bounds.north.max(point.lat);
            bounds.west = bounds.west.min(point.lon);
            bounds.east = bounds.east.max(point.lon);
            bounds.points.push([point.lat, point.lon]);
        }
        bounds
    }

    pub fn center(&self) -> Coordinates {
        Coordinates::new((self.west + self.east) / 2.0, (self.south + self.north) / 2.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn records(values: Vec<Value>) -> Vec<Record> {
        values
            .into_iter()
            .map(|v| v.as_object().cloned().unwrap())
            .collect()
    }

    #[test]
    fn test_empty_uses_default_center() {
        let bounds = Bounds::from_records(&[], &CoordinateFields::default());
        assert_eq!(bounds.center(), Coordinates::new(DEFAULT_CENTER_LON, DEFAULT_CENTER_LAT));
        assert_eq!(bounds.points, vec![[DEFAULT_CENTER_LAT, DEFAULT_CENTER_LON]]);
    }

    #[test]
    fn test_fits_all_records() {
        let input = records(vec![
            json!({"lat": 1, "lng": 2}),
            json!({"lat": -3, "lng": 8}),
            json!({"lat": "4", "lng": "-1"}),
        ]);

        let bounds = Bounds::from_records(&input, &CoordinateFields::default());

        assert_eq!(bounds.south, -3.0);
        assert_eq!(bounds.north, 4.0);
        assert_eq!(bounds.west, -1.0);
        assert_eq!(bounds.east, 8.0);
        assert_eq!(bounds.points.len(), 3);
        assert_eq!(bounds.points[0], [1.0, 2.0]);
    }

    #[test]
    fn test_center() {
        let input = records(vec![json!({"lat": 0, "lng": 0}), json!({"lat": 10, "lng": 20})]);
        let bounds = Bounds::from_records(&input, &CoordinateFields::default());
        assert_eq!(bounds.center(), Coordinates::new(10.0, 5.0));
    }
}
