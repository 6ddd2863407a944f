//! Marker records and their aggregation into map features.
//!
//! Raw records are filtered, grouped by coerced coordinate, and emitted as a
//! [`FeatureCollection`] of point features. Each feature carries every record
//! that shares its coordinate.
//!
//! ```
//! use markerlayer::marker::{aggregate, CoordinateFields, Coordinates, Record};
//! use serde_json::json;
//!
//! let records: Vec<Record> = vec![
//!     json!({"id": "a", "lat": 1, "lng": 2}),
//!     json!({"id": "b", "lat": 1, "lng": 2}),
//!     json!({"id": "c", "lat": 5, "lng": 5}),
//! ]
//! .into_iter()
//! .map(|v| v.as_object().cloned().unwrap())
//! .collect();
//!
//! let collection = aggregate(&records, &CoordinateFields::default(), None);
//! assert_eq!(collection.len(), 2);
//! assert_eq!(collection.get(0).unwrap().coordinates, Coordinates::new(2.0, 1.0));
//! assert_eq!(collection.get(0).unwrap().properties.len(), 2);
//! ```

mod aggregate;
mod feature;
mod filter;
mod record;

pub use aggregate::{
    aggregate, grouping_key, CoordinateFields, DEFAULT_LAT_FIELD, DEFAULT_LNG_FIELD,
};
pub use feature::{Coordinates, Feature, FeatureCollection};
pub use filter::{passes, FilterPredicate};
pub use record::{coerce_number, format_number, strict_equals, value_key, Record};
