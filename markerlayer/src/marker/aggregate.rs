//! Coordinate grouping of marker records.
//!
//! Every change to records, filter or field names rebuilds the whole
//! collection in one O(n) pass. There is no incremental update.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use super::feature::{Coordinates, Feature, FeatureCollection};
use super::filter::{passes, FilterPredicate};
use super::record::{coerce_number, format_number, Record};

/// Default latitude field name.
pub const DEFAULT_LAT_FIELD: &str = "lat";

/// Default longitude field name.
pub const DEFAULT_LNG_FIELD: &str = "lng";

/// Names of the record fields holding latitude and longitude.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoordinateFields {
    pub lat: String,
    pub lng: String,
}

impl CoordinateFields {
    pub fn new(lat: impl Into<String>, lng: impl Into<String>) -> Self {
        Self {
            lat: lat.into(),
            lng: lng.into(),
        }
    }

    /// Coerced coordinates of a record.
    pub fn coordinates_of(&self, record: &Record) -> Coordinates {
        Coordinates {
            lon: coerce_number(record.get(&self.lng)),
            lat: coerce_number(record.get(&self.lat)),
        }
    }
}

impl Default for CoordinateFields {
    fn default() -> Self {
        Self::new(DEFAULT_LAT_FIELD, DEFAULT_LNG_FIELD)
    }
}

/// Grouping key for a coordinate, `"{lng} / {lat}"`.
pub fn grouping_key(coordinates: Coordinates) -> String {
    format!(
        "{} / {}",
        format_number(coordinates.lon),
        format_number(coordinates.lat)
    )
}

/// Group records into one feature per distinct coerced coordinate.
///
/// Records failing `filter` are dropped first. Features keep the order in
/// which their coordinate was first seen, and each feature's records keep
/// input order. Malformed coordinates group at `(0, 0)`.
pub fn aggregate(
    records: &[Record],
    fields: &CoordinateFields,
    filter: Option<&FilterPredicate>,
) -> FeatureCollection {
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut features: Vec<Feature> = Vec::new();
    let mut retained = 0usize;

    for record in records.iter().filter(|r| passes(filter, r)) {
        retained += 1;
        let coordinates = fields.coordinates_of(record);

        match positions.entry(grouping_key(coordinates)) {
            Entry::Occupied(slot) => features[*slot.get()].properties.push(record.clone()),
            Entry::Vacant(slot) => {
                slot.insert(features.len());
                features.push(Feature {
                    coordinates,
                    properties: vec![record.clone()],
                });
            }
        }
    }

    tracing::debug!(
        records = records.len(),
        retained,
        features = features.len(),
        "Aggregated marker records"
    );

    FeatureCollection::from_features(features)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::{json, Value};
    use std::collections::HashSet;

    fn records(values: Vec<Value>) -> Vec<Record> {
        values
            .into_iter()
            .map(|v| v.as_object().cloned().unwrap())
            .collect()
    }

    fn ids(feature: &Feature) -> Vec<&str> {
        feature
            .properties
            .iter()
            .map(|r| r["id"].as_str().unwrap())
            .collect()
    }

    #[test]
    fn test_groups_shared_coordinates() {
        let input = records(vec![
            json!({"id": "a", "lat": 1, "lng": 2}),
            json!({"id": "b", "lat": 1, "lng": 2}),
            json!({"id": "c", "lat": 5, "lng": 5}),
        ]);

        let collection = aggregate(&input, &CoordinateFields::default(), None);

        assert_eq!(collection.len(), 2);
        assert_eq!(collection.get(0).unwrap().coordinates, Coordinates::new(2.0, 1.0));
        assert_eq!(ids(collection.get(0).unwrap()), vec!["a", "b"]);
        assert_eq!(collection.get(1).unwrap().coordinates, Coordinates::new(5.0, 5.0));
        assert_eq!(ids(collection.get(1).unwrap()), vec!["c"]);
    }

    #[test]
    fn test_first_seen_order() {
        let input = records(vec![
            json!({"id": "x", "lat": 9, "lng": 9}),
            json!({"id": "y", "lat": 1, "lng": 1}),
            json!({"id": "z", "lat": 9, "lng": 9}),
        ]);

        let collection = aggregate(&input, &CoordinateFields::default(), None);

        assert_eq!(ids(collection.get(0).unwrap()), vec!["x", "z"]);
        assert_eq!(ids(collection.get(1).unwrap()), vec!["y"]);
    }

    #[test]
    fn test_non_numeric_coordinates_group_at_origin() {
        let input = records(vec![
            json!({"id": "a", "lat": "abc", "lng": "xyz"}),
            json!({"id": "b"}),
            json!({"id": "c", "lat": 0, "lng": "0.0"}),
            json!({"id": "d", "lat": 3, "lng": 3}),
        ]);

        let collection = aggregate(&input, &CoordinateFields::default(), None);

        assert_eq!(collection.len(), 2);
        assert_eq!(collection.get(0).unwrap().coordinates, Coordinates::new(0.0, 0.0));
        assert_eq!(ids(collection.get(0).unwrap()), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_equivalent_numeric_strings_collapse() {
        let input = records(vec![
            json!({"id": "a", "lat": "1.0", "lng": "2"}),
            json!({"id": "b", "lat": "1.00", "lng": 2.0}),
        ]);

        let collection = aggregate(&input, &CoordinateFields::default(), None);

        assert_eq!(collection.len(), 1);
        assert_eq!(ids(collection.get(0).unwrap()), vec!["a", "b"]);
    }

    #[test]
    fn test_custom_field_names() {
        let input = records(vec![
            json!({"id": "a", "latitude": -29.8258, "longitude": -51.1481}),
            json!({"id": "b", "lat": 10, "lng": 10}),
        ]);
        let fields = CoordinateFields::new("latitude", "longitude");

        let collection = aggregate(&input, &fields, None);

        assert_eq!(collection.len(), 2);
        assert_eq!(
            collection.get(0).unwrap().coordinates,
            Coordinates::new(-51.1481, -29.8258)
        );
        // "b" has no latitude/longitude fields under these names
        assert_eq!(collection.get(1).unwrap().coordinates, Coordinates::new(0.0, 0.0));
    }

    #[test]
    fn test_filter_applied_before_grouping() {
        let input = records(vec![
            json!({"id": "a", "kind": "bus", "lat": 1, "lng": 1}),
            json!({"id": "b", "kind": "car", "lat": 1, "lng": 1}),
            json!({"id": "c", "kind": "bus", "lat": 2, "lng": 2}),
        ]);
        let filter = FilterPredicate::new("kind", "bus");

        let collection = aggregate(&input, &CoordinateFields::default(), Some(&filter));

        assert_eq!(collection.len(), 2);
        assert_eq!(ids(collection.get(0).unwrap()), vec!["a"]);
        assert_eq!(ids(collection.get(1).unwrap()), vec!["c"]);
    }

    #[test]
    fn test_filter_matching_nothing_yields_empty_collection() {
        let input = records(vec![json!({"id": "a", "kind": "bus", "lat": 1, "lng": 1})]);
        let filter = FilterPredicate::new("kind", "train");

        let collection = aggregate(&input, &CoordinateFields::default(), Some(&filter));

        assert!(collection.is_empty());
    }

    #[test]
    fn test_grouping_key_format() {
        assert_eq!(grouping_key(Coordinates::new(2.0, 1.0)), "2 / 1");
        assert_eq!(grouping_key(Coordinates::new(-51.5, 0.25)), "-51.5 / 0.25");
    }

    fn arb_coordinate() -> impl Strategy<Value = Value> {
        prop_oneof![
            (-3i64..3).prop_map(|n| json!(n)),
            (-3i64..3).prop_map(|n| json!(format!("{}.0", n))),
            Just(json!("abc")),
            Just(Value::Null),
        ]
    }

    fn arb_records() -> impl Strategy<Value = Vec<Record>> {
        prop::collection::vec(
            (arb_coordinate(), arb_coordinate(), prop_oneof![Just("x"), Just("y")]),
            0..40,
        )
        .prop_map(|rows| {
            rows.into_iter()
                .enumerate()
                .map(|(i, (lat, lng, kind))| {
                    json!({"id": i, "lat": lat, "lng": lng, "kind": kind})
                        .as_object()
                        .cloned()
                        .unwrap()
                })
                .collect()
        })
    }

    proptest! {
        /// Property: one feature per distinct coerced coordinate, all records kept.
        #[test]
        fn prop_feature_per_distinct_coordinate(input in arb_records()) {
            let fields = CoordinateFields::default();
            let collection = aggregate(&input, &fields, None);

            let distinct: HashSet<String> = input
                .iter()
                .map(|r| grouping_key(fields.coordinates_of(r)))
                .collect();
            prop_assert_eq!(collection.len(), distinct.len());
            prop_assert_eq!(collection.record_count(), input.len());

            for feature in &collection {
                for record in &feature.properties {
                    prop_assert_eq!(fields.coordinates_of(record), feature.coordinates);
                }
            }
        }

        /// Property: aggregation is idempotent.
        #[test]
        fn prop_idempotent(input in arb_records()) {
            let fields = CoordinateFields::default();
            prop_assert_eq!(
                aggregate(&input, &fields, None),
                aggregate(&input, &fields, None)
            );
        }

        /// Property: every surviving record satisfies the filter.
        #[test]
        fn prop_filter_correctness(input in arb_records()) {
            let fields = CoordinateFields::default();
            let filter = FilterPredicate::new("kind", "x");
            let collection = aggregate(&input, &fields, Some(&filter));

            let expected = input.iter().filter(|r| r["kind"] == "x").count();
            prop_assert_eq!(collection.record_count(), expected);
            for feature in &collection {
                for record in &feature.properties {
                    prop_assert_eq!(&record["kind"], &json!("x"));
                }
            }
        }
    }

    #[test]
    fn test_no_filter_equals_match_all_filter() {
        let input = records(vec![
            json!({"id": "a", "all": true, "lat": 1, "lng": 1}),
            json!({"id": "b", "all": true, "lat": 2, "lng": 1}),
        ]);
        let fields = CoordinateFields::default();
        let match_all = FilterPredicate::new("all", true);

        assert_eq!(
            aggregate(&input, &fields, None),
            aggregate(&input, &fields, Some(&match_all))
        );
    }
}
