//! Identifier index over a feature collection.

use std::collections::HashMap;

use serde_json::Value;

use crate::marker::{value_key, FeatureCollection};

/// Position of a record inside a [`FeatureCollection`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RecordLocation {
    /// Index of the feature in the collection.
    pub feature: usize,
    /// Index of the record within the feature's properties.
    pub record: usize,
}

/// Why a lookup found nothing.
///
/// None of these are failures of the index; they exist so callers can log a
/// useful diagnostic before reporting a negative result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum LookupMiss {
    #[error("no features are loaded")]
    EmptyCollection,
    #[error("field is not a configured identifier")]
    UnknownField,
    #[error("no record carries this identifier field")]
    EmptyField,
    #[error("no record has this value")]
    ValueNotFound,
}

/// Maps identifier field -> value -> record location.
///
/// Built from a collection in one pass. Duplicate values resolve to the last
/// record seen in feature-then-record order.
#[derive(Debug, Clone, Default)]
pub struct SearchIndex {
    feature_count: usize,
    fields: HashMap<String, HashMap<String, RecordLocation>>,
}

impl SearchIndex {
    /// Create an index that answers every lookup with `EmptyCollection`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an index over `collection` for the given identifier fields.
    pub fn build(collection: &FeatureCollection, identifier_fields: &[String]) -> Self {
        let mut fields: HashMap<String, HashMap<String, RecordLocation>> = identifier_fields
            .iter()
            .map(|field| (field.clone(), HashMap::new()))
            .collect();

        for (feature, item) in collection.iter().enumerate() {
            for (record, properties) in item.properties.iter().enumerate() {
                for (field, entries) in fields.iter_mut() {
                    let Some(key) = properties.get(field).and_then(value_key) else {
                        continue;
                    };
                    entries.insert(key, RecordLocation { feature, record });
                }
            }
        }

        tracing::debug!(
            features = collection.len(),
            fields = fields.len(),
            "Built search index"
        );

        Self {
            feature_count: collection.len(),
            fields,
        }
    }

    /// Look up a value, reporting why nothing was found.
    pub fn try_lookup(&self, field: &str, value: &str) -> Result<RecordLocation, LookupMiss> {
        if self.feature_count == 0 {
            return Err(LookupMiss::EmptyCollection);
        }
        let entries = self.fields.get(field).ok_or(LookupMiss::UnknownField)?;
        if entries.is_empty() {
            return Err(LookupMiss::EmptyField);
        }
        entries.get(value).copied().ok_or(LookupMiss::ValueNotFound)
    }

    /// Look up a value by its string key.
    pub fn lookup(&self, field: &str, value: &str) -> Option<RecordLocation> {
        self.try_lookup(field, value).ok()
    }

    /// Look up a JSON value, keyed the same way as during the build.
    pub fn lookup_value(&self, field: &str, value: &Value) -> Option<RecordLocation> {
        self.lookup(field, &value_key(value)?)
    }

    /// Configured identifier fields.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Number of distinct values indexed for `field`.
    pub fn entry_count(&self, field: &str) -> usize {
        self.fields.get(field).map_or(0, HashMap::len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::marker::{aggregate, CoordinateFields, Record};
    use proptest::prelude::*;
    use serde_json::json;

    fn collection(values: Vec<Value>) -> FeatureCollection {
        let records: Vec<Record> = values
            .into_iter()
            .map(|v| v.as_object().cloned().unwrap())
            .collect();
        aggregate(&records, &CoordinateFields::default(), None)
    }

    fn fields(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn sample() -> FeatureCollection {
        collection(vec![
            json!({"id": "a", "name": "Alpha", "lat": 1, "lng": 2}),
            json!({"id": "b", "name": "Bravo", "lat": 1, "lng": 2}),
            json!({"id": "c", "lat": 5, "lng": 5}),
        ])
    }

    #[test]
    fn test_lookup_resolves_record_position() {
        let index = SearchIndex::build(&sample(), &fields(&["id"]));

        assert_eq!(
            index.lookup("id", "b"),
            Some(RecordLocation {
                feature: 0,
                record: 1
            })
        );
        assert_eq!(
            index.lookup("id", "c"),
            Some(RecordLocation {
                feature: 1,
                record: 0
            })
        );
    }

    #[test]
    fn test_every_record_resolves_back_to_itself() {
        let collection = sample();
        let index = SearchIndex::build(&collection, &fields(&["id", "name"]));

        for item in &collection {
            for record in &item.properties {
                for field in ["id", "name"] {
                    if let Some(value) = record.get(field) {
                        let location = index.lookup_value(field, value).unwrap();
                        assert_eq!(collection.record(location), Some(record));
                    }
                }
            }
        }
    }

    #[test]
    fn test_duplicate_values_last_write_wins() {
        let collection = collection(vec![
            json!({"id": "dup", "n": 1, "lat": 1, "lng": 1}),
            json!({"id": "dup", "n": 2, "lat": 2, "lng": 2}),
            json!({"id": "dup", "n": 3, "lat": 2, "lng": 2}),
        ]);
        let index = SearchIndex::build(&collection, &fields(&["id"]));

        let location = index.lookup("id", "dup").unwrap();
        assert_eq!(
            location,
            RecordLocation {
                feature: 1,
                record: 1
            }
        );
        assert_eq!(collection.record(location).unwrap()["n"], 3);
        assert_eq!(index.entry_count("id"), 1);
    }

    #[test]
    fn test_numeric_identifier_keys() {
        let collection = collection(vec![json!({"code": 42, "lat": 1, "lng": 1})]);
        let index = SearchIndex::build(&collection, &fields(&["code"]));

        assert!(index.lookup("code", "42").is_some());
        assert!(index.lookup_value("code", &json!(42)).is_some());
        assert!(index.lookup_value("code", &json!(42.0)).is_some());
    }

    #[test]
    fn test_miss_empty_collection() {
        let index = SearchIndex::build(&FeatureCollection::new(), &fields(&["id"]));
        assert_eq!(index.try_lookup("id", "a"), Err(LookupMiss::EmptyCollection));
        assert_eq!(SearchIndex::new().lookup("id", "a"), None);
    }

    #[test]
    fn test_miss_unknown_field() {
        let index = SearchIndex::build(&sample(), &fields(&["id"]));
        assert_eq!(index.try_lookup("name", "Alpha"), Err(LookupMiss::UnknownField));
    }

    #[test]
    fn test_miss_field_with_no_entries() {
        let index = SearchIndex::build(&sample(), &fields(&["serial"]));
        assert_eq!(index.try_lookup("serial", "1"), Err(LookupMiss::EmptyField));
    }

    #[test]
    fn test_miss_absent_value() {
        let index = SearchIndex::build(&sample(), &fields(&["id"]));
        assert_eq!(index.try_lookup("id", "zzz"), Err(LookupMiss::ValueNotFound));
        assert_eq!(index.lookup_value("id", &json!(["a"])), None);
    }

    #[test]
    fn test_fields_listing() {
        let index = SearchIndex::build(&sample(), &fields(&["id", "name"]));
        let mut names: Vec<&str> = index.fields().collect();
        names.sort_unstable();
        assert_eq!(names, vec!["id", "name"]);
    }

    fn arb_records() -> impl Strategy<Value = Vec<Record>> {
        // Few ids and few coordinates, so duplicates and shared points are common.
        prop::collection::vec((prop::option::of(0u8..6), 0u8..4, 0u8..4), 0..30).prop_map(
            |rows| {
                rows.into_iter()
                    .map(|(id, lat, lng)| {
                        let mut record = json!({"lat": lat, "lng": lng});
                        if let Some(id) = id {
                            record["id"] = json!(format!("r{}", id));
                        }
                        record.as_object().cloned().unwrap()
                    })
                    .collect()
            },
        )
    }

    proptest! {
        /// Property: every indexed value resolves to the last record carrying it.
        #[test]
        fn prop_lookup_resolves_last_record(input in arb_records()) {
            let collection = aggregate(&input, &CoordinateFields::default(), None);
            let index = SearchIndex::build(&collection, &fields(&["id"]));

            let mut last: HashMap<String, RecordLocation> = HashMap::new();
            for (feature, item) in collection.iter().enumerate() {
                for (record, properties) in item.properties.iter().enumerate() {
                    if let Some(id) = properties.get("id").and_then(Value::as_str) {
                        last.insert(id.to_string(), RecordLocation { feature, record });
                    }
                }
            }

            prop_assert_eq!(index.entry_count("id"), last.len());
            for (id, expected) in &last {
                prop_assert_eq!(index.lookup("id", id), Some(*expected));
                let found = collection
                    .get(expected.feature)
                    .and_then(|f| f.record(expected.record))
                    .and_then(|r| r.get("id"));
                let id_value = json!(id);
                prop_assert_eq!(found, Some(&id_value));
            }
            prop_assert_eq!(index.lookup("id", "r9"), None);
        }
    }
}
