//! Filter predicates applied before grouping.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::record::{strict_equals, Record};

/// Keeps only records whose `field` strictly equals `value`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterPredicate {
    /// Record field to compare.
    #[serde(rename = "prop")]
    pub field: String,
    /// Expected value.
    pub value: Value,
}

impl FilterPredicate {
    pub fn new(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Returns true if the record passes this predicate.
    pub fn matches(&self, record: &Record) -> bool {
        strict_equals(record.get(&self.field), &self.value)
    }
}

/// Returns true if the record passes the optional predicate.
///
/// An absent predicate passes every record.
pub fn passes(filter: Option<&FilterPredicate>, record: &Record) -> bool {
    filter.map_or(true, |f| f.matches(record))
}
