//! Loading marker records from JSON.
//!
//! A record source is a JSON array of objects. Anything else is rejected
//! here, at the edge, so the aggregation core only ever sees records.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;

use crate::marker::Record;

/// Errors reading a record source.
#[derive(Debug, Error)]
pub enum RecordSourceError {
    #[error("marker file not found: {0}")]
    NotFound(PathBuf),
    #[error("failed to read marker file: {0}")]
    Io(#[from] std::io::Error),
    #[error("marker file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("expected a JSON array of marker objects")]
    NotAnArray,
    #[error("marker at position {0} is not a JSON object")]
    NotAnObject(usize),
}

/// Load records from a JSON file.
pub fn load_records<P: AsRef<Path>>(path: P) -> Result<Vec<Record>, RecordSourceError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(RecordSourceError::NotFound(path.to_path_buf()));
    }

    let file = File::open(path)?;
    let records = records_from_reader(BufReader::new(file))?;
    tracing::info!(path = %path.display(), count = records.len(), "Loaded marker records");
    Ok(records)
}

/// Read records from any JSON reader.
pub fn records_from_reader<R: Read>(reader: R) -> Result<Vec<Record>, RecordSourceError> {
    let value: Value = serde_json::from_reader(reader)?;
    records_from_value(value)
}

/// Convert a parsed JSON document into records.
pub fn records_from_value(value: Value) -> Result<Vec<Record>, RecordSourceError> {
    let Value::Array(items) = value else {
        return Err(RecordSourceError::NotAnArray);
    };

    items
        .into_iter()
        .enumerate()
        .map(|(position, item)| match item {
            Value::Object(record) => Ok(record),
            _ => Err(RecordSourceError::NotAnObject(position)),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_reads_array_of_objects() {
        let json = r#"[{"name": "A", "lat": 1, "lng": 2}, {"name": "B", "lat": "3", "lng": "4"}]"#;
        let records = records_from_reader(json.as_bytes()).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[1]["lat"], "3");
    }

    #[test]
    fn test_empty_array() {
        assert!(records_from_value(json!([])).unwrap().is_empty());
    }

    #[test]
    fn test_rejects_non_array() {
        let err = records_from_value(json!({"name": "A"})).unwrap_err();
        assert!(matches!(err, RecordSourceError::NotAnArray));
    }

    #[test]
    fn test_rejects_non_object_element() {
        let err = records_from_value(json!([{"name": "A"}, 5])).unwrap_err();
        assert!(matches!(err, RecordSourceError::NotAnObject(1)));
        assert!(err.to_string().contains("position 1"));
    }

    #[test]
    fn test_invalid_json() {
        let err = records_from_reader("[{".as_bytes()).unwrap_err();
        assert!(matches!(err, RecordSourceError::Json(_)));
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("markers.json");
        std::fs::write(&path, r#"[{"name": "Depot", "lat": -29.8, "lng": -51.1}]"#).unwrap();

        let records = load_records(&path).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["name"], "Depot");
    }

    #[test]
    fn test_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let err = load_records(temp_dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, RecordSourceError::NotFound(_)));
    }
}
