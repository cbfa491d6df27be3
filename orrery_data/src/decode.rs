// Copyright 2025 the Orrery Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! JSON decoding into datasets.
//!
//! No schema is enforced: each element of the top-level array becomes one
//! record, numbers become numeric fields, strings become label fields, and
//! everything else (booleans, nulls, nested values) is dropped. Field
//! selection happens later, by name, against whatever survived.

use orrery_core::{Dataset, DatasetId, Record};
use serde_json::Value;

use crate::error::LoadError;

/// Decodes a JSON document (an array of objects) into a dataset.
///
/// Row keys are minted from array positions; they are the stable identity
/// every downstream transform preserves.
pub fn decode_records(id: DatasetId, name: &str, json: &str) -> Result<Dataset, LoadError> {
    let doc: Value = serde_json::from_str(json).map_err(|source| LoadError::Json {
        name: name.to_owned(),
        source,
    })?;

    let Value::Array(items) = doc else {
        return Err(LoadError::NotAnArray {
            name: name.to_owned(),
        });
    };

    let mut records = Vec::with_capacity(items.len());
    for item in items {
        let mut record = Record::new();
        if let Value::Object(fields) = item {
            for (field, value) in fields {
                match value {
                    Value::Number(n) => {
                        if let Some(v) = n.as_f64() {
                            record.insert(field, v);
                        }
                    }
                    Value::String(s) => record.insert(field, s),
                    // Booleans, nulls, and nested values carry nothing a
                    // chart can scale; they are dropped, not errors.
                    _ => {}
                }
            }
        }
        records.push(record);
    }

    tracing::debug!(name, rows = records.len(), "decoded dataset");
    Ok(Dataset::from_records(id, records))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_numbers_and_strings_and_drops_the_rest() {
        let json = r#"[
            {"name": "Earth", "radius": 6371, "habitable": true, "moons": ["Luna"]},
            {"name": "Mars", "radius": 3389.5, "note": null}
        ]"#;
        let ds = decode_records(DatasetId(1), "planets", json).unwrap();
        assert_eq!(ds.row_count(), 2);
        assert_eq!(ds.label(0, "name"), Some("Earth"));
        assert_eq!(ds.num(0, "radius"), Some(6371.0));
        assert_eq!(ds.num(1, "radius"), Some(3389.5));
        // Non-scalar fields are absent, not errors.
        assert!(ds.record(0).unwrap().get("habitable").is_none());
        assert!(ds.record(0).unwrap().get("moons").is_none());
        assert!(ds.record(1).unwrap().get("note").is_none());
    }

    #[test]
    fn records_may_have_heterogeneous_fields() {
        let json = r#"[{"a": 1}, {"b": 2}]"#;
        let ds = decode_records(DatasetId(1), "mixed", json).unwrap();
        assert_eq!(ds.num(0, "a"), Some(1.0));
        assert_eq!(ds.num(0, "b"), None);
        assert_eq!(ds.num(1, "b"), Some(2.0));
    }

    #[test]
    fn non_array_documents_are_rejected() {
        let err = decode_records(DatasetId(1), "obj", r#"{"a": 1}"#).unwrap_err();
        assert!(matches!(err, LoadError::NotAnArray { .. }));
    }

    #[test]
    fn invalid_json_is_a_parse_error() {
        let err = decode_records(DatasetId(1), "bad", "not json").unwrap_err();
        assert!(matches!(err, LoadError::Json { .. }));
    }

    #[test]
    fn row_keys_are_sequential_positions() {
        let ds = decode_records(DatasetId(1), "seq", r#"[{"a":1},{"a":2},{"a":3}]"#).unwrap();
        assert_eq!(ds.row_keys(), &[0, 1, 2]);
    }
}
