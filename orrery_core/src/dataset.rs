// Copyright 2025 the Orrery Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Owned dataset representation.
//!
//! Records are field-name → value mappings with no enforced schema: the
//! fields a chart reads are chosen dynamically (by the metric selectors),
//! so lookup returns an `Option` and a missing field is a normal control
//! path, never an error.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use smallvec::SmallVec;

/// Identifies a dataset within a [`crate::Scene`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DatasetId(pub u32);

/// A tagged scalar stored in a [`Record`].
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// A numeric value.
    Num(f64),
    /// A string (category/label) value.
    Str(String),
}

impl Value {
    /// Returns the numeric value, if this is a number.
    pub fn as_num(&self) -> Option<f64> {
        match self {
            Self::Num(v) => Some(*v),
            Self::Str(_) => None,
        }
    }

    /// Returns the string value, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Num(_) => None,
            Self::Str(s) => Some(s),
        }
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Num(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Str(String::from(value))
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

/// A single record: an ordered mapping from field name to [`Value`].
///
/// Most records carry a handful of fields, so storage is a small inline
/// vector rather than a hash map.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Record {
    fields: SmallVec<[(String, Value); 8]>,
}

impl Record {
    /// Creates an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a field, replacing any existing field of the same name.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        let name = name.into();
        let value = value.into();
        if let Some(slot) = self.fields.iter_mut().find(|(n, _)| *n == name) {
            slot.1 = value;
        } else {
            self.fields.push((name, value));
        }
    }

    /// Builder-style [`Record::insert`].
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    /// Looks up a field by name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    /// Looks up a numeric field by name.
    pub fn num(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(Value::as_num)
    }

    /// Looks up a string field by name.
    pub fn label(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    /// Returns field names in insertion order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(n, _)| n.as_str())
    }

    /// Returns the number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// An ordered sequence of [`Record`]s with stable per-row identity.
///
/// Row keys are minted when the dataset is first decoded and must be
/// preserved by every derived dataset (filter, derive, subsample): they are
/// what keeps downstream mark identity stable across reordering and
/// resampling.
#[derive(Clone, Debug, PartialEq)]
pub struct Dataset {
    /// Dataset id, stable across replacement.
    pub id: DatasetId,
    /// Bumped once per wholesale replacement.
    pub version: u64,
    row_keys: Vec<u64>,
    records: Vec<Record>,
}

impl Dataset {
    /// Creates an empty dataset.
    pub fn new(id: DatasetId) -> Self {
        Self {
            id,
            version: 1,
            row_keys: Vec::new(),
            records: Vec::new(),
        }
    }

    /// Creates a dataset from records, minting sequential row keys.
    pub fn from_records(id: DatasetId, records: Vec<Record>) -> Self {
        let row_keys = (0..records.len() as u64).collect();
        Self {
            id,
            version: 1,
            row_keys,
            records,
        }
    }

    /// Creates a dataset from `(row_key, record)` pairs.
    ///
    /// This is the constructor derived datasets use to carry their parent's
    /// row keys through.
    pub fn from_rows(id: DatasetId, rows: Vec<(u64, Record)>) -> Self {
        let mut row_keys = Vec::with_capacity(rows.len());
        let mut records = Vec::with_capacity(rows.len());
        for (key, record) in rows {
            row_keys.push(key);
            records.push(record);
        }
        Self {
            id,
            version: 1,
            row_keys,
            records,
        }
    }

    /// Bumps the version.
    pub fn bump(&mut self) {
        self.version = self.version.wrapping_add(1);
    }

    /// Returns the number of rows.
    pub fn row_count(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if the dataset has no rows.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the stable row keys, aligned with the records.
    pub fn row_keys(&self) -> &[u64] {
        &self.row_keys
    }

    /// Returns the record at `row`, if in bounds.
    pub fn record(&self, row: usize) -> Option<&Record> {
        self.records.get(row)
    }

    /// Iterates `(row_key, record)` pairs in row order.
    pub fn rows(&self) -> impl Iterator<Item = (u64, &Record)> {
        self.row_keys
            .iter()
            .copied()
            .zip(self.records.iter())
    }

    /// Looks up a numeric field for a row.
    pub fn num(&self, row: usize, field: &str) -> Option<f64> {
        self.records.get(row).and_then(|r| r.num(field))
    }

    /// Looks up a string field for a row.
    pub fn label(&self, row: usize, field: &str) -> Option<&str> {
        self.records.get(row).and_then(|r| r.label(field))
    }

    /// Infers a `(min, max)` domain for a numeric field.
    ///
    /// Missing and non-finite values are ignored. Returns `None` if no
    /// finite value is present.
    pub fn extent(&self, field: &str) -> Option<(f64, f64)> {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for record in &self.records {
            let Some(v) = record.num(field) else {
                continue;
            };
            if !v.is_finite() {
                continue;
            }
            min = min.min(v);
            max = max.max(v);
        }
        if min.is_finite() && max.is_finite() {
            Some((min, max))
        } else {
            None
        }
    }

    /// Returns the distinct string values of `field` in first-seen order.
    pub fn distinct_labels(&self, field: &str) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        for record in &self.records {
            let Some(label) = record.label(field) else {
                continue;
            };
            if !out.iter().any(|seen| seen == label) {
                out.push(String::from(label));
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use super::*;

    fn planet(name: &str, radius: f64) -> Record {
        Record::new().with("name", name).with("radius", radius)
    }

    #[test]
    fn missing_field_lookup_is_none_not_a_failure() {
        let r = planet("Earth", 6371.0);
        assert_eq!(r.num("radius"), Some(6371.0));
        assert_eq!(r.num("mass"), None);
        assert_eq!(r.label("radius"), None);
        assert_eq!(r.label("name"), Some("Earth"));
    }

    #[test]
    fn insert_replaces_existing_field() {
        let mut r = planet("Earth", 6371.0);
        r.insert("radius", 1.0);
        assert_eq!(r.num("radius"), Some(1.0));
        assert_eq!(r.len(), 2);
    }

    #[test]
    fn extent_skips_missing_and_non_finite_values() {
        let ds = Dataset::from_records(
            DatasetId(1),
            vec![
                planet("a", 2.0),
                planet("b", f64::NAN),
                Record::new().with("name", "c"),
                planet("d", 10.0),
            ],
        );
        assert_eq!(ds.extent("radius"), Some((2.0, 10.0)));
        assert_eq!(ds.extent("mass"), None);
    }

    #[test]
    fn distinct_labels_keep_first_seen_order() {
        let ds = Dataset::from_records(
            DatasetId(1),
            vec![planet("b", 1.0), planet("a", 2.0), planet("b", 3.0)],
        );
        assert_eq!(ds.distinct_labels("name"), vec!["b", "a"]);
    }

    #[test]
    fn from_rows_preserves_caller_row_keys() {
        let ds = Dataset::from_rows(
            DatasetId(1),
            vec![(7, planet("a", 1.0)), (3, planet("b", 2.0))],
        );
        assert_eq!(ds.row_keys(), &[7, 3]);
        assert_eq!(ds.label(1, "name"), Some("b"));
    }
}
