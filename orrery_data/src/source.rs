// Copyright 2025 the Orrery Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dataset sources.
//!
//! A source resolves a dataset *name* to decoded records: one outbound read
//! per call, no retry, no caching. The dashboard decides what to do with a
//! failure (keep the stale view or show an error state).

use std::collections::HashMap;
use std::path::PathBuf;

use orrery_core::{Dataset, DatasetId};

use crate::decode::decode_records;
use crate::error::LoadError;

/// Resolves dataset names to decoded datasets.
pub trait DatasetSource {
    /// Loads and decodes the named dataset.
    fn load(&self, id: DatasetId, name: &str) -> Result<Dataset, LoadError>;
}

impl<T: DatasetSource + ?Sized> DatasetSource for Box<T> {
    fn load(&self, id: DatasetId, name: &str) -> Result<Dataset, LoadError> {
        (**self).load(id, name)
    }
}

/// Loads `<root>/<name>.json` from disk.
#[derive(Clone, Debug)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    /// Creates a source rooted at a directory of `<name>.json` files.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl DatasetSource for DirectorySource {
    fn load(&self, id: DatasetId, name: &str) -> Result<Dataset, LoadError> {
        let path = self.root.join(format!("{name}.json"));
        tracing::debug!(name, path = %path.display(), "loading dataset");
        let json = std::fs::read_to_string(&path).map_err(|source| LoadError::Io {
            path: path.clone(),
            source,
        })?;
        decode_records(id, name, &json)
    }
}

/// Serves named in-memory JSON documents (tests, demos, embedded data).
#[derive(Clone, Debug, Default)]
pub struct MemorySource {
    documents: HashMap<String, String>,
}

impl MemorySource {
    /// Creates an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a JSON document under a dataset name.
    pub fn with_document(mut self, name: impl Into<String>, json: impl Into<String>) -> Self {
        self.documents.insert(name.into(), json.into());
        self
    }
}

impl DatasetSource for MemorySource {
    fn load(&self, id: DatasetId, name: &str) -> Result<Dataset, LoadError> {
        let Some(json) = self.documents.get(name) else {
            return Err(LoadError::UnknownDataset {
                name: name.to_owned(),
            });
        };
        decode_records(id, name, json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_source_resolves_registered_names_only() {
        let source = MemorySource::new().with_document("planets", r#"[{"name": "Earth"}]"#);
        let ds = source.load(DatasetId(1), "planets").unwrap();
        assert_eq!(ds.row_count(), 1);

        let err = source.load(DatasetId(1), "comets").unwrap_err();
        assert!(matches!(err, LoadError::UnknownDataset { .. }));
    }

    #[test]
    fn directory_source_reports_missing_files_as_io_errors() {
        let source = DirectorySource::new("/nonexistent-orrery-data");
        let err = source.load(DatasetId(1), "planets").unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }
}
