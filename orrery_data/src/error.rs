// Copyright 2025 the Orrery Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types for dataset loading.

use std::path::PathBuf;

/// Errors raised while loading a dataset.
///
/// Loading never retries; the caller decides between keeping a stale view
/// and showing an error indicator.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The named dataset does not exist in the source.
    #[error("unknown dataset `{name}`")]
    UnknownDataset {
        /// The requested dataset name.
        name: String,
    },

    /// Reading the dataset bytes failed.
    #[error("failed to read `{path}`")]
    Io {
        /// The path that failed to load.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The response was not valid JSON.
    #[error("failed to parse dataset `{name}` as JSON")]
    Json {
        /// The requested dataset name.
        name: String,
        /// The underlying parse error.
        #[source]
        source: serde_json::Error,
    },

    /// The document parsed, but was not an array of records.
    #[error("dataset `{name}` is not a JSON array of objects")]
    NotAnArray {
        /// The requested dataset name.
        name: String,
    },
}
