// Copyright 2025 the Orrery Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dataset loading and shaping for orrery dashboards.
//!
//! This crate covers the std side of the data path:
//! - decoding JSON arrays of records into `orrery_core` datasets,
//! - pluggable dataset sources (a directory of `<name>.json` files, or
//!   in-memory documents),
//! - pure derived-field transforms (orbital distance), and
//! - fair random subsampling with preserved row identity.

mod decode;
mod derive;
mod error;
mod sample;
mod source;

pub use decode::decode_records;
pub use derive::{derive_num, orbital_distance, retain};
pub use error::LoadError;
pub use sample::random_subset;
pub use source::{DatasetSource, DirectorySource, MemorySource};
