// Copyright 2025 the Orrery Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pure derived-field transforms.
//!
//! Transforms take a dataset and return a new one; the input is never
//! mutated. Rows the per-record function cannot compute are excluded, so a
//! `NaN` never reaches extent/scale computation downstream.

use orrery_core::{Dataset, Record};

/// First-order distance-from-sun approximation, in the units of `a`.
///
/// `a * (1 - e^2)` is the semi-latus rectum of the orbit, not the
/// instantaneous distance to the sun; for near-circular orbits (small `e`)
/// the two agree closely, and that approximation is a documented property
/// of the charts built on it. Not exact for high eccentricities.
pub fn orbital_distance(a: f64, e: f64) -> f64 {
    a * (1.0 - e * e)
}

/// Derives a numeric field per record.
///
/// Returns a new dataset with `out_field` added to every record for which
/// `f` yields a finite value; the remaining records are excluded. Row keys
/// carry over from the input, so mark identity is unaffected by the
/// exclusions.
pub fn derive_num(
    data: &Dataset,
    out_field: &str,
    mut f: impl FnMut(&Record) -> Option<f64>,
) -> Dataset {
    let mut rows = Vec::with_capacity(data.row_count());
    let mut excluded = 0_usize;
    for (row_key, record) in data.rows() {
        match f(record) {
            Some(v) if v.is_finite() => {
                let mut record = record.clone();
                record.insert(out_field, v);
                rows.push((row_key, record));
            }
            _ => excluded += 1,
        }
    }
    if excluded > 0 {
        tracing::debug!(field = out_field, excluded, "excluded underivable records");
    }
    let mut out = Dataset::from_rows(data.id, rows);
    out.version = data.version;
    out
}

/// Keeps the records satisfying `predicate`, preserving row keys.
pub fn retain(data: &Dataset, mut predicate: impl FnMut(&Record) -> bool) -> Dataset {
    let rows = data
        .rows()
        .filter(|(_key, record)| predicate(record))
        .map(|(key, record)| (key, record.clone()))
        .collect();
    let mut out = Dataset::from_rows(data.id, rows);
    out.version = data.version;
    out
}
