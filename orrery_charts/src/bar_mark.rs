// Copyright 2025 the Orrery Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bar mark generation.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::Rect;
use peniko::Brush;
use orrery_core::{Dataset, Mark, MarkId};

use crate::scale::{ScaleBand, ScaleContinuous, category_label};

/// A vertical bar mark spec.
///
/// This generates one rect mark per row, positioned by a category field on
/// a band scale, with height from the baseline to the scaled value. Rows
/// whose category is missing (or outside the band domain) or whose value is
/// missing/non-finite are skipped; one bad record never fails the chart.
#[derive(Clone, Debug)]
pub struct BarMarkSpec {
    /// Field providing the bar category (x position).
    pub category: String,
    /// Field providing the bar value (y extent).
    pub value: String,
    /// Band scale used for bar positions along x.
    pub band: ScaleBand,
    /// Continuous scale used for bar positions along y.
    pub y_scale: ScaleContinuous,
    /// Baseline in data units (typically `0.0`).
    pub baseline: f64,
    /// Fill paint for bars.
    pub fill: Brush,
    /// Rendering order hint.
    pub z_index: i32,
}

impl BarMarkSpec {
    /// Creates a bar mark spec with `baseline = 0` and a default fill.
    pub fn new(
        category: impl Into<String>,
        value: impl Into<String>,
        band: ScaleBand,
        y_scale: ScaleContinuous,
    ) -> Self {
        Self {
            category: category.into(),
            value: value.into(),
            band,
            y_scale,
            baseline: 0.0,
            fill: Brush::default(),
            z_index: crate::z_order::SERIES_FILL,
        }
    }

    /// Sets the baseline in data units.
    pub fn with_baseline(mut self, baseline: f64) -> Self {
        self.baseline = baseline;
        self
    }

    /// Sets the fill paint.
    pub fn with_fill(mut self, fill: impl Into<Brush>) -> Self {
        self.fill = fill.into();
        self
    }

    /// Sets the z-index used for render ordering.
    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    /// Generates marks for the dataset's rows.
    ///
    /// Mark identity is derived from `(dataset, row_key)` so it stays
    /// stable across frames.
    pub fn marks(&self, data: &Dataset) -> Vec<Mark> {
        let bw = self.band.band_width();
        let y0 = self.y_scale.map(self.baseline);

        let mut out = Vec::with_capacity(data.row_count());
        for (row_key, record) in data.rows() {
            let Some(label) = category_label(record, &self.category) else {
                continue;
            };
            let Some(x) = self.band.position(&label) else {
                continue;
            };
            let Some(v) = record.num(&self.value) else {
                continue;
            };
            if !v.is_finite() {
                continue;
            }
            let y = self.y_scale.map(v);
            let rect = Rect::new(x, y.min(y0), x + bw, y.max(y0));
            out.push(Mark::rect(
                MarkId::for_row(data.id, row_key),
                self.z_index,
                rect,
                self.fill.clone(),
            ));
        }
        out
    }
}
