// Copyright 2025 the Orrery Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Point mark generation.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::Point;
use peniko::Brush;
use orrery_core::{Dataset, Mark, MarkId};

use crate::scale::{ScaleContinuous, ScaleLog};

/// Encodes a second metric into the point radius through a log scale.
///
/// This is how the solar-system scatter sizes planets: radius values span
/// several orders of magnitude, so the glyph radius is log-mapped into a
/// small pixel range.
#[derive(Clone, Debug)]
pub struct RadiusEncoding {
    /// Field providing the encoded metric.
    pub field: String,
    /// Log scale mapping the metric into glyph radii.
    pub scale: ScaleLog,
}

impl RadiusEncoding {
    /// Creates a radius encoding.
    pub fn new(field: impl Into<String>, scale: ScaleLog) -> Self {
        Self {
            field: field.into(),
            scale,
        }
    }
}

/// A point (scatter) mark spec.
///
/// This generates one point mark per row. Points carry entity-level
/// identity, so enter/update/exit transitions animate each glyph's center
/// and radius individually. Rows with missing or non-finite coordinates —
/// or a missing radius metric when one is encoded — are skipped.
#[derive(Clone, Debug)]
pub struct PointMarkSpec {
    /// Field for x values.
    pub x: String,
    /// Field for y values.
    pub y: String,
    /// X scale mapping data x into scene x.
    pub x_scale: ScaleContinuous,
    /// Y scale mapping data y into scene y.
    pub y_scale: ScaleContinuous,
    /// Glyph radius in scene coordinates when no encoding is set.
    pub radius: f64,
    /// Optional second-metric radius encoding.
    pub radius_encoding: Option<RadiusEncoding>,
    /// Fill paint for the glyphs.
    pub fill: Brush,
    /// Rendering order hint.
    pub z_index: i32,
}

impl PointMarkSpec {
    /// Creates a point mark spec with radius 3 and a default fill.
    pub fn new(
        x: impl Into<String>,
        y: impl Into<String>,
        x_scale: ScaleContinuous,
        y_scale: ScaleContinuous,
    ) -> Self {
        Self {
            x: x.into(),
            y: y.into(),
            x_scale,
            y_scale,
            radius: 3.0,
            radius_encoding: None,
            fill: Brush::default(),
            z_index: crate::z_order::SERIES_POINTS,
        }
    }

    /// Sets the constant glyph radius.
    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    /// Encodes a second metric into the glyph radius.
    pub fn with_radius_encoding(mut self, encoding: RadiusEncoding) -> Self {
        self.radius_encoding = Some(encoding);
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
    /// stable across frames, reorderings, and resamples.
    pub fn marks(&self, data: &Dataset) -> Vec<Mark> {
        let mut out = Vec::with_capacity(data.row_count());
        for (row_key, record) in data.rows() {
            let (Some(x), Some(y)) = (record.num(&self.x), record.num(&self.y)) else {
                continue;
            };
            if !x.is_finite() || !y.is_finite() {
                continue;
            }
            let radius = match &self.radius_encoding {
                Some(enc) => {
                    let Some(v) = record.num(&enc.field) else {
                        continue;
                    };
                    if !v.is_finite() {
                        continue;
                    }
                    enc.scale.map(v)
                }
                None => self.radius,
            };
            out.push(Mark::point(
                MarkId::for_row(data.id, row_key),
                self.z_index,
                Point::new(self.x_scale.map(x), self.y_scale.map(y)),
                radius,
                self.fill.clone(),
            ));
        }
        out
    }
}
