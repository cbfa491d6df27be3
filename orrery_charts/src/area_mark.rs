// Copyright 2025 the Orrery Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Area mark generation.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::BezPath;
use peniko::{Brush, Color};
use orrery_core::{Dataset, Mark, MarkId};

use crate::axis::StrokeStyle;
use crate::scale::ScaleContinuous;

/// An area mark spec.
///
/// This generates one filled path mark for the area and optionally one
/// stroked path mark for the outline. Like lines, areas are recomputed and
/// replaced wholesale; rows with missing or non-finite values are omitted.
#[derive(Clone, Debug)]
pub struct AreaMarkSpec {
    /// Stable-id base for marks emitted by this spec (outline uses
    /// `id_base + 1`).
    pub id_base: u64,
    /// Field for x values.
    pub x: String,
    /// Field for y values.
    pub y: String,
    /// X scale mapping data x into scene x.
    pub x_scale: ScaleContinuous,
    /// Y scale mapping data y into scene y.
    pub y_scale: ScaleContinuous,
    /// Baseline in data units (typically `0.0`).
    pub baseline: f64,
    /// Fill paint for the area.
    pub fill: Brush,
    /// Optional stroke for the outline.
    pub stroke: Option<StrokeStyle>,
    /// Rendering order hint for the filled area.
    pub z_index: i32,
}

impl AreaMarkSpec {
    /// Creates an area mark spec with a baseline at `0` and a default fill.
    pub fn new(
        id_base: u64,
        x: impl Into<String>,
        y: impl Into<String>,
        x_scale: ScaleContinuous,
        y_scale: ScaleContinuous,
    ) -> Self {
        Self {
            id_base,
            x: x.into(),
            y: y.into(),
            x_scale,
            y_scale,
            baseline: 0.0,
            fill: Brush::default(),
            stroke: None,
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

    /// Sets the outline stroke.
    pub fn with_stroke(mut self, stroke: StrokeStyle) -> Self {
        self.stroke = Some(stroke);
        self
    }

    /// Sets the z-index used for render ordering.
    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    fn points(&self, data: &Dataset) -> Vec<(f64, f64)> {
        let mut out = Vec::with_capacity(data.row_count());
        for (_row_key, record) in data.rows() {
            let (Some(x), Some(y)) = (record.num(&self.x), record.num(&self.y)) else {
                continue;
            };
            if !x.is_finite() || !y.is_finite() {
                continue;
            }
            out.push((self.x_scale.map(x), self.y_scale.map(y)));
        }
        out
    }

    /// Generates the area (and optional outline) marks.
    pub fn marks(&self, data: &Dataset) -> Vec<Mark> {
        let points = self.points(data);
        let y0 = self.y_scale.map(self.baseline);

        let mut area = BezPath::new();
        if let (Some(first), Some(last)) = (points.first(), points.last()) {
            area.move_to((first.0, y0));
            for pt in &points {
                area.line_to(*pt);
            }
            area.line_to((last.0, y0));
            area.close_path();
        }

        let mut out = alloc::vec![Mark::path(
            MarkId::from_raw(self.id_base),
            self.z_index,
            area,
            self.fill.clone(),
            Color::TRANSPARENT,
            0.0,
        )];

        if let Some(stroke) = &self.stroke {
            let mut outline = BezPath::new();
            for (i, pt) in points.iter().enumerate() {
                if i == 0 {
                    outline.move_to(*pt);
                } else {
                    outline.line_to(*pt);
                }
            }
            out.push(Mark::path(
                MarkId::from_raw(self.id_base + 1),
                self.z_index.saturating_add(crate::z_order::SERIES_STROKE),
                outline,
                Color::TRANSPARENT,
                stroke.brush.clone(),
                stroke.stroke_width,
            ));
        }

        out
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use kurbo::{PathEl, Shape};
    use orrery_core::{DatasetId, MarkPayload, Record};

    use super::*;
    use crate::scale::ScaleLinear;

    fn xy(x: f64, y: f64) -> Record {
        Record::new().with("x", x).with("y", y)
    }

    #[test]
    fn area_closes_down_to_the_baseline() {
        let data = Dataset::from_records(
            DatasetId(1),
            vec![xy(0.0, 1.0), xy(1.0, 3.0), xy(2.0, 2.0)],
        );
        let sx = ScaleContinuous::Linear(ScaleLinear::new((0.0, 2.0), (0.0, 100.0)));
        let sy = ScaleContinuous::Linear(ScaleLinear::new((0.0, 4.0), (100.0, 0.0)));

        let marks = AreaMarkSpec::new(11, "x", "y", sx, sy).marks(&data);
        assert_eq!(marks.len(), 1);
        let MarkPayload::Path(p) = &marks[0].payload else {
            panic!("expected path payload");
        };
        let els: Vec<PathEl> = p.path.elements().to_vec();
        // move, 3 data points, baseline return, close.
        assert_eq!(els.len(), 6);
        let b = p.path.bounding_box();
        // The baseline (y=0 data → y=100 scene) bounds the bottom.
        assert!((b.y1 - 100.0).abs() < 1e-9);
    }

    #[test]
    fn outline_is_emitted_above_the_fill_when_requested() {
        let data = Dataset::from_records(DatasetId(1), vec![xy(0.0, 1.0), xy(1.0, 2.0)]);
        let s = ScaleContinuous::Linear(ScaleLinear::new((0.0, 2.0), (0.0, 100.0)));
        let marks = AreaMarkSpec::new(11, "x", "y", s, s)
            .with_stroke(StrokeStyle::default())
            .marks(&data);
        assert_eq!(marks.len(), 2);
        assert!(marks[1].z_index > marks[0].z_index);
        assert_eq!(marks[1].id, MarkId::from_raw(12));
    }
}
