// Copyright 2025 the Orrery Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Line mark generation.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::BezPath;
use peniko::Color;
use orrery_core::{Dataset, Mark, MarkId};

use crate::axis::StrokeStyle;
use crate::scale::ScaleContinuous;

/// A line mark spec.
///
/// This generates a single path mark from the full point sequence. The path
/// is recomputed and replaced wholesale on update; individual points have
/// no enter/exit semantics. Rows with missing or non-finite values are
/// omitted from the polyline (adjacent kept points connect).
#[derive(Clone, Debug)]
pub struct LineMarkSpec {
    /// Stable id for the mark emitted by this spec.
    pub id: MarkId,
    /// Field for x values.
    pub x: String,
    /// Field for y values.
    pub y: String,
    /// X scale mapping data x into scene x.
    pub x_scale: ScaleContinuous,
    /// Y scale mapping data y into scene y.
    pub y_scale: ScaleContinuous,
    /// Stroke style for the line.
    pub stroke: StrokeStyle,
    /// Rendering order hint.
    pub z_index: i32,
}

impl LineMarkSpec {
    /// Creates a line mark spec with a black stroke at width 1.
    pub fn new(
        id: MarkId,
        x: impl Into<String>,
        y: impl Into<String>,
        x_scale: ScaleContinuous,
        y_scale: ScaleContinuous,
    ) -> Self {
        Self {
            id,
            x: x.into(),
            y: y.into(),
            x_scale,
            y_scale,
            stroke: StrokeStyle::default(),
            z_index: crate::z_order::SERIES_STROKE,
        }
    }

    /// Sets the stroke style.
    pub fn with_stroke(mut self, stroke: StrokeStyle) -> Self {
        self.stroke = stroke;
        self
    }

    /// Sets the z-index used for render ordering.
    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    /// Generates the line mark from the dataset's rows.
    pub fn marks(&self, data: &Dataset) -> Vec<Mark> {
        let mut p = BezPath::new();
        let mut started = false;
        for (_row_key, record) in data.rows() {
            let (Some(x), Some(y)) = (record.num(&self.x), record.num(&self.y)) else {
                continue;
            };
            if !x.is_finite() || !y.is_finite() {
                continue;
            }
            let pt = (self.x_scale.map(x), self.y_scale.map(y));
            if started {
                p.line_to(pt);
            } else {
                p.move_to(pt);
                started = true;
            }
        }

        alloc::vec![Mark::path(
            self.id,
            self.z_index,
            p,
            Color::TRANSPARENT,
            self.stroke.brush.clone(),
            self.stroke.stroke_width,
        )]
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use kurbo::PathEl;
    use orrery_core::{DatasetId, MarkPayload, Record};

    use super::*;
    use crate::scale::ScaleLinear;

    fn xy(x: f64, y: f64) -> Record {
        Record::new().with("x", x).with("y", y)
    }

    #[test]
    fn line_connects_rows_in_order_and_skips_gaps() {
        let data = Dataset::from_records(
            DatasetId(1),
            vec![
                xy(0.0, 0.0),
                Record::new().with("x", 1.0), // missing y: skipped
                xy(2.0, 4.0),
            ],
        );
        let s = ScaleContinuous::Linear(ScaleLinear::new((0.0, 2.0), (0.0, 100.0)));
        let sy = ScaleContinuous::Linear(ScaleLinear::new((0.0, 4.0), (100.0, 0.0)));
        let marks = LineMarkSpec::new(MarkId::from_raw(7), "x", "y", s, sy).marks(&data);
        assert_eq!(marks.len(), 1);

        let MarkPayload::Path(path) = &marks[0].payload else {
            panic!("expected path payload");
        };
        let els: Vec<PathEl> = path.path.elements().to_vec();
        assert_eq!(els.len(), 2, "two usable rows, one segment: {els:?}");
        assert!(matches!(els[0], PathEl::MoveTo(p) if p.x == 0.0 && p.y == 100.0));
        assert!(matches!(els[1], PathEl::LineTo(p) if p.x == 100.0 && p.y == 0.0));
    }

    #[test]
    fn empty_dataset_yields_an_empty_path_not_a_panic() {
        let data = Dataset::new(DatasetId(1));
        let s = ScaleContinuous::Linear(ScaleLinear::new((0.0, 1.0), (0.0, 1.0)));
        let marks = LineMarkSpec::new(MarkId::from_raw(7), "x", "y", s, s).marks(&data);
        let MarkPayload::Path(path) = &marks[0].payload else {
            panic!("expected path payload");
        };
        assert!(path.path.elements().is_empty());
    }
}
