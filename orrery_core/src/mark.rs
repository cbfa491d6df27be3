// Copyright 2025 the Orrery Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Marks: resolved visual-element descriptors with stable identity.
//!
//! A mark is what the chart layer hands to a [`crate::Scene`] each frame:
//! geometry plus paint, fully resolved in scene coordinates. Backends never
//! see datasets or scales, only marks and their diffs.

extern crate alloc;

use alloc::boxed::Box;
use alloc::string::String;

use kurbo::{BezPath, Point, Rect};
use peniko::Brush;

use crate::dataset::DatasetId;

/// Stable mark identity.
///
/// Data marks derive their id from `(dataset, row_key)` so the same record
/// keeps the same mark across frames, reorderings, and resamples. Guide
/// marks (axes, titles, frames) use [`MarkId::from_raw`] with values below
/// `1 << 40`, which can never collide with a row-derived id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkId(pub u64);

impl MarkId {
    /// Creates a mark id from a raw value.
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Derives a stable id for a dataset row.
    ///
    /// The dataset id occupies the high bits (offset by one, so raw guide
    /// ids below `1 << 40` stay collision-free); the low 40 bits hold the
    /// row key.
    pub const fn for_row(dataset: DatasetId, row_key: u64) -> Self {
        Self(((dataset.0 as u64 + 1) << 40) | (row_key & ((1 << 40) - 1)))
    }
}

/// The kind of a [`MarkPayload`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MarkKind {
    /// An axis-aligned filled rectangle.
    Rect,
    /// A filled circle with an explicit radius.
    Point,
    /// An arbitrary path (filled and/or stroked).
    Path,
    /// An unshaped text run.
    Text,
}

/// Horizontal text anchoring.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextAnchor {
    /// Anchor at the start of the text.
    Start,
    /// Anchor at the middle of the text.
    Middle,
    /// Anchor at the end of the text.
    End,
}

/// Vertical text baseline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextBaseline {
    /// Alphabetic baseline.
    Alphabetic,
    /// Middle baseline.
    Middle,
    /// Hanging baseline.
    Hanging,
    /// Ideographic baseline.
    Ideographic,
}

/// Payload of a rectangle mark.
#[derive(Clone, Debug, PartialEq)]
pub struct RectPayload {
    /// Geometry in scene coordinates.
    pub rect: Rect,
    /// Fill paint.
    pub fill: Brush,
}

/// Payload of a point (circle) mark.
///
/// Points are a dedicated kind rather than circle paths so that transitions
/// can interpolate center and radius per entity.
#[derive(Clone, Debug, PartialEq)]
pub struct PointPayload {
    /// Center in scene coordinates.
    pub center: Point,
    /// Radius in scene coordinates.
    pub radius: f64,
    /// Fill paint.
    pub fill: Brush,
}

/// Payload of a path mark.
///
/// Paths are replaced wholesale on update; they carry no per-vertex
/// identity and are never geometrically interpolated.
#[derive(Clone, Debug, PartialEq)]
pub struct PathPayload {
    /// Path geometry in scene coordinates.
    pub path: BezPath,
    /// Fill paint.
    pub fill: Brush,
    /// Stroke paint.
    pub stroke: Brush,
    /// Stroke width in scene coordinates.
    pub stroke_width: f64,
}

/// Payload of a text mark. Text is stored unshaped.
#[derive(Clone, Debug, PartialEq)]
pub struct TextPayload {
    /// Anchor position in scene coordinates.
    pub pos: Point,
    /// The text run.
    pub text: String,
    /// Font size in scene coordinates.
    pub font_size: f64,
    /// Fill paint.
    pub fill: Brush,
    /// Horizontal anchor.
    pub anchor: TextAnchor,
    /// Vertical baseline.
    pub baseline: TextBaseline,
    /// Rotation around `pos`, in degrees.
    pub angle: f64,
}

/// A resolved mark payload.
#[derive(Clone, Debug, PartialEq)]
pub enum MarkPayload {
    /// Rectangle.
    Rect(RectPayload),
    /// Point (circle).
    Point(PointPayload),
    /// Path.
    Path(PathPayload),
    /// Text.
    Text(Box<TextPayload>),
}

impl MarkPayload {
    /// Returns the payload kind.
    pub fn kind(&self) -> MarkKind {
        match self {
            Self::Rect(_) => MarkKind::Rect,
            Self::Point(_) => MarkKind::Point,
            Self::Path(_) => MarkKind::Path,
            Self::Text(_) => MarkKind::Text,
        }
    }
}

/// A mark: identity, paint order, and resolved payload.
#[derive(Clone, Debug, PartialEq)]
pub struct Mark {
    /// Stable identity.
    pub id: MarkId,
    /// Rendering order hint. Backends sort by `(z_index, id)` for a
    /// deterministic tie-break.
    pub z_index: i32,
    /// Resolved payload.
    pub payload: MarkPayload,
}

impl Mark {
    /// Creates a mark.
    pub fn new(id: MarkId, z_index: i32, payload: MarkPayload) -> Self {
        Self {
            id,
            z_index,
            payload,
        }
    }

    /// Creates a rectangle mark.
    pub fn rect(id: MarkId, z_index: i32, rect: Rect, fill: impl Into<Brush>) -> Self {
        Self::new(
            id,
            z_index,
            MarkPayload::Rect(RectPayload {
                rect,
                fill: fill.into(),
            }),
        )
    }

    /// Creates a point mark.
    pub fn point(
        id: MarkId,
        z_index: i32,
        center: Point,
        radius: f64,
        fill: impl Into<Brush>,
    ) -> Self {
        Self::new(
            id,
            z_index,
            MarkPayload::Point(PointPayload {
                center,
                radius,
                fill: fill.into(),
            }),
        )
    }

    /// Creates a path mark.
    pub fn path(
        id: MarkId,
        z_index: i32,
        path: BezPath,
        fill: impl Into<Brush>,
        stroke: impl Into<Brush>,
        stroke_width: f64,
    ) -> Self {
        Self::new(
            id,
            z_index,
            MarkPayload::Path(PathPayload {
                path,
                fill: fill.into(),
                stroke: stroke.into(),
                stroke_width,
            }),
        )
    }

    /// Creates a text mark.
    pub fn text(id: MarkId, z_index: i32, payload: TextPayload) -> Self {
        Self::new(id, z_index, MarkPayload::Text(Box::new(payload)))
    }

    /// Returns the payload kind.
    pub fn kind(&self) -> MarkKind {
        self.payload.kind()
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn row_ids_are_stable_and_disjoint_from_raw_guide_ids() {
        let a = MarkId::for_row(DatasetId(0), 0);
        let b = MarkId::for_row(DatasetId(0), 0);
        assert_eq!(a, b);

        // Raw guide ids live below the row-id space.
        let guide = MarkId::from_raw(0x9F_000);
        assert!(guide.0 < (1 << 40));
        assert!(a.0 >= (1 << 40));
    }

    #[test]
    fn row_ids_differ_across_datasets_and_rows() {
        let a = MarkId::for_row(DatasetId(1), 5);
        let b = MarkId::for_row(DatasetId(2), 5);
        let c = MarkId::for_row(DatasetId(1), 6);
        assert_ne!(a, b);
        assert_ne!(a, c);
    }
}
