// Copyright 2025 the Orrery Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chart titles.
//!
//! Titles participate in chart layout (they reserve a strip above the plot)
//! but render as ordinary text marks.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Point, Rect};
use peniko::Brush;
use orrery_core::{Mark, MarkId, TextAnchor, TextBaseline, TextPayload};

use crate::z_order;
use crate::TextMeasurer;

/// A chart-level title.
#[derive(Clone, Debug)]
pub struct TitleSpec {
    /// Stable mark id.
    pub id: MarkId,
    /// Title text (unshaped).
    pub text: String,
    /// Font size in scene coordinates.
    pub font_size: f64,
    /// Fill paint.
    pub fill: Brush,
    /// Extra vertical padding around the title text, applied above and
    /// below.
    pub padding: f64,
    /// Horizontal anchor within the title rectangle.
    pub anchor: TextAnchor,
    /// Rendering order hint.
    pub z_index: i32,
}

impl TitleSpec {
    /// Creates a title spec with default styling.
    pub fn new(id: MarkId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            font_size: 12.0,
            fill: Brush::default(),
            padding: 6.0,
            anchor: TextAnchor::Middle,
            z_index: z_order::TITLES,
        }
    }

    /// Sets the font size.
    pub fn with_font_size(mut self, font_size: f64) -> Self {
        self.font_size = font_size;
        self
    }

    /// Sets the fill paint.
    pub fn with_fill(mut self, fill: impl Into<Brush>) -> Self {
        self.fill = fill.into();
        self
    }

    /// Sets the vertical padding.
    pub fn with_padding(mut self, padding: f64) -> Self {
        self.padding = padding.max(0.0);
        self
    }

    /// Returns the thickness (height) reserved by this title in chart
    /// layout.
    pub fn measure(&self, measurer: &dyn TextMeasurer) -> f64 {
        let (_w, h) = measurer.measure(&self.text, self.font_size);
        2.0 * self.padding.max(0.0) + h
    }

    /// Emits the title mark placed within the provided title rectangle.
    pub fn marks(&self, measurer: &dyn TextMeasurer, title_rect: Rect) -> Vec<Mark> {
        let x = match self.anchor {
            TextAnchor::Start => title_rect.x0,
            TextAnchor::Middle => 0.5 * (title_rect.x0 + title_rect.x1),
            TextAnchor::End => title_rect.x1,
        };
        let (_w, h) = measurer.measure(&self.text, self.font_size);
        let y = title_rect.y0 + self.padding.max(0.0) + 0.5 * h;

        alloc::vec![Mark::text(
            self.id,
            self.z_index,
            TextPayload {
                pos: Point::new(x, y),
                text: self.text.clone(),
                font_size: self.font_size,
                fill: self.fill.clone(),
                anchor: self.anchor,
                baseline: TextBaseline::Middle,
                angle: 0.0,
            },
        )]
    }
}
