// Copyright 2025 the Orrery Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chart building blocks for `orrery_core`.
//!
//! This crate is a small, reusable layer above `orrery_core`:
//! - **Scales** map data values into scene coordinates, with degenerate
//!   domains rejected before a scale exists.
//! - **Series marks** (bar, line, area, point) read a dataset's fields by
//!   name and lower rows into stable-identity marks.
//! - **Guides** (axes, titles) are measured for layout and lowered into
//!   rule/text marks.
//!
//! Text shaping and layout are out of scope; text marks store unshaped
//! strings and guides estimate extents through a [`TextMeasurer`].

#![no_std]

extern crate alloc;

mod area_mark;
mod axis;
mod bar_mark;
mod chart_spec;
#[cfg(not(feature = "std"))]
mod float;
mod format;
mod layout;
mod line_mark;
mod measure;
mod point_mark;
mod rect_mark;
mod rule_mark;
mod scale;
mod title;
mod z_order;

pub use area_mark::AreaMarkSpec;
pub use axis::{AxisOrient, AxisSpec, AxisStyle, GridStyle, StrokeStyle};
pub use bar_mark::BarMarkSpec;
pub use chart_spec::ChartSpec;
pub use layout::{ChartLayout, ChartLayoutSpec, Size};
pub use line_mark::LineMarkSpec;
pub use measure::{HeuristicTextMeasurer, TextMeasurer};
pub use point_mark::{PointMarkSpec, RadiusEncoding};
pub use rect_mark::RectMarkSpec;
pub use rule_mark::RuleMarkSpec;
pub use scale::{
    ScaleBand, ScaleBandSpec, ScaleContinuous, ScaleDomainError, ScaleLinear, ScaleLinearSpec,
    ScaleLog, ScaleLogSpec, ScaleSpec, category_label,
};
pub use title::TitleSpec;
pub use z_order::*;
