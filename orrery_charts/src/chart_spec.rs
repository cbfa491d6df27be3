// Copyright 2025 the Orrery Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chart composition helpers.
//!
//! A chart is assembled from a plot rectangle, guide components (axes,
//! title), and a set of series marks. This module owns the layout pass and
//! guide lowering so dashboard code only supplies the series builder.

extern crate alloc;

use alloc::vec::Vec;

use kurbo::Rect;
use orrery_core::Mark;

use crate::{
    AxisSpec, ChartLayout, ChartLayoutSpec, ScaleBand, ScaleContinuous, Size, TextMeasurer,
    TitleSpec,
};

/// A composed chart description that owns guide specs and layout inputs.
#[derive(Clone, Debug, Default)]
pub struct ChartSpec {
    /// Optional title.
    pub title: Option<TitleSpec>,
    /// Desired plot size (data rectangle), used when `layout.view_size` is
    /// `None`.
    pub plot_size: Size,
    /// Layout options.
    pub layout: ChartLayoutSpec,
    /// Optional left axis.
    pub axis_left: Option<AxisSpec>,
    /// Optional right axis.
    pub axis_right: Option<AxisSpec>,
    /// Optional top axis.
    pub axis_top: Option<AxisSpec>,
    /// Optional bottom axis.
    pub axis_bottom: Option<AxisSpec>,
}

impl ChartSpec {
    /// Returns the bottom axis if present, otherwise the top axis.
    pub fn x_axis(&self) -> Option<&AxisSpec> {
        self.axis_bottom.as_ref().or(self.axis_top.as_ref())
    }

    /// Returns the left axis if present, otherwise the right axis.
    pub fn y_axis(&self) -> Option<&AxisSpec> {
        self.axis_left.as_ref().or(self.axis_right.as_ref())
    }

    /// Instantiates the x-axis continuous scale for a given plot rectangle.
    ///
    /// Returns `None` if no x-axis is configured. Panics if the configured
    /// x-axis uses a band scale.
    pub fn x_scale_continuous(&self, plot: Rect) -> Option<ScaleContinuous> {
        self.x_axis().map(|a| a.scale_continuous(plot))
    }

    /// Instantiates the y-axis continuous scale for a given plot rectangle.
    ///
    /// Returns `None` if no y-axis is configured. Panics if the configured
    /// y-axis uses a band scale.
    pub fn y_scale_continuous(&self, plot: Rect) -> Option<ScaleContinuous> {
        self.y_axis().map(|a| a.scale_continuous(plot))
    }

    /// Instantiates the x-axis band scale for a given plot rectangle.
    ///
    /// Returns `None` if no x-axis is configured. Panics if the configured
    /// x-axis is not a band scale.
    pub fn x_scale_band(&self, plot: Rect) -> Option<ScaleBand> {
        self.x_axis().map(|a| a.scale_band(plot))
    }

    /// Computes layout for this chart.
    pub fn layout(&self, measurer: &dyn TextMeasurer) -> ChartLayout {
        let mut layout = self.layout;
        layout.title_top = self.title.as_ref().map(|t| t.measure(measurer));
        layout.plot_size = self.plot_size;
        layout.axis_left = self.axis_left.as_ref().map(|a| a.measure(measurer));
        layout.axis_right = self.axis_right.as_ref().map(|a| a.measure(measurer));
        layout.axis_top = self.axis_top.as_ref().map(|a| a.measure(measurer));
        layout.axis_bottom = self.axis_bottom.as_ref().map(|a| a.measure(measurer));
        ChartLayout::arrange(&layout)
    }

    /// Generates marks for the title and axes, given a computed layout.
    pub fn guide_marks(&self, measurer: &dyn TextMeasurer, layout: &ChartLayout) -> Vec<Mark> {
        let mut out = Vec::new();

        if let (Some(title), Some(rect)) = (self.title.as_ref(), layout.title_top) {
            out.extend(title.marks(measurer, rect));
        }

        let plot = layout.plot;
        if let (Some(axis), Some(rect)) = (self.axis_bottom.as_ref(), layout.axis_bottom) {
            out.extend(axis.marks(plot, rect));
        }
        if let (Some(axis), Some(rect)) = (self.axis_top.as_ref(), layout.axis_top) {
            out.extend(axis.marks(plot, rect));
        }
        if let (Some(axis), Some(rect)) = (self.axis_left.as_ref(), layout.axis_left) {
            out.extend(axis.marks(plot, rect));
        }
        if let (Some(axis), Some(rect)) = (self.axis_right.as_ref(), layout.axis_right) {
            out.extend(axis.marks(plot, rect));
        }

        out
    }

    /// Convenience to produce a full mark list: series marks + guide marks.
    ///
    /// The series builder is invoked with the resolved plot rectangle.
    pub fn marks(
        &self,
        measurer: &dyn TextMeasurer,
        build_series: impl FnOnce(&Self, Rect) -> Vec<Mark>,
    ) -> (ChartLayout, Vec<Mark>) {
        let layout = self.layout(measurer);
        let mut marks = build_series(self, layout.plot);
        marks.extend(self.guide_marks(measurer, &layout));
        (layout, marks)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use orrery_core::MarkId;

    use super::*;
    use crate::scale::ScaleLinearSpec;
    use crate::HeuristicTextMeasurer;

    #[test]
    fn marks_pass_the_resolved_plot_rect_to_the_series_builder() {
        let chart = ChartSpec {
            title: Some(TitleSpec::new(MarkId::from_raw(1), "t")),
            plot_size: Size::new(100.0, 50.0),
            layout: ChartLayoutSpec {
                outer_padding: 10.0,
                ..ChartLayoutSpec::default()
            },
            axis_bottom: Some(AxisSpec::bottom(100, ScaleLinearSpec::new((0.0, 1.0)))),
            axis_left: Some(AxisSpec::left(200, ScaleLinearSpec::new((0.0, 1.0)))),
            ..ChartSpec::default()
        };

        let measurer = HeuristicTextMeasurer;
        let mut seen_plot = None;
        let (layout, marks) = chart.marks(&measurer, |_spec, plot| {
            seen_plot = Some(plot);
            Vec::new()
        });

        assert_eq!(seen_plot, Some(layout.plot));
        assert!(!marks.is_empty(), "guides must be lowered into marks");
        assert!((layout.plot.width() - 100.0).abs() < 1e-9);
    }
}
