// Copyright 2025 the Orrery Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis mark generation.
//!
//! An axis is a single spec with an `orient` of `top`, `bottom`, `left`,
//! or `right`. It is measured first (for layout) and then lowered into
//! rule/text marks against the resolved plot rectangle. Band axes label
//! ticks with their category text; continuous axes format tick values with
//! a step-aware default formatter.

extern crate alloc;

use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;

use kurbo::{Point, Rect};
use peniko::Brush;
use peniko::color::palette::css;
use orrery_core::{Mark, MarkId, TextAnchor, TextBaseline, TextPayload};

use crate::format::format_tick_with_step;
use crate::rule_mark::RuleMarkSpec;
use crate::scale::{ScaleBand, ScaleContinuous, ScaleLinear, ScaleLog, ScaleSpec};
use crate::z_order;
use crate::TextMeasurer;

/// A paint + width pair for stroked paths (domain lines, ticks, gridlines).
#[derive(Clone, Debug, PartialEq)]
pub struct StrokeStyle {
    /// Stroke paint.
    pub brush: Brush,
    /// Stroke width in scene coordinates.
    pub stroke_width: f64,
}

impl StrokeStyle {
    /// Convenience for a solid stroke.
    pub fn solid(brush: impl Into<Brush>, stroke_width: f64) -> Self {
        Self {
            brush: brush.into(),
            stroke_width,
        }
    }
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self::solid(css::BLACK, 1.0)
    }
}

/// Axis styling defaults.
#[derive(Clone, Debug, PartialEq)]
pub struct AxisStyle {
    /// Style for the axis domain line and tick marks.
    pub rule: StrokeStyle,
    /// Fill paint for tick labels.
    pub label_fill: Brush,
    /// Font size for tick labels.
    pub label_font_size: f64,
    /// Fill paint for the axis title.
    pub title_fill: Brush,
    /// Font size for the axis title.
    pub title_font_size: f64,
}

impl Default for AxisStyle {
    fn default() -> Self {
        let rule = StrokeStyle::default();
        Self {
            rule: rule.clone(),
            label_fill: rule.brush.clone(),
            label_font_size: 10.0,
            title_fill: rule.brush,
            title_font_size: 11.0,
        }
    }
}

/// Gridline styling.
#[derive(Clone, Debug, PartialEq)]
pub struct GridStyle {
    /// Stroke style for gridlines.
    pub stroke: StrokeStyle,
}

impl Default for GridStyle {
    fn default() -> Self {
        Self {
            stroke: StrokeStyle {
                brush: Brush::Solid(css::BLACK.with_alpha(40.0 / 255.0)),
                stroke_width: 1.0,
            },
        }
    }
}

/// Axis placement relative to the plot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AxisOrient {
    /// A horizontal axis placed above the plot area.
    Top,
    /// A horizontal axis placed below the plot area.
    Bottom,
    /// A vertical axis placed to the left of the plot area.
    Left,
    /// A vertical axis placed to the right of the plot area.
    Right,
}

impl AxisOrient {
    fn is_horizontal(self) -> bool {
        matches!(self, Self::Top | Self::Bottom)
    }

    /// Direction ticks/labels extend away from the plot: `+1` grows toward
    /// larger coordinates (bottom/right), `-1` toward smaller (top/left).
    fn outward(self) -> f64 {
        match self {
            Self::Bottom | Self::Right => 1.0,
            Self::Top | Self::Left => -1.0,
        }
    }
}

/// An axis specification (single type + `orient`).
#[derive(Clone)]
pub struct AxisSpec {
    /// Stable-id base; each generated mark uses a deterministic offset from
    /// this base.
    pub id_base: u64,
    /// The axis scale specification.
    pub scale: ScaleSpec,
    /// Axis placement relative to the plot.
    pub orient: AxisOrient,
    /// Approximate number of ticks (ignored by band axes).
    pub tick_count: usize,
    /// Tick line length in scene coordinates.
    pub tick_size: f64,
    /// Whether to draw tick marks.
    pub ticks: bool,
    /// Whether to draw tick labels.
    pub labels: bool,
    /// Whether to draw the axis domain line.
    pub show_domain: bool,
    /// Padding between the tick end and the tick label.
    pub tick_padding: f64,
    /// Axis styling.
    pub style: AxisStyle,
    /// Optional gridline styling. If `Some`, gridline marks are generated
    /// spanning the plot area.
    pub grid: Option<GridStyle>,
    /// Optional axis title text.
    pub title: Option<String>,
    /// Distance from tick labels to the title.
    pub title_offset: f64,
    /// Optional tick label formatter.
    ///
    /// The second argument is the tick step (best-effort), usable for
    /// consistent decimal formatting. Band ticks never pass through this.
    pub tick_formatter: Option<Arc<dyn Fn(f64, f64) -> String>>,
}

impl core::fmt::Debug for AxisSpec {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AxisSpec")
            .field("id_base", &self.id_base)
            .field("scale", &self.scale)
            .field("orient", &self.orient)
            .field("tick_count", &self.tick_count)
            .field("tick_size", &self.tick_size)
            .field("ticks", &self.ticks)
            .field("labels", &self.labels)
            .field("show_domain", &self.show_domain)
            .field("tick_padding", &self.tick_padding)
            .field("style", &self.style)
            .field("grid", &self.grid)
            .field("title", &self.title)
            .field("title_offset", &self.title_offset)
            .field("tick_formatter", &self.tick_formatter.is_some())
            .finish()
    }
}

impl AxisSpec {
    /// Creates a new axis specification with sensible defaults.
    pub fn new(id_base: u64, scale: impl Into<ScaleSpec>, orient: AxisOrient) -> Self {
        let tick_padding = if orient.is_horizontal() { 12.0 } else { 6.0 };
        Self {
            id_base,
            scale: scale.into(),
            orient,
            tick_count: 10,
            tick_size: 5.0,
            ticks: true,
            labels: true,
            show_domain: true,
            tick_padding,
            style: AxisStyle::default(),
            grid: None,
            title: None,
            title_offset: 10.0,
            tick_formatter: None,
        }
    }

    /// Convenience constructor for a `bottom` axis.
    pub fn bottom(id_base: u64, scale: impl Into<ScaleSpec>) -> Self {
        Self::new(id_base, scale, AxisOrient::Bottom)
    }

    /// Convenience constructor for a `top` axis.
    pub fn top(id_base: u64, scale: impl Into<ScaleSpec>) -> Self {
        Self::new(id_base, scale, AxisOrient::Top)
    }

    /// Convenience constructor for a `left` axis.
    pub fn left(id_base: u64, scale: impl Into<ScaleSpec>) -> Self {
        Self::new(id_base, scale, AxisOrient::Left)
    }

    /// Convenience constructor for a `right` axis.
    pub fn right(id_base: u64, scale: impl Into<ScaleSpec>) -> Self {
        Self::new(id_base, scale, AxisOrient::Right)
    }

    /// Set the approximate tick count.
    pub fn with_tick_count(mut self, tick_count: usize) -> Self {
        self.tick_count = tick_count;
        self
    }

    /// Set tick size in scene coordinates.
    pub fn with_tick_size(mut self, tick_size: f64) -> Self {
        self.tick_size = tick_size;
        self
    }

    /// Enable or disable tick marks.
    pub fn with_ticks(mut self, ticks: bool) -> Self {
        self.ticks = ticks;
        self
    }

    /// Enable or disable tick labels.
    pub fn with_labels(mut self, labels: bool) -> Self {
        self.labels = labels;
        self
    }

    /// Enable or disable the axis domain line.
    pub fn with_domain(mut self, domain: bool) -> Self {
        self.show_domain = domain;
        self
    }

    /// Set tick padding in scene coordinates.
    pub fn with_tick_padding(mut self, tick_padding: f64) -> Self {
        self.tick_padding = tick_padding;
        self
    }

    /// Set a custom tick label formatter.
    pub fn with_tick_formatter(mut self, f: impl Fn(f64, f64) -> String + 'static) -> Self {
        self.tick_formatter = Some(Arc::new(f));
        self
    }

    /// Set the axis style.
    pub fn with_style(mut self, style: AxisStyle) -> Self {
        self.style = style;
        self
    }

    /// Enable gridlines using the provided style.
    pub fn with_grid(mut self, grid: GridStyle) -> Self {
        self.grid = Some(grid);
        self
    }

    /// Set the axis title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the title offset in scene coordinates.
    pub fn with_title_offset(mut self, title_offset: f64) -> Self {
        self.title_offset = title_offset;
        self
    }

    /// Returns a continuous scale mapping axis values into plot
    /// coordinates.
    ///
    /// Panics if this axis uses a band scale.
    pub fn scale_continuous(&self, plot: Rect) -> ScaleContinuous {
        let range = self.range(plot);
        match &self.scale {
            ScaleSpec::Linear(s) => {
                ScaleContinuous::Linear(s.instantiate_resolved(range, self.tick_count))
            }
            ScaleSpec::Log(s) => ScaleContinuous::Log(s.instantiate(range)),
            ScaleSpec::Band(_) => panic!("scale_continuous called on a band axis scale"),
        }
    }

    /// Returns a band scale mapping categories into plot coordinates.
    ///
    /// Panics if this axis does not use a band scale.
    pub fn scale_band(&self, plot: Rect) -> ScaleBand {
        let range = self.range(plot);
        match &self.scale {
            ScaleSpec::Band(s) => s.instantiate(range),
            _ => panic!("scale_band called on a non-band axis scale"),
        }
    }

    fn range(&self, plot: Rect) -> (f64, f64) {
        if self.orient.is_horizontal() {
            (plot.x0, plot.x1)
        } else {
            (plot.y1, plot.y0)
        }
    }

    /// Tick labels in tick order, plus the tick step (0 for band/log).
    fn tick_labels(&self) -> (Vec<String>, f64) {
        match &self.scale {
            ScaleSpec::Linear(s) => {
                let domain = s.resolved_domain(self.tick_count);
                let ticks = ScaleLinear::new(domain, (0.0, 1.0)).ticks(self.tick_count);
                let step = tick_step(&ticks);
                let labels = ticks
                    .iter()
                    .map(|&v| self.format_tick(v, step))
                    .collect();
                (labels, step)
            }
            ScaleSpec::Log(s) => {
                let tmp = ScaleLog::new(s.domain, (0.0, 1.0)).with_base(s.base);
                let ticks = tmp.ticks(self.tick_count);
                let labels = ticks.iter().map(|&v| self.format_tick(v, 0.0)).collect();
                (labels, 0.0)
            }
            ScaleSpec::Band(s) => (s.domain.clone(), 0.0),
        }
    }

    /// Tick `(position, label)` pairs along the axis for a plot rectangle.
    fn tick_points(&self, plot: Rect) -> Vec<(f64, String)> {
        match &self.scale {
            ScaleSpec::Linear(_) | ScaleSpec::Log(_) => {
                let scale = self.scale_continuous(plot);
                let (labels, _step) = self.tick_labels();
                let values = scale.ticks(self.tick_count);
                values
                    .into_iter()
                    .zip(labels)
                    .map(|(v, label)| (scale.map(v), label))
                    .collect()
            }
            ScaleSpec::Band(_) => {
                let band = self.scale_band(plot);
                let bw = band.band_width();
                (0..band.count())
                    .map(|i| {
                        let label = String::from(band.label(i).unwrap_or(""));
                        (band.x(i) + 0.5 * bw, label)
                    })
                    .collect()
            }
        }
    }

    fn continuous_domain(&self) -> Option<(f64, f64)> {
        match &self.scale {
            ScaleSpec::Linear(s) => Some(s.resolved_domain(self.tick_count)),
            ScaleSpec::Log(s) => Some(s.domain),
            ScaleSpec::Band(_) => None,
        }
    }

    fn format_tick(&self, v: f64, step: f64) -> String {
        match &self.tick_formatter {
            Some(f) => (f)(v, step),
            None => format_tick_with_step(v, step),
        }
    }

    /// Measure the thickness this axis needs along its normal direction.
    ///
    /// This is intended for a measure/arrange layout pass.
    pub fn measure(&self, measurer: &dyn TextMeasurer) -> f64 {
        let tick_extent = if self.ticks { self.tick_size.abs() } else { 0.0 };
        let label_gap = self.tick_padding.max(0.0);

        let mut max_label_extent = 0.0_f64;
        if self.labels {
            let (labels, _step) = self.tick_labels();
            for label in &labels {
                let (w, h) = measurer.measure(label, self.style.label_font_size);
                let extent = if self.orient.is_horizontal() { h } else { w };
                max_label_extent = max_label_extent.max(extent);
            }
        }

        let label_thickness = if self.labels {
            label_gap + max_label_extent
        } else {
            0.0
        };
        let mut out = tick_extent + label_thickness;
        if let Some(title) = &self.title {
            let (_w, h) = measurer.measure(title, self.style.title_font_size);
            // For a rotated vertical title, line height maps to thickness
            // the same way.
            out += self.title_offset.max(0.0) + h;
        }
        out
    }

    /// Generate axis marks for the given plot rectangle and arranged axis
    /// rectangle.
    ///
    /// `axis_rect` should be the reserved region for this axis, adjacent to
    /// `plot`.
    pub fn marks(&self, plot: Rect, axis_rect: Rect) -> Vec<Mark> {
        let horizontal = self.orient.is_horizontal();
        let outward = self.orient.outward();
        // The coordinate of the axis line on the plot edge (y for
        // horizontal axes, x for vertical ones).
        let line = match self.orient {
            AxisOrient::Bottom => plot.y1,
            AxisOrient::Top => plot.y0,
            AxisOrient::Left => plot.x0,
            AxisOrient::Right => plot.x1,
        };
        let (span0, span1) = if horizontal {
            (plot.x0, plot.x1)
        } else {
            (plot.y0, plot.y1)
        };

        let tick_size = self.tick_size.abs();
        let tick_extent = if self.ticks { tick_size } else { 0.0 };
        let label_gap = self.tick_padding.max(0.0);
        let points = self.tick_points(plot);
        let in_span = |p: f64| p >= span0 - 1.0e-9 && p <= span1 + 1.0e-9;

        let mut out = Vec::new();

        if let Some(grid) = &self.grid {
            // Clamp grid lines to the plot bounds; "niced" ticks may land
            // outside the domain, and the domain endpoints themselves get a
            // line even when the tick generator skips them.
            let mut positions: Vec<f64> =
                points.iter().map(|(p, _)| *p).filter(|p| in_span(*p)).collect();
            if let Some((d0, d1)) = self.continuous_domain() {
                let scale = self.scale_continuous(plot);
                push_if_missing(&mut positions, scale.map(d0));
                push_if_missing(&mut positions, scale.map(d1));
            }
            let base = self.id_base.wrapping_sub(5_000);
            for (i, p) in positions.iter().copied().enumerate() {
                let id = MarkId::from_raw(base + i as u64);
                let rule = if horizontal {
                    RuleMarkSpec::vertical(id, p, plot.y0, plot.y1)
                } else {
                    RuleMarkSpec::horizontal(id, p, plot.x0, plot.x1)
                };
                out.push(
                    rule.with_stroke(grid.stroke.brush.clone(), grid.stroke.stroke_width)
                        .with_z_index(z_order::GRID_LINES)
                        .mark(),
                );
            }
        }

        if self.show_domain {
            let id = MarkId::from_raw(self.id_base);
            let rule = if horizontal {
                RuleMarkSpec::horizontal(id, line, plot.x0, plot.x1)
            } else {
                RuleMarkSpec::vertical(id, line, plot.y0, plot.y1)
            };
            out.push(
                rule.with_stroke(self.style.rule.brush.clone(), self.style.rule.stroke_width)
                    .with_z_index(z_order::AXIS_RULES)
                    .mark(),
            );
        }

        let n_points = points.len();
        for (i, (p, label)) in points.into_iter().enumerate() {
            if !in_span(p) {
                continue;
            }

            if self.ticks {
                let id = MarkId::from_raw(self.id_base + 1 + i as u64);
                let tip = line + outward * tick_size;
                let rule = if horizontal {
                    RuleMarkSpec::vertical(id, p, line, tip)
                } else {
                    RuleMarkSpec::horizontal(id, p, line, tip)
                };
                out.push(
                    rule.with_stroke(self.style.rule.brush.clone(), self.style.rule.stroke_width)
                        .with_z_index(z_order::AXIS_RULES)
                        .mark(),
                );
            }

            if self.labels {
                let offset = line + outward * (tick_extent + label_gap);
                let (pos, anchor, baseline) = if horizontal {
                    // Clamp the outermost labels into the plot span so they
                    // don't spill past the chart edge.
                    let (anchor, p) = if i == 0 {
                        (TextAnchor::Start, p.clamp(span0, span1))
                    } else if i + 1 == n_points {
                        (TextAnchor::End, p.clamp(span0, span1))
                    } else {
                        (TextAnchor::Middle, p)
                    };
                    let baseline = if outward > 0.0 {
                        TextBaseline::Hanging
                    } else {
                        TextBaseline::Ideographic
                    };
                    (Point::new(p, offset), anchor, baseline)
                } else {
                    let anchor = if outward > 0.0 {
                        TextAnchor::Start
                    } else {
                        TextAnchor::End
                    };
                    (Point::new(offset, p), anchor, TextBaseline::Middle)
                };
                out.push(Mark::text(
                    MarkId::from_raw(self.id_base + 1000 + i as u64),
                    z_order::AXIS_LABELS,
                    TextPayload {
                        pos,
                        text: label,
                        font_size: self.style.label_font_size,
                        fill: self.style.label_fill.clone(),
                        anchor,
                        baseline,
                        angle: 0.0,
                    },
                ));
            }
        }

        if let Some(title) = &self.title {
            // The title sits in the strip at the outer edge of `axis_rect`;
            // `measure` reserved `title_offset + title height` for it, so
            // placing it at the edge respects the offset without
            // overlapping tick labels.
            let (pos, baseline, angle) = match self.orient {
                AxisOrient::Bottom => (
                    Point::new(0.5 * (plot.x0 + plot.x1), axis_rect.y1 - self.style.title_font_size),
                    TextBaseline::Hanging,
                    0.0,
                ),
                AxisOrient::Top => (
                    Point::new(0.5 * (plot.x0 + plot.x1), axis_rect.y0 + self.style.title_font_size),
                    TextBaseline::Ideographic,
                    0.0,
                ),
                AxisOrient::Left => (
                    Point::new(axis_rect.x0 + 0.5 * self.style.title_font_size, 0.5 * (plot.y0 + plot.y1)),
                    TextBaseline::Alphabetic,
                    -90.0,
                ),
                AxisOrient::Right => (
                    Point::new(axis_rect.x1 - 0.5 * self.style.title_font_size, 0.5 * (plot.y0 + plot.y1)),
                    TextBaseline::Alphabetic,
                    90.0,
                ),
            };
            out.push(Mark::text(
                MarkId::from_raw(self.id_base + 9000),
                z_order::AXIS_TITLES,
                TextPayload {
                    pos,
                    text: title.clone(),
                    font_size: self.style.title_font_size,
                    fill: self.style.title_fill.clone(),
                    anchor: TextAnchor::Middle,
                    baseline,
                    angle,
                },
            ));
        }

        out
    }
}

fn tick_step(ticks: &[f64]) -> f64 {
    let step = ticks
        .windows(2)
        .map(|w| (w[1] - w[0]).abs())
        .fold(f64::INFINITY, f64::min);
    if step.is_finite() { step } else { 0.0 }
}

fn push_if_missing(positions: &mut Vec<f64>, p: f64) {
    if !p.is_finite() {
        return;
    }
    let eps = 1.0e-9;
    if positions.iter().any(|q| (*q - p).abs() <= eps) {
        return;
    }
    positions.push(p);
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::string::ToString;

    use kurbo::Rect;
    use orrery_core::{MarkKind, MarkPayload};

    use super::*;
    use crate::HeuristicTextMeasurer;
    use crate::scale::{ScaleBandSpec, ScaleLinearSpec, ScaleLogSpec};

    fn text_labels(marks: &[Mark]) -> Vec<String> {
        marks
            .iter()
            .filter(|m| m.z_index == z_order::AXIS_LABELS)
            .filter_map(|m| match &m.payload {
                MarkPayload::Text(t) => Some(t.text.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn axis_measure_respects_ticks_and_labels_toggles() {
        let measurer = HeuristicTextMeasurer;
        let axis = AxisSpec::left(1, ScaleLinearSpec::new((0.0, 10.0))).with_tick_count(3);

        let with_all = axis.measure(&measurer);
        let no_labels = axis.clone().with_labels(false).measure(&measurer);
        let no_ticks = axis.clone().with_ticks(false).measure(&measurer);
        let none = axis
            .clone()
            .with_ticks(false)
            .with_labels(false)
            .with_domain(false)
            .measure(&measurer);

        assert!(with_all > 0.0);
        assert!(no_labels < with_all);
        assert!(no_ticks < with_all);
        assert_eq!(none, 0.0);
    }

    #[test]
    fn axis_uses_custom_tick_formatter_for_labels() {
        let plot = Rect::new(0.0, 0.0, 100.0, 50.0);
        let axis_rect = Rect::new(0.0, 50.0, 100.0, 60.0);

        let axis = AxisSpec::bottom(1, ScaleLinearSpec::new((0.0, 10.0)))
            .with_tick_count(3)
            .with_tick_formatter(|_v, _step| String::from("X"));

        let marks = axis.marks(plot, axis_rect);
        let labels = text_labels(&marks);
        assert!(!labels.is_empty());
        assert!(labels.iter().all(|l| l == "X"));
    }

    #[test]
    fn band_axis_labels_ticks_with_category_text() {
        let plot = Rect::new(0.0, 0.0, 100.0, 50.0);
        let axis_rect = Rect::new(0.0, 50.0, 100.0, 70.0);

        let spec = ScaleBandSpec::from_labels(
            ["alpha", "beta"].iter().map(|s| s.to_string()),
        );
        let axis = AxisSpec::bottom(1, spec);
        let marks = axis.marks(plot, axis_rect);
        assert_eq!(text_labels(&marks), ["alpha", "beta"]);
    }

    #[test]
    fn log_axis_includes_powers_of_base_in_ticks() {
        let plot = Rect::new(0.0, 0.0, 200.0, 100.0);
        let axis_rect = Rect::new(0.0, 0.0, 40.0, 100.0);

        let axis =
            AxisSpec::left(1, ScaleLogSpec::new((1.0, 1000.0)).with_base(10.0)).with_tick_count(10);

        let marks = axis.marks(plot, axis_rect);
        let labels = text_labels(&marks);
        assert!(labels.iter().any(|s| s == "1"), "missing '1' in {labels:?}");
        assert!(
            labels.iter().any(|s| s == "1000"),
            "missing '1000' in {labels:?}"
        );
    }

    #[test]
    fn axis_without_ticks_emits_no_tick_rule_marks() {
        let plot = Rect::new(0.0, 0.0, 100.0, 50.0);
        let axis_rect = Rect::new(0.0, 50.0, 100.0, 60.0);

        let axis = AxisSpec::bottom(1, ScaleLinearSpec::new((0.0, 10.0)))
            .with_tick_count(3)
            .with_ticks(false)
            .with_domain(false);

        let marks = axis.marks(plot, axis_rect);
        assert!(
            marks.iter().all(|m| m.kind() != MarkKind::Path),
            "expected no rule marks when ticks/domain are disabled"
        );
    }

    #[test]
    fn grid_lines_span_the_plot_and_stay_inside_it() {
        let plot = Rect::new(50.0, 30.0, 250.0, 130.0);
        let axis_rect = Rect::new(0.0, 30.0, 50.0, 130.0);

        let axis = AxisSpec::left(1, ScaleLinearSpec::new((0.0, 3.29)))
            .with_tick_count(6)
            .with_grid(GridStyle::default());

        let marks = axis.marks(plot, axis_rect);
        let mut saw_grid = false;
        for m in marks {
            if m.z_index != z_order::GRID_LINES {
                continue;
            }
            saw_grid = true;
            let MarkPayload::Path(p) = &m.payload else {
                panic!("grid mark should be a path");
            };
            let b = kurbo::Shape::bounding_box(&p.path);
            assert!(b.y0 >= plot.y0 - 1.0e-9, "grid above plot: {b:?}");
            assert!(b.y1 <= plot.y1 + 1.0e-9, "grid below plot: {b:?}");
            assert!((b.x0 - plot.x0).abs() < 1.0e-9, "grid must span the plot");
            assert!((b.x1 - plot.x1).abs() < 1.0e-9, "grid must span the plot");
        }
        assert!(saw_grid, "expected at least one grid line");
    }

    #[test]
    fn bottom_title_sits_in_the_axis_rect_title_strip() {
        let measurer = HeuristicTextMeasurer;
        let plot = Rect::new(0.0, 0.0, 100.0, 100.0);

        let axis = AxisSpec::bottom(1, ScaleLinearSpec::new((0.0, 10.0)))
            .with_tick_count(3)
            .with_title("X")
            .with_title_offset(10.0);

        let h = axis.measure(&measurer);
        let axis_rect = Rect::new(plot.x0, plot.y1, plot.x1, plot.y1 + h);
        let marks = axis.marks(plot, axis_rect);

        let title = marks
            .iter()
            .find(|m| m.id == MarkId::from_raw(1 + 9000))
            .expect("missing title mark");
        let MarkPayload::Text(t) = &title.payload else {
            panic!("title should be text");
        };
        let expected = axis_rect.y1 - axis.style.title_font_size;
        assert!((t.pos.y - expected).abs() < 1e-9);
    }
}
