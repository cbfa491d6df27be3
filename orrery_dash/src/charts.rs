// Copyright 2025 the Orrery Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-kind chart assembly for the two dashboard views.
//!
//! Each function builds a [`ChartSpec`] (axes + title) and the series marks
//! for the current dataset and field selection, returning the computed
//! layout and full mark list. Scale building happens here, fresh from the
//! dataset, every time; a degenerate domain surfaces as
//! [`ScaleDomainError`] and the chart renders a no-data state instead.

use kurbo::Rect;
use orrery_charts::{
    AreaMarkSpec, AxisSpec, BarMarkSpec, ChartLayout, ChartLayoutSpec, ChartSpec, GridStyle,
    HeuristicTextMeasurer, LineMarkSpec, PointMarkSpec, RadiusEncoding, RectMarkSpec,
    ScaleBandSpec, ScaleDomainError, ScaleLinearSpec, ScaleLog, ScaleLogSpec, Size, StrokeStyle,
    TitleSpec, PLOT_BACKGROUND,
};
use orrery_core::{Dataset, Mark, MarkId};
use peniko::Color;
use peniko::color::palette::css;

use crate::controller::SolarConfig;
use crate::view_state::ChartKind;

const MISSION_PLOT: Size = Size {
    width: 260.0,
    height: 160.0,
};
const SOLAR_PLOT: Size = Size {
    width: 340.0,
    height: 220.0,
};

/// Radius range (px) for the solar scatter's planet-radius encoding.
const SOLAR_RADIUS_RANGE: (f64, f64) = (2.0, 20.0);

fn numeric_values<'a>(data: &'a Dataset, field: &'a str) -> impl Iterator<Item = f64> + 'a {
    data.rows().filter_map(move |(_k, r)| r.num(field))
}

fn chart_frame(
    title: TitleSpec,
    plot_size: Size,
    axis_bottom: AxisSpec,
    axis_left: AxisSpec,
) -> ChartSpec {
    ChartSpec {
        title: Some(title),
        plot_size,
        layout: ChartLayoutSpec {
            outer_padding: 10.0,
            ..ChartLayoutSpec::default()
        },
        axis_left: Some(axis_left),
        axis_bottom: Some(axis_bottom),
        ..ChartSpec::default()
    }
}

fn background(id: u64, plot: Rect) -> Mark {
    RectMarkSpec::new(MarkId::from_raw(id), plot)
        .with_fill(Color::TRANSPARENT)
        .with_z_index(PLOT_BACKGROUND)
        .mark()
}

/// Builds one mission-metrics chart for the current selections.
pub(crate) fn missions_chart(
    kind: ChartKind,
    data: &Dataset,
    x_field: &str,
    y_field: &str,
) -> Result<(ChartLayout, Vec<Mark>), ScaleDomainError> {
    let measurer = HeuristicTextMeasurer;
    match kind {
        ChartKind::Bar => {
            let band = ScaleBandSpec::from_field(data, x_field);
            if band.domain.is_empty() {
                return Err(ScaleDomainError::Empty);
            }
            let y = ScaleLinearSpec::from_values(numeric_values(data, y_field))?
                .with_min(0.0)
                .with_nice(true);

            let axis_bottom = AxisSpec::bottom(0x10_000, band)
                .with_title(x_field)
                .with_title_offset(10.0);
            let axis_left = AxisSpec::left(0x11_000, y)
                .with_tick_count(5)
                .with_grid(GridStyle::default())
                .with_title(y_field)
                .with_title_offset(10.0);
            let title = TitleSpec::new(MarkId::from_raw(0x1F_200), "Bar").with_fill(css::BLACK);

            let chart = chart_frame(title, MISSION_PLOT, axis_bottom, axis_left);
            let (layout, marks) = chart.marks(&measurer, |chart, plot| {
                let band = chart.x_scale_band(plot).expect("bar chart has a band axis");
                let y_scale = chart
                    .y_scale_continuous(plot)
                    .expect("bar chart has a y axis");
                let mut marks = BarMarkSpec::new(x_field, y_field, band, y_scale)
                    .with_fill(css::STEEL_BLUE)
                    .marks(data);
                marks.push(background(0x1F_000, plot));
                marks
            });
            Ok((layout, marks))
        }
        ChartKind::Line => {
            let x = ScaleLinearSpec::from_values(numeric_values(data, x_field))?;
            let y = ScaleLinearSpec::from_values(numeric_values(data, y_field))?
                .with_min(0.0)
                .with_nice(true);

            let axis_bottom = AxisSpec::bottom(0x20_000, x)
                .with_tick_count(6)
                .with_title(x_field)
                .with_title_offset(10.0);
            let axis_left = AxisSpec::left(0x21_000, y)
                .with_tick_count(5)
                .with_grid(GridStyle::default())
                .with_title(y_field)
                .with_title_offset(10.0);
            let title = TitleSpec::new(MarkId::from_raw(0x2F_200), "Line").with_fill(css::BLACK);

            let chart = chart_frame(title, MISSION_PLOT, axis_bottom, axis_left);
            let (layout, marks) = chart.marks(&measurer, |chart, plot| {
                let x_scale = chart.x_scale_continuous(plot).expect("line chart x axis");
                let y_scale = chart.y_scale_continuous(plot).expect("line chart y axis");
                let mut marks =
                    LineMarkSpec::new(MarkId::from_raw(0x2F_100), x_field, y_field, x_scale, y_scale)
                        .with_stroke(StrokeStyle::solid(css::STEEL_BLUE, 2.0))
                        .marks(data);
                marks.push(background(0x2F_000, plot));
                marks
            });
            Ok((layout, marks))
        }
        ChartKind::Area => {
            let x = ScaleLinearSpec::from_values(numeric_values(data, x_field))?;
            let y = ScaleLinearSpec::from_values(numeric_values(data, y_field))?
                .with_min(0.0)
                .with_nice(true);

            let axis_bottom = AxisSpec::bottom(0x30_000, x)
                .with_tick_count(6)
                .with_title(x_field)
                .with_title_offset(10.0);
            let axis_left = AxisSpec::left(0x31_000, y)
                .with_tick_count(5)
                .with_grid(GridStyle::default())
                .with_title(y_field)
                .with_title_offset(10.0);
            let title = TitleSpec::new(MarkId::from_raw(0x3F_200), "Area").with_fill(css::BLACK);

            let chart = chart_frame(title, MISSION_PLOT, axis_bottom, axis_left);
            let (layout, marks) = chart.marks(&measurer, |chart, plot| {
                let x_scale = chart.x_scale_continuous(plot).expect("area chart x axis");
                let y_scale = chart.y_scale_continuous(plot).expect("area chart y axis");
                let mut marks = AreaMarkSpec::new(0x3F_100, x_field, y_field, x_scale, y_scale)
                    .with_fill(css::STEEL_BLUE.with_alpha(0.4))
                    .with_stroke(StrokeStyle::solid(css::STEEL_BLUE, 1.5))
                    .marks(data);
                marks.push(background(0x3F_000, plot));
                marks
            });
            Ok((layout, marks))
        }
        ChartKind::Scatter => {
            let x = ScaleLinearSpec::from_values(numeric_values(data, x_field))?;
            let y = ScaleLinearSpec::from_values(numeric_values(data, y_field))?;

            let axis_bottom = AxisSpec::bottom(0x40_000, x)
                .with_tick_count(6)
                .with_title(x_field)
                .with_title_offset(10.0);
            let axis_left = AxisSpec::left(0x41_000, y)
                .with_tick_count(5)
                .with_grid(GridStyle::default())
                .with_title(y_field)
                .with_title_offset(10.0);
            let title =
                TitleSpec::new(MarkId::from_raw(0x4F_200), "Scatter").with_fill(css::BLACK);

            let chart = chart_frame(title, MISSION_PLOT, axis_bottom, axis_left);
            let (layout, marks) = chart.marks(&measurer, |chart, plot| {
                let x_scale = chart.x_scale_continuous(plot).expect("scatter x axis");
                let y_scale = chart.y_scale_continuous(plot).expect("scatter y axis");
                let mut marks = PointMarkSpec::new(x_field, y_field, x_scale, y_scale)
                    .with_radius(5.0)
                    .with_fill(css::STEEL_BLUE)
                    .marks(data);
                marks.push(background(0x4F_000, plot));
                marks
            });
            Ok((layout, marks))
        }
    }
}

/// Builds the solar-system scatter: log-log axes, with planet radius
/// log-encoded into the glyph radius.
pub(crate) fn solar_chart(
    data: &Dataset,
    config: &SolarConfig,
) -> Result<(ChartLayout, Vec<Mark>), ScaleDomainError> {
    let measurer = HeuristicTextMeasurer;

    let x = ScaleLogSpec::from_values(numeric_values(data, &config.distance_field))?;
    let y = ScaleLogSpec::from_values(numeric_values(data, &config.radius_field))?;
    let radius_domain = ScaleLogSpec::from_values(numeric_values(data, &config.radius_field))?;

    let axis_bottom = AxisSpec::bottom(0x50_000, x)
        .with_tick_count(6)
        .with_title("distance from sun")
        .with_title_offset(10.0);
    let axis_left = AxisSpec::left(0x51_000, y)
        .with_tick_count(6)
        .with_grid(GridStyle::default())
        .with_title("radius")
        .with_title_offset(10.0);
    let title =
        TitleSpec::new(MarkId::from_raw(0x5F_200), "Solar system").with_fill(css::BLACK);

    let chart = chart_frame(title, SOLAR_PLOT, axis_bottom, axis_left);
    let distance_field = config.distance_field.clone();
    let radius_field = config.radius_field.clone();
    let (layout, marks) = chart.marks(&measurer, move |chart, plot| {
        let x_scale = chart.x_scale_continuous(plot).expect("solar x axis");
        let y_scale = chart.y_scale_continuous(plot).expect("solar y axis");
        let radius_scale = ScaleLog::new(radius_domain.domain, SOLAR_RADIUS_RANGE);
        let mut marks = PointMarkSpec::new(distance_field, radius_field.clone(), x_scale, y_scale)
            .with_radius_encoding(RadiusEncoding::new(radius_field, radius_scale))
            .with_fill(css::ROYAL_BLUE)
            .marks(data);
        marks.push(background(0x5F_000, plot));
        marks
    });
    Ok((layout, marks))
}
