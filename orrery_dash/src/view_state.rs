// Copyright 2025 the Orrery Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! View state: what is currently selected, owned by the controller.

/// The two dashboard views.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DashboardView {
    /// The solar-system scatter plot (log-log, radius-encoded).
    SolarSystem,
    /// The mission-metrics view: bar, line, area, and scatter charts over
    /// dynamically selected fields.
    Missions,
}

/// The chart kinds a view can contain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChartKind {
    /// Category bars.
    Bar,
    /// A single polyline over the point sequence.
    Line,
    /// A filled area down to the zero baseline.
    Area,
    /// One point per record.
    Scatter,
}

impl DashboardView {
    /// The charts this view renders, in a fixed order.
    pub fn charts(self) -> &'static [ChartKind] {
        match self {
            Self::SolarSystem => &[ChartKind::Scatter],
            Self::Missions => &[
                ChartKind::Bar,
                ChartKind::Line,
                ChartKind::Area,
                ChartKind::Scatter,
            ],
        }
    }
}

/// The current selections, mutated only by the controller's event handlers.
///
/// `dataset`, `x_field`, and `y_field` drive the mission-metrics view; the
/// solar-system view has a fixed configuration
/// ([`crate::SolarConfig`]).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ViewState {
    /// Selected mission dataset name.
    pub dataset: String,
    /// Selected x metric (category field for the bar chart).
    pub x_field: String,
    /// Selected y metric.
    pub y_field: String,
    /// Whether the mission charts render a random subsample.
    pub random_subset: bool,
    /// The currently visible view.
    pub active_view: DashboardView,
}
