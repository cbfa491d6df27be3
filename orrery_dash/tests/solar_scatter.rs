// Copyright 2025 the Orrery Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end checks for the solar-system scatter: derived distance,
//! log-log positioning, and radius encoding.

use kurbo::Rect;
use orrery_core::{DatasetId, MarkDiff, MarkId, MarkPayload, PointPayload};
use orrery_dash::{
    ChartStatus, ChartUpdate, DashboardController, DashboardView, ViewState,
};
use orrery_data::MemorySource;

const PLANETS_JSON: &str = r#"[
    {"name": "Sun", "radius": 695700},
    {"name": "Earth", "radius": 6371, "a_0": 1.0, "e_0": 0.0167},
    {"name": "Jupiter", "radius": 69911, "a_0": 5.2038, "e_0": 0.0489},
    {"name": "Neptune", "radius": 24622, "a_0": 30.07, "e_0": 0.0087}
]"#;

fn solar_state() -> ViewState {
    ViewState {
        dataset: "missions".to_owned(),
        x_field: "year".to_owned(),
        y_field: "duration".to_owned(),
        random_subset: false,
        active_view: DashboardView::SolarSystem,
    }
}

fn solar_controller(planets_json: &str) -> DashboardController<MemorySource> {
    let source = MemorySource::new()
        .with_document("planets", planets_json)
        .with_document("missions", r#"[{"year": 1969, "duration": 8}]"#);
    DashboardController::new(source, solar_state(), 7)
}

fn distance(a: f64, e: f64) -> f64 {
    a * (1.0 - e * e)
}

/// The per-row mark id the pipeline derives for a planet, given its
/// position in the JSON array.
fn planet_mark(row: u64) -> MarkId {
    MarkId::for_row(DatasetId(1), row)
}

fn point_of(update: &ChartUpdate, id: MarkId) -> PointPayload {
    update
        .diffs
        .iter()
        .find_map(|d| match d {
            MarkDiff::Enter { id: did, new, .. } if *did == id => match new.as_ref() {
                MarkPayload::Point(p) => Some(p.clone()),
                _ => None,
            },
            _ => None,
        })
        .unwrap_or_else(|| panic!("no entering point mark with id {id:?}"))
}

/// The plot rectangle is observable through the transparent background
/// mark the chart emits behind its series.
fn plot_rect(update: &ChartUpdate) -> Rect {
    update
        .diffs
        .iter()
        .find_map(|d| match d {
            MarkDiff::Enter { id, new, .. } if *id == MarkId::from_raw(0x5F_000) => {
                match new.as_ref() {
                    MarkPayload::Rect(r) => Some(r.rect),
                    _ => None,
                }
            }
            _ => None,
        })
        .expect("missing plot background mark")
}

#[test]
fn earth_lands_at_the_scale_mapped_position_for_its_derived_distance() {
    let mut c = solar_controller(PLANETS_JSON);
    let updates = c.initialize();
    assert_eq!(updates.len(), 1, "the solar view has a single scatter");
    let scatter = &updates[0];
    assert_eq!(scatter.status, ChartStatus::Rendered);

    let plot = plot_rect(scatter);

    // Derived distances per the first-order approximation. Earth is the
    // domain minimum on x; its radius is the domain minimum on y.
    let d_earth = distance(1.0, 0.0167);
    let d_jupiter = distance(5.2038, 0.0489);
    let d_neptune = distance(30.07, 0.0087);
    assert!((d_earth - 0.99972).abs() < 1e-5);

    // The Sun is excluded: rows 1..=3 are Earth, Jupiter, Neptune.
    let earth = point_of(scatter, planet_mark(1));
    assert!((earth.center.x - plot.x0).abs() < 1e-9, "min distance → left edge");
    assert!((earth.center.y - plot.y1).abs() < 1e-9, "min radius → bottom edge");
    assert!((earth.radius - 2.0).abs() < 1e-9, "min radius → smallest glyph");

    // Jupiter interpolates between the endpoints in log space; this pins
    // the derived-distance formula, not just the ordering.
    let jupiter = point_of(scatter, planet_mark(2));
    let t = (d_jupiter.ln() - d_earth.ln()) / (d_neptune.ln() - d_earth.ln());
    let expected_x = plot.x0 + t * plot.width();
    assert!(
        (jupiter.center.x - expected_x).abs() < 1e-6,
        "jupiter x {} != expected {expected_x}",
        jupiter.center.x
    );

    // Jupiter has the largest radius: top edge of the radius range.
    assert!((jupiter.radius - 20.0).abs() < 1e-9);

    let neptune = point_of(scatter, planet_mark(3));
    assert!((neptune.center.x - plot.x1).abs() < 1e-9, "max distance → right edge");
}

#[test]
fn a_non_positive_radius_renders_no_data_instead_of_nan_geometry() {
    let json = r#"[
        {"name": "Earth", "radius": 6371, "a_0": 1.0, "e_0": 0.0167},
        {"name": "Dust", "radius": 0, "a_0": 2.0, "e_0": 0.1}
    ]"#;
    let mut c = solar_controller(json);
    let updates = c.initialize();
    let scatter = &updates[0];
    assert!(
        matches!(&scatter.status, ChartStatus::NoData { reason } if reason.contains("log")),
        "expected a log-domain no-data state, got {:?}",
        scatter.status
    );
    assert!(scatter.diffs.is_empty(), "nothing was rendered previously");
}

#[test]
fn a_missing_planets_file_fails_the_solar_chart_only() {
    let source = MemorySource::new()
        .with_document("missions", r#"[{"year": 1969, "duration": 8}]"#);
    let mut c = DashboardController::new(source, solar_state(), 7);
    let updates = c.initialize();
    assert!(matches!(updates[0].status, ChartStatus::LoadFailed { .. }));

    // The mission view still works.
    let updates = c.handle(orrery_dash::SelectionEvent::ViewSwitched(
        DashboardView::Missions,
    ));
    assert!(updates.iter().all(|u| u.status == ChartStatus::Rendered));
}
