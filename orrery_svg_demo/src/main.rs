// Copyright 2025 the Orrery Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scripted dashboard demo.
//!
//! Drives both dashboard views through a sequence of selection events and
//! writes one SVG snapshot per stage into a single HTML report. Pass a
//! directory of `<name>.json` files to use your own data; without an
//! argument the bundled datasets are served from memory.

mod html;
mod svg;

use std::collections::HashMap;

use orrery_dash::{
    ChartKind, ChartStatus, ChartUpdate, DashboardController, DashboardView, SelectionEvent,
    ViewState,
};
use orrery_data::{DatasetSource, DirectorySource, MemorySource};

fn bundled_source() -> MemorySource {
    MemorySource::new()
        .with_document("planets", include_str!("../data/planets.json"))
        .with_document("missions", include_str!("../data/missions.json"))
        .with_document("probes", include_str!("../data/probes.json"))
}

#[derive(Default)]
struct SvgBackend {
    scenes: HashMap<(DashboardView, ChartKind), svg::SvgScene>,
}

impl SvgBackend {
    fn apply(&mut self, updates: &[ChartUpdate]) {
        for update in updates {
            let scene = self.scenes.entry((update.view, update.kind)).or_default();
            scene.apply_diffs(&update.diffs);
            if let Some(view_box) = update.view_box {
                scene.set_view_box(view_box);
            }
            match &update.status {
                ChartStatus::Rendered => {}
                ChartStatus::NoData { reason } => {
                    tracing::warn!(kind = ?update.kind, reason = %reason, "chart has no data");
                }
                ChartStatus::LoadFailed { reason } => {
                    tracing::warn!(kind = ?update.kind, reason = %reason, "chart load failed");
                }
            }
        }
    }

    fn snapshot(&self, view: DashboardView) -> Vec<String> {
        view.charts()
            .iter()
            .filter_map(|kind| self.scenes.get(&(view, *kind)))
            .map(svg::SvgScene::to_svg_string)
            .collect()
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let source: Box<dyn DatasetSource> = match std::env::args().nth(1) {
        Some(dir) => Box::new(DirectorySource::new(dir)),
        None => Box::new(bundled_source()),
    };

    let state = ViewState {
        dataset: "missions".to_owned(),
        x_field: "year".to_owned(),
        y_field: "duration_days".to_owned(),
        random_subset: false,
        active_view: DashboardView::Missions,
    };
    let mut controller = DashboardController::new(source, state, 0x5EED);
    let mut backend = SvgBackend::default();
    let mut sections = Vec::new();

    let updates = controller.initialize();
    backend.apply(&updates);
    sections.push(html::HtmlSection {
        title: "Mission metrics".to_owned(),
        description: "Initial render: duration by year across bar, line, area, and scatter."
            .to_owned(),
        svgs: backend.snapshot(DashboardView::Missions),
    });

    let stages: Vec<(&str, &str, SelectionEvent)> = vec![
        (
            "Solar system",
            "Switching views: planet radius against distance from sun, log-log, \
             glyph radius encoding planet size.",
            SelectionEvent::ViewSwitched(DashboardView::SolarSystem),
        ),
        (
            "Back to missions",
            "Returning re-renders the mission charts in full from current state.",
            SelectionEvent::ViewSwitched(DashboardView::Missions),
        ),
        (
            "Cost metric",
            "Changing the y metric rebuilds the scales and moves existing marks.",
            SelectionEvent::YFieldChanged("cost_musd".to_owned()),
        ),
        (
            "Random subset",
            "A fair 50-row subsample; rows outside the subset exit.",
            SelectionEvent::RandomSubsetToggled(true),
        ),
        (
            "Full dataset restored",
            "Toggling the subset off restores the exact pre-toggle dataset.",
            SelectionEvent::RandomSubsetToggled(false),
        ),
        (
            "Probes dataset",
            "Switching datasets replaces the records wholesale.",
            SelectionEvent::DatasetChanged("probes".to_owned()),
        ),
    ];

    for (title, description, event) in stages {
        let view = match &event {
            SelectionEvent::ViewSwitched(view) => *view,
            _ => controller.state().active_view,
        };
        let updates = controller.handle(event);
        backend.apply(&updates);
        sections.push(html::HtmlSection {
            title: title.to_owned(),
            description: description.to_owned(),
            svgs: backend.snapshot(view),
        });
    }

    let report = html::render_report("Orrery dashboards", &sections);
    std::fs::write("orrery_demo.html", report).expect("write orrery_demo.html");
    println!("wrote orrery_demo.html");
}
