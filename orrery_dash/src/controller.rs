// Copyright 2025 the Orrery Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The view-state controller.
//!
//! One controller owns the whole pipeline: the [`ViewState`], the loaded
//! datasets, and a retained [`Scene`] per (view, chart). Every
//! [`SelectionEvent`] runs the same synchronous sequence — (re)load →
//! derive → scale rebuild → render — and returns one [`ChartUpdate`] per
//! visible chart.
//!
//! Loads are two-phase so overlapping requests cannot race the display:
//! [`DashboardController::begin_load`] mints a generation ticket and
//! invalidates all earlier ones; [`DashboardController::complete_load`]
//! drops any result whose ticket is stale. Display order therefore follows
//! selection order, never fetch-completion order. (Synchronous embedders
//! get this for free; an async embedder gets cancellation semantics at the
//! same seam, which is also where a fetch timeout would attach.)

use std::collections::HashMap;

use orrery_charts::ScaleDomainError;
use orrery_core::{Dataset, DatasetId, Mark, MarkDiff, MarkTween, Scene, Transition, plan_tweens};
use orrery_data::{DatasetSource, LoadError, derive_num, orbital_distance, random_subset, retain};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::charts::{missions_chart, solar_chart};
use crate::event::SelectionEvent;
use crate::view_state::{ChartKind, DashboardView, ViewState};

/// Dataset id used for the solar-system view.
const SOLAR_DATASET: DatasetId = DatasetId(1);
/// Dataset id used for the mission-metrics view (stable across dataset
/// switches, so selection changes diff as updates rather than repaints).
const MISSION_DATASET: DatasetId = DatasetId(2);

/// Size of the random subsample when the toggle is on.
const SUBSET_SIZE: usize = 50;

/// Fixed configuration of the solar-system scatter.
#[derive(Clone, Debug)]
pub struct SolarConfig {
    /// Dataset name loaded from the source.
    pub dataset: String,
    /// Field naming each body.
    pub name_field: String,
    /// Semi-major axis field (AU).
    pub semi_major_field: String,
    /// Orbital eccentricity field.
    pub eccentricity_field: String,
    /// Body radius field.
    pub radius_field: String,
    /// Derived distance field written by the pipeline.
    pub distance_field: String,
    /// A body to exclude before plotting (the sun itself).
    pub excluded_body: Option<String>,
}

impl Default for SolarConfig {
    fn default() -> Self {
        Self {
            dataset: "planets".to_owned(),
            name_field: "name".to_owned(),
            semi_major_field: "a_0".to_owned(),
            eccentricity_field: "e_0".to_owned(),
            radius_field: "radius".to_owned(),
            distance_field: "calculated_distance".to_owned(),
            excluded_body: Some("Sun".to_owned()),
        }
    }
}

/// How a chart ended up after an event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChartStatus {
    /// The chart rendered; its diffs/tweens carry the frame.
    Rendered,
    /// The chart has nothing drawable (degenerate domain, missing fields);
    /// its diffs clear any previous content.
    NoData {
        /// Human-readable cause.
        reason: String,
    },
    /// The dataset failed to load; diffs clear any previous content.
    LoadFailed {
        /// Human-readable cause.
        reason: String,
    },
}

/// One chart's outcome for one event.
#[derive(Debug)]
pub struct ChartUpdate {
    /// The view this chart belongs to.
    pub view: DashboardView,
    /// The chart kind within the view.
    pub kind: ChartKind,
    /// Render outcome.
    pub status: ChartStatus,
    /// The enter/update/exit stream for the backend.
    pub diffs: Vec<MarkDiff>,
    /// Transition plans over `diffs`, sharing one duration/easing.
    pub tweens: Vec<MarkTween>,
    /// View box for the backend, when the chart produced a layout.
    pub view_box: Option<kurbo::Rect>,
}

/// A generation ticket for an in-flight load.
///
/// Minting a new ticket invalidates every earlier one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
    name: String,
}

/// The single owner of dashboard state. See the module docs for the event
/// pipeline.
#[derive(Debug)]
pub struct DashboardController<S> {
    source: S,
    state: ViewState,
    solar: SolarConfig,
    transition: Transition,
    rng: StdRng,
    generation: u64,
    /// Mission dataset exactly as loaded; kept untouched while sampling so
    /// toggling the subset off restores it bit-for-bit.
    missions_full: Option<Dataset>,
    /// Active subsample, if the toggle is on.
    missions_sampled: Option<Dataset>,
    mission_load_error: Option<String>,
    /// Derived solar dataset (distance computed, sun excluded).
    solar_data: Option<Dataset>,
    solar_load_error: Option<String>,
    scenes: HashMap<(DashboardView, ChartKind), Scene>,
}

impl<S: DatasetSource> DashboardController<S> {
    /// Creates a controller with the default solar configuration.
    ///
    /// `seed` drives the subsample RNG; embedders wanting fresh samples per
    /// session pass a clock- or entropy-derived seed.
    pub fn new(source: S, state: ViewState, seed: u64) -> Self {
        Self::with_solar_config(source, state, seed, SolarConfig::default())
    }

    /// Creates a controller with an explicit solar configuration.
    pub fn with_solar_config(source: S, state: ViewState, seed: u64, solar: SolarConfig) -> Self {
        Self {
            source,
            state,
            solar,
            transition: Transition::default(),
            rng: StdRng::seed_from_u64(seed),
            generation: 0,
            missions_full: None,
            missions_sampled: None,
            mission_load_error: None,
            solar_data: None,
            solar_load_error: None,
            scenes: HashMap::new(),
        }
    }

    /// Returns the current view state.
    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// Returns the shared transition applied to every frame's tweens.
    pub fn transition(&self) -> Transition {
        self.transition
    }

    /// Loads both datasets and renders the active view.
    pub fn initialize(&mut self) -> Vec<ChartUpdate> {
        self.load_solar();
        let ticket = self.begin_load(self.state.dataset.clone());
        let result = self.source.load(MISSION_DATASET, &ticket.name);
        self.apply_load_result(&ticket, result);
        self.render_view(self.state.active_view)
    }

    /// Handles one selection event as a single synchronous pipeline.
    pub fn handle(&mut self, event: SelectionEvent) -> Vec<ChartUpdate> {
        tracing::debug!(?event, "selection event");
        match event {
            SelectionEvent::DatasetChanged(name) => {
                self.state.dataset = name.clone();
                let ticket = self.begin_load(name);
                let result = self.source.load(MISSION_DATASET, &ticket.name);
                self.complete_load(ticket, result)
            }
            SelectionEvent::XFieldChanged(field) => {
                self.state.x_field = field;
                self.render_if_active(DashboardView::Missions)
            }
            SelectionEvent::YFieldChanged(field) => {
                self.state.y_field = field;
                self.render_if_active(DashboardView::Missions)
            }
            SelectionEvent::RandomSubsetToggled(on) => {
                self.state.random_subset = on;
                self.resample();
                self.render_if_active(DashboardView::Missions)
            }
            SelectionEvent::ViewSwitched(view) => {
                if self.state.active_view != view {
                    // The outgoing view's retained scenes are dropped: the
                    // next reveal re-renders from current state with a full
                    // enter pass instead of diffing against stale marks.
                    let hidden = self.state.active_view;
                    for kind in hidden.charts() {
                        if let Some(scene) = self.scenes.get_mut(&(hidden, *kind)) {
                            scene.clear_marks();
                        }
                    }
                }
                self.state.active_view = view;
                self.render_view(view)
            }
        }
    }

    /// Starts a load, invalidating all earlier tickets.
    pub fn begin_load(&mut self, name: String) -> LoadTicket {
        self.generation += 1;
        LoadTicket {
            generation: self.generation,
            name,
        }
    }

    /// Finishes a load. Stale tickets (superseded by a newer
    /// [`DashboardController::begin_load`]) are dropped without touching
    /// any state.
    pub fn complete_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<Dataset, LoadError>,
    ) -> Vec<ChartUpdate> {
        if !self.apply_load_result(&ticket, result) {
            return Vec::new();
        }
        self.render_if_active(DashboardView::Missions)
    }

    /// Applies a load result without rendering. Returns `false` when the
    /// ticket is stale and nothing was touched.
    fn apply_load_result(
        &mut self,
        ticket: &LoadTicket,
        result: Result<Dataset, LoadError>,
    ) -> bool {
        if ticket.generation != self.generation {
            tracing::debug!(
                name = %ticket.name,
                generation = ticket.generation,
                current = self.generation,
                "dropping stale load completion"
            );
            return false;
        }
        match result {
            Ok(dataset) => {
                tracing::info!(name = %ticket.name, rows = dataset.row_count(), "dataset loaded");
                self.missions_full = Some(dataset);
                self.mission_load_error = None;
                self.resample();
            }
            Err(err) => {
                tracing::warn!(name = %ticket.name, error = %err, "dataset load failed");
                self.missions_full = None;
                self.missions_sampled = None;
                self.mission_load_error = Some(err.to_string());
            }
        }
        true
    }

    fn load_solar(&mut self) {
        let loaded = self.source.load(SOLAR_DATASET, &self.solar.dataset);
        match loaded {
            Ok(raw) => {
                let solar = &self.solar;
                let filtered = match &solar.excluded_body {
                    Some(excluded) => retain(&raw, |r| {
                        r.label(&solar.name_field) != Some(excluded.as_str())
                    }),
                    None => raw,
                };
                let derived = derive_num(&filtered, &solar.distance_field, |r| {
                    Some(orbital_distance(
                        r.num(&solar.semi_major_field)?,
                        r.num(&solar.eccentricity_field)?,
                    ))
                });
                tracing::info!(rows = derived.row_count(), "solar dataset derived");
                self.solar_data = Some(derived);
                self.solar_load_error = None;
            }
            Err(err) => {
                tracing::warn!(error = %err, "solar dataset load failed");
                self.solar_data = None;
                self.solar_load_error = Some(err.to_string());
            }
        }
    }

    /// Recomputes the subsample from the untouched full dataset.
    fn resample(&mut self) {
        self.missions_sampled = match (&self.missions_full, self.state.random_subset) {
            (Some(full), true) => Some(random_subset(full, SUBSET_SIZE, &mut self.rng)),
            _ => None,
        };
    }

    /// The dataset the mission charts currently render from.
    fn mission_data(&self) -> Option<&Dataset> {
        self.missions_sampled.as_ref().or(self.missions_full.as_ref())
    }

    fn render_if_active(&mut self, view: DashboardView) -> Vec<ChartUpdate> {
        if self.state.active_view == view {
            self.render_view(view)
        } else {
            // Inactive views are not re-rendered; their scenes were (or
            // will be) cleared, so the next reveal rebuilds them fully.
            Vec::new()
        }
    }

    fn render_view(&mut self, view: DashboardView) -> Vec<ChartUpdate> {
        view.charts()
            .iter()
            .map(|kind| self.render_chart(view, *kind))
            .collect()
    }

    fn render_chart(&mut self, view: DashboardView, kind: ChartKind) -> ChartUpdate {
        let built: Result<_, ChartStatus> = match view {
            DashboardView::Missions => match (&self.mission_load_error, self.mission_data()) {
                (Some(reason), _) => Err(ChartStatus::LoadFailed {
                    reason: reason.clone(),
                }),
                (None, Some(data)) => {
                    missions_chart(kind, data, &self.state.x_field, &self.state.y_field)
                        .map_err(|err| ChartStatus::NoData {
                            reason: domain_error_reason(err),
                        })
                }
                (None, None) => Err(ChartStatus::NoData {
                    reason: "no dataset loaded".to_owned(),
                }),
            },
            DashboardView::SolarSystem => match (&self.solar_load_error, &self.solar_data) {
                (Some(reason), _) => Err(ChartStatus::LoadFailed {
                    reason: reason.clone(),
                }),
                (None, Some(data)) => solar_chart(data, &self.solar).map_err(|err| {
                    ChartStatus::NoData {
                        reason: domain_error_reason(err),
                    }
                }),
                (None, None) => Err(ChartStatus::NoData {
                    reason: "no dataset loaded".to_owned(),
                }),
            },
        };

        let scene = self.scenes.entry((view, kind)).or_default();
        let (status, diffs, view_box) = match built {
            Ok((layout, marks)) => {
                let diffs = scene.tick(marks);
                (ChartStatus::Rendered, diffs, Some(layout.view))
            }
            Err(status) => {
                // A broken chart still ticks, with nothing: previous marks
                // exit cleanly instead of lingering behind an error state.
                let diffs = scene.tick(Vec::<Mark>::new());
                (status, diffs, None)
            }
        };
        let tweens = plan_tweens(&diffs);
        ChartUpdate {
            view,
            kind,
            status,
            diffs,
            tweens,
            view_box,
        }
    }
}

fn domain_error_reason(err: ScaleDomainError) -> String {
    match err {
        ScaleDomainError::Empty => "no plottable values for the selected fields".to_owned(),
        ScaleDomainError::NonPositiveLog(v) => {
            format!("log scale undefined for value {v}")
        }
    }
}
