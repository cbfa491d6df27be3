// Copyright 2025 the Orrery Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dashboard runtime for orrery.
//!
//! The [`DashboardController`] is the single owner of all mutable view
//! state. Each UI control emits one discrete [`SelectionEvent`]; the
//! controller handles it as one synchronous pipeline — (re)load → derive →
//! scale rebuild → render — and returns per-chart updates (diff streams
//! plus transition plans) for whatever drawing backend is attached.
//!
//! Only the active view's charts are rendered. Hidden views drop their
//! retained scenes and re-render fully on the next reveal, so no stale
//! visual state survives a dataset change that happened while they were
//! hidden.

mod charts;
mod controller;
mod event;
mod view_state;

pub use controller::{
    ChartStatus, ChartUpdate, DashboardController, LoadTicket, SolarConfig,
};
pub use event::SelectionEvent;
pub use view_state::{ChartKind, DashboardView, ViewState};
