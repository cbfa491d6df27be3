// Copyright 2025 the Orrery Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The event contract between UI controls and the controller.
//!
//! Each control emits exactly one discrete event type. The controller
//! defines the total order of effects per event, so rendering is
//! deterministic regardless of how the surrounding UI wires its callbacks.

use crate::view_state::DashboardView;

/// A discrete selection change emitted by one UI control.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SelectionEvent {
    /// The mission dataset selector changed.
    DatasetChanged(String),
    /// The x-metric selector changed.
    XFieldChanged(String),
    /// The y-metric selector changed.
    YFieldChanged(String),
    /// The random-subset checkbox toggled.
    RandomSubsetToggled(bool),
    /// The view switch was pressed.
    ViewSwitched(DashboardView),
}
