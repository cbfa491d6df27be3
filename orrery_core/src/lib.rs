// Copyright 2025 the Orrery Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Minimal retained-scene runtime for incremental chart rendering.
//!
//! This crate holds the pieces every dashboard view shares:
//! - **Datasets**: ordered collections of dynamically-typed records with
//!   stable row keys, so downstream mark identity survives filtering,
//!   reordering, and resampling.
//! - **Marks**: resolved visual-element descriptors (rect, point, path,
//!   text) with stable identity and an explicit z-order hint.
//! - **Scenes**: retained mark sets diffed against each new frame into an
//!   enter/update/exit stream for a drawing backend.
//! - **Transitions**: tween plans over a diff stream, so all three groups
//!   animate with one shared duration and easing.
//!
//! Scale computation and chart assembly live upstream (`orrery_charts`);
//! rasterization lives downstream in whatever backend consumes the diffs.

#![no_std]

extern crate alloc;

mod dataset;
mod mark;
mod scene;
mod transition;

pub use dataset::{Dataset, DatasetId, Record, Value};
pub use mark::{
    Mark, MarkId, MarkKind, MarkPayload, PathPayload, PointPayload, RectPayload, TextAnchor,
    TextBaseline, TextPayload,
};
pub use scene::{MarkDiff, Scene};
pub use transition::{Easing, MarkTween, Transition, TweenRole, plan_tweens};
