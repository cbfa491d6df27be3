// Copyright 2025 the Orrery Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Transition planning over a diff stream.
//!
//! All three diff groups of one frame share a single duration and easing,
//! so simultaneous enters, updates, and exits read as one coherent
//! transition:
//! - **Enter**: neutral state → target (a point grows from radius zero, a
//!   bar grows from its baseline edge).
//! - **Update**: previous state → target.
//! - **Exit**: previous state → neutral, then removal.
//!
//! Path and text payloads are replaced wholesale: they carry no per-vertex
//! identity, and interpolating path geometry point-by-point is explicitly
//! not done here. Paint is likewise switched, not blended.

extern crate alloc;

use alloc::vec::Vec;

use kurbo::{Point, Rect};

use crate::mark::{MarkId, MarkPayload, PointPayload, RectPayload};
use crate::scene::MarkDiff;

/// Easing curve applied to transition progress.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Easing {
    /// Identity easing.
    Linear,
    /// Symmetric cubic ease-in-out.
    #[default]
    CubicInOut,
}

impl Easing {
    /// Applies the curve to a progress value in `[0, 1]`.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::CubicInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let u = -2.0 * t + 2.0;
                    1.0 - u * u * u / 2.0
                }
            }
        }
    }
}

/// A shared duration + easing pair for one frame's tweens.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transition {
    /// Duration in milliseconds.
    pub duration_ms: f64,
    /// Easing curve.
    pub easing: Easing,
}

impl Default for Transition {
    fn default() -> Self {
        Self {
            duration_ms: 300.0,
            easing: Easing::CubicInOut,
        }
    }
}

impl Transition {
    /// Creates a transition with the given duration and default easing.
    pub fn with_duration_ms(duration_ms: f64) -> Self {
        Self {
            duration_ms,
            ..Self::default()
        }
    }

    /// Maps elapsed wall time to eased progress in `[0, 1]`.
    ///
    /// A non-positive duration completes immediately.
    pub fn eased_progress(&self, elapsed_ms: f64) -> f64 {
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        self.easing.apply(elapsed_ms / self.duration_ms)
    }
}

/// Which diff group a tween belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TweenRole {
    /// Created this frame; animates neutral → target.
    Enter,
    /// Retained; animates previous → target.
    Update,
    /// Removed this frame; animates previous → neutral, then disappears.
    Exit,
}

/// An interpolation plan for one mark over one frame's transition.
#[derive(Clone, Debug, PartialEq)]
pub struct MarkTween {
    /// Mark identity.
    pub id: MarkId,
    /// Rendering order hint.
    pub z_index: i32,
    /// Diff group.
    pub role: TweenRole,
    from: MarkPayload,
    to: MarkPayload,
}

impl MarkTween {
    /// Returns the end state of the tween.
    pub fn target(&self) -> &MarkPayload {
        &self.to
    }

    /// Samples the tween at eased progress `t` in `[0, 1]`.
    ///
    /// Returns `None` once an exiting mark should be removed. Wholesale
    /// payloads (path, text) snap: exits disappear immediately, enters and
    /// updates show the target from the first sample.
    pub fn sample(&self, t: f64) -> Option<MarkPayload> {
        let t = t.clamp(0.0, 1.0);
        let interpolable = matches!(
            self.to,
            MarkPayload::Rect(_) | MarkPayload::Point(_)
        );

        if self.role == TweenRole::Exit {
            let gone = if interpolable { t >= 1.0 } else { t > 0.0 };
            if gone {
                return None;
            }
        }
        if !interpolable {
            return Some(self.to.clone());
        }
        Some(lerp_payload(&self.from, &self.to, t))
    }
}

/// Plans tweens for a frame's diff stream.
///
/// Every diff yields exactly one tween; all of them are meant to be driven
/// by the same [`Transition`].
pub fn plan_tweens(diffs: &[MarkDiff]) -> Vec<MarkTween> {
    diffs
        .iter()
        .map(|diff| match diff {
            MarkDiff::Enter { id, z_index, new } => {
                let from = neutral_of(new).unwrap_or_else(|| (**new).clone());
                MarkTween {
                    id: *id,
                    z_index: *z_index,
                    role: TweenRole::Enter,
                    from,
                    to: (**new).clone(),
                }
            }
            MarkDiff::Update {
                id,
                new_z_index,
                old,
                new,
                ..
            } => MarkTween {
                id: *id,
                z_index: *new_z_index,
                role: TweenRole::Update,
                from: (**old).clone(),
                to: (**new).clone(),
            },
            MarkDiff::Exit { id, z_index, old } => {
                let to = neutral_of(old).unwrap_or_else(|| (**old).clone());
                MarkTween {
                    id: *id,
                    z_index: *z_index,
                    role: TweenRole::Exit,
                    from: (**old).clone(),
                    to,
                }
            }
        })
        .collect()
}

/// Returns the neutral (zero-extent) state a payload enters from and exits
/// to, or `None` for wholesale-replaced payloads.
fn neutral_of(payload: &MarkPayload) -> Option<MarkPayload> {
    match payload {
        MarkPayload::Rect(r) => Some(MarkPayload::Rect(RectPayload {
            // Collapse onto the bottom edge: bars grow from the baseline.
            rect: Rect::new(r.rect.x0, r.rect.y1, r.rect.x1, r.rect.y1),
            fill: r.fill.clone(),
        })),
        MarkPayload::Point(p) => Some(MarkPayload::Point(PointPayload {
            center: p.center,
            radius: 0.0,
            fill: p.fill.clone(),
        })),
        MarkPayload::Path(_) | MarkPayload::Text(_) => None,
    }
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

fn lerp_payload(from: &MarkPayload, to: &MarkPayload, t: f64) -> MarkPayload {
    match (from, to) {
        (MarkPayload::Rect(a), MarkPayload::Rect(b)) => MarkPayload::Rect(RectPayload {
            rect: Rect::new(
                lerp(a.rect.x0, b.rect.x0, t),
                lerp(a.rect.y0, b.rect.y0, t),
                lerp(a.rect.x1, b.rect.x1, t),
                lerp(a.rect.y1, b.rect.y1, t),
            ),
            fill: b.fill.clone(),
        }),
        (MarkPayload::Point(a), MarkPayload::Point(b)) => MarkPayload::Point(PointPayload {
            center: Point::new(
                lerp(a.center.x, b.center.x, t),
                lerp(a.center.y, b.center.y, t),
            ),
            radius: lerp(a.radius, b.radius, t),
            fill: b.fill.clone(),
        }),
        // Kind changed under one id, or wholesale payloads: snap to target.
        _ => to.clone(),
    }
}
