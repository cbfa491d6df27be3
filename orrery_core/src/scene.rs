// Copyright 2025 the Orrery Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Retained scenes and frame diffing.
//!
//! A scene owns the datasets a view renders from and the marks it retained
//! from the previous frame. Each call to [`Scene::tick`] reconciles a fresh
//! mark list against the retained set and emits the enter/update/exit
//! partition, keyed by [`MarkId`]. Identity-keyed diffing (never positional)
//! is what keeps reordering and resampling from churning unrelated marks.

extern crate alloc;

use alloc::boxed::Box;
use alloc::vec::Vec;

use hashbrown::HashMap;
use hashbrown::hash_map::Entry;

use crate::dataset::{Dataset, DatasetId};
use crate::mark::{Mark, MarkId, MarkPayload};

/// One element of the enter/update/exit partition produced by
/// [`Scene::tick`].
#[derive(Clone, Debug, PartialEq)]
pub enum MarkDiff {
    /// A mark with no prior retained state.
    Enter {
        /// Mark identity.
        id: MarkId,
        /// Rendering order hint.
        z_index: i32,
        /// The new payload.
        new: Box<MarkPayload>,
    },
    /// A mark that existed last frame and is present again.
    ///
    /// Updates are emitted even when the payload is unchanged; a frame with
    /// identical input produces updates only, never enters or exits.
    Update {
        /// Mark identity.
        id: MarkId,
        /// Previous rendering order hint.
        old_z_index: i32,
        /// New rendering order hint.
        new_z_index: i32,
        /// The retained payload.
        old: Box<MarkPayload>,
        /// The new payload.
        new: Box<MarkPayload>,
    },
    /// A retained mark absent from the new frame. It has already been
    /// removed from the retained set when the diff is emitted.
    Exit {
        /// Mark identity.
        id: MarkId,
        /// Rendering order hint the mark was retained with.
        z_index: i32,
        /// The retained payload.
        old: Box<MarkPayload>,
    },
}

impl MarkDiff {
    /// Returns the mark id this diff refers to.
    pub fn id(&self) -> MarkId {
        match self {
            Self::Enter { id, .. } | Self::Update { id, .. } | Self::Exit { id, .. } => *id,
        }
    }
}

#[derive(Clone, Debug)]
struct Retained {
    z_index: i32,
    payload: MarkPayload,
}

/// A retained-mark scene plus the datasets it renders from.
#[derive(Debug, Default)]
pub struct Scene {
    datasets: HashMap<DatasetId, Dataset>,
    marks: HashMap<MarkId, Retained>,
}

impl Scene {
    /// Creates an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a dataset.
    ///
    /// On replacement the stored version is bumped past the previous one,
    /// so consumers can detect wholesale swaps.
    pub fn insert_dataset(&mut self, dataset: Dataset) {
        match self.datasets.entry(dataset.id) {
            Entry::Occupied(mut e) => {
                let prev = e.get().version;
                let mut dataset = dataset;
                dataset.version = prev.wrapping_add(1);
                e.insert(dataset);
            }
            Entry::Vacant(e) => {
                e.insert(dataset);
            }
        }
    }

    /// Returns a dataset by id.
    pub fn dataset(&self, id: DatasetId) -> Option<&Dataset> {
        self.datasets.get(&id)
    }

    /// Removes a dataset by id.
    pub fn remove_dataset(&mut self, id: DatasetId) -> Option<Dataset> {
        self.datasets.remove(&id)
    }

    /// Returns the number of retained marks.
    pub fn mark_count(&self) -> usize {
        self.marks.len()
    }

    /// Drops all retained marks.
    ///
    /// The next [`Scene::tick`] after a clear is a full enter pass; views
    /// that were hidden across dataset churn use this instead of replaying
    /// the diffs they missed.
    pub fn clear_marks(&mut self) {
        self.marks.clear();
    }

    /// Iterates retained marks as `(id, z_index, payload)`, unordered.
    pub fn retained(&self) -> impl Iterator<Item = (MarkId, i32, &MarkPayload)> {
        self.marks.iter().map(|(id, r)| (*id, r.z_index, &r.payload))
    }

    /// Reconciles a new frame of marks against the retained set.
    ///
    /// Enters and updates are emitted in input order; exits follow, in id
    /// order for determinism. If the input contains the same id twice, the
    /// last occurrence wins. After the call, the retained set holds exactly
    /// the input marks: exits never leave orphaned state behind.
    pub fn tick(&mut self, marks: Vec<Mark>) -> Vec<MarkDiff> {
        // Dedup the frame first (last occurrence wins) while preserving
        // first-seen order.
        let mut order: Vec<MarkId> = Vec::with_capacity(marks.len());
        let mut frame: HashMap<MarkId, Mark> = HashMap::with_capacity(marks.len());
        for mark in marks {
            let id = mark.id;
            if frame.insert(id, mark).is_none() {
                order.push(id);
            }
        }

        let mut out = Vec::with_capacity(order.len());
        for id in &order {
            let mark = frame.remove(id).expect("id recorded during dedup");
            match self.marks.entry(mark.id) {
                Entry::Occupied(mut e) => {
                    let prev = e.insert(Retained {
                        z_index: mark.z_index,
                        payload: mark.payload.clone(),
                    });
                    out.push(MarkDiff::Update {
                        id: mark.id,
                        old_z_index: prev.z_index,
                        new_z_index: mark.z_index,
                        old: Box::new(prev.payload),
                        new: Box::new(mark.payload),
                    });
                }
                Entry::Vacant(e) => {
                    e.insert(Retained {
                        z_index: mark.z_index,
                        payload: mark.payload.clone(),
                    });
                    out.push(MarkDiff::Enter {
                        id: mark.id,
                        z_index: mark.z_index,
                        new: Box::new(mark.payload),
                    });
                }
            }
        }

        let mut exited: Vec<MarkId> = self
            .marks
            .keys()
            .copied()
            .filter(|id| !order.contains(id))
            .collect();
        exited.sort_unstable();
        for id in exited {
            let prev = self.marks.remove(&id).expect("id from retained keys");
            out.push(MarkDiff::Exit {
                id,
                z_index: prev.z_index,
                old: Box::new(prev.payload),
            });
        }

        out
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use kurbo::Rect;
    use peniko::Brush;

    use super::*;
    use crate::dataset::{DatasetId, Record};

    fn rect_mark(id: u64, x: f64) -> Mark {
        Mark::rect(
            MarkId::from_raw(id),
            0,
            Rect::new(x, 0.0, x + 1.0, 1.0),
            Brush::default(),
        )
    }

    #[test]
    fn first_tick_is_all_enters() {
        let mut scene = Scene::new();
        let diffs = scene.tick(vec![rect_mark(1, 0.0), rect_mark(2, 5.0)]);
        assert_eq!(diffs.len(), 2);
        assert!(diffs.iter().all(|d| matches!(d, MarkDiff::Enter { .. })));
        assert_eq!(scene.mark_count(), 2);
    }

    #[test]
    fn identical_frame_yields_updates_only() {
        let mut scene = Scene::new();
        scene.tick(vec![rect_mark(1, 0.0), rect_mark(2, 5.0)]);
        let diffs = scene.tick(vec![rect_mark(1, 0.0), rect_mark(2, 5.0)]);
        assert_eq!(diffs.len(), 2);
        for d in &diffs {
            let MarkDiff::Update { old, new, .. } = d else {
                panic!("expected update, got {d:?}");
            };
            assert_eq!(old, new);
        }
    }

    #[test]
    fn reordered_frame_is_identity_keyed_not_positional() {
        let mut scene = Scene::new();
        scene.tick(vec![rect_mark(1, 0.0), rect_mark(2, 5.0)]);
        let diffs = scene.tick(vec![rect_mark(2, 5.0), rect_mark(1, 0.0)]);
        assert!(diffs.iter().all(|d| matches!(d, MarkDiff::Update { .. })));
    }

    #[test]
    fn absent_marks_exit_and_are_removed() {
        let mut scene = Scene::new();
        scene.tick(vec![rect_mark(1, 0.0), rect_mark(2, 5.0)]);
        let diffs = scene.tick(vec![rect_mark(1, 0.0)]);
        assert_eq!(diffs.len(), 2);
        assert!(matches!(diffs[0], MarkDiff::Update { .. }));
        assert!(
            matches!(&diffs[1], MarkDiff::Exit { id, .. } if *id == MarkId::from_raw(2)),
            "expected mark 2 to exit, got {diffs:?}"
        );
        assert_eq!(scene.mark_count(), 1);

        // The exited mark re-enters on a later frame.
        let diffs = scene.tick(vec![rect_mark(1, 0.0), rect_mark(2, 5.0)]);
        assert!(
            diffs
                .iter()
                .any(|d| matches!(d, MarkDiff::Enter { id, .. } if *id == MarkId::from_raw(2)))
        );
    }

    #[test]
    fn clear_marks_makes_next_tick_a_full_enter_pass() {
        let mut scene = Scene::new();
        scene.tick(vec![rect_mark(1, 0.0)]);
        scene.clear_marks();
        let diffs = scene.tick(vec![rect_mark(1, 0.0)]);
        assert!(matches!(diffs[0], MarkDiff::Enter { .. }));
    }

    #[test]
    fn dataset_replacement_bumps_version() {
        let mut scene = Scene::new();
        let id = DatasetId(3);
        scene.insert_dataset(Dataset::from_records(id, vec![Record::new()]));
        let v1 = scene.dataset(id).unwrap().version;
        scene.insert_dataset(Dataset::from_records(id, vec![]));
        let v2 = scene.dataset(id).unwrap().version;
        assert_ne!(v1, v2);
    }
}
