// Copyright 2025 the Orrery Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fair random subsampling.

use orrery_core::Dataset;
use rand::Rng;
use rand::seq::index;

/// Draws a uniform random subset of `count` records without replacement.
///
/// Every record is equally likely to appear and the resulting order is a
/// fair permutation of the chosen rows (not a biased partial shuffle). If
/// the dataset has `count` rows or fewer, all rows are returned, still in
/// random order. Row keys are preserved, so resampling diffs as
/// enter/update/exit against the previous frame rather than repainting
/// everything.
pub fn random_subset(data: &Dataset, count: usize, rng: &mut impl Rng) -> Dataset {
    let n = data.row_count();
    let amount = count.min(n);
    let chosen = index::sample(rng, n, amount);

    let keys = data.row_keys();
    let rows = chosen
        .into_iter()
        .map(|row| {
            let record = data.record(row).expect("sampled index in bounds").clone();
            (keys[row], record)
        })
        .collect();
    let mut out = Dataset::from_rows(data.id, rows);
    out.version = data.version;
    out
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use orrery_core::{DatasetId, Record};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    fn numbered(n: usize) -> Dataset {
        let records = (0..n)
            .map(|i| Record::new().with("i", i as f64))
            .collect();
        Dataset::from_records(DatasetId(1), records)
    }

    #[test]
    fn subset_has_exactly_the_requested_size_without_duplicates() {
        let data = numbered(200);
        let mut rng = StdRng::seed_from_u64(42);
        let subset = random_subset(&data, 50, &mut rng);

        assert_eq!(subset.row_count(), 50);
        let keys: HashSet<u64> = subset.row_keys().iter().copied().collect();
        assert_eq!(keys.len(), 50, "no duplicate rows");
        assert!(keys.iter().all(|k| *k < 200), "all rows from the original");
    }

    #[test]
    fn small_datasets_are_returned_whole() {
        let data = numbered(10);
        let mut rng = StdRng::seed_from_u64(7);
        let subset = random_subset(&data, 50, &mut rng);
        assert_eq!(subset.row_count(), 10);
        let keys: HashSet<u64> = subset.row_keys().iter().copied().collect();
        assert_eq!(keys.len(), 10);
    }

    #[test]
    fn sampling_never_mutates_the_input() {
        let data = numbered(100);
        let before = data.clone();
        let mut rng = StdRng::seed_from_u64(9);
        let _ = random_subset(&data, 50, &mut rng);
        assert_eq!(data, before);
    }

    #[test]
    fn every_row_is_reachable_across_draws() {
        // A fairness smoke test: over repeated draws of 5-of-10, every row
        // should show up. (Exhaustive uniformity testing belongs to `rand`.)
        let data = numbered(10);
        let mut rng = StdRng::seed_from_u64(1);
        let mut seen: HashSet<u64> = HashSet::new();
        for _ in 0..100 {
            let subset = random_subset(&data, 5, &mut rng);
            seen.extend(subset.row_keys().iter().copied());
        }
        assert_eq!(seen.len(), 10);
    }
}
