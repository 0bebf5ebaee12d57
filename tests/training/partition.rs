//! Row partitioning laws.

use std::collections::HashSet;

use causal_tree::CausalDataset;
use causal_tree::data::{HonestPartitions, RowIdx};
use ndarray::{Array1, Array2};
use proptest::prelude::*;

fn dataset(values: &[f64]) -> CausalDataset {
    let n = values.len();
    let x = Array2::from_shape_fn((n, 1), |(r, _)| values[r]);
    let t = Array1::from_shape_fn(n, |r| (r % 2) as u8);
    CausalDataset::new(x, Array1::zeros(n), t).unwrap()
}

fn as_set(rows: &[RowIdx]) -> HashSet<RowIdx> {
    rows.iter().copied().collect()
}

proptest! {
    #[test]
    fn children_cover_parent_without_overlap(
        values in prop::collection::vec(-10.0f64..10.0, 1..80),
        threshold in -12.0f64..12.0,
        val_split in 0.05f64..0.95,
        seed in any::<u64>(),
    ) {
        let ds = dataset(&values);
        let parts = HonestPartitions::split(values.len(), val_split, seed);
        let (t, f) = parts.divide(&ds, 0, threshold);

        for (parent, tb, fb) in [
            (&parts.train, &t.train, &f.train),
            (&parts.validation, &t.validation, &f.validation),
            (&parts.estimation, &t.estimation, &f.estimation),
        ] {
            let (tb_set, fb_set) = (as_set(tb), as_set(fb));
            prop_assert!(tb_set.is_disjoint(&fb_set));
            prop_assert_eq!(&tb_set | &fb_set, as_set(parent));
            prop_assert_eq!(tb.len() + fb.len(), parent.len());

            for &r in tb {
                prop_assert!(values[r as usize] <= threshold);
            }
            for &r in fb {
                prop_assert!(values[r as usize] > threshold);
            }
        }
    }

    #[test]
    fn honest_split_is_a_disjoint_cover(n in 0usize..300, val_split in 0.05f64..0.95, seed in any::<u64>()) {
        let parts = HonestPartitions::split(n, val_split, seed);
        let mut all: Vec<RowIdx> = parts
            .train
            .iter()
            .chain(&parts.validation)
            .chain(&parts.estimation)
            .copied()
            .collect();
        all.sort_unstable();
        prop_assert_eq!(all, (0..n as RowIdx).collect::<Vec<_>>());

        let holdout = parts.validation.len() + parts.estimation.len();
        prop_assert_eq!(holdout, (n as f64 * val_split).ceil() as usize);
        prop_assert_eq!(parts.estimation.len(), (holdout as f64 * 0.5).ceil() as usize);
    }
}
