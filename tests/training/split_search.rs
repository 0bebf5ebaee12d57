//! Split feasibility and column scan policy.

use causal_tree::data::HonestPartitions;
use causal_tree::testing::opposite_effects;
use causal_tree::training::{HonestSplitter, SplitSearch};
use causal_tree::{CausalDataset, CausalTreeConfig, HonestTreeTrainer};
use ndarray::{Array1, Array2};
use rstest::rstest;

/// 24 rows, binary feature (`x = 0` for the first 12). Every partition side
/// holds exactly two treated and two control rows.
fn balanced() -> (CausalDataset, HonestPartitions) {
    let x = Array2::from_shape_fn((24, 1), |(r, _)| if r < 12 { 0.0 } else { 1.0 });
    let t = Array1::from_shape_fn(24, |r| (r % 2) as u8);
    let y = Array1::from_shape_fn(24, |r| {
        let sign = if r < 12 { 1.0 } else { -1.0 };
        sign * 2.0 * t[r] as f64 + r as f64 * 0.01
    });
    let ds = CausalDataset::new(x, y, t).unwrap();

    let rows: Vec<u32> = (0..24).collect();
    let parts = HonestPartitions {
        train: rows.iter().copied().filter(|r| r % 3 == 0).collect(),
        validation: rows.iter().copied().filter(|r| r % 3 == 1).collect(),
        estimation: rows.iter().copied().filter(|r| r % 3 == 2).collect(),
    };
    (ds, parts)
}

fn splitter(min_leaf_size: f64, validation_min_size: f64) -> HonestSplitter {
    HonestSplitter {
        min_leaf_size,
        validation_min_size,
        weight: 0.5,
        honesty_ratio: 1.0,
        search: SplitSearch::Exhaustive,
    }
}

#[rstest]
#[case::exact_minimum(2.0, 2.0, true)]
#[case::train_and_estimation_one_short(3.0, 2.0, false)]
#[case::validation_one_short(2.0, 3.0, false)]
fn arm_minimum_is_inclusive(#[case] min_leaf: f64, #[case] val_min: f64, #[case] feasible: bool) {
    let (ds, parts) = balanced();
    let candidate = splitter(min_leaf, val_min).evaluate_candidate(&ds, &parts, 0.0, 0, 0.0);
    assert_eq!(candidate.is_some(), feasible);
}

#[test]
fn fractional_validation_minimum_rounds_nothing() {
    let (ds, parts) = balanced();
    assert!(splitter(2.0, 2.5).evaluate_candidate(&ds, &parts, 0.0, 0, 0.0).is_none());
}

#[test]
fn scan_policies_agree_on_a_single_feature() {
    let ds = opposite_effects(120, 5.0, 8);
    let fit = |search: SplitSearch| {
        let config = CausalTreeConfig::builder()
            .min_leaf_size(5)
            .split_search(search)
            .build()
            .unwrap();
        HonestTreeTrainer::new(config).fit(&ds).unwrap()
    };

    let exhaustive = fit(SplitSearch::Exhaustive);
    let first = fit(SplitSearch::FirstImprovingColumn);
    assert_eq!(exhaustive.n_nodes(), first.n_nodes());
    assert_eq!(exhaustive.predict(ds.features()), first.predict(ds.features()));
    first.validate().unwrap();
}
