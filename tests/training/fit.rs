//! End-to-end fitting tests.
//!
//! Focused on tree shape, leaf bookkeeping and the tree-level counters.

use approx::assert_abs_diff_eq;
use causal_tree::assert_approx_eq_f64;
use causal_tree::testing::{
    DEFAULT_TOLERANCE_F64, assert_slice_approx_eq, linear_effect, no_signal, opposite_effects,
    opposite_effects_exact,
};
use causal_tree::trees::{Branch, NodeKind, NodePath};
use causal_tree::{CausalDataset, CausalTreeConfig, HonestTreeTrainer};
use ndarray::{Array1, Array2, array};
use rstest::rstest;

fn fit(dataset: &CausalDataset, config: CausalTreeConfig) -> causal_tree::CausalTree {
    HonestTreeTrainer::new(config)
        .fit(dataset)
        .expect("non-empty dataset yields a tree")
}

#[test]
fn zero_rows_fit_nothing() {
    let ds = CausalDataset::new(Array2::zeros((0, 3)), Array1::zeros(0), Array1::zeros(0)).unwrap();
    assert!(HonestTreeTrainer::default().fit(&ds).is_none());
}

#[test]
fn max_depth_zero_is_a_single_leaf() {
    let ds = opposite_effects(100, 5.0, 3);
    let tree = fit(&ds, CausalTreeConfig::builder().max_depth(0).build().unwrap());

    assert_eq!(tree.n_nodes(), 1);
    assert_eq!(tree.n_leaves(), 1);
    assert_eq!(tree.depth(), 0);
    assert_eq!(tree.root_node().leaf_num, Some(1));
    assert_eq!(tree.root_node().kind(), NodeKind::Leaf);
    // Max-depth leaves do not touch the effect range.
    assert_eq!(tree.effect_range(), (0.0, 0.0));
    tree.validate().unwrap();
}

// Whether the root split is feasible depends on how the seeded shuffle
// spreads treated rows over the six child partitions: with few rows per side
// some seeds leave a child arm below `min_leaf_size`. 200 rows per side
// leaves ample room.
#[test]
fn opposite_subgroups_split_into_two_leaves() {
    let ds = opposite_effects(200, 5.0, 0);
    let config = CausalTreeConfig::builder()
        .min_leaf_size(5)
        .max_depth(2)
        .weight(0.5)
        .build()
        .unwrap();
    let tree = fit(&ds, config);
    tree.validate().unwrap();

    let root = tree.root_node();
    let split = root.split.expect("root splits on the subgroup feature");
    assert_eq!(split.feature, 0);
    assert_eq!(split.threshold, 0.0);

    let (tb, fb) = tree.children(tree.root()).unwrap();
    let (tb, fb) = (tree.node(tb), tree.node(fb));
    assert_eq!(tb.leaf_num, Some(1));
    assert_eq!(fb.leaf_num, Some(2));
    assert_abs_diff_eq!(tb.effect, 5.0, epsilon = 0.5);
    assert_abs_diff_eq!(fb.effect, -5.0, epsilon = 0.5);
    assert!(tb.p_value < 0.001);
    assert!(fb.p_value < 0.001);

    assert_eq!(tree.n_nodes(), 3);
    assert_eq!(tree.n_leaves(), 2);
    assert_eq!(tree.depth(), 1);
    assert_eq!(tree.effect_range(), (fb.effect, tb.effect));
    assert_abs_diff_eq!(
        tree.total_objective(),
        tb.objective + fb.objective,
        epsilon = 1e-9
    );

    assert_eq!(tree.predict_row(&[0.0]), tb.effect);
    assert_eq!(tree.predict_row(&[1.0]), fb.effect);
    let preds = tree.predict(array![[0.0], [1.0], [-3.0]].view());
    assert_eq!(preds.to_vec(), vec![tb.effect, fb.effect, tb.effect]);

    let true_path = NodePath::root().child(Branch::True);
    assert_eq!(tree.path(1).unwrap(), true_path);
    assert_eq!(tree.node_at(&true_path), Some(1));
}

#[test]
fn noiseless_opposite_subgroups_recover_exact_effects() {
    let ds = opposite_effects_exact(100, 5.0);
    let config = CausalTreeConfig::builder()
        .min_leaf_size(5)
        .max_depth(2)
        .weight(0.5)
        .seed(0)
        .build()
        .unwrap();
    let tree = fit(&ds, config);
    tree.validate().unwrap();

    let split = tree.root_node().split.expect("root splits on the subgroup feature");
    assert_eq!((split.feature, split.threshold), (0, 0.0));
    assert_eq!(tree.n_leaves(), 2);

    let (tb, fb) = tree.children(tree.root()).unwrap();
    let (tb, fb) = (tree.node(tb), tree.node(fb));
    assert_approx_eq_f64!(tb.effect, 5.0, DEFAULT_TOLERANCE_F64);
    assert_approx_eq_f64!(fb.effect, -5.0, DEFAULT_TOLERANCE_F64);
    // Both arms are constant within a leaf: zero pooled variance, distinct means.
    assert_eq!(tb.p_value, 0.0);
    assert_eq!(fb.p_value, 0.0);
    // Neither leaf pays an honesty penalty.
    assert_approx_eq_f64!(tb.variance, 0.0, DEFAULT_TOLERANCE_F64);
    assert_approx_eq_f64!(fb.variance, 0.0, DEFAULT_TOLERANCE_F64);

    let (min, max) = tree.effect_range();
    assert_approx_eq_f64!(min, -5.0, DEFAULT_TOLERANCE_F64);
    assert_approx_eq_f64!(max, 5.0, DEFAULT_TOLERANCE_F64);

    let preds = tree.predict(ds.features());
    let expected: Vec<f64> = (0..ds.n_rows()).map(|r| if r < 100 { 5.0 } else { -5.0 }).collect();
    assert_slice_approx_eq(preds.as_slice().unwrap(), &expected, DEFAULT_TOLERANCE_F64, "predict");
}

#[test]
fn max_depth_leaves_do_not_widen_effect_range() {
    let ds = opposite_effects(200, 5.0, 0);
    let config = CausalTreeConfig::builder().min_leaf_size(5).max_depth(1).build().unwrap();
    let tree = fit(&ds, config);

    assert_eq!(tree.n_leaves(), 2);
    // Only the root effect was recorded, against the initial (0, 0) range.
    let root = tree.root_node().effect;
    assert_eq!(tree.effect_range(), (root.min(0.0), root.max(0.0)));
}

#[test]
fn fit_is_deterministic_per_seed() {
    let ds = linear_effect(600, 3, 8.0, 11);
    let config = CausalTreeConfig::builder().min_leaf_size(10).seed(5).build().unwrap();

    let a = fit(&ds, config.clone());
    let b = fit(&ds, config);
    assert_eq!(a.n_nodes(), b.n_nodes());
    assert_eq!(a.n_leaves(), b.n_leaves());
    assert_eq!(a.total_objective(), b.total_objective());
    assert_eq!(a.predict(ds.features()), b.predict(ds.features()));
}

#[test]
fn no_signal_with_strict_minimum_is_one_leaf() {
    let ds = no_signal(200, 4);
    let config = CausalTreeConfig::builder().min_leaf_size(500).build().unwrap();
    let tree = fit(&ds, config);

    assert_eq!(tree.n_nodes(), 1);
    assert_eq!(tree.n_leaves(), 1);
    assert_eq!(tree.root_node().leaf_num, Some(1));
    assert_eq!(tree.total_objective(), tree.root_node().objective);
    tree.validate().unwrap();
}

#[test]
fn leaf_ordinals_follow_preorder() {
    let ds = linear_effect(3000, 3, 10.0, 2);
    let config = CausalTreeConfig::builder().min_leaf_size(10).max_depth(3).build().unwrap();
    let tree = fit(&ds, config);
    tree.validate().unwrap();

    let preorder_leaves: Vec<u32> = tree
        .iter_preorder()
        .into_iter()
        .filter_map(|(id, _)| tree.node(id).leaf_num)
        .collect();
    let expected: Vec<u32> = (1..=tree.n_leaves()).collect();
    assert_eq!(preorder_leaves, expected);

    let ordinals: Vec<u32> = tree.leaves().iter().filter_map(|n| n.leaf_num).collect();
    assert_eq!(ordinals, expected);

    for (id, path) in tree.iter_preorder() {
        assert_eq!(path.len(), tree.node(id).depth as usize);
        assert!(tree.node(id).depth <= 3);
    }
}

#[test]
fn every_row_lands_in_a_node_without_children() {
    let ds = linear_effect(1000, 2, 6.0, 9);
    let tree = fit(&ds, CausalTreeConfig::builder().min_leaf_size(8).build().unwrap());

    for id in tree.apply(ds.features()) {
        assert!(!tree.node(id).is_internal());
    }
}

#[rstest]
#[case::magnitude_only(0.0)]
#[case::balanced(0.5)]
#[case::agreement_only(1.0)]
fn weight_boundaries_fit_valid_trees(#[case] weight: f64) {
    let ds = opposite_effects(150, 4.0, 6);
    let config = CausalTreeConfig::builder()
        .weight(weight)
        .min_leaf_size(5)
        .build()
        .unwrap();
    let tree = fit(&ds, config);
    tree.validate().unwrap();

    let root = tree.root_node();
    assert!(root.objective.is_finite());
    if weight == 1.0 {
        // Pure disagreement penalty can never be positive.
        assert!(root.objective <= 0.0);
    }
    if weight == 0.0 {
        assert!(root.objective + root.variance >= 0.0);
    }
}

#[test]
fn fit_arrays_matches_fit() {
    let ds = opposite_effects(60, 3.0, 1);
    let trainer = HonestTreeTrainer::default();
    let from_arrays = trainer
        .fit_arrays(ds.features(), ds.outcomes(), ds.treatment())
        .unwrap()
        .unwrap();
    let direct = trainer.fit(&ds).unwrap();
    assert_eq!(from_arrays.n_nodes(), direct.n_nodes());
    assert_eq!(from_arrays.predict(ds.features()), direct.predict(ds.features()));
}
