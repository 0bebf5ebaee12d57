//! Per-node split search.
//!
//! Every candidate is a `(feature, threshold)` pair where the threshold is a
//! distinct value of the feature among the node's train rows. A candidate is
//! feasible only if both children keep enough treated and control rows in
//! the validation, train and estimation partitions. Feasible candidates are
//! scored as
//!
//! ```text
//! split_score = (obj_true + obj_false) - (var_true + var_false)
//! gain        = split_score - node_objective
//! ```
//!
//! where `obj_*` comes from [`evaluate_summaries`] on the child's train and
//! validation rows and `var_*` from [`child_variance_penalty`] on its train rows.

use crate::data::{CausalDataset, HonestPartitions};
use crate::stats::EffectSummary;

use super::honesty::child_variance_penalty;
use super::objective::evaluate_summaries;
use super::params::SplitSearch;

/// Best split found for a node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplitInfo {
    /// Feature index.
    pub feature: usize,
    /// Threshold (true branch if `x[feature] <= threshold`).
    pub threshold: f64,
    /// Improvement over the node's own objective.
    pub gain: f64,
    /// Objective of the true-branch child.
    pub true_objective: f64,
    /// Objective of the false-branch child.
    pub false_objective: f64,
    /// Honesty variance penalty of the true-branch child.
    pub true_variance: f64,
    /// Honesty variance penalty of the false-branch child.
    pub false_variance: f64,
}

/// Exhaustive honest split finder.
#[derive(Debug, Clone)]
pub struct HonestSplitter {
    /// Per-arm minimum for train and estimation children.
    pub min_leaf_size: f64,
    /// Per-arm minimum for validation children.
    pub validation_min_size: f64,
    /// Objective weight.
    pub weight: f64,
    /// `|estimation| / |train|` at the root.
    pub honesty_ratio: f64,
    /// Column scan policy.
    pub search: SplitSearch,
}

impl HonestSplitter {
    /// Score one candidate, or `None` if any child is too small.
    pub fn evaluate_candidate(
        &self,
        dataset: &CausalDataset,
        parts: &HonestPartitions,
        node_objective: f64,
        feature: usize,
        threshold: f64,
    ) -> Option<SplitInfo> {
        let (val_t, val_f) = dataset.divide(&parts.validation, feature, threshold);
        let (val_t, val_f) = (dataset.summarize(&val_t), dataset.summarize(&val_f));
        if too_small(&val_t, &val_f, self.validation_min_size) {
            return None;
        }

        let (train_t, train_f) = dataset.divide(&parts.train, feature, threshold);
        let (train_t, train_f) = (dataset.summarize(&train_t), dataset.summarize(&train_f));
        if too_small(&train_t, &train_f, self.min_leaf_size) {
            return None;
        }

        let (est_t, est_f) = dataset.divide(&parts.estimation, feature, threshold);
        let (est_t, est_f) = (dataset.summarize(&est_t), dataset.summarize(&est_f));
        if too_small(&est_t, &est_f, self.min_leaf_size) {
            return None;
        }

        let true_variance = child_variance_penalty(&train_t, self.honesty_ratio);
        let false_variance = child_variance_penalty(&train_f, self.honesty_ratio);

        let true_objective = evaluate_summaries(&train_t, &val_t, self.weight).objective;
        let false_objective = evaluate_summaries(&train_f, &val_f, self.weight).objective;

        let split_score = (true_objective + false_objective) - (true_variance + false_variance);

        Some(SplitInfo {
            feature,
            threshold,
            gain: split_score - node_objective,
            true_objective,
            false_objective,
            true_variance,
            false_variance,
        })
    }

    /// Find the split with the strictly greatest positive gain.
    ///
    /// Features are scanned in index order and thresholds in ascending order;
    /// ties keep the earlier candidate. Returns `None` when no candidate
    /// improves on the node's objective.
    pub fn find_split(
        &self,
        dataset: &CausalDataset,
        parts: &HonestPartitions,
        node_objective: f64,
    ) -> Option<SplitInfo> {
        let mut best: Option<SplitInfo> = None;

        for feature in 0..dataset.n_features() {
            for threshold in dataset.distinct_values(&parts.train, feature) {
                let Some(candidate) =
                    self.evaluate_candidate(dataset, parts, node_objective, feature, threshold)
                else {
                    continue;
                };
                let best_gain = best.as_ref().map_or(0.0, |b| b.gain);
                if candidate.gain > best_gain {
                    best = Some(candidate);
                }
            }

            if self.search == SplitSearch::FirstImprovingColumn && best.is_some() {
                break;
            }
        }

        best
    }
}

fn too_small(a: &EffectSummary, b: &EffectSummary, min_size: f64) -> bool {
    a.arm_sizes(min_size).too_small || b.arm_sizes(min_size).too_small
}
