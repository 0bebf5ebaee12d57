//! Honesty variance penalties.
//!
//! Both penalties estimate the variance of the effect estimator from train
//! data and scale it by `r = |estimation| / |train|`.

use crate::stats::EffectSummary;

/// Penalty charged to the root: `r · (var_t / n_t + var_c / n_c)`.
pub fn root_variance_penalty(train: &EffectSummary, ratio: f64) -> f64 {
    let var = train.variance();
    let n_t = train.treated().count() as f64;
    let n_c = train.control().count() as f64;
    ratio * (var.treated / n_t + var.control / n_c)
}

/// Penalty charged to a split child: `(1 + r) · (var_t / (n_t + 1) + var_c / (n_c + 1))`.
pub fn child_variance_penalty(train: &EffectSummary, ratio: f64) -> f64 {
    let var = train.variance();
    let n_t = train.treated().count() as f64;
    let n_c = train.control().count() as f64;
    (1.0 + ratio) * (var.treated / (n_t + 1.0) + var.control / (n_c + 1.0))
}
