//! Effect statistics over an outcome vector and a binary treatment vector.
//!
//! Pure functions; treatment `1` marks treated rows, anything else control.
//!
//! - [`average_causal_effect`]: treated mean minus control mean
//! - [`effect_and_variance`]: arm variances and effect from one pass
//! - [`variance`]: population variance per arm
//! - [`p_value`]: two-sided pooled-variance t-test
//! - [`arm_sizes_and_violation`]: arm counts against a minimum size
//!
//! An empty arm has `NaN` mean and variance, so the effect of a partition
//! missing an arm is `NaN`. Callers keep such partitions out of split
//! selection through [`arm_sizes_and_violation`].

mod moments;
mod ttest;

use ndarray::ArrayView1;

pub use moments::{ArmMoments, ArmSizes, ArmVariance, EffectSummary};

fn summarize(y: ArrayView1<'_, f64>, t: ArrayView1<'_, u8>) -> EffectSummary {
    debug_assert_eq!(y.len(), t.len());
    EffectSummary::from_pairs(y.iter().copied().zip(t.iter().copied()))
}

/// Mean outcome of treated rows minus mean outcome of control rows.
pub fn average_causal_effect(y: ArrayView1<'_, f64>, t: ArrayView1<'_, u8>) -> f64 {
    summarize(y, t).effect()
}

/// Arm variances and the average causal effect, from a single pass.
pub fn effect_and_variance(y: ArrayView1<'_, f64>, t: ArrayView1<'_, u8>) -> (ArmVariance, f64) {
    let summary = summarize(y, t);
    (summary.variance(), summary.effect())
}

/// Population variance (denominator `n`) of the outcome in each arm.
pub fn variance(y: ArrayView1<'_, f64>, t: ArrayView1<'_, u8>) -> ArmVariance {
    summarize(y, t).variance()
}

/// Two-sided p-value of a Student two-sample t-test (pooled variance)
/// comparing treated and control outcomes.
pub fn p_value(y: ArrayView1<'_, f64>, t: ArrayView1<'_, u8>) -> f64 {
    summarize(y, t).p_value()
}

/// Treated and control counts, and whether either is below `min_size`.
pub fn arm_sizes_and_violation(min_size: f64, t: ArrayView1<'_, u8>) -> ArmSizes {
    let treated = t.iter().filter(|&&v| v == 1).count();
    ArmSizes::new(treated, t.len() - treated, min_size)
}
