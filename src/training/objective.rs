//! Split objective combining in-sample effect magnitude with validation agreement.

use ndarray::ArrayView1;

use crate::stats::EffectSummary;

/// Objective value of one node and its unselected in-sample magnitude.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObjectiveValue {
    /// Score used for split selection.
    pub objective: f64,
    /// `n_train · effect²`, reported only.
    pub mse: f64,
}

impl ObjectiveValue {
    /// Value of a node whose train or validation partition is empty.
    pub const DEGENERATE: Self = Self {
        objective: f64::NEG_INFINITY,
        mse: f64::NEG_INFINITY,
    };
}

/// Evaluate the objective from per-partition summaries.
///
/// ```text
/// te, ve    = effect on train, effect on validation
/// objective = ((1 - w)·n_tr·te² - w·n_val·|te - ve|) / (|n_tr - n_val| + 1)
/// mse       = n_tr·te²
/// ```
///
/// An empty train or validation partition yields [`ObjectiveValue::DEGENERATE`].
pub fn evaluate_summaries(
    train: &EffectSummary,
    validation: &EffectSummary,
    weight: f64,
) -> ObjectiveValue {
    let n_tr = train.len();
    let n_val = validation.len();
    if n_tr == 0 || n_val == 0 {
        return ObjectiveValue::DEGENERATE;
    }

    let te = train.effect();
    let ve = validation.effect();
    let (n_tr, n_val) = (n_tr as f64, n_val as f64);

    let in_sample = (1.0 - weight) * n_tr * te * te;
    let penalty = weight * n_val * (te - ve).abs();

    ObjectiveValue {
        objective: (in_sample - penalty) / ((n_tr - n_val).abs() + 1.0),
        mse: n_tr * te * te,
    }
}

/// Evaluate the objective from raw outcome and treatment vectors.
pub fn evaluate(
    train_y: ArrayView1<'_, f64>,
    train_t: ArrayView1<'_, u8>,
    val_y: ArrayView1<'_, f64>,
    val_t: ArrayView1<'_, u8>,
    weight: f64,
) -> ObjectiveValue {
    let train = EffectSummary::from_pairs(train_y.iter().copied().zip(train_t.iter().copied()));
    let validation = EffectSummary::from_pairs(val_y.iter().copied().zip(val_t.iter().copied()));
    evaluate_summaries(&train, &validation, weight)
}
