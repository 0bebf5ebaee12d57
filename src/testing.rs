//! Testing utilities for causal-tree.
//!
//! Assertion helpers and synthetic causal datasets shared by unit tests,
//! integration tests and benchmarks.
//!
//! ```
//! use causal_tree::assert_approx_eq_f64;
//! use causal_tree::testing::opposite_effects;
//!
//! let ds = opposite_effects(10, 5.0, 0);
//! assert_eq!(ds.n_rows(), 20);
//! assert_approx_eq_f64!(1.0, 1.0001, 0.001);
//! ```

use ndarray::{Array1, Array2};
use rand::prelude::*;

use crate::data::CausalDataset;

// =============================================================================
// Constants
// =============================================================================

/// Default tolerance for floating point comparisons of O(1) values.
pub const DEFAULT_TOLERANCE_F64: f64 = 1e-9;

// =============================================================================
// Floating Point Assertions
// =============================================================================

/// Assert that two f64 values are approximately equal.
///
/// Uses absolute difference comparison with the given tolerance. Two NaNs
/// are considered equal.
///
/// # Examples
///
/// ```
/// # use causal_tree::assert_approx_eq_f64;
/// assert_approx_eq_f64!(1.0f64, 1.0001f64, 0.001);
/// assert_approx_eq_f64!(f64::NAN, f64::NAN, 0.0);
/// ```
#[macro_export]
macro_rules! assert_approx_eq_f64 {
    ($left:expr, $right:expr, $tolerance:expr) => {{
        let left_val: f64 = $left;
        let right_val: f64 = $right;
        let tol: f64 = $tolerance;
        let both_nan = left_val.is_nan() && right_val.is_nan();
        let diff = (left_val - right_val).abs();
        if !both_nan && !(diff <= tol) {
            panic!(
                "assertion failed: `(left ≈ right)`\n  left: `{:?}`\n right: `{:?}`\n  diff: `{:?}` > tolerance `{:?}`",
                left_val, right_val, diff, tol
            );
        }
    }};
    ($left:expr, $right:expr, $tolerance:expr, $($arg:tt)+) => {{
        let left_val: f64 = $left;
        let right_val: f64 = $right;
        let tol: f64 = $tolerance;
        let both_nan = left_val.is_nan() && right_val.is_nan();
        let diff = (left_val - right_val).abs();
        if !both_nan && !(diff <= tol) {
            panic!(
                "assertion failed: `(left ≈ right)` - {}\n  left: `{:?}`\n right: `{:?}`\n  diff: `{:?}` > tolerance `{:?}`",
                format_args!($($arg)+), left_val, right_val, diff, tol
            );
        }
    }};
}

/// Assert that two f64 slices are approximately equal element-wise.
///
/// # Panics
///
/// Panics if lengths differ or any element differs by more than tolerance.
pub fn assert_slice_approx_eq(actual: &[f64], expected: &[f64], tolerance: f64, context: &str) {
    assert_eq!(
        actual.len(),
        expected.len(),
        "{context}: length mismatch - got {}, expected {}",
        actual.len(),
        expected.len()
    );

    for (i, (a, e)) in actual.iter().zip(expected.iter()).enumerate() {
        let diff = (a - e).abs();
        assert!(
            diff <= tolerance,
            "{context}[{i}]: {a} ≠ {e} (diff={diff}, tolerance={tolerance})"
        );
    }
}

// =============================================================================
// Synthetic Datasets
// =============================================================================

/// Two subgroups with opposite treatment effects.
///
/// `2 * n_per_side` rows with a single binary feature: rows with `x = 0`
/// have effect `+effect`, rows with `x = 1` have effect `-effect`.
/// Treatment alternates by row, and outcomes carry uniform noise in
/// `[-0.5, 0.5)` drawn from `seed`.
pub fn opposite_effects(n_per_side: usize, effect: f64, seed: u64) -> CausalDataset {
    opposite_effects_with_noise(n_per_side, effect, 1.0, seed)
}

/// [`opposite_effects`] without noise: treated outcomes are exactly
/// `±effect` and control outcomes exactly 0.
pub fn opposite_effects_exact(n_per_side: usize, effect: f64) -> CausalDataset {
    opposite_effects_with_noise(n_per_side, effect, 0.0, 0)
}

fn opposite_effects_with_noise(
    n_per_side: usize,
    effect: f64,
    noise_width: f64,
    seed: u64,
) -> CausalDataset {
    let n_rows = 2 * n_per_side;
    let mut rng = StdRng::seed_from_u64(seed);

    let features = Array2::from_shape_fn((n_rows, 1), |(r, _)| if r < n_per_side { 0.0 } else { 1.0 });
    let treatment = Array1::from_shape_fn(n_rows, |r| (r % 2) as u8);
    let outcomes = Array1::from_shape_fn(n_rows, |r| {
        let sign = if r < n_per_side { 1.0 } else { -1.0 };
        let signal = sign * effect * treatment[r] as f64;
        if noise_width > 0.0 {
            signal + (rng.r#gen::<f64>() - 0.5) * noise_width
        } else {
            signal
        }
    });

    build(features, outcomes, treatment)
}

/// Rows whose outcome is independent of treatment and features.
///
/// Two uniform features in `[0, 1)`, alternating treatment and uniform
/// outcomes in `[0, 1)`.
pub fn no_signal(n_rows: usize, seed: u64) -> CausalDataset {
    let mut rng = StdRng::seed_from_u64(seed);

    let features = Array2::from_shape_fn((n_rows, 2), |_| rng.r#gen::<f64>());
    let treatment = Array1::from_shape_fn(n_rows, |r| (r % 2) as u8);
    let outcomes = Array1::from_shape_fn(n_rows, |_| rng.r#gen::<f64>());

    build(features, outcomes, treatment)
}

/// Random features with a treatment effect linear in the first feature.
///
/// `effect(x) = slope * x[0]`; treatment is a fair coin per row. Used to
/// exercise deeper trees.
pub fn linear_effect(n_rows: usize, n_features: usize, slope: f64, seed: u64) -> CausalDataset {
    assert!(n_features >= 1);
    let mut rng = StdRng::seed_from_u64(seed);

    let features = Array2::from_shape_fn((n_rows, n_features), |_| rng.r#gen::<f64>());
    let treatment = Array1::from_shape_fn(n_rows, |_| u8::from(rng.r#gen::<bool>()));
    let outcomes = Array1::from_shape_fn(n_rows, |r| {
        let noise = rng.r#gen::<f64>() - 0.5;
        noise + slope * features[[r, 0]] * treatment[r] as f64
    });

    build(features, outcomes, treatment)
}

fn build(features: Array2<f64>, outcomes: Array1<f64>, treatment: Array1<u8>) -> CausalDataset {
    CausalDataset::new(features, outcomes, treatment).expect("generated data is aligned")
}
