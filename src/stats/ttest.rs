//! Two-sample Student t-test with pooled variance.

use statrs::distribution::{ContinuousCDF, StudentsT};

use super::moments::ArmMoments;

/// Two-sided p-value for `mean(a) != mean(b)` assuming equal variances.
///
/// ```text
/// sp² = (SS_a + SS_b) / (n_a + n_b - 2)
/// t   = (mean_a - mean_b) / sqrt(sp² · (1/n_a + 1/n_b))
/// p   = 2 · P(T_df > |t|),  df = n_a + n_b - 2
/// ```
///
/// `NaN` if either arm is empty or `df == 0`. With zero pooled variance the
/// statistic is infinite (`p = 0`) unless the means are equal (`NaN`).
pub(crate) fn pooled_t_test(a: &ArmMoments, b: &ArmMoments) -> f64 {
    let (n_a, n_b) = (a.count(), b.count());
    if n_a == 0 || n_b == 0 || n_a + n_b <= 2 {
        return f64::NAN;
    }

    let df = (n_a + n_b - 2) as f64;
    let pooled = (a.sum_sq_dev() + b.sum_sq_dev()) / df;
    let se = (pooled * (1.0 / n_a as f64 + 1.0 / n_b as f64)).sqrt();
    let diff = a.mean() - b.mean();

    if se == 0.0 {
        return if diff == 0.0 { f64::NAN } else { 0.0 };
    }

    let t = diff / se;
    match StudentsT::new(0.0, 1.0, df) {
        Ok(dist) => (2.0 * dist.sf(t.abs())).clamp(0.0, 1.0),
        Err(_) => f64::NAN,
    }
}
