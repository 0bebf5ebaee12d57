//! One-pass outcome moments split by treatment arm.

/// Running count, mean and sum of squared deviations of one arm (Welford).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ArmMoments {
    count: usize,
    mean: f64,
    m2: f64,
}

impl ArmMoments {
    /// Add one observation.
    #[inline]
    pub fn push(&mut self, y: f64) {
        self.count += 1;
        let delta = y - self.mean;
        self.mean += delta / self.count as f64;
        self.m2 += delta * (y - self.mean);
    }

    #[inline]
    pub fn count(&self) -> usize {
        self.count
    }

    /// Mean outcome, `NaN` when the arm is empty.
    #[inline]
    pub fn mean(&self) -> f64 {
        if self.count == 0 { f64::NAN } else { self.mean }
    }

    /// Population variance (denominator `n`), `NaN` when the arm is empty.
    #[inline]
    pub fn variance(&self) -> f64 {
        if self.count == 0 {
            f64::NAN
        } else {
            self.m2 / self.count as f64
        }
    }

    /// Sum of squared deviations from the mean.
    #[inline]
    pub(crate) fn sum_sq_dev(&self) -> f64 {
        self.m2
    }
}

/// Outcome variance of each arm.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArmVariance {
    pub treated: f64,
    pub control: f64,
}

/// Treated/control row counts and whether either falls below a minimum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArmSizes {
    pub treated: usize,
    pub control: usize,
    pub too_small: bool,
}

impl ArmSizes {
    /// Counts checked against `min_size` (either arm below it is a violation).
    pub fn new(treated: usize, control: usize, min_size: f64) -> Self {
        Self {
            treated,
            control,
            too_small: (treated as f64) < min_size || (control as f64) < min_size,
        }
    }
}

/// Per-arm moments of one partition.
///
/// Everything the tree needs from a partition (effect, arm variances, arm
/// counts, t-test) derives from this single pass.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EffectSummary {
    treated: ArmMoments,
    control: ArmMoments,
}

impl EffectSummary {
    /// Accumulate `(outcome, treatment)` pairs; treatment `1` is treated.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (f64, u8)>,
    {
        let mut summary = Self::default();
        for (y, t) in pairs {
            if t == 1 {
                summary.treated.push(y);
            } else {
                summary.control.push(y);
            }
        }
        summary
    }

    #[inline]
    pub fn treated(&self) -> &ArmMoments {
        &self.treated
    }

    #[inline]
    pub fn control(&self) -> &ArmMoments {
        &self.control
    }

    /// Total number of rows.
    #[inline]
    pub fn len(&self) -> usize {
        self.treated.count + self.control.count
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Average causal effect: treated mean minus control mean.
    #[inline]
    pub fn effect(&self) -> f64 {
        self.treated.mean() - self.control.mean()
    }

    /// Population variance of each arm.
    #[inline]
    pub fn variance(&self) -> ArmVariance {
        ArmVariance {
            treated: self.treated.variance(),
            control: self.control.variance(),
        }
    }

    /// Arm counts checked against `min_size`.
    #[inline]
    pub fn arm_sizes(&self, min_size: f64) -> ArmSizes {
        ArmSizes::new(self.treated.count, self.control.count, min_size)
    }

    /// Two-sided p-value of the effect, see [`super::p_value`].
    #[inline]
    pub fn p_value(&self) -> f64 {
        super::ttest::pooled_t_test(&self.treated, &self.control)
    }
}
