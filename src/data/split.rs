//! Seeded random row splitting and the honest three-way partition.
//!
//! Splitting works on row indices only; the dataset itself is never copied.

use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_xoshiro::Xoshiro256PlusPlus;

use super::dataset::{CausalDataset, RowIdx};

/// Shuffle `rows` with a generator seeded from `seed` and split off a test part.
///
/// The test part takes `ceil(test_fraction * n)` rows from the front of the
/// shuffled order; the train part takes the rest. Returns `(train, test)`.
/// Every call builds a fresh generator, so equal inputs give equal outputs.
pub fn train_test_split(
    rows: &[RowIdx],
    test_fraction: f64,
    seed: u64,
) -> (Vec<RowIdx>, Vec<RowIdx>) {
    debug_assert!((0.0..=1.0).contains(&test_fraction));

    let mut shuffled = rows.to_vec();
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
    shuffled.shuffle(&mut rng);

    let n_test = ((rows.len() as f64) * test_fraction).ceil() as usize;
    let n_test = n_test.min(rows.len());
    let train = shuffled.split_off(n_test);
    (train, shuffled)
}

/// Disjoint train / validation / estimation row sets.
///
/// - `train`: split search and scoring
/// - `validation`: out-of-sample agreement of split effects
/// - `estimation`: effects, p-values and means reported on nodes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HonestPartitions {
    pub train: Vec<RowIdx>,
    pub validation: Vec<RowIdx>,
    pub estimation: Vec<RowIdx>,
}

impl HonestPartitions {
    /// Split `0..n_rows` into train and holdout (`val_split` of the rows), then
    /// the holdout 50/50 into validation and estimation.
    pub fn split(n_rows: usize, val_split: f64, seed: u64) -> Self {
        let rows: Vec<RowIdx> = (0..n_rows as RowIdx).collect();
        let (train, holdout) = train_test_split(&rows, val_split, seed);
        let (validation, estimation) = train_test_split(&holdout, 0.5, seed);
        Self {
            train,
            validation,
            estimation,
        }
    }

    /// Partition all three sets by the same predicate `x[row, feature] <= threshold`.
    ///
    /// Returns `(matching, rest)`.
    pub fn divide(&self, dataset: &CausalDataset, feature: usize, threshold: f64) -> (Self, Self) {
        let (train_t, train_f) = dataset.divide(&self.train, feature, threshold);
        let (val_t, val_f) = dataset.divide(&self.validation, feature, threshold);
        let (est_t, est_f) = dataset.divide(&self.estimation, feature, threshold);
        (
            Self {
                train: train_t,
                validation: val_t,
                estimation: est_t,
            },
            Self {
                train: train_f,
                validation: val_f,
                estimation: est_f,
            },
        )
    }

    /// True if any of the three sets is empty.
    pub fn any_empty(&self) -> bool {
        self.train.is_empty() || self.validation.is_empty() || self.estimation.is_empty()
    }

    /// Total number of rows across the three sets.
    pub fn len(&self) -> usize {
        self.train.len() + self.validation.len() + self.estimation.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
