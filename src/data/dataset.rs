//! Causal dataset: features, outcomes and binary treatment assignment.
//!
//! Rows are never copied during tree growth. Every partition is a list of row
//! indices into one shared [`CausalDataset`], and splitting a partition by a
//! predicate produces two new index lists.

use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};

use crate::stats::EffectSummary;

/// Row index type used by partitions.
pub type RowIdx = u32;

/// Dataset construction errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DatasetError {
    #[error("number of outcomes ({outcomes}) does not match number of rows ({rows})")]
    OutcomeLenMismatch { rows: usize, outcomes: usize },

    #[error("number of treatment flags ({treatments}) does not match number of rows ({rows})")]
    TreatmentLenMismatch { rows: usize, treatments: usize },

    #[error("treatment must be 0 or 1, got {value} at row {row}")]
    InvalidTreatment { row: usize, value: u8 },

    #[error("dataset has {rows} rows, more than a partition can index")]
    TooManyRows { rows: usize },
}

/// Features, outcomes and treatment assignment for one population.
///
/// - `features`: `[n_rows, n_features]`, sample-major
/// - `outcomes`: observed outcome per row
/// - `treatment`: `1` for treated rows, `0` for control rows
#[derive(Debug, Clone)]
pub struct CausalDataset {
    features: Array2<f64>,
    outcomes: Array1<f64>,
    treatment: Array1<u8>,
}

impl CausalDataset {
    /// Create a dataset, validating row alignment and treatment values.
    pub fn new(
        features: Array2<f64>,
        outcomes: Array1<f64>,
        treatment: Array1<u8>,
    ) -> Result<Self, DatasetError> {
        let rows = features.nrows();

        if outcomes.len() != rows {
            return Err(DatasetError::OutcomeLenMismatch {
                rows,
                outcomes: outcomes.len(),
            });
        }
        if treatment.len() != rows {
            return Err(DatasetError::TreatmentLenMismatch {
                rows,
                treatments: treatment.len(),
            });
        }
        if rows > RowIdx::MAX as usize {
            return Err(DatasetError::TooManyRows { rows });
        }
        if let Some((row, &value)) = treatment.iter().enumerate().find(|(_, t)| **t > 1) {
            return Err(DatasetError::InvalidTreatment { row, value });
        }

        Ok(Self {
            features,
            outcomes,
            treatment,
        })
    }

    /// Create a dataset from borrowed views (copies the data).
    pub fn from_views(
        features: ArrayView2<'_, f64>,
        outcomes: ArrayView1<'_, f64>,
        treatment: ArrayView1<'_, u8>,
    ) -> Result<Self, DatasetError> {
        Self::new(features.to_owned(), outcomes.to_owned(), treatment.to_owned())
    }

    /// Number of rows.
    #[inline]
    pub fn n_rows(&self) -> usize {
        self.features.nrows()
    }

    /// Number of feature columns.
    #[inline]
    pub fn n_features(&self) -> usize {
        self.features.ncols()
    }

    /// Returns true if the dataset has no rows.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.n_rows() == 0
    }

    #[inline]
    pub fn features(&self) -> ArrayView2<'_, f64> {
        self.features.view()
    }

    #[inline]
    pub fn outcomes(&self) -> ArrayView1<'_, f64> {
        self.outcomes.view()
    }

    #[inline]
    pub fn treatment(&self) -> ArrayView1<'_, u8> {
        self.treatment.view()
    }

    /// Feature value at `(row, feature)`.
    #[inline]
    pub fn value(&self, row: RowIdx, feature: usize) -> f64 {
        self.features[[row as usize, feature]]
    }

    /// All row indices, in order.
    pub fn all_rows(&self) -> Vec<RowIdx> {
        (0..self.n_rows() as RowIdx).collect()
    }

    /// Iterate `(outcome, treatment)` pairs for the given rows.
    pub fn pairs<'a>(&'a self, rows: &'a [RowIdx]) -> impl Iterator<Item = (f64, u8)> + 'a {
        rows.iter()
            .map(move |&r| (self.outcomes[r as usize], self.treatment[r as usize]))
    }

    /// Per-arm moments of the outcome over the given rows.
    pub fn summarize(&self, rows: &[RowIdx]) -> EffectSummary {
        EffectSummary::from_pairs(self.pairs(rows))
    }

    /// Sorted distinct values of `feature` within `rows`.
    ///
    /// NaN values sort last.
    pub fn distinct_values(&self, rows: &[RowIdx], feature: usize) -> Vec<f64> {
        let mut values: Vec<f64> = rows.iter().map(|&r| self.value(r, feature)).collect();
        values.sort_by(|a, b| a.total_cmp(b));
        values.dedup_by(|a, b| a.total_cmp(b).is_eq());
        values
    }

    /// Partition `rows` by the predicate `x[row, feature] <= threshold`.
    ///
    /// Returns `(matching, rest)`. Input order is preserved on each side.
    pub fn divide(
        &self,
        rows: &[RowIdx],
        feature: usize,
        threshold: f64,
    ) -> (Vec<RowIdx>, Vec<RowIdx>) {
        rows.iter()
            .copied()
            .partition(|&r| self.value(r, feature) <= threshold)
    }

    /// Materialize the given rows as a standalone dataset.
    pub fn select(&self, rows: &[RowIdx]) -> Self {
        let idx: Vec<usize> = rows.iter().map(|&r| r as usize).collect();
        Self {
            features: self.features.select(Axis(0), &idx),
            outcomes: self.outcomes.select(Axis(0), &idx),
            treatment: self.treatment.select(Axis(0), &idx),
        }
    }
}
