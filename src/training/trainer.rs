//! Honest causal tree trainer.
//!
//! # Example
//!
//! ```
//! use causal_tree::training::{CausalTreeConfig, HonestTreeTrainer};
//! use causal_tree::testing::opposite_effects;
//!
//! let dataset = opposite_effects(100, 5.0, 0);
//! let config = CausalTreeConfig::builder().max_depth(2).min_leaf_size(5).build().unwrap();
//!
//! let tree = HonestTreeTrainer::new(config).fit(&dataset).unwrap();
//! assert!(tree.n_leaves() >= 1);
//! ```

use ndarray::{ArrayView1, ArrayView2};

use crate::data::{CausalDataset, DatasetError, HonestPartitions};
use crate::trees::{CausalNode, CausalTree};

use super::grower::HonestGrower;
use super::honesty::root_variance_penalty;
use super::logger::TrainingLogger;
use super::objective::evaluate_summaries;
use super::params::CausalTreeConfig;
use super::split::HonestSplitter;

/// Fits honest causal trees with a fixed configuration.
#[derive(Debug, Clone, Default)]
pub struct HonestTreeTrainer {
    config: CausalTreeConfig,
}

impl HonestTreeTrainer {
    pub fn new(config: CausalTreeConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CausalTreeConfig {
        &self.config
    }

    /// Fit a tree on `dataset`.
    ///
    /// The rows are split into train, validation and estimation partitions
    /// with the configured seed. Splits are chosen on train and validation
    /// rows; every node's effect and p-value come from its estimation rows.
    ///
    /// Returns `None` for a dataset without rows or an invalid configuration.
    pub fn fit(&self, dataset: &CausalDataset) -> Option<CausalTree> {
        let config = &self.config;
        let logger = TrainingLogger::new(config.verbosity);

        if let Err(err) = config.validate() {
            logger.warn(format_args!("invalid configuration: {err}"));
            return None;
        }
        if dataset.is_empty() {
            return None;
        }

        logger.start_fit(dataset.n_rows(), dataset.n_features());

        let parts = HonestPartitions::split(dataset.n_rows(), config.val_split, config.seed);
        logger.log_partitions(parts.train.len(), parts.validation.len(), parts.estimation.len());

        let train = dataset.summarize(&parts.train);
        let validation = dataset.summarize(&parts.validation);
        let estimation = dataset.summarize(&parts.estimation);

        let honesty_ratio = parts.estimation.len() as f64 / parts.train.len() as f64;
        let variance = root_variance_penalty(&train, honesty_ratio);
        let objective = evaluate_summaries(&train, &validation, config.weight).objective - variance;

        let mut root = CausalNode::new(
            estimation.effect(),
            estimation.p_value(),
            objective,
            variance,
            0,
        );
        root.control_mean = Some(estimation.control().mean());
        root.treatment_mean = Some(estimation.treated().mean());
        logger.log_root(root.effect, objective, variance);

        let splitter = HonestSplitter {
            min_leaf_size: config.min_leaf_size as f64,
            validation_min_size: config.validation_min_size(),
            weight: config.weight,
            honesty_ratio,
            search: config.split_search,
        };

        let tree = HonestGrower::new(dataset, splitter, config.max_depth, &logger).grow(root, parts);
        logger.finish_fit(tree.n_leaves(), tree.depth(), tree.total_objective());

        Some(tree)
    }

    /// Fit from raw arrays: features `[n_rows, n_features]`, outcomes and
    /// a 0/1 treatment indicator per row.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError`] if the arrays are misaligned or a treatment
    /// value is not 0 or 1.
    pub fn fit_arrays(
        &self,
        features: ArrayView2<'_, f64>,
        outcomes: ArrayView1<'_, f64>,
        treatment: ArrayView1<'_, u8>,
    ) -> Result<Option<CausalTree>, DatasetError> {
        let dataset = CausalDataset::from_views(features, outcomes, treatment)?;
        Ok(self.fit(&dataset))
    }
}
