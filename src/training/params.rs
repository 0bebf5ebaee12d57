//! Causal tree configuration with builder pattern.
//!
//! # Example
//!
//! ```
//! use causal_tree::training::{CausalTreeConfig, SplitSearch};
//!
//! // All defaults
//! let config = CausalTreeConfig::builder().build().unwrap();
//! assert_eq!(config.max_depth, 3);
//!
//! let config = CausalTreeConfig::builder()
//!     .max_depth(5)
//!     .min_leaf_size(10)
//!     .weight(0.3)
//!     .split_search(SplitSearch::FirstImprovingColumn)
//!     .build()
//!     .unwrap();
//! assert_eq!(config.min_leaf_size, 10);
//! ```

use bon::Builder;

use super::logger::Verbosity;

// =============================================================================
// ConfigError
// =============================================================================

/// Errors that can occur during configuration validation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// `val_split` must lie strictly between 0 and 1.
    #[error("val_split must be in (0, 1), got {0}")]
    InvalidValSplit(f64),

    /// `weight` must lie in [0, 1].
    #[error("weight must be in [0, 1], got {0}")]
    InvalidWeight(f64),
}

// =============================================================================
// SplitSearch
// =============================================================================

/// When the best split of a node is applied during the column scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SplitSearch {
    /// Scan every feature and value, then apply the single best split.
    #[default]
    Exhaustive,
    /// Apply the best split found so far as soon as a column finishes with a
    /// positive gain. Later columns are not scanned, so the result depends on
    /// column order.
    ///
    /// A column without any positive gain does not end the search: the scan
    /// moves on to the next column, and the node becomes a leaf only after
    /// every column failed to improve it.
    FirstImprovingColumn,
}

// =============================================================================
// CausalTreeConfig
// =============================================================================

/// Configuration for fitting an honest causal tree.
#[derive(Debug, Clone, Builder)]
#[builder(
    derive(Clone, Debug),
    finish_fn(vis = "", name = __build_internal)
)]
pub struct CausalTreeConfig {
    /// Maximum tree depth (root is depth 0). Default: 3.
    ///
    /// `0` yields a single-leaf tree.
    #[builder(default = 3)]
    pub max_depth: u16,

    /// Minimum treated and minimum control rows per child in the train and
    /// estimation partitions. Default: 2.
    #[builder(default = 2)]
    pub min_leaf_size: usize,

    /// Fraction of rows held out from training, split evenly into validation
    /// and estimation. Default: 0.5.
    #[builder(default = 0.5)]
    pub val_split: f64,

    /// Trade-off between in-sample effect magnitude (0) and train/validation
    /// disagreement (1). Default: 0.5.
    #[builder(default = 0.5)]
    pub weight: f64,

    /// Seed for the train/validation/estimation split. Default: 42.
    #[builder(default = 42)]
    pub seed: u64,

    /// Column scan policy. Default: [`SplitSearch::Exhaustive`].
    #[builder(default)]
    pub split_search: SplitSearch,

    /// Verbosity level. Default: `Silent`.
    #[builder(default)]
    pub verbosity: Verbosity,
}

/// Custom finishing function that validates the config.
impl<S: causal_tree_config_builder::IsComplete> CausalTreeConfigBuilder<S> {
    /// Build and validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `val_split` is outside (0, 1) or `weight`
    /// is outside [0, 1].
    pub fn build(self) -> Result<CausalTreeConfig, ConfigError> {
        let config = self.__build_internal();
        config.validate()?;
        Ok(config)
    }
}

impl CausalTreeConfig {
    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.val_split > 0.0 && self.val_split < 1.0) {
            return Err(ConfigError::InvalidValSplit(self.val_split));
        }
        if !(0.0..=1.0).contains(&self.weight) {
            return Err(ConfigError::InvalidWeight(self.weight));
        }
        Ok(())
    }

    /// Minimum per-arm size required of validation children:
    /// `max(2, val_split * min_leaf_size)`.
    pub fn validation_min_size(&self) -> f64 {
        (self.val_split * self.min_leaf_size as f64).max(2.0)
    }
}

impl Default for CausalTreeConfig {
    fn default() -> Self {
        Self::builder().build().expect("default config is valid")
    }
}
