//! Honest causal tree training.
//!
//! - [`HonestTreeTrainer`]: fits a [`CausalTree`](crate::trees::CausalTree)
//! - [`CausalTreeConfig`]: validated fit parameters
//! - [`HonestSplitter`]: per-node split search
//! - [`HonestGrower`]: recursive growth with tree-wide [`GrowthState`]
//! - [`TrainingLogger`]: structured logging with verbosity levels
//!
//! ## Objective
//!
//! Candidate splits are scored with [`evaluate_summaries`], which trades the
//! in-sample effect magnitude on train rows against disagreement with the
//! validation rows, minus an honesty variance penalty
//! ([`root_variance_penalty`], [`child_variance_penalty`]).

mod grower;
mod honesty;
mod logger;
mod objective;
mod params;
mod split;
mod trainer;

pub use grower::{GrowthState, HonestGrower};
pub use honesty::{child_variance_penalty, root_variance_penalty};
pub use logger::{TrainingLogger, Verbosity};
pub use objective::{ObjectiveValue, evaluate, evaluate_summaries};
pub use params::{CausalTreeConfig, CausalTreeConfigBuilder, ConfigError, SplitSearch};
pub use split::{HonestSplitter, SplitInfo};
pub use trainer::HonestTreeTrainer;
