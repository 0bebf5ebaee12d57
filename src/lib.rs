//! causal-tree: honest causal decision trees for Rust.
//!
//! Estimates heterogeneous treatment effects by recursively splitting a
//! population on its features so that subgroups differ in their average
//! causal effect. Training is honest: split selection uses train and
//! validation rows, while the effects reported on nodes come from a disjoint
//! estimation partition.
//!
//! # Key Types
//!
//! - [`CausalDataset`] - Features, outcomes and 0/1 treatment assignment
//! - [`CausalTreeConfig`] - Configuration builder
//! - [`HonestTreeTrainer`] - Fits a [`CausalTree`]
//! - [`CausalTree`] - Fitted tree with prediction and structural validation
//!
//! # Training
//!
//! Use `CausalTreeConfig::builder()` to configure, then
//! [`HonestTreeTrainer::fit`]. See the [`training`] module for details.
//!
//! # Statistics
//!
//! The [`stats`] module exposes the effect, variance, p-value and arm size
//! computations used by the trainer as free functions over outcome and
//! treatment vectors.

// Re-export approx traits for users who want to compare effects
pub use approx;

pub mod data;
pub mod stats;
pub mod testing;
pub mod training;
pub mod trees;

// =============================================================================
// Convenience Re-exports
// =============================================================================

pub use data::{CausalDataset, DatasetError};
pub use training::{CausalTreeConfig, ConfigError, HonestTreeTrainer, SplitSearch, Verbosity};
pub use trees::{CausalNode, CausalTree, NodeId, NodePath};
