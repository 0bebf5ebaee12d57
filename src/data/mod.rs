//! Data containers and row partitioning.
//!
//! - [`CausalDataset`]: features, outcomes and treatment assignment
//! - [`HonestPartitions`]: disjoint train / validation / estimation row sets
//! - [`train_test_split`]: seeded shuffled row split

mod dataset;
mod split;

pub use dataset::{CausalDataset, DatasetError, RowIdx};
pub use split::{HonestPartitions, train_test_split};
