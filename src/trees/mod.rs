//! Causal tree data structures.

pub mod node;
pub mod path;
pub mod tree;

pub use node::{CausalNode, NodeId, NodeKind, SplitRule};
pub use path::{Branch, NodePath};
pub use tree::{CausalTree, TreeValidationError};
