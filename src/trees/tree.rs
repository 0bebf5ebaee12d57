//! Fitted causal tree.
//!
//! Nodes live in an arena with the root at index 0. Internal nodes hold the
//! ids of their children, so every subtree is owned by exactly one parent.

use ndarray::{Array1, ArrayView1, ArrayView2};

use super::node::{CausalNode, NodeId, NodeKind};
use super::path::{Branch, NodePath};

/// Structural invariant violations reported by [`CausalTree::validate`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TreeValidationError {
    #[error("tree has no nodes")]
    Empty,

    #[error("node {node} references child {child} outside the arena")]
    ChildOutOfBounds { node: NodeId, child: NodeId },

    #[error("node {node} is reachable more than once")]
    SharedNode { node: NodeId },

    #[error("node {node} is not reachable from the root")]
    UnreachableNode { node: NodeId },

    #[error("node {node} has children but no split rule")]
    ChildrenWithoutSplit { node: NodeId },

    #[error("node {node} has a split rule but no children")]
    SplitWithoutChildren { node: NodeId },

    #[error("internal node {node} is marked as a leaf")]
    InternalMarkedLeaf { node: NodeId },

    #[error("leaf flag and ordinal disagree at node {node}")]
    LeafOrdinalMismatch { node: NodeId },

    #[error("node {node} has depth {got}, expected {expected}")]
    DepthMismatch { node: NodeId, expected: u16, got: u16 },

    #[error("leaf at node {node} has ordinal {got}, expected {expected} in pre-order")]
    LeafOrder { node: NodeId, expected: u32, got: u32 },

    #[error("tree reports {expected} leaves but {got} were found")]
    LeafCount { expected: u32, got: u32 },
}

/// An honest causal tree.
///
/// Besides the nodes, the tree keeps the state accumulated while growing:
/// leaf count, deepest depth reached, running objective sum, the observed
/// effect range and the honesty ratio `|estimation| / |train|`.
#[derive(Debug, Clone, PartialEq)]
pub struct CausalTree {
    pub(crate) nodes: Vec<CausalNode>,
    pub(crate) n_features: usize,
    pub(crate) n_leaves: u32,
    pub(crate) depth: u16,
    pub(crate) total_objective: f64,
    pub(crate) min_effect: f64,
    pub(crate) max_effect: f64,
    pub(crate) honesty_ratio: f64,
}

impl CausalTree {
    /// Root node id (always 0).
    #[inline]
    pub fn root(&self) -> NodeId {
        0
    }

    /// Get a node by id.
    ///
    /// # Panics
    ///
    /// Panics if `id` is out of bounds.
    #[inline]
    pub fn node(&self, id: NodeId) -> &CausalNode {
        &self.nodes[id as usize]
    }

    #[inline]
    pub fn root_node(&self) -> &CausalNode {
        self.node(self.root())
    }

    /// All nodes in creation order.
    #[inline]
    pub fn nodes(&self) -> &[CausalNode] {
        &self.nodes
    }

    #[inline]
    pub fn n_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Number of features the tree was fitted on.
    #[inline]
    pub fn n_features(&self) -> usize {
        self.n_features
    }

    /// Number of finalized leaves.
    #[inline]
    pub fn n_leaves(&self) -> u32 {
        self.n_leaves
    }

    /// Deepest node depth visited while growing.
    #[inline]
    pub fn depth(&self) -> u16 {
        self.depth
    }

    /// Running objective sum: root objective plus the objective change of
    /// every accepted split.
    #[inline]
    pub fn total_objective(&self) -> f64 {
        self.total_objective
    }

    /// `(min_effect, max_effect)` as tracked during growth.
    #[inline]
    pub fn effect_range(&self) -> (f64, f64) {
        (self.min_effect, self.max_effect)
    }

    /// `|estimation| / |train|` of the fitting partitions.
    #[inline]
    pub fn honesty_ratio(&self) -> f64 {
        self.honesty_ratio
    }

    /// Children `(true_branch, false_branch)` of a node.
    #[inline]
    pub fn children(&self, id: NodeId) -> Option<(NodeId, NodeId)> {
        self.node(id).children
    }

    /// Node ids with their paths, in pre-order (true branch before false).
    pub fn iter_preorder(&self) -> Vec<(NodeId, NodePath)> {
        let mut out = Vec::with_capacity(self.nodes.len());
        if self.nodes.is_empty() {
            return out;
        }
        let mut stack = vec![(self.root(), NodePath::root())];
        while let Some((id, path)) = stack.pop() {
            if let Some((tb, fb)) = self.children(id) {
                stack.push((fb, path.child(Branch::False)));
                stack.push((tb, path.child(Branch::True)));
            }
            out.push((id, path));
        }
        out
    }

    /// Path of a node from the root, or `None` if it is not reachable.
    pub fn path(&self, id: NodeId) -> Option<NodePath> {
        self.iter_preorder()
            .into_iter()
            .find_map(|(n, path)| (n == id).then_some(path))
    }

    /// Node at a path, or `None` if the path leaves the tree.
    pub fn node_at(&self, path: &NodePath) -> Option<NodeId> {
        let mut id = self.root();
        for branch in path.branches() {
            let (tb, fb) = self.children(id)?;
            id = match branch {
                Branch::True => tb,
                Branch::False => fb,
            };
        }
        Some(id)
    }

    /// Leaves ordered by leaf ordinal.
    pub fn leaves(&self) -> Vec<&CausalNode> {
        let mut leaves: Vec<&CausalNode> = self.nodes.iter().filter(|n| n.is_leaf).collect();
        leaves.sort_by_key(|n| n.leaf_num);
        leaves
    }

    /// Terminal node reached by a row, reading features through `value`.
    fn descend(&self, value: impl Fn(usize) -> f64) -> NodeId {
        let mut id = self.root();
        loop {
            let node = self.node(id);
            match (node.split, node.children) {
                (Some(rule), Some((tb, fb))) => {
                    id = if rule.goes_true(value(rule.feature)) { tb } else { fb };
                }
                _ => return id,
            }
        }
    }

    /// Terminal node id for one row.
    ///
    /// # Panics
    ///
    /// Panics if `row` is shorter than a feature index used by a split.
    pub fn apply_row(&self, row: &[f64]) -> NodeId {
        self.descend(|f| row[f])
    }

    /// Estimated treatment effect for one row.
    ///
    /// # Panics
    ///
    /// Panics if `row` is shorter than a feature index used by a split.
    pub fn predict_row(&self, row: &[f64]) -> f64 {
        self.node(self.apply_row(row)).effect
    }

    fn apply_view(&self, row: ArrayView1<'_, f64>) -> NodeId {
        self.descend(|f| row[f])
    }

    /// Terminal node id for every row of `features`.
    pub fn apply(&self, features: ArrayView2<'_, f64>) -> Vec<NodeId> {
        features.rows().into_iter().map(|row| self.apply_view(row)).collect()
    }

    /// Estimated treatment effect for every row of `features`.
    pub fn predict(&self, features: ArrayView2<'_, f64>) -> Array1<f64> {
        features
            .rows()
            .into_iter()
            .map(|row| self.node(self.apply_view(row)).effect)
            .collect()
    }

    /// Check the structural invariants of the tree.
    ///
    /// - every node is reachable exactly once from the root
    /// - internal nodes have a split rule, two children and no leaf ordinal
    /// - leaves have an ordinal; the leaf flag and ordinal agree
    /// - child depth is parent depth + 1, the root is at depth 0
    /// - leaf ordinals are `1..=n_leaves` in pre-order
    pub fn validate(&self) -> Result<(), TreeValidationError> {
        if self.nodes.is_empty() {
            return Err(TreeValidationError::Empty);
        }

        let n = self.nodes.len();
        let mut seen = vec![false; n];
        let mut next_leaf = 1u32;
        let mut stack: Vec<(NodeId, u16)> = vec![(self.root(), 0)];

        while let Some((id, expected_depth)) = stack.pop() {
            if seen[id as usize] {
                return Err(TreeValidationError::SharedNode { node: id });
            }
            seen[id as usize] = true;

            let node = self.node(id);
            if node.depth != expected_depth {
                return Err(TreeValidationError::DepthMismatch {
                    node: id,
                    expected: expected_depth,
                    got: node.depth,
                });
            }
            if node.is_leaf != node.leaf_num.is_some() {
                return Err(TreeValidationError::LeafOrdinalMismatch { node: id });
            }

            match node.kind() {
                NodeKind::Internal => {
                    if node.split.is_none() {
                        return Err(TreeValidationError::ChildrenWithoutSplit { node: id });
                    }
                    if node.is_leaf {
                        return Err(TreeValidationError::InternalMarkedLeaf { node: id });
                    }
                    let (tb, fb) = node.children.unwrap_or_default();
                    for child in [tb, fb] {
                        if child as usize >= n {
                            return Err(TreeValidationError::ChildOutOfBounds { node: id, child });
                        }
                    }
                    stack.push((fb, expected_depth + 1));
                    stack.push((tb, expected_depth + 1));
                }
                NodeKind::Leaf | NodeKind::Terminal => {
                    if node.split.is_some() {
                        return Err(TreeValidationError::SplitWithoutChildren { node: id });
                    }
                    if let Some(got) = node.leaf_num {
                        if got != next_leaf {
                            return Err(TreeValidationError::LeafOrder {
                                node: id,
                                expected: next_leaf,
                                got,
                            });
                        }
                        next_leaf += 1;
                    }
                }
            }
        }

        if let Some(node) = seen.iter().position(|s| !s) {
            return Err(TreeValidationError::UnreachableNode { node: node as NodeId });
        }
        if next_leaf - 1 != self.n_leaves {
            return Err(TreeValidationError::LeafCount {
                expected: self.n_leaves,
                got: next_leaf - 1,
            });
        }
        Ok(())
    }
}
