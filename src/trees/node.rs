//! Causal tree node types.

/// Index of a node in a tree's node arena.
pub type NodeId = u32;

/// Split predicate of an internal node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplitRule {
    /// Feature index to split on.
    pub feature: usize,
    /// Threshold value (true branch if `x[feature] <= threshold`).
    pub threshold: f64,
}

impl SplitRule {
    pub fn new(feature: usize, threshold: f64) -> Self {
        Self { feature, threshold }
    }

    /// Whether a feature value takes the true branch.
    ///
    /// NaN never satisfies the predicate and goes to the false branch.
    #[inline]
    pub fn goes_true(&self, value: f64) -> bool {
        value <= self.threshold
    }
}

/// Structural role of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Split node with two children.
    Internal,
    /// Finalized leaf with an ordinal.
    Leaf,
    /// Growth stopped because a partition reaching it was empty; neither a
    /// split nor a numbered leaf.
    Terminal,
}

/// One vertex of a causal tree.
///
/// Effects, p-values and arm means come from the estimation partition;
/// objective and variance come from the train/validation partitions.
#[derive(Debug, Clone, PartialEq)]
pub struct CausalNode {
    /// Split predicate (internal nodes only).
    pub split: Option<SplitRule>,
    /// `(true_branch, false_branch)` child ids (internal nodes only).
    pub children: Option<(NodeId, NodeId)>,
    /// Estimated average treatment effect.
    pub effect: f64,
    /// Two-sided p-value of `effect`.
    pub p_value: f64,
    /// Objective score at this node.
    pub objective: f64,
    /// Honesty variance penalty at this node.
    pub variance: f64,
    /// Depth (root is 0).
    pub depth: u16,
    /// Mean control outcome (root only).
    pub control_mean: Option<f64>,
    /// Mean treated outcome (root only).
    pub treatment_mean: Option<f64>,
    /// Whether the node was finalized as a leaf.
    pub is_leaf: bool,
    /// 1-based leaf ordinal in finalization order (leaves only).
    pub leaf_num: Option<u32>,
}

impl CausalNode {
    /// A fresh, unsplit node.
    pub fn new(effect: f64, p_value: f64, objective: f64, variance: f64, depth: u16) -> Self {
        Self {
            split: None,
            children: None,
            effect,
            p_value,
            objective,
            variance,
            depth,
            control_mean: None,
            treatment_mean: None,
            is_leaf: false,
            leaf_num: None,
        }
    }

    pub fn kind(&self) -> NodeKind {
        if self.children.is_some() {
            NodeKind::Internal
        } else if self.is_leaf {
            NodeKind::Leaf
        } else {
            NodeKind::Terminal
        }
    }

    #[inline]
    pub fn is_internal(&self) -> bool {
        self.children.is_some()
    }

    /// Mark as the `leaf_num`-th finalized leaf.
    pub(crate) fn finalize_leaf(&mut self, leaf_num: u32) {
        self.is_leaf = true;
        self.leaf_num = Some(leaf_num);
    }
}
