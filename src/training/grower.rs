//! Recursive honest tree growth.
//!
//! Nodes are grown depth-first in pre-order (true branch before false). The
//! tree-wide counters live in one [`GrowthState`] threaded through the
//! recursion; the call stack is bounded by the configured maximum depth.
//!
//! At each node, in order:
//! 1. any empty partition ends growth without numbering a leaf
//! 2. the tree's maximum depth seen is updated with the node depth
//! 3. if that maximum equals the configured depth limit, the node becomes a leaf
//! 4. otherwise the best split is searched; with a positive gain two children
//!    are created and grown, else the node becomes a leaf

use crate::data::{CausalDataset, HonestPartitions};
use crate::trees::{Branch, CausalNode, CausalTree, NodeId, NodePath, SplitRule};

use super::logger::{TrainingLogger, Verbosity};
use super::split::HonestSplitter;

// =============================================================================
// GrowthState
// =============================================================================

/// Tree-wide state accumulated while growing.
#[derive(Debug, Clone, PartialEq)]
pub struct GrowthState {
    /// Leaves finalized so far; the last assigned ordinal.
    pub n_leaves: u32,
    /// Maximum node depth visited.
    pub depth: u16,
    /// Root objective plus the objective change of each accepted split.
    pub total_objective: f64,
    pub min_effect: f64,
    pub max_effect: f64,
}

impl GrowthState {
    pub fn new(root_objective: f64) -> Self {
        Self {
            n_leaves: 0,
            depth: 0,
            total_objective: root_objective,
            min_effect: 0.0,
            max_effect: 0.0,
        }
    }

    /// Next leaf ordinal (1-based).
    #[inline]
    pub fn next_leaf(&mut self) -> u32 {
        self.n_leaves += 1;
        self.n_leaves
    }

    /// Update the effect range: a new maximum wins; only otherwise can the
    /// minimum move.
    #[inline]
    pub fn record_effect(&mut self, effect: f64) {
        if effect > self.max_effect {
            self.max_effect = effect;
        } else if effect < self.min_effect {
            self.min_effect = effect;
        }
    }
}

// =============================================================================
// HonestGrower
// =============================================================================

/// Grows one causal tree over a dataset.
pub struct HonestGrower<'a> {
    dataset: &'a CausalDataset,
    splitter: HonestSplitter,
    max_depth: u16,
    logger: &'a TrainingLogger,
    nodes: Vec<CausalNode>,
    state: GrowthState,
}

impl<'a> HonestGrower<'a> {
    pub fn new(
        dataset: &'a CausalDataset,
        splitter: HonestSplitter,
        max_depth: u16,
        logger: &'a TrainingLogger,
    ) -> Self {
        Self {
            dataset,
            splitter,
            max_depth,
            logger,
            nodes: Vec::new(),
            state: GrowthState::new(0.0),
        }
    }

    /// Grow the tree below `root` over the given partitions.
    pub fn grow(mut self, root: CausalNode, parts: HonestPartitions) -> CausalTree {
        self.state = GrowthState::new(root.objective);
        self.nodes.push(root);
        self.grow_node(0, parts, NodePath::root());

        CausalTree {
            nodes: self.nodes,
            n_features: self.dataset.n_features(),
            n_leaves: self.state.n_leaves,
            depth: self.state.depth,
            total_objective: self.state.total_objective,
            min_effect: self.state.min_effect,
            max_effect: self.state.max_effect,
            honesty_ratio: self.splitter.honesty_ratio,
        }
    }

    fn finalize_leaf(&mut self, id: NodeId) {
        let leaf_num = self.state.next_leaf();
        self.nodes[id as usize].finalize_leaf(leaf_num);
    }

    fn grow_node(&mut self, id: NodeId, parts: HonestPartitions, path: NodePath) {
        if parts.any_empty() {
            return;
        }

        let (depth, objective, effect) = {
            let node = &self.nodes[id as usize];
            (node.depth, node.objective, node.effect)
        };

        self.state.depth = self.state.depth.max(depth);
        if self.max_depth == self.state.depth {
            self.finalize_leaf(id);
            return;
        }

        let Some(split) = self.splitter.find_split(self.dataset, &parts, objective) else {
            self.state.record_effect(effect);
            self.finalize_leaf(id);
            return;
        };

        let (true_parts, false_parts) = parts.divide(self.dataset, split.feature, split.threshold);
        drop(parts);

        let true_est = self.dataset.summarize(&true_parts.estimation);
        let false_est = self.dataset.summarize(&false_parts.estimation);

        self.state.total_objective += -objective + split.true_objective + split.false_objective;

        let true_child = CausalNode::new(
            true_est.effect(),
            true_est.p_value(),
            split.true_objective,
            split.true_variance,
            depth + 1,
        );
        let false_child = CausalNode::new(
            false_est.effect(),
            false_est.p_value(),
            split.false_objective,
            split.false_variance,
            depth + 1,
        );

        let true_id = self.nodes.len() as NodeId;
        let false_id = true_id + 1;
        self.nodes.push(true_child);
        self.nodes.push(false_child);

        let node = &mut self.nodes[id as usize];
        node.split = Some(SplitRule::new(split.feature, split.threshold));
        node.children = Some((true_id, false_id));

        if self.logger.enabled(Verbosity::Debug) {
            self.logger
                .log_split(&path.to_string(), split.feature, split.threshold, split.gain);
        }

        self.grow_node(true_id, true_parts, path.child(Branch::True));
        self.grow_node(false_id, false_parts, path.child(Branch::False));

        self.state.record_effect(effect);
    }
}
