//! Structural node identifiers: the branch decisions from the root.

use std::fmt;

/// One branch decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Branch {
    /// Rows satisfying the split predicate.
    True,
    /// Rows failing the split predicate.
    False,
}

/// Path of branch decisions from the root to a node.
///
/// Stable across fits of the same tree shape, rendered as `root.T.F`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodePath(Vec<Branch>);

impl NodePath {
    /// The root path.
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Path of a child taking `branch`.
    pub fn child(&self, branch: Branch) -> Self {
        let mut steps = self.0.clone();
        steps.push(branch);
        Self(steps)
    }

    pub fn branches(&self) -> &[Branch] {
        &self.0
    }

    /// Number of decisions, equal to the node's depth.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.is_root()
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("root")?;
        for branch in &self.0 {
            match branch {
                Branch::True => f.write_str(".T")?,
                Branch::False => f.write_str(".F")?,
            }
        }
        Ok(())
    }
}
