//! Evaluator node types for tree storage.
//!
//! Uses arena allocation with indices for cache locality and simpler memory management.

use rand_chacha::ChaCha8Rng;

/// Index into the node arena.
///
/// This is a lightweight handle that references a node in the tree.
/// Using indices instead of pointers avoids Rc/RefCell overhead.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// The root node is always at index 0.
    pub const ROOT: NodeId = NodeId(0);
}

/// Sampling statistics of one node, all from the first player's perspective.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeStats {
    /// Scores sampled directly at this node, seeded with the node's own score.
    pub own_sum: f64,
    pub own_count: u64,

    /// Copy of the best child's totals, replaced on every propagation.
    pub propagated_sum: f64,
    pub propagated_count: u64,
}

impl NodeStats {
    /// Stats of a fresh node: one sample, its own static score.
    pub fn new(score: f64) -> Self {
        Self {
            own_sum: score,
            own_count: 1,
            propagated_sum: 0.0,
            propagated_count: 0,
        }
    }

    pub fn sum(&self) -> f64 {
        self.own_sum + self.propagated_sum
    }

    pub fn count(&self) -> u64 {
        self.own_count + self.propagated_count
    }

    /// `(sum + weight) / count`. Never divides by zero since `own_count >= 1`.
    pub fn score(&self, weight: f64) -> f64 {
        (self.sum() + weight) / self.count() as f64
    }

    /// Fold in one playout result.
    pub fn record(&mut self, score: f64) {
        self.own_sum += score;
        self.own_count += 1;
    }

    /// Replace the propagated part with a child's totals.
    pub fn propagate_from(&mut self, child: &NodeStats) {
        self.propagated_sum = child.sum();
        self.propagated_count = child.count();
    }
}

/// A node in the evaluator tree.
#[derive(Clone, Debug)]
pub struct Node<S> {
    pub state: S,

    /// Private random stream, seeded by the parent.
    pub rng: ChaCha8Rng,

    pub stats: NodeStats,

    /// `None` until expanded; an expanded terminal node has no children.
    pub children: Option<Vec<NodeId>>,

    /// Best child found by the last propagation.
    pub best_child: Option<NodeId>,
}

impl<S> Node<S> {
    /// Create a new unexpanded node.
    pub fn new(state: S, score: f64, rng: ChaCha8Rng) -> Self {
        Self {
            state,
            rng,
            stats: NodeStats::new(score),
            children: None,
            best_child: None,
        }
    }

    pub fn is_expanded(&self) -> bool {
        self.children.is_some()
    }
}
