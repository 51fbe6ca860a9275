//! Arena-allocated evaluator tree.
//!
//! Using a Vec<Node> with indices provides better cache locality
//! and simpler ownership compared to Rc<RefCell<Node>>.

use crate::node::{Node, NodeId};

/// Arena-allocated evaluator tree.
///
/// Nodes are stored in a contiguous vector and referenced by index. The
/// tree lives for one move decision and is dropped as a whole.
#[derive(Debug)]
pub struct Tree<S> {
    nodes: Vec<Node<S>>,
}

impl<S> Tree<S> {
    /// Create a tree holding only `root`.
    pub fn new(root: Node<S>) -> Self {
        Self { nodes: vec![root] }
    }

    /// Get a reference to a node by ID.
    ///
    /// # Panics
    /// Panics if the NodeId is invalid.
    pub fn get(&self, id: NodeId) -> &Node<S> {
        &self.nodes[id.0]
    }

    /// Get a mutable reference to a node by ID.
    ///
    /// # Panics
    /// Panics if the NodeId is invalid.
    pub fn get_mut(&mut self, id: NodeId) -> &mut Node<S> {
        &mut self.nodes[id.0]
    }

    /// Add a new node to the tree, returning its ID.
    pub fn add(&mut self, node: Node<S>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    /// Number of materialized nodes, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn root(&self) -> &Node<S> {
        self.get(NodeId::ROOT)
    }
}
