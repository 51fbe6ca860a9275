//! Budgeted Monte-Carlo evaluation of a game state.
//!
//! The evaluator grows a tree below one state. Spending budget at a node
//! either runs a single random playout (budget 1 on an unexpanded node) or
//! expands the node and hands the budget to its children according to an
//! [`AllocationPolicy`]. After spending, every node copies the totals of its
//! best child, so a node's score follows the principal line found so far
//! on top of its own playouts.

use rand::seq::SliceRandom;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use ultimatoe_core::{Game, Result};

use crate::node::{Node, NodeId, NodeStats};
use crate::policy::AllocationPolicy;
use crate::tree::Tree;

/// Bonus added to a child's sum when ranking it for allocation. Divided by
/// the sample count, it favours children with few samples.
pub const UNCERTAINTY_WEIGHT: f64 = 1.0;

/// Monte-Carlo evaluator rooted at one state.
///
/// Generic over:
/// - `G`: The game being played
pub struct MonteCarloEvaluator<G: Game> {
    game: G,
    policy: AllocationPolicy,
    tree: Tree<G::State>,
}

impl<G: Game> MonteCarloEvaluator<G> {
    /// Create an evaluator for `state`. All randomness derives from `seed`.
    pub fn new(game: G, state: G::State, policy: AllocationPolicy, seed: u64) -> Self {
        let score = game.score(&state);
        let root = Node::new(state, score, ChaCha8Rng::seed_from_u64(seed));
        Self {
            game,
            policy,
            tree: Tree::new(root),
        }
    }

    /// Spend `budget` sampling units below the root.
    ///
    /// Can be called repeatedly; each call refines the existing tree.
    ///
    /// # Errors
    /// Only propagates rule errors raised by the game during playouts.
    pub fn spend(&mut self, budget: u32) -> Result<&mut Self> {
        self.spend_node(NodeId::ROOT, budget)?;
        Ok(self)
    }

    /// The child state judged best for the player to move, if the root has
    /// been expanded and is not terminal.
    pub fn best_child(&self) -> Option<&G::State> {
        self.tree
            .root()
            .best_child
            .map(|id| &self.tree.get(id).state)
    }

    /// Root score from the first player's perspective, in [-1, 1].
    pub fn score(&self) -> f64 {
        self.tree.root().stats.score(0.0)
    }

    /// Samples behind [`score`](Self::score): own samples plus those of the
    /// propagated line.
    pub fn sample_count(&self) -> u64 {
        self.tree.root().stats.count()
    }

    pub fn is_expanded(&self) -> bool {
        self.tree.root().is_expanded()
    }

    /// Number of nodes materialized so far, root included.
    pub fn node_count(&self) -> usize {
        self.tree.len()
    }

    /// Root children in their shuffled order, with score and sample count.
    pub fn child_stats(&self) -> Vec<(&G::State, f64, u64)> {
        self.tree
            .root()
            .children
            .iter()
            .flatten()
            .map(|&id| {
                let child = self.tree.get(id);
                (&child.state, child.stats.score(0.0), child.stats.count())
            })
            .collect()
    }

    fn spend_node(&mut self, id: NodeId, budget: u32) -> Result<()> {
        if budget == 0 {
            return Ok(());
        }
        if !self.tree.get(id).is_expanded() {
            if budget == 1 {
                return self.sample(id);
            }
            self.expand(id);
        }

        let children = self.tree.get(id).children.clone().unwrap_or_default();
        if children.is_empty() {
            return Ok(());
        }
        self.distribute(id, &children, budget)?;
        self.propagate(id, &children);
        Ok(())
    }

    /// Run one random playout from the node's state.
    fn sample(&mut self, id: NodeId) -> Result<()> {
        let node = self.tree.get_mut(id);
        let mut state = node.state.clone();
        while !self.game.is_finished(&state) {
            state = self.game.play_random(&state, &mut node.rng)?;
        }
        node.stats.record(self.game.score(&state));
        Ok(())
    }

    fn expand(&mut self, id: NodeId) {
        let node = self.tree.get_mut(id);
        let successors = self.game.successors(&node.state);
        let seeds: Vec<u64> = successors.iter().map(|_| node.rng.next_u64()).collect();

        let mut children: Vec<NodeId> = successors
            .into_iter()
            .zip(seeds)
            .map(|(state, seed)| {
                let score = self.game.score(&state);
                self.tree
                    .add(Node::new(state, score, ChaCha8Rng::seed_from_u64(seed)))
            })
            .collect();

        let node = self.tree.get_mut(id);
        children.shuffle(&mut node.rng);
        node.children = Some(children);
    }

    fn distribute(&mut self, id: NodeId, children: &[NodeId], budget: u32) -> Result<()> {
        let sign = self.mover_sign(id);
        let mut remaining = budget;
        let mut round = 0;
        while remaining > 0 {
            let keys: Vec<f64> = children
                .iter()
                .map(|&child| ranking_key(&self.tree.get(child).stats, sign))
                .collect();
            let allocation = self.policy.plan(round, &keys, remaining);
            for &index in &allocation.indices {
                if remaining == 0 {
                    break;
                }
                let units = allocation.units.min(remaining);
                self.spend_node(children[index], units)?;
                remaining -= units;
            }
            round += 1;
        }
        Ok(())
    }

    /// Copy the best child's totals into the node.
    fn propagate(&mut self, id: NodeId, children: &[NodeId]) {
        let sign = self.mover_sign(id);
        let mut best = children[0];
        let mut best_score = sign * self.tree.get(best).stats.score(0.0);
        for &child in &children[1..] {
            let score = sign * self.tree.get(child).stats.score(0.0);
            if score > best_score {
                best = child;
                best_score = score;
            }
        }

        let best_stats = self.tree.get(best).stats.clone();
        let node = self.tree.get_mut(id);
        node.stats.propagate_from(&best_stats);
        node.best_child = Some(best);
    }

    fn mover_sign(&self, id: NodeId) -> f64 {
        self.game.player_on_turn(&self.tree.get(id).state).sign()
    }
}

/// Score of a child as seen by the player choosing among the children,
/// plus the uncertainty bonus.
fn ranking_key(stats: &NodeStats, sign: f64) -> f64 {
    (sign * stats.sum() + UNCERTAINTY_WEIGHT) / stats.count() as f64
}
