//! Move-choosing actors.

use rand::{Rng, RngCore};
use tracing::{debug, trace};
use ultimatoe_core::{Game, GameError, Result};

use crate::config::MonteCarloConfig;
use crate::evaluator::MonteCarloEvaluator;

/// Something that picks a move for the player on turn.
pub trait Actor<G: Game> {
    /// Choose a move in `state`, returned in the game's move notation.
    ///
    /// # Errors
    /// Returns `GameError::NoLegalMove` if the state is finished.
    fn select_move(&mut self, game: &G, state: &G::State) -> Result<String>;

    /// Short label for logs and match reports.
    fn name(&self) -> &str;
}

/// Actor backed by a fresh [`MonteCarloEvaluator`] per decision.
///
/// The actor owns its random generator for its whole life; every decision
/// draws a new evaluator seed from it.
#[derive(Clone, Debug)]
pub struct MonteCarloActor<R: Rng> {
    config: MonteCarloConfig,
    rng: R,
    name: String,
}

impl<R: Rng> MonteCarloActor<R> {
    pub fn new(config: MonteCarloConfig, rng: R) -> Self {
        let name = format!("monte-carlo({:?}, {})", config.policy, config.budget);
        Self { config, rng, name }
    }

    /// Replace the generated label.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn config(&self) -> &MonteCarloConfig {
        &self.config
    }
}

impl<G: Game, R: Rng> Actor<G> for MonteCarloActor<R> {
    fn select_move(&mut self, game: &G, state: &G::State) -> Result<String> {
        let children = game.children(state);
        if children.is_empty() {
            return Err(GameError::NoLegalMove);
        }

        let seed = RngCore::next_u64(&mut self.rng);
        let mut evaluator =
            MonteCarloEvaluator::new(game.clone(), state.clone(), self.config.policy, seed);
        evaluator.spend(self.config.budget)?;

        let child = match evaluator.best_child() {
            Some(child) => child.clone(),
            None => {
                trace!(budget = self.config.budget, "no evaluated child, playing randomly");
                game.play_random(state, &mut self.rng)?
            }
        };
        let mv = game.move_to(state, &child)?;

        debug!(
            actor = %self.name,
            budget = self.config.budget,
            policy = ?self.config.policy,
            children = children.len(),
            score = evaluator.score(),
            samples = evaluator.sample_count(),
            mv = %mv,
            "move selected"
        );
        Ok(mv)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Actor playing uniformly random legal moves.
#[derive(Clone, Debug)]
pub struct RandomActor<R: Rng> {
    rng: R,
}

impl<R: Rng> RandomActor<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<G: Game, R: Rng> Actor<G> for RandomActor<R> {
    fn select_move(&mut self, game: &G, state: &G::State) -> Result<String> {
        if game.is_finished(state) {
            return Err(GameError::NoLegalMove);
        }
        let child = game.play_random(state, &mut self.rng)?;
        game.move_to(state, &child)
    }

    fn name(&self) -> &str {
        "random"
    }
}
