//! Round-robin matches between actors.

use std::fmt;

use serde::Serialize;
use tracing::info;
use ultimatoe_core::{Game, GameError, Player, Result};

use crate::actor::Actor;

/// Running results of one actor, from that actor's perspective.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ActorStats {
    pub games: u32,
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
    /// Sum of the actor's scores, each in [-1, 1].
    pub score_sum: f64,
}

impl ActorStats {
    pub fn record(&mut self, score: f64) {
        self.games += 1;
        self.score_sum += score;
        if score >= 1.0 {
            self.wins += 1;
        } else if score <= -1.0 {
            self.losses += 1;
        } else {
            self.draws += 1;
        }
    }

    /// Mean score as a percentage, 0 before any game.
    pub fn percentage(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            100.0 * self.score_sum / f64::from(self.games)
        }
    }
}

impl fmt::Display for ActorStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Score: {:+.1}% (games: {}, w: {}, l: {}, d: {})",
            self.percentage(),
            self.games,
            self.wins,
            self.losses,
            self.draws
        )
    }
}

/// A match between two or more actors on one game.
///
/// Every round, each ordered pair of distinct actors plays one game, so every
/// pairing is played with both actors starting.
pub struct GameMatch<G: Game> {
    game: G,
    actors: Vec<Box<dyn Actor<G>>>,
    always_start: Option<bool>,
    stats: Vec<ActorStats>,
}

impl<G: Game> GameMatch<G> {
    /// # Errors
    /// Returns `GameError::NotEnoughActors` with fewer than two actors.
    pub fn new(game: G, actors: Vec<Box<dyn Actor<G>>>) -> Result<Self> {
        if actors.len() < 2 {
            return Err(GameError::NotEnoughActors(actors.len()));
        }
        let stats = vec![ActorStats::default(); actors.len()];
        Ok(Self {
            game,
            actors,
            always_start: None,
            stats,
        })
    }

    /// Restrict pairings around actor 0: `Some(true)` plays only the games
    /// actor 0 starts, `Some(false)` skips the games where actor 0 would move
    /// second.
    pub fn with_always_start(mut self, always_start: Option<bool>) -> Self {
        self.always_start = always_start;
        self
    }

    pub fn stats(&self) -> &[ActorStats] {
        &self.stats
    }

    pub fn actor_name(&self, index: usize) -> &str {
        self.actors[index].name()
    }

    /// Play one game and return its score from the first mover's perspective.
    ///
    /// # Errors
    /// Propagates actor errors and illegal moves returned by an actor.
    pub fn play_once(&mut self, first: usize, second: usize) -> Result<f64> {
        let mut state = self.game.initial_state();
        while !self.game.is_finished(&state) {
            let index = match self.game.player_on_turn(&state) {
                Player::X => first,
                Player::O => second,
            };
            let mv = self.actors[index].select_move(&self.game, &state)?;
            state = self.game.play(&state, &mv)?;
        }
        Ok(self.game.score(&state))
    }

    /// Play `rounds` rounds, updating the stats after every game.
    pub fn run_rounds(&mut self, rounds: usize) -> Result<()> {
        for round in 0..rounds {
            for (first, second) in self.pairings() {
                let score = self.play_once(first, second)?;
                self.stats[first].record(score);
                self.stats[second].record(-score);
            }
            info!(
                round,
                actor = self.actors[0].name(),
                stats = %self.stats[0],
                "match round finished"
            );
        }
        Ok(())
    }

    fn pairings(&self) -> Vec<(usize, usize)> {
        let n = self.actors.len();
        (0..n)
            .flat_map(|first| (0..n).map(move |second| (first, second)))
            .filter(|&(first, second)| first != second)
            .filter(|&(first, second)| match self.always_start {
                Some(true) => first == 0,
                Some(false) => second != 0,
                None => true,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::RandomActor;
    use crate::config::MonteCarloConfig;
    use crate::MonteCarloActor;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use ultimatoe_boards::Tictactoe;

    fn random(seed: u64) -> Box<dyn Actor<Tictactoe>> {
        Box::new(RandomActor::new(ChaCha8Rng::seed_from_u64(seed)))
    }

    #[test]
    fn test_needs_two_actors() {
        let result = GameMatch::new(Tictactoe::default(), vec![random(0)]);
        assert!(matches!(result, Err(GameError::NotEnoughActors(1))));
    }

    #[test]
    fn test_stats_record() {
        let mut stats = ActorStats::default();
        for score in [1.0, -1.0, 0.0, 1.0] {
            stats.record(score);
        }
        assert_eq!((stats.games, stats.wins, stats.losses, stats.draws), (4, 2, 1, 1));
        assert_eq!(stats.to_string(), "Score: +25.0% (games: 4, w: 2, l: 1, d: 1)");
    }

    #[test]
    fn test_empty_stats_display() {
        assert_eq!(
            ActorStats::default().to_string(),
            "Score: +0.0% (games: 0, w: 0, l: 0, d: 0)"
        );
    }

    #[test]
    fn test_every_game_is_accounted_for() {
        let mut game_match =
            GameMatch::new(Tictactoe::default(), vec![random(1), random(2), random(3)]).unwrap();
        game_match.run_rounds(4).unwrap();

        // Six ordered pairings per round, each actor in four of them
        for stats in game_match.stats() {
            assert_eq!(stats.games, 16);
            assert_eq!(stats.wins + stats.losses + stats.draws, stats.games);
        }
        let total: f64 = game_match.stats().iter().map(|s| s.score_sum).sum();
        assert!(total.abs() < 1e-9);
        let wins: u32 = game_match.stats().iter().map(|s| s.wins).sum();
        let losses: u32 = game_match.stats().iter().map(|s| s.losses).sum();
        assert_eq!(wins, losses);
    }

    #[test]
    fn test_always_start_restricts_pairings() {
        let actors = || vec![random(1), random(2), random(3)];

        let only_first = GameMatch::new(Tictactoe::default(), actors())
            .unwrap()
            .with_always_start(Some(true));
        assert_eq!(only_first.pairings(), vec![(0, 1), (0, 2)]);

        let never_second = GameMatch::new(Tictactoe::default(), actors())
            .unwrap()
            .with_always_start(Some(false));
        assert_eq!(never_second.pairings(), vec![(0, 1), (0, 2), (1, 2), (2, 1)]);
    }

    #[test]
    fn test_play_once_alternates_actors() {
        let mc: Box<dyn Actor<Tictactoe>> = Box::new(MonteCarloActor::new(
            MonteCarloConfig::with_budget(100),
            ChaCha8Rng::seed_from_u64(9),
        ));
        let mut game_match = GameMatch::new(Tictactoe::default(), vec![mc, random(4)]).unwrap();

        let score = game_match.play_once(0, 1).unwrap();
        assert!(score == -1.0 || score == 0.0 || score == 1.0);
        assert_eq!(game_match.actor_name(1), "random");
    }
}
