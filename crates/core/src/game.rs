use std::fmt::Debug;
use std::hash::Hash;

use rand::Rng;

use crate::{Children, GameError, Player, Result};

/// A perfect-information, alternating-turn, two-player game.
///
/// The implementing type is the rules object: it owns whatever read-only
/// tables the rules need (e.g. a precomputed board universe) and is passed
/// alongside every state. States themselves are immutable values; every
/// state other than the initial one is produced by applying one legal move.
///
/// Equal positions must compare equal, so that callers can treat identical
/// configurations as the same node.
pub trait Game: Clone + Send + Sync {
    /// An immutable game state
    type State: Clone + Eq + Hash + Debug + Send;

    /// Returns the initial game state
    fn initial_state(&self) -> Self::State;

    /// Number of moves already played
    fn turn(&self, state: &Self::State) -> u32;

    /// The player to move. Meaningless once the game has finished.
    fn player_on_turn(&self, state: &Self::State) -> Player {
        Player::on_turn(self.turn(state))
    }

    /// The winner, or `None` while undecided or after a draw
    fn winner(&self, state: &Self::State) -> Option<Player>;

    /// Score for the first player, in [-1, 1]. Rules only, no heuristics.
    fn score(&self, state: &Self::State) -> f64 {
        Player::score_of(self.winner(state))
    }

    /// Returns true if the game has ended
    fn is_finished(&self, state: &Self::State) -> bool;

    /// All directly reachable states with the moves producing them.
    /// Empty exactly when the game has finished.
    fn children(&self, state: &Self::State) -> Children<Self::State>;

    /// Child states without their move strings.
    fn successors(&self, state: &Self::State) -> Vec<Self::State> {
        self.children(state).into_states()
    }

    /// Applies a move given as a string, returning a new state.
    ///
    /// # Errors
    /// Returns `GameError::IllegalMove` if the game has finished or the move
    /// is malformed or not among `children(state)`.
    fn play(&self, state: &Self::State, mv: &str) -> Result<Self::State>;

    /// Applies a legal move chosen uniformly at random.
    ///
    /// # Errors
    /// Returns `GameError::IllegalMove` if the game has finished.
    fn play_random<R: Rng + ?Sized>(&self, state: &Self::State, rng: &mut R)
        -> Result<Self::State>;

    /// Move string leading from `parent` to `child`.
    ///
    /// # Errors
    /// Returns `GameError::NotAChild` if `child` is not reachable in one move.
    fn move_to(&self, parent: &Self::State, child: &Self::State) -> Result<String> {
        self.children(parent)
            .move_for(child)
            .map(str::to_string)
            .ok_or_else(|| GameError::NotAChild(format!("{child:?}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Race to 3: players alternately add 1 or 2; whoever reaches 3 wins.
    #[derive(Clone)]
    struct RaceToThree;

    impl Game for RaceToThree {
        type State = (u8, u32);

        fn initial_state(&self) -> Self::State {
            (0, 0)
        }

        fn turn(&self, state: &Self::State) -> u32 {
            state.1
        }

        fn winner(&self, state: &Self::State) -> Option<Player> {
            if state.0 >= 3 {
                // The player who just moved reached 3
                Some(Player::on_turn(state.1).opposite())
            } else {
                None
            }
        }

        fn is_finished(&self, state: &Self::State) -> bool {
            state.0 >= 3
        }

        fn children(&self, state: &Self::State) -> Children<Self::State> {
            if self.is_finished(state) {
                return Children::new();
            }
            (1..=2u8)
                .filter(|step| state.0 + step <= 3)
                .map(|step| ((state.0 + step, state.1 + 1), step.to_string()))
                .collect()
        }

        fn play(&self, state: &Self::State, mv: &str) -> Result<Self::State> {
            self.children(state)
                .state_for(mv)
                .copied()
                .ok_or_else(|| GameError::IllegalMove(mv.to_string()))
        }

        fn play_random<R: Rng + ?Sized>(
            &self,
            state: &Self::State,
            rng: &mut R,
        ) -> Result<Self::State> {
            let children = self.successors(state);
            if children.is_empty() {
                return Err(GameError::IllegalMove("game already finished".to_string()));
            }
            Ok(children[rng.gen_range(0..children.len())])
        }
    }

    #[test]
    fn test_default_score_follows_winner() {
        let game = RaceToThree;
        let state = game.play(&game.initial_state(), "2").unwrap();
        let state = game.play(&state, "1").unwrap();

        assert!(game.is_finished(&state));
        assert_eq!(game.winner(&state), Some(Player::O));
        assert_eq!(game.score(&state), -1.0);
    }

    #[test]
    fn test_default_player_on_turn() {
        let game = RaceToThree;
        let state = game.initial_state();
        assert_eq!(game.player_on_turn(&state), Player::X);

        let state = game.play(&state, "1").unwrap();
        assert_eq!(game.player_on_turn(&state), Player::O);
    }

    #[test]
    fn test_move_to() {
        let game = RaceToThree;
        let root = game.initial_state();

        assert_eq!(game.move_to(&root, &(2, 1)).unwrap(), "2");
        assert!(matches!(
            game.move_to(&root, &(3, 1)),
            Err(GameError::NotAChild(_))
        ));
    }

    #[test]
    fn test_successors_match_children() {
        let game = RaceToThree;
        let root = game.initial_state();
        let children = game.children(&root);
        let successors = game.successors(&root);

        assert_eq!(successors.len(), children.len());
        for state in &successors {
            assert!(children.move_for(state).is_some());
        }
    }
}
