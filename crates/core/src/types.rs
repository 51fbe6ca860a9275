//! The two players of an alternating-turn game.
//!
//! "Nobody" (an empty cell, no winner yet, a drawn game) is always spelled
//! `Option<Player>` rather than a third variant, so every use site has to
//! match it explicitly.

use std::fmt;

/// One side of a two-player game. `X` always moves first.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum Player {
    X,
    O,
}

impl Player {
    /// Both players in turn order.
    pub const ALL: [Player; 2] = [Player::X, Player::O];

    /// Get the opposing player.
    pub fn opposite(self) -> Self {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// Slot of this player in per-player tables (0 for `X`, 1 for `O`).
    pub fn index(self) -> usize {
        match self {
            Player::X => 0,
            Player::O => 1,
        }
    }

    /// The player to move after `turn` moves have been played.
    pub fn on_turn(turn: u32) -> Self {
        if turn % 2 == 0 {
            Player::X
        } else {
            Player::O
        }
    }

    /// Score of a finished game from the first player's perspective.
    ///
    /// - `+1.0` when `X` won
    /// - `-1.0` when `O` won
    /// - `0.0` otherwise
    pub fn score_of(winner: Option<Player>) -> f64 {
        match winner {
            Some(Player::X) => 1.0,
            Some(Player::O) => -1.0,
            None => 0.0,
        }
    }

    /// `+1.0` for `X`, `-1.0` for `O`: turns a first-player score into
    /// this player's perspective.
    pub fn sign(self) -> f64 {
        Player::score_of(Some(self))
    }

    pub fn to_char(self) -> char {
        match self {
            Player::X => 'X',
            Player::O => 'O',
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}
