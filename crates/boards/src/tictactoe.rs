//! Plain tic-tac-toe on top of the board universe.
//!
//! A state is just a [`BoardId`]; applying a move is a child-table lookup.

use std::sync::Arc;

use rand::Rng;
use ultimatoe_core::{Children, Game, GameError, Player, Result};

use crate::notation::{cell_to_move_string, string_to_cell};
use crate::universe::{BoardId, BoardUniverse, AREA};

/// Tic-tac-toe rules over a shared, precomputed board universe.
#[derive(Clone, Debug)]
pub struct Tictactoe {
    universe: Arc<BoardUniverse>,
}

impl Tictactoe {
    pub fn new(universe: Arc<BoardUniverse>) -> Self {
        Self { universe }
    }

    pub fn universe(&self) -> &BoardUniverse {
        &self.universe
    }

    /// Legal-move bitmask, bit `i` for cell `i`.
    pub fn possibilities(&self, state: &BoardId) -> u16 {
        self.universe.possibilities(*state)
    }

    /// Whether cell `i` is empty on an undecided board.
    pub fn is_playable(&self, state: &BoardId, cell: usize) -> bool {
        self.universe.is_playable(*state, cell)
    }

    pub fn get(&self, state: &BoardId, cell: usize) -> Option<Player> {
        self.universe.get(*state, cell)
    }

    /// Apply a move by cell index.
    pub fn play_cell(&self, state: &BoardId, cell: usize) -> Result<BoardId> {
        let player = self.player_on_turn(state);
        self.universe
            .child(*state, cell, player)
            .ok_or_else(|| GameError::IllegalMove(format!("cell {cell} is not playable")))
    }

    /// Three lines of `X`, `O` and `.`.
    pub fn render(&self, state: &BoardId) -> String {
        let node = self.universe.node(*state);
        node.cells()
            .chunks(3)
            .map(|row| {
                row.iter()
                    .map(|cell| cell.map_or('.', Player::to_char))
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Default for Tictactoe {
    fn default() -> Self {
        Self::new(Arc::new(BoardUniverse::build()))
    }
}

impl Game for Tictactoe {
    type State = BoardId;

    fn initial_state(&self) -> BoardId {
        self.universe.empty()
    }

    fn turn(&self, state: &BoardId) -> u32 {
        u32::from(self.universe.node(*state).turn())
    }

    fn winner(&self, state: &BoardId) -> Option<Player> {
        self.universe.winner(*state)
    }

    fn is_finished(&self, state: &BoardId) -> bool {
        self.universe.is_finished(*state)
    }

    fn children(&self, state: &BoardId) -> Children<BoardId> {
        let player = self.player_on_turn(state);
        let mut children = Children::with_capacity(AREA);
        for cell in set_bits(self.possibilities(state)) {
            if let (Some(child), Ok(mv)) = (
                self.universe.child(*state, cell, player),
                cell_to_move_string(cell),
            ) {
                children.insert(child, mv);
            }
        }
        children
    }

    fn successors(&self, state: &BoardId) -> Vec<BoardId> {
        let player = self.player_on_turn(state);
        set_bits(self.possibilities(state))
            .filter_map(|cell| self.universe.child(*state, cell, player))
            .collect()
    }

    fn play(&self, state: &BoardId, mv: &str) -> Result<BoardId> {
        if self.is_finished(state) {
            return Err(GameError::IllegalMove(format!("{mv}: game already finished")));
        }
        self.play_cell(state, string_to_cell(mv)?)
    }

    fn play_random<R: Rng + ?Sized>(&self, state: &BoardId, rng: &mut R) -> Result<BoardId> {
        let possibilities = self.possibilities(state);
        if possibilities == 0 {
            return Err(GameError::IllegalMove("game already finished".to_string()));
        }
        let cell = nth_set_bit(possibilities, rng.gen_range(0..possibilities.count_ones()));
        self.play_cell(state, cell)
    }
}

/// Indexes of the set bits of a 9-bit mask, lowest first.
pub(crate) fn set_bits(mask: u16) -> impl Iterator<Item = usize> {
    (0..AREA).filter(move |i| mask & (1 << i) != 0)
}

/// Index of the `n`-th (zero-based) set bit of `mask`.
pub(crate) fn nth_set_bit(mask: u16, n: u32) -> usize {
    let mut mask = mask;
    for _ in 0..n {
        mask &= mask - 1;
    }
    mask.trailing_zeros() as usize
}
