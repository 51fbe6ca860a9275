//! Ultimatoe: nine tic-tac-toe boards played as one.
//!
//! A move in cell `minor` of a sub-board sends the opponent to sub-board
//! `minor`. If that board is already decided, the opponent may play on any
//! undecided board. Winning three sub-boards in a line wins the game.
//!
//! Composite states are created on demand; only the 3x3 sub-boards come
//! from the precomputed [`BoardUniverse`].

use std::sync::Arc;

use rand::Rng;
use ultimatoe_core::{Children, Game, GameError, Player, Result};

use crate::notation::{indexes_to_move_string, string_to_indexes};
use crate::tictactoe::{nth_set_bit, set_bits};
use crate::universe::{BoardId, BoardUniverse, LINES};

/// Mask with every sub-board open.
const ALL_BOARDS: u16 = (1 << 9) - 1;

/// Grid cell of an empty, playable field in [`Ultimatoe::render`].
pub const PLAYABLE: char = '·';
/// Grid cell of an empty field that cannot be played right now.
pub const NON_PLAYABLE: char = ' ';
/// Separator between sub-boards.
pub const BORDER: char = '*';

/// An immutable Ultimatoe position.
///
/// Sub-boards are interned ids, so two positions with the same content
/// compare equal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct UltimatoeState {
    turn: u8,
    /// Bit `i` set iff the player to move may play on sub-board `i`.
    open: u16,
    winner: Option<Player>,
    boards: [BoardId; 9],
}

/// Ultimatoe rules over a shared board universe.
#[derive(Clone, Debug)]
pub struct Ultimatoe {
    universe: Arc<BoardUniverse>,
}

impl Ultimatoe {
    pub fn new(universe: Arc<BoardUniverse>) -> Self {
        Self { universe }
    }

    pub fn universe(&self) -> &BoardUniverse {
        &self.universe
    }

    /// Sub-boards the player to move may act in.
    pub fn open_mask(&self, state: &UltimatoeState) -> u16 {
        state.open
    }

    pub fn is_open(&self, state: &UltimatoeState, major: usize) -> bool {
        major < 9 && state.open & (1 << major) != 0
    }

    /// # Panics
    /// Panics if `major >= 9`, as do the other per-board accessors below.
    pub fn board(&self, state: &UltimatoeState, major: usize) -> BoardId {
        state.boards[major]
    }

    pub fn board_winner(&self, state: &UltimatoeState, major: usize) -> Option<Player> {
        self.universe.winner(state.boards[major])
    }

    /// Playable cells of a sub-board, ignoring whether the board is open.
    pub fn legal_mask(&self, state: &UltimatoeState, major: usize) -> u16 {
        self.universe.possibilities(state.boards[major])
    }

    /// # Panics
    /// Panics if `major >= 9` or `minor >= 9`.
    pub fn cell(&self, state: &UltimatoeState, major: usize, minor: usize) -> Option<Player> {
        self.universe.get(state.boards[major], minor)
    }

    /// Play cell `minor` of sub-board `major` for the player to move.
    pub fn play_indexes(
        &self,
        state: &UltimatoeState,
        major: usize,
        minor: usize,
    ) -> Result<UltimatoeState> {
        if !self.is_open(state, major) {
            return Err(GameError::IllegalMove(format!("sub-board {major} is not open")));
        }
        let old_board = state.boards[major];
        let new_board = self
            .universe
            .child(old_board, minor, self.player_on_turn(state))
            .ok_or_else(|| {
                GameError::IllegalMove(format!("cell {minor} of sub-board {major} is taken"))
            })?;

        let mut boards = state.boards;
        boards[major] = new_board;

        // The game was undecided before, so it can only be decided now if
        // this sub-board just got a winner.
        let winner = if self.universe.winner(old_board) == self.universe.winner(new_board) {
            None
        } else {
            self.compute_winner(&boards)
        };

        Ok(UltimatoeState {
            turn: state.turn + 1,
            open: self.compute_open(minor, &boards, winner),
            winner,
            boards,
        })
    }

    fn compute_open(
        &self,
        last_minor: usize,
        boards: &[BoardId; 9],
        winner: Option<Player>,
    ) -> u16 {
        if winner.is_some() {
            return 0;
        }
        if !self.universe.is_finished(boards[last_minor]) {
            return 1 << last_minor;
        }
        (0..9)
            .filter(|&i| !self.universe.is_finished(boards[i]))
            .fold(0, |mask, i| mask | 1 << i)
    }

    fn compute_winner(&self, boards: &[BoardId; 9]) -> Option<Player> {
        LINES.iter().find_map(|line| {
            let player = self.universe.winner(boards[line[0]])?;
            let same = |i: usize| self.universe.winner(boards[line[i]]) == Some(player);
            (same(1) && same(2)).then_some(player)
        })
    }

    /// Total number of legal moves.
    pub fn children_count(&self, state: &UltimatoeState) -> u32 {
        set_bits(state.open)
            .map(|i| self.legal_mask(state, i).count_ones())
            .sum()
    }

    fn play_random_on<R: Rng + ?Sized>(
        &self,
        state: &UltimatoeState,
        major: usize,
        rng: &mut R,
    ) -> Result<UltimatoeState> {
        let mask = self.legal_mask(state, major);
        let minor = nth_set_bit(mask, rng.gen_range(0..mask.count_ones()));
        self.play_indexes(state, major, minor)
    }

    /// The 11x11 text grid: marks, `·` for playable and ` ` for
    /// non-playable empty cells, `*` between sub-boards.
    pub fn render(&self, state: &UltimatoeState) -> String {
        let mut grid = [[BORDER; 11]; 11];
        for major in 0..9 {
            let (y1, x1) = (major / 3, major % 3);
            for minor in 0..9 {
                let (y0, x0) = (minor / 3, minor % 3);
                grid[4 * y1 + y0][4 * x1 + x0] = match self.cell(state, major, minor) {
                    Some(player) => player.to_char(),
                    None if self.is_open(state, major) => PLAYABLE,
                    None => NON_PLAYABLE,
                };
            }
        }
        grid.iter()
            .map(|row| row.iter().collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Default for Ultimatoe {
    fn default() -> Self {
        Self::new(Arc::new(BoardUniverse::build()))
    }
}

impl Game for Ultimatoe {
    type State = UltimatoeState;

    fn initial_state(&self) -> UltimatoeState {
        UltimatoeState {
            turn: 0,
            open: ALL_BOARDS,
            winner: None,
            boards: [self.universe.empty(); 9],
        }
    }

    fn turn(&self, state: &UltimatoeState) -> u32 {
        u32::from(state.turn)
    }

    fn winner(&self, state: &UltimatoeState) -> Option<Player> {
        state.winner
    }

    fn is_finished(&self, state: &UltimatoeState) -> bool {
        state.open == 0
    }

    fn children(&self, state: &UltimatoeState) -> Children<UltimatoeState> {
        let mut children = Children::with_capacity(self.children_count(state) as usize);
        for major in set_bits(state.open) {
            for minor in set_bits(self.legal_mask(state, major)) {
                if let (Ok(child), Ok(mv)) = (
                    self.play_indexes(state, major, minor),
                    indexes_to_move_string(major, minor),
                ) {
                    children.insert(child, mv);
                }
            }
        }
        children
    }

    fn successors(&self, state: &UltimatoeState) -> Vec<UltimatoeState> {
        set_bits(state.open)
            .flat_map(|major| {
                set_bits(self.legal_mask(state, major))
                    .filter_map(move |minor| self.play_indexes(state, major, minor).ok())
            })
            .collect()
    }

    fn play(&self, state: &UltimatoeState, mv: &str) -> Result<UltimatoeState> {
        if self.is_finished(state) {
            return Err(GameError::IllegalMove(format!("{mv}: game already finished")));
        }
        let (major, minor) = string_to_indexes(mv)?;
        self.play_indexes(state, major, minor)
    }

    /// Uniform over all legal moves, not over sub-boards: a board is picked
    /// with probability proportional to its number of legal cells.
    fn play_random<R: Rng + ?Sized>(
        &self,
        state: &UltimatoeState,
        rng: &mut R,
    ) -> Result<UltimatoeState> {
        if state.open.count_ones() == 1 {
            let major = state.open.trailing_zeros() as usize;
            return self.play_random_on(state, major, rng);
        }

        let total = self.children_count(state);
        if total == 0 {
            return Err(GameError::IllegalMove("game already finished".to_string()));
        }
        let mut remaining = rng.gen_range(0..total);
        for major in set_bits(state.open) {
            let mask = self.legal_mask(state, major);
            let count = mask.count_ones();
            if remaining < count {
                return self.play_indexes(state, major, nth_set_bit(mask, remaining));
            }
            remaining -= count;
        }
        Err(GameError::IllegalMove(format!("random index beyond {total} legal moves")))
    }
}
