//! Fivedown: five in a row on a 15x8 board with gravity and energy.
//!
//! Pieces normally rest on the floor or on another piece. A player may
//! instead float a "balloon" over empty space by paying energy, and may
//! later drop their own floating piece to earn it back.

use rand::seq::SliceRandom;
use rand::Rng;
use ultimatoe_core::{Children, Game, GameError, Player, Result};

use crate::notation::{grid_to_move_string, string_to_grid};

pub const WIDTH: usize = 15;
pub const HEIGHT: usize = 8;

const WINNING_LENGTH: usize = 5;

/// Energy gained by a supported placement.
const NORMAL_GAIN: i32 = 1;
/// Energy paid for a placement over an empty cell.
const BALLOON_COST: i32 = 2;
/// Energy gained by dropping a floating piece.
const LANDING_GAIN: i32 = 3;

const DIRECTIONS: [(isize, isize); 4] = [(1, 0), (0, 1), (1, 1), (1, -1)];

/// An immutable Fivedown position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FivedownState {
    turn: u16,
    winner: Option<Player>,
    on_turn_energy: i32,
    other_energy: i32,
    /// One row per entry, two bits per cell: 0 empty, 1 X, 2 O. Row
    /// `HEIGHT - 1` is the floor.
    rows: [u32; HEIGHT],
}

impl FivedownState {
    fn get(&self, x: usize, y: usize) -> Option<Player> {
        match (self.rows[y] >> (2 * x)) & 3 {
            1 => Some(Player::X),
            2 => Some(Player::O),
            _ => None,
        }
    }

    fn set(&mut self, x: usize, y: usize, cell: Option<Player>) {
        let code = match cell {
            None => 0,
            Some(Player::X) => 1,
            Some(Player::O) => 2,
        };
        self.rows[y] = (self.rows[y] & !(3 << (2 * x))) | code << (2 * x);
    }

    fn is_empty(&self, x: usize, y: usize) -> bool {
        self.get(x, y).is_none()
    }

    /// Whether a piece at `(x, y)` would float, i.e. the cell below is empty.
    fn is_floating(&self, x: usize, y: usize) -> bool {
        y + 1 < HEIGHT && self.is_empty(x, y + 1)
    }

    /// Both piece codes have a single bit set.
    fn is_full(&self) -> bool {
        self.rows.iter().all(|row| row.count_ones() as usize == WIDTH)
    }

    /// Cells of `player` in a line through `(x, y)` along `(dx, dy)`,
    /// counting `(x, y)` itself.
    fn run_length(&self, player: Player, x: usize, y: usize, (dx, dy): (isize, isize)) -> usize {
        let walk = |sign: isize| {
            (1..)
                .map_while(|step| {
                    let x = x.checked_add_signed(sign * step * dx)?;
                    let y = y.checked_add_signed(sign * step * dy)?;
                    (x < WIDTH && y < HEIGHT && self.get(x, y) == Some(player)).then_some(())
                })
                .count()
        };
        1 + walk(1) + walk(-1)
    }
}

/// Fivedown rules. Stateless; every table lives in the state.
#[derive(Clone, Copy, Debug, Default)]
pub struct Fivedown;

impl Fivedown {
    pub fn new() -> Self {
        Self
    }

    /// Piece at `(x, y)`, `None` for an empty or off-board cell.
    pub fn get(&self, state: &FivedownState, x: usize, y: usize) -> Option<Player> {
        if x >= WIDTH || y >= HEIGHT {
            return None;
        }
        state.get(x, y)
    }

    pub fn energy(&self, state: &FivedownState, player: Player) -> i32 {
        if player == self.player_on_turn(state) {
            state.on_turn_energy
        } else {
            state.other_energy
        }
    }

    /// Whether the player to move may click `(x, y)`.
    pub fn is_playable(&self, state: &FivedownState, x: usize, y: usize) -> bool {
        if x >= WIDTH || y >= HEIGHT || self.is_finished(state) {
            return false;
        }
        match state.get(x, y) {
            None => !state.is_floating(x, y) || state.on_turn_energy >= BALLOON_COST,
            Some(owner) => owner == self.player_on_turn(state) && state.is_floating(x, y),
        }
    }

    /// Click `(x, y)`: place a piece on an empty cell or drop an own
    /// floating piece.
    pub fn play_at(&self, state: &FivedownState, x: usize, y: usize) -> Result<FivedownState> {
        if self.is_finished(state) {
            return Err(GameError::IllegalMove("game already finished".to_string()));
        }
        if !self.is_playable(state, x, y) {
            return Err(GameError::IllegalMove(format!("cell x {x}, y {y} is not playable")));
        }

        let player = self.player_on_turn(state);
        let mut next = *state;
        let (rest_y, gain) = if state.is_empty(x, y) {
            next.set(x, y, Some(player));
            let gain = if state.is_floating(x, y) {
                -BALLOON_COST
            } else {
                NORMAL_GAIN
            };
            (y, gain)
        } else {
            next.set(x, y, None);
            let mut rest_y = y;
            while next.is_floating(x, rest_y) {
                rest_y += 1;
            }
            next.set(x, rest_y, Some(player));
            (rest_y, LANDING_GAIN)
        };

        let won = DIRECTIONS
            .iter()
            .any(|&dir| next.run_length(player, x, rest_y, dir) >= WINNING_LENGTH);
        next.winner = won.then_some(player);
        next.turn = state.turn + 1;
        next.on_turn_energy = state.other_energy;
        next.other_energy = state.on_turn_energy + gain;
        Ok(next)
    }

    fn playable_cells(&self, state: &FivedownState) -> Vec<(usize, usize)> {
        (0..HEIGHT)
            .flat_map(|y| (0..WIDTH).map(move |x| (x, y)))
            .filter(|&(x, y)| self.is_playable(state, x, y))
            .collect()
    }

    /// One line per row, top first. `X`/`O` are clickable pieces, `x`/`o`
    /// fixed ones, `·` a clickable empty cell and ` ` an unavailable one.
    pub fn render(&self, state: &FivedownState) -> String {
        (0..HEIGHT)
            .map(|y| {
                (0..WIDTH)
                    .map(|x| {
                        let playable = self.is_playable(state, x, y);
                        match (state.get(x, y), playable) {
                            (Some(player), true) => player.to_char(),
                            (Some(player), false) => player.to_char().to_ascii_lowercase(),
                            (None, true) => '·',
                            (None, false) => ' ',
                        }
                    })
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Game for Fivedown {
    type State = FivedownState;

    fn initial_state(&self) -> FivedownState {
        FivedownState {
            turn: 0,
            winner: None,
            on_turn_energy: 0,
            other_energy: 5,
            rows: [0; HEIGHT],
        }
    }

    fn turn(&self, state: &FivedownState) -> u32 {
        u32::from(state.turn)
    }

    fn winner(&self, state: &FivedownState) -> Option<Player> {
        state.winner
    }

    fn is_finished(&self, state: &FivedownState) -> bool {
        state.winner.is_some() || state.is_full()
    }

    fn children(&self, state: &FivedownState) -> Children<FivedownState> {
        let mut children = Children::new();
        for (x, y) in self.playable_cells(state) {
            if let (Ok(child), Ok(mv)) = (self.play_at(state, x, y), grid_to_move_string(x, y)) {
                children.insert(child, mv);
            }
        }
        children
    }

    fn successors(&self, state: &FivedownState) -> Vec<FivedownState> {
        self.playable_cells(state)
            .into_iter()
            .filter_map(|(x, y)| self.play_at(state, x, y).ok())
            .collect()
    }

    fn play(&self, state: &FivedownState, mv: &str) -> Result<FivedownState> {
        let (x, y) = string_to_grid(mv)?;
        self.play_at(state, x, y)
    }

    fn play_random<R: Rng + ?Sized>(
        &self,
        state: &FivedownState,
        rng: &mut R,
    ) -> Result<FivedownState> {
        let cells = self.playable_cells(state);
        let &(x, y) = cells
            .choose(rng)
            .ok_or_else(|| GameError::IllegalMove("game already finished".to_string()))?;
        self.play_at(state, x, y)
    }
}
