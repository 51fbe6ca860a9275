//! Ultimatoe Boards - board games on a memoized 3x3 board universe
//!
//! Every reachable tic-tac-toe board is built once into a [`BoardUniverse`]
//! arena, so playing a move on a sub-board is a table lookup. Games share the
//! universe behind an `Arc`.
//!
//! # Games
//!
//! - [`Tictactoe`] - A single 3x3 board
//! - [`Ultimatoe`] - Nine boards, each move choosing the opponent's next board
//! - [`Fivedown`] - Five in a row on a 15x8 board with gravity and energy

mod fivedown;
mod notation;
mod tictactoe;
mod ultimatoe;
mod universe;

pub use fivedown::{Fivedown, FivedownState, HEIGHT, WIDTH};
pub use notation::{
    cell_to_move_string, coordinates_to_move_string, grid_to_move_string,
    indexes_to_move_string, string_to_cell, string_to_grid, string_to_indexes,
    string_to_major_index, string_to_minor_index,
};
pub use tictactoe::Tictactoe;
pub use ultimatoe::{Ultimatoe, UltimatoeState, BORDER, NON_PLAYABLE, PLAYABLE};
pub use universe::{compute_winner, BoardId, BoardNode, BoardUniverse, AREA, LINES};
