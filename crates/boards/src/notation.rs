//! Move-string codecs.
//!
//! - Tic-tac-toe: one digit `0`-`8`, left to right then top to bottom.
//! - Ultimatoe: two digits `"<y><x>"` over the 9x9 grid of cells, where
//!   `major = 3*(y/3) + x/3` picks the sub-board and `minor = 3*(y%3) + x%3`
//!   the cell inside it.
//! - Fivedown: `"<row><col>"` with one base-36 digit each.

use ultimatoe_core::{GameError, Result};

/// Convert a sub-board and cell index into a two-digit Ultimatoe move.
pub fn indexes_to_move_string(major: usize, minor: usize) -> Result<String> {
    if major >= 9 || minor >= 9 {
        return Err(GameError::IllegalMove(format!(
            "indexes out of range: major {major}, minor {minor}"
        )));
    }
    let x = 3 * (major % 3) + minor % 3;
    let y = 3 * (major / 3) + minor / 3;
    coordinates_to_move_string(x, y)
}

/// Convert grid coordinates (column `x`, row `y`, both 0-8) into a move.
pub fn coordinates_to_move_string(x: usize, y: usize) -> Result<String> {
    if x >= 9 || y >= 9 {
        return Err(GameError::IllegalMove(format!(
            "coordinates out of range: x {x}, y {y}"
        )));
    }
    Ok(format!("{y}{x}"))
}

/// Sub-board index of a two-digit Ultimatoe move.
pub fn string_to_major_index(mv: &str) -> Result<usize> {
    let (x, y) = parse_coordinates(mv)?;
    Ok(3 * (y / 3) + x / 3)
}

/// Cell index, within its sub-board, of a two-digit Ultimatoe move.
pub fn string_to_minor_index(mv: &str) -> Result<usize> {
    let (x, y) = parse_coordinates(mv)?;
    Ok(3 * (y % 3) + x % 3)
}

/// Both indexes of a two-digit Ultimatoe move, as `(major, minor)`.
pub fn string_to_indexes(mv: &str) -> Result<(usize, usize)> {
    Ok((string_to_major_index(mv)?, string_to_minor_index(mv)?))
}

fn parse_coordinates(mv: &str) -> Result<(usize, usize)> {
    let malformed = || GameError::IllegalMove(format!("malformed move {mv:?}"));
    let bytes = mv.as_bytes();
    if bytes.len() != 2 {
        return Err(malformed());
    }
    let y = digit(bytes[0], 9).ok_or_else(malformed)?;
    let x = digit(bytes[1], 9).ok_or_else(malformed)?;
    Ok((x, y))
}

/// Single-digit tic-tac-toe move.
pub fn cell_to_move_string(cell: usize) -> Result<String> {
    if cell >= 9 {
        return Err(GameError::IllegalMove(format!("cell out of range: {cell}")));
    }
    Ok(cell.to_string())
}

pub fn string_to_cell(mv: &str) -> Result<usize> {
    match mv.as_bytes() {
        [b] => digit(*b, 9).ok_or_else(|| GameError::IllegalMove(format!("malformed move {mv:?}"))),
        _ => Err(GameError::IllegalMove(format!("malformed move {mv:?}"))),
    }
}

/// Two base-36 digits, row first.
pub fn grid_to_move_string(x: usize, y: usize) -> Result<String> {
    let (Some(row), Some(col)) = (to_base36(y), to_base36(x)) else {
        return Err(GameError::IllegalMove(format!(
            "coordinates out of range: x {x}, y {y}"
        )));
    };
    Ok(format!("{row}{col}"))
}

/// Parse a base-36 `"<row><col>"` move into `(x, y)`.
pub fn string_to_grid(mv: &str) -> Result<(usize, usize)> {
    let malformed = || GameError::IllegalMove(format!("malformed move {mv:?}"));
    match mv.as_bytes() {
        [row, col] => {
            let y = digit(*row, 36).ok_or_else(malformed)?;
            let x = digit(*col, 36).ok_or_else(malformed)?;
            Ok((x, y))
        }
        _ => Err(malformed()),
    }
}

fn to_base36(value: usize) -> Option<char> {
    char::from_digit(u32::try_from(value).ok()?, 36).map(|c| c.to_ascii_uppercase())
}

fn digit(byte: u8, radix: u32) -> Option<usize> {
    // Only upper-case letters are produced, so only those are accepted
    if byte.is_ascii_lowercase() {
        return None;
    }
    (byte as char).to_digit(radix).map(|d| d as usize)
}
