//! Board representation for the center game

pub mod board;
pub mod error;

#[cfg(test)]
mod tests;

use std::fmt;
use std::str::FromStr;

// Re-exports
pub use board::Board;
pub use error::{BoardError, MoveError};

/// Smallest playable board (a single ring around the center)
pub const MIN_BOARD_SIZE: usize = 3;
/// Largest board addressable by `Pos`
pub const MAX_BOARD_SIZE: usize = u8::MAX as usize;

/// The two sides. Black moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    Black,
    White,
}

impl Player {
    /// Get opponent color
    #[inline]
    pub fn opponent(self) -> Player {
        match self {
            Player::Black => Player::White,
            Player::White => Player::Black,
        }
    }

    /// Single-character symbol used by the text board format
    #[inline]
    pub fn symbol(self) -> char {
        match self {
            Player::Black => 'B',
            Player::White => 'W',
        }
    }

    /// Numeric cell value used by `Board::from_values` (1 = Black, 2 = White)
    #[inline]
    pub fn value(self) -> u8 {
        match self {
            Player::Black => 1,
            Player::White => 2,
        }
    }

    /// Inverse of `value`
    #[inline]
    pub fn from_value(value: u8) -> Option<Player> {
        [Player::Black, Player::White]
            .into_iter()
            .find(|p| p.value() == value)
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::Black => write!(f, "Black"),
            Player::White => write!(f, "White"),
        }
    }
}

impl FromStr for Player {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "b" | "black" | "1" => Ok(Player::Black),
            "w" | "white" | "2" => Ok(Player::White),
            other => Err(BoardError::UnknownPlayer(other.to_string())),
        }
    }
}

/// Position on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pos {
    pub row: u8,
    pub col: u8,
}

impl Pos {
    #[inline]
    pub fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// Manhattan distance between two positions
    #[inline]
    pub fn manhattan_distance(self, other: Pos) -> usize {
        self.row.abs_diff(other.row) as usize + self.col.abs_diff(other.col) as usize
    }

    /// Step `distance` cells along `(dr, dc)`, or `None` when the result
    /// leaves a board of the given size.
    #[inline]
    pub fn offset(self, dr: i32, dc: i32, distance: i32, size: usize) -> Option<Pos> {
        let r = self.row as i32 + dr * distance;
        let c = self.col as i32 + dc * distance;
        if Self::is_valid(r, c, size) {
            Some(Pos::new(r as u8, c as u8))
        } else {
            None
        }
    }

    #[inline]
    pub fn is_valid(row: i32, col: i32, size: usize) -> bool {
        let size = size as i32;
        row >= 0 && row < size && col >= 0 && col < size
    }
}

impl PartialOrd for Pos {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pos {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.row, self.col).cmp(&(other.row, other.col))
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
