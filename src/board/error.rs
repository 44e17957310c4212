use thiserror::Error;

use super::Pos;

/// Malformed board configuration. Raised at construction, before any search.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("board size must be odd, got {0}")]
    EvenSize(usize),
    #[error("board size must be at least {min}, got {size}")]
    TooSmall { size: usize, min: usize },
    #[error("board size must be at most {max}, got {size}")]
    TooLarge { size: usize, max: usize },
    #[error("invalid cell value {value:?} at index {index}")]
    InvalidCell { index: usize, value: String },
    #[error("row {row} has {len} cells, expected {expected}")]
    RaggedRow { row: usize, len: usize, expected: usize },
    #[error("expected {expected} cells, got {actual}")]
    WrongCellCount { expected: usize, actual: usize },
    #[error("unknown player {0:?}")]
    UnknownPlayer(String),
}

/// A placement the caller asked for that the rules reject.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MoveError {
    #[error("({row}, {col}) is outside a {size}x{size} board")]
    OutOfBounds { row: i32, col: i32, size: usize },
    #[error("{0} is already occupied")]
    Occupied(Pos),
    #[error("{pos} needs {required} friendly stones in sight, only {visible} visible")]
    InsufficientSupport {
        pos: Pos,
        required: usize,
        visible: usize,
    },
}
