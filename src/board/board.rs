//! Board structure with stone tracking

use std::fmt;

use super::error::BoardError;
use super::{Player, Pos, MAX_BOARD_SIZE, MIN_BOARD_SIZE};

/// Game board: an odd-sized square grid of empty cells and stones.
///
/// The size is fixed for the board's lifetime. Search code works on private
/// clones; the live game board is only touched by the game driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    size: usize,
    cells: Vec<Option<Player>>,
    /// Occupied cell count, kept in sync by `place_stone`/`remove_stone`
    stones: usize,
}

impl Board {
    /// Create an empty board.
    ///
    /// Fails for even sizes and sizes outside `MIN_BOARD_SIZE..=MAX_BOARD_SIZE`.
    pub fn new(size: usize) -> Result<Self, BoardError> {
        Self::validate_size(size)?;
        Ok(Self {
            size,
            cells: vec![None; size * size],
            stones: 0,
        })
    }

    /// Check a board size without building a board
    pub fn validate_size(size: usize) -> Result<(), BoardError> {
        if size < MIN_BOARD_SIZE {
            return Err(BoardError::TooSmall {
                size,
                min: MIN_BOARD_SIZE,
            });
        }
        if size > MAX_BOARD_SIZE {
            return Err(BoardError::TooLarge {
                size,
                max: MAX_BOARD_SIZE,
            });
        }
        if size % 2 == 0 {
            return Err(BoardError::EvenSize(size));
        }
        Ok(())
    }

    /// Parse a board from text rows.
    ///
    /// `.`, `_`, `-` and `0` are empty; `B`, `X` and `1` are Black; `W`, `O`
    /// and `2` are White (case-insensitive). Whitespace inside a row is
    /// ignored, so `"B . W"` and `"B.W"` are the same row.
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self, BoardError> {
        let size = rows.len();
        let mut board = Self::new(size)?;

        for (r, row) in rows.iter().enumerate() {
            let cells: Vec<char> = row
                .as_ref()
                .chars()
                .filter(|c| !c.is_whitespace())
                .collect();
            if cells.len() != size {
                return Err(BoardError::RaggedRow {
                    row: r,
                    len: cells.len(),
                    expected: size,
                });
            }
            for (c, ch) in cells.into_iter().enumerate() {
                let stone = match ch.to_ascii_uppercase() {
                    '.' | '_' | '-' | '0' => None,
                    'B' | 'X' | '1' => Some(Player::Black),
                    'W' | 'O' | '2' => Some(Player::White),
                    other => {
                        return Err(BoardError::InvalidCell {
                            index: r * size + c,
                            value: other.to_string(),
                        })
                    }
                };
                if let Some(player) = stone {
                    board.place_stone(Pos::new(r as u8, c as u8), player);
                }
            }
        }

        Ok(board)
    }

    /// Build a board from row-major cell values: 0 empty, 1 Black, 2 White.
    pub fn from_values(size: usize, values: &[u8]) -> Result<Self, BoardError> {
        let mut board = Self::new(size)?;
        if values.len() != size * size {
            return Err(BoardError::WrongCellCount {
                expected: size * size,
                actual: values.len(),
            });
        }

        for (idx, &value) in values.iter().enumerate() {
            if value == 0 {
                continue;
            }
            let Some(player) = Player::from_value(value) else {
                return Err(BoardError::InvalidCell {
                    index: idx,
                    value: value.to_string(),
                });
            };
            let pos = board.pos_from_index(idx);
            board.place_stone(pos, player);
        }

        Ok(board)
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// The winning cell, `(size / 2, size / 2)`
    #[inline]
    pub fn center(&self) -> Pos {
        let mid = (self.size / 2) as u8;
        Pos::new(mid, mid)
    }

    #[inline]
    pub fn is_center(&self, pos: Pos) -> bool {
        pos == self.center()
    }

    /// Check that `pos` lies on this board
    #[inline]
    pub fn contains(&self, pos: Pos) -> bool {
        (pos.row as usize) < self.size && (pos.col as usize) < self.size
    }

    #[inline]
    fn index(&self, pos: Pos) -> usize {
        debug_assert!(self.contains(pos));
        pos.row as usize * self.size + pos.col as usize
    }

    #[inline]
    fn pos_from_index(&self, idx: usize) -> Pos {
        Pos::new((idx / self.size) as u8, (idx % self.size) as u8)
    }

    /// Get the stone at position, `None` for an empty cell
    #[inline]
    pub fn get(&self, pos: Pos) -> Option<Player> {
        self.cells[self.index(pos)]
    }

    /// Check if position is empty
    #[inline]
    pub fn is_empty(&self, pos: Pos) -> bool {
        self.get(pos).is_none()
    }

    /// Place a stone without any legality check.
    /// Use `rules::check_placement` first for game moves.
    #[inline]
    pub fn place_stone(&mut self, pos: Pos, player: Player) {
        let idx = self.index(pos);
        debug_assert!(self.cells[idx].is_none(), "{pos} is already occupied");
        if self.cells[idx].is_none() {
            self.stones += 1;
        }
        self.cells[idx] = Some(player);
    }

    /// Remove a stone
    #[inline]
    pub fn remove_stone(&mut self, pos: Pos) {
        let idx = self.index(pos);
        if self.cells[idx].take().is_some() {
            self.stones -= 1;
        }
    }

    /// Copy of this board with one more stone
    #[must_use]
    pub fn with_stone(&self, pos: Pos, player: Player) -> Board {
        let mut next = self.clone();
        next.place_stone(pos, player);
        next
    }

    /// Copy of this board with `line` played out, colors alternating from
    /// `first`. Cells that are already occupied are skipped.
    #[must_use]
    pub fn with_line(&self, line: &[Pos], first: Player) -> Board {
        let mut next = self.clone();
        let mut player = first;
        for &pos in line {
            if next.contains(pos) && next.is_empty(pos) {
                next.place_stone(pos, player);
            }
            player = player.opponent();
        }
        next
    }

    /// Who holds the center, if anyone. A held center ends the game.
    #[inline]
    pub fn center_occupant(&self) -> Option<Player> {
        self.get(self.center())
    }

    /// Total stones on board
    #[inline]
    pub fn stone_count(&self) -> usize {
        self.stones
    }

    /// Number of empty cells
    #[inline]
    pub fn empty_count(&self) -> usize {
        self.cells.len() - self.stones
    }

    /// Distance to the nearest edge: `min(row, N-1-row, col, N-1-col)`.
    /// Border cells are 0, the center is `N / 2`.
    #[inline]
    pub fn perimeter_distance(&self, pos: Pos) -> usize {
        let last = self.size - 1;
        let row = pos.row as usize;
        let col = pos.col as usize;
        row.min(last - row).min(col).min(last - col)
    }

    /// Manhattan distance to the center
    #[inline]
    pub fn center_distance(&self, pos: Pos) -> usize {
        pos.manhattan_distance(self.center())
    }

    /// All positions in row-major order
    pub fn positions(&self) -> impl Iterator<Item = Pos> + '_ {
        (0..self.cells.len()).map(move |idx| self.pos_from_index(idx))
    }

    /// Empty positions in row-major order
    pub fn empty_positions(&self) -> impl Iterator<Item = Pos> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_none())
            .map(move |(idx, _)| self.pos_from_index(idx))
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, cell) in self.cells.iter().enumerate() {
            let ch = cell.map_or('.', Player::symbol);
            if idx % self.size == self.size - 1 {
                writeln!(f, "{ch}")?;
            } else {
                write!(f, "{ch} ")?;
            }
        }
        Ok(())
    }
}
