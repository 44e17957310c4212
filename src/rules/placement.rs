//! Placement legality and move generation
//!
//! Border cells are always open. A cell `d` steps in from the border needs
//! at least `d` friendly stones in sight, so every advance toward the center
//! has to be supported by stones already on the board.

use crate::board::{Board, MoveError, Player, Pos};

use super::sight::friendly_sightings;

/// Check whether `player` may place a stone at `pos`.
///
/// Fails closed: off-board and occupied cells are never legal.
#[inline]
pub fn is_legal(board: &Board, pos: Pos, player: Player) -> bool {
    if !board.contains(pos) || !board.is_empty(pos) {
        return false;
    }
    let required = board.perimeter_distance(pos);
    required == 0 || friendly_sightings(board, pos, player) >= required
}

/// Like `is_legal`, but explains a rejection.
pub fn check_placement(board: &Board, pos: Pos, player: Player) -> Result<(), MoveError> {
    if !board.contains(pos) {
        return Err(MoveError::OutOfBounds {
            row: pos.row as i32,
            col: pos.col as i32,
            size: board.size(),
        });
    }
    if !board.is_empty(pos) {
        return Err(MoveError::Occupied(pos));
    }

    let required = board.perimeter_distance(pos);
    if required == 0 {
        return Ok(());
    }
    let visible = friendly_sightings(board, pos, player);
    if visible < required {
        return Err(MoveError::InsufficientSupport {
            pos,
            required,
            visible,
        });
    }
    Ok(())
}

/// All legal placements for `player`, in row-major order
pub fn legal_moves(board: &Board, player: Player) -> Vec<Pos> {
    board
        .empty_positions()
        .filter(|&pos| is_legal(board, pos, player))
        .collect()
}

/// Stable sort by Manhattan distance to `center`, closest first.
///
/// Only affects pruning efficiency: central moves tend to be strongest, so
/// trying them first gives tighter bounds sooner.
pub fn order_by_center_distance(moves: &mut [Pos], center: Pos) {
    moves.sort_by_key(|pos| pos.manhattan_distance(center));
}

/// Legal placements for `player`, center-first
pub fn ordered_legal_moves(board: &Board, player: Player) -> Vec<Pos> {
    let mut moves = legal_moves(board, player);
    order_by_center_distance(&mut moves, board.center());
    moves
}
