//! Heuristic evaluation function for center-game positions
//!
//! This module provides the static evaluation for the minimax search. It is
//! only called at leaves that are not decided (center still empty) and where
//! the depth budget ran out.

use crate::board::{Board, Player};
use crate::rules::is_legal;

use super::weights::{Score, ScoreWeights};

/// Weighted mobility of `player`: the sum of `ScoreWeights::cell` over its
/// legal placements, plus the center bonus when the center is among them.
#[must_use]
pub fn mobility(board: &Board, player: Player) -> Score {
    let size = board.size();
    board
        .empty_positions()
        .filter(|&pos| is_legal(board, pos, player))
        .map(|pos| {
            let weight = ScoreWeights::cell(size, board.center_distance(pos));
            if board.is_center(pos) {
                weight + ScoreWeights::center_bonus(size)
            } else {
                weight
            }
        })
        .sum()
}

/// Evaluate the board from the perspective of `player`.
///
/// Returns `mobility(player) - 1.5 * mobility(opponent)`.
///
/// Not antisymmetric: `evaluate(b, Black)` is not `-evaluate(b, White)`,
/// since each side weighs the opponent's options heavier than its own. The
/// search only ever compares scores from one fixed perspective.
#[must_use]
pub fn evaluate(board: &Board, player: Player) -> Score {
    mobility(board, player) - ScoreWeights::OPPONENT_MOBILITY * mobility(board, player.opponent())
}
