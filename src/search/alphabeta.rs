//! Alpha-Beta search at a fixed depth
//!
//! This module implements the core minimax search for the center-game AI.
//! Scores are always expressed from the root player's side: `WIN` means the
//! root player takes the center, `LOSS` means the opponent does, whoever is
//! to move at the node. That is why `root_player` stays fixed through the
//! recursion while the side to move alternates.
//!
//! # Features
//!
//! - Center-first move ordering for earlier cutoffs
//! - Winning moves resolved without recursing
//! - Principal variation collected on the way back up
//! - Deadline and cancellation polled at every node and before every sibling
//!
//! # Example
//!
//! ```
//! use std::time::{Duration, Instant};
//! use center::board::{Board, Player, Pos};
//! use center::search::{CancelToken, Searcher};
//!
//! let mut board = Board::new(3).unwrap();
//! board.place_stone(Pos::new(0, 0), Player::Black);
//!
//! let deadline = Instant::now() + Duration::from_secs(5);
//! let searcher = Searcher::new(Player::Black, deadline, CancelToken::new());
//! let result = searcher.search_root(&board, 2);
//! assert_eq!(result.best_move, Some(Pos::new(1, 1)));
//! ```

use std::time::Instant;

use crate::board::{Board, Player, Pos};
use crate::eval::{evaluate, Score, ScoreWeights};
use crate::rules::ordered_legal_moves;

use super::CancelToken;

/// Result of searching one node.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    /// Best score found from the root player's side
    pub score: Score,
    /// Nodes expanded under this one, leaves count as one
    pub nodes: u64,
    /// Deadline hit before the node finished
    pub time_exceeded: bool,
    /// Session cancelled before the node finished
    pub cancelled: bool,
    /// Best line from this node on, side to move first
    pub principal_variation: Vec<Pos>,
}

impl SearchOutcome {
    #[inline]
    fn leaf(score: Score) -> Self {
        Self {
            score,
            nodes: 1,
            time_exceeded: false,
            cancelled: false,
            principal_variation: Vec::new(),
        }
    }

    #[inline]
    fn stopped(cancelled: bool) -> Self {
        Self {
            score: ScoreWeights::DRAW,
            nodes: 0,
            time_exceeded: !cancelled,
            cancelled,
            principal_variation: Vec::new(),
        }
    }

    /// Whether the search was cut short and the score is unreliable
    #[inline]
    pub fn is_interrupted(&self) -> bool {
        self.time_exceeded || self.cancelled
    }
}

/// Result of searching the root at one depth.
#[derive(Debug, Clone, PartialEq)]
pub struct RootResult {
    /// Best move found, `None` if interrupted before any move finished or
    /// if there are no legal moves
    pub best_move: Option<Pos>,
    /// Score of `best_move`
    pub score: Score,
    /// Depth this result was searched to
    pub depth: usize,
    /// Total nodes searched
    pub nodes: u64,
    pub time_exceeded: bool,
    pub cancelled: bool,
    /// Every root move was proven to lose at this depth
    pub all_moves_lose: bool,
    /// Best line, starting with `best_move`
    pub principal_variation: Vec<Pos>,
}

impl RootResult {
    /// Whether every root move was searched to the full depth
    #[inline]
    pub fn is_complete(&self) -> bool {
        !self.time_exceeded && !self.cancelled
    }

    #[inline]
    pub fn is_forced_win(&self) -> bool {
        self.score == ScoreWeights::WIN
    }
}

/// Fixed-depth alpha-beta searcher for one root player.
///
/// Holds no per-search state beyond its parameters, so the same searcher can
/// be reused for several depths and searches are reproducible.
#[derive(Debug, Clone)]
pub struct Searcher {
    root_player: Player,
    deadline: Instant,
    cancel: CancelToken,
}

impl Searcher {
    pub fn new(root_player: Player, deadline: Instant, cancel: CancelToken) -> Self {
        Self {
            root_player,
            deadline,
            cancel,
        }
    }

    #[inline]
    fn out_of_time(&self) -> bool {
        Instant::now() >= self.deadline
    }

    /// Score for the side at `maximizing` taking the center
    #[inline]
    fn center_score(maximizing: bool) -> Score {
        if maximizing {
            ScoreWeights::WIN
        } else {
            ScoreWeights::LOSS
        }
    }

    /// Search every root move for the root player to `depth` plies.
    ///
    /// `depth` below 1 is treated as 1. The board is copied once and the copy
    /// is used for make/unmake; the caller's board is never touched.
    pub fn search_root(&self, board: &Board, depth: usize) -> RootResult {
        let depth = depth.max(1);
        let mut result = RootResult {
            best_move: None,
            score: ScoreWeights::LOSS,
            depth,
            nodes: 0,
            time_exceeded: false,
            cancelled: false,
            all_moves_lose: false,
            principal_variation: Vec::new(),
        };

        if self.cancel.is_cancelled() {
            result.cancelled = true;
            return result;
        }

        let mut work = board.clone();
        let center = work.center();
        let moves = ordered_legal_moves(&work, self.root_player);
        let mut alpha = ScoreWeights::LOSS;
        let beta = ScoreWeights::WIN;
        let mut all_lose = !moves.is_empty();

        for mov in moves {
            if self.cancel.is_cancelled() {
                result.cancelled = true;
                break;
            }
            if self.out_of_time() {
                result.time_exceeded = true;
                break;
            }

            result.nodes += 1;

            if mov == center {
                result.best_move = Some(mov);
                result.score = ScoreWeights::WIN;
                result.all_moves_lose = false;
                result.principal_variation = vec![mov];
                return result;
            }

            work.place_stone(mov, self.root_player);
            let child = self.alpha_beta(
                &mut work,
                depth - 1,
                alpha,
                beta,
                false,
                self.root_player.opponent(),
            );
            work.remove_stone(mov);

            result.nodes += child.nodes;
            if child.cancelled {
                result.cancelled = true;
                break;
            }
            if child.time_exceeded {
                result.time_exceeded = true;
                break;
            }

            let score = child.score;
            if score > ScoreWeights::LOSS {
                all_lose = false;
            }

            // Among lost moves, prefer the one whose loss is furthest away
            let longer_loss = score == ScoreWeights::LOSS
                && result.score == ScoreWeights::LOSS
                && child.principal_variation.len() + 1 > result.principal_variation.len();

            if result.best_move.is_none() || score > result.score || longer_loss {
                result.best_move = Some(mov);
                result.score = score;
                result.principal_variation = std::iter::once(mov)
                    .chain(child.principal_variation)
                    .collect();
            }

            alpha = alpha.max(score);
            if beta <= alpha {
                break;
            }
        }

        result.all_moves_lose = all_lose && result.is_complete();
        result
    }

    /// Alpha-beta minimax below the root.
    ///
    /// `to_move` places at this node; `maximizing` is true exactly when that
    /// is the root player. The board is restored before returning.
    pub fn alpha_beta(
        &self,
        board: &mut Board,
        depth: usize,
        mut alpha: Score,
        mut beta: Score,
        maximizing: bool,
        to_move: Player,
    ) -> SearchOutcome {
        if self.cancel.is_cancelled() {
            return SearchOutcome::stopped(true);
        }
        if self.out_of_time() {
            return SearchOutcome::stopped(false);
        }

        // Decided game dominates everything else
        if let Some(owner) = board.center_occupant() {
            return SearchOutcome::leaf(if owner == self.root_player {
                ScoreWeights::WIN
            } else {
                ScoreWeights::LOSS
            });
        }

        // No point looking further than the game can last
        if depth == 0 || depth > board.empty_count() {
            return SearchOutcome::leaf(evaluate(board, self.root_player));
        }

        let moves = ordered_legal_moves(board, to_move);
        if moves.is_empty() {
            return SearchOutcome::leaf(ScoreWeights::DRAW);
        }

        let center = board.center();
        let mut best = if maximizing {
            ScoreWeights::LOSS
        } else {
            ScoreWeights::WIN
        };
        let mut best_line: Option<Vec<Pos>> = None;
        let mut nodes = 0u64;

        for mov in moves {
            if self.cancel.is_cancelled() || self.out_of_time() {
                let cancelled = self.cancel.is_cancelled();
                return SearchOutcome {
                    score: best,
                    nodes,
                    time_exceeded: !cancelled,
                    cancelled,
                    principal_variation: best_line.unwrap_or_default(),
                };
            }

            nodes += 1;

            if mov == center {
                return SearchOutcome {
                    score: Self::center_score(maximizing),
                    nodes,
                    time_exceeded: false,
                    cancelled: false,
                    principal_variation: vec![mov],
                };
            }

            board.place_stone(mov, to_move);
            let child = self.alpha_beta(
                board,
                depth - 1,
                alpha,
                beta,
                !maximizing,
                to_move.opponent(),
            );
            board.remove_stone(mov);

            nodes += child.nodes;
            if child.is_interrupted() {
                return SearchOutcome {
                    score: best,
                    nodes,
                    time_exceeded: child.time_exceeded,
                    cancelled: child.cancelled,
                    principal_variation: best_line.unwrap_or_default(),
                };
            }

            let improved = if maximizing {
                child.score > best
            } else {
                child.score < best
            };
            if improved || best_line.is_none() {
                best = child.score;
                best_line = Some(
                    std::iter::once(mov)
                        .chain(child.principal_variation)
                        .collect(),
                );
            }

            if maximizing {
                alpha = alpha.max(best);
            } else {
                beta = beta.min(best);
            }
            if beta <= alpha {
                break;
            }
        }

        SearchOutcome {
            score: best,
            nodes,
            time_exceeded: false,
            cancelled: false,
            principal_variation: best_line.unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn searcher(player: Player) -> Searcher {
        Searcher::new(
            player,
            Instant::now() + Duration::from_secs(60),
            CancelToken::new(),
        )
    }

    #[test]
    fn test_takes_available_center_at_any_depth() {
        let mut board = Board::new(3).unwrap();
        board.place_stone(Pos::new(0, 0), Player::Black);

        for depth in 1..=4 {
            let result = searcher(Player::Black).search_root(&board, depth);
            assert_eq!(result.best_move, Some(Pos::new(1, 1)));
            assert_eq!(result.score, ScoreWeights::WIN);
            assert_eq!(result.principal_variation, vec![Pos::new(1, 1)]);
            assert!(result.is_complete());
        }
    }

    #[test]
    fn test_forced_win_on_empty_three_by_three() {
        let board = Board::new(3).unwrap();
        let s = searcher(Player::Black);

        assert!(!s.search_root(&board, 1).is_forced_win());
        assert!(!s.search_root(&board, 2).is_forced_win());

        let result = s.search_root(&board, 3);
        assert!(result.is_forced_win());
        assert_eq!(
            result.principal_variation,
            vec![Pos::new(0, 1), Pos::new(1, 0), Pos::new(1, 1)]
        );
        assert_eq!(result.best_move, Some(Pos::new(0, 1)));
    }

    #[test]
    fn test_forced_win_stays_forced_at_greater_depth() {
        let board = Board::new(3).unwrap();
        let s = searcher(Player::Black);
        for depth in 3..=6 {
            assert_eq!(s.search_root(&board, depth).score, ScoreWeights::WIN);
        }
    }

    #[test]
    fn test_forced_loss_still_returns_a_move() {
        let mut board = Board::new(3).unwrap();
        board.place_stone(Pos::new(0, 0), Player::Black);
        let s = searcher(Player::White);

        let shallow = s.search_root(&board, 1);
        assert!(!shallow.all_moves_lose);

        let result = s.search_root(&board, 2);
        assert!(result.all_moves_lose);
        assert_eq!(result.score, ScoreWeights::LOSS);
        assert_eq!(result.best_move, Some(Pos::new(0, 1)));
        assert_eq!(result.principal_variation, vec![Pos::new(0, 1), Pos::new(1, 1)]);
    }

    #[test]
    fn test_search_is_repeatable() {
        let board = Board::from_rows(&["B...W", ".....", ".....", ".....", "....."]).unwrap();
        let s = searcher(Player::Black);
        let first = s.search_root(&board, 3);
        let second = s.search_root(&board, 3);
        assert_eq!(first.best_move, second.best_move);
        assert_eq!(first.score, second.score);
        assert_eq!(first.nodes, second.nodes);
    }

    #[test]
    fn test_caller_board_is_untouched() {
        let board = Board::from_rows(&["B....", ".....", ".....", ".....", "....W"]).unwrap();
        let before = board.clone();
        let _ = searcher(Player::White).search_root(&board, 3);
        assert_eq!(board, before);
    }

    #[test]
    fn test_occupied_center_is_terminal() {
        let mut board = Board::from_rows(&["B..", ".B.", "..."]).unwrap();
        let s = searcher(Player::Black);
        let out = s.alpha_beta(&mut board, 3, f64::NEG_INFINITY, f64::INFINITY, false, Player::White);
        assert_eq!(out.score, ScoreWeights::WIN);
        assert_eq!(out.nodes, 1);
        assert!(out.principal_variation.is_empty());

        let s = searcher(Player::White);
        let out = s.alpha_beta(&mut board, 3, f64::NEG_INFINITY, f64::INFINITY, true, Player::White);
        assert_eq!(out.score, ScoreWeights::LOSS);
    }

    #[test]
    fn test_depth_beyond_empty_cells_evaluates() {
        let mut board = Board::from_rows(&[".WB", "W.B", "BWB"]).unwrap();
        let s = searcher(Player::Black);
        let out = s.alpha_beta(&mut board, 5, f64::NEG_INFINITY, f64::INFINITY, true, Player::Black);
        assert_eq!(out.score, evaluate(&board, Player::Black));
        assert_eq!(out.nodes, 1);
    }

    #[test]
    fn test_tied_children_keep_first_line() {
        // Every White reply lets Black take the center; the line follows the first reply
        let mut board = Board::from_rows(&[".B.", "...", "..."]).unwrap();
        let s = searcher(Player::Black);
        let out = s.alpha_beta(&mut board, 2, f64::NEG_INFINITY, f64::INFINITY, false, Player::White);
        assert_eq!(out.score, ScoreWeights::WIN);
        assert_eq!(out.principal_variation, vec![Pos::new(1, 0), Pos::new(1, 1)]);

        // Same when every move loses for the side to move
        let mut board = Board::from_rows(&["B..", "...", "..."]).unwrap();
        let s = searcher(Player::White);
        let out = s.alpha_beta(&mut board, 2, f64::NEG_INFINITY, f64::INFINITY, true, Player::White);
        assert_eq!(out.score, ScoreWeights::LOSS);
        assert_eq!(out.principal_variation, vec![Pos::new(0, 1), Pos::new(1, 1)]);
    }

    #[test]
    fn test_stalemated_side_scores_draw() {
        let mut board = Board::from_rows(&["WWW", "W.W", "WWW"]).unwrap();
        let s = searcher(Player::White);
        let out = s.alpha_beta(&mut board, 1, f64::NEG_INFINITY, f64::INFINITY, false, Player::Black);
        assert_eq!(out.score, ScoreWeights::DRAW);
    }

    #[test]
    fn test_cancelled_search_does_no_work() {
        let board = Board::new(5).unwrap();
        let cancel = CancelToken::new();
        cancel.cancel();
        let s = Searcher::new(Player::Black, Instant::now() + Duration::from_secs(60), cancel);

        let result = s.search_root(&board, 4);
        assert!(result.cancelled);
        assert!(result.best_move.is_none());
        assert_eq!(result.nodes, 0);
    }

    #[test]
    fn test_expired_deadline_reports_timeout() {
        let board = Board::new(5).unwrap();
        let s = Searcher::new(Player::Black, Instant::now(), CancelToken::new());

        let result = s.search_root(&board, 4);
        assert!(result.time_exceeded);
        assert!(!result.is_complete());
        assert!(result.best_move.is_none());
    }
}
