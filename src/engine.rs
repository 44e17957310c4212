//! Move selection for the center game
//!
//! The `Engine` is the boundary a front end talks to. For a searching bot it
//! follows this order:
//!
//! 1. **No legal moves**: report it, the game is a draw
//! 2. **Immediate win**: a legal center placement is played at once
//! 3. **Iterative deepening**: alpha-beta at depth 1, 2, 3, ... until a
//!    forced result, the end of the game, the depth cap or the deadline
//! 4. **Random fallback**: if not even depth 1 finished in time
//!
//! The weak bot skips the search: center if legal, otherwise a uniformly
//! random legal move.
//!
//! # Example
//!
//! ```
//! use center::board::{Board, Player, Pos};
//! use center::config::SearchLimits;
//! use center::engine::{Decision, Engine};
//!
//! let mut engine = Engine::new(SearchLimits::from_millis(2000));
//! let board = Board::new(3).unwrap();
//!
//! let result = engine.request_move(&board, Player::Black);
//! assert_eq!(result.decision, Decision::ForcedWin);
//! assert_eq!(result.principal_variation.len(), 3);
//! ```

use std::fmt;
use std::time::Instant;

use log::{debug, info};

use crate::board::{Board, Player, Pos};
use crate::config::SearchLimits;
use crate::eval::{Score, ScoreWeights};
use crate::rules::{is_legal, legal_moves};
use crate::search::{CancelToken, Phase, SearchSession};

/// How a move was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// The center was legal and taken without searching
    ImmediateWin,
    /// Search proved the move reaches the center by force
    ForcedWin,
    /// Every move loses by force; this one delays the loss longest
    ForcedLoss,
    /// Searched to the end of the game or the depth cap
    DepthExhausted,
    /// Deadline hit; the deepest completed depth was used
    TimeExpired,
    /// Deadline hit before any depth completed
    RandomFallback,
    /// Chosen by the non-searching bot
    WeakBot,
    /// The player has no legal placement
    NoLegalMoves,
    /// The session was cancelled; there is nothing to apply
    Cancelled,
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Decision::ImmediateWin => "immediate win",
            Decision::ForcedWin => "forced win",
            Decision::ForcedLoss => "forced loss",
            Decision::DepthExhausted => "depth exhausted",
            Decision::TimeExpired => "time expired",
            Decision::RandomFallback => "random fallback",
            Decision::WeakBot => "weak bot",
            Decision::NoLegalMoves => "no legal moves",
            Decision::Cancelled => "cancelled",
        };
        f.write_str(text)
    }
}

/// Result of a move request with search statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct MoveResult {
    /// Move to play, `None` when there is none or the request was cancelled
    pub best_move: Option<Pos>,
    pub decision: Decision,
    /// Root score from the mover's side, when a search or rule produced one
    pub score: Option<Score>,
    /// Deepest completed depth
    pub depth: usize,
    /// Nodes across every depth
    pub nodes: u64,
    pub time_ms: u64,
    /// Best line, starting with `best_move`
    pub principal_variation: Vec<Pos>,
}

impl MoveResult {
    #[inline]
    fn immediate_win(pos: Pos, time_ms: u64) -> Self {
        Self {
            best_move: Some(pos),
            decision: Decision::ImmediateWin,
            score: Some(ScoreWeights::WIN),
            depth: 0,
            nodes: 1,
            time_ms,
            principal_variation: vec![pos],
        }
    }

    #[inline]
    fn no_legal_moves(time_ms: u64) -> Self {
        Self {
            best_move: None,
            decision: Decision::NoLegalMoves,
            score: Some(ScoreWeights::DRAW),
            depth: 0,
            nodes: 0,
            time_ms,
            principal_variation: Vec::new(),
        }
    }

    #[inline]
    fn unsearched(pos: Pos, decision: Decision, time_ms: u64) -> Self {
        Self {
            best_move: Some(pos),
            decision,
            score: None,
            depth: 0,
            nodes: 0,
            time_ms,
            principal_variation: Vec::new(),
        }
    }

    /// Build the result of a finished session
    fn from_session(session: &SearchSession, decision: Decision) -> Self {
        let cancelled = decision == Decision::Cancelled;
        Self {
            best_move: if cancelled { None } else { session.best_move() },
            decision,
            score: session.score(),
            depth: session.completed_depth(),
            nodes: session.nodes(),
            time_ms: session.elapsed().as_millis() as u64,
            principal_variation: session.principal_variation().to_vec(),
        }
    }

    #[inline]
    pub fn is_forced_win(&self) -> bool {
        matches!(self.decision, Decision::ImmediateWin | Decision::ForcedWin)
    }

    #[inline]
    pub fn is_forced_loss(&self) -> bool {
        self.decision == Decision::ForcedLoss
    }
}

/// Search controller.
///
/// Owns at most one `SearchSession`. Starting a new request cancels the
/// one in flight, so results from a superseded search never surface.
#[derive(Debug)]
pub struct Engine {
    limits: SearchLimits,
    rng: fastrand::Rng,
    session: Option<SearchSession>,
    next_session_id: u64,
}

impl Engine {
    #[must_use]
    pub fn new(limits: SearchLimits) -> Self {
        Self::with_rng(limits, fastrand::Rng::new())
    }

    /// Engine whose random choices are reproducible
    #[must_use]
    pub fn with_seed(limits: SearchLimits, seed: u64) -> Self {
        Self::with_rng(limits, fastrand::Rng::with_seed(seed))
    }

    fn with_rng(limits: SearchLimits, rng: fastrand::Rng) -> Self {
        Self {
            limits,
            rng,
            session: None,
            next_session_id: 1,
        }
    }

    /// Legal placements for `player`, for highlighting
    pub fn legal_moves(&self, board: &Board, player: Player) -> Vec<Pos> {
        legal_moves(board, player)
    }

    /// Choose a move for `player`, blocking until the search finishes.
    pub fn request_move(&mut self, board: &Board, player: Player) -> MoveResult {
        self.request_move_with(board, player, CancelToken::new(), |_| {})
    }

    /// Like `request_move`, with a caller-held cancel token and a callback
    /// run between depths.
    pub fn request_move_with<F>(
        &mut self,
        board: &Board,
        player: Player,
        cancel: CancelToken,
        between_depths: F,
    ) -> MoveResult
    where
        F: FnMut(&SearchSession),
    {
        if let Some(result) = self.begin(board, player, cancel) {
            return result;
        }
        match self.session.take() {
            Some(mut session) => {
                session.run_with(between_depths);
                self.conclude(&session)
            }
            // `begin` always leaves a session when it returns None
            None => MoveResult::no_legal_moves(0),
        }
    }

    /// Start a decision for `player` without searching yet.
    ///
    /// Any session already in flight is cancelled first. Returns the result
    /// right away when no search is needed; otherwise a session is left
    /// running and `step` drives it.
    pub fn begin(&mut self, board: &Board, player: Player, cancel: CancelToken) -> Option<MoveResult> {
        self.cancel();
        let start = Instant::now();

        if cancel.is_cancelled() {
            return Some(MoveResult {
                best_move: None,
                decision: Decision::Cancelled,
                score: None,
                depth: 0,
                nodes: 0,
                time_ms: 0,
                principal_variation: Vec::new(),
            });
        }

        if legal_moves(board, player).is_empty() {
            info!("{} has no legal moves", player);
            return Some(MoveResult::no_legal_moves(elapsed_ms(start)));
        }

        let center = board.center();
        if is_legal(board, center, player) {
            info!("{} takes the center at {}", player, center);
            return Some(MoveResult::immediate_win(center, elapsed_ms(start)));
        }

        let id = self.next_session_id;
        self.next_session_id += 1;
        self.session = Some(SearchSession::new(id, board, player, &self.limits, cancel));
        None
    }

    /// Search one more depth of the active session.
    ///
    /// Returns the final result once the session finishes, `None` while it
    /// is still deepening or when no session is active.
    pub fn step(&mut self) -> Option<MoveResult> {
        let phase = self.session.as_mut()?.step();
        if !phase.is_finished() {
            return None;
        }
        let session = self.session.take()?;
        Some(self.conclude(&session))
    }

    /// Cancel the active session, if any
    pub fn cancel(&mut self) {
        if let Some(session) = self.session.take() {
            info!("cancelling search session {}", session.id());
            session.cancel_token().cancel();
        }
    }

    #[inline]
    pub fn is_searching(&self) -> bool {
        self.session.is_some()
    }

    /// The session in flight, for showing its current best line
    pub fn session(&self) -> Option<&SearchSession> {
        self.session.as_ref()
    }

    /// Non-searching bot: center if legal, else a uniformly random legal move.
    pub fn weak_move(&mut self, board: &Board, player: Player) -> MoveResult {
        let start = Instant::now();
        let center = board.center();
        if is_legal(board, center, player) {
            return MoveResult {
                score: Some(ScoreWeights::WIN),
                principal_variation: vec![center],
                ..MoveResult::unsearched(center, Decision::WeakBot, elapsed_ms(start))
            };
        }
        match self.rng.choice(legal_moves(board, player)) {
            Some(pos) => {
                debug!("weak bot picks {} for {}", pos, player);
                MoveResult::unsearched(pos, Decision::WeakBot, elapsed_ms(start))
            }
            None => MoveResult::no_legal_moves(elapsed_ms(start)),
        }
    }

    fn conclude(&mut self, session: &SearchSession) -> MoveResult {
        let decision = match session.phase() {
            Phase::ForcedWin => Decision::ForcedWin,
            Phase::ForcedLoss => Decision::ForcedLoss,
            Phase::Cancelled => Decision::Cancelled,
            Phase::DepthExhausted if session.best_move().is_none() => Decision::NoLegalMoves,
            Phase::DepthExhausted => Decision::DepthExhausted,
            Phase::TimeExpired | Phase::Searching => {
                if session.best_move().is_some() {
                    Decision::TimeExpired
                } else {
                    return self.random_fallback(session);
                }
            }
        };

        let result = MoveResult::from_session(session, decision);
        info!(
            "{}: {} at depth {} ({:?}, {} nodes, {}ms)",
            session.player(),
            decision,
            result.depth,
            result.best_move,
            result.nodes,
            result.time_ms
        );
        result
    }

    fn random_fallback(&mut self, session: &SearchSession) -> MoveResult {
        let moves = legal_moves(session.board(), session.player());
        let Some(pos) = self.rng.choice(moves) else {
            return MoveResult::no_legal_moves(session.elapsed().as_millis() as u64);
        };
        info!(
            "{}: no depth finished in time, playing random {}",
            session.player(),
            pos
        );
        MoveResult {
            nodes: session.nodes(),
            ..MoveResult::unsearched(pos, Decision::RandomFallback, session.elapsed().as_millis() as u64)
        }
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(SearchLimits::default())
    }
}

#[inline]
fn elapsed_ms(start: Instant) -> u64 {
    start.elapsed().as_millis() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> Engine {
        Engine::with_seed(SearchLimits::from_millis(60_000), 7)
    }

    #[test]
    fn test_immediate_win() {
        let mut board = Board::new(3).unwrap();
        board.place_stone(Pos::new(0, 0), Player::Black);

        let result = engine().request_move(&board, Player::Black);
        assert_eq!(result.decision, Decision::ImmediateWin);
        assert_eq!(result.best_move, Some(Pos::new(1, 1)));
        assert_eq!(result.principal_variation, vec![Pos::new(1, 1)]);
        assert!(result.is_forced_win());
    }

    #[test]
    fn test_no_legal_moves() {
        let board = Board::from_rows(&["WWW", "W.W", "WWW"]).unwrap();
        let mut engine = engine();

        let result = engine.request_move(&board, Player::Black);
        assert_eq!(result.decision, Decision::NoLegalMoves);
        assert!(result.best_move.is_none());
        assert_eq!(result.score, Some(ScoreWeights::DRAW));
        assert!(!engine.is_searching());
    }

    #[test]
    fn test_forced_win_on_empty_board() {
        let board = Board::new(3).unwrap();
        let result = engine().request_move(&board, Player::Black);

        assert_eq!(result.decision, Decision::ForcedWin);
        assert_eq!(result.depth, 3);
        assert_eq!(result.best_move, Some(Pos::new(0, 1)));
        assert_eq!(result.principal_variation.len(), 3);
        assert!(result.nodes > 0);
    }

    #[test]
    fn test_forced_loss_still_moves() {
        let mut board = Board::new(3).unwrap();
        board.place_stone(Pos::new(0, 0), Player::Black);

        let result = engine().request_move(&board, Player::White);
        assert_eq!(result.decision, Decision::ForcedLoss);
        assert!(result.is_forced_loss());
        assert_eq!(result.score, Some(ScoreWeights::LOSS));
        let pos = result.best_move.unwrap();
        assert!(is_legal(&board, pos, Player::White));
    }

    #[test]
    fn test_depth_cap() {
        let board = Board::new(7).unwrap();
        let mut engine = Engine::new(SearchLimits::from_millis(60_000).with_max_depth(2));

        let result = engine.request_move(&board, Player::Black);
        assert_eq!(result.decision, Decision::DepthExhausted);
        assert_eq!(result.depth, 2);
        assert!(result.best_move.is_some());
    }

    #[test]
    fn test_zero_budget_falls_back_to_random_legal_move() {
        let board = Board::new(5).unwrap();
        let mut engine = Engine::with_seed(SearchLimits::from_millis(0), 42);

        let result = engine.request_move(&board, Player::Black);
        assert_eq!(result.decision, Decision::RandomFallback);
        assert_eq!(result.depth, 0);
        let pos = result.best_move.unwrap();
        assert!(is_legal(&board, pos, Player::Black));
    }

    #[test]
    fn test_deadline_mid_search_keeps_last_completed_depth() {
        let board = Board::new(9).unwrap();
        let mut engine = Engine::with_seed(SearchLimits::from_millis(300), 7);

        let result = engine.request_move(&board, Player::Black);
        assert_eq!(result.decision, Decision::TimeExpired);
        assert!(result.depth >= 1);
        let pos = result.best_move.unwrap();
        assert!(is_legal(&board, pos, Player::Black));
        assert_eq!(result.principal_variation.first(), Some(&pos));
        assert!(result.principal_variation.len() <= result.depth);
        assert!(result.score.is_some());
    }

    #[test]
    fn test_weak_bot_takes_center() {
        let mut board = Board::new(3).unwrap();
        board.place_stone(Pos::new(0, 0), Player::Black);

        let result = engine().weak_move(&board, Player::Black);
        assert_eq!(result.decision, Decision::WeakBot);
        assert_eq!(result.best_move, Some(Pos::new(1, 1)));
    }

    #[test]
    fn test_weak_bot_is_reproducible_with_seed() {
        let board = Board::new(7).unwrap();
        let first = engine().weak_move(&board, Player::White).best_move;
        let second = engine().weak_move(&board, Player::White).best_move;
        assert_eq!(first, second);

        let pos = first.unwrap();
        assert!(is_legal(&board, pos, Player::White));
    }

    #[test]
    fn test_weak_bot_without_moves() {
        let board = Board::from_rows(&["BBB", "B.B", "BBB"]).unwrap();
        let result = engine().weak_move(&board, Player::White);
        assert_eq!(result.decision, Decision::NoLegalMoves);
    }

    #[test]
    fn test_cancel_between_depths() {
        let board = Board::new(7).unwrap();
        let cancel = CancelToken::new();
        let mut engine = engine();

        let result = engine.request_move_with(&board, Player::Black, cancel.clone(), |session| {
            if session.completed_depth() >= 1 {
                cancel.cancel();
            }
        });
        assert_eq!(result.decision, Decision::Cancelled);
        assert!(result.best_move.is_none());
        assert_eq!(result.depth, 1);
    }

    #[test]
    fn test_cancelled_before_start() {
        let board = Board::new(5).unwrap();
        let cancel = CancelToken::new();
        cancel.cancel();

        let mut engine = engine();
        let result = engine.request_move_with(&board, Player::Black, cancel, |_| {});
        assert_eq!(result.decision, Decision::Cancelled);
        assert_eq!(result.nodes, 0);
        assert!(!engine.is_searching());
    }

    #[test]
    fn test_new_request_cancels_previous_session() {
        let board = Board::new(7).unwrap();
        let mut engine = engine();

        let first = CancelToken::new();
        assert!(engine.begin(&board, Player::Black, first.clone()).is_none());
        assert!(engine.is_searching());

        let second = CancelToken::new();
        assert!(engine.begin(&board, Player::White, second.clone()).is_none());
        assert!(first.is_cancelled());
        assert!(!second.is_cancelled());
        assert_eq!(engine.session().map(SearchSession::player), Some(Player::White));
    }

    #[test]
    fn test_stepping_matches_blocking_request() {
        let board = Board::new(3).unwrap();
        let mut engine = engine();

        assert!(engine.begin(&board, Player::Black, CancelToken::new()).is_none());
        let mut steps = 0;
        let result = loop {
            steps += 1;
            if let Some(result) = engine.step() {
                break result;
            }
        };
        assert_eq!(steps, 3);
        assert_eq!(result.decision, Decision::ForcedWin);
        assert_eq!(result.best_move, Some(Pos::new(0, 1)));
        assert!(engine.step().is_none());
    }

    #[test]
    fn test_requests_are_repeatable() {
        let board = Board::from_rows(&["B...W", ".....", ".....", ".....", "....."]).unwrap();
        let mut engine = Engine::new(SearchLimits::from_millis(60_000).with_max_depth(3));

        let first = engine.request_move(&board, Player::White);
        let second = engine.request_move(&board, Player::White);
        assert_eq!(first.best_move, second.best_move);
        assert_eq!(first.score, second.score);
        assert_eq!(first.principal_variation, second.principal_variation);
    }
}
