//! Iterative deepening, one depth per step
//!
//! A `SearchSession` owns everything one decision needs: its copy of the
//! board, the deadline, the best completed result and the cancel token.
//! Callers drive it with `step()` and get control back between depths,
//! which is the only place a search yields.

use std::time::{Duration, Instant};

use log::{debug, trace};

use crate::board::{Board, Player, Pos};
use crate::config::SearchLimits;
use crate::eval::{Score, ScoreWeights};

use super::{CancelToken, RootResult, Searcher};

/// Where a session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// More depths may still be searched
    Searching,
    /// A move that reaches the center by force was found
    ForcedWin,
    /// Every root move loses by force; the best delaying move is kept
    ForcedLoss,
    /// Searched as deep as the game can last, or as the depth cap allows
    DepthExhausted,
    /// Deadline reached; the best completed depth (if any) stands
    TimeExpired,
    /// Cancel token fired; the result must not be applied
    Cancelled,
}

impl Phase {
    #[inline]
    pub fn is_finished(self) -> bool {
        self != Phase::Searching
    }
}

/// One decision's worth of iterative-deepening state.
#[derive(Debug)]
pub struct SearchSession {
    id: u64,
    board: Board,
    player: Player,
    start: Instant,
    deadline: Instant,
    /// Depth the next `step` will search
    depth: usize,
    depth_limit: usize,
    completed_depth: usize,
    best: Option<RootResult>,
    nodes: u64,
    phase: Phase,
    cancel: CancelToken,
}

impl SearchSession {
    /// Start a session for `player` on a snapshot of `board`.
    ///
    /// The deadline is fixed here, so time spent between steps counts
    /// against the budget.
    pub fn new(
        id: u64,
        board: &Board,
        player: Player,
        limits: &SearchLimits,
        cancel: CancelToken,
    ) -> Self {
        let start = Instant::now();
        let empty = board.empty_count();
        let depth_limit = limits.max_depth.map_or(empty, |cap| cap.min(empty)).max(1);

        trace!(
            "session {} started for {} (depth limit {}, budget {:?})",
            id,
            player,
            depth_limit,
            limits.time_limit
        );

        Self {
            id,
            board: board.clone(),
            player,
            start,
            deadline: start + limits.time_limit,
            depth: 1,
            depth_limit,
            completed_depth: 0,
            best: None,
            nodes: 0,
            phase: Phase::Searching,
            cancel,
        }
    }

    /// Search the next depth and report the resulting phase.
    ///
    /// Once finished, further calls do nothing and return the same phase.
    pub fn step(&mut self) -> Phase {
        if self.phase.is_finished() {
            return self.phase;
        }
        if self.cancel.is_cancelled() {
            return self.finish(Phase::Cancelled);
        }
        if Instant::now() >= self.deadline {
            return self.finish(Phase::TimeExpired);
        }

        let searcher = Searcher::new(self.player, self.deadline, self.cancel.clone());
        let result = searcher.search_root(&self.board, self.depth);
        self.nodes += result.nodes;

        if result.cancelled {
            return self.finish(Phase::Cancelled);
        }
        if result.time_exceeded {
            return self.finish(Phase::TimeExpired);
        }
        if result.best_move.is_none() {
            // Nothing to play; deeper searches cannot change that
            return self.finish(Phase::DepthExhausted);
        }

        debug!(
            "session {}: depth {} done, best {:?} score {} ({} nodes, {:?} left)",
            self.id,
            result.depth,
            result.best_move,
            result.score,
            result.nodes,
            self.remaining()
        );

        let forced_win = result.is_forced_win();
        let forced_loss = result.all_moves_lose;
        self.completed_depth = result.depth;
        self.best = Some(result);

        if forced_win {
            self.finish(Phase::ForcedWin)
        } else if forced_loss {
            self.finish(Phase::ForcedLoss)
        } else if self.depth >= self.depth_limit {
            self.finish(Phase::DepthExhausted)
        } else if Instant::now() >= self.deadline {
            self.finish(Phase::TimeExpired)
        } else {
            self.depth += 1;
            Phase::Searching
        }
    }

    /// Step until the session finishes.
    pub fn run(&mut self) -> Phase {
        self.run_with(|_| {})
    }

    /// Step until the session finishes, calling `between_depths` after each
    /// depth that leaves the session still searching.
    ///
    /// The callback is the yield point: it may poll input, publish the
    /// current best line, or cancel the token.
    pub fn run_with<F>(&mut self, mut between_depths: F) -> Phase
    where
        F: FnMut(&SearchSession),
    {
        loop {
            let phase = self.step();
            if phase.is_finished() {
                return phase;
            }
            between_depths(self);
        }
    }

    fn finish(&mut self, phase: Phase) -> Phase {
        trace!(
            "session {} finished: {:?} after depth {} ({} nodes)",
            self.id,
            phase,
            self.completed_depth,
            self.nodes
        );
        self.phase = phase;
        phase
    }

    #[inline]
    pub fn id(&self) -> u64 {
        self.id
    }

    #[inline]
    pub fn player(&self) -> Player {
        self.player
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The snapshot this session searches
    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn cancel_token(&self) -> &CancelToken {
        &self.cancel
    }

    /// Result of the deepest completed depth
    pub fn best(&self) -> Option<&RootResult> {
        self.best.as_ref()
    }

    pub fn best_move(&self) -> Option<Pos> {
        self.best.as_ref().and_then(|r| r.best_move)
    }

    pub fn score(&self) -> Option<Score> {
        self.best.as_ref().map(|r| r.score)
    }

    pub fn principal_variation(&self) -> &[Pos] {
        self.best
            .as_ref()
            .map(|r| r.principal_variation.as_slice())
            .unwrap_or(&[])
    }

    /// Deepest depth that ran to completion, 0 if none did
    #[inline]
    pub fn completed_depth(&self) -> usize {
        self.completed_depth
    }

    /// Nodes across every depth, including an interrupted last one
    #[inline]
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    pub fn remaining(&self) -> Duration {
        self.deadline.saturating_duration_since(Instant::now())
    }

    /// Whether the recorded best is a proven result rather than a heuristic one
    pub fn is_decided(&self) -> bool {
        self.score().is_some_and(ScoreWeights::is_decisive)
    }
}
