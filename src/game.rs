//! Game state for a front end to embed
//!
//! Tracks whose turn it is, applies human and bot moves, detects the end of
//! the game, and runs searching bots on a worker thread so the caller's
//! loop stays responsive.

use std::sync::mpsc::{channel, Receiver, Sender, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

use log::{debug, info, warn};
use thiserror::Error;

use crate::board::{Board, MoveError, Player, Pos};
use crate::config::{ConfigError, GameConfig, PlayerKind};
use crate::engine::{Decision, Engine, MoveResult};
use crate::rules::{check_placement, legal_moves};
use crate::search::CancelToken;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("game is over")]
    GameOver,
    #[error("bot is thinking")]
    BotThinking,
    #[error("not a human player's turn")]
    NotHumanTurn,
    #[error(transparent)]
    Move(#[from] MoveError),
}

/// How a game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    /// The player placed on the center
    Win(Player),
    /// The player to move had no legal placement
    Draw,
}

/// Bot computation state
#[derive(Debug)]
pub enum BotState {
    Idle,
    Thinking {
        /// Identifies the run; replies carrying another id are stale
        session: u64,
        cancel: CancelToken,
        start_time: Instant,
    },
}

/// Main game state
#[derive(Debug)]
pub struct GameState {
    pub board: Board,
    pub current_turn: Player,
    pub outcome: Option<GameOutcome>,
    pub last_move: Option<Pos>,
    pub move_history: Vec<(Pos, Player)>,
    pub last_bot_result: Option<MoveResult>,
    config: GameConfig,
    bot_state: BotState,
    session_counter: u64,
    /// Shared by every bot run; replies are tagged with their session id
    sender: Sender<(u64, MoveResult)>,
    receiver: Receiver<(u64, MoveResult)>,
    /// Last bot line projected onto the board it was searched from
    thoughts: Option<Board>,
    rng: fastrand::Rng,
}

impl GameState {
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let board = Board::new(config.board_size)?;
        Ok(Self::with_board(config, board, Player::Black))
    }

    /// Resume from an arbitrary position with `to_move` next.
    ///
    /// The configured board size is replaced by the position's size.
    pub fn from_position(
        mut config: GameConfig,
        board: Board,
        to_move: Player,
    ) -> Result<Self, ConfigError> {
        config.board_size = board.size();
        config.validate()?;
        let mut state = Self::with_board(config, board, to_move);
        state.check_outcome();
        Ok(state)
    }

    fn with_board(config: GameConfig, board: Board, to_move: Player) -> Self {
        let rng = config
            .seed
            .map_or_else(fastrand::Rng::new, fastrand::Rng::with_seed);
        let (sender, receiver) = channel();
        Self {
            board,
            current_turn: to_move,
            outcome: None,
            last_move: None,
            move_history: Vec::new(),
            last_bot_result: None,
            config,
            bot_state: BotState::Idle,
            session_counter: 0,
            sender,
            receiver,
            thoughts: None,
            rng,
        }
    }

    /// Start over on an empty board, abandoning any bot run
    pub fn reset(&mut self) {
        self.cancel_bot_thinking();
        // Size was validated on construction
        if let Ok(board) = Board::new(self.config.board_size) {
            self.board = board;
        }
        self.current_turn = Player::Black;
        self.outcome = None;
        self.last_move = None;
        self.move_history.clear();
        self.last_bot_result = None;
        self.thoughts = None;
    }

    #[inline]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Change who plays `player`; a run in flight is abandoned
    pub fn set_player_kind(&mut self, player: Player, kind: PlayerKind) {
        self.cancel_bot_thinking();
        self.config.player_mut(player).kind = kind;
    }

    /// Applies from the next bot run on
    pub fn set_time_limit(&mut self, player: Player, ms: u64) {
        self.config.player_mut(player).time_limit_ms = ms;
    }

    pub fn is_human_turn(&self) -> bool {
        self.config.player(self.current_turn).kind == PlayerKind::Human
    }

    pub fn is_bot_turn(&self) -> bool {
        self.outcome.is_none() && self.config.player(self.current_turn).kind.is_bot()
    }

    pub fn is_bot_thinking(&self) -> bool {
        matches!(self.bot_state, BotState::Thinking { .. })
    }

    #[inline]
    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    /// Legal placements for the player to move
    pub fn legal_moves(&self) -> Vec<Pos> {
        if self.is_over() {
            return Vec::new();
        }
        legal_moves(&self.board, self.current_turn)
    }

    /// Board showing the last bot's principal variation, stones alternating
    /// from the bot's color
    pub fn thoughts(&self) -> Option<&Board> {
        self.thoughts.as_ref()
    }

    /// Attempt to place a stone for the human to move
    pub fn try_place_stone(&mut self, pos: Pos) -> Result<(), GameError> {
        if self.is_over() {
            return Err(GameError::GameOver);
        }
        if self.is_bot_thinking() {
            return Err(GameError::BotThinking);
        }
        if !self.is_human_turn() {
            return Err(GameError::NotHumanTurn);
        }

        check_placement(&self.board, pos, self.current_turn)?;
        self.execute_move(pos);
        Ok(())
    }

    /// Execute a move (for both human and bot)
    fn execute_move(&mut self, pos: Pos) {
        let color = self.current_turn;
        self.board.place_stone(pos, color);
        self.move_history.push((pos, color));
        self.last_move = Some(pos);
        debug!("{} plays {}", color, pos);

        self.current_turn = color.opponent();
        self.check_outcome();
    }

    /// Center taken wins; otherwise the player to move must have a placement
    fn check_outcome(&mut self) {
        if let Some(winner) = self.board.center_occupant() {
            info!("{} takes the center and wins", winner);
            self.outcome = Some(GameOutcome::Win(winner));
        } else if legal_moves(&self.board, self.current_turn).is_empty() {
            info!("{} has no legal moves, game drawn", self.current_turn);
            self.outcome = Some(GameOutcome::Draw);
        }
    }

    /// Start the bot to move, if any.
    ///
    /// The weak bot answers at once. The searching bot runs on its own
    /// thread; poll `check_bot_result` or block on `wait_for_bot`.
    pub fn start_bot_thinking(&mut self) {
        if !self.is_bot_turn() || self.is_bot_thinking() {
            return;
        }

        let color = self.current_turn;
        let player = *self.config.player(color);
        let seed = self.rng.u64(..);

        match player.kind {
            PlayerKind::Human => {}
            PlayerKind::WeakBot => {
                let result = Engine::with_seed(player.limits(), seed).weak_move(&self.board, color);
                self.apply_bot_result(result);
            }
            PlayerKind::SearchBot => {
                self.session_counter += 1;
                let session = self.session_counter;
                let cancel = CancelToken::new();
                let token = cancel.clone();
                let board = self.board.clone();
                let limits = player.limits();
                let tx = self.sender.clone();

                thread::spawn(move || {
                    let mut engine = Engine::with_seed(limits, seed);
                    let result = engine.request_move_with(&board, color, token, |s| {
                        debug!(
                            "bot run {}: depth {} best {:?}",
                            session,
                            s.completed_depth(),
                            s.best_move()
                        );
                    });
                    // Receiver is gone once the game state is dropped
                    let _ = tx.send((session, result));
                });

                self.bot_state = BotState::Thinking {
                    session,
                    cancel,
                    start_time: Instant::now(),
                };
            }
        }
    }

    /// Apply the bot's move if it has finished. Returns whether a reply
    /// was consumed; replies from abandoned runs are drained and dropped.
    pub fn check_bot_result(&mut self) -> bool {
        while self.is_bot_thinking() {
            match self.receiver.try_recv() {
                Ok(reply) => {
                    if self.accept_reply(reply) {
                        return true;
                    }
                }
                Err(TryRecvError::Empty) => return false,
                Err(TryRecvError::Disconnected) => {
                    warn!("bot reply channel closed");
                    self.bot_state = BotState::Idle;
                    return false;
                }
            }
        }
        false
    }

    /// Block until the active bot run replies, then apply its move
    pub fn wait_for_bot(&mut self) -> bool {
        while self.is_bot_thinking() {
            match self.receiver.recv() {
                Ok(reply) => {
                    if self.accept_reply(reply) {
                        return true;
                    }
                }
                Err(_) => {
                    warn!("bot reply channel closed");
                    self.bot_state = BotState::Idle;
                    return false;
                }
            }
        }
        false
    }

    /// Start the bot to move and wait for it
    pub fn play_bot_turn(&mut self) -> bool {
        self.start_bot_thinking();
        if self.is_bot_thinking() {
            self.wait_for_bot()
        } else {
            self.last_move.is_some()
        }
    }

    fn accept_reply(&mut self, (session, result): (u64, MoveResult)) -> bool {
        let active = match &self.bot_state {
            BotState::Thinking { session: active, .. } => *active,
            BotState::Idle => return false,
        };
        if session != active {
            debug!("discarding reply from stale bot run {}", session);
            return false;
        }
        self.bot_state = BotState::Idle;
        self.apply_bot_result(result);
        true
    }

    fn apply_bot_result(&mut self, result: MoveResult) {
        let color = self.current_turn;
        self.thoughts = Some(self.board.with_line(&result.principal_variation, color));

        match (result.decision, result.best_move) {
            (Decision::Cancelled, _) => {}
            (_, Some(pos)) => self.execute_move(pos),
            (_, None) => {
                info!("{} has no move, game drawn", color);
                self.outcome = Some(GameOutcome::Draw);
            }
        }
        self.last_bot_result = Some(result);
    }

    /// Abandon the bot run in flight; its reply is never applied
    pub fn cancel_bot_thinking(&mut self) {
        if let BotState::Thinking { session, cancel, .. } =
            std::mem::replace(&mut self.bot_state, BotState::Idle)
        {
            info!("cancelling bot run {}", session);
            cancel.cancel();
        }
    }

    /// How long the bot has been thinking
    pub fn bot_thinking_elapsed(&self) -> Option<Duration> {
        match &self.bot_state {
            BotState::Thinking { start_time, .. } => Some(start_time.elapsed()),
            BotState::Idle => None,
        }
    }
}
