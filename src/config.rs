//! Game and search configuration
//!
//! These are the knobs an external front end sets: board size, who plays
//! each side, and how long the searching bot may think.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use crate::board::{Board, BoardError, Player};

/// Default board size
pub const DEFAULT_BOARD_SIZE: usize = 7;
/// Default thinking time per move for the searching bot
pub const DEFAULT_TIME_LIMIT_MS: u64 = 1000;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error(transparent)]
    Board(#[from] BoardError),
    #[error("unknown player kind {0:?} (expected human, weak or search)")]
    UnknownPlayerKind(String),
    #[error("maximum search depth must be at least 1")]
    ZeroDepth,
}

/// Budget for one searching-bot decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchLimits {
    /// Wall-clock budget, measured from the start of the decision
    pub time_limit: Duration,
    /// Optional cap on iterative deepening; `None` searches until the board
    /// would be full
    pub max_depth: Option<usize>,
}

impl SearchLimits {
    pub fn from_millis(ms: u64) -> Self {
        Self {
            time_limit: Duration::from_millis(ms),
            max_depth: None,
        }
    }

    #[must_use]
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self::from_millis(DEFAULT_TIME_LIMIT_MS)
    }
}

/// Who decides moves for one side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayerKind {
    /// Moves come from outside (clicks, stdin)
    #[default]
    Human,
    /// Takes the center when it can, otherwise a uniformly random legal move
    WeakBot,
    /// Iterative-deepening alpha-beta under a time budget
    SearchBot,
}

impl PlayerKind {
    #[inline]
    pub fn is_bot(self) -> bool {
        !matches!(self, PlayerKind::Human)
    }
}

impl FromStr for PlayerKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "human" => Ok(PlayerKind::Human),
            "weak" | "weak-bot" | "bad-bot" => Ok(PlayerKind::WeakBot),
            "search" | "search-bot" | "good-bot" => Ok(PlayerKind::SearchBot),
            other => Err(ConfigError::UnknownPlayerKind(other.to_string())),
        }
    }
}

impl fmt::Display for PlayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerKind::Human => write!(f, "human"),
            PlayerKind::WeakBot => write!(f, "weak bot"),
            PlayerKind::SearchBot => write!(f, "search bot"),
        }
    }
}

/// Settings for one side
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerConfig {
    pub kind: PlayerKind,
    /// Only used by `PlayerKind::SearchBot`
    pub time_limit_ms: u64,
    pub max_depth: Option<usize>,
}

impl PlayerConfig {
    pub fn new(kind: PlayerKind) -> Self {
        Self {
            kind,
            time_limit_ms: DEFAULT_TIME_LIMIT_MS,
            max_depth: None,
        }
    }

    #[must_use]
    pub fn with_time_limit_ms(mut self, ms: u64) -> Self {
        self.time_limit_ms = ms;
        self
    }

    #[must_use]
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    pub fn limits(&self) -> SearchLimits {
        SearchLimits {
            time_limit: Duration::from_millis(self.time_limit_ms),
            max_depth: self.max_depth,
        }
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self::new(PlayerKind::Human)
    }
}

/// Settings fixed for the lifetime of one game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    pub board_size: usize,
    pub black: PlayerConfig,
    pub white: PlayerConfig,
    /// Seed for the bots' random choices; `None` seeds from entropy
    pub seed: Option<u64>,
}

impl GameConfig {
    pub fn new(board_size: usize, black: PlayerConfig, white: PlayerConfig) -> Self {
        Self {
            board_size,
            black,
            white,
            seed: None,
        }
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn player(&self, player: Player) -> &PlayerConfig {
        match player {
            Player::Black => &self.black,
            Player::White => &self.white,
        }
    }

    pub fn player_mut(&mut self, player: Player) -> &mut PlayerConfig {
        match player {
            Player::Black => &mut self.black,
            Player::White => &mut self.white,
        }
    }

    /// Reject configurations that cannot start a game
    pub fn validate(&self) -> Result<(), ConfigError> {
        Board::validate_size(self.board_size)?;
        for player in [Player::Black, Player::White] {
            if self.player(player).max_depth == Some(0) {
                return Err(ConfigError::ZeroDepth);
            }
        }
        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new(
            DEFAULT_BOARD_SIZE,
            PlayerConfig::new(PlayerKind::Human),
            PlayerConfig::new(PlayerKind::SearchBot),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = GameConfig::default();
        assert_eq!(config.board_size, 7);
        assert_eq!(config.black.kind, PlayerKind::Human);
        assert_eq!(config.white.kind, PlayerKind::SearchBot);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_board_sizes() {
        let mut config = GameConfig::default();
        config.board_size = 6;
        assert_eq!(
            config.validate(),
            Err(ConfigError::Board(BoardError::EvenSize(6)))
        );

        config.board_size = 1;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Board(BoardError::TooSmall { .. }))
        ));
    }

    #[test]
    fn test_zero_depth_rejected() {
        let mut config = GameConfig::default();
        config.white.max_depth = Some(0);
        assert_eq!(config.validate(), Err(ConfigError::ZeroDepth));
    }

    #[test]
    fn test_player_kind_parsing() {
        assert_eq!("human".parse::<PlayerKind>(), Ok(PlayerKind::Human));
        assert_eq!("bad-bot".parse::<PlayerKind>(), Ok(PlayerKind::WeakBot));
        assert_eq!("Search".parse::<PlayerKind>(), Ok(PlayerKind::SearchBot));
        assert_eq!("good-bot".parse::<PlayerKind>(), Ok(PlayerKind::SearchBot));
        assert!(matches!(
            "robot".parse::<PlayerKind>(),
            Err(ConfigError::UnknownPlayerKind(_))
        ));
    }

    #[test]
    fn test_player_limits() {
        let player = PlayerConfig::new(PlayerKind::SearchBot)
            .with_time_limit_ms(250)
            .with_max_depth(4);
        let limits = player.limits();
        assert_eq!(limits.time_limit, Duration::from_millis(250));
        assert_eq!(limits.max_depth, Some(4));
    }

    #[test]
    fn test_player_lookup() {
        let mut config = GameConfig::default();
        config.player_mut(Player::Black).kind = PlayerKind::WeakBot;
        assert_eq!(config.player(Player::Black).kind, PlayerKind::WeakBot);
        assert_eq!(config.player(Player::White).kind, PlayerKind::SearchBot);
    }
}
