//! Decision engine for the center game
//!
//! Two players take turns placing stones on an odd N×N grid. Whoever places
//! on the center cell wins. Border cells are always open; a cell `d` steps
//! in from the border needs at least `d` of the mover's own stones visible
//! along the eight compass rays (the first stone on each ray counts, and
//! only if it is the mover's).
//!
//! # Architecture
//!
//! - [`board`]: Board representation, players and coordinates
//! - [`rules`]: Line of sight, placement legality, move generation
//! - [`eval`]: Static evaluation by weighted mobility
//! - [`search`]: Fixed-depth alpha-beta and the iterative deepening session
//! - [`engine`]: Move selection (immediate win, search, fallbacks, weak bot)
//! - [`game`]: Turn handling and bot threads for a front end to embed
//! - [`config`]: Board size, player kinds and time limits
//!
//! # Quick Start
//!
//! ```
//! use center::{Board, Engine, Player, Pos, SearchLimits};
//!
//! let mut board = Board::new(5).unwrap();
//! board.place_stone(Pos::new(0, 0), Player::Black);
//!
//! let mut engine = Engine::new(SearchLimits::from_millis(200).with_max_depth(3));
//! let result = engine.request_move(&board, Player::White);
//! if let Some(pos) = result.best_move {
//!     board.place_stone(pos, Player::White);
//!     println!("White plays {} ({})", pos, result.decision);
//! }
//! ```

pub mod board;
pub mod config;
pub mod engine;
pub mod eval;
pub mod game;
pub mod rules;
pub mod search;

// Re-export commonly used types for convenience
pub use board::{Board, BoardError, MoveError, Player, Pos};
pub use config::{ConfigError, GameConfig, PlayerConfig, PlayerKind, SearchLimits};
pub use engine::{Decision, Engine, MoveResult};
pub use game::{GameError, GameOutcome, GameState};
pub use rules::{is_legal, legal_moves};
pub use search::CancelToken;
