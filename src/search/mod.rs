//! Search module for the center-game AI
//!
//! Contains:
//! - Cooperative cancellation token shared with the host
//! - Fixed-depth alpha-beta minimax with principal variation
//! - Iterative deepening session, stepped one depth at a time

pub mod alphabeta;
pub mod cancel;
pub mod session;

pub use alphabeta::{RootResult, SearchOutcome, Searcher};
pub use cancel::CancelToken;
pub use session::{Phase, SearchSession};
