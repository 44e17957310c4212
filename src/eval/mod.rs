//! Evaluation module for center-game positions
//!
//! Leaves that are neither won nor lost are scored by weighted mobility:
//! - Every legal placement is worth the square of its closeness to center
//! - A legal center placement carries a large fixed bonus
//! - The opponent's mobility is weighted heavier than our own

pub mod heuristic;
pub mod weights;

pub use heuristic::{evaluate, mobility};
pub use weights::{Score, ScoreWeights};
