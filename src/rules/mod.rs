//! Placement rules for the center game
//!
//! This module implements the rule set:
//! - Line of sight along the eight compass rays (blocked by any stone)
//! - Supported placement: a cell `d` steps in from the border needs at
//!   least `d` friendly stones in sight
//! - Move generation with center-first ordering
//!
//! Winning is holding the center; a side with no legal placement ends the
//! game in a draw.

pub mod placement;
pub mod sight;

// Re-exports for convenient access
pub use placement::{
    check_placement, is_legal, legal_moves, order_by_center_distance, ordered_legal_moves,
};
pub use sight::{can_see_center, friendly_sightings, DIRECTIONS};
