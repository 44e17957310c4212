//! Score type and evaluation weights

/// Search and evaluation score, always from the root searcher's side.
///
/// Floating point so the opponent weight of 1.5 stays exact and so the
/// decided-game sentinels can be real infinities.
pub type Score = f64;

/// Evaluation weights and score sentinels
pub struct ScoreWeights;

impl ScoreWeights {
    /// Center taken by the root player
    pub const WIN: Score = f64::INFINITY;
    /// Center taken by the root player's opponent
    pub const LOSS: Score = f64::NEG_INFINITY;
    /// Side to move has no legal placement
    pub const DRAW: Score = 0.0;

    /// Multiplier on the opponent's mobility.
    /// Above 1.0 so that restricting the opponent beats expanding ourselves.
    pub const OPPONENT_MOBILITY: f64 = 1.5;

    /// Legal center bonus is `CENTER_BONUS_FACTOR * N * N`
    pub const CENTER_BONUS_FACTOR: usize = 2;

    /// Weight of a legal placement `center_distance` steps from the center
    /// on a board of `size`: `(size - distance)^2`.
    #[inline]
    pub fn cell(size: usize, center_distance: usize) -> Score {
        let closeness = size.saturating_sub(center_distance);
        (closeness * closeness) as Score
    }

    /// Extra weight for having the center available
    #[inline]
    pub fn center_bonus(size: usize) -> Score {
        (size * size * Self::CENTER_BONUS_FACTOR) as Score
    }

    /// Whether a score is one of the decided-game sentinels
    #[inline]
    pub fn is_decisive(score: Score) -> bool {
        score.is_infinite()
    }
}
