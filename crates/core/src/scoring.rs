//! Scoring module - line-clear points and level thresholds
//!
//! Clears pay a flat rate per row. Level is derived from score through a cubic
//! threshold and only ever moves up one step per evaluation.

use crate::types::SCORE_PER_LINE;

/// Points for clearing `lines` rows at once
pub fn line_clear_score(lines: u32) -> u32 {
    lines.saturating_mul(SCORE_PER_LINE)
}

/// Score needed to leave `level`: `1000 × (level + 1)³ / 5`
pub fn level_threshold(level: u32) -> u64 {
    let n = level as u64 + 1;
    n.saturating_mul(n)
        .saturating_mul(n)
        .saturating_mul(1000)
        / 5
}

/// The level after one evaluation of `score` against the current `level`.
///
/// Advances at most one level even if several thresholds were crossed; the
/// next evaluation picks up the rest.
pub fn next_level(score: u32, level: u32) -> u32 {
    if score as u64 >= level_threshold(level) {
        level + 1
    } else {
        level
    }
}
