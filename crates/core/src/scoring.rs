//! Scoring module - line-clear points and gravity speed-ups
//!
//! Points are awarded once per lock, from the number of lines that lock
//! cleared. Gravity speeds up by a fixed step every `lines_per_speedup`
//! cumulative lines, down to a floor.

use crate::config::GameConfig;
use crate::types::LINE_SCORES;

/// Points for clearing `lines` rows in a single lock.
///
/// A standard piece can clear at most four rows; anything else scores 0.
pub fn line_clear_score(lines: usize) -> u32 {
    LINE_SCORES.get(lines).copied().unwrap_or(0)
}

/// Number of speed-ups earned after `total_lines` cleared lines.
pub fn speed_ups(total_lines: u32, lines_per_speedup: u32) -> u32 {
    total_lines / lines_per_speedup.max(1)
}

/// Gravity interval (ms per row) after `total_lines` cleared lines.
pub fn gravity_interval_ms(config: &GameConfig, total_lines: u32) -> u32 {
    let reduction = speed_ups(total_lines, config.lines_per_speedup)
        .saturating_mul(config.gravity_step_ms);
    config
        .initial_gravity_ms
        .saturating_sub(reduction)
        .max(config.min_gravity_ms)
}
