//! Scoring module - line bonuses, levels and gravity speed
//!
//! - A lock that clears `n` lines awards `LINE_SCORES[n] * level`, using the
//!   level in effect before the lock. Five or more lines (only reachable on a
//!   hand-built board) fall back to the single-line bonus.
//! - Level starts at 1 and goes up every 10 lines.
//! - Gravity starts at 1000ms per row and speeds up 50ms per level, never
//!   faster than 50ms.

use crate::types::{
    BASE_GRAVITY_MS, GRAVITY_FLOOR_MS, GRAVITY_STEP_MS, HARD_DROP_CELL_SCORE, LINES_PER_LEVEL,
    LINE_SCORES, START_LEVEL,
};

/// Points for clearing `lines` rows at `level`
pub fn line_clear_score(lines: usize, level: u32) -> u32 {
    let base = match LINE_SCORES.get(lines) {
        Some(&base) => base,
        None => LINE_SCORES[1],
    };
    base.saturating_mul(level)
}

/// Level for a running line total
pub fn level_for_lines(total_lines: u32) -> u32 {
    total_lines / LINES_PER_LEVEL + START_LEVEL
}

/// Gravity interval (ms per row) for a level
pub fn gravity_interval_ms(level: u32) -> u32 {
    let speedup = level.saturating_sub(START_LEVEL).saturating_mul(GRAVITY_STEP_MS);
    BASE_GRAVITY_MS
        .saturating_sub(speedup)
        .max(GRAVITY_FLOOR_MS)
}

/// Points for a hard drop that fell `cells` rows
pub fn hard_drop_score(cells: u32) -> u32 {
    cells.saturating_mul(HARD_DROP_CELL_SCORE)
}
