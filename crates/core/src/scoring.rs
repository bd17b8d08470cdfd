//! Scoring module - line-clear points and gravity speed-up
//!
//! A lock that clears `n` rows at once is worth `n * 100 * (n + 1)` points and
//! shortens the gravity interval by 10ms, never below 50ms. Locks that clear
//! nothing change neither.

use crate::types::{FALL_INTERVAL_STEP_MS, LINE_CLEAR_BASE, MIN_FALL_INTERVAL_MS};

/// Points for clearing `lines` rows with a single lock
///
/// ```
/// use blockfall_core::scoring::line_clear_score;
///
/// assert_eq!(line_clear_score(0), 0);
/// assert_eq!(line_clear_score(1), 200);
/// assert_eq!(line_clear_score(4), 2000);
/// ```
pub fn line_clear_score(lines: u32) -> u32 {
    lines
        .saturating_mul(LINE_CLEAR_BASE)
        .saturating_mul(lines.saturating_add(1))
}

/// Gravity interval after a lock that cleared at least one row
pub fn next_fall_interval_ms(current_ms: u32) -> u32 {
    current_ms
        .saturating_sub(FALL_INTERVAL_STEP_MS)
        .max(MIN_FALL_INTERVAL_MS)
}

/// Clamp a configured interval to the floor
pub fn clamp_fall_interval_ms(ms: u32) -> u32 {
    ms.max(MIN_FALL_INTERVAL_MS)
}
