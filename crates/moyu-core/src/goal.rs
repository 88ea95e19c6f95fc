//! Daily goal progress.

use crate::error::{MoyuError, Result};

/// Progress of today's accrued time against a goal duration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GoalProgress {
    /// Raw completion ratio; exceeds 1 once the goal is beaten.
    pub ratio: f64,
    /// The ratio clamped to `[0, 1]`, for bar-style displays.
    pub fraction: f64,
}

impl GoalProgress {
    /// Raw ratio as a percentage.
    pub fn percent(&self) -> f64 {
        self.ratio * 100.0
    }

    pub fn is_met(&self) -> bool {
        self.ratio >= 1.0
    }
}

/// Computes progress of `today_seconds` against a goal of `goal_hours`.
///
/// A zero, negative or non-finite goal has no defined ratio and is rejected
/// with [`MoyuError::GoalUndefined`]; the returned values are always finite.
pub fn completion_ratio(today_seconds: u64, goal_hours: f64) -> Result<GoalProgress> {
    if !goal_hours.is_finite() || goal_hours <= 0.0 {
        return Err(MoyuError::GoalUndefined);
    }
    let ratio = today_seconds as f64 / (goal_hours * 3600.0);
    Ok(GoalProgress {
        ratio,
        fraction: ratio.clamp(0.0, 1.0),
    })
}
