//! Session record domain model.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// A committed tracking session.
///
/// Created by the accrual engine when a running session stops with at least
/// one elapsed second, then owned by the history store. Fields are immutable
/// after creation.
///
/// The serialized form is exactly `{"timestamp": <ISO 8601 string>,
/// "earned": <number>, "seconds": <integer>}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    /// Commit instant, i.e. when the session was stopped.
    pub timestamp: DateTime<Local>,
    /// Amount accrued over the session, rounded to two decimals at creation.
    pub earned: f64,
    /// Whole seconds the session ran.
    pub seconds: u64,
}

impl SessionRecord {
    /// Builds a record from raw accrual totals, rounding the amount to two
    /// decimals.
    pub fn new(timestamp: DateTime<Local>, earned: f64, seconds: u64) -> Self {
        Self {
            timestamp,
            earned: round2(earned),
            seconds,
        }
    }
}

/// Rounds to two fractional digits.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Formats whole seconds as `HH:MM:SS`.
pub fn format_duration(total_seconds: u64) -> String {
    let hrs = total_seconds / 3600;
    let mins = (total_seconds % 3600) / 60;
    let secs = total_seconds % 60;
    format!("{hrs:02}:{mins:02}:{secs:02}")
}
