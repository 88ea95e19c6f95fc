//! The session accrual state machine.

use chrono::{DateTime, Local};
use tracing::debug;

use crate::error::{MoyuError, Result};
use crate::history::model::SessionRecord;

/// Phase of the running-session state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Running,
}

/// Read-only view of the session counters, for display layers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionSnapshot {
    pub phase: Phase,
    pub elapsed_seconds: u64,
    pub earned: f64,
    pub rate: f64,
}

/// The running-session state machine: Idle -> Running -> Idle.
///
/// Owns the transient counters and nothing else (no timer, no I/O). A caller
/// drives it with exactly one [`tick`](Self::tick) per elapsed second while
/// Running, and supplies the commit instant on stop.
///
/// While Running, `earned` tracks `elapsed_seconds * rate` by incremental
/// accumulation; rounding happens once, at commit time.
#[derive(Debug, Default)]
pub struct AccrualEngine {
    phase: Phase,
    rate: f64,
    elapsed_seconds: u64,
    earned: f64,
}

impl AccrualEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Derives the per-second rate from a monthly salary.
    ///
    /// A month counts as 30 working days of 8 hours.
    pub fn rate_per_second(monthly_salary: f64) -> f64 {
        monthly_salary / 30.0 / 8.0 / 60.0 / 60.0
    }

    /// Starts a session.
    ///
    /// Rejects a non-finite or non-positive salary with `InvalidInput`,
    /// leaving the state untouched. Starting while already Running is a
    /// no-op, not an error: the active session keeps its original rate.
    pub fn start(&mut self, monthly_salary: f64) -> Result<()> {
        if !monthly_salary.is_finite() || monthly_salary <= 0.0 {
            return Err(MoyuError::invalid_input(format!(
                "monthly salary must be a positive number, got {monthly_salary}"
            )));
        }
        if self.phase == Phase::Running {
            return Ok(());
        }
        self.rate = Self::rate_per_second(monthly_salary);
        self.phase = Phase::Running;
        debug!(rate = self.rate, "session started");
        Ok(())
    }

    /// Advances the counters by one second.
    ///
    /// The only mutator of the running totals. Ticks delivered while Idle
    /// are ignored.
    pub fn tick(&mut self) {
        if self.phase != Phase::Running {
            return;
        }
        self.elapsed_seconds += 1;
        self.earned += self.rate;
    }

    /// Stops the session.
    ///
    /// Returns the committed record when at least one second elapsed. The
    /// counters keep their final values until [`reset`](Self::reset), so a
    /// display can continue to show them. Stopping while Idle is a no-op.
    pub fn stop(&mut self, now: DateTime<Local>) -> Option<SessionRecord> {
        if self.phase != Phase::Running {
            return None;
        }
        self.phase = Phase::Idle;
        if self.elapsed_seconds == 0 {
            return None;
        }
        let record = SessionRecord::new(now, self.earned, self.elapsed_seconds);
        debug!(seconds = record.seconds, earned = record.earned, "session stopped");
        Some(record)
    }

    /// Stops the session and zeroes the counters.
    ///
    /// Emission from the stop still happens when applicable, so a running
    /// session with elapsed time is committed before the counters clear.
    pub fn reset(&mut self, now: DateTime<Local>) -> Option<SessionRecord> {
        let record = self.stop(now);
        self.elapsed_seconds = 0;
        self.earned = 0.0;
        record
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    /// Read-only copy of the current counters.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            phase: self.phase,
            elapsed_seconds: self.elapsed_seconds,
            earned: self.earned,
            rate: self.rate,
        }
    }
}
