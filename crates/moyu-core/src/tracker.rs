//! The tracker service.
//!
//! Single owner of the running-session state machine and the session
//! history. Display layers read snapshots and invoke the operations here;
//! nothing else mutates the session or the log.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::clock::Clock;
use crate::engine::{AccrualEngine, SessionSnapshot};
use crate::error::Result;
use crate::goal::{self, GoalProgress};
use crate::history::model::SessionRecord;
use crate::history::repository::HistoryRepository;
use crate::history::store::HistoryStore;
use crate::stats::{self, StatsOverview};

/// Cadence of the accrual tick.
const TICK_INTERVAL: Duration = Duration::from_secs(1);

struct TickTask {
    token: CancellationToken,
    handle: JoinHandle<()>,
}

pub struct TrackerService {
    engine: Arc<Mutex<AccrualEngine>>,
    history: Mutex<HistoryStore>,
    clock: Arc<dyn Clock>,
    /// At most one tick task is alive at a time.
    tick_task: Mutex<Option<TickTask>>,
}

impl TrackerService {
    /// Loads the persisted history and builds the service.
    pub async fn new(repository: Arc<dyn HistoryRepository>, clock: Arc<dyn Clock>) -> Result<Self> {
        let history = HistoryStore::load(repository).await?;
        Ok(Self {
            engine: Arc::new(Mutex::new(AccrualEngine::new())),
            history: Mutex::new(history),
            clock,
            tick_task: Mutex::new(None),
        })
    }

    /// Starts a session and the one-second tick task.
    ///
    /// Starting while already running keeps the existing session and its
    /// task; a second tick task is never spawned. An invalid salary is
    /// rejected before anything is touched.
    pub async fn start(&self, monthly_salary: f64) -> Result<()> {
        let mut engine = self.engine.lock().await;
        let was_running = engine.is_running();
        engine.start(monthly_salary)?;
        drop(engine);

        let mut slot = self.tick_task.lock().await;
        if was_running || slot.is_some() {
            return Ok(());
        }

        let token = CancellationToken::new();
        let task_token = token.clone();
        let engine = Arc::clone(&self.engine);
        // built here, not in the task, so the schedule is anchored to the
        // moment start() was called
        let mut interval = tokio::time::interval(TICK_INTERVAL);
        let handle = tokio::spawn(async move {
            // an interval's first tick completes immediately; consume it so
            // the first accrual lands a full second in
            interval.tick().await;
            loop {
                tokio::select! {
                    _ = task_token.cancelled() => break,
                    _ = interval.tick() => engine.lock().await.tick(),
                }
            }
        });
        *slot = Some(TickTask { token, handle });
        debug!("tick task spawned");
        Ok(())
    }

    /// Cancels the tick task and waits for it to finish.
    ///
    /// Safe to call when no task is alive.
    async fn cancel_tick(&self) {
        let task = self.tick_task.lock().await.take();
        if let Some(TickTask { token, handle }) = task {
            token.cancel();
            if let Err(err) = handle.await {
                warn!("tick task did not shut down cleanly: {err}");
            }
            debug!("tick task cancelled");
        }
    }

    /// Stops the session, committing a record when time elapsed.
    ///
    /// The tick task is cancelled before the engine transitions, so no tick
    /// can land after the stop. The committed record, if any, is persisted
    /// before this returns.
    pub async fn stop(&self) -> Result<Option<SessionRecord>> {
        self.cancel_tick().await;
        let record = self.engine.lock().await.stop(self.clock.now());
        self.commit(record).await
    }

    /// Stops the session and zeroes the counters.
    ///
    /// A running session with elapsed time is still committed first.
    pub async fn reset(&self) -> Result<Option<SessionRecord>> {
        self.cancel_tick().await;
        let record = self.engine.lock().await.reset(self.clock.now());
        self.commit(record).await
    }

    async fn commit(&self, record: Option<SessionRecord>) -> Result<Option<SessionRecord>> {
        let Some(record) = record else {
            return Ok(None);
        };
        self.history.lock().await.append(record.clone()).await?;
        debug!(
            seconds = record.seconds,
            earned = record.earned,
            "session committed"
        );
        Ok(Some(record))
    }

    /// Read-only view of the session counters.
    pub async fn snapshot(&self) -> SessionSnapshot {
        self.engine.lock().await.snapshot()
    }

    /// All committed records in commit order.
    pub async fn history(&self) -> Vec<SessionRecord> {
        self.history.lock().await.records().to_vec()
    }

    /// Deletes the record at `index` (0-based) and persists the updated
    /// history before returning it.
    pub async fn delete_record(&self, index: usize) -> Result<Vec<SessionRecord>> {
        let mut history = self.history.lock().await;
        history.delete_at(index).await?;
        Ok(history.records().to_vec())
    }

    /// Today/week/month totals relative to the current instant.
    pub async fn stats(&self) -> StatsOverview {
        let history = self.history.lock().await;
        stats::overview(history.records(), self.clock.now())
    }

    /// Progress of today's committed seconds against a goal duration.
    pub async fn goal_progress(&self, goal_hours: f64) -> Result<GoalProgress> {
        let today = self.stats().await.today;
        goal::completion_ratio(today.seconds, goal_hours)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::engine::Phase;
    use crate::history::testing::MemoryRepository;
    use chrono::{Local, TimeZone};

    async fn service() -> (TrackerService, Arc<MemoryRepository>) {
        let repo = Arc::new(MemoryRepository::default());
        let clock = Arc::new(FixedClock(
            Local.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap(),
        ));
        let service = TrackerService::new(repo.clone(), clock)
            .await
            .unwrap();
        (service, repo)
    }

    async fn settle(seconds: u64) {
        for _ in 0..seconds {
            tokio::time::advance(Duration::from_secs(1)).await;
        }
        tokio::task::yield_now().await;
        tokio::task::yield_now().await;
    }

    #[tokio::test(start_paused = true)]
    async fn ticks_accrue_once_per_second() {
        let (service, _repo) = service().await;
        service.start(40000.0).await.unwrap();

        settle(3).await;

        let snap = service.snapshot().await;
        assert_eq!(snap.phase, Phase::Running);
        assert_eq!(snap.elapsed_seconds, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn starting_twice_never_doubles_the_tick_rate() {
        let (service, _repo) = service().await;
        service.start(40000.0).await.unwrap();
        service.start(40000.0).await.unwrap();

        settle(2).await;

        assert_eq!(service.snapshot().await.elapsed_seconds, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn invalid_salary_is_rejected_without_a_task() {
        let (service, _repo) = service().await;
        let err = service.start(-5.0).await.unwrap_err();
        assert!(err.is_invalid_input());

        settle(2).await;

        let snap = service.snapshot().await;
        assert_eq!(snap.phase, Phase::Idle);
        assert_eq!(snap.elapsed_seconds, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn stop_commits_and_halts_accrual() {
        let (service, repo) = service().await;
        service.start(40000.0).await.unwrap();
        settle(5).await;

        let record = service.stop().await.unwrap().unwrap();
        assert_eq!(record.seconds, 5);

        // no further accrual after the task is cancelled
        settle(3).await;
        assert_eq!(service.snapshot().await.elapsed_seconds, 5);

        let persisted = repo.load().await.unwrap();
        assert_eq!(persisted, vec![record]);
    }

    #[tokio::test(start_paused = true)]
    async fn stop_without_elapsed_time_commits_nothing() {
        let (service, repo) = service().await;
        service.start(40000.0).await.unwrap();

        assert!(service.stop().await.unwrap().is_none());
        assert!(repo.load().await.unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn stop_while_idle_is_a_safe_noop() {
        let (service, _repo) = service().await;
        assert!(service.stop().await.unwrap().is_none());
        assert!(service.reset().await.unwrap().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn reset_commits_then_zeroes() {
        let (service, repo) = service().await;
        service.start(40000.0).await.unwrap();
        settle(2).await;

        let record = service.reset().await.unwrap().unwrap();
        assert_eq!(record.seconds, 2);

        let snap = service.snapshot().await;
        assert_eq!(snap.phase, Phase::Idle);
        assert_eq!(snap.elapsed_seconds, 0);
        assert_eq!(snap.earned, 0.0);
        assert_eq!(repo.load().await.unwrap().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn restarting_after_stop_spawns_a_fresh_task() {
        let (service, repo) = service().await;
        service.start(40000.0).await.unwrap();
        settle(2).await;
        service.stop().await.unwrap();

        service.start(40000.0).await.unwrap();
        settle(3).await;
        let record = service.stop().await.unwrap().unwrap();

        // counters survived the first stop, so the second session reports
        // the combined elapsed time
        assert_eq!(record.seconds, 5);
        assert_eq!(repo.load().await.unwrap().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn delete_record_validates_the_index() {
        let (service, _repo) = service().await;
        service.start(40000.0).await.unwrap();
        settle(1).await;
        service.stop().await.unwrap();

        let err = service.delete_record(3).await.unwrap_err();
        assert!(err.is_index_out_of_range());
        assert_eq!(service.history().await.len(), 1);

        let remaining = service.delete_record(0).await.unwrap();
        assert!(remaining.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn stats_and_goal_read_committed_history() {
        let (service, _repo) = service().await;
        service.start(40000.0).await.unwrap();
        settle(3600).await;
        service.stop().await.unwrap();

        let view = service.stats().await;
        assert_eq!(view.today.seconds, 3600);
        assert_eq!(view.week.seconds, 3600);
        assert_eq!(view.month.seconds, 3600);
        assert_eq!(view.today.earned, 166.67);

        let progress = service.goal_progress(2.0).await.unwrap();
        assert_eq!(progress.ratio, 0.5);

        let err = service.goal_progress(0.0).await.unwrap_err();
        assert!(matches!(err, crate::error::MoyuError::GoalUndefined));
    }
}
