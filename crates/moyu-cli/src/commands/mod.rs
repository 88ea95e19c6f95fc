pub mod config;
pub mod history;
pub mod stats;
pub mod track;

use std::sync::Arc;

use moyu_core::clock::SystemClock;
use moyu_core::tracker::TrackerService;
use moyu_infrastructure::JsonHistoryRepository;

/// Opens the tracker over the default on-disk history.
pub(crate) async fn open_service() -> anyhow::Result<TrackerService> {
    let repository = Arc::new(JsonHistoryRepository::at_default_location()?);
    Ok(TrackerService::new(repository, Arc::new(SystemClock)).await?)
}
