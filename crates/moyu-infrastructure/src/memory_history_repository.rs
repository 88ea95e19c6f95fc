//! In-memory history repository.
//!
//! Backs ephemeral runs and tests that should not touch the filesystem.

use async_trait::async_trait;
use tokio::sync::Mutex;

use moyu_core::error::Result;
use moyu_core::history::{HistoryRepository, SessionRecord};

#[derive(Default)]
pub struct InMemoryHistoryRepository {
    records: Mutex<Vec<SessionRecord>>,
}

impl InMemoryHistoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with a pre-seeded history.
    pub fn with_records(records: Vec<SessionRecord>) -> Self {
        Self {
            records: Mutex::new(records),
        }
    }
}

#[async_trait]
impl HistoryRepository for InMemoryHistoryRepository {
    async fn load(&self) -> Result<Vec<SessionRecord>> {
        Ok(self.records.lock().await.clone())
    }

    async fn save(&self, records: &[SessionRecord]) -> Result<()> {
        *self.records.lock().await = records.to_vec();
        Ok(())
    }
}
