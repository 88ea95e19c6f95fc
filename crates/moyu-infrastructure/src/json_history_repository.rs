//! JSON-file-backed history repository.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use moyu_core::error::{MoyuError, Result};
use moyu_core::history::{HistoryRepository, SessionRecord};

use crate::paths::MoyuPaths;
use crate::storage::AtomicJsonFile;

/// Stores the whole history in a single JSON file.
///
/// The payload is the record sequence in insertion order. A missing file is
/// an empty history; a malformed file is recovered to an empty history with
/// a warning instead of being surfaced as an error, so a damaged file never
/// prevents the tracker from starting.
pub struct JsonHistoryRepository {
    file: Arc<AtomicJsonFile<Vec<SessionRecord>>>,
}

impl JsonHistoryRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            file: Arc::new(AtomicJsonFile::new(path)),
        }
    }

    /// Repository at the default location, `~/.config/moyu/history.json`.
    pub fn at_default_location() -> Result<Self> {
        let path = MoyuPaths::history_file().map_err(|e| MoyuError::io(e.to_string()))?;
        Ok(Self::new(path))
    }
}

#[async_trait]
impl HistoryRepository for JsonHistoryRepository {
    async fn load(&self) -> Result<Vec<SessionRecord>> {
        let file = Arc::clone(&self.file);
        tokio::task::spawn_blocking(move || match file.load() {
            Ok(Some(records)) => Ok(records),
            Ok(None) => Ok(Vec::new()),
            Err(err) if err.is_serialization() => {
                warn!(path = ?file.path(), "history file is malformed, starting empty: {err}");
                Ok(Vec::new())
            }
            Err(err) => Err(err),
        })
        .await
        .map_err(|e| MoyuError::data_access(format!("history load task failed: {e}")))?
    }

    async fn save(&self, records: &[SessionRecord]) -> Result<()> {
        let file = Arc::clone(&self.file);
        let records = records.to_vec();
        tokio::task::spawn_blocking(move || file.save(&records))
            .await
            .map_err(|e| MoyuError::data_access(format!("history save task failed: {e}")))?
    }
}
