//! History repository trait.
//!
//! Defines the interface for persisting the session history.

use async_trait::async_trait;

use super::model::SessionRecord;
use crate::error::Result;

/// An abstract repository for the persisted session history.
///
/// This trait decouples the tracker core from the specific storage mechanism
/// (e.g. a JSON file, a database, an in-memory store). The history is always
/// read and written as a whole sequence; insertion order is part of the
/// contract and must be preserved.
#[async_trait]
pub trait HistoryRepository: Send + Sync {
    /// Loads the persisted history.
    ///
    /// An absent or malformed payload yields an empty sequence, never an
    /// error: a damaged history file must not prevent the tracker from
    /// starting.
    async fn load(&self) -> Result<Vec<SessionRecord>>;

    /// Persists the full history, replacing whatever was stored before.
    ///
    /// When this returns `Ok`, the stored state reflects `records`.
    async fn save(&self, records: &[SessionRecord]) -> Result<()>;
}
