//! The history store: in-memory log plus persistence.

use std::sync::Arc;

use super::model::SessionRecord;
use super::repository::HistoryRepository;
use crate::error::{MoyuError, Result};

/// In-memory session history backed by a repository.
///
/// Insertion order is commit order and is never re-sorted. Every mutation
/// persists the full sequence before returning, so the stored state always
/// reflects the in-memory log. On a failed save the mutation is rolled back
/// and the store is unchanged.
pub struct HistoryStore {
    records: Vec<SessionRecord>,
    repository: Arc<dyn HistoryRepository>,
}

impl HistoryStore {
    /// Loads the persisted history into a new store.
    pub async fn load(repository: Arc<dyn HistoryRepository>) -> Result<Self> {
        let records = repository.load().await?;
        Ok(Self {
            records,
            repository,
        })
    }

    /// All records in commit order.
    pub fn records(&self) -> &[SessionRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Appends a committed record and persists the updated sequence.
    pub async fn append(&mut self, record: SessionRecord) -> Result<&[SessionRecord]> {
        self.records.push(record);
        match self.repository.save(&self.records).await {
            Ok(()) => Ok(&self.records),
            Err(err) => {
                self.records.pop();
                Err(err)
            }
        }
    }

    /// Removes the record at `index` and persists the updated sequence.
    ///
    /// Fails with [`MoyuError::IndexOutOfRange`] when `index` is outside the
    /// log. Other records keep their positions and field values.
    pub async fn delete_at(&mut self, index: usize) -> Result<&[SessionRecord]> {
        if index >= self.records.len() {
            return Err(MoyuError::index_out_of_range(index, self.records.len()));
        }
        let removed = self.records.remove(index);
        match self.repository.save(&self.records).await {
            Ok(()) => Ok(&self.records),
            Err(err) => {
                self.records.insert(index, removed);
                Err(err)
            }
        }
    }
}
