//! Session history: the record model, its persistence port, and the owning
//! store.

pub mod model;
pub mod repository;
pub mod store;

pub use model::SessionRecord;
pub use repository::HistoryRepository;
pub use store::HistoryStore;

#[cfg(test)]
pub(crate) mod testing {
    //! Test doubles shared by the core test suites.

    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, Ordering};

    use async_trait::async_trait;

    use super::model::SessionRecord;
    use super::repository::HistoryRepository;
    use crate::error::{MoyuError, Result};

    /// A repository over a plain in-memory vector, with a one-shot failure
    /// switch for rollback tests.
    #[derive(Default)]
    pub struct MemoryRepository {
        records: Mutex<Vec<SessionRecord>>,
        fail_next: AtomicBool,
    }

    impl MemoryRepository {
        pub fn fail_next_save(&self) {
            self.fail_next.store(true, Ordering::SeqCst);
        }
    }

    #[async_trait]
    impl HistoryRepository for MemoryRepository {
        async fn load(&self) -> Result<Vec<SessionRecord>> {
            Ok(self.records.lock().unwrap().clone())
        }

        async fn save(&self, records: &[SessionRecord]) -> Result<()> {
            if self.fail_next.swap(false, Ordering::SeqCst) {
                return Err(MoyuError::data_access("injected save failure"));
            }
            *self.records.lock().unwrap() = records.to_vec();
            Ok(())
        }
    }
}
