//! Storage adapters for the moyu tracker.
//!
//! Implements the core's persistence ports over the local filesystem:
//! history in a single JSON file with atomic writes, configuration in TOML.

pub mod config_storage;
pub mod json_history_repository;
pub mod memory_history_repository;
pub mod paths;
pub mod storage;

pub use json_history_repository::JsonHistoryRepository;
pub use memory_history_repository::InMemoryHistoryRepository;
