//! Application layer logic for duedeck.
//!
//! This crate owns the task collection at runtime: the storage seam, the
//! repository every surface mutates through, the clock used for "today", and
//! configuration shared by the CLI and the TUI.

pub mod clock;
pub mod config;
pub mod memory_store;
pub mod task_repository;
pub mod task_store;

// Re-exports for convenience
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{AppConfig, StorageConfig, StartView, resolve_data_file};
pub use memory_store::MemoryStore;
pub use task_repository::{LoadOutcome, RepositoryError, TaskRepository};
pub use task_store::TaskStore;
