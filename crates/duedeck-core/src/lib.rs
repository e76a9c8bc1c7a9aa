//! Domain types and derived views for duedeck tasks.

/// Calendar-date parsing and formatting.
pub mod date;
/// Parse and validation errors.
pub mod error;
/// Identifier types.
pub mod id;
/// Example collection used on first start.
pub mod seed;
/// Task record, draft and enumerations.
pub mod task;
/// Case-insensitive text search.
pub mod text_matcher;
/// Derived projections over the collection.
pub mod views;

pub use error::{DraftError, ParseError};
pub use id::TaskId;
pub use seed::seed_tasks;
pub use task::{Category, Priority, Recurrence, Task, TaskDraft};
pub use text_matcher::TextMatcher;
pub use views::{CategoryFilter, CategoryStats, DueSplit, Grouped, TaskFilter};
