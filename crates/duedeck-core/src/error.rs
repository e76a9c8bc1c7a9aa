//! Error types for parsing and validating task input.

use thiserror::Error;

/// Failure to parse a textual value into a domain type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Unknown category label.
    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    /// Unknown priority label.
    #[error("Unknown priority: {0}")]
    UnknownPriority(String),

    /// Unknown recurrence label.
    #[error("Unknown repeat rule: {0}")]
    UnknownRecurrence(String),

    /// Date not in `YYYY-MM-DD` form.
    #[error("Invalid date (expected YYYY-MM-DD): {0}")]
    InvalidDate(String),

    /// Blank task identifier.
    #[error("Task id must not be empty")]
    EmptyId,
}

/// Failure to accept a task draft.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftError {
    /// Title is empty or whitespace only.
    #[error("Title must not be empty")]
    BlankTitle,
}
