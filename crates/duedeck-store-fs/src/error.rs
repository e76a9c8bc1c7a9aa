//! Error types for file store operations.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during `FileStore` operations.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Reading, writing or renaming a file failed.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// File the operation targeted.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize tasks to JSON.
    #[error("Failed to serialize tasks: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The stored document could not be parsed into tasks.
    #[error("Stored tasks are unreadable: {0}")]
    Corrupt(String),

    /// The document was written by a newer layout than this build understands.
    #[error("Unsupported storage version {found} (supported up to {supported})")]
    UnsupportedVersion {
        /// Version found on disk.
        found: u64,
        /// Newest version this build reads.
        supported: u32,
    },
}

impl StoreError {
    /// True for errors where the stored document itself is unusable, as opposed
    /// to the file system refusing access.
    #[must_use]
    pub const fn is_unreadable_document(&self) -> bool {
        matches!(self, Self::Corrupt(_) | Self::UnsupportedVersion { .. })
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
