//! Storage seam used by [`TaskRepository`](crate::TaskRepository).

use duedeck_core::Task;
use duedeck_store_fs::{FileStore, StoreError};
use std::path::{Path, PathBuf};

/// Minimal storage abstraction required by the repository.
pub trait TaskStore {
    /// Read the saved collection, `None` when nothing has been saved yet.
    ///
    /// # Errors
    /// Returns a [`StoreError`]; unreadable documents are reported with
    /// [`StoreError::is_unreadable_document`] set.
    fn load(&self) -> Result<Option<Vec<Task>>, StoreError>;

    /// Replace the saved collection.
    ///
    /// # Errors
    /// Returns a [`StoreError`] when the collection cannot be written.
    fn save(&self, tasks: &[Task]) -> Result<(), StoreError>;

    /// Move an unreadable saved collection out of the way.
    ///
    /// The default implementation has nothing to move.
    ///
    /// # Errors
    /// Returns a [`StoreError`] when the backing data cannot be moved.
    fn quarantine(&self) -> Result<Option<PathBuf>, StoreError> {
        Ok(None)
    }

    /// Where the collection lives, for display.
    fn location(&self) -> Option<&Path> {
        None
    }
}

impl TaskStore for FileStore {
    fn load(&self) -> Result<Option<Vec<Task>>, StoreError> {
        self.read()
    }

    fn save(&self, tasks: &[Task]) -> Result<(), StoreError> {
        self.write(tasks)
    }

    fn quarantine(&self) -> Result<Option<PathBuf>, StoreError> {
        Self::quarantine(self)
    }

    fn location(&self) -> Option<&Path> {
        Some(self.path())
    }
}

impl<T: TaskStore + ?Sized> TaskStore for &T {
    fn load(&self) -> Result<Option<Vec<Task>>, StoreError> {
        (**self).load()
    }

    fn save(&self, tasks: &[Task]) -> Result<(), StoreError> {
        (**self).save(tasks)
    }

    fn quarantine(&self) -> Result<Option<PathBuf>, StoreError> {
        (**self).quarantine()
    }

    fn location(&self) -> Option<&Path> {
        (**self).location()
    }
}
