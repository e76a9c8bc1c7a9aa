//! In-memory [`TaskStore`] used by tests and dry runs.

use duedeck_core::Task;
use duedeck_store_fs::StoreError;
use std::cell::{Cell, RefCell};
use std::io;
use std::path::PathBuf;

use crate::task_store::TaskStore;

/// What a [`MemoryStore`] returns from `load`.
#[derive(Debug, Clone, Default)]
enum Saved {
    #[default]
    Empty,
    Tasks(Vec<Task>),
    Unreadable(String),
}

/// Store that keeps the saved collection in memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    saved: RefCell<Saved>,
    saves: Cell<usize>,
    fail_saves: Cell<bool>,
    fail_quarantine: Cell<bool>,
}

impl MemoryStore {
    /// Store with nothing saved.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store that already holds `tasks`.
    #[must_use]
    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        let store = Self::default();
        store.saved.replace(Saved::Tasks(tasks));
        store
    }

    /// Store whose saved document cannot be parsed.
    #[must_use]
    pub fn unreadable(reason: impl Into<String>) -> Self {
        let store = Self::default();
        store.saved.replace(Saved::Unreadable(reason.into()));
        store
    }

    /// Make every following `save` fail (or succeed again).
    pub fn fail_saves(&self, fail: bool) {
        self.fail_saves.set(fail);
    }

    /// Make `quarantine` fail as if the document could not be moved.
    pub fn fail_quarantine(&self, fail: bool) {
        self.fail_quarantine.set(fail);
    }

    /// Number of successful saves.
    #[must_use]
    pub fn save_count(&self) -> usize {
        self.saves.get()
    }

    /// Last successfully saved collection.
    #[must_use]
    pub fn saved_tasks(&self) -> Option<Vec<Task>> {
        match &*self.saved.borrow() {
            Saved::Tasks(tasks) => Some(tasks.clone()),
            Saved::Empty | Saved::Unreadable(_) => None,
        }
    }
}

impl TaskStore for MemoryStore {
    fn load(&self) -> Result<Option<Vec<Task>>, StoreError> {
        match &*self.saved.borrow() {
            Saved::Empty => Ok(None),
            Saved::Tasks(tasks) => Ok(Some(tasks.clone())),
            Saved::Unreadable(reason) => Err(StoreError::Corrupt(reason.clone())),
        }
    }

    fn save(&self, tasks: &[Task]) -> Result<(), StoreError> {
        if self.fail_saves.get() {
            return Err(StoreError::Io {
                path: PathBuf::from("<memory>"),
                source: io::Error::other("saves disabled"),
            });
        }
        self.saved.replace(Saved::Tasks(tasks.to_vec()));
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }

    fn quarantine(&self) -> Result<Option<PathBuf>, StoreError> {
        if self.fail_quarantine.get() {
            return Err(StoreError::Io {
                path: PathBuf::from("<memory>"),
                source: io::Error::from(io::ErrorKind::PermissionDenied),
            });
        }
        let was_unreadable = matches!(&*self.saved.borrow(), Saved::Unreadable(_));
        if was_unreadable {
            self.saved.replace(Saved::Empty);
        }
        Ok(None)
    }
}
