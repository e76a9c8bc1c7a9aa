//! The authoritative in-memory task collection.

use duedeck_core::{DraftError, Task, TaskDraft, TaskId, seed_tasks};
use duedeck_store_fs::StoreError;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::clock::{Clock, SystemClock};
use crate::task_store::TaskStore;

/// Errors surfaced by [`TaskRepository`].
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Backing store returned an error.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
    /// Submitted values were rejected.
    #[error("invalid task: {0}")]
    InvalidDraft(#[from] DraftError),
}

/// How the collection was obtained at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// A saved collection was read back.
    Restored,
    /// Nothing was saved yet; the example tasks were used.
    Seeded,
    /// The saved collection was unreadable and was replaced by the example tasks.
    Recovered {
        /// Why the saved collection could not be used.
        reason: String,
        /// Where the unreadable document was moved, if anywhere.
        backup: Option<PathBuf>,
    },
}

/// Ordered task collection backed by a [`TaskStore`].
///
/// Every mutation builds the next collection, saves it, and only then makes
/// it current. A failed save leaves the collection untouched.
#[derive(Debug)]
pub struct TaskRepository<S, C = SystemClock> {
    store: S,
    clock: C,
    tasks: Vec<Task>,
    outcome: LoadOutcome,
}

impl<S: TaskStore, C: Clock> TaskRepository<S, C> {
    /// Load the saved collection, falling back to the example tasks when there
    /// is none or it cannot be read.
    ///
    /// # Errors
    /// Returns an error when the store fails for reasons other than an
    /// unreadable document. Failing to move an unreadable document aside is
    /// only logged.
    pub fn load(store: S, clock: C) -> Result<Self, RepositoryError> {
        let (tasks, outcome) = match store.load() {
            Ok(Some(tasks)) => {
                debug!(count = tasks.len(), "Restored saved tasks");
                (tasks, LoadOutcome::Restored)
            }
            Ok(None) => {
                debug!("No saved tasks, using examples");
                (seed_tasks(clock.today(), clock.now_millis()), LoadOutcome::Seeded)
            }
            Err(err) if err.is_unreadable_document() => {
                let reason = err.to_string();
                let backup = store.quarantine().unwrap_or_else(|err| {
                    warn!(%err, "Could not move unreadable task file aside");
                    None
                });
                warn!(%reason, backup = ?backup, "Saved tasks unreadable, using examples");
                (
                    seed_tasks(clock.today(), clock.now_millis()),
                    LoadOutcome::Recovered { reason, backup },
                )
            }
            Err(err) => return Err(err.into()),
        };

        Ok(Self {
            store,
            clock,
            tasks,
            outcome,
        })
    }

    /// How the collection was obtained.
    pub const fn outcome(&self) -> &LoadOutcome {
        &self.outcome
    }

    /// Tasks in display order, newest additions first.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Look up a task by id.
    pub fn get(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| &task.id == id)
    }

    /// Number of tasks.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// True when there are no tasks.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// The backing store.
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// The clock used for creation timestamps and the example tasks.
    pub const fn clock(&self) -> &C {
        &self.clock
    }

    /// Write the current collection.
    ///
    /// # Errors
    /// Returns an error when the store rejects the write.
    pub fn save(&self) -> Result<(), RepositoryError> {
        self.store.save(&self.tasks)?;
        Ok(())
    }

    /// Create a pending task from `draft` and put it first.
    ///
    /// # Errors
    /// Returns [`RepositoryError::InvalidDraft`] for a blank title and
    /// [`RepositoryError::Store`] when saving fails.
    pub fn add(&mut self, draft: TaskDraft) -> Result<TaskId, RepositoryError> {
        draft.validate()?;
        let id = self.fresh_id();
        let task = Task::from_draft(id.clone(), draft.normalized(), self.clock.now_millis());

        let mut next = Vec::with_capacity(self.tasks.len() + 1);
        next.push(task);
        next.extend(self.tasks.iter().cloned());
        self.commit(next)?;

        info!(task = %id, "Added task");
        Ok(id)
    }

    /// Replace the stored task that has the same id, keeping its position and
    /// creation timestamp.
    ///
    /// Returns `false` without saving when no task has that id.
    ///
    /// # Errors
    /// Returns [`RepositoryError::InvalidDraft`] for a blank title and
    /// [`RepositoryError::Store`] when saving fails.
    pub fn update(&mut self, task: Task) -> Result<bool, RepositoryError> {
        let draft = task.to_draft();
        draft.validate()?;
        let task = task.with_draft(draft.normalized());
        let Some(pos) = self.position(&task.id) else {
            debug!(task = %task.id, "Update ignored, unknown task");
            return Ok(false);
        };

        let mut next = self.tasks.clone();
        let created_at = next[pos].created_at;
        next[pos] = Task { created_at, ..task };
        let id = next[pos].id.clone();
        self.commit(next)?;

        info!(task = %id, "Updated task");
        Ok(true)
    }

    /// Flip completion of the task with `id`.
    ///
    /// Returns the new completion state, or `None` without saving when no
    /// task has that id.
    ///
    /// # Errors
    /// Returns [`RepositoryError::Store`] when saving fails.
    pub fn toggle_completion(&mut self, id: &TaskId) -> Result<Option<bool>, RepositoryError> {
        let Some(pos) = self.position(id) else {
            debug!(task = %id, "Toggle ignored, unknown task");
            return Ok(None);
        };

        let mut next = self.tasks.clone();
        next[pos].completed = !next[pos].completed;
        let completed = next[pos].completed;
        self.commit(next)?;

        info!(task = %id, completed, "Toggled task");
        Ok(Some(completed))
    }

    /// Delete the task with `id`.
    ///
    /// Returns `false` without saving when no task has that id.
    ///
    /// # Errors
    /// Returns [`RepositoryError::Store`] when saving fails.
    pub fn remove(&mut self, id: &TaskId) -> Result<bool, RepositoryError> {
        let Some(pos) = self.position(id) else {
            debug!(task = %id, "Remove ignored, unknown task");
            return Ok(false);
        };

        let mut next = self.tasks.clone();
        next.remove(pos);
        self.commit(next)?;

        info!(task = %id, "Removed task");
        Ok(true)
    }

    fn position(&self, id: &TaskId) -> Option<usize> {
        self.tasks.iter().position(|task| &task.id == id)
    }

    fn fresh_id(&self) -> TaskId {
        loop {
            let id = TaskId::generate();
            if self.position(&id).is_none() {
                return id;
            }
        }
    }

    fn commit(&mut self, next: Vec<Task>) -> Result<(), RepositoryError> {
        self.store.save(&next)?;
        self.tasks = next;
        Ok(())
    }
}
