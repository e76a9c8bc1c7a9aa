//! File-backed storage for duedeck tasks.
//!
//! The whole collection lives in one JSON document:
//!
//! ```json
//! { "version": 1, "tasks": [ ... ] }
//! ```
//!
//! A bare array of tasks (the unversioned layout) is still accepted on read
//! and is rewritten in the versioned layout by the next save.

mod error;

pub use error::StoreError;

use duedeck_core::Task;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashSet;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use time::OffsetDateTime;
use tracing::{debug, info, warn};

/// Layout version written by this build.
pub const STORAGE_VERSION: u32 = 1;

/// Default file name inside the data directory.
pub const DEFAULT_FILE_NAME: &str = "tasks.json";

#[derive(Serialize)]
struct DocumentRef<'a> {
    version: u32,
    tasks: &'a [Task],
}

/// Storage based on a single JSON file.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Store reading and writing `path`. Nothing is touched until the first call.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the JSON document.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the stored collection.
    ///
    /// Returns `Ok(None)` when the file does not exist or is blank.
    ///
    /// # Errors
    /// Returns [`StoreError::Io`] when the file cannot be read, and
    /// [`StoreError::Corrupt`] / [`StoreError::UnsupportedVersion`] when its
    /// contents cannot be turned into tasks.
    pub fn read(&self) -> Result<Option<Vec<Task>>, StoreError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No stored tasks");
                return Ok(None);
            }
            Err(err) => return Err(StoreError::io(&self.path, err)),
        };
        if raw.trim().is_empty() {
            debug!(path = %self.path.display(), "Stored tasks file is blank");
            return Ok(None);
        }

        let tasks = decode_document(&raw)?;
        debug!(path = %self.path.display(), count = tasks.len(), "Loaded tasks");
        Ok(Some(tasks))
    }

    /// Replace the stored collection with `tasks`.
    ///
    /// The document is written to a temporary file next to the target and
    /// renamed over it, so readers never observe a half-written file.
    ///
    /// # Errors
    /// Returns an error if serialization or any file operation fails.
    pub fn write(&self, tasks: &[Task]) -> Result<(), StoreError> {
        let body = encode_document(tasks)?;
        let dir = self.parent_dir();
        fs::create_dir_all(&dir).map_err(|err| StoreError::io(&dir, err))?;

        let mut tmp = NamedTempFile::new_in(&dir).map_err(|err| StoreError::io(&dir, err))?;
        tmp.write_all(body.as_bytes())
            .and_then(|()| tmp.flush())
            .and_then(|()| tmp.as_file().sync_all())
            .map_err(|err| StoreError::io(tmp.path(), err))?;
        tmp.persist(&self.path)
            .map_err(|err| StoreError::io(&self.path, err.error))?;

        info!(path = %self.path.display(), count = tasks.len(), "Saved tasks");
        Ok(())
    }

    /// Move an unreadable document aside so the next save does not destroy it.
    ///
    /// Returns the new location, or `None` when there was nothing to move.
    ///
    /// # Errors
    /// Returns [`StoreError::Io`] if the rename fails.
    pub fn quarantine(&self) -> Result<Option<PathBuf>, StoreError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let stamp = OffsetDateTime::now_utc().unix_timestamp();
        let file_name = self
            .path
            .file_name()
            .map_or_else(|| DEFAULT_FILE_NAME.into(), |name| name.to_string_lossy().into_owned());
        let target = self.path.with_file_name(format!("{file_name}.corrupt-{stamp}"));
        fs::rename(&self.path, &target).map_err(|err| StoreError::io(&self.path, err))?;
        warn!(
            from = %self.path.display(),
            to = %target.display(),
            "Moved unreadable task file aside"
        );
        Ok(Some(target))
    }

    fn parent_dir(&self) -> PathBuf {
        self.path
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
    }
}

/// Serialize tasks into the versioned document layout.
///
/// # Errors
/// Returns [`StoreError::Serialize`] if JSON encoding fails.
pub fn encode_document(tasks: &[Task]) -> Result<String, StoreError> {
    let doc = DocumentRef {
        version: STORAGE_VERSION,
        tasks,
    };
    let mut body = serde_json::to_string_pretty(&doc)?;
    body.push('\n');
    Ok(body)
}

/// Parse either layout into tasks, rejecting duplicate identifiers.
///
/// # Errors
/// Returns [`StoreError::Corrupt`] for malformed documents and
/// [`StoreError::UnsupportedVersion`] for layouts newer than [`STORAGE_VERSION`].
pub fn decode_document(raw: &str) -> Result<Vec<Task>, StoreError> {
    let value: Value = serde_json::from_str(raw).map_err(|err| StoreError::Corrupt(err.to_string()))?;

    let tasks_value = match value {
        Value::Array(_) => value,
        Value::Object(mut map) => {
            let version = map
                .get("version")
                .and_then(Value::as_u64)
                .ok_or_else(|| StoreError::Corrupt("missing numeric \"version\" field".into()))?;
            if version > u64::from(STORAGE_VERSION) {
                return Err(StoreError::UnsupportedVersion {
                    found: version,
                    supported: STORAGE_VERSION,
                });
            }
            map.remove("tasks")
                .ok_or_else(|| StoreError::Corrupt("missing \"tasks\" field".into()))?
        }
        _ => return Err(StoreError::Corrupt("expected an object or an array".into())),
    };

    let tasks: Vec<Task> =
        serde_json::from_value(tasks_value).map_err(|err| StoreError::Corrupt(err.to_string()))?;

    let mut seen = HashSet::with_capacity(tasks.len());
    for task in &tasks {
        if !seen.insert(task.id.as_str()) {
            return Err(StoreError::Corrupt(format!("duplicate task id {}", task.id)));
        }
    }
    Ok(tasks)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used)]

    use super::*;
    use duedeck_core::seed_tasks;
    use time::macros::date;

    #[test]
    fn encode_writes_version_field() {
        let tasks = seed_tasks(date!(2025 - 04 - 15), 1);
        let body = encode_document(&tasks).expect("encode");
        let value: Value = serde_json::from_str(&body).expect("valid json");
        assert_eq!(value["version"], 1);
        assert_eq!(value["tasks"].as_array().map(Vec::len), Some(3));
    }

    #[test]
    fn decode_accepts_bare_array() {
        let raw = r#"[{"id":"k3j9x","title":"Water bill","description":"","category":"Bills & Utilities",
            "subCategory":"Water","priority":"Low","dueDate":"2025-05-01","isCompleted":false,"createdAt":5}]"#;
        let tasks = decode_document(raw).expect("legacy layout must decode");
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].id.as_str(), "k3j9x");
    }

    #[test]
    fn decode_rejects_newer_versions() {
        let raw = r#"{"version": 9, "tasks": []}"#;
        assert!(matches!(
            decode_document(raw),
            Err(StoreError::UnsupportedVersion { found: 9, .. })
        ));
    }

    #[test]
    fn decode_rejects_duplicate_ids() {
        let mut tasks = seed_tasks(date!(2025 - 04 - 15), 1);
        tasks[1].id = tasks[0].id.clone();
        let body = encode_document(&tasks).expect("encode");
        let err = decode_document(&body).expect_err("duplicates must be rejected");
        assert!(err.is_unreadable_document());
    }

    #[test]
    fn decode_rejects_garbage() {
        for raw in ["{not json", "42", r#"{"tasks": []}"#, r#"{"version": 1}"#] {
            let err = decode_document(raw).expect_err("garbage must be rejected");
            assert!(matches!(err, StoreError::Corrupt(_)), "unexpected error for {raw}: {err}");
        }
    }
}
