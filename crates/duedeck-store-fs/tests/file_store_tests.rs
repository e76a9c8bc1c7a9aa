#![allow(missing_docs)]

use anyhow::Result;
use duedeck_core::{Category, Priority, Task, TaskDraft, TaskId, seed_tasks};
use duedeck_store_fs::{FileStore, StoreError};
use std::fs;
use tempfile::TempDir;
use time::macros::date;

fn store_in(dir: &TempDir) -> FileStore {
    FileStore::new(dir.path().join("nested").join("tasks.json"))
}

#[test]
fn test_read_missing_file_returns_none() -> Result<()> {
    let dir = TempDir::new()?;
    let store = store_in(&dir);
    assert!(store.read()?.is_none());
    assert!(!store.path().exists());
    Ok(())
}

#[test]
fn test_write_then_read_keeps_order_and_fields() -> Result<()> {
    let dir = TempDir::new()?;
    let store = store_in(&dir);

    let mut draft = TaskDraft::new("Renew business permit", date!(2025 - 01 - 20));
    draft.category = Category::Taxes;
    draft.sub_category = Some("LGU Fees".into());
    draft.priority = Priority::High;
    let mut tasks = vec![Task::from_draft(TaskId::from("renewal"), draft, 1_736_900_000_000)];
    tasks.extend(seed_tasks(date!(2025 - 01 - 15), 1_736_000_000_000));

    store.write(&tasks)?;
    let loaded = store.read()?.unwrap_or_default();
    assert_eq!(loaded, tasks);
    Ok(())
}

#[test]
fn test_write_replaces_previous_document() -> Result<()> {
    let dir = TempDir::new()?;
    let store = store_in(&dir);
    let mut tasks = seed_tasks(date!(2025 - 01 - 15), 0);
    store.write(&tasks)?;

    tasks.remove(0);
    store.write(&tasks)?;

    let loaded = store.read()?.unwrap_or_default();
    assert_eq!(loaded.len(), 2);
    let leftovers: Vec<_> = fs::read_dir(store.path().parent().unwrap_or(dir.path()))?
        .filter_map(Result::ok)
        .filter(|entry| entry.path() != store.path())
        .collect();
    assert!(leftovers.is_empty(), "temporary files left behind: {leftovers:?}");
    Ok(())
}

#[test]
fn test_blank_file_is_treated_as_missing() -> Result<()> {
    let dir = TempDir::new()?;
    let store = FileStore::new(dir.path().join("tasks.json"));
    fs::write(store.path(), "  \n")?;
    assert!(store.read()?.is_none());
    Ok(())
}

#[test]
fn test_corrupt_file_is_reported_and_quarantined() -> Result<()> {
    let dir = TempDir::new()?;
    let store = FileStore::new(dir.path().join("tasks.json"));
    fs::write(store.path(), "{\"version\": 1, \"tasks\": [ {\"id\": ")?;

    let err = store.read().err().map(|err| err.is_unreadable_document());
    assert_eq!(err, Some(true));

    let moved = store.quarantine()?;
    let moved = moved.unwrap_or_default();
    assert!(moved.exists());
    assert!(!store.path().exists());
    let name = moved.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
    assert!(name.starts_with("tasks.json.corrupt-"), "unexpected name {name}");
    Ok(())
}

#[test]
fn test_quarantine_without_file_is_noop() -> Result<()> {
    let dir = TempDir::new()?;
    let store = FileStore::new(dir.path().join("tasks.json"));
    assert!(store.quarantine()?.is_none());
    Ok(())
}

#[test]
fn test_future_version_is_unsupported() -> Result<()> {
    let dir = TempDir::new()?;
    let store = FileStore::new(dir.path().join("tasks.json"));
    fs::write(store.path(), r#"{"version": 2, "tasks": []}"#)?;
    assert!(matches!(
        store.read(),
        Err(StoreError::UnsupportedVersion { found: 2, supported: 1 })
    ));
    Ok(())
}
