use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use anyhow::{Context, Result, anyhow};
use assert_cmd::cargo::CommandCargoExt;
use serde_json::Value;

fn duedeck(data: &Path, args: &[&str]) -> Result<Output> {
    let dir = data.parent().ok_or_else(|| anyhow!("data file has no parent"))?;
    let output = Command::cargo_bin("duedeck")?
        .env_remove("DUEDECK_DATA")
        .arg("--data")
        .arg(data)
        .arg("--config")
        .arg(dir.join("absent-config.toml"))
        .args(args)
        .output()
        .context("failed to run duedeck")?;
    Ok(output)
}

fn stdout_of(output: &Output) -> Result<String> {
    if !output.status.success() {
        return Err(anyhow!(
            "command failed: {}",
            String::from_utf8_lossy(&output.stderr)
        ));
    }
    Ok(String::from_utf8(output.stdout.clone())?)
}

#[test]
fn listing_a_fresh_store_shows_examples_without_writing() -> Result<()> {
    let temp = tempfile::tempdir()?;
    let data = temp.path().join("tasks.json");

    let stdout = stdout_of(&duedeck(&data, &["ls"])?)?;
    assert!(stdout.contains("Quarterly BIR Filing"), "unexpected output:\n{stdout}");
    assert!(stdout.contains("In Progress"));
    assert!(!data.exists());
    Ok(())
}

#[test]
fn added_task_is_persisted_and_listed() -> Result<()> {
    let temp = tempfile::tempdir()?;
    let data = temp.path().join("nested").join("tasks.json");

    let stdout = stdout_of(&duedeck(
        &data,
        &[
            "add",
            "--title",
            "Pay water bill",
            "--category",
            "bills",
            "--due",
            "2031-01-05",
            "--repeat",
            "monthly",
        ],
    )?)?;
    assert!(stdout.starts_with("Created task: "));

    let document: Value = serde_json::from_str(&fs::read_to_string(&data)?)?;
    assert_eq!(document["version"], 1);
    let tasks = document["tasks"]
        .as_array()
        .ok_or_else(|| anyhow!("tasks array missing"))?;
    assert_eq!(tasks.len(), 4);
    assert_eq!(tasks[0]["title"], "Pay water bill");
    assert_eq!(tasks[0]["category"], "Bills & Utilities");
    assert_eq!(tasks[0]["recurring"], "monthly");

    let stdout = stdout_of(&duedeck(&data, &["ls", "--search", "WATER"])?)?;
    assert!(stdout.contains("Pay water bill"));
    assert!(!stdout.contains("Quarterly BIR Filing"));
    Ok(())
}

#[test]
fn blank_title_fails() -> Result<()> {
    let temp = tempfile::tempdir()?;
    let data = temp.path().join("tasks.json");

    let output = duedeck(&data, &["add", "--title", "  "])?;
    assert!(!output.status.success());
    assert!(!data.exists());
    Ok(())
}

#[test]
fn unknown_ids_are_reported_not_fatal() -> Result<()> {
    let temp = tempfile::tempdir()?;
    let data = temp.path().join("tasks.json");

    for command in ["toggle", "rm", "show"] {
        let stdout = stdout_of(&duedeck(&data, &[command, "missing-id"])?)?;
        assert_eq!(stdout.trim(), "Task not found: missing-id");
    }
    Ok(())
}

#[test]
fn corrupt_file_is_moved_aside() -> Result<()> {
    let temp = tempfile::tempdir()?;
    let data = temp.path().join("tasks.json");
    fs::write(&data, "{ not json")?;

    let stdout = stdout_of(&duedeck(&data, &["summary"])?)?;
    assert!(stdout.contains("Today's Focus"));
    assert!(!data.exists());

    let backups: Vec<_> = fs::read_dir(temp.path())?
        .filter_map(Result::ok)
        .filter(|entry| entry.file_name().to_string_lossy().starts_with("tasks.json.corrupt-"))
        .collect();
    assert_eq!(backups.len(), 1);
    assert_eq!(fs::read_to_string(backups[0].path())?, "{ not json");
    Ok(())
}

#[test]
fn config_init_writes_default_keybindings() -> Result<()> {
    let temp = tempfile::tempdir()?;
    let data = temp.path().join("tasks.json");
    let config = temp.path().join("config.toml");
    let config_arg = config.to_string_lossy().into_owned();

    let stdout = stdout_of(&duedeck(
        &data,
        &["config", "init", "--output", &config_arg, "--force"],
    )?)?;
    assert!(stdout.contains("Wrote configuration file"));

    let written = fs::read_to_string(&config)?;
    assert!(written.contains("[tui.keybindings.global]"));
    assert!(written.contains("start_view = \"dashboard\""));
    Ok(())
}
