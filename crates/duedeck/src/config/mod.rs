//! Configuration module for duedeck.

use anyhow::{Context, Result, anyhow};
use std::io::{self, Write};
use std::path::Path;

pub mod keybindings;

pub use keybindings::{Action, KeyBindingsConfig, ViewType};

/// Write the default configuration file.
pub fn init_config(output: Option<&Path>, force: bool) -> Result<()> {
    let output_path = match output {
        Some(path) => path.to_path_buf(),
        None => duedeck_app::config::default_config_path()
            .ok_or_else(|| anyhow!("Could not determine the configuration directory"))?,
    };

    write_default_config(&output_path, force)
}

fn write_default_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force && !confirm_overwrite(path)? {
        println!("Aborted.");
        return Ok(());
    }

    if let Some(parent) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let content = keybindings::generate_default_config_toml()?;
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write config file: {}", path.display()))?;

    println!("Wrote configuration file: {}", path.display());
    println!("Restart `duedeck tui` to pick up changes.");

    Ok(())
}

fn confirm_overwrite(path: &Path) -> Result<bool> {
    print!("File already exists: {}\nOverwrite? [y/N]: ", path.display());
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;

    Ok(matches!(input.trim().to_lowercase().as_str(), "y" | "yes"))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn init_writes_file_when_forced() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        init_config(Some(&path), false).unwrap();
        let first = std::fs::read_to_string(&path).unwrap();
        assert!(first.contains("[tui.keybindings.global]"));

        std::fs::write(&path, "# edited").unwrap();
        init_config(Some(&path), true).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), first);
    }
}
