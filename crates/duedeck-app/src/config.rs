use std::{
    ffi::OsString,
    fmt, fs,
    path::{Path, PathBuf},
    str::FromStr,
};

use anyhow::{Context, Result, anyhow, bail};
use duedeck_store_fs::DEFAULT_FILE_NAME;
use serde::{Deserialize, Serialize};

const APP_DIR: &str = "duedeck";
const CONFIG_FILE: &str = "config.toml";

/// Environment variable overriding the data file location.
pub const DATA_ENV: &str = "DUEDECK_DATA";

/// Settings shared by every surface, loaded from `config.toml`.
///
/// Sections owned by the terminal UI (key bindings) are ignored here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AppConfig {
    /// Storage location.
    #[serde(default)]
    pub storage: StorageConfig,
    /// Terminal UI startup settings.
    #[serde(default)]
    pub tui: TuiSettings,
}

/// `[storage]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Explicit path of the tasks file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_file: Option<PathBuf>,
}

/// Startup part of the `[tui]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TuiSettings {
    /// View shown when the UI opens.
    #[serde(default)]
    pub start_view: StartView,
}

/// View the terminal UI opens on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StartView {
    /// Summary dashboard.
    #[default]
    Dashboard,
    /// Full task list.
    Tasks,
    /// Calendar placeholder.
    Calendar,
    /// Settings panel.
    Settings,
}

impl StartView {
    /// Config spelling of the view.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::Tasks => "tasks",
            Self::Calendar => "calendar",
            Self::Settings => "settings",
        }
    }
}

impl fmt::Display for StartView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StartView {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dashboard" | "summary" => Ok(Self::Dashboard),
            "tasks" => Ok(Self::Tasks),
            "calendar" | "events" => Ok(Self::Calendar),
            "settings" => Ok(Self::Settings),
            other => bail!("unknown view '{other}'"),
        }
    }
}

impl AppConfig {
    /// Load configuration from `path`, or from the default location when `None`.
    ///
    /// A missing file yields the defaults.
    ///
    /// # Errors
    /// Returns an error when the file exists but cannot be read or parsed.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(path) => path.to_path_buf(),
            None => match default_config_path() {
                Some(path) => path,
                None => return Ok(Self::default()),
            },
        };
        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&config_path)
            .with_context(|| format!("failed to read {}", config_path.display()))?;
        Self::from_toml(&contents).with_context(|| format!("failed to parse {}", config_path.display()))
    }

    /// Parse configuration text.
    ///
    /// # Errors
    /// Returns an error when the text is not valid TOML for this layout.
    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }
}

/// `<config_dir>/duedeck/config.toml`.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
}

/// `<data_dir>/duedeck/tasks.json`.
pub fn default_data_file() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join(APP_DIR).join(DEFAULT_FILE_NAME))
}

/// Pick the tasks file: command-line flag, then environment, then
/// configuration, then the platform data directory.
///
/// # Errors
/// Returns an error when no candidate is available.
pub fn resolve_data_file(
    flag: Option<&Path>,
    env: Option<OsString>,
    config: &StorageConfig,
) -> Result<PathBuf> {
    if let Some(path) = flag {
        return Ok(path.to_path_buf());
    }
    if let Some(value) = env.filter(|value| !value.is_empty()) {
        return Ok(PathBuf::from(value));
    }
    if let Some(path) = &config.data_file {
        return Ok(path.clone());
    }
    default_data_file().ok_or_else(|| anyhow!("could not determine a data directory; pass --data"))
}
