//! Keybindings configuration for the TUI.

#![allow(clippy::enum_glob_use, clippy::unused_self)]

use anyhow::{Context, Result, anyhow, bail};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use duedeck_app::config::{StartView, StorageConfig, default_config_path};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

macro_rules! vec_of_strings {
    ($($s:expr),* $(,)?) => {
        vec![$($s.to_string()),*]
    };
}

/// Keybinding part of the configuration file.
///
/// Other sections (`[storage]`, `tui.start_view`) are read by
/// [`duedeck_app::AppConfig`] and ignored here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// TUI configuration.
    #[serde(default)]
    pub tui: TuiConfig,
}

/// TUI-specific configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TuiConfig {
    /// Keybindings configuration.
    #[serde(default)]
    pub keybindings: KeyBindingsConfig,
}

/// Keybindings configuration for all TUI views.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindingsConfig {
    /// Keys active on every page while no editor is open.
    pub global: GlobalKeyBindings,
    /// Keys for the summary dashboard.
    pub dashboard: DashboardKeyBindings,
    /// Keys for the task list.
    pub task_list: TaskListKeyBindings,
    /// Keys for the task editor.
    pub editor: EditorKeyBindings,
}

/// Keybindings active on every page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalKeyBindings {
    /// Quit the application.
    pub quit: Vec<String>,
    /// Go to the next tab.
    pub next_view: Vec<String>,
    /// Go to the previous tab.
    pub prev_view: Vec<String>,
    /// Jump to the dashboard.
    pub show_dashboard: Vec<String>,
    /// Jump to the task list.
    pub show_tasks: Vec<String>,
    /// Jump to the calendar.
    pub show_calendar: Vec<String>,
    /// Jump to settings.
    pub show_settings: Vec<String>,
    /// Open the editor for a new task.
    pub new_task: Vec<String>,
}

/// Keybindings for the dashboard's "Today's Focus" list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardKeyBindings {
    /// Move down.
    pub down: Vec<String>,
    /// Move up.
    pub up: Vec<String>,
    /// Toggle completion of the selected task.
    pub toggle: Vec<String>,
    /// Edit the selected task.
    pub edit: Vec<String>,
}

/// Keybindings for the task list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskListKeyBindings {
    /// Move down.
    pub down: Vec<String>,
    /// Move up.
    pub up: Vec<String>,
    /// Toggle completion of the selected task.
    pub toggle: Vec<String>,
    /// Edit the selected task.
    pub edit: Vec<String>,
    /// Reveal the delete control on the selected row.
    pub reveal_delete: Vec<String>,
    /// Hide the delete control on the selected row.
    pub conceal_delete: Vec<String>,
    /// Delete the selected row when its delete control is revealed.
    pub delete: Vec<String>,
    /// Select the next category pill.
    pub next_filter: Vec<String>,
    /// Select the previous category pill.
    pub prev_filter: Vec<String>,
    /// Focus the search box.
    pub search: Vec<String>,
}

/// Keybindings for the task editor.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorKeyBindings {
    /// Focus the next field.
    pub next_field: Vec<String>,
    /// Focus the previous field.
    pub prev_field: Vec<String>,
    /// Next value of the focused choice field.
    pub next_value: Vec<String>,
    /// Previous value of the focused choice field.
    pub prev_value: Vec<String>,
    /// Save the task.
    pub submit: Vec<String>,
    /// Discard changes and close.
    pub cancel: Vec<String>,
    /// Edit the description in an external editor.
    pub external_editor: Vec<String>,
}

impl Default for GlobalKeyBindings {
    fn default() -> Self {
        Self {
            quit: vec_of_strings!["q", "Ctrl+c"],
            next_view: vec_of_strings!["Tab"],
            prev_view: vec_of_strings!["BackTab"],
            show_dashboard: vec_of_strings!["1"],
            show_tasks: vec_of_strings!["2"],
            show_calendar: vec_of_strings!["3"],
            show_settings: vec_of_strings!["4"],
            new_task: vec_of_strings!["n", "+"],
        }
    }
}

impl Default for DashboardKeyBindings {
    fn default() -> Self {
        Self {
            down: vec_of_strings!["j", "Down"],
            up: vec_of_strings!["k", "Up"],
            toggle: vec_of_strings!["Space", "x"],
            edit: vec_of_strings!["Enter", "e"],
        }
    }
}

impl Default for TaskListKeyBindings {
    fn default() -> Self {
        Self {
            down: vec_of_strings!["j", "Down"],
            up: vec_of_strings!["k", "Up"],
            toggle: vec_of_strings!["Space", "x"],
            edit: vec_of_strings!["Enter", "e"],
            reveal_delete: vec_of_strings!["h", "Left"],
            conceal_delete: vec_of_strings!["l", "Right", "Esc"],
            delete: vec_of_strings!["d", "Delete"],
            next_filter: vec_of_strings!["]"],
            prev_filter: vec_of_strings!["["],
            search: vec_of_strings!["/"],
        }
    }
}

impl Default for EditorKeyBindings {
    fn default() -> Self {
        Self {
            next_field: vec_of_strings!["Tab", "Down"],
            prev_field: vec_of_strings!["BackTab", "Up"],
            next_value: vec_of_strings!["Right"],
            prev_value: vec_of_strings!["Left"],
            submit: vec_of_strings!["Enter"],
            cancel: vec_of_strings!["Esc"],
            external_editor: vec_of_strings!["Ctrl+e"],
        }
    }
}

/// Full configuration file written by `duedeck config init`.
#[derive(Debug, Default, Serialize)]
struct ConfigTemplate {
    storage: StorageConfig,
    tui: TuiTemplate,
}

#[derive(Debug, Default, Serialize)]
struct TuiTemplate {
    start_view: StartView,
    keybindings: KeyBindingsConfig,
}

/// Generate default configuration as TOML string.
pub fn generate_default_config_toml() -> Result<String> {
    let toml_str = toml::to_string_pretty(&ConfigTemplate::default())
        .context("Failed to serialize default configuration")?;

    let header = r#"# duedeck configuration
#
# [storage]
# data_file = "/path/to/tasks.json"   # overrides the platform data directory
#
# [tui]
# start_view: dashboard | tasks | calendar | settings
#
# [tui.keybindings.*]
# Each action can have multiple key bindings. Actions left out keep their
# default keys.
#
# Supported key formats:
# - Single characters: "j", "k", "+", "1"
# - Special keys: "Enter", "Esc", "Tab", "BackTab", "Space", "Backspace", "Delete"
# - Arrow keys: "Up", "Down", "Left", "Right"
# - Navigation keys: "Home", "End", "PageUp", "PageDown"
# - Modified keys: "Ctrl+d", "Alt+k", "Shift+Up"

"#;

    Ok(format!("{header}{toml_str}"))
}

/// Load keybindings from a TOML file.
///
/// # Returns
/// - `Ok(Some(config))` if the file exists and was successfully parsed
/// - `Ok(None)` if the file does not exist
/// - `Err(_)` if there was an error reading or parsing the file
pub fn load_config(path: Option<&Path>) -> Result<Option<Config>> {
    let config_path = match path {
        Some(p) => p.to_path_buf(),
        None => match default_config_path() {
            Some(p) => p,
            None => return Ok(None),
        },
    };

    if !config_path.exists() {
        return Ok(None);
    }

    let content = std::fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;

    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", config_path.display()))?;

    Ok(Some(config))
}

/// Parse a key string into a `KeyEvent`.
///
/// # Examples
/// - "j" -> `KeyCode::Char('j')`
/// - "Enter" -> `KeyCode::Enter`
/// - "Ctrl+d" -> `KeyCode::Char('d')` with CONTROL modifier
/// - "+" -> `KeyCode::Char('+')`
pub fn parse_key(s: &str) -> Result<KeyEvent> {
    if s.is_empty() {
        bail!("Empty key string");
    }
    // A lone "+" (or a trailing "++") names the plus key itself.
    let (modifier_part, key_part) = match s.strip_suffix("++") {
        Some(prefix) => (Some(prefix), "+"),
        None if s == "+" => (None, "+"),
        None => match s.rsplit_once('+') {
            Some((prefix, key)) => (Some(prefix), key),
            None => (None, s),
        },
    };

    let mut modifiers = KeyModifiers::NONE;
    if let Some(prefix) = modifier_part {
        for modifier in prefix.split('+') {
            match modifier {
                "Ctrl" | "Control" => modifiers |= KeyModifiers::CONTROL,
                "Alt" => modifiers |= KeyModifiers::ALT,
                "Shift" => modifiers |= KeyModifiers::SHIFT,
                other => bail!("Unknown modifier: {other}"),
            }
        }
    }

    let code = parse_key_code(key_part)?;

    Ok(KeyEvent::new(code, modifiers))
}

fn parse_key_code(s: &str) -> Result<KeyCode> {
    match s {
        "Enter" => Ok(KeyCode::Enter),
        "Esc" => Ok(KeyCode::Esc),
        "Backspace" => Ok(KeyCode::Backspace),
        "Left" => Ok(KeyCode::Left),
        "Right" => Ok(KeyCode::Right),
        "Up" => Ok(KeyCode::Up),
        "Down" => Ok(KeyCode::Down),
        "Home" => Ok(KeyCode::Home),
        "End" => Ok(KeyCode::End),
        "PageUp" => Ok(KeyCode::PageUp),
        "PageDown" => Ok(KeyCode::PageDown),
        "Tab" => Ok(KeyCode::Tab),
        "BackTab" => Ok(KeyCode::BackTab),
        "Space" => Ok(KeyCode::Char(' ')),
        "Delete" => Ok(KeyCode::Delete),
        "Insert" => Ok(KeyCode::Insert),
        s if s.chars().count() == 1 => {
            let ch = s.chars().next().ok_or_else(|| anyhow!("Empty char"))?;
            Ok(KeyCode::Char(ch))
        }
        other => bail!("Unknown key: {other}"),
    }
}

/// Validate the keybindings configuration.
///
/// Checks for:
/// - Empty key bindings
/// - Invalid key expressions
/// - Key conflicts within each view (global keys count for every page)
pub fn validate_keybindings_config(config: &KeyBindingsConfig) -> Result<()> {
    for (view, bindings) in config.bindings_by_view() {
        for (action, keys) in &bindings {
            if keys.is_empty() {
                bail!("{view}.{action} must have at least one key binding");
            }
            for key in *keys {
                parse_key(key).with_context(|| format!("Invalid key '{key}' in {view}.{action}"))?;
            }
        }
    }

    let global = config.global_bindings();
    validate_view_keybindings("dashboard", global.iter().chain(&config.dashboard_bindings()))?;
    validate_view_keybindings("task_list", global.iter().chain(&config.task_list_bindings()))?;
    validate_view_keybindings("editor", config.editor_bindings().iter())?;
    Ok(())
}

fn validate_view_keybindings<'a, I>(view_name: &str, bindings: I) -> Result<()>
where
    I: Iterator<Item = &'a (&'static str, &'a [String])>,
{
    let mut key_to_actions: HashMap<KeyEvent, Vec<&str>> = HashMap::new();

    for (action, keys) in bindings {
        for key in *keys {
            let event = normalize(parse_key(key)?);
            key_to_actions.entry(event).or_default().push(*action);
        }
    }

    let mut conflicts: Vec<_> = key_to_actions
        .into_iter()
        .filter(|(_, actions)| actions.len() > 1)
        .collect();
    conflicts.sort_by_key(|(_, actions)| actions.clone());
    if let Some((key, actions)) = conflicts.first() {
        bail!(
            "Key {:?} is bound to multiple actions in {view_name}: {actions:?}",
            key.code
        );
    }

    Ok(())
}

/// Drop SHIFT from character and back-tab keys: terminals report it
/// inconsistently for those.
fn normalize(mut key: KeyEvent) -> KeyEvent {
    if matches!(key.code, KeyCode::Char(_) | KeyCode::BackTab) {
        key.modifiers.remove(KeyModifiers::SHIFT);
    }
    KeyEvent::new(key.code, key.modifiers)
}

type Bindings<'a> = Vec<(&'static str, &'a [String])>;

impl KeyBindingsConfig {
    fn global_bindings(&self) -> Bindings<'_> {
        let g = &self.global;
        vec![
            ("quit", &g.quit),
            ("next_view", &g.next_view),
            ("prev_view", &g.prev_view),
            ("show_dashboard", &g.show_dashboard),
            ("show_tasks", &g.show_tasks),
            ("show_calendar", &g.show_calendar),
            ("show_settings", &g.show_settings),
            ("new_task", &g.new_task),
        ]
        .into_iter()
        .map(|(name, keys)| (name, keys.as_slice()))
        .collect()
    }

    fn dashboard_bindings(&self) -> Bindings<'_> {
        let d = &self.dashboard;
        vec![
            ("down", d.down.as_slice()),
            ("up", d.up.as_slice()),
            ("toggle", d.toggle.as_slice()),
            ("edit", d.edit.as_slice()),
        ]
    }

    fn task_list_bindings(&self) -> Bindings<'_> {
        let t = &self.task_list;
        vec![
            ("down", t.down.as_slice()),
            ("up", t.up.as_slice()),
            ("toggle", t.toggle.as_slice()),
            ("edit", t.edit.as_slice()),
            ("reveal_delete", t.reveal_delete.as_slice()),
            ("conceal_delete", t.conceal_delete.as_slice()),
            ("delete", t.delete.as_slice()),
            ("next_filter", t.next_filter.as_slice()),
            ("prev_filter", t.prev_filter.as_slice()),
            ("search", t.search.as_slice()),
        ]
    }

    fn editor_bindings(&self) -> Bindings<'_> {
        let e = &self.editor;
        vec![
            ("next_field", e.next_field.as_slice()),
            ("prev_field", e.prev_field.as_slice()),
            ("next_value", e.next_value.as_slice()),
            ("prev_value", e.prev_value.as_slice()),
            ("submit", e.submit.as_slice()),
            ("cancel", e.cancel.as_slice()),
            ("external_editor", e.external_editor.as_slice()),
        ]
    }

    fn bindings_by_view(&self) -> [(&'static str, Bindings<'_>); 4] {
        [
            ("global", self.global_bindings()),
            ("dashboard", self.dashboard_bindings()),
            ("task_list", self.task_list_bindings()),
            ("editor", self.editor_bindings()),
        ]
    }
}

/// View type for keybinding context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewType {
    /// Keys shared by every page.
    Global,
    /// Summary dashboard.
    Dashboard,
    /// Task list.
    TaskList,
    /// Task editor.
    Editor,
}

/// Action that can be performed in a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    // Global
    /// Quit.
    Quit,
    /// Next tab.
    NextView,
    /// Previous tab.
    PrevView,
    /// Dashboard tab.
    ShowDashboard,
    /// Tasks tab.
    ShowTasks,
    /// Calendar tab.
    ShowCalendar,
    /// Settings tab.
    ShowSettings,
    /// New task.
    NewTask,

    // Lists
    /// Move down.
    Down,
    /// Move up.
    Up,
    /// Toggle completion.
    Toggle,
    /// Edit task.
    Edit,
    /// Reveal delete control.
    RevealDelete,
    /// Hide delete control.
    ConcealDelete,
    /// Delete task.
    Delete,
    /// Next category pill.
    NextFilter,
    /// Previous category pill.
    PrevFilter,
    /// Focus search.
    Search,

    // Editor
    /// Next field.
    NextField,
    /// Previous field.
    PrevField,
    /// Next value.
    NextValue,
    /// Previous value.
    PrevValue,
    /// Save.
    Submit,
    /// Discard.
    Cancel,
    /// External editor.
    ExternalEditor,
}

impl KeyBindingsConfig {
    /// Generate help text for a specific view.
    pub fn generate_help_text(&self, view: ViewType) -> String {
        match view {
            ViewType::Global => self.generate_global_help(),
            ViewType::Dashboard => format!(
                "{}:move {}:done {}:edit | {}",
                self.format_key_pair(&self.dashboard.down, &self.dashboard.up),
                self.format_first_key(&self.dashboard.toggle),
                self.format_first_key(&self.dashboard.edit),
                self.generate_global_help(),
            ),
            ViewType::TaskList => format!(
                "{}:move {}:done {}:edit {}:swipe {}:delete {}:filter {}:search | {}",
                self.format_key_pair(&self.task_list.down, &self.task_list.up),
                self.format_first_key(&self.task_list.toggle),
                self.format_first_key(&self.task_list.edit),
                self.format_first_key(&self.task_list.reveal_delete),
                self.format_first_key(&self.task_list.delete),
                self.format_key_pair(&self.task_list.prev_filter, &self.task_list.next_filter),
                self.format_first_key(&self.task_list.search),
                self.generate_global_help(),
            ),
            ViewType::Editor => format!(
                "{}:field {}:change {}:save {}:cancel {}:description in $EDITOR",
                self.format_key_pair(&self.editor.next_field, &self.editor.prev_field),
                self.format_key_pair(&self.editor.prev_value, &self.editor.next_value),
                self.format_first_key(&self.editor.submit),
                self.format_first_key(&self.editor.cancel),
                self.format_first_key(&self.editor.external_editor),
            ),
        }
    }

    fn generate_global_help(&self) -> String {
        format!(
            "{}:tabs {}:new {}:quit",
            self.format_key_pair(&self.global.next_view, &self.global.prev_view),
            self.format_first_key(&self.global.new_task),
            self.format_first_key(&self.global.quit),
        )
    }

    /// Format the first key of a key binding list for display.
    fn format_first_key(&self, keys: &[String]) -> String {
        keys.first()
            .map_or_else(|| "?".to_string(), |k| self.format_key_display(k))
    }

    /// Format two keys as a pair (e.g., "j/k" for down/up).
    fn format_key_pair(&self, first: &[String], second: &[String]) -> String {
        format!("{}/{}", self.format_first_key(first), self.format_first_key(second))
    }

    /// Format a key for display, converting special keys to readable symbols.
    fn format_key_display(&self, key: &str) -> String {
        match key {
            "Enter" => "↵".to_string(),
            "Backspace" => "BS".to_string(),
            "Delete" => "Del".to_string(),
            "BackTab" => "S-Tab".to_string(),
            "Up" => "↑".to_string(),
            "Down" => "↓".to_string(),
            "Left" => "←".to_string(),
            "Right" => "→".to_string(),
            "PageUp" => "PgUp".to_string(),
            "PageDown" => "PgDn".to_string(),
            other if other.starts_with("Ctrl+") || other.starts_with("Alt+") => {
                other.replacen('+', "-", 1)
            }
            other => other.to_string(),
        }
    }

    /// Check if a key event matches a configured action in a view.
    pub fn matches(&self, view: ViewType, action: Action, key: &KeyEvent) -> bool {
        let actual = normalize(*key);
        self.get_keys(view, action)
            .iter()
            .filter_map(|key_str| parse_key(key_str).ok())
            .any(|expected| normalize(expected) == actual)
    }

    fn get_keys(&self, view: ViewType, action: Action) -> &[String] {
        use Action::*;
        use ViewType::*;

        match (view, action) {
            (Global, Quit) => &self.global.quit,
            (Global, NextView) => &self.global.next_view,
            (Global, PrevView) => &self.global.prev_view,
            (Global, ShowDashboard) => &self.global.show_dashboard,
            (Global, ShowTasks) => &self.global.show_tasks,
            (Global, ShowCalendar) => &self.global.show_calendar,
            (Global, ShowSettings) => &self.global.show_settings,
            (Global, NewTask) => &self.global.new_task,

            (Dashboard, Down) => &self.dashboard.down,
            (Dashboard, Up) => &self.dashboard.up,
            (Dashboard, Toggle) => &self.dashboard.toggle,
            (Dashboard, Edit) => &self.dashboard.edit,

            (TaskList, Down) => &self.task_list.down,
            (TaskList, Up) => &self.task_list.up,
            (TaskList, Toggle) => &self.task_list.toggle,
            (TaskList, Edit) => &self.task_list.edit,
            (TaskList, RevealDelete) => &self.task_list.reveal_delete,
            (TaskList, ConcealDelete) => &self.task_list.conceal_delete,
            (TaskList, Delete) => &self.task_list.delete,
            (TaskList, NextFilter) => &self.task_list.next_filter,
            (TaskList, PrevFilter) => &self.task_list.prev_filter,
            (TaskList, Search) => &self.task_list.search,

            (Editor, NextField) => &self.editor.next_field,
            (Editor, PrevField) => &self.editor.prev_field,
            (Editor, NextValue) => &self.editor.next_value,
            (Editor, PrevValue) => &self.editor.prev_value,
            (Editor, Submit) => &self.editor.submit,
            (Editor, Cancel) => &self.editor.cancel,
            (Editor, ExternalEditor) => &self.editor.external_editor,

            _ => &[],
        }
    }
}
