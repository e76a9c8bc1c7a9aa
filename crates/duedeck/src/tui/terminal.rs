use std::fs;
use std::io::Stdout;
use std::process::Command;

use anyhow::{Context, Result, bail};
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};

/// Variables consulted for the description editor, in order.
const EDITOR_VARS: [&str; 3] = ["DUEDECK_EDITOR", "VISUAL", "EDITOR"];
const FALLBACK_EDITOR: &str = "vi";

type Term = Terminal<CrosstermBackend<Stdout>>;

/// Hand the terminal back to the shell while `f` runs.
///
/// The UI is restored even when `f` fails; the error from `f` wins.
pub(super) fn with_terminal_suspended<T>(terminal: &mut Term, f: impl FnOnce() -> Result<T>) -> Result<T> {
    terminal.show_cursor()?;
    disable_raw_mode().context("failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen).context("failed to leave alternate screen")?;

    let result = f();

    execute!(terminal.backend_mut(), EnterAlternateScreen).context("failed to re-enter alternate screen")?;
    enable_raw_mode().context("failed to enable raw mode")?;
    terminal.clear()?;
    terminal.hide_cursor()?;
    result
}

/// Program and arguments of the editor picked from `lookup`.
///
/// Unset or blank variables are skipped. Falls back to `vi`.
fn editor_argv(lookup: impl Fn(&str) -> Option<String>) -> Result<Vec<String>> {
    let command = EDITOR_VARS
        .into_iter()
        .filter_map(&lookup)
        .find(|value| !value.trim().is_empty())
        .unwrap_or_else(|| FALLBACK_EDITOR.to_owned());

    let argv = shell_words::split(&command).with_context(|| format!("cannot parse editor command `{command}`"))?;
    if argv.is_empty() {
        bail!("editor command `{command}` names no program");
    }
    Ok(argv)
}

/// Open a task description in the user's editor and return the saved text.
pub(super) fn launch_editor(description: &str) -> Result<String> {
    let file = tempfile::Builder::new()
        .prefix("duedeck-")
        .suffix(".md")
        .tempfile()
        .context("failed to create a temporary file")?;
    fs::write(file.path(), description).context("failed to write the description")?;

    let argv = editor_argv(|name| std::env::var(name).ok())?;
    let (program, args) = argv.split_first().context("editor command names no program")?;
    let status = Command::new(program)
        .args(args)
        .arg(file.path())
        .status()
        .with_context(|| format!("failed to launch editor {program}"))?;
    if !status.success() {
        bail!("editor {program} exited unsuccessfully ({status})");
    }

    fs::read_to_string(file.path()).context("failed to read the edited description")
}
