use std::io::{self, Stdout};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event as CrosstermEvent},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use duedeck_app::config::StartView;
use duedeck_app::{Clock, TaskRepository, TaskStore};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::subscriber::NoSubscriber;

use crate::config::KeyBindingsConfig;
use crate::config::keybindings::{load_config, validate_keybindings_config};

pub mod constants;
mod editor;
mod handlers;
mod task_visibility;
mod terminal;
mod view;
mod widgets;

use self::constants::TUI_TICK_RATE_MS;
use self::handlers::handle_ui_action;
use self::view::Ui;

/// Startup settings for the interactive UI.
#[derive(Debug, Clone, Default)]
pub struct TuiOptions {
    /// Page shown first.
    pub start_view: StartView,
    /// Configuration file shown on the settings page.
    pub config_path: Option<PathBuf>,
}

/// Load and validate key bindings, falling back to the defaults when no
/// configuration file exists.
pub fn load_keybindings(path: Option<&Path>) -> Result<KeyBindingsConfig> {
    match load_config(path)? {
        Some(config) => {
            validate_keybindings_config(&config.tui.keybindings)?;
            Ok(config.tui.keybindings)
        }
        None => Ok(KeyBindingsConfig::default()),
    }
}

/// Launch the interactive TUI.
pub fn run<S: TaskStore, C: Clock>(
    repo: TaskRepository<S, C>,
    keybindings: KeyBindingsConfig,
    options: TuiOptions,
) -> Result<()> {
    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.hide_cursor()?;

    let mut ui = Ui::new(repo, keybindings, options);
    let result = tracing::subscriber::with_default(NoSubscriber::default(), || {
        run_event_loop(&mut terminal, &mut ui)
    });

    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    result
}

fn run_event_loop<S: TaskStore, C: Clock>(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    ui: &mut Ui<S, C>,
) -> Result<()> {
    let mut last_tick = Instant::now();
    let tick_rate = Duration::from_millis(TUI_TICK_RATE_MS);

    loop {
        terminal.draw(|f| ui.draw(f))?;
        if ui.should_quit {
            break;
        }

        let timeout = tick_rate.checked_sub(last_tick.elapsed()).unwrap_or_default();

        if event::poll(timeout)? {
            let evt = event::read()?;
            if let CrosstermEvent::Key(key) = evt
                && let Some(action) = ui.handle_key(key)
                && let Err(err) = handle_ui_action(terminal, ui, action)
            {
                ui.error(format!("External editor failed: {err}"));
            }
        }

        if last_tick.elapsed() >= tick_rate {
            ui.tick();
            last_tick = Instant::now();
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests;
