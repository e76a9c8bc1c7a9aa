use std::io::Stdout;

use anyhow::Result;
use duedeck_app::{Clock, TaskStore};
use ratatui::{Terminal, backend::CrosstermBackend};

use super::view::{Ui, UiAction};

pub(super) mod edit;
pub(super) mod navigation;

pub(super) fn handle_ui_action<S: TaskStore, C: Clock>(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    ui: &mut Ui<S, C>,
    action: UiAction,
) -> Result<()> {
    edit::handle_ui_action(terminal, ui, action)
}
