use std::io::Stdout;

use anyhow::Result;
use duedeck_app::{Clock, TaskStore};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use super::super::terminal::{launch_editor, with_terminal_suspended};
use super::super::view::{Ui, UiAction};

pub(super) fn handle_ui_action<S: TaskStore, C: Clock>(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    ui: &mut Ui<S, C>,
    action: UiAction,
) -> Result<()> {
    match action {
        UiAction::EditDescription => {
            let Some(initial) = ui.editor.form().map(|form| form.description.clone()) else {
                return Ok(());
            };
            let raw = with_terminal_suspended(terminal, || launch_editor(&initial))?;
            ui.apply_description_input(&raw);
        }
    }
    Ok(())
}

impl<S: TaskStore, C: Clock> Ui<S, C> {
    pub(in crate::tui) fn apply_description_input(&mut self, raw: &str) {
        if let Some(form) = self.editor.form_mut() {
            form.set_description(raw);
            self.info("Description updated");
        }
    }
}
