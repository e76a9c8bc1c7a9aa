use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use duedeck_app::{Clock, TaskStore};

use super::super::view::{ActiveView, EditorRequest, Intent, Ui, UiAction};
use crate::config::{Action, ViewType};

impl<S: TaskStore, C: Clock> Ui<S, C> {
    pub(in crate::tui) fn handle_key(&mut self, key: KeyEvent) -> Option<UiAction> {
        if key.kind != KeyEventKind::Press {
            return None;
        }

        if self.editor.is_open() {
            return self.handle_editor_key(key);
        }
        if self.active_view == ActiveView::Tasks && self.task_list.is_searching() {
            self.handle_search_key(key);
            return None;
        }
        if self.handle_global_key(key) {
            return None;
        }

        match self.active_view {
            ActiveView::Dashboard => self.handle_dashboard_key(key),
            ActiveView::Tasks => self.handle_task_list_key(key),
            ActiveView::Calendar | ActiveView::Settings => {}
        }
        None
    }

    fn handle_global_key(&mut self, key: KeyEvent) -> bool {
        if self.keybindings.matches(ViewType::Global, Action::Quit, &key) {
            self.should_quit = true;
            return true;
        }

        let target = if self.keybindings.matches(ViewType::Global, Action::NextView, &key) {
            Some(self.active_view.next())
        } else if self.keybindings.matches(ViewType::Global, Action::PrevView, &key) {
            Some(self.active_view.prev())
        } else if self
            .keybindings
            .matches(ViewType::Global, Action::ShowDashboard, &key)
        {
            Some(ActiveView::Dashboard)
        } else if self.keybindings.matches(ViewType::Global, Action::ShowTasks, &key) {
            Some(ActiveView::Tasks)
        } else if self
            .keybindings
            .matches(ViewType::Global, Action::ShowCalendar, &key)
        {
            Some(ActiveView::Calendar)
        } else if self
            .keybindings
            .matches(ViewType::Global, Action::ShowSettings, &key)
        {
            Some(ActiveView::Settings)
        } else {
            None
        };
        if let Some(view) = target {
            self.dispatch(Intent::ChangeView(view));
            return true;
        }

        if self.keybindings.matches(ViewType::Global, Action::NewTask, &key) {
            self.dispatch(Intent::OpenEditor(EditorRequest::New));
            return true;
        }

        false
    }

    fn handle_dashboard_key(&mut self, key: KeyEvent) {
        if self.keybindings.matches(ViewType::Dashboard, Action::Down, &key) {
            if self.dashboard_selected + 1 < self.focus_tasks().len() {
                self.dashboard_selected += 1;
            }
            return;
        }

        if self.keybindings.matches(ViewType::Dashboard, Action::Up, &key) {
            self.dashboard_selected = self.dashboard_selected.saturating_sub(1);
            return;
        }

        if self.keybindings.matches(ViewType::Dashboard, Action::Toggle, &key) {
            if let Some(id) = self.selected_focus_task_id() {
                self.dispatch(Intent::ToggleTask(id));
            }
            return;
        }

        if self.keybindings.matches(ViewType::Dashboard, Action::Edit, &key)
            && let Some(id) = self.selected_focus_task_id()
        {
            self.dispatch(Intent::OpenEditor(EditorRequest::Edit(id)));
        }
    }

    fn handle_task_list_key(&mut self, key: KeyEvent) {
        if self.keybindings.matches(ViewType::TaskList, Action::Down, &key) {
            self.task_list.select_next(self.repo.tasks());
            return;
        }

        if self.keybindings.matches(ViewType::TaskList, Action::Up, &key) {
            self.task_list.select_prev();
            return;
        }

        if self
            .keybindings
            .matches(ViewType::TaskList, Action::NextFilter, &key)
        {
            self.task_list.cycle_category(true);
            return;
        }

        if self
            .keybindings
            .matches(ViewType::TaskList, Action::PrevFilter, &key)
        {
            self.task_list.cycle_category(false);
            return;
        }

        if self.keybindings.matches(ViewType::TaskList, Action::Search, &key) {
            self.task_list.start_search();
            return;
        }

        let Some(id) = self.selected_list_task_id() else {
            return;
        };

        if self.keybindings.matches(ViewType::TaskList, Action::Toggle, &key) {
            self.dispatch(Intent::ToggleTask(id));
            return;
        }

        if self.keybindings.matches(ViewType::TaskList, Action::Edit, &key) {
            self.dispatch(Intent::OpenEditor(EditorRequest::Edit(id)));
            return;
        }

        if self
            .keybindings
            .matches(ViewType::TaskList, Action::RevealDelete, &key)
        {
            self.task_list.reveal(id);
            return;
        }

        if self
            .keybindings
            .matches(ViewType::TaskList, Action::ConcealDelete, &key)
        {
            self.task_list.conceal(&id);
            return;
        }

        // Deleting requires the row's delete control to be showing.
        if self.keybindings.matches(ViewType::TaskList, Action::Delete, &key)
            && self.task_list.is_revealed(&id)
        {
            self.dispatch(Intent::DeleteTask(id));
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.task_list.clear_search(),
            KeyCode::Enter | KeyCode::Down | KeyCode::Tab => self.task_list.finish_search(),
            KeyCode::Backspace => self.task_list.pop_search(),
            KeyCode::Char(ch) if !has_command_modifier(key) => self.task_list.push_search(ch),
            _ => {}
        }
    }

    fn handle_editor_key(&mut self, key: KeyEvent) -> Option<UiAction> {
        if self.keybindings.matches(ViewType::Editor, Action::Cancel, &key) {
            self.dispatch(Intent::CloseEditor);
            return None;
        }

        if self.keybindings.matches(ViewType::Editor, Action::Submit, &key) {
            self.submit_editor();
            return None;
        }

        if self
            .keybindings
            .matches(ViewType::Editor, Action::ExternalEditor, &key)
        {
            return Some(UiAction::EditDescription);
        }

        let form = self.editor.form_mut()?;

        if self.keybindings.matches(ViewType::Editor, Action::NextField, &key) {
            form.focus_next();
        } else if self.keybindings.matches(ViewType::Editor, Action::PrevField, &key) {
            form.focus_prev();
        } else if self.keybindings.matches(ViewType::Editor, Action::NextValue, &key) {
            form.cycle(true);
        } else if self.keybindings.matches(ViewType::Editor, Action::PrevValue, &key) {
            form.cycle(false);
        } else if key.code == KeyCode::Backspace {
            form.backspace();
        } else if let KeyCode::Char(ch) = key.code
            && !has_command_modifier(key)
        {
            form.input_char(ch);
        }
        None
    }
}

fn has_command_modifier(key: KeyEvent) -> bool {
    key.modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
}
