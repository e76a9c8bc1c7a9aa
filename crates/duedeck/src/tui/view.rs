use std::path::PathBuf;
use std::time::{Duration, Instant};

use duedeck_app::config::StartView;
use duedeck_app::{Clock, LoadOutcome, TaskRepository, TaskStore};
use duedeck_core::views::split_due;
use duedeck_core::{Task, TaskDraft, TaskId};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
};

use super::constants::UI_MESSAGE_TTL_SECS;
use super::editor::TaskForm;
use super::task_visibility::TaskListState;
use super::TuiOptions;
use crate::config::KeyBindingsConfig;

/// Page shown above the tab bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum ActiveView {
    Dashboard,
    Tasks,
    Calendar,
    Settings,
}

impl ActiveView {
    pub(super) const ALL: [Self; 4] = [Self::Dashboard, Self::Tasks, Self::Calendar, Self::Settings];

    pub(super) const fn tab_label(self) -> &'static str {
        match self {
            Self::Dashboard => "Summary",
            Self::Tasks => "Tasks",
            Self::Calendar => "Events",
            Self::Settings => "Settings",
        }
    }

    pub(super) fn index(self) -> usize {
        Self::ALL.iter().position(|view| *view == self).unwrap_or(0)
    }

    pub(super) fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub(super) fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl From<StartView> for ActiveView {
    fn from(view: StartView) -> Self {
        match view {
            StartView::Dashboard => Self::Dashboard,
            StartView::Tasks => Self::Tasks,
            StartView::Calendar => Self::Calendar,
            StartView::Settings => Self::Settings,
        }
    }
}

/// Modal editor state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum EditorState {
    Closed,
    Adding(TaskForm),
    Editing { task: Task, form: TaskForm },
}

impl EditorState {
    pub(super) const fn form(&self) -> Option<&TaskForm> {
        match self {
            Self::Closed => None,
            Self::Adding(form) | Self::Editing { form, .. } => Some(form),
        }
    }

    pub(super) const fn form_mut(&mut self) -> Option<&mut TaskForm> {
        match self {
            Self::Closed => None,
            Self::Adding(form) | Self::Editing { form, .. } => Some(form),
        }
    }

    pub(super) const fn is_open(&self) -> bool {
        !matches!(self, Self::Closed)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum EditorRequest {
    New,
    Edit(TaskId),
}

/// Everything a page may ask the shell to do.
///
/// Pages never touch the repository; they produce intents and
/// [`Ui::dispatch`] applies them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum Intent {
    AddTask(TaskDraft),
    UpdateTask(Task),
    ToggleTask(TaskId),
    DeleteTask(TaskId),
    ChangeView(ActiveView),
    OpenEditor(EditorRequest),
    CloseEditor,
}

pub(super) struct Ui<S: TaskStore, C: Clock> {
    pub(super) repo: TaskRepository<S, C>,
    pub(super) active_view: ActiveView,
    pub(super) editor: EditorState,
    pub(super) task_list: TaskListState,
    pub(super) dashboard_selected: usize,
    pub(super) message: Option<Message>,
    pub(super) should_quit: bool,
    /// Keybindings configuration.
    pub(super) keybindings: KeyBindingsConfig,
    pub(super) config_path: Option<PathBuf>,
}

impl<S: TaskStore, C: Clock> Ui<S, C> {
    pub(super) const MAIN_MIN_HEIGHT: u16 = 5;
    pub(super) const TAB_BAR_HEIGHT: u16 = 3;
    pub(super) const STATUS_HEIGHT: u16 = 4;

    pub(super) fn new(repo: TaskRepository<S, C>, keybindings: KeyBindingsConfig, options: TuiOptions) -> Self {
        let mut ui = Self {
            repo,
            active_view: options.start_view.into(),
            editor: EditorState::Closed,
            task_list: TaskListState::default(),
            dashboard_selected: 0,
            message: None,
            should_quit: false,
            keybindings,
            config_path: options.config_path,
        };
        ui.report_load_outcome();
        ui
    }

    fn report_load_outcome(&mut self) {
        if let LoadOutcome::Recovered { reason, backup } = self.repo.outcome() {
            let text = backup.as_ref().map_or_else(
                || format!("Saved tasks were unreadable ({reason}); showing example tasks"),
                |path| {
                    format!(
                        "Saved tasks were unreadable ({reason}); moved to {} and showing example tasks",
                        path.display()
                    )
                },
            );
            self.error(text);
        }
    }

    /// Pending tasks due today, as listed under "Today's Focus".
    pub(super) fn focus_tasks(&self) -> Vec<&Task> {
        split_due(self.repo.tasks(), self.repo.clock().today()).today
    }

    pub(super) fn selected_focus_task_id(&self) -> Option<TaskId> {
        self.focus_tasks()
            .get(self.dashboard_selected)
            .map(|task| task.id.clone())
    }

    pub(super) fn selected_list_task_id(&self) -> Option<TaskId> {
        self.task_list.selected_task_id(self.repo.tasks())
    }

    /// Apply an intent, reporting failures as status messages.
    pub(super) fn dispatch(&mut self, intent: Intent) {
        match intent {
            Intent::AddTask(draft) => match self.repo.add(draft) {
                Ok(id) => {
                    self.editor = EditorState::Closed;
                    self.task_list.select_task(self.repo.tasks(), &id);
                    self.info("Task added");
                }
                Err(err) => self.error(format!("Could not add task: {err}")),
            },
            Intent::UpdateTask(task) => match self.repo.update(task) {
                Ok(true) => {
                    self.editor = EditorState::Closed;
                    self.info("Task updated");
                }
                Ok(false) => {
                    self.editor = EditorState::Closed;
                    self.error("Task no longer exists");
                }
                Err(err) => self.error(format!("Could not update task: {err}")),
            },
            Intent::ToggleTask(id) => match self.repo.toggle_completion(&id) {
                Ok(Some(true)) => self.info("Marked complete"),
                Ok(Some(false)) => self.info("Marked as in progress"),
                Ok(None) => {}
                Err(err) => self.error(format!("Could not update task: {err}")),
            },
            Intent::DeleteTask(id) => match self.repo.remove(&id) {
                Ok(removed) => {
                    self.task_list.conceal(&id);
                    if removed {
                        self.info("Task deleted");
                    }
                }
                Err(err) => self.error(format!("Could not delete task: {err}")),
            },
            Intent::ChangeView(view) => self.active_view = view,
            Intent::OpenEditor(EditorRequest::New) => {
                self.editor = EditorState::Adding(TaskForm::new(self.repo.clock().today()));
            }
            Intent::OpenEditor(EditorRequest::Edit(id)) => {
                if let Some(task) = self.repo.get(&id) {
                    self.editor = EditorState::Editing {
                        form: TaskForm::from_task(task),
                        task: task.clone(),
                    };
                }
            }
            Intent::CloseEditor => self.editor = EditorState::Closed,
        }
        self.clamp_selections();
    }

    /// Turn the open form into an intent; a blocked form yields nothing.
    pub(super) fn submit_editor(&mut self) {
        let intent = match &self.editor {
            EditorState::Closed => return,
            EditorState::Adding(form) => form.submit().map(Intent::AddTask),
            EditorState::Editing { task, form } => form
                .submit()
                .map(|draft| Intent::UpdateTask(task.with_draft(draft))),
        };
        if let Some(intent) = intent {
            self.dispatch(intent);
        }
    }

    fn clamp_selections(&mut self) {
        let focus_len = self.focus_tasks().len();
        self.dashboard_selected = self.dashboard_selected.min(focus_len.saturating_sub(1));
        self.task_list.clamp(self.repo.tasks());
    }

    pub(super) fn draw(&self, f: &mut Frame<'_>) {
        let size = f.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(Self::MAIN_MIN_HEIGHT),
                Constraint::Length(Self::TAB_BAR_HEIGHT),
                Constraint::Length(Self::STATUS_HEIGHT),
            ])
            .split(size);

        self.draw_main(f, chunks[0]);
        self.draw_tab_bar(f, chunks[1]);
        self.draw_status(f, chunks[2]);

        if let Some(form) = self.editor.form() {
            self.draw_editor_popup(f, form);
        }
    }

    fn draw_main(&self, f: &mut Frame<'_>, area: Rect) {
        match self.active_view {
            ActiveView::Dashboard => self.draw_dashboard(f, area),
            ActiveView::Tasks => self.draw_task_list(f, area),
            ActiveView::Calendar => self.draw_calendar(f, area),
            ActiveView::Settings => self.draw_settings(f, area),
        }
    }

    pub(super) fn info(&mut self, message: impl Into<String>) {
        self.message = Some(Message::info(message));
    }

    pub(super) fn error(&mut self, message: impl Into<String>) {
        self.message = Some(Message::error(message));
    }

    pub(super) fn tick(&mut self) {
        if let Some(msg) = &self.message
            && msg.is_expired(Duration::from_secs(UI_MESSAGE_TTL_SECS))
        {
            self.message = None;
        }
    }
}

/// Work that needs the terminal handed over to another program.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum UiAction {
    EditDescription,
}

pub(super) struct Message {
    pub(super) text: String,
    pub(super) level: MessageLevel,
    created_at: Instant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum MessageLevel {
    Info,
    Error,
}

impl Message {
    fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            level: MessageLevel::Info,
            created_at: Instant::now(),
        }
    }

    fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            level: MessageLevel::Error,
            created_at: Instant::now(),
        }
    }

    pub(super) fn style(&self) -> Style {
        match self.level {
            MessageLevel::Info => Style::default().fg(Color::Green),
            MessageLevel::Error => Style::default().fg(Color::Red),
        }
    }

    fn is_expired(&self, ttl: Duration) -> bool {
        self.created_at.elapsed() >= ttl
    }
}
