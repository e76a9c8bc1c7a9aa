//! Modal task form used for both creating and editing tasks.

use duedeck_core::date::{format_date, parse_date, shift_days};
use duedeck_core::{Category, Priority, Recurrence, Task, TaskDraft};
use time::Date;

/// Field that currently receives input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum FormField {
    Title,
    Description,
    Category,
    SubCategory,
    DueDate,
    Priority,
    Repeat,
}

impl FormField {
    pub(super) const ALL: [Self; 7] = [
        Self::Title,
        Self::Description,
        Self::Category,
        Self::SubCategory,
        Self::DueDate,
        Self::Priority,
        Self::Repeat,
    ];

    pub(super) const fn label(self) -> &'static str {
        match self {
            Self::Title => "Title",
            Self::Description => "Description",
            Self::Category => "Category",
            Self::SubCategory => "Sub-category",
            Self::DueDate => "Due date",
            Self::Priority => "Priority",
            Self::Repeat => "Repeat",
        }
    }

    /// Fields that accept typed characters.
    pub(super) const fn accepts_text(self) -> bool {
        matches!(
            self,
            Self::Title | Self::Description | Self::SubCategory | Self::DueDate
        )
    }

    fn position(self) -> usize {
        Self::ALL.iter().position(|field| *field == self).unwrap_or(0)
    }

    fn next(self) -> Self {
        Self::ALL[(self.position() + 1) % Self::ALL.len()]
    }

    fn prev(self) -> Self {
        Self::ALL[(self.position() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// In-progress values of the task editor.
///
/// The due date is kept as typed so an unparsable date can block submission
/// instead of being silently replaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct TaskForm {
    pub(super) title: String,
    pub(super) description: String,
    pub(super) category: Category,
    pub(super) sub_category: Option<String>,
    pub(super) due_text: String,
    pub(super) priority: Priority,
    pub(super) recurring: Option<Recurrence>,
    pub(super) focus: FormField,
}

impl TaskForm {
    /// Blank form for a new task due `today`.
    pub(super) fn new(today: Date) -> Self {
        let defaults = TaskDraft::new(String::new(), today);
        Self::from_draft(&defaults)
    }

    /// Form pre-filled with an existing task.
    pub(super) fn from_task(task: &Task) -> Self {
        Self::from_draft(&task.to_draft())
    }

    fn from_draft(draft: &TaskDraft) -> Self {
        Self {
            title: draft.title.clone(),
            description: draft.description.clone(),
            category: draft.category,
            sub_category: draft.sub_category.clone(),
            due_text: format_date(draft.due_date),
            priority: draft.priority,
            recurring: draft.recurring,
            focus: FormField::Title,
        }
    }

    pub(super) fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub(super) fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
    }

    /// Step the focused choice field forwards or backwards.
    ///
    /// Text fields other than the due date and sub-category ignore this.
    pub(super) fn cycle(&mut self, forward: bool) {
        match self.focus {
            FormField::Category => {
                let next = cycle_in(&Category::ALL, &self.category, forward);
                self.select_category(next);
            }
            FormField::SubCategory => self.cycle_sub_category(forward),
            FormField::DueDate => {
                if let Some(date) = self.due_date() {
                    self.due_text = format_date(shift_days(date, if forward { 1 } else { -1 }));
                }
            }
            FormField::Priority => {
                self.priority = cycle_in(&Priority::ALL, &self.priority, forward);
            }
            FormField::Repeat => {
                let options = repeat_options();
                self.recurring = cycle_in(&options, &self.recurring, forward);
            }
            FormField::Title | FormField::Description => {}
        }
    }

    /// Change the category; the sub-category restarts at its first suggestion.
    pub(super) fn select_category(&mut self, category: Category) {
        self.category = category;
        self.sub_category = category.default_sub_category().map(str::to_owned);
    }

    fn cycle_sub_category(&mut self, forward: bool) {
        let suggestions = self.category.suggestions();
        if suggestions.is_empty() {
            return;
        }
        let current = self
            .sub_category
            .as_deref()
            .and_then(|value| suggestions.iter().position(|s| *s == value));
        let next = match current {
            Some(pos) if forward => (pos + 1) % suggestions.len(),
            Some(pos) => (pos + suggestions.len() - 1) % suggestions.len(),
            None => 0,
        };
        self.sub_category = Some(suggestions[next].to_owned());
    }

    pub(super) fn input_char(&mut self, ch: char) {
        match self.focus {
            FormField::Title => self.title.push(ch),
            FormField::Description => self.description.push(ch),
            FormField::SubCategory => self.sub_category.get_or_insert_with(String::new).push(ch),
            FormField::DueDate => {
                if ch.is_ascii_digit() || ch == '-' {
                    self.due_text.push(ch);
                }
            }
            FormField::Category | FormField::Priority | FormField::Repeat => {}
        }
    }

    pub(super) fn backspace(&mut self) {
        match self.focus {
            FormField::Title => {
                self.title.pop();
            }
            FormField::Description => {
                self.description.pop();
            }
            FormField::SubCategory => {
                if let Some(value) = self.sub_category.as_mut() {
                    value.pop();
                    if value.is_empty() {
                        self.sub_category = None;
                    }
                }
            }
            FormField::DueDate => {
                self.due_text.pop();
            }
            FormField::Category | FormField::Priority | FormField::Repeat => {}
        }
    }

    /// Replace the description, dropping the trailing newline editors add.
    pub(super) fn set_description(&mut self, raw: &str) {
        self.description = raw.trim_end_matches(['\n', '\r']).to_owned();
    }

    pub(super) fn due_date(&self) -> Option<Date> {
        parse_date(&self.due_text).ok()
    }

    /// Whether the save control is enabled.
    pub(super) fn can_submit(&self) -> bool {
        !self.title.trim().is_empty() && self.due_date().is_some()
    }

    /// Values to save, or `None` while submission is blocked.
    pub(super) fn submit(&self) -> Option<TaskDraft> {
        if !self.can_submit() {
            return None;
        }
        let due_date = self.due_date()?;
        let draft = TaskDraft {
            title: self.title.clone(),
            description: self.description.clone(),
            category: self.category,
            sub_category: self.sub_category.clone(),
            priority: self.priority,
            due_date,
            recurring: self.recurring,
        };
        Some(draft.normalized())
    }

    /// Display text for a field.
    pub(super) fn value_of(&self, field: FormField) -> String {
        match field {
            FormField::Title => self.title.clone(),
            FormField::Description => self.description.clone(),
            FormField::Category => self.category.label().to_owned(),
            FormField::SubCategory => self.sub_category.clone().unwrap_or_default(),
            FormField::DueDate => self.due_text.clone(),
            FormField::Priority => self.priority.label().to_owned(),
            FormField::Repeat => repeat_label(self.recurring).to_owned(),
        }
    }
}

pub(super) const fn repeat_label(rule: Option<Recurrence>) -> &'static str {
    match rule {
        None | Some(Recurrence::None) => "Does not repeat",
        Some(Recurrence::Daily) => "Daily",
        Some(Recurrence::Weekly) => "Weekly",
        Some(Recurrence::Monthly) => "Monthly",
        Some(Recurrence::Quarterly) => "Quarterly",
        Some(Recurrence::Yearly) => "Yearly",
    }
}

fn repeat_options() -> Vec<Option<Recurrence>> {
    std::iter::once(None)
        .chain(
            Recurrence::ALL
                .into_iter()
                .filter(|rule| *rule != Recurrence::None)
                .map(Some),
        )
        .collect()
}

fn cycle_in<T: Copy + PartialEq>(options: &[T], current: &T, forward: bool) -> T {
    let len = options.len();
    let pos = options.iter().position(|opt| opt == current);
    let next = match pos {
        Some(pos) if forward => (pos + 1) % len,
        Some(pos) => (pos + len - 1) % len,
        None => 0,
    };
    options[next]
}
