use std::collections::HashSet;

use duedeck_core::views::{filter_tasks, group_by_completion};
use duedeck_core::{CategoryFilter, Grouped, Task, TaskFilter, TaskId};

/// Filter, selection and per-row delete reveal for the task list, independent of IO.
///
/// Rows are the filtered tasks grouped as pending first, then completed;
/// `selected` indexes into that flattened order.
#[derive(Debug, Default)]
pub(super) struct TaskListState {
    filter: TaskFilter,
    searching: bool,
    selected: usize,
    revealed: HashSet<TaskId>,
}

#[allow(clippy::missing_const_for_fn)]
impl TaskListState {
    pub(super) fn filter(&self) -> &TaskFilter {
        &self.filter
    }

    pub(super) fn category(&self) -> CategoryFilter {
        self.filter.category
    }

    pub(super) fn cycle_category(&mut self, forward: bool) {
        self.filter.category = if forward {
            self.filter.category.cycle_next()
        } else {
            self.filter.category.cycle_prev()
        };
        self.selected = 0;
    }

    pub(super) fn is_searching(&self) -> bool {
        self.searching
    }

    pub(super) fn start_search(&mut self) {
        self.searching = true;
    }

    pub(super) fn finish_search(&mut self) {
        self.searching = false;
    }

    pub(super) fn clear_search(&mut self) {
        self.filter.search.clear();
        self.searching = false;
        self.selected = 0;
    }

    pub(super) fn push_search(&mut self, ch: char) {
        self.filter.search.push(ch);
        self.selected = 0;
    }

    pub(super) fn pop_search(&mut self) {
        self.filter.search.pop();
        self.selected = 0;
    }

    /// Filtered tasks split into "In Progress" and "Completed".
    pub(super) fn rows<'a>(&self, tasks: &'a [Task]) -> Grouped<'a> {
        group_by_completion(filter_tasks(tasks, &self.filter))
    }

    fn row_ids(&self, tasks: &[Task]) -> Vec<TaskId> {
        let rows = self.rows(tasks);
        rows.pending
            .iter()
            .chain(rows.completed.iter())
            .map(|task| task.id.clone())
            .collect()
    }

    pub(super) fn selected_index(&self) -> usize {
        self.selected
    }

    pub(super) fn selected_task_id(&self, tasks: &[Task]) -> Option<TaskId> {
        self.row_ids(tasks).get(self.selected).cloned()
    }

    pub(super) fn select_next(&mut self, tasks: &[Task]) {
        let len = self.row_ids(tasks).len();
        if self.selected + 1 < len {
            self.selected += 1;
        }
    }

    pub(super) fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Keep the selection inside the rows after the collection changed.
    pub(super) fn clamp(&mut self, tasks: &[Task]) {
        let len = self.row_ids(tasks).len();
        self.selected = self.selected.min(len.saturating_sub(1));
        self.revealed.retain(|id| tasks.iter().any(|task| &task.id == id));
    }

    /// Jump to a task if it is visible under the current filter.
    pub(super) fn select_task(&mut self, tasks: &[Task], id: &TaskId) {
        if let Some(pos) = self.row_ids(tasks).iter().position(|row| row == id) {
            self.selected = pos;
        }
    }

    pub(super) fn reveal(&mut self, id: TaskId) {
        self.revealed.insert(id);
    }

    pub(super) fn conceal(&mut self, id: &TaskId) {
        self.revealed.remove(id);
    }

    pub(super) fn is_revealed(&self, id: &TaskId) -> bool {
        self.revealed.contains(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use duedeck_core::{Category, TaskDraft};
    use time::macros::date;

    fn task(id: &str, title: &str, category: Category, completed: bool) -> Task {
        let mut draft = TaskDraft::new(title, date!(2025 - 04 - 15));
        draft.category = category;
        let mut task = Task::from_draft(TaskId::from(id), draft, 0);
        task.completed = completed;
        task
    }

    fn sample() -> Vec<Task> {
        vec![
            task("a", "Done errand", Category::Personal, true),
            task("b", "Pay water", Category::Bills, false),
            task("c", "Board meeting", Category::Business, false),
        ]
    }

    #[test]
    fn rows_put_pending_before_completed() {
        let tasks = sample();
        let state = TaskListState::default();
        let rows = state.rows(&tasks);
        let pending: Vec<_> = rows.pending.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(pending, ["b", "c"]);
        assert_eq!(rows.completed.len(), 1);
        assert_eq!(state.selected_task_id(&tasks), Some(TaskId::from("b")));
    }

    #[test]
    fn selection_stays_in_bounds() {
        let tasks = sample();
        let mut state = TaskListState::default();
        state.select_prev();
        assert_eq!(state.selected_index(), 0);
        for _ in 0..5 {
            state.select_next(&tasks);
        }
        assert_eq!(state.selected_task_id(&tasks), Some(TaskId::from("a")));

        let shorter = &tasks[1..];
        state.clamp(shorter);
        assert_eq!(state.selected_index(), 1);
    }

    #[test]
    fn category_filter_and_search_restrict_rows() {
        let tasks = sample();
        let mut state = TaskListState::default();
        state.cycle_category(true);
        assert_eq!(state.category(), CategoryFilter::Only(Category::Personal));
        assert_eq!(state.rows(&tasks).len(), 1);

        state.cycle_category(false);
        for ch in "BOARD".chars() {
            state.push_search(ch);
        }
        assert_eq!(state.selected_task_id(&tasks), Some(TaskId::from("c")));

        state.clear_search();
        assert_eq!(state.rows(&tasks).len(), 3);
    }

    #[test]
    fn reveal_is_tracked_per_row() {
        let tasks = sample();
        let mut state = TaskListState::default();
        state.reveal(TaskId::from("b"));
        state.reveal(TaskId::from("c"));
        assert!(state.is_revealed(&TaskId::from("b")));

        state.conceal(&TaskId::from("b"));
        assert!(!state.is_revealed(&TaskId::from("b")));
        assert!(state.is_revealed(&TaskId::from("c")));

        state.clamp(&tasks[..2]);
        assert!(!state.is_revealed(&TaskId::from("c")));
    }
}
