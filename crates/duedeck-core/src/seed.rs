use time::Date;

use crate::date::shift_days;
use crate::{Category, Priority, Task, TaskId};

/// Example tasks shown when no saved collection exists yet.
///
/// Due dates are relative to `today`; `created_at` is shared by all three.
#[must_use]
pub fn seed_tasks(today: Date, created_at: i64) -> Vec<Task> {
    vec![
        Task {
            id: TaskId::from("1"),
            title: "Quarterly BIR Filing".into(),
            description: "Submit quarterly income tax returns for Q1.".into(),
            category: Category::Taxes,
            sub_category: Some("BIR deadlines".into()),
            priority: Priority::High,
            due_date: today,
            completed: false,
            recurring: None,
            created_at,
        },
        Task {
            id: TaskId::from("2"),
            title: "Electricity Bill".into(),
            description: "Meralco account ending in 4522.".into(),
            category: Category::Bills,
            sub_category: Some("Electricity".into()),
            priority: Priority::Medium,
            due_date: shift_days(today, 3),
            completed: false,
            recurring: None,
            created_at,
        },
        Task {
            id: TaskId::from("3"),
            title: "Weekly Team Sync".into(),
            description: "Review performance metrics with marketing team.".into(),
            category: Category::Business,
            sub_category: None,
            priority: Priority::Medium,
            due_date: today,
            completed: true,
            recurring: None,
            created_at,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::split_due;
    use std::collections::HashSet;
    use time::macros::date;

    #[test]
    fn seed_has_three_unique_tasks() {
        let tasks = seed_tasks(date!(2025 - 04 - 15), 0);
        assert_eq!(tasks.len(), 3);
        let ids: HashSet<&str> = tasks.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids.len(), 3);
    }

    #[test]
    fn seed_dates_follow_today() {
        let today = date!(2025 - 04 - 15);
        let tasks = seed_tasks(today, 0);
        assert_eq!(tasks[1].due_date, date!(2025 - 04 - 18));
        let split = split_due(&tasks, today);
        assert_eq!(split.today.len(), 1);
        assert!(split.overdue.is_empty());
    }
}
