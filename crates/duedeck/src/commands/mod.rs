use std::io::Write;

use anyhow::{Context, Result};
use duedeck_app::{Clock, TaskRepository, TaskStore};
use duedeck_core::date::{format_date, format_long_date};
use duedeck_core::views::{category_stats, filter_tasks, group_by_completion, split_due};
use duedeck_core::{CategoryFilter, Priority, Task, TaskDraft, TaskFilter};

use crate::Command;

/// Execute a non-interactive command, writing human-readable output to `out`.
///
/// Unknown task ids are reported on `out` and are not errors.
pub fn run<S: TaskStore, C: Clock>(
    command: Command,
    repo: &mut TaskRepository<S, C>,
    out: &mut impl Write,
) -> Result<()> {
    match command {
        Command::Ls { category, search } => {
            let filter = TaskFilter {
                category: category.map_or(CategoryFilter::All, CategoryFilter::Only),
                search: search.unwrap_or_default(),
            };
            list_tasks(repo.tasks(), &filter, out)?;
        }
        Command::Add {
            title,
            description,
            category,
            sub_category,
            priority,
            due,
            repeat,
        } => {
            let mut draft = TaskDraft::new(title, due.unwrap_or_else(|| repo.clock().today()));
            draft.description = description;
            draft.category = category;
            draft.sub_category = sub_category.or_else(|| category.default_sub_category().map(str::to_owned));
            draft.priority = priority;
            draft.recurring = repeat;
            let id = repo.add(draft).context("Failed to add task")?;
            writeln!(out, "Created task: {id}")?;
        }
        Command::Toggle { id } => match repo.toggle_completion(&id).context("Failed to update task")? {
            Some(true) => writeln!(out, "Marked complete: {id}")?,
            Some(false) => writeln!(out, "Marked as in progress: {id}")?,
            None => writeln!(out, "Task not found: {id}")?,
        },
        Command::Rm { id } => {
            if repo.remove(&id).context("Failed to delete task")? {
                writeln!(out, "Deleted task: {id}")?;
            } else {
                writeln!(out, "Task not found: {id}")?;
            }
        }
        Command::Show { id } => match repo.get(&id) {
            Some(task) => writeln!(out, "{}", serde_json::to_string_pretty(task)?)?,
            None => writeln!(out, "Task not found: {id}")?,
        },
        Command::Summary => print_summary(repo, out)?,
        Command::Tui | Command::Config { .. } => {}
    }
    Ok(())
}

fn list_tasks(tasks: &[Task], filter: &TaskFilter, out: &mut impl Write) -> Result<()> {
    let groups = group_by_completion(filter_tasks(tasks, filter));
    if groups.is_empty() {
        writeln!(out, "No tasks found in this category.")?;
        return Ok(());
    }

    for (heading, group) in [("In Progress", &groups.pending), ("Completed", &groups.completed)] {
        if group.is_empty() {
            continue;
        }
        writeln!(out, "{heading}")?;
        for task in group {
            writeln!(out, "  {}", task_line(task))?;
        }
    }
    Ok(())
}

fn task_line(task: &Task) -> String {
    let mark = if task.completed { "[x]" } else { "[ ]" };
    let mut line = format!(
        "{mark} {}  {}  {}  due {}  {}",
        task.id,
        task.title,
        task.priority,
        format_date(task.due_date),
        task.classification()
    );
    if let Some(rule) = task.recurring {
        line.push_str(&format!("  repeats {rule}"));
    }
    line
}

fn print_summary<S: TaskStore, C: Clock>(repo: &TaskRepository<S, C>, out: &mut impl Write) -> Result<()> {
    let today = repo.clock().today();
    let split = split_due(repo.tasks(), today);

    writeln!(out, "{}", format_long_date(today))?;
    if !split.overdue.is_empty() {
        writeln!(out, "{} Overdue Tasks", split.overdue.len())?;
        for task in &split.overdue {
            writeln!(out, "  - {} (due {})", task.title, format_date(task.due_date))?;
        }
    }

    writeln!(out)?;
    writeln!(out, "Today's Focus")?;
    if split.today.is_empty() {
        writeln!(out, "  No tasks for today. You're all caught up!")?;
    }
    for task in &split.today {
        let urgent = if task.priority == Priority::High { "  Urgent" } else { "" };
        writeln!(out, "  [ ] {}{urgent}  {}", task.title, task.classification())?;
    }

    writeln!(out)?;
    writeln!(out, "Categories")?;
    for stats in category_stats(repo.tasks()) {
        writeln!(
            out,
            "  {:<18} {}/{} done ({:.0}%)",
            stats.category.label(),
            stats.completed,
            stats.total,
            stats.percentage()
        )?;
    }
    Ok(())
}
