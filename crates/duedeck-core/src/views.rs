//! Read-only projections of the task collection.
//!
//! Everything here is recomputed from the full collection on each call; the
//! expected data sizes (tens to a few hundred tasks) make caching pointless.

use time::Date;

use crate::text_matcher::TextMatcher;
use crate::{Category, Task};

/// Pending tasks due today and pending tasks past their due date.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DueSplit<'a> {
    /// Incomplete tasks due exactly on `today`.
    pub today: Vec<&'a Task>,
    /// Incomplete tasks due strictly before `today`.
    pub overdue: Vec<&'a Task>,
}

/// Split incomplete tasks into "due today" and "overdue", keeping collection order.
#[must_use]
pub fn split_due(tasks: &[Task], today: Date) -> DueSplit<'_> {
    let mut split = DueSplit::default();
    for task in tasks.iter().filter(|task| !task.completed) {
        if task.due_date == today {
            split.today.push(task);
        } else if task.due_date < today {
            split.overdue.push(task);
        }
    }
    split
}

/// Completion counts for a single category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryStats {
    /// Category summarised.
    pub category: Category,
    /// Number of tasks in the category.
    pub total: usize,
    /// Number of completed tasks in the category.
    pub completed: usize,
}

impl CategoryStats {
    /// Completion percentage in `[0, 100]`; `0` for an empty category.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn percentage(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        (self.completed as f64 / self.total as f64) * 100.0
    }

    /// Completion ratio in `[0, 1]`, convenient for gauges.
    #[must_use]
    pub fn ratio(&self) -> f64 {
        self.percentage() / 100.0
    }
}

/// Stats for the four built-in dashboard categories, in dashboard order.
#[must_use]
pub fn category_stats(tasks: &[Task]) -> Vec<CategoryStats> {
    Category::DASHBOARD
        .into_iter()
        .map(|category| stats_for(tasks, category))
        .collect()
}

/// Stats for a single category.
#[must_use]
pub fn stats_for(tasks: &[Task], category: Category) -> CategoryStats {
    let (total, completed) = tasks
        .iter()
        .filter(|task| task.category == category)
        .fold((0, 0), |(total, completed), task| {
            (total + 1, completed + usize::from(task.completed))
        });
    CategoryStats {
        category,
        total,
        completed,
    }
}

/// Category restriction applied by the filter pills.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum CategoryFilter {
    /// No restriction.
    #[default]
    All,
    /// Only tasks in the given category.
    Only(Category),
}

impl CategoryFilter {
    /// Pill order: `All` followed by every category.
    #[must_use]
    pub fn options() -> Vec<Self> {
        std::iter::once(Self::All)
            .chain(Category::ALL.into_iter().map(Self::Only))
            .collect()
    }

    /// Label shown on the pill.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Only(category) => category.label(),
        }
    }

    /// Whether a task passes this restriction.
    #[must_use]
    pub fn accepts(self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Only(category) => task.category == category,
        }
    }

    /// Next pill, wrapping around.
    #[must_use]
    pub fn cycle_next(self) -> Self {
        let options = Self::options();
        let pos = options.iter().position(|opt| *opt == self).unwrap_or(0);
        options[(pos + 1) % options.len()]
    }

    /// Previous pill, wrapping around.
    #[must_use]
    pub fn cycle_prev(self) -> Self {
        let options = Self::options();
        let pos = options.iter().position(|opt| *opt == self).unwrap_or(0);
        options[(pos + options.len() - 1) % options.len()]
    }
}

/// Search term plus category restriction used by the task list.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TaskFilter {
    /// Category restriction.
    pub category: CategoryFilter,
    /// Raw search text as typed; blank means "no search".
    ///
    /// Surrounding whitespace is ignored, so `"bill "` matches `"Electricity Bill"`.
    pub search: String,
}

impl TaskFilter {
    /// Filter with only a category restriction.
    #[must_use]
    pub fn category(category: CategoryFilter) -> Self {
        Self {
            category,
            search: String::new(),
        }
    }

    /// Returns true when neither restriction is active.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.category == CategoryFilter::All && self.search.trim().is_empty()
    }

    /// Whether a task passes both the category and the search restriction.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        self.category.accepts(task)
            && TextMatcher::new(&self.search).is_none_or(|matcher| matcher.matches(task))
    }
}

/// Tasks passing the filter, in collection order.
#[must_use]
pub fn filter_tasks<'a>(tasks: &'a [Task], filter: &TaskFilter) -> Vec<&'a Task> {
    let matcher = TextMatcher::new(&filter.search);
    tasks
        .iter()
        .filter(|task| filter.category.accepts(task))
        .filter(|task| matcher.as_ref().is_none_or(|m| m.matches(task)))
        .collect()
}

/// A filtered set partitioned by completion.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Grouped<'a> {
    /// Incomplete tasks ("In Progress").
    pub pending: Vec<&'a Task>,
    /// Completed tasks.
    pub completed: Vec<&'a Task>,
}

impl Grouped<'_> {
    /// Total number of tasks across both groups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len() + self.completed.len()
    }

    /// Returns true when both groups are empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty() && self.completed.is_empty()
    }
}

/// Partition tasks by completion, preserving order within each group.
#[must_use]
pub fn group_by_completion<'a, I>(tasks: I) -> Grouped<'a>
where
    I: IntoIterator<Item = &'a Task>,
{
    let (completed, pending): (Vec<&Task>, Vec<&Task>) =
        tasks.into_iter().partition(|task| task.completed);
    Grouped { pending, completed }
}
