use crate::Task;

/// Case-insensitive substring matcher for task titles and descriptions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextMatcher {
    needle: String,
}

impl TextMatcher {
    /// Normalize a query string into a matcher. Returns `None` for blank inputs.
    #[must_use]
    pub fn new(query: &str) -> Option<Self> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self {
            needle: trimmed.to_lowercase(),
        })
    }

    /// Determine whether the title or description contains the query.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        self.matches_field(&task.title) || self.matches_field(&task.description)
    }

    fn matches_field(&self, value: &str) -> bool {
        value.to_lowercase().contains(&self.needle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Category, TaskDraft, TaskId};
    use time::macros::date;

    fn task(title: &str, description: &str) -> Task {
        let mut draft = TaskDraft::new(title, date!(2025 - 04 - 15));
        draft.description = description.into();
        draft.category = Category::Taxes;
        Task::from_draft(TaskId::generate(), draft, 0)
    }

    #[test]
    fn matcher_skips_blank_queries() {
        assert!(TextMatcher::new("").is_none());
        assert!(TextMatcher::new("   ").is_none());
        assert!(TextMatcher::new("\n").is_none());
    }

    #[test]
    fn matcher_respects_case_insensitive_search() {
        let filing = task("Quarterly BIR Filing", "");
        let matcher =
            TextMatcher::new("bir").unwrap_or_else(|| panic!("matcher must exist for queries with content"));
        assert!(matcher.matches(&filing));

        let matcher =
            TextMatcher::new("QUARTERLY").unwrap_or_else(|| panic!("matcher must exist for queries with content"));
        assert!(matcher.matches(&filing));
    }

    #[test]
    fn matcher_looks_at_description() {
        let bill = task("Electricity Bill", "Meralco account ending in 4522.");
        let matcher =
            TextMatcher::new("meralco").unwrap_or_else(|| panic!("matcher must exist for queries with content"));
        assert!(matcher.matches(&bill));

        let missing =
            TextMatcher::new("water").unwrap_or_else(|| panic!("matcher must exist for queries with content"));
        assert!(!missing.matches(&bill));
    }

    #[test]
    fn matcher_ignores_category_labels() {
        let filing = task("Quarterly filing", "");
        let matcher =
            TextMatcher::new("taxes").unwrap_or_else(|| panic!("matcher must exist for queries with content"));
        assert!(!matcher.matches(&filing));
    }
}
