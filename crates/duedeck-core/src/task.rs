use serde::{Deserialize, Deserializer, Serialize};
use std::{fmt, str::FromStr};
use time::Date;

use crate::error::{DraftError, ParseError};
use crate::id::TaskId;

/// Classification of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    /// Personal errands.
    Personal,
    /// Business chores and meetings.
    Business,
    /// Recurring bills and utility payments.
    #[serde(rename = "Bills & Utilities")]
    Bills,
    /// Tax filings and government fees.
    #[serde(rename = "Taxes & Gov")]
    Taxes,
    /// Anything else.
    Custom,
}

impl Category {
    /// Every category in display order.
    pub const ALL: [Self; 5] = [
        Self::Personal,
        Self::Business,
        Self::Bills,
        Self::Taxes,
        Self::Custom,
    ];

    /// Built-in categories summarised on the dashboard.
    pub const DASHBOARD: [Self; 4] = [Self::Personal, Self::Business, Self::Bills, Self::Taxes];

    /// Human-readable label, identical to the persisted value.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Personal => "Personal",
            Self::Business => "Business",
            Self::Bills => "Bills & Utilities",
            Self::Taxes => "Taxes & Gov",
            Self::Custom => "Custom",
        }
    }

    /// First word of the label, used for compact badges.
    #[must_use]
    pub const fn short_label(self) -> &'static str {
        match self {
            Self::Personal => "Personal",
            Self::Business => "Business",
            Self::Bills => "Bills",
            Self::Taxes => "Taxes",
            Self::Custom => "Custom",
        }
    }

    /// Suggested sub-categories, in the order the editor offers them.
    #[must_use]
    pub const fn suggestions(self) -> &'static [&'static str] {
        match self {
            Self::Personal => &["Health", "Social", "Admin"],
            Self::Business => &["Meetings", "Operations", "Strategy"],
            Self::Bills => &["Electricity", "Water", "Internet", "Credit Card"],
            Self::Taxes => &["BIR Deadlines", "Annual Tax", "LGU Fees"],
            Self::Custom => &[],
        }
    }

    /// Sub-category a freshly selected category starts with.
    #[must_use]
    pub fn default_sub_category(self) -> Option<&'static str> {
        self.suggestions().first().copied()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "personal" => Ok(Self::Personal),
            "business" => Ok(Self::Business),
            "bills" | "bills & utilities" | "utilities" => Ok(Self::Bills),
            "taxes" | "taxes & gov" | "tax" | "gov" => Ok(Self::Taxes),
            "custom" => Ok(Self::Custom),
            _ => Err(ParseError::UnknownCategory(s.to_owned())),
        }
    }
}

/// Urgency of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Priority {
    /// Can wait.
    Low,
    /// Default urgency.
    Medium,
    /// Needs attention first.
    High,
}

impl Priority {
    /// Every priority from lowest to highest.
    pub const ALL: [Self; 3] = [Self::Low, Self::Medium, Self::High];

    /// Human-readable label, identical to the persisted value.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Priority {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" | "med" => Ok(Self::Medium),
            "high" | "urgent" => Ok(Self::High),
            _ => Err(ParseError::UnknownPriority(s.to_owned())),
        }
    }
}

/// Repeat rule recorded on a task. Stored but never expanded into occurrences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Recurrence {
    /// Explicitly one-off.
    None,
    /// Every day.
    Daily,
    /// Every week.
    Weekly,
    /// Every month.
    Monthly,
    /// Every quarter.
    Quarterly,
    /// Every year.
    Yearly,
}

impl Recurrence {
    /// Every rule in editor order.
    pub const ALL: [Self; 6] = [
        Self::None,
        Self::Daily,
        Self::Weekly,
        Self::Monthly,
        Self::Quarterly,
        Self::Yearly,
    ];

    /// Persisted spelling.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Quarterly => "quarterly",
            Self::Yearly => "yearly",
        }
    }
}

impl fmt::Display for Recurrence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Recurrence {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|rule| rule.as_str() == normalized)
            .ok_or_else(|| ParseError::UnknownRecurrence(s.to_owned()))
    }
}

/// A single trackable obligation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique identifier within the collection.
    pub id: TaskId,
    /// Short title, never blank once submitted.
    pub title: String,
    /// Free-form notes.
    #[serde(default)]
    pub description: String,
    /// Classification.
    pub category: Category,
    /// Optional sub-category; suggestions depend on the category.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "non_blank"
    )]
    pub sub_category: Option<String>,
    /// Urgency.
    pub priority: Priority,
    /// Calendar day the task is due.
    #[serde(with = "crate::date::iso")]
    pub due_date: Date,
    /// Completion flag.
    #[serde(rename = "isCompleted")]
    pub completed: bool,
    /// Repeat rule, kept for display only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurring: Option<Recurrence>,
    /// Creation instant in milliseconds since the Unix epoch.
    pub created_at: i64,
}

impl Task {
    /// Build a new pending task from a draft.
    #[must_use]
    pub fn from_draft(id: TaskId, draft: TaskDraft, created_at: i64) -> Self {
        let TaskDraft {
            title,
            description,
            category,
            sub_category,
            priority,
            due_date,
            recurring,
        } = draft;
        Self {
            id,
            title,
            description,
            category,
            sub_category,
            priority,
            due_date,
            completed: false,
            recurring,
            created_at,
        }
    }

    /// Replace every editable field with the draft's values.
    ///
    /// Identifier, creation timestamp and completion flag are kept.
    pub fn apply_draft(&mut self, draft: TaskDraft) {
        self.title = draft.title;
        self.description = draft.description;
        self.category = draft.category;
        self.sub_category = draft.sub_category;
        self.priority = draft.priority;
        self.due_date = draft.due_date;
        self.recurring = draft.recurring;
    }

    /// Copy of this task with the draft applied.
    #[must_use]
    pub fn with_draft(&self, draft: TaskDraft) -> Self {
        let mut next = self.clone();
        next.apply_draft(draft);
        next
    }

    /// Editable fields of this task.
    #[must_use]
    pub fn to_draft(&self) -> TaskDraft {
        TaskDraft {
            title: self.title.clone(),
            description: self.description.clone(),
            category: self.category,
            sub_category: self.sub_category.clone(),
            priority: self.priority,
            due_date: self.due_date,
            recurring: self.recurring,
        }
    }

    /// Sub-category when set, otherwise the category label.
    #[must_use]
    pub fn classification(&self) -> &str {
        self.sub_category.as_deref().unwrap_or(self.category.label())
    }
}

/// Editable fields of a task, as produced by the editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    /// Title; must not be blank.
    pub title: String,
    /// Notes.
    pub description: String,
    /// Classification.
    pub category: Category,
    /// Optional sub-category.
    pub sub_category: Option<String>,
    /// Urgency.
    pub priority: Priority,
    /// Due day.
    pub due_date: Date,
    /// Inert repeat rule.
    pub recurring: Option<Recurrence>,
}

impl TaskDraft {
    /// Draft with the editor's defaults for everything but title and due date.
    #[must_use]
    pub fn new(title: impl Into<String>, due_date: Date) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            category: Category::Personal,
            sub_category: None,
            priority: Priority::Medium,
            due_date,
            recurring: None,
        }
    }

    /// Check the draft can be submitted.
    ///
    /// # Errors
    /// Returns [`DraftError::BlankTitle`] when the title is empty or whitespace only.
    pub fn validate(&self) -> Result<(), DraftError> {
        if self.title.trim().is_empty() {
            return Err(DraftError::BlankTitle);
        }
        Ok(())
    }

    /// Trim the title and drop blank sub-categories.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        self.title = self.title.trim().to_owned();
        self.sub_category = self
            .sub_category
            .map(|value| value.trim().to_owned())
            .filter(|value| !value.is_empty());
        self
    }
}

fn non_blank<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|text| !text.trim().is_empty()))
}
