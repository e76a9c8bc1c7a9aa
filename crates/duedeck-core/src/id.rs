use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use uuid::Uuid;

use crate::error::ParseError;

/// Opaque identifier of a task.
///
/// Freshly generated identifiers are UUID v7 strings, but any non-empty
/// string read back from storage is accepted as-is.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    #[must_use]
    /// Generate a fresh task identifier.
    pub fn generate() -> Self {
        // Version 7 keeps identifiers roughly ordered by creation time.
        Self(Uuid::now_v7().to_string())
    }

    /// Borrow the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for TaskId {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ParseError::EmptyId);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl From<&str> for TaskId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for TaskId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used)]

    use super::*;
    use std::collections::HashSet;

    #[test]
    fn generated_ids_are_uuid_v7() {
        let id = TaskId::generate();
        let parsed = Uuid::parse_str(id.as_str()).expect("generated id must be a uuid");
        assert_eq!(parsed.get_version_num(), 7);
    }

    #[test]
    fn generated_ids_do_not_collide() {
        let ids: HashSet<TaskId> = (0..512).map(|_| TaskId::generate()).collect();
        assert_eq!(ids.len(), 512);
    }

    #[test]
    fn parse_accepts_opaque_strings() {
        let id: TaskId = " x7k2p ".parse().expect("must parse opaque id");
        assert_eq!(id.as_str(), "x7k2p");
    }

    #[test]
    fn parse_rejects_blank_ids() {
        assert!(matches!("   ".parse::<TaskId>(), Err(ParseError::EmptyId)));
    }

    #[test]
    fn serializes_as_plain_string() {
        let id = TaskId::from("42");
        let json = serde_json::to_string(&id).expect("serialize id");
        assert_eq!(json, "\"42\"");
    }
}
