use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier grouping the subtasks of one lesson into a single timeline bar.
///
/// Source exports use free-form labels (`"GCN-M1-A3"`, `"17"`), so the id is
/// kept as text and compared verbatim.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    /// Creates a new `TaskId`
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the underlying label
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TaskId({})", self.0)
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Error type for parsing an id from a blank string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIdError {
    kind: &'static str,
}

impl fmt::Display for ParseIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} cannot be blank", self.kind)
    }
}

impl std::error::Error for ParseIdError {}

impl FromStr for TaskId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ParseIdError { kind: "TaskId" });
        }
        Ok(TaskId::new(trimmed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_id_display() {
        let id = TaskId::new("GCN-7");
        assert_eq!(id.to_string(), "GCN-7");
    }

    #[test]
    fn task_id_from_str_trims() {
        let id: TaskId = "  12 ".parse().unwrap();
        assert_eq!(id, TaskId::new("12"));
    }

    #[test]
    fn task_id_from_blank_fails() {
        assert!("   ".parse::<TaskId>().is_err());
    }
}
