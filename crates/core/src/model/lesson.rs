use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::model::ids::TaskId;

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown lesson status: {0:?}")]
pub struct StatusParseError(pub String);

//
// ─── STATUS ───────────────────────────────────────────────────────────────────
//

/// Production state of a lesson or subtask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LessonStatus {
    Pending,
    InProgress,
    Done,
}

impl LessonStatus {
    pub const ALL: [LessonStatus; 3] = [Self::Pending, Self::InProgress, Self::Done];

    /// Canonical label used in chart categories.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            LessonStatus::Pending => "PENDING",
            LessonStatus::InProgress => "IN_PROGRESS",
            LessonStatus::Done => "DONE",
        }
    }
}

impl fmt::Display for LessonStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LessonStatus {
    type Err = StatusParseError;

    /// Accepts the canonical labels and the Portuguese labels of the production
    /// spreadsheets, ignoring case and treating `_` as a space.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().replace('_', " ").to_uppercase();
        match normalized.as_str() {
            "PENDING" | "PENDENTE" => Ok(Self::Pending),
            "IN PROGRESS" | "EM ANDAMENTO" => Ok(Self::InProgress),
            "DONE" | "CONCLUÍDA" | "CONCLUIDA" => Ok(Self::Done),
            _ => Err(StatusParseError(s.to_owned())),
        }
    }
}

//
// ─── FIELDS ───────────────────────────────────────────────────────────────────
//

/// Text columns of a [`LessonRecord`] that can act as grouping keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LessonField {
    Course,
    Module,
    Lesson,
    Subtask,
    Teacher,
    Responsible,
    TaskId,
}

//
// ─── RECORD ───────────────────────────────────────────────────────────────────
//

/// One row of the per-lesson progress table.
///
/// Several rows (subtasks) share a `task_id`; together they form one lesson
/// bar on the timeline. Rows with no id are kept for the tallies but take no
/// part in per-task aggregates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LessonRecord {
    pub course: String,
    pub module: String,
    pub lesson: String,
    pub subtask: String,
    pub status: LessonStatus,
    pub progress: u8,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub teacher: String,
    pub responsible: String,
    pub task_id: Option<TaskId>,
}

impl LessonRecord {
    /// Returns the value of a text column.
    #[must_use]
    pub fn field(&self, field: LessonField) -> &str {
        match field {
            LessonField::Course => &self.course,
            LessonField::Module => &self.module,
            LessonField::Lesson => &self.lesson,
            LessonField::Subtask => &self.subtask,
            LessonField::Teacher => &self.teacher,
            LessonField::Responsible => &self.responsible,
            LessonField::TaskId => self.task_id.as_ref().map_or("", TaskId::as_str),
        }
    }

    /// True when `progress == 100` exactly when the status is `Done`.
    ///
    /// The source data does not enforce this; divergent rows are kept.
    #[must_use]
    pub fn status_matches_progress(&self) -> bool {
        (self.progress == 100) == (self.status == LessonStatus::Done)
    }

    /// True when both dates are present and the end precedes the start.
    #[must_use]
    pub fn has_inverted_dates(&self) -> bool {
        matches!((self.start_date, self.end_date), (Some(s), Some(e)) if e < s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_portuguese_and_canonical_labels() {
        assert_eq!("CONCLUÍDA".parse::<LessonStatus>(), Ok(LessonStatus::Done));
        assert_eq!("em andamento".parse::<LessonStatus>(), Ok(LessonStatus::InProgress));
        assert_eq!("IN_PROGRESS".parse::<LessonStatus>(), Ok(LessonStatus::InProgress));
        assert_eq!(" pendente ".parse::<LessonStatus>(), Ok(LessonStatus::Pending));
    }

    #[test]
    fn rejects_unknown_status() {
        let err = "ARCHIVED".parse::<LessonStatus>().unwrap_err();
        assert_eq!(err, StatusParseError("ARCHIVED".into()));
    }

    #[test]
    fn display_round_trips_through_from_str() {
        for status in LessonStatus::ALL {
            assert_eq!(status.to_string().parse::<LessonStatus>(), Ok(status));
        }
    }
}
