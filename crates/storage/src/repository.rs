use std::io;
use std::sync::Arc;

use progress_core::model::{LessonRecord, ProgressPoint};
use thiserror::Error;

/// Errors surfaced while loading a dataset.
///
/// Every variant is fatal at startup: the tables are loaded once and never
/// reloaded.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DataFormatError {
    #[error("{source_name}: cannot open")]
    Io {
        source_name: String,
        #[source]
        source: io::Error,
    },

    #[error("{source_name}: malformed csv")]
    Csv {
        source_name: String,
        #[source]
        error: csv::Error,
    },

    #[error("{source_name}: missing required column {column:?}")]
    MissingColumn { source_name: String, column: String },

    #[error("{source_name} line {line}: column {column:?} has unparsable date {value:?}")]
    InvalidDate {
        source_name: String,
        line: u64,
        column: String,
        value: String,
    },

    #[error("{source_name} line {line}: column {column:?} has invalid number {value:?}")]
    InvalidNumber {
        source_name: String,
        line: u64,
        column: String,
        value: String,
    },

    #[error("{source_name} line {line}: column {column:?} has unknown status {value:?}")]
    InvalidStatus {
        source_name: String,
        line: u64,
        column: String,
        value: String,
    },

    #[error("{source_name} line {line}: column {column:?} cannot be blank")]
    BlankValue {
        source_name: String,
        line: u64,
        column: String,
    },
}

/// Source contract for the two dashboard tables.
pub trait DatasetSource: Send + Sync {
    /// Read every lesson/subtask row.
    ///
    /// # Errors
    ///
    /// Returns `DataFormatError` if the source is unreadable or malformed.
    fn load_lessons(&self) -> Result<Vec<LessonRecord>, DataFormatError>;

    /// Read every lesson-completion event.
    ///
    /// # Errors
    ///
    /// Returns `DataFormatError` if the source is unreadable or malformed.
    fn load_progress(&self) -> Result<Vec<ProgressPoint>, DataFormatError>;
}

/// Fixed in-memory tables for tests and prototyping.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    lessons: Vec<LessonRecord>,
    progress: Vec<ProgressPoint>,
}

impl InMemorySource {
    #[must_use]
    pub fn new(lessons: Vec<LessonRecord>, progress: Vec<ProgressPoint>) -> Self {
        Self { lessons, progress }
    }
}

impl DatasetSource for InMemorySource {
    fn load_lessons(&self) -> Result<Vec<LessonRecord>, DataFormatError> {
        Ok(self.lessons.clone())
    }

    fn load_progress(&self) -> Result<Vec<ProgressPoint>, DataFormatError> {
        Ok(self.progress.clone())
    }
}

/// Both tables, fully materialized and shared read-only.
#[derive(Debug, Clone)]
pub struct Datasets {
    pub lessons: Arc<[LessonRecord]>,
    pub progress: Arc<[ProgressPoint]>,
}

impl Datasets {
    /// Load both tables from `source`, logging rows that break the assumed
    /// date and status invariants. Such rows are kept.
    ///
    /// # Errors
    ///
    /// Returns the first `DataFormatError` raised by the source.
    pub fn load(source: &dyn DatasetSource) -> Result<Self, DataFormatError> {
        let lessons = source.load_lessons()?;
        let progress = source.load_progress()?;

        let inverted = lessons.iter().filter(|r| r.has_inverted_dates()).count();
        if inverted > 0 {
            tracing::warn!(rows = inverted, "lesson rows end before they start");
        }
        let divergent = lessons
            .iter()
            .filter(|r| !r.status_matches_progress())
            .count();
        if divergent > 0 {
            tracing::warn!(
                rows = divergent,
                "lesson rows where progress == 100 disagrees with status DONE"
            );
        }
        tracing::info!(
            lessons = lessons.len(),
            progress_points = progress.len(),
            "datasets loaded"
        );

        Ok(Self {
            lessons: lessons.into(),
            progress: progress.into(),
        })
    }

    /// Wrap already-built tables without going through a source.
    #[must_use]
    pub fn from_parts(lessons: Vec<LessonRecord>, progress: Vec<ProgressPoint>) -> Self {
        Self {
            lessons: lessons.into(),
            progress: progress.into(),
        }
    }
}
