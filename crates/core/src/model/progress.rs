use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One lesson-completion event in the per-course progress table.
///
/// `cumulative_count` never decreases within a course; `unit_count` is 1 when
/// the row marks a single lesson finishing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressPoint {
    pub course: String,
    pub module: String,
    pub lesson: String,
    pub completion_date: NaiveDate,
    pub cumulative_count: u32,
    pub unit_count: u32,
}
