use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::Serialize;

use crate::aggregate::timeline::{max_date, min_date};
use crate::model::{LessonRecord, TaskId};

/// Scalars shown on the gauges. NaN when no task qualifies.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProgressSummary {
    /// Mean over tasks of each task's highest progress.
    pub mean_progress: f64,
    /// Mean task duration, floored to whole days.
    pub mean_duration_days: f64,
    pub min_duration_days: f64,
    pub max_duration_days: f64,
    pub task_count: usize,
}

impl ProgressSummary {
    #[must_use]
    pub fn empty() -> Self {
        Self {
            mean_progress: f64::NAN,
            mean_duration_days: f64::NAN,
            min_duration_days: f64::NAN,
            max_duration_days: f64::NAN,
            task_count: 0,
        }
    }
}

#[derive(Default)]
struct TaskAcc {
    progress: u8,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
}

/// Per-task progress and duration statistics for the gauges.
///
/// A task's duration is `max(end_date) - min(start_date)`; tasks missing
/// either side are left out of the duration figures but still count towards
/// mean progress.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn summarize_progress(rows: &[LessonRecord]) -> ProgressSummary {
    let mut tasks: IndexMap<&TaskId, TaskAcc> = IndexMap::new();
    for row in rows {
        let Some(task_id) = &row.task_id else {
            continue;
        };
        let acc = tasks.entry(task_id).or_default();
        acc.progress = acc.progress.max(row.progress);
        acc.start = min_date(acc.start, row.start_date);
        acc.end = max_date(acc.end, row.end_date);
    }
    if tasks.is_empty() {
        return ProgressSummary::empty();
    }

    let progress_sum: f64 = tasks.values().map(|t| f64::from(t.progress)).sum();
    let mean_progress = progress_sum / tasks.len() as f64;

    let durations: Vec<i64> = tasks
        .values()
        .filter_map(|t| Some((t.end? - t.start?).num_days().max(0)))
        .collect();

    let (mean, min, max) = match (durations.iter().min(), durations.iter().max()) {
        (Some(&min), Some(&max)) => {
            let total: i64 = durations.iter().sum();
            let mean = (total as f64 / durations.len() as f64).floor();
            (mean, min as f64, max as f64)
        }
        _ => (f64::NAN, f64::NAN, f64::NAN),
    };

    ProgressSummary {
        mean_progress,
        mean_duration_days: mean,
        min_duration_days: min,
        max_duration_days: max,
        task_count: tasks.len(),
    }
}
