//! Pure aggregation functions feeding the dashboard charts.
//!
//! Every function is total over well-formed rows: empty input yields empty
//! series or NaN scalars, never an error.

mod bucket;
mod filter;
mod rules;
mod summary;
mod tally;
mod timeline;

pub use bucket::{BucketCount, bucket_progress, bucket_progress_by_label};
pub use filter::{dimension_values, filter_by_dimension};
pub use rules::{gauge_duration_color, gauge_progress_color, line_color_rule};
pub use summary::{ProgressSummary, summarize_progress};
pub use tally::{Tally, TallyRow, count_subtasks_by_status, order_by_total_ascending, tally_by_status};
pub use timeline::{
    GanttInterval, ProgressSeries, SeriesPoint, progress_series, summarize_gantt_intervals,
};

#[cfg(test)]
pub(crate) mod test_rows {
    use chrono::NaiveDate;

    use crate::model::{LessonRecord, LessonStatus, ProgressPoint, TaskId};

    pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// A lesson row whose lesson name and task id are both `task`.
    pub fn lesson(course: &str, module: &str, task: &str, status: LessonStatus) -> LessonRecord {
        LessonRecord {
            course: course.into(),
            module: module.into(),
            lesson: task.into(),
            subtask: "record".into(),
            status,
            progress: if status == LessonStatus::Done { 100 } else { 0 },
            start_date: None,
            end_date: None,
            teacher: "Ana".into(),
            responsible: "Bia".into(),
            task_id: Some(TaskId::new(task)),
        }
    }

    pub fn subtask(
        task: &str,
        progress: u8,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
        status: LessonStatus,
    ) -> LessonRecord {
        LessonRecord {
            progress,
            start_date: start,
            end_date: end,
            ..lesson("GCN", "M1", task, status)
        }
    }

    pub fn point(course: &str, completion_date: NaiveDate, unit_count: u32) -> ProgressPoint {
        ProgressPoint {
            course: course.into(),
            module: "M1".into(),
            lesson: "L1".into(),
            completion_date,
            cumulative_count: 0,
            unit_count,
        }
    }
}
