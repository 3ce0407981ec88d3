use chrono::NaiveDate;
use indexmap::{IndexMap, IndexSet};
use serde::Serialize;

use crate::aggregate::rules::line_color_rule;
use crate::model::{LessonRecord, ProgressState, TaskId};

//
// ─── GANTT ────────────────────────────────────────────────────────────────────
//

/// Span of one lesson (all of its subtasks) on the production timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GanttInterval {
    pub task_id: TaskId,
    pub module: String,
    pub lesson: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub percent_complete: u8,
    pub subtasks: usize,
    pub responsible: Vec<String>,
}

impl GanttInterval {
    #[must_use]
    pub fn duration_days(&self) -> i64 {
        (self.end - self.start).num_days()
    }
}

#[derive(Default)]
struct IntervalAcc<'a> {
    first: Option<&'a LessonRecord>,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    progress: u8,
    subtasks: usize,
    responsible: IndexSet<&'a str>,
}

/// Collapses subtask rows into one interval per `task_id`.
///
/// `start` is the earliest start date, `end` the latest end date and
/// `percent_complete` the highest progress recorded for the task. Tasks with
/// no start or no end date are left out, and so are rows with no id. An end
/// before the start collapses to a zero-length interval. Intervals keep the
/// order in which tasks first appear.
#[must_use]
pub fn summarize_gantt_intervals(rows: &[LessonRecord]) -> Vec<GanttInterval> {
    let mut groups: IndexMap<&TaskId, IntervalAcc<'_>> = IndexMap::new();
    for row in rows {
        let Some(task_id) = &row.task_id else {
            continue;
        };
        let acc = groups.entry(task_id).or_default();
        acc.first.get_or_insert(row);
        acc.start = min_date(acc.start, row.start_date);
        acc.end = max_date(acc.end, row.end_date);
        acc.progress = acc.progress.max(row.progress);
        acc.subtasks += 1;
        if !row.responsible.is_empty() {
            acc.responsible.insert(&row.responsible);
        }
    }

    groups
        .into_iter()
        .filter_map(|(task_id, acc)| {
            let (start, end) = (acc.start?, acc.end?);
            let first = acc.first?;
            Some(GanttInterval {
                task_id: task_id.clone(),
                module: first.module.clone(),
                lesson: first.lesson.clone(),
                start,
                end: end.max(start),
                percent_complete: acc.progress,
                subtasks: acc.subtasks,
                responsible: acc.responsible.into_iter().map(str::to_owned).collect(),
            })
        })
        .collect()
}

pub(crate) fn min_date(a: Option<NaiveDate>, b: Option<NaiveDate>) -> Option<NaiveDate> {
    match (a, b) {
        (Some(x), Some(y)) => Some(x.min(y)),
        (x, y) => x.or(y),
    }
}

pub(crate) fn max_date(a: Option<NaiveDate>, b: Option<NaiveDate>) -> Option<NaiveDate> {
    match (a, b) {
        (Some(x), Some(y)) => Some(x.max(y)),
        (x, y) => x.or(y),
    }
}

//
// ─── PROGRESS LINES ───────────────────────────────────────────────────────────
//

/// One recorded progress value of a task, positioned at its end date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    pub progress: u8,
    pub lesson: String,
    pub module: String,
}

/// Progress history of one task, drawn as a single line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgressSeries {
    pub task_id: TaskId,
    pub points: Vec<SeriesPoint>,
    pub final_progress: u8,
}

impl ProgressSeries {
    /// Color state of the whole line.
    #[must_use]
    pub fn state(&self) -> ProgressState {
        line_color_rule(self.final_progress)
    }
}

/// Groups rows into one progress line per `task_id`, points sorted by date.
///
/// Rows without an end date have no position on the time axis and are
/// skipped, as are rows without a task id. `final_progress` is the value at
/// the latest date; rows sharing that date keep their input order, so the
/// last of them wins.
#[must_use]
pub fn progress_series(rows: &[LessonRecord]) -> Vec<ProgressSeries> {
    let mut groups: IndexMap<&TaskId, Vec<SeriesPoint>> = IndexMap::new();
    for row in rows {
        let (Some(task_id), Some(date)) = (&row.task_id, row.end_date) else {
            continue;
        };
        groups.entry(task_id).or_default().push(SeriesPoint {
            date,
            progress: row.progress,
            lesson: row.lesson.clone(),
            module: row.module.clone(),
        });
    }

    groups
        .into_iter()
        .filter_map(|(task_id, mut points)| {
            points.sort_by_key(|p| p.date);
            let final_progress = points.last()?.progress;
            Some(ProgressSeries {
                task_id: task_id.clone(),
                points,
                final_progress,
            })
        })
        .collect()
}
