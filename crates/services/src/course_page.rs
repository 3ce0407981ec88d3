use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;

use progress_core::aggregate::{
    GanttInterval, ProgressSeries, ProgressSummary, Tally, count_subtasks_by_status,
    dimension_values, filter_by_dimension, order_by_total_ascending, progress_series,
    summarize_gantt_intervals, summarize_progress, tally_by_status,
};
use progress_core::model::{
    DateWindow, Dimension, DurationThresholds, LessonField, LessonRecord, Palette, Selection,
};

use crate::cache::ChartCache;
use crate::charts::{self, Figure};
use crate::settings::{CacheSettings, CoursePageSettings};
use crate::Clock;

/// Every aggregation a course page draws from, for one module selection.
#[derive(Debug, Clone, Serialize)]
pub struct CoursePageDigest {
    pub earliest_start: Option<NaiveDate>,
    pub intervals: Vec<GanttInterval>,
    pub series: Vec<ProgressSeries>,
    pub summary: ProgressSummary,
    pub by_status: Tally,
    pub by_teacher: Tally,
    pub by_responsible: Tally,
    pub responsible_order: Vec<String>,
}

impl CoursePageDigest {
    #[must_use]
    pub fn compute(rows: &[LessonRecord]) -> Self {
        let by_responsible =
            count_subtasks_by_status(rows, &[LessonField::Responsible, LessonField::Module]);
        let responsible_order = order_by_total_ascending(&by_responsible, LessonField::Responsible);
        Self {
            earliest_start: rows.iter().filter_map(|r| r.start_date).min(),
            intervals: summarize_gantt_intervals(rows),
            series: progress_series(rows),
            summary: summarize_progress(rows),
            by_status: tally_by_status(rows, &[]),
            by_teacher: tally_by_status(
                rows,
                &[LessonField::Course, LessonField::Teacher, LessonField::Module],
            ),
            by_responsible,
            responsible_order,
        }
    }
}

/// The seven charts of a course page plus its summary scalars.
#[derive(Debug, Clone, Serialize)]
pub struct CoursePageCharts {
    pub title: String,
    pub gantt: Figure,
    pub lines: Figure,
    pub progress_gauge: Figure,
    pub duration_gauge: Figure,
    pub status_bars: Figure,
    pub teacher_bars: Figure,
    pub responsible_bars: Figure,
    pub summary: ProgressSummary,
}

/// One course's production page, filtered by module.
pub struct CoursePageService {
    page: CoursePageSettings,
    clock: Clock,
    palette: Arc<Palette>,
    thresholds: DurationThresholds,
    rows: Vec<LessonRecord>,
    module_options: Vec<String>,
    cache: ChartCache<Selection, CoursePageDigest>,
}

impl CoursePageService {
    /// Restricts `lessons` to the page's course.
    #[must_use]
    pub fn new(
        page: CoursePageSettings,
        clock: Clock,
        lessons: &[LessonRecord],
        palette: Arc<Palette>,
        thresholds: DurationThresholds,
        cache: CacheSettings,
    ) -> Self {
        let course = Selection::from_iter([page.course.as_str()]);
        let rows = filter_by_dimension(lessons, Dimension::Course, &course);
        if rows.is_empty() {
            tracing::warn!(page = %page.key, course = %page.course, "course has no lesson rows");
        }
        Self {
            module_options: dimension_values(&rows, Dimension::Module),
            rows,
            clock,
            palette,
            thresholds,
            cache: ChartCache::new("course_page", cache.course_page),
            page,
        }
    }

    #[must_use]
    pub fn page(&self) -> &CoursePageSettings {
        &self.page
    }

    /// Module dropdown options, in dataset order.
    #[must_use]
    pub fn module_options(&self) -> &[String] {
        &self.module_options
    }

    #[must_use]
    pub fn cache(&self) -> &ChartCache<Selection, CoursePageDigest> {
        &self.cache
    }

    /// Aggregations for a module selection, memoized.
    #[must_use]
    pub fn digest(&self, modules: &Selection) -> Arc<CoursePageDigest> {
        self.cache.get_or_compute(modules, || {
            let filtered = filter_by_dimension(&self.rows, Dimension::Module, modules);
            tracing::debug!(
                page = %self.page.key,
                selected = modules.len(),
                rows = filtered.len(),
                "recomputing course page"
            );
            CoursePageDigest::compute(&filtered)
        })
    }

    /// Build every chart of the page. Time axes run from the earliest start
    /// date of the selected rows to today unless `window` pins them.
    #[must_use]
    pub fn render(&self, modules: &Selection, window: Option<DateWindow>) -> CoursePageCharts {
        let digest = self.digest(modules);
        let palette = self.palette.as_ref();
        let range = charts::time_range(digest.earliest_start, self.clock.today(), window);

        CoursePageCharts {
            title: self.page.display_title().to_owned(),
            gantt: charts::gantt_chart(&digest.intervals, palette, range),
            lines: charts::progress_lines_chart(&digest.series, palette, range),
            progress_gauge: charts::progress_gauge(&digest.summary, palette),
            duration_gauge: charts::duration_gauge(&digest.summary, &self.thresholds, palette),
            status_bars: charts::status_bars(&digest.by_status, palette),
            teacher_bars: charts::teacher_bars(&digest.by_teacher, palette),
            responsible_bars: charts::responsible_bars(
                &digest.by_responsible,
                digest.responsible_order.clone(),
                palette,
            ),
            summary: digest.summary,
        }
    }
}
