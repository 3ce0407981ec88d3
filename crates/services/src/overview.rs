use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;

use progress_core::aggregate::{BucketCount, bucket_progress, dimension_values, filter_by_dimension};
use progress_core::model::{DateWindow, Dimension, Granularity, Palette, ProgressPoint, Selection};
use storage::Datasets;

use crate::cache::ChartCache;
use crate::charts::{self, Figure};
use crate::error::DashboardError;
use crate::settings::CacheSettings;
use crate::Clock;

/// Both overview charts for one selection.
#[derive(Debug, Clone, Serialize)]
pub struct OverviewCharts {
    pub progression: Figure,
    pub production: Figure,
}

/// Cross-course overview: cumulative progression and per-period production,
/// filtered by course.
pub struct OverviewService {
    clock: Clock,
    palette: Arc<Palette>,
    points: Arc<[ProgressPoint]>,
    course_options: Vec<String>,
    earliest: Option<NaiveDate>,
    progression: ChartCache<Selection, Vec<ProgressPoint>>,
    production: ChartCache<(Selection, Granularity), Vec<BucketCount>>,
}

impl OverviewService {
    #[must_use]
    pub fn new(
        clock: Clock,
        datasets: &Datasets,
        palette: Arc<Palette>,
        cache: CacheSettings,
    ) -> Self {
        let points = Arc::clone(&datasets.progress);
        // The axis starts at the first completion of the whole table, whatever
        // the selection.
        let earliest = points.iter().map(|p| p.completion_date).min();
        Self {
            clock,
            palette,
            course_options: dimension_values(&datasets.lessons, Dimension::Course),
            earliest,
            points,
            progression: ChartCache::new("overview.progression", cache.course_page),
            production: ChartCache::new("overview.production", cache.production),
        }
    }

    /// Course dropdown options, in dataset order.
    #[must_use]
    pub fn course_options(&self) -> &[String] {
        &self.course_options
    }

    /// `first_plotted` is the earliest x value of the chart, `None` when it
    /// has no points. Bucket labels can precede the first completion.
    fn range(
        &self,
        first_plotted: Option<NaiveDate>,
        window: Option<DateWindow>,
    ) -> Option<(NaiveDate, NaiveDate)> {
        let start = first_plotted.map(|first| self.earliest.map_or(first, |e| e.min(first)));
        charts::time_range(start, self.clock.today(), window)
    }

    /// Cumulative completed lessons per course.
    #[must_use]
    pub fn progression_chart(&self, selection: &Selection, window: Option<DateWindow>) -> Figure {
        let points = self.progression.get_or_compute(selection, || {
            tracing::debug!(selected = selection.len(), "filtering progression");
            filter_by_dimension(&self.points, Dimension::Course, selection)
        });
        let range = self.range(points.iter().map(|p| p.completion_date).min(), window);
        charts::progression_chart(&points, &self.palette, range)
    }

    /// Completed lessons per day, week or month.
    #[must_use]
    pub fn production_chart(
        &self,
        selection: &Selection,
        granularity: Granularity,
        window: Option<DateWindow>,
    ) -> Figure {
        let key = (selection.clone(), granularity);
        let buckets = self.production.get_or_compute(&key, || {
            tracing::debug!(selected = selection.len(), %granularity, "bucketing production");
            let filtered = filter_by_dimension(&self.points, Dimension::Course, selection);
            bucket_progress(&filtered, granularity)
        });
        // Buckets are sorted by date.
        let range = self.range(buckets.first().map(|b| b.bucket), window);
        charts::production_chart(&buckets, &self.palette, range)
    }

    /// Like [`OverviewService::production_chart`], with the granularity
    /// given as a label such as `"week"`.
    ///
    /// # Errors
    ///
    /// Returns `DashboardError::Granularity` for unknown labels.
    pub fn production_chart_for_label(
        &self,
        selection: &Selection,
        granularity: &str,
        window: Option<DateWindow>,
    ) -> Result<Figure, DashboardError> {
        let granularity: Granularity = granularity.parse()?;
        Ok(self.production_chart(selection, granularity, window))
    }

    #[must_use]
    pub fn render(
        &self,
        selection: &Selection,
        granularity: Granularity,
        window: Option<DateWindow>,
    ) -> OverviewCharts {
        OverviewCharts {
            progression: self.progression_chart(selection, window),
            production: self.production_chart(selection, granularity, window),
        }
    }

    #[must_use]
    pub fn production_cache(&self) -> &ChartCache<(Selection, Granularity), Vec<BucketCount>> {
        &self.production
    }
}
