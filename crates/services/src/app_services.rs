use std::sync::Arc;

use storage::{CsvSource, DatasetSource, Datasets};

use crate::course_page::CoursePageService;
use crate::error::DashboardError;
use crate::overview::OverviewService;
use crate::settings::DashboardSettings;
use crate::Clock;

/// Assembles the page services over one loaded dataset.
#[derive(Clone)]
pub struct AppServices {
    datasets: Datasets,
    overview: Arc<OverviewService>,
    course_pages: Vec<Arc<CoursePageService>>,
}

impl AppServices {
    /// Build services backed by the CSV files named in `settings`.
    ///
    /// # Errors
    ///
    /// Returns `DashboardError::Settings` for invalid settings and
    /// `DashboardError::Data` if either dataset fails to load.
    pub fn from_settings(settings: &DashboardSettings, clock: Clock) -> Result<Self, DashboardError> {
        let source = CsvSource::new(
            &settings.lessons_csv,
            &settings.progress_csv,
            settings.column_map(),
        );
        Self::from_source(&source, settings, clock)
    }

    /// Build services over any dataset source.
    ///
    /// # Errors
    ///
    /// Returns `DashboardError::Settings` for invalid settings and
    /// `DashboardError::Data` if the source fails.
    pub fn from_source(
        source: &dyn DatasetSource,
        settings: &DashboardSettings,
        clock: Clock,
    ) -> Result<Self, DashboardError> {
        settings.validate()?;
        let datasets = Datasets::load(source)?;
        Ok(Self::from_datasets(datasets, settings, clock))
    }

    /// Build services over tables that are already loaded. `settings` are
    /// assumed valid.
    #[must_use]
    pub fn from_datasets(datasets: Datasets, settings: &DashboardSettings, clock: Clock) -> Self {
        let palette = Arc::new(settings.palette.clone());
        let overview = Arc::new(OverviewService::new(
            clock,
            &datasets,
            Arc::clone(&palette),
            settings.cache,
        ));
        let course_pages = settings
            .courses
            .iter()
            .map(|page| {
                Arc::new(CoursePageService::new(
                    page.clone(),
                    clock,
                    &datasets.lessons,
                    Arc::clone(&palette),
                    settings.thresholds,
                    settings.cache,
                ))
            })
            .collect();

        Self {
            datasets,
            overview,
            course_pages,
        }
    }

    #[must_use]
    pub fn datasets(&self) -> &Datasets {
        &self.datasets
    }

    #[must_use]
    pub fn overview(&self) -> Arc<OverviewService> {
        Arc::clone(&self.overview)
    }

    /// Look up a course page by key or course name.
    ///
    /// # Errors
    ///
    /// Returns `DashboardError::UnknownCoursePage` when nothing matches.
    pub fn course_page(&self, name: &str) -> Result<Arc<CoursePageService>, DashboardError> {
        self.course_pages
            .iter()
            .find(|svc| svc.page().matches(name))
            .map(Arc::clone)
            .ok_or_else(|| DashboardError::UnknownCoursePage(name.to_owned()))
    }

    #[must_use]
    pub fn course_pages(&self) -> &[Arc<CoursePageService>] {
        &self.course_pages
    }
}
