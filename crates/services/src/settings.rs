//! Dashboard configuration, loaded from TOML.

use std::collections::HashSet;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use progress_core::model::{DurationThresholds, Palette};
use storage::{ColumnMap, ColumnPreset};

use crate::error::SettingsError;

const COURSE_PAGE_CAPACITY: NonZeroUsize = match NonZeroUsize::new(32) {
    Some(n) => n,
    None => NonZeroUsize::MIN,
};

const PRODUCTION_CAPACITY: NonZeroUsize = match NonZeroUsize::new(64) {
    Some(n) => n,
    None => NonZeroUsize::MIN,
};

/// Entry bounds of the memoization caches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheSettings {
    /// Per course page, and for the overview progression chart.
    pub course_page: NonZeroUsize,
    /// Overview production chart, keyed by selection and granularity.
    pub production: NonZeroUsize,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            course_page: COURSE_PAGE_CAPACITY,
            production: PRODUCTION_CAPACITY,
        }
    }
}

/// One course page: a lookup key, the course value in the dataset, and a
/// display title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoursePageSettings {
    pub key: String,
    pub course: String,
    #[serde(default)]
    pub title: String,
}

impl CoursePageSettings {
    #[must_use]
    pub fn new(key: impl Into<String>, course: impl Into<String>) -> Self {
        let course = course.into();
        Self {
            key: key.into(),
            title: course.clone(),
            course,
        }
    }

    /// The title, falling back to the course name when unset.
    #[must_use]
    pub fn display_title(&self) -> &str {
        if self.title.trim().is_empty() {
            &self.course
        } else {
            &self.title
        }
    }

    /// Whether `name` designates this page, by key (case-insensitive) or by
    /// course name.
    #[must_use]
    pub fn matches(&self, name: &str) -> bool {
        self.key.eq_ignore_ascii_case(name) || self.course == name
    }
}

/// Top-level dashboard settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardSettings {
    pub lessons_csv: PathBuf,
    pub progress_csv: PathBuf,
    pub columns: ColumnPreset,
    pub palette: Palette,
    pub thresholds: DurationThresholds,
    pub cache: CacheSettings,
    pub courses: Vec<CoursePageSettings>,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            lessons_csv: PathBuf::from("data/lessons.csv"),
            progress_csv: PathBuf::from("data/progress.csv"),
            columns: ColumnPreset::default(),
            palette: Palette::default(),
            thresholds: DurationThresholds::default(),
            cache: CacheSettings::default(),
            courses: vec![
                CoursePageSettings::new("gcn", "Gestão e Controle de Negócios"),
                CoursePageSettings::new("grh", "Gestão de Recursos Humanos"),
                CoursePageSettings::new("qtc", "Qualidade e Tecnologias da Carne"),
            ],
        }
    }
}

impl DashboardSettings {
    /// Parse and validate settings from TOML text. Missing keys take their
    /// defaults.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::Parse` for malformed TOML and the validation
    /// errors of [`DashboardSettings::validate`].
    pub fn from_toml_str(text: &str) -> Result<Self, SettingsError> {
        let settings: Self = toml::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read, parse and validate a settings file.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::Read` if the file cannot be read, otherwise
    /// the errors of [`DashboardSettings::from_toml_str`].
    pub fn from_file(path: &Path) -> Result<Self, SettingsError> {
        let text = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_toml_str(&text)?;
        tracing::debug!(path = %path.display(), pages = settings.courses.len(), "settings loaded");
        Ok(settings)
    }

    /// # Errors
    ///
    /// Returns `SettingsError::Palette` for blank colors or unordered
    /// thresholds, and `BlankCoursePage`/`DuplicateCoursePage` for bad page
    /// declarations.
    pub fn validate(&self) -> Result<(), SettingsError> {
        self.palette.validate()?;
        self.thresholds.validate()?;

        let mut seen = HashSet::new();
        for page in &self.courses {
            if page.key.trim().is_empty() || page.course.trim().is_empty() {
                return Err(SettingsError::BlankCoursePage(page.key.clone()));
            }
            if !seen.insert(page.key.to_ascii_lowercase()) {
                return Err(SettingsError::DuplicateCoursePage(page.key.clone()));
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn column_map(&self) -> ColumnMap {
        self.columns.into()
    }

    #[must_use]
    pub fn course_page(&self, name: &str) -> Option<&CoursePageSettings> {
        self.courses.iter().find(|p| p.matches(name))
    }
}
