//! Shared error types for the services crate.

use std::path::PathBuf;

use thiserror::Error;

use progress_core::model::PaletteError;
use progress_core::InvalidGranularityError;
use storage::DataFormatError;

/// Errors emitted while loading or validating `DashboardSettings`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SettingsError {
    #[error("cannot read settings file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid settings")]
    Parse(#[from] toml::de::Error),
    #[error(transparent)]
    Palette(#[from] PaletteError),
    #[error("course page {0:?} needs a non-blank key and course")]
    BlankCoursePage(String),
    #[error("course page key {0:?} is declared more than once")]
    DuplicateCoursePage(String),
}

/// Errors emitted by the dashboard services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DashboardError {
    #[error(transparent)]
    Data(#[from] DataFormatError),
    #[error(transparent)]
    Granularity(#[from] InvalidGranularityError),
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error("unknown course page {0:?}")]
    UnknownCoursePage(String),
}
