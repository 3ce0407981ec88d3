#![forbid(unsafe_code)]

pub mod app_services;
pub mod cache;
pub mod charts;
pub mod course_page;
pub mod error;
pub mod overview;
pub mod settings;

pub use progress_core::Clock;

pub use app_services::AppServices;
pub use cache::{CacheStats, ChartCache};
pub use course_page::{CoursePageCharts, CoursePageDigest, CoursePageService};
pub use error::{DashboardError, SettingsError};
pub use overview::{OverviewCharts, OverviewService};
pub use settings::{CacheSettings, CoursePageSettings, DashboardSettings};
