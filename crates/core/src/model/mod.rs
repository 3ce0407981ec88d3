mod granularity;
mod ids;
mod lesson;
mod palette;
mod progress;
mod selection;
mod window;

pub use granularity::Granularity;
pub use ids::{ParseIdError, TaskId};
pub use lesson::{LessonField, LessonRecord, LessonStatus, StatusParseError};
pub use palette::{DurationBand, DurationThresholds, Palette, PaletteError, ProgressState};
pub use progress::ProgressPoint;
pub use selection::{Dimension, Dimensioned, Selection};
pub use window::DateWindow;
