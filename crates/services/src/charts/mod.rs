//! Declarative chart specifications built from aggregation results.
//!
//! Builders are pure: they take aggregated rows, a palette and an optional
//! pinned time range and return a [`Figure`] ready for JSON serialization.

mod axis;
mod bars;
mod figure;
mod gauge;
mod timeline;

pub use axis::{AutoRange, Axis, AxisTitle, RangeButton, RangeSelector, RangeSlider, time_range};
pub use bars::{responsible_bars, status_bars, teacher_bars};
pub use figure::{
    BarTrace, Datum, Figure, Font, Gauge, GaugeAxis, IndicatorTrace, Layout, Legend, LegendTitle,
    Line, Marker, MarkerLine, Orientation, Paint, ScatterMode, ScatterTrace, Title, Trace,
};
pub use gauge::{duration_gauge, progress_gauge};
pub use timeline::{gantt_chart, production_chart, progress_lines_chart, progression_chart};
