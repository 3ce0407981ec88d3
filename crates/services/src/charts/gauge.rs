use progress_core::aggregate::{ProgressSummary, gauge_duration_color, gauge_progress_color};
use progress_core::model::{DurationThresholds, Palette};

use super::figure::{Figure, Gauge, GaugeAxis, IndicatorTrace, Layout, Line, Trace};

fn gauge(title: &str, value: f64, range: [f64; 2], color: &str) -> Figure {
    Figure::new(Layout::titled(title)).with_trace(Trace::Indicator(IndicatorTrace {
        mode: "gauge+number",
        value,
        gauge: Gauge {
            axis: GaugeAxis { range },
            bar: Line {
                color: color.to_owned(),
            },
        },
    }))
}

/// Mean task progress on a 0-100 dial.
#[must_use]
pub fn progress_gauge(summary: &ProgressSummary, palette: &Palette) -> Figure {
    let state = gauge_progress_color(summary.mean_progress);
    gauge(
        "Overall progress (%)",
        summary.mean_progress,
        [0.0, 100.0],
        palette.progress_color(state),
    )
}

/// Mean production time in days, on a dial spanning the shortest to the
/// longest task.
#[must_use]
pub fn duration_gauge(
    summary: &ProgressSummary,
    thresholds: &DurationThresholds,
    palette: &Palette,
) -> Figure {
    let band = gauge_duration_color(summary.mean_duration_days, thresholds);
    gauge(
        "Production time (days)",
        summary.mean_duration_days,
        [summary.min_duration_days, summary.max_duration_days],
        palette.duration_color(band),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(mean_progress: f64, mean_days: f64) -> ProgressSummary {
        ProgressSummary {
            mean_progress,
            mean_duration_days: mean_days,
            min_duration_days: 10.0,
            max_duration_days: 300.0,
            task_count: 3,
        }
    }

    fn bar_color(fig: &Figure) -> &str {
        match &fig.data[0] {
            Trace::Indicator(t) => t.gauge.bar.color.as_str(),
            _ => panic!("expected indicator"),
        }
    }

    #[test]
    fn progress_gauge_is_complete_only_at_100() {
        let palette = Palette::default();
        assert_eq!(bar_color(&progress_gauge(&summary(100.0, 0.0), &palette)), palette.complete);
        assert_eq!(bar_color(&progress_gauge(&summary(99.5, 0.0), &palette)), palette.in_progress);
    }

    #[test]
    fn duration_gauge_follows_bands() {
        let palette = Palette::default();
        let t = DurationThresholds::default();
        assert_eq!(bar_color(&duration_gauge(&summary(0.0, 100.0), &t, &palette)), palette.duration_short);
        assert_eq!(bar_color(&duration_gauge(&summary(0.0, 150.0), &t, &palette)), palette.duration_medium);
        assert_eq!(bar_color(&duration_gauge(&summary(0.0, 250.0), &t, &palette)), palette.duration_long);
    }

    #[test]
    fn empty_summary_renders_null_gauges() {
        let palette = Palette::default();
        let fig = duration_gauge(&ProgressSummary::empty(), &DurationThresholds::default(), &palette);
        let json = fig.to_json().unwrap();
        assert!(json["data"][0]["value"].is_null());
        assert!(json["data"][0]["gauge"]["axis"]["range"][1].is_null());
    }
}
