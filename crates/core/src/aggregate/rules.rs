use crate::model::{DurationBand, DurationThresholds, ProgressState};

/// Color state of a progress line, decided by its latest value.
#[must_use]
pub fn line_color_rule(final_progress: u8) -> ProgressState {
    if final_progress == 100 {
        ProgressState::Complete
    } else {
        ProgressState::InProgress
    }
}

/// Two-bucket rule for the progress gauge. NaN counts as in progress.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn gauge_progress_color(mean_progress: f64) -> ProgressState {
    if mean_progress == 100.0 {
        ProgressState::Complete
    } else {
        ProgressState::InProgress
    }
}

/// Three-bucket rule for the production-time gauge.
///
/// Both bounds are inclusive on the lower band. NaN (no measurable task)
/// resolves to `Short`.
#[must_use]
pub fn gauge_duration_color(mean_duration_days: f64, thresholds: &DurationThresholds) -> DurationBand {
    if mean_duration_days.is_nan() || mean_duration_days <= thresholds.short_max_days {
        DurationBand::Short
    } else if mean_duration_days <= thresholds.long_max_days {
        DurationBand::Medium
    } else {
        DurationBand::Long
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_is_complete_only_at_100() {
        assert_eq!(line_color_rule(100), ProgressState::Complete);
        assert_eq!(line_color_rule(99), ProgressState::InProgress);
        assert_eq!(line_color_rule(0), ProgressState::InProgress);
    }

    #[test]
    fn progress_gauge_has_no_gradient() {
        assert_eq!(gauge_progress_color(100.0), ProgressState::Complete);
        assert_eq!(gauge_progress_color(99.9), ProgressState::InProgress);
        assert_eq!(gauge_progress_color(f64::NAN), ProgressState::InProgress);
    }

    #[test]
    fn duration_bands_resolve_boundaries_downwards() {
        let t = DurationThresholds::default();
        assert_eq!(gauge_duration_color(100.0, &t), DurationBand::Short);
        assert_eq!(gauge_duration_color(150.0, &t), DurationBand::Medium);
        assert_eq!(gauge_duration_color(200.0, &t), DurationBand::Medium);
        assert_eq!(gauge_duration_color(250.0, &t), DurationBand::Long);
        assert_eq!(gauge_duration_color(f64::NAN, &t), DurationBand::Short);
    }

    #[test]
    fn duration_thresholds_are_configurable() {
        let t = DurationThresholds {
            short_max_days: 30.0,
            long_max_days: 60.0,
        };
        assert_eq!(gauge_duration_color(45.0, &t), DurationBand::Medium);
        assert_eq!(gauge_duration_color(61.0, &t), DurationBand::Long);
    }
}
