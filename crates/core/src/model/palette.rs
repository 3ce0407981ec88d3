use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

use crate::model::LessonStatus;

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum PaletteError {
    #[error("color for {0} cannot be empty")]
    EmptyColor(&'static str),

    #[error("duration thresholds must satisfy 0 <= short ({short}) <= long ({long})")]
    InvalidThresholds { short: f64, long: f64 },
}

//
// ─── STATES ───────────────────────────────────────────────────────────────────
//

/// Two-state completion rule shared by progress lines and the progress gauge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressState {
    Complete,
    InProgress,
}

/// Escalation band for the mean production time gauge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DurationBand {
    /// At most `short_max_days`.
    Short,
    /// Above `short_max_days`, at most `long_max_days`.
    Medium,
    /// Above `long_max_days`.
    Long,
}

/// Upper bounds (inclusive, in days) of the short and medium duration bands.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DurationThresholds {
    pub short_max_days: f64,
    pub long_max_days: f64,
}

impl Default for DurationThresholds {
    fn default() -> Self {
        Self {
            short_max_days: 100.0,
            long_max_days: 200.0,
        }
    }
}

impl DurationThresholds {
    /// # Errors
    ///
    /// Returns `PaletteError::InvalidThresholds` unless `0 <= short <= long`.
    pub fn validate(&self) -> Result<(), PaletteError> {
        let ordered = self.short_max_days >= 0.0 && self.short_max_days <= self.long_max_days;
        if ordered {
            Ok(())
        } else {
            Err(PaletteError::InvalidThresholds {
                short: self.short_max_days,
                long: self.long_max_days,
            })
        }
    }
}

//
// ─── PALETTE ──────────────────────────────────────────────────────────────────
//

/// Color lookup for every categorical state a chart can show.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub complete: String,
    pub in_progress: String,
    pub pending: String,
    pub duration_short: String,
    pub duration_medium: String,
    pub duration_long: String,
    pub courses: BTreeMap<String, String>,
    pub course_fallback: String,
}

impl Default for Palette {
    fn default() -> Self {
        let courses = [
            ("Gestão e Controle de Negócios", "#ff5c00"),
            ("Gestão de Recursos Humanos", "#FF0023"),
            ("Qualidade e Tecnologias da Carne", "#DB00FF"),
        ]
        .into_iter()
        .map(|(name, color)| (name.to_owned(), color.to_owned()))
        .collect();

        Self {
            complete: "#FF0023".into(),
            in_progress: "#ffd700".into(),
            pending: "gray".into(),
            duration_short: "#FF0023".into(),
            duration_medium: "#ffd700".into(),
            duration_long: "red".into(),
            courses,
            course_fallback: "#007eff".into(),
        }
    }
}

impl Palette {
    /// Rejects palettes with blank entries so a chart never receives an empty color.
    ///
    /// # Errors
    ///
    /// Returns `PaletteError::EmptyColor` naming the first blank entry.
    pub fn validate(&self) -> Result<(), PaletteError> {
        let named = [
            ("complete", &self.complete),
            ("in_progress", &self.in_progress),
            ("pending", &self.pending),
            ("duration_short", &self.duration_short),
            ("duration_medium", &self.duration_medium),
            ("duration_long", &self.duration_long),
            ("course_fallback", &self.course_fallback),
        ];
        for (name, color) in named {
            if color.trim().is_empty() {
                return Err(PaletteError::EmptyColor(name));
            }
        }
        if self.courses.values().any(|c| c.trim().is_empty()) {
            return Err(PaletteError::EmptyColor("courses"));
        }
        Ok(())
    }

    #[must_use]
    pub fn status_color(&self, status: LessonStatus) -> &str {
        match status {
            LessonStatus::Done => &self.complete,
            LessonStatus::InProgress => &self.in_progress,
            LessonStatus::Pending => &self.pending,
        }
    }

    #[must_use]
    pub fn progress_color(&self, state: ProgressState) -> &str {
        match state {
            ProgressState::Complete => &self.complete,
            ProgressState::InProgress => &self.in_progress,
        }
    }

    #[must_use]
    pub fn duration_color(&self, band: DurationBand) -> &str {
        match band {
            DurationBand::Short => &self.duration_short,
            DurationBand::Medium => &self.duration_medium,
            DurationBand::Long => &self.duration_long,
        }
    }

    #[must_use]
    pub fn course_color(&self, course: &str) -> &str {
        self.courses
            .get(course)
            .map_or(self.course_fallback.as_str(), String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_palette_is_valid() {
        Palette::default().validate().unwrap();
        DurationThresholds::default().validate().unwrap();
    }

    #[test]
    fn unknown_course_uses_fallback() {
        let palette = Palette::default();
        assert_eq!(palette.course_color("Astronomia"), "#007eff");
        assert_eq!(palette.course_color("Gestão de Recursos Humanos"), "#FF0023");
    }

    #[test]
    fn blank_color_is_rejected() {
        let palette = Palette {
            pending: "  ".into(),
            ..Palette::default()
        };
        assert_eq!(palette.validate(), Err(PaletteError::EmptyColor("pending")));
    }

    #[test]
    fn inverted_thresholds_are_rejected() {
        let thresholds = DurationThresholds {
            short_max_days: 300.0,
            long_max_days: 200.0,
        };
        assert!(thresholds.validate().is_err());
    }
}
