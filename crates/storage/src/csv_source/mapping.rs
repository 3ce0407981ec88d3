use chrono::{DateTime, NaiveDate, NaiveDateTime};
use progress_core::model::{LessonStatus, TaskId};

use crate::repository::DataFormatError;

const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

const OFFSET_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f%:z", "%Y-%m-%d %H:%M:%S%.f%z"];

/// Parse an ISO-8601 date or timestamp, keeping only the calendar date.
///
/// Timestamps with an offset keep the date as written, not converted to UTC.
pub(crate) fn parse_iso_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive()))
        .or_else(|| {
            OFFSET_FORMATS
                .iter()
                .find_map(|f| DateTime::parse_from_str(s, f).ok())
                .map(|dt| dt.date_naive())
        })
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|f| NaiveDateTime::parse_from_str(s, f).ok())
                .map(|dt| dt.date())
        })
}

/// Integers, or floats with no fractional part (`"100.0"`), as pandas writes
/// integer columns that once held a missing value.
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn parse_whole_number(raw: &str) -> Option<i64> {
    let s = raw.trim();
    if let Ok(v) = s.parse::<i64>() {
        return Some(v);
    }
    let f = s.parse::<f64>().ok()?;
    let in_range = f.is_finite() && f.fract() == 0.0 && f.abs() < 9.0e15;
    in_range.then_some(f as i64)
}

/// Location of a cell, used to build precise errors.
pub(crate) struct Cell<'a> {
    pub source_name: &'a str,
    pub line: u64,
    pub column: &'a str,
}

impl Cell<'_> {
    fn invalid_number(&self, value: &str) -> DataFormatError {
        DataFormatError::InvalidNumber {
            source_name: self.source_name.to_owned(),
            line: self.line,
            column: self.column.to_owned(),
            value: value.to_owned(),
        }
    }

    fn blank(&self) -> DataFormatError {
        DataFormatError::BlankValue {
            source_name: self.source_name.to_owned(),
            line: self.line,
            column: self.column.to_owned(),
        }
    }

    pub fn optional_date(&self, raw: &str) -> Result<Option<NaiveDate>, DataFormatError> {
        if is_missing(raw) {
            return Ok(None);
        }
        parse_iso_date(raw)
            .map(Some)
            .ok_or_else(|| DataFormatError::InvalidDate {
                source_name: self.source_name.to_owned(),
                line: self.line,
                column: self.column.to_owned(),
                value: raw.to_owned(),
            })
    }

    pub fn required_date(&self, raw: &str) -> Result<NaiveDate, DataFormatError> {
        self.optional_date(raw)?.ok_or_else(|| self.blank())
    }

    pub fn progress(&self, raw: &str) -> Result<u8, DataFormatError> {
        parse_whole_number(raw)
            .filter(|v| (0..=100).contains(v))
            .and_then(|v| u8::try_from(v).ok())
            .ok_or_else(|| self.invalid_number(raw))
    }

    pub fn count(&self, raw: &str) -> Result<u32, DataFormatError> {
        parse_whole_number(raw)
            .and_then(|v| u32::try_from(v).ok())
            .ok_or_else(|| self.invalid_number(raw))
    }

    pub fn status(&self, raw: &str) -> Result<LessonStatus, DataFormatError> {
        raw.parse().map_err(|_| DataFormatError::InvalidStatus {
            source_name: self.source_name.to_owned(),
            line: self.line,
            column: self.column.to_owned(),
            value: raw.to_owned(),
        })
    }

    /// Blank ids load as `None`; such rows never join a task group.
    pub fn task_id(raw: &str) -> Option<TaskId> {
        if is_missing(raw) {
            return None;
        }
        raw.parse().ok()
    }
}

/// Blank cells and the markers pandas writes for missing values.
fn is_missing(raw: &str) -> bool {
    matches!(raw.trim(), "" | "NaT" | "NaN" | "nan")
}
