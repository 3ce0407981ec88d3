use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::InvalidGranularityError;

/// Time bucket used to group completion events before summing them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Granularity {
    #[default]
    Day,
    Week,
    Month,
}

impl Granularity {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Granularity::Day => "day",
            Granularity::Week => "week",
            Granularity::Month => "month",
        }
    }

    /// Maps a completion date to the date labelling its bucket.
    ///
    /// Weeks are labelled by the Wednesday of their ISO week, months by their
    /// first day.
    #[must_use]
    pub fn bucket_of(self, date: NaiveDate) -> NaiveDate {
        match self {
            Granularity::Day => date,
            Granularity::Week => {
                let iso = date.iso_week();
                NaiveDate::from_isoywd_opt(iso.year(), iso.week(), Weekday::Wed).unwrap_or(date)
            }
            Granularity::Month => date.with_day(1).unwrap_or(date),
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Granularity {
    type Err = InvalidGranularityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "day" | "dia" => Ok(Self::Day),
            "week" | "semana" => Ok(Self::Week),
            "month" | "mes" | "mês" => Ok(Self::Month),
            _ => Err(InvalidGranularityError::new(s)),
        }
    }
}
