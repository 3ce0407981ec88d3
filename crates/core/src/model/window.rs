use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::InvalidDateWindowError;

/// Explicit `[from, to]` range for a time axis, overriding the computed one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateWindow {
    from: NaiveDate,
    to: NaiveDate,
}

impl DateWindow {
    /// # Errors
    ///
    /// Returns `InvalidDateWindowError` if `to` falls before `from`.
    pub fn new(from: NaiveDate, to: NaiveDate) -> Result<Self, InvalidDateWindowError> {
        if to < from {
            return Err(InvalidDateWindowError::new(format!("{from}..{to}")));
        }
        Ok(Self { from, to })
    }

    #[must_use]
    pub fn from(&self) -> NaiveDate {
        self.from
    }

    #[must_use]
    pub fn to(&self) -> NaiveDate {
        self.to
    }
}

/// Parses `YYYY-MM-DD..YYYY-MM-DD`.
impl FromStr for DateWindow {
    type Err = InvalidDateWindowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidDateWindowError::new(s);
        let (from, to) = s.trim().split_once("..").ok_or_else(invalid)?;
        let from = NaiveDate::parse_from_str(from.trim(), "%Y-%m-%d").map_err(|_| invalid())?;
        let to = NaiveDate::parse_from_str(to.trim(), "%Y-%m-%d").map_err(|_| invalid())?;
        Self::new(from, to)
    }
}
