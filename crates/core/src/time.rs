use chrono::{Local, NaiveDate};

/// A calendar clock so "today" stays deterministic in services and tests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Clock {
    #[default]
    System,
    Fixed(NaiveDate),
}

impl Clock {
    /// Returns a clock that reads the local system date.
    #[must_use]
    pub fn system() -> Self {
        Self::System
    }

    /// Returns a clock pinned to the given date.
    #[must_use]
    pub fn fixed(on: NaiveDate) -> Self {
        Self::Fixed(on)
    }

    /// Returns the current calendar date according to the clock.
    #[must_use]
    pub fn today(&self) -> NaiveDate {
        match self {
            Clock::System => Local::now().date_naive(),
            Clock::Fixed(d) => *d,
        }
    }
}

/// Deterministic "today" for tests and doc examples (2024-06-30).
///
/// # Panics
///
/// Panics if the fixed date cannot be represented.
#[must_use]
pub fn fixed_today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 30).expect("fixed date should be valid")
}

/// Returns a `Clock` pinned to [`fixed_today`].
#[must_use]
pub fn fixed_clock() -> Clock {
    Clock::fixed(fixed_today())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_clock_reads_its_pinned_date() {
        let on = NaiveDate::from_ymd_opt(2024, 7, 2).unwrap();
        assert_eq!(Clock::fixed(on).today(), on);
        assert_eq!(fixed_clock().today(), fixed_today());
    }
}
