use thiserror::Error;

/// An unsupported bucketing label reached the aggregation engine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid granularity {value:?}; expected one of: day, week, month")]
pub struct InvalidGranularityError {
    value: String,
}

impl InvalidGranularityError {
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    /// The rejected label, as given by the caller.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// A date window that is malformed or ends before it starts.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid date window {value:?}; expected YYYY-MM-DD..YYYY-MM-DD with from <= to")]
pub struct InvalidDateWindowError {
    value: String,
}

impl InvalidDateWindowError {
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }
}
