use chrono::NaiveDate;
use serde::{Serialize, Serializer};

use progress_core::model::DateWindow;

use super::figure::Datum;

const ACTIVE_BUTTON_COLOR: &str = "#007eff";
const GRID_COLOR: &str = "rgba(255, 255, 255, 0.04)";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AutoRange {
    #[default]
    On,
    Off,
    Reversed,
}

impl Serialize for AutoRange {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::On => serializer.serialize_bool(true),
            Self::Off => serializer.serialize_bool(false),
            Self::Reversed => serializer.serialize_str("reversed"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisTitle {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RangeButton {
    pub count: u32,
    pub label: &'static str,
    pub step: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stepmode: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RangeSelector {
    pub buttons: Vec<RangeButton>,
    pub bgcolor: &'static str,
    pub activecolor: &'static str,
}

impl Default for RangeSelector {
    /// Month, semester, year and everything.
    fn default() -> Self {
        let todate = |count, label, step| RangeButton {
            count,
            label,
            step,
            stepmode: Some("todate"),
        };
        Self {
            buttons: vec![
                todate(1, "month", "month"),
                todate(6, "semester", "month"),
                todate(1, "year", "year"),
                RangeButton {
                    count: 1,
                    label: "all",
                    step: "all",
                    stepmode: None,
                },
            ],
            bgcolor: "rgba(0, 0, 0, 0)",
            activecolor: ACTIVE_BUTTON_COLOR,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RangeSlider {
    pub visible: bool,
    pub thickness: f64,
}

impl Default for RangeSlider {
    fn default() -> Self {
        Self {
            visible: true,
            thickness: 0.07,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Axis {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<AxisTitle>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<&'static str>,
    pub autorange: AutoRange,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<[Datum; 2]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rangeselector: Option<RangeSelector>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rangeslider: Option<RangeSlider>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categoryorder: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categoryarray: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub showgrid: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gridcolor: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub showticklabels: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zeroline: Option<bool>,
}

impl Axis {
    #[must_use]
    pub fn titled(text: impl Into<String>) -> Self {
        Self {
            title: Some(AxisTitle { text: text.into() }),
            ..Self::default()
        }
    }

    /// Date axis carrying the shared range selector and slider. `range`
    /// pins the visible interval; `None` leaves it automatic.
    #[must_use]
    pub fn time(range: Option<(NaiveDate, NaiveDate)>) -> Self {
        let (autorange, range) = match range {
            Some((from, to)) => (AutoRange::Off, Some([from.into(), to.into()])),
            None => (AutoRange::On, None),
        };
        Self {
            title: Some(AxisTitle {
                text: "Range selector".into(),
            }),
            kind: Some("date"),
            autorange,
            range,
            rangeselector: Some(RangeSelector::default()),
            rangeslider: Some(RangeSlider::default()),
            gridcolor: Some(GRID_COLOR),
            ..Self::default()
        }
    }

    /// Fixed numeric range.
    #[must_use]
    pub fn with_range(mut self, from: f64, to: f64) -> Self {
        self.autorange = AutoRange::Off;
        self.range = Some([from.into(), to.into()]);
        self
    }

    #[must_use]
    pub fn reversed(mut self) -> Self {
        self.autorange = AutoRange::Reversed;
        self
    }

    /// Counts are read from bar labels, so the value axis is hidden.
    #[must_use]
    pub fn bare() -> Self {
        Self {
            showticklabels: Some(false),
            showgrid: Some(false),
            zeroline: Some(false),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn ordered(mut self, categories: Vec<String>) -> Self {
        self.categoryorder = Some("array");
        self.categoryarray = Some(categories);
        self
    }

    #[must_use]
    pub fn without_grid(mut self) -> Self {
        self.showgrid = Some(false);
        self.gridcolor = None;
        self
    }
}

/// Visible interval of a time axis.
///
/// An explicit window wins. Otherwise the axis runs from `earliest` to
/// `today`; no data means no pinned range.
#[must_use]
pub fn time_range(
    earliest: Option<NaiveDate>,
    today: NaiveDate,
    window: Option<DateWindow>,
) -> Option<(NaiveDate, NaiveDate)> {
    if let Some(w) = window {
        return Some((w.from(), w.to()));
    }
    earliest.map(|from| (from, today.max(from)))
}
