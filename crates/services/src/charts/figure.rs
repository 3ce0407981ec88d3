//! Plotly-compatible figure model.
//!
//! Only the attributes the dashboard sets are modeled. Optional attributes
//! are omitted from the JSON when unset so plotly applies its defaults.

use chrono::NaiveDate;
use serde::{Serialize, Serializer};

use super::axis::Axis;

const TRANSPARENT: &str = "rgba(0, 0, 0, 0)";
const FONT_COLOR: &str = "#D3D3D3";

/// A single value on an axis or in a trace.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Datum {
    Date(NaiveDate),
    Int(i64),
    Float(f64),
    Text(String),
}

impl From<NaiveDate> for Datum {
    fn from(d: NaiveDate) -> Self {
        Self::Date(d)
    }
}

impl From<u32> for Datum {
    fn from(v: u32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<u8> for Datum {
    fn from(v: u8) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<i64> for Datum {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for Datum {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for Datum {
    fn from(v: &str) -> Self {
        Self::Text(v.to_owned())
    }
}

impl From<String> for Datum {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

/// Marker or line color: one for the whole trace, one per point, or a value
/// per point mapped through the marker's color scale.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Paint {
    Solid(String),
    PerPoint(Vec<String>),
    Scaled(Vec<f64>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub color: Paint,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colorscale: Option<Vec<(f64, String)>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cmin: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cmax: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub showscale: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<MarkerLine>,
}

impl Marker {
    #[must_use]
    pub fn solid(color: impl Into<String>) -> Self {
        Self {
            color: Paint::Solid(color.into()),
            colorscale: None,
            cmin: None,
            cmax: None,
            showscale: None,
            line: None,
        }
    }

    /// Two-color scale over `[min, max]`, with the scale bar hidden.
    #[must_use]
    pub fn scaled(values: Vec<f64>, low: &str, high: &str, min: f64, max: f64) -> Self {
        Self {
            color: Paint::Scaled(values),
            colorscale: Some(vec![(0.0, low.to_owned()), (1.0, high.to_owned())]),
            cmin: Some(min),
            cmax: Some(max),
            showscale: Some(false),
            line: None,
        }
    }

    #[must_use]
    pub fn without_outline(mut self) -> Self {
        self.line = Some(MarkerLine { width: 0.0 });
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerLine {
    pub width: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Line {
    pub color: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScatterMode {
    Lines,
    LinesMarkers,
}

impl Serialize for ScatterMode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(match self {
            Self::Lines => "lines",
            Self::LinesMarkers => "lines+markers",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Orientation {
    #[serde(rename = "v")]
    Vertical,
    #[serde(rename = "h")]
    Horizontal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterTrace {
    pub name: String,
    pub mode: ScatterMode,
    pub x: Vec<Datum>,
    pub y: Vec<Datum>,
    pub line: Line,
    pub marker: Marker,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub customdata: Vec<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hovertemplate: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarTrace {
    pub name: String,
    pub orientation: Orientation,
    pub x: Vec<Datum>,
    pub y: Vec<Datum>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base: Option<Vec<Datum>>,
    pub marker: Marker,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub customdata: Vec<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hovertemplate: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub texttemplate: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GaugeAxis {
    /// `NaN` bounds serialize as `null`, which plotly treats as auto.
    pub range: [f64; 2],
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Gauge {
    pub axis: GaugeAxis,
    pub bar: Line,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorTrace {
    pub mode: &'static str,
    /// `NaN` serializes as `null`: the gauge shows no value.
    pub value: f64,
    pub gauge: Gauge,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Trace {
    Scatter(ScatterTrace),
    Bar(BarTrace),
    Indicator(IndicatorTrace),
}

impl Trace {
    /// Number of plotted points. Gauges count as one.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Scatter(t) => t.x.len(),
            Self::Bar(t) => t.x.len(),
            Self::Indicator(_) => 1,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Title {
    pub text: String,
    pub x: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Font {
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Legend {
    pub orientation: Orientation,
    pub title: LegendTitle,
    pub yanchor: &'static str,
    pub y: f64,
    pub xanchor: &'static str,
    pub x: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendTitle {
    pub text: String,
}

impl Legend {
    /// Horizontal legend above the plot, right-aligned.
    #[must_use]
    pub fn top(title: impl Into<String>) -> Self {
        Self {
            orientation: Orientation::Horizontal,
            title: LegendTitle { text: title.into() },
            yanchor: "bottom",
            y: 1.0,
            xanchor: "right",
            x: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    pub title: Title,
    pub showlegend: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legend: Option<Legend>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub barmode: Option<&'static str>,
    pub xaxis: Axis,
    pub yaxis: Axis,
    pub plot_bgcolor: &'static str,
    pub paper_bgcolor: &'static str,
    pub font: Font,
}

impl Layout {
    /// Transparent background, centered title, no legend.
    #[must_use]
    pub fn titled(text: impl Into<String>) -> Self {
        Self {
            title: Title {
                text: text.into(),
                x: 0.5,
            },
            showlegend: false,
            legend: None,
            height: None,
            barmode: None,
            xaxis: Axis::default(),
            yaxis: Axis::default(),
            plot_bgcolor: TRANSPARENT,
            paper_bgcolor: TRANSPARENT,
            font: Font { color: FONT_COLOR },
        }
    }
}

/// A complete chart, serializable straight into `Plotly.newPlot`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Figure {
    pub data: Vec<Trace>,
    pub layout: Layout,
}

impl Figure {
    #[must_use]
    pub fn new(layout: Layout) -> Self {
        Self {
            data: Vec::new(),
            layout,
        }
    }

    #[must_use]
    pub fn with_trace(mut self, trace: Trace) -> Self {
        self.data.push(trace);
        self
    }

    /// Whether no trace has any point.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.iter().all(Trace::is_empty)
    }

    /// # Errors
    ///
    /// Returns `serde_json::Error` if serialization fails.
    pub fn to_json(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}
