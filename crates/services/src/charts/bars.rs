use indexmap::IndexMap;

use progress_core::aggregate::Tally;
use progress_core::model::{LessonField, LessonStatus, Palette};

use super::axis::Axis;
use super::figure::{BarTrace, Datum, Figure, Layout, Marker, Orientation, Trace};

/// One trace per status, in first-occurrence order, so each status keeps its
/// own color and legend entry.
fn status_traces(
    tally: &Tally,
    category: Option<LessonField>,
    hover_field: Option<LessonField>,
    orientation: Orientation,
    palette: &Palette,
) -> Vec<BarTrace> {
    let category_at = category.and_then(|f| tally.key_index(f));
    let hover_at = hover_field.and_then(|f| tally.key_index(f));

    let mut traces: IndexMap<LessonStatus, BarTrace> = IndexMap::new();
    for row in tally.rows() {
        let trace = traces.entry(row.status).or_insert_with(|| BarTrace {
            name: row.status.to_string(),
            orientation,
            x: Vec::new(),
            y: Vec::new(),
            base: None,
            marker: Marker::solid(palette.status_color(row.status)).without_outline(),
            customdata: Vec::new(),
            hovertemplate: None,
            texttemplate: None,
        });

        let label: Datum = match category_at.and_then(|i| row.key.get(i)) {
            Some(value) => value.as_str().into(),
            None => row.status.as_str().into(),
        };
        let count: Datum = row.count.into();
        match orientation {
            Orientation::Vertical => {
                trace.x.push(label);
                trace.y.push(count);
            }
            Orientation::Horizontal => {
                trace.y.push(label);
                trace.x.push(count);
            }
        }
        if let Some(value) = hover_at.and_then(|i| row.key.get(i)) {
            trace.customdata.push(vec![value.clone()]);
        }
    }
    traces.into_values().collect()
}

fn stacked_layout(title: &str) -> Layout {
    let mut layout = Layout::titled(title);
    layout.barmode = Some("stack");
    layout.xaxis = Axis::bare();
    layout
}

/// Lessons per status. Expects a tally with no group keys.
#[must_use]
pub fn status_bars(tally: &Tally, palette: &Palette) -> Figure {
    let mut layout = Layout::titled("Lessons by status");
    layout.yaxis = Axis::bare();

    let mut figure = Figure::new(layout);
    for mut trace in status_traces(tally, None, None, Orientation::Vertical, palette) {
        trace.texttemplate = Some("%{y}".into());
        trace.hovertemplate = Some("%{x}: %{y} lessons<extra></extra>".into());
        figure.data.push(Trace::Bar(trace));
    }
    figure
}

/// Lessons per teacher, stacked by status. Expects `Teacher` and `Module`
/// among the tally's group keys.
#[must_use]
pub fn teacher_bars(tally: &Tally, palette: &Palette) -> Figure {
    let mut figure = Figure::new(stacked_layout("Lessons by teacher"));
    let traces = status_traces(
        tally,
        Some(LessonField::Teacher),
        Some(LessonField::Module),
        Orientation::Horizontal,
        palette,
    );
    for mut trace in traces {
        trace.texttemplate = Some("%{x}".into());
        trace.hovertemplate = Some(
            "<b>Teacher %{y}</b><br>Module %{customdata[0]}<br>%{x} lessons<extra></extra>".into(),
        );
        figure.data.push(Trace::Bar(trace));
    }
    figure
}

/// Subtasks per responsible, stacked by status, least loaded at the bottom.
#[must_use]
pub fn responsible_bars(tally: &Tally, order: Vec<String>, palette: &Palette) -> Figure {
    let mut layout = stacked_layout("Subtasks by responsible");
    layout.height = Some(1200);
    layout.yaxis = Axis::default().ordered(order);

    let mut figure = Figure::new(layout);
    let traces = status_traces(
        tally,
        Some(LessonField::Responsible),
        Some(LessonField::Module),
        Orientation::Horizontal,
        palette,
    );
    for mut trace in traces {
        trace.texttemplate = Some("%{x}".into());
        trace.hovertemplate =
            Some("<b>%{y}</b><br>Module %{customdata[0]}<br>Subtasks: %{x}<extra></extra>".into());
        figure.data.push(Trace::Bar(trace));
    }
    figure
}
