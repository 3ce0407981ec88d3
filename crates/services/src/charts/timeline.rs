use chrono::NaiveDate;
use indexmap::IndexMap;

use progress_core::aggregate::{BucketCount, GanttInterval, ProgressSeries};
use progress_core::model::{Palette, ProgressPoint, ProgressState};

use super::axis::Axis;
use super::figure::{
    BarTrace, Datum, Figure, Layout, Legend, Line, Marker, Orientation, ScatterMode,
    ScatterTrace, Trace,
};

const MS_PER_DAY: i64 = 86_400_000;

type Range = Option<(NaiveDate, NaiveDate)>;

fn course_layout(title: &str, range: Range) -> Layout {
    let mut layout = Layout::titled(title);
    layout.showlegend = true;
    layout.legend = Some(Legend::top("Courses"));
    layout.xaxis = Axis::time(range);
    layout.yaxis = Axis::titled("Completed lessons").without_grid();
    layout
}

fn course_line(name: &str, mode: ScatterMode, palette: &Palette) -> ScatterTrace {
    let color = palette.course_color(name).to_owned();
    ScatterTrace {
        name: name.to_owned(),
        mode,
        x: Vec::new(),
        y: Vec::new(),
        line: Line {
            color: color.clone(),
        },
        marker: Marker::solid(color),
        customdata: Vec::new(),
        hovertemplate: None,
    }
}

/// Cumulative completed lessons, one line per course.
#[must_use]
pub fn progression_chart(points: &[ProgressPoint], palette: &Palette, range: Range) -> Figure {
    let mut lines: IndexMap<&str, ScatterTrace> = IndexMap::new();
    for p in points {
        let trace = lines
            .entry(p.course.as_str())
            .or_insert_with(|| course_line(&p.course, ScatterMode::LinesMarkers, palette));
        trace.x.push(p.completion_date.into());
        trace.y.push(p.cumulative_count.into());
        trace.customdata.push(vec![p.module.clone(), p.lesson.clone()]);
    }

    let mut figure = Figure::new(course_layout("Lesson production", range));
    figure.layout.height = Some(600);
    for (_, mut trace) in lines {
        trace.hovertemplate = Some(
            "Module %{customdata[0]}<br>Lesson: %{customdata[1]}<br>Completed on %{x}<extra></extra>"
                .into(),
        );
        figure.data.push(Trace::Scatter(trace));
    }
    figure
}

/// Lessons completed per bucket, one line per course.
#[must_use]
pub fn production_chart(buckets: &[BucketCount], palette: &Palette, range: Range) -> Figure {
    let mut lines: IndexMap<&str, ScatterTrace> = IndexMap::new();
    for b in buckets {
        let trace = lines
            .entry(b.course.as_str())
            .or_insert_with(|| course_line(&b.course, ScatterMode::Lines, palette));
        trace.x.push(b.bucket.into());
        trace.y.push(b.completions.into());
    }

    let mut figure = Figure::new(course_layout("Completed lessons per period", range));
    for (_, mut trace) in lines {
        trace.hovertemplate =
            Some("Date: %{x}<br>Completed lesson(s) %{y}<extra></extra>".into());
        figure.data.push(Trace::Scatter(trace));
    }
    figure
}

/// Lesson timeline: one horizontal bar per task from its start to its end,
/// shaded by completion.
#[must_use]
pub fn gantt_chart(intervals: &[GanttInterval], palette: &Palette, range: Range) -> Figure {
    let mut layout = Layout::titled("Timeline: lesson production");
    layout.xaxis = Axis::time(range);
    layout.yaxis = Axis::titled("Lessons").reversed();

    let mut bars = BarTrace {
        name: String::new(),
        orientation: Orientation::Horizontal,
        x: Vec::with_capacity(intervals.len()),
        y: Vec::with_capacity(intervals.len()),
        base: Some(Vec::with_capacity(intervals.len())),
        marker: Marker::scaled(
            intervals
                .iter()
                .map(|i| f64::from(i.percent_complete))
                .collect(),
            palette.progress_color(ProgressState::InProgress),
            palette.progress_color(ProgressState::Complete),
            0.0,
            100.0,
        )
        .without_outline(),
        customdata: Vec::with_capacity(intervals.len()),
        hovertemplate: Some(
            "<b>Lesson %{customdata[1]}</b><br>\
             Module %{customdata[0]}<br>\
             Start: %{base}<br>\
             End: %{x}<br>\
             Subtasks: %{customdata[3]}<br>\
             Responsible: %{customdata[2]}<extra></extra>"
                .into(),
        ),
        texttemplate: None,
    };

    for interval in intervals {
        // Date-axis bars are sized in milliseconds from their base.
        bars.x.push(Datum::Int(interval.duration_days() * MS_PER_DAY));
        bars.y.push(interval.task_id.as_str().into());
        if let Some(base) = bars.base.as_mut() {
            base.push(interval.start.into());
        }
        bars.customdata.push(vec![
            interval.module.clone(),
            interval.lesson.clone(),
            interval.responsible.join(", "),
            interval.subtasks.to_string(),
        ]);
    }

    Figure::new(layout).with_trace(Trace::Bar(bars))
}

/// Progress history per task, colored by whether the task finished.
#[must_use]
pub fn progress_lines_chart(series: &[ProgressSeries], palette: &Palette, range: Range) -> Figure {
    let mut layout = Layout::titled("Lesson progress");
    layout.xaxis = Axis::time(range).without_grid();
    layout.yaxis = Axis::titled("Progress (%)").with_range(0.0, 100.0);

    let traces = series.iter().map(|s| {
        let color = palette.progress_color(s.state()).to_owned();
        Trace::Scatter(ScatterTrace {
            name: s.task_id.to_string(),
            mode: ScatterMode::LinesMarkers,
            x: s.points.iter().map(|p| p.date.into()).collect(),
            y: s.points.iter().map(|p| p.progress.into()).collect(),
            line: Line {
                color: color.clone(),
            },
            marker: Marker::solid(color),
            customdata: s
                .points
                .iter()
                .map(|p| vec![p.lesson.clone(), p.module.clone()])
                .collect(),
            hovertemplate: Some(
                "<b>Date</b> %{x}<br>\
                 <b>Progress</b> %{y:.0f}%<br>\
                 <b>Lesson</b> %{customdata[0]}<br>\
                 <b>Module</b> %{customdata[1]}<extra></extra>"
                    .into(),
            ),
        })
    });

    let mut figure = Figure::new(layout);
    figure.data.extend(traces);
    figure
}
