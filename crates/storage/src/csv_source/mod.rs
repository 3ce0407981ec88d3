use std::collections::HashMap;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord, Trim};
use progress_core::model::{LessonRecord, ProgressPoint};

use crate::repository::{DataFormatError, DatasetSource};

mod columns;
mod mapping;

pub use columns::{ColumnMap, ColumnPreset, LessonColumns, ProgressColumns};

use mapping::Cell;

/// Dataset source backed by two CSV files on disk.
#[derive(Debug, Clone)]
pub struct CsvSource {
    lessons_path: PathBuf,
    progress_path: PathBuf,
    columns: ColumnMap,
}

impl CsvSource {
    #[must_use]
    pub fn new(
        lessons_path: impl Into<PathBuf>,
        progress_path: impl Into<PathBuf>,
        columns: ColumnMap,
    ) -> Self {
        Self {
            lessons_path: lessons_path.into(),
            progress_path: progress_path.into(),
            columns,
        }
    }
}

fn open(path: &Path) -> Result<File, DataFormatError> {
    File::open(path).map_err(|source| DataFormatError::Io {
        source_name: path.display().to_string(),
        source,
    })
}

impl DatasetSource for CsvSource {
    fn load_lessons(&self) -> Result<Vec<LessonRecord>, DataFormatError> {
        let file = open(&self.lessons_path)?;
        let name = self.lessons_path.display().to_string();
        read_lessons(file, &name, &self.columns.lessons)
    }

    fn load_progress(&self) -> Result<Vec<ProgressPoint>, DataFormatError> {
        let file = open(&self.progress_path)?;
        let name = self.progress_path.display().to_string();
        read_progress(file, &name, &self.columns.progress)
    }
}

//
// ─── HEADERS ──────────────────────────────────────────────────────────────────
//

struct Column<'a> {
    index: usize,
    name: &'a str,
}

impl<'a> Column<'a> {
    fn get<'r>(&self, record: &'r StringRecord) -> &'r str {
        record.get(self.index).unwrap_or("")
    }

    fn cell<'s>(&'s self, source_name: &'s str, line: u64) -> Cell<'s> {
        Cell {
            source_name,
            line,
            column: self.name,
        }
    }
}

struct HeaderIndex<'a> {
    source_name: &'a str,
    positions: HashMap<String, usize>,
}

impl<'a> HeaderIndex<'a> {
    fn new(headers: &StringRecord, source_name: &'a str) -> Self {
        let positions = headers
            .iter()
            .enumerate()
            .map(|(i, h)| (h.trim_start_matches('\u{feff}').trim().to_owned(), i))
            .collect();
        Self {
            source_name,
            positions,
        }
    }

    fn require<'c>(&self, name: &'c str) -> Result<Column<'c>, DataFormatError> {
        self.positions
            .get(name)
            .map(|&index| Column { index, name })
            .ok_or_else(|| DataFormatError::MissingColumn {
                source_name: self.source_name.to_owned(),
                column: name.to_owned(),
            })
    }
}

fn csv_error(source_name: &str) -> impl Fn(csv::Error) -> DataFormatError + '_ {
    move |error| DataFormatError::Csv {
        source_name: source_name.to_owned(),
        error,
    }
}

fn line_of(record: &StringRecord, row: usize) -> u64 {
    // Header is line 1.
    record
        .position()
        .map_or(row as u64 + 2, csv::Position::line)
}

//
// ─── READERS ──────────────────────────────────────────────────────────────────
//

/// Parse the lesson table from any reader.
///
/// # Errors
///
/// Returns `DataFormatError` for missing columns, unparsable cells or
/// malformed CSV.
pub fn read_lessons<R: io::Read>(
    reader: R,
    source_name: &str,
    columns: &LessonColumns,
) -> Result<Vec<LessonRecord>, DataFormatError> {
    let mut rdr = ReaderBuilder::new().trim(Trim::All).from_reader(reader);
    let headers = rdr.headers().map_err(csv_error(source_name))?.clone();
    let index = HeaderIndex::new(&headers, source_name);

    let course = index.require(&columns.course)?;
    let module = index.require(&columns.module)?;
    let lesson = index.require(&columns.lesson)?;
    let subtask = index.require(&columns.subtask)?;
    let status = index.require(&columns.status)?;
    let progress = index.require(&columns.progress)?;
    let start_date = index.require(&columns.start_date)?;
    let end_date = index.require(&columns.end_date)?;
    let teacher = index.require(&columns.teacher)?;
    let responsible = index.require(&columns.responsible)?;
    let task_id = index.require(&columns.task_id)?;

    let mut rows = Vec::new();
    for (i, result) in rdr.records().enumerate() {
        let record = result.map_err(csv_error(source_name))?;
        let line = line_of(&record, i);

        rows.push(LessonRecord {
            course: course.get(&record).to_owned(),
            module: module.get(&record).to_owned(),
            lesson: lesson.get(&record).to_owned(),
            subtask: subtask.get(&record).to_owned(),
            status: status.cell(source_name, line).status(status.get(&record))?,
            progress: progress
                .cell(source_name, line)
                .progress(progress.get(&record))?,
            start_date: start_date
                .cell(source_name, line)
                .optional_date(start_date.get(&record))?,
            end_date: end_date
                .cell(source_name, line)
                .optional_date(end_date.get(&record))?,
            teacher: teacher.get(&record).to_owned(),
            responsible: responsible.get(&record).to_owned(),
            task_id: Cell::task_id(task_id.get(&record)),
        });
    }

    tracing::debug!(source = source_name, rows = rows.len(), "lesson table parsed");
    Ok(rows)
}

/// Parse the progress table from any reader.
///
/// # Errors
///
/// Returns `DataFormatError` for missing columns, unparsable cells or
/// malformed CSV.
pub fn read_progress<R: io::Read>(
    reader: R,
    source_name: &str,
    columns: &ProgressColumns,
) -> Result<Vec<ProgressPoint>, DataFormatError> {
    let mut rdr = ReaderBuilder::new().trim(Trim::All).from_reader(reader);
    let headers = rdr.headers().map_err(csv_error(source_name))?.clone();
    let index = HeaderIndex::new(&headers, source_name);

    let course = index.require(&columns.course)?;
    let module = index.require(&columns.module)?;
    let lesson = index.require(&columns.lesson)?;
    let completion_date = index.require(&columns.completion_date)?;
    let cumulative_count = index.require(&columns.cumulative_count)?;
    let unit_count = index.require(&columns.unit_count)?;

    let mut points = Vec::new();
    for (i, result) in rdr.records().enumerate() {
        let record = result.map_err(csv_error(source_name))?;
        let line = line_of(&record, i);

        points.push(ProgressPoint {
            course: course.get(&record).to_owned(),
            module: module.get(&record).to_owned(),
            lesson: lesson.get(&record).to_owned(),
            completion_date: completion_date
                .cell(source_name, line)
                .required_date(completion_date.get(&record))?,
            cumulative_count: cumulative_count
                .cell(source_name, line)
                .count(cumulative_count.get(&record))?,
            unit_count: unit_count
                .cell(source_name, line)
                .count(unit_count.get(&record))?,
        });
    }

    tracing::debug!(source = source_name, rows = points.len(), "progress table parsed");
    Ok(points)
}
