use std::fs;
use std::path::PathBuf;

use chrono::NaiveDate;
use progress_core::model::{LessonStatus, TaskId};
use storage::csv_source::{read_lessons, read_progress};
use storage::{ColumnMap, ColumnPreset, CsvSource, DataFormatError, DatasetSource, Datasets};
use tempfile::TempDir;

const LESSONS_EN: &str = "\
course,module,lesson,subtask,status,progress,start_date,end_date,teacher,responsible,task_id
GCN,M1,Aula 1,Roteiro,DONE,100,2024-01-02,2024-01-10,Ana,Bia,T1
GCN,M1,Aula 1,Gravação,IN_PROGRESS,40,2024-01-11,,Ana,Caio,T1
GCN,M2,Aula 2,Roteiro,PENDING,0,,,Davi,Bia,T2
";

const PROGRESS_EN: &str = "\
course,module,lesson,completion_date,cumulative_count,unit_count
GCN,M1,Aula 1,2024-01-10,1,1
GRH,M1,Aula 1,2024-01-12T09:30:00,1,1
";

const LESSONS_PT: &str = "\u{feff}curso,Módulo,Aula,Subtarefa,Status,progresso,data inicial,data final,Professor,Responsável,ID
GRH,Módulo 1,Aula 1,Edição,CONCLUÍDA,100.0,2024-02-01,2024-02-20,Rui,Bia,7
GRH,Módulo 1,Aula 2,Edição,EM ANDAMENTO,50.0,2024-02-05,NaT,Rui,Caio,8
";

const PROGRESS_PT: &str = "\
curso,Módulo,Aula,data final,progresso_acumulado,progresso_100
GRH,Módulo 1,Aula 1,2024-02-20,1,1
";

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn write_pair(dir: &TempDir, lessons: &str, progress: &str) -> (PathBuf, PathBuf) {
    let lessons_path = dir.path().join("lessons.csv");
    let progress_path = dir.path().join("progress.csv");
    fs::write(&lessons_path, lessons).unwrap();
    fs::write(&progress_path, progress).unwrap();
    (lessons_path, progress_path)
}

#[test]
fn loads_english_tables_from_disk() {
    let dir = TempDir::new().unwrap();
    let (lessons, progress) = write_pair(&dir, LESSONS_EN, PROGRESS_EN);
    let source = CsvSource::new(lessons, progress, ColumnMap::english());

    let data = Datasets::load(&source).unwrap();
    assert_eq!(data.lessons.len(), 3);
    assert_eq!(data.progress.len(), 2);

    let second = &data.lessons[1];
    assert_eq!(second.status, LessonStatus::InProgress);
    assert_eq!(second.progress, 40);
    assert_eq!(second.start_date, Some(date(2024, 1, 11)));
    assert_eq!(second.end_date, None);
    assert_eq!(second.task_id.as_ref().map(TaskId::as_str), Some("T1"));

    assert_eq!(data.progress[1].completion_date, date(2024, 1, 12));
}

#[test]
fn blank_task_id_keeps_the_row() {
    let csv = "\
course,module,lesson,subtask,status,progress,start_date,end_date,teacher,responsible,task_id
GCN,M1,Aula 1,Roteiro,DONE,100,2024-01-02,2024-01-10,Ana,Bia,
GCN,M1,Aula 2,Roteiro,PENDING,0,,,Ana,Bia,T2
";
    let rows = read_lessons(csv.as_bytes(), "lessons.csv", &ColumnMap::english().lessons).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].task_id, None);
    assert_eq!(rows[1].task_id, Some(TaskId::new("T2")));
}

#[test]
fn loads_portuguese_headers_with_bom() {
    let dir = TempDir::new().unwrap();
    let (lessons, progress) = write_pair(&dir, LESSONS_PT, PROGRESS_PT);
    let source = CsvSource::new(lessons, progress, ColumnPreset::Portuguese.into());

    let rows = source.load_lessons().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].status, LessonStatus::Done);
    assert_eq!(rows[0].progress, 100);
    assert_eq!(rows[0].module, "Módulo 1");
    assert_eq!(rows[1].end_date, None);

    let points = source.load_progress().unwrap();
    assert_eq!(points[0].unit_count, 1);
}

#[test]
fn missing_column_is_named() {
    let csv = "course,module,lesson\nGCN,M1,L1\n";
    let err = read_lessons(csv.as_bytes(), "lessons.csv", &ColumnMap::english().lessons)
        .unwrap_err();
    match err {
        DataFormatError::MissingColumn { column, .. } => assert_eq!(column, "subtask"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn bad_date_reports_line_and_column() {
    let csv = "\
course,module,lesson,completion_date,cumulative_count,unit_count
GCN,M1,L1,2024-01-10,1,1
GCN,M1,L2,10/01/2024,2,1
";
    let err = read_progress(csv.as_bytes(), "progress.csv", &ColumnMap::english().progress)
        .unwrap_err();
    match err {
        DataFormatError::InvalidDate {
            line,
            column,
            value,
            ..
        } => {
            assert_eq!(line, 3);
            assert_eq!(column, "completion_date");
            assert_eq!(value, "10/01/2024");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn unknown_status_is_rejected() {
    let csv = LESSONS_EN.replace("PENDING", "PAUSED");
    let err = read_lessons(csv.as_bytes(), "lessons.csv", &ColumnMap::english().lessons)
        .unwrap_err();
    assert!(matches!(err, DataFormatError::InvalidStatus { line: 4, .. }));
    assert!(err.to_string().contains("PAUSED"));
}

#[test]
fn ragged_rows_are_malformed_csv() {
    let csv = "course,module,lesson,completion_date,cumulative_count,unit_count\nGCN,M1\n";
    let err = read_progress(csv.as_bytes(), "progress.csv", &ColumnMap::english().progress)
        .unwrap_err();
    assert!(matches!(err, DataFormatError::Csv { .. }));
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = TempDir::new().unwrap();
    let source = CsvSource::new(
        dir.path().join("nope.csv"),
        dir.path().join("nope2.csv"),
        ColumnMap::default(),
    );
    match Datasets::load(&source) {
        Err(DataFormatError::Io { source_name, source }) => {
            assert!(source_name.ends_with("nope.csv"));
            assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
        }
        other => panic!("expected io error, got {other:?}"),
    }
}

#[test]
fn header_only_tables_are_empty_not_errors() {
    let header = LESSONS_EN.lines().next().unwrap();
    let rows = read_lessons(header.as_bytes(), "lessons.csv", &ColumnMap::english().lessons)
        .unwrap();
    assert!(rows.is_empty());
}
