use std::fs;

use chrono::NaiveDate;
use progress_core::model::{Granularity, LessonRecord, LessonStatus, ProgressPoint, Selection, TaskId};
use progress_core::time::fixed_clock;
use services::charts::Trace;
use services::{AppServices, CoursePageSettings, DashboardError, DashboardSettings, SettingsError};
use storage::{ColumnPreset, InMemorySource};
use tempfile::TempDir;

const LESSONS: &str = "\
curso,Módulo,Aula,Subtarefa,Status,progresso,data inicial,data final,Professor,Responsável,ID
Gestão e Controle de Negócios,Módulo 1,Aula 1,Roteiro,CONCLUÍDA,100,2024-01-02,2024-01-20,Ana,Bia,1
Gestão e Controle de Negócios,Módulo 1,Aula 1,Gravação,CONCLUÍDA,100,2024-01-21,2024-02-10,Ana,Caio,1
Gestão e Controle de Negócios,Módulo 2,Aula 2,Roteiro,EM ANDAMENTO,40,2024-03-01,2024-03-15,Rui,Bia,2
Gestão e Controle de Negócios,Módulo 2,Aula 3,Roteiro,PENDENTE,0,,,Rui,Caio,3
Gestão de Recursos Humanos,Módulo 1,Aula 1,Roteiro,CONCLUÍDA,100,2023-11-01,2023-11-30,Lia,Bia,10
";

const PROGRESS: &str = "\
curso,Módulo,Aula,data final,progresso_acumulado,progresso_100
Gestão de Recursos Humanos,Módulo 1,Aula 1,2023-11-30,1,1
Gestão e Controle de Negócios,Módulo 1,Aula 1,2024-02-10,1,1
";

fn settings_in(dir: &TempDir) -> DashboardSettings {
    let lessons = dir.path().join("df_cursos.csv");
    let progress = dir.path().join("prog_aulas_curso.csv");
    fs::write(&lessons, LESSONS).unwrap();
    fs::write(&progress, PROGRESS).unwrap();

    DashboardSettings {
        lessons_csv: lessons,
        progress_csv: progress,
        columns: ColumnPreset::Portuguese,
        ..DashboardSettings::default()
    }
}

#[test]
fn renders_every_page_from_csv_exports() {
    let dir = TempDir::new().unwrap();
    let services = AppServices::from_settings(&settings_in(&dir), fixed_clock()).unwrap();

    let overview = services.overview();
    assert_eq!(overview.course_options().len(), 2);
    let charts = overview.render(&Selection::all(), Granularity::Week, None);
    assert_eq!(charts.progression.data.len(), 2);
    let json = serde_json::to_value(&charts).unwrap();
    assert_eq!(json["progression"]["layout"]["xaxis"]["range"][0], "2023-11-30");

    let gcn = services.course_page("gcn").unwrap();
    assert_eq!(gcn.module_options(), ["Módulo 1", "Módulo 2"]);
    let page = gcn.render(&Selection::all(), None);

    // Aula 3 has no dates and drops out of the timeline.
    let Trace::Bar(gantt) = &page.gantt.data[0] else {
        panic!("expected gantt bars");
    };
    assert_eq!(gantt.y.len(), 2);
    // The undated task still counts towards mean progress.
    assert_eq!(page.summary.task_count, 3);
    assert!((page.summary.mean_progress - 140.0 / 3.0).abs() < 1e-9);
    assert!((page.summary.min_duration_days - 14.0).abs() < f64::EPSILON);
    assert_eq!(page.status_bars.data.len(), 3);

    let json = serde_json::to_value(&page).unwrap();
    assert_eq!(json["gantt"]["layout"]["xaxis"]["range"][0], "2024-01-02");
    assert_eq!(json["responsible_bars"]["layout"]["height"], 1200);
}

#[test]
fn course_pages_resolve_by_key_or_name() {
    let dir = TempDir::new().unwrap();
    let services = AppServices::from_settings(&settings_in(&dir), fixed_clock()).unwrap();

    assert!(services.course_page("GRH").is_ok());
    assert!(services.course_page("Gestão de Recursos Humanos").is_ok());
    assert!(matches!(
        services.course_page("astronomy"),
        Err(DashboardError::UnknownCoursePage(name)) if name == "astronomy"
    ));
}

#[test]
fn wrong_column_preset_is_a_data_error() {
    let dir = TempDir::new().unwrap();
    let settings = DashboardSettings {
        columns: ColumnPreset::English,
        ..settings_in(&dir)
    };
    let err = AppServices::from_settings(&settings, fixed_clock()).err().unwrap();
    assert!(matches!(err, DashboardError::Data(_)));
    assert!(err.to_string().contains("course"));
}

#[test]
fn repeated_renders_reuse_the_digest() {
    let dir = TempDir::new().unwrap();
    let services = AppServices::from_settings(&settings_in(&dir), fixed_clock()).unwrap();
    let page = services.course_page("gcn").unwrap();

    let modules: Selection = ["Módulo 2"].into_iter().collect();
    let first = page.render(&modules, None);
    let second = page.render(&modules, None);
    assert_eq!(first.gantt, second.gantt);
    assert_eq!(page.cache().stats().hits, 1);
}

fn in_memory_tables() -> InMemorySource {
    let day = |d| NaiveDate::from_ymd_opt(2024, 4, d).unwrap();
    let lesson = LessonRecord {
        course: "Química".into(),
        module: "Módulo 1".into(),
        lesson: "Aula 1".into(),
        subtask: "Roteiro".into(),
        status: LessonStatus::Done,
        progress: 100,
        start_date: Some(day(1)),
        end_date: Some(day(8)),
        teacher: "Ana".into(),
        responsible: "Bia".into(),
        task_id: Some(TaskId::new("Q1")),
    };
    let point = ProgressPoint {
        course: "Química".into(),
        module: "Módulo 1".into(),
        lesson: "Aula 1".into(),
        completion_date: day(8),
        cumulative_count: 1,
        unit_count: 1,
    };
    InMemorySource::new(vec![lesson], vec![point])
}

#[test]
fn builds_pages_over_an_in_memory_source() {
    let settings = DashboardSettings {
        courses: vec![CoursePageSettings::new("qui", "Química")],
        ..DashboardSettings::default()
    };
    let services = AppServices::from_source(&in_memory_tables(), &settings, fixed_clock()).unwrap();

    assert_eq!(services.datasets().lessons.len(), 1);
    assert_eq!(services.overview().course_options(), ["Química"]);
    let page = services.course_page("qui").unwrap().render(&Selection::all(), None);
    assert_eq!(page.summary.task_count, 1);
    assert!((page.summary.min_duration_days - 7.0).abs() < f64::EPSILON);
}

#[test]
fn invalid_settings_fail_before_loading() {
    let settings = DashboardSettings {
        courses: vec![
            CoursePageSettings::new("qui", "Química"),
            CoursePageSettings::new("qui", "Química II"),
        ],
        ..DashboardSettings::default()
    };
    let err = AppServices::from_source(&in_memory_tables(), &settings, fixed_clock())
        .err()
        .unwrap();
    assert!(matches!(
        err,
        DashboardError::Settings(SettingsError::DuplicateCoursePage(key)) if key == "qui"
    ));
}
