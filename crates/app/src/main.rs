use std::fmt;
use std::io::Write;
use std::path::PathBuf;

use chrono::NaiveDate;
use progress_core::model::{DateWindow, Granularity, Selection};
use services::{AppServices, Clock, DashboardSettings};
use storage::ColumnPreset;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    MissingPage,
    MissingCourse,
    UnknownArg(String),
    UnknownPage(String),
    InvalidGranularity { raw: String },
    InvalidWindow { raw: String },
    InvalidDate { raw: String },
    InvalidColumns { raw: String },
    NotForPage { flag: &'static str },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::MissingPage => write!(f, "render requires a page: overview or course"),
            ArgsError::MissingCourse => write!(f, "render course requires a course name"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::UnknownPage(page) => write!(f, "unknown page: {page}"),
            ArgsError::InvalidGranularity { raw } => {
                write!(f, "invalid --granularity value: {raw}")
            }
            ArgsError::InvalidWindow { raw } => write!(f, "invalid --window value: {raw}"),
            ArgsError::InvalidDate { raw } => write!(f, "invalid --today value: {raw}"),
            ArgsError::InvalidColumns { raw } => write!(f, "invalid --columns value: {raw}"),
            ArgsError::NotForPage { flag } => {
                write!(f, "{flag} only applies to the overview page")
            }
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- render overview [--select <course>]... [--granularity day|week|month]");
    eprintln!("  cargo run -p app -- render course <key|name> [--select <module>]...");
    eprintln!("  cargo run -p app -- check");
    eprintln!();
    eprintln!("Common options:");
    eprintln!("  --config <path>        TOML settings file");
    eprintln!("  --lessons <path>       lesson table CSV");
    eprintln!("  --progress <path>      progress table CSV");
    eprintln!("  --columns english|portuguese");
    eprintln!("  --window <from>..<to>  pin time axes, dates as YYYY-MM-DD");
    eprintln!("  --today <YYYY-MM-DD>   fix the date used as the end of time axes");
    eprintln!("  --pretty               indent JSON output");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  DASH_CONFIG, DASH_LESSONS_CSV, DASH_PROGRESS_CSV, RUST_LOG");
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Page {
    Overview,
    Course(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Render(Page),
    Check,
}

#[derive(Debug)]
struct Args {
    command: Command,
    config: Option<PathBuf>,
    lessons: Option<PathBuf>,
    progress: Option<PathBuf>,
    columns: Option<ColumnPreset>,
    selection: Vec<String>,
    granularity: Option<Granularity>,
    window: Option<DateWindow>,
    today: Option<NaiveDate>,
    pretty: bool,
}

impl Args {
    fn parse(mut args: impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let command = match args.next().as_deref() {
            Some("check") => Command::Check,
            Some("render") => match args.next().as_deref() {
                Some("overview") => Command::Render(Page::Overview),
                Some("course") => {
                    let name = args.next().ok_or(ArgsError::MissingCourse)?;
                    Command::Render(Page::Course(name))
                }
                Some(other) => return Err(ArgsError::UnknownPage(other.to_owned())),
                None => return Err(ArgsError::MissingPage),
            },
            Some(other) => return Err(ArgsError::UnknownArg(other.to_owned())),
            None => return Err(ArgsError::MissingPage),
        };

        let mut parsed = Self {
            command,
            config: std::env::var_os("DASH_CONFIG").map(PathBuf::from),
            lessons: std::env::var_os("DASH_LESSONS_CSV").map(PathBuf::from),
            progress: std::env::var_os("DASH_PROGRESS_CSV").map(PathBuf::from),
            columns: None,
            selection: Vec::new(),
            granularity: None,
            window: None,
            today: None,
            pretty: false,
        };

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" => parsed.config = Some(require_value(&mut args, "--config")?.into()),
                "--lessons" => parsed.lessons = Some(require_value(&mut args, "--lessons")?.into()),
                "--progress" => {
                    parsed.progress = Some(require_value(&mut args, "--progress")?.into());
                }
                "--columns" => {
                    let value = require_value(&mut args, "--columns")?;
                    parsed.columns = Some(match value.as_str() {
                        "english" => ColumnPreset::English,
                        "portuguese" => ColumnPreset::Portuguese,
                        _ => return Err(ArgsError::InvalidColumns { raw: value }),
                    });
                }
                "--select" => parsed.selection.push(require_value(&mut args, "--select")?),
                "--granularity" => {
                    let value = require_value(&mut args, "--granularity")?;
                    let granularity = value
                        .parse()
                        .map_err(|_| ArgsError::InvalidGranularity { raw: value.clone() })?;
                    parsed.granularity = Some(granularity);
                }
                "--window" => {
                    let value = require_value(&mut args, "--window")?;
                    let window = value
                        .parse()
                        .map_err(|_| ArgsError::InvalidWindow { raw: value.clone() })?;
                    parsed.window = Some(window);
                }
                "--today" => {
                    let value = require_value(&mut args, "--today")?;
                    let today = NaiveDate::parse_from_str(&value, "%Y-%m-%d")
                        .map_err(|_| ArgsError::InvalidDate { raw: value.clone() })?;
                    parsed.today = Some(today);
                }
                "--pretty" => parsed.pretty = true,
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        if parsed.granularity.is_some() && parsed.command != Command::Render(Page::Overview) {
            return Err(ArgsError::NotForPage {
                flag: "--granularity",
            });
        }
        Ok(parsed)
    }

    fn settings(&self) -> Result<DashboardSettings, Box<dyn std::error::Error>> {
        let mut settings = match &self.config {
            Some(path) => DashboardSettings::from_file(path)?,
            None => DashboardSettings::default(),
        };
        if let Some(path) = &self.lessons {
            settings.lessons_csv.clone_from(path);
        }
        if let Some(path) = &self.progress {
            settings.progress_csv.clone_from(path);
        }
        if let Some(columns) = self.columns {
            settings.columns = columns;
        }
        Ok(settings)
    }

    fn clock(&self) -> Clock {
        self.today.map_or_else(Clock::system, Clock::fixed)
    }
}

fn init_tracing() {
    // Logs go to stderr so stdout stays pure JSON.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn write_json(value: &impl serde::Serialize, pretty: bool) -> Result<(), Box<dyn std::error::Error>> {
    let mut out = std::io::stdout().lock();
    if pretty {
        serde_json::to_writer_pretty(&mut out, value)?;
    } else {
        serde_json::to_writer(&mut out, value)?;
    }
    writeln!(out)?;
    Ok(())
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let argv: Vec<String> = std::env::args().skip(1).collect();
    if argv.is_empty() || matches!(argv[0].as_str(), "--help" | "-h") {
        print_usage();
        return Ok(());
    }

    let args = Args::parse(argv.into_iter()).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    init_tracing();
    let settings = args.settings()?;
    tracing::info!(
        lessons = %settings.lessons_csv.display(),
        progress = %settings.progress_csv.display(),
        "loading datasets"
    );
    // Any data format error is fatal here.
    let services = AppServices::from_settings(&settings, args.clock())?;
    let selection: Selection = args.selection.iter().map(String::as_str).collect();

    match &args.command {
        Command::Check => {
            let data = services.datasets();
            println!("lessons: {} rows", data.lessons.len());
            println!("progress: {} rows", data.progress.len());
            for page in services.course_pages() {
                println!(
                    "course page {}: {} modules",
                    page.page().key,
                    page.module_options().len()
                );
            }
            Ok(())
        }
        Command::Render(Page::Overview) => {
            let granularity = args.granularity.unwrap_or_default();
            let charts = services.overview().render(&selection, granularity, args.window);
            write_json(&charts, args.pretty)
        }
        Command::Render(Page::Course(name)) => {
            let page = services.course_page(name)?;
            let charts = page.render(&selection, args.window);
            write_json(&charts, args.pretty)
        }
    }
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{err}");
        let mut cause = err.source();
        while let Some(inner) = cause {
            eprintln!("  caused by: {inner}");
            cause = inner.source();
        }
        std::process::exit(2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Args, ArgsError> {
        Args::parse(args.iter().map(|s| (*s).to_owned()))
    }

    #[test]
    fn parses_overview_render() {
        let args = parse(&[
            "render",
            "overview",
            "--select",
            "GCN",
            "--select",
            "GRH",
            "--granularity",
            "semana",
            "--window",
            "2024-01-01..2024-03-31",
        ])
        .unwrap();
        assert_eq!(args.command, Command::Render(Page::Overview));
        assert_eq!(args.selection, ["GCN", "GRH"]);
        assert_eq!(args.granularity, Some(Granularity::Week));
        assert!(args.window.is_some());
    }

    #[test]
    fn parses_course_render() {
        let args = parse(&["render", "course", "gcn", "--select", "Módulo 1", "--pretty"]).unwrap();
        assert_eq!(args.command, Command::Render(Page::Course("gcn".into())));
        assert!(args.pretty);
    }

    #[test]
    fn rejects_bad_input() {
        assert!(matches!(parse(&["render"]), Err(ArgsError::MissingPage)));
        assert!(matches!(parse(&["render", "course"]), Err(ArgsError::MissingCourse)));
        assert!(matches!(
            parse(&["render", "overview", "--granularity", "year"]),
            Err(ArgsError::InvalidGranularity { .. })
        ));
        assert!(matches!(
            parse(&["render", "course", "gcn", "--granularity", "day"]),
            Err(ArgsError::NotForPage { .. })
        ));
        assert!(matches!(
            parse(&["check", "--select"]),
            Err(ArgsError::MissingValue { flag: "--select" })
        ));
    }

    #[test]
    fn today_pins_the_clock() {
        let args = parse(&["check", "--today", "2024-06-30"]).unwrap();
        assert_eq!(args.clock(), Clock::fixed(NaiveDate::from_ymd_opt(2024, 6, 30).unwrap()));
    }
}
