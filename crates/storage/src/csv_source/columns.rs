use serde::{Deserialize, Serialize};

/// Header names of the lesson table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LessonColumns {
    pub course: String,
    pub module: String,
    pub lesson: String,
    pub subtask: String,
    pub status: String,
    pub progress: String,
    pub start_date: String,
    pub end_date: String,
    pub teacher: String,
    pub responsible: String,
    pub task_id: String,
}

/// Header names of the progress table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressColumns {
    pub course: String,
    pub module: String,
    pub lesson: String,
    pub completion_date: String,
    pub cumulative_count: String,
    pub unit_count: String,
}

/// Built-in header sets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnPreset {
    #[default]
    English,
    /// Headers of the spreadsheets exported by the production team.
    Portuguese,
}

/// Maps logical columns to the header names found in the CSV files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMap {
    pub lessons: LessonColumns,
    pub progress: ProgressColumns,
}

impl Default for ColumnMap {
    fn default() -> Self {
        Self::english()
    }
}

impl From<ColumnPreset> for ColumnMap {
    fn from(preset: ColumnPreset) -> Self {
        match preset {
            ColumnPreset::English => Self::english(),
            ColumnPreset::Portuguese => Self::portuguese(),
        }
    }
}

impl ColumnMap {
    #[must_use]
    pub fn english() -> Self {
        Self {
            lessons: LessonColumns {
                course: "course".into(),
                module: "module".into(),
                lesson: "lesson".into(),
                subtask: "subtask".into(),
                status: "status".into(),
                progress: "progress".into(),
                start_date: "start_date".into(),
                end_date: "end_date".into(),
                teacher: "teacher".into(),
                responsible: "responsible".into(),
                task_id: "task_id".into(),
            },
            progress: ProgressColumns {
                course: "course".into(),
                module: "module".into(),
                lesson: "lesson".into(),
                completion_date: "completion_date".into(),
                cumulative_count: "cumulative_count".into(),
                unit_count: "unit_count".into(),
            },
        }
    }

    #[must_use]
    pub fn portuguese() -> Self {
        Self {
            lessons: LessonColumns {
                course: "curso".into(),
                module: "Módulo".into(),
                lesson: "Aula".into(),
                subtask: "Subtarefa".into(),
                status: "Status".into(),
                progress: "progresso".into(),
                start_date: "data inicial".into(),
                end_date: "data final".into(),
                teacher: "Professor".into(),
                responsible: "Responsável".into(),
                task_id: "ID".into(),
            },
            progress: ProgressColumns {
                course: "curso".into(),
                module: "Módulo".into(),
                lesson: "Aula".into(),
                completion_date: "data final".into(),
                cumulative_count: "progresso_acumulado".into(),
                unit_count: "progresso_100".into(),
            },
        }
    }
}
