use indexmap::IndexSet;

use crate::model::{Dimension, Dimensioned, Selection};

/// Keeps the rows whose `dimension` value is part of `selection`.
///
/// An empty selection keeps every row. An empty result is a valid view, not
/// an error.
#[must_use]
pub fn filter_by_dimension<T>(rows: &[T], dimension: Dimension, selection: &Selection) -> Vec<T>
where
    T: Dimensioned + Clone,
{
    if selection.is_all() {
        return rows.to_vec();
    }
    rows.iter()
        .filter(|row| selection.contains(row.dimension(dimension)))
        .cloned()
        .collect()
}

/// Distinct values of `dimension`, in the order they first appear.
#[must_use]
pub fn dimension_values<T: Dimensioned>(rows: &[T], dimension: Dimension) -> Vec<String> {
    rows.iter()
        .map(|row| row.dimension(dimension))
        .collect::<IndexSet<&str>>()
        .into_iter()
        .map(str::to_owned)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::test_rows::lesson;
    use crate::model::LessonStatus;

    #[test]
    fn empty_selection_keeps_everything() {
        let rows = vec![
            lesson("A", "M1", "1", LessonStatus::Done),
            lesson("B", "M2", "2", LessonStatus::Pending),
        ];
        let out = filter_by_dimension(&rows, Dimension::Course, &Selection::all());
        assert_eq!(out, rows);
    }

    #[test]
    fn keeps_only_selected_modules() {
        let rows = vec![
            lesson("A", "M1", "1", LessonStatus::Done),
            lesson("A", "M2", "2", LessonStatus::Pending),
            lesson("A", "M3", "3", LessonStatus::Pending),
        ];
        let sel: Selection = ["M1", "M3"].into_iter().collect();
        let out = filter_by_dimension(&rows, Dimension::Module, &sel);
        let modules: Vec<_> = out.iter().map(|r| r.module.as_str()).collect();
        assert_eq!(modules, ["M1", "M3"]);
    }

    #[test]
    fn unmatched_selection_yields_no_rows() {
        let rows = vec![lesson("A", "M1", "1", LessonStatus::Done)];
        let sel: Selection = ["Z"].into_iter().collect();
        assert!(filter_by_dimension(&rows, Dimension::Course, &sel).is_empty());
    }

    #[test]
    fn dimension_values_keep_encounter_order() {
        let rows = vec![
            lesson("A", "M2", "1", LessonStatus::Done),
            lesson("A", "M1", "2", LessonStatus::Done),
            lesson("A", "M2", "3", LessonStatus::Done),
        ];
        assert_eq!(dimension_values(&rows, Dimension::Module), ["M2", "M1"]);
    }
}
