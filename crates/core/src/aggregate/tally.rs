use indexmap::IndexMap;
use serde::Serialize;

use crate::model::{LessonField, LessonRecord, LessonStatus};

/// Count of observations sharing a group key and a status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TallyRow {
    /// Values of the tally's group fields, in the same order.
    pub key: Vec<String>,
    pub status: LessonStatus,
    pub count: u32,
}

/// Status counts grouped by a tuple of lesson fields.
///
/// Rows keep the order in which each `(key, status)` pair was first seen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tally {
    fields: Vec<LessonField>,
    rows: Vec<TallyRow>,
}

impl Tally {
    #[must_use]
    pub fn fields(&self) -> &[LessonField] {
        &self.fields
    }

    #[must_use]
    pub fn rows(&self) -> &[TallyRow] {
        &self.rows
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Sum of all counts.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.rows.iter().map(|r| r.count).sum()
    }

    /// Count for a status across every group.
    #[must_use]
    pub fn count_for(&self, status: LessonStatus) -> u32 {
        self.rows
            .iter()
            .filter(|r| r.status == status)
            .map(|r| r.count)
            .sum()
    }

    /// Position of `field` in each row's key.
    #[must_use]
    pub fn key_index(&self, field: LessonField) -> Option<usize> {
        self.fields.iter().position(|f| *f == field)
    }
}

fn key_of(row: &LessonRecord, fields: &[LessonField]) -> Vec<String> {
    fields.iter().map(|f| row.field(*f).to_owned()).collect()
}

fn into_tally(fields: &[LessonField], counts: IndexMap<(Vec<String>, LessonStatus), u32>) -> Tally {
    Tally {
        fields: fields.to_vec(),
        rows: counts
            .into_iter()
            .map(|((key, status), count)| TallyRow { key, status, count })
            .collect(),
    }
}

/// Counts lessons per `(group_keys, status)`.
///
/// Subtask rows of the same lesson (same group key, course, module and
/// lesson) with the same status collapse into a single observation before
/// counting.
#[must_use]
pub fn tally_by_status(rows: &[LessonRecord], group_keys: &[LessonField]) -> Tally {
    let mut observation_fields = group_keys.to_vec();
    for field in [LessonField::Course, LessonField::Module, LessonField::Lesson] {
        if !observation_fields.contains(&field) {
            observation_fields.push(field);
        }
    }

    // Observation key -> group key, first-seen order.
    let mut observations: IndexMap<(Vec<String>, LessonStatus), Vec<String>> = IndexMap::new();
    for row in rows {
        observations
            .entry((key_of(row, &observation_fields), row.status))
            .or_insert_with(|| key_of(row, group_keys));
    }

    let mut counts: IndexMap<(Vec<String>, LessonStatus), u32> = IndexMap::new();
    for ((_, status), group_key) in observations {
        *counts.entry((group_key, status)).or_insert(0) += 1;
    }
    into_tally(group_keys, counts)
}

/// Counts raw subtask rows per `(group_keys, status)`, without collapsing.
#[must_use]
pub fn count_subtasks_by_status(rows: &[LessonRecord], group_keys: &[LessonField]) -> Tally {
    let mut counts: IndexMap<(Vec<String>, LessonStatus), u32> = IndexMap::new();
    for row in rows {
        *counts.entry((key_of(row, group_keys), row.status)).or_insert(0) += 1;
    }
    into_tally(group_keys, counts)
}

/// Values of `group_key`, ordered from the smallest to the largest total count.
///
/// Ties keep first-seen order. Returns an empty list when the tally is not
/// grouped by `group_key`.
#[must_use]
pub fn order_by_total_ascending(tally: &Tally, group_key: LessonField) -> Vec<String> {
    let Some(idx) = tally.key_index(group_key) else {
        return Vec::new();
    };

    let mut totals: IndexMap<&str, u64> = IndexMap::new();
    for row in &tally.rows {
        *totals.entry(row.key[idx].as_str()).or_insert(0) += u64::from(row.count);
    }

    let mut ordered: Vec<(&str, u64)> = totals.into_iter().collect();
    ordered.sort_by_key(|(_, total)| *total);
    ordered.into_iter().map(|(value, _)| value.to_owned()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::test_rows::{date, lesson};

    #[test]
    fn duplicate_subtasks_collapse_to_one_lesson() {
        let mut a = lesson("GCN", "M1", "T1", LessonStatus::Done);
        a.end_date = Some(date(2024, 1, 1));
        let mut b = a.clone();
        b.subtask = "edit".into();
        b.end_date = Some(date(2024, 1, 2));

        let tally = tally_by_status(&[a, b], &[]);
        assert_eq!(tally.rows().len(), 1);
        assert_eq!(tally.count_for(LessonStatus::Done), 1);
    }

    #[test]
    fn statuses_keep_first_occurrence_order() {
        let rows = vec![
            lesson("GCN", "M1", "T1", LessonStatus::Pending),
            lesson("GCN", "M1", "T2", LessonStatus::Done),
            lesson("GCN", "M2", "T3", LessonStatus::Pending),
        ];
        let tally = tally_by_status(&rows, &[]);
        let order: Vec<_> = tally.rows().iter().map(|r| (r.status, r.count)).collect();
        assert_eq!(order, vec![(LessonStatus::Pending, 2), (LessonStatus::Done, 1)]);
    }

    #[test]
    fn teacher_tally_groups_by_key_tuple() {
        let mut a = lesson("GCN", "M1", "T1", LessonStatus::Done);
        a.teacher = "Ana".into();
        let mut b = lesson("GCN", "M1", "T2", LessonStatus::Done);
        b.teacher = "Ana".into();
        let mut c = lesson("GCN", "M2", "T3", LessonStatus::InProgress);
        c.teacher = "Rui".into();

        let keys = [LessonField::Course, LessonField::Teacher, LessonField::Module];
        let tally = tally_by_status(&[a, b, c], &keys);
        assert_eq!(tally.rows()[0].key, ["GCN", "Ana", "M1"]);
        assert_eq!(tally.rows()[0].count, 2);
        assert_eq!(tally.rows()[1].key, ["GCN", "Rui", "M2"]);
    }

    #[test]
    fn subtask_counts_do_not_collapse() {
        let a = lesson("GCN", "M1", "T1", LessonStatus::Done);
        let b = a.clone();
        let tally = count_subtasks_by_status(&[a, b], &[LessonField::Responsible]);
        assert_eq!(tally.total(), 2);
    }

    #[test]
    fn orders_groups_by_total() {
        let mut rows = Vec::new();
        for (who, n) in [("A", 5), ("B", 2), ("C", 9)] {
            for _ in 0..n {
                let mut r = lesson("GCN", "M1", "T1", LessonStatus::Done);
                r.responsible = who.into();
                rows.push(r);
            }
        }
        let tally = count_subtasks_by_status(&rows, &[LessonField::Responsible, LessonField::Module]);
        assert_eq!(
            order_by_total_ascending(&tally, LessonField::Responsible),
            ["B", "A", "C"]
        );
    }

    #[test]
    fn ordering_by_missing_field_is_empty() {
        let tally = tally_by_status(&[lesson("GCN", "M1", "T1", LessonStatus::Done)], &[]);
        assert!(order_by_total_ascending(&tally, LessonField::Teacher).is_empty());
    }

    #[test]
    fn empty_rows_give_empty_tally() {
        let tally = tally_by_status(&[], &[LessonField::Teacher]);
        assert!(tally.is_empty());
        assert_eq!(tally.total(), 0);
    }
}
