use chrono::NaiveDate;
use indexmap::{IndexMap, IndexSet};
use serde::Serialize;

use crate::error::InvalidGranularityError;
use crate::model::{Granularity, ProgressPoint};

/// Completed lessons of one course inside one time bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BucketCount {
    pub bucket: NaiveDate,
    pub course: String,
    pub completions: u32,
}

/// Sums `unit_count` per `(bucket, course)`.
///
/// Output is ordered by bucket date, then by the order in which courses first
/// appear in `points`.
#[must_use]
pub fn bucket_progress(points: &[ProgressPoint], granularity: Granularity) -> Vec<BucketCount> {
    let course_order: IndexSet<&str> = points.iter().map(|p| p.course.as_str()).collect();

    let mut sums: IndexMap<(NaiveDate, &str), u32> = IndexMap::new();
    for point in points {
        let key = (granularity.bucket_of(point.completion_date), point.course.as_str());
        let slot = sums.entry(key).or_insert(0);
        *slot = slot.saturating_add(point.unit_count);
    }

    let mut out: Vec<BucketCount> = sums
        .into_iter()
        .map(|((bucket, course), completions)| BucketCount {
            bucket,
            course: course.to_owned(),
            completions,
        })
        .collect();
    out.sort_by_key(|b| (b.bucket, course_order.get_index_of(b.course.as_str())));
    out
}

/// [`bucket_progress`] for a granularity label coming straight from the caller.
///
/// # Errors
///
/// Returns `InvalidGranularityError` if `label` is not `day`, `week` or `month`.
pub fn bucket_progress_by_label(
    points: &[ProgressPoint],
    label: &str,
) -> Result<Vec<BucketCount>, InvalidGranularityError> {
    let granularity: Granularity = label.parse()?;
    Ok(bucket_progress(points, granularity))
}
