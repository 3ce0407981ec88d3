use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::model::{LessonRecord, ProgressPoint};

/// Dimension a page filters its dataset on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Course,
    Module,
}

/// Rows that expose the filterable dimensions.
pub trait Dimensioned {
    fn dimension(&self, dimension: Dimension) -> &str;
}

impl Dimensioned for LessonRecord {
    fn dimension(&self, dimension: Dimension) -> &str {
        match dimension {
            Dimension::Course => &self.course,
            Dimension::Module => &self.module,
        }
    }
}

impl Dimensioned for ProgressPoint {
    fn dimension(&self, dimension: Dimension) -> &str {
        match dimension {
            Dimension::Course => &self.course,
            Dimension::Module => &self.module,
        }
    }
}

/// Dropdown selection: a set of dimension values, empty meaning "everything".
///
/// Ordered and deduplicated so two selections of the same values in a
/// different order hash to the same cache key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Selection(BTreeSet<String>);

impl Selection {
    /// The empty selection, which keeps every row.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_all(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn contains(&self, value: &str) -> bool {
        self.0.contains(value)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for Selection {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_ignores_order_and_duplicates() {
        let a: Selection = ["M2", "M1", "M2"].into_iter().collect();
        let b: Selection = ["M1", "M2"].into_iter().collect();
        assert_eq!(a, b);
        assert_eq!(a.len(), 2);
    }

    #[test]
    fn cleared_dropdown_selects_all() {
        let sel: Selection = Vec::<String>::new().into_iter().collect();
        assert!(sel.is_all());
        assert_eq!(sel, Selection::all());
    }
}
