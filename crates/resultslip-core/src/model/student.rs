use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::grade::Grade;

/// StudentRecord - one student's marks for a single operation
///
/// A record is built either from user input (and then persisted) or
/// reconstructed from the store (and then rendered). Aggregates are never
/// stored; `total`, `average` and `grade` are recomputed from `marks` on
/// every call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentRecord {
    /// Stable identifier, primary key in the store
    pub student_id: String,

    /// Display name (not unique)
    pub name: String,

    /// Unit name -> score. Keys are unique; iteration is sorted by unit.
    pub marks: BTreeMap<String, f64>,
}

impl StudentRecord {
    /// Create a record with no marks
    pub fn new(student_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            student_id: student_id.into(),
            name: name.into(),
            marks: BTreeMap::new(),
        }
    }

    /// Insert or overwrite the score for `unit`
    ///
    /// Scores are not range-checked; negative or out-of-range values are
    /// stored as given.
    pub fn add_subject(&mut self, unit: impl Into<String>, score: f64) {
        self.marks.insert(unit.into(), score);
    }

    /// Builder form of [`add_subject`](Self::add_subject)
    pub fn with_subject(mut self, unit: impl Into<String>, score: f64) -> Self {
        self.add_subject(unit, score);
        self
    }

    pub fn subject_count(&self) -> usize {
        self.marks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    /// Sum of all scores, `0.0` for an empty record
    pub fn total(&self) -> f64 {
        // `Sum for f64` starts at -0.0, which would print as "-0".
        self.marks.values().fold(0.0, |acc, score| acc + score)
    }

    /// `total / count`, or `0.0` when there are no marks
    pub fn average(&self) -> f64 {
        if self.marks.is_empty() {
            return 0.0;
        }
        self.total() / self.marks.len() as f64
    }

    pub fn grade(&self) -> Grade {
        Grade::from_average(self.average())
    }
}
