//! Look up a stored record with its derived summary

#![allow(clippy::result_large_err)]

use resultslip_core::core_types::schema::OP_SHOW_RECORD;
use resultslip_core::errors::{Result, SlipError};
use resultslip_core::{log_op_end, log_op_error, log_op_start, StudentRecord};
use resultslip_store::ResultStore;
use serde::Serialize;
use std::collections::BTreeMap;

/// A record plus its aggregates, ready for display or JSON output
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordSummary {
    pub student_id: String,
    pub name: String,
    pub marks: BTreeMap<String, f64>,
    pub total: f64,
    pub average: f64,
    pub grade: String,
}

impl From<StudentRecord> for RecordSummary {
    fn from(record: StudentRecord) -> Self {
        let total = record.total();
        let average = record.average();
        let grade = record.grade().to_string();
        Self {
            student_id: record.student_id,
            name: record.name,
            marks: record.marks,
            total,
            average,
            grade,
        }
    }
}

/// Load the record for `student_id` and summarise it
///
/// ## Errors
///
/// - `NotFound`: no student with that id
/// - `Storage`: the record could not be loaded
pub fn show_record(store: &ResultStore, student_id: &str) -> Result<RecordSummary> {
    log_op_start!(OP_SHOW_RECORD, student_id = student_id);
    let start = std::time::Instant::now();

    let summary = store
        .load(student_id)
        .and_then(|found| {
            found.map(RecordSummary::from).ok_or_else(|| {
                SlipError::StudentNotFound {
                    student_id: student_id.to_string(),
                }
                .into()
            })
        })
        .map_err(|e| {
            log_op_error!(
                OP_SHOW_RECORD,
                &e,
                start,
                student_id = student_id
            );
            e
        })?;

    log_op_end!(
        OP_SHOW_RECORD,
        start,
        student_id = student_id,
        mark_count = summary.marks.len()
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_from_record() {
        let record = StudentRecord::new("S1", "Jane")
            .with_subject("Math", 85.0)
            .with_subject("Physics", 95.0);
        let summary = RecordSummary::from(record);

        assert_eq!(summary.total, 180.0);
        assert_eq!(summary.average, 90.0);
        assert_eq!(summary.grade, "A");
        assert_eq!(summary.marks.len(), 2);
    }
}
