//! Save a student's results

#![allow(clippy::result_large_err)]

use resultslip_core::core_types::schema::OP_SAVE_RESULTS;
use resultslip_core::errors::{ExError, Result, SlipError};
use resultslip_core::{log_op_end, log_op_error, log_op_start, StudentRecord};
use resultslip_store::ResultStore;

/// Validate and persist `record`
///
/// The student row and every mark are upserted in one transaction. Units
/// stored earlier but absent from `record` are kept.
///
/// ## Errors
///
/// - `InvalidInput`: empty student id, name or unit name
/// - `Storage`: database failure; nothing was written
pub fn save_results(store: &ResultStore, record: &StudentRecord) -> Result<()> {
    log_op_start!(
        OP_SAVE_RESULTS,
        student_id = %record.student_id,
        mark_count = record.marks.len()
    );
    let start = std::time::Instant::now();

    validate_record(record)
        .and_then(|_| store.save(record))
        .map_err(|e| {
            log_op_error!(
                OP_SAVE_RESULTS,
                &e,
                start,
                student_id = %record.student_id
            );
            e
        })?;

    log_op_end!(
        OP_SAVE_RESULTS,
        start,
        student_id = %record.student_id
    );
    Ok(())
}

fn validate_record(record: &StudentRecord) -> Result<()> {
    let empty = |field: &str| -> ExError {
        ExError::from(SlipError::EmptyField {
            field: field.to_string(),
        })
        .with_op(OP_SAVE_RESULTS)
    };

    if record.student_id.trim().is_empty() {
        return Err(empty("Student ID"));
    }
    if record.name.trim().is_empty() {
        return Err(empty("Student Name").with_entity_id(record.student_id.clone()));
    }
    if record.marks.keys().any(|unit| unit.trim().is_empty()) {
        return Err(empty("Unit name").with_entity_id(record.student_id.clone()));
    }
    Ok(())
}
