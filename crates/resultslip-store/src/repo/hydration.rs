//! Hydration: rebuild a StudentRecord from its stored rows

#![allow(clippy::result_large_err)]

use crate::errors::Result;
use crate::repo::SqliteRepo;
use resultslip_core::StudentRecord;
use rusqlite::Connection;

/// Load a student and all of their marks
///
/// Returns `Ok(None)` when the student row does not exist, regardless of
/// any stray `results` rows for that id.
pub fn load_student(conn: &Connection, student_id: &str) -> Result<Option<StudentRecord>> {
    let Some(mut record) = SqliteRepo::get_student(conn, student_id)? else {
        return Ok(None);
    };

    record.marks = SqliteRepo::get_marks(conn, student_id)?;
    tracing::debug!(
        student_id,
        mark_count = record.marks.len(),
        "student hydrated"
    );

    Ok(Some(record))
}
