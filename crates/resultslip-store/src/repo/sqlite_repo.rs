//! SQLite repository implementation
//!
//! Row-level upserts and selects for the `students` and `results` tables.
//! Functions take a `&Connection`; a `&Transaction` derefs to one, so the
//! same statements run inside or outside a transaction.

#![allow(clippy::result_large_err)]

use crate::errors::{student_error, Result};
use resultslip_core::StudentRecord;
use rusqlite::{Connection, OptionalExtension, Transaction};
use std::collections::BTreeMap;

/// SQLite repository for students and their marks
pub struct SqliteRepo;

impl SqliteRepo {
    /// Upsert the student row; an existing row gets the new name
    pub fn persist_student(conn: &Connection, student_id: &str, name: &str) -> Result<()> {
        conn.execute(
            "INSERT INTO students (student_id, name)
             VALUES (?1, ?2)
             ON CONFLICT(student_id) DO UPDATE SET
                name = excluded.name",
            rusqlite::params![student_id, name],
        )
        .map_err(|e| student_error("persist_student", student_id, e))?;

        Ok(())
    }

    /// Upsert one `(student_id, unit)` mark row
    pub fn persist_mark(conn: &Connection, student_id: &str, unit: &str, marks: f64) -> Result<()> {
        conn.execute(
            "INSERT INTO results (student_id, unit, marks)
             VALUES (?1, ?2, ?3)
             ON CONFLICT(student_id, unit) DO UPDATE SET
                marks = excluded.marks",
            rusqlite::params![student_id, unit, marks],
        )
        .map_err(|e| student_error("persist_mark", student_id, e))?;

        Ok(())
    }

    /// Upsert a whole record within a transaction
    ///
    /// Units already stored for the student but absent from `record` are
    /// left untouched.
    pub fn persist_record_tx(tx: &Transaction, record: &StudentRecord) -> Result<()> {
        Self::persist_student(tx, &record.student_id, &record.name)?;
        for (unit, marks) in &record.marks {
            Self::persist_mark(tx, &record.student_id, unit, *marks)?;
        }
        Ok(())
    }

    /// Get the student row as a record without marks
    pub fn get_student(conn: &Connection, student_id: &str) -> Result<Option<StudentRecord>> {
        let mut stmt = conn
            .prepare("SELECT student_id, name FROM students WHERE student_id = ?")
            .map_err(|e| student_error("get_student", student_id, e))?;

        let result = stmt
            .query_row([student_id], |row| {
                let id: String = row.get(0)?;
                let name: String = row.get(1)?;
                Ok(StudentRecord::new(id, name))
            })
            .optional()
            .map_err(|e| student_error("get_student", student_id, e))?;

        Ok(result)
    }

    /// Get all marks stored for a student (empty if none)
    pub fn get_marks(conn: &Connection, student_id: &str) -> Result<BTreeMap<String, f64>> {
        let mut stmt = conn
            .prepare("SELECT unit, marks FROM results WHERE student_id = ?")
            .map_err(|e| student_error("get_marks", student_id, e))?;

        let marks = stmt
            .query_map([student_id], |row| {
                let unit: String = row.get(0)?;
                let marks: f64 = row.get(1)?;
                Ok((unit, marks))
            })
            .map_err(|e| student_error("get_marks", student_id, e))?
            .collect::<std::result::Result<BTreeMap<_, _>, _>>()
            .map_err(|e| student_error("get_marks", student_id, e))?;

        Ok(marks)
    }

    /// Count stored mark rows for a student
    pub fn count_marks(conn: &Connection, student_id: &str) -> Result<usize> {
        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM results WHERE student_id = ?",
                [student_id],
                |row| row.get(0),
            )
            .map_err(|e| student_error("count_marks", student_id, e))?;
        Ok(count as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::migrations::apply_migrations;

    fn setup() -> Connection {
        let mut conn = Connection::open_in_memory().unwrap();
        apply_migrations(&mut conn).unwrap();
        conn
    }

    #[test]
    fn test_persist_and_get_student() {
        let conn = setup();
        SqliteRepo::persist_student(&conn, "S1", "Jane").unwrap();

        let student = SqliteRepo::get_student(&conn, "S1").unwrap().unwrap();
        assert_eq!(student.name, "Jane");
        assert!(student.marks.is_empty());
    }

    #[test]
    fn test_student_upsert_updates_name() {
        let conn = setup();
        SqliteRepo::persist_student(&conn, "S1", "Jane").unwrap();
        SqliteRepo::persist_student(&conn, "S1", "Jane Doe").unwrap();

        let student = SqliteRepo::get_student(&conn, "S1").unwrap().unwrap();
        assert_eq!(student.name, "Jane Doe");
    }

    #[test]
    fn test_mark_upsert_overwrites() {
        let conn = setup();
        SqliteRepo::persist_student(&conn, "S1", "Jane").unwrap();
        SqliteRepo::persist_mark(&conn, "S1", "Math", 70.0).unwrap();
        SqliteRepo::persist_mark(&conn, "S1", "Math", 90.0).unwrap();

        let marks = SqliteRepo::get_marks(&conn, "S1").unwrap();
        assert_eq!(marks.len(), 1);
        assert_eq!(marks["Math"], 90.0);
        assert_eq!(SqliteRepo::count_marks(&conn, "S1").unwrap(), 1);
    }

    #[test]
    fn test_get_missing_student() {
        let conn = setup();
        assert!(SqliteRepo::get_student(&conn, "nobody").unwrap().is_none());
        assert!(SqliteRepo::get_marks(&conn, "nobody").unwrap().is_empty());
    }

    #[test]
    fn test_mark_for_unknown_student_violates_foreign_key() {
        let conn = setup();
        conn.pragma_update(None, "foreign_keys", "ON").unwrap();
        let err = SqliteRepo::persist_mark(&conn, "ghost", "Math", 50.0).unwrap_err();
        assert_eq!(err.kind(), resultslip_core::ExErrorKind::Storage);
        assert_eq!(err.entity_id(), Some("ghost"));
    }
}
