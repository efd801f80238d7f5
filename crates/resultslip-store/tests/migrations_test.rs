// Integration tests for the migration runner against real database files.

use resultslip_core::ExErrorKind;
use resultslip_store::migrations::{applied_migrations, apply_migrations};
use rusqlite::Connection;
use tempfile::TempDir;

fn open_file_db(dir: &TempDir) -> Connection {
    Connection::open(dir.path().join("test.db")).unwrap()
}

#[test]
fn test_schema_has_expected_tables() {
    let dir = TempDir::new().unwrap();
    let mut conn = open_file_db(&dir);
    apply_migrations(&mut conn).unwrap();

    let mut stmt = conn
        .prepare("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")
        .unwrap();
    let tables: Vec<String> = stmt
        .query_map([], |row| row.get(0))
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();

    assert!(tables.contains(&"students".to_string()));
    assert!(tables.contains(&"results".to_string()));
    assert!(tables.contains(&"schema_version".to_string()));
}

#[test]
fn test_results_primary_key_is_student_and_unit() {
    let dir = TempDir::new().unwrap();
    let mut conn = open_file_db(&dir);
    apply_migrations(&mut conn).unwrap();

    conn.execute_batch(
        "INSERT INTO students (student_id, name) VALUES ('S1', 'Jane');
         INSERT INTO results (student_id, unit, marks) VALUES ('S1', 'Math', 50);",
    )
    .unwrap();
    let duplicate = conn.execute(
        "INSERT INTO results (student_id, unit, marks) VALUES ('S1', 'Math', 60)",
        [],
    );
    assert!(duplicate.is_err());
}

#[test]
fn test_reapplying_on_reopen_is_noop() {
    let dir = TempDir::new().unwrap();
    {
        let mut conn = open_file_db(&dir);
        apply_migrations(&mut conn).unwrap();
    }
    let mut conn = open_file_db(&dir);
    apply_migrations(&mut conn).unwrap();
    assert_eq!(applied_migrations(&conn).unwrap().len(), 1);
}

#[test]
fn test_tampered_checksum_is_rejected() {
    let dir = TempDir::new().unwrap();
    let mut conn = open_file_db(&dir);
    apply_migrations(&mut conn).unwrap();
    conn.execute(
        "UPDATE schema_version SET checksum = 'bogus' WHERE migration_id = '001_initial_schema'",
        [],
    )
    .unwrap();

    let err = apply_migrations(&mut conn).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::Storage);
    assert_eq!(err.op(), Some("migration_checksum"));
}
