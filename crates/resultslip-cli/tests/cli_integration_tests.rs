//! CLI integration tests
//!
//! Run the `resultslip` binary against a scratch directory holding its
//! configuration file, database and generated slips.

use rusqlite::Connection;
use std::fs;
use std::io::Write;
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

const CONFIG: &str = r#"
[database]
path = "results.db"

[slip]
output_dir = "slips"

[logging]
profile = "test"
"#;

fn setup() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("resultslip.toml"), CONFIG).unwrap();
    temp_dir
}

fn run(dir: &TempDir, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_resultslip"))
        .current_dir(dir.path())
        .args(args)
        .output()
        .expect("Failed to execute CLI")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn add_jane(dir: &TempDir) {
    let output = run(
        dir,
        &[
            "add", "--id", "S1", "--name", "Jane", "--mark", "Math=85", "--mark", "Physics=95",
        ],
    );
    assert!(
        output.status.success(),
        "add should succeed. Stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(stdout(&output).contains("Student results saved successfully."));
}

#[test]
fn test_add_writes_rows() {
    let dir = setup();
    add_jane(&dir);

    let conn = Connection::open(dir.path().join("results.db")).unwrap();
    let count: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM results WHERE student_id = 'S1'",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(count, 2);
}

#[test]
fn test_add_rejects_malformed_mark() {
    let dir = setup();
    let output = run(&dir, &["add", "--id", "S1", "--name", "Jane", "--mark", "Math"]);

    assert!(!output.status.success());
    assert!(!dir.path().join("results.db").exists());
}

#[test]
fn test_add_trims_id_and_name() {
    let dir = setup();
    let output = run(&dir, &["add", "--id", " S1 ", "--name", " Jane ", "--mark", "Math=85"]);
    assert!(output.status.success());

    let output = run(&dir, &["show", "S1", "--json"]);
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["name"], "Jane");
}

#[test]
fn test_slip_writes_pdf() {
    let dir = setup();
    add_jane(&dir);

    let output = run(&dir, &["slip", "S1"]);

    assert!(output.status.success());
    assert!(stdout(&output).contains("Result slip saved to: slips"));
    let bytes = fs::read(dir.path().join("slips").join("S1_ResultSlip.pdf")).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
}

#[test]
fn test_slip_unknown_student_fails() {
    let dir = setup();
    let output = run(&dir, &["slip", "ghost"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("ERR_NOT_FOUND"));
    assert!(!dir.path().join("slips").exists());
}

#[test]
fn test_show_json() {
    let dir = setup();
    add_jane(&dir);

    let output = run(&dir, &["show", "S1", "--json"]);

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["name"], "Jane");
    assert_eq!(json["total"], 180.0);
    assert_eq!(json["grade"], "A");
}

#[test]
fn test_migrate_reports_applied() {
    let dir = setup();
    let output = run(&dir, &["migrate"]);

    assert!(output.status.success());
    assert!(stdout(&output).contains("applied 001_initial_schema"));
}

#[test]
fn test_env_overrides_database_path() {
    let dir = setup();
    let output = Command::new(env!("CARGO_BIN_EXE_resultslip"))
        .current_dir(dir.path())
        .env("RESULTSLIP__DATABASE__PATH", "other.db")
        .arg("migrate")
        .output()
        .unwrap();

    assert!(output.status.success());
    assert!(dir.path().join("other.db").exists());
    assert!(!dir.path().join("results.db").exists());
}

#[test]
fn test_explicit_config_must_exist() {
    let dir = setup();
    let output = run(&dir, &["--config", "missing.toml", "migrate"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Error:"));
    assert!(!dir.path().join("results.db").exists());
}

#[test]
fn test_explicit_config_is_used() {
    let dir = setup();
    fs::write(
        dir.path().join("other.toml"),
        CONFIG.replace("results.db", "nested/other.db"),
    )
    .unwrap();

    let output = run(&dir, &["--config", "other.toml", "migrate"]);

    assert!(
        output.status.success(),
        "Stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(dir.path().join("nested").join("other.db").exists());
    assert!(!dir.path().join("results.db").exists());
}

#[test]
fn test_config_init_and_show() {
    let dir = TempDir::new().unwrap();

    let output = run(&dir, &["config", "init"]);
    assert!(output.status.success());
    assert!(dir.path().join("resultslip.toml").exists());

    let output = run(&dir, &["config", "init"]);
    assert!(!output.status.success(), "second init must not overwrite");

    let output = run(&dir, &["config", "show"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("KCA UNIVERSITY"));
}

#[test]
fn test_shell_session_over_stdin() {
    let dir = setup();
    let mut child = Command::new(env!("CARGO_BIN_EXE_resultslip"))
        .current_dir(dir.path())
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();

    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"1\nS1\nJane\n1\nMath\n85\n2\nS1\n5\n3\n")
        .unwrap();
    let output = child.wait_with_output().unwrap();

    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("Student results saved successfully."));
    assert!(out.contains("Result slip saved to: "));
    assert!(out.contains("Invalid choice! Please enter 1, 2, or 3."));
    assert!(out.ends_with("Exiting program. Goodbye!\n"));
    assert!(dir.path().join("slips").join("S1_ResultSlip.pdf").is_file());
}
