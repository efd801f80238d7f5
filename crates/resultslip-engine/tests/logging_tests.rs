// Boundary logging: every engine command emits start and end (or
// end_error) events carrying the student id.

use resultslip_core::core_types::schema::{
    EVENT_END, EVENT_END_ERROR, EVENT_START, FIELD_DURATION_MS, FIELD_MARK_COUNT,
    FIELD_PAGE_COUNT, OP_GENERATE_SLIP, OP_SAVE_RESULTS, OP_SHOW_RECORD,
};
use resultslip_core::logging_facility::test_capture::{init_test_capture, CapturedEvent};
use resultslip_core::{DatabaseConfig, SlipConfig, SlipRenderer, StudentRecord};
use resultslip_engine::{generate_slip, save_results, show_record};
use resultslip_store::ResultStore;
use tempfile::TempDir;

fn setup() -> (TempDir, ResultStore) {
    let dir = TempDir::new().unwrap();
    let store = ResultStore::open(&DatabaseConfig {
        path: dir.path().join("results.db"),
        ..DatabaseConfig::default()
    })
    .unwrap();
    (dir, store)
}

// Tests share one capture, so every test filters on its own student id.
fn events_for(op: &str, student_id: &str) -> Vec<CapturedEvent> {
    init_test_capture()
        .events_for_op(op)
        .into_iter()
        .filter(|e| e.student_id.as_deref() == Some(student_id))
        .collect()
}

fn event_names(events: &[CapturedEvent]) -> Vec<String> {
    events.iter().filter_map(|e| e.event.clone()).collect()
}

#[test]
fn test_save_results_logs_start_and_end() {
    let _capture = init_test_capture();
    let (_dir, store) = setup();

    save_results(
        &store,
        &StudentRecord::new("log-save", "Jane").with_subject("Math", 85.0),
    )
    .unwrap();

    let events = events_for(OP_SAVE_RESULTS, "log-save");
    assert_eq!(event_names(&events), vec![EVENT_START, EVENT_END]);
    assert_eq!(
        events[0].fields.get(FIELD_MARK_COUNT).map(String::as_str),
        Some("1")
    );
    assert!(events[1].fields.contains_key(FIELD_DURATION_MS));
}

#[test]
fn test_failed_save_logs_end_error_with_code() {
    let _capture = init_test_capture();
    let (_dir, store) = setup();

    assert!(save_results(&store, &StudentRecord::new("log-bad", "")).is_err());

    let events = events_for(OP_SAVE_RESULTS, "log-bad");
    assert_eq!(event_names(&events), vec![EVENT_START, EVENT_END_ERROR]);
    assert_eq!(events[1].err_code.as_deref(), Some("ERR_INVALID_INPUT"));
    assert_eq!(events[1].level, tracing::Level::ERROR);
}

#[test]
fn test_generate_slip_not_found_is_logged_as_end() {
    let _capture = init_test_capture();
    let (dir, store) = setup();
    let renderer = SlipRenderer::new(SlipConfig {
        output_dir: dir.path().join("slips"),
        ..SlipConfig::default()
    });

    generate_slip(&store, &renderer, "log-ghost", None).unwrap();

    let events = events_for(OP_GENERATE_SLIP, "log-ghost");
    assert_eq!(event_names(&events), vec![EVENT_START, EVENT_END]);
    assert_eq!(
        events[1].fields.get("found").map(String::as_str),
        Some("false")
    );
    assert!(!events[1].fields.contains_key(FIELD_PAGE_COUNT));
}

#[test]
fn test_generate_slip_logs_page_count() {
    let _capture = init_test_capture();
    let (dir, store) = setup();
    let renderer = SlipRenderer::new(SlipConfig {
        output_dir: dir.path().join("slips"),
        ..SlipConfig::default()
    });
    save_results(
        &store,
        &StudentRecord::new("log-slip", "Jane").with_subject("Math", 85.0),
    )
    .unwrap();

    generate_slip(&store, &renderer, "log-slip", None).unwrap();

    let events = events_for(OP_GENERATE_SLIP, "log-slip");
    assert_eq!(event_names(&events), vec![EVENT_START, EVENT_END]);
    assert_eq!(
        events[1].fields.get(FIELD_PAGE_COUNT).map(String::as_str),
        Some("1")
    );
}

#[test]
fn test_show_record_not_found_is_logged_as_error() {
    let _capture = init_test_capture();
    let (_dir, store) = setup();

    assert!(show_record(&store, "log-missing").is_err());

    let events = events_for(OP_SHOW_RECORD, "log-missing");
    assert_eq!(event_names(&events), vec![EVENT_START, EVENT_END_ERROR]);
    assert_eq!(events[1].err_code.as_deref(), Some("ERR_NOT_FOUND"));
}
