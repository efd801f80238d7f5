//! Canonical schema constants for structured logging and events
//!
//! The `log_op_*` macros emit these field names; the test capture layer and
//! log assertions read them back through the constants.

// Canonical field keys for structured logging
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";

// Entity identifiers
pub const FIELD_STUDENT_ID: &str = "student_id";

// Collection sizes
pub const FIELD_MARK_COUNT: &str = "mark_count";
pub const FIELD_PAGE_COUNT: &str = "page_count";

// Error fields
pub const FIELD_ERR_KIND: &str = "err_kind";
pub const FIELD_ERR_CODE: &str = "err_code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";

// Operation names owned by the engine layer
pub const OP_SAVE_RESULTS: &str = "save_results";
pub const OP_GENERATE_SLIP: &str = "generate_slip";
pub const OP_SHOW_RECORD: &str = "show_record";
