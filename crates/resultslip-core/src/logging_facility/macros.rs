//! Boundary logging macros
//!
//! An engine operation emits exactly one `start` event and then either one
//! `end` or one `end_error` event. The closing macros take the `Instant`
//! captured at start and record `duration_ms` from it.

/// Log the start of an operation
///
/// # Example
///
/// ```
/// # use resultslip_core::log_op_start;
/// log_op_start!("save_results");
/// log_op_start!("save_results", student_id = "S1", mark_count = 2);
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr $(, $($field:tt)+)?) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_START,
            $($($field)+)?
        )
    };
}

/// Log the successful end of an operation started at `started`
///
/// # Example
///
/// ```
/// # use resultslip_core::log_op_end;
/// let started = std::time::Instant::now();
/// log_op_end!("generate_slip", started, student_id = "S1", page_count = 1);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, $started:expr $(, $($field:tt)+)?) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_END,
            duration_ms = $started.elapsed().as_millis() as u64,
            $($($field)+)?
        )
    };
}

/// Log the failure of an operation started at `started`
///
/// Accepts anything convertible into `ExError`, so kind, code and message
/// always land in the same fields. The error's student id, when it has one,
/// is recorded as `err_student_id`.
///
/// # Example
///
/// ```
/// # use resultslip_core::log_op_error;
/// # use resultslip_core::errors::{ExError, ExErrorKind};
/// let started = std::time::Instant::now();
/// let err = ExError::new(ExErrorKind::Storage).with_entity_id("S1");
/// log_op_error!("save_results", &err, started, student_id = "S1");
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, $started:expr $(, $($field:tt)+)?) => {{
        let ex_err: $crate::errors::ExError = ::core::clone::Clone::clone($err).into();
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_END_ERROR,
            duration_ms = $started.elapsed().as_millis() as u64,
            err_kind = ?ex_err.kind(),
            err_code = ex_err.code(),
            err_message = ex_err.message(),
            err_student_id = ex_err.entity_id(),
            $($($field)+)?
        )
    }};
}
