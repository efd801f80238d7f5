//! Generate a student's result slip

#![allow(clippy::result_large_err)]

use resultslip_core::core_types::schema::OP_GENERATE_SLIP;
use resultslip_core::errors::Result;
use resultslip_core::{log_op_end, log_op_error, log_op_start, RenderReport, SlipRenderer};
use resultslip_store::ResultStore;
use std::path::Path;

/// Result of [`generate_slip`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlipOutcome {
    Generated(RenderReport),
    /// No student with that id; nothing was written
    NotFound,
}

/// Load a student and render their slip
///
/// `destination` overrides the renderer's default
/// `<output_dir>/<id>_ResultSlip.pdf`. An unknown id is an outcome, not an
/// error.
///
/// ## Errors
///
/// - `Storage`: the record could not be loaded
/// - `Render`: logo undecodable, PDF assembly or file write failed
pub fn generate_slip(
    store: &ResultStore,
    renderer: &SlipRenderer,
    student_id: &str,
    destination: Option<&Path>,
) -> Result<SlipOutcome> {
    log_op_start!(OP_GENERATE_SLIP, student_id = student_id);
    let start = std::time::Instant::now();

    let outcome = generate_slip_impl(store, renderer, student_id, destination).map_err(|e| {
        log_op_error!(
            OP_GENERATE_SLIP,
            &e,
            start,
            student_id = student_id
        );
        e
    })?;

    match &outcome {
        SlipOutcome::Generated(report) => {
            log_op_end!(
                OP_GENERATE_SLIP,
                start,
                student_id = student_id,
                found = true,
                page_count = report.page_count
            );
        }
        SlipOutcome::NotFound => {
            log_op_end!(
                OP_GENERATE_SLIP,
                start,
                student_id = student_id,
                found = false
            );
        }
    }

    Ok(outcome)
}

fn generate_slip_impl(
    store: &ResultStore,
    renderer: &SlipRenderer,
    student_id: &str,
    destination: Option<&Path>,
) -> Result<SlipOutcome> {
    let Some(record) = store.load(student_id)? else {
        return Ok(SlipOutcome::NotFound);
    };

    let path = match destination {
        Some(path) => path.to_path_buf(),
        None => renderer.slip_path(&record.student_id),
    };
    let report = renderer
        .render(&record, &path)
        .map_err(|e| e.with_entity_id(student_id))?;

    Ok(SlipOutcome::Generated(report))
}
