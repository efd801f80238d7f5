//! ResultSlip Engine - Orchestration layer
//!
//! Provides the operations the CLI exposes (save results, generate a slip,
//! show a record), coordinating the record model, the persistence gateway
//! and the slip renderer.

pub mod commands;

pub use commands::results::save_results;
pub use commands::show::{show_record, RecordSummary};
pub use commands::slip::{generate_slip, SlipOutcome};
