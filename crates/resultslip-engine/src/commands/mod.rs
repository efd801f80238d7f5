//! Command orchestration layer.
//!
//! ## Logging Ownership
//!
//! Every public command owns lifecycle logging for its operation:
//! - `log_op_start!` at entry
//! - `log_op_end!` on success
//! - `log_op_error!` on failure
//!
//! Lower layers (store, render) use only `tracing::debug!()` and `warn!()`.

pub mod results;
pub mod show;
pub mod slip;
