//! Structured logging for ResultSlip
//!
//! `init` installs the process-wide subscriber once, choosing text or JSON
//! output from the configured [`Profile`]. Engine operations report their
//! lifecycle through `log_op_start!`, `log_op_end!` and `log_op_error!`;
//! tests assert on those events with [`init_test_capture`].
//!
//! ```rust
//! use resultslip_core::logging_facility::{init, Profile};
//!
//! init(Profile::Development, Some("resultslip_engine=debug"));
//! ```
//!
//! Output goes to stderr, leaving stdout to the shell's prompts.

pub mod init;
pub mod macros;
pub mod test_capture;

pub use init::{init, Profile};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};
