//! ResultSlip Core - record model, rendering and shared facilities
//!
//! This crate provides:
//! - `StudentRecord` with derived total, average and letter grade
//! - The result slip renderer (layout + PDF)
//! - The canonical error facility (`ExError`, `ExErrorKind`, `SlipError`)
//! - The structured logging facility and its macros
//! - Layered application configuration

pub mod config;
pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod render;

// Re-exported for the logging macros
pub use resultslip_core_types as core_types;

// Re-export commonly used types
pub use config::{AppConfig, DatabaseConfig, SlipConfig};
pub use errors::{ExError, ExErrorKind, Result, SlipError};
pub use model::{Grade, StudentRecord};
pub use render::{LogoStatus, RenderReport, SlipRenderer};
