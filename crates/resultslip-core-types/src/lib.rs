//! Leaf types shared by the ResultSlip crates
//!
//! - [`schema`]: field, event and operation names used in log events
//! - [`correlation`]: per-operation request ids and their tracing span

pub mod correlation;
pub mod schema;

pub use correlation::{RequestContext, RequestId};
