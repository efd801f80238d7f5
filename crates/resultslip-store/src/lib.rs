//! ResultSlip Store - SQLite persistence for student records
//!
//! Provides:
//! - `ResultStore`, the persistence gateway (`save` / `load`)
//! - Connection-scoped repository functions (`SqliteRepo`)
//! - Embedded schema migrations with checksums

pub mod db;
pub mod errors;
pub mod gateway;
pub mod migrations;
pub mod repo;

// Re-export key types
pub use errors::Result;
pub use gateway::ResultStore;
