//! Schema migrations
//!
//! SQL files under `migrations/` are compiled into the binary and applied in
//! id order. `schema_version` records each applied id with the SHA-256 of
//! its SQL.

mod checksums;
mod embedded;
mod runner;

pub use runner::{apply_migrations, applied_migrations};
