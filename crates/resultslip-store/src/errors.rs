//! Error handling for resultslip-store
//!
//! Wraps the core ExError facility with store-specific helpers. Every
//! failure here surfaces as `ExErrorKind::Storage`.

use resultslip_core::errors::{ExError, ExErrorKind};

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// Create a migration error
pub fn migration_error(migration_id: &str, reason: &str) -> ExError {
    ExError::new(ExErrorKind::Storage)
        .with_op("migration")
        .with_message(format!("Migration {} failed: {}", migration_id, reason))
}

/// Create a checksum mismatch error
pub fn checksum_mismatch(migration_id: &str, expected: &str, actual: &str) -> ExError {
    ExError::new(ExErrorKind::Storage)
        .with_op("migration_checksum")
        .with_message(format!(
            "Checksum mismatch for migration {}: recorded {}, embedded {}",
            migration_id, expected, actual
        ))
}

/// Create a storage error from rusqlite::Error
pub fn from_rusqlite(op: &str, err: rusqlite::Error) -> ExError {
    ExError::new(ExErrorKind::Storage)
        .with_op(op.to_string())
        .with_message(err.to_string())
}

/// Storage error scoped to one student
pub fn student_error(op: &str, student_id: &str, err: rusqlite::Error) -> ExError {
    from_rusqlite(op, err).with_entity_id(student_id)
}
