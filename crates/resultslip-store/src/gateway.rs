//! Persistence gateway
//!
//! `ResultStore` holds only its configuration. Each `save` or `load` opens
//! its own connection and drops it before returning, on success or failure.

#![allow(clippy::result_large_err)]

use crate::db;
use crate::errors::{student_error, Result};
use crate::migrations::apply_migrations;
use crate::repo::{hydration, SqliteRepo};
use resultslip_core::{DatabaseConfig, ExError, ExErrorKind, StudentRecord};

#[derive(Debug, Clone)]
pub struct ResultStore {
    config: DatabaseConfig,
}

impl ResultStore {
    /// Create the gateway and bring the schema up to date
    ///
    /// Missing parent directories of `database.path` are created.
    ///
    /// # Errors
    /// * `Config` - the database path is empty
    /// * `Storage` - the database cannot be opened or a migration fails
    pub fn open(config: &DatabaseConfig) -> Result<Self> {
        if config.path.as_os_str().is_empty() {
            return Err(ExError::new(ExErrorKind::Config)
                .with_op("open_store")
                .with_message("database.path must not be empty"));
        }

        if let Some(parent) = config.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                ExError::new(ExErrorKind::Storage)
                    .with_op("open_store")
                    .with_message(format!("cannot create {}: {}", parent.display(), e))
            })?;
        }

        let mut conn = db::connect(config)?;
        apply_migrations(&mut conn)?;
        tracing::debug!(path = %config.path.display(), "result store ready");

        Ok(Self {
            config: config.clone(),
        })
    }

    pub fn config(&self) -> &DatabaseConfig {
        &self.config
    }

    /// Upsert the student and every mark in one transaction
    ///
    /// Either the student row and all mark rows are written, or none are.
    ///
    /// # Errors
    /// * `Storage` - connection, constraint or commit failure
    pub fn save(&self, record: &StudentRecord) -> Result<()> {
        let mut conn = db::connect(&self.config)?;
        let tx = conn
            .transaction()
            .map_err(|e| student_error("save", &record.student_id, e))?;

        SqliteRepo::persist_record_tx(&tx, record)?;

        tx.commit()
            .map_err(|e| student_error("save", &record.student_id, e))?;

        tracing::debug!(
            student_id = %record.student_id,
            mark_count = record.marks.len(),
            "student saved"
        );
        Ok(())
    }

    /// Load a student with all marks; `Ok(None)` if the id is unknown
    ///
    /// # Errors
    /// * `Storage` - connection or query failure
    pub fn load(&self, student_id: &str) -> Result<Option<StudentRecord>> {
        let conn = db::connect(&self.config)?;
        hydration::load_student(&conn, student_id)
    }
}
