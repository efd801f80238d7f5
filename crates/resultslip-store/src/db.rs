//! Database connection management
//!
//! Provides utilities for opening and configuring SQLite connections

#![allow(clippy::result_large_err)]

use crate::errors::{from_rusqlite, Result};
use resultslip_core::DatabaseConfig;
use rusqlite::Connection;
use std::path::Path;
use std::time::Duration;

/// Open and configure a connection for `config`
pub fn connect(config: &DatabaseConfig) -> Result<Connection> {
    let conn = open(&config.path)?;
    configure(&conn, Duration::from_millis(config.busy_timeout_ms))?;
    Ok(conn)
}

/// Open a SQLite database at the given path
pub fn open<P: AsRef<Path>>(path: P) -> Result<Connection> {
    Connection::open(path).map_err(|e| from_rusqlite("open", e))
}

/// Open an in-memory SQLite database (for testing)
pub fn open_in_memory() -> Result<Connection> {
    Connection::open_in_memory().map_err(|e| from_rusqlite("open", e))
}

/// Apply per-connection settings
pub fn configure(conn: &Connection, busy_timeout: Duration) -> Result<()> {
    conn.pragma_update(None, "foreign_keys", "ON")
        .map_err(|e| from_rusqlite("configure", e))?;
    conn.busy_timeout(busy_timeout)
        .map_err(|e| from_rusqlite("configure", e))?;
    Ok(())
}
