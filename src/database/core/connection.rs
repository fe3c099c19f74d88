//! Database connection management
//!
//! This module provides the core database connection wrapper used throughout
//! petlog.

use std::time::Duration;

use rusqlite::Connection;
use tracing::debug;

use crate::error::{PetlogError, Result};

/// How long a statement waits on a locked database before giving up.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Core database connection wrapper
///
/// `DatabaseConn` is a thin wrapper around a SQLite connection, handling
/// both file-based and in-memory databases with consistent configuration.
/// The connection is exclusively owned: `rusqlite::Connection` is not
/// `Sync`, so a handle can never be shared across threads.
pub struct DatabaseConn {
    pub conn: Connection,
}

impl DatabaseConn {
    /// Open a database at the specified path
    ///
    /// If the path is `None`, an in-memory database is created. Open and
    /// configuration failures surface as [`PetlogError::ConnectionFailure`].
    pub fn open(path: Option<&str>) -> Result<Self> {
        let target = path.unwrap_or(":memory:").to_string();
        let conn = match path {
            Some(p) => Connection::open(p),
            None => Connection::open_in_memory(),
        }
        .map_err(|e| PetlogError::ConnectionFailure {
            target: target.clone(),
            source: e,
        })?;

        let db = DatabaseConn { conn };
        db.configure(&target)?;
        debug!(target = %target, "opened database connection");
        Ok(db)
    }

    /// Open a database at the specified path (convenience method)
    pub fn open_path(path: &str) -> Result<Self> {
        Self::open(Some(path))
    }

    /// Create an in-memory database
    pub fn open_in_memory() -> Result<Self> {
        Self::open(None)
    }

    /// Prepare the connection for statement execution.
    ///
    /// Foreign key enforcement is off by default in SQLite; the weight
    /// table's referential integrity depends on it being on.
    fn configure(&self, target: &str) -> Result<()> {
        self.conn
            .execute("PRAGMA foreign_keys=ON", [])
            .map_err(|e| PetlogError::ConnectionFailure {
                target: target.to_string(),
                source: e,
            })?;

        self.conn
            .busy_timeout(BUSY_TIMEOUT)
            .map_err(|e| PetlogError::ConnectionFailure {
                target: target.to_string(),
                source: e,
            })?;

        Ok(())
    }

    /// Execute a single SQL statement
    pub fn execute(&self, sql: &str) -> Result<usize> {
        Ok(self.conn.execute(sql, [])?)
    }

    /// Check if a table exists in the database
    pub fn table_exists(&self, table_name: &str) -> Result<bool> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name=?1",
            [table_name],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    /// Release the underlying connection handle.
    ///
    /// Dropping the wrapper would close the handle too, but an explicit
    /// close surfaces any failure instead of discarding it.
    pub fn close(self) -> Result<()> {
        self.conn.close().map_err(|(_conn, e)| PetlogError::from(e))
    }
}
