//! Error types for petlog
//!
//! Every failure surfaces to the immediate caller; nothing is retried or
//! swallowed. Idempotent operations (`connect`, `close`, `initialize_tables`)
//! treat "already in the desired state" as success, not as a suppressed error.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T, E = PetlogError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum PetlogError {
    /// The credential source could not be found. Distinct from any
    /// store-level connection failure.
    #[error("credentials not found at {}", .0.display())]
    CredentialsNotFound(PathBuf),

    /// The credential source exists but does not hold the expected
    /// user and password lines.
    #[error("credentials file {} is malformed: expected user and password lines", .0.display())]
    CredentialsMalformed(PathBuf),

    /// The store could not be opened or prepared for statement execution.
    #[error("failed to connect to '{target}': {source}")]
    ConnectionFailure {
        target: String,
        #[source]
        source: rusqlite::Error,
    },

    /// An operation that needs an open connection was called before
    /// `connect()`.
    #[error("not connected; call connect() first")]
    NotConnected,

    /// A DDL statement failed. Remaining statements of the same
    /// initialize/reset call are not attempted.
    #[error("schema statement failed: {0}")]
    Schema(#[source] rusqlite::Error),

    /// An insert violated a referential, check, or type constraint.
    #[error("constraint violation: {0}")]
    ConstraintViolation(#[source] rusqlite::Error),

    /// A stored species code does not match any known variant.
    #[error("unknown species code {0}")]
    UnknownSpeciesCode(i64),

    #[error("store error: {0}")]
    Store(#[from] rusqlite::Error),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Map a raw store error to the crate taxonomy, pulling constraint
/// failures out into their own variant.
pub(crate) fn classify_store_error(e: rusqlite::Error) -> PetlogError {
    match &e {
        rusqlite::Error::SqliteFailure(err, _)
            if err.code == rusqlite::ErrorCode::ConstraintViolation =>
        {
            PetlogError::ConstraintViolation(e)
        }
        _ => PetlogError::Store(e),
    }
}
