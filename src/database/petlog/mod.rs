//! Petlog database storage
//!
//! This module provides the main persistent database:
//! - client rows (tracked pets)
//! - weight rows (dated weigh-in events)

mod clients;
mod weights;

pub use clients::{Client, ClientRecord, ClientRepository, Species};
pub use weights::{WeightRecord, WeightRepository};

use std::path::{Path, PathBuf};

use rusqlite::Connection;
use tracing::info;

use crate::config::PetlogConfig;
use crate::credentials::Credentials;
use crate::database::core::{DatabaseConn, SchemaManager};
use crate::error::{PetlogError, Result};

/// Outcome of a [`PetlogDatabase::connect`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectStatus {
    /// A new connection was opened
    Opened,
    /// A connection was already open; nothing happened
    AlreadyOpen,
}

/// Main petlog database (SQLite backend)
///
/// `PetlogDatabase` owns at most one store connection and hands out
/// repositories borrowing it. The connection belongs exclusively to this
/// instance: `rusqlite::Connection` is not `Sync`, so concurrent use from
/// multiple threads is rejected at compile time.
pub struct PetlogDatabase {
    database: String,
    store_path: Option<PathBuf>,
    credentials_file: PathBuf,
    db: Option<DatabaseConn>,
}

impl PetlogDatabase {
    /// Create a disconnected manager from the runtime configuration
    pub fn new(config: &PetlogConfig) -> Self {
        Self::with_paths(
            config.database.clone(),
            Some(PathBuf::from(config.sqlite_path())),
            config.credentials_path(),
        )
    }

    /// Create a disconnected manager with explicit paths.
    ///
    /// A `store_path` of `None` targets an in-memory store.
    pub fn with_paths(
        database: impl Into<String>,
        store_path: Option<PathBuf>,
        credentials_file: PathBuf,
    ) -> Self {
        Self {
            database: database.into(),
            store_path,
            credentials_file,
            db: None,
        }
    }

    /// Connect to the store.
    ///
    /// Idempotent: if a connection is already open, returns
    /// [`ConnectStatus::AlreadyOpen`] without reconnecting. On first call
    /// the credential source is resolved before anything is opened, so a
    /// missing or malformed secret ([`PetlogError::CredentialsNotFound`],
    /// [`PetlogError::CredentialsMalformed`]) never leaves a handle behind
    /// and stays distinct from store-level failures
    /// ([`PetlogError::ConnectionFailure`]).
    pub fn connect(&mut self) -> Result<ConnectStatus> {
        if self.db.is_some() {
            info!(database = %self.database, "connection already exists");
            return Ok(ConnectStatus::AlreadyOpen);
        }

        // The embedded store does not authenticate, but a deployment
        // without its secret should fail here, at connect time.
        let credentials = Credentials::load(&self.credentials_file)?;
        info!(database = %self.database, user = %credentials.user, "connecting to store");

        if let Some(parent) = self.store_path.as_deref().and_then(Path::parent) {
            std::fs::create_dir_all(parent)?;
        }

        let db = DatabaseConn::open(self.store_path.as_deref().and_then(Path::to_str))?;
        self.db = Some(db);
        Ok(ConnectStatus::Opened)
    }

    /// Close the store connection.
    ///
    /// Idempotent: closing a never-opened or already-closed manager is a
    /// no-op success.
    pub fn close(&mut self) -> Result<()> {
        match self.db.take() {
            None => {
                info!(database = %self.database, "no connection exists to close");
                Ok(())
            }
            Some(db) => {
                info!(database = %self.database, "closing store connection");
                db.close()
            }
        }
    }

    /// Whether a connection is currently open
    pub fn is_connected(&self) -> bool {
        self.db.is_some()
    }

    /// Get the underlying connection, failing if not connected
    pub fn connection(&self) -> Result<&Connection> {
        self.db
            .as_ref()
            .map(|db| &db.conn)
            .ok_or(PetlogError::NotConnected)
    }

    /// Get a schema manager for the open connection
    pub fn schema(&self) -> Result<SchemaManager<'_>> {
        Ok(SchemaManager::new(self.connection()?))
    }

    /// Get the client repository
    pub fn clients(&self) -> Result<ClientRepository<'_>> {
        Ok(ClientRepository::new(self.connection()?))
    }

    /// Get the weight repository
    pub fn weights(&self) -> Result<WeightRepository<'_>> {
        Ok(WeightRepository::new(self.connection()?))
    }

    /// Create a connected, initialized in-memory database (for testing).
    ///
    /// Bypasses the credential source entirely.
    pub fn open_in_memory() -> Result<Self> {
        let db = DatabaseConn::open_in_memory()?;
        SchemaManager::new(&db.conn).initialize_tables()?;
        Ok(Self {
            database: ":memory:".to_string(),
            store_path: None,
            credentials_file: PathBuf::new(),
            db: Some(db),
        })
    }
}
