#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

//! Petlog - a pet weight tracking utility
//!
//! Petlog keeps a small relational registry of pets ("clients") and their
//! dated weigh-ins in an embedded SQLite store. It can be used as a
//! library or through the bundled `petlog` CLI.
//!
//! # Architecture
//!
//! - **[`database`]**: connection lifecycle, schema management, and the
//!   client/weight repositories
//! - **[`credentials`]**: the two-line credential source consumed at
//!   connect time
//! - **[`config`]**: configuration file and environment overrides
//! - **[`error`]**: the crate error taxonomy
//!
//! # Quick start
//!
//! ```rust,ignore
//! use petlog::{PetlogConfig, PetlogDatabase};
//! use petlog::database::{Client, Species};
//!
//! let config = PetlogConfig::new(&None)?;
//! let mut db = PetlogDatabase::new(&config);
//! db.connect()?;
//! db.schema()?.initialize_tables()?;
//!
//! db.clients()?.add(&Client::new("Ether", Species::Cat, "Tuxedo Cat"))?;
//! let clients = db.clients()?.list()?;
//! db.close()?;
//! ```

pub mod config;
pub mod credentials;
pub mod database;
pub mod error;

pub use config::PetlogConfig;
pub use credentials::Credentials;
pub use database::{
    Client, ClientRecord, ClientRepository, ConnectStatus, PetlogDatabase, SchemaManager,
    Sequence, Species, WeightRecord, WeightRepository,
};
pub use error::{PetlogError, Result};
