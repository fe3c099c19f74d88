//! Database module
//!
//! All persistence for petlog, organized into:
//!
//! - **core**: connection wrapper, schema and identity sequence management
//! - **petlog**: the petlog database facade and its repositories
//!
//! ```text
//! database/
//! ├── core/           # Foundation
//! │   ├── connection  # SQLite DatabaseConn wrapper
//! │   └── schema      # tables, sequences, SchemaManager
//! │
//! └── petlog/         # Persistent storage
//!     ├── clients     # tracked pets (insert / list)
//!     └── weights     # dated weigh-in records (insert / list)
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use petlog::database::{ConnectStatus, PetlogDatabase};
//!
//! let mut db = PetlogDatabase::new(&config);
//! db.connect()?;
//! db.schema()?.initialize_tables()?;
//!
//! db.clients()?.add(&Client::new("Smokey", Species::Dog, "Cairn Terrier"))?;
//! for client in db.clients()?.list()? {
//!     println!("{} ({} {})", client.name, client.breed, client.species);
//! }
//! db.close()?;
//! ```

pub mod core;
pub mod petlog;

pub use core::{DatabaseConn, SchemaDefinitions, SchemaManager, Sequence, TBL_CLIENT, TBL_WEIGHT};

pub use petlog::{
    Client, ClientRecord, ClientRepository, ConnectStatus, PetlogDatabase, Species, WeightRecord,
    WeightRepository,
};
