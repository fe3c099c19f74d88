//! Core database infrastructure
//!
//! - **connection**: SQLite connection wrapper
//! - **schema**: table and identity sequence definitions and management

pub mod connection;
pub mod schema;

pub use connection::DatabaseConn;
pub use schema::{SchemaDefinitions, SchemaManager, Sequence, TBL_CLIENT, TBL_WEIGHT};
