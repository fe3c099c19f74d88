//! Database schema management
//!
//! All tables and identity sequences are defined here. Creation is
//! idempotent and a reset drops everything, dependents first.

use rusqlite::Connection;
use tracing::info;

use crate::error::{PetlogError, Result};

/// Table holding one row per tracked pet
pub const TBL_CLIENT: &str = "client";
/// Table holding one row per weigh-in event
pub const TBL_WEIGHT: &str = "weight";

/// Identity sequences for primary key assignment.
///
/// SQLite has no `CREATE SEQUENCE`, so each sequence is a single-row
/// counter table. The counters start at 1, increment by 1, and are only
/// ever reset by dropping the schema; drawn values are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sequence {
    /// Assigns `client.animal_id`
    Animal,
    /// Assigns `weight.record_id`
    Record,
}

impl Sequence {
    pub fn table_name(&self) -> &'static str {
        match self {
            Sequence::Animal => "animal_sequence",
            Sequence::Record => "record_sequence",
        }
    }

    /// Draw the next value from this sequence.
    pub fn next_value(&self, conn: &Connection) -> Result<i64> {
        let sql = format!(
            "UPDATE {} SET value = value + 1 WHERE id = 1 RETURNING value",
            self.table_name()
        );
        Ok(conn.query_row(&sql, [], |row| row.get(0))?)
    }
}

/// Schema definitions for all tables in the database
pub struct SchemaDefinitions;

impl SchemaDefinitions {
    /// SQL for creating the client table
    ///
    /// Name and breed limits mirror the `VARCHAR(30) NOT NULL` columns of
    /// the server-backed schema; SQLite ignores varchar lengths, so the
    /// CHECK constraints carry them instead.
    pub const CLIENT_TABLE: &'static str = r#"
        CREATE TABLE IF NOT EXISTS client (
            animal_id INTEGER PRIMARY KEY,
            name TEXT NOT NULL CHECK (length(name) BETWEEN 1 AND 30),
            species INTEGER NOT NULL,
            breed TEXT NOT NULL CHECK (length(breed) BETWEEN 1 AND 30)
        );
    "#;

    /// SQL for creating the weight table
    pub const WEIGHT_TABLE: &'static str = r#"
        CREATE TABLE IF NOT EXISTS weight (
            record_id INTEGER PRIMARY KEY,
            animal_id INTEGER NOT NULL REFERENCES client (animal_id),
            date TEXT NOT NULL,
            weight REAL NOT NULL
        );
    "#;

    /// SQL for creating weight table indexes
    pub const WEIGHT_INDEXES: &'static [&'static str] =
        &["CREATE INDEX IF NOT EXISTS idx_weight_animal_id ON weight (animal_id)"];

    /// SQL template for creating a sequence counter table
    fn sequence_table(seq: Sequence) -> String {
        format!(
            "CREATE TABLE IF NOT EXISTS {} (
                id INTEGER PRIMARY KEY CHECK (id = 1),
                value INTEGER NOT NULL
            )",
            seq.table_name()
        )
    }

    /// SQL template for seeding a sequence so its first draw returns 1
    fn sequence_seed(seq: Sequence) -> String {
        format!(
            "INSERT OR IGNORE INTO {} (id, value) VALUES (1, 0)",
            seq.table_name()
        )
    }
}

/// Schema manager for the petlog database
///
/// Handles idempotent initialization and irreversible resets.
pub struct SchemaManager<'a> {
    conn: &'a Connection,
}

impl<'a> SchemaManager<'a> {
    /// Create a new schema manager for the given connection
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Initialize the database schema
    ///
    /// Creates the identity sequences, the client and weight tables, and
    /// supporting indexes if they don't exist. Safe to call repeatedly;
    /// existing objects are left untouched. A failed statement aborts the
    /// rest of the call.
    pub fn initialize_tables(&self) -> Result<()> {
        for seq in [Sequence::Animal, Sequence::Record] {
            self.conn
                .execute(&SchemaDefinitions::sequence_table(seq), [])
                .map_err(PetlogError::Schema)?;
            self.conn
                .execute(&SchemaDefinitions::sequence_seed(seq), [])
                .map_err(PetlogError::Schema)?;
            info!(sequence = seq.table_name(), "created identity sequence");
        }

        self.conn
            .execute(SchemaDefinitions::CLIENT_TABLE, [])
            .map_err(PetlogError::Schema)?;
        info!(table = TBL_CLIENT, "created table");

        self.conn
            .execute(SchemaDefinitions::WEIGHT_TABLE, [])
            .map_err(PetlogError::Schema)?;
        info!(table = TBL_WEIGHT, "created table");

        for index_sql in SchemaDefinitions::WEIGHT_INDEXES {
            self.conn
                .execute(index_sql, [])
                .map_err(PetlogError::Schema)?;
        }

        Ok(())
    }

    /// Reset the database by dropping all managed tables and sequences
    ///
    /// Dependent objects go first: SQLite has no `DROP TABLE ... CASCADE`,
    /// so the weight table is dropped before the client table it references.
    /// Absent objects are ignored. Irreversible.
    pub fn reset(&self) -> Result<()> {
        info!("dropping petlog tables and sequences");

        self.conn
            .execute("DROP TABLE IF EXISTS weight", [])
            .map_err(PetlogError::Schema)?;
        self.conn
            .execute("DROP TABLE IF EXISTS client", [])
            .map_err(PetlogError::Schema)?;

        for seq in [Sequence::Animal, Sequence::Record] {
            let sql = format!("DROP TABLE IF EXISTS {}", seq.table_name());
            self.conn
                .execute(&sql, [])
                .map_err(PetlogError::Schema)?;
        }

        Ok(())
    }

    /// Check whether the managed schema is present
    pub fn is_initialized(&self) -> Result<bool> {
        for table in [
            TBL_CLIENT,
            TBL_WEIGHT,
            Sequence::Animal.table_name(),
            Sequence::Record.table_name(),
        ] {
            let count: i64 = self.conn.query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name=?1",
                [table],
                |row| row.get(0),
            )?;
            if count == 0 {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::core::DatabaseConn;

    fn create_test_db() -> DatabaseConn {
        DatabaseConn::open_in_memory().unwrap()
    }

    #[test]
    fn test_initialize() {
        let db = create_test_db();
        let manager = SchemaManager::new(&db.conn);

        assert!(!manager.is_initialized().unwrap());
        manager.initialize_tables().unwrap();
        assert!(manager.is_initialized().unwrap());

        assert!(db.table_exists(TBL_CLIENT).unwrap());
        assert!(db.table_exists(TBL_WEIGHT).unwrap());
    }

    #[test]
    fn test_initialize_is_idempotent() {
        let db = create_test_db();
        let manager = SchemaManager::new(&db.conn);

        manager.initialize_tables().unwrap();
        manager.initialize_tables().unwrap();

        // Exactly one client and one weight table, sequences intact
        assert!(manager.is_initialized().unwrap());
        let tables: i64 = db
            .conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name IN ('client', 'weight')",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(tables, 2);
    }

    #[test]
    fn test_sequences_are_monotonic_and_independent() {
        let db = create_test_db();
        SchemaManager::new(&db.conn).initialize_tables().unwrap();

        assert_eq!(Sequence::Animal.next_value(&db.conn).unwrap(), 1);
        assert_eq!(Sequence::Animal.next_value(&db.conn).unwrap(), 2);
        assert_eq!(Sequence::Animal.next_value(&db.conn).unwrap(), 3);

        // The record sequence advances on its own
        assert_eq!(Sequence::Record.next_value(&db.conn).unwrap(), 1);
        assert_eq!(Sequence::Record.next_value(&db.conn).unwrap(), 2);
    }

    #[test]
    fn test_initialize_does_not_reseed_sequences() {
        let db = create_test_db();
        let manager = SchemaManager::new(&db.conn);

        manager.initialize_tables().unwrap();
        assert_eq!(Sequence::Animal.next_value(&db.conn).unwrap(), 1);

        manager.initialize_tables().unwrap();
        assert_eq!(Sequence::Animal.next_value(&db.conn).unwrap(), 2);
    }

    #[test]
    fn test_reset_restarts_sequences() {
        let db = create_test_db();
        let manager = SchemaManager::new(&db.conn);

        manager.initialize_tables().unwrap();
        Sequence::Animal.next_value(&db.conn).unwrap();
        Sequence::Animal.next_value(&db.conn).unwrap();

        manager.reset().unwrap();
        assert!(!manager.is_initialized().unwrap());

        manager.initialize_tables().unwrap();
        assert_eq!(Sequence::Animal.next_value(&db.conn).unwrap(), 1);
        assert_eq!(Sequence::Record.next_value(&db.conn).unwrap(), 1);
    }

    #[test]
    fn test_reset_on_empty_database() {
        let db = create_test_db();
        let manager = SchemaManager::new(&db.conn);

        // Nothing to drop; still a success
        manager.reset().unwrap();
    }
}
