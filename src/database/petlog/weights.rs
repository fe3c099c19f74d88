//! Weight record repository
//!
//! Data access for weigh-in events. Each record references an existing
//! client; records are immutable and only disappear on a schema reset.

use chrono::NaiveDate;
use rusqlite::Connection;
use serde::Serialize;
use tracing::debug;

use crate::database::core::Sequence;
use crate::error::{classify_store_error, Result};

/// A persisted weigh-in row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeightRecord {
    pub record_id: i64,
    pub animal_id: i64,
    pub date: NaiveDate,
    pub weight: f64,
}

/// Repository for weigh-in rows
pub struct WeightRepository<'a> {
    conn: &'a Connection,
}

impl<'a> WeightRepository<'a> {
    /// Create a new weight repository
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Record a weigh-in for a client, returning the assigned record id.
    ///
    /// The referenced `animal_id` must exist; a missing client surfaces as
    /// [`crate::PetlogError::ConstraintViolation`].
    pub fn add(&self, animal_id: i64, date: NaiveDate, weight: f64) -> Result<i64> {
        let tx = self.conn.unchecked_transaction()?;
        let record_id = Sequence::Record.next_value(&tx)?;

        tx.execute(
            "INSERT INTO weight (record_id, animal_id, date, weight) VALUES (?1, ?2, ?3, ?4)",
            rusqlite::params![record_id, animal_id, date, weight],
        )
        .map_err(classify_store_error)?;
        tx.commit()?;

        debug!(record_id, animal_id, %date, weight, "added weight record");
        Ok(record_id)
    }

    /// List all weigh-ins for one client, ordered by record id
    pub fn list_for(&self, animal_id: i64) -> Result<Vec<WeightRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT record_id, animal_id, date, weight
             FROM weight
             WHERE animal_id = ?1
             ORDER BY record_id",
        )?;

        let rows = stmt.query_map([animal_id], |row| {
            Ok(WeightRecord {
                record_id: row.get(0)?,
                animal_id: row.get(1)?,
                date: row.get(2)?,
                weight: row.get(3)?,
            })
        })?;

        let mut records = Vec::new();
        for row in rows {
            records.push(row?);
        }
        Ok(records)
    }

    /// Get the total number of weigh-in rows
    pub fn count(&self) -> Result<u64> {
        let count: u64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM weight", [], |row| row.get(0))?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::core::{DatabaseConn, SchemaManager};
    use crate::database::petlog::{Client, ClientRepository, Species};
    use crate::error::PetlogError;

    fn setup_test_db() -> (DatabaseConn, i64) {
        let db = DatabaseConn::open_in_memory().unwrap();
        SchemaManager::new(&db.conn).initialize_tables().unwrap();
        let animal_id = ClientRepository::new(&db.conn)
            .add(&Client::new("Smokey", Species::Dog, "Cairn Terrier"))
            .unwrap();
        (db, animal_id)
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_add_and_list() {
        let (db, animal_id) = setup_test_db();
        let repo = WeightRepository::new(&db.conn);

        let id1 = repo.add(animal_id, date("2021-01-02"), 8.4).unwrap();
        let id2 = repo.add(animal_id, date("2021-02-02"), 8.9).unwrap();
        assert_eq!(id1, 1);
        assert_eq!(id2, 2);

        let records = repo.list_for(animal_id).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].record_id, 1);
        assert_eq!(records[0].date, date("2021-01-02"));
        assert_eq!(records[0].weight, 8.4);
        assert_eq!(records[1].weight, 8.9);
    }

    #[test]
    fn test_list_is_scoped_to_one_client() {
        let (db, animal_id) = setup_test_db();
        let other_id = ClientRepository::new(&db.conn)
            .add(&Client::new("Ether", Species::Cat, "Tuxedo Cat"))
            .unwrap();

        let repo = WeightRepository::new(&db.conn);
        repo.add(animal_id, date("2021-01-02"), 8.4).unwrap();
        repo.add(other_id, date("2021-01-03"), 4.1).unwrap();

        let records = repo.list_for(other_id).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].animal_id, other_id);
        assert_eq!(repo.count().unwrap(), 2);
    }

    #[test]
    fn test_missing_client_rejected() {
        let (db, _) = setup_test_db();
        let repo = WeightRepository::new(&db.conn);

        let result = repo.add(999, date("2021-01-02"), 8.4);
        assert!(matches!(result, Err(PetlogError::ConstraintViolation(_))));
        assert_eq!(repo.count().unwrap(), 0);
    }

    #[test]
    fn test_records_survive_until_reset() {
        let (db, animal_id) = setup_test_db();
        let repo = WeightRepository::new(&db.conn);
        repo.add(animal_id, date("2021-01-02"), 8.4).unwrap();

        let manager = SchemaManager::new(&db.conn);
        manager.reset().unwrap();
        manager.initialize_tables().unwrap();

        assert_eq!(WeightRepository::new(&db.conn).count().unwrap(), 0);
    }
}
