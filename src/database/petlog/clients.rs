//! Client repository
//!
//! Data access for tracked pets ("clients"). Each insert draws a fresh id
//! from the animal sequence; listings are ordered by id so repeated calls
//! return rows deterministically.

use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::database::core::Sequence;
use crate::error::{classify_store_error, PetlogError, Result};

/// Species of a tracked pet, stored as an integer code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Species {
    Dog,
    Cat,
}

impl Species {
    /// The integer code persisted in the species column
    pub fn code(&self) -> i64 {
        match self {
            Species::Dog => 0,
            Species::Cat => 1,
        }
    }

    /// Decode a stored species code.
    ///
    /// Unknown codes are an error, never silently mapped to a default.
    pub fn from_code(code: i64) -> Result<Species> {
        match code {
            0 => Ok(Species::Dog),
            1 => Ok(Species::Cat),
            other => Err(PetlogError::UnknownSpeciesCode(other)),
        }
    }
}

impl std::fmt::Display for Species {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Species::Dog => write!(f, "dog"),
            Species::Cat => write!(f, "cat"),
        }
    }
}

impl std::str::FromStr for Species {
    type Err = PetlogError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "dog" => Ok(Species::Dog),
            "cat" => Ok(Species::Cat),
            other => Err(PetlogError::Config(format!(
                "unknown species '{other}', expected 'dog' or 'cat'"
            ))),
        }
    }
}

/// A client value to be inserted
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Client {
    pub name: String,
    pub species: Species,
    pub breed: String,
}

impl Client {
    pub fn new(name: impl Into<String>, species: Species, breed: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            species,
            breed: breed.into(),
        }
    }
}

/// A persisted client row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClientRecord {
    pub animal_id: i64,
    pub name: String,
    pub species: Species,
    pub breed: String,
}

/// Repository for client rows
pub struct ClientRepository<'a> {
    conn: &'a Connection,
}

impl<'a> ClientRepository<'a> {
    /// Create a new client repository
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Insert a new client, returning its assigned animal id.
    ///
    /// The sequence draw and the insert run in one transaction so a failed
    /// insert does not leave a half-applied row. Duplicate names are
    /// permitted; constraint failures (empty or oversized name/breed)
    /// surface as [`PetlogError::ConstraintViolation`].
    pub fn add(&self, client: &Client) -> Result<i64> {
        let tx = self.conn.unchecked_transaction()?;
        let animal_id = Sequence::Animal.next_value(&tx)?;

        tx.execute(
            "INSERT INTO client (animal_id, name, species, breed) VALUES (?1, ?2, ?3, ?4)",
            rusqlite::params![animal_id, client.name, client.species.code(), client.breed],
        )
        .map_err(classify_store_error)?;
        tx.commit()?;

        debug!(animal_id, name = %client.name, "added client");
        Ok(animal_id)
    }

    /// List all persisted clients, ordered by animal id.
    ///
    /// Species codes are decoded strictly: a row holding an unknown code
    /// fails the whole call with [`PetlogError::UnknownSpeciesCode`].
    pub fn list(&self) -> Result<Vec<ClientRecord>> {
        let mut stmt = self
            .conn
            .prepare("SELECT animal_id, name, species, breed FROM client ORDER BY animal_id")?;

        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, i64>(2)?,
                row.get::<_, String>(3)?,
            ))
        })?;

        let mut clients = Vec::new();
        for row in rows {
            let (animal_id, name, code, breed) = row?;
            clients.push(ClientRecord {
                animal_id,
                name,
                species: Species::from_code(code)?,
                breed,
            });
        }
        Ok(clients)
    }

    /// Look up a single client by animal id
    pub fn get(&self, animal_id: i64) -> Result<Option<ClientRecord>> {
        let result = self.conn.query_row(
            "SELECT animal_id, name, species, breed FROM client WHERE animal_id = ?1",
            [animal_id],
            |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, i64>(2)?,
                    row.get::<_, String>(3)?,
                ))
            },
        );

        match result {
            Ok((animal_id, name, code, breed)) => Ok(Some(ClientRecord {
                animal_id,
                name,
                species: Species::from_code(code)?,
                breed,
            })),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Get the number of persisted clients
    pub fn count(&self) -> Result<u64> {
        let count: u64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM client", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Check if the client table is empty
    pub fn is_empty(&self) -> bool {
        self.count().map(|c| c == 0).unwrap_or(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::core::{DatabaseConn, SchemaManager};

    fn setup_test_db() -> DatabaseConn {
        let db = DatabaseConn::open_in_memory().unwrap();
        SchemaManager::new(&db.conn).initialize_tables().unwrap();
        db
    }

    #[test]
    fn test_add_and_list() {
        let db = setup_test_db();
        let repo = ClientRepository::new(&db.conn);
        assert!(repo.is_empty());

        let smokey = Client::new("Smokey", Species::Dog, "Cairn Terrier");
        let ether = Client::new("Ether", Species::Cat, "Tuxedo Cat");
        let id1 = repo.add(&smokey).unwrap();
        let id2 = repo.add(&ether).unwrap();
        assert_eq!(id1, 1);
        assert_eq!(id2, 2);

        let clients = repo.list().unwrap();
        assert_eq!(clients.len(), 2);
        assert_eq!(clients[0].name, "Smokey");
        assert_eq!(clients[0].species, Species::Dog);
        assert_eq!(clients[0].breed, "Cairn Terrier");
        assert_eq!(clients[1].name, "Ether");
        assert_eq!(clients[1].species, Species::Cat);
        assert_eq!(clients[1].breed, "Tuxedo Cat");
    }

    #[test]
    fn test_list_preserves_insertion_order() {
        let db = setup_test_db();
        let repo = ClientRepository::new(&db.conn);

        let to_add = [
            Client::new("Smokey", Species::Dog, "Cairn Terrier"),
            Client::new("Maui", Species::Dog, "Shih Tzu"),
            Client::new("Ether", Species::Cat, "Tuxedo Cat"),
            Client::new("Zena", Species::Dog, "Blue Heeler"),
            Client::new("Spookers", Species::Cat, "Japanese Bob Tail"),
            Client::new("Tuna", Species::Cat, "Norwegian Forest Cat"),
        ];
        for client in &to_add {
            repo.add(client).unwrap();
        }

        let listed = repo.list().unwrap();
        assert_eq!(listed.len(), to_add.len());
        for (found, added) in listed.iter().zip(to_add.iter()) {
            assert_eq!(found.name, added.name);
            assert_eq!(found.species, added.species);
            assert_eq!(found.breed, added.breed);
        }
    }

    #[test]
    fn test_duplicate_names_permitted() {
        let db = setup_test_db();
        let repo = ClientRepository::new(&db.conn);

        let client = Client::new("Smokey", Species::Dog, "Cairn Terrier");
        repo.add(&client).unwrap();
        repo.add(&client).unwrap();

        assert_eq!(repo.count().unwrap(), 2);
    }

    #[test]
    fn test_get() {
        let db = setup_test_db();
        let repo = ClientRepository::new(&db.conn);

        let id = repo
            .add(&Client::new("Zena", Species::Dog, "Blue Heeler"))
            .unwrap();

        let found = repo.get(id).unwrap().unwrap();
        assert_eq!(found.name, "Zena");
        assert!(repo.get(999).unwrap().is_none());
    }

    #[test]
    fn test_empty_name_rejected() {
        let db = setup_test_db();
        let repo = ClientRepository::new(&db.conn);

        let result = repo.add(&Client::new("", Species::Cat, "Tuxedo Cat"));
        assert!(matches!(result, Err(PetlogError::ConstraintViolation(_))));
        assert!(repo.is_empty());
    }

    #[test]
    fn test_oversized_breed_rejected() {
        let db = setup_test_db();
        let repo = ClientRepository::new(&db.conn);

        let breed = "x".repeat(31);
        let result = repo.add(&Client::new("Tuna", Species::Cat, breed));
        assert!(matches!(result, Err(PetlogError::ConstraintViolation(_))));
    }

    #[test]
    fn test_unknown_species_code_rejected() {
        let db = setup_test_db();

        // Bypass the repository to plant a bad code
        db.conn
            .execute(
                "INSERT INTO client (animal_id, name, species, breed) VALUES (1, 'Rex', 7, 'Iguana')",
                [],
            )
            .unwrap();

        let repo = ClientRepository::new(&db.conn);
        assert!(matches!(
            repo.list(),
            Err(PetlogError::UnknownSpeciesCode(7))
        ));
    }

    #[test]
    fn test_species_round_trip() {
        assert_eq!(Species::from_code(0).unwrap(), Species::Dog);
        assert_eq!(Species::from_code(1).unwrap(), Species::Cat);
        assert_eq!(Species::Dog.code(), 0);
        assert_eq!(Species::Cat.code(), 1);
        assert!(matches!(
            Species::from_code(2),
            Err(PetlogError::UnknownSpeciesCode(2))
        ));
    }

    #[test]
    fn test_species_from_str() {
        assert_eq!("dog".parse::<Species>().unwrap(), Species::Dog);
        assert_eq!("CAT".parse::<Species>().unwrap(), Species::Cat);
        assert!("bird".parse::<Species>().is_err());
    }
}
