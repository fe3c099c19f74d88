pub mod client;
pub mod database;
pub mod weight;

use anyhow::Result;
use petlog::{PetlogConfig, PetlogDatabase};

/// Connect to the configured store and make sure the schema exists.
///
/// Schema initialization is idempotent, so running it on every command
/// keeps first use friction-free.
pub(crate) fn open_database(config: &PetlogConfig) -> Result<PetlogDatabase> {
    let mut db = PetlogDatabase::new(config);
    db.connect()?;
    db.schema()?.initialize_tables()?;
    Ok(db)
}
