use anyhow::Result;
use clap::{Args, Subcommand};
use petlog::{Client, ClientRecord, PetlogConfig, Species};
use tabled::settings::Style;
use tabled::{Table, Tabled};

/// Arguments for the Client command
#[derive(Args)]
pub struct ClientArgs {
    #[clap(subcommand)]
    pub command: ClientCommands,
}

/// Client subcommands
#[derive(Subcommand)]
pub enum ClientCommands {
    /// Register a new pet
    Add {
        /// Pet name (up to 30 characters)
        name: String,

        /// Species: dog or cat
        #[clap(short, long)]
        species: Species,

        /// Breed (up to 30 characters)
        #[clap(short, long)]
        breed: String,
    },

    /// List all registered pets
    List {
        /// Output as JSON instead of a table
        #[clap(long)]
        json: bool,
    },
}

#[derive(Tabled)]
struct ClientRow {
    #[tabled(rename = "ID")]
    animal_id: i64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Species")]
    species: String,
    #[tabled(rename = "Breed")]
    breed: String,
}

impl From<&ClientRecord> for ClientRow {
    fn from(record: &ClientRecord) -> Self {
        Self {
            animal_id: record.animal_id,
            name: record.name.clone(),
            species: record.species.to_string(),
            breed: record.breed.clone(),
        }
    }
}

pub fn run(config: &PetlogConfig, args: ClientArgs) -> Result<()> {
    let mut db = super::open_database(config)?;

    let result = match args.command {
        ClientCommands::Add {
            name,
            species,
            breed,
        } => {
            let id = db.clients()?.add(&Client::new(&*name, species, breed))?;
            println!("Added client '{name}' with id {id}");
            Ok(())
        }
        ClientCommands::List { json } => {
            let clients = db.clients()?.list()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&clients)?);
            } else if clients.is_empty() {
                println!("No clients registered.");
            } else {
                let rows: Vec<ClientRow> = clients.iter().map(ClientRow::from).collect();
                println!("{}", Table::new(rows).with(Style::rounded()));
            }
            Ok(())
        }
    };

    db.close()?;
    result
}
