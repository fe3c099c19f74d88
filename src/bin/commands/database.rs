use std::io::{self, Write};
use std::path::Path;

use anyhow::Result;
use clap::{Args, Subcommand};
use petlog::{PetlogConfig, PetlogDatabase};

/// Arguments for the Db command
#[derive(Args)]
pub struct DbArgs {
    #[clap(subcommand)]
    pub command: Option<DbCommands>,
}

/// Database subcommands
#[derive(Subcommand)]
pub enum DbCommands {
    /// Create tables and identity sequences if absent
    Init,

    /// Drop all tables and sequences, discarding all data
    Reset {
        /// Skip confirmation prompt
        #[clap(long, short = 'y')]
        yes: bool,
    },

    /// Show store status (default when no subcommand)
    Status,
}

pub fn run(config: &PetlogConfig, args: DbArgs) -> Result<()> {
    match args.command {
        None | Some(DbCommands::Status) => run_status(config),
        Some(DbCommands::Init) => run_init(config),
        Some(DbCommands::Reset { yes }) => run_reset(config, yes),
    }
}

fn run_init(config: &PetlogConfig) -> Result<()> {
    let mut db = super::open_database(config)?;
    db.close()?;
    println!("Database initialized at {}", config.sqlite_path());
    Ok(())
}

fn run_status(config: &PetlogConfig) -> Result<()> {
    let path = config.sqlite_path();
    let exists = Path::new(&path).exists();

    println!("Store Path:     {path}");
    println!("Store Exists:   {exists}");

    if !exists {
        return Ok(());
    }

    let mut db = PetlogDatabase::new(config);
    db.connect()?;
    let initialized = db.schema()?.is_initialized()?;
    println!(
        "Schema:         {}",
        if initialized {
            "initialized"
        } else {
            "not initialized"
        }
    );
    if initialized {
        println!("Clients:        {}", db.clients()?.count()?);
        println!("Weigh-ins:      {}", db.weights()?.count()?);
    }
    db.close()?;
    Ok(())
}

fn run_reset(config: &PetlogConfig, yes: bool) -> Result<()> {
    if !yes {
        print!("This discards all clients and weigh-ins. Type 'yes' to continue: ");
        io::stdout().flush()?;
        let mut line = String::new();
        io::stdin().read_line(&mut line)?;
        if line.trim() != "yes" {
            println!("Reset aborted.");
            return Ok(());
        }
    }

    let mut db = PetlogDatabase::new(config);
    db.connect()?;
    db.schema()?.reset()?;
    db.close()?;
    println!("Database reset.");
    Ok(())
}
