use anyhow::Result;
use clap::{Parser, Subcommand};
use petlog::PetlogConfig;
use tracing::Level;

mod commands;
use commands::{client, database, weight};

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
#[clap(propagate_version = true)]
struct Cli {
    /// configuration file path, by default $HOME/.petlog/petlog.toml is used
    #[clap(short, long)]
    config: Option<String>,

    /// Print debug information
    #[clap(long)]
    debug: bool,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize, reset, or inspect the database
    Db(database::DbArgs),

    /// Register and list tracked pets
    Client(client::ClientArgs),

    /// Record and list weigh-ins
    Weight(weight::WeightArgs),

    /// Show the effective configuration
    Config,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    if cli.debug {
        tracing_subscriber::fmt().with_max_level(Level::DEBUG).init();
    }

    let config = PetlogConfig::new(&cli.config)?;

    match cli.command {
        Commands::Db(args) => database::run(&config, args),
        Commands::Client(args) => client::run(&config, args),
        Commands::Weight(args) => weight::run(&config, args),
        Commands::Config => {
            println!("{}", config.summary());
            println!("Config File:        {}", PetlogConfig::config_file_path());
            Ok(())
        }
    }
}
