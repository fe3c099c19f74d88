use anyhow::{anyhow, Result};
use chrono::{Local, NaiveDate};
use clap::{Args, Subcommand};
use petlog::{PetlogConfig, WeightRecord};
use tabled::settings::Style;
use tabled::{Table, Tabled};

/// Arguments for the Weight command
#[derive(Args)]
pub struct WeightArgs {
    #[clap(subcommand)]
    pub command: WeightCommands,
}

/// Weight subcommands
#[derive(Subcommand)]
pub enum WeightCommands {
    /// Record a weigh-in for a pet
    Add {
        /// Animal id of the pet being weighed
        animal_id: i64,

        /// Measured weight
        weight: f64,

        /// Date of the weigh-in (YYYY-MM-DD), defaults to today
        #[clap(short, long)]
        date: Option<NaiveDate>,
    },

    /// List all weigh-ins for a pet
    List {
        /// Animal id of the pet
        animal_id: i64,

        /// Output as JSON instead of a table
        #[clap(long)]
        json: bool,
    },
}

#[derive(Tabled)]
struct WeightRow {
    #[tabled(rename = "Record")]
    record_id: i64,
    #[tabled(rename = "Date")]
    date: NaiveDate,
    #[tabled(rename = "Weight")]
    weight: f64,
}

impl From<&WeightRecord> for WeightRow {
    fn from(record: &WeightRecord) -> Self {
        Self {
            record_id: record.record_id,
            date: record.date,
            weight: record.weight,
        }
    }
}

pub fn run(config: &PetlogConfig, args: WeightArgs) -> Result<()> {
    let mut db = super::open_database(config)?;

    let result = match args.command {
        WeightCommands::Add {
            animal_id,
            weight,
            date,
        } => {
            if weight <= 0.0 {
                db.close()?;
                return Err(anyhow!("weight must be greater than zero"));
            }
            let date = date.unwrap_or_else(|| Local::now().date_naive());
            let record_id = db.weights()?.add(animal_id, date, weight)?;
            println!("Recorded weigh-in {record_id} for animal {animal_id} on {date}");
            Ok(())
        }
        WeightCommands::List { animal_id, json } => {
            let records = db.weights()?.list_for(animal_id)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&records)?);
            } else if records.is_empty() {
                println!("No weigh-ins recorded for animal {animal_id}.");
            } else {
                let rows: Vec<WeightRow> = records.iter().map(WeightRow::from).collect();
                println!("{}", Table::new(rows).with(Style::rounded()));
            }
            Ok(())
        }
    };

    db.close()?;
    result
}
