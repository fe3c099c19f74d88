use std::collections::HashMap;
use std::path::{Path, PathBuf};

use config::Config;

use crate::error::{PetlogError, Result};

/// Runtime configuration for petlog.
pub struct PetlogConfig {
    /// Directory holding the database file and credentials
    pub data_dir: String,

    /// Database name; the store file becomes `{data_dir}/{database}.sqlite3`
    pub database: String,

    /// Path to the two-line credentials file (user, then password)
    pub credentials_file: String,
}

const EMPTY_CONFIG: &str = r#"### petlog configuration file

### directory holding the database file and credentials
# data_dir = "~/.petlog"

### database name; the store file becomes {data_dir}/{database}.sqlite3
# database = "petlog"

### path to the two-line credentials file (user, then password)
# credentials_file = "~/.petlog/credentials"
"#;

impl Default for PetlogConfig {
    fn default() -> Self {
        let home_dir = dirs::home_dir()
            .map(|h| h.to_string_lossy().to_string())
            .unwrap_or_else(|| ".".to_string());
        let data_dir = format!("{home_dir}/.petlog");

        Self {
            credentials_file: format!("{data_dir}/credentials"),
            database: "petlog".to_string(),
            data_dir,
        }
    }
}

impl PetlogConfig {
    /// Create and initialize a new configuration.
    ///
    /// Reads `{path}` if given, otherwise `$HOME/.petlog/petlog.toml`,
    /// writing a commented template if the file does not exist yet.
    /// Environment variables prefixed with `PETLOG` override file values.
    pub fn new(path: &Option<String>) -> Result<PetlogConfig> {
        let mut builder = Config::builder();

        let home_dir = dirs::home_dir()
            .ok_or_else(|| PetlogError::Config("could not find home directory".to_string()))?
            .to_string_lossy()
            .to_string();
        let petlog_dir = format!("{home_dir}/.petlog");

        match path {
            Some(p) => {
                if Path::new(p.as_str()).exists() {
                    builder = builder.add_source(config::File::with_name(p.as_str()));
                } else {
                    std::fs::write(p.as_str(), EMPTY_CONFIG).map_err(|e| {
                        PetlogError::Config(format!("unable to create config file {p}: {e}"))
                    })?;
                }
            }
            None => {
                std::fs::create_dir_all(petlog_dir.as_str()).map_err(|e| {
                    PetlogError::Config(format!("unable to create petlog directory: {e}"))
                })?;
                let p = format!("{petlog_dir}/petlog.toml");
                if Path::new(p.as_str()).exists() {
                    builder = builder.add_source(config::File::with_name(p.as_str()));
                } else {
                    std::fs::write(p.as_str(), EMPTY_CONFIG).map_err(|e| {
                        PetlogError::Config(format!("unable to create config file {p}: {e}"))
                    })?;
                }
            }
        }

        // Settings from the environment, e.g. `PETLOG_DATA_DIR=/var/lib/petlog`
        builder = builder.add_source(config::Environment::with_prefix("PETLOG"));

        let settings = builder
            .build()
            .map_err(|e| PetlogError::Config(format!("failed to build configuration: {e}")))?;
        let values = settings
            .try_deserialize::<HashMap<String, String>>()
            .map_err(|e| PetlogError::Config(format!("failed to deserialize configuration: {e}")))?;

        let defaults = PetlogConfig::default();

        let data_dir = match values.get("data_dir") {
            Some(dir) => dir.trim_end_matches('/').to_string(),
            None => defaults.data_dir,
        };

        // The store file name is derived from the database name; keep it
        // lowercase so the same name always maps to the same file.
        let database = values
            .get("database")
            .map(|name| name.to_lowercase())
            .unwrap_or(defaults.database);

        let credentials_file = values
            .get("credentials_file")
            .cloned()
            .unwrap_or_else(|| format!("{data_dir}/credentials"));

        Ok(PetlogConfig {
            data_dir,
            database,
            credentials_file,
        })
    }

    /// Get the path to the SQLite database file
    pub fn sqlite_path(&self) -> String {
        let data_dir = self.data_dir.trim_end_matches('/');
        format!("{}/{}.sqlite3", data_dir, self.database)
    }

    /// Get the credentials file location
    pub fn credentials_path(&self) -> PathBuf {
        PathBuf::from(&self.credentials_file)
    }

    /// Display configuration summary
    pub fn summary(&self) -> String {
        let lines = [
            format!("Data Directory:     {}", self.data_dir),
            format!("Database Name:      {}", self.database),
            format!("SQLite Path:        {}", self.sqlite_path()),
            format!("Credentials File:   {}", self.credentials_file),
        ];
        lines.join("\n")
    }

    /// Get the default config file path
    pub fn config_file_path() -> String {
        let home_dir = dirs::home_dir()
            .map(|h| h.to_string_lossy().to_string())
            .unwrap_or_else(|| "~".to_string());
        format!("{home_dir}/.petlog/petlog.toml")
    }
}
