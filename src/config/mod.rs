use std::path::PathBuf;

use anyhow::Result;
use dotenvy::dotenv;
use serde::Deserialize;

use crate::error::ConfigError;
use crate::models::ClientRoster;

/// Prefix of every environment variable the app reads
const ENV_PREFIX: &str = "INVOICE_FORM_";

/// Configuration for the application
#[derive(Debug, Deserialize)]
pub struct Config {
    /// Client names offered by the form, comma separated in the environment
    #[serde(default = "default_clients")]
    pub clients: Vec<String>,
    /// File that receives log output; logging is off when unset
    #[serde(default)]
    pub log_file: Option<PathBuf>,
}

fn default_clients() -> Vec<String> {
    ClientRoster::default().names().to_vec()
}

impl Config {
    /// Load configuration from `INVOICE_FORM_*` environment variables
    ///
    /// This function will:
    /// 1. Load variables from .env file if it exists
    /// 2. Deserialize prefixed environment variables into Config struct
    pub fn load() -> Result<Self> {
        dotenv().ok();

        let config = envy::prefixed(ENV_PREFIX).from_env::<Config>()?;

        Ok(config)
    }

    /// Replace values given on the command line
    pub fn with_overrides(mut self, clients: Option<Vec<String>>, log_file: Option<PathBuf>) -> Self {
        if let Some(clients) = clients {
            self.clients = clients;
        }
        if log_file.is_some() {
            self.log_file = log_file;
        }
        self
    }

    /// Build the client roster, dropping blank and repeated names
    pub fn roster(&self) -> Result<ClientRoster, ConfigError> {
        let mut names: Vec<String> = Vec::new();
        for name in self.clients.iter().map(|n| n.trim()) {
            if !name.is_empty() && !names.iter().any(|n| n == name) {
                names.push(name.to_string());
            }
        }

        if names.is_empty() {
            return Err(ConfigError::EmptyRoster);
        }

        Ok(ClientRoster::new(names))
    }
}

/// Initialize environment variables and load configuration
pub fn init() -> Result<Config> {
    let config = Config::load()?;

    Ok(config)
}
