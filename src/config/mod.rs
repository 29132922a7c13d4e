use anyhow::{Context, Result};
use dotenvy::dotenv;
use serde::Deserialize;

fn default_bind_address() -> String {
    "127.0.0.1:3000".to_string()
}

/// Configuration for the application
#[derive(Debug, Deserialize)]
pub struct Config {
    /// Database connection URL. Optional so the server can run on the in-memory store.
    pub database_url: Option<String>,

    /// Address the HTTP server listens on
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// This function will:
    /// 1. Load variables from .env file if it exists
    /// 2. Deserialize environment variables into Config struct
    pub fn load() -> Result<Self> {
        dotenv().ok();

        let config = envy::from_env::<Config>().context("invalid environment configuration")?;

        Ok(config)
    }

    /// Get the database URL, failing if none is configured
    pub fn database_url(&self) -> Result<&str> {
        self.database_url
            .as_deref()
            .context("DATABASE_URL must be set unless the server runs with --in-memory")
    }
}

/// Initialize environment variables and load configuration
pub fn init() -> Result<Config> {
    Config::load()
}
