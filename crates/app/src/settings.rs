//! Application settings, read from `settings.toml` with environment
//! variable overrides (`EXPENSED_SERVER__DATABASE=...`).

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct App {
    pub level: String,
    pub environment: String,
}

#[derive(Debug, Deserialize)]
pub struct Server {
    pub bind: Option<String>,
    pub port: u16,
    /// Connection URL; PostgreSQL in production, any sea-orm backend
    /// works for local runs.
    pub database: String,
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub app: App,
    pub server: Server,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("settings"))
            .add_source(Environment::with_prefix("EXPENSED").separator("__"))
            .build()?;

        settings.try_deserialize()
    }
}
