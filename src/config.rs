use std::path::PathBuf;

use crate::error::AppError;

#[derive(Clone, Default)]
pub struct Config {
    pub discord_token: String,
    pub db_url: String,
    pub db_path: String,
    pub logs_path: PathBuf,
}

impl Config {
    /// Loads configuration from the environment. `DISCORD_TOKEN` is mandatory,
    /// everything else falls back to a local default.
    pub fn load() -> Result<Self, AppError> {
        let discord_token = std::env::var("DISCORD_TOKEN").map_err(|_| AppError::MissingConfig {
            key: "DISCORD_TOKEN".to_string(),
        })?;

        Ok(Self {
            discord_token,
            db_url: std::env::var("DB_URL").unwrap_or("sqlite://data/data.db".to_string()),
            db_path: std::env::var("DB_PATH").unwrap_or("data/data.db".to_string()),
            logs_path: std::env::var("LOGS_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("logs")),
        })
    }
}
