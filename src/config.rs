use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database_path: String,
    pub cors_origin: String,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let s = Config::builder()
            .set_default("host", "0.0.0.0")?
            .set_default("port", 8000)?
            .set_default("database_path", "leaderboard.db")?
            .set_default("cors_origin", "*")?
            // Load from config/leaderboard.toml
            .add_source(File::with_name("config/leaderboard").required(false))
            // Override from environment (e.g., LEADERBOARD_DATABASE_PATH)
            .add_source(Environment::with_prefix("LEADERBOARD"))
            .build()?;

        s.try_deserialize()
    }
}
