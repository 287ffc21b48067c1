use anyhow::{Context, Result};

use crate::features::winners::services::WinnerImportMode;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Unset means records live in memory for the lifetime of the process
    pub database_url: Option<String>,
    pub database_max_connections: u32,
    pub winner_import_mode: WinnerImportMode,
    /// Empty means any origin
    pub cors_allowed_origins: Vec<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        Ok(Self {
            host: non_empty("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: non_empty("PORT")
                .map(|port| port.parse::<u16>())
                .transpose()
                .context("PORT must be a number")?
                .unwrap_or(8000),
            database_url: non_empty("DATABASE_URL"),
            database_max_connections: non_empty("DATABASE_MAX_CONNECTIONS")
                .map(|max| max.parse::<u32>())
                .transpose()
                .context("DATABASE_MAX_CONNECTIONS must be a number")?
                .unwrap_or(5),
            winner_import_mode: non_empty("WINNER_IMPORT_MODE")
                .map(|mode| mode.parse::<WinnerImportMode>())
                .transpose()
                .context("Cannot load WINNER_IMPORT_MODE env variable")?
                .unwrap_or_default(),
            cors_allowed_origins: non_empty("CORS_ALLOWED_ORIGINS")
                .map(|origins| {
                    origins
                        .split(',')
                        .map(str::trim)
                        .filter(|s| !s.is_empty())
                        .map(String::from)
                        .collect()
                })
                .unwrap_or_default(),
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
