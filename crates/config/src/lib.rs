use dotenv::{dotenv, from_path};
use std::env;
use thiserror::Error;

pub const DEFAULT_LOG_FILTER: &str = "api_server=debug,domain=debug,tower_http=debug";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load .env file from path {path}: {source}")]
    EnvFile {
        path: String,
        #[source]
        source: dotenv::Error,
    },

    #[error("Invalid {key}: {message}")]
    Invalid { key: &'static str, message: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub database_path: String,
    pub api_host: String,
    pub api_port: u16,
    /// `false` lets contributor names resolve even when the owner is missing.
    pub owner_gated_enrichment: bool,
    pub log_filter: String,
}

impl Config {
    /// Load configuration from a specified `.env` file path or default to the root `.env` file.
    ///
    /// A missing default `.env` is fine; a missing explicit path is an error.
    pub fn from_env(env_path: Option<&str>) -> Result<Self, ConfigError> {
        if let Some(path) = env_path {
            from_path(path).map_err(|source| ConfigError::EnvFile {
                path: path.to_string(),
                source,
            })?;
        } else {
            dotenv().ok();
        }

        Self::from_vars(|key| env::var(key).ok())
    }

    /// Build the configuration from any variable lookup.
    pub fn from_vars<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let api_port = var("API_PORT", "3000")
            .parse()
            .map_err(|e: std::num::ParseIntError| ConfigError::Invalid {
                key: "API_PORT",
                message: e.to_string(),
            })?;

        let owner_gated_enrichment =
            parse_bool("OWNER_GATED_ENRICHMENT", &var("OWNER_GATED_ENRICHMENT", "true"))?;

        Ok(Config {
            database_path: var("DATABASE_PATH", "projects.db"),
            api_host: var("API_HOST", "127.0.0.1"),
            api_port,
            owner_gated_enrichment,
            log_filter: var("RUST_LOG", DEFAULT_LOG_FILTER),
        })
    }

    pub fn api_address(&self) -> String {
        format!("{}:{}", self.api_host, self.api_port)
    }
}

fn parse_bool(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ConfigError::Invalid {
            key,
            message: format!("expected a boolean, got '{}'", other),
        }),
    }
}
