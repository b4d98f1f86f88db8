//! API configuration module.
//!
//! Configuration is loaded from environment variables with fallback to defaults.

use serde::{Deserialize, Serialize};
use std::env;
use std::net::SocketAddr;
use std::str::FromStr;

use shopfront_db::DbConfig;

/// API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Interface to bind
    pub host: String,

    /// HTTP server port
    pub port: u16,

    /// SQLite database file
    pub database_path: String,

    /// Maximum pooled database connections
    pub db_max_connections: u32,

    /// Largest accepted request body in bytes (default: 10MB)
    pub max_upload_bytes: usize,

    /// Insert the demo catalog on start-up when the catalog is empty
    pub seed_demo_data: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            host: "0.0.0.0".to_string(),
            port: 8080,
            database_path: "./shopfront.db".to_string(),
            db_max_connections: 5,
            max_upload_bytes: 10 * 1024 * 1024,
            seed_demo_data: false,
        }
    }
}

impl ApiConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the configuration from any variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = ApiConfig::default();

        let config = ApiConfig {
            host: lookup("HOST").unwrap_or(defaults.host),
            port: parse_var(&lookup, "PORT", defaults.port)?,
            database_path: lookup("DATABASE_PATH").unwrap_or(defaults.database_path),
            db_max_connections: parse_var(&lookup, "DB_MAX_CONNECTIONS", defaults.db_max_connections)?,
            max_upload_bytes: parse_var(&lookup, "MAX_UPLOAD_BYTES", defaults.max_upload_bytes)?,
            seed_demo_data: parse_var(&lookup, "SEED_DEMO_DATA", defaults.seed_demo_data)?,
        };

        if config.db_max_connections == 0 {
            return Err(ConfigError::InvalidValue("DB_MAX_CONNECTIONS".to_string()));
        }

        Ok(config)
    }

    /// Socket address to listen on.
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|_| ConfigError::InvalidValue("HOST".to_string()))
    }

    /// Database settings derived from this configuration.
    pub fn db_config(&self) -> DbConfig {
        DbConfig::new(&self.database_path).max_connections(self.db_max_connections)
    }
}

fn parse_var<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(name) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(name.to_string())),
        None => Ok(default),
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn from_map(vars: &[(&str, &str)]) -> Result<ApiConfig, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ApiConfig::from_lookup(|name| map.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = from_map(&[]).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.database_path, "./shopfront.db");
        assert!(!config.seed_demo_data);
        assert_eq!(config.bind_addr().unwrap().port(), 8080);
    }

    #[test]
    fn test_overrides() {
        let config = from_map(&[
            ("PORT", "9000"),
            ("SEED_DEMO_DATA", "true"),
            ("DB_MAX_CONNECTIONS", "2"),
        ])
        .unwrap();
        assert_eq!(config.port, 9000);
        assert!(config.seed_demo_data);
        assert_eq!(config.db_config().max_connections, 2);
    }

    #[test]
    fn test_invalid_values() {
        let err = from_map(&[("PORT", "eighty")]).unwrap_err();
        assert_eq!(err.to_string(), "Invalid value for PORT");

        assert!(from_map(&[("DB_MAX_CONNECTIONS", "0")]).is_err());
        assert!(from_map(&[("SEED_DEMO_DATA", "maybe")]).is_err());
    }
}
