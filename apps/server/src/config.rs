//! Server configuration module.
//!
//! Configuration is loaded from environment variables with fallback to defaults.

use std::env;
use std::path::PathBuf;

use thiserror::Error;

/// HTTP server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port the JSON API listens on.
    pub http_port: u16,

    /// Path to the SQLite database file.
    pub database_path: PathBuf,

    /// Allow any origin. On by default: the API serves a local browser
    /// frontend during development.
    pub permissive_cors: bool,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// | Variable         | Default              |
    /// |------------------|----------------------|
    /// | `HTTP_PORT`      | `8080`               |
    /// | `DATABASE_PATH`  | `./data/rentdesk.db` |
    /// | `PERMISSIVE_CORS`| `true`               |
    pub fn load() -> Result<Self, ConfigError> {
        let config = ServerConfig {
            http_port: env::var("HTTP_PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("HTTP_PORT".to_string()))?,

            database_path: env::var("DATABASE_PATH")
                .unwrap_or_else(|_| "./data/rentdesk.db".to_string())
                .into(),

            permissive_cors: env::var("PERMISSIVE_CORS")
                .unwrap_or_else(|_| "true".to_string())
                .parse()
                .unwrap_or(true),
        };

        Ok(config)
    }
}

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An environment variable holds an unparseable value.
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        // Only assert on variables this test doesn't set; the suite runs
        // in one process
        let config = ServerConfig::load().unwrap();
        assert!(config.http_port > 0);
        assert!(!config.database_path.as_os_str().is_empty());
    }
}
