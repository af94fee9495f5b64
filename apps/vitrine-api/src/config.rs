//! API server configuration module.
//!
//! Configuration is loaded from environment variables with fallback to defaults.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

/// API server configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    /// Bind address
    pub host: String,

    /// HTTP port
    pub port: u16,

    /// JSON file of products to load at startup (optional)
    pub seed_path: Option<PathBuf>,

    /// Number of generated products when no seed file is given
    pub seed_count: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            host: "0.0.0.0".to_string(),
            port: 3001,
            seed_path: None,
            seed_count: 50,
        }
    }
}

impl ApiConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = ApiConfig::default();

        let config = ApiConfig {
            host: lookup("VITRINE_HOST").unwrap_or(defaults.host),

            port: match lookup("VITRINE_PORT") {
                Some(raw) => raw
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidValue("VITRINE_PORT".to_string()))?,
                None => defaults.port,
            },

            seed_path: lookup("VITRINE_SEED_PATH")
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),

            seed_count: match lookup("VITRINE_SEED_COUNT") {
                Some(raw) => raw
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidValue("VITRINE_SEED_COUNT".to_string()))?,
                None => defaults.seed_count,
            },
        };

        Ok(config)
    }

    /// The socket address to bind.
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|_| ConfigError::InvalidValue("VITRINE_HOST".to_string()))
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}
