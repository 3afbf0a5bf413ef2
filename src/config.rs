//! Service Configuration
//!
//! Configuration is read once at startup from environment variables:
//! `MONGO_URI` (required) and `PORT` (optional, default 3000).

use std::env;

use thiserror::Error;

use crate::http_server::HttpServerConfig;

/// Configuration errors, fatal at startup
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// Required environment variable is missing or empty
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    /// Environment variable is present but unparseable
    #[error("Invalid value for {var}: {value}")]
    InvalidVar { var: &'static str, value: String },
}

/// Top-level service configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Store connection string (`MONGO_URI`)
    pub mongo_uri: String,

    /// HTTP listener settings (`PORT`)
    pub http: HttpServerConfig,
}

impl Config {
    /// Read configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(env::var("MONGO_URI").ok(), env::var("PORT").ok())
    }

    fn from_vars(
        mongo_uri: Option<String>,
        port: Option<String>,
    ) -> Result<Self, ConfigError> {
        let mongo_uri = mongo_uri
            .filter(|uri| !uri.is_empty())
            .ok_or(ConfigError::MissingVar("MONGO_URI"))?;

        let http = match port {
            Some(raw) => {
                let port = raw
                    .parse::<u16>()
                    .map_err(|_| ConfigError::InvalidVar { var: "PORT", value: raw })?;
                HttpServerConfig::with_port(port)
            }
            None => HttpServerConfig::default(),
        };

        Ok(Self { mongo_uri, http })
    }
}
