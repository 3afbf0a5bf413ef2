//! product-api - a minimal CRUD service for a `products` collection
//!
//! Two components:
//! - [`db`] - data access gateway owning the MongoDB connection
//! - [`http_server`] - axum router exposing the CRUD endpoints
//!
//! [`run`] wires them together: configuration is read from the
//! environment, the store connection is verified before the listener
//! binds, and any startup failure is fatal.

pub mod config;
pub mod db;
pub mod http_server;

use thiserror::Error;

use crate::config::Config;
use crate::http_server::HttpServer;

/// Errors that abort startup
#[derive(Debug, Error)]
pub enum StartupError {
    /// Configuration error (missing or malformed environment variable)
    #[error("{0}")]
    Config(#[from] config::ConfigError),

    /// Store unreachable at startup
    #[error("{0}")]
    Db(#[from] db::DbError),

    /// Listener could not bind or the server loop failed
    #[error("Server error: {0}")]
    Io(#[from] std::io::Error),
}

/// Load configuration, connect to the store, and serve until shutdown.
///
/// The connection is verified with a ping before the listener binds, so
/// the process never accepts requests while the store is unreachable.
pub async fn run() -> Result<(), StartupError> {
    let config = Config::from_env()?;
    let db = db::connect(&config.mongo_uri).await?;

    let server = HttpServer::new(db, config.http);
    server.start().await?;

    Ok(())
}
