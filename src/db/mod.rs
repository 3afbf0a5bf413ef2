//! Data Access Gateway
//!
//! Owns the MongoDB connection and hands out the database handle used by
//! the HTTP layer. The driver connects lazily, so [`connect`] issues a
//! `ping` as a readiness gate: the process must not accept requests until
//! the store is confirmed reachable.

use mongodb::bson::doc;
use mongodb::{Client, Database};
use thiserror::Error;

/// Name of the database holding the products collection
pub const DATABASE_NAME: &str = "my_database";

/// Store connection errors, fatal at startup
#[derive(Debug, Error)]
pub enum DbError {
    /// Connection string rejected or client could not be constructed
    #[error("Failed to connect to MongoDB: {0}")]
    Connect(#[source] mongodb::error::Error),

    /// Client constructed but the store did not answer the readiness ping
    #[error("Failed to ping MongoDB: {0}")]
    Ping(#[source] mongodb::error::Error),
}

/// Establish the store connection and return the database handle.
///
/// Called exactly once before any request is served. There is no retry
/// and no degraded mode; the caller exits non-zero on error.
pub async fn connect(uri: &str) -> Result<Database, DbError> {
    let client = Client::with_uri_str(uri).await.map_err(DbError::Connect)?;

    client
        .database("admin")
        .run_command(doc! { "ping": 1 })
        .await
        .map_err(DbError::Ping)?;

    tracing::info!("Connected to MongoDB");
    Ok(client.database(DATABASE_NAME))
}
