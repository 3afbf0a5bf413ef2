//! # HTTP Server Module
//!
//! Axum router and handlers for the products CRUD API.
//!
//! # Endpoints
//!
//! - `GET /` - plain-text liveness
//! - `GET|POST /products` - list and create
//! - `GET|PUT|DELETE /products/{id}` - single-record operations

pub mod config;
pub mod errors;
pub mod product_routes;
pub mod server;

pub use config::HttpServerConfig;
pub use errors::{ApiError, ApiResult};
pub use server::HttpServer;
