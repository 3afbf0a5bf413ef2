//! # HTTP Server
//!
//! Main HTTP server combining the liveness route and product routes.
//!
//! The live database handle is injected at construction time; handlers
//! never reach for ambient globals.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{routing::get, Router};
use mongodb::Database;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::config::HttpServerConfig;
use super::product_routes::{product_routes, ProductState};

/// HTTP server for the products API
pub struct HttpServer {
    config: HttpServerConfig,
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server bound to a live database handle
    pub fn new(db: Database, config: HttpServerConfig) -> Self {
        let router = Self::build_router(&db);
        Self { config, router }
    }

    /// Build the combined router with all endpoints
    fn build_router(db: &Database) -> Router {
        let product_state = Arc::new(ProductState::new(db));

        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        Router::new()
            // Liveness at root level, independent of store state
            .route("/", get(root_handler))
            // Product CRUD routes
            .merge(product_routes(product_state))
            .layer(TraceLayer::new_for_http())
            .layer(cors)
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Start the HTTP server (async)
    pub async fn start(self) -> Result<(), std::io::Error> {
        let addr: SocketAddr = self
            .config
            .socket_addr()
            .parse()
            .expect("Invalid socket address");

        tracing::info!("Server is running on port {}", self.config.port);

        let listener = TcpListener::bind(addr).await?;
        axum::serve(listener, self.router).await?;

        Ok(())
    }
}

/// Liveness handler
async fn root_handler() -> &'static str {
    "Server is running and connected to MongoDB"
}
