//! product-api entry point
//!
//! This is a minimal entrypoint that:
//! 1. Initializes the tracing subscriber
//! 2. Delegates to product_api::run
//! 3. Prints startup errors to stderr
//! 4. Exits with non-zero on failure

use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    if let Err(e) = product_api::run().await {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
