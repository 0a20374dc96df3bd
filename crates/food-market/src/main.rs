//! # Food Market Server
//!
//! Loads [`Config`] from the environment, starts the [`Marketplace`] actors,
//! serves the HTTP API until Ctrl+C or SIGTERM, then stops the actors.
//!
//! ```bash
//! RUST_LOG=info cargo run -p food-market     # Compact logs
//! RUST_LOG=debug cargo run -p food-market    # Full payloads
//! ```

use food_market::config::Config;
use food_market::http;
use food_market::lifecycle::Marketplace;
use store_actor::tracing::setup_tracing;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let config = Config::load().map_err(|e| {
        error!(error = %e, "Configuration rejected");
        e.to_string()
    })?;
    info!(port = config.port, namespace = ?config.email_namespace, "Starting food market");

    let marketplace = Marketplace::new(&config);

    if let Err(e) = http::serve(&config, &marketplace).await {
        error!(error = %e, "Server failed");
        marketplace.shutdown().await?;
        return Err(e.to_string());
    }

    marketplace.shutdown().await?;
    info!("Application completed successfully");
    Ok(())
}
