//! Provec Server - HTTP REST API for profile similarity matching
//!
//! Loads configuration from `.env`, config files, and `PROVEC_SERVER__*`
//! environment variables, then serves until shutdown.

use server::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Pull in a local .env before reading configuration.
    dotenvy::dotenv().ok();

    let config = ServerConfig::load()?;

    server::start_server(config).await?;

    Ok(())
}
