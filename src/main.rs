//! # SkillSwap Server
//!
//! A skill-bartering marketplace server.
//!
//! This is the application entry point that initializes:
//! - Tracing/logging subsystem
//! - Configuration loading
//! - Storage backend selection (PostgreSQL or in-memory)
//! - HTTP server

use anyhow::Result;
use tracing::info;

use skillswap::config::Settings;
use skillswap::startup::Application;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber for structured logging
    skillswap::telemetry::init_tracing();

    info!("Starting SkillSwap server...");

    // Load configuration from environment and config files
    let settings = Settings::load()?;
    info!(
        host = %settings.server.host,
        port = %settings.server.port,
        environment = %settings.environment,
        "Configuration loaded"
    );

    // Build and run the application
    let application = Application::build(settings).await?;

    info!("Server ready to accept connections");
    application.run_until_stopped().await?;

    Ok(())
}
