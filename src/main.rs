use clap::Parser;
use std::path::Path;
use std::sync::Arc;

mod api;
mod backend;
mod cli;
mod core;
mod crypto;
mod generators;
mod models;

use crate::backend::BackendClient;
use crate::cli::Args;
use crate::core::config::Config;
use crate::core::session::SessionStore;
use crate::core::vault::Vault;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    if Path::new(".env").exists() {
        dotenvy::dotenv().ok();
    }

    let args = Args::parse();
    let mut config = Config::load();

    // Command line flags win over the environment
    if let Some(port) = args.port {
        config.web_port = port;
    }
    if let Some(url) = args.backend_url {
        config.backend_url = url;
    }
    if let Some(key) = args.api_key {
        config.backend_api_key = key;
    }

    env_logger::Builder::new()
        .filter_level(config.log_level)
        .format_timestamp_secs()
        .init();

    log::info!("🔒 Starting Passforge - password generator & encrypted store");

    if config.backend_api_key.is_empty() {
        log::warn!("No backend API key configured; backend requests will be rejected");
    }

    ctrlc::set_handler(move || {
        log::info!("Ctrl+C received. Shutting down.");
        std::process::exit(0);
    })?;

    let backend = Arc::new(BackendClient::new(
        &config.backend_base(),
        &config.backend_api_key,
    ));
    let sessions = SessionStore::new(config.session_duration);
    let vault = Arc::new(Vault::new(backend, sessions));

    api::start_server(vault, config).await?;

    log::info!("✅ Passforge shutdown complete.");
    Ok(())
}
