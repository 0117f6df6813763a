//! Main entry point for the contact-form server binary

use anyhow::Result;
use contact_core::{create_app, run_server, AppConfig, AppState};
use std::net::SocketAddr;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            eprintln!("Failed to read .env file: {}", e);
        }
    }

    init_tracing();

    let config = AppConfig::load()
        .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?;

    info!("Configuration loaded successfully");
    info!("Server will bind to: {}", config.bind_address());

    let addr: SocketAddr = config.bind_address().parse()
        .map_err(|e| anyhow::anyhow!("Invalid bind address: {}", e))?;

    if config.database.is_configured() {
        info!("Database: configured");
    } else {
        warn!("DATABASE_URL is not set; every submission will fail until it is");
    }

    if config.notifier.is_configured() {
        info!(
            "Telegram notifications enabled ({})",
            if config.notifier.wait_for_delivery { "inline" } else { "background" }
        );
    } else {
        info!("Telegram credentials not set; notifications are disabled");
    }

    info!("Landing page: {}", config.site.index_file.display());
    info!("Static assets: {}", config.site.static_dir.display());

    let state = AppState::from_config(&config)?;
    info!("App: {} v{}", state.app_name, state.version);

    let contacts = state.contacts.clone();
    let app = create_app(state, &config);

    run_server(app, addr, contacts).await?;

    info!("Server shutdown complete");
    Ok(())
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| {
            let default_level = if cfg!(debug_assertions) {
                "debug"
            } else {
                "info"
            };

            format!(
                "contact_core={level},{crate_name}={level},tower_http=info",
                level = default_level,
                crate_name = env!("CARGO_CRATE_NAME"),
            ).into()
        });

    let fmt_layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true);

    let is_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    if is_json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer.json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer.pretty())
            .init();
    }
}
