//! Core library for the contact-form backend: configuration, validation,
//! storage, operator notification and the HTTP routes tying them together.

pub mod config;
pub mod database;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod notify;
pub mod services;
pub mod validation;

pub use config::AppConfig;
pub use database::{get_database_pool, ContactRepository};
pub use error::{AppError, Result};
pub use handlers::routes::create_routes;
pub use models::{ContactCreated, ContactSubmission, StoredContact};
pub use notify::{NotifyError, TelegramNotifier};
pub use services::ContactService;

use axum::Router;
use std::net::SocketAddr;
use tokio::signal;
use tracing::info;

#[derive(Clone)]
pub struct AppState {
    pub app_name: String,
    pub version: String,
    pub contacts: ContactService,
}

impl AppState {
    pub fn new(contacts: ContactService) -> Self {
        Self {
            app_name: "Contact Form Backend".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            contacts,
        }
    }

    /// Wires the repository and notifier from configuration. Neither a
    /// missing database URL nor missing notifier credentials is an error
    /// here.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let repository = ContactRepository::from_config(&config.database)?;
        let notifier = TelegramNotifier::new(config.notifier.clone())
            .map_err(|e| AppError::Configuration(e.to_string()))?;

        Ok(Self::new(ContactService::new(repository, notifier)))
    }
}

pub fn create_app(state: AppState, config: &AppConfig) -> Router {
    Router::new()
        .merge(create_routes(&config.site))
        .layer(middleware::cors::cors_layer_from_config(&config.cors))
        .layer(middleware::logging::logging_layer())
        .with_state(state)
}

/// Serves `app` until a shutdown signal, then waits for background
/// notifications queued by `contacts` before returning.
pub async fn run_server(app: Router, addr: SocketAddr, contacts: ContactService) -> Result<()> {
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Other(e.into()))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::Other(e.into()))?;

    contacts.drain_notifications().await;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown");
        },
        _ = terminate => {
            info!("Received SIGTERM, starting graceful shutdown");
        },
    }
}
