//! Route table

use crate::{
    config::SiteConfig,
    handlers::{contact::handle_contact, health},
    AppState,
};
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::services::{ServeDir, ServeFile};

pub fn create_routes(site: &SiteConfig) -> Router<AppState> {
    Router::new()
        .route_service("/", ServeFile::new(&site.index_file))
        .nest_service("/static", ServeDir::new(&site.static_dir))
        .route("/ping", get(health::handle_ping))
        .route("/ready", get(health::handle_readiness))
        .route("/api/contact", post(handle_contact))
}
