//! Liveness and readiness handlers

use crate::{
    error::{AppError, Result},
    AppState,
};
use axum::{extract::State, response::IntoResponse, Json};
use serde_json::json;
use tracing::info;

pub async fn handle_ping() -> impl IntoResponse {
    Json(json!({ "ok": true }))
}

pub async fn handle_readiness(State(state): State<AppState>) -> Result<impl IntoResponse> {
    info!("GET /ready - Readiness probe");

    state
        .contacts
        .repository()
        .health_check()
        .await
        .map_err(|e| AppError::Unavailable(format!("database unavailable: {}", e)))?;

    Ok(Json(json!({
        "ok": true,
        "database": "up",
        "timestamp": chrono::Utc::now().timestamp()
    })))
}
