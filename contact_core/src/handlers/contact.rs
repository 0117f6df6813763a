//! Contact form submission handler

use crate::{
    error::Result, extractors::LenientJson, middleware::logging::record_contact_id,
    models::ContactCreated, AppState,
};
use axum::{extract::State, response::IntoResponse, Json};
use tracing::info;

pub async fn handle_contact(
    State(state): State<AppState>,
    LenientJson(payload): LenientJson,
) -> Result<impl IntoResponse> {
    info!("POST /api/contact - {} field(s)", payload.len());

    let contact = state.contacts.submit(&payload).await?;
    record_contact_id(contact.id);

    Ok(Json(ContactCreated::new(contact.id)))
}
