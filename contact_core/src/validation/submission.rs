//! Normalization and required-field checks for contact submissions

use crate::{
    error::{AppError, Result},
    models::ContactSubmission,
};
use serde_json::{Map, Value};
use validator::Validate;

/// Column width of every text field in the `contact` table.
pub const MAX_FIELD_CHARS: usize = 100;

pub const REQUIRED_FIELDS_MESSAGE: &str = "Name and Phone are required.";

/// Builds a [`ContactSubmission`] from an untyped JSON object.
///
/// Missing keys read as empty strings. Other values are rendered as text:
/// `null` as `None`, booleans as `True`/`False`, numbers and nested values
/// as JSON text. Each value is trimmed and then cut to [`MAX_FIELD_CHARS`]
/// characters. Fails when `name` or
/// `contact_number` ends up empty; nothing else is checked.
pub fn validate_submission(payload: &Map<String, Value>) -> Result<ContactSubmission> {
    let submission = ContactSubmission {
        name: normalized_field(payload, "name"),
        contact_number: normalized_field(payload, "contact_number"),
        email: normalized_field(payload, "emailid"),
        message: normalized_field(payload, "message"),
    };

    submission
        .validate()
        .map_err(|_| AppError::Validation(REQUIRED_FIELDS_MESSAGE.to_string()))?;

    Ok(submission)
}

fn normalized_field(payload: &Map<String, Value>, key: &str) -> String {
    let raw = match payload.get(key) {
        None => String::new(),
        Some(Value::Null) => "None".to_string(),
        Some(Value::Bool(true)) => "True".to_string(),
        Some(Value::Bool(false)) => "False".to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    };
    truncate_chars(raw.trim(), MAX_FIELD_CHARS)
}

fn truncate_chars(value: &str, max: usize) -> String {
    match value.char_indices().nth(max) {
        Some((byte_idx, _)) => value[..byte_idx].to_string(),
        None => value.to_string(),
    }
}
