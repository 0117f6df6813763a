//! Contact submission models

use serde::{Deserialize, Serialize};
use validator::Validate;

/// A normalized contact-form entry that has not been stored yet.
///
/// Every field is trimmed and at most 100 characters long. `email` is
/// named `emailid` on the wire and in the `contact` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct ContactSubmission {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(min = 1, max = 100))]
    pub contact_number: String,
    #[serde(rename = "emailid")]
    #[validate(length(max = 100))]
    pub email: String,
    #[validate(length(max = 100))]
    pub message: String,
}

/// A submission after the store assigned its id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoredContact {
    pub id: i64,
    #[serde(flatten)]
    pub submission: ContactSubmission,
}

#[derive(Debug, Clone, Serialize)]
pub struct ContactCreated {
    pub ok: bool,
    pub id: i64,
}

impl ContactCreated {
    pub fn new(id: i64) -> Self {
        Self { ok: true, id }
    }
}
