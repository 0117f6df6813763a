//! Input validation for contact submissions

pub mod submission;

pub use submission::{validate_submission, MAX_FIELD_CHARS, REQUIRED_FIELDS_MESSAGE};
