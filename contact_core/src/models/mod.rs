pub mod contact;

pub use contact::{ContactCreated, ContactSubmission, StoredContact};
