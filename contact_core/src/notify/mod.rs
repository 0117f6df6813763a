//! Operator notifications for new submissions

pub mod telegram;

pub use telegram::{format_message, TelegramNotifier};

use thiserror::Error;

pub type NotifyResult<T> = std::result::Result<T, NotifyError>;

/// Why a notification was not delivered. Never converted into a response
/// error.
#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("notifier is not configured")]
    NotConfigured,

    #[error("notification transport failed: {0}")]
    Transport(String),

    #[error("notification endpoint returned status {0}")]
    Rejected(u16),
}
