//! Telegram Bot API notifier for new contact submissions.
//!
//! Delivery is best-effort: callers get a [`NotifyResult`] to log, but a
//! failed delivery never turns into a failed request.

use std::time::Duration;

use serde::Serialize;
use tracing::{debug, info_span, Instrument};

use super::{NotifyError, NotifyResult};
use crate::{config::NotifierConfig, models::StoredContact};

#[derive(Debug, Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: &'a str,
    parse_mode: &'static str,
}

#[derive(Debug, Clone)]
pub struct TelegramNotifier {
    client: reqwest::Client,
    config: NotifierConfig,
}

impl TelegramNotifier {
    /// Builds the HTTP client with the configured request timeout.
    ///
    /// # Errors
    ///
    /// Returns `NotifyError::Transport` if the client cannot be built.
    pub fn new(config: NotifierConfig) -> NotifyResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| NotifyError::Transport(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    pub fn is_configured(&self) -> bool {
        self.config.is_configured()
    }

    pub fn wait_for_delivery(&self) -> bool {
        self.config.wait_for_delivery
    }

    pub async fn notify_submission(&self, contact: &StoredContact) -> NotifyResult<()> {
        let text = format_message(&self.config.site_name, contact);
        self.send(&text)
            .instrument(info_span!("telegram_notify", contact_id = contact.id))
            .await
    }

    /// Posts `text` to the configured chat with HTML parse mode.
    pub async fn send(&self, text: &str) -> NotifyResult<()> {
        if !self.is_configured() {
            return Err(NotifyError::NotConfigured);
        }

        let url = format!(
            "{}/bot{}/sendMessage",
            self.config.api_base, self.config.bot_token
        );
        let payload = SendMessage {
            chat_id: &self.config.chat_id,
            text,
            parse_mode: "HTML",
        };

        let response = self
            .client
            .post(&url)
            .json(&payload)
            .send()
            .await
            // the URL carries the bot token; keep it out of error text
            .map_err(|e| NotifyError::Transport(e.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(NotifyError::Rejected(status.as_u16()));
        }

        debug!(status = status.as_u16(), "Telegram accepted notification");
        Ok(())
    }
}

/// Renders the operator message for a stored submission.
pub fn format_message(site_name: &str, contact: &StoredContact) -> String {
    let submission = &contact.submission;
    format!(
        "<b>📩 New {} Inquiry</b>\n\
         <b>ID:</b> {}\n\
         <b>Name:</b> {}\n\
         <b>Phone:</b> {}\n\
         <b>Email:</b> {}\n\
         <b>Message:</b> {}",
        escape_html(site_name),
        contact.id,
        escape_html(&submission.name),
        escape_html(&submission.contact_number),
        escape_html(or_dash(&submission.email)),
        escape_html(or_dash(&submission.message)),
    )
}

fn or_dash(value: &str) -> &str {
    if value.is_empty() {
        "-"
    } else {
        value
    }
}

fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
