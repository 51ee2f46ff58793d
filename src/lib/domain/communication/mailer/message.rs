//! Outbound email message

use serde::{Deserialize, Serialize};

use super::errors::MailerError;

/// A single HTML email addressed to one recipient.
///
/// The envelope sender is what the relay sees in `MAIL FROM` and where
/// bounces go. It can differ from the `From` header the recipient sees.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundMessage {
    /// Address shown in the `From` header
    pub from_email: String,

    /// Display name shown in the `From` header
    pub from_name: String,

    /// Envelope sender
    pub envelope_from: String,

    /// The single recipient
    pub to_email: String,

    /// The subject line
    pub subject: String,

    /// The HTML body, sent as-is
    pub html_body: String,
}

impl OutboundMessage {
    /// Creates a new message. A missing or empty `envelope_from` falls back
    /// to `from_email`.
    pub fn new(
        from_email: String,
        from_name: String,
        envelope_from: Option<String>,
        to_email: String,
        subject: String,
        html_body: String,
    ) -> Self {
        let envelope_from = envelope_from
            .filter(|envelope_from| !envelope_from.is_empty())
            .unwrap_or_else(|| from_email.clone());

        Self {
            from_email,
            from_name,
            envelope_from,
            to_email,
            subject,
            html_body,
        }
    }

    /// Checks the message has both envelope addresses.
    pub fn validate(&self) -> Result<(), MailerError> {
        if self.envelope_from.trim().is_empty() {
            return Err(MailerError::MissingAddress("envelope sender"));
        }

        if self.to_email.trim().is_empty() {
            return Err(MailerError::MissingAddress("recipient"));
        }

        Ok(())
    }
}
