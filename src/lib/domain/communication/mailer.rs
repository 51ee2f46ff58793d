//! Mailer module

use async_trait::async_trait;

#[cfg(test)]
use mockall::mock;

mod errors;
mod message;

pub use errors::MailerError;
pub use message::OutboundMessage;

/// Sends outbound messages
#[async_trait]
pub trait Mailer: Clone + Send + Sync + 'static {
    /// Sends a single message, making exactly one attempt.
    ///
    /// # Arguments
    /// * `message` - The [`OutboundMessage`] to send.
    ///
    /// # Returns
    /// - [`Ok`] once the relay has accepted the message.
    /// - [`Err`] containing a [`MailerError`] describing the first failure.
    async fn send(&self, message: &OutboundMessage) -> Result<(), MailerError>;
}

#[cfg(test)]
mock! {
    pub Mailer {}

    impl Clone for Mailer {
        fn clone(&self) -> Self;
    }

    #[async_trait]
    impl Mailer for Mailer {
        async fn send(&self, message: &OutboundMessage) -> Result<(), MailerError>;
    }
}
