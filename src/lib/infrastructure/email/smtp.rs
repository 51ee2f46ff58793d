//! SMTP mailer implementation

use std::time::Duration;

use async_trait::async_trait;
use lettre::{
    address::Envelope,
    message::{Mailbox, MultiPart, SinglePart},
    transport::smtp::{
        authentication::Credentials,
        client::{Tls, TlsParameters},
    },
    Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use tracing::{info, warn};

use crate::{
    domain::communication::mailer::{Mailer, MailerError, OutboundMessage},
    infrastructure::config::SmtpConfig,
};

/// Connect and command timeout for a single SMTP session
pub const SMTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Sends each message over its own SMTP session
#[derive(Debug, Clone)]
pub struct SmtpMailer {
    config: SmtpConfig,
}

impl SmtpMailer {
    /// Create a new SMTP mailer
    pub fn new(config: SmtpConfig) -> Self {
        Self { config }
    }

    /// Builds a transport for the configured relay.
    ///
    /// Connections are not pooled, every send connects, optionally upgrades
    /// with STARTTLS and authenticates, then quits.
    pub fn transport(&self) -> Result<AsyncSmtpTransport<Tokio1Executor>, MailerError> {
        let mut builder =
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(self.config.host.as_str())
                .port(self.config.port)
                .timeout(Some(SMTP_TIMEOUT));

        if self.config.use_tls {
            let parameters =
                TlsParameters::new(self.config.host.clone()).map_err(MailerError::Tls)?;
            builder = builder.tls(Tls::Required(parameters));
        }

        if self.config.has_credentials() {
            builder = builder.credentials(Credentials::new(
                self.config.username.clone(),
                self.config.password.clone(),
            ));
        }

        Ok(builder.build())
    }

    /// Builds the MIME message for `message`.
    ///
    /// The `From` header carries the display name and from address, while the
    /// envelope sender is taken from `envelope_from`.
    pub fn build_message(&self, message: &OutboundMessage) -> Result<Message, MailerError> {
        message.validate()?;

        let from = parse_address(&message.from_email)?;
        let envelope_from = parse_address(&message.envelope_from)?;
        let to = parse_address(&message.to_email)?;

        let display_name = Some(message.from_name.trim().to_string()).filter(|name| !name.is_empty());

        let envelope = Envelope::new(Some(envelope_from), vec![to.clone()])?;

        let email = Message::builder()
            .from(Mailbox::new(display_name, from))
            .to(Mailbox::new(None, to))
            .subject(message.subject.as_str())
            .envelope(envelope)
            .multipart(
                MultiPart::alternative().singlepart(SinglePart::html(message.html_body.clone())),
            )?;

        Ok(email)
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, message: &OutboundMessage) -> Result<(), MailerError> {
        let email = self.build_message(message)?;
        let transport = self.transport()?;

        info!(
            "connecting to SMTP server {}:{} (tls: {})",
            self.config.host, self.config.port, self.config.use_tls
        );

        match transport.send(email).await {
            Ok(response) => {
                info!(
                    "sent email to {} (envelope from {}): {:?}",
                    message.to_email,
                    message.envelope_from,
                    response.code()
                );

                Ok(())
            }
            Err(e) => {
                warn!("failed to send email to {}: {e}", message.to_email);

                Err(e.into())
            }
        }
    }
}

fn parse_address(address: &str) -> Result<Address, MailerError> {
    address
        .trim()
        .parse()
        .map_err(|source| MailerError::InvalidAddress {
            address: address.to_string(),
            source,
        })
}
