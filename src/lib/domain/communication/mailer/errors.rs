//! Mailer errors

use lettre::{address::AddressError, transport::smtp};
use thiserror::Error;

/// An error raised while dispatching a message.
///
/// Every variant displays as the underlying cause, so callers that only need
/// a message for the user can use [`ToString`] without matching.
#[derive(Debug, Error)]
pub enum MailerError {
    /// The envelope sender or the recipient is empty
    #[error("missing {0} address")]
    MissingAddress(&'static str),

    /// An address could not be parsed
    #[error("invalid address \"{address}\": {source}")]
    InvalidAddress {
        /// The offending address
        address: String,

        /// The parser error
        #[source]
        source: AddressError,
    },

    /// The MIME message could not be built
    #[error("{0}")]
    Message(#[from] lettre::error::Error),

    /// TLS setup or negotiation failed
    #[error("{0}")]
    Tls(smtp::Error),

    /// The relay did not answer in time
    #[error("{0}")]
    Timeout(smtp::Error),

    /// The relay rejected a command, including authentication
    #[error("{0}")]
    Rejected(smtp::Error),

    /// Any other connection or protocol failure
    #[error("{0}")]
    Transport(smtp::Error),
}

impl From<smtp::Error> for MailerError {
    fn from(err: smtp::Error) -> Self {
        if err.is_tls() {
            MailerError::Tls(err)
        } else if err.is_timeout() {
            MailerError::Timeout(err)
        } else if err.is_permanent() || err.is_transient() {
            MailerError::Rejected(err)
        } else {
            MailerError::Transport(err)
        }
    }
}
