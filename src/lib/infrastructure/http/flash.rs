//! One-shot notifications carried across a redirect in a signed cookie

use axum_extra::extract::cookie::{Cookie, SignedCookieJar};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Name of the flash cookie
pub const FLASH_COOKIE: &str = "flash";

/// Flash message severity level
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FlashLevel {
    /// The action succeeded
    Success,

    /// The action failed
    Error,
}

/// A message shown once on the next page view
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FlashMessage {
    /// Message level
    pub level: FlashLevel,

    /// Message text
    pub message: String,
}

impl FlashMessage {
    /// Create a success flash message
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Success,
            message: message.into(),
        }
    }

    /// Create an error flash message
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Error,
            message: message.into(),
        }
    }

    /// CSS class for this flash level
    pub fn css_class(&self) -> &'static str {
        match self.level {
            FlashLevel::Success => "flash-success",
            FlashLevel::Error => "flash-error",
        }
    }

    fn encode(&self) -> Result<String, serde_json::Error> {
        Ok(URL_SAFE_NO_PAD.encode(serde_json::to_vec(self)?))
    }

    fn decode(value: &str) -> Option<Self> {
        let bytes = URL_SAFE_NO_PAD.decode(value).ok()?;

        serde_json::from_slice(&bytes).ok()
    }
}

/// Stores `flash` in the jar, replacing any pending message
pub fn push(jar: SignedCookieJar, flash: &FlashMessage) -> SignedCookieJar {
    match flash.encode() {
        Ok(value) => jar.add(
            Cookie::build((FLASH_COOKIE, value))
                .path("/")
                .http_only(true),
        ),
        Err(e) => {
            warn!("could not encode flash message: {e}");
            jar
        }
    }
}

/// Removes the pending message from the jar and returns it
pub fn take(jar: SignedCookieJar) -> (SignedCookieJar, Option<FlashMessage>) {
    let Some(cookie) = jar.get(FLASH_COOKIE) else {
        return (jar, None);
    };

    let flash = FlashMessage::decode(cookie.value());
    let jar = jar.remove(Cookie::build(FLASH_COOKIE).path("/"));

    (jar, flash)
}

#[cfg(test)]
mod tests {
    use axum_extra::extract::cookie::Key;

    use super::*;

    #[test]
    fn test_take_returns_pushed_message_once() {
        let jar = SignedCookieJar::new(Key::generate());
        let jar = push(jar, &FlashMessage::success("Email sent successfully!"));

        let (jar, flash) = take(jar);
        assert_eq!(flash, Some(FlashMessage::success("Email sent successfully!")));

        let (_, flash) = take(jar);
        assert_eq!(flash, None);
    }

    #[test]
    fn test_push_replaces_pending_message() {
        let jar = SignedCookieJar::new(Key::generate());
        let jar = push(jar, &FlashMessage::success("first"));
        let jar = push(jar, &FlashMessage::error("second"));

        let (_, flash) = take(jar);

        assert_eq!(flash, Some(FlashMessage::error("second")));
    }

    #[test]
    fn test_messages_with_special_characters() {
        let message = "Error sending email: Connection refused; \"retry\", later";

        let jar = SignedCookieJar::new(Key::generate());
        let (_, flash) = take(push(jar, &FlashMessage::error(message)));

        assert_eq!(flash.map(|flash| flash.message), Some(message.to_string()));
    }

    #[test]
    fn test_css_class() {
        assert_eq!(FlashMessage::success("ok").css_class(), "flash-success");
        assert_eq!(FlashMessage::error("no").css_class(), "flash-error");
    }
}
