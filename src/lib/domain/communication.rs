//! Composing and sending templated emails

pub mod mailer;
pub mod names;
pub mod templates;
