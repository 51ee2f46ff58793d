//! Infrastructure layer

pub mod config;
pub mod email;
pub mod http;
