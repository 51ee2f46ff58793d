//! Email delivery

pub mod smtp;
