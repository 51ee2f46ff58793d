//! Configuration loading

use std::{
    convert::Infallible,
    fmt, io,
    path::{Path, PathBuf},
};

use clap::Parser;
use thiserror::Error;
use tracing::debug;

/// Contents written when no configuration file exists yet
pub const DEFAULT_ENV_FILE: &str = "# SMTP Settings
SMTP_SERVER=localhost
SMTP_PORT=25
SMTP_USERNAME=
SMTP_PASSWORD=
SMTP_USE_TLS=False
";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No configuration file existed, so a default one was written
    #[error(
        "{} not found. A default has been created at {}. Please configure it and restart the application.",
        .path.display(),
        .path.display()
    )]
    Missing {
        /// Where the default file was written
        path: PathBuf,
    },

    /// The default configuration file could not be written
    #[error("could not write default configuration to {}: {source}", .path.display())]
    Write {
        /// The path that could not be written
        path: PathBuf,

        /// The underlying IO error
        #[source]
        source: io::Error,
    },

    /// The configuration file could not be loaded
    #[error("could not load configuration: {0}")]
    Load(#[from] dotenvy::Error),
}

/// SMTP relay configuration, fixed for the lifetime of the process
#[derive(Clone, Default, PartialEq, Eq, Parser)]
pub struct SmtpConfig {
    /// The SMTP relay host
    #[arg(long = "smtp-server", env = "SMTP_SERVER", default_value = "localhost")]
    pub host: String,

    /// The SMTP relay port
    #[arg(long = "smtp-port", env = "SMTP_PORT", default_value_t = 25)]
    pub port: u16,

    /// The SMTP username, authentication is skipped when empty
    #[arg(long = "smtp-username", env = "SMTP_USERNAME", default_value = "")]
    pub username: String,

    /// The SMTP password, authentication is skipped when empty
    #[arg(
        long = "smtp-password",
        env = "SMTP_PASSWORD",
        default_value = "",
        hide_env_values = true
    )]
    pub password: String,

    /// Upgrade the connection with STARTTLS (`true`, `1` or `yes`)
    #[arg(
        long = "smtp-use-tls",
        env = "SMTP_USE_TLS",
        default_value = "false",
        action = clap::ArgAction::Set,
        value_parser = parse_truthy
    )]
    pub use_tls: bool,
}

impl SmtpConfig {
    /// Makes sure a configuration file exists at `path` and loads it into the
    /// process environment.
    ///
    /// When the file is missing a placeholder is written and
    /// [`ConfigError::Missing`] is returned, the operator has to edit it
    /// before the server can start. Variables already set in the environment
    /// take precedence over the file.
    pub fn bootstrap(path: &Path) -> Result<(), ConfigError> {
        if !path.exists() {
            std::fs::write(path, DEFAULT_ENV_FILE).map_err(|source| ConfigError::Write {
                path: path.to_path_buf(),
                source,
            })?;

            return Err(ConfigError::Missing {
                path: path.to_path_buf(),
            });
        }

        debug!("loading configuration from {}", path.display());

        dotenvy::from_path(path)?;

        Ok(())
    }

    /// Whether both a username and a password are configured
    pub fn has_credentials(&self) -> bool {
        !self.username.is_empty() && !self.password.is_empty()
    }
}

impl fmt::Debug for SmtpConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmtpConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"********")
            .field("use_tls", &self.use_tls)
            .finish()
    }
}

/// Parses a boolean from `true`, `1` or `yes` (any case). Anything else is
/// `false`.
pub fn parse_truthy(value: &str) -> Result<bool, Infallible> {
    Ok(matches!(
        value.trim().to_lowercase().as_str(),
        "true" | "1" | "yes"
    ))
}
