#![warn(
    missing_debug_implementations,
    rust_2018_idioms,
    missing_docs,
    rustdoc::broken_intra_doc_links,
    rustdoc::missing_crate_level_docs
)]

//! Web UI for previewing and sending templated emails

use std::{path::PathBuf, process};

use anyhow::Result;
use clap::Parser;
use template_mailer::{
    domain::communication::templates::DirectoryTemplateCatalog,
    infrastructure::{
        config::{ConfigError, SmtpConfig},
        email::smtp::SmtpMailer,
        http::{state::AppState, HttpServer, HttpServerConfig},
    },
};
use tracing::info;

/// Command-line arguments / environment variables
#[derive(Debug, Parser)]
pub struct Args {
    /// The configuration file, created with placeholder values if missing
    #[arg(long, env = "ENV_FILE", default_value = ".env")]
    pub env_file: PathBuf,

    /// The HTTP server configuration
    #[clap(flatten)]
    pub server: HttpServerConfig,

    /// The SMTP relay configuration
    #[clap(flatten)]
    pub smtp: SmtpConfig,
}

#[mutants::skip]
#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let env_file = Args::parse().env_file;

    match SmtpConfig::bootstrap(&env_file) {
        Ok(()) => {}
        Err(e @ ConfigError::Missing { .. }) => {
            eprintln!("{e}");
            process::exit(1);
        }
        Err(e) => return Err(e.into()),
    }

    // Parsed again so values from the configuration file are picked up
    let args = Args::parse();

    info!(
        "using SMTP server {}:{} (tls: {})",
        args.smtp.host, args.smtp.port, args.smtp.use_tls
    );

    let templates = DirectoryTemplateCatalog::new(&args.server.template_dir);
    templates.ensure_dir().await?;

    let state = AppState::new(
        args.smtp.clone(),
        templates,
        SmtpMailer::new(args.smtp),
    );

    HttpServer::new(&args.server, state)?.run().await
}
