//! Compose form handler

use askama::Template;
use axum::extract::State;
use axum_extra::extract::cookie::SignedCookieJar;

use crate::{
    domain::communication::{
        mailer::Mailer,
        templates::{TemplateCatalog, TemplateDescriptor},
    },
    infrastructure::http::{
        errors::AppError,
        flash::{self, FlashMessage},
        state::AppState,
    },
};

/// Compose form page
#[derive(Debug, Template)]
#[template(path = "pages/index.html")]
pub struct IndexTemplate {
    /// Selectable templates
    pub templates: Vec<TemplateDescriptor>,

    /// Configured SMTP host
    pub smtp_server: String,

    /// Configured SMTP port
    pub smtp_port: u16,

    /// Configured SMTP username
    pub smtp_username: String,

    /// Whether STARTTLS is enabled
    pub use_tls: bool,

    /// Notification left by the previous request
    pub flash: Option<FlashMessage>,
}

/// Show the compose form, consuming any pending flash message
pub async fn handler<T: TemplateCatalog, M: Mailer>(
    State(state): State<AppState<T, M>>,
    jar: SignedCookieJar,
) -> Result<(SignedCookieJar, IndexTemplate), AppError> {
    let templates = state.templates.list_templates().await?;
    let (jar, flash) = flash::take(jar);

    Ok((
        jar,
        IndexTemplate {
            templates,
            smtp_server: state.smtp.host.clone(),
            smtp_port: state.smtp.port,
            smtp_username: state.smtp.username.clone(),
            use_tls: state.smtp.use_tls,
            flash,
        },
    ))
}
