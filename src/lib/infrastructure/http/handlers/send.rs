//! Preview handler

use askama::Template;
use axum::{
    extract::{rejection::FormRejection, State},
    Form,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    domain::communication::{
        mailer::{Mailer, OutboundMessage},
        names::extract_first_name,
        templates::{TemplateCatalog, TemplateVariables},
    },
    infrastructure::http::{errors::AppError, state::AppState},
};

/// Compose form body
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SendForm {
    /// The template file name
    pub template: String,

    /// Address shown in the `From` header
    pub from_email: String,

    /// Display name shown in the `From` header
    pub from_name: String,

    /// Envelope sender, defaults to `from_email`
    pub envelope_from: Option<String>,

    /// The recipient
    pub to_email: String,

    /// The subject line
    pub subject: String,

    /// The recipient's name, used to personalize the template
    pub recipient_name: Option<String>,

    /// Call-to-action link
    pub action_url: Option<String>,
}

impl SendForm {
    /// Template variables for this form
    pub fn variables(&self) -> TemplateVariables {
        let recipient_name = self.recipient_name.as_deref().unwrap_or_default();

        let recipient_first_name = match extract_first_name(recipient_name) {
            name if name.is_empty() => extract_first_name(&self.to_email),
            name => name,
        };

        TemplateVariables {
            recipient_first_name,
            recipient_email: self.to_email.clone(),
            action_url: self.action_url.clone(),
        }
    }
}

/// Preview page, resubmits the message to `/confirm_send`
#[derive(Debug, Template)]
#[template(path = "pages/preview.html")]
pub struct PreviewTemplate {
    /// The message as it will be sent
    pub message: OutboundMessage,
}

/// Render the chosen template and show it for confirmation
pub async fn handler<T: TemplateCatalog, M: Mailer>(
    State(state): State<AppState<T, M>>,
    request: Result<Form<SendForm>, FormRejection>,
) -> Result<PreviewTemplate, AppError> {
    let Form(form) = request?;

    let variables = form.variables();

    debug!(
        "previewing {} for {} ({})",
        form.template, form.to_email, variables.recipient_first_name
    );

    let html_body = state.templates.render(&form.template, &variables).await?;

    let message = OutboundMessage::new(
        form.from_email,
        form.from_name,
        form.envelope_from,
        form.to_email,
        form.subject,
        html_body,
    );

    Ok(PreviewTemplate { message })
}
