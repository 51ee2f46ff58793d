//! Send confirmation handler

use axum::{
    extract::{rejection::FormRejection, State},
    response::Redirect,
    Form,
};
use axum_extra::extract::cookie::SignedCookieJar;
use serde::{Deserialize, Serialize};

use crate::{
    domain::communication::{
        mailer::{Mailer, OutboundMessage},
        templates::TemplateCatalog,
    },
    infrastructure::http::{
        errors::AppError,
        flash::{self, FlashMessage},
        state::AppState,
    },
};

/// Preview form body, the HTML is sent exactly as submitted
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ConfirmSendForm {
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

    /// The rendered HTML body
    pub html_content: String,
}

impl From<ConfirmSendForm> for OutboundMessage {
    fn from(form: ConfirmSendForm) -> Self {
        OutboundMessage::new(
            form.from_email,
            form.from_name,
            form.envelope_from,
            form.to_email,
            form.subject,
            form.html_content,
        )
    }
}

/// Send the previewed message and redirect back to the compose form.
///
/// Success and failure both redirect, the outcome travels in a flash
/// notification.
pub async fn handler<T: TemplateCatalog, M: Mailer>(
    State(state): State<AppState<T, M>>,
    jar: SignedCookieJar,
    request: Result<Form<ConfirmSendForm>, FormRejection>,
) -> Result<(SignedCookieJar, Redirect), AppError> {
    let Form(form) = request?;

    let message = OutboundMessage::from(form);

    let notification = match state.mailer.send(&message).await {
        Ok(()) => FlashMessage::success("Email sent successfully!"),
        Err(e) => FlashMessage::error(format!("Error sending email: {e}")),
    };

    Ok((flash::push(jar, &notification), Redirect::to("/")))
}
