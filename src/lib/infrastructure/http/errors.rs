//! HTTP error-handling module

use std::fmt;

use askama::Template;
use axum::{
    extract::rejection::FormRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::warn;

use crate::domain::communication::templates::TemplateError;

/// Error page
#[derive(Debug, Template)]
#[template(path = "pages/error.html")]
pub struct ErrorTemplate {
    /// The status code
    pub status: u16,

    /// The error message
    pub message: String,
}

/// An error raised while handling a request, rendered as an HTML page
#[derive(Debug)]
pub struct AppError {
    /// The status code
    pub status: StatusCode,

    /// The error message
    pub message: String,
}

impl AppError {
    /// Create a new error
    pub fn new(status: StatusCode, message: &str) -> Self {
        Self {
            status,
            message: message.to_string(),
        }
    }

    /// Create a new not found error
    pub fn new_404(message: &str) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    /// Create new internal server error
    pub fn new_500(message: &str) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let page = ErrorTemplate {
            status: self.status.as_u16(),
            message: self.message,
        };

        (self.status, page).into_response()
    }
}

impl From<TemplateError> for AppError {
    fn from(err: TemplateError) -> Self {
        warn!("template error: {err}");

        match err {
            TemplateError::NotFound(name) => {
                AppError::new_404(&format!("Template \"{name}\" not found"))
            }
            err => AppError::new_500(&err.to_string()),
        }
    }
}

impl From<FormRejection> for AppError {
    fn from(rejection: FormRejection) -> Self {
        AppError::new(rejection.status(), &rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use axum::{body::to_bytes, http::StatusCode, response::IntoResponse};
    use testresult::TestResult;

    use super::*;

    #[tokio::test]
    async fn test_error_response() -> TestResult {
        let error = AppError::new_500("Internal server error");

        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = to_bytes(response.into_body(), usize::MAX).await?;
        let body = String::from_utf8(body.to_vec())?;

        assert!(body.contains("500"));
        assert!(body.contains("Internal server error"));

        Ok(())
    }

    #[tokio::test]
    async fn test_error_message_is_escaped() -> TestResult {
        let response = AppError::new_404("<script>").into_response();

        let body = to_bytes(response.into_body(), usize::MAX).await?;
        let body = String::from_utf8(body.to_vec())?;

        assert!(!body.contains("<script>"));
        assert!(body.contains("&lt;script&gt;"));

        Ok(())
    }

    #[test]
    fn test_template_not_found_is_404() {
        let error = AppError::from(TemplateError::NotFound("missing.html".to_string()));

        assert_eq!(error.status, StatusCode::NOT_FOUND);
        assert_eq!(error.message, "Template \"missing.html\" not found");
    }

    #[test]
    fn test_other_template_errors_are_500() {
        let error = AppError::from(TemplateError::Io(io::Error::other("disk on fire")));

        assert_eq!(error.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(error.message.contains("disk on fire"));
    }
}
