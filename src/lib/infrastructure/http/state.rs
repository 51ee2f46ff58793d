//! Application state module

use std::{fmt, sync::Arc};

use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;

use crate::{
    domain::communication::{mailer::Mailer, templates::TemplateCatalog},
    infrastructure::config::SmtpConfig,
};

/// Global application state
#[derive(Clone)]
pub struct AppState<T: TemplateCatalog, M: Mailer> {
    /// The SMTP settings, shown on the compose form
    pub smtp: Arc<SmtpConfig>,

    /// Template catalog
    pub templates: Arc<T>,

    /// Mailer
    pub mailer: Arc<M>,

    /// Signs the flash notification cookie, generated once per process
    pub cookie_key: Key,
}

/// Implementation of the application state
impl<T, M> AppState<T, M>
where
    T: TemplateCatalog,
    M: Mailer,
{
    /// Create a new application state with a fresh cookie signing key
    pub fn new(smtp: SmtpConfig, templates: T, mailer: M) -> Self {
        Self {
            smtp: Arc::new(smtp),
            templates: Arc::new(templates),
            mailer: Arc::new(mailer),
            cookie_key: Key::generate(),
        }
    }
}

impl<T, M> FromRef<AppState<T, M>> for Key
where
    T: TemplateCatalog,
    M: Mailer,
{
    fn from_ref(state: &AppState<T, M>) -> Self {
        state.cookie_key.clone()
    }
}

impl<T, M> fmt::Debug for AppState<T, M>
where
    T: TemplateCatalog,
    M: Mailer,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("smtp", &self.smtp)
            .field("templates", &"TemplateCatalog")
            .field("mailer", &"Mailer")
            .finish()
    }
}

#[cfg(test)]
use crate::domain::communication::{mailer::MockMailer, templates::MockTemplateCatalog};

/// State backed by mocks, with fixed SMTP settings
#[cfg(test)]
pub fn test_state(
    templates: Option<MockTemplateCatalog>,
    mailer: Option<MockMailer>,
) -> AppState<MockTemplateCatalog, MockMailer> {
    let templates = templates.unwrap_or_else(MockTemplateCatalog::new);
    let mailer = mailer.unwrap_or_else(MockMailer::new);

    let smtp = SmtpConfig {
        host: "smtp.example.com".to_string(),
        port: 2525,
        username: "mailer".to_string(),
        password: "secret".to_string(),
        use_tls: true,
    };

    AppState::new(smtp, templates, mailer)
}
