//! Email template catalog

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[cfg(test)]
use mockall::mock;

mod directory;
mod errors;

pub use directory::DirectoryTemplateCatalog;
pub use errors::TemplateError;

/// A selectable email template, identified by its file name
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TemplateDescriptor(String);

impl TemplateDescriptor {
    /// Create a new template descriptor
    pub fn new(name: &str) -> Self {
        Self(name.to_string())
    }

    /// The template's file name
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TemplateDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Values substituted into an email template
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct TemplateVariables {
    /// The recipient's first name
    pub recipient_first_name: String,

    /// The recipient's email address
    pub recipient_email: String,

    /// Call-to-action link, left undefined in the template when absent
    pub action_url: Option<String>,
}

/// Lists and renders email templates
#[async_trait]
pub trait TemplateCatalog: Clone + Send + Sync + 'static {
    /// Lists the available templates.
    ///
    /// The listing is recomputed on every call. An empty catalog is not an
    /// error.
    async fn list_templates(&self) -> Result<Vec<TemplateDescriptor>, TemplateError>;

    /// Renders the named template with `variables`.
    ///
    /// # Returns
    /// - [`Ok`] with the rendered HTML.
    /// - [`Err`] with [`TemplateError::NotFound`] if there is no such template,
    ///   or [`TemplateError::Syntax`] if it cannot be parsed.
    async fn render(
        &self,
        name: &str,
        variables: &TemplateVariables,
    ) -> Result<String, TemplateError>;
}

#[cfg(test)]
mock! {
    pub TemplateCatalog {}

    impl Clone for TemplateCatalog {
        fn clone(&self) -> Self;
    }

    #[async_trait]
    impl TemplateCatalog for TemplateCatalog {
        async fn list_templates(&self) -> Result<Vec<TemplateDescriptor>, TemplateError>;
        async fn render(&self, name: &str, variables: &TemplateVariables) -> Result<String, TemplateError>;
    }
}
