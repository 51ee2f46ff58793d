//! Template errors

use std::io;

use thiserror::Error;

/// Errors raised while listing or rendering templates
#[derive(Debug, Error)]
pub enum TemplateError {
    /// No template with this name exists
    #[error("template \"{0}\" not found")]
    NotFound(String),

    /// The template could not be parsed
    #[error("template \"{name}\" is malformed: {source}")]
    Syntax {
        /// The template name
        name: String,

        /// The parser error
        #[source]
        source: minijinja::Error,
    },

    /// The template parsed but could not be rendered
    #[error("template \"{name}\" could not be rendered: {source}")]
    Render {
        /// The template name
        name: String,

        /// The engine error
        #[source]
        source: minijinja::Error,
    },

    /// The template directory could not be read
    #[error("could not read templates: {0}")]
    Io(#[from] io::Error),
}

impl TemplateError {
    /// Classifies a template engine error for the named template.
    pub fn from_engine(name: &str, err: minijinja::Error) -> Self {
        match err.kind() {
            minijinja::ErrorKind::TemplateNotFound => TemplateError::NotFound(name.to_string()),
            minijinja::ErrorKind::SyntaxError => TemplateError::Syntax {
                name: name.to_string(),
                source: err,
            },
            _ => TemplateError::Render {
                name: name.to_string(),
                source: err,
            },
        }
    }
}
