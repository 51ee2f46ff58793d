//! Templates stored as HTML files in a directory

use std::{
    collections::BTreeMap,
    fmt::Write as _,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use minijinja::{
    escape_formatter, path_loader, AutoEscape, Environment, Error, Output, State, Value,
};
use tracing::debug;

use super::{TemplateCatalog, TemplateDescriptor, TemplateError, TemplateVariables};

const TEMPLATE_EXTENSION: &str = ".html";

/// A template catalog backed by the `.html` files of a single directory
#[derive(Clone, Debug)]
pub struct DirectoryTemplateCatalog {
    dir: PathBuf,
}

impl DirectoryTemplateCatalog {
    /// Creates a catalog for `dir`
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The template directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Creates the template directory if it does not exist yet
    pub async fn ensure_dir(&self) -> std::io::Result<()> {
        tokio::fs::create_dir_all(&self.dir).await
    }

    fn environment(&self) -> Environment<'static> {
        let mut env = Environment::new();
        env.set_loader(path_loader(&self.dir));
        env.set_formatter(escape_html);
        env
    }
}

/// Escapes `&`, `<`, `>` and quotes in HTML templates, leaving `/` alone so
/// links stay readable in the message source.
fn escape_html(out: &mut Output<'_>, state: &State<'_, '_>, value: &Value) -> Result<(), Error> {
    let text = match value.as_str() {
        Some(text) if matches!(state.auto_escape(), AutoEscape::Html) && !value.is_safe() => text,
        _ => return escape_formatter(out, state, value),
    };

    for c in text.chars() {
        match c {
            '&' => out.write_str("&amp;")?,
            '<' => out.write_str("&lt;")?,
            '>' => out.write_str("&gt;")?,
            '"' => out.write_str("&#34;")?,
            '\'' => out.write_str("&#39;")?,
            c => out.write_char(c)?,
        }
    }

    Ok(())
}

#[async_trait]
impl TemplateCatalog for DirectoryTemplateCatalog {
    async fn list_templates(&self) -> Result<Vec<TemplateDescriptor>, TemplateError> {
        let mut entries = tokio::fs::read_dir(&self.dir).await?;
        let mut templates = Vec::new();

        while let Some(entry) = entries.next_entry().await? {
            if !entry.file_type().await?.is_file() {
                continue;
            }

            if let Some(name) = entry.file_name().to_str() {
                if name.ends_with(TEMPLATE_EXTENSION) {
                    templates.push(TemplateDescriptor::new(name));
                }
            }
        }

        templates.sort();

        Ok(templates)
    }

    async fn render(
        &self,
        name: &str,
        variables: &TemplateVariables,
    ) -> Result<String, TemplateError> {
        debug!("rendering template {name} from {}", self.dir.display());

        // Built per call so edits to the directory show up without a restart
        let env = self.environment();

        let template = env
            .get_template(name)
            .map_err(|err| TemplateError::from_engine(name, err))?;

        let mut context = BTreeMap::new();
        context.insert("recipient_first_name", variables.recipient_first_name.as_str());
        context.insert("recipient_email", variables.recipient_email.as_str());
        if let Some(action_url) = &variables.action_url {
            context.insert("action_url", action_url.as_str());
        }

        template
            .render(context)
            .map_err(|err| TemplateError::from_engine(name, err))
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;
    use testresult::TestResult;

    use super::*;

    fn catalog_with(files: &[(&str, &str)]) -> TestResult<(TempDir, DirectoryTemplateCatalog)> {
        let dir = tempfile::tempdir()?;

        for (name, contents) in files {
            fs::write(dir.path().join(name), contents)?;
        }

        let catalog = DirectoryTemplateCatalog::new(dir.path());

        Ok((dir, catalog))
    }

    fn variables(action_url: Option<&str>) -> TemplateVariables {
        TemplateVariables {
            recipient_first_name: "Bob".to_string(),
            recipient_email: "bob@x.com".to_string(),
            action_url: action_url.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_lists_only_html_files() -> TestResult {
        let (dir, catalog) = catalog_with(&[
            ("welcome.html", "<p>Welcome</p>"),
            ("notes.txt", "not a template"),
            ("promo.html", "<p>Promo</p>"),
        ])?;
        fs::create_dir(dir.path().join("partials.html"))?;

        let templates = catalog.list_templates().await?;

        assert_eq!(
            templates,
            vec![
                TemplateDescriptor::new("promo.html"),
                TemplateDescriptor::new("welcome.html"),
            ]
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_empty_directory_lists_nothing() -> TestResult {
        let (_dir, catalog) = catalog_with(&[])?;

        assert!(catalog.list_templates().await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_listing_is_not_cached() -> TestResult {
        let (dir, catalog) = catalog_with(&[("welcome.html", "")])?;

        assert_eq!(catalog.list_templates().await?.len(), 1);

        fs::write(dir.path().join("promo.html"), "")?;

        assert_eq!(catalog.list_templates().await?.len(), 2);

        Ok(())
    }

    #[tokio::test]
    async fn test_missing_directory_is_an_error() -> TestResult {
        let dir = tempfile::tempdir()?;
        let catalog = DirectoryTemplateCatalog::new(dir.path().join("missing"));

        assert!(matches!(
            catalog.list_templates().await,
            Err(TemplateError::Io(_))
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_ensure_dir_creates_directory() -> TestResult {
        let dir = tempfile::tempdir()?;
        let catalog = DirectoryTemplateCatalog::new(dir.path().join("templates/email"));

        catalog.ensure_dir().await?;

        assert!(catalog.dir().is_dir());
        assert!(catalog.list_templates().await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_render_substitutes_variables() -> TestResult {
        let (_dir, catalog) = catalog_with(&[(
            "welcome.html",
            "<p>Hi {{ recipient_first_name }} ({{ recipient_email }})</p><a href=\"{{ action_url }}\">Go</a>",
        )])?;

        let html = catalog
            .render("welcome.html", &variables(Some("https://example.com/start?a=1&b=2")))
            .await?;

        assert_eq!(
            html,
            "<p>Hi Bob (bob@x.com)</p><a href=\"https://example.com/start?a=1&amp;b=2\">Go</a>"
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_render_leaves_missing_action_url_empty() -> TestResult {
        let (_dir, catalog) = catalog_with(&[(
            "welcome.html",
            "<a href=\"{{ action_url }}\">Go</a>{% if action_url %}!{% endif %}",
        )])?;

        let html = catalog.render("welcome.html", &variables(None)).await?;

        assert_eq!(html, "<a href=\"\">Go</a>");

        Ok(())
    }

    #[tokio::test]
    async fn test_render_escapes_html_in_variables() -> TestResult {
        let (_dir, catalog) = catalog_with(&[("welcome.html", "<p>{{ recipient_first_name }}</p>")])?;

        let mut variables = variables(None);
        variables.recipient_first_name = "<b>Bob</b>".to_string();

        let html = catalog.render("welcome.html", &variables).await?;

        assert_eq!(html, "<p>&lt;b&gt;Bob&lt;/b&gt;</p>");

        Ok(())
    }

    #[tokio::test]
    async fn test_render_escapes_quotes() -> TestResult {
        let (_dir, catalog) = catalog_with(&[("welcome.html", "<a title='{{ recipient_first_name }}'>")])?;

        let mut variables = variables(None);
        variables.recipient_first_name = "O'Brien \"Bob\"".to_string();

        let html = catalog.render("welcome.html", &variables).await?;

        assert_eq!(html, "<a title='O&#39;Brien &#34;Bob&#34;'>");

        Ok(())
    }

    #[tokio::test]
    async fn test_render_unknown_template() -> TestResult {
        let (_dir, catalog) = catalog_with(&[("welcome.html", "")])?;

        let result = catalog.render("missing.html", &variables(None)).await;

        assert!(matches!(result, Err(TemplateError::NotFound(name)) if name == "missing.html"));

        Ok(())
    }

    #[tokio::test]
    async fn test_render_rejects_paths_outside_directory() -> TestResult {
        let (_dir, catalog) = catalog_with(&[])?;

        let result = catalog.render("../secret.html", &variables(None)).await;

        assert!(matches!(result, Err(TemplateError::NotFound(_))));

        Ok(())
    }

    #[tokio::test]
    async fn test_render_malformed_template() -> TestResult {
        let (_dir, catalog) = catalog_with(&[("broken.html", "<p>{{ recipient_first_name </p>")])?;

        let result = catalog.render("broken.html", &variables(None)).await;

        assert!(matches!(result, Err(TemplateError::Syntax { name, .. }) if name == "broken.html"));

        Ok(())
    }
}
