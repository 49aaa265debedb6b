//! Clock page writer.

use std::path::PathBuf;

use async_trait::async_trait;
use tracing::{debug, warn};

use super::atomic::write_atomic;
use crate::application::services::{DEFAULT_TEMPLATE, placeholder_count, render_page};
use crate::domain::errors::PageError;
use crate::domain::ports::PagePublisherPort;

/// Renders the page template and writes it to the output path.
pub struct TemplatePageWriter {
    template: Option<PathBuf>,
    output: PathBuf,
}

impl TemplatePageWriter {
    /// Creates writer. Without a template path the built-in template is used.
    #[must_use]
    pub fn new(template: Option<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            template,
            output: output.into(),
        }
    }

    async fn load_template(&self) -> Result<String, PageError> {
        let Some(path) = &self.template else {
            return Ok(DEFAULT_TEMPLATE.to_string());
        };
        tokio::fs::read_to_string(path)
            .await
            .map_err(|source| PageError::Template {
                path: path.display().to_string(),
                source,
            })
    }
}

#[async_trait]
impl PagePublisherPort for TemplatePageWriter {
    async fn publish(&self, image_url: &str) -> Result<PathBuf, PageError> {
        let template = self.load_template().await?;
        if placeholder_count(&template) == 0 {
            warn!("Page template has no image placeholder");
        }

        let html = render_page(&template, image_url);
        let output = self.output.clone();
        let write_error = |source| PageError::Write {
            path: self.output.display().to_string(),
            source,
        };

        tokio::task::spawn_blocking(move || write_atomic(&output, html.as_bytes()))
            .await
            .map_err(|e| write_error(std::io::Error::other(e)))?
            .map_err(write_error)?;

        debug!(path = %self.output.display(), "Page written");
        Ok(self.output.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const URL: &str = "https://files.catbox.moe/abc123.png";

    #[tokio::test]
    async fn test_custom_template_rendered() {
        let dir = tempdir().unwrap();
        let template = dir.path().join("template.html");
        std::fs::write(&template, "<img src=\"%%IMAGE_URL%%\">%%IMAGE_URL%%").unwrap();
        let writer = TemplatePageWriter::new(Some(template), dir.path().join("site/index.html"));

        let path = writer.publish(URL).await.unwrap();

        let html = std::fs::read_to_string(path).unwrap();
        assert_eq!(html, format!("<img src=\"{URL}\">{URL}"));
    }

    #[tokio::test]
    async fn test_builtin_template_used_without_path() {
        let dir = tempdir().unwrap();
        let writer = TemplatePageWriter::new(None, dir.path().join("index.html"));

        let path = writer.publish(URL).await.unwrap();

        let html = std::fs::read_to_string(path).unwrap();
        assert!(html.contains(URL));
        assert!(!html.contains("%%IMAGE_URL%%"));
    }

    #[tokio::test]
    async fn test_missing_template_is_error() {
        let dir = tempdir().unwrap();
        let writer = TemplatePageWriter::new(
            Some(dir.path().join("missing.html")),
            dir.path().join("index.html"),
        );

        let result = writer.publish(URL).await;

        assert!(matches!(result, Err(PageError::Template { .. })));
        assert!(!dir.path().join("index.html").exists());
    }
}
