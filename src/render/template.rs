//! HTML template seam.

use serde_json::Value;

use crate::error::BoxError;

/// Data handed to the HTML template when serving a full document.
#[derive(Debug, Clone, Default)]
pub struct TemplateData {
    /// Caller-supplied data from the render context.
    pub custom: Option<Value>,

    /// Head fragment produced by SSR; empty without an SSR client.
    pub inertia_head: String,

    /// The root-view container, or the SSR body fragment.
    pub inertia_body: String,
}

/// The HTML document shell executed around the page container.
///
/// Implement this over the template engine of the host application. The
/// renderer only requires that `inertia_head` and `inertia_body` end up in
/// the produced document.
pub trait Template: Send + Sync {
    fn render(&self, data: &TemplateData) -> Result<String, BoxError>;
}

/// Minimal shell substituting `{{ inertia_head }}` and `{{ inertia_body }}`
/// placeholders in a static HTML string.
#[derive(Debug, Clone)]
pub struct ShellTemplate {
    html: String,
}

impl ShellTemplate {
    pub fn new(html: impl Into<String>) -> Self {
        Self { html: html.into() }
    }
}

impl Template for ShellTemplate {
    fn render(&self, data: &TemplateData) -> Result<String, BoxError> {
        Ok(self
            .html
            .replace("{{ inertia_head }}", &data.inertia_head)
            .replace("{{ inertia_body }}", &data.inertia_body))
    }
}
