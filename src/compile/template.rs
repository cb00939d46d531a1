use super::tree::{Context, Placeholder, Scope};
use crate::{document::Document, render::Renderer, Error, Properties};

/// A compiled [`Template`] that can be rendered with any [`Properties`] data.
#[derive(Debug, Clone)]
pub struct Template {
    /// The name of the [`Template`].
    pub name: Option<String>,
    /// The source text from which this [`Template`] was compiled.
    pub source: String,
    /// Working text with all directive metadata removed, and the positions
    /// of every context and placeholder inside of it.
    pub document: Document,
    /// Directives, indexed by id in document order.
    pub contexts: Vec<Context>,
    /// Placeholders, indexed by id in document order.
    pub placeholders: Vec<Placeholder>,
    /// The tree of scopes the directives and placeholders are resolved in.
    pub scope: Scope,
}

impl Template {
    /// Render this [`Template`] with the given data.
    ///
    /// # Errors
    ///
    /// Returns an [`Error::Usage`] if the data is null.
    ///
    /// # Examples
    ///
    /// ```
    /// use brace::compile;
    /// use serde_json::json;
    ///
    /// let template = compile("{?summary}No summary.{?summary}").unwrap();
    ///
    /// assert_eq!(template.render(&json!({})).unwrap(), "No summary.");
    /// assert_eq!(template.render(&json!({"summary": "Adds"})).unwrap(), "");
    /// ```
    pub fn render(&self, data: &dyn Properties) -> Result<String, Error> {
        Renderer::new(self, data).render()
    }
}
