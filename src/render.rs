mod compare;
mod pipe;

use crate::{
    compile::{Marker, Node, Scope, Template},
    document::Document,
    region::Region,
    store::lookup,
    Engine, Error, Properties,
};
use serde_json::Value;
use tracing::{debug, trace};

use self::{compare::is_truthy, pipe::Pipe};

/// Render the given text.
///
/// Provides a shortcut to compile and render a template in one step, using
/// the default [`Engine`][`crate::Engine`] configuration.
///
/// # Examples
///
/// ```
/// use brace::render;
/// use serde_json::json;
///
/// let output = render(&json!({"name": "Ann"}), "{!name}Hello (name){!name}");
/// assert_eq!(output.unwrap(), "Hello Ann");
/// ```
pub fn render(data: &dyn Properties, text: &str) -> Result<String, Error> {
    Engine::default().render_text(data, text)
}

/// Return an error if the given data cannot be rendered against.
pub(crate) fn ensure_data(data: &dyn Properties) -> Result<(), Error> {
    if data.is_null() {
        return Err(Error::usage("cannot render a template against null data"));
    }

    Ok(())
}

pub struct Renderer<'template, 'data> {
    /// The template being rendered.
    template: &'template Template,
    /// The data that the root scope is resolved against.
    data: &'data dyn Properties,
}

impl<'template, 'data> Renderer<'template, 'data> {
    /// Create a new Renderer.
    #[inline]
    pub fn new(template: &'template Template, data: &'data dyn Properties) -> Self {
        Renderer { template, data }
    }

    /// Render the [`Template`] stored inside the [`Renderer`].
    ///
    /// The working text of the template is copied, and each directive and
    /// placeholder inside of it is replaced by its rendered form.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if the data is null, or writing a rendered value
    /// fails.
    pub fn render(&self) -> Result<String, Error> {
        ensure_data(self.data)?;

        let mut document = self.template.document.clone();
        self.resolve_scope(&mut document, &self.template.scope, self.data)?;

        Ok(document.into_text())
    }

    /// Resolve the placeholders of a [`Scope`], and then its nodes, against
    /// the given object.
    fn resolve_scope(
        &self,
        document: &mut Document,
        scope: &Scope,
        object: &dyn Properties,
    ) -> Result<(), Error> {
        for &id in &scope.placeholders {
            self.substitute(document, id, object)?;
        }

        self.resolve_nodes(document, &scope.nodes, object)
    }

    fn resolve_nodes(
        &self,
        document: &mut Document,
        nodes: &[Node],
        object: &dyn Properties,
    ) -> Result<(), Error> {
        for node in nodes {
            self.resolve_node(document, node, object)?;
        }

        Ok(())
    }

    /// Resolve a single directive.
    ///
    /// A conditional either keeps its body, dropping its own braces, or is
    /// removed entirely. A repeat is expanded once per element.
    fn resolve_node(
        &self,
        document: &mut Document,
        node: &Node,
        object: &dyn Properties,
    ) -> Result<(), Error> {
        let Some(region) = document.context(node.id) else {
            return Ok(());
        };
        let context = &self.template.contexts[node.id];
        let value = lookup(object, &context.path);

        match context.marker {
            Marker::Show | Marker::Hide => {
                let keep = is_truthy(value) == (context.marker == Marker::Show);
                trace!(marker = %context.marker, path = %context.path, keep, "resolved directive");

                if !keep {
                    document.remove(region.begin, region.len());
                    return Ok(());
                }

                document.remove(region.end - 1, 1);
                document.remove(region.begin, 1);
                self.resolve_nodes(document, &node.scope.nodes, object)
            }
            Marker::Repeat => match value.and_then(Value::as_array) {
                Some(items) if !items.is_empty() => self.expand(document, node, region, items),
                _ => {
                    trace!(path = %context.path, "skipped empty repeat");
                    document.remove(region.begin, region.len());
                    Ok(())
                }
            },
        }
    }

    /// Replace a repeat with one copy of its body per item.
    ///
    /// Each copy is an independent excerpt of the body, resolved against its
    /// item. Copies are separated by a line break, see [`join_copies`].
    fn expand(
        &self,
        document: &mut Document,
        node: &Node,
        region: Region,
        items: &[Value],
    ) -> Result<(), Error> {
        let body = document.excerpt(region.inner());
        let mut copies = Vec::with_capacity(items.len());

        for item in items {
            let mut copy = body.clone();
            self.resolve_scope(&mut copy, &node.scope, item)?;

            copies.push(copy.into_text());
        }

        debug!(
            path = %self.template.contexts[node.id].path,
            copies = copies.len(),
            "expanded repeat"
        );
        document.replace(region, &join_copies(copies));

        Ok(())
    }

    /// Replace a placeholder with its rendered value.
    fn substitute(
        &self,
        document: &mut Document,
        id: usize,
        object: &dyn Properties,
    ) -> Result<(), Error> {
        let Some(region) = document.placeholder(id) else {
            return Ok(());
        };
        let placeholder = &self.template.placeholders[id];

        // Malformed paths never match anything.
        let value = if placeholder.path.is_valid() {
            lookup(object, &placeholder.path)
        } else {
            None
        };

        let mut buffer = String::new();
        Pipe::new(&mut buffer).write_placeholder(value, placeholder.modifier)?;
        document.replace(region, &buffer);

        Ok(())
    }
}

/// Concatenate repeat copies with a line break between each of them.
///
/// A copy that already ends with a line break is followed directly by the
/// next one. The last copy is kept as is.
fn join_copies(copies: Vec<String>) -> String {
    let mut joined = String::new();
    let count = copies.len();

    for (index, copy) in copies.into_iter().enumerate() {
        joined.push_str(&copy);
        if index + 1 < count && !copy.ends_with('\n') {
            joined.push('\n');
        }
    }

    joined
}
