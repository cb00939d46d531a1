mod lex;
mod pair;
mod template;
mod tree;

pub use crate::compile::{
    template::Template,
    tree::{Context, Marker, Modifier, Node, Path, Placeholder, Scope},
};

use crate::{
    compile::{lex::Lexer, pair::Matcher},
    document::Document,
    log::SyntaxError,
    Error,
};
use std::cmp::Reverse;
use tracing::debug;

/// Default for the number of directives that may enclose each other.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Compile a [`Template`] from the given text.
///
/// Provides a shortcut to quickly compile a `Template` without creating
/// an `Engine`.
///
/// # Examples
///
/// ```
/// use brace::compile;
///
/// let template = compile("{!name}Hello, (name)!{!name}");
/// assert!(template.is_ok())
/// ```
pub fn compile(text: &str) -> Result<Template, Error> {
    Ok(Parser::new(text).compile()?)
}

/// Turns source text into a [`Template`].
pub struct Parser<'source> {
    /// Text that is being compiled.
    source: &'source str,
    /// Maximum number of directives that may enclose each other.
    max_depth: usize,
}

impl<'source> Parser<'source> {
    /// Create a new Parser from the given string.
    #[inline]
    pub fn new(source: &'source str) -> Self {
        Self {
            source,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Set the maximum number of directives that may enclose each other.
    ///
    /// Returns the [`Parser`], so additional methods may be chained.
    #[inline]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;

        self
    }

    /// Compile the template.
    ///
    /// Delimiters are paired, the scope tree is built from the directive
    /// nesting, and the directive metadata is stripped from the working text.
    ///
    /// # Errors
    ///
    /// Returns a [`SyntaxError`] when the source is structurally malformed.
    pub fn compile(self) -> Result<Template, SyntaxError> {
        let tokens = Lexer::new(self.source).scan();
        let mut pairing = Matcher::new(self.source, self.max_depth).pair(&tokens)?;
        pairing
            .contexts
            .sort_by_key(|context| context.origin.begin);

        let scope = tree::build(&pairing.contexts, &pairing.placeholders);
        let mut document = Document::new(
            self.source,
            pairing.contexts.iter().map(|c| c.origin).collect(),
            pairing.placeholders.iter().map(|p| p.origin).collect(),
        );

        // Removing back to front leaves the offsets of pending removals intact.
        pairing.removals.sort_by_key(|region| Reverse(region.begin));
        for region in &pairing.removals {
            document.remove(region.begin, region.len());
        }

        debug!(
            contexts = pairing.contexts.len(),
            placeholders = pairing.placeholders.len(),
            "compiled template"
        );

        Ok(Template {
            name: None,
            source: self.source.to_string(),
            document,
            contexts: pairing.contexts,
            placeholders: pairing.placeholders,
            scope,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::Parser;
    use crate::region::Region;

    #[test]
    fn test_compile_strips_metadata() {
        let template = Parser::new("{!name}Hello {(name)}{!name}").compile().unwrap();

        assert_eq!(template.document.text(), "{Hello (name)}");
        assert_eq!(template.document.context(0), Some(Region::new(0..14)));
        assert_eq!(template.document.placeholder(0), Some(Region::new(7..13)));
        assert_eq!(template.contexts[0].origin, Region::new(0..28));
    }

    #[test]
    fn test_compile_strips_escapes() {
        let template = Parser::new(r"\{x\} (a) \(b\)").compile().unwrap();

        assert_eq!(template.document.text(), "{x} (a) (b)");
        assert_eq!(template.placeholders.len(), 1);
        assert_eq!(template.document.placeholder(0), Some(Region::new(4..7)));
    }

    #[test]
    fn test_compile_orders_contexts() {
        let template = Parser::new("{*a}{!b}x{!b}{*a}{?c}y{?c}").compile().unwrap();

        assert_eq!(template.document.text(), "{{x}}{y}");
        let paths: Vec<_> = template.contexts.iter().map(|c| c.path.to_string()).collect();
        assert_eq!(paths, vec!["a", "b", "c"]);
        assert_eq!(template.document.context(0), Some(Region::new(0..5)));
        assert_eq!(template.document.context(1), Some(Region::new(1..4)));
        assert_eq!(template.document.context(2), Some(Region::new(5..8)));
        assert_eq!(template.scope.nodes.len(), 2);
        assert_eq!(template.scope.nodes[0].scope.nodes[0].id, 1);
    }

    #[test]
    fn test_compile_respects_max_depth() {
        assert!(Parser::new("{!a}{!b}x{!b}{!a}")
            .with_max_depth(1)
            .compile()
            .is_err());
        assert!(Parser::new("{!a}{!b}x{!b}{!a}")
            .with_max_depth(2)
            .compile()
            .is_ok());
    }
}
