use super::SyntaxError;
use crate::region::Region;

pub const UNEXPECTED_CLOSING_BRACE: &str = "unexpected closing brace";
pub const UNEXPECTED_OPENING_BRACE: &str = "unexpected opening brace";
pub const UNCLOSED_BRACE: &str = "unclosed opening brace";
pub const UNEXPECTED_CLOSING_PAREN: &str = "unexpected closing paren";
pub const UNCLOSED_PAREN: &str = "unclosed opening paren";
pub const MISSING_MARKER: &str = "missing property-path marker";
pub const MALFORMED_MARKER: &str = "malformed property-path marker";
pub const NESTING_TOO_DEEP: &str = "directives nested too deeply";

/// Return a [`SyntaxError`] for a directive tag without a marker.
pub fn error_missing_marker(source: &str, tag: Region) -> SyntaxError {
    SyntaxError::build(MISSING_MARKER)
        .with_pointer(source, tag)
        .with_help(
            "a directive begins with `!`, `?` or `*` followed by a property path, \
            like `{!summary}`, escape a literal brace with `\\{`",
        )
}

/// Return a [`SyntaxError`] for a directive tag whose marker or path is not
/// well formed.
pub fn error_malformed_marker(source: &str, tag: Region) -> SyntaxError {
    SyntaxError::build(MALFORMED_MARKER)
        .with_pointer(source, tag)
        .with_help(format!(
            "expected a marker and a dot-separated property path without whitespace, \
            found `{}`",
            &source[tag]
        ))
}

/// Return a [`SyntaxError`] for a directive that is never closed.
pub fn error_unclosed_directive(source: &str, tag: Region) -> SyntaxError {
    SyntaxError::build(UNCLOSED_BRACE)
        .with_pointer(source, tag)
        .with_help(format!("close the directive with a matching `{}` tag", &source[tag]))
}
