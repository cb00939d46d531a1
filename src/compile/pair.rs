//! Pairs the delimiters found by the Lexer into directives and placeholders.
//!
//! Directives are written as a pair of tags carrying the same marker and path:
//!
//! ```text
//! {*members}<li>(name)</li>{*members}
//! |        |               |        |
//! open tag                 close tag
//! ```
//!
//! Only the outer braces of the pair survive compilation. Everything else in
//! the two tags is metadata, and is listed in [`Pairing::removals`].
use super::{
    lex::{token::Token, Tokens},
    tree::{Context, Marker, Path, Placeholder},
};
use crate::{
    log::{
        error_malformed_marker, error_missing_marker, error_unclosed_directive, SyntaxError,
        NESTING_TOO_DEEP, UNCLOSED_BRACE, UNCLOSED_PAREN, UNEXPECTED_CLOSING_BRACE,
        UNEXPECTED_CLOSING_PAREN, UNEXPECTED_OPENING_BRACE,
    },
    region::Region,
};

/// Result of pairing the delimiters of a source text.
#[derive(Debug, Default, PartialEq)]
pub struct Pairing {
    /// Directives, in the order they were closed.
    pub contexts: Vec<Context>,
    /// Placeholders, in document order.
    pub placeholders: Vec<Placeholder>,
    /// Areas of source text that are not content.
    pub removals: Vec<Region>,
}

/// A brace-delimited tag.
enum Tag<'source> {
    /// Tag around a placeholder, like `{(name)}`.
    Wrapper,
    /// Opening or closing tag of a directive, like `{!name}`.
    Directive {
        marker: Marker,
        path: Path,
        /// The marker and path as written.
        text: &'source str,
    },
}

/// A directive tag that has not been closed yet.
struct Open<'source> {
    marker: Marker,
    path: Path,
    text: &'source str,
    tag: Region,
}

pub struct Matcher<'source> {
    /// Text that is being analyzed.
    source: &'source str,
    /// Maximum number of directives that may enclose each other.
    max_depth: usize,
}

impl<'source> Matcher<'source> {
    /// Create a new [`Matcher`] over the given source.
    #[inline]
    pub fn new(source: &'source str, max_depth: usize) -> Self {
        Self { source, max_depth }
    }

    /// Pair the given [`Tokens`].
    ///
    /// # Errors
    ///
    /// Returns a [`SyntaxError`] when a delimiter has no partner, a tag does
    /// not begin with a valid marker and path, or directives nest deeper than
    /// allowed.
    pub fn pair(&self, tokens: &Tokens) -> Result<Pairing, SyntaxError> {
        let mut pairing = Pairing::default();
        let mut wrappers = vec![];
        let mut stack: Vec<Open> = vec![];

        for tag in self.pair_tags(&tokens.braces)? {
            match self.classify(tag)? {
                Tag::Wrapper => {
                    wrappers.push(tag);
                    pairing.removals.push(Region::at(tag.begin));
                    pairing.removals.push(Region::at(tag.end - 1));
                }
                Tag::Directive { marker, path, text } => {
                    if let Some(open) = pop_matching(&mut stack, text) {
                        pairing.removals.push(Region::new(open.tag.begin + 1..open.tag.end));
                        pairing.removals.push(Region::new(tag.begin..tag.end - 1));
                        pairing.contexts.push(Context {
                            origin: Region::new(open.tag.begin..tag.end),
                            marker: open.marker,
                            path: open.path,
                        });
                        continue;
                    }
                    if let Some(top) = stack.last() {
                        if stack.iter().any(|open| open.text == text) {
                            // Closes an outer directive while an inner one is open.
                            return Err(error_unclosed_directive(self.source, top.tag));
                        }
                    }
                    if stack.len() >= self.max_depth {
                        return Err(SyntaxError::build(NESTING_TOO_DEEP)
                            .with_pointer(self.source, tag)
                            .with_help(format!(
                                "at most {} directives may enclose each other",
                                self.max_depth
                            )));
                    }

                    stack.push(Open {
                        marker,
                        path,
                        text,
                        tag,
                    });
                }
            }
        }
        if let Some(open) = stack.last() {
            return Err(error_unclosed_directive(self.source, open.tag));
        }

        pairing.placeholders = self.pair_parens(&tokens.parens)?;
        self.check_wrappers(&wrappers, &pairing.placeholders)?;
        self.check_placeholders(&pairing.contexts, &pairing.placeholders)?;

        pairing
            .removals
            .extend(tokens.escapes.iter().map(|&offset| Region::at(offset)));

        Ok(pairing)
    }

    /// Pair braces into tags.
    ///
    /// Tags cannot contain other tags, so at most one brace is open at a time.
    fn pair_tags(&self, braces: &[(Token, usize)]) -> Result<Vec<Region>, SyntaxError> {
        let mut tags = vec![];
        let mut open: Option<usize> = None;

        for &(token, offset) in braces {
            match (token.is_begin(), open) {
                (true, None) => open = Some(offset),
                (true, Some(_)) => {
                    return Err(SyntaxError::build(UNEXPECTED_OPENING_BRACE)
                        .with_pointer(self.source, Region::at(offset))
                        .with_help(
                            "the previous tag is still open, close it with `}` \
                            or escape a literal brace with `\\{`",
                        ))
                }
                (false, Some(begin)) => {
                    tags.push(Region::new(begin..offset + 1));
                    open = None;
                }
                (false, None) => {
                    return Err(SyntaxError::build(UNEXPECTED_CLOSING_BRACE)
                        .with_pointer(self.source, Region::at(offset))
                        .with_help("escape a literal brace with `\\}`"))
                }
            }
        }
        if let Some(begin) = open {
            return Err(SyntaxError::build(UNCLOSED_BRACE)
                .with_pointer(self.source, Region::at(begin))
                .with_help("close the tag with `}` or escape a literal brace with `\\{`"));
        }

        Ok(tags)
    }

    /// Determine what kind of [`Tag`] the given [`Region`] holds.
    ///
    /// The marker is the nearest `!`, `?` or `*` before the closing brace, and
    /// must be the first character of the tag.
    fn classify(&self, tag: Region) -> Result<Tag<'source>, SyntaxError> {
        let text = &self.source[tag.inner()];
        if text.starts_with('(') {
            return Ok(Tag::Wrapper);
        }

        let index = text
            .rfind(|c| matches!(c, '!' | '?' | '*'))
            .ok_or_else(|| error_missing_marker(self.source, tag))?;
        if index != 0 || text.chars().any(char::is_whitespace) {
            return Err(error_malformed_marker(self.source, tag));
        }

        let marker = text
            .chars()
            .next()
            .and_then(|c| Marker::try_from(c).ok())
            .ok_or_else(|| error_malformed_marker(self.source, tag))?;
        let path = Path::parse(&text[1..]);
        if !path.is_valid() {
            return Err(error_malformed_marker(self.source, tag));
        }

        Ok(Tag::Directive { marker, path, text })
    }

    /// Pair parentheses into placeholders.
    fn pair_parens(&self, parens: &[(Token, usize)]) -> Result<Vec<Placeholder>, SyntaxError> {
        let mut placeholders = vec![];
        let mut stack = vec![];

        for &(token, offset) in parens {
            if token.is_begin() {
                stack.push(offset);
                continue;
            }

            let begin = stack.pop().ok_or_else(|| {
                SyntaxError::build(UNEXPECTED_CLOSING_PAREN)
                    .with_pointer(self.source, Region::at(offset))
                    .with_help("escape a literal paren with `\\)`")
            })?;
            placeholders.push(Placeholder::new(self.source, Region::new(begin..offset + 1)));
        }
        if let Some(&begin) = stack.last() {
            return Err(SyntaxError::build(UNCLOSED_PAREN)
                .with_pointer(self.source, Region::at(begin))
                .with_help("close the placeholder with `)` or escape a literal paren with `\\(`"));
        }

        placeholders.sort_by_key(|placeholder| placeholder.origin.begin);
        Ok(placeholders)
    }

    /// Ensure the content of each wrapper tag is exactly one placeholder.
    fn check_wrappers(
        &self,
        wrappers: &[Region],
        placeholders: &[Placeholder],
    ) -> Result<(), SyntaxError> {
        for wrapper in wrappers {
            let inner = wrapper.inner();
            if !placeholders.iter().any(|p| p.origin == inner) {
                return Err(error_malformed_marker(self.source, *wrapper));
            }
        }

        Ok(())
    }

    /// Ensure no placeholder crosses the boundary of a directive.
    fn check_placeholders(
        &self,
        contexts: &[Context],
        placeholders: &[Placeholder],
    ) -> Result<(), SyntaxError> {
        for placeholder in placeholders {
            if contexts.iter().any(|c| c.origin.straddles(placeholder.origin)) {
                return Err(SyntaxError::build(UNCLOSED_PAREN)
                    .with_pointer(self.source, Region::at(placeholder.origin.begin))
                    .with_help("close the placeholder before the directive around it ends"));
            }
        }

        Ok(())
    }
}

/// Pop the innermost open tag if the given tag text closes it.
fn pop_matching<'source>(stack: &mut Vec<Open<'source>>, text: &str) -> Option<Open<'source>> {
    match stack.last() {
        Some(open) if open.text == text => stack.pop(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::Matcher;
    use crate::{
        compile::{
            lex::Lexer,
            tree::{Marker, Modifier},
        },
        log::{
            SyntaxError, MALFORMED_MARKER, MISSING_MARKER, NESTING_TOO_DEEP, UNCLOSED_BRACE,
            UNCLOSED_PAREN, UNEXPECTED_CLOSING_BRACE, UNEXPECTED_CLOSING_PAREN,
            UNEXPECTED_OPENING_BRACE,
        },
        region::Region,
    };

    fn helper_pair(source: &str) -> Result<super::Pairing, SyntaxError> {
        Matcher::new(source, 8).pair(&Lexer::new(source).scan())
    }

    fn helper_error(source: &str) -> (String, usize, usize) {
        let error = helper_pair(source).unwrap_err();

        (error.reason().to_string(), error.line(), error.column())
    }

    #[test]
    fn test_pair_directive() {
        let pairing = helper_pair("{!name}Hello (name){!name}").unwrap();

        assert_eq!(pairing.contexts.len(), 1);
        assert_eq!(pairing.contexts[0].origin, Region::new(0..26));
        assert_eq!(pairing.contexts[0].marker, Marker::Show);
        assert_eq!(pairing.contexts[0].path.to_string(), "name");
        assert_eq!(pairing.placeholders.len(), 1);
        assert_eq!(pairing.placeholders[0].origin, Region::new(13..19));
        assert_eq!(
            pairing.removals,
            vec![Region::new(1..7), Region::new(19..25)]
        );
    }

    #[test]
    fn test_pair_nested_directives() {
        let pairing = helper_pair("{*a}{?a.b}x{?a.b}{*a}").unwrap();

        assert_eq!(pairing.contexts.len(), 2);
        assert_eq!(pairing.contexts[0].marker, Marker::Hide);
        assert_eq!(pairing.contexts[0].origin, Region::new(4..17));
        assert_eq!(pairing.contexts[1].marker, Marker::Repeat);
        assert_eq!(pairing.contexts[1].origin, Region::new(0..21));
    }

    #[test]
    fn test_pair_wrapper_and_modifier() {
        let pairing = helper_pair("{(#tags)}").unwrap();

        assert!(pairing.contexts.is_empty());
        assert_eq!(pairing.placeholders[0].modifier, Modifier::Join);
        assert_eq!(pairing.placeholders[0].origin, Region::new(1..8));
        assert_eq!(pairing.removals, vec![Region::at(0), Region::at(8)]);
    }

    #[test]
    fn test_pair_escapes() {
        let pairing = helper_pair(r"\{literal\}").unwrap();

        assert!(pairing.contexts.is_empty());
        assert_eq!(pairing.removals, vec![Region::at(0), Region::at(9)]);
    }

    #[test]
    fn test_error_empty_tag() {
        assert_eq!(helper_error("{}"), (MISSING_MARKER.to_string(), 1, 1));
    }

    #[test]
    fn test_error_malformed_marker() {
        assert_eq!(helper_error("a\n {x!a}"), (MALFORMED_MARKER.to_string(), 2, 2));
        assert_eq!(helper_error("{! a}"), (MALFORMED_MARKER.to_string(), 1, 1));
        assert_eq!(helper_error("{!}"), (MALFORMED_MARKER.to_string(), 1, 1));
        assert_eq!(helper_error("{(a) b}"), (MALFORMED_MARKER.to_string(), 1, 1));
    }

    #[test]
    fn test_error_unclosed_directive() {
        assert_eq!(helper_error("{!a}"), (UNCLOSED_BRACE.to_string(), 1, 1));
        assert_eq!(
            helper_error("<ul>\n  {*a}{!b}\n{*a}"),
            (UNCLOSED_BRACE.to_string(), 2, 7)
        );
    }

    #[test]
    fn test_error_braces() {
        assert_eq!(helper_error("}"), (UNEXPECTED_CLOSING_BRACE.to_string(), 1, 1));
        assert_eq!(
            helper_error("one\ntwo }"),
            (UNEXPECTED_CLOSING_BRACE.to_string(), 2, 5)
        );
        assert_eq!(helper_error("x {!a"), (UNCLOSED_BRACE.to_string(), 1, 3));
        assert_eq!(helper_error("{{"), (UNEXPECTED_OPENING_BRACE.to_string(), 1, 2));
    }

    #[test]
    fn test_error_parens() {
        assert_eq!(helper_error("a)"), (UNEXPECTED_CLOSING_PAREN.to_string(), 1, 2));
        assert_eq!(helper_error("\n((a)"), (UNCLOSED_PAREN.to_string(), 2, 1));
        assert_eq!(helper_error("(a{!b})x{!b}"), (UNCLOSED_PAREN.to_string(), 1, 1));
    }

    #[test]
    fn test_error_nesting_too_deep() {
        let source: String = (0..9).map(|i| format!("{{*a{i}}}")).collect();

        assert_eq!(helper_error(&source).0, NESTING_TOO_DEEP);
    }
}
