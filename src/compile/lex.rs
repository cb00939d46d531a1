pub mod token;

use self::token::{Token, ESCAPE};

/// Delimiters found in a source text, in ascending order of offset.
#[derive(Debug, Default, PartialEq)]
pub struct Tokens {
    /// Every unescaped `{` and `}`.
    pub braces: Vec<(Token, usize)>,
    /// Every unescaped `(` and `)`.
    pub parens: Vec<(Token, usize)>,
    /// Offsets of the backslashes that escape a delimiter.
    pub escapes: Vec<usize>,
}

/// Scans source text for delimiters.
pub struct Lexer<'source> {
    /// Reference to the source text.
    pub source: &'source str,
}

impl<'source> Lexer<'source> {
    /// Create a new [`Lexer`] over the given source.
    #[inline]
    pub fn new(source: &'source str) -> Self {
        Self { source }
    }

    /// Return every delimiter within the source.
    ///
    /// A delimiter immediately preceded by a backslash is literal text, and
    /// the backslash is recorded so it can be stripped later.
    pub fn scan(&self) -> Tokens {
        let mut tokens = Tokens::default();
        let mut previous: Option<char> = None;

        for (index, char) in self.source.char_indices() {
            match Token::from_char(char) {
                Some(_) if previous == Some(ESCAPE) => {
                    tokens.escapes.push(index - ESCAPE.len_utf8());
                }
                Some(token) if token.is_brace() => tokens.braces.push((token, index)),
                Some(token) => tokens.parens.push((token, index)),
                None => {}
            }
            previous = Some(char);
        }

        tokens
    }
}
