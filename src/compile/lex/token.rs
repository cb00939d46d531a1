/// The character used to escape a delimiter.
pub const ESCAPE: char = '\\';

/// Delimiters recognized by the Lexer.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Token {
    /// Beginning of a directive tag - `{`.
    BeginTag,
    /// End of a directive tag - `}`.
    EndTag,
    /// Beginning of a placeholder - `(`.
    BeginPlaceholder,
    /// End of a placeholder - `)`.
    EndPlaceholder,
}

impl Token {
    /// Return the [`Token`] for the given character, if it is a delimiter.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '{' => Some(Token::BeginTag),
            '}' => Some(Token::EndTag),
            '(' => Some(Token::BeginPlaceholder),
            ')' => Some(Token::EndPlaceholder),
            _ => None,
        }
    }

    /// Return true if this [`Token`] opens a span.
    pub fn is_begin(&self) -> bool {
        matches!(self, Token::BeginTag | Token::BeginPlaceholder)
    }

    /// Return true if this [`Token`] is a brace.
    pub fn is_brace(&self) -> bool {
        matches!(self, Token::BeginTag | Token::EndTag)
    }
}
