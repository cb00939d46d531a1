mod pointer;

pub use pointer::Pointer;

use std::fmt::{Debug, Formatter, Result};

const BLANK: &str = "";
const PIPE: &str = "|";
const EQUAL: &str = "=";
const HIGHLIGHT: &str = "^";

/// Describes a type that can be associated with an Error and used
/// to print a visualization.
pub trait Visual: Debug {
    /// Display the visualization by writing to the given Formatter.
    fn display(
        &self,
        formatter: &mut Formatter<'_>,
        template: Option<&str>,
        help: Option<&str>,
    ) -> Result;
}

/// Return the line and column of the character at `offset` within `text`.
///
/// The line is the number of line breaks strictly before `offset`, starting
/// from zero. The column counts characters from the nearest preceding line
/// break, starting from one.
///
/// # Examples
///
/// ```
/// use brace::locate;
///
/// assert_eq!(locate("abc", 0), (0, 1));
/// assert_eq!(locate("ab\ncd", 4), (1, 2));
/// ```
pub fn locate(text: &str, offset: usize) -> (usize, usize) {
    let offset = offset.min(text.len());
    let before = &text[..offset];
    let line = before.matches('\n').count();
    let line_begin = before.rfind('\n').map(|index| index + 1).unwrap_or(0);
    let column = before[line_begin..].chars().count() + 1;

    (line, column)
}

/// Wrapper for UnicodeWidthStr::width.
fn get_width(s: &str) -> usize {
    unicode_width::UnicodeWidthStr::width(s)
}

#[cfg(test)]
mod tests {
    use super::locate;

    #[test]
    fn test_locate_first_line() {
        assert_eq!(locate("{}", 0), (0, 1));
        assert_eq!(locate("ab}", 2), (0, 3));
    }

    #[test]
    fn test_locate_after_line_breaks() {
        let text = "one\ntwo\n  }";

        assert_eq!(locate(text, 4), (1, 1));
        assert_eq!(locate(text, 10), (2, 3));
    }

    #[test]
    fn test_locate_counts_characters() {
        // "é" is two bytes wide.
        assert_eq!(locate("é}", 2), (0, 2));
    }

    #[test]
    fn test_locate_at_line_break() {
        assert_eq!(locate("ab\ncd", 2), (0, 3));
    }
}
