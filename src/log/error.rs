use super::{locate, Pointer, RED, RESET};
use crate::{log::Visual, region::Region};
use std::fmt::{Debug, Display, Formatter, Result};

/// Describes a structural problem in a template, and allows adding a
/// contextual help text and visualization.
///
/// # Examples
///
/// Creating a [`SyntaxError`] that includes a [`Visual`] of type [`Pointer`]:
///
/// ```
/// use brace::{Region, SyntaxError};
///
/// let error = SyntaxError::build("unclosed opening brace")
///     .with_pointer("<p>{!name}</p>", Region::at(3))
///     .with_name("member.html")
///     .with_help("close the directive with a matching `{!name}` tag");
///
/// assert_eq!(error.line(), 1);
/// assert_eq!(error.column(), 4);
/// ```
///
/// When printed with `println!("{:#}", error)` the [`SyntaxError`] produces this
/// output:
///
/// ```text
/// error: unclosed opening brace
///   --> member.html:1:4
///    |
///  1 | <p>{!name}</p>
///    |    ^--
///    |
///   = help: close the directive with a matching `{!name}` tag
/// ```
pub struct SyntaxError {
    /// Describes the cause of the [`SyntaxError`].
    reason: String,
    /// A visualization to help illustrate the [`SyntaxError`].
    visual: Option<Box<dyn Visual>>,
    /// Additional information to display with the [`SyntaxError`].
    help: Option<String>,
    /// The name of the Template that the [`SyntaxError`] comes from.
    name: Option<String>,
    /// One-based line of the offending character, zero when unknown.
    line: usize,
    /// One-based column of the offending character, zero when unknown.
    column: usize,
}

impl SyntaxError {
    /// Create a new [`SyntaxError`] with the given reason text.
    ///
    /// The additional fields may be populated using the various methods
    /// defined on `SyntaxError`.
    pub fn build<T>(reason: T) -> Self
    where
        T: Into<String>,
    {
        SyntaxError {
            reason: reason.into(),
            name: None,
            visual: None,
            help: None,
            line: 0,
            column: 0,
        }
    }

    /// Set the reason text, which is a short summary of the [`SyntaxError`].
    pub fn with_reason<T>(mut self, text: T) -> Self
    where
        T: Into<String>,
    {
        self.reason = text.into();

        self
    }

    /// Set the name text, which is the name of the [`Template`][`crate::Template`]
    /// that the [`SyntaxError`] is related to.
    pub fn with_name<T>(mut self, text: T) -> Self
    where
        T: Into<String>,
    {
        self.name = Some(text.into());

        self
    }

    /// Set the [`Visual`], which is a visualization that helps illustrate the
    /// cause of the error.
    pub fn with_visual(mut self, visual: impl Visual + 'static) -> Self {
        self.visual = Some(Box::new(visual));

        self
    }

    /// Point the [`SyntaxError`] at the given [`Region`] of the source text.
    ///
    /// Sets the line and column from the beginning of the `Region`, and sets
    /// the visualization to a new [`Pointer`].
    pub fn with_pointer<T>(mut self, source: &str, region: T) -> Self
    where
        T: Into<Region>,
    {
        let region = region.into();
        let (line, column) = locate(source, region.begin);
        self.line = line + 1;
        self.column = column;
        self.visual = Some(Box::new(Pointer::new(source, region)));

        self
    }

    /// Set the help text, which is contextual information to accompany the
    /// reason text.
    pub fn with_help<T>(mut self, text: T) -> Self
    where
        T: Into<String>,
    {
        self.help = Some(text.into());

        self
    }

    /// Return the reason text.
    pub fn reason(&self) -> &str {
        &self.reason
    }

    /// Return the help text, if any.
    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    /// Return the name of the `Template` that the error is related to.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Return the one-based line of the offending character.
    pub fn line(&self) -> usize {
        self.line
    }

    /// Return the one-based column of the offending character.
    pub fn column(&self) -> usize {
        self.column
    }
}

impl Debug for SyntaxError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        if !f.alternate() {
            writeln!(f, "{self:#}")?;
        }
        f.debug_struct("SyntaxError")
            .field("reason", &self.reason)
            .field("line", &self.line)
            .field("column", &self.column)
            .field("name", &self.name)
            .field("visual", &self.visual)
            .field("help", &self.help)
            .finish()?;

        Ok(())
    }
}

impl Display for SyntaxError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let header = format!("{RED}error{RESET}");
        write!(f, "{header}: {}", self.reason)?;

        if let Some(visual) = self.visual.as_ref().filter(|_| f.alternate()) {
            return visual.display(f, self.name.as_deref(), self.help.as_deref());
        }
        if self.line > 0 {
            write!(f, " at {}:{}", self.line, self.column)?;
        }

        Ok(())
    }
}

impl std::error::Error for SyntaxError {}

impl PartialEq for SyntaxError {
    fn eq(&self, other: &Self) -> bool {
        self.reason == other.reason
            && self.help == other.help
            && self.name == other.name
            && self.line == other.line
            && self.column == other.column
    }
}
