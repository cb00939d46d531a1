use crate::log::SyntaxError;
use thiserror::Error;

/// The error type returned when compiling or rendering a template.
///
/// Only [`Error::Syntax`] describes a problem inside a template. The other
/// variants report a mistake by the caller or a failure to read the template.
#[derive(Debug, Error)]
pub enum Error {
    /// The template text is structurally malformed.
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
    /// The engine was called incorrectly, for example with no template
    /// source or with a null data object.
    #[error("usage error: {0}")]
    Usage(String),
    /// Reading a template file or stream failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// A value could not be converted into template data.
    #[error("value is unserializable: {0}")]
    Serialize(#[from] serde_json::Error),
    /// Writing rendered text failed.
    #[error("failed to write result of render")]
    Write(#[from] std::fmt::Error),
}

impl Error {
    /// Create an [`Error::Usage`] with the given message.
    pub fn usage<T>(message: T) -> Self
    where
        T: Into<String>,
    {
        Error::Usage(message.into())
    }

    /// Return the [`SyntaxError`] if this is a syntax error.
    pub fn as_syntax(&self) -> Option<&SyntaxError> {
        match self {
            Error::Syntax(error) => Some(error),
            _ => None,
        }
    }

    /// Return true if this is an [`Error::Usage`].
    pub fn is_usage(&self) -> bool {
        matches!(self, Error::Usage(_))
    }
}
