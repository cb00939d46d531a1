use crate::Error;
use std::{
    fs,
    io::Read,
    path::{Path, PathBuf},
};
use tracing::debug;

/// The places a template may be read from.
///
/// Exactly one source must be given before the template is loaded.
///
/// # Examples
///
/// ```
/// use brace::Sources;
///
/// let text = Sources::new().with_text("{!a}(a){!a}").load();
/// assert_eq!(text.unwrap(), "{!a}(a){!a}");
///
/// assert!(Sources::new().load().is_err());
/// ```
#[derive(Default)]
pub struct Sources<'a> {
    text: Option<&'a str>,
    file: Option<PathBuf>,
    stream: Option<Box<dyn Read + 'a>>,
}

impl<'a> Sources<'a> {
    /// Create an empty set of Sources.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the template from the given text.
    ///
    /// Returns the Sources, so additional methods may be chained.
    #[inline]
    pub fn with_text(mut self, text: &'a str) -> Self {
        self.text = Some(text);
        self
    }

    /// Read the template from the file at the given path.
    ///
    /// Returns the Sources, so additional methods may be chained.
    #[inline]
    pub fn with_file<P>(mut self, path: P) -> Self
    where
        P: AsRef<Path>,
    {
        self.file = Some(path.as_ref().to_path_buf());
        self
    }

    /// Read the template from the given stream, until it ends.
    ///
    /// Returns the Sources, so additional methods may be chained.
    #[inline]
    pub fn with_stream<R>(mut self, stream: R) -> Self
    where
        R: Read + 'a,
    {
        self.stream = Some(Box::new(stream));
        self
    }

    /// Return the text of the template.
    ///
    /// # Errors
    ///
    /// Returns an [`Error::Usage`] unless exactly one source was given, or an
    /// [`Error::Io`] if reading the file or stream fails.
    pub fn load(self) -> Result<String, Error> {
        let count = [
            self.text.is_some(),
            self.file.is_some(),
            self.stream.is_some(),
        ]
        .into_iter()
        .filter(|given| *given)
        .count();
        if count != 1 {
            return Err(Error::usage(format!(
                "expected exactly one template source, found {count}"
            )));
        }

        if let Some(text) = self.text {
            return Ok(text.to_string());
        }
        if let Some(path) = self.file {
            debug!(path = %path.display(), "reading template file");
            return Ok(fs::read_to_string(path)?);
        }

        let mut text = String::new();
        if let Some(mut stream) = self.stream {
            stream.read_to_string(&mut text)?;
        }

        Ok(text)
    }
}
