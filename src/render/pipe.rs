use crate::compile::Modifier;
use serde_json::{Map, Value};
use std::fmt::{Arguments, Display, Result, Write};

/// Separator placed between the items of a joined sequence.
const JOIN_SEPARATOR: &str = ", ";

/// Wraps some underlying buffer by providing methods that write to it
/// in different formats.
pub struct Pipe<'buffer> {
    buffer: &'buffer mut (dyn Write + 'buffer),
}

impl<'buffer> Pipe<'buffer> {
    /// Create a new Pipe that writes to the given buffer.
    pub fn new(buffer: &'buffer mut String) -> Self {
        Self { buffer }
    }

    /// Write the value of a placeholder, formatted by the given [`Modifier`].
    ///
    /// Nothing is written for an absent value.
    pub fn write_placeholder(&mut self, value: Option<&Value>, modifier: Modifier) -> Result {
        let Some(value) = value.filter(|v| !v.is_null()) else {
            return Ok(());
        };

        match modifier {
            Modifier::Plain => self.write_value(value),
            Modifier::Lowercase => self.write_lowercase(value),
            Modifier::Join => self.write_joined(value),
        }
    }

    /// Write the given Value to the Pipe buffer.
    ///
    /// The Pipe will handle formatting the value.
    ///
    /// # Errors
    ///
    /// The Pipe supports all Value types, so the only error that will
    /// be returned is propogated from the [write!] macro itself.
    pub fn write_value(&mut self, value: &Value) -> Result {
        match value {
            Value::Null => self.write_null(),
            Value::String(string) => self.write_str(string),
            Value::Array(array) => self.write_array(array),
            Value::Object(object) => self.write_object(object),
            _ => self.write_display(value),
        }
    }

    /// Write the value with its first character lower-cased.
    fn write_lowercase(&mut self, value: &Value) -> Result {
        let mut text = String::new();
        Pipe::new(&mut text).write_value(value)?;

        let mut chars = text.chars();
        if let Some(first) = chars.next() {
            for c in first.to_lowercase() {
                self.write_char(c)?;
            }
            self.write_str(chars.as_str())?;
        }

        Ok(())
    }

    /// Write a sequence of text as a comma separated list.
    ///
    /// Anything other than a sequence made only of text writes nothing.
    fn write_joined(&mut self, value: &Value) -> Result {
        let Some(items) = value.as_array() else {
            return Ok(());
        };
        let texts: Option<Vec<&str>> = items.iter().map(Value::as_str).collect();

        match texts {
            Some(texts) => self.write_str(&texts.join(JOIN_SEPARATOR)),
            None => Ok(()),
        }
    }

    /// Write the value to the buffer using the Display implementation.
    fn write_display(&mut self, value: impl Display) -> Result {
        write!(self.buffer, "{}", value)
    }

    /// Write the literal text "null" to the buffer.
    fn write_null(&mut self) -> Result {
        write!(self.buffer, "null")
    }

    /// Write the value to the buffer as a comma separated list and
    /// surrounded by brackets.
    fn write_array(&mut self, value: &[Value]) -> Result {
        write!(self.buffer, "[")?;
        let mut iter = value.iter();
        if let Some(item) = iter.next() {
            self.write_value(item)?;
            for item in iter {
                write!(self.buffer, "{JOIN_SEPARATOR}")?;
                self.write_value(item)?;
            }
        }
        write!(self.buffer, "]")
    }

    /// Write the value to the buffer as key/value pairs and surrounded
    /// by curly braces.
    fn write_object(&mut self, value: &Map<String, Value>) -> Result {
        write!(self.buffer, "{{")?;
        let mut iter = value.iter();
        if let Some((key, value)) = iter.next() {
            write!(self.buffer, "{}: ", key)?;
            self.write_value(value)?;
            for (key, value) in iter {
                write!(self.buffer, "{JOIN_SEPARATOR}{}: ", key)?;
                self.write_value(value)?;
            }
        }
        write!(self.buffer, "}}")
    }
}

impl Write for Pipe<'_> {
    #[inline]
    fn write_str(&mut self, s: &str) -> Result {
        Write::write_str(self.buffer, s)
    }

    #[inline]
    fn write_char(&mut self, c: char) -> Result {
        Write::write_char(self.buffer, c)
    }

    #[inline]
    fn write_fmt(&mut self, args: Arguments<'_>) -> Result {
        Write::write_fmt(self.buffer, args)
    }
}
