//! The text-or-bytes value type.
//!
//! Ambiguous inputs are classified once, where they enter the program, by
//! converting them into a [`Value`]. Everything downstream matches on the
//! variant instead of probing the value at runtime.

use std::borrow::Cow;
use std::ffi::OsStr;
use std::path::Path;

/// Which representation a [`Value`] holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// Unicode text, the canonical in-memory form.
    Text,
    /// Raw bytes, the canonical I/O-boundary form.
    Binary,
}

/// A value that is either text or raw bytes.
///
/// Borrowed variants let the normalizer hand back its input without copying
/// when no conversion is needed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Value<'a> {
    /// Unicode text.
    Text(Cow<'a, str>),
    /// Raw bytes of unknown encoding.
    Binary(Cow<'a, [u8]>),
}

impl<'a> Value<'a> {
    /// Returns which representation this value holds.
    pub fn kind(&self) -> Kind {
        match self {
            Value::Text(_) => Kind::Text,
            Value::Binary(_) => Kind::Binary,
        }
    }

    /// Returns the length in bytes (UTF-8 bytes for text).
    pub fn len(&self) -> usize {
        match self {
            Value::Text(s) => s.len(),
            Value::Binary(b) => b.len(),
        }
    }

    /// Returns true if the value is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Converts into a value that owns its contents.
    pub fn into_owned(self) -> Value<'static> {
        match self {
            Value::Text(s) => Value::Text(Cow::Owned(s.into_owned())),
            Value::Binary(b) => Value::Binary(Cow::Owned(b.into_owned())),
        }
    }
}

impl<'a> From<&'a str> for Value<'a> {
    fn from(s: &'a str) -> Self {
        Value::Text(Cow::Borrowed(s))
    }
}

impl From<String> for Value<'static> {
    fn from(s: String) -> Self {
        Value::Text(Cow::Owned(s))
    }
}

impl<'a> From<&'a String> for Value<'a> {
    fn from(s: &'a String) -> Self {
        Value::Text(Cow::Borrowed(s.as_str()))
    }
}

impl<'a> From<Cow<'a, str>> for Value<'a> {
    fn from(s: Cow<'a, str>) -> Self {
        Value::Text(s)
    }
}

impl<'a> From<&'a [u8]> for Value<'a> {
    fn from(b: &'a [u8]) -> Self {
        Value::Binary(Cow::Borrowed(b))
    }
}

impl<'a, const N: usize> From<&'a [u8; N]> for Value<'a> {
    fn from(b: &'a [u8; N]) -> Self {
        Value::Binary(Cow::Borrowed(b.as_slice()))
    }
}

impl From<Vec<u8>> for Value<'static> {
    fn from(b: Vec<u8>) -> Self {
        Value::Binary(Cow::Owned(b))
    }
}

impl<'a> From<&'a Vec<u8>> for Value<'a> {
    fn from(b: &'a Vec<u8>) -> Self {
        Value::Binary(Cow::Borrowed(b.as_slice()))
    }
}

impl<'a> From<Cow<'a, [u8]>> for Value<'a> {
    fn from(b: Cow<'a, [u8]>) -> Self {
        Value::Binary(b)
    }
}

/// On Unix, OS strings are raw bytes in the filesystem encoding.
#[cfg(unix)]
impl<'a> From<&'a OsStr> for Value<'a> {
    fn from(s: &'a OsStr) -> Self {
        use std::os::unix::ffi::OsStrExt;
        Value::Binary(Cow::Borrowed(s.as_bytes()))
    }
}

/// Elsewhere, OS strings are already Unicode (modulo unpaired surrogates).
#[cfg(not(unix))]
impl<'a> From<&'a OsStr> for Value<'a> {
    fn from(s: &'a OsStr) -> Self {
        Value::Text(s.to_string_lossy())
    }
}

impl<'a> From<&'a Path> for Value<'a> {
    fn from(p: &'a Path) -> Self {
        Value::from(p.as_os_str())
    }
}
