//! File helpers that normalize contents at the I/O boundary.
//!
//! Text is written as UTF-8 and read back through [`Normalizer::to_text`], so
//! files of unknown encoding still produce text.

use std::path::Path;

use crate::error::FsError;
use crate::model::Value;
use crate::normalize::Normalizer;

impl Normalizer {
    /// Reads a file and decodes its contents with [`to_text`](Self::to_text).
    pub fn read_text(&self, path: impl AsRef<Path>) -> Result<String, FsError> {
        let bytes = read_binary(path)?;
        Ok(self.to_text(bytes).into_owned())
    }

    /// Writes a value to a file, encoding text with [`to_binary`](Self::to_binary).
    pub fn write_text<'a>(
        &self,
        path: impl AsRef<Path>,
        value: impl Into<Value<'a>>,
    ) -> Result<(), FsError> {
        let path = path.as_ref();
        std::fs::write(path, self.to_binary(value)).map_err(|source| FsError::Write {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Reads a file as raw bytes.
pub fn read_binary(path: impl AsRef<Path>) -> Result<Vec<u8>, FsError> {
    let path = path.as_ref();
    std::fs::read(path).map_err(|source| FsError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads a file as text using the default normalizer.
pub fn read_text(path: impl AsRef<Path>) -> Result<String, FsError> {
    Normalizer::global().read_text(path)
}

/// Writes a value to a file as UTF-8 using the default normalizer.
pub fn write_text<'a>(path: impl AsRef<Path>, value: impl Into<Value<'a>>) -> Result<(), FsError> {
    Normalizer::global().write_text(path, value)
}
