//! Host environment facts and file helpers.

pub mod env;
pub mod fs;

pub use env::{ON_WINDOWS, filesystem_encoding, filesystem_encoding_name};
pub use fs::{read_binary, read_text, write_text};
