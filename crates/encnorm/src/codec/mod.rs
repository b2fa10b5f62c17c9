//! Low-level text codecs: charset lookup and decoding, escape interpretation.

pub mod charset;
pub mod escape;

pub use charset::{Charset, decode_lossy, decode_utf8, resolve_label};
pub use escape::unescape;
