//! encnorm: text/binary encoding normalization with graceful fallback.
//!
//! This crate converts ambiguous text-or-bytes values into one canonical
//! representation, tolerating inputs that are already normalized, unknown
//! encodings, and filesystem-specific encoding rules.
//!
//! # Quick Start
//!
//! ```rust
//! use encnorm::{to_binary, to_text, unescape_to_text, to_filesystem_text};
//!
//! assert_eq!(to_binary("café").as_ref(), b"caf\xc3\xa9");
//! assert_eq!(to_text(b"caf\xc3\xa9"), "café");
//! assert_eq!(unescape_to_text("a\\tb"), "a\tb");
//! assert_eq!(to_filesystem_text("/tmp/already-text"), "/tmp/already-text");
//!
//! // Malformed UTF-8 never fails; it degrades to replacement characters.
//! assert_eq!(to_text(b"caf\xe9"), "caf\u{FFFD}");
//! ```
//!
//! Inject a [`Detector`] to guess the encoding of malformed input:
//!
//! ```rust
//! use encnorm::Normalizer;
//!
//! let normalizer = Normalizer::new()
//!     .with_detector(|_: &[u8]| Some("windows-1252".to_string()));
//! assert_eq!(normalizer.to_text(b"caf\xe9"), "café");
//! ```
//!
//! # Modules
//!
//! - [`model`]: The [`Value`] sum type (text or bytes)
//! - [`normalize`]: The [`Normalizer`] and its four operations
//! - [`codec`]: Charset lookup, lossy decoding, escape interpretation
//! - [`util`]: Filesystem encoding constant and file helpers
//! - [`error`]: Error types
//!
//! # Features
//!
//! - `detect`: enables [`ChardetDetector`], a statistical detector backed by
//!   `chardetng`.
//!
//! # Logging
//!
//! Degradation paths (malformed UTF-8, unknown detected encodings, malformed
//! escapes) emit `tracing` events. No subscriber is installed by this crate.

pub mod codec;
pub mod error;
pub mod model;
pub mod normalize;
pub mod util;

// Re-export commonly used types at crate root
pub use codec::{Charset, resolve_label, unescape};
pub use error::{ConfigError, EscapeError, FsError};
pub use model::{Kind, Value};
pub use normalize::{
    Detector, NoDetector, Normalizer, NormalizerOptions, to_binary, to_filesystem_text, to_text,
    unescape_to_text,
};
pub use util::{
    ON_WINDOWS, filesystem_encoding, filesystem_encoding_name, read_binary, read_text, write_text,
};

#[cfg(feature = "detect")]
pub use normalize::ChardetDetector;

/// Re-exported so callers can build a [`Charset`] from any WHATWG encoding.
pub use encoding_rs::Encoding;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
