//! The encoding normalizer.
//!
//! Four operations convert a [`Value`] into one canonical representation,
//! returning the input untouched when it already has that form:
//!
//! - [`to_binary`]: text is encoded as UTF-8.
//! - [`to_text`]: bytes are decoded as UTF-8, falling back to a detected or
//!   configured encoding when they are malformed.
//! - [`unescape_to_text`]: backslash escapes are resolved.
//! - [`to_filesystem_text`]: bytes are decoded with the filesystem encoding.
//!
//! None of them fail. Malformed input degrades to best-effort text with
//! U+FFFD replacement characters.
//!
//! The free functions use a process-wide default [`Normalizer`]. Build your
//! own to inject a [`Detector`] or change the fallback encoding.

pub mod detect;

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use lazy_static::lazy_static;

use crate::codec::{Charset, decode_utf8, resolve_label, unescape};
use crate::error::ConfigError;
use crate::model::Value;
use crate::util::env::filesystem_encoding;

pub use detect::{Detector, NoDetector};

#[cfg(feature = "detect")]
pub use detect::ChardetDetector;

lazy_static! {
    static ref DEFAULT: Normalizer = Normalizer::new();
}

/// Encodings used by a [`Normalizer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizerOptions {
    /// Used for malformed UTF-8 when the detector has no usable answer.
    pub fallback_encoding: Charset,
    /// Used by [`Normalizer::to_filesystem_text`].
    pub filesystem_encoding: Charset,
}

impl Default for NormalizerOptions {
    fn default() -> Self {
        Self {
            fallback_encoding: Charset::utf8(),
            filesystem_encoding: filesystem_encoding(),
        }
    }
}

impl NormalizerOptions {
    /// Creates options with a UTF-8 fallback and the host filesystem encoding.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the fallback encoding by label.
    pub fn with_fallback_label(mut self, label: &str) -> Result<Self, ConfigError> {
        self.fallback_encoding = lookup(label)?;
        Ok(self)
    }

    /// Sets the filesystem encoding by label.
    pub fn with_filesystem_label(mut self, label: &str) -> Result<Self, ConfigError> {
        self.filesystem_encoding = lookup(label)?;
        Ok(self)
    }
}

fn lookup(label: &str) -> Result<Charset, ConfigError> {
    resolve_label(label).ok_or_else(|| ConfigError::UnknownEncoding {
        label: label.to_string(),
    })
}

/// Converts text-or-bytes values into canonical representations.
///
/// Cheap to clone; the detector is shared.
#[derive(Clone)]
pub struct Normalizer {
    options: NormalizerOptions,
    detector: Arc<dyn Detector>,
}

impl fmt::Debug for Normalizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Normalizer")
            .field("fallback_encoding", &self.options.fallback_encoding.name())
            .field("filesystem_encoding", &self.options.filesystem_encoding.name())
            .field("detector", &self.detector.name())
            .finish()
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Normalizer {
    /// Creates a normalizer with default options and no detector.
    pub fn new() -> Self {
        Self::with_options(NormalizerOptions::default())
    }

    /// Creates a normalizer with the given options and no detector.
    pub fn with_options(options: NormalizerOptions) -> Self {
        Self {
            options,
            detector: Arc::new(NoDetector),
        }
    }

    /// Replaces the detector consulted for malformed UTF-8.
    pub fn with_detector(mut self, detector: impl Detector + 'static) -> Self {
        self.detector = Arc::new(detector);
        self
    }

    /// Returns the process-wide default normalizer.
    pub fn global() -> &'static Normalizer {
        &DEFAULT
    }

    /// Returns the configured encodings.
    pub fn options(&self) -> &NormalizerOptions {
        &self.options
    }

    /// Encodes text as UTF-8; bytes are returned unchanged.
    pub fn to_binary<'a>(&self, value: impl Into<Value<'a>>) -> Cow<'a, [u8]> {
        match value.into() {
            Value::Text(Cow::Borrowed(s)) => Cow::Borrowed(s.as_bytes()),
            Value::Text(Cow::Owned(s)) => Cow::Owned(s.into_bytes()),
            Value::Binary(b) => b,
        }
    }

    /// Decodes bytes as UTF-8; text is returned unchanged.
    ///
    /// Malformed UTF-8 is decoded with the encoding named by the detector,
    /// or with the fallback encoding when the detector has no answer or
    /// names an unknown encoding.
    pub fn to_text<'a>(&self, value: impl Into<Value<'a>>) -> Cow<'a, str> {
        match value.into() {
            Value::Text(s) => s,
            Value::Binary(Cow::Borrowed(b)) => match decode_utf8(b) {
                Some(s) => Cow::Borrowed(s),
                None => self.decode_malformed(b),
            },
            Value::Binary(Cow::Owned(b)) => match String::from_utf8(b) {
                Ok(s) => Cow::Owned(s),
                Err(err) => Cow::Owned(self.decode_malformed(err.as_bytes()).into_owned()),
            },
        }
    }

    /// Resolves backslash escapes, returning the input unchanged when it
    /// contains a malformed escape.
    ///
    /// Bytes are first normalized with [`to_text`](Self::to_text).
    pub fn unescape_to_text<'a>(&self, value: impl Into<Value<'a>>) -> Cow<'a, str> {
        match self.to_text(value) {
            Cow::Borrowed(s) => unescape_or_keep(s).map_or(Cow::Borrowed(s), Cow::Owned),
            Cow::Owned(s) => Cow::Owned(unescape_or_keep(&s).unwrap_or(s)),
        }
    }

    /// Decodes bytes with the filesystem encoding; text is returned unchanged.
    pub fn to_filesystem_text<'a>(&self, value: impl Into<Value<'a>>) -> Cow<'a, str> {
        let encoding = self.options.filesystem_encoding;
        match value.into() {
            Value::Text(s) => s,
            Value::Binary(Cow::Borrowed(b)) => encoding.decode(b),
            Value::Binary(Cow::Owned(b)) => Cow::Owned(encoding.decode(&b).into_owned()),
        }
    }

    fn decode_malformed<'a>(&self, bytes: &'a [u8]) -> Cow<'a, str> {
        tracing::debug!(
            len = bytes.len(),
            detector = self.detector.name(),
            "input is not valid UTF-8, consulting detector"
        );
        let fallback = self.options.fallback_encoding;
        let encoding = match self.detector.detect(bytes) {
            Some(name) => resolve_label(&name).unwrap_or_else(|| {
                tracing::warn!(
                    detected = %name,
                    fallback = fallback.name(),
                    "detector named an unknown encoding"
                );
                fallback
            }),
            None => fallback,
        };
        encoding.decode(bytes)
    }
}

/// Returns the unescaped text when it differs from `s`.
fn unescape_or_keep(s: &str) -> Option<String> {
    match unescape(s) {
        Ok(Cow::Owned(out)) => Some(out),
        Ok(Cow::Borrowed(_)) => None,
        Err(err) => {
            tracing::debug!(error = %err, "malformed escape, keeping input");
            None
        }
    }
}

/// Encodes text as UTF-8; bytes are returned unchanged.
pub fn to_binary<'a>(value: impl Into<Value<'a>>) -> Cow<'a, [u8]> {
    DEFAULT.to_binary(value)
}

/// Decodes bytes as UTF-8 (lossy on malformed input); text is returned
/// unchanged.
pub fn to_text<'a>(value: impl Into<Value<'a>>) -> Cow<'a, str> {
    DEFAULT.to_text(value)
}

/// Resolves backslash escapes; malformed input is returned unchanged.
pub fn unescape_to_text<'a>(value: impl Into<Value<'a>>) -> Cow<'a, str> {
    DEFAULT.unescape_to_text(value)
}

/// Decodes bytes with the host filesystem encoding; text is returned
/// unchanged.
pub fn to_filesystem_text<'a>(value: impl Into<Value<'a>>) -> Cow<'a, str> {
    DEFAULT.to_filesystem_text(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use encoding_rs::{SHIFT_JIS, WINDOWS_1252};
    use std::path::Path;

    fn latin1_detector(_: &[u8]) -> Option<String> {
        Some("windows-1252".to_string())
    }

    #[test]
    fn test_to_binary_encodes_utf8() {
        assert_eq!(to_binary("café").as_ref(), b"caf\xc3\xa9");
        assert_eq!(to_binary(String::from("café")).len(), 5);
    }

    #[test]
    fn test_to_binary_passes_bytes_through() {
        let bytes = b"\xff\x00raw";
        let out = to_binary(bytes);
        assert!(matches!(out, Cow::Borrowed(_)));
        assert_eq!(out.as_ref(), bytes);
    }

    #[test]
    fn test_to_text_decodes_utf8() {
        assert_eq!(to_text(b"caf\xc3\xa9"), "café");
        assert_eq!(to_text(b"caf\xc3\xa9".to_vec()), "café");
    }

    #[test]
    fn test_to_text_borrows_when_possible() {
        assert!(matches!(to_text("already text"), Cow::Borrowed("already text")));
        assert!(matches!(to_text(b"ascii"), Cow::Borrowed("ascii")));
    }

    #[test]
    fn test_to_text_malformed_without_detector() {
        assert_eq!(to_text(b"caf\xe9"), "caf\u{FFFD}");
        assert_eq!(to_text(vec![0xffu8, b'a']), "\u{FFFD}a");
    }

    #[test]
    fn test_to_text_uses_detector() {
        let normalizer = Normalizer::new().with_detector(latin1_detector);
        assert_eq!(normalizer.to_text(b"caf\xe9"), "café");
        assert_eq!(normalizer.to_text(b"caf\xe9".to_vec()), "café");
    }

    #[test]
    fn test_detector_not_consulted_for_valid_utf8() {
        let normalizer =
            Normalizer::new().with_detector(|_: &[u8]| -> Option<String> { panic!("probed") });
        assert_eq!(normalizer.to_text(b"caf\xc3\xa9"), "café");
        assert_eq!(normalizer.to_text("text"), "text");
    }

    #[test]
    fn test_unknown_detected_encoding_uses_fallback() {
        let normalizer =
            Normalizer::new().with_detector(|_: &[u8]| Some("no-such-encoding".to_string()));
        assert_eq!(normalizer.to_text(b"caf\xe9"), "caf\u{FFFD}");

        let options = NormalizerOptions::new().with_fallback_label("latin1").unwrap();
        let normalizer = Normalizer::with_options(options)
            .with_detector(|_: &[u8]| Some("no-such-encoding".to_string()));
        assert_eq!(normalizer.to_text(b"caf\xe9"), "café");
    }

    #[test]
    fn test_fallback_encoding_without_detector() {
        let options = NormalizerOptions {
            fallback_encoding: Charset::Whatwg(SHIFT_JIS),
            ..NormalizerOptions::default()
        };
        let normalizer = Normalizer::with_options(options);
        // "日本" in Shift_JIS
        assert_eq!(normalizer.to_text(b"\x93\xfa\x96\x7b"), "日本");
    }

    #[test]
    fn test_unescape_to_text() {
        assert_eq!(unescape_to_text("\\n"), "\n");
        assert_eq!(unescape_to_text("a\\tb"), "a\tb");
        assert_eq!(unescape_to_text(b"caf\\xe9".as_slice()), "café");
        assert_eq!(unescape_to_text(String::from("x\\u00e9")), "xé");
    }

    #[test]
    fn test_unescape_to_text_decodes_bytes_as_utf8_first() {
        assert_eq!(unescape_to_text(b"caf\xc3\xa9\\n".as_slice()), "café\n");
        assert_eq!(unescape_to_text(b"caf\xc3\xa9\\n".to_vec()), "café\n");
    }

    #[test]
    fn test_unescape_to_text_keeps_malformed() {
        assert!(matches!(unescape_to_text("bad \\x4"), Cow::Borrowed("bad \\x4")));
        assert_eq!(unescape_to_text(String::from("\\N{DASH}")), "\\N{DASH}");
    }

    #[test]
    fn test_unescape_to_text_without_escapes_is_borrowed() {
        assert!(matches!(unescape_to_text("plain"), Cow::Borrowed("plain")));
    }

    #[test]
    fn test_to_filesystem_text() {
        let options = NormalizerOptions::new().with_filesystem_label("latin1").unwrap();
        let normalizer = Normalizer::with_options(options);
        assert_eq!(normalizer.to_filesystem_text(b"/tmp/caf\xe9"), "/tmp/café");
        assert_eq!(normalizer.to_filesystem_text(b"/tmp/caf\xe9".to_vec()), "/tmp/café");
        assert_eq!(normalizer.options().filesystem_encoding, Charset::Latin1);
    }

    #[test]
    fn test_to_filesystem_text_latin1_keeps_c1_bytes() {
        let options = NormalizerOptions::new()
            .with_filesystem_label("ISO-8859-1")
            .unwrap();
        let normalizer = Normalizer::with_options(options);
        assert_eq!(normalizer.to_filesystem_text(b"/data/\x80\x93x"), "/data/\u{80}\u{93}x");
        assert_eq!(
            normalizer.to_filesystem_text(b"/data/\x80\x93x".to_vec()),
            "/data/\u{80}\u{93}x"
        );
    }

    #[test]
    fn test_to_filesystem_text_windows_1252() {
        let options = NormalizerOptions::new()
            .with_filesystem_label("windows-1252")
            .unwrap();
        let normalizer = Normalizer::with_options(options);
        assert_eq!(normalizer.to_filesystem_text(b"/data/\x80"), "/data/\u{20AC}");
        assert_eq!(normalizer.options().filesystem_encoding, Charset::Whatwg(WINDOWS_1252));
    }

    #[test]
    fn test_to_filesystem_text_identity_on_text() {
        assert!(matches!(to_filesystem_text("/tmp/é"), Cow::Borrowed("/tmp/é")));
    }

    #[test]
    fn test_to_filesystem_text_from_path() {
        let options = NormalizerOptions::new().with_filesystem_label("utf-8").unwrap();
        let normalizer = Normalizer::with_options(options);
        assert_eq!(normalizer.to_filesystem_text(Path::new("/srv/data")), "/srv/data");
    }

    #[test]
    fn test_unknown_label_rejected() {
        let err = NormalizerOptions::new().with_fallback_label("klingon").unwrap_err();
        assert_eq!(
            err,
            ConfigError::UnknownEncoding {
                label: "klingon".to_string()
            }
        );
    }

    #[test]
    fn test_debug_names_detector() {
        let debug = format!("{:?}", Normalizer::new());
        assert!(debug.contains("fallback_encoding: \"UTF-8\""));
        assert!(debug.contains("detector: \"none\""));
    }

    #[test]
    fn test_global_is_default() {
        let global = Normalizer::global();
        assert_eq!(global.options().fallback_encoding, Charset::utf8());
        assert_eq!(global.options().filesystem_encoding, filesystem_encoding());
    }
}
