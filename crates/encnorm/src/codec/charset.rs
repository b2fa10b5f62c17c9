//! Encoding lookup and lossy decoding.

use std::borrow::Cow;

use encoding_rs::{Encoding, REPLACEMENT, UTF_8};

/// Common non-WHATWG spellings mapped to a WHATWG label.
const ALIASES: &[(&str, &str)] = &[
    ("utf_8", "utf-8"),
    ("u8", "utf-8"),
    ("cp65001", "utf-8"),
    ("utf_16", "utf-16"),
    ("utf_16_le", "utf-16le"),
    ("utf_16_be", "utf-16be"),
    ("eucjp", "euc-jp"),
    ("euckr", "euc-kr"),
];

/// Labels for ISO-8859-1 and US-ASCII.
///
/// WHATWG maps these to windows-1252, which turns bytes 0x80..=0x9F into
/// typographic characters. They decode here as ISO-8859-1 so every byte maps
/// to the code point of the same value.
const LATIN1_LABELS: &[&str] = &[
    "iso-8859-1",
    "iso8859-1",
    "iso88591",
    "iso_8859-1",
    "iso_8859-1:1987",
    "iso-ir-100",
    "latin1",
    "latin-1",
    "latin_1",
    "l1",
    "cp819",
    "ibm819",
    "csisolatin1",
    "8859",
    "ascii",
    "us-ascii",
    "ansi_x3.4-1968",
    "iso646-us",
    "646",
];

/// A character encoding that bytes can be decoded with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Charset {
    /// ISO-8859-1: byte `n` decodes to U+00nn.
    Latin1,
    /// Any WHATWG encoding.
    Whatwg(&'static Encoding),
}

impl Charset {
    /// UTF-8.
    pub fn utf8() -> Charset {
        Charset::Whatwg(UTF_8)
    }

    /// Returns the canonical name.
    pub fn name(self) -> &'static str {
        match self {
            Charset::Latin1 => "ISO-8859-1",
            Charset::Whatwg(encoding) => encoding.name(),
        }
    }

    /// Decodes `bytes`, substituting U+FFFD for malformed input.
    ///
    /// A byte order mark is not stripped. Returns borrowed text when the
    /// bytes need no conversion.
    pub fn decode(self, bytes: &[u8]) -> Cow<'_, str> {
        match self {
            Charset::Latin1 => encoding_rs::mem::decode_latin1(bytes),
            Charset::Whatwg(encoding) => decode_lossy(bytes, encoding),
        }
    }
}

impl From<&'static Encoding> for Charset {
    fn from(encoding: &'static Encoding) -> Self {
        Charset::Whatwg(encoding)
    }
}

/// Resolves an encoding name to a charset.
///
/// Latin-1 and ASCII labels resolve to [`Charset::Latin1`]. Other names are
/// matched as WHATWG labels case-insensitively, followed by a small alias
/// table. Labels mapping to the WHATWG "replacement" encoding resolve to
/// `None`, since decoding with it discards the whole input.
pub fn resolve_label(label: &str) -> Option<Charset> {
    let label = label.trim();
    if label.is_empty() {
        return None;
    }

    let lower = label.to_ascii_lowercase();
    if LATIN1_LABELS.iter().any(|latin1| *latin1 == lower) {
        return Some(Charset::Latin1);
    }

    let encoding = Encoding::for_label(label.as_bytes()).or_else(|| {
        ALIASES
            .iter()
            .find(|(alias, _)| *alias == lower)
            .and_then(|(_, canonical)| Encoding::for_label(canonical.as_bytes()))
    })?;

    (encoding != REPLACEMENT).then_some(Charset::Whatwg(encoding))
}

/// Decodes `bytes` with `encoding`, substituting U+FFFD for malformed input.
///
/// A byte order mark is not stripped. Returns borrowed text when the bytes
/// are valid UTF-8 and `encoding` is UTF-8 (or ASCII-compatible and the
/// input is pure ASCII).
pub fn decode_lossy<'a>(bytes: &'a [u8], encoding: &'static Encoding) -> Cow<'a, str> {
    let (text, had_errors) = encoding.decode_without_bom_handling(bytes);
    if had_errors {
        tracing::debug!(
            encoding = encoding.name(),
            len = bytes.len(),
            "decoding substituted replacement characters"
        );
    }
    text
}

/// Decodes `bytes` as UTF-8 without copying, or `None` if malformed.
pub fn decode_utf8(bytes: &[u8]) -> Option<&str> {
    std::str::from_utf8(bytes).ok()
}
