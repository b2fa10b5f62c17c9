//! Content-based encoding detection, consulted only when UTF-8 decoding fails.

/// Guesses the encoding of a byte sequence.
///
/// Implementations return an encoding name (any WHATWG label or common alias)
/// or `None` when they have no opinion. Names that do not resolve are treated
/// like `None`.
pub trait Detector: Send + Sync {
    /// Returns the name of the most likely encoding of `bytes`.
    fn detect(&self, bytes: &[u8]) -> Option<String>;

    /// Returns a short name for log output.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// A detector with no opinion, so decoding always uses the fallback encoding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoDetector;

impl Detector for NoDetector {
    fn detect(&self, _bytes: &[u8]) -> Option<String> {
        None
    }

    fn name(&self) -> &str {
        "none"
    }
}

impl<F> Detector for F
where
    F: Fn(&[u8]) -> Option<String> + Send + Sync,
{
    fn detect(&self, bytes: &[u8]) -> Option<String> {
        self(bytes)
    }
}

/// Statistical detector backed by `chardetng`.
#[cfg(feature = "detect")]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChardetDetector;

#[cfg(feature = "detect")]
impl Detector for ChardetDetector {
    fn detect(&self, bytes: &[u8]) -> Option<String> {
        let mut detector = chardetng::EncodingDetector::new();
        detector.feed(bytes, true);
        // Only reached for input that is not valid UTF-8.
        let encoding = detector.guess(None, false);
        Some(encoding.name().to_string())
    }

    fn name(&self) -> &str {
        "chardetng"
    }
}
