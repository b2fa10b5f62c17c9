//! Process-wide facts read once from the host environment.
//!
//! The filesystem encoding is resolved on first use and never re-read, so
//! later changes to the locale variables have no effect on this process.

use lazy_static::lazy_static;

use crate::codec::{Charset, resolve_label};

/// True when compiled for Windows.
pub const ON_WINDOWS: bool = cfg!(windows);

/// Locale variables in precedence order.
const LOCALE_VARS: [&str; 3] = ["LC_ALL", "LC_CTYPE", "LANG"];

lazy_static! {
    static ref FILESYSTEM_ENCODING: Charset = read_filesystem_encoding();
}

/// Returns the charset used for file path names on this host.
pub fn filesystem_encoding() -> Charset {
    *FILESYSTEM_ENCODING
}

/// Returns the canonical name of [`filesystem_encoding`].
pub fn filesystem_encoding_name() -> &'static str {
    filesystem_encoding().name()
}

fn read_filesystem_encoding() -> Charset {
    let encoding = if cfg!(any(windows, target_os = "macos", target_os = "ios")) {
        Charset::utf8()
    } else {
        let locale = locale_from(|var| std::env::var(var).ok());
        encoding_from_locale(locale.as_deref())
    };
    tracing::debug!(encoding = encoding.name(), "resolved filesystem encoding");
    encoding
}

/// Returns the first non-empty locale variable, looked up through `lookup`.
fn locale_from(lookup: impl Fn(&str) -> Option<String>) -> Option<String> {
    LOCALE_VARS
        .into_iter()
        .find_map(|var| lookup(var).filter(|value| !value.is_empty()))
}

/// Maps a POSIX locale string (`language_TERRITORY.charset@modifier`) to an
/// encoding.
///
/// Locales without a charset (including `C` and `POSIX`) and unknown
/// charsets map to UTF-8.
fn encoding_from_locale(locale: Option<&str>) -> Charset {
    let Some(locale) = locale else {
        return Charset::utf8();
    };
    let without_modifier = locale.split('@').next().unwrap_or(locale);
    without_modifier
        .split_once('.')
        .and_then(|(_, charset)| resolve_label(charset))
        .unwrap_or_else(Charset::utf8)
}
