//! Backslash escape interpretation.
//!
//! Resolves the escape sequences accepted by string literals in most
//! C-family languages:
//!
//! | Escape | Result |
//! |---|---|
//! | `\\` `\'` `\"` | the escaped character |
//! | `\a` `\b` `\f` `\n` `\r` `\t` `\v` | the matching control character |
//! | `\ooo` | up to three octal digits |
//! | `\xhh` | exactly two hex digits |
//! | `\uXXXX`, `\UXXXXXXXX` | a Unicode scalar value |
//! | backslash + newline | nothing (line continuation) |
//!
//! Any other escaped character is kept verbatim together with its backslash.

use std::borrow::Cow;
use std::iter::Peekable;
use std::str::CharIndices;

use crate::error::EscapeError;

/// Interprets escape sequences in `input`.
///
/// Input without a backslash is returned borrowed.
pub fn unescape(input: &str) -> Result<Cow<'_, str>, EscapeError> {
    if !input.contains('\\') {
        return Ok(Cow::Borrowed(input));
    }

    let mut scanner = Scanner::new(input);
    let mut out = String::with_capacity(input.len());

    while let Some((offset, c)) = scanner.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }

        let Some((_, kind)) = scanner.next() else {
            return Err(EscapeError::TrailingBackslash { offset });
        };

        match kind {
            '\n' => {}
            '\\' | '\'' | '"' => out.push(kind),
            'a' => out.push('\u{07}'),
            'b' => out.push('\u{08}'),
            'f' => out.push('\u{0C}'),
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            't' => out.push('\t'),
            'v' => out.push('\u{0B}'),
            '0'..='7' => out.push(scanner.read_octal(kind)),
            'x' => out.push(scanner.read_hex_escape(kind, 2, offset)?),
            'u' => out.push(scanner.read_hex_escape(kind, 4, offset)?),
            'U' => out.push(scanner.read_hex_escape(kind, 8, offset)?),
            'N' => return Err(EscapeError::NamedEscapeUnsupported { offset }),
            other => {
                out.push('\\');
                out.push(other);
            }
        }
    }

    Ok(Cow::Owned(out))
}

/// Character cursor over the input that tracks byte offsets.
struct Scanner<'a> {
    chars: Peekable<CharIndices<'a>>,
}

impl<'a> Scanner<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            chars: input.char_indices().peekable(),
        }
    }

    fn next(&mut self) -> Option<(usize, char)> {
        self.chars.next()
    }

    /// Reads the rest of an octal escape whose first digit is `first`.
    fn read_octal(&mut self, first: char) -> char {
        let mut value = first.to_digit(8).unwrap_or(0);
        for _ in 0..2 {
            match self.chars.peek().and_then(|&(_, c)| c.to_digit(8)) {
                Some(digit) => {
                    value = value * 8 + digit;
                    self.chars.next();
                }
                None => break,
            }
        }
        // At most 0o777, always a valid scalar value.
        char::from_u32(value).unwrap_or(char::REPLACEMENT_CHARACTER)
    }

    /// Reads exactly `digits` hex digits and returns the named character.
    fn read_hex_escape(
        &mut self,
        kind: char,
        digits: usize,
        offset: usize,
    ) -> Result<char, EscapeError> {
        let mut value: u32 = 0;
        for _ in 0..digits {
            let Some((_, c)) = self.chars.next() else {
                return Err(EscapeError::TruncatedEscape {
                    kind,
                    offset,
                    expected: digits,
                });
            };
            let Some(digit) = c.to_digit(16) else {
                return Err(EscapeError::InvalidHexDigit {
                    kind,
                    offset,
                    found: c,
                });
            };
            value = (value << 4) | digit;
        }
        char::from_u32(value).ok_or(EscapeError::InvalidCodePoint { offset, value })
    }
}
