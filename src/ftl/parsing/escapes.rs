//! Escape sequences in string literals
//!
//! Recognized sequences:
//!     \"          quote
//!     \\          backslash
//!     \uXXXX      code point, exactly 4 hex digits
//!     \UXXXXXX    code point, exactly 6 hex digits
//!
//! Anything else after a backslash is an error. Hex sequences that name something that is
//! not a Unicode scalar value (surrogates, values above U+10FFFF) decode to U+FFFD.

use crate::ftl::ast::ParseError;
use std::borrow::Cow;

const REPLACEMENT_CHAR: char = '\u{FFFD}';

/// Decode the escapes of a string literal's raw content
///
/// `offset` is the byte position of `raw` in the source, used for error spans. Returns the
/// input unchanged (borrowed) when it contains no backslash.
pub fn unescape(raw: &str, offset: usize) -> Result<Cow<'_, str>, ParseError> {
    if !raw.contains('\\') {
        return Ok(Cow::Borrowed(raw));
    }

    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.char_indices();
    while let Some((start, c)) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some((_, '\\')) => out.push('\\'),
            Some((_, '"')) => out.push('"'),
            Some((_, marker @ ('u' | 'U'))) => {
                let len = if marker == 'u' { 4 } else { 6 };
                let digits_start = start + 2;
                let digits = raw
                    .get(digits_start..digits_start + len)
                    .filter(|digits| digits.bytes().all(|b| b.is_ascii_hexdigit()));
                let Some(digits) = digits else {
                    let shown: String = raw[start..].chars().take(2 + len).collect();
                    return Err(ParseError::InvalidEscape {
                        span: offset + start..offset + start + shown.len(),
                        raw: shown,
                    });
                };
                out.push(decode_code_point(digits));
                for _ in 0..len {
                    chars.next();
                }
            }
            Some((next, other)) => {
                let end = next + other.len_utf8();
                return Err(ParseError::InvalidEscape {
                    span: offset + start..offset + end,
                    raw: raw[start..end].to_string(),
                });
            }
            None => {
                return Err(ParseError::InvalidEscape {
                    span: offset + start..offset + start + 1,
                    raw: "\\".to_string(),
                });
            }
        }
    }
    Ok(Cow::Owned(out))
}

fn decode_code_point(digits: &str) -> char {
    u32::from_str_radix(digits, 16)
        .ok()
        .and_then(char::from_u32)
        .unwrap_or(REPLACEMENT_CHAR)
}
