// SPDX-License-Identifier: Apache-2.0

//! Pure helpers for JSON string escape sequences.
//!
//! Shared between the parser (unescaping) and the serializer (escaping);
//! neither side touches the other's state.

/// Map the character after a backslash to its unescaped byte.
///
/// Covers the eight simple escapes; `\uXXXX` is handled separately by the
/// parser since it consumes four more bytes.
pub(crate) fn unescape_simple(escape_char: u8) -> Option<u8> {
    match escape_char {
        b'"' => Some(b'"'),
        b'\\' => Some(b'\\'),
        b'/' => Some(b'/'),
        b'b' => Some(0x08),
        b'f' => Some(0x0C),
        b'n' => Some(b'\n'),
        b'r' => Some(b'\r'),
        b't' => Some(b'\t'),
        _ => None,
    }
}

/// Numeric value of an ASCII hex digit, or None if the byte is not one.
pub(crate) fn hex_digit(byte: u8) -> Option<u32> {
    match byte {
        b'0'..=b'9' => Some((byte - b'0') as u32),
        b'a'..=b'f' => Some((byte - b'a' + 10) as u32),
        b'A'..=b'F' => Some((byte - b'A' + 10) as u32),
        _ => None,
    }
}

/// True for UTF-16 high (leading) surrogates, 0xD800..=0xDBFF.
pub(crate) fn is_high_surrogate(code_unit: u32) -> bool {
    (0xD800..=0xDBFF).contains(&code_unit)
}

/// True for UTF-16 low (trailing) surrogates, 0xDC00..=0xDFFF.
pub(crate) fn is_low_surrogate(code_unit: u32) -> bool {
    (0xDC00..=0xDFFF).contains(&code_unit)
}

/// Combine a high/low surrogate pair into a supplementary-plane codepoint.
///
/// Callers must have checked the halves with [`is_high_surrogate`] and
/// [`is_low_surrogate`] first.
pub(crate) fn combine_surrogate_pair(high: u32, low: u32) -> u32 {
    0x10000 + ((high & 0x3FF) << 10) + (low & 0x3FF)
}
