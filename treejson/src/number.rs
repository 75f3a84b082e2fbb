// SPDX-License-Identifier: Apache-2.0

//! Number token scanning and conversion.
//!
//! The scanner enforces the strict RFC 8259 number grammar: an optional
//! minus, an integer part with no leading zeros, an optional fraction and an
//! optional exponent, each with at least one digit. Values whose magnitude
//! exceeds f64 range saturate to infinity rather than erroring, matching
//! common C JSON library behavior.

use crate::parse_error::ParseErrorKind;

/// Scan a number token starting at `start` and return its byte length.
///
/// Only validates the token shape; conversion happens in [`parse_at`].
fn scan(data: &[u8], start: usize) -> Result<usize, ParseErrorKind> {
    let mut pos = start;

    if data.get(pos) == Some(&b'-') {
        pos += 1;
    }

    // Integer part: a lone zero, or a nonzero digit followed by more digits.
    match data.get(pos) {
        Some(b'0') => {
            pos += 1;
            if matches!(data.get(pos), Some(b'0'..=b'9')) {
                return Err(ParseErrorKind::InvalidNumber);
            }
        }
        Some(b'1'..=b'9') => {
            pos += 1;
            while matches!(data.get(pos), Some(b'0'..=b'9')) {
                pos += 1;
            }
        }
        _ => return Err(ParseErrorKind::InvalidNumber),
    }

    if data.get(pos) == Some(&b'.') {
        pos += 1;
        if !matches!(data.get(pos), Some(b'0'..=b'9')) {
            return Err(ParseErrorKind::InvalidNumber);
        }
        while matches!(data.get(pos), Some(b'0'..=b'9')) {
            pos += 1;
        }
    }

    if matches!(data.get(pos), Some(b'e') | Some(b'E')) {
        pos += 1;
        if matches!(data.get(pos), Some(b'+') | Some(b'-')) {
            pos += 1;
        }
        if !matches!(data.get(pos), Some(b'0'..=b'9')) {
            return Err(ParseErrorKind::InvalidNumber);
        }
        while matches!(data.get(pos), Some(b'0'..=b'9')) {
            pos += 1;
        }
    }

    Ok(pos - start)
}

/// Parse a number token at `start`, returning the value and token length.
pub(crate) fn parse_at(data: &[u8], start: usize) -> Result<(f64, usize), ParseErrorKind> {
    let len = scan(data, start)?;
    let token = data
        .get(start..start + len)
        .ok_or(ParseErrorKind::InvalidNumber)?;
    let text = core::str::from_utf8(token).map_err(|_| ParseErrorKind::InvalidUtf8)?;
    // core's f64 parser accepts a superset of the JSON grammar; scan()
    // already rejected the non-JSON shapes. Out-of-range magnitudes come
    // back as +/- infinity, which is the saturating behavior we document.
    let value: f64 = text.parse().map_err(|_| ParseErrorKind::InvalidNumber)?;
    Ok((value, len))
}
