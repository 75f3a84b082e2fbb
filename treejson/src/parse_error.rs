// SPDX-License-Identifier: Apache-2.0

use core::fmt;

/// Location of a parse failure within the input document.
///
/// `line` and `column` are 1-based and derived from the byte `offset`;
/// columns count bytes, not display width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    /// Byte offset into the input where the failure was detected.
    pub offset: usize,
    /// 1-based line number.
    pub line: usize,
    /// 1-based column number within the line.
    pub column: usize,
}

impl Position {
    /// Compute the line/column position for a byte offset.
    ///
    /// Scans the input once; this only runs on the error path so the happy
    /// path carries no per-byte bookkeeping.
    pub(crate) fn locate(input: &[u8], offset: usize) -> Self {
        let clamped = offset.min(input.len());
        let mut line = 1;
        let mut column = 1;
        for &byte in input.iter().take(clamped) {
            if byte == b'\n' {
                line += 1;
                column = 1;
            } else {
                column += 1;
            }
        }
        Position {
            offset,
            line,
            column,
        }
    }
}

/// The reason a document failed to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// Input ended before the document was complete (includes empty input).
    UnexpectedEndOfInput,
    /// A byte that cannot start or continue the expected production.
    UnexpectedCharacter,
    /// Non-whitespace bytes after the end of the top-level value.
    TrailingCharacters,
    /// A string value was not closed before the input ended.
    UnterminatedString,
    /// A backslash escape other than the eight JSON escapes or `\uXXXX`.
    InvalidEscape,
    /// A `\uXXXX` escape with a non-hex digit.
    InvalidUnicodeHex,
    /// A `\uXXXX` surrogate half with no matching partner.
    UnpairedSurrogate,
    /// A `\uXXXX` escape that does not denote a Unicode scalar value.
    InvalidUnicodeCodepoint,
    /// A raw control character (U+0000..U+001F) inside a string.
    ControlCharacterInString,
    /// A number violating the JSON grammar, e.g. a leading zero or a
    /// fraction/exponent with no digits.
    InvalidNumber,
    /// Missing `:` between an object key and its value.
    ExpectedColon,
    /// Input was not valid UTF-8.
    InvalidUtf8,
    /// Nesting exceeded the configured depth limit.
    DepthLimitExceeded,
}

impl ParseErrorKind {
    /// Human-readable reason for this failure kind.
    pub fn description(&self) -> &'static str {
        match self {
            ParseErrorKind::UnexpectedEndOfInput => "unexpected end of input",
            ParseErrorKind::UnexpectedCharacter => "unexpected character",
            ParseErrorKind::TrailingCharacters => "trailing characters after document",
            ParseErrorKind::UnterminatedString => "unterminated string",
            ParseErrorKind::InvalidEscape => "invalid escape sequence",
            ParseErrorKind::InvalidUnicodeHex => "invalid hex digit in unicode escape",
            ParseErrorKind::UnpairedSurrogate => "unpaired surrogate in unicode escape",
            ParseErrorKind::InvalidUnicodeCodepoint => "invalid unicode codepoint",
            ParseErrorKind::ControlCharacterInString => "control character in string",
            ParseErrorKind::InvalidNumber => "invalid number",
            ParseErrorKind::ExpectedColon => "expected ':' after object key",
            ParseErrorKind::InvalidUtf8 => "input is not valid UTF-8",
            ParseErrorKind::DepthLimitExceeded => "nesting depth limit exceeded",
        }
    }
}

/// A structured parse failure: what went wrong and where.
///
/// The parser never panics on malformed input; every syntax problem
/// surfaces as one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub position: Position,
}

impl ParseError {
    pub(crate) fn new(kind: ParseErrorKind, input: &[u8], offset: usize) -> Self {
        ParseError {
            kind,
            position: Position::locate(input, offset),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} at line {} column {}",
            self.kind.description(),
            self.position.line,
            self.position.column
        )
    }
}
