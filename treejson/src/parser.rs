// SPDX-License-Identifier: Apache-2.0

use alloc::string::String;
use alloc::vec::Vec;

use log::trace;

use crate::cursor::Cursor;
use crate::escape;
use crate::number;
use crate::parse_error::{ParseError, ParseErrorKind};
use crate::value::Value;
use crate::MAX_DEPTH;

/// Knobs for a parse run.
#[derive(Debug, Clone, Copy)]
pub struct ParseOptions {
    /// Maximum container nesting depth before parsing fails with
    /// [`ParseErrorKind::DepthLimitExceeded`]. The limit is an explicit
    /// counter, not a reliance on the call stack, so behavior is the same
    /// on every platform.
    pub max_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            max_depth: MAX_DEPTH,
        }
    }
}

/// Parse a JSON document into a [`Value`] tree.
///
/// The input must contain exactly one document; leading and trailing
/// whitespace is ignored, anything else after the top-level value is an
/// error. Malformed input always comes back as a positioned
/// [`ParseError`], never a panic.
///
/// # Example
/// ```
/// use treejson::{parse, Value};
/// let doc = parse(r#"{"answer": 42}"#).unwrap();
/// assert_eq!(doc.get("answer"), Some(&Value::Number(42.0)));
/// ```
pub fn parse(input: &str) -> Result<Value, ParseError> {
    parse_with_options(input, ParseOptions::default())
}

/// Parse with explicit [`ParseOptions`].
pub fn parse_with_options(input: &str, options: ParseOptions) -> Result<Value, ParseError> {
    Parser::new(input.as_bytes(), options).parse_document()
}

/// Parse a JSON document from raw bytes, validating UTF-8 first.
pub fn parse_slice(input: &[u8]) -> Result<Value, ParseError> {
    parse_slice_with_options(input, ParseOptions::default())
}

/// Parse raw bytes with explicit [`ParseOptions`].
pub fn parse_slice_with_options(
    input: &[u8],
    options: ParseOptions,
) -> Result<Value, ParseError> {
    let text = core::str::from_utf8(input)
        .map_err(|e| ParseError::new(ParseErrorKind::InvalidUtf8, input, e.valid_up_to()))?;
    parse_with_options(text, options)
}

/// Recursive-descent parser: one method per grammar production, a single
/// forward-only cursor, and an explicit depth counter.
struct Parser<'a> {
    cursor: Cursor<'a>,
    depth: usize,
    max_depth: usize,
}

impl<'a> Parser<'a> {
    fn new(input: &'a [u8], options: ParseOptions) -> Self {
        Parser {
            cursor: Cursor::new(input),
            depth: 0,
            max_depth: options.max_depth,
        }
    }

    fn parse_document(mut self) -> Result<Value, ParseError> {
        trace!("parsing {} byte document", self.cursor.data().len());
        self.cursor.skip_whitespace();
        if self.cursor.at_end() {
            return Err(self.error(ParseErrorKind::UnexpectedEndOfInput));
        }
        let value = self.parse_value()?;
        self.cursor.skip_whitespace();
        if !self.cursor.at_end() {
            return Err(self.error(ParseErrorKind::TrailingCharacters));
        }
        Ok(value)
    }

    /// The `value` production: dispatch on the first significant byte.
    fn parse_value(&mut self) -> Result<Value, ParseError> {
        match self.cursor.peek() {
            None => Err(self.error(ParseErrorKind::UnexpectedEndOfInput)),
            Some(b'{') => self.parse_object(),
            Some(b'[') => self.parse_array(),
            Some(b'"') => self.parse_string().map(Value::String),
            Some(b't') => self.parse_literal(b"true", Value::Bool(true)),
            Some(b'f') => self.parse_literal(b"false", Value::Bool(false)),
            Some(b'n') => self.parse_literal(b"null", Value::Null),
            Some(b'-') | Some(b'0'..=b'9') => self.parse_number(),
            Some(_) => Err(self.error(ParseErrorKind::UnexpectedCharacter)),
        }
    }

    fn parse_object(&mut self) -> Result<Value, ParseError> {
        self.cursor.eat(b'{');
        self.descend()?;
        let mut pairs: Vec<(String, Value)> = Vec::new();
        self.cursor.skip_whitespace();
        if self.cursor.eat(b'}') {
            self.ascend();
            return Ok(Value::Object(pairs));
        }
        loop {
            // Keys are strings; duplicate keys are kept in source order and
            // resolved last-wins at lookup or mapping-materialization time.
            match self.cursor.peek() {
                None => return Err(self.error(ParseErrorKind::UnexpectedEndOfInput)),
                Some(b'"') => {}
                Some(_) => return Err(self.error(ParseErrorKind::UnexpectedCharacter)),
            }
            let key = self.parse_string()?;
            self.cursor.skip_whitespace();
            match self.cursor.bump() {
                None => return Err(self.error(ParseErrorKind::UnexpectedEndOfInput)),
                Some(b':') => {}
                Some(_) => {
                    let at = self.cursor.offset().saturating_sub(1);
                    return Err(self.error_at(ParseErrorKind::ExpectedColon, at));
                }
            }
            self.cursor.skip_whitespace();
            let value = self.parse_value()?;
            pairs.push((key, value));
            self.cursor.skip_whitespace();
            match self.cursor.bump() {
                None => return Err(self.error(ParseErrorKind::UnexpectedEndOfInput)),
                Some(b',') => self.cursor.skip_whitespace(),
                Some(b'}') => break,
                Some(_) => {
                    let at = self.cursor.offset().saturating_sub(1);
                    return Err(self.error_at(ParseErrorKind::UnexpectedCharacter, at));
                }
            }
        }
        self.ascend();
        Ok(Value::Object(pairs))
    }

    fn parse_array(&mut self) -> Result<Value, ParseError> {
        self.cursor.eat(b'[');
        self.descend()?;
        let mut items: Vec<Value> = Vec::new();
        self.cursor.skip_whitespace();
        if self.cursor.eat(b']') {
            self.ascend();
            return Ok(Value::Array(items));
        }
        loop {
            items.push(self.parse_value()?);
            self.cursor.skip_whitespace();
            match self.cursor.bump() {
                None => return Err(self.error(ParseErrorKind::UnexpectedEndOfInput)),
                // A trailing comma fails in the next parse_value call, since
                // `]` cannot start a value.
                Some(b',') => self.cursor.skip_whitespace(),
                Some(b']') => break,
                Some(_) => {
                    let at = self.cursor.offset().saturating_sub(1);
                    return Err(self.error_at(ParseErrorKind::UnexpectedCharacter, at));
                }
            }
        }
        self.ascend();
        Ok(Value::Array(items))
    }

    /// The `string` production, with unescaping.
    ///
    /// Unescaped spans are copied over in whole runs; escapes are decoded
    /// one at a time. Unpaired UTF-16 surrogates in `\uXXXX` escapes are
    /// rejected rather than replaced.
    fn parse_string(&mut self) -> Result<String, ParseError> {
        let open_offset = self.cursor.offset();
        if !self.cursor.eat(b'"') {
            return Err(self.error(ParseErrorKind::UnexpectedCharacter));
        }
        let mut out = String::new();
        let mut run_start = self.cursor.offset();
        loop {
            match self.cursor.bump() {
                None => {
                    return Err(self.error_at(ParseErrorKind::UnterminatedString, open_offset))
                }
                Some(b'"') => {
                    let run_end = self.cursor.offset().saturating_sub(1);
                    self.push_run(&mut out, run_start, run_end)?;
                    return Ok(out);
                }
                Some(b'\\') => {
                    let run_end = self.cursor.offset().saturating_sub(1);
                    self.push_run(&mut out, run_start, run_end)?;
                    match self.cursor.bump() {
                        None => {
                            return Err(
                                self.error_at(ParseErrorKind::UnterminatedString, open_offset)
                            )
                        }
                        Some(b'u') => {
                            let decoded = self.read_unicode_escape()?;
                            out.push(decoded);
                        }
                        Some(byte) => match escape::unescape_simple(byte) {
                            Some(unescaped) => out.push(char::from(unescaped)),
                            None => {
                                let at = self.cursor.offset().saturating_sub(1);
                                return Err(self.error_at(ParseErrorKind::InvalidEscape, at));
                            }
                        },
                    }
                    run_start = self.cursor.offset();
                }
                Some(byte) if byte < 0x20 => {
                    let at = self.cursor.offset().saturating_sub(1);
                    return Err(self.error_at(ParseErrorKind::ControlCharacterInString, at));
                }
                Some(_) => {}
            }
        }
    }

    /// Append the unescaped input run `[start, end)` to the output string.
    fn push_run(&self, out: &mut String, start: usize, end: usize) -> Result<(), ParseError> {
        if start >= end {
            return Ok(());
        }
        let bytes = self
            .cursor
            .data()
            .get(start..end)
            .ok_or_else(|| self.error_at(ParseErrorKind::UnexpectedCharacter, start))?;
        let text = core::str::from_utf8(bytes)
            .map_err(|_| self.error_at(ParseErrorKind::InvalidUtf8, start))?;
        out.push_str(text);
        Ok(())
    }

    /// Decode a `\uXXXX` escape, combining surrogate pairs.
    ///
    /// Called with the cursor just past the `u`; consumes four hex digits,
    /// plus a whole second `\uXXXX` escape when the first is a high
    /// surrogate.
    fn read_unicode_escape(&mut self) -> Result<char, ParseError> {
        // Report surrogate problems at the backslash that opened the escape.
        let escape_offset = self.cursor.offset().saturating_sub(2);
        let first = self.read_hex4()?;
        if escape::is_low_surrogate(first) {
            return Err(self.error_at(ParseErrorKind::UnpairedSurrogate, escape_offset));
        }
        if escape::is_high_surrogate(first) {
            if !(self.cursor.eat(b'\\') && self.cursor.eat(b'u')) {
                return Err(self.error_at(ParseErrorKind::UnpairedSurrogate, escape_offset));
            }
            let second = self.read_hex4()?;
            if !escape::is_low_surrogate(second) {
                return Err(self.error_at(ParseErrorKind::UnpairedSurrogate, escape_offset));
            }
            let combined = escape::combine_surrogate_pair(first, second);
            return char::from_u32(combined)
                .ok_or_else(|| self.error_at(ParseErrorKind::InvalidUnicodeCodepoint, escape_offset));
        }
        char::from_u32(first)
            .ok_or_else(|| self.error_at(ParseErrorKind::InvalidUnicodeCodepoint, escape_offset))
    }

    fn read_hex4(&mut self) -> Result<u32, ParseError> {
        let mut code = 0u32;
        for _ in 0..4 {
            match self.cursor.bump() {
                None => return Err(self.error(ParseErrorKind::UnexpectedEndOfInput)),
                Some(byte) => match escape::hex_digit(byte) {
                    Some(digit) => code = (code << 4) | digit,
                    None => {
                        let at = self.cursor.offset().saturating_sub(1);
                        return Err(self.error_at(ParseErrorKind::InvalidUnicodeHex, at));
                    }
                },
            }
        }
        Ok(code)
    }

    fn parse_number(&mut self) -> Result<Value, ParseError> {
        let start = self.cursor.offset();
        let (value, len) =
            number::parse_at(self.cursor.data(), start).map_err(|kind| self.error_at(kind, start))?;
        self.cursor.advance(len);
        Ok(Value::Number(value))
    }

    fn parse_literal(&mut self, literal: &[u8], value: Value) -> Result<Value, ParseError> {
        for &expected in literal {
            match self.cursor.bump() {
                None => return Err(self.error(ParseErrorKind::UnexpectedEndOfInput)),
                Some(byte) if byte == expected => {}
                Some(_) => {
                    let at = self.cursor.offset().saturating_sub(1);
                    return Err(self.error_at(ParseErrorKind::UnexpectedCharacter, at));
                }
            }
        }
        Ok(value)
    }

    fn descend(&mut self) -> Result<(), ParseError> {
        self.depth += 1;
        if self.depth > self.max_depth {
            trace!("depth limit {} exceeded while parsing", self.max_depth);
            return Err(self.error(ParseErrorKind::DepthLimitExceeded));
        }
        Ok(())
    }

    fn ascend(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    fn error(&self, kind: ParseErrorKind) -> ParseError {
        self.error_at(kind, self.cursor.offset())
    }

    fn error_at(&self, kind: ParseErrorKind, offset: usize) -> ParseError {
        ParseError::new(kind, self.cursor.data(), offset)
    }
}
