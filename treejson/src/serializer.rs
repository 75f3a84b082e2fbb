// SPDX-License-Identifier: Apache-2.0

use alloc::format;
use alloc::string::{String, ToString};

use log::trace;

use crate::value::Value;
use crate::MAX_DEPTH;

/// Errors when turning a value tree back into JSON text, or when converting
/// a host value into a tree on the way there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SerializeError {
    /// Recursion exceeded the configured depth limit. Within an owned
    /// [`Value`] tree this means pathological nesting; coming from a host
    /// value graph it also covers self-referential structures.
    CyclicOrTooDeep { limit: usize },
    /// NaN or infinity; JSON has no literal for non-finite numbers.
    NonFiniteNumber,
    /// A host mapping key that is not a string.
    NonStringKey,
    /// A host value with no JSON representation at all.
    Unrepresentable,
}

impl core::fmt::Display for SerializeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SerializeError::CyclicOrTooDeep { limit } => {
                write!(f, "value is cyclic or nested deeper than {limit}")
            }
            SerializeError::NonFiniteNumber => {
                write!(f, "number is not finite and has no JSON form")
            }
            SerializeError::NonStringKey => write!(f, "mapping key is not a string"),
            SerializeError::Unrepresentable => write!(f, "value has no JSON representation"),
        }
    }
}

/// Knobs for a stringify run.
#[derive(Debug, Clone, Copy)]
pub struct StringifyOptions {
    /// Maximum nesting depth before emission fails with
    /// [`SerializeError::CyclicOrTooDeep`].
    pub max_depth: usize,
}

impl Default for StringifyOptions {
    fn default() -> Self {
        StringifyOptions {
            max_depth: MAX_DEPTH,
        }
    }
}

/// Serialize a [`Value`] tree to minified JSON text.
///
/// Output policy, fixed so emission is deterministic:
/// - no insignificant whitespace;
/// - non-ASCII characters are emitted as raw UTF-8, not `\uXXXX`;
/// - doubles that are mathematically integral and within ±2^53 are emitted
///   without a fractional part, everything else in shortest round-trip form.
///
/// All-or-nothing: on error no partial text is returned.
///
/// # Example
/// ```
/// use treejson::{parse, stringify};
/// let doc = parse(r#"{ "a" : [ 1 , 2 ] }"#).unwrap();
/// assert_eq!(stringify(&doc).unwrap(), r#"{"a":[1,2]}"#);
/// ```
pub fn stringify(value: &Value) -> Result<String, SerializeError> {
    stringify_with_options(value, StringifyOptions::default())
}

/// Serialize with explicit [`StringifyOptions`].
pub fn stringify_with_options(
    value: &Value,
    options: StringifyOptions,
) -> Result<String, SerializeError> {
    let mut out = String::new();
    emit(value, &mut out, 0, options.max_depth)?;
    trace!("stringified {} bytes", out.len());
    Ok(out)
}

fn emit(value: &Value, out: &mut String, depth: usize, limit: usize) -> Result<(), SerializeError> {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(true) => out.push_str("true"),
        Value::Bool(false) => out.push_str("false"),
        Value::Number(n) => emit_number(*n, out)?,
        Value::String(s) => emit_string(s, out),
        Value::Array(items) => {
            // Entering a container consumes one level, whether or not the
            // container has children. Keeps the limit aligned with the
            // parser's, so emitted text always reparses.
            if depth >= limit {
                return Err(SerializeError::CyclicOrTooDeep { limit });
            }
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                emit(item, out, depth + 1, limit)?;
            }
            out.push(']');
        }
        Value::Object(pairs) => {
            if depth >= limit {
                return Err(SerializeError::CyclicOrTooDeep { limit });
            }
            out.push('{');
            for (i, (key, item)) in pairs.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                emit_string(key, out);
                out.push(':');
                emit(item, out, depth + 1, limit)?;
            }
            out.push('}');
        }
    }
    Ok(())
}

/// Integral doubles at or below this magnitude print exactly as integers.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0; // 2^53

fn emit_number(n: f64, out: &mut String) -> Result<(), SerializeError> {
    if !n.is_finite() {
        return Err(SerializeError::NonFiniteNumber);
    }
    if n == n.trunc() && n.abs() <= MAX_SAFE_INTEGER {
        out.push_str(&(n as i64).to_string());
    } else {
        // f64 Display is the shortest decimal form that parses back to the
        // same double, so value round-trips are exact.
        out.push_str(&n.to_string());
    }
    Ok(())
}

/// Emit a string with the exact inverse of the parser's unescaping.
///
/// `"` and `\` get their short escapes, as do backspace, form feed, newline,
/// carriage return and tab; remaining control characters use `\u00XX`.
fn emit_string(s: &str, out: &mut String) {
    out.push('"');
    for ch in s.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\u{08}' => out.push_str("\\b"),
            '\u{0C}' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            ch if (ch as u32) < 0x20 => {
                out.push_str(&format!("\\u{:04x}", ch as u32));
            }
            ch => out.push(ch),
        }
    }
    out.push('"');
}
