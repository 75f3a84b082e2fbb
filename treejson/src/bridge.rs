// SPDX-License-Identifier: Apache-2.0

//! Adapter between the JSON value tree and an embedding runtime's dynamic
//! values, plus the two call-convention entry points (`parse`, `stringify`).
//!
//! This is the only module that deals with host values, and it only ever
//! sees them through the [`HostBridge`] trait: the parser and serializer
//! stay host-agnostic. A hosting application implements the trait for its
//! runtime and wires [`json_parse`]/[`json_stringify`] into whatever
//! function-registration mechanism it has.

use alloc::string::String;
use alloc::vec::Vec;

use log::trace;

use crate::parse_error::ParseError;
use crate::parser::parse;
use crate::serializer::{stringify, SerializeError};
use crate::value::Value;
use crate::MAX_DEPTH;

/// How a host value presents itself to the JSON core.
///
/// Returned by [`HostBridge::shape`]; borrows from the host value so
/// classification allocates at most the child index vectors.
pub enum HostShape<'a, V> {
    /// The host's null/nil value.
    Null,
    /// A host boolean.
    Bool(bool),
    /// A host number, widened to double precision.
    Number(f64),
    /// A host string.
    Str(&'a str),
    /// An ordered host sequence, children in order.
    Seq(Vec<&'a V>),
    /// A host mapping, entries in iteration order as (key, value).
    Map(Vec<(&'a V, &'a V)>),
    /// Anything with no JSON representation (functions, handles, ...).
    Opaque,
}

/// Capabilities the embedding runtime supplies.
///
/// Constructors build host values from JSON data; [`HostBridge::shape`]
/// classifies an existing host value for the reverse direction. The core
/// guarantees it only ever passes strings built by [`HostBridge::string`]
/// as mapping keys.
pub trait HostBridge {
    type Value;

    fn null(&mut self) -> Self::Value;
    fn boolean(&mut self, value: bool) -> Self::Value;
    fn number(&mut self, value: f64) -> Self::Value;
    fn string(&mut self, value: &str) -> Self::Value;
    /// Build a host sequence from already-converted children, preserving
    /// order.
    fn sequence(&mut self, items: Vec<Self::Value>) -> Self::Value;
    /// Build a host mapping from already-converted entries. Entries arrive
    /// in source order; a mapping with real key semantics will make later
    /// duplicates win, which is the intended resolution.
    fn mapping(&mut self, entries: Vec<(Self::Value, Self::Value)>) -> Self::Value;

    /// Classify a host value without the core naming host types.
    fn shape<'a>(&self, value: &'a Self::Value) -> HostShape<'a, Self::Value>;
}

/// Convert a JSON tree into a host value, bottom-up.
///
/// Array order and object entry order are preserved exactly; duplicate
/// object keys are inserted in source order so the host mapping resolves
/// them last-wins.
pub fn value_to_host<B: HostBridge>(bridge: &mut B, value: &Value) -> B::Value {
    match value {
        Value::Null => bridge.null(),
        Value::Bool(b) => bridge.boolean(*b),
        Value::Number(n) => bridge.number(*n),
        Value::String(s) => bridge.string(s),
        Value::Array(items) => {
            let mut converted = Vec::with_capacity(items.len());
            for item in items {
                converted.push(value_to_host(bridge, item));
            }
            bridge.sequence(converted)
        }
        Value::Object(pairs) => {
            let mut entries = Vec::with_capacity(pairs.len());
            for (key, item) in pairs {
                let host_key = bridge.string(key);
                let host_item = value_to_host(bridge, item);
                entries.push((host_key, host_item));
            }
            bridge.mapping(entries)
        }
    }
}

/// Convert a host value into a JSON tree.
///
/// Host object graphs are not guaranteed to be trees: they can alias or
/// loop back on themselves. An explicit depth counter bounds the walk, so a
/// self-referential structure fails with
/// [`SerializeError::CyclicOrTooDeep`] instead of hanging.
pub fn host_to_value<B: HostBridge>(bridge: &B, value: &B::Value) -> Result<Value, SerializeError> {
    convert_host(bridge, value, 0, MAX_DEPTH)
}

fn convert_host<B: HostBridge>(
    bridge: &B,
    value: &B::Value,
    depth: usize,
    limit: usize,
) -> Result<Value, SerializeError> {
    match bridge.shape(value) {
        HostShape::Null => Ok(Value::Null),
        HostShape::Bool(b) => Ok(Value::Bool(b)),
        HostShape::Number(n) => Ok(Value::Number(n)),
        HostShape::Str(s) => Ok(Value::String(String::from(s))),
        HostShape::Seq(items) => {
            // Container entry counts even when the sequence is empty,
            // matching the parser's accounting.
            if depth >= limit {
                trace!("depth limit {} exceeded while converting host value", limit);
                return Err(SerializeError::CyclicOrTooDeep { limit });
            }
            let mut converted = Vec::with_capacity(items.len());
            for item in items {
                converted.push(convert_host(bridge, item, depth + 1, limit)?);
            }
            Ok(Value::Array(converted))
        }
        HostShape::Map(entries) => {
            if depth >= limit {
                trace!("depth limit {} exceeded while converting host value", limit);
                return Err(SerializeError::CyclicOrTooDeep { limit });
            }
            let mut pairs = Vec::with_capacity(entries.len());
            for (key, item) in entries {
                let key = match bridge.shape(key) {
                    HostShape::Str(s) => String::from(s),
                    _ => return Err(SerializeError::NonStringKey),
                };
                pairs.push((key, convert_host(bridge, item, depth + 1, limit)?));
            }
            Ok(Value::Object(pairs))
        }
        HostShape::Opaque => Err(SerializeError::Unrepresentable),
    }
}

/// Wrong arity or wrong top-level argument type at an entry point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgumentError {
    /// The entry point takes exactly `expected` arguments.
    WrongArity { expected: usize, given: usize },
    /// `parse` requires its argument to be a string.
    NotAString,
    /// `stringify` was given a value with no JSON representation.
    NotRepresentable,
}

impl core::fmt::Display for ArgumentError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ArgumentError::WrongArity { expected, given } => {
                write!(f, "expected {expected} argument(s), got {given}")
            }
            ArgumentError::NotAString => write!(f, "argument must be a string"),
            ArgumentError::NotRepresentable => {
                write!(f, "argument is not representable as JSON")
            }
        }
    }
}

/// Failures surfaced by the entry points, one variant per error class the
/// host signals to its caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Caller misuse: wrong arity or wrong argument type.
    Argument(ArgumentError),
    /// The document text is not well-formed JSON; position preserved.
    InvalidJson(ParseError),
    /// The value could not be serialized (too deep, non-finite number, ...).
    Serialize(SerializeError),
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::Argument(e) => write!(f, "invalid argument: {e}"),
            Error::InvalidJson(e) => write!(f, "invalid json: {e}"),
            Error::Serialize(e) => write!(f, "cannot stringify: {e}"),
        }
    }
}

impl From<ArgumentError> for Error {
    fn from(err: ArgumentError) -> Self {
        Error::Argument(err)
    }
}

impl From<ParseError> for Error {
    fn from(err: ParseError) -> Self {
        Error::InvalidJson(err)
    }
}

fn check_arity<V>(args: &[V]) -> Result<&V, ArgumentError> {
    match args {
        [single] => Ok(single),
        _ => Err(ArgumentError::WrongArity {
            expected: 1,
            given: args.len(),
        }),
    }
}

/// The `parse` entry point: one string argument in, one host value out.
///
/// A non-string or missing argument fails with [`Error::Argument`] before
/// any parsing happens; malformed text fails with [`Error::InvalidJson`].
pub fn json_parse<B: HostBridge>(bridge: &mut B, args: &[B::Value]) -> Result<B::Value, Error> {
    let arg = check_arity(args)?;
    let text = match bridge.shape(arg) {
        HostShape::Str(s) => s,
        _ => return Err(ArgumentError::NotAString.into()),
    };
    let tree = parse(text)?;
    Ok(value_to_host(bridge, &tree))
}

/// The `stringify` entry point: one host value in, one host string out.
///
/// Serializes every representable value recursively, sequences and nested
/// structures included. Values outside JSON's domain fail with
/// [`Error::Argument`]; depth and number-domain problems fail with
/// [`Error::Serialize`].
pub fn json_stringify<B: HostBridge>(bridge: &mut B, args: &[B::Value]) -> Result<B::Value, Error> {
    let arg = check_arity(args)?;
    let tree = host_to_value(bridge, arg).map_err(|err| match err {
        SerializeError::NonStringKey | SerializeError::Unrepresentable => {
            Error::Argument(ArgumentError::NotRepresentable)
        }
        other => Error::Serialize(other),
    })?;
    let text = stringify(&tree).map_err(Error::Serialize)?;
    Ok(bridge.string(&text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use alloc::vec;

    /// A minimal in-tree host runtime, just enough to exercise the trait.
    #[derive(Debug, Clone, PartialEq)]
    enum Script {
        Nil,
        Flag(bool),
        Num(f64),
        Text(String),
        List(Vec<Script>),
        Table(Vec<(Script, Script)>),
        Handle,
    }

    struct ScriptRuntime;

    impl HostBridge for ScriptRuntime {
        type Value = Script;

        fn null(&mut self) -> Script {
            Script::Nil
        }
        fn boolean(&mut self, value: bool) -> Script {
            Script::Flag(value)
        }
        fn number(&mut self, value: f64) -> Script {
            Script::Num(value)
        }
        fn string(&mut self, value: &str) -> Script {
            Script::Text(value.to_string())
        }
        fn sequence(&mut self, items: Vec<Script>) -> Script {
            Script::List(items)
        }
        fn mapping(&mut self, entries: Vec<(Script, Script)>) -> Script {
            // Real mapping semantics: later writes to the same key replace
            // the earlier value in place, keeping first-seen position.
            let mut table: Vec<(Script, Script)> = Vec::new();
            for (key, value) in entries {
                if let Some(slot) = table.iter_mut().find(|(k, _)| *k == key) {
                    slot.1 = value;
                } else {
                    table.push((key, value));
                }
            }
            Script::Table(table)
        }
        fn shape<'a>(&self, value: &'a Script) -> HostShape<'a, Script> {
            match value {
                Script::Nil => HostShape::Null,
                Script::Flag(b) => HostShape::Bool(*b),
                Script::Num(n) => HostShape::Number(*n),
                Script::Text(s) => HostShape::Str(s),
                Script::List(items) => HostShape::Seq(items.iter().collect()),
                Script::Table(entries) => {
                    HostShape::Map(entries.iter().map(|(k, v)| (k, v)).collect())
                }
                Script::Handle => HostShape::Opaque,
            }
        }
    }

    fn text(s: &str) -> Script {
        Script::Text(s.to_string())
    }

    #[test]
    fn test_value_to_host_preserves_order() {
        let mut rt = ScriptRuntime;
        let tree = parse(r#"[1, "two", null]"#).unwrap();
        let host = value_to_host(&mut rt, &tree);
        assert_eq!(
            host,
            Script::List(vec![Script::Num(1.0), text("two"), Script::Nil])
        );
    }

    #[test]
    fn test_duplicate_keys_last_wins_in_host_mapping() {
        let mut rt = ScriptRuntime;
        let result = json_parse(&mut rt, &[text(r#"{"a":1,"a":2}"#)]).unwrap();
        assert_eq!(result, Script::Table(vec![(text("a"), Script::Num(2.0))]));
    }

    #[test]
    fn test_parse_entry_arity_and_type() {
        let mut rt = ScriptRuntime;
        assert_eq!(
            json_parse(&mut rt, &[]),
            Err(Error::Argument(ArgumentError::WrongArity {
                expected: 1,
                given: 0
            }))
        );
        assert_eq!(
            json_parse(&mut rt, &[text("1"), text("2")]),
            Err(Error::Argument(ArgumentError::WrongArity {
                expected: 1,
                given: 2
            }))
        );
        assert_eq!(
            json_parse(&mut rt, &[Script::Num(1.0)]),
            Err(Error::Argument(ArgumentError::NotAString))
        );
    }

    #[test]
    fn test_parse_entry_reports_invalid_json() {
        let mut rt = ScriptRuntime;
        match json_parse(&mut rt, &[text("[1,")]) {
            Err(Error::InvalidJson(e)) => {
                assert_eq!(e.position.line, 1);
            }
            other => panic!("expected InvalidJson, got {:?}", other),
        }
    }

    #[test]
    fn test_stringify_entry_serializes_sequences() {
        let mut rt = ScriptRuntime;
        let arg = Script::List(vec![Script::Num(1.0), Script::Flag(false), Script::Nil]);
        let result = json_stringify(&mut rt, &[arg]).unwrap();
        assert_eq!(result, text("[1,false,null]"));
    }

    #[test]
    fn test_stringify_entry_rejects_opaque_values() {
        let mut rt = ScriptRuntime;
        assert_eq!(
            json_stringify(&mut rt, &[Script::Handle]),
            Err(Error::Argument(ArgumentError::NotRepresentable))
        );
        let nested = Script::Table(vec![(text("h"), Script::Handle)]);
        assert_eq!(
            json_stringify(&mut rt, &[nested]),
            Err(Error::Argument(ArgumentError::NotRepresentable))
        );
    }

    #[test]
    fn test_stringify_entry_rejects_non_string_keys() {
        let mut rt = ScriptRuntime;
        let table = Script::Table(vec![(Script::Num(1.0), Script::Nil)]);
        assert_eq!(
            json_stringify(&mut rt, &[table]),
            Err(Error::Argument(ArgumentError::NotRepresentable))
        );
    }

    #[test]
    fn test_host_to_value_depth_guard() {
        let mut deep = Script::Nil;
        for _ in 0..600 {
            deep = Script::List(vec![deep]);
        }
        let rt = ScriptRuntime;
        assert_eq!(
            host_to_value(&rt, &deep),
            Err(SerializeError::CyclicOrTooDeep { limit: MAX_DEPTH })
        );
    }

    #[test]
    fn test_host_empty_list_counts_as_a_level() {
        // An innermost empty list still occupies a nesting level; the walk
        // must reject one past the limit even without a deeper child.
        let mut deep = Script::List(vec![]);
        for _ in 1..MAX_DEPTH {
            deep = Script::List(vec![deep]);
        }
        let rt = ScriptRuntime;
        assert!(host_to_value(&rt, &deep).is_ok());
        let over = Script::List(vec![deep]);
        assert_eq!(
            host_to_value(&rt, &over),
            Err(SerializeError::CyclicOrTooDeep { limit: MAX_DEPTH })
        );
    }

    #[test]
    fn test_full_round_trip_through_host() {
        let mut rt = ScriptRuntime;
        let source = text(r#"{"name":"ada","tags":["x","y"],"age":36}"#);
        let parsed = json_parse(&mut rt, &[source.clone()]).unwrap();
        let emitted = json_stringify(&mut rt, &[parsed]).unwrap();
        assert_eq!(emitted, source);
    }
}
