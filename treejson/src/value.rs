// SPDX-License-Identifier: Apache-2.0

use alloc::string::String;
use alloc::vec::Vec;

/// An owned JSON document tree.
///
/// Every composite variant exclusively owns its children, so a `Value` is
/// always a finite, acyclic tree: dropping a node drops its whole subtree.
/// Numbers are IEEE-754 doubles; the JSON grammar makes no integer/float
/// distinction and neither does this model.
///
/// Objects are ordered pair lists. The parser preserves duplicate keys in
/// source order; [`Value::get`] resolves duplicates the way a mapping would,
/// returning the last occurrence.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// The `null` literal.
    Null,
    /// A `true` or `false` literal.
    Bool(bool),
    /// A number, always represented as an f64.
    Number(f64),
    /// A string value.
    String(String),
    /// An ordered sequence of values.
    Array(Vec<Value>),
    /// An ordered list of key/value pairs, in source order.
    Object(Vec<(String, Value)>),
}

/// The dynamic type tag of a [`Value`], for exhaustive dispatch at
/// conversion sites.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Null,
    Bool,
    Number,
    String,
    Array,
    Object,
}

impl Value {
    /// Returns the dynamic type tag of this value.
    pub fn kind(&self) -> Kind {
        match self {
            Value::Null => Kind::Null,
            Value::Bool(_) => Kind::Bool,
            Value::Number(_) => Kind::Number,
            Value::String(_) => Kind::String,
            Value::Array(_) => Kind::Array,
            Value::Object(_) => Kind::Object,
        }
    }

    /// Returns true if this value is `null`.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns the boolean payload, if this is a `Bool`.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the numeric payload, if this is a `Number`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the string payload, if this is a `String`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Returns the element slice, if this is an `Array`.
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    /// Returns the key/value pair slice, if this is an `Object`.
    ///
    /// Pairs appear in source order and may contain duplicate keys; use
    /// [`Value::get`] for mapping-style lookup.
    pub fn as_object(&self) -> Option<&[(String, Value)]> {
        match self {
            Value::Object(pairs) => Some(pairs.as_slice()),
            _ => None,
        }
    }

    /// Mapping-style key lookup on an `Object`.
    ///
    /// When the same key occurs more than once the last occurrence wins,
    /// matching what a host mapping sees after inserting the pairs in order.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_object()?
            .iter()
            .rev()
            .find(|(k, _)| k.as_str() == key)
            .map(|(_, v)| v)
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::Null
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(String::from(value))
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}
