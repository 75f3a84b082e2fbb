// SPDX-License-Identifier: Apache-2.0

#![cfg_attr(not(test), no_std)]

extern crate alloc;

mod cursor;

mod escape;

mod number;

mod parse_error;
pub use parse_error::{ParseError, ParseErrorKind, Position};

mod value;
pub use value::{Kind, Value};

mod parser;
pub use parser::{parse, parse_slice, parse_slice_with_options, parse_with_options, ParseOptions};

mod serializer;
pub use serializer::{stringify, stringify_with_options, SerializeError, StringifyOptions};

mod bridge;
pub use bridge::{
    host_to_value, json_parse, json_stringify, value_to_host, ArgumentError, Error, HostBridge,
    HostShape,
};

/// Default nesting-depth limit shared by the parser, the serializer and the
/// host-value conversion. Deeply nested documents beyond this fail with a
/// structured error instead of exhausting the call stack.
pub const MAX_DEPTH: usize = 512;
