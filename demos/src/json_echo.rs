// SPDX-License-Identifier: Apache-2.0

//! Parse a JSON document and echo it back minified.
//!
//! Reads the document from the first argument, or from stdin when no
//! argument is given. Run with `RUST_LOG=trace` to watch the library's
//! diagnostics.

use std::io::Read;
use std::process::ExitCode;

use treejson::{parse, stringify, Kind, Value};

fn describe(value: &Value) -> String {
    match value.kind() {
        Kind::Null => "null".to_string(),
        Kind::Bool => "boolean".to_string(),
        Kind::Number => "number".to_string(),
        Kind::String => "string".to_string(),
        Kind::Array => format!(
            "array with {} elements",
            value.as_array().map_or(0, |items| items.len())
        ),
        Kind::Object => format!(
            "object with {} entries",
            value.as_object().map_or(0, |pairs| pairs.len())
        ),
    }
}

fn main() -> ExitCode {
    env_logger::init();

    let input = match std::env::args().nth(1) {
        Some(arg) => arg,
        None => {
            let mut buf = String::new();
            if let Err(e) = std::io::stdin().read_to_string(&mut buf) {
                eprintln!("error: cannot read stdin: {e}");
                return ExitCode::FAILURE;
            }
            buf
        }
    };

    let value = match parse(&input) {
        Ok(value) => value,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };
    log::info!("parsed a {}", describe(&value));

    match stringify(&value) {
        Ok(text) => {
            println!("{text}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
