// SPDX-License-Identifier: Apache-2.0

// Rejection matrix for malformed documents. Each case must fail, and the
// table pins the exact error kind so failures stay distinct.

use treejson::{parse, ParseErrorKind};

macro_rules! generate_reject_tests {
    ($(($name:ident, $input:expr, $kind:expr)),* $(,)?) => {
        $(
            paste::paste! {
                #[test]
                fn [<test_reject_ $name>]() {
                    match parse($input) {
                        Err(e) => assert_eq!(
                            e.kind,
                            $kind,
                            "input {:?}: expected {:?}, got {:?}",
                            $input,
                            $kind,
                            e.kind
                        ),
                        Ok(v) => panic!(
                            "input {:?} should fail to parse but produced {:?}",
                            $input, v
                        ),
                    }
                }
            }
        )*
    };
}

generate_reject_tests!(
    (empty, "", ParseErrorKind::UnexpectedEndOfInput),
    (only_whitespace, " \t\n", ParseErrorKind::UnexpectedEndOfInput),
    (unterminated_object, "{", ParseErrorKind::UnexpectedEndOfInput),
    (unterminated_array, "[1", ParseErrorKind::UnexpectedEndOfInput),
    (unterminated_string, "\"abc", ParseErrorKind::UnterminatedString),
    (string_escape_at_eof, "\"abc\\", ParseErrorKind::UnterminatedString),
    (leading_zero, "01", ParseErrorKind::InvalidNumber),
    (negative_leading_zero, "-01", ParseErrorKind::InvalidNumber),
    (bare_minus, "-", ParseErrorKind::InvalidNumber),
    (dot_without_digits, "1.", ParseErrorKind::InvalidNumber),
    (exponent_without_digits, "1e", ParseErrorKind::InvalidNumber),
    (trailing_comma_array, "[1,]", ParseErrorKind::UnexpectedCharacter),
    (trailing_comma_object, "{\"a\":1,}", ParseErrorKind::UnexpectedCharacter),
    (comma_only_array, "[,]", ParseErrorKind::UnexpectedCharacter),
    (missing_colon, "{\"a\" 1}", ParseErrorKind::ExpectedColon),
    (unquoted_key, "{a:1}", ParseErrorKind::UnexpectedCharacter),
    (single_quoted_string, "'abc'", ParseErrorKind::UnexpectedCharacter),
    (mismatched_close, "[1}", ParseErrorKind::UnexpectedCharacter),
    (bare_word, "nil", ParseErrorKind::UnexpectedCharacter),
    (capitalized_literal, "True", ParseErrorKind::UnexpectedCharacter),
    (trailing_garbage, "null,", ParseErrorKind::TrailingCharacters),
    (second_document, "1 2", ParseErrorKind::TrailingCharacters),
    (bad_escape, "\"a\\q\"", ParseErrorKind::InvalidEscape),
    (bad_unicode_hex, "\"\\uZZZZ\"", ParseErrorKind::InvalidUnicodeHex),
    (short_unicode_escape, "\"\\u12\"", ParseErrorKind::InvalidUnicodeHex),
    (lone_high_surrogate, "\"\\uD800\"", ParseErrorKind::UnpairedSurrogate),
    (lone_low_surrogate, "\"\\uDC00\"", ParseErrorKind::UnpairedSurrogate),
    (high_surrogate_then_text, "\"\\uD800x\"", ParseErrorKind::UnpairedSurrogate),
    (raw_newline_in_string, "\"a\nb\"", ParseErrorKind::ControlCharacterInString),
    (raw_tab_in_string, "\"a\tb\"", ParseErrorKind::ControlCharacterInString),
);

#[test]
fn test_every_rejection_reports_a_position() {
    // Spot-check that positions point into the input, not past it wildly.
    for input in ["[1,]", "{\"a\" 1}", "\"abc", "01"] {
        let err = parse(input).unwrap_err();
        assert!(
            err.position.offset <= input.len(),
            "offset {} out of range for {:?}",
            err.position.offset,
            input
        );
        assert!(err.position.line >= 1);
        assert!(err.position.column >= 1);
    }
}
