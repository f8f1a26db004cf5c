use alloc::{format, string::ToString};

use rstest::rstest;

use crate::{load_slice, load_str};

/// Every catalogue message, with the exact "near" context and line the
/// diagnostic must carry.
#[rstest]
#[case::empty_input("", "'[' or '{' expected near end of file", 1)]
#[case::bare_identifier("trailing", "'[' or '{' expected near 'trailing'", 1)]
#[case::bare_number("42", "'[' or '{' expected near '42'", 1)]
#[case::bare_string(r#""x""#, "'[' or '{' expected near '\"x\"'", 1)]
#[case::trailing_content("{}trailing", "end of file expected near 'trailing'", 1)]
#[case::second_document("[] []", "end of file expected near '['", 1)]
#[case::missing_value(r#"{"a":}"#, "unexpected token near '}'", 1)]
#[case::missing_colon(r#"{"a" 1}"#, "':' expected near '1'", 1)]
#[case::nonstring_key("{1: 2}", "string or '}' expected near '1'", 1)]
#[case::bare_open_brace("{", "string or '}' expected near end of file", 1)]
#[case::trailing_comma_object(r#"{"a": 1,}"#, "string or '}' expected near '}'", 1)]
#[case::unterminated_object(r#"{"a": 1"#, "'}' expected near end of file", 1)]
#[case::bare_open_bracket("[", "']' expected near end of file", 1)]
#[case::unterminated_array("[1", "']' expected near end of file", 1)]
#[case::trailing_comma_array("[1,]", "unexpected token near ']'", 1)]
#[case::leading_zero("[01]", "invalid token near '0'", 1)]
#[case::bad_keyword("[truthy]", "invalid token near 'truthy'", 1)]
#[case::dangling_exponent("[1e]", "invalid token near '1e'", 1)]
#[case::dangling_dot("[1.]", "invalid token near '1.'", 1)]
#[case::value_on_line_three("[\n1,\n01\n]", "invalid token near '0'", 3)]
#[case::error_after_newlines("{\n  \"a\": }", "unexpected token near '}'", 2)]
fn syntax_error_catalogue(#[case] src: &str, #[case] msg: &str, #[case] line: usize) {
    let err = load_str(src).unwrap_err();
    assert_eq!(err.to_string(), msg, "for input {src:?}");
    assert_eq!(err.line, Some(line), "for input {src:?}");
    assert_eq!(err.column, None);
}

#[test]
fn unicode_escape_is_always_rejected() {
    // Well-formed shape, still unsupported.
    let src = ["[\"", "\\", "u0041\"]"].concat();
    let err = load_str(&src).unwrap_err();
    let expected = ["invalid token near '\"", "\\", "u0041\"'"].concat();
    assert_eq!(err.to_string(), expected);
}

#[test]
fn unescaped_newline_in_string_is_rejected() {
    let err = load_str("[\"a\nb\"]").unwrap_err();
    assert_eq!(err.to_string(), "invalid token near '\"a'");
    assert_eq!(err.line, Some(1));
}

#[test]
fn malformed_utf8_is_rejected() {
    // An overlong encoding of '/' inside a string: the bad sequence is
    // pushed back, so the context shows the scan stopped at the quote.
    let err = load_slice(b"[\"\xC0\xAF\"]").unwrap_err();
    assert_eq!(err.to_string(), "invalid token near '\"'");

    // The same sequence outside a string is the token itself.
    let err = load_slice(b"[\xC0\xAF]").unwrap_err();
    assert_eq!(
        err.to_string(),
        format!("invalid token near '{}'", char::REPLACEMENT_CHARACTER)
    );
}

#[test]
fn error_context_is_bounded() {
    let src = format!("[{}]", "x".repeat(400));
    let err = load_str(&src).unwrap_err();
    assert!(err.message().starts_with("invalid token near 'xxx"));
    assert_eq!(err.message().len(), 160);
}

#[test]
fn no_partial_tree_on_failure() {
    // The parse fails after two members were already built; the error
    // carries only the diagnostic.
    let err = load_str(r#"{"a": 1, "b": [2, 3], "c":}"#).unwrap_err();
    assert_eq!(err.to_string(), "unexpected token near '}'");
}

#[cfg(feature = "std")]
#[test]
fn unopenable_file_has_no_position() {
    let path = std::env::temp_dir().join(format!(
        "jsonload-missing-{}/nope.json",
        std::process::id()
    ));
    let err = crate::load_file(&path).unwrap_err();
    assert!(err.to_string().starts_with("unable to open"), "{err}");
    assert_eq!(err.line, None);
    assert_eq!(err.column, None);
}
