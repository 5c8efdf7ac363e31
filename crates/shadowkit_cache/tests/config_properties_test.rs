use shadowkit_cache::{ConfigProperties, PropertiesErrorKind};

#[test]
fn parses_typical_file() {
    let text = "\
# simulation defaults
! bang comments too
sdk=33
shadows : com.example.ShadowFoo,\\
          com.example.ShadowBar
qualifiers    en-rUS
empty=
path=C\\:\\\\tools
";
    let properties = ConfigProperties::parse("shadowkit.properties", text).unwrap();

    assert_eq!(properties.len(), 5);
    assert_eq!(properties.get("sdk"), Some("33"));
    assert_eq!(
        properties.get("shadows"),
        Some("com.example.ShadowFoo,com.example.ShadowBar")
    );
    assert_eq!(properties.get("qualifiers"), Some("en-rUS"));
    assert_eq!(properties.get("empty"), Some(""));
    assert_eq!(properties.get("path"), Some("C:\\tools"));
    assert!(!properties.contains_key("#"));
}

#[test]
fn later_definitions_win() {
    let properties = ConfigProperties::parse("p", "a=1\na=2\n").unwrap();
    assert_eq!(properties.get("a"), Some("2"));
}

#[test]
fn escaped_separators_stay_in_key() {
    let properties = ConfigProperties::parse("p", "key\\ with\\=odd=value\n").unwrap();
    assert_eq!(properties.get("key with=odd"), Some("value"));
}

#[test]
fn unicode_escapes_and_control_escapes() {
    let properties = ConfigProperties::parse("p", "greeting=\\u00e9t\\u00e9\\tx\n").unwrap();
    assert_eq!(properties.get("greeting"), Some("été\tx"));
}

#[test]
fn crlf_line_endings() {
    let properties = ConfigProperties::parse("p", "a=1\r\nb=2\r\n").unwrap();
    assert_eq!(properties.get("a"), Some("1"));
    assert_eq!(properties.get("b"), Some("2"));
}

#[test]
fn lone_carriage_return_ends_a_line() {
    let properties = ConfigProperties::parse("p", "a=1\rb=2\r").unwrap();
    assert_eq!(properties.len(), 2);
    assert_eq!(properties.get("a"), Some("1"));
    assert_eq!(properties.get("b"), Some("2"));
}

#[test]
fn continuation_across_mixed_line_endings() {
    let text = "list=one,\\\r    two,\\\r\n    three\rnext=4\n";
    let properties = ConfigProperties::parse("p", text).unwrap();
    assert_eq!(properties.get("list"), Some("one,two,three"));
    assert_eq!(properties.get("next"), Some("4"));
}

#[test]
fn unicode_escape_requires_four_hex_digits() {
    for text in ["a=\\u+041\n", "a=\\u-041\n", "a=\\u 041\n"] {
        let err = ConfigProperties::parse("p", text).unwrap_err();
        assert!(
            matches!(err.kind, PropertiesErrorKind::Malformed { .. }),
            "{text:?} gave {err}"
        );
    }
    let properties = ConfigProperties::parse("p", "a=\\u0041\n").unwrap();
    assert_eq!(properties.get("a"), Some("A"));
}

#[test]
fn trailing_continuation_at_end_of_input() {
    let properties = ConfigProperties::parse("p", "a=1\\").unwrap();
    assert_eq!(properties.get("a"), Some("1"));
}

#[test]
fn get_or_and_iteration() {
    let properties = ConfigProperties::parse("p", "b=2\na=1\n").unwrap();

    assert_eq!(properties.get_or("missing", "fallback"), "fallback");
    assert_eq!(properties.iter().collect::<Vec<_>>(), vec![("a", "1"), ("b", "2")]);
}

#[test]
fn empty_text_has_no_keys() {
    let properties = ConfigProperties::parse("p", "\n   \n# only comments\n").unwrap();
    assert!(properties.is_empty());
}
