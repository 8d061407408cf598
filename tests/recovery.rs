//! Error recovery: a broken entry turns into junk and parsing resumes at the next entry

use ftl::ftl::ast::Entry;
use ftl::ftl::testing::assert_resource;
use ftl::{parse, parse_resource};
use rstest::rstest;

fn kinds(source: &str) -> String {
    parse_resource(source)
        .body
        .iter()
        .map(|entry| match entry {
            Entry::Message(_) => "M",
            Entry::Term(_) => "T",
            Entry::Comment(_) => "C",
            Entry::Junk(_) => "J",
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[rstest]
#[case::unclosed_placeable("a = { $x\nb = B\n", "J M")]
#[case::stray_close_brace("a = { 1 } }\nb = B\n", "J M")]
#[case::comment_without_space("#nospace\nok = y\n", "J M")]
#[case::indented_top_level_line("  indented = x\nok = y\n", "J M")]
#[case::term_without_value("-term =\nok = y\n", "J M")]
#[case::unterminated_string("a = { \"open }\nb = B\n", "J M")]
#[case::broken_attribute_header("a = A\n    .attr\nb = B\n", "J M")]
#[case::missing_default_variant("a = { $x ->\n   [one] One\n}\nb = B\n", "J M")]
#[case::positional_after_named("a = { FUN(x: 1, 2) }\n-b = B\n", "J T")]
#[case::documented_broken_entry("# Doc\nbroken = {\nok = fine\n", "C J M")]
#[case::junk_between_valid_entries("a = A\n!!\nb = B\n", "M J M")]
fn test_recovery_resumes_at_next_entry(#[case] source: &str, #[case] expected: &str) {
    assert_eq!(kinds(source), expected);
}

#[rstest]
#[case("a = { $x ->\n   [one] One\n}\n", "a default variant marked with `*`")]
#[case("a = { $x ->\n  *[one] One\n  *[two] Two\n}\n", "only one default variant")]
#[case("a = { FUN(x: 1, 2) }\n", "a named argument")]
#[case("a = { FUN(x: 1, x: 2) }\n", "repeated argument `x`")]
#[case("a = { lower(1) }\n", "an upper-case function name")]
#[case("a = { -term.attr }\n", "term attribute")]
#[case("-term =\n", "a value for the term")]
#[case("a = { $x.attr ->\n  *[one] One\n}\n", "`}`")]
fn test_error_messages(#[case] source: &str, #[case] expected: &str) {
    let resource = parse_resource(source);
    assert_resource(&resource).junk_count(1).entry(0, |e| {
        e.assert_junk().error_contains(expected);
    });
}

#[rstest]
#[case::non_hex_digits("m = { \"\\uZZZZ\" }\n", 7..13)]
#[case::non_hex_long_form("m = { \"\\U00ZZZZ\" }\n", 7..15)]
#[case::short_run("m = { \"\\u12\" }\n", 7..11)]
fn test_invalid_escape_becomes_junk(#[case] source: &str, #[case] span: std::ops::Range<usize>) {
    let resource = parse_resource(source);
    assert_resource(&resource).junk_count(1).entry(0, |e| {
        e.assert_junk().error_code("invalid-escape");
    });
    assert_eq!(resource.errors().next().map(|err| err.span()), Some(span));
}

#[test]
fn test_junk_content_is_whole_lines() {
    let source = "ok = fine\nbroken = { $var\nstill = here\n";
    let resource = parse_resource(source);
    assert_resource(&resource)
        .entry_count(3)
        .entry(1, |e| {
            e.assert_junk().content("broken = { $var\n");
        })
        .entry(2, |e| {
            e.assert_message().id("still").value_text("here");
        });
}

#[test]
fn test_parse_reports_every_junk_error() {
    let (resource, errors) = parse("!!\na = A\n}}\n-b =\n").unwrap_err();
    assert_eq!(resource.junk().count(), 3);
    assert_eq!(errors.len(), 3);
    assert_eq!(errors[0].code(), "unfinished-line");
    assert_eq!(errors[2].code(), "syntax");
}

#[test]
fn test_trailing_carriage_return_is_not_content() {
    let resource = parse_resource("m = x\r");
    assert_resource(&resource).entry_count(1).entry(0, |e| {
        e.assert_message().id("m").value_text("x");
    });
}

#[test]
fn test_crlf_recovery() {
    let resource = parse_resource("a = { $x\r\nb = B\r\n");
    assert_resource(&resource)
        .entry_count(2)
        .entry(0, |e| {
            e.assert_junk().content("a = { $x\r\n");
        })
        .entry(1, |e| {
            e.assert_message().id("b").value_text("B");
        });
}
