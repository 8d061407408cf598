//! Lexer tests over the sample documents in docs/samples

use ftl::ftl::lexing::tokenize;
use ftl::ftl::token::Token;
use rstest::rstest;
use std::fs;
use std::ops::Range;

fn read_sample_document(name: &str) -> String {
    fs::read_to_string(format!("docs/samples/{}", name)).expect("Failed to read sample document")
}

fn count(tokens: &[(Token, Range<usize>)], name: &str) -> usize {
    tokens.iter().filter(|(t, _)| t.name() == name).count()
}

#[rstest]
#[case("000-messages.ftl")]
#[case("010-multiline.ftl")]
#[case("020-attributes.ftl")]
#[case("030-comments.ftl")]
#[case("040-select.ftl")]
#[case("050-calls.ftl")]
fn test_clean_samples_have_balanced_patterns(#[case] name: &str) {
    let source = read_sample_document(name);
    let tokens = tokenize(&source);

    assert_eq!(count(&tokens, "UnfinishedLine"), 0, "{}", name);
    assert_eq!(count(&tokens, "Unknown"), 0, "{}", name);
    assert_eq!(count(&tokens, "UnterminatedString"), 0, "{}", name);
    assert_eq!(
        count(&tokens, "PatternStart"),
        count(&tokens, "PatternEnd"),
        "{}",
        name
    );
    assert_eq!(
        count(&tokens, "OpenBrace"),
        count(&tokens, "CloseBrace"),
        "{}",
        name
    );
}

#[rstest]
#[case("000-messages.ftl")]
#[case("010-multiline.ftl")]
#[case("020-attributes.ftl")]
#[case("030-comments.ftl")]
#[case("040-select.ftl")]
#[case("050-calls.ftl")]
#[case("060-junk.ftl")]
fn test_token_spans_are_ordered_and_in_bounds(#[case] name: &str) {
    let source = read_sample_document(name);
    let tokens = tokenize(&source);

    let mut last_start = 0;
    for (token, span) in &tokens {
        assert!(span.start <= span.end, "{:?} {:?}", token, span);
        assert!(span.end <= source.len(), "{:?} {:?}", token, span);
        assert!(span.start >= last_start, "{:?} {:?}", token, span);
        assert!(source.is_char_boundary(span.start) && source.is_char_boundary(span.end));
        if token.is_boundary() {
            assert_eq!(span.start, span.end, "{:?} is not zero-width", token);
        }
        last_start = span.start;
    }
}

#[test]
fn test_comment_sample_tokens() {
    let source = read_sample_document("030-comments.ftl");
    let tokens = tokenize(&source);

    let comments: Vec<String> = tokens
        .iter()
        .filter_map(|(t, _)| match t {
            Token::Comment { content, .. } => Some(content.clone()),
            _ => None,
        })
        .collect();
    assert_eq!(
        comments,
        vec![
            "Resource comment for the whole file",
            "Group: Navigation",
            "Documents the next message",
            "across two lines",
            "Standalone, blank line follows",
            "",
            "Empty first line above",
        ]
    );
    // One block per run of same-level comment lines
    assert_eq!(count(&tokens, "CloseCommentBlock"), 5);
}

#[test]
fn test_junk_sample_has_unfinished_lines() {
    let source = read_sample_document("060-junk.ftl");
    let tokens = tokenize(&source);

    let unfinished: Vec<&str> = tokens
        .iter()
        .filter(|(t, _)| *t == Token::UnfinishedLine)
        .map(|(_, span)| &source[span.clone()])
        .collect();
    assert!(unfinished.contains(&"!garbage line\n"));
}

#[test]
fn test_multiline_sample_text_pieces() {
    let source = read_sample_document("010-multiline.ftl");
    let texts: Vec<String> = tokenize(&source)
        .into_iter()
        .filter_map(|(t, _)| match t {
            Token::PureText(text) => Some(text),
            _ => None,
        })
        .collect();
    assert_eq!(texts.first().map(String::as_str), Some("Text on one line"));
    assert!(texts.contains(&"\n    deeper".to_string()));
}
