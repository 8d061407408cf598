//! Property-based tests for the lexer
//!
//! These tests feed the lexer arbitrary Fluent-looking text and check that it never panics
//! and that the token stream stays well formed.

use ftl::ftl::lexing::{tokenize, tokenize_with_max_nesting};
use ftl::ftl::token::Token;
use proptest::prelude::*;

/// Characters that carry meaning somewhere in Fluent, plus some filler
fn fluent_ish() -> impl Strategy<Value = String> {
    proptest::string::string_regex(r#"[a-zA-Z0-9 =.{}$*\[\]()",:#\n\r\\é-]{0,200}"#)
        .expect("valid regex")
}

proptest! {
    #[test]
    fn lexer_never_panics(source in fluent_ish()) {
        let _ = tokenize(&source);
    }

    #[test]
    fn token_spans_are_in_bounds_and_ordered(source in fluent_ish()) {
        let tokens = tokenize(&source);
        let mut last_start = 0;
        for (token, span) in &tokens {
            prop_assert!(span.start <= span.end);
            prop_assert!(span.end <= source.len());
            prop_assert!(span.start >= last_start, "{:?} at {:?} after {}", token, span, last_start);
            if token.is_boundary() {
                prop_assert_eq!(span.start, span.end);
            }
            last_start = span.start;
        }
    }

    #[test]
    fn top_level_unfinished_lines_cover_whole_lines(source in fluent_ish()) {
        for (token, span) in tokenize(&source) {
            if token == Token::UnfinishedLine && (span.start == 0 || source.as_bytes()[span.start - 1] == b'\n') {
                let end = source[span.start..]
                    .find('\n')
                    .map(|i| span.start + i + 1)
                    .unwrap_or(source.len());
                prop_assert_eq!(span.end, end);
            }
        }
    }

    #[test]
    fn simple_messages_lex_to_one_text_piece(
        id in "[a-z][a-z0-9-]{0,10}",
        text in "[a-zA-Z][a-zA-Z ,.!?]{0,30}",
    ) {
        let source = format!("{} = {}\n", id, text);
        let texts: Vec<String> = tokenize(&source)
            .into_iter()
            .filter_map(|(t, _)| match t {
                Token::PureText(s) => Some(s),
                _ => None,
            })
            .collect();
        prop_assert_eq!(texts, vec![text.trim_end().to_string()]);
    }

    #[test]
    fn nesting_limit_is_respected(depth in 1usize..12, limit in 1usize..12) {
        let source = format!("a = {}1{}\n", "{ ".repeat(depth), " }".repeat(depth));
        let tokens = tokenize_with_max_nesting(&source, limit);
        let bailed = tokens.iter().any(|(t, _)| *t == Token::UnfinishedLine);
        prop_assert_eq!(bailed, depth > limit);
    }
}
