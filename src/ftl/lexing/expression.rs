//! Expression tokens
//!
//! Inside placeables the grammar is context free, so single tokens are recognized with a
//! logos lexer. The lexer state machine calls [`lex_token`] at a non-blank position and
//! takes exactly one token; layout (line breaks, indentation, nesting) stays with the caller.

use crate::ftl::token::Token;
use logos::Logos;
use std::ops::Range;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
enum RawToken {
    #[regex("[a-zA-Z][a-zA-Z0-9_-]*")]
    Identifier,
    #[regex(r"-?[0-9]+(\.[0-9]+)?")]
    Number,
    #[regex(r#""([^"\\\n]|\\[^\n])*""#)]
    StringLiteral,
    #[regex(r#""([^"\\\n]|\\[^\n])*"#)]
    UnterminatedString,
    #[token("-")]
    Minus,
    #[token("->")]
    Arrow,
    #[token("=")]
    Equals,
    #[token(".")]
    Dot,
    #[token("*")]
    Star,
    #[token("$")]
    Dollar,
    #[token(",")]
    Comma,
    #[token(":")]
    Colon,
    #[token("{")]
    OpenBrace,
    #[token("}")]
    CloseBrace,
    #[token("[")]
    OpenBracket,
    #[token("]")]
    CloseBracket,
    #[token("(")]
    OpenParen,
    #[token(")")]
    CloseParen,
}

impl RawToken {
    fn into_token(self, slice: &str) -> Token {
        match self {
            RawToken::Identifier => Token::Identifier(slice.to_owned()),
            RawToken::Number => Token::Number(slice.to_owned()),
            RawToken::StringLiteral => Token::StringLiteral(slice[1..slice.len() - 1].to_owned()),
            RawToken::UnterminatedString => {
                Token::UnterminatedString(slice[1..].trim_end_matches('\r').to_owned())
            }
            RawToken::Minus => Token::Minus,
            RawToken::Arrow => Token::Arrow,
            RawToken::Equals => Token::Equals,
            RawToken::Dot => Token::Dot,
            RawToken::Star => Token::Star,
            RawToken::Dollar => Token::Dollar,
            RawToken::Comma => Token::Comma,
            RawToken::Colon => Token::Colon,
            RawToken::OpenBrace => Token::OpenBrace,
            RawToken::CloseBrace => Token::CloseBrace,
            RawToken::OpenBracket => Token::OpenBracket,
            RawToken::CloseBracket => Token::CloseBracket,
            RawToken::OpenParen => Token::OpenParen,
            RawToken::CloseParen => Token::CloseParen,
        }
    }
}

/// Lex one token starting exactly at `pos`
///
/// Always consumes at least one character: anything logos does not recognize becomes
/// [`Token::Unknown`] for a single character. `pos` must be a char boundary before the end
/// of `source`.
pub fn lex_token(source: &str, pos: usize) -> (Token, Range<usize>) {
    let rest = &source[pos..];
    let mut lexer = RawToken::lexer(rest);
    match lexer.next() {
        Some(Ok(raw)) if lexer.span().start == 0 => {
            let span = lexer.span();
            (raw.into_token(lexer.slice()), pos + span.start..pos + span.end)
        }
        _ => {
            let c = rest.chars().next().unwrap_or('\0');
            (Token::Unknown(c), pos..pos + c.len_utf8())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("foo-bar_1 x", Token::Identifier("foo-bar_1".into()), 0..9)]
    #[case("-12.5)", Token::Number("-12.5".into()), 0..5)]
    #[case("1.)", Token::Number("1".into()), 0..1)]
    #[case("->", Token::Arrow, 0..2)]
    #[case("-term", Token::Minus, 0..1)]
    #[case(r#""a \" b" x"#, Token::StringLiteral(r#"a \" b"#.into()), 0..8)]
    #[case("\"open\n", Token::UnterminatedString("open".into()), 0..5)]
    #[case("\"open\r\n", Token::UnterminatedString("open".into()), 0..6)]
    #[case("@x", Token::Unknown('@'), 0..1)]
    #[case("é", Token::Unknown('é'), 0..2)]
    fn test_single_token(
        #[case] source: &str,
        #[case] token: Token,
        #[case] span: Range<usize>,
    ) {
        assert_eq!(lex_token(source, 0), (token, span));
    }

    #[test]
    fn test_offsets_are_absolute() {
        let source = "key = { $var }";
        assert_eq!(lex_token(source, 8), (Token::Dollar, 8..9));
        assert_eq!(lex_token(source, 9), (Token::Identifier("var".into()), 9..12));
    }
}
