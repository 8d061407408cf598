//! Token vocabulary shared by the lexer and the parser
//!
//!     Fluent is context sensitive: the same characters mean text in one place and syntax in
//!     another, and whether a line continues a value depends on its indentation. The lexer
//!     resolves all of that, so the stream it hands to the parser already carries the
//!     structure as explicit tokens:
//!
//!         - Boundary tokens (`PatternStart`, `PatternEnd`, `PatternSkip`,
//!           `CloseCommentBlock`, `EndPositionalArgs`) are zero-width markers for things that
//!           are implied by layout rather than spelled out.
//!         - `PureText` carries an already normalized piece of pattern text.
//!         - `UnfinishedLine` covers text the lexer could not fit anywhere; the parser turns
//!           it into junk.
//!         - The rest are the ordinary expression tokens.
//!
//!     Tokens are paired with byte ranges into the source: `(Token, Range<usize>)`.

use super::ast::CommentLevel;
use serde::Serialize;
use std::fmt;
use std::ops::Range;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Token {
    /// A value begins (zero-width)
    PatternStart,
    /// A value ends (zero-width)
    PatternEnd,
    /// `=` with nothing after it, the entry has no value (zero-width)
    PatternSkip,
    /// Normalized text of one line piece of a pattern
    PureText(String),
    /// One or more blank lines at the top level
    BlankLines,
    /// Text that starts neither a comment nor an entry, up to the end of its line
    UnfinishedLine,
    /// One comment line; its content excludes the `#` sigil and the space after it
    Comment { level: CommentLevel, content: String },
    /// End of a run of comment lines of the same level (zero-width)
    CloseCommentBlock,
    /// Inside call arguments, the positional list is over (zero-width)
    EndPositionalArgs,

    Identifier(String),
    Number(String),
    /// Content between the quotes, escapes untouched
    StringLiteral(String),
    /// A string literal that reaches the end of its line without a closing quote
    UnterminatedString(String),

    Minus,
    Equals,
    Dot,
    Arrow,
    Star,
    Dollar,
    Comma,
    Colon,
    OpenBrace,
    CloseBrace,
    OpenBracket,
    CloseBracket,
    OpenParen,
    CloseParen,

    /// A character that has no meaning in expression context
    Unknown(char),
}

impl Token {
    /// Zero-width structural marker emitted by the lexer
    pub fn is_boundary(&self) -> bool {
        matches!(
            self,
            Token::PatternStart
                | Token::PatternEnd
                | Token::PatternSkip
                | Token::CloseCommentBlock
                | Token::EndPositionalArgs
        )
    }

    /// Tokens that may open a new top-level item
    pub fn starts_top_level_item(&self) -> bool {
        matches!(
            self,
            Token::Identifier(_)
                | Token::Minus
                | Token::Comment { .. }
                | Token::BlankLines
                | Token::UnfinishedLine
        )
    }

    pub fn name(&self) -> &'static str {
        match self {
            Token::PatternStart => "PatternStart",
            Token::PatternEnd => "PatternEnd",
            Token::PatternSkip => "PatternSkip",
            Token::PureText(_) => "PureText",
            Token::BlankLines => "BlankLines",
            Token::UnfinishedLine => "UnfinishedLine",
            Token::Comment { .. } => "Comment",
            Token::CloseCommentBlock => "CloseCommentBlock",
            Token::EndPositionalArgs => "EndPositionalArgs",
            Token::Identifier(_) => "Identifier",
            Token::Number(_) => "Number",
            Token::StringLiteral(_) => "StringLiteral",
            Token::UnterminatedString(_) => "UnterminatedString",
            Token::Minus => "Minus",
            Token::Equals => "Equals",
            Token::Dot => "Dot",
            Token::Arrow => "Arrow",
            Token::Star => "Star",
            Token::Dollar => "Dollar",
            Token::Comma => "Comma",
            Token::Colon => "Colon",
            Token::OpenBrace => "OpenBrace",
            Token::CloseBrace => "CloseBrace",
            Token::OpenBracket => "OpenBracket",
            Token::CloseBracket => "CloseBracket",
            Token::OpenParen => "OpenParen",
            Token::CloseParen => "CloseParen",
            Token::Unknown(_) => "Unknown",
        }
    }
}

/// How a token is described in error messages
impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::PatternStart => write!(f, "start of a value"),
            Token::PatternEnd => write!(f, "end of a value"),
            Token::PatternSkip => write!(f, "missing value"),
            Token::PureText(text) => write!(f, "text {:?}", text),
            Token::BlankLines => write!(f, "blank line"),
            Token::UnfinishedLine => write!(f, "unexpected line"),
            Token::Comment { level, .. } => write!(f, "`{}` comment", level),
            Token::CloseCommentBlock => write!(f, "end of comment"),
            Token::EndPositionalArgs => write!(f, "end of positional arguments"),
            Token::Identifier(name) => write!(f, "identifier `{}`", name),
            Token::Number(raw) => write!(f, "number `{}`", raw),
            Token::StringLiteral(raw) => write!(f, "string \"{}\"", raw),
            Token::UnterminatedString(raw) => write!(f, "unterminated string \"{}", raw),
            Token::Minus => write!(f, "`-`"),
            Token::Equals => write!(f, "`=`"),
            Token::Dot => write!(f, "`.`"),
            Token::Arrow => write!(f, "`->`"),
            Token::Star => write!(f, "`*`"),
            Token::Dollar => write!(f, "`$`"),
            Token::Comma => write!(f, "`,`"),
            Token::Colon => write!(f, "`:`"),
            Token::OpenBrace => write!(f, "`{{`"),
            Token::CloseBrace => write!(f, "`}}`"),
            Token::OpenBracket => write!(f, "`[`"),
            Token::CloseBracket => write!(f, "`]`"),
            Token::OpenParen => write!(f, "`(`"),
            Token::CloseParen => write!(f, "`)`"),
            Token::Unknown(c) => write!(f, "unexpected character {:?}", c),
        }
    }
}

/// Render a token stream one token per line, `name@start..end payload`
pub fn format_tokens(tokens: &[(Token, Range<usize>)]) -> String {
    let mut out = String::new();
    for (token, span) in tokens {
        out.push_str(&format!("{}@{}..{}", token.name(), span.start, span.end));
        match token {
            Token::PureText(text)
            | Token::Identifier(text)
            | Token::Number(text)
            | Token::StringLiteral(text)
            | Token::UnterminatedString(text) => out.push_str(&format!(" {:?}", text)),
            Token::Comment { level, content } => {
                out.push_str(&format!(" {} {:?}", level, content))
            }
            Token::Unknown(c) => out.push_str(&format!(" {:?}", c)),
            _ => {}
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundary_tokens() {
        assert!(Token::PatternStart.is_boundary());
        assert!(Token::EndPositionalArgs.is_boundary());
        assert!(!Token::PureText("x".into()).is_boundary());
        assert!(!Token::CloseBrace.is_boundary());
    }

    #[test]
    fn test_display_for_errors() {
        assert_eq!(Token::OpenBrace.to_string(), "`{`");
        assert_eq!(Token::Identifier("foo".into()).to_string(), "identifier `foo`");
    }

    #[test]
    fn test_format_tokens() {
        let tokens = vec![
            (Token::Identifier("a".into()), 0..1),
            (Token::Equals, 2..3),
            (Token::PatternSkip, 3..3),
        ];
        assert_eq!(
            format_tokens(&tokens),
            "Identifier@0..1 \"a\"\nEquals@2..3\nPatternSkip@3..3\n"
        );
    }
}
