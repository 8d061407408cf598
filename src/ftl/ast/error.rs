//! Error types for parsing and AST construction

use super::range::Range;
use serde::Serialize;
use std::ops::Range as ByteRange;
use thiserror::Error;

/// Errors that can occur while parsing a resource
///
/// The parser never aborts on one of these: each error is attached to the [`Junk`](super::Junk)
/// entry that replaces the malformed text, and the remaining entries are still parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ParseError {
    /// The next token did not fit the grammar
    #[error("expected {expected}, found {found}")]
    Syntax {
        position: usize,
        expected: String,
        found: String,
    },

    /// A top-level line that does not start a comment or an entry
    #[error("unexpected content outside of an entry")]
    UnfinishedLine { span: ByteRange<usize> },

    /// A string literal without its closing quote on the same line
    #[error("unterminated string literal")]
    UnterminatedString { span: ByteRange<usize> },

    /// A backslash sequence that is not one of `\"`, `\\`, `\uXXXX` or `\UXXXXXX`
    #[error("invalid escape sequence `{raw}`")]
    InvalidEscape { span: ByteRange<usize>, raw: String },

    /// A repeated message, term or attribute id (only with `DuplicatePolicy::Reject`)
    #[error("duplicate id `{id}`")]
    DuplicateId { span: ByteRange<usize>, id: String },
}

impl ParseError {
    pub fn syntax(position: usize, expected: impl Into<String>, found: impl Into<String>) -> Self {
        ParseError::Syntax {
            position,
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Byte span the error points at (zero-width for syntax errors)
    pub fn span(&self) -> ByteRange<usize> {
        match self {
            ParseError::Syntax { position, .. } => *position..*position,
            ParseError::UnfinishedLine { span }
            | ParseError::UnterminatedString { span }
            | ParseError::InvalidEscape { span, .. }
            | ParseError::DuplicateId { span, .. } => span.clone(),
        }
    }

    /// Stable short name, used as the diagnostic code
    pub fn code(&self) -> &'static str {
        match self {
            ParseError::Syntax { .. } => "syntax",
            ParseError::UnfinishedLine { .. } => "unfinished-line",
            ParseError::UnterminatedString { .. } => "unterminated-string",
            ParseError::InvalidEscape { .. } => "invalid-escape",
            ParseError::DuplicateId { .. } => "duplicate-id",
        }
    }
}

pub type ParseResult<T> = Result<T, ParseError>;

/// Format source code context around an error location
///
/// Shows 2 lines before the error, the error line with >> marker, and 2 lines after.
/// All lines are numbered for easy reference.
pub fn format_source_context(source: &str, range: &Range) -> String {
    let lines: Vec<&str> = source.lines().collect();
    let error_line = range.start.line;

    let start_line = error_line.saturating_sub(2);
    let end_line = (error_line + 3).min(lines.len());

    let mut context = String::new();
    for (line_num, line) in lines.iter().enumerate().take(end_line).skip(start_line) {
        let marker = if line_num == error_line { ">>" } else { "  " };
        context.push_str(&format!("{} {:3} | {}\n", marker, line_num + 1, line));
    }

    context
}
