//! Lexer
//!
//!     This module turns Fluent source text into a flat token stream. Fluent can't be lexed
//!     by a regular tokenizer alone: whether `.` starts an attribute or is plain text, or
//!     whether a line continues a value, depends on where the cursor is and on indentation.
//!     So the lexer is a small hand-written state machine (see [lexer](lexer)) that hands the
//!     context-free parts, the tokens inside placeables, to a logos lexer (see
//!     [expression](expression)).
//!
//! States
//!
//!     Top level:
//!         Runs at line starts. A run of blank lines is `BlankLines`, `#` lines are comments,
//!         `id =` and `-id =` start entries, and everything else is an `UnfinishedLine`.
//!
//!     Pattern text:
//!         After `=` (or a variant key). Text runs until `{`, `}` or the end of the line. A
//!         line break continues the value only when the next non-blank line is indented and
//!         does not start with `.`, `[`, `*` or `}`.
//!
//!     Expression:
//!         Inside `{ }`. Whitespace and line breaks are skipped, but a non-blank line at
//!         column 0 ends the entry, unless it starts with `}`, `[`, `*` or `)`.
//!
//! Text Normalization
//!
//!     Each source line of a pattern becomes its own `PureText` token whose payload is
//!     already final: the line breaks before it, the indentation beyond the pattern's common
//!     indentation, then the text. The parser copies payloads as they are.
//!
//! Byte Ranges
//!
//!     Every token carries the byte range of its source text (zero-width for boundary
//!     tokens). These ranges are what AST locations are built from, so they are never
//!     adjusted after the fact.

pub mod expression;
pub mod lexer;
pub mod lines;

pub use lexer::{Lexer, DEFAULT_MAX_NESTING};

use crate::ftl::token::Token;
use std::ops::Range;

/// Tokenize a whole resource with the default nesting limit
pub fn tokenize(source: &str) -> Vec<(Token, Range<usize>)> {
    Lexer::new(source).tokenize()
}

pub fn tokenize_with_max_nesting(source: &str, max_nesting: usize) -> Vec<(Token, Range<usize>)> {
    Lexer::new(source).with_max_nesting(max_nesting).tokenize()
}
