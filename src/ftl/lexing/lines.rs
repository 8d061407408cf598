//! Line Classification
//!
//! Helpers that look at whole physical lines: blank-line detection, indentation, comment
//! sigils and entry/attribute headers. All positions are byte offsets; every character the
//! lexer treats as structure is ASCII, so byte scanning never splits a UTF-8 sequence.

use crate::ftl::ast::CommentLevel;
use crate::ftl::charclass::{self, RangeList};
use once_cell::sync::Lazy;
use regex::Regex;

/// First character of an identifier
pub static IDENTIFIER_START: Lazy<RangeList> = Lazy::new(|| charclass::parse("a-zA-Z"));

/// Any character of an identifier after the first
pub static IDENTIFIER_CHAR: Lazy<RangeList> = Lazy::new(|| charclass::parse("a-zA-Z0-9_-"));

fn identifier_pattern() -> String {
    format!(
        "{}{}",
        IDENTIFIER_START.to_class(),
        IDENTIFIER_CHAR.to_pattern(Some("*"))
    )
}

/// `-?identifier *=` at the start of a line
pub static ENTRY_HEADER: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!(r"^(-?)({}) *=", identifier_pattern())).unwrap());

/// `.identifier *=` at the first non-space character of a line
pub static ATTRIBUTE_HEADER: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!(r"^\.({}) *=", identifier_pattern())).unwrap());

/// The first non-blank line after a line break
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NextLine {
    /// Offset of the first byte of the line
    pub start: usize,
    /// Number of leading spaces
    pub indent: usize,
    /// First byte after the indentation
    pub first: u8,
    /// Line breaks crossed to get here (blank lines included)
    pub breaks: usize,
}

impl NextLine {
    pub fn content_start(&self) -> usize {
        self.start + self.indent
    }
}

/// Offset of the `\n` ending the line containing `from`, or the end of input
pub fn line_end(bytes: &[u8], from: usize) -> usize {
    bytes[from..]
        .iter()
        .position(|b| *b == b'\n')
        .map_or(bytes.len(), |offset| from + offset)
}

/// Only spaces, tabs and carriage returns between `start` and `end`
pub fn is_blank(bytes: &[u8], start: usize, end: usize) -> bool {
    bytes[start..end]
        .iter()
        .all(|b| matches!(b, b' ' | b'\t' | b'\r'))
}

pub fn indentation(bytes: &[u8], start: usize) -> usize {
    bytes[start..].iter().take_while(|b| **b == b' ').count()
}

/// Characters that may not start a continuation line of a pattern
pub fn is_special_line_start(first: u8) -> bool {
    matches!(first, b'.' | b'[' | b'*' | b'}')
}

/// Characters that keep an expression going even at column 0
pub fn continues_expression_at_column_zero(first: u8) -> bool {
    matches!(first, b'}' | b'[' | b'*' | b')')
}

/// Skip the line break at `from` and any blank lines after it
///
/// Returns `None` when `from` is not a line break or when only blank lines remain.
pub fn next_content_line(bytes: &[u8], from: usize) -> Option<NextLine> {
    if bytes.get(from) != Some(&b'\n') {
        return None;
    }
    let mut cursor = from;
    let mut breaks = 0;
    while cursor < bytes.len() {
        cursor += 1;
        breaks += 1;
        let end = line_end(bytes, cursor);
        if !is_blank(bytes, cursor, end) {
            let indent = indentation(bytes, cursor);
            return Some(NextLine {
                start: cursor,
                indent,
                first: bytes[cursor + indent],
                breaks,
            });
        }
        cursor = end;
    }
    None
}

/// Comment level of a line starting at `start`
///
/// One to three `#` followed by a space, a line break or the end of input. Anything else
/// (`#foo`, `####`) is not a comment.
pub fn comment_level(bytes: &[u8], start: usize) -> Option<CommentLevel> {
    let hashes = bytes[start..].iter().take_while(|b| **b == b'#').count();
    let level = CommentLevel::from_hashes(hashes)?;
    match &bytes[start + hashes..] {
        [] | [b' ', ..] | [b'\n', ..] | [b'\r', b'\n', ..] => Some(level),
        _ => None,
    }
}
