//! The lexer state machine
//!
//! Works line by line at the top level and character by character inside values. Every
//! top-level step starts at a line start and finishes at the next one, which keeps the
//! recovery points of the parser (column-0 tokens) trivially aligned with source lines.

use super::expression::lex_token;
use super::lines::{self, ATTRIBUTE_HEADER, ENTRY_HEADER, IDENTIFIER_CHAR, IDENTIFIER_START};
use crate::ftl::token::Token;
use std::ops::Range;

/// Placeables (and call argument lists) nested deeper than this end the entry
pub const DEFAULT_MAX_NESTING: usize = 100;

/// The current entry stopped before its syntax was complete.
///
/// Raised when an expression runs into a column-0 line or the end of input, or when nesting
/// exceeds the limit. The tokens emitted so far stay in the stream; the parser reports the
/// entry as junk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct EntryEnd;

type Step = Result<(), EntryEnd>;

/// A `PureText` token whose payload is filled in once the whole pattern is known
struct PatternPiece {
    token: usize,
    breaks: usize,
    indent: Option<usize>,
    text: Range<usize>,
}

pub struct Lexer<'s> {
    source: &'s str,
    bytes: &'s [u8],
    pos: usize,
    tokens: Vec<(Token, Range<usize>)>,
    max_nesting: usize,
}

impl<'s> Lexer<'s> {
    pub fn new(source: &'s str) -> Self {
        Self {
            source,
            bytes: source.as_bytes(),
            pos: 0,
            tokens: Vec::new(),
            max_nesting: DEFAULT_MAX_NESTING,
        }
    }

    pub fn with_max_nesting(mut self, max_nesting: usize) -> Self {
        self.max_nesting = max_nesting;
        self
    }

    pub fn tokenize(mut self) -> Vec<(Token, Range<usize>)> {
        log::debug!("tokenizing {} bytes", self.source.len());
        while self.pos < self.bytes.len() {
            let start = self.pos;
            let end = lines::line_end(self.bytes, start);
            let first = self.bytes[start];
            if lines::is_blank(self.bytes, start, end) {
                self.lex_blank_lines();
            } else if first == b'#' {
                self.lex_comment_block();
            } else if first == b'-' || IDENTIFIER_START.contains(first as char) {
                self.lex_entry();
            } else {
                self.lex_unfinished_line();
            }
        }
        log::debug!("produced {} tokens", self.tokens.len());
        self.tokens
    }

    // Cursor primitives

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.bytes.get(self.pos + offset).copied()
    }

    fn line_end(&self) -> usize {
        lines::line_end(self.bytes, self.pos)
    }

    fn push(&mut self, token: Token, span: Range<usize>) {
        self.tokens.push((token, span));
    }

    /// Push a token spelled by the next `len` bytes and move past them
    fn push_bytes(&mut self, token: Token, len: usize) {
        let start = self.pos;
        self.pos += len;
        self.push(token, start..self.pos);
    }

    fn skip_spaces(&mut self) {
        while self.peek() == Some(b' ') {
            self.pos += 1;
        }
    }

    // Top level

    fn lex_blank_lines(&mut self) {
        let start = self.pos;
        while self.pos < self.bytes.len() {
            let end = self.line_end();
            if !lines::is_blank(self.bytes, self.pos, end) {
                break;
            }
            self.pos = (end + 1).min(self.bytes.len());
        }
        self.push(Token::BlankLines, start..self.pos);
    }

    fn lex_unfinished_line(&mut self) {
        let start = self.pos;
        self.pos = (self.line_end() + 1).min(self.bytes.len());
        log::trace!("unfinished line at {}", start);
        self.push(Token::UnfinishedLine, start..self.pos);
    }

    fn lex_comment_block(&mut self) {
        let Some(level) = lines::comment_level(self.bytes, self.pos) else {
            return self.lex_unfinished_line();
        };
        let source = self.source;
        loop {
            let start = self.pos;
            let end = self.line_end();
            let sigil_end = start + level.hashes();
            let content_end = if end > sigil_end && self.bytes[end - 1] == b'\r' {
                end - 1
            } else {
                end
            };
            // The sigil is followed by exactly one space when there is any content
            let content = if content_end > sigil_end {
                &source[sigil_end + 1..content_end]
            } else {
                ""
            };
            self.push(
                Token::Comment {
                    level,
                    content: content.to_owned(),
                },
                start..content_end,
            );
            self.pos = (end + 1).min(self.bytes.len());
            if self.pos >= self.bytes.len()
                || lines::comment_level(self.bytes, self.pos) != Some(level)
            {
                break;
            }
        }
        self.push(Token::CloseCommentBlock, self.pos..self.pos);
    }

    fn lex_entry(&mut self) {
        let source = self.source;
        let start = self.pos;
        let line = &source[start..self.line_end()];
        let Some(caps) = ENTRY_HEADER.captures(line) else {
            return self.lex_unfinished_line();
        };
        let (Some(header), Some(minus), Some(id)) = (caps.get(0), caps.get(1), caps.get(2))
        else {
            return self.lex_unfinished_line();
        };

        if !minus.as_str().is_empty() {
            self.push(Token::Minus, start..start + 1);
        }
        self.push(
            Token::Identifier(id.as_str().to_owned()),
            start + id.start()..start + id.end(),
        );
        self.push(Token::Equals, start + header.end() - 1..start + header.end());
        self.pos = start + header.end();
        log::trace!("entry `{}{}` at {}", minus.as_str(), id.as_str(), start);

        if self.lex_entry_body().is_err() {
            log::trace!("entry at {} ended before its syntax was complete", start);
        }
        self.finish_line();
    }

    /// Move the cursor to the start of the next line
    fn finish_line(&mut self) {
        self.lex_rest_as_unfinished();
        if self.peek() == Some(b'\n') {
            self.pos += 1;
        }
    }

    /// Anything left on the current line that is not blank becomes an `UnfinishedLine`
    fn lex_rest_as_unfinished(&mut self) {
        let end = self.line_end();
        if !lines::is_blank(self.bytes, self.pos, end) {
            self.push(Token::UnfinishedLine, self.pos..end);
        }
        self.pos = end;
    }

    // Entries

    fn lex_entry_body(&mut self) -> Step {
        self.lex_pattern_or_skip(0)?;
        loop {
            self.lex_rest_as_unfinished();
            match lines::next_content_line(self.bytes, self.pos) {
                Some(line) if line.indent > 0 && line.first == b'.' => {
                    self.pos = line.content_start();
                    if self.lex_attribute_header() {
                        self.lex_pattern_or_skip(0)?;
                    }
                }
                _ => return Ok(()),
            }
        }
    }

    /// `.id =` at the cursor; the rest of the line is unfinished if it doesn't match
    fn lex_attribute_header(&mut self) -> bool {
        let source = self.source;
        let start = self.pos;
        let end = self.line_end();
        let captures = ATTRIBUTE_HEADER.captures(&source[start..end]);
        let Some((header, id)) = captures.and_then(|caps| Some((caps.get(0)?, caps.get(1)?)))
        else {
            self.push(Token::UnfinishedLine, start..end);
            self.pos = end;
            return false;
        };
        self.push(Token::Dot, start..start + 1);
        self.push(
            Token::Identifier(id.as_str().to_owned()),
            start + id.start()..start + id.end(),
        );
        self.push(Token::Equals, start + header.end() - 1..start + header.end());
        self.pos = start + header.end();
        true
    }

    // Patterns

    /// After `=` or `]`: a pattern on this line, a block pattern on the next indented line,
    /// or nothing at all
    fn lex_pattern_or_skip(&mut self, depth: usize) -> Step {
        self.skip_spaces();
        let at = self.pos;
        let end = self.line_end();
        if !lines::is_blank(self.bytes, at, end) {
            self.push(Token::PatternStart, at..at);
            return self.lex_pattern_body(depth, None);
        }
        match lines::next_content_line(self.bytes, end) {
            Some(line) if line.indent > 0 && !lines::is_special_line_start(line.first) => {
                let start = line.content_start();
                self.push(Token::PatternStart, start..start);
                self.pos = start;
                self.lex_pattern_body(depth, Some(line.indent))
            }
            _ => {
                self.push(Token::PatternSkip, at..at);
                self.pos = end;
                Ok(())
            }
        }
    }

    fn lex_pattern_body(&mut self, depth: usize, first_indent: Option<usize>) -> Step {
        let mut pieces: Vec<PatternPiece> = Vec::new();
        let mut line_prefix = Some((0, first_indent));
        let mut ends_with_text = false;

        loop {
            let start = self.pos;
            while let Some(b) = self.peek() {
                if matches!(b, b'{' | b'}' | b'\n') {
                    break;
                }
                self.pos += 1;
            }
            let mut end = self.pos;
            if self.peek() == Some(b'\n') && end > start && self.bytes[end - 1] == b'\r' {
                end -= 1;
            }

            let (breaks, indent) = line_prefix.take().unwrap_or((0, None));
            if end > start || breaks > 0 || indent.is_some() {
                self.push(Token::PureText(String::new()), start..end);
                pieces.push(PatternPiece {
                    token: self.tokens.len() - 1,
                    breaks,
                    indent,
                    text: start..end,
                });
                ends_with_text = true;
            }

            match self.peek() {
                Some(b'{') => {
                    ends_with_text = false;
                    if let Err(stop) = self.lex_placeable(depth + 1) {
                        self.finish_pattern(pieces, false);
                        return Err(stop);
                    }
                }
                Some(b'\n') => match lines::next_content_line(self.bytes, self.pos) {
                    Some(line) if line.indent > 0 && !lines::is_special_line_start(line.first) => {
                        line_prefix = Some((line.breaks, Some(line.indent)));
                        self.pos = line.content_start();
                    }
                    _ => break,
                },
                // `}` or end of input
                _ => break,
            }
        }

        self.finish_pattern(pieces, ends_with_text);
        self.push(Token::PatternEnd, self.pos..self.pos);
        Ok(())
    }

    /// Fill in the payload of every text piece of a finished pattern
    ///
    /// The common indentation is the smallest indent over all continuation lines. A piece
    /// that ends up empty is dropped from the stream.
    fn finish_pattern(&mut self, pieces: Vec<PatternPiece>, ends_with_text: bool) {
        let common = pieces.iter().filter_map(|p| p.indent).min().unwrap_or(0);
        let last = pieces.len().checked_sub(1);
        let mut empty = Vec::new();

        for (i, piece) in pieces.iter().enumerate() {
            let mut text = piece.text.clone();
            if ends_with_text && Some(i) == last {
                let trimmed = self.source[text.clone()].trim_end_matches([' ', '\t', '\r']);
                text.end = text.start + trimmed.len();
            }
            let mut value = "\n".repeat(piece.breaks);
            if let Some(indent) = piece.indent {
                value.push_str(&" ".repeat(indent - common));
            }
            value.push_str(&self.source[text.clone()]);

            if value.is_empty() {
                empty.push(piece.token);
            } else {
                self.tokens[piece.token] = (Token::PureText(value), text);
            }
        }

        for index in empty.into_iter().rev() {
            self.tokens.remove(index);
        }
    }

    // Expressions

    /// Skip whitespace and line breaks inside an expression
    ///
    /// A line break is only crossed when the next non-blank line is indented, or starts with
    /// one of the characters that can close or continue an expression at column 0.
    fn skip_blank(&mut self) -> Step {
        loop {
            match self.peek() {
                Some(b' ' | b'\t' | b'\r') => self.pos += 1,
                Some(b'\n') => match lines::next_content_line(self.bytes, self.pos) {
                    Some(line)
                        if line.indent > 0
                            || lines::continues_expression_at_column_zero(line.first) =>
                    {
                        self.pos = line.content_start();
                    }
                    _ => return Err(EntryEnd),
                },
                Some(_) => return Ok(()),
                None => return Err(EntryEnd),
            }
        }
    }

    fn lex_expression_token(&mut self) {
        let (token, span) = lex_token(self.source, self.pos);
        self.pos = span.end;
        self.push(token, span);
    }

    fn lex_placeable(&mut self, depth: usize) -> Step {
        if depth > self.max_nesting {
            log::debug!(
                "placeables nested deeper than {} at byte {}",
                self.max_nesting,
                self.pos
            );
            let end = self.line_end();
            self.push(Token::UnfinishedLine, self.pos..end);
            self.pos = end;
            return Err(EntryEnd);
        }

        self.push_bytes(Token::OpenBrace, 1);
        loop {
            self.skip_blank()?;
            match self.peek() {
                Some(b'}') => {
                    self.push_bytes(Token::CloseBrace, 1);
                    return Ok(());
                }
                Some(b'{') => self.lex_placeable(depth + 1)?,
                Some(b'(') => self.lex_call_arguments(depth + 1)?,
                Some(b'-') if self.peek_at(1) == Some(b'>') => {
                    self.push_bytes(Token::Arrow, 2);
                    return self.lex_variants(depth);
                }
                _ => self.lex_expression_token(),
            }
        }
    }

    /// From `(` up to and including the matching `)`
    ///
    /// `EndPositionalArgs` is emitted exactly once per call: in front of the first
    /// `name:` pair, or in front of `)` when there are no named arguments.
    fn lex_call_arguments(&mut self, depth: usize) -> Step {
        if depth > self.max_nesting {
            let end = self.line_end();
            self.push(Token::UnfinishedLine, self.pos..end);
            self.pos = end;
            return Err(EntryEnd);
        }

        self.push_bytes(Token::OpenParen, 1);
        let mut positional = true;
        let mut at_argument_start = true;
        loop {
            self.skip_blank()?;
            let Some(next) = self.peek() else {
                return Err(EntryEnd);
            };
            match next {
                b')' => {
                    if positional {
                        self.push(Token::EndPositionalArgs, self.pos..self.pos);
                    }
                    self.push_bytes(Token::CloseParen, 1);
                    return Ok(());
                }
                b'{' => {
                    self.lex_placeable(depth + 1)?;
                    at_argument_start = false;
                }
                b'(' => {
                    self.lex_call_arguments(depth + 1)?;
                    at_argument_start = false;
                }
                _ => {
                    if positional
                        && at_argument_start
                        && IDENTIFIER_START.contains(next as char)
                        && self.named_argument_ahead()
                    {
                        positional = false;
                        self.push(Token::EndPositionalArgs, self.pos..self.pos);
                    }
                    self.lex_expression_token();
                    at_argument_start = matches!(self.tokens.last(), Some((Token::Comma, _)));
                }
            }
        }
    }

    /// An identifier at the cursor followed by `:` (line breaks allowed in between)
    fn named_argument_ahead(&self) -> bool {
        let mut cursor = self.pos;
        while cursor < self.bytes.len() && IDENTIFIER_CHAR.contains(self.bytes[cursor] as char) {
            cursor += 1;
        }
        while cursor < self.bytes.len() && matches!(self.bytes[cursor], b' ' | b'\r' | b'\n') {
            cursor += 1;
        }
        self.bytes.get(cursor) == Some(&b':')
    }

    /// After `->`: variants up to and including the `}` closing the select expression
    fn lex_variants(&mut self, depth: usize) -> Step {
        loop {
            self.skip_blank()?;
            match self.peek() {
                Some(b'}') => {
                    self.push_bytes(Token::CloseBrace, 1);
                    return Ok(());
                }
                Some(b'*') => self.push_bytes(Token::Star, 1),
                Some(b'[') => {
                    if self.lex_variant_key()? {
                        self.lex_pattern_or_skip(depth)?;
                    }
                }
                _ => self.lex_expression_token(),
            }
        }
    }

    /// `[ key ]`; returns whether the closing bracket was found
    fn lex_variant_key(&mut self) -> Result<bool, EntryEnd> {
        self.push_bytes(Token::OpenBracket, 1);
        self.skip_blank()?;
        if self.peek() != Some(b']') {
            self.lex_expression_token();
            self.skip_blank()?;
        }
        if self.peek() == Some(b']') {
            self.push_bytes(Token::CloseBracket, 1);
            Ok(true)
        } else {
            Ok(false)
        }
    }
}
