//! Resource and entry parsing
//!
//! The parser walks the token stream once, front to back. Entry-level grammar lives here;
//! everything inside `{ }` is in [expressions](super::expressions).
//!
//! Recovery
//!
//!     Any error inside an entry abandons the entry. The cursor then skips forward to the next
//!     token that sits at column 0 and can open a top-level item, and the source text between
//!     the entry start and that token becomes a [`Junk`] entry carrying the error. Because the
//!     lexer only emits column-0 tokens for real line starts, the junk always spans whole
//!     lines.

use super::{DuplicatePolicy, ParserOptions};
use crate::ftl::ast::{
    Attribute, Comment, CommentLevel, Entry, Identifier, Junk, Message, ParseError, ParseResult,
    Pattern, PatternElement, Range, Resource, SourceLocation, Term, TextChunk,
};
use crate::ftl::token::Token;
use std::collections::HashSet;
use std::ops::Range as ByteRange;

pub struct Parser<'s> {
    source: &'s str,
    tokens: Vec<(Token, ByteRange<usize>)>,
    cursor: usize,
    /// Tokens at or past this index are invisible to `peek`
    limit: usize,
    locator: SourceLocation,
    options: ParserOptions,
}

impl<'s> Parser<'s> {
    pub fn new(
        source: &'s str,
        tokens: Vec<(Token, ByteRange<usize>)>,
        options: ParserOptions,
    ) -> Self {
        let limit = tokens.len();
        Self {
            source,
            tokens,
            cursor: 0,
            limit,
            locator: SourceLocation::new(source),
            options,
        }
    }

    pub fn parse(mut self) -> Resource {
        let mut body = Vec::new();
        while let Some(token) = self.peek() {
            match token {
                Token::BlankLines | Token::CloseCommentBlock => {
                    self.advance();
                }
                Token::Comment { .. } => self.parse_comment_or_documented_entry(&mut body),
                Token::UnfinishedLine if self.at_resync_point() => {
                    body.push(Entry::Junk(self.parse_unfinished_lines()))
                }
                Token::Identifier(_) | Token::Minus => body.push(self.parse_entry_or_junk()),
                _ => {
                    let start = self.cursor;
                    let error = self.error("an entry or a comment");
                    body.push(Entry::Junk(self.recover(start, error)));
                }
            }
        }

        if self.options.duplicates == DuplicatePolicy::Reject {
            body = self.reject_duplicates(body);
        }
        log::debug!("parsed {} entries", body.len());
        let location = self.location(0..self.source.len());
        Resource::new(body).at(location)
    }

    // Cursor primitives

    pub(super) fn peek(&self) -> Option<&Token> {
        self.peek_nth(0)
    }

    pub(super) fn peek_nth(&self, n: usize) -> Option<&Token> {
        if self.cursor + n >= self.limit {
            return None;
        }
        self.tokens.get(self.cursor + n).map(|(token, _)| token)
    }

    /// Span of the current token, or an empty span at the end of input
    pub(super) fn span(&self) -> ByteRange<usize> {
        match self.tokens.get(self.cursor) {
            Some((_, span)) => span.clone(),
            None => self.source.len()..self.source.len(),
        }
    }

    /// Consume the current token and return its span
    pub(super) fn advance(&mut self) -> ByteRange<usize> {
        let span = self.span();
        if self.cursor < self.limit {
            self.cursor += 1;
        }
        span
    }

    pub(super) fn eat(&mut self, token: &Token) -> bool {
        if self.peek() == Some(token) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(super) fn expect(&mut self, token: &Token, expected: &str) -> ParseResult<ByteRange<usize>> {
        if self.peek() == Some(token) {
            Ok(self.advance())
        } else {
            Err(self.error(expected))
        }
    }

    /// End of the last consumed token that spells actual source text
    pub(super) fn previous_end(&self) -> usize {
        self.tokens[..self.cursor]
            .iter()
            .rev()
            .find(|(token, _)| !token.is_boundary())
            .map_or(0, |(_, span)| span.end)
    }

    pub(super) fn location(&self, span: ByteRange<usize>) -> Range {
        self.locator.byte_range_to_ast_range(&span)
    }

    /// Syntax error at the current token
    pub(super) fn error(&self, expected: &str) -> ParseError {
        let found = match self.tokens.get(self.cursor) {
            Some((token, _)) => token.to_string(),
            None => "end of input".to_string(),
        };
        ParseError::syntax(self.span().start, expected, found)
    }

    fn is_line_start(&self, offset: usize) -> bool {
        offset == 0 || self.source.as_bytes().get(offset - 1) == Some(&b'\n')
    }

    fn is_resync_token(&self, index: usize) -> bool {
        match self.tokens.get(index) {
            Some((token, span)) => token.starts_top_level_item() && self.is_line_start(span.start),
            None => true,
        }
    }

    fn at_resync_point(&self) -> bool {
        self.is_resync_token(self.cursor)
    }

    // Recovery

    /// Skip to the next top-level item and wrap everything from the token at `start` in junk
    fn recover(&mut self, start: usize, error: ParseError) -> Junk {
        let from = self.tokens[start].1.start;
        self.cursor = self.cursor.max(start + 1);
        while !self.at_resync_point() {
            self.cursor += 1;
        }
        let to = self.span().start;
        log::debug!("junk at {}..{}: {}", from, to, error);
        Junk::new(self.source[from..to].to_owned(), error).at(self.location(from..to))
    }

    fn parse_unfinished_lines(&mut self) -> Junk {
        let start = self.advance();
        let mut end = start.end;
        while self.peek() == Some(&Token::UnfinishedLine) && self.at_resync_point() {
            end = self.advance().end;
        }
        let span = start.start..end;
        Junk::new(
            self.source[span.clone()].to_owned(),
            ParseError::UnfinishedLine { span: span.clone() },
        )
        .at(self.location(span))
    }

    // Comments

    fn parse_comment(&mut self) -> Comment {
        let start = self.span().start;
        let mut end = start;
        let mut level = CommentLevel::Comment;
        let mut lines = Vec::new();
        while let Some((Token::Comment { level: line_level, content }, span)) =
            self.tokens.get(self.cursor)
        {
            level = *line_level;
            lines.push(content.clone());
            end = span.end;
            self.cursor += 1;
        }
        self.eat(&Token::CloseCommentBlock);
        Comment::new(level, lines.join("\n")).at(self.location(start..end))
    }

    /// A `#` block directly above an entry documents it; anything else stands alone
    fn parse_comment_or_documented_entry(&mut self, body: &mut Vec<Entry>) {
        let comment = self.parse_comment();
        let documents_entry = comment.level == CommentLevel::Comment
            && matches!(self.peek(), Some(Token::Identifier(_) | Token::Minus));
        if !documents_entry {
            body.push(Entry::Comment(comment));
            return;
        }

        let start = self.cursor;
        match self.parse_fenced_entry() {
            Ok(Entry::Message(mut message)) => {
                message.comment = Some(comment);
                body.push(Entry::Message(message));
            }
            Ok(Entry::Term(mut term)) => {
                term.comment = Some(comment);
                body.push(Entry::Term(term));
            }
            Ok(other) => body.push(other),
            Err(error) => {
                body.push(Entry::Comment(comment));
                body.push(Entry::Junk(self.recover(start, error)));
            }
        }
    }

    // Entries

    fn parse_entry_or_junk(&mut self) -> Entry {
        let start = self.cursor;
        match self.parse_fenced_entry() {
            Ok(entry) => entry,
            Err(error) => Entry::Junk(self.recover(start, error)),
        }
    }

    /// Parse one entry without looking past the next top-level item
    ///
    /// An expression cut short by a column-0 line would otherwise read the next entry's
    /// tokens as its own.
    fn parse_fenced_entry(&mut self) -> ParseResult<Entry> {
        let mut limit = self.cursor + 1;
        while !self.is_resync_token(limit) {
            limit += 1;
        }
        self.limit = limit;
        let result = self.parse_entry();
        self.limit = self.tokens.len();
        result
    }

    fn parse_entry(&mut self) -> ParseResult<Entry> {
        let start = self.span().start;
        let is_term = self.eat(&Token::Minus);
        let id = self.parse_identifier("an identifier")?;
        self.expect(&Token::Equals, "`=`")?;
        let value_at = self.span().start;
        let value = self.parse_pattern_or_skip()?;
        let attributes = self.parse_attributes()?;
        self.expect_entry_end()?;
        let location = self.location(start..self.previous_end());

        if is_term {
            let Some(value) = value else {
                return Err(ParseError::syntax(value_at, "a value for the term", "nothing"));
            };
            log::trace!("term -{}", id);
            return Ok(Entry::Term(Term {
                id,
                value,
                attributes,
                comment: None,
                location,
            }));
        }

        if value.is_none() && attributes.is_empty() {
            return Err(ParseError::syntax(
                value_at,
                "a value or an attribute",
                "nothing",
            ));
        }
        log::trace!("message {}", id);
        Ok(Entry::Message(Message {
            id,
            value,
            attributes,
            comment: None,
            location,
        }))
    }

    fn expect_entry_end(&self) -> ParseResult<()> {
        if self.at_resync_point() {
            Ok(())
        } else {
            Err(self.error("the end of the entry"))
        }
    }

    pub(super) fn parse_identifier(&mut self, expected: &str) -> ParseResult<Identifier> {
        match self.peek() {
            Some(Token::Identifier(name)) => {
                let name = name.clone();
                let span = self.advance();
                Ok(Identifier::new(name).at(self.location(span)))
            }
            _ => Err(self.error(expected)),
        }
    }

    fn parse_attributes(&mut self) -> ParseResult<Vec<Attribute>> {
        let mut attributes = Vec::new();
        while self.peek() == Some(&Token::Dot) {
            let start = self.advance().start;
            let id = self.parse_identifier("an attribute name")?;
            self.expect(&Token::Equals, "`=`")?;
            let value_at = self.span().start;
            let Some(value) = self.parse_pattern_or_skip()? else {
                return Err(ParseError::syntax(
                    value_at,
                    "a value for the attribute",
                    "nothing",
                ));
            };
            attributes.push(Attribute {
                id,
                value,
                location: self.location(start..self.previous_end()),
            });
        }
        Ok(attributes)
    }

    // Patterns

    pub(super) fn parse_pattern_or_skip(&mut self) -> ParseResult<Option<Pattern>> {
        match self.peek() {
            Some(Token::PatternSkip) => {
                self.advance();
                Ok(None)
            }
            Some(Token::PatternStart) => self.parse_pattern().map(Some),
            _ => Err(self.error("a value")),
        }
    }

    fn parse_pattern(&mut self) -> ParseResult<Pattern> {
        let open = self.advance();
        let mut elements = Vec::new();
        loop {
            match self.peek() {
                Some(Token::PureText(text)) => {
                    let value = text.clone();
                    let span = self.advance();
                    elements.push(PatternElement::TextChunk(TextChunk {
                        value,
                        location: self.location(span),
                    }));
                }
                Some(Token::OpenBrace) => {
                    elements.push(PatternElement::Placeable(self.parse_placeable()?))
                }
                Some(Token::PatternEnd) => {
                    self.advance();
                    break;
                }
                _ => return Err(self.error("text, a placeable or the end of the value")),
            }
        }

        let Some(location) = Range::bounding_box(elements.iter().map(PatternElement::location))
        else {
            return Err(ParseError::syntax(open.start, "a value", "nothing"));
        };
        Ok(Pattern { elements, location })
    }

    // Duplicate ids

    /// Replace entries with a repeated id, or with repeated attribute ids, by junk
    ///
    /// The first entry with a given id wins. A documenting comment of a rejected entry is
    /// kept as a standalone comment in front of the junk.
    fn reject_duplicates(&self, body: Vec<Entry>) -> Vec<Entry> {
        let mut seen = HashSet::new();
        let mut out = Vec::with_capacity(body.len());
        for entry in body {
            let (id, attributes, comment) = match &entry {
                Entry::Message(message) => (&message.id, &message.attributes, &message.comment),
                Entry::Term(term) => (&term.id, &term.attributes, &term.comment),
                _ => {
                    out.push(entry);
                    continue;
                }
            };
            let key = entry.id().unwrap_or_default();
            let repeated_attribute = first_repeated_attribute(attributes);
            let is_new = seen.insert(key.clone());
            let duplicate = match repeated_attribute {
                Some(attribute) => Some((attribute.name.clone(), attribute.location.span.clone())),
                None if !is_new => Some((key, id.location.span.clone())),
                None => None,
            };
            let Some((name, span)) = duplicate else {
                out.push(entry);
                continue;
            };

            log::debug!("rejecting duplicate id `{}`", name);
            if let Some(comment) = comment {
                out.push(Entry::Comment(comment.clone()));
            }
            let location = entry.location().clone();
            let content = self.source[location.span.clone()].to_owned();
            out.push(Entry::Junk(
                Junk::new(content, ParseError::DuplicateId { span, id: name }).at(location),
            ));
        }
        out
    }
}

fn first_repeated_attribute(attributes: &[Attribute]) -> Option<&Identifier> {
    let mut seen = HashSet::new();
    attributes
        .iter()
        .map(|attribute| &attribute.id)
        .find(|id| !seen.insert(id.name.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ftl::lexing::tokenize;

    fn parse(source: &str) -> Resource {
        Parser::new(source, tokenize(source), ParserOptions::default()).parse()
    }

    fn parse_rejecting(source: &str) -> Resource {
        let options = ParserOptions {
            duplicates: DuplicatePolicy::Reject,
            ..ParserOptions::default()
        };
        Parser::new(source, tokenize(source), options).parse()
    }

    #[test]
    fn test_message_with_value() {
        let resource = parse("hello = Hello, world!\n");
        let message = resource.get_message("hello").unwrap();
        assert_eq!(message.value.as_ref().unwrap().text(), "Hello, world!");
        assert_eq!(message.location.span, 0..21);
        assert_eq!(message.id.location.span, 0..5);
    }

    #[test]
    fn test_message_with_only_attributes() {
        let resource = parse("login =\n    .placeholder = Email\n    .title = Login\n");
        let message = resource.get_message("login").unwrap();
        assert!(message.value.is_none());
        assert_eq!(message.attributes.len(), 2);
        assert_eq!(message.attributes[1].id.name, "title");
        assert_eq!(message.location.span.end, 51);
    }

    #[test]
    fn test_message_without_value_or_attributes_is_junk() {
        let resource = parse("empty =\nnext = ok\n");
        assert_eq!(resource.body.len(), 2);
        let junk = resource.body[0].as_junk().unwrap();
        assert_eq!(junk.content, "empty =\n");
        assert!(matches!(junk.error, ParseError::Syntax { position: 7, .. }));
        assert!(resource.get_message("next").is_some());
    }

    #[test]
    fn test_term_requires_value() {
        let resource = parse("-brand =\n    .gender = masculine\n");
        let junk = resource.body[0].as_junk().unwrap();
        assert_eq!(junk.content, "-brand =\n    .gender = masculine\n");
    }

    #[test]
    fn test_doc_comment_attaches_to_entry() {
        let resource = parse("# Greeting\nhello = Hi\n");
        assert_eq!(resource.body.len(), 1);
        let message = resource.get_message("hello").unwrap();
        let comment = message.comment.as_ref().unwrap();
        assert_eq!(comment.content, "Greeting");
        assert_eq!(comment.location.span, 0..10);
    }

    #[test]
    fn test_blank_line_detaches_comment() {
        let resource = parse("# Note\n\nhello = Hi\n");
        assert_eq!(resource.body.len(), 2);
        assert!(resource.body[0].as_comment().is_some());
        assert!(resource.get_message("hello").unwrap().comment.is_none());
    }

    #[test]
    fn test_group_comment_never_attaches() {
        let resource = parse("## Group\nhello = Hi\n");
        assert_eq!(resource.body.len(), 2);
        assert_eq!(
            resource.body[0].as_comment().unwrap().level,
            CommentLevel::Group
        );
    }

    #[test]
    fn test_comment_above_broken_entry_stays() {
        let resource = parse("# Doc\nbroken = {\nok = fine\n");
        assert_eq!(resource.body.len(), 3);
        assert_eq!(resource.body[0].as_comment().unwrap().content, "Doc");
        assert_eq!(resource.body[1].as_junk().unwrap().content, "broken = {\n");
        assert!(resource.get_message("ok").is_some());
    }

    #[test]
    fn test_consecutive_unfinished_lines_make_one_junk() {
        let resource = parse("oops\n  more\nkey = v\n");
        assert_eq!(resource.body.len(), 2);
        let junk = resource.body[0].as_junk().unwrap();
        assert_eq!(junk.content, "oops\n  more\n");
        assert_eq!(junk.error, ParseError::UnfinishedLine { span: 0..12 });
    }

    #[test]
    fn test_trailing_garbage_makes_entry_junk() {
        let resource = parse("key = value }\nok = yes\n");
        assert_eq!(resource.body[0].as_junk().unwrap().content, "key = value }\n");
        assert!(resource.get_message("ok").is_some());
    }

    #[test]
    fn test_resource_location_covers_source() {
        let source = "a = 1\n\nb = 2";
        let resource = parse(source);
        assert_eq!(resource.location.span, 0..source.len());
        assert_eq!(resource.location.end.line, 2);
    }

    #[test]
    fn test_duplicates_preserved_by_default() {
        let resource = parse("a = 1\na = 2\n");
        assert_eq!(resource.messages().count(), 2);
    }

    #[test]
    fn test_duplicates_rejected_on_request() {
        let resource = parse_rejecting("a = 1\n-a = t\na = 2\n");
        assert_eq!(resource.messages().count(), 1);
        assert_eq!(resource.terms().count(), 1);
        let junk = resource.body[2].as_junk().unwrap();
        assert_eq!(junk.content, "a = 2");
        assert_eq!(
            junk.error,
            ParseError::DuplicateId {
                span: 13..14,
                id: "a".into()
            }
        );
    }

    #[test]
    fn test_duplicate_attributes_rejected_on_request() {
        let resource = parse_rejecting("# Doc\nm =\n    .x = 1\n    .x = 2\n");
        assert_eq!(resource.body.len(), 2);
        assert!(resource.body[0].as_comment().is_some());
        let junk = resource.body[1].as_junk().unwrap();
        assert!(matches!(&junk.error, ParseError::DuplicateId { id, .. } if id == "x"));
    }
}
