//! Resource element
//!
//!     The resource is the root of the tree: an ordered list of entries in source order.
//!     Blank lines are not represented; comments that are not attached to a message or term
//!     appear as standalone entries, and text the parser could not make sense of appears as
//!     junk.
//!
//! Comments
//!
//!     Comment lines start with one, two or three `#` followed by a space or the end of the
//!     line. Consecutive lines of the same level form one comment whose content is the lines
//!     joined with `\n`:
//!
//!         # Attached to the message below (level 1 only)
//!         ## A group comment
//!         ### A resource comment
//!
//! Junk
//!
//!     Junk keeps the exact source slice that failed to parse, together with the first error
//!     found in it. Junk runs up to the next line that starts an entry, a comment or a blank
//!     line.

use super::super::error::ParseError;
use super::super::range::{Position, Range};
use super::super::traits::{AstNode, Visitor};
use super::entry::{Message, Term};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The parsed form of a whole `.ftl` file
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Resource {
    pub body: Vec<Entry>,
    pub location: Range,
}

impl Resource {
    pub fn new(body: Vec<Entry>) -> Self {
        Self {
            body,
            location: Range::default(),
        }
    }

    pub fn at(mut self, location: Range) -> Self {
        self.location = location;
        self
    }

    pub fn messages(&self) -> impl Iterator<Item = &Message> {
        self.body.iter().filter_map(|entry| match entry {
            Entry::Message(message) => Some(message),
            _ => None,
        })
    }

    pub fn terms(&self) -> impl Iterator<Item = &Term> {
        self.body.iter().filter_map(|entry| match entry {
            Entry::Term(term) => Some(term),
            _ => None,
        })
    }

    pub fn comments(&self) -> impl Iterator<Item = &Comment> {
        self.body.iter().filter_map(|entry| match entry {
            Entry::Comment(comment) => Some(comment),
            _ => None,
        })
    }

    pub fn junk(&self) -> impl Iterator<Item = &Junk> {
        self.body.iter().filter_map(|entry| match entry {
            Entry::Junk(junk) => Some(junk),
            _ => None,
        })
    }

    /// Errors carried by junk entries, in source order
    pub fn errors(&self) -> impl Iterator<Item = &ParseError> {
        self.junk().map(|junk| &junk.error)
    }

    pub fn has_errors(&self) -> bool {
        self.junk().next().is_some()
    }

    /// First message with the given id
    pub fn get_message(&self, id: &str) -> Option<&Message> {
        self.messages().find(|message| message.id.name == id)
    }

    /// First term with the given id (without the leading `-`)
    pub fn get_term(&self, id: &str) -> Option<&Term> {
        self.terms().find(|term| term.id.name == id)
    }

    /// The entry whose location contains `position`
    pub fn entry_at(&self, position: Position) -> Option<&Entry> {
        self.body
            .iter()
            .find(|entry| entry.location().contains(position))
    }
}

impl AstNode for Resource {
    fn node_type(&self) -> &'static str {
        "Resource"
    }
    fn display_label(&self) -> String {
        format!("Resource ({} entries)", self.body.len())
    }
    fn range(&self) -> &Range {
        &self.location
    }
    fn accept(&self, visitor: &mut dyn Visitor) {
        visitor.visit_resource(self);
        for entry in &self.body {
            entry.accept(visitor);
        }
        visitor.leave_resource(self);
    }
}

/// A top-level item of a resource
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Entry {
    Message(Message),
    Term(Term),
    Comment(Comment),
    Junk(Junk),
}

impl Entry {
    pub fn location(&self) -> &Range {
        match self {
            Entry::Message(message) => &message.location,
            Entry::Term(term) => &term.location,
            Entry::Comment(comment) => &comment.location,
            Entry::Junk(junk) => &junk.location,
        }
    }

    /// Id of a message, or of a term including its leading `-`
    pub fn id(&self) -> Option<String> {
        match self {
            Entry::Message(message) => Some(message.id.name.clone()),
            Entry::Term(term) => Some(format!("-{}", term.id.name)),
            _ => None,
        }
    }

    pub fn as_message(&self) -> Option<&Message> {
        match self {
            Entry::Message(message) => Some(message),
            _ => None,
        }
    }

    pub fn as_term(&self) -> Option<&Term> {
        match self {
            Entry::Term(term) => Some(term),
            _ => None,
        }
    }

    pub fn as_comment(&self) -> Option<&Comment> {
        match self {
            Entry::Comment(comment) => Some(comment),
            _ => None,
        }
    }

    pub fn as_junk(&self) -> Option<&Junk> {
        match self {
            Entry::Junk(junk) => Some(junk),
            _ => None,
        }
    }
}

impl AstNode for Entry {
    fn node_type(&self) -> &'static str {
        match self {
            Entry::Message(message) => message.node_type(),
            Entry::Term(term) => term.node_type(),
            Entry::Comment(comment) => comment.node_type(),
            Entry::Junk(junk) => junk.node_type(),
        }
    }
    fn display_label(&self) -> String {
        match self {
            Entry::Message(message) => message.display_label(),
            Entry::Term(term) => term.display_label(),
            Entry::Comment(comment) => comment.display_label(),
            Entry::Junk(junk) => junk.display_label(),
        }
    }
    fn range(&self) -> &Range {
        self.location()
    }
    fn accept(&self, visitor: &mut dyn Visitor) {
        match self {
            Entry::Message(message) => message.accept(visitor),
            Entry::Term(term) => term.accept(visitor),
            Entry::Comment(comment) => comment.accept(visitor),
            Entry::Junk(junk) => junk.accept(visitor),
        }
    }
}

/// Comment level, by number of leading `#`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CommentLevel {
    Comment,
    Group,
    Resource,
}

impl CommentLevel {
    pub fn from_hashes(count: usize) -> Option<Self> {
        match count {
            1 => Some(CommentLevel::Comment),
            2 => Some(CommentLevel::Group),
            3 => Some(CommentLevel::Resource),
            _ => None,
        }
    }

    pub fn hashes(self) -> usize {
        match self {
            CommentLevel::Comment => 1,
            CommentLevel::Group => 2,
            CommentLevel::Resource => 3,
        }
    }
}

impl fmt::Display for CommentLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&"#".repeat(self.hashes()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comment {
    pub level: CommentLevel,
    pub content: String,
    pub location: Range,
}

impl Comment {
    pub fn new(level: CommentLevel, content: String) -> Self {
        Self {
            level,
            content,
            location: Range::default(),
        }
    }

    pub fn at(mut self, location: Range) -> Self {
        self.location = location;
        self
    }
}

impl AstNode for Comment {
    fn node_type(&self) -> &'static str {
        match self.level {
            CommentLevel::Comment => "Comment",
            CommentLevel::Group => "GroupComment",
            CommentLevel::Resource => "ResourceComment",
        }
    }
    fn display_label(&self) -> String {
        self.content.lines().next().unwrap_or_default().to_string()
    }
    fn range(&self) -> &Range {
        &self.location
    }
    fn accept(&self, visitor: &mut dyn Visitor) {
        visitor.visit_comment(self);
    }
}

/// Unparseable source text, kept verbatim
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Junk {
    pub content: String,
    pub error: ParseError,
    pub location: Range,
}

impl Junk {
    pub fn new(content: String, error: ParseError) -> Self {
        Self {
            content,
            error,
            location: Range::default(),
        }
    }

    pub fn at(mut self, location: Range) -> Self {
        self.location = location;
        self
    }
}

impl AstNode for Junk {
    fn node_type(&self) -> &'static str {
        "Junk"
    }
    fn display_label(&self) -> String {
        self.content.lines().next().unwrap_or_default().to_string()
    }
    fn range(&self) -> &Range {
        &self.location
    }
    fn accept(&self, visitor: &mut dyn Visitor) {
        visitor.visit_junk(self);
    }
}
