//! Message, term and attribute elements
//!
//! Syntax:
//!     <identifier> " "* "=" <pattern>? <attribute>*
//!     "-" <identifier> " "* "=" <pattern> <attribute>*
//!
//!     attribute: <newline> <indent> "." <identifier> " "* "=" <pattern>
//!
//! A message needs a value, at least one attribute, or both. A term always needs a value.
//! Entry headers must start at column 0; attributes must be indented.
//!
//! Examples:
//!     hello = Hello, world!
//!     login-input = Predefined value
//!         .placeholder = email@example.com
//!     -brand-name = Firefox

use super::super::range::Range;
use super::super::traits::{AstNode, Visitor};
use super::pattern::Pattern;
use super::resource::Comment;
use serde::Serialize;
use std::fmt;

/// An identifier: `[a-zA-Z][a-zA-Z0-9_-]*`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Identifier {
    pub name: String,
    pub location: Range,
}

impl Identifier {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            location: Range::default(),
        }
    }

    pub fn at(mut self, location: Range) -> Self {
        self.location = location;
        self
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Message {
    pub id: Identifier,
    pub value: Option<Pattern>,
    pub attributes: Vec<Attribute>,
    pub comment: Option<Comment>,
    pub location: Range,
}

impl Message {
    /// First attribute with the given name
    pub fn get_attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|attr| attr.id.name == name)
    }
}

impl AstNode for Message {
    fn node_type(&self) -> &'static str {
        "Message"
    }
    fn display_label(&self) -> String {
        self.id.name.clone()
    }
    fn range(&self) -> &Range {
        &self.location
    }
    fn accept(&self, visitor: &mut dyn Visitor) {
        visitor.visit_message(self);
        if let Some(comment) = &self.comment {
            comment.accept(visitor);
        }
        if let Some(value) = &self.value {
            value.accept(visitor);
        }
        for attribute in &self.attributes {
            attribute.accept(visitor);
        }
        visitor.leave_message(self);
    }
}

/// A term. Its id is stored without the leading `-`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Term {
    pub id: Identifier,
    pub value: Pattern,
    pub attributes: Vec<Attribute>,
    pub comment: Option<Comment>,
    pub location: Range,
}

impl Term {
    pub fn get_attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|attr| attr.id.name == name)
    }
}

impl AstNode for Term {
    fn node_type(&self) -> &'static str {
        "Term"
    }
    fn display_label(&self) -> String {
        format!("-{}", self.id.name)
    }
    fn range(&self) -> &Range {
        &self.location
    }
    fn accept(&self, visitor: &mut dyn Visitor) {
        visitor.visit_term(self);
        if let Some(comment) = &self.comment {
            comment.accept(visitor);
        }
        self.value.accept(visitor);
        for attribute in &self.attributes {
            attribute.accept(visitor);
        }
        visitor.leave_term(self);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Attribute {
    pub id: Identifier,
    pub value: Pattern,
    pub location: Range,
}

impl AstNode for Attribute {
    fn node_type(&self) -> &'static str {
        "Attribute"
    }
    fn display_label(&self) -> String {
        format!(".{}", self.id.name)
    }
    fn range(&self) -> &Range {
        &self.location
    }
    fn accept(&self, visitor: &mut dyn Visitor) {
        visitor.visit_attribute(self);
        self.value.accept(visitor);
        visitor.leave_attribute(self);
    }
}
