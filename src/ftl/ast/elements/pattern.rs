//! Pattern element
//!
//!     A pattern is the value of a message, term, attribute or variant: a sequence of text
//!     chunks and placeables. Patterns may start on the line of the `=` or on the next
//!     indented line, and may continue over any number of indented lines.
//!
//! Indentation
//!
//!     The common indentation of the continuation lines is removed. Each text chunk that
//!     begins a continuation line starts with the line breaks that preceded it (blank lines
//!     included) and with whatever indentation the line has beyond the common one:
//!
//!         multi =
//!             first
//!               second
//!
//!     yields the chunks `first` and `\n  second`. Trailing spaces at the very end of a
//!     pattern are dropped.
//!
//! Placeables
//!
//!     `{ ... }` embeds an expression; see [expression](super::expression).

use super::super::range::Range;
use super::super::traits::{AstNode, Visitor};
use super::expression::Expression;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Pattern {
    pub elements: Vec<PatternElement>,
    pub location: Range,
}

impl Pattern {
    /// Concatenated text of the text chunks, placeables skipped
    pub fn text(&self) -> String {
        self.elements
            .iter()
            .filter_map(|element| match element {
                PatternElement::TextChunk(chunk) => Some(chunk.value.as_str()),
                PatternElement::Placeable(_) => None,
            })
            .collect()
    }

    pub fn placeables(&self) -> impl Iterator<Item = &Placeable> {
        self.elements.iter().filter_map(|element| match element {
            PatternElement::Placeable(placeable) => Some(placeable),
            PatternElement::TextChunk(_) => None,
        })
    }
}

/// Text chunks verbatim, placeables in their source form
impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for element in &self.elements {
            match element {
                PatternElement::TextChunk(chunk) => f.write_str(&chunk.value)?,
                PatternElement::Placeable(placeable) => write!(f, "{}", placeable)?,
            }
        }
        Ok(())
    }
}

impl AstNode for Pattern {
    fn node_type(&self) -> &'static str {
        "Pattern"
    }
    fn display_label(&self) -> String {
        let rendered = self.to_string().replace('\n', "↵");
        if rendered.chars().count() > 50 {
            format!("{}…", rendered.chars().take(50).collect::<String>())
        } else {
            rendered
        }
    }
    fn range(&self) -> &Range {
        &self.location
    }
    fn accept(&self, visitor: &mut dyn Visitor) {
        visitor.visit_pattern(self);
        for element in &self.elements {
            match element {
                PatternElement::TextChunk(chunk) => chunk.accept(visitor),
                PatternElement::Placeable(placeable) => placeable.accept(visitor),
            }
        }
        visitor.leave_pattern(self);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum PatternElement {
    TextChunk(TextChunk),
    Placeable(Placeable),
}

impl PatternElement {
    pub fn location(&self) -> &Range {
        match self {
            PatternElement::TextChunk(chunk) => &chunk.location,
            PatternElement::Placeable(placeable) => &placeable.location,
        }
    }
}

/// A run of literal text; may start with line breaks and relative indentation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextChunk {
    pub value: String,
    pub location: Range,
}

impl AstNode for TextChunk {
    fn node_type(&self) -> &'static str {
        "TextChunk"
    }
    fn display_label(&self) -> String {
        self.value.replace('\n', "↵")
    }
    fn range(&self) -> &Range {
        &self.location
    }
    fn accept(&self, visitor: &mut dyn Visitor) {
        visitor.visit_text_chunk(self);
    }
}

/// `{ expression }`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Placeable {
    pub expression: Expression,
    pub location: Range,
}

impl fmt::Display for Placeable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{ {} }}", self.expression)
    }
}

impl AstNode for Placeable {
    fn node_type(&self) -> &'static str {
        "Placeable"
    }
    fn display_label(&self) -> String {
        self.to_string()
    }
    fn range(&self) -> &Range {
        &self.location
    }
    fn accept(&self, visitor: &mut dyn Visitor) {
        visitor.visit_placeable(self);
        self.expression.accept(visitor);
        visitor.leave_placeable(self);
    }
}
