//! AST Snapshot - a normalized intermediate representation of the AST tree
//!
//! This module provides a canonical, format-agnostic representation of the AST
//! suitable for the tree-shaped output formats (treeviz, and anything that wants a uniform
//! node/label/children view rather than the typed resource).
//!
//! The snapshot captures the complete tree structure with node types, labels,
//! attributes, and children - allowing each formatter to focus solely on
//! presentation without reimplementing AST traversal logic.

use super::elements::{
    Attribute, CallArguments, Comment, Entry, Expression, Message, Pattern, PatternElement,
    Resource, SelectExpression, Term, Variant,
};
use super::range::Range;
use super::traits::AstNode;
use serde::Serialize;
use std::collections::BTreeMap;

/// A snapshot of an AST node in a normalized, serializable form
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AstSnapshot {
    /// The type of node (e.g., "Message", "Pattern", "SelectExpression")
    pub node_type: String,

    /// The primary label or text content of the node
    pub label: String,

    /// Additional attributes specific to the node type
    pub attributes: BTreeMap<String, String>,

    pub range: Range,

    /// Child nodes in the tree
    pub children: Vec<AstSnapshot>,
}

impl AstSnapshot {
    pub fn new(node_type: String, label: String, range: Range) -> Self {
        Self {
            node_type,
            label,
            attributes: BTreeMap::new(),
            range,
            children: Vec::new(),
        }
    }

    /// Snapshot of a single node, without children
    pub fn of<T: AstNode>(node: &T) -> Self {
        Self::new(
            node.node_type().to_string(),
            node.display_label(),
            node.range().clone(),
        )
    }

    pub fn with_attribute(mut self, key: &str, value: impl Into<String>) -> Self {
        self.attributes.insert(key.to_string(), value.into());
        self
    }

    pub fn with_child(mut self, child: AstSnapshot) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = AstSnapshot>) -> Self {
        self.children.extend(children);
        self
    }

    /// Total number of nodes in this subtree
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(AstSnapshot::node_count).sum::<usize>()
    }
}

/// Build the snapshot tree for a whole resource
pub fn snapshot_from_resource(resource: &Resource) -> AstSnapshot {
    AstSnapshot::of(resource).with_children(resource.body.iter().map(snapshot_from_entry))
}

pub fn snapshot_from_entry(entry: &Entry) -> AstSnapshot {
    match entry {
        Entry::Message(message) => build_message_snapshot(message),
        Entry::Term(term) => build_term_snapshot(term),
        Entry::Comment(comment) => build_comment_snapshot(comment),
        Entry::Junk(junk) => AstSnapshot::of(junk)
            .with_attribute("error", junk.error.to_string())
            .with_attribute("code", junk.error.code()),
    }
}

fn build_comment_snapshot(comment: &Comment) -> AstSnapshot {
    AstSnapshot::of(comment).with_attribute("lines", comment.content.lines().count().to_string())
}

fn build_message_snapshot(message: &Message) -> AstSnapshot {
    let mut snapshot = AstSnapshot::of(message).with_attribute("id", &message.id.name);
    if let Some(comment) = &message.comment {
        snapshot = snapshot.with_child(build_comment_snapshot(comment));
    }
    if let Some(value) = &message.value {
        snapshot = snapshot.with_child(build_pattern_snapshot(value));
    }
    snapshot.with_children(message.attributes.iter().map(build_attribute_snapshot))
}

fn build_term_snapshot(term: &Term) -> AstSnapshot {
    let mut snapshot = AstSnapshot::of(term).with_attribute("id", &term.id.name);
    if let Some(comment) = &term.comment {
        snapshot = snapshot.with_child(build_comment_snapshot(comment));
    }
    snapshot
        .with_child(build_pattern_snapshot(&term.value))
        .with_children(term.attributes.iter().map(build_attribute_snapshot))
}

fn build_attribute_snapshot(attribute: &Attribute) -> AstSnapshot {
    AstSnapshot::of(attribute)
        .with_attribute("id", &attribute.id.name)
        .with_child(build_pattern_snapshot(&attribute.value))
}

fn build_pattern_snapshot(pattern: &Pattern) -> AstSnapshot {
    let children = pattern.elements.iter().map(|element| match element {
        PatternElement::TextChunk(chunk) => AstSnapshot::of(chunk),
        PatternElement::Placeable(placeable) => AstSnapshot::of(placeable)
            .with_child(build_expression_snapshot(&placeable.expression)),
    });
    AstSnapshot::of(pattern).with_children(children)
}

fn build_expression_snapshot(expression: &Expression) -> AstSnapshot {
    let snapshot = AstSnapshot::of(expression);
    match expression {
        Expression::StringLiteral(literal) => snapshot.with_attribute("value", &literal.value),
        Expression::NumberLiteral(number) => {
            snapshot.with_attribute("value", number.value.to_string())
        }
        Expression::TermReference(term) => match &term.arguments {
            Some(arguments) => snapshot.with_child(build_arguments_snapshot(arguments)),
            None => snapshot,
        },
        Expression::FunctionReference(function) => {
            snapshot.with_child(build_arguments_snapshot(&function.arguments))
        }
        Expression::SelectExpression(select) => build_select_snapshot(select),
        Expression::Placeable(placeable) => {
            snapshot.with_child(build_expression_snapshot(&placeable.expression))
        }
        Expression::VariableReference(_) | Expression::MessageReference(_) => snapshot,
    }
}

fn build_select_snapshot(select: &SelectExpression) -> AstSnapshot {
    AstSnapshot::of(select)
        .with_attribute("variants", select.variants.len().to_string())
        .with_child(build_expression_snapshot(&select.selector))
        .with_children(select.variants.iter().map(build_variant_snapshot))
}

fn build_variant_snapshot(variant: &Variant) -> AstSnapshot {
    AstSnapshot::of(variant)
        .with_attribute("key", variant.key.name())
        .with_attribute("default", variant.default.to_string())
        .with_child(build_pattern_snapshot(&variant.value))
}

fn build_arguments_snapshot(arguments: &CallArguments) -> AstSnapshot {
    let named = arguments.named.iter().map(|argument| {
        AstSnapshot::of(argument)
            .with_attribute("name", &argument.name.name)
            .with_child(build_expression_snapshot(&argument.value))
    });
    AstSnapshot::of(arguments)
        .with_children(arguments.positional.iter().map(build_expression_snapshot))
        .with_children(named)
}
