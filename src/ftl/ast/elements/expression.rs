//! Expression elements
//!
//! Syntax (inside a placeable):
//!     "string"              string literal, with `\"`, `\\`, `\uXXXX` and `\UXXXXXX` escapes
//!     -12.50                number literal
//!     $name                 variable reference
//!     message.attr          message reference, attribute optional
//!     -term.attr(a: 1)      term reference, attribute and arguments optional
//!     FUNC(1, $x, k: "v")   function reference; positional arguments before named ones
//!     { ... }               nested placeable
//!     sel -> [k] v *[d] w   select expression
//!
//! Select expressions are only valid as the whole content of a placeable. Their selector is
//! restricted to literals, variables, term references and function references, and exactly
//! one of their variants is the default (marked with `*`).

use super::super::range::Range;
use super::super::traits::{AstNode, Visitor};
use super::entry::Identifier;
use super::pattern::{Pattern, Placeable};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Expression {
    StringLiteral(StringLiteral),
    NumberLiteral(NumberLiteral),
    VariableReference(VariableReference),
    MessageReference(MessageReference),
    TermReference(TermReference),
    FunctionReference(FunctionReference),
    SelectExpression(Box<SelectExpression>),
    Placeable(Box<Placeable>),
}

impl Expression {
    pub fn location(&self) -> &Range {
        match self {
            Expression::StringLiteral(e) => &e.location,
            Expression::NumberLiteral(e) => &e.location,
            Expression::VariableReference(e) => &e.location,
            Expression::MessageReference(e) => &e.location,
            Expression::TermReference(e) => &e.location,
            Expression::FunctionReference(e) => &e.location,
            Expression::SelectExpression(e) => &e.location,
            Expression::Placeable(e) => &e.location,
        }
    }

    /// Human readable kind, used in error messages
    pub fn describe(&self) -> &'static str {
        match self {
            Expression::StringLiteral(_) => "a string literal",
            Expression::NumberLiteral(_) => "a number literal",
            Expression::VariableReference(_) => "a variable reference",
            Expression::MessageReference(_) => "a message reference",
            Expression::TermReference(_) => "a term reference",
            Expression::FunctionReference(_) => "a function reference",
            Expression::SelectExpression(_) => "a select expression",
            Expression::Placeable(_) => "a placeable",
        }
    }

    /// Whether this expression may appear before `->`
    pub fn is_valid_selector(&self) -> bool {
        matches!(
            self,
            Expression::StringLiteral(_)
                | Expression::NumberLiteral(_)
                | Expression::VariableReference(_)
                | Expression::TermReference(_)
                | Expression::FunctionReference(_)
        )
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::StringLiteral(e) => write!(f, "\"{}\"", e.raw),
            Expression::NumberLiteral(e) => f.write_str(&e.raw),
            Expression::VariableReference(e) => write!(f, "${}", e.id),
            Expression::MessageReference(e) => {
                write!(f, "{}", e.id)?;
                if let Some(attribute) = &e.attribute {
                    write!(f, ".{}", attribute)?;
                }
                Ok(())
            }
            Expression::TermReference(e) => {
                write!(f, "-{}", e.id)?;
                if let Some(attribute) = &e.attribute {
                    write!(f, ".{}", attribute)?;
                }
                if let Some(arguments) = &e.arguments {
                    write!(f, "{}", arguments)?;
                }
                Ok(())
            }
            Expression::FunctionReference(e) => write!(f, "{}{}", e.id, e.arguments),
            Expression::SelectExpression(e) => {
                write!(f, "{} ->", e.selector)?;
                for variant in &e.variants {
                    let marker = if variant.default { "*" } else { "" };
                    write!(f, " {}[{}] {}", marker, variant.key, variant.value)?;
                }
                Ok(())
            }
            Expression::Placeable(e) => write!(f, "{}", e),
        }
    }
}

impl AstNode for Expression {
    fn node_type(&self) -> &'static str {
        match self {
            Expression::StringLiteral(_) => "StringLiteral",
            Expression::NumberLiteral(_) => "NumberLiteral",
            Expression::VariableReference(_) => "VariableReference",
            Expression::MessageReference(_) => "MessageReference",
            Expression::TermReference(_) => "TermReference",
            Expression::FunctionReference(_) => "FunctionReference",
            Expression::SelectExpression(_) => "SelectExpression",
            Expression::Placeable(_) => "Placeable",
        }
    }
    fn display_label(&self) -> String {
        match self {
            Expression::SelectExpression(select) => format!(
                "{} -> ({} variants)",
                select.selector,
                select.variants.len()
            ),
            Expression::Placeable(placeable) => placeable.display_label(),
            other => other.to_string(),
        }
    }
    fn range(&self) -> &Range {
        self.location()
    }
    fn accept(&self, visitor: &mut dyn Visitor) {
        visitor.visit_expression(self);
        match self {
            Expression::TermReference(term) => {
                if let Some(arguments) = &term.arguments {
                    arguments.accept(visitor);
                }
            }
            Expression::FunctionReference(function) => function.arguments.accept(visitor),
            Expression::SelectExpression(select) => select.accept(visitor),
            Expression::Placeable(placeable) => placeable.accept(visitor),
            _ => {}
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StringLiteral {
    /// Decoded value
    pub value: String,
    /// Text between the quotes, escapes untouched
    pub raw: String,
    pub location: Range,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumberLiteral {
    pub raw: String,
    pub value: f64,
    pub location: Range,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VariableReference {
    pub id: Identifier,
    pub location: Range,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageReference {
    pub id: Identifier,
    pub attribute: Option<Identifier>,
    pub location: Range,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TermReference {
    pub id: Identifier,
    pub attribute: Option<Identifier>,
    pub arguments: Option<CallArguments>,
    pub location: Range,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunctionReference {
    pub id: Identifier,
    pub arguments: CallArguments,
    pub location: Range,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectExpression {
    pub selector: Expression,
    pub variants: Vec<Variant>,
    pub location: Range,
}

impl SelectExpression {
    pub fn default_variant(&self) -> Option<&Variant> {
        self.variants.iter().find(|variant| variant.default)
    }
}

impl AstNode for SelectExpression {
    fn node_type(&self) -> &'static str {
        "SelectExpression"
    }
    fn display_label(&self) -> String {
        format!("{} ->", self.selector)
    }
    fn range(&self) -> &Range {
        &self.location
    }
    fn accept(&self, visitor: &mut dyn Visitor) {
        visitor.visit_select_expression(self);
        self.selector.accept(visitor);
        for variant in &self.variants {
            variant.accept(visitor);
        }
        visitor.leave_select_expression(self);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Variant {
    pub key: VariantKey,
    pub value: Pattern,
    pub default: bool,
    pub location: Range,
}

impl AstNode for Variant {
    fn node_type(&self) -> &'static str {
        "Variant"
    }
    fn display_label(&self) -> String {
        let marker = if self.default { "*" } else { "" };
        format!("{}[{}]", marker, self.key)
    }
    fn range(&self) -> &Range {
        &self.location
    }
    fn accept(&self, visitor: &mut dyn Visitor) {
        visitor.visit_variant(self);
        self.value.accept(visitor);
        visitor.leave_variant(self);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum VariantKey {
    Identifier(Identifier),
    NumberLiteral(NumberLiteral),
}

impl VariantKey {
    /// The key as written in the source
    pub fn name(&self) -> &str {
        match self {
            VariantKey::Identifier(id) => &id.name,
            VariantKey::NumberLiteral(number) => &number.raw,
        }
    }

    pub fn location(&self) -> &Range {
        match self {
            VariantKey::Identifier(id) => &id.location,
            VariantKey::NumberLiteral(number) => &number.location,
        }
    }
}

impl fmt::Display for VariantKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// `( positional..., name: value... )`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CallArguments {
    pub positional: Vec<Expression>,
    pub named: Vec<NamedArgument>,
    pub location: Range,
}

impl CallArguments {
    pub fn get_named(&self, name: &str) -> Option<&NamedArgument> {
        self.named.iter().find(|arg| arg.name.name == name)
    }
}

impl fmt::Display for CallArguments {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        let positional = self.positional.iter().map(|arg| arg.to_string());
        let named = self
            .named
            .iter()
            .map(|arg| format!("{}: {}", arg.name, arg.value));
        let rendered: Vec<String> = positional.chain(named).collect();
        f.write_str(&rendered.join(", "))?;
        f.write_str(")")
    }
}

impl AstNode for CallArguments {
    fn node_type(&self) -> &'static str {
        "CallArguments"
    }
    fn display_label(&self) -> String {
        format!(
            "{} positional, {} named",
            self.positional.len(),
            self.named.len()
        )
    }
    fn range(&self) -> &Range {
        &self.location
    }
    fn accept(&self, visitor: &mut dyn Visitor) {
        visitor.visit_call_arguments(self);
        for argument in &self.positional {
            argument.accept(visitor);
        }
        for argument in &self.named {
            argument.accept(visitor);
        }
        visitor.leave_call_arguments(self);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NamedArgument {
    pub name: Identifier,
    pub value: Expression,
    pub location: Range,
}

impl AstNode for NamedArgument {
    fn node_type(&self) -> &'static str {
        "NamedArgument"
    }
    fn display_label(&self) -> String {
        format!("{}: {}", self.name, self.value)
    }
    fn range(&self) -> &Range {
        &self.location
    }
    fn accept(&self, visitor: &mut dyn Visitor) {
        visitor.visit_named_argument(self);
        self.value.accept(visitor);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn number(raw: &str) -> Expression {
        Expression::NumberLiteral(NumberLiteral {
            raw: raw.to_string(),
            value: raw.parse().unwrap(),
            location: Range::default(),
        })
    }

    fn variable(name: &str) -> Expression {
        Expression::VariableReference(VariableReference {
            id: Identifier::new(name),
            location: Range::default(),
        })
    }

    #[test]
    fn test_display_function_call() {
        let call = Expression::FunctionReference(FunctionReference {
            id: Identifier::new("NUMBER"),
            arguments: CallArguments {
                positional: vec![variable("n")],
                named: vec![NamedArgument {
                    name: Identifier::new("minimumFractionDigits"),
                    value: number("2"),
                    location: Range::default(),
                }],
                location: Range::default(),
            },
            location: Range::default(),
        });
        assert_eq!(call.to_string(), "NUMBER($n, minimumFractionDigits: 2)");
    }

    #[test]
    fn test_display_term_reference() {
        let term = Expression::TermReference(TermReference {
            id: Identifier::new("brand"),
            attribute: Some(Identifier::new("gender")),
            arguments: None,
            location: Range::default(),
        });
        assert_eq!(term.to_string(), "-brand.gender");
    }

    #[test]
    fn test_selector_validity() {
        assert!(variable("n").is_valid_selector());
        assert!(number("1").is_valid_selector());
        let message = Expression::MessageReference(MessageReference {
            id: Identifier::new("msg"),
            attribute: None,
            location: Range::default(),
        });
        assert!(!message.is_valid_selector());
        assert_eq!(message.describe(), "a message reference");
    }
}
