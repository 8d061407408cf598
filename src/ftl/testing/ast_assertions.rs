//! Fluent assertions over a parsed resource
//!
//! Each assertion type wraps one node plus a context string (`entry[2]:attributes[0]`) that
//! ends up in every failure message, so a failing check points straight at the node.

use super::matchers::TextMatch;
use crate::ftl::ast::{
    AstNode, Attribute, CallArguments, Comment, CommentLevel, Entry, Expression, Junk, Message,
    Pattern, PatternElement, Resource, SelectExpression, Term, Variant,
};

pub fn assert_resource(resource: &Resource) -> ResourceAssertion<'_> {
    ResourceAssertion {
        resource,
        context: "resource".to_string(),
    }
}

pub struct ResourceAssertion<'a> {
    resource: &'a Resource,
    context: String,
}

impl<'a> ResourceAssertion<'a> {
    pub fn entry_count(self, expected: usize) -> Self {
        let actual = self.resource.body.len();
        assert_eq!(
            actual,
            expected,
            "{}: Expected {} entries, found {}: [{}]",
            self.context,
            expected,
            actual,
            summarize_entries(&self.resource.body)
        );
        self
    }

    pub fn junk_count(self, expected: usize) -> Self {
        let actual = self.resource.junk().count();
        assert_eq!(
            actual,
            expected,
            "{}: Expected {} junk entries, found {}: [{}]",
            self.context,
            expected,
            actual,
            summarize_entries(&self.resource.body)
        );
        self
    }

    pub fn entry<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(EntryAssertion<'a>),
    {
        let body = &self.resource.body;
        assert!(
            index < body.len(),
            "{}: Entry index {} out of bounds (resource has {} entries: [{}])",
            self.context,
            index,
            body.len(),
            summarize_entries(body)
        );
        assertion(EntryAssertion {
            entry: &body[index],
            context: format!("entry[{}]", index),
        });
        self
    }
}

fn summarize_entries(entries: &[Entry]) -> String {
    entries
        .iter()
        .map(|entry| format!("{} {:?}", entry.node_type(), entry.display_label()))
        .collect::<Vec<_>>()
        .join(", ")
}

pub struct EntryAssertion<'a> {
    entry: &'a Entry,
    context: String,
}

impl<'a> EntryAssertion<'a> {
    fn wrong_kind(&self, expected: &str) -> ! {
        panic!(
            "{}: Expected {}, found {} {:?}",
            self.context,
            expected,
            self.entry.node_type(),
            self.entry.display_label()
        )
    }

    pub fn assert_message(self) -> MessageAssertion<'a> {
        match self.entry {
            Entry::Message(message) => MessageAssertion {
                message,
                context: self.context,
            },
            _ => self.wrong_kind("Message"),
        }
    }

    pub fn assert_term(self) -> TermAssertion<'a> {
        match self.entry {
            Entry::Term(term) => TermAssertion {
                term,
                context: self.context,
            },
            _ => self.wrong_kind("Term"),
        }
    }

    pub fn assert_comment(self) -> CommentAssertion<'a> {
        match self.entry {
            Entry::Comment(comment) => CommentAssertion {
                comment,
                context: self.context,
            },
            _ => self.wrong_kind("a comment"),
        }
    }

    pub fn assert_junk(self) -> JunkAssertion<'a> {
        match self.entry {
            Entry::Junk(junk) => JunkAssertion {
                junk,
                context: self.context,
            },
            _ => self.wrong_kind("Junk"),
        }
    }
}

pub struct MessageAssertion<'a> {
    message: &'a Message,
    context: String,
}

impl<'a> MessageAssertion<'a> {
    pub fn id(self, expected: &str) -> Self {
        TextMatch::Exact(expected.to_string()).assert(&self.message.id.name, &self.context);
        self
    }

    /// The value rendered back to source form (placeables as `{ ... }`)
    pub fn value_text(self, expected: &str) -> Self {
        let value = self.expect_value();
        TextMatch::Exact(expected.to_string()).assert(&value.to_string(), &self.context);
        self
    }

    pub fn value<F>(self, assertion: F) -> Self
    where
        F: FnOnce(PatternAssertion<'a>),
    {
        let value = self.expect_value();
        assertion(PatternAssertion {
            pattern: value,
            context: format!("{}:value", self.context),
        });
        self
    }

    pub fn no_value(self) -> Self {
        assert!(
            self.message.value.is_none(),
            "{}: Expected no value, found {:?}",
            self.context,
            self.message.value.as_ref().map(ToString::to_string)
        );
        self
    }

    fn expect_value(&self) -> &'a Pattern {
        let message: &'a Message = self.message;
        match &message.value {
            Some(value) => value,
            None => panic!("{}: Expected a value, message has none", self.context),
        }
    }

    pub fn attribute_count(self, expected: usize) -> Self {
        assert_attribute_count(&self.message.attributes, expected, &self.context);
        self
    }

    pub fn attribute<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(AttributeAssertion<'a>),
    {
        assertion(attribute_assertion(&self.message.attributes, index, &self.context));
        self
    }

    pub fn comment(self, expected: &str) -> Self {
        assert_doc_comment(self.message.comment.as_ref(), expected, &self.context);
        self
    }

    pub fn no_comment(self) -> Self {
        assert!(
            self.message.comment.is_none(),
            "{}: Expected no doc comment, found {:?}",
            self.context,
            self.message.comment.as_ref().map(|c| &c.content)
        );
        self
    }
}

pub struct TermAssertion<'a> {
    term: &'a Term,
    context: String,
}

impl<'a> TermAssertion<'a> {
    /// Term id without the leading `-`
    pub fn id(self, expected: &str) -> Self {
        TextMatch::Exact(expected.to_string()).assert(&self.term.id.name, &self.context);
        self
    }

    pub fn value_text(self, expected: &str) -> Self {
        TextMatch::Exact(expected.to_string()).assert(&self.term.value.to_string(), &self.context);
        self
    }

    pub fn value<F>(self, assertion: F) -> Self
    where
        F: FnOnce(PatternAssertion<'a>),
    {
        assertion(PatternAssertion {
            pattern: &self.term.value,
            context: format!("{}:value", self.context),
        });
        self
    }

    pub fn attribute_count(self, expected: usize) -> Self {
        assert_attribute_count(&self.term.attributes, expected, &self.context);
        self
    }

    pub fn attribute<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(AttributeAssertion<'a>),
    {
        assertion(attribute_assertion(&self.term.attributes, index, &self.context));
        self
    }

    pub fn comment(self, expected: &str) -> Self {
        assert_doc_comment(self.term.comment.as_ref(), expected, &self.context);
        self
    }
}

fn assert_attribute_count(attributes: &[Attribute], expected: usize, context: &str) {
    let names: Vec<&str> = attributes.iter().map(|a| a.id.name.as_str()).collect();
    assert_eq!(
        attributes.len(),
        expected,
        "{}: Expected {} attributes, found {}: {:?}",
        context,
        expected,
        attributes.len(),
        names
    );
}

fn attribute_assertion<'a>(
    attributes: &'a [Attribute],
    index: usize,
    context: &str,
) -> AttributeAssertion<'a> {
    assert!(
        index < attributes.len(),
        "{}: Attribute index {} out of bounds (entry has {} attributes)",
        context,
        index,
        attributes.len()
    );
    AttributeAssertion {
        attribute: &attributes[index],
        context: format!("{}:attributes[{}]", context, index),
    }
}

fn assert_doc_comment(comment: Option<&Comment>, expected: &str, context: &str) {
    match comment {
        Some(comment) => TextMatch::Exact(expected.to_string()).assert(&comment.content, context),
        None => panic!("{}: Expected doc comment {:?}, found none", context, expected),
    }
}

pub struct AttributeAssertion<'a> {
    attribute: &'a Attribute,
    context: String,
}

impl<'a> AttributeAssertion<'a> {
    pub fn id(self, expected: &str) -> Self {
        TextMatch::Exact(expected.to_string()).assert(&self.attribute.id.name, &self.context);
        self
    }

    pub fn value_text(self, expected: &str) -> Self {
        TextMatch::Exact(expected.to_string())
            .assert(&self.attribute.value.to_string(), &self.context);
        self
    }

    pub fn value<F>(self, assertion: F) -> Self
    where
        F: FnOnce(PatternAssertion<'a>),
    {
        assertion(PatternAssertion {
            pattern: &self.attribute.value,
            context: format!("{}:value", self.context),
        });
        self
    }
}

pub struct CommentAssertion<'a> {
    comment: &'a Comment,
    context: String,
}

impl<'a> CommentAssertion<'a> {
    pub fn level(self, expected: CommentLevel) -> Self {
        assert_eq!(
            self.comment.level, expected,
            "{}: Expected a {:?} comment, found {:?}",
            self.context, expected, self.comment.level
        );
        self
    }

    pub fn content(self, expected: &str) -> Self {
        TextMatch::Exact(expected.to_string()).assert(&self.comment.content, &self.context);
        self
    }
}

pub struct JunkAssertion<'a> {
    junk: &'a Junk,
    context: String,
}

impl<'a> JunkAssertion<'a> {
    pub fn content(self, expected: &str) -> Self {
        TextMatch::Exact(expected.to_string()).assert(&self.junk.content, &self.context);
        self
    }

    pub fn content_starts_with(self, prefix: &str) -> Self {
        TextMatch::StartsWith(prefix.to_string()).assert(&self.junk.content, &self.context);
        self
    }

    /// Compare against [`ParseError::code`](crate::ftl::ast::ParseError::code)
    pub fn error_code(self, expected: &str) -> Self {
        assert_eq!(
            self.junk.error.code(),
            expected,
            "{}: Expected a {} error, found: {}",
            self.context,
            expected,
            self.junk.error
        );
        self
    }

    pub fn error_contains(self, substring: &str) -> Self {
        TextMatch::Contains(substring.to_string()).assert(&self.junk.error.to_string(), &self.context);
        self
    }
}

pub struct PatternAssertion<'a> {
    pattern: &'a Pattern,
    context: String,
}

impl<'a> PatternAssertion<'a> {
    pub fn element_count(self, expected: usize) -> Self {
        let kinds: Vec<&str> = self
            .pattern
            .elements
            .iter()
            .map(|element| match element {
                PatternElement::TextChunk(_) => "text",
                PatternElement::Placeable(_) => "placeable",
            })
            .collect();
        assert_eq!(
            self.pattern.elements.len(),
            expected,
            "{}: Expected {} elements, found {}: {:?}",
            self.context,
            expected,
            kinds.len(),
            kinds
        );
        self
    }

    /// The element at `index` is a text chunk with exactly this value
    pub fn text(self, index: usize, expected: &str) -> Self {
        match self.element(index) {
            PatternElement::TextChunk(chunk) => TextMatch::Exact(expected.to_string())
                .assert(&chunk.value, &format!("{}:elements[{}]", self.context, index)),
            PatternElement::Placeable(placeable) => panic!(
                "{}: Expected text at element {}, found placeable {}",
                self.context, index, placeable
            ),
        }
        self
    }

    pub fn placeable<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(ExpressionAssertion<'a>),
    {
        let context = format!("{}:elements[{}]", self.context, index);
        match self.element(index) {
            PatternElement::Placeable(placeable) => assertion(ExpressionAssertion {
                expression: &placeable.expression,
                context,
            }),
            PatternElement::TextChunk(chunk) => panic!(
                "{}: Expected a placeable, found text {:?}",
                context, chunk.value
            ),
        }
        self
    }

    fn element(&self, index: usize) -> &'a PatternElement {
        let elements = &self.pattern.elements;
        assert!(
            index < elements.len(),
            "{}: Element index {} out of bounds (pattern has {} elements)",
            self.context,
            index,
            elements.len()
        );
        &elements[index]
    }
}

pub struct ExpressionAssertion<'a> {
    expression: &'a Expression,
    context: String,
}

impl<'a> ExpressionAssertion<'a> {
    fn wrong_kind(&self, expected: &str) -> ! {
        panic!(
            "{}: Expected {}, found {} `{}`",
            self.context,
            expected,
            self.expression.describe(),
            self.expression
        )
    }

    pub fn variable(self, name: &str) -> Self {
        match self.expression {
            Expression::VariableReference(var) => {
                TextMatch::Exact(name.to_string()).assert(&var.id.name, &self.context)
            }
            _ => self.wrong_kind("a variable reference"),
        }
        self
    }

    /// Number literal as written in the source
    pub fn number(self, raw: &str) -> Self {
        match self.expression {
            Expression::NumberLiteral(number) => {
                TextMatch::Exact(raw.to_string()).assert(&number.raw, &self.context)
            }
            _ => self.wrong_kind("a number literal"),
        }
        self
    }

    /// String literal, compared by its decoded value
    pub fn string(self, value: &str) -> Self {
        match self.expression {
            Expression::StringLiteral(literal) => {
                TextMatch::Exact(value.to_string()).assert(&literal.value, &self.context)
            }
            _ => self.wrong_kind("a string literal"),
        }
        self
    }

    pub fn message_reference(self, id: &str, attribute: Option<&str>) -> Self {
        match self.expression {
            Expression::MessageReference(reference) => {
                TextMatch::Exact(id.to_string()).assert(&reference.id.name, &self.context);
                let actual = reference.attribute.as_ref().map(|a| a.name.as_str());
                assert_eq!(actual, attribute, "{}: attribute mismatch", self.context);
            }
            _ => self.wrong_kind("a message reference"),
        }
        self
    }

    pub fn term_reference(self, id: &str, attribute: Option<&str>) -> Self {
        match self.expression {
            Expression::TermReference(reference) => {
                TextMatch::Exact(id.to_string()).assert(&reference.id.name, &self.context);
                let actual = reference.attribute.as_ref().map(|a| a.name.as_str());
                assert_eq!(actual, attribute, "{}: attribute mismatch", self.context);
            }
            _ => self.wrong_kind("a term reference"),
        }
        self
    }

    /// Arguments of a function call or of a parameterized term reference
    pub fn arguments<F>(self, assertion: F) -> Self
    where
        F: FnOnce(CallArgumentsAssertion<'a>),
    {
        let arguments = match self.expression {
            Expression::FunctionReference(function) => &function.arguments,
            Expression::TermReference(term) => match &term.arguments {
                Some(arguments) => arguments,
                None => panic!("{}: Term reference has no arguments", self.context),
            },
            _ => self.wrong_kind("a call"),
        };
        assertion(CallArgumentsAssertion {
            arguments,
            context: format!("{}:arguments", self.context),
        });
        self
    }

    pub fn function(self, name: &str) -> Self {
        match self.expression {
            Expression::FunctionReference(function) => {
                TextMatch::Exact(name.to_string()).assert(&function.id.name, &self.context)
            }
            _ => self.wrong_kind("a function reference"),
        }
        self
    }

    pub fn select<F>(self, assertion: F) -> Self
    where
        F: FnOnce(SelectAssertion<'a>),
    {
        match self.expression {
            Expression::SelectExpression(select) => assertion(SelectAssertion {
                select,
                context: format!("{}:select", self.context),
            }),
            _ => self.wrong_kind("a select expression"),
        }
        self
    }

    /// The expression is itself a placeable; descend into it
    pub fn placeable<F>(self, assertion: F) -> Self
    where
        F: FnOnce(ExpressionAssertion<'a>),
    {
        match self.expression {
            Expression::Placeable(placeable) => assertion(ExpressionAssertion {
                expression: &placeable.expression,
                context: format!("{}:placeable", self.context),
            }),
            _ => self.wrong_kind("a placeable"),
        }
        self
    }
}

pub struct CallArgumentsAssertion<'a> {
    arguments: &'a CallArguments,
    context: String,
}

impl<'a> CallArgumentsAssertion<'a> {
    pub fn positional_count(self, expected: usize) -> Self {
        assert_eq!(
            self.arguments.positional.len(),
            expected,
            "{}: Expected {} positional arguments in {}",
            self.context,
            expected,
            self.arguments
        );
        self
    }

    pub fn named_count(self, expected: usize) -> Self {
        assert_eq!(
            self.arguments.named.len(),
            expected,
            "{}: Expected {} named arguments in {}",
            self.context,
            expected,
            self.arguments
        );
        self
    }

    pub fn positional<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(ExpressionAssertion<'a>),
    {
        let positional = &self.arguments.positional;
        assert!(
            index < positional.len(),
            "{}: Positional index {} out of bounds in {}",
            self.context,
            index,
            self.arguments
        );
        assertion(ExpressionAssertion {
            expression: &positional[index],
            context: format!("{}:positional[{}]", self.context, index),
        });
        self
    }

    pub fn named<F>(self, name: &str, assertion: F) -> Self
    where
        F: FnOnce(ExpressionAssertion<'a>),
    {
        let Some(argument) = self.arguments.get_named(name) else {
            panic!(
                "{}: No named argument `{}` in {}",
                self.context, name, self.arguments
            );
        };
        assertion(ExpressionAssertion {
            expression: &argument.value,
            context: format!("{}:{}", self.context, name),
        });
        self
    }
}

pub struct SelectAssertion<'a> {
    select: &'a SelectExpression,
    context: String,
}

impl<'a> SelectAssertion<'a> {
    pub fn selector<F>(self, assertion: F) -> Self
    where
        F: FnOnce(ExpressionAssertion<'a>),
    {
        assertion(ExpressionAssertion {
            expression: &self.select.selector,
            context: format!("{}:selector", self.context),
        });
        self
    }

    pub fn variant_count(self, expected: usize) -> Self {
        let keys: Vec<&str> = self.select.variants.iter().map(|v| v.key.name()).collect();
        assert_eq!(
            keys.len(),
            expected,
            "{}: Expected {} variants, found {:?}",
            self.context,
            expected,
            keys
        );
        self
    }

    pub fn default_key(self, expected: &str) -> Self {
        match self.select.default_variant() {
            Some(variant) => {
                TextMatch::Exact(expected.to_string()).assert(variant.key.name(), &self.context)
            }
            None => panic!("{}: Select expression has no default variant", self.context),
        }
        self
    }

    pub fn variant<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(VariantAssertion<'a>),
    {
        let variants = &self.select.variants;
        assert!(
            index < variants.len(),
            "{}: Variant index {} out of bounds (select has {} variants)",
            self.context,
            index,
            variants.len()
        );
        assertion(VariantAssertion {
            variant: &variants[index],
            context: format!("{}:variants[{}]", self.context, index),
        });
        self
    }
}

pub struct VariantAssertion<'a> {
    variant: &'a Variant,
    context: String,
}

impl<'a> VariantAssertion<'a> {
    pub fn key(self, expected: &str) -> Self {
        TextMatch::Exact(expected.to_string()).assert(self.variant.key.name(), &self.context);
        self
    }

    pub fn is_default(self, expected: bool) -> Self {
        assert_eq!(
            self.variant.default, expected,
            "{}: default flag mismatch",
            self.context
        );
        self
    }

    pub fn value_text(self, expected: &str) -> Self {
        TextMatch::Exact(expected.to_string()).assert(&self.variant.value.to_string(), &self.context);
        self
    }

    pub fn value<F>(self, assertion: F) -> Self
    where
        F: FnOnce(PatternAssertion<'a>),
    {
        assertion(PatternAssertion {
            pattern: &self.variant.value,
            context: format!("{}:value", self.context),
        });
        self
    }
}
