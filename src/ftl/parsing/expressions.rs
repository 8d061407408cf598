//! Placeables and the expressions inside them
//!
//! Grammar (whitespace is already gone from the token stream):
//!
//!     placeable   = "{" (select | inline) "}"
//!     select      = inline "->" variant+
//!     variant     = "*"? "[" (identifier | number) "]" pattern
//!     inline      = string | number | "$" id | "-" id ("." id)? args? | FUNC args
//!                 | id ("." id)? | placeable
//!     args        = "(" (inline ",")* EndPositionalArgs (id ":" inline ",")* ")"
//!
//! `$`, `-` and the `.` of an attribute accessor must touch the identifier next to them.

use super::escapes;
use super::parser::Parser;
use crate::ftl::ast::{
    CallArguments, Expression, FunctionReference, Identifier, MessageReference, NamedArgument,
    NumberLiteral, ParseError, ParseResult, Placeable, SelectExpression, StringLiteral,
    TermReference, VariableReference, Variant, VariantKey,
};
use crate::ftl::charclass;
use crate::ftl::token::Token;
use once_cell::sync::Lazy;
use regex::Regex;

/// Function names are upper case: `[A-Z][A-Z0-9_-]*`
static FUNCTION_NAME: Lazy<Regex> = Lazy::new(|| {
    let pattern = format!(
        "^{}{}$",
        charclass::parse("A-Z").to_class(),
        charclass::parse("A-Z0-9_-").to_pattern(Some("*"))
    );
    Regex::new(&pattern).unwrap()
});

impl<'s> Parser<'s> {
    pub(super) fn parse_placeable(&mut self) -> ParseResult<Placeable> {
        let start = self.expect(&Token::OpenBrace, "`{`")?.start;
        let expression = self.parse_inline_expression()?;

        let expression = if self.eat(&Token::Arrow) {
            if !expression.is_valid_selector() {
                return Err(ParseError::syntax(
                    expression.location().span.start,
                    "a selector (a literal, a variable, a term or a function call)",
                    expression.describe(),
                ));
            }
            let variants = self.parse_variants()?;
            let location = self.location(expression.location().span.start..self.previous_end());
            Expression::SelectExpression(Box::new(SelectExpression {
                selector: expression,
                variants,
                location,
            }))
        } else {
            if let Expression::TermReference(term) = &expression {
                if term.attribute.is_some() {
                    return Err(ParseError::syntax(
                        term.location.span.start,
                        "a term value (term attributes can only be used as selectors)",
                        "a term attribute",
                    ));
                }
            }
            expression
        };

        let end = self.expect(&Token::CloseBrace, "`}`")?.end;
        Ok(Placeable {
            expression,
            location: self.location(start..end),
        })
    }

    pub(super) fn parse_inline_expression(&mut self) -> ParseResult<Expression> {
        match self.peek().cloned() {
            Some(Token::OpenBrace) => Ok(Expression::Placeable(Box::new(self.parse_placeable()?))),
            Some(Token::StringLiteral(raw)) => {
                let span = self.advance();
                let value = escapes::unescape(&raw, span.start + 1)?.into_owned();
                Ok(Expression::StringLiteral(StringLiteral {
                    value,
                    raw,
                    location: self.location(span),
                }))
            }
            Some(Token::UnterminatedString(_)) => {
                Err(ParseError::UnterminatedString { span: self.span() })
            }
            Some(Token::Number(_)) => Ok(Expression::NumberLiteral(self.parse_number()?)),
            Some(Token::Dollar) => {
                let start = self.advance().start;
                let id = self.parse_adjacent_identifier(start + 1, "a variable name after `$`")?;
                let location = self.location(start..id.location.span.end);
                Ok(Expression::VariableReference(VariableReference { id, location }))
            }
            Some(Token::Minus) => self.parse_term_reference(),
            Some(Token::Identifier(_)) if self.peek_nth(1) == Some(&Token::OpenParen) => {
                self.parse_function_reference()
            }
            Some(Token::Identifier(_)) => {
                let id = self.parse_identifier("a message name")?;
                let start = id.location.span.start;
                let attribute = self.parse_attribute_accessor(id.location.span.end)?;
                Ok(Expression::MessageReference(MessageReference {
                    id,
                    attribute,
                    location: self.location(start..self.previous_end()),
                }))
            }
            _ => Err(self.error("an expression")),
        }
    }

    fn parse_number(&mut self) -> ParseResult<NumberLiteral> {
        let position = self.span().start;
        let Some(Token::Number(raw)) = self.peek().cloned() else {
            return Err(self.error("a number"));
        };
        let value = raw
            .parse::<f64>()
            .map_err(|_| ParseError::syntax(position, "a number", format!("`{}`", raw)))?;
        let span = self.advance();
        Ok(NumberLiteral {
            raw,
            value,
            location: self.location(span),
        })
    }

    /// An identifier starting exactly at byte `at`
    fn parse_adjacent_identifier(&mut self, at: usize, expected: &str) -> ParseResult<Identifier> {
        if self.peek().is_some() && self.span().start != at {
            return Err(self.error(expected));
        }
        self.parse_identifier(expected)
    }

    /// `.attr` glued to the identifier that ended at `id_end`
    fn parse_attribute_accessor(&mut self, id_end: usize) -> ParseResult<Option<Identifier>> {
        if self.peek() != Some(&Token::Dot) || self.span().start != id_end {
            return Ok(None);
        }
        let dot = self.advance();
        self.parse_adjacent_identifier(dot.end, "an attribute name after `.`")
            .map(Some)
    }

    fn parse_term_reference(&mut self) -> ParseResult<Expression> {
        let start = self.expect(&Token::Minus, "`-`")?.start;
        let id = self.parse_adjacent_identifier(start + 1, "a term name after `-`")?;
        let attribute = self.parse_attribute_accessor(id.location.span.end)?;
        let arguments = if self.peek() == Some(&Token::OpenParen) {
            Some(self.parse_call_arguments()?)
        } else {
            None
        };
        Ok(Expression::TermReference(TermReference {
            id,
            attribute,
            arguments,
            location: self.location(start..self.previous_end()),
        }))
    }

    fn parse_function_reference(&mut self) -> ParseResult<Expression> {
        let id = self.parse_identifier("a function name")?;
        if !FUNCTION_NAME.is_match(&id.name) {
            return Err(ParseError::syntax(
                id.location.span.start,
                "an upper-case function name",
                format!("`{}`", id.name),
            ));
        }
        let arguments = self.parse_call_arguments()?;
        let location = self.location(id.location.span.start..arguments.location.span.end);
        Ok(Expression::FunctionReference(FunctionReference {
            id,
            arguments,
            location,
        }))
    }

    fn parse_call_arguments(&mut self) -> ParseResult<CallArguments> {
        let start = self.expect(&Token::OpenParen, "`(`")?.start;

        let mut positional = Vec::new();
        while !self.eat(&Token::EndPositionalArgs) {
            positional.push(self.parse_inline_expression()?);
            match self.peek() {
                Some(Token::Comma) => {
                    self.advance();
                }
                Some(Token::EndPositionalArgs) => {}
                _ => return Err(self.error("`,` or `)`")),
            }
        }

        let mut named: Vec<NamedArgument> = Vec::new();
        loop {
            match self.peek() {
                Some(Token::CloseParen) => break,
                Some(Token::Identifier(_)) if self.peek_nth(1) == Some(&Token::Colon) => {
                    let name = self.parse_identifier("an argument name")?;
                    self.advance();
                    let value = self.parse_inline_expression()?;
                    if named.iter().any(|arg| arg.name.name == name.name) {
                        return Err(ParseError::syntax(
                            name.location.span.start,
                            "a unique argument name",
                            format!("repeated argument `{}`", name.name),
                        ));
                    }
                    let location =
                        self.location(name.location.span.start..value.location().span.end);
                    named.push(NamedArgument {
                        name,
                        value,
                        location,
                    });
                    match self.peek() {
                        Some(Token::Comma) => {
                            self.advance();
                        }
                        Some(Token::CloseParen) => {}
                        _ => return Err(self.error("`,` or `)`")),
                    }
                }
                Some(_) => {
                    return Err(self.error("a named argument (positional arguments come first)"))
                }
                None => return Err(self.error("`)`")),
            }
        }

        let end = self.advance().end;
        Ok(CallArguments {
            positional,
            named,
            location: self.location(start..end),
        })
    }

    fn parse_variants(&mut self) -> ParseResult<Vec<Variant>> {
        let mut variants = Vec::new();
        while matches!(self.peek(), Some(Token::Star | Token::OpenBracket)) {
            variants.push(self.parse_variant()?);
        }
        if variants.is_empty() {
            return Err(self.error("a variant"));
        }

        let mut defaults = variants.iter().filter(|variant| variant.default);
        match (defaults.next(), defaults.next()) {
            (Some(_), None) => Ok(variants),
            (None, _) => Err(ParseError::syntax(
                self.span().start,
                "a default variant marked with `*`",
                "no default variant",
            )),
            (Some(_), Some(second)) => Err(ParseError::syntax(
                second.location.span.start,
                "only one default variant",
                "a second default variant",
            )),
        }
    }

    fn parse_variant(&mut self) -> ParseResult<Variant> {
        let start = self.span().start;
        let default = self.eat(&Token::Star);
        self.expect(&Token::OpenBracket, "`[`")?;
        let key = match self.peek() {
            Some(Token::Identifier(_)) => VariantKey::Identifier(self.parse_identifier("a variant key")?),
            Some(Token::Number(_)) => VariantKey::NumberLiteral(self.parse_number()?),
            _ => return Err(self.error("a variant key")),
        };
        self.expect(&Token::CloseBracket, "`]`")?;
        let value_at = self.span().start;
        let Some(value) = self.parse_pattern_or_skip()? else {
            return Err(ParseError::syntax(
                value_at,
                "a value for the variant",
                "nothing",
            ));
        };
        Ok(Variant {
            key,
            value,
            default,
            location: self.location(start..self.previous_end()),
        })
    }
}
