//! Parser
//!
//!     The parser consumes the lexer's token stream and builds a [`Resource`]. It is a plain
//!     recursive-descent parser: the lexer has already resolved every layout question
//!     (indentation, continuation lines, where an entry ends), so the grammar left over is
//!     small and LL(2) at worst.
//!
//!     Parsing never fails as a whole. A malformed entry becomes a [`Junk`](crate::ftl::ast::Junk)
//!     entry holding its source text and the first error found in it, and parsing resumes at
//!     the next top-level item.
//!
//! Entry Points
//!
//!     [`parse_resource`] always returns the resource. [`parse`] and [`parse_with_options`]
//!     return `Err` with the resource and its errors when any junk was produced, for callers
//!     that want to treat junk as failure.

pub mod escapes;
mod expressions;
pub mod parser;

pub use parser::Parser;

use crate::ftl::ast::{ParseError, Resource};
use crate::ftl::lexing::{self, DEFAULT_MAX_NESTING};
use serde::{Deserialize, Serialize};

/// What to do with a message or term id that was already defined
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DuplicatePolicy {
    /// Keep every entry
    #[default]
    Preserve,
    /// Turn repeated entries (and entries with repeated attributes) into junk
    Reject,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserOptions {
    pub duplicates: DuplicatePolicy,
    /// Deepest allowed nesting of placeables and call arguments
    pub max_nesting: usize,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            duplicates: DuplicatePolicy::default(),
            max_nesting: DEFAULT_MAX_NESTING,
        }
    }
}

/// Parse a resource, reporting junk as an error
pub fn parse(source: &str) -> Result<Resource, (Resource, Vec<ParseError>)> {
    parse_with_options(source, &ParserOptions::default())
}

pub fn parse_with_options(
    source: &str,
    options: &ParserOptions,
) -> Result<Resource, (Resource, Vec<ParseError>)> {
    let resource = parse_resource_with_options(source, options);
    let errors: Vec<ParseError> = resource.errors().cloned().collect();
    if errors.is_empty() {
        Ok(resource)
    } else {
        Err((resource, errors))
    }
}

/// Parse a resource; malformed entries end up as junk inside it
pub fn parse_resource(source: &str) -> Resource {
    parse_resource_with_options(source, &ParserOptions::default())
}

pub fn parse_resource_with_options(source: &str, options: &ParserOptions) -> Resource {
    let tokens = lexing::tokenize_with_max_nesting(source, options.max_nesting);
    Parser::new(source, tokens, options.clone()).parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ok_without_junk() {
        let resource = parse("a = A\n-b = B\n").unwrap();
        assert_eq!(resource.body.len(), 2);
    }

    #[test]
    fn test_parse_err_keeps_resource() {
        let (resource, errors) = parse("a = A\n!!\nb = B\n").unwrap_err();
        assert_eq!(resource.messages().count(), 2);
        assert_eq!(errors, vec![ParseError::UnfinishedLine { span: 6..9 }]);
    }

    #[test]
    fn test_max_nesting_option() {
        let options = ParserOptions {
            max_nesting: 2,
            ..ParserOptions::default()
        };
        assert!(parse_with_options("a = { { 1 } }", &options).is_ok());
        assert!(parse_with_options("a = { { { 1 } } }", &options).is_err());
    }

    #[test]
    fn test_empty_source() {
        let resource = parse("").unwrap();
        assert!(resource.body.is_empty());
        assert_eq!(resource.location.span, 0..0);
    }
}
