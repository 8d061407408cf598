//! AST definitions and utilities for Fluent resources
//!
//!     This module provides the Abstract Syntax Tree (AST) definitions, along with utilities
//!     for tracking source positions, walking the tree and reporting diagnostics.
//!
//! Resources and Entries
//!
//!     A Fluent file parses into a [Resource](elements::Resource): a flat list of messages,
//!     terms, comments and junk. Structure below the entry level lives inside values; see the
//!     [elements](elements) module for the element types.
//!
//! ## How Location Tracking Works
//!
//! ### 1. Tokenization (Lexer)
//!
//! The lexer produces tokens paired with byte-offset ranges into the source:
//!
//! ```text
//! Source: "hi = Hello"
//!          0123456789
//!                  ↓
//! Lexer: (Token::Identifier("hi"), 0..2)
//!        (Token::Equals, 3..4)
//!        (Token::PatternStart, 5..5)
//!        (Token::PureText("Hello"), 5..10)
//!        (Token::PatternEnd, 10..10)
//! ```
//!
//! ### 2. Byte-to-Line Conversion
//!
//! Byte ranges are converted to line:column positions using [`SourceLocation`], which
//! pre-computes line starts once and answers each lookup with a binary search.
//!
//! ### 3. Parser (AST Construction)
//!
//! Every node gets a [`Range`] holding both its byte span and its start/end positions.
//! Containers (patterns, call arguments) take the bounding box of their parts.

pub mod diagnostics;
pub mod elements;
pub mod error;
pub mod range;
pub mod snapshot;
pub mod traits;

pub use diagnostics::{Diagnostic, DiagnosticSeverity};
pub use elements::*;
pub use error::{format_source_context, ParseError, ParseResult};
pub use range::{Position, Range, SourceLocation};
pub use snapshot::{snapshot_from_entry, snapshot_from_resource, AstSnapshot};
pub use traits::{AstNode, Visitor};
