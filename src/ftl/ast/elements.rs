//! Element-specific AST node definitions for Fluent resources
//!
//!     A resource is a flat list of entries. There is no nesting at the entry level: the
//!     structure lives inside values, where patterns hold text and placeables, and placeables
//!     hold expressions that can themselves contain patterns (through select expressions).
//!
//! Element Types
//!
//!     Entries:
//!         Messages, terms, standalone comments and junk. See [resource](resource) and
//!         [entry](entry).
//!
//!     Values:
//!         Patterns are sequences of text chunks and placeables. See [pattern](pattern).
//!
//!     Expressions:
//!         Literals, references, function calls and select expressions. See
//!         [expression](expression).
//!
//! Ownership
//!
//!     Every node owns its data (strings are copied out of the source), so a resource can outlive
//!     the text it was parsed from. Every node carries a mandatory `location`.

pub mod entry;
pub mod expression;
pub mod pattern;
pub mod resource;

pub use entry::{Attribute, Identifier, Message, Term};
pub use expression::{
    CallArguments, Expression, FunctionReference, MessageReference, NamedArgument,
    NumberLiteral, SelectExpression, StringLiteral, TermReference, VariableReference, Variant,
    VariantKey,
};
pub use pattern::{Pattern, PatternElement, Placeable, TextChunk};
pub use resource::{Comment, CommentLevel, Entry, Junk, Resource};
