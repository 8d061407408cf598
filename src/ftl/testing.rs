//! Testing utilities for AST assertions
//!
//! # Parser Testing Guidelines
//!
//! What a parser test needs to establish is that the tree has the right shape and the right
//! content: which entries came out, what their values hold, which text ended up as junk and
//! why. Matching on nested enums by hand to get there is long, and the failure messages say
//! little about where in the tree the mismatch is.
//!
//! Use [assert_resource] instead. It walks the tree with closures, one level per call, and
//! every failure message carries the path to the node (`entry[1]:value:elements[0]:select`).
//!
//! ```rust-example
//! use ftl::ftl::testing::assert_resource;
//!
//! let resource = ftl::parse_resource("hello = Hello, { $name }!\n");
//! assert_resource(&resource)
//!     .entry_count(1)
//!     .entry(0, |e| {
//!         e.assert_message()
//!             .id("hello")
//!             .value(|p| {
//!                 p.element_count(3)
//!                     .text(0, "Hello, ")
//!                     .placeable(1, |x| {
//!                         x.variable("name");
//!                     })
//!                     .text(2, "!");
//!             });
//!     });
//! ```
//!
//! Junk is asserted the same way, by content and by [error code](crate::ftl::ast::ParseError::code):
//!
//! ```rust-example
//! assert_resource(&resource).entry(0, |e| {
//!     e.assert_junk().content("oops\n").error_code("unfinished-line");
//! });
//! ```
//!
//! Count-only checks (`entry_count`, `junk_count`) are fine as a first line, but a test should
//! go on to look at the nodes themselves.

pub mod ast_assertions;
pub mod matchers;

pub use ast_assertions::{
    assert_resource, AttributeAssertion, CallArgumentsAssertion, CommentAssertion,
    EntryAssertion, ExpressionAssertion, JunkAssertion, MessageAssertion, PatternAssertion,
    ResourceAssertion, SelectAssertion, TermAssertion, VariantAssertion,
};
pub use matchers::TextMatch;
