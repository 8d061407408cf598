//! # ftl
//!
//! A parser for the Fluent localization format.
//!
//! File Layout
//!
//! The crate follows a strict two-phase design. The lexer turns source text into a finite,
//! inspectable token stream and the parser consumes that stream (plus the raw text, for junk
//! slices) to build the AST. Neither phase keeps state between calls.
//!
//! src/ftl
//!   ├── charclass    Interval sets used to build tokenizer character classes
//!   ├── token        Token vocabulary shared by lexer and parser
//!   ├── lexing       Indentation-aware lexer
//!   ├── parsing      Recursive-descent parser and escape decoding
//!   ├── ast          Resource model, locations, traits, snapshots and diagnostics
//!   ├── formats      Read-only tree consumers (treeviz, json, yaml)
//!   ├── config       Layered configuration
//!   └── testing      Assertion builders used by the test suites
//!
//! For comprehensive testing guidelines, see the [testing module](ftl::testing).

#![allow(rustdoc::invalid_html_tags)]

pub mod ftl;

pub use ftl::parsing::{
    parse, parse_resource, parse_resource_with_options, parse_with_options, DuplicatePolicy,
    ParserOptions,
};
