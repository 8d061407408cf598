//! Main module for ftl library functionality

pub mod ast;
pub mod charclass;
pub mod config;
pub mod formats;
pub mod lexing;
pub mod parsing;
pub mod testing;
pub mod token;
