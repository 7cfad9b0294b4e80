//! Parser for the sysyc source language.
//!
//! Transforms source text directly into a `sysy_dsl::ast::CompUnit`, with
//! no intermediate token stream exposed to callers.
mod error;
mod keyword;
mod parser;

pub use error::ParseError;
pub use parser::parse_program;
