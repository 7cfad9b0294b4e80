//! Provides the abstract syntax tree produced by parsing a source program.
pub mod ast;
