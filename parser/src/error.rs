//! The parser's single error type.
//!
//! No source-position tracking is carried beyond what `peg` reports on its
//! own (line/column into the source); the driver only needs enough detail
//! to print a message, not to underline a span.

use std::fmt;

#[derive(Debug)]
pub struct ParseError {
    pub line: usize,
    pub column: usize,
    pub expected: String,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "syntax error at line {}, column {}: expected one of: {}",
            self.line, self.column, self.expected
        )
    }
}

impl std::error::Error for ParseError {}

impl From<peg::error::ParseError<peg::str::LineCol>> for ParseError {
    fn from(e: peg::error::ParseError<peg::str::LineCol>) -> Self {
        ParseError {
            line: e.location.line,
            column: e.location.column,
            expected: e.expected.tokens().collect::<Vec<_>>().join(", "),
        }
    }
}
