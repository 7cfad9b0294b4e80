//! The compiler's single error type.
//!
//! Every pass returns `Result<_, CompileError>`; the driver is the only
//! place that formats an error for the user and picks the process exit
//! code.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CompileError {
    #[error("unsupported mode: {0}")]
    UnsupportedMode(String),

    #[error("I/O error: {0}")]
    IOError(#[from] std::io::Error),

    #[error("{0}")]
    ParseError(#[from] sysy_parser::ParseError),

    #[error("constant initialiser for '{name}' is not a compile-time constant")]
    NonConstantInitialiser { name: String },

    #[error("division by zero in constant expression")]
    ConstDivByZero,

    #[error("use of undeclared name '{0}'")]
    UnresolvedName(String),

    #[error("cannot assign to constant '{0}'")]
    AssignToConst(String),

    #[error("'{name}' is bound as a {expected} but used as a {actual}")]
    SymbolKindMismatch {
        name: String,
        expected: &'static str,
        actual: &'static str,
    },

    #[error("'{0}' is already defined in this scope")]
    DuplicateDefinition(String),

    #[error("malformed intermediate representation: {0}")]
    MalformedIR(String),
}
