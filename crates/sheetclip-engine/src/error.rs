//! Error types for expression evaluation.

use thiserror::Error;

/// Result type for expression operations.
pub type EvalResult<T> = std::result::Result<T, EvalError>;

/// Errors that can occur while lexing, parsing, or evaluating an expression.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EvalError {
    #[error("syntax error: {0}")]
    Syntax(String),

    #[error("unknown function: {0}")]
    UnknownFunction(String),

    #[error("wrong number of arguments for {function}: expected {expected}, got {actual}")]
    ArgumentCount {
        function: String,
        expected: String,
        actual: usize,
    },

    #[error("type error: {0}")]
    Type(String),

    #[error("division by zero")]
    DivideByZero,

    #[error("modulo by zero")]
    ModuloByZero,

    #[error("numeric result is not finite")]
    NonFinite,
}
