//! Parse error type.

use style_lint_core::InputSyntaxError;
use thiserror::Error;

/// The input is not valid ES5.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Line {line}: {message}")]
pub struct ParseError {
    /// Human-readable error message.
    pub message: String,
    /// Byte offset of the offending token.
    pub offset: usize,
    /// Line of the offending token (1-indexed).
    pub line: usize,
    /// Column of the offending token (0-indexed).
    pub column: usize,
}

impl From<ParseError> for InputSyntaxError {
    fn from(err: ParseError) -> Self {
        InputSyntaxError::new(err.message, err.line, err.column)
    }
}
