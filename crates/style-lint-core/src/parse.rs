//! Boundary to the parser that produces trees, tokens and comments.

use crate::token::{Comment, Token};
use crate::tree::SyntaxTree;
use thiserror::Error;

/// Everything a parser hands over for one input.
#[derive(Debug, Clone, Default)]
pub struct ParsedSource {
    /// Syntax tree with its `Program` root set.
    pub tree: SyntaxTree,
    /// Tokens ordered by position.
    pub tokens: Vec<Token>,
    /// Comments ordered by position.
    pub comments: Vec<Comment>,
}

/// The input could not be parsed. The whole check for that input is aborted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} (line {line}, column {column})")]
pub struct InputSyntaxError {
    /// Parser message.
    pub message: String,
    /// Line of the offending token (1-indexed).
    pub line: usize,
    /// Column of the offending token (0-indexed).
    pub column: usize,
}

impl InputSyntaxError {
    /// Creates a new syntax error.
    #[must_use]
    pub fn new(message: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            message: message.into(),
            line,
            column,
        }
    }
}

/// Turns source text into a [`ParsedSource`].
pub trait SourceParser: Send + Sync {
    /// Parses `text`.
    ///
    /// # Errors
    ///
    /// Returns [`InputSyntaxError`] when `text` is not valid source.
    fn parse(&self, text: &str) -> Result<ParsedSource, InputSyntaxError>;
}
