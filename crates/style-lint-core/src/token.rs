//! Tokens and comments produced by the parser.

use crate::location::{SourceLocation, Span};
use serde::{Deserialize, Serialize};

/// Lexical category of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    /// Operators and delimiters such as `{`, `+=` or `;`.
    Punctuator,
    /// Reserved words such as `if` or `function`.
    Keyword,
    /// Names.
    Identifier,
    /// Numeric literals.
    Numeric,
    /// String literals, including their quotes.
    String,
    /// Regular expression literals.
    RegularExpression,
    /// `true` and `false`.
    Boolean,
    /// `null`.
    Null,
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Punctuator => "Punctuator",
            Self::Keyword => "Keyword",
            Self::Identifier => "Identifier",
            Self::Numeric => "Numeric",
            Self::String => "String",
            Self::RegularExpression => "RegularExpression",
            Self::Boolean => "Boolean",
            Self::Null => "Null",
        };
        f.write_str(name)
    }
}

/// A lexical token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Token category.
    pub kind: TokenKind,
    /// Source text of the token.
    pub value: String,
    /// Byte range.
    pub span: Span,
    /// Line/column range.
    pub loc: SourceLocation,
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub fn new(kind: TokenKind, value: impl Into<String>, span: Span, loc: SourceLocation) -> Self {
        Self {
            kind,
            value: value.into(),
            span,
            loc,
        }
    }

    /// Returns true if this is a punctuator with the given text.
    #[must_use]
    pub fn is_punctuator(&self, value: &str) -> bool {
        self.kind == TokenKind::Punctuator && self.value == value
    }

    /// Returns true if this is a keyword with the given text.
    #[must_use]
    pub fn is_keyword(&self, value: &str) -> bool {
        self.kind == TokenKind::Keyword && self.value == value
    }
}

/// Comment flavour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CommentKind {
    /// `// ...`
    Line,
    /// `/* ... */`
    Block,
}

/// A source comment. Comments never appear in the token stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    /// Comment flavour.
    pub kind: CommentKind,
    /// Comment text without the delimiters.
    pub value: String,
    /// Byte range including delimiters.
    pub span: Span,
    /// Line/column range including delimiters.
    pub loc: SourceLocation,
}

impl Comment {
    /// Creates a new comment.
    #[must_use]
    pub fn new(
        kind: CommentKind,
        value: impl Into<String>,
        span: Span,
        loc: SourceLocation,
    ) -> Self {
        Self {
            kind,
            value: value.into(),
            span,
            loc,
        }
    }
}
