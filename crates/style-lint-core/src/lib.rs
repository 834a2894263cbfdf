//! # style-lint-core
//!
//! Core engine for style checking of ES5 source files.
//!
//! This crate consumes the output of a parser (behind [`SourceParser`]) and
//! provides:
//!
//! - [`SourceFile`], the source model with a node-type index, parent table
//!   and lazily built token offset indices
//! - [`walker`], the pruning tree walker over a fixed set of child fields
//! - [`token_helpers`] for resolving adjacent tokens across grouping parentheses
//! - [`Diagnostics`] with stable ordering and contextual rendering
//! - [`Rule`] / [`RuleDefinition`] traits and the [`Checker`] rule engine
//!
//! ## Example
//!
//! ```ignore
//! use style_lint_core::{Checker, Config};
//!
//! let mut checker = Checker::builder()
//!     .parser(MyParser)
//!     .rules(my_rule_definitions())
//!     .build()?;
//!
//! checker.configure(&Config::parse_json(r#"{"validateIndentation": 2}"#)?)?;
//! let diagnostics = checker.check_string("if (a) {\nb();\n}\n", "input.js")?;
//! for diagnostic in diagnostics.list() {
//!     println!("{}", diagnostics.render(diagnostic, false));
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod checker;
mod config;
mod diagnostics;
mod lines;
mod location;
mod parse;
mod rule;
mod source;
mod suppression;
mod token;
mod tree;

/// Token adjacency queries.
pub mod token_helpers;
/// Pruning tree walker.
pub mod walker;

pub use checker::{Checker, CheckerBuilder};
pub use config::{
    Config, ConfigError, UnsupportedOptionError, EXCLUDE_FILES_KEY, FILE_EXTENSIONS_KEY,
    MAX_ERRORS_KEY,
};
pub use diagnostics::{Diagnostic, Diagnostics, RuleDiagnostics, StyleReport};
pub use lines::StrippedLines;
pub use location::{split_lines, LineIndex, Position, SourceLocation, Span};
pub use parse::{InputSyntaxError, ParsedSource, SourceParser};
pub use rule::{
    expect_string_array, expect_true, expect_true_or_subset, ConfigurationError, Rule, RuleBox,
    RuleDefinition, RuleDefinitionBox,
};
pub use source::SourceFile;
pub use suppression::{SuppressionDirective, Suppressions};
pub use token::{Comment, CommentKind, Token, TokenKind};
pub use tree::{
    Child, Field, Node, NodeId, NodeKind, NodeLimitExceeded, PropertyKind, SyntaxTree,
    UnknownNodeKind,
};
pub use walker::{ParentLink, Walk};
