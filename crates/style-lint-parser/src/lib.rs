//! # style-lint-parser
//!
//! ES5 lexer and parser for style-lint.
//!
//! The lexer is generated with `logos`; the parser is hand-written recursive
//! descent. The output is the [`ParsedSource`] model consumed by
//! `style-lint-core`: an arena tree in ESTree shape, the token list and the
//! comment list.
//!
//! ## Example
//!
//! ```ignore
//! use style_lint_core::{SourceFile, SourceParser};
//! use style_lint_parser::JsParser;
//!
//! let text = "var a = 1;";
//! let file = SourceFile::new(text, JsParser.parse(text)?);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod lexer;
mod parser;

pub use error::ParseError;
pub use lexer::is_keyword;

use style_lint_core::{InputSyntaxError, ParsedSource, SourceParser};
use tracing::trace;

/// Parses `text` as an ES5 program.
///
/// # Errors
///
/// Returns [`ParseError`] for the first lexical or syntax error.
pub fn parse(text: &str) -> Result<ParsedSource, ParseError> {
    let parsed = parser::Parser::new(text)?.parse_program()?;
    trace!(
        nodes = parsed.tree.len(),
        tokens = parsed.tokens.len(),
        comments = parsed.comments.len(),
        "parsed input"
    );
    Ok(parsed)
}

/// [`SourceParser`] for ES5 source.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsParser;

impl SourceParser for JsParser {
    fn parse(&self, text: &str) -> Result<ParsedSource, InputSyntaxError> {
        parse(text).map_err(Into::into)
    }
}
