//! # style-lint-rules
//!
//! Built-in style rules for style-lint.
//!
//! Rules form a closed registry: [`RuleKind`] has one variant per rule, and
//! [`all_definitions`] hands the registry to a [`style_lint_core::Checker`].
//!
//! ## Available Rules
//!
//! | Option | Value | Description |
//! |--------|-------|-------------|
//! | `requireSpaceBeforeBlockStatements` | `true` | Space before a block's `{` |
//! | `disallowNewlineBeforeBlockStatements` | `true` | Block `{` on the statement's line |
//! | `requireSpaceBeforeBinaryOperators` | `true` \| operators | Space before operators |
//! | `requireSpaceAfterBinaryOperators` | `true` \| operators | Space after operators |
//! | `disallowSpaceBeforeBinaryOperators` | `true` \| operators | No space before operators |
//! | `disallowSpaceAfterBinaryOperators` | `true` \| operators | No space after operators |
//! | `disallowMultipleVarDecl` | `true` | One variable per `var` |
//! | `requireMultipleVarDecl` | `true` \| `"onevar"` | Merged `var` statements |
//! | `validateQuoteMarks` | `"\""` \| `"'"` \| `true` \| object | One quote mark |
//! | `requireCurlyBraces` | `true` \| keywords | Braced statement bodies |
//! | `requireSpaceAfterKeywords` | keywords | Space after keywords |
//! | `disallowSpacesInsideParentheses` | `true` | No padding inside `( )` |
//! | `disallowTrailingWhitespace` | `true` | No whitespace at line ends |
//! | `disallowMultipleLineBreaks` | `true` | At most one blank line |
//! | `validateIndentation` | integer \| `"\t"` | Indentation of nested code |
//!
//! ## Usage
//!
//! ```ignore
//! use style_lint_core::{Checker, Config};
//! use style_lint_rules::all_definitions;
//!
//! let mut checker = Checker::builder()
//!     .parser(style_lint_parser::JsParser)
//!     .rules(all_definitions())
//!     .build()?;
//! checker.configure(&style_lint_rules::default_config())?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod binary_operators;
mod block_statements;
mod curly_braces;
mod defaults;
mod keywords;
mod parentheses;
mod quote_marks;
mod registry;
mod validate_indentation;
mod var_declarations;
mod whitespace;

pub use binary_operators::{OperatorSpacing, Side, OPERATORS};
pub use block_statements::{DisallowNewlineBeforeBlockStatements, RequireSpaceBeforeBlockStatements};
pub use curly_braces::RequireCurlyBraces;
pub use defaults::{default_config, starter_config};
pub use keywords::RequireSpaceAfterKeywords;
pub use parentheses::DisallowSpacesInsideParentheses;
pub use quote_marks::{QuoteMark, ValidateQuoteMarks};
pub use registry::{all_definitions, RuleKind};
pub use validate_indentation::{IndentUnit, ValidateIndentation};
pub use var_declarations::{DisallowMultipleVarDecl, RequireMultipleVarDecl, VarGrouping};
pub use whitespace::{DisallowMultipleLineBreaks, DisallowTrailingWhitespace};

/// Re-export core types for convenience.
pub use style_lint_core::{Rule, RuleDefinition};

#[cfg(test)]
mod testing {
    use style_lint_core::{Diagnostic, Diagnostics, Rule, SourceFile};

    pub(crate) fn source(text: &str) -> SourceFile {
        SourceFile::new(text, style_lint_parser::parse(text).unwrap())
    }

    /// Runs one rule over `text` and returns its sorted diagnostics.
    pub(crate) fn run(rule: &dyn Rule, text: &str) -> Vec<Diagnostic> {
        let file = source(text);
        let mut diagnostics = Diagnostics::new("input.js", text);
        {
            let mut scope = diagnostics.scope(rule.option_name());
            rule.check(&file, &mut scope);
        }
        diagnostics.finish();
        diagnostics.into_vec()
    }
}
