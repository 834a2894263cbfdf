//! Rules about the opening brace of block statements.
//!
//! Blocks that are statements of their own (a bare `{ ... }` in a body)
//! have no preceding construct and are skipped.

use serde_json::Value;
use style_lint_core::{
    expect_true, ConfigurationError, NodeId, NodeKind, Rule, RuleDiagnostics, SourceFile, Token,
};

/// Rule name for require-space-before-block-statements.
pub const REQUIRE_SPACE: &str = "requireSpaceBeforeBlockStatements";

/// Rule name for disallow-newline-before-block-statements.
pub const DISALLOW_NEWLINE: &str = "disallowNewlineBeforeBlockStatements";

/// Requires whitespace between the preceding token and a block's `{`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequireSpaceBeforeBlockStatements;

impl RequireSpaceBeforeBlockStatements {
    /// Parses the option value.
    ///
    /// # Errors
    ///
    /// Fails unless `value` is `true`.
    pub fn from_value(value: &Value) -> Result<Self, ConfigurationError> {
        expect_true(REQUIRE_SPACE, value)?;
        Ok(Self)
    }
}

impl Rule for RequireSpaceBeforeBlockStatements {
    fn option_name(&self) -> &'static str {
        REQUIRE_SPACE
    }

    fn check(&self, file: &SourceFile, diagnostics: &mut RuleDiagnostics<'_>) {
        for (brace, previous) in braces_with_previous(file) {
            if previous.span.end == brace.span.start {
                diagnostics.add_at(
                    "Missing space before opening curly brace for block expressions",
                    brace.loc.start,
                );
            }
        }
    }
}

/// Requires a block's `{` on the same line as the preceding token.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisallowNewlineBeforeBlockStatements;

impl DisallowNewlineBeforeBlockStatements {
    /// Parses the option value.
    ///
    /// # Errors
    ///
    /// Fails unless `value` is `true`.
    pub fn from_value(value: &Value) -> Result<Self, ConfigurationError> {
        expect_true(DISALLOW_NEWLINE, value)?;
        Ok(Self)
    }
}

impl Rule for DisallowNewlineBeforeBlockStatements {
    fn option_name(&self) -> &'static str {
        DISALLOW_NEWLINE
    }

    fn check(&self, file: &SourceFile, diagnostics: &mut RuleDiagnostics<'_>) {
        for (brace, previous) in braces_with_previous(file) {
            if previous.loc.end.line != brace.loc.start.line {
                diagnostics.add_at(
                    "Newline before curly brace for block statement is disallowed",
                    brace.loc.start,
                );
            }
        }
    }
}

/// Opening braces of non-standalone blocks with the token before each.
fn braces_with_previous(file: &SourceFile) -> Vec<(&Token, &Token)> {
    file.nodes_by_type(NodeKind::BlockStatement)
        .iter()
        .filter(|id| !is_standalone(file, **id))
        .filter_map(|id| {
            let position = file.first_token_position(*id)?;
            Some((file.token(position)?, file.prev_token(position)?))
        })
        .collect()
}

fn is_standalone(file: &SourceFile, id: NodeId) -> bool {
    file.parent(id).is_some_and(|parent| {
        matches!(
            file.node(parent).kind,
            NodeKind::Program | NodeKind::BlockStatement | NodeKind::SwitchCase
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::run;
    use serde_json::json;

    #[test]
    fn test_require_space_reports_sticking_brace() {
        let diagnostics = run(&RequireSpaceBeforeBlockStatements, "if(a){\n  b();\n}\n");
        assert_eq!(diagnostics.len(), 1);
        assert_eq!((diagnostics[0].line, diagnostics[0].column), (1, 5));
    }

    #[test]
    fn test_require_space_accepts_spaced_braces() {
        let text = "if (a) {\n} else {\n}\nfunction f() {}\ntry {} catch (e) {} finally {}\n";
        assert!(run(&RequireSpaceBeforeBlockStatements, text).is_empty());
    }

    #[test]
    fn test_require_space_covers_function_bodies_and_else() {
        let diagnostics = run(
            &RequireSpaceBeforeBlockStatements,
            "var f = function(){};\nif (a) {} else{}\n",
        );
        let lines: Vec<usize> = diagnostics.iter().map(|d| d.line).collect();
        assert_eq!(lines, vec![1, 2]);
    }

    #[test]
    fn test_standalone_blocks_are_skipped() {
        assert!(run(&RequireSpaceBeforeBlockStatements, "a();{b();}").is_empty());
        assert!(run(&DisallowNewlineBeforeBlockStatements, "a();\n{\n  b();\n}").is_empty());
    }

    #[test]
    fn test_disallow_newline() {
        let text = "if (a)\n{\n  b();\n}\nwhile (b) {\n}\n";
        let diagnostics = run(&DisallowNewlineBeforeBlockStatements, text);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!((diagnostics[0].line, diagnostics[0].column), (2, 0));
    }

    #[test]
    fn test_options() {
        assert!(RequireSpaceBeforeBlockStatements::from_value(&json!(true)).is_ok());
        assert!(RequireSpaceBeforeBlockStatements::from_value(&json!("yes")).is_err());
        assert!(DisallowNewlineBeforeBlockStatements::from_value(&json!(false)).is_err());
    }
}
