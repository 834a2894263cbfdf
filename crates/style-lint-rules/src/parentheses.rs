//! Rule forbidding whitespace just inside round brackets.

use serde_json::Value;
use style_lint_core::{expect_true, ConfigurationError, Rule, RuleDiagnostics, SourceFile};

/// Rule name for disallow-spaces-inside-parentheses.
pub const NAME: &str = "disallowSpacesInsideParentheses";

/// Forbids whitespace after `(` and before `)` on the same line.
///
/// Empty parentheses with a space, `( )`, are reported once.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisallowSpacesInsideParentheses;

impl DisallowSpacesInsideParentheses {
    /// Parses the option value.
    ///
    /// # Errors
    ///
    /// Fails unless `value` is `true`.
    pub fn from_value(value: &Value) -> Result<Self, ConfigurationError> {
        expect_true(NAME, value)?;
        Ok(Self)
    }
}

impl Rule for DisallowSpacesInsideParentheses {
    fn option_name(&self) -> &'static str {
        NAME
    }

    fn check(&self, file: &SourceFile, diagnostics: &mut RuleDiagnostics<'_>) {
        let tokens = file.tokens();
        for pair in tokens.windows(2) {
            let [left, right] = pair else {
                continue;
            };
            let separated = left.span.end != right.span.start;
            let same_line = left.loc.end.line == right.loc.start.line;
            if !separated || !same_line {
                continue;
            }
            if left.is_punctuator("(") {
                diagnostics.add_at("Illegal space after opening round bracket", left.loc.end);
            } else if right.is_punctuator(")") {
                diagnostics.add_at("Illegal space before closing round bracket", left.loc.end);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::run;
    use serde_json::json;

    #[test]
    fn test_reports_both_sides() {
        let diagnostics = run(&DisallowSpacesInsideParentheses, "foo( a, b );");
        let found: Vec<(usize, &str)> = diagnostics
            .iter()
            .map(|d| (d.column, d.message.as_str()))
            .collect();
        assert_eq!(
            found,
            vec![
                (4, "Illegal space after opening round bracket"),
                (9, "Illegal space before closing round bracket"),
            ]
        );
    }

    #[test]
    fn test_accepts_tight_and_multiline_parentheses() {
        let text = "foo(a, b);\nif ((a)) {}\nbar(\n  a\n);\n";
        assert!(run(&DisallowSpacesInsideParentheses, text).is_empty());
    }

    #[test]
    fn test_empty_parentheses_reported_once() {
        assert_eq!(run(&DisallowSpacesInsideParentheses, "foo( );").len(), 1);
    }

    #[test]
    fn test_options() {
        assert!(DisallowSpacesInsideParentheses::from_value(&json!(true)).is_ok());
        assert!(DisallowSpacesInsideParentheses::from_value(&json!(null)).is_err());
    }
}
