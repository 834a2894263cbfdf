//! Rule requiring a space after keywords.

use serde_json::Value;
use style_lint_core::{
    expect_string_array, ConfigurationError, Rule, RuleDiagnostics, SourceFile, TokenKind,
};

/// Rule name for require-space-after-keywords.
pub const NAME: &str = "requireSpaceAfterKeywords";

/// Requires whitespace after each configured keyword.
///
/// A keyword directly followed by `;` (`return;`, `break;`) is fine.
#[derive(Debug, Clone)]
pub struct RequireSpaceAfterKeywords {
    keywords: Vec<String>,
}

impl RequireSpaceAfterKeywords {
    /// Creates the rule for `keywords`.
    #[must_use]
    pub fn new(keywords: Vec<String>) -> Self {
        Self { keywords }
    }

    /// Parses the option value.
    ///
    /// # Errors
    ///
    /// Fails unless `value` is a non-empty array of strings.
    pub fn from_value(value: &Value) -> Result<Self, ConfigurationError> {
        expect_string_array(NAME, value).map(Self::new)
    }
}

impl Rule for RequireSpaceAfterKeywords {
    fn option_name(&self) -> &'static str {
        NAME
    }

    fn check(&self, file: &SourceFile, diagnostics: &mut RuleDiagnostics<'_>) {
        let tokens = file.tokens();
        for (token, next) in tokens.iter().zip(tokens.iter().skip(1)) {
            if token.kind != TokenKind::Keyword || !self.keywords.contains(&token.value) {
                continue;
            }
            if next.span.start == token.span.end && !next.is_punctuator(";") {
                diagnostics.add_at(
                    format!("Missing space after `{}` keyword", token.value),
                    token.loc.end,
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::run;
    use serde_json::json;

    fn rule() -> RequireSpaceAfterKeywords {
        RequireSpaceAfterKeywords::from_value(&json!(["if", "for", "return", "function"])).unwrap()
    }

    #[test]
    fn test_reports_sticking_keywords() {
        let diagnostics = run(&rule(), "if(a) {}\nfor(;;) {}\n");
        let positions: Vec<(usize, usize)> =
            diagnostics.iter().map(|d| (d.line, d.column)).collect();
        assert_eq!(positions, vec![(1, 2), (2, 3)]);
        assert_eq!(diagnostics[0].message, "Missing space after `if` keyword");
    }

    #[test]
    fn test_accepts_spaced_keywords_and_semicolons() {
        let text = "function f() {\n  if (a) { return; }\n  return 1;\n}\n";
        assert!(run(&rule(), text).is_empty());
    }

    #[test]
    fn test_property_names_are_not_keywords() {
        assert!(run(&rule(), "a.if(1);\nb = { for: 1 };").is_empty());
    }

    #[test]
    fn test_options() {
        assert!(RequireSpaceAfterKeywords::from_value(&json!(true)).is_err());
        assert!(RequireSpaceAfterKeywords::from_value(&json!([])).is_err());
    }
}
