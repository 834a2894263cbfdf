//! Rule enforcing one quote mark for string literals.
//!
//! # Configuration
//!
//! - `"\""` or `"'"`: every string uses that mark
//! - `true`: every string uses the mark of the first string in the file
//! - `{ "mark": "\"" | "'" | true, "escape": true }`: as above, but a string
//!   containing the preferred mark may use the other one to avoid escapes

use serde_json::Value;
use style_lint_core::{ConfigurationError, Rule, RuleDiagnostics, SourceFile, TokenKind};

/// Rule name for validate-quote-marks.
pub const NAME: &str = "validateQuoteMarks";

/// Which mark is required.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteMark {
    /// `"`
    Double,
    /// `'`
    Single,
    /// Whatever the first string literal uses.
    Consistent,
}

impl QuoteMark {
    fn parse(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) if s == "\"" => Some(Self::Double),
            Value::String(s) if s == "'" => Some(Self::Single),
            Value::Bool(true) => Some(Self::Consistent),
            _ => None,
        }
    }
}

/// Requires string literals to use one quote mark.
#[derive(Debug, Clone, Copy)]
pub struct ValidateQuoteMarks {
    mark: QuoteMark,
    escape: bool,
}

impl ValidateQuoteMarks {
    /// Creates the rule.
    #[must_use]
    pub fn new(mark: QuoteMark, escape: bool) -> Self {
        Self { mark, escape }
    }

    /// Parses the option value.
    ///
    /// # Errors
    ///
    /// Fails on values other than the documented shapes.
    pub fn from_value(value: &Value) -> Result<Self, ConfigurationError> {
        let error = || {
            ConfigurationError::new(
                NAME,
                "\"\\\"\", \"'\", true or an object with `mark` and `escape`",
            )
        };
        if let Value::Object(options) = value {
            let mark = options.get("mark").and_then(QuoteMark::parse).ok_or_else(error)?;
            let escape = match options.get("escape") {
                None => false,
                Some(Value::Bool(escape)) => *escape,
                Some(_) => return Err(error()),
            };
            return Ok(Self::new(mark, escape));
        }
        QuoteMark::parse(value)
            .map(|mark| Self::new(mark, false))
            .ok_or_else(error)
    }
}

impl Rule for ValidateQuoteMarks {
    fn option_name(&self) -> &'static str {
        NAME
    }

    fn check(&self, file: &SourceFile, diagnostics: &mut RuleDiagnostics<'_>) {
        let mut strings = file
            .tokens()
            .iter()
            .filter(|t| t.kind == TokenKind::String)
            .peekable();

        let expected = match self.mark {
            QuoteMark::Double => '"',
            QuoteMark::Single => '\'',
            QuoteMark::Consistent => match strings.peek().and_then(|t| t.value.chars().next()) {
                Some(mark) => mark,
                None => return,
            },
        };

        for token in strings {
            let Some(mark) = token.value.chars().next() else {
                continue;
            };
            if mark == expected {
                continue;
            }
            if self.escape && token.value.contains(expected) {
                continue;
            }
            diagnostics.add_at("Invalid quote mark found", token.loc.start);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::run;
    use serde_json::json;

    #[test]
    fn test_fixed_mark() {
        let rule = ValidateQuoteMarks::from_value(&json!("\"")).unwrap();
        let diagnostics = run(&rule, "var a = \"x\", b = 'y';");
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].column, 17);
        assert_eq!(diagnostics[0].message, "Invalid quote mark found");
    }

    #[test]
    fn test_consistent_mark_follows_first_string() {
        let rule = ValidateQuoteMarks::from_value(&json!(true)).unwrap();
        let diagnostics = run(&rule, "a('x');\nb(\"y\");\nc('z');\n");
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].line, 2);
        assert!(run(&rule, "a();").is_empty());
    }

    #[test]
    fn test_escape_allows_other_mark() {
        let rule = ValidateQuoteMarks::from_value(&json!({"mark": "'", "escape": true})).unwrap();
        assert!(run(&rule, "a(\"it's\");").is_empty());
        assert_eq!(run(&rule, "a(\"its\");").len(), 1);
    }

    #[test]
    fn test_options() {
        assert!(ValidateQuoteMarks::from_value(&json!("`")).is_err());
        assert!(ValidateQuoteMarks::from_value(&json!(false)).is_err());
        assert!(ValidateQuoteMarks::from_value(&json!({"escape": true})).is_err());
        assert!(ValidateQuoteMarks::from_value(&json!({"mark": "'", "escape": 1})).is_err());
    }
}
