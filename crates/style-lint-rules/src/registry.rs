//! Closed registry of the built-in rules.
//!
//! Every rule has a [`RuleKind`] variant. The option-name lookup table is
//! built once on first use.

use crate::binary_operators::{self, OperatorSpacing, Side};
use crate::block_statements::{
    self, DisallowNewlineBeforeBlockStatements, RequireSpaceBeforeBlockStatements,
};
use crate::curly_braces::{self, RequireCurlyBraces};
use crate::keywords::{self, RequireSpaceAfterKeywords};
use crate::parentheses::{self, DisallowSpacesInsideParentheses};
use crate::quote_marks::{self, ValidateQuoteMarks};
use crate::validate_indentation::{self, ValidateIndentation};
use crate::var_declarations::{self, DisallowMultipleVarDecl, RequireMultipleVarDecl};
use crate::whitespace::{self, DisallowMultipleLineBreaks, DisallowTrailingWhitespace};
use once_cell::sync::Lazy;
use serde_json::{json, Value};
use std::collections::HashMap;
use style_lint_core::{ConfigurationError, RuleBox, RuleDefinition, RuleDefinitionBox};

/// Every built-in rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleKind {
    /// `requireSpaceBeforeBlockStatements`
    RequireSpaceBeforeBlockStatements,
    /// `disallowNewlineBeforeBlockStatements`
    DisallowNewlineBeforeBlockStatements,
    /// `requireSpaceBeforeBinaryOperators`
    RequireSpaceBeforeBinaryOperators,
    /// `requireSpaceAfterBinaryOperators`
    RequireSpaceAfterBinaryOperators,
    /// `disallowSpaceBeforeBinaryOperators`
    DisallowSpaceBeforeBinaryOperators,
    /// `disallowSpaceAfterBinaryOperators`
    DisallowSpaceAfterBinaryOperators,
    /// `disallowMultipleVarDecl`
    DisallowMultipleVarDecl,
    /// `requireMultipleVarDecl`
    RequireMultipleVarDecl,
    /// `validateQuoteMarks`
    ValidateQuoteMarks,
    /// `requireCurlyBraces`
    RequireCurlyBraces,
    /// `requireSpaceAfterKeywords`
    RequireSpaceAfterKeywords,
    /// `disallowSpacesInsideParentheses`
    DisallowSpacesInsideParentheses,
    /// `disallowTrailingWhitespace`
    DisallowTrailingWhitespace,
    /// `disallowMultipleLineBreaks`
    DisallowMultipleLineBreaks,
    /// `validateIndentation`
    ValidateIndentation,
}

static BY_OPTION_NAME: Lazy<HashMap<&'static str, RuleKind>> = Lazy::new(|| {
    RuleKind::ALL
        .iter()
        .map(|kind| (kind.option_name(), *kind))
        .collect()
});

impl RuleKind {
    /// Every rule, in registration order.
    pub const ALL: &'static [RuleKind] = &[
        Self::RequireSpaceBeforeBlockStatements,
        Self::DisallowNewlineBeforeBlockStatements,
        Self::RequireSpaceBeforeBinaryOperators,
        Self::RequireSpaceAfterBinaryOperators,
        Self::DisallowSpaceBeforeBinaryOperators,
        Self::DisallowSpaceAfterBinaryOperators,
        Self::DisallowMultipleVarDecl,
        Self::RequireMultipleVarDecl,
        Self::ValidateQuoteMarks,
        Self::RequireCurlyBraces,
        Self::RequireSpaceAfterKeywords,
        Self::DisallowSpacesInsideParentheses,
        Self::DisallowTrailingWhitespace,
        Self::DisallowMultipleLineBreaks,
        Self::ValidateIndentation,
    ];

    /// Looks a rule up by its configuration key.
    #[must_use]
    pub fn from_option_name(name: &str) -> Option<Self> {
        BY_OPTION_NAME.get(name).copied()
    }

    /// Configuration key of the rule.
    #[must_use]
    pub fn option_name(self) -> &'static str {
        match self {
            Self::RequireSpaceBeforeBlockStatements => block_statements::REQUIRE_SPACE,
            Self::DisallowNewlineBeforeBlockStatements => block_statements::DISALLOW_NEWLINE,
            Self::RequireSpaceBeforeBinaryOperators => binary_operators::REQUIRE_BEFORE,
            Self::RequireSpaceAfterBinaryOperators => binary_operators::REQUIRE_AFTER,
            Self::DisallowSpaceBeforeBinaryOperators => binary_operators::DISALLOW_BEFORE,
            Self::DisallowSpaceAfterBinaryOperators => binary_operators::DISALLOW_AFTER,
            Self::DisallowMultipleVarDecl => var_declarations::DISALLOW_MULTIPLE,
            Self::RequireMultipleVarDecl => var_declarations::REQUIRE_MULTIPLE,
            Self::ValidateQuoteMarks => quote_marks::NAME,
            Self::RequireCurlyBraces => curly_braces::NAME,
            Self::RequireSpaceAfterKeywords => keywords::NAME,
            Self::DisallowSpacesInsideParentheses => parentheses::NAME,
            Self::DisallowTrailingWhitespace => whitespace::TRAILING,
            Self::DisallowMultipleLineBreaks => whitespace::LINE_BREAKS,
            Self::ValidateIndentation => validate_indentation::NAME,
        }
    }

    /// One-line description.
    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::RequireSpaceBeforeBlockStatements => {
                "Requires a space before the opening brace of a block"
            }
            Self::DisallowNewlineBeforeBlockStatements => {
                "Requires the opening brace of a block on the line of its statement"
            }
            Self::RequireSpaceBeforeBinaryOperators => "Requires a space before binary operators",
            Self::RequireSpaceAfterBinaryOperators => "Requires a space after binary operators",
            Self::DisallowSpaceBeforeBinaryOperators => "Disallows a space before binary operators",
            Self::DisallowSpaceAfterBinaryOperators => "Disallows a space after binary operators",
            Self::DisallowMultipleVarDecl => "Disallows several variables in one var statement",
            Self::RequireMultipleVarDecl => "Requires related var statements to be merged",
            Self::ValidateQuoteMarks => "Requires one quote mark for string literals",
            Self::RequireCurlyBraces => "Requires braces around statement bodies",
            Self::RequireSpaceAfterKeywords => "Requires a space after the given keywords",
            Self::DisallowSpacesInsideParentheses => "Disallows spaces just inside parentheses",
            Self::DisallowTrailingWhitespace => "Disallows whitespace at the end of lines",
            Self::DisallowMultipleLineBreaks => "Disallows more than one blank line in a row",
            Self::ValidateIndentation => "Validates the indentation of nested code",
        }
    }

    /// Option value written by `init` and shown by `list-rules`.
    #[must_use]
    pub fn example_value(self) -> Value {
        match self {
            Self::ValidateQuoteMarks => json!("\""),
            Self::RequireCurlyBraces => json!(["if", "else", "for", "while", "do"]),
            Self::RequireSpaceAfterKeywords => {
                json!(["if", "else", "for", "while", "do", "switch", "return", "try", "catch"])
            }
            Self::ValidateIndentation => json!(4),
            _ => Value::Bool(true),
        }
    }

    /// Validates `value` and builds the configured rule.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError`] when `value` has the wrong shape.
    pub fn configure(self, value: &Value) -> Result<RuleBox, ConfigurationError> {
        let name = self.option_name();
        let rule: RuleBox = match self {
            Self::RequireSpaceBeforeBlockStatements => {
                Box::new(RequireSpaceBeforeBlockStatements::from_value(value)?)
            }
            Self::DisallowNewlineBeforeBlockStatements => {
                Box::new(DisallowNewlineBeforeBlockStatements::from_value(value)?)
            }
            Self::RequireSpaceBeforeBinaryOperators => {
                Box::new(OperatorSpacing::from_value(name, Side::Before, true, value)?)
            }
            Self::RequireSpaceAfterBinaryOperators => {
                Box::new(OperatorSpacing::from_value(name, Side::After, true, value)?)
            }
            Self::DisallowSpaceBeforeBinaryOperators => {
                Box::new(OperatorSpacing::from_value(name, Side::Before, false, value)?)
            }
            Self::DisallowSpaceAfterBinaryOperators => {
                Box::new(OperatorSpacing::from_value(name, Side::After, false, value)?)
            }
            Self::DisallowMultipleVarDecl => Box::new(DisallowMultipleVarDecl::from_value(value)?),
            Self::RequireMultipleVarDecl => Box::new(RequireMultipleVarDecl::from_value(value)?),
            Self::ValidateQuoteMarks => Box::new(ValidateQuoteMarks::from_value(value)?),
            Self::RequireCurlyBraces => Box::new(RequireCurlyBraces::from_value(value)?),
            Self::RequireSpaceAfterKeywords => {
                Box::new(RequireSpaceAfterKeywords::from_value(value)?)
            }
            Self::DisallowSpacesInsideParentheses => {
                Box::new(DisallowSpacesInsideParentheses::from_value(value)?)
            }
            Self::DisallowTrailingWhitespace => {
                Box::new(DisallowTrailingWhitespace::from_value(value)?)
            }
            Self::DisallowMultipleLineBreaks => {
                Box::new(DisallowMultipleLineBreaks::from_value(value)?)
            }
            Self::ValidateIndentation => Box::new(ValidateIndentation::from_value(value)?),
        };
        Ok(rule)
    }
}

impl RuleDefinition for RuleKind {
    fn option_name(&self) -> &'static str {
        RuleKind::option_name(*self)
    }

    fn description(&self) -> &'static str {
        RuleKind::description(*self)
    }

    fn example_value(&self) -> Value {
        RuleKind::example_value(*self)
    }

    fn configure(&self, value: &Value) -> Result<RuleBox, ConfigurationError> {
        RuleKind::configure(*self, value)
    }
}

/// Registry entries for every built-in rule, in registration order.
#[must_use]
pub fn all_definitions() -> Vec<RuleDefinitionBox> {
    RuleKind::ALL
        .iter()
        .map(|kind| Box::new(*kind) as RuleDefinitionBox)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use style_lint_core::Rule;

    #[test]
    fn test_option_names_are_unique_and_resolvable() {
        let names: HashSet<&str> = RuleKind::ALL.iter().map(|k| k.option_name()).collect();
        assert_eq!(names.len(), RuleKind::ALL.len());
        for kind in RuleKind::ALL {
            assert_eq!(RuleKind::from_option_name(kind.option_name()), Some(*kind));
        }
        assert_eq!(RuleKind::from_option_name("totallyBogusRule"), None);
    }

    #[test]
    fn test_example_values_configure() {
        for kind in RuleKind::ALL {
            let rule = kind.configure(&kind.example_value()).unwrap();
            assert_eq!(rule.option_name(), kind.option_name());
        }
    }

    #[test]
    fn test_descriptions_present() {
        assert!(RuleKind::ALL.iter().all(|k| !k.description().is_empty()));
    }

    #[test]
    fn test_boolean_rule_rejects_string() {
        let err = RuleKind::DisallowMultipleVarDecl
            .configure(&Value::String("yes".into()))
            .err()
            .unwrap();
        assert_eq!(err.option, "disallowMultipleVarDecl");
    }

    #[test]
    fn test_all_definitions_in_registration_order() {
        let names: Vec<&str> = all_definitions().iter().map(|d| d.option_name()).collect();
        let expected: Vec<&str> = RuleKind::ALL.iter().map(|k| k.option_name()).collect();
        assert_eq!(names, expected);
    }
}
