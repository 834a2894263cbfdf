//! Rule traits and option-value validation.

use crate::diagnostics::RuleDiagnostics;
use crate::source::SourceFile;
use serde_json::Value;
use thiserror::Error;

/// A configured style rule.
///
/// Rule values are produced once by [`RuleDefinition::configure`] and then
/// reused for every input. `check` takes `&self`; anything a rule needs per
/// input lives on the stack of `check`.
///
/// # Example
///
/// ```ignore
/// use style_lint_core::{Rule, RuleDiagnostics, SourceFile, NodeKind};
///
/// pub struct DisallowDebugger;
///
/// impl Rule for DisallowDebugger {
///     fn option_name(&self) -> &'static str { "disallowDebugger" }
///
///     fn check(&self, file: &SourceFile, diagnostics: &mut RuleDiagnostics<'_>) {
///         for &id in file.nodes_by_type(NodeKind::DebuggerStatement) {
///             diagnostics.add_at("Debugger statement", file.loc(id).start);
///         }
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Configuration key of this rule.
    fn option_name(&self) -> &'static str;

    /// Checks one input, reporting through `diagnostics`.
    ///
    /// Node shapes the rule does not expect are not applicable and must not
    /// cause a panic.
    fn check(&self, file: &SourceFile, diagnostics: &mut RuleDiagnostics<'_>);
}

/// Type alias for boxed Rule trait objects.
pub type RuleBox = Box<dyn Rule>;

/// A registry entry that knows how to turn an option value into a [`Rule`].
pub trait RuleDefinition: Send + Sync {
    /// Configuration key this definition answers to.
    fn option_name(&self) -> &'static str;

    /// Brief description of what the rule checks.
    fn description(&self) -> &'static str {
        ""
    }

    /// Example option value, used by `init` and `list-rules`.
    fn example_value(&self) -> Value {
        Value::Bool(true)
    }

    /// Validates `value` and produces the configured rule.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError`] when the value has the wrong shape.
    fn configure(&self, value: &Value) -> Result<RuleBox, ConfigurationError>;
}

/// Type alias for boxed `RuleDefinition` trait objects.
pub type RuleDefinitionBox = Box<dyn RuleDefinition>;

/// An option value does not have the shape its rule accepts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{option} option requires {expected}")]
pub struct ConfigurationError {
    /// Option name of the rule.
    pub option: String,
    /// Human-readable description of the accepted shape.
    pub expected: String,
}

impl ConfigurationError {
    /// Creates a new configuration error.
    #[must_use]
    pub fn new(option: impl Into<String>, expected: impl Into<String>) -> Self {
        Self {
            option: option.into(),
            expected: expected.into(),
        }
    }
}

/// Accepts only `true`.
///
/// # Errors
///
/// Fails for any other value.
pub fn expect_true(option: &str, value: &Value) -> Result<(), ConfigurationError> {
    match value {
        Value::Bool(true) => Ok(()),
        _ => Err(ConfigurationError::new(option, "a true value")),
    }
}

/// Accepts a non-empty array of strings.
///
/// # Errors
///
/// Fails when `value` is not an array, is empty, or holds non-strings.
pub fn expect_string_array(option: &str, value: &Value) -> Result<Vec<String>, ConfigurationError> {
    let error = || ConfigurationError::new(option, "an array of strings");
    let items = value.as_array().filter(|a| !a.is_empty()).ok_or_else(error)?;
    items
        .iter()
        .map(|item| item.as_str().map(String::from).ok_or_else(error))
        .collect()
}

/// Accepts `true` (meaning `defaults`) or a non-empty array drawn from `allowed`.
///
/// # Errors
///
/// Fails on other shapes and on array entries outside `allowed`.
pub fn expect_true_or_subset(
    option: &str,
    value: &Value,
    allowed: &[&str],
    defaults: &[&str],
) -> Result<Vec<String>, ConfigurationError> {
    if value == &Value::Bool(true) {
        return Ok(defaults.iter().map(|s| (*s).to_string()).collect());
    }
    let expected = || {
        ConfigurationError::new(
            option,
            format!("true or an array drawn from [{}]", allowed.join(", ")),
        )
    };
    let values = expect_string_array(option, value).map_err(|_| expected())?;
    if values.iter().all(|v| allowed.contains(&v.as_str())) {
        Ok(values)
    } else {
        Err(expected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct NeverReports;

    impl Rule for NeverReports {
        fn option_name(&self) -> &'static str {
            "neverReports"
        }

        fn check(&self, _file: &SourceFile, _diagnostics: &mut RuleDiagnostics<'_>) {}
    }

    struct NeverReportsDefinition;

    impl RuleDefinition for NeverReportsDefinition {
        fn option_name(&self) -> &'static str {
            "neverReports"
        }

        fn configure(&self, value: &Value) -> Result<RuleBox, ConfigurationError> {
            expect_true(self.option_name(), value)?;
            Ok(Box::new(NeverReports))
        }
    }

    #[test]
    fn definition_configures_rule() {
        let rule = NeverReportsDefinition.configure(&json!(true)).unwrap();
        assert_eq!(rule.option_name(), "neverReports");
        assert_eq!(NeverReportsDefinition.example_value(), json!(true));
    }

    #[test]
    fn boolean_rule_rejects_string() {
        let err = NeverReportsDefinition.configure(&json!("yes")).err().unwrap();
        assert_eq!(err.option, "neverReports");
        assert_eq!(err.to_string(), "neverReports option requires a true value");
    }

    #[test]
    fn string_array_validation() {
        assert_eq!(
            expect_string_array("o", &json!(["if", "else"])).unwrap(),
            vec!["if", "else"]
        );
        assert!(expect_string_array("o", &json!([])).is_err());
        assert!(expect_string_array("o", &json!(["if", 1])).is_err());
        assert!(expect_string_array("o", &json!("if")).is_err());
    }

    #[test]
    fn subset_validation() {
        let allowed = ["+", "-", "*"];
        assert_eq!(
            expect_true_or_subset("o", &json!(true), &allowed, &["+"]).unwrap(),
            vec!["+"]
        );
        assert_eq!(
            expect_true_or_subset("o", &json!(["*"]), &allowed, &["+"]).unwrap(),
            vec!["*"]
        );
        let err = expect_true_or_subset("o", &json!(["%"]), &allowed, &["+"]).unwrap_err();
        assert!(err.expected.contains("+, -, *"));
    }
}
