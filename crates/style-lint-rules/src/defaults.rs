//! Built-in configurations.

use crate::binary_operators::{REQUIRE_AFTER, REQUIRE_BEFORE};
use crate::block_statements::REQUIRE_SPACE;
use crate::registry::RuleKind;
use crate::validate_indentation;
use crate::whitespace::{LINE_BREAKS, TRAILING};
use serde_json::{json, Value};
use style_lint_core::Config;

/// Configuration used when no config file is found.
///
/// Includes:
/// - `validateIndentation`: 4 spaces
/// - `requireSpaceBeforeBlockStatements`
/// - `requireSpaceBeforeBinaryOperators` / `requireSpaceAfterBinaryOperators`
/// - `disallowTrailingWhitespace`
/// - `disallowMultipleLineBreaks`
#[must_use]
pub fn default_config() -> Config {
    Config::new()
        .with_rule(validate_indentation::NAME, json!(4))
        .with_rule(REQUIRE_SPACE, Value::Bool(true))
        .with_rule(REQUIRE_BEFORE, Value::Bool(true))
        .with_rule(REQUIRE_AFTER, Value::Bool(true))
        .with_rule(TRAILING, Value::Bool(true))
        .with_rule(LINE_BREAKS, Value::Bool(true))
}

/// Every rule with its example value, minus rules that contradict another.
///
/// Of each `require`/`disallow` pair only the `require` side is kept, and
/// `requireMultipleVarDecl` is left out in favour of `disallowMultipleVarDecl`.
#[must_use]
pub fn starter_config() -> Config {
    let excluded = [
        RuleKind::DisallowSpaceBeforeBinaryOperators,
        RuleKind::DisallowSpaceAfterBinaryOperators,
        RuleKind::RequireMultipleVarDecl,
    ];
    RuleKind::ALL
        .iter()
        .filter(|kind| !excluded.contains(*kind))
        .fold(Config::new(), |config, kind| {
            config.with_rule(kind.option_name(), kind.example_value())
        })
}
