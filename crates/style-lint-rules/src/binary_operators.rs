//! Spacing around binary, logical and assignment operators.
//!
//! Four rules share one implementation: whitespace is either required or
//! disallowed, before or after the operator. Operands are resolved through
//! grouping parentheses, so `(a)+(b)` and `a+b` are judged alike.
//!
//! # Configuration
//!
//! `true` for every operator, or an array of operators to check.

use serde_json::Value;
use style_lint_core::token_helpers::{adjacent_token, find_punctuator_from};
use style_lint_core::{
    expect_true_or_subset, ConfigurationError, Field, Node, NodeKind, Rule, RuleDiagnostics,
    SourceFile,
};

/// Rule name for require-space-before-binary-operators.
pub const REQUIRE_BEFORE: &str = "requireSpaceBeforeBinaryOperators";
/// Rule name for require-space-after-binary-operators.
pub const REQUIRE_AFTER: &str = "requireSpaceAfterBinaryOperators";
/// Rule name for disallow-space-before-binary-operators.
pub const DISALLOW_BEFORE: &str = "disallowSpaceBeforeBinaryOperators";
/// Rule name for disallow-space-after-binary-operators.
pub const DISALLOW_AFTER: &str = "disallowSpaceAfterBinaryOperators";

/// Operators the rules understand.
pub const OPERATORS: &[&str] = &[
    "=", "+=", "-=", "*=", "/=", "%=", "<<=", ">>=", ">>>=", "&=", "|=", "^=", "+", "-", "*",
    "/", "%", "<<", ">>", ">>>", "&", "|", "^", "&&", "||", "===", "==", "!==", "!=", "<", ">",
    "<=", ">=",
];

/// Side of the operator being checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// Between the left operand and the operator.
    Before,
    /// Between the operator and the right operand.
    After,
}

/// Whitespace requirement around operators.
#[derive(Debug, Clone)]
pub struct OperatorSpacing {
    name: &'static str,
    side: Side,
    require_space: bool,
    operators: Vec<String>,
}

impl OperatorSpacing {
    /// Creates a rule checking `operators`.
    #[must_use]
    pub fn new(name: &'static str, side: Side, require_space: bool, operators: Vec<String>) -> Self {
        Self {
            name,
            side,
            require_space,
            operators,
        }
    }

    /// Parses the option value for the rule called `name`.
    ///
    /// # Errors
    ///
    /// Fails unless `value` is `true` or an array of known operators.
    pub fn from_value(
        name: &'static str,
        side: Side,
        require_space: bool,
        value: &Value,
    ) -> Result<Self, ConfigurationError> {
        let operators = expect_true_or_subset(name, value, OPERATORS, OPERATORS)?;
        Ok(Self::new(name, side, require_space, operators))
    }

    fn check_node(&self, file: &SourceFile, node: &Node, diagnostics: &mut RuleDiagnostics<'_>) {
        let Some(operator) = node.operator.as_deref() else {
            return;
        };
        if !self.operators.iter().any(|o| o == operator) {
            return;
        }
        let (Some(left), Some(right)) = (node.child(Field::Left), node.child(Field::Right)) else {
            return;
        };
        let left_end = file.node(left).span.end;
        let right_start = file.node(right).span.start;

        let sticks = match self.side {
            Side::Before => adjacent_token(file, left_end, false).is_some(),
            Side::After => adjacent_token(file, right_start, true).is_some(),
        };
        if sticks != self.require_space {
            return;
        }

        // The right operand may itself start with the operator text (`a - -b`),
        // so the backward scan starts before it.
        let operator_token = match self.side {
            Side::Before => find_punctuator_from(file, left_end, operator, false),
            Side::After => {
                find_punctuator_from(file, right_start.saturating_sub(1), operator, true)
            }
        };
        let position = operator_token.map_or(node.loc.start, |t| t.loc.start);
        diagnostics.add_at(self.message(operator), position);
    }

    fn message(&self, operator: &str) -> String {
        let relation = match (self.require_space, self.side) {
            (true, Side::Before) => "should not stick to preceding expression",
            (true, Side::After) => "should not stick to following expression",
            (false, Side::Before) => "should stick to preceding expression",
            (false, Side::After) => "should stick to following expression",
        };
        format!("Operator {operator} {relation}")
    }
}

impl Rule for OperatorSpacing {
    fn option_name(&self) -> &'static str {
        self.name
    }

    fn check(&self, file: &SourceFile, diagnostics: &mut RuleDiagnostics<'_>) {
        let kinds = [
            NodeKind::BinaryExpression,
            NodeKind::LogicalExpression,
            NodeKind::AssignmentExpression,
        ];
        for id in file.nodes_by_types(&kinds) {
            self.check_node(file, file.node(id), diagnostics);
        }
    }
}
