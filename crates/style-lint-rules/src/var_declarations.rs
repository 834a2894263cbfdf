//! Rules about grouping `var` declarations.

use serde_json::Value;
use style_lint_core::{
    expect_true, ConfigurationError, Field, NodeId, NodeKind, Rule, RuleDiagnostics, SourceFile,
    Walk,
};

/// Rule name for disallow-multiple-var-decl.
pub const DISALLOW_MULTIPLE: &str = "disallowMultipleVarDecl";

/// Rule name for require-multiple-var-decl.
pub const REQUIRE_MULTIPLE: &str = "requireMultipleVarDecl";

/// Forbids declaring several variables in one `var` statement.
///
/// `for (var i = 0, n = a.length; ...)` is allowed.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisallowMultipleVarDecl;

impl DisallowMultipleVarDecl {
    /// Parses the option value.
    ///
    /// # Errors
    ///
    /// Fails unless `value` is `true`.
    pub fn from_value(value: &Value) -> Result<Self, ConfigurationError> {
        expect_true(DISALLOW_MULTIPLE, value)?;
        Ok(Self)
    }
}

impl Rule for DisallowMultipleVarDecl {
    fn option_name(&self) -> &'static str {
        DISALLOW_MULTIPLE
    }

    fn check(&self, file: &SourceFile, diagnostics: &mut RuleDiagnostics<'_>) {
        for &id in file.nodes_by_type(NodeKind::VariableDeclaration) {
            let node = file.node(id);
            if node.list(Field::Declarations).len() < 2 || is_for_init(file, id) {
                continue;
            }
            diagnostics.add_at("Multiple var declaration", node.loc.start);
        }
    }
}

fn is_for_init(file: &SourceFile, id: NodeId) -> bool {
    file.parent_link(id).is_some_and(|link| {
        link.field == Field::Init && file.node(link.parent).kind == NodeKind::ForStatement
    })
}

/// How declarations must be grouped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarGrouping {
    /// Consecutive `var` statements must be merged.
    Consecutive,
    /// One `var` statement per function scope.
    OneVar,
}

/// Requires related declarations to share one `var` statement.
#[derive(Debug, Clone, Copy)]
pub struct RequireMultipleVarDecl {
    grouping: VarGrouping,
}

impl RequireMultipleVarDecl {
    /// Creates the rule.
    #[must_use]
    pub fn new(grouping: VarGrouping) -> Self {
        Self { grouping }
    }

    /// Parses the option value.
    ///
    /// # Errors
    ///
    /// Fails unless `value` is `true` or `"onevar"`.
    pub fn from_value(value: &Value) -> Result<Self, ConfigurationError> {
        match value {
            Value::Bool(true) => Ok(Self::new(VarGrouping::Consecutive)),
            Value::String(s) if s == "onevar" => Ok(Self::new(VarGrouping::OneVar)),
            _ => Err(ConfigurationError::new(
                REQUIRE_MULTIPLE,
                "true or \"onevar\"",
            )),
        }
    }

    fn check_consecutive(file: &SourceFile, diagnostics: &mut RuleDiagnostics<'_>) {
        for &id in file.nodes_by_type(NodeKind::VariableDeclaration) {
            let Some(next) = file.next_sibling(id) else {
                continue;
            };
            if file.node(next).kind == NodeKind::VariableDeclaration {
                diagnostics.add_at("Var declarations should be joined", file.loc(next).start);
            }
        }
    }

    fn check_scopes(file: &SourceFile, diagnostics: &mut RuleDiagnostics<'_>) {
        let mut scopes = vec![file.root()];
        scopes.extend(file.nodes_by_types(&[
            NodeKind::FunctionDeclaration,
            NodeKind::FunctionExpression,
        ]));

        for scope in scopes {
            let mut declarations = Vec::new();
            file.iterate_from(scope, |id, node, _| {
                if id != scope && node.kind.is_function() {
                    return Walk::Skip;
                }
                if node.kind == NodeKind::VariableDeclaration {
                    declarations.push(node.loc.start);
                }
                Walk::Continue
            });
            for position in declarations.into_iter().skip(1) {
                diagnostics.add_at(
                    "Var declarations should be joined into one statement per scope",
                    position,
                );
            }
        }
    }
}

impl Rule for RequireMultipleVarDecl {
    fn option_name(&self) -> &'static str {
        REQUIRE_MULTIPLE
    }

    fn check(&self, file: &SourceFile, diagnostics: &mut RuleDiagnostics<'_>) {
        match self.grouping {
            VarGrouping::Consecutive => Self::check_consecutive(file, diagnostics),
            VarGrouping::OneVar => Self::check_scopes(file, diagnostics),
        }
    }
}
