//! Rule requiring braces around statement bodies.
//!
//! # Configuration
//!
//! `true` for every keyword, or an array drawn from `if`, `else`, `for`,
//! `while`, `do`, `with`, `case`, `default`.

use serde_json::Value;
use style_lint_core::token_helpers::find_punctuator_from;
use style_lint_core::{
    expect_true_or_subset, ConfigurationError, Field, Node, NodeId, NodeKind, Position, Rule,
    RuleDiagnostics, SourceFile,
};

/// Rule name for require-curly-braces.
pub const NAME: &str = "requireCurlyBraces";

/// Keywords the rule can check.
pub const KEYWORDS: &[&str] = &["if", "else", "for", "while", "do", "with", "case", "default"];

/// Requires block statements as bodies of the configured keywords.
#[derive(Debug, Clone)]
pub struct RequireCurlyBraces {
    keywords: Vec<String>,
}

impl RequireCurlyBraces {
    /// Creates the rule for `keywords`.
    #[must_use]
    pub fn new(keywords: Vec<String>) -> Self {
        Self { keywords }
    }

    /// Parses the option value.
    ///
    /// # Errors
    ///
    /// Fails unless `value` is `true` or an array of supported keywords.
    pub fn from_value(value: &Value) -> Result<Self, ConfigurationError> {
        expect_true_or_subset(NAME, value, KEYWORDS, KEYWORDS).map(Self::new)
    }

    fn wants(&self, keyword: &str) -> bool {
        self.keywords.iter().any(|k| k == keyword)
    }

    /// Checks `field` of every node of `kind`.
    fn check_bodies(
        &self,
        file: &SourceFile,
        kind: NodeKind,
        field: Field,
        keyword: &str,
        diagnostics: &mut RuleDiagnostics<'_>,
    ) {
        if !self.wants(keyword) {
            return;
        }
        for &id in file.nodes_by_type(kind) {
            let node = file.node(id);
            if node.child(field).is_some_and(|body| !is_block(file, body)) {
                report(diagnostics, keyword, node.loc.start);
            }
        }
    }

    fn check_else(&self, file: &SourceFile, diagnostics: &mut RuleDiagnostics<'_>) {
        if !self.wants("else") {
            return;
        }
        for &id in file.nodes_by_type(NodeKind::IfStatement) {
            let node = file.node(id);
            let (Some(consequent), Some(alternate)) =
                (node.child(Field::Consequent), node.child(Field::Alternate))
            else {
                continue;
            };
            let kind = file.node(alternate).kind;
            if kind == NodeKind::BlockStatement || kind == NodeKind::IfStatement {
                continue;
            }
            let position = find_punctuator_from(file, file.node(consequent).span.end, "else", false)
                .map_or(file.loc(alternate).start, |t| t.loc.start);
            report(diagnostics, "else", position);
        }
    }

    fn check_cases(&self, file: &SourceFile, diagnostics: &mut RuleDiagnostics<'_>) {
        for &id in file.nodes_by_type(NodeKind::SwitchCase) {
            let node = file.node(id);
            let keyword = if node.child(Field::Test).is_some() {
                "case"
            } else {
                "default"
            };
            if !self.wants(keyword) {
                continue;
            }
            if !is_single_block(file, node) {
                report(diagnostics, keyword, node.loc.start);
            }
        }
    }
}

impl Rule for RequireCurlyBraces {
    fn option_name(&self) -> &'static str {
        NAME
    }

    fn check(&self, file: &SourceFile, diagnostics: &mut RuleDiagnostics<'_>) {
        self.check_bodies(file, NodeKind::IfStatement, Field::Consequent, "if", diagnostics);
        self.check_else(file, diagnostics);
        self.check_bodies(file, NodeKind::ForStatement, Field::Body, "for", diagnostics);
        self.check_bodies(file, NodeKind::ForInStatement, Field::Body, "for", diagnostics);
        self.check_bodies(file, NodeKind::WhileStatement, Field::Body, "while", diagnostics);
        self.check_bodies(file, NodeKind::DoWhileStatement, Field::Body, "do", diagnostics);
        self.check_bodies(file, NodeKind::WithStatement, Field::Body, "with", diagnostics);
        self.check_cases(file, diagnostics);
    }
}

fn is_block(file: &SourceFile, id: NodeId) -> bool {
    file.node(id).kind == NodeKind::BlockStatement
}

/// An empty case falls through and needs no braces.
fn is_single_block(file: &SourceFile, node: &Node) -> bool {
    let consequent = node.list(Field::Consequent);
    match consequent {
        [] => true,
        [Some(only)] => is_block(file, *only),
        _ => false,
    }
}

fn report(diagnostics: &mut RuleDiagnostics<'_>, keyword: &str, position: Position) {
    let mut chars = keyword.chars();
    let title: String = chars
        .next()
        .map(|first| first.to_ascii_uppercase().to_string() + chars.as_str())
        .unwrap_or_default();
    diagnostics.add_at(format!("{title} statement without curly braces"), position);
}
