//! Rule validating the indentation of nested code.
//!
//! # Algorithm
//!
//! Indentation is checked line by line in two passes.
//!
//! The first pass walks the indentable containers (program, blocks, object
//! and array literals, switch statements and cases) and records for each
//! physical line:
//!
//! - `pushes`: containers opened after the line, with their levels,
//! - `pops`: containers closed at the start of the line,
//! - `pop_after`: one level closed after the line,
//! - `check`: whether the line's indentation is validated.
//!
//! Only lines where a new child of a container starts are validated, so
//! continuation lines of a long expression are free-form.
//!
//! The second pass replays the directives against a stack of open
//! containers. A closing line is expected at the indentation of the line
//! that opened the outermost container it closes. A misindented line is reported once and then treated
//! as if it were indented correctly, so its descendants are measured from the
//! expected position instead of cascading.
//!
//! # Configuration
//!
//! - a positive integer: that many spaces per level
//! - `"\t"`: one tab per level

use serde_json::Value;
use style_lint_core::{
    ConfigurationError, Field, Node, NodeId, NodeKind, Rule, RuleDiagnostics, SourceFile,
};
use tracing::trace;

/// Rule name for validate-indentation.
pub const NAME: &str = "validateIndentation";

const STRAY_CONTENT: &str = "Multiline comments should not have tokens on its ending line";

/// Width of one indentation level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndentUnit {
    /// `n` spaces.
    Spaces(usize),
    /// One tab character.
    Tab,
}

impl IndentUnit {
    fn character(self) -> char {
        match self {
            Self::Spaces(_) => ' ',
            Self::Tab => '\t',
        }
    }

    fn size(self) -> usize {
        match self {
            Self::Spaces(count) => count,
            Self::Tab => 1,
        }
    }
}

/// Validates indentation against a fixed unit.
#[derive(Debug, Clone)]
pub struct ValidateIndentation {
    unit: IndentUnit,
}

impl Default for ValidateIndentation {
    fn default() -> Self {
        Self::new(IndentUnit::Spaces(4))
    }
}

impl ValidateIndentation {
    /// Creates the rule for the given unit.
    #[must_use]
    pub fn new(unit: IndentUnit) -> Self {
        Self { unit }
    }

    /// Parses the option value.
    ///
    /// # Errors
    ///
    /// Fails unless `value` is a positive integer or `"\t"`.
    pub fn from_value(value: &Value) -> Result<Self, ConfigurationError> {
        let error = || ConfigurationError::new(NAME, "a positive integer or \"\\t\"");
        let unit = match value {
            Value::String(s) if s == "\t" => IndentUnit::Tab,
            Value::Number(n) => {
                let count = n
                    .as_u64()
                    .filter(|count| *count > 0)
                    .and_then(|count| usize::try_from(count).ok())
                    .ok_or_else(error)?;
                IndentUnit::Spaces(count)
            }
            _ => return Err(error()),
        };
        Ok(Self::new(unit))
    }

    /// Configured unit.
    #[must_use]
    pub fn unit(&self) -> IndentUnit {
        self.unit
    }

    /// Leading indentation of a line, ignoring comments.
    ///
    /// A line made only of indentation characters counts as unindented.
    fn indentation(&self, file: &SourceFile, line: usize) -> usize {
        let text = file.stripped_lines().line(line).unwrap_or_default();
        let ch = self.unit.character();
        let width = text.chars().take_while(|c| *c == ch).count();
        if width == text.chars().count() {
            0
        } else {
            width
        }
    }

    fn directives(&self, file: &SourceFile) -> Directives {
        let mut directives = Directives::new(file.lines().len());

        for child in file.node(file.root()).children(Field::Body) {
            directives.check(file.loc(child).start.line);
        }

        for &id in file.nodes_by_type(NodeKind::BlockStatement) {
            mark_container(file, &mut directives, id, Field::Body, 1);
        }
        for &id in file.nodes_by_type(NodeKind::ObjectExpression) {
            mark_container(file, &mut directives, id, Field::Properties, 1);
        }
        for &id in file.nodes_by_type(NodeKind::ArrayExpression) {
            mark_container(file, &mut directives, id, Field::Elements, 1);
            mark_holes(file, &mut directives, file.node(id));
        }
        for &id in file.nodes_by_type(NodeKind::SwitchStatement) {
            mark_switch(file, &mut directives, id);
        }
        for &id in file.nodes_by_type(NodeKind::SwitchCase) {
            mark_case(file, &mut directives, id);
        }
        for &id in file.nodes_by_type(NodeKind::IfStatement) {
            let node = file.node(id);
            if let (Some(consequent), Some(alternate)) =
                (node.child(Field::Consequent), node.child(Field::Alternate))
            {
                if file.node(alternate).kind == NodeKind::BlockStatement {
                    mark_alternate(file, &mut directives, consequent, alternate);
                }
            }
        }
        for &id in file.nodes_by_type(NodeKind::TryStatement) {
            mark_try(file, &mut directives, file.node(id));
        }

        // Needs the pushes recorded by the containers above.
        for &id in file.nodes_by_type(NodeKind::VariableDeclaration) {
            self.align_declarations(file, &mut directives, file.node(id));
        }

        directives
    }

    /// Re-aims the innermost push of a `var` line whose declarators start on
    /// later lines, so that they hang at the second declarator's column (or
    /// the end column of a lone multi-line declarator).
    fn align_declarations(&self, file: &SourceFile, directives: &mut Directives, node: &Node) {
        let line = node.loc.start.line;
        let declarations: Vec<NodeId> = node.children(Field::Declarations).collect();
        let Some(first) = declarations.first() else {
            return;
        };
        if file.loc(*first).start.line == line || directives.innermost_push(line).is_none() {
            return;
        }
        let align = match declarations.as_slice() {
            [_, second, ..] => file.loc(*second).start.column,
            [only] => {
                let loc = file.loc(*only);
                if !loc.is_multiline() {
                    return;
                }
                loc.end.column
            }
            [] => return,
        };

        let actual = self.indentation(file, line);
        let size = self.unit.size();
        if align > actual && (align - actual) % size == 0 {
            directives.set_innermost_push(line, (align - actual) / size);
        }
    }

    fn check_lines(
        &self,
        file: &SourceFile,
        directives: &Directives,
        diagnostics: &mut RuleDiagnostics<'_>,
    ) {
        let size = self.unit.size();
        let mut stack = vec![Frame::default()];

        for (index, directive) in directives.lines.iter().enumerate() {
            let line = index + 1;
            let mut actual = self.indentation(file, line);

            let mut closed = None;
            for _ in 0..directive.pops {
                if stack.len() > 1 {
                    closed = stack.pop();
                }
            }
            let expected = match closed {
                Some(frame) => frame.base,
                None if directive.pops > 0 => 0,
                None => stack.last().map_or(0, |frame| frame.width),
            };

            if directive.check && actual != expected {
                diagnostics.add(
                    format!("Expected indentation of {expected} characters"),
                    line,
                    expected,
                );
                actual = expected;
            }

            if directive.pop_after && stack.len() > 1 {
                stack.pop();
            }
            for push in &directive.pushes {
                stack.push(Frame {
                    base: actual,
                    width: actual + push.levels * size,
                });
            }
        }
    }
}

impl Rule for ValidateIndentation {
    fn option_name(&self) -> &'static str {
        NAME
    }

    fn check(&self, file: &SourceFile, diagnostics: &mut RuleDiagnostics<'_>) {
        for position in &file.stripped_lines().stray_content {
            diagnostics.add_at(STRAY_CONTENT, *position);
        }

        let directives = self.directives(file);
        trace!(
            lines = directives.lines.len(),
            checked = directives.lines.iter().filter(|d| d.check).count(),
            "indentation directives"
        );
        self.check_lines(file, &directives, diagnostics);
    }
}

/// One open container during the second pass.
#[derive(Debug, Clone, Copy, Default)]
struct Frame {
    /// Indentation of the line that opened the container.
    base: usize,
    /// Indentation expected of the container's children.
    width: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Push {
    column: usize,
    levels: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct LineDirective {
    /// Containers opened on the line, outermost first.
    pushes: Vec<Push>,
    /// Containers closed at the start of the line.
    pops: usize,
    pop_after: bool,
    check: bool,
}

/// Per-line directives, indexed by 1-based line number.
///
/// Every container opening or closing on a line keeps its own entry, so a
/// line closing two containers pops both of them.
#[derive(Debug)]
struct Directives {
    lines: Vec<LineDirective>,
}

impl Directives {
    fn new(line_count: usize) -> Self {
        Self {
            lines: vec![LineDirective::default(); line_count],
        }
    }

    fn at(&mut self, line: usize) -> Option<&mut LineDirective> {
        line.checked_sub(1).and_then(|idx| self.lines.get_mut(idx))
    }

    fn push(&mut self, line: usize, column: usize, levels: usize) {
        if let Some(directive) = self.at(line) {
            let index = directive
                .pushes
                .partition_point(|push| push.column <= column);
            directive.pushes.insert(index, Push { column, levels });
        }
    }

    fn innermost_push(&self, line: usize) -> Option<usize> {
        line.checked_sub(1)
            .and_then(|idx| self.lines.get(idx))
            .and_then(|directive| directive.pushes.last())
            .map(|push| push.levels)
    }

    fn set_innermost_push(&mut self, line: usize, levels: usize) {
        if let Some(push) = self.at(line).and_then(|d| d.pushes.last_mut()) {
            push.levels = levels;
        }
    }

    fn pop(&mut self, line: usize) {
        if let Some(directive) = self.at(line) {
            directive.pops += 1;
        }
    }

    fn pop_after(&mut self, line: usize) {
        if let Some(directive) = self.at(line) {
            directive.pop_after = true;
        }
    }

    fn check(&mut self, line: usize) {
        if let Some(directive) = self.at(line) {
            directive.check = true;
        }
    }
}

/// Marks children of `field` that start on a later line than the container.
fn mark_children(file: &SourceFile, directives: &mut Directives, node: &Node, field: Field) {
    let first_line = node.loc.start.line;
    for child in node.children(field) {
        let line = file.loc(child).start.line;
        if line != first_line {
            directives.check(line);
        }
    }
}

fn mark_container(
    file: &SourceFile,
    directives: &mut Directives,
    id: NodeId,
    field: Field,
    levels: usize,
) {
    let node = file.node(id);
    let loc = node.loc;
    if !loc.is_multiline() {
        return;
    }
    mark_children(file, directives, node, field);
    directives.push(loc.start.line, loc.start.column, levels);
    directives.pop(loc.end.line);
    directives.check(loc.end.line);
}

/// Holes in a multi-line array: the lines between the neighbouring elements
/// are validated when they hold anything besides whitespace and comments.
fn mark_holes(file: &SourceFile, directives: &mut Directives, node: &Node) {
    let loc = node.loc;
    if !loc.is_multiline() {
        return;
    }
    let elements = node.list(Field::Elements);
    for (index, element) in elements.iter().enumerate() {
        if element.is_some() {
            continue;
        }
        let left = elements[..index]
            .iter()
            .rev()
            .find_map(|e| *e)
            .map_or(loc.start.line, |e| file.loc(e).end.line);
        let right = elements[index + 1..]
            .iter()
            .find_map(|e| *e)
            .map_or(loc.end.line, |e| file.loc(e).start.line);

        for line in left + 1..=right {
            let has_content = file
                .stripped_lines()
                .line(line)
                .is_some_and(|text| !text.trim().is_empty());
            if has_content {
                directives.check(line);
            }
        }
    }
}

/// Cases aligned with the `switch` keyword open no extra level.
fn switch_levels(file: &SourceFile, node: &Node) -> usize {
    match node.children(Field::Cases).next() {
        Some(case) if file.loc(case).start.column == node.loc.start.column => 0,
        _ => 1,
    }
}

fn mark_switch(file: &SourceFile, directives: &mut Directives, id: NodeId) {
    let node = file.node(id);
    if !node.loc.is_multiline() {
        return;
    }
    let levels = switch_levels(file, node);
    mark_container(file, directives, id, Field::Cases, levels);
}

fn mark_case(file: &SourceFile, directives: &mut Directives, id: NodeId) {
    let node = file.node(id);
    let loc = node.loc;
    let consequent: Vec<NodeId> = node.children(Field::Consequent).collect();
    if consequent.is_empty() || !loc.is_multiline() {
        return;
    }
    mark_children(file, directives, node, Field::Consequent);

    let single_block =
        consequent.len() == 1 && file.node(consequent[0]).kind == NodeKind::BlockStatement;
    if !single_block {
        directives.push(loc.start.line, loc.start.column, 1);
        directives.pop_after(loc.end.line);
    }
}

/// A block continuing a statement on a new line (`else`, `catch`,
/// `finally`) is validated like a sibling of the statement.
fn mark_alternate(
    file: &SourceFile,
    directives: &mut Directives,
    previous: NodeId,
    block: NodeId,
) {
    let previous_end = file.loc(previous).end.line;
    let start = file.loc(block).start.line;
    if start != previous_end {
        directives.check(start);
    }
}

fn mark_try(file: &SourceFile, directives: &mut Directives, node: &Node) {
    let Some(mut previous) = node.child(Field::Block) else {
        return;
    };
    if let Some(handler) = node.child(Field::Handler) {
        if let Some(body) = file.node(handler).child(Field::Body) {
            mark_alternate(file, directives, previous, body);
            previous = body;
        }
    }
    if let Some(finalizer) = node.child(Field::Finalizer) {
        mark_alternate(file, directives, previous, finalizer);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::run;
    use serde_json::json;

    fn check(unit: IndentUnit, text: &str) -> Vec<(usize, usize)> {
        run(&ValidateIndentation::new(unit), text)
            .into_iter()
            .map(|d| (d.line, d.column))
            .collect()
    }

    fn two(text: &str) -> Vec<(usize, usize)> {
        check(IndentUnit::Spaces(2), text)
    }

    #[test]
    fn test_accepts_correct_block() {
        assert!(two("if(a){\n  b();\n}\n").is_empty());
    }

    #[test]
    fn test_reports_unindented_statement() {
        let diagnostics = run(
            &ValidateIndentation::new(IndentUnit::Spaces(2)),
            "if(a){\nb();\n}\n",
        );
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].line, 2);
        assert_eq!(diagnostics[0].column, 2);
        assert_eq!(
            diagnostics[0].message,
            "Expected indentation of 2 characters"
        );
        assert_eq!(diagnostics[0].rule, NAME);
    }

    #[test]
    fn test_misindented_opener_does_not_cascade() {
        let text = "function f() {\n   if (a) {\n    b();\n  }\n}\n";
        assert_eq!(two(text), vec![(2, 2)]);
    }

    #[test]
    fn test_closing_brace_is_checked() {
        assert_eq!(two("while (a) {\n  b();\n  }\n"), vec![(3, 0)]);
    }

    #[test]
    fn test_top_level_statements_are_checked() {
        assert_eq!(two("a();\n  b();\n"), vec![(2, 0)]);
    }

    #[test]
    fn test_continuation_lines_are_free() {
        assert!(two("var a = b +\n        c;\nfoo(1,\n 2);\n").is_empty());
    }

    #[test]
    fn test_nested_literals() {
        let text = "var config = {\n    list: [\n        1,\n        2\n    ],\n    nested: {\n        deep: true\n    }\n};\n";
        assert!(check(IndentUnit::Spaces(4), text).is_empty());

        let broken = text.replace("        deep", "      deep");
        assert_eq!(check(IndentUnit::Spaces(4), &broken), vec![(7, 8)]);
    }

    #[test]
    fn test_containers_sharing_lines_count_once() {
        let text = "foo(function () {\n  a();\n}, {\n  b: 1\n});\n";
        assert!(two(text).is_empty());

        let text = "call({ a: function () {\n  b();\n}});\n";
        assert!(two(text).is_empty());
    }

    #[test]
    fn test_tabs() {
        assert!(check(IndentUnit::Tab, "if (a) {\n\tb();\n}\n").is_empty());
        assert_eq!(
            check(IndentUnit::Tab, "if (a) {\n    b();\n}\n"),
            vec![(2, 1)]
        );
    }

    #[test]
    fn test_switch_with_aligned_cases() {
        let text = "switch (a) {\ncase 1:\n  b();\n  break;\ndefault:\n  c();\n}\n";
        assert!(two(text).is_empty());

        let deeper = "switch (a) {\ncase 1:\n    b();\n}\n";
        assert_eq!(two(deeper), vec![(3, 2)]);
    }

    #[test]
    fn test_switch_with_indented_cases() {
        let text = "switch (a) {\n  case 1:\n    b();\n    break;\n  default:\n    c();\n}\n";
        assert!(two(text).is_empty());

        let flat = "switch (a) {\n  case 1:\n  b();\n}\n";
        assert_eq!(two(flat), vec![(3, 4)]);
    }

    #[test]
    fn test_case_with_block_body() {
        let text = "switch (a) {\n  case 1: {\n    b();\n  }\n}\n";
        assert!(two(text).is_empty());
    }

    #[test]
    fn test_switch_with_multiline_discriminant() {
        let text = "switch (foo({\n  a: 1\n})) {\n  case 1:\n    b();\n}\n";
        assert!(two(text).is_empty());
    }

    #[test]
    fn test_else_on_its_own_line() {
        let text = "if (a) {\n  b();\n}\nelse {\n  c();\n}\n";
        assert!(two(text).is_empty());

        // The body is measured from where the else line should have been.
        let shifted = "if (a) {\n  b();\n}\n  else {\n    c();\n  }\n";
        assert_eq!(two(shifted), vec![(4, 0), (5, 2), (6, 0)]);

        let keyword_only = "if (a) {\n  b();\n}\n  else {\n  c();\n}\n";
        assert_eq!(two(keyword_only), vec![(4, 0)]);
    }

    #[test]
    fn test_else_block_after_unbraced_consequent() {
        let text = "if (a)\n  b();\nelse {\n  c();\n}\n";
        assert!(two(text).is_empty());
    }

    #[test]
    fn test_catch_and_finally_on_their_own_lines() {
        let text = "try {\n  a();\n}\ncatch (e) {\n  b();\n}\nfinally {\n  c();\n}\n";
        assert!(two(text).is_empty());

        let shifted = text.replace("finally", "  finally");
        assert_eq!(two(&shifted), vec![(7, 0)]);
    }

    #[test]
    fn test_declarators_on_the_var_line_keep_one_level() {
        let text = "var x = {\n  a: 1\n},\n    y = 2;\n";
        assert!(two(text).is_empty());

        let hanging = "var x = {\n      a: 1\n    },\n    y = 2;\n";
        assert_eq!(two(hanging), vec![(2, 2), (3, 0)]);
    }

    #[test]
    fn test_declarators_below_the_var_line_hang() {
        let text = "if (a) { var\n    b = 1,\n    c = 2;\n    d();\n}\n";
        assert!(two(text).is_empty());

        let one_level = "if (a) { var\n    b = 1,\n    c = 2;\n  d();\n}\n";
        assert_eq!(two(one_level), vec![(4, 4)]);
    }

    #[test]
    fn test_case_line_opening_containers() {
        let object = "switch (a) {\n  case 1: foo({\n    a: 1\n  });\n  case 2:\n    b();\n}\n";
        assert!(two(object).is_empty());

        let array = "switch (a) {\n  case 1: x = [\n    1\n  ];\n  case 2:\n    b();\n}\n";
        assert!(two(array).is_empty());

        let function = "switch (a) {\n  case 1: f(function () {\n    b();\n  });\n    break;\n  default:\n    c();\n}\n";
        assert!(two(function).is_empty());

        let closer = "switch (a) {\n  case 1: foo({\n    a: 1\n    });\n}\n";
        assert_eq!(two(closer), vec![(4, 2)]);
    }

    #[test]
    fn test_line_closing_nested_literals() {
        assert!(two("foo([{\n  a: 1\n}]);\n").is_empty());
        assert_eq!(two("foo([{\n  a: 1\n  }]);\n"), vec![(3, 0)]);
    }

    #[test]
    fn test_array_holes() {
        let text = "x = [\n  a,\n  ,\n  b\n];\n";
        assert!(two(text).is_empty());

        let shifted = "x = [\n  a,\n,\n  b\n];\n";
        assert_eq!(two(shifted), vec![(3, 2)]);
    }

    #[test]
    fn test_comments_do_not_count() {
        let text = "if (a) {\n// note\n  b();\n  /* x */\n}\n";
        assert!(two(text).is_empty());
    }

    #[test]
    fn test_code_after_multiline_comment() {
        let diagnostics = run(
            &ValidateIndentation::new(IndentUnit::Spaces(2)),
            "/* a\n */ b();\n",
        );
        assert!(diagnostics
            .iter()
            .any(|d| d.message == STRAY_CONTENT && (d.line, d.column) == (2, 3)));
    }

    #[test]
    fn test_comment_after_closing_comment_line() {
        let diagnostics = run(
            &ValidateIndentation::new(IndentUnit::Spaces(2)),
            "/* a\n */ // x\nb();\n",
        );
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_option_values() {
        assert_eq!(
            ValidateIndentation::from_value(&json!(2)).unwrap().unit(),
            IndentUnit::Spaces(2)
        );
        assert_eq!(
            ValidateIndentation::from_value(&json!("\t")).unwrap().unit(),
            IndentUnit::Tab
        );
        for bad in [json!(0), json!(-2), json!(2.5), json!(" "), json!(true)] {
            let err = ValidateIndentation::from_value(&bad).unwrap_err();
            assert_eq!(err.option, NAME);
        }
    }
}
