//! Source model, walker and token helpers over parsed input.

use style_lint_core::token_helpers::{
    adjacent_token, find_punctuator_from, is_parenthesis_at, token_if_punctuator_at,
};
use style_lint_core::{Field, NodeKind, Position, SourceFile, TokenKind, Walk};
use style_lint_parser::parse;

fn source(text: &str) -> SourceFile {
    SourceFile::new(text, parse(text).unwrap())
}

fn names(file: &SourceFile, ids: &[style_lint_core::NodeId]) -> Vec<String> {
    ids.iter()
        .filter_map(|id| file.node(*id).value.clone())
        .collect()
}

#[test]
fn test_nodes_by_type_in_document_order() {
    let file = source("function f() { var a; }\nvar b;");
    let declarators = file.nodes_by_type(NodeKind::VariableDeclarator);
    let ids: Vec<_> = declarators
        .iter()
        .filter_map(|d| file.node(*d).child(Field::Id))
        .collect();
    assert_eq!(names(&file, &ids), vec!["a", "b"]);
    assert!(file.nodes_by_type(NodeKind::WithStatement).is_empty());
}

#[test]
fn test_nodes_by_types_concatenates_in_requested_order() {
    let file = source("a = 1; if (b) { c(); }");
    let ids = file.nodes_by_types(&[NodeKind::IfStatement, NodeKind::AssignmentExpression]);
    let kinds: Vec<NodeKind> = ids.iter().map(|id| file.node(*id).kind).collect();
    assert_eq!(
        kinds,
        vec![NodeKind::IfStatement, NodeKind::AssignmentExpression]
    );
}

#[test]
fn test_parents_and_siblings() {
    let file = source("a();\nb();\nc();");
    let statements: Vec<_> = file.node(file.root()).children(Field::Body).collect();

    assert_eq!(file.parent(statements[1]), Some(file.root()));
    let link = file.parent_link(statements[1]).unwrap();
    assert_eq!(link.field, Field::Body);
    assert_eq!(link.index, Some(1));

    assert_eq!(file.next_sibling(statements[0]), Some(statements[1]));
    assert_eq!(file.previous_sibling(statements[0]), None);
    assert_eq!(file.previous_sibling(statements[2]), Some(statements[1]));
    assert_eq!(file.parent(file.root()), None);
}

#[test]
fn test_every_non_root_node_has_one_parent() {
    let file = source("var o = { a: [1, , 2], b: function (x) { return x ? 1 : 2; } };");
    let mut visited = 0;
    file.iterate(|id, _, link| {
        visited += 1;
        if id != file.root() {
            assert_eq!(file.parent_link(id), link);
            assert!(link.is_some());
        }
        Walk::Continue
    });
    assert!(visited > 10);
}

#[test]
fn test_walker_skip_prunes_functions() {
    let file = source("var x = function () { var y; };");
    let mut seen = Vec::new();
    file.iterate(|_, node, _| {
        if node.kind == NodeKind::Identifier {
            seen.extend(node.value.clone());
        }
        if node.kind.is_function() {
            Walk::Skip
        } else {
            Walk::Continue
        }
    });
    assert_eq!(seen, vec!["x"]);
}

#[test]
fn test_token_position_by_range_start() {
    let file = source("a + b");
    assert_eq!(file.token_position_by_range_start(0), Some(0));
    assert_eq!(file.token_position_by_range_start(2), Some(1));
    assert_eq!(file.token_position_by_range_start(1), None);

    let empty = source("");
    assert_eq!(empty.token_position_by_range_start(0), None);
    assert!(empty.tokens().is_empty());
}

#[test]
fn test_keywords_used_as_names_become_identifiers() {
    let file = source("a.default = { delete: 1 }; b[this];");
    let kind_of = |value: &str| {
        file.tokens()
            .iter()
            .find(|t| t.value == value)
            .map(|t| t.kind)
    };
    assert_eq!(kind_of("default"), Some(TokenKind::Identifier));
    assert_eq!(kind_of("delete"), Some(TokenKind::Identifier));
    assert_eq!(kind_of("this"), Some(TokenKind::Keyword));
}

#[test]
fn test_adjacent_token_skips_grouping_parentheses() {
    for text in ["a+b", "(a)+(b)", "((a))+((b))"] {
        let file = source(text);
        let binary = file.nodes_by_type(NodeKind::BinaryExpression)[0];
        let node = file.node(binary);
        let left = file.node(node.child(Field::Left).unwrap());
        let right = file.node(node.child(Field::Right).unwrap());

        let after_left = adjacent_token(&file, left.span.end, false);
        assert_eq!(after_left.map(|t| t.value.as_str()), Some("+"), "{text}");
        let before_right = adjacent_token(&file, right.span.start, true);
        assert_eq!(before_right.map(|t| t.value.as_str()), Some("+"), "{text}");
    }
}

#[test]
fn test_adjacent_token_stops_at_whitespace() {
    let file = source("(a) + (b)");
    let binary = file.node(file.nodes_by_type(NodeKind::BinaryExpression)[0]);
    let left = file.node(binary.child(Field::Left).unwrap());
    assert!(is_parenthesis_at(&file, left.span.end, false));
    assert!(adjacent_token(&file, left.span.end, false).is_none());
}

#[test]
fn test_punctuator_search() {
    let file = source("if (a) { b(); }");
    let brace = find_punctuator_from(&file, 0, "{", false).unwrap();
    assert_eq!(brace.span.start, 7);
    let paren = find_punctuator_from(&file, 7, "(", true).unwrap();
    assert_eq!(paren.span.start, 3);
    assert!(find_punctuator_from(&file, 8, "(", false).is_some());
    assert!(find_punctuator_from(&file, 0, "[", false).is_none());

    assert!(token_if_punctuator_at(&file, 7, "{", false).is_some());
    assert!(token_if_punctuator_at(&file, 7, "}", false).is_none());
}

#[test]
fn test_stripped_lines_flag_code_after_comment() {
    let file = source("a(); /* x\n */ b();");
    let stripped = file.stripped_lines();
    assert_eq!(stripped.line(1), Some("a();     "));
    assert_eq!(stripped.line(2), Some("    b();"));
    assert_eq!(stripped.stray_content, vec![Position::new(2, 3)]);
}
