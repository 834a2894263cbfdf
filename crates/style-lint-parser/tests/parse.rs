//! Tree shapes and ranges produced by the parser.

use style_lint_core::{Field, Node, NodeId, NodeKind, ParsedSource, PropertyKind, Span};
use style_lint_parser::parse;

fn root(parsed: &ParsedSource) -> &Node {
    parsed.tree.node(parsed.tree.root().unwrap())
}

fn body(parsed: &ParsedSource) -> Vec<NodeId> {
    root(parsed).children(Field::Body).collect()
}

fn statement(parsed: &ParsedSource, index: usize) -> &Node {
    parsed.tree.node(body(parsed)[index])
}

fn expression_of(parsed: &ParsedSource, index: usize) -> &Node {
    let expression = statement(parsed, index).child(Field::Expression).unwrap();
    parsed.tree.node(expression)
}

#[test]
fn test_program_spans_first_to_last_token() {
    let parsed = parse("\n  // lead\n  a();\n  b();\n\n").unwrap();
    let program = root(&parsed);
    assert_eq!(program.kind, NodeKind::Program);
    assert_eq!(program.loc.start.line, 3);
    assert_eq!(program.loc.end.line, 4);
    assert_eq!(body(&parsed).len(), 2);
}

#[test]
fn test_var_declaration() {
    let parsed = parse("var a = 1, b;\nfoo(a);").unwrap();
    let declaration = statement(&parsed, 0);
    assert_eq!(declaration.kind, NodeKind::VariableDeclaration);
    assert_eq!(declaration.span, Span::new(0, 13));
    assert_eq!(declaration.list(Field::Declarations).len(), 2);

    let call = expression_of(&parsed, 1);
    assert_eq!(call.kind, NodeKind::CallExpression);
    assert_eq!(call.list(Field::Arguments).len(), 1);
}

#[test]
fn test_grouping_parentheses_produce_no_node() {
    let parsed = parse("x = (a + b) * c;").unwrap();
    let assignment = expression_of(&parsed, 0);
    assert_eq!(assignment.kind, NodeKind::AssignmentExpression);
    assert_eq!(assignment.operator.as_deref(), Some("="));

    let product = parsed.tree.node(assignment.child(Field::Right).unwrap());
    assert_eq!(product.operator.as_deref(), Some("*"));
    assert_eq!(product.span, Span::new(4, 15));

    let sum = parsed.tree.node(product.child(Field::Left).unwrap());
    assert_eq!(sum.kind, NodeKind::BinaryExpression);
    assert_eq!(sum.span, Span::new(5, 10));
}

#[test]
fn test_precedence_and_associativity() {
    let parsed = parse("a - b - c * d || e && f;").unwrap();
    let or = expression_of(&parsed, 0);
    assert_eq!(or.kind, NodeKind::LogicalExpression);
    assert_eq!(or.operator.as_deref(), Some("||"));

    let difference = parsed.tree.node(or.child(Field::Left).unwrap());
    assert_eq!(difference.operator.as_deref(), Some("-"));
    let inner = parsed.tree.node(difference.child(Field::Left).unwrap());
    assert_eq!(inner.operator.as_deref(), Some("-"));
    let product = parsed.tree.node(difference.child(Field::Right).unwrap());
    assert_eq!(product.operator.as_deref(), Some("*"));
}

#[test]
fn test_automatic_semicolon_insertion() {
    let parsed = parse("a = 1\nb = 2\n{ c() }").unwrap();
    assert_eq!(body(&parsed).len(), 3);

    let err = parse("a = 1 b = 2").unwrap_err();
    assert_eq!(err.message, "Unexpected identifier");
    assert_eq!((err.line, err.column), (1, 6));
}

#[test]
fn test_return_argument_stops_at_newline() {
    let parsed = parse("function f() {\n  return\n  1;\n}").unwrap();
    let function = statement(&parsed, 0);
    let block = parsed.tree.node(function.child(Field::Body).unwrap());
    let statements: Vec<NodeId> = block.children(Field::Body).collect();
    assert_eq!(statements.len(), 2);
    let ret = parsed.tree.node(statements[0]);
    assert_eq!(ret.kind, NodeKind::ReturnStatement);
    assert!(ret.child(Field::Argument).is_none());
}

#[test]
fn test_array_holes() {
    let parsed = parse("x = [a, , b];\ny = [a,];\nz = [,];").unwrap();
    let elements = |index: usize| {
        let assignment = expression_of(&parsed, index);
        let array = parsed.tree.node(assignment.child(Field::Right).unwrap());
        array.list(Field::Elements).iter().map(Option::is_some).collect::<Vec<_>>()
    };
    assert_eq!(elements(0), vec![true, false, true]);
    assert_eq!(elements(1), vec![true]);
    assert_eq!(elements(2), vec![false]);
}

#[test]
fn test_switch_cases() {
    let parsed = parse("switch (x) {\ncase 1:\n  a();\n  break;\ndefault:\n  b();\n}").unwrap();
    let switch = statement(&parsed, 0);
    assert_eq!(switch.kind, NodeKind::SwitchStatement);
    let cases: Vec<NodeId> = switch.children(Field::Cases).collect();
    assert_eq!(cases.len(), 2);

    let first = parsed.tree.node(cases[0]);
    assert!(first.child(Field::Test).is_some());
    assert_eq!(first.list(Field::Consequent).len(), 2);
    assert_eq!(first.loc.start.line, 2);
    assert_eq!(first.loc.end.line, 4);

    let default = parsed.tree.node(cases[1]);
    assert!(default.child(Field::Test).is_none());
}

#[test]
fn test_try_catch_finally() {
    let parsed = parse("try { a(); } catch (e) { } finally { b(); }").unwrap();
    let statement = statement(&parsed, 0);
    assert_eq!(statement.kind, NodeKind::TryStatement);
    let handler = parsed.tree.node(statement.child(Field::Handler).unwrap());
    assert_eq!(handler.kind, NodeKind::CatchClause);
    assert!(handler.child(Field::Param).is_some());
    assert!(statement.child(Field::Finalizer).is_some());

    assert!(parse("try { a(); }").is_err());
}

#[test]
fn test_for_and_for_in() {
    let parsed = parse("for (var k in o) {}\nfor (i = 0; i < n; i++) {}\nfor (;;) break;").unwrap();
    assert_eq!(statement(&parsed, 0).kind, NodeKind::ForInStatement);
    let left = parsed.tree.node(statement(&parsed, 0).child(Field::Left).unwrap());
    assert_eq!(left.kind, NodeKind::VariableDeclaration);

    let classic = statement(&parsed, 1);
    assert_eq!(classic.kind, NodeKind::ForStatement);
    assert!(classic.child(Field::Init).is_some());
    assert!(classic.child(Field::Update).is_some());

    let forever = statement(&parsed, 2);
    assert!(forever.child(Field::Init).is_none());
    assert!(forever.child(Field::Test).is_none());
}

#[test]
fn test_accessor_properties() {
    let parsed = parse("var o = { get x() { return 1; }, set x(v) {}, get: 2 };").unwrap();
    let declaration = statement(&parsed, 0);
    let declarator = parsed.tree.node(declaration.children(Field::Declarations).next().unwrap());
    let object = parsed.tree.node(declarator.child(Field::Init).unwrap());
    let kinds: Vec<Option<PropertyKind>> = object
        .children(Field::Properties)
        .map(|id| parsed.tree.node(id).property_kind)
        .collect();
    assert_eq!(
        kinds,
        vec![
            Some(PropertyKind::Get),
            Some(PropertyKind::Set),
            Some(PropertyKind::Init)
        ]
    );
}

#[test]
fn test_new_and_member_chains() {
    let parsed = parse("new Foo.Bar(1).baz;").unwrap();
    let member = expression_of(&parsed, 0);
    assert_eq!(member.kind, NodeKind::MemberExpression);
    assert!(!member.computed);
    let new = parsed.tree.node(member.child(Field::Object).unwrap());
    assert_eq!(new.kind, NodeKind::NewExpression);
    let callee = parsed.tree.node(new.child(Field::Callee).unwrap());
    assert_eq!(callee.kind, NodeKind::MemberExpression);
}

#[test]
fn test_labels_and_jumps() {
    let parsed = parse("outer: for (;;) { continue outer; }").unwrap();
    let labeled = statement(&parsed, 0);
    assert_eq!(labeled.kind, NodeKind::LabeledStatement);
    assert_eq!(
        parsed.tree.node(labeled.child(Field::Label).unwrap()).value.as_deref(),
        Some("outer")
    );
}

#[test]
fn test_syntax_error_position() {
    let err = parse("if (a {\n}").unwrap_err();
    assert_eq!(err.message, "Unexpected token {");
    assert_eq!((err.line, err.column), (1, 6));

    let err = parse("foo(").unwrap_err();
    assert_eq!(err.message, "Unexpected end of input");

    let err = parse("1 = a;").unwrap_err();
    assert_eq!(err.message, "Invalid left-hand side in assignment");
}

#[test]
fn test_nesting_depth_is_limited() {
    let nested = |open: &str, close: &str, depth: usize| {
        format!("x = {}a{};", open.repeat(depth), close.repeat(depth))
    };

    assert!(parse(&nested("(", ")", 40)).is_ok());
    assert!(parse(&nested("[", "]", 40)).is_ok());

    for text in [
        nested("(", ")", 1000),
        nested("[", "]", 1000),
        format!("{}a;", "!".repeat(1000)),
        format!("{}a;{}", "{".repeat(1000), "}".repeat(1000)),
    ] {
        let err = parse(&text).unwrap_err();
        assert_eq!(err.message, "Maximum nesting depth exceeded");
        assert_eq!(err.line, 1);
    }
}
