//! Expression parsing with precedence climbing for binary operators.

use super::Parser;
use crate::error::ParseError;
use style_lint_core::{Field, NodeId, NodeKind, PropertyKind, TokenKind};

const ASSIGNMENT_OPERATORS: &[&str] = &[
    "=", "+=", "-=", "*=", "/=", "%=", "<<=", ">>=", ">>>=", "&=", "|=", "^=",
];

const UNARY_PUNCTUATORS: &[&str] = &["!", "~", "+", "-"];
const UNARY_KEYWORDS: &[&str] = &["delete", "void", "typeof"];

/// Binding power of a binary operator; higher binds tighter.
fn binary_precedence(operator: &str) -> Option<u8> {
    let precedence = match operator {
        "||" => 1,
        "&&" => 2,
        "|" => 3,
        "^" => 4,
        "&" => 5,
        "==" | "!=" | "===" | "!==" => 6,
        "<" | ">" | "<=" | ">=" | "instanceof" | "in" => 7,
        "<<" | ">>" | ">>>" => 8,
        "+" | "-" => 9,
        "*" | "/" | "%" => 10,
        _ => return None,
    };
    Some(precedence)
}

impl Parser<'_> {
    /// `Expression`: assignments joined by commas.
    pub(super) fn parse_expression(&mut self, allow_in: bool) -> Result<NodeId, ParseError> {
        let start = self.start();
        let first = self.parse_assignment(allow_in)?;
        if !self.at_punct(",") {
            return Ok(first);
        }

        let mut expressions = vec![first];
        while self.eat_punct(",") {
            expressions.push(self.parse_assignment(allow_in)?);
        }
        let node = self
            .node(NodeKind::SequenceExpression, start)
            .with_list(Field::Expressions, expressions);
        self.alloc(node)
    }

    pub(super) fn parse_assignment(&mut self, allow_in: bool) -> Result<NodeId, ParseError> {
        self.nested(|parser| parser.parse_assignment_operands(allow_in))
    }

    fn parse_assignment_operands(&mut self, allow_in: bool) -> Result<NodeId, ParseError> {
        let start = self.start();
        let left = self.parse_conditional(allow_in)?;

        let operator = match self.current() {
            Some(t)
                if t.kind == TokenKind::Punctuator
                    && ASSIGNMENT_OPERATORS.contains(&t.value.as_str()) =>
            {
                t.value.clone()
            }
            _ => return Ok(left),
        };
        self.check_assignable(left, start, "Invalid left-hand side in assignment")?;
        self.bump();

        let right = self.parse_assignment(allow_in)?;
        let node = self
            .node(NodeKind::AssignmentExpression, start)
            .with_operator(operator)
            .with_child(Field::Left, left)
            .with_child(Field::Right, right);
        self.alloc(node)
    }

    fn parse_conditional(&mut self, allow_in: bool) -> Result<NodeId, ParseError> {
        let start = self.start();
        let test = self.parse_binary(1, allow_in)?;
        if !self.eat_punct("?") {
            return Ok(test);
        }
        let consequent = self.parse_assignment(true)?;
        self.expect_punct(":")?;
        let alternate = self.parse_assignment(allow_in)?;
        let node = self
            .node(NodeKind::ConditionalExpression, start)
            .with_child(Field::Test, test)
            .with_child(Field::Consequent, consequent)
            .with_child(Field::Alternate, alternate);
        self.alloc(node)
    }

    /// Operator at the current position with its precedence, if it is binary.
    fn binary_operator(&self, allow_in: bool) -> Option<(String, u8)> {
        let token = self.current()?;
        match token.kind {
            TokenKind::Punctuator => {}
            TokenKind::Keyword if token.value == "instanceof" => {}
            TokenKind::Keyword if token.value == "in" && allow_in => {}
            _ => return None,
        }
        binary_precedence(&token.value).map(|p| (token.value.clone(), p))
    }

    fn parse_binary(&mut self, min_precedence: u8, allow_in: bool) -> Result<NodeId, ParseError> {
        let start = self.start();
        let mut left = self.parse_unary()?;

        while let Some((operator, precedence)) = self.binary_operator(allow_in) {
            if precedence < min_precedence {
                break;
            }
            self.bump();
            let right = self.parse_binary(precedence + 1, allow_in)?;
            let kind = if operator == "||" || operator == "&&" {
                NodeKind::LogicalExpression
            } else {
                NodeKind::BinaryExpression
            };
            let node = self
                .node(kind, start)
                .with_operator(operator)
                .with_child(Field::Left, left)
                .with_child(Field::Right, right);
            left = self.alloc(node)?;
        }

        Ok(left)
    }

    fn parse_unary(&mut self) -> Result<NodeId, ParseError> {
        self.nested(Self::parse_prefixed)
    }

    fn parse_prefixed(&mut self) -> Result<NodeId, ParseError> {
        let start = self.start();
        let Some(token) = self.current() else {
            return Err(self.unexpected());
        };
        let operator = token.value.clone();
        let is_unary = match token.kind {
            TokenKind::Punctuator => UNARY_PUNCTUATORS.contains(&operator.as_str()),
            TokenKind::Keyword => UNARY_KEYWORDS.contains(&operator.as_str()),
            _ => false,
        };
        let is_update = token.kind == TokenKind::Punctuator && (operator == "++" || operator == "--");

        if is_unary {
            self.bump();
            let argument = self.parse_unary()?;
            let node = self
                .node(NodeKind::UnaryExpression, start)
                .with_operator(operator)
                .with_prefix(true)
                .with_child(Field::Argument, argument);
            return self.alloc(node);
        }

        if is_update {
            self.bump();
            let argument_start = self.start();
            let argument = self.parse_unary()?;
            self.check_assignable(argument, argument_start, "Invalid left-hand side in prefix operation")?;
            let node = self
                .node(NodeKind::UpdateExpression, start)
                .with_operator(operator)
                .with_prefix(true)
                .with_child(Field::Argument, argument);
            return self.alloc(node);
        }

        self.parse_postfix()
    }

    fn parse_postfix(&mut self) -> Result<NodeId, ParseError> {
        let start = self.start();
        let argument = self.parse_left_hand_side(true)?;

        let is_update = (self.at_punct("++") || self.at_punct("--")) && !self.newline_before();
        if !is_update {
            return Ok(argument);
        }
        self.check_assignable(argument, start, "Invalid left-hand side in postfix operation")?;
        let operator = self.current_value();
        self.bump();
        let node = self
            .node(NodeKind::UpdateExpression, start)
            .with_operator(operator)
            .with_prefix(false)
            .with_child(Field::Argument, argument);
        self.alloc(node)
    }

    /// Member accesses and, when `allow_call` is set, calls.
    fn parse_left_hand_side(&mut self, allow_call: bool) -> Result<NodeId, ParseError> {
        self.nested(|parser| parser.parse_member_chain(allow_call))
    }

    fn parse_member_chain(&mut self, allow_call: bool) -> Result<NodeId, ParseError> {
        let start = self.start();
        let mut expression = if self.at_keyword("new") {
            self.parse_new()?
        } else {
            self.parse_primary()?
        };

        loop {
            if self.eat_punct(".") {
                let property = self.parse_identifier_name()?;
                let node = self
                    .node(NodeKind::MemberExpression, start)
                    .with_computed(false)
                    .with_child(Field::Object, expression)
                    .with_child(Field::Property, property);
                expression = self.alloc(node)?;
            } else if self.eat_punct("[") {
                let property = self.parse_expression(true)?;
                self.expect_punct("]")?;
                let node = self
                    .node(NodeKind::MemberExpression, start)
                    .with_computed(true)
                    .with_child(Field::Object, expression)
                    .with_child(Field::Property, property);
                expression = self.alloc(node)?;
            } else if allow_call && self.at_punct("(") {
                let arguments = self.parse_arguments()?;
                let node = self
                    .node(NodeKind::CallExpression, start)
                    .with_child(Field::Callee, expression)
                    .with_list(Field::Arguments, arguments);
                expression = self.alloc(node)?;
            } else {
                break;
            }
        }

        Ok(expression)
    }

    /// `new Callee(args)`; the argument list is optional.
    fn parse_new(&mut self) -> Result<NodeId, ParseError> {
        let start = self.start();
        self.expect_keyword("new")?;
        let callee = self.parse_left_hand_side(false)?;
        let arguments = if self.at_punct("(") {
            self.parse_arguments()?
        } else {
            Vec::new()
        };
        let node = self
            .node(NodeKind::NewExpression, start)
            .with_child(Field::Callee, callee)
            .with_list(Field::Arguments, arguments);
        self.alloc(node)
    }

    fn parse_arguments(&mut self) -> Result<Vec<NodeId>, ParseError> {
        self.expect_punct("(")?;
        let mut arguments = Vec::new();
        if !self.at_punct(")") {
            loop {
                arguments.push(self.parse_assignment(true)?);
                if !self.eat_punct(",") {
                    break;
                }
            }
        }
        self.expect_punct(")")?;
        Ok(arguments)
    }

    fn parse_primary(&mut self) -> Result<NodeId, ParseError> {
        let start = self.start();
        let Some(token) = self.current() else {
            return Err(self.unexpected());
        };
        let kind = token.kind;
        let value = token.value.clone();

        match kind {
            TokenKind::Punctuator => match value.as_str() {
                "(" => {
                    self.bump();
                    let expression = self.parse_expression(true)?;
                    self.expect_punct(")")?;
                    Ok(expression)
                }
                "[" => self.parse_array(),
                "{" => self.parse_object(),
                _ => Err(self.unexpected()),
            },
            TokenKind::Keyword => match value.as_str() {
                "this" => {
                    self.bump();
                    let node = self.node(NodeKind::ThisExpression, start);
                    self.alloc(node)
                }
                "function" => self.parse_function(false),
                _ => Err(self.unexpected()),
            },
            TokenKind::Identifier => self.parse_identifier(),
            TokenKind::Numeric
            | TokenKind::String
            | TokenKind::RegularExpression
            | TokenKind::Boolean
            | TokenKind::Null => {
                self.bump();
                let node = self.node(NodeKind::Literal, start).with_value(value);
                self.alloc(node)
            }
        }
    }

    /// `[a, , b]`; elisions become holes.
    fn parse_array(&mut self) -> Result<NodeId, ParseError> {
        let start = self.start();
        self.expect_punct("[")?;
        let mut elements = Vec::new();
        while !self.at_punct("]") {
            if self.eat_punct(",") {
                elements.push(None);
                continue;
            }
            elements.push(Some(self.parse_assignment(true)?));
            if !self.at_punct("]") {
                self.expect_punct(",")?;
            }
        }
        self.bump();
        let node = self
            .node(NodeKind::ArrayExpression, start)
            .with_sparse_list(Field::Elements, elements);
        self.alloc(node)
    }

    fn parse_object(&mut self) -> Result<NodeId, ParseError> {
        let start = self.start();
        self.expect_punct("{")?;
        let mut properties = Vec::new();
        while !self.at_punct("}") {
            properties.push(self.parse_property()?);
            if !self.at_punct("}") {
                self.expect_punct(",")?;
            }
        }
        self.bump();
        let node = self
            .node(NodeKind::ObjectExpression, start)
            .with_list(Field::Properties, properties);
        self.alloc(node)
    }

    fn parse_property(&mut self) -> Result<NodeId, ParseError> {
        let start = self.start();

        let accessor = match self.current() {
            Some(t) if t.kind == TokenKind::Identifier && (t.value == "get" || t.value == "set") => {
                let next_is_name = self.peek().is_some_and(|n| {
                    !matches!(n.kind, TokenKind::Punctuator | TokenKind::RegularExpression)
                });
                next_is_name.then(|| {
                    if t.value == "get" {
                        PropertyKind::Get
                    } else {
                        PropertyKind::Set
                    }
                })
            }
            _ => None,
        };

        if let Some(property_kind) = accessor {
            self.bump();
            let key = self.parse_property_key()?;
            let function_start = self.start();
            let (params, body) = self.parse_function_rest()?;
            let function = self
                .node(NodeKind::FunctionExpression, function_start)
                .with_list(Field::Params, params)
                .with_child(Field::Body, body);
            let value = self.alloc(function)?;
            let node = self
                .node(NodeKind::Property, start)
                .with_property_kind(property_kind)
                .with_child(Field::Key, key)
                .with_child(Field::Value, value);
            return self.alloc(node);
        }

        let key = self.parse_property_key()?;
        self.expect_punct(":")?;
        let value = self.parse_assignment(true)?;
        let node = self
            .node(NodeKind::Property, start)
            .with_property_kind(PropertyKind::Init)
            .with_child(Field::Key, key)
            .with_child(Field::Value, value);
        self.alloc(node)
    }

    fn parse_property_key(&mut self) -> Result<NodeId, ParseError> {
        match self.current_kind() {
            Some(TokenKind::String | TokenKind::Numeric) => {
                let start = self.start();
                let value = self.current_value();
                self.bump();
                let node = self.node(NodeKind::Literal, start).with_value(value);
                self.alloc(node)
            }
            _ => self.parse_identifier_name(),
        }
    }

    fn check_assignable(&self, id: NodeId, start: usize, message: &str) -> Result<(), ParseError> {
        match self.kind_of(id) {
            NodeKind::Identifier | NodeKind::MemberExpression => Ok(()),
            _ => Err(self.error_at(start, message)),
        }
    }
}
