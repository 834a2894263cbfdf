//! Statement parsing.

use super::Parser;
use crate::error::ParseError;
use style_lint_core::{Field, NodeId, NodeKind, TokenKind};

impl Parser<'_> {
    pub(super) fn parse_statement(&mut self) -> Result<NodeId, ParseError> {
        self.nested(Self::parse_statement_kind)
    }

    fn parse_statement_kind(&mut self) -> Result<NodeId, ParseError> {
        let Some(token) = self.current() else {
            return Err(self.unexpected());
        };
        let kind = token.kind;
        let value = token.value.clone();

        match (kind, value.as_str()) {
            (TokenKind::Punctuator, "{") => self.parse_block(),
            (TokenKind::Punctuator, ";") => {
                let start = self.start();
                self.bump();
                let node = self.node(NodeKind::EmptyStatement, start);
                self.alloc(node)
            }
            (TokenKind::Keyword, "var") => self.parse_var_statement(),
            (TokenKind::Keyword, "if") => self.parse_if(),
            (TokenKind::Keyword, "do") => self.parse_do_while(),
            (TokenKind::Keyword, "while") => self.parse_while(),
            (TokenKind::Keyword, "for") => self.parse_for(),
            (TokenKind::Keyword, "continue") => self.parse_jump(NodeKind::ContinueStatement),
            (TokenKind::Keyword, "break") => self.parse_jump(NodeKind::BreakStatement),
            (TokenKind::Keyword, "return") => self.parse_return(),
            (TokenKind::Keyword, "with") => self.parse_with(),
            (TokenKind::Keyword, "switch") => self.parse_switch(),
            (TokenKind::Keyword, "throw") => self.parse_throw(),
            (TokenKind::Keyword, "try") => self.parse_try(),
            (TokenKind::Keyword, "debugger") => {
                let start = self.start();
                self.bump();
                self.consume_semicolon()?;
                let node = self.node(NodeKind::DebuggerStatement, start);
                self.alloc(node)
            }
            (TokenKind::Keyword, "function") => self.parse_function(true),
            (TokenKind::Identifier, _) if self.peek().is_some_and(|t| t.is_punctuator(":")) => {
                self.parse_labeled()
            }
            _ => self.parse_expression_statement(),
        }
    }

    /// `{ statements }`
    pub(super) fn parse_block(&mut self) -> Result<NodeId, ParseError> {
        let start = self.start();
        self.expect_punct("{")?;
        let mut body = Vec::new();
        while !self.at_punct("}") {
            body.push(self.parse_statement()?);
        }
        self.bump();
        let node = self
            .node(NodeKind::BlockStatement, start)
            .with_list(Field::Body, body);
        self.alloc(node)
    }

    fn parse_var_statement(&mut self) -> Result<NodeId, ParseError> {
        let start = self.start();
        self.bump();
        let declarations = self.parse_var_declarators(true)?;
        self.consume_semicolon()?;
        let node = self
            .node(NodeKind::VariableDeclaration, start)
            .with_value("var")
            .with_list(Field::Declarations, declarations);
        self.alloc(node)
    }

    /// `a = 1, b` after the `var` keyword.
    fn parse_var_declarators(&mut self, allow_in: bool) -> Result<Vec<NodeId>, ParseError> {
        let mut declarations = Vec::new();
        loop {
            let start = self.start();
            let id = self.parse_identifier()?;
            let init = if self.eat_punct("=") {
                Some(self.parse_assignment(allow_in)?)
            } else {
                None
            };
            let node = self
                .node(NodeKind::VariableDeclarator, start)
                .with_child(Field::Id, id)
                .with_optional_child(Field::Init, init);
            declarations.push(self.alloc(node)?);
            if !self.eat_punct(",") {
                break;
            }
        }
        Ok(declarations)
    }

    fn parse_if(&mut self) -> Result<NodeId, ParseError> {
        let start = self.start();
        self.bump();
        self.expect_punct("(")?;
        let test = self.parse_expression(true)?;
        self.expect_punct(")")?;
        let consequent = self.parse_statement()?;
        let alternate = if self.at_keyword("else") {
            self.bump();
            Some(self.parse_statement()?)
        } else {
            None
        };
        let node = self
            .node(NodeKind::IfStatement, start)
            .with_child(Field::Test, test)
            .with_child(Field::Consequent, consequent)
            .with_optional_child(Field::Alternate, alternate);
        self.alloc(node)
    }

    fn parse_do_while(&mut self) -> Result<NodeId, ParseError> {
        let start = self.start();
        self.bump();
        let body = self.parse_statement()?;
        self.expect_keyword("while")?;
        self.expect_punct("(")?;
        let test = self.parse_expression(true)?;
        self.expect_punct(")")?;
        self.eat_punct(";");
        let node = self
            .node(NodeKind::DoWhileStatement, start)
            .with_child(Field::Body, body)
            .with_child(Field::Test, test);
        self.alloc(node)
    }

    fn parse_while(&mut self) -> Result<NodeId, ParseError> {
        let start = self.start();
        self.bump();
        self.expect_punct("(")?;
        let test = self.parse_expression(true)?;
        self.expect_punct(")")?;
        let body = self.parse_statement()?;
        let node = self
            .node(NodeKind::WhileStatement, start)
            .with_child(Field::Test, test)
            .with_child(Field::Body, body);
        self.alloc(node)
    }

    fn parse_for(&mut self) -> Result<NodeId, ParseError> {
        let start = self.start();
        self.bump();
        self.expect_punct("(")?;

        let init = if self.at_punct(";") {
            None
        } else if self.at_keyword("var") {
            let var_start = self.start();
            self.bump();
            let declarations = self.parse_var_declarators(false)?;
            let node = self
                .node(NodeKind::VariableDeclaration, var_start)
                .with_value("var")
                .with_list(Field::Declarations, declarations);
            Some(self.alloc(node)?)
        } else {
            Some(self.parse_expression(false)?)
        };

        if let Some(left) = init {
            if self.at_keyword("in") {
                let single_declarator = self.kind_of(left) != NodeKind::VariableDeclaration
                    || self.tree.node(left).list(Field::Declarations).len() == 1;
                let assignable = matches!(
                    self.kind_of(left),
                    NodeKind::VariableDeclaration
                        | NodeKind::Identifier
                        | NodeKind::MemberExpression
                );
                if !single_declarator || !assignable {
                    return Err(self.error_at(self.start(), "Invalid left-hand side in for-in"));
                }
                self.bump();
                let right = self.parse_expression(true)?;
                self.expect_punct(")")?;
                let body = self.parse_statement()?;
                let node = self
                    .node(NodeKind::ForInStatement, start)
                    .with_child(Field::Left, left)
                    .with_child(Field::Right, right)
                    .with_child(Field::Body, body);
                return self.alloc(node);
            }
        }

        self.expect_punct(";")?;
        let test = if self.at_punct(";") {
            None
        } else {
            Some(self.parse_expression(true)?)
        };
        self.expect_punct(";")?;
        let update = if self.at_punct(")") {
            None
        } else {
            Some(self.parse_expression(true)?)
        };
        self.expect_punct(")")?;
        let body = self.parse_statement()?;
        let node = self
            .node(NodeKind::ForStatement, start)
            .with_optional_child(Field::Init, init)
            .with_optional_child(Field::Test, test)
            .with_optional_child(Field::Update, update)
            .with_child(Field::Body, body);
        self.alloc(node)
    }

    /// `break` / `continue` with an optional label on the same line.
    fn parse_jump(&mut self, kind: NodeKind) -> Result<NodeId, ParseError> {
        let start = self.start();
        self.bump();
        let label = if self.current_kind() == Some(TokenKind::Identifier) && !self.newline_before()
        {
            Some(self.parse_identifier()?)
        } else {
            None
        };
        self.consume_semicolon()?;
        let node = self.node(kind, start).with_optional_child(Field::Label, label);
        self.alloc(node)
    }

    fn parse_return(&mut self) -> Result<NodeId, ParseError> {
        let start = self.start();
        self.bump();
        let has_argument = self.current().is_some()
            && !self.at_punct(";")
            && !self.at_punct("}")
            && !self.newline_before();
        let argument = if has_argument {
            Some(self.parse_expression(true)?)
        } else {
            None
        };
        self.consume_semicolon()?;
        let node = self
            .node(NodeKind::ReturnStatement, start)
            .with_optional_child(Field::Argument, argument);
        self.alloc(node)
    }

    fn parse_with(&mut self) -> Result<NodeId, ParseError> {
        let start = self.start();
        self.bump();
        self.expect_punct("(")?;
        let object = self.parse_expression(true)?;
        self.expect_punct(")")?;
        let body = self.parse_statement()?;
        let node = self
            .node(NodeKind::WithStatement, start)
            .with_child(Field::Object, object)
            .with_child(Field::Body, body);
        self.alloc(node)
    }

    fn parse_switch(&mut self) -> Result<NodeId, ParseError> {
        let start = self.start();
        self.bump();
        self.expect_punct("(")?;
        let discriminant = self.parse_expression(true)?;
        self.expect_punct(")")?;
        self.expect_punct("{")?;

        let mut cases = Vec::new();
        let mut seen_default = false;
        while !self.at_punct("}") {
            let case_start = self.start();
            let test = if self.at_keyword("case") {
                self.bump();
                Some(self.parse_expression(true)?)
            } else if self.at_keyword("default") {
                if seen_default {
                    return Err(self.error_at(case_start, "More than one default clause in switch statement"));
                }
                seen_default = true;
                self.bump();
                None
            } else {
                return Err(self.unexpected());
            };
            self.expect_punct(":")?;

            let mut consequent = Vec::new();
            while !(self.at_punct("}") || self.at_keyword("case") || self.at_keyword("default")) {
                consequent.push(self.parse_statement()?);
            }
            let node = self
                .node(NodeKind::SwitchCase, case_start)
                .with_optional_child(Field::Test, test)
                .with_list(Field::Consequent, consequent);
            cases.push(self.alloc(node)?);
        }
        self.bump();

        let node = self
            .node(NodeKind::SwitchStatement, start)
            .with_child(Field::Discriminant, discriminant)
            .with_list(Field::Cases, cases);
        self.alloc(node)
    }

    fn parse_throw(&mut self) -> Result<NodeId, ParseError> {
        let start = self.start();
        self.bump();
        if self.newline_before() {
            return Err(self.error_at(self.start(), "Illegal newline after throw"));
        }
        let argument = self.parse_expression(true)?;
        self.consume_semicolon()?;
        let node = self
            .node(NodeKind::ThrowStatement, start)
            .with_child(Field::Argument, argument);
        self.alloc(node)
    }

    fn parse_try(&mut self) -> Result<NodeId, ParseError> {
        let start = self.start();
        self.bump();
        let block = self.parse_block()?;

        let handler = if self.at_keyword("catch") {
            let catch_start = self.start();
            self.bump();
            self.expect_punct("(")?;
            let param = self.parse_identifier()?;
            self.expect_punct(")")?;
            let body = self.parse_block()?;
            let node = self
                .node(NodeKind::CatchClause, catch_start)
                .with_child(Field::Param, param)
                .with_child(Field::Body, body);
            Some(self.alloc(node)?)
        } else {
            None
        };

        let finalizer = if self.at_keyword("finally") {
            self.bump();
            Some(self.parse_block()?)
        } else {
            None
        };

        if handler.is_none() && finalizer.is_none() {
            return Err(self.error_at(self.start(), "Missing catch or finally after try"));
        }

        let node = self
            .node(NodeKind::TryStatement, start)
            .with_child(Field::Block, block)
            .with_optional_child(Field::Handler, handler)
            .with_optional_child(Field::Finalizer, finalizer);
        self.alloc(node)
    }

    fn parse_labeled(&mut self) -> Result<NodeId, ParseError> {
        let start = self.start();
        let label = self.parse_identifier()?;
        self.expect_punct(":")?;
        let body = self.parse_statement()?;
        let node = self
            .node(NodeKind::LabeledStatement, start)
            .with_child(Field::Label, label)
            .with_child(Field::Body, body);
        self.alloc(node)
    }

    fn parse_expression_statement(&mut self) -> Result<NodeId, ParseError> {
        let start = self.start();
        let expression = self.parse_expression(true)?;
        self.consume_semicolon()?;
        let node = self
            .node(NodeKind::ExpressionStatement, start)
            .with_child(Field::Expression, expression);
        self.alloc(node)
    }

    /// Function declaration or expression: `function [name](params) { body }`.
    pub(super) fn parse_function(&mut self, declaration: bool) -> Result<NodeId, ParseError> {
        let start = self.start();
        self.expect_keyword("function")?;
        let id = if declaration || self.current_kind() == Some(TokenKind::Identifier) {
            Some(self.parse_identifier()?)
        } else {
            None
        };
        let (params, body) = self.parse_function_rest()?;
        let kind = if declaration {
            NodeKind::FunctionDeclaration
        } else {
            NodeKind::FunctionExpression
        };
        let node = self
            .node(kind, start)
            .with_optional_child(Field::Id, id)
            .with_list(Field::Params, params)
            .with_child(Field::Body, body);
        self.alloc(node)
    }

    /// `(params) { body }`
    pub(super) fn parse_function_rest(&mut self) -> Result<(Vec<NodeId>, NodeId), ParseError> {
        self.expect_punct("(")?;
        let mut params = Vec::new();
        if !self.at_punct(")") {
            loop {
                params.push(self.parse_identifier()?);
                if !self.eat_punct(",") {
                    break;
                }
            }
        }
        self.expect_punct(")")?;
        let body = self.parse_block()?;
        Ok((params, body))
    }
}
