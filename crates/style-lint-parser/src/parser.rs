//! Recursive descent parser producing ESTree-shaped nodes.
//!
//! Statements live in [`stmt`], expressions in [`expr`]. Every node's range
//! starts at the first token consumed for it and ends at the last one, so
//! grouping parentheses are outside the range of the expression they wrap
//! but inside the range of an enclosing node that starts with them.

mod expr;
mod stmt;

use crate::error::ParseError;
use crate::lexer::{self, error_at, Lexed};
use style_lint_core::{
    Comment, Field, LineIndex, Node, NodeId, NodeKind, ParsedSource, Span, SyntaxTree, Token,
    TokenKind,
};

/// Deepest nesting of statements and expressions accepted before the input
/// is rejected, so pathological input fails instead of exhausting the stack.
const MAX_DEPTH: usize = 256;

/// Parser state for one input.
pub(crate) struct Parser<'a> {
    text: &'a str,
    index: LineIndex,
    tokens: Vec<Token>,
    newline_before: Vec<bool>,
    comments: Vec<Comment>,
    /// Current position in the token stream.
    pos: usize,
    /// End offset of the most recently consumed token.
    last_end: usize,
    /// Statements and expressions currently being parsed.
    depth: usize,
    tree: SyntaxTree,
}

impl<'a> Parser<'a> {
    /// Tokenizes `text` and prepares a parser over it.
    pub(crate) fn new(text: &'a str) -> Result<Self, ParseError> {
        let index = LineIndex::new(text);
        let Lexed {
            tokens,
            newline_before,
            comments,
        } = lexer::tokenize(text, &index)?;
        Ok(Self {
            text,
            index,
            tokens,
            newline_before,
            comments,
            pos: 0,
            last_end: 0,
            depth: 0,
            tree: SyntaxTree::default(),
        })
    }

    /// Parses the whole input as a `Program`.
    pub(crate) fn parse_program(mut self) -> Result<ParsedSource, ParseError> {
        let start = self.tokens.first().map_or(0, |t| t.span.start);
        let end = self.tokens.last().map_or(start, |t| t.span.end);

        let mut body = Vec::new();
        while self.current().is_some() {
            body.push(self.parse_statement()?);
        }

        let span = Span::new(start, end);
        let program = Node::new(NodeKind::Program, span, self.index.location(self.text, span))
            .with_list(Field::Body, body);
        let root = self.alloc(program)?;
        self.tree.set_root(root);

        Ok(ParsedSource {
            tree: self.tree,
            tokens: self.tokens,
            comments: self.comments,
        })
    }

    // ========================================================================
    // Token Management
    // ========================================================================

    fn current(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos + 1)
    }

    fn current_kind(&self) -> Option<TokenKind> {
        self.current().map(|t| t.kind)
    }

    /// Text of the current token, cloned so the parser can keep mutating.
    fn current_value(&self) -> String {
        self.current().map(|t| t.value.clone()).unwrap_or_default()
    }

    fn at_punct(&self, value: &str) -> bool {
        self.current().is_some_and(|t| t.is_punctuator(value))
    }

    fn at_keyword(&self, value: &str) -> bool {
        self.current().is_some_and(|t| t.is_keyword(value))
    }

    /// Consumes the current token.
    fn bump(&mut self) {
        if let Some(token) = self.tokens.get(self.pos) {
            self.last_end = token.span.end;
            self.pos += 1;
        }
    }

    fn eat_punct(&mut self, value: &str) -> bool {
        let found = self.at_punct(value);
        if found {
            self.bump();
        }
        found
    }

    fn expect_punct(&mut self, value: &str) -> Result<(), ParseError> {
        if self.eat_punct(value) {
            Ok(())
        } else {
            Err(self.unexpected())
        }
    }

    fn expect_keyword(&mut self, value: &str) -> Result<(), ParseError> {
        if self.at_keyword(value) {
            self.bump();
            Ok(())
        } else {
            Err(self.unexpected())
        }
    }

    /// Start offset of the current token, or the end of input.
    fn start(&self) -> usize {
        self.current().map_or(self.last_end, |t| t.span.start)
    }

    /// Whether a line terminator separates the current token from the previous one.
    fn newline_before(&self) -> bool {
        self.newline_before.get(self.pos).copied().unwrap_or(true)
    }

    /// Automatic semicolon insertion: a `;` is optional before `}`, at the
    /// end of input and after a line break.
    fn consume_semicolon(&mut self) -> Result<(), ParseError> {
        if self.eat_punct(";") || self.at_punct("}") || self.current().is_none() {
            return Ok(());
        }
        if self.newline_before() {
            return Ok(());
        }
        Err(self.unexpected())
    }

    // ========================================================================
    // Node Construction
    // ========================================================================

    /// Node spanning from `start` to the end of the last consumed token.
    fn node(&self, kind: NodeKind, start: usize) -> Node {
        let span = Span::new(start, self.last_end.max(start));
        Node::new(kind, span, self.index.location(self.text, span))
    }

    fn alloc(&mut self, node: Node) -> Result<NodeId, ParseError> {
        let start = node.span.start;
        self.tree
            .alloc(node)
            .map_err(|err| self.error_at(start, &format!("Input too large: {err}")))
    }

    /// Runs `parse` one nesting level deeper.
    fn nested<T>(
        &mut self,
        parse: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        if self.depth >= MAX_DEPTH {
            return Err(self.error_at(self.start(), "Maximum nesting depth exceeded"));
        }
        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    fn kind_of(&self, id: NodeId) -> NodeKind {
        self.tree.node(id).kind
    }

    /// Consumes an identifier token into an `Identifier` node.
    fn parse_identifier(&mut self) -> Result<NodeId, ParseError> {
        if self.current_kind() != Some(TokenKind::Identifier) {
            return Err(self.unexpected());
        }
        let start = self.start();
        let name = self.current_value();
        self.bump();
        let node = self.node(NodeKind::Identifier, start).with_value(name);
        self.alloc(node)
    }

    /// Consumes any word, reserved or not, into an `Identifier` node.
    fn parse_identifier_name(&mut self) -> Result<NodeId, ParseError> {
        let is_word = matches!(
            self.current_kind(),
            Some(TokenKind::Identifier | TokenKind::Keyword | TokenKind::Boolean | TokenKind::Null)
        );
        if !is_word {
            return Err(self.unexpected());
        }
        let start = self.start();
        let name = self.current_value();
        self.bump();
        let node = self.node(NodeKind::Identifier, start).with_value(name);
        self.alloc(node)
    }

    // ========================================================================
    // Error Handling
    // ========================================================================

    fn unexpected(&self) -> ParseError {
        match self.current() {
            None => error_at(
                self.text,
                &self.index,
                self.text.len(),
                "Unexpected end of input",
            ),
            Some(token) => {
                let message = match token.kind {
                    TokenKind::Identifier => "Unexpected identifier".to_string(),
                    TokenKind::Numeric => "Unexpected number".to_string(),
                    TokenKind::String => "Unexpected string".to_string(),
                    TokenKind::Keyword => "Unexpected reserved word".to_string(),
                    _ => format!("Unexpected token {}", token.value),
                };
                error_at(self.text, &self.index, token.span.start, &message)
            }
        }
    }

    fn error_at(&self, offset: usize, message: &str) -> ParseError {
        error_at(self.text, &self.index, offset, message)
    }
}
