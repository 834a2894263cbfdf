//! Lexer for ES5 source.
//!
//! The token grammar is declared with `logos`. Two things need context the
//! generated automaton does not have: block comments (scanned to their
//! closing `*/` by a callback) and regular expression literals, which are
//! rescanned by hand when the previous token allows an expression to start.

use crate::error::ParseError;
use logos::Logos;
use style_lint_core::{Comment, CommentKind, LineIndex, Span, Token, TokenKind};

/// Raw token classes recognized by the automaton.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n\x{000B}\x{000C}\x{00A0}\x{FEFF}\x{2028}\x{2029}]+")]
enum RawToken {
    #[regex(r"//[^\r\n\x{2028}\x{2029}]*")]
    LineComment,

    #[token("/*", block_comment)]
    BlockComment,

    #[regex(r"[a-zA-Z_$][a-zA-Z0-9_$]*")]
    Word,

    #[regex(r"[0-9]+(\.[0-9]*)?([eE][+-]?[0-9]+)?")]
    #[regex(r"\.[0-9]+([eE][+-]?[0-9]+)?")]
    #[regex(r"0[xX][0-9a-fA-F]+")]
    Number,

    #[regex(r#""([^"\\\r\n]|\\(.|\r\n|\r|\n))*""#)]
    #[regex(r"'([^'\\\r\n]|\\(.|\r\n|\r|\n))*'")]
    Str,

    #[token("/")]
    #[token("/=")]
    Slash,

    #[token("{")]
    #[token("}")]
    #[token("(")]
    #[token(")")]
    #[token("[")]
    #[token("]")]
    #[token(";")]
    #[token(",")]
    #[token(".")]
    #[token("?")]
    #[token(":")]
    #[token("<")]
    #[token(">")]
    #[token("<=")]
    #[token(">=")]
    #[token("==")]
    #[token("!=")]
    #[token("===")]
    #[token("!==")]
    #[token("+")]
    #[token("-")]
    #[token("*")]
    #[token("%")]
    #[token("++")]
    #[token("--")]
    #[token("<<")]
    #[token(">>")]
    #[token(">>>")]
    #[token("&")]
    #[token("|")]
    #[token("^")]
    #[token("!")]
    #[token("~")]
    #[token("&&")]
    #[token("||")]
    #[token("=")]
    #[token("+=")]
    #[token("-=")]
    #[token("*=")]
    #[token("%=")]
    #[token("<<=")]
    #[token(">>=")]
    #[token(">>>=")]
    #[token("&=")]
    #[token("|=")]
    #[token("^=")]
    Punct,
}

fn block_comment(lex: &mut logos::Lexer<RawToken>) -> bool {
    let remainder = lex.remainder();
    if let Some(end) = remainder.find("*/") {
        lex.bump(end + 2);
        true
    } else {
        lex.bump(remainder.len());
        false
    }
}

/// Reserved words, including the future reserved words of non-strict code.
const KEYWORDS: &[&str] = &[
    "break", "case", "catch", "continue", "debugger", "default", "delete", "do", "else",
    "finally", "for", "function", "if", "in", "instanceof", "new", "return", "switch", "this",
    "throw", "try", "typeof", "var", "void", "while", "with", "class", "const", "enum",
    "export", "extends", "import", "super",
];

/// Returns true if `word` is a reserved word.
#[must_use]
pub fn is_keyword(word: &str) -> bool {
    KEYWORDS.contains(&word)
}

/// Tokens and comments of one input.
#[derive(Debug, Default)]
pub struct Lexed {
    /// Tokens in source order.
    pub tokens: Vec<Token>,
    /// For each token, whether a line terminator precedes it.
    pub newline_before: Vec<bool>,
    /// Comments in source order.
    pub comments: Vec<Comment>,
}

/// Splits `text` into tokens and comments.
///
/// # Errors
///
/// Returns [`ParseError`] on characters that start no token, unterminated
/// strings, comments and regular expressions.
pub fn tokenize(text: &str, index: &LineIndex) -> Result<Lexed, ParseError> {
    let mut lexed = Lexed::default();
    let mut lexer = RawToken::lexer(text);
    let mut last_end = 0;

    while let Some(result) = lexer.next() {
        let range = lexer.span();
        let Ok(raw) = result else {
            let message = if text[range.start..].starts_with("/*") {
                "Unterminated comment"
            } else {
                "Unexpected token ILLEGAL"
            };
            return Err(error_at(text, index, range.start, message));
        };

        let kind = match raw {
            RawToken::LineComment | RawToken::BlockComment => {
                let slice = lexer.slice();
                let (kind, value) = if raw == RawToken::LineComment {
                    (CommentKind::Line, &slice[2..])
                } else {
                    (CommentKind::Block, &slice[2..slice.len() - 2])
                };
                let span = Span::new(range.start, range.end);
                lexed
                    .comments
                    .push(Comment::new(kind, value, span, index.location(text, span)));
                continue;
            }
            RawToken::Word => classify_word(lexer.slice()),
            RawToken::Number => TokenKind::Numeric,
            RawToken::Str => TokenKind::String,
            RawToken::Punct => TokenKind::Punctuator,
            RawToken::Slash => {
                if regex_allowed(lexed.tokens.last()) {
                    let end = scan_regex(text, range.start).ok_or_else(|| {
                        error_at(text, index, range.start, "Invalid regular expression: missing /")
                    })?;
                    lexer.bump(end - range.end);
                    TokenKind::RegularExpression
                } else {
                    TokenKind::Punctuator
                }
            }
        };

        let range = lexer.span();
        let span = Span::new(range.start, range.end);
        lexed.newline_before.push(has_line_terminator(&text[last_end..range.start]));
        lexed.tokens.push(Token::new(
            kind,
            lexer.slice(),
            span,
            index.location(text, span),
        ));
        last_end = range.end;
    }

    Ok(lexed)
}

fn classify_word(word: &str) -> TokenKind {
    match word {
        "true" | "false" => TokenKind::Boolean,
        "null" => TokenKind::Null,
        w if is_keyword(w) => TokenKind::Keyword,
        _ => TokenKind::Identifier,
    }
}

/// A `/` starts a regular expression unless the previous token ends an operand.
fn regex_allowed(previous: Option<&Token>) -> bool {
    let Some(previous) = previous else {
        return true;
    };
    match previous.kind {
        TokenKind::Punctuator => !matches!(previous.value.as_str(), ")" | "]" | "}"),
        TokenKind::Keyword => previous.value != "this",
        _ => false,
    }
}

/// Returns the end offset of the regular expression literal starting at `start`.
fn scan_regex(text: &str, start: usize) -> Option<usize> {
    let mut chars = text[start + 1..].char_indices();
    let mut in_class = false;
    let body_end = loop {
        let (offset, ch) = chars.next()?;
        match ch {
            '\\' => {
                let (_, escaped) = chars.next()?;
                if is_line_terminator(escaped) {
                    return None;
                }
            }
            '[' => in_class = true,
            ']' => in_class = false,
            '/' if !in_class => break start + 1 + offset + 1,
            c if is_line_terminator(c) => return None,
            _ => {}
        }
    };

    let flags = text[body_end..]
        .char_indices()
        .find(|(_, c)| !(c.is_ascii_alphanumeric() || *c == '_' || *c == '$'))
        .map_or(text.len() - body_end, |(offset, _)| offset);
    Some(body_end + flags)
}

fn is_line_terminator(ch: char) -> bool {
    matches!(ch, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

fn has_line_terminator(text: &str) -> bool {
    text.chars().any(is_line_terminator)
}

pub(crate) fn error_at(text: &str, index: &LineIndex, offset: usize, message: &str) -> ParseError {
    let position = index.position(text, offset);
    ParseError {
        message: message.to_string(),
        offset,
        line: position.line,
        column: position.column,
    }
}
