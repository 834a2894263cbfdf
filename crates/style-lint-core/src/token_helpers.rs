//! Token adjacency queries shared by the spacing rules.
//!
//! Offsets are token boundaries. Looking forward resolves the token that
//! starts exactly at the offset, looking backward resolves the token that ends
//! exactly there. When nothing touches the boundary, whitespace or a comment
//! separates the two sides, so they do not stick.

use crate::source::SourceFile;
use crate::token::{Token, TokenKind};

/// Resolves the token adjacent to `offset`, looking through grouping parentheses.
///
/// Forward, a `)` at the boundary is skipped and resolution continues from its
/// end; backward, a `(` is skipped and resolution continues from its start.
/// This makes `(a)+(b)` behave like `a+b`.
#[must_use]
pub fn adjacent_token(file: &SourceFile, offset: usize, backward: bool) -> Option<&Token> {
    let mut offset = offset;
    loop {
        let token = token_touching(file, offset, backward)?;
        if token.kind == TokenKind::Punctuator && token.value == grouping_paren(backward) {
            offset = if backward {
                token.span.start
            } else {
                token.span.end
            };
            continue;
        }
        return Some(token);
    }
}

/// Returns true if the token touching `offset` is `)` (forward) or `(` (backward).
#[must_use]
pub fn is_parenthesis_at(file: &SourceFile, offset: usize, backward: bool) -> bool {
    token_touching(file, offset, backward).is_some_and(|t| t.is_punctuator(grouping_paren(backward)))
}

/// Scans the token array from `offset` for a token whose text is `value`.
///
/// Forward scanning starts at the first token at or after `offset`, backward
/// scanning at the last token at or before it.
#[must_use]
pub fn find_punctuator_from<'a>(
    file: &'a SourceFile,
    offset: usize,
    value: &str,
    backward: bool,
) -> Option<&'a Token> {
    let tokens = file.tokens();
    if backward {
        let start = file.token_position_at_or_before(offset)?;
        tokens[..=start].iter().rev().find(|t| t.value == value)
    } else {
        let start = file.token_position_at_or_after(offset)?;
        tokens[start..].iter().find(|t| t.value == value)
    }
}

/// Like [`adjacent_token`], but only returns a punctuator whose text is `value`.
#[must_use]
pub fn token_if_punctuator_at<'a>(
    file: &'a SourceFile,
    offset: usize,
    value: &str,
    backward: bool,
) -> Option<&'a Token> {
    adjacent_token(file, offset, backward).filter(|t| t.is_punctuator(value))
}

fn token_touching(file: &SourceFile, offset: usize, backward: bool) -> Option<&Token> {
    let position = if backward {
        file.token_position_by_range_end(offset)
    } else {
        file.token_position_by_range_start(offset)
    }?;
    file.token(position)
}

fn grouping_paren(backward: bool) -> &'static str {
    if backward {
        "("
    } else {
        ")"
    }
}
