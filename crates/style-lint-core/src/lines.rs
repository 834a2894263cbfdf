//! Source lines with comments blanked out.

use crate::location::Position;
use crate::token::Comment;

/// Lines where every comment character is replaced by a space, so columns of
/// the remaining code are unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StrippedLines {
    /// One entry per physical line.
    pub lines: Vec<String>,
    /// Closing positions of multi-line comments followed by code on the same line.
    pub stray_content: Vec<Position>,
}

impl StrippedLines {
    /// Builds stripped lines from raw lines and the comment list.
    #[must_use]
    pub fn build(lines: &[String], comments: &[Comment]) -> Self {
        let mut rows: Vec<Vec<char>> = lines.iter().map(|l| l.chars().collect()).collect();

        for comment in comments {
            let start = comment.loc.start;
            let end = comment.loc.end;
            let first = start.line - 1;
            let last = end.line - 1;

            if first == last {
                blank(&mut rows, first, start.column, Some(end.column));
                continue;
            }

            blank(&mut rows, first, start.column, None);
            for row in first + 1..last {
                blank(&mut rows, row, 0, None);
            }
            blank(&mut rows, last, 0, Some(end.column));
        }

        // Every comment is blanked before looking for code after a closing `*/`.
        let mut stray_content: Vec<Position> = comments
            .iter()
            .filter(|comment| comment.loc.is_multiline())
            .map(|comment| comment.loc.end)
            .filter(|end| {
                rows.get(end.line - 1)
                    .is_some_and(|row| row.iter().skip(end.column).any(|c| !c.is_whitespace()))
            })
            .collect();

        stray_content.sort();
        Self {
            lines: rows.into_iter().map(|row| row.into_iter().collect()).collect(),
            stray_content,
        }
    }

    /// Returns the stripped text of a 1-based line.
    #[must_use]
    pub fn line(&self, line: usize) -> Option<&str> {
        line.checked_sub(1)
            .and_then(|idx| self.lines.get(idx))
            .map(String::as_str)
    }
}

fn blank(rows: &mut [Vec<char>], row: usize, from: usize, to: Option<usize>) {
    let Some(chars) = rows.get_mut(row) else {
        return;
    };
    let to = to.unwrap_or(chars.len()).min(chars.len());
    for c in chars.iter_mut().take(to).skip(from) {
        *c = ' ';
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::{SourceLocation, Span};
    use crate::token::CommentKind;

    fn comment(kind: CommentKind, start: (usize, usize), end: (usize, usize)) -> Comment {
        Comment::new(
            kind,
            "",
            Span::default(),
            SourceLocation::new(Position::new(start.0, start.1), Position::new(end.0, end.1)),
        )
    }

    fn lines(text: &str) -> Vec<String> {
        text.split('\n').map(String::from).collect()
    }

    #[test]
    fn blanks_line_comments_in_place() {
        let raw = lines("a; // note\nb;");
        let stripped = StrippedLines::build(&raw, &[comment(CommentKind::Line, (1, 3), (1, 10))]);
        assert_eq!(stripped.lines, vec!["a;        ", "b;"]);
        assert!(stripped.stray_content.is_empty());
    }

    #[test]
    fn blanks_multiline_comments_and_keeps_columns() {
        let raw = lines("x; /* one\n  two\n*/ y;");
        let stripped = StrippedLines::build(&raw, &[comment(CommentKind::Block, (1, 3), (3, 2))]);
        assert_eq!(stripped.lines, vec!["x;       ", "     ", "   y;"]);
        assert_eq!(stripped.stray_content, vec![Position::new(3, 2)]);
    }

    #[test]
    fn comment_closing_alone_is_not_stray() {
        let raw = lines("/*\n * doc\n */\nfoo();");
        let stripped = StrippedLines::build(&raw, &[comment(CommentKind::Block, (1, 0), (3, 3))]);
        assert!(stripped.stray_content.is_empty());
        assert_eq!(stripped.line(4), Some("foo();"));
    }

    #[test]
    fn comment_after_closing_line_is_not_stray() {
        let raw = lines("/* a\n */ // x\nb();");
        let stripped = StrippedLines::build(
            &raw,
            &[
                comment(CommentKind::Block, (1, 0), (2, 3)),
                comment(CommentKind::Line, (2, 4), (2, 8)),
            ],
        );
        assert!(stripped.stray_content.is_empty());
        assert_eq!(stripped.line(2), Some("        "));
    }
}
