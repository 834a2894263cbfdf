//! Byte spans and line/column positions.

use serde::{Deserialize, Serialize};

/// A half-open byte range `[start, end)` into the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Span {
    /// Byte offset of the first character.
    pub start: usize,
    /// Byte offset one past the last character.
    pub end: usize,
}

impl Span {
    /// Creates a new span.
    #[must_use]
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Length of the span in bytes.
    #[must_use]
    pub fn len(self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Returns true if the span covers no bytes.
    #[must_use]
    pub fn is_empty(self) -> bool {
        self.end <= self.start
    }

    /// Returns true if `other` lies entirely within this span.
    #[must_use]
    pub fn contains(self, other: Span) -> bool {
        self.start <= other.start && other.end <= self.end
    }
}

/// A line/column position.
///
/// Lines are 1-based, columns are 0-based character offsets within the line.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct Position {
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (0-indexed).
    pub column: usize,
}

impl Position {
    /// Creates a new position.
    #[must_use]
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// Start and end positions of a node, token or comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct SourceLocation {
    /// Position of the first character.
    pub start: Position,
    /// Position one past the last character.
    pub end: Position,
}

impl SourceLocation {
    /// Creates a new location.
    #[must_use]
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Returns true if the location spans more than one physical line.
    #[must_use]
    pub fn is_multiline(&self) -> bool {
        self.start.line != self.end.line
    }
}

/// Maps byte offsets to line/column positions.
///
/// Recognized line terminators are `\r\n`, `\n`, `\r`, U+2028 and U+2029.
#[derive(Debug, Clone)]
pub struct LineIndex {
    line_starts: Vec<usize>,
}

impl LineIndex {
    /// Builds the index for `text`.
    #[must_use]
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![0];
        let mut chars = text.char_indices().peekable();
        while let Some((offset, ch)) = chars.next() {
            match ch {
                '\r' => {
                    if let Some(&(_, '\n')) = chars.peek() {
                        chars.next();
                        line_starts.push(offset + 2);
                    } else {
                        line_starts.push(offset + 1);
                    }
                }
                '\n' => line_starts.push(offset + 1),
                '\u{2028}' | '\u{2029}' => line_starts.push(offset + ch.len_utf8()),
                _ => {}
            }
        }
        Self { line_starts }
    }

    /// Number of lines, counting a trailing empty line after a final terminator.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Byte offset where the given 1-based line starts.
    #[must_use]
    pub fn line_start(&self, line: usize) -> Option<usize> {
        line.checked_sub(1)
            .and_then(|idx| self.line_starts.get(idx).copied())
    }

    /// Converts a byte offset into a position.
    #[must_use]
    pub fn position(&self, text: &str, offset: usize) -> Position {
        let idx = match self.line_starts.binary_search(&offset) {
            Ok(idx) => idx,
            Err(idx) => idx - 1,
        };
        let start = self.line_starts[idx];
        let end = offset.min(text.len());
        let column = text.get(start..end).map_or(0, |s| s.chars().count());
        Position::new(idx + 1, column)
    }

    /// Converts a span into a source location.
    #[must_use]
    pub fn location(&self, text: &str, span: Span) -> SourceLocation {
        SourceLocation::new(self.position(text, span.start), self.position(text, span.end))
    }
}

/// Splits text into physical lines, dropping the terminators.
#[must_use]
pub fn split_lines(text: &str) -> Vec<String> {
    let index = LineIndex::new(text);
    let mut lines = Vec::with_capacity(index.line_count());
    for (i, &start) in index.line_starts.iter().enumerate() {
        let end = index.line_starts.get(i + 1).copied().unwrap_or(text.len());
        let line = &text[start..end];
        let line = line
            .strip_suffix("\r\n")
            .or_else(|| line.strip_suffix('\n'))
            .or_else(|| line.strip_suffix('\r'))
            .or_else(|| line.strip_suffix('\u{2028}'))
            .or_else(|| line.strip_suffix('\u{2029}'))
            .unwrap_or(line);
        lines.push(line.to_string());
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positions_across_terminators() {
        let text = "ab\r\ncd\ne\rf";
        let index = LineIndex::new(text);
        assert_eq!(index.line_count(), 4);
        assert_eq!(index.position(text, 0), Position::new(1, 0));
        assert_eq!(index.position(text, 4), Position::new(2, 0));
        assert_eq!(index.position(text, 5), Position::new(2, 1));
        assert_eq!(index.position(text, 9), Position::new(4, 0));
    }

    #[test]
    fn columns_count_characters() {
        let text = "é = 1";
        let index = LineIndex::new(text);
        assert_eq!(index.position(text, 2), Position::new(1, 1));
    }

    #[test]
    fn split_lines_keeps_trailing_empty_line() {
        assert_eq!(split_lines("a\nb\n"), vec!["a", "b", ""]);
        assert_eq!(split_lines("a\r\n\r\nb"), vec!["a", "", "b"]);
    }

    #[test]
    fn multiline_location() {
        let loc = SourceLocation::new(Position::new(1, 0), Position::new(3, 1));
        assert!(loc.is_multiline());
    }
}
