//! Diagnostics collected while checking one input.

use crate::location::{split_lines, LineIndex, Position};
use miette::{NamedSource, SourceSpan};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// Lines of context shown above and below a diagnostic.
const CONTEXT_LINES: usize = 2;

/// Width of the line-number gutter: one space, five digits, ` |`.
const GUTTER_WIDTH: usize = 8;

/// A reported style violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Option name of the rule that reported it.
    pub rule: String,
    /// Human-readable message.
    pub message: String,
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (0-indexed).
    pub column: usize,
}

impl Diagnostic {
    /// Creates a new diagnostic.
    #[must_use]
    pub fn new(
        rule: impl Into<String>,
        message: impl Into<String>,
        line: usize,
        column: usize,
    ) -> Self {
        Self {
            rule: rule.into(),
            message: message.into(),
            line,
            column,
        }
    }

    /// Position of the violation.
    #[must_use]
    pub fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}: [{}] {}",
            self.line, self.column, self.rule, self.message
        )
    }
}

/// Append-only collector for one input.
///
/// Rules add through a [`RuleDiagnostics`] scope, which attributes every
/// entry to the rule. [`Diagnostics::finish`] sorts the list by position.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    file_name: String,
    text: String,
    lines: Vec<String>,
    items: Vec<Diagnostic>,
    current_rule: Option<String>,
}

impl Diagnostics {
    /// Creates an empty collector for the given file and its source text.
    #[must_use]
    pub fn new(file_name: impl Into<String>, text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            file_name: file_name.into(),
            lines: split_lines(&text),
            text,
            items: Vec::new(),
            current_rule: None,
        }
    }

    /// Name of the checked file.
    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Sets the rule that subsequent [`add`](Self::add) calls are attributed to.
    pub fn set_current_rule(&mut self, rule: impl Into<String>) {
        self.current_rule = Some(rule.into());
    }

    /// Clears the attribution context.
    pub fn clear_current_rule(&mut self) {
        self.current_rule = None;
    }

    /// Opens a scope attributing every entry to `rule` until it is dropped.
    pub fn scope(&mut self, rule: &str) -> RuleDiagnostics<'_> {
        self.set_current_rule(rule);
        RuleDiagnostics { inner: self }
    }

    /// Appends a diagnostic for the current rule.
    pub fn add(&mut self, message: impl Into<String>, line: usize, column: usize) {
        let rule = self.current_rule.clone().unwrap_or_default();
        self.items.push(Diagnostic::new(rule, message, line, column));
    }

    /// Appends a diagnostic at `position` for the current rule.
    pub fn add_at(&mut self, message: impl Into<String>, position: Position) {
        self.add(message, position.line, position.column);
    }

    /// Appends an already attributed diagnostic.
    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.items.push(diagnostic);
    }

    /// All diagnostics in their current order.
    #[must_use]
    pub fn list(&self) -> &[Diagnostic] {
        &self.items
    }

    /// Returns true if nothing was reported.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of diagnostics.
    #[must_use]
    pub fn count(&self) -> usize {
        self.items.len()
    }

    /// Keeps only the diagnostics matching `keep`.
    pub fn retain(&mut self, keep: impl FnMut(&Diagnostic) -> bool) {
        self.items.retain(keep);
    }

    /// Drops everything after the first `max` diagnostics.
    pub fn truncate(&mut self, max: usize) {
        self.items.truncate(max);
    }

    /// Sorts by `(line, column)`; equal positions keep their insertion order.
    pub fn finish(&mut self) {
        self.current_rule = None;
        self.items.sort_by_key(|d| (d.line, d.column));
    }

    /// Consumes the collector, returning the diagnostics.
    #[must_use]
    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.items
    }

    /// Renders a diagnostic with two lines of context and a caret under the column.
    ///
    /// Tabs are shown as single spaces so the caret lines up.
    #[must_use]
    pub fn render(&self, diagnostic: &Diagnostic, colorize: bool) -> String {
        let mut output = String::new();
        let header = if colorize {
            format!(
                "\x1b[1m{}: {}\x1b[0m at \x1b[32m{}\x1b[0m :",
                diagnostic.rule, diagnostic.message, self.file_name
            )
        } else {
            format!(
                "{}: {} at {} :",
                diagnostic.rule, diagnostic.message, self.file_name
            )
        };
        output.push_str(&header);

        let target = diagnostic.line.saturating_sub(1);
        let first = target.saturating_sub(CONTEXT_LINES);
        let last = (target + CONTEXT_LINES).min(self.lines.len().saturating_sub(1));

        for idx in first..=last {
            let Some(line) = self.lines.get(idx) else {
                break;
            };
            output.push('\n');
            output.push_str(&render_line(idx + 1, line, colorize));
            if idx == target {
                output.push('\n');
                output.push_str(&render_pointer(diagnostic.column, colorize));
            }
        }

        output
    }

    /// Converts a diagnostic into a `miette` report over this file's source.
    #[must_use]
    pub fn to_report(&self, diagnostic: &Diagnostic) -> StyleReport {
        let index = LineIndex::new(&self.text);
        let offset = index.line_start(diagnostic.line).map_or(0, |start| {
            let line = self.lines.get(diagnostic.line - 1).map_or("", String::as_str);
            start
                + line
                    .char_indices()
                    .nth(diagnostic.column)
                    .map_or(line.len(), |(byte, _)| byte)
        });
        StyleReport {
            message: diagnostic.message.clone(),
            rule: diagnostic.rule.clone(),
            source_code: NamedSource::new(&self.file_name, self.text.clone()),
            span: SourceSpan::from((offset, 1)),
        }
    }
}

fn render_line(number: usize, line: &str, colorize: bool) -> String {
    let line = line.replace('\t', " ");
    let gutter = format!("{number:>5} |");
    if colorize {
        format!(" \x1b[90m{gutter}\x1b[0m{line}")
    } else {
        format!(" {gutter}{line}")
    }
}

fn render_pointer(column: usize, colorize: bool) -> String {
    let mut pointer = "-".repeat(column + GUTTER_WIDTH);
    let _ = write!(pointer, "^");
    if colorize {
        format!("\x1b[90m{pointer}\x1b[0m")
    } else {
        pointer
    }
}

/// Scoped view of [`Diagnostics`] handed to one rule's `check`.
///
/// Every entry is attributed to the rule the scope was opened for. Dropping
/// the scope clears the attribution.
#[derive(Debug)]
pub struct RuleDiagnostics<'a> {
    inner: &'a mut Diagnostics,
}

impl RuleDiagnostics<'_> {
    /// Reports a violation at `line`/`column`.
    pub fn add(&mut self, message: impl Into<String>, line: usize, column: usize) {
        self.inner.add(message, line, column);
    }

    /// Reports a violation at `position`.
    pub fn add_at(&mut self, message: impl Into<String>, position: Position) {
        self.inner.add_at(message, position);
    }

    /// Name of the rule this scope reports for.
    #[must_use]
    pub fn rule(&self) -> &str {
        self.inner.current_rule.as_deref().unwrap_or_default()
    }

    /// Number of diagnostics collected so far, all rules included.
    #[must_use]
    pub fn count(&self) -> usize {
        self.inner.count()
    }
}

impl Drop for RuleDiagnostics<'_> {
    fn drop(&mut self) {
        self.inner.clear_current_rule();
    }
}

/// A diagnostic as a `miette` report, for graphical terminal output.
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
#[error("{message}")]
pub struct StyleReport {
    message: String,
    rule: String,
    #[source_code]
    source_code: NamedSource<String>,
    #[label("{rule}")]
    span: SourceSpan,
}
