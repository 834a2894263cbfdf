//! Line-based whitespace rules.

use serde_json::Value;
use style_lint_core::{expect_true, ConfigurationError, Rule, RuleDiagnostics, SourceFile};

/// Rule name for disallow-trailing-whitespace.
pub const TRAILING: &str = "disallowTrailingWhitespace";

/// Rule name for disallow-multiple-line-breaks.
pub const LINE_BREAKS: &str = "disallowMultipleLineBreaks";

/// Forbids spaces and tabs at the end of a line.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisallowTrailingWhitespace;

impl DisallowTrailingWhitespace {
    /// Parses the option value.
    ///
    /// # Errors
    ///
    /// Fails unless `value` is `true`.
    pub fn from_value(value: &Value) -> Result<Self, ConfigurationError> {
        expect_true(TRAILING, value)?;
        Ok(Self)
    }
}

impl Rule for DisallowTrailingWhitespace {
    fn option_name(&self) -> &'static str {
        TRAILING
    }

    fn check(&self, file: &SourceFile, diagnostics: &mut RuleDiagnostics<'_>) {
        for (idx, line) in file.lines().iter().enumerate() {
            let trimmed = line.trim_end_matches([' ', '\t']);
            if trimmed.len() != line.len() {
                diagnostics.add("Illegal trailing whitespace", idx + 1, trimmed.chars().count());
            }
        }
    }
}

/// Forbids more than one consecutive blank line.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisallowMultipleLineBreaks;

impl DisallowMultipleLineBreaks {
    /// Parses the option value.
    ///
    /// # Errors
    ///
    /// Fails unless `value` is `true`.
    pub fn from_value(value: &Value) -> Result<Self, ConfigurationError> {
        expect_true(LINE_BREAKS, value)?;
        Ok(Self)
    }
}

impl Rule for DisallowMultipleLineBreaks {
    fn option_name(&self) -> &'static str {
        LINE_BREAKS
    }

    fn check(&self, file: &SourceFile, diagnostics: &mut RuleDiagnostics<'_>) {
        let lines = file.lines();
        // The empty string after a final terminator is not a line of its own.
        let count = match lines.last() {
            Some(last) if last.is_empty() => lines.len() - 1,
            _ => lines.len(),
        };

        let mut run = 0;
        for (idx, line) in lines.iter().take(count).enumerate() {
            if line.trim().is_empty() {
                run += 1;
                if run == 2 {
                    diagnostics.add("Multiple line break", idx + 1, 0);
                }
            } else {
                run = 0;
            }
        }
    }
}
