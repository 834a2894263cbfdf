//! Comment-based suppression directives.
//!
//! Supports directives like:
//! ```text
//! // style-lint:disable
//! // style-lint:disable validateIndentation, requireCurlyBraces
//! /* style-lint:enable requireCurlyBraces */
//! // style-lint:enable
//! ```
//!
//! A directive takes effect at the position of its comment and lasts until a
//! later directive changes it. Without a rule list it applies to every rule.

use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::location::Position;
use crate::token::Comment;
use std::collections::HashSet;

const DIRECTIVE_PREFIX: &str = "style-lint:";

/// Parsed suppression directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuppressionDirective {
    /// Where the directive's comment starts.
    pub position: Position,
    /// `true` for `enable`, `false` for `disable`.
    pub enable: bool,
    /// Rules named by the directive; `None` means all rules.
    pub rules: Option<HashSet<String>>,
}

impl SuppressionDirective {
    fn applies_to(&self, rule: &str) -> bool {
        self.rules.as_ref().map_or(true, |rules| rules.contains(rule))
    }
}

/// The suppression directives of one input, in source order.
#[derive(Debug, Clone, Default)]
pub struct Suppressions {
    directives: Vec<SuppressionDirective>,
}

impl Suppressions {
    /// Collects directives from the comment list.
    #[must_use]
    pub fn from_comments(comments: &[Comment]) -> Self {
        let directives = comments
            .iter()
            .filter_map(|comment| parse_directive(&comment.value, comment.loc.start))
            .collect();
        Self { directives }
    }

    /// Returns true if no directive was found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.directives.is_empty()
    }

    /// Returns true if `rule` is disabled at `position`.
    #[must_use]
    pub fn is_suppressed(&self, rule: &str, position: Position) -> bool {
        let mut all_disabled = false;
        let mut rule_disabled: Option<bool> = None;

        for directive in self.directives.iter().take_while(|d| d.position <= position) {
            match &directive.rules {
                None => {
                    all_disabled = !directive.enable;
                    rule_disabled = None;
                }
                Some(_) if directive.applies_to(rule) => rule_disabled = Some(!directive.enable),
                Some(_) => {}
            }
        }

        rule_disabled.unwrap_or(all_disabled)
    }

    /// Drops every diagnostic that falls in a disabled region of its rule.
    pub fn apply(&self, diagnostics: &mut Diagnostics) {
        if self.is_empty() {
            return;
        }
        diagnostics.retain(|d: &Diagnostic| !self.is_suppressed(&d.rule, d.position()));
    }
}

/// Parses a directive from the text of a comment.
fn parse_directive(text: &str, position: Position) -> Option<SuppressionDirective> {
    let directive = text.trim().strip_prefix(DIRECTIVE_PREFIX)?.trim_start();

    let (enable, rest) = if let Some(rest) = directive.strip_prefix("disable") {
        (false, rest)
    } else if let Some(rest) = directive.strip_prefix("enable") {
        (true, rest)
    } else {
        return None;
    };

    // `disableFoo` is not a directive.
    if rest.chars().next().is_some_and(|c| !c.is_whitespace()) {
        return None;
    }

    let rules: HashSet<String> = rest
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    Some(SuppressionDirective {
        position,
        enable,
        rules: (!rules.is_empty()).then_some(rules),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::{SourceLocation, Span};
    use crate::token::CommentKind;

    fn comment(value: &str, line: usize) -> Comment {
        let at = Position::new(line, 0);
        Comment::new(
            CommentKind::Line,
            value,
            Span::default(),
            SourceLocation::new(at, at),
        )
    }

    #[test]
    fn test_parse_directive() {
        let directive = parse_directive(" style-lint:disable ", Position::new(1, 0)).unwrap();
        assert!(!directive.enable);
        assert!(directive.rules.is_none());
    }

    #[test]
    fn test_parse_directive_with_rules() {
        let directive = parse_directive(
            " style-lint:enable ruleA, ruleB",
            Position::new(1, 0),
        )
        .unwrap();
        assert!(directive.enable);
        let rules = directive.rules.unwrap();
        assert!(rules.contains("ruleA"));
        assert!(rules.contains("ruleB"));
    }

    #[test]
    fn test_ignores_ordinary_comments() {
        assert!(parse_directive(" disable the thing", Position::new(1, 0)).is_none());
        assert!(parse_directive(" style-lint:disabled", Position::new(1, 0)).is_none());
    }

    #[test]
    fn test_region_for_all_rules() {
        let suppressions = Suppressions::from_comments(&[
            comment(" style-lint:disable", 3),
            comment(" style-lint:enable", 6),
        ]);
        assert!(!suppressions.is_suppressed("any", Position::new(2, 4)));
        assert!(suppressions.is_suppressed("any", Position::new(3, 0)));
        assert!(suppressions.is_suppressed("any", Position::new(5, 9)));
        assert!(!suppressions.is_suppressed("any", Position::new(6, 0)));
    }

    #[test]
    fn test_region_for_named_rules() {
        let suppressions = Suppressions::from_comments(&[
            comment(" style-lint:disable ruleA", 1),
            comment(" style-lint:enable ruleA", 4),
        ]);
        assert!(suppressions.is_suppressed("ruleA", Position::new(2, 0)));
        assert!(!suppressions.is_suppressed("ruleB", Position::new(2, 0)));
        assert!(!suppressions.is_suppressed("ruleA", Position::new(4, 2)));
    }

    #[test]
    fn test_named_enable_inside_global_disable() {
        let suppressions = Suppressions::from_comments(&[
            comment(" style-lint:disable", 1),
            comment(" style-lint:enable ruleA", 2),
        ]);
        assert!(!suppressions.is_suppressed("ruleA", Position::new(3, 0)));
        assert!(suppressions.is_suppressed("ruleB", Position::new(3, 0)));
    }

    #[test]
    fn test_apply_filters_diagnostics() {
        let mut diagnostics = Diagnostics::new("a.js", "");
        diagnostics.push(Diagnostic::new("ruleA", "kept", 1, 0));
        diagnostics.push(Diagnostic::new("ruleA", "dropped", 3, 0));
        diagnostics.push(Diagnostic::new("ruleB", "kept too", 3, 0));

        Suppressions::from_comments(&[comment(" style-lint:disable ruleA", 2)])
            .apply(&mut diagnostics);

        let messages: Vec<&str> = diagnostics.list().iter().map(|d| d.message.as_str()).collect();
        assert_eq!(messages, vec!["kept", "kept too"]);
    }
}
