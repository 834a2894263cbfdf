//! List rules command implementation.

use anyhow::{bail, Result};
use style_lint::rules::{default_config, RuleKind};

/// Runs the list-rules command, optionally for a single rule.
pub fn run(rule: Option<&str>) -> Result<()> {
    match rule {
        Some(name) => println!("{}", describe(name)?),
        None => println!("{}", overview()),
    }
    Ok(())
}

/// Details of one rule looked up by its configuration key.
fn describe(name: &str) -> Result<String> {
    let Some(kind) = RuleKind::from_option_name(name) else {
        bail!("Unknown rule: {name}. Run `style-lint list-rules` to see them all.");
    };
    let enabled_by_default = default_config().rules.contains_key(name);
    Ok(format!(
        "{}\n  {}\n  Example value: {}\n  Enabled without a config file: {}",
        kind.option_name(),
        kind.description(),
        kind.example_value(),
        if enabled_by_default { "yes" } else { "no" }
    ))
}

fn overview() -> String {
    let mut lines = vec![
        "Available rules:\n".to_string(),
        format!("{:<38} {:<28} Description", "Option", "Example value"),
        "-".repeat(110),
    ];
    for kind in RuleKind::ALL {
        lines.push(format!(
            "{:<38} {:<28} {}",
            kind.option_name(),
            kind.example_value().to_string(),
            kind.description()
        ));
    }

    lines.push("\nEnabled when no config file is found:".to_string());
    for (option, value) in &default_config().rules {
        match RuleKind::from_option_name(option) {
            Some(kind) => lines.push(format!("  {option} = {value}  ({})", kind.description())),
            None => lines.push(format!("  {option} = {value}")),
        }
    }

    lines.push("\nSet an option to null to disable it, e.g.:".to_string());
    lines.push("  { \"validateIndentation\": 2, \"requireCurlyBraces\": null }".to_string());
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describes_a_known_rule() {
        let text = describe("validateIndentation").unwrap();
        assert!(text.starts_with("validateIndentation\n"));
        assert!(text.contains("Validates the indentation of nested code"));
        assert!(text.contains("Example value: 4"));
    }

    #[test]
    fn unknown_rule_is_an_error() {
        let err = describe("totallyBogusRule").unwrap_err();
        assert!(err.to_string().contains("Unknown rule: totallyBogusRule"));
    }

    #[test]
    fn overview_lists_every_rule_and_describes_defaults() {
        let text = overview();
        for kind in RuleKind::ALL {
            assert!(text.contains(kind.option_name()));
        }
        for option in default_config().rules.keys() {
            let kind = RuleKind::from_option_name(option).unwrap();
            assert!(text.contains(&format!("({})", kind.description())));
        }
    }
}
