//! Init command implementation.

use anyhow::{bail, Context, Result};
use serde_json::Value;
use std::path::{Path, PathBuf};
use style_lint::rules::starter_config;

const JSON_CONFIG_NAME: &str = ".style-lint.json";
const TOML_CONFIG_NAME: &str = "style-lint.toml";

/// Runs the init command, writing a starter configuration into `dir`.
pub fn run(dir: &Path, force: bool, toml: bool) -> Result<PathBuf> {
    let name = if toml { TOML_CONFIG_NAME } else { JSON_CONFIG_NAME };
    let config_path = dir.join(name);

    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    let rules = starter_config().rules;
    let content = if toml {
        format!(
            "# style-lint configuration\n# Rules set to a value are enabled; remove a line to disable its rule.\n\n{}",
            toml::to_string_pretty(&rules).context("Failed to serialize starter config")?
        )
    } else {
        let mut text = serde_json::to_string_pretty(&Value::Object(rules))?;
        text.push('\n');
        text
    };

    std::fs::write(&config_path, content)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;

    println!("Created {name}");
    println!("\nNext steps:");
    println!("  1. Edit {name} to configure rules (`style-lint list-rules` shows them all)");
    println!("  2. Run: style-lint check");

    Ok(config_path)
}
