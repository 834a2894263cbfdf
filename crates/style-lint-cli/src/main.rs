//! style-lint CLI tool.
//!
//! Usage:
//! ```bash
//! style-lint check [OPTIONS] [PATHS]...
//! style-lint list-rules [RULE]
//! style-lint init [--force] [--toml]
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod commands;
mod config_resolver;

/// Exit code used when the check found style errors.
const EXIT_FINDINGS: u8 = 2;

/// Style checker for ES5 JavaScript
#[derive(Parser)]
#[command(name = "style-lint")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file (JSON or TOML)
    #[arg(short, long, global = true, env = "STYLE_LINT_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check files and directories
    Check {
        /// Files or directories to check (default: current directory)
        #[arg(default_value = ".")]
        paths: Vec<PathBuf>,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,

        /// Exclude glob patterns (can be specified multiple times)
        #[arg(short, long)]
        exclude: Vec<String>,

        /// Stop reporting after this many errors (overrides `maxErrors`)
        #[arg(long)]
        max_errors: Option<usize>,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },

    /// List available rules
    ListRules {
        /// Show only this rule, by its configuration key
        rule: Option<String>,
    },

    /// Initialize configuration file
    Init {
        /// Overwrite existing config
        #[arg(long)]
        force: bool,

        /// Write `style-lint.toml` instead of `.style-lint.json`
        #[arg(long)]
        toml: bool,
    },
}

/// Output format for check results.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Source excerpt with a caret under each error.
    #[default]
    Text,
    /// Graphical reports.
    Pretty,
    /// JSON output.
    Json,
    /// One-line-per-error compact format.
    Compact,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Check {
            paths,
            format,
            exclude,
            max_errors,
            no_color,
        } => {
            let options = commands::check::CheckOptions {
                paths,
                format,
                exclude,
                max_errors,
                color: !no_color,
            };
            let found = commands::check::run(&options, cli.config.as_deref())?;
            Ok(if found {
                ExitCode::from(EXIT_FINDINGS)
            } else {
                ExitCode::SUCCESS
            })
        }
        Commands::ListRules { rule } => {
            commands::list_rules::run(rule.as_deref())?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Init { force, toml } => {
            let dir = std::env::current_dir()?;
            commands::init::run(&dir, force, toml)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
