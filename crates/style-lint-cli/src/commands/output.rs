//! Shared output formatting for check results.

use anyhow::Result;
use serde::Serialize;
use style_lint::Diagnostic;

use super::check::{CheckSummary, FileOutcome};
use crate::OutputFormat;

/// Print check results in the specified format.
pub fn print(summary: &CheckSummary, format: OutputFormat, color: bool) -> Result<()> {
    match format {
        OutputFormat::Text => print_text(summary, color),
        OutputFormat::Pretty => print_pretty(summary, color),
        OutputFormat::Json => return print_json(summary),
        OutputFormat::Compact => print_compact(summary),
    }
    Ok(())
}

fn print_text(summary: &CheckSummary, color: bool) {
    for report in &summary.reports {
        match &report.outcome {
            FileOutcome::Checked(diagnostics) => {
                for diagnostic in diagnostics.list() {
                    println!("{}\n", diagnostics.render(diagnostic, color));
                }
            }
            FileOutcome::SyntaxError(e) => {
                println!("Syntax error in {}: {}\n", report.path.display(), e);
            }
        }
    }
    print_totals(summary, color);
}

fn print_pretty(summary: &CheckSummary, color: bool) {
    // Fails if a hook is already installed; the first one stays.
    let _ = miette::set_hook(Box::new(move |_| {
        Box::new(miette::MietteHandlerOpts::new().color(color).build())
    }));

    for report in &summary.reports {
        match &report.outcome {
            FileOutcome::Checked(diagnostics) => {
                for diagnostic in diagnostics.list() {
                    let rendered = miette::Report::new(diagnostics.to_report(diagnostic));
                    println!("{rendered:?}");
                }
            }
            FileOutcome::SyntaxError(e) => {
                println!("Syntax error in {}: {}\n", report.path.display(), e);
            }
        }
    }
    print_totals(summary, color);
}

fn print_totals(summary: &CheckSummary, color: bool) {
    let errors = summary.error_count();
    let syntax_errors = summary.syntax_error_count();
    let files = summary.reports.len();

    let (paint, reset) = match (color, errors + syntax_errors) {
        (false, _) => ("", ""),
        (true, 0) => ("\x1b[32m", "\x1b[0m"),
        (true, _) => ("\x1b[31m", "\x1b[0m"),
    };

    if errors + syntax_errors == 0 {
        println!("{paint}No code style errors found in {files} file(s).{reset}");
    } else if syntax_errors == 0 {
        println!("{paint}{errors} code style error(s) found in {files} file(s).{reset}");
    } else {
        println!(
            "{paint}{errors} code style error(s) and {syntax_errors} syntax error(s) found in {files} file(s).{reset}"
        );
    }
    if summary.unreadable > 0 {
        println!("{} file(s) could not be read.", summary.unreadable);
    }
    if summary.truncated {
        println!("Error limit reached; remaining errors were not reported.");
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    files: Vec<JsonFile<'a>>,
    errors: usize,
    truncated: bool,
}

#[derive(Serialize)]
struct JsonFile<'a> {
    path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    syntax_error: Option<String>,
    diagnostics: &'a [Diagnostic],
}

fn print_json(summary: &CheckSummary) -> Result<()> {
    let files = summary
        .reports
        .iter()
        .map(|report| {
            let (syntax_error, diagnostics) = match &report.outcome {
                FileOutcome::Checked(d) => (None, d.list()),
                FileOutcome::SyntaxError(e) => (Some(e.to_string()), &[][..]),
            };
            JsonFile {
                path: report.path.display().to_string(),
                syntax_error,
                diagnostics,
            }
        })
        .collect();

    let report = JsonReport {
        files,
        errors: summary.error_count(),
        truncated: summary.truncated,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn print_compact(summary: &CheckSummary) {
    for report in &summary.reports {
        match &report.outcome {
            FileOutcome::Checked(diagnostics) => {
                for diagnostic in diagnostics.list() {
                    println!("{}:{}", report.path.display(), diagnostic);
                }
            }
            FileOutcome::SyntaxError(e) => {
                println!(
                    "{}:{}:{}: [syntax] {}",
                    report.path.display(),
                    e.line,
                    e.column,
                    e.message
                );
            }
        }
    }
}
