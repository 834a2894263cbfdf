//! Check command implementation.

use anyhow::{Context, Result};
use glob::Pattern;
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};
use style_lint::{configured, Checker, Config, Diagnostics, InputSyntaxError};
use tracing::{debug, info, warn};

use crate::config_resolver;
use crate::OutputFormat;

/// Options of one `check` invocation.
#[derive(Debug, Clone)]
pub struct CheckOptions {
    /// Files or directories to check.
    pub paths: Vec<PathBuf>,
    /// Output format.
    pub format: OutputFormat,
    /// Extra exclude globs on top of `excludeFiles`.
    pub exclude: Vec<String>,
    /// Overrides the configured `maxErrors`.
    pub max_errors: Option<usize>,
    /// Colorize text output.
    pub color: bool,
}

/// Outcome of checking one file.
#[derive(Debug)]
pub enum FileOutcome {
    /// The file parsed; its diagnostics, possibly empty.
    Checked(Diagnostics),
    /// The file did not parse.
    SyntaxError(InputSyntaxError),
}

/// Result for one file.
#[derive(Debug)]
pub struct FileReport {
    /// Path as discovered.
    pub path: PathBuf,
    /// What checking produced.
    pub outcome: FileOutcome,
}

/// Result of a whole run.
#[derive(Debug, Default)]
pub struct CheckSummary {
    /// Reports in traversal order.
    pub reports: Vec<FileReport>,
    /// Files that could not be read.
    pub unreadable: usize,
    /// Whether `maxErrors` cut the run short.
    pub truncated: bool,
}

impl CheckSummary {
    /// Number of diagnostics across all files.
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.reports
            .iter()
            .map(|r| match &r.outcome {
                FileOutcome::Checked(d) => d.count(),
                FileOutcome::SyntaxError(_) => 0,
            })
            .sum()
    }

    /// Number of files that failed to parse.
    #[must_use]
    pub fn syntax_error_count(&self) -> usize {
        self.reports
            .iter()
            .filter(|r| matches!(r.outcome, FileOutcome::SyntaxError(_)))
            .count()
    }

    /// Returns true if anything was reported.
    #[must_use]
    pub fn has_findings(&self) -> bool {
        self.error_count() > 0 || self.syntax_error_count() > 0
    }
}

/// Runs the check command. Returns true if errors were found.
pub fn run(options: &CheckOptions, config_path: Option<&Path>) -> Result<bool> {
    let project_dir = options
        .paths
        .first()
        .map_or_else(|| PathBuf::from("."), |p| project_dir_of(p));
    let config = config_resolver::resolve(&project_dir, config_path).load()?;
    let checker = configured(&config).context("Invalid configuration")?;

    let excludes = compile_excludes(options.exclude.iter().chain(&config.exclude_files))?;
    let files = collect_files(&options.paths, &config, &excludes);

    info!(
        "Checking {} file(s) with {} rule(s)",
        files.len(),
        checker.active_rules().count()
    );

    let max_errors = options.max_errors.or(config.max_errors);
    let summary = check_files(&checker, &files, max_errors);

    super::output::print(&summary, options.format, options.color)?;

    info!(
        errors = summary.error_count(),
        syntax_errors = summary.syntax_error_count(),
        "Check finished"
    );

    Ok(summary.has_findings())
}

fn project_dir_of(path: &Path) -> PathBuf {
    if path.is_dir() {
        return path.to_path_buf();
    }
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

fn compile_excludes<'a>(patterns: impl Iterator<Item = &'a String>) -> Result<Vec<Pattern>> {
    patterns
        .map(|p| Pattern::new(p).with_context(|| format!("Invalid exclude pattern: {p}")))
        .collect()
}

fn is_excluded(path: &Path, root: &Path, excludes: &[Pattern]) -> bool {
    let relative = path.strip_prefix(root).unwrap_or(path);
    excludes
        .iter()
        .any(|p| p.matches_path(relative) || p.matches_path(path))
}

/// Expands the input paths into the sorted list of files to check.
///
/// Directories are walked honoring `.gitignore` and filtered by extension.
/// Files named directly are checked whatever their extension.
fn collect_files(paths: &[PathBuf], config: &Config, excludes: &[Pattern]) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for root in paths {
        if root.is_file() {
            if !is_excluded(root, Path::new(""), excludes) {
                files.push(root.clone());
            }
            continue;
        }

        for entry in WalkBuilder::new(root).build() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable entry: {}", e);
                    continue;
                }
            };
            let path = entry.path();
            if !entry.file_type().is_some_and(|t| t.is_file()) || !config.matches_extension(path) {
                continue;
            }
            if is_excluded(path, root, excludes) {
                debug!("Excluded: {}", path.display());
                continue;
            }
            files.push(path.to_path_buf());
        }
    }

    files.sort();
    files.dedup();
    files
}

/// Checks each file in order until `max_errors` diagnostics were collected.
fn check_files(checker: &Checker, files: &[PathBuf], max_errors: Option<usize>) -> CheckSummary {
    let mut summary = CheckSummary::default();
    let mut remaining = max_errors;

    for path in files {
        if remaining == Some(0) {
            summary.truncated = true;
            break;
        }

        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) => {
                warn!("Failed to read {}: {}", path.display(), e);
                summary.unreadable += 1;
                continue;
            }
        };

        let name = path.display().to_string();
        let outcome = match checker.check_string(&text, &name) {
            Ok(mut diagnostics) => {
                if let Some(budget) = remaining.as_mut() {
                    if diagnostics.count() > *budget {
                        diagnostics.truncate(*budget);
                        summary.truncated = true;
                    }
                    *budget -= diagnostics.count();
                }
                FileOutcome::Checked(diagnostics)
            }
            Err(e) => {
                debug!("{}: {}", name, e);
                FileOutcome::SyntaxError(e)
            }
        };

        summary.reports.push(FileReport {
            path: path.clone(),
            outcome,
        });
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn project() -> TempDir {
        // Walks skip hidden entries, so avoid the default `.tmp` prefix.
        let tmp = tempfile::Builder::new().prefix("project").tempdir().unwrap();
        fs::create_dir_all(tmp.path().join("src")).unwrap();
        fs::create_dir_all(tmp.path().join("vendor")).unwrap();
        fs::write(tmp.path().join("src/a.js"), "a();  \n").unwrap();
        fs::write(tmp.path().join("src/b.js"), "b();\n").unwrap();
        fs::write(tmp.path().join("src/c.txt"), "not js\n").unwrap();
        fs::write(tmp.path().join("vendor/lib.js"), "lib();  \n").unwrap();
        tmp
    }

    fn names(files: &[PathBuf], root: &Path) -> Vec<String> {
        files
            .iter()
            .map(|f| f.strip_prefix(root).unwrap().to_string_lossy().replace('\\', "/"))
            .collect()
    }

    #[test]
    fn collects_by_extension_in_sorted_order() {
        let tmp = project();
        let files = collect_files(&[tmp.path().to_path_buf()], &Config::default(), &[]);
        assert_eq!(names(&files, tmp.path()), vec!["src/a.js", "src/b.js", "vendor/lib.js"]);
    }

    #[test]
    fn exclude_patterns_match_relative_paths() {
        let tmp = project();
        let excludes = compile_excludes([String::from("vendor/**")].iter()).unwrap();
        let files = collect_files(&[tmp.path().to_path_buf()], &Config::default(), &excludes);
        assert_eq!(names(&files, tmp.path()), vec!["src/a.js", "src/b.js"]);
    }

    #[test]
    fn invalid_exclude_pattern_is_an_error() {
        assert!(compile_excludes([String::from("[")].iter()).is_err());
    }

    #[test]
    fn max_errors_stops_the_run() {
        let tmp = project();
        let config = Config::parse_json(r#"{"disallowTrailingWhitespace": true}"#).unwrap();
        let checker = configured(&config).unwrap();
        let files = collect_files(&[tmp.path().to_path_buf()], &config, &[]);

        let all = check_files(&checker, &files, None);
        assert_eq!(all.error_count(), 2);
        assert!(!all.truncated);

        let limited = check_files(&checker, &files, Some(1));
        assert_eq!(limited.error_count(), 1);
        assert!(limited.truncated);
    }

    #[test]
    fn syntax_errors_are_reported_per_file() {
        let tmp = TempDir::new().unwrap();
        let broken = tmp.path().join("broken.js");
        fs::write(&broken, "if (a {\n").unwrap();

        let checker = configured(&Config::default()).unwrap();
        let summary = check_files(&checker, &[broken], None);
        assert_eq!(summary.syntax_error_count(), 1);
        assert!(summary.has_findings());
    }
}
