//! Configuration types for style-lint.
//!
//! A configuration is a flat object mapping rule option names to option
//! values, plus a few reserved keys consumed by the runner:
//!
//! ```json
//! {
//!     "validateIndentation": 2,
//!     "requireCurlyBraces": ["if", "else"],
//!     "disallowMultipleVarDecl": null,
//!     "excludeFiles": ["vendor/**"],
//!     "fileExtensions": [".js"],
//!     "maxErrors": 50
//! }
//! ```
//!
//! `null` disables a rule without making its key unknown. TOML has no null,
//! so TOML configurations can only enable rules.

use crate::rule::ConfigurationError;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Key holding glob patterns of files to skip.
pub const EXCLUDE_FILES_KEY: &str = "excludeFiles";
/// Key holding the file extensions to check.
pub const FILE_EXTENSIONS_KEY: &str = "fileExtensions";
/// Key holding the maximum number of diagnostics to report in one run.
pub const MAX_ERRORS_KEY: &str = "maxErrors";

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Rule option values keyed by option name.
    pub rules: Map<String, Value>,
    /// Glob patterns of files to skip.
    pub exclude_files: Vec<String>,
    /// File extensions to check, each with its leading dot.
    pub file_extensions: Vec<String>,
    /// Stop reporting after this many diagnostics.
    pub max_errors: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rules: Map::new(),
            exclude_files: Vec::new(),
            file_extensions: vec![".js".to_string()],
            max_errors: None,
        }
    }
}

impl Config {
    /// Creates a new default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets one rule option.
    #[must_use]
    pub fn with_rule(mut self, option: impl Into<String>, value: Value) -> Self {
        self.rules.insert(option.into(), value);
        self
    }

    /// Loads configuration from a file, choosing TOML or JSON by extension.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        if path.extension().is_some_and(|ext| ext == "toml") {
            Self::parse_toml(&content)
        } else {
            Self::parse_json(&content)
        }
    }

    /// Parses configuration from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is invalid or a reserved key is malformed.
    pub fn parse_json(content: &str) -> Result<Self, ConfigError> {
        let value: Value = serde_json::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })?;
        Self::from_value(value)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid or a reserved key is malformed.
    pub fn parse_toml(content: &str) -> Result<Self, ConfigError> {
        let value: Value = toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })?;
        Self::from_value(value)
    }

    /// Builds a configuration from a JSON object, splitting off reserved keys.
    ///
    /// # Errors
    ///
    /// Returns an error if `value` is not an object or a reserved key is malformed.
    pub fn from_value(value: Value) -> Result<Self, ConfigError> {
        let Value::Object(mut rules) = value else {
            return Err(ConfigError::Parse {
                message: "configuration must be an object".to_string(),
            });
        };

        let mut config = Self::default();
        if let Some(value) = rules.remove(EXCLUDE_FILES_KEY) {
            config.exclude_files = string_list(EXCLUDE_FILES_KEY, &value)?;
        }
        if let Some(value) = rules.remove(FILE_EXTENSIONS_KEY) {
            config.file_extensions = string_list(FILE_EXTENSIONS_KEY, &value)?
                .into_iter()
                .map(|ext| {
                    if ext.starts_with('.') {
                        ext
                    } else {
                        format!(".{ext}")
                    }
                })
                .collect();
        }
        if let Some(value) = rules.remove(MAX_ERRORS_KEY) {
            config.max_errors = match value {
                Value::Null => None,
                other => Some(
                    other
                        .as_u64()
                        .and_then(|n| usize::try_from(n).ok())
                        .ok_or_else(|| {
                            ConfigurationError::new(MAX_ERRORS_KEY, "a non-negative integer")
                        })?,
                ),
            };
        }
        config.rules = rules;
        Ok(config)
    }

    /// Option value for a rule, if present.
    #[must_use]
    pub fn rule_option(&self, option: &str) -> Option<&Value> {
        self.rules.get(option)
    }

    /// Returns true if `path` has one of the configured extensions.
    #[must_use]
    pub fn matches_extension(&self, path: &Path) -> bool {
        let name = path.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();
        self.file_extensions.iter().any(|ext| name.ends_with(ext.as_str()))
    }
}

fn string_list(option: &str, value: &Value) -> Result<Vec<String>, ConfigurationError> {
    let error = || ConfigurationError::new(option, "an array of strings");
    match value {
        Value::String(single) => Ok(vec![single.clone()]),
        Value::Array(items) => items
            .iter()
            .map(|item| item.as_str().map(String::from).ok_or_else(error))
            .collect(),
        _ => Err(error()),
    }
}

/// The configuration names options no registered rule answers to.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unsupported rules: {}", options.join(", "))]
pub struct UnsupportedOptionError {
    /// Every unknown option name, sorted.
    pub options: Vec<String>,
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("Failed to read config file {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Parse error in config file.
    #[error("Failed to parse config: {message}")]
    Parse {
        /// Parse error message.
        message: String,
    },

    /// Unknown option names.
    #[error(transparent)]
    Unsupported(#[from] UnsupportedOptionError),

    /// An option value has the wrong shape.
    #[error(transparent)]
    Invalid(#[from] ConfigurationError),

    /// The checker was built without a parser.
    #[error("No source parser configured")]
    MissingParser,

    /// Two registered rules share an option name.
    #[error("Rule `{name}` is registered more than once")]
    DuplicateRule {
        /// The duplicated option name.
        name: String,
    },
}
