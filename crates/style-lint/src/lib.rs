//! # style-lint
//!
//! Style checker for ES5 JavaScript.
//!
//! This is the facade crate: it re-exports the core engine, the parser and the
//! built-in rules, and wires them into a ready-to-configure [`Checker`].
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use style_lint::Config;
//!
//! let config = Config::parse_json(r#"{"validateIndentation": 2}"#)?;
//! let checker = style_lint::configured(&config)?;
//!
//! let diagnostics = checker.check_string("if (a) {\nb();\n}\n", "input.js")?;
//! for diagnostic in diagnostics.list() {
//!     println!("{}", diagnostics.render(diagnostic, false));
//! }
//! ```
//!
//! ## Suppression Comments
//!
//! ```js
//! // style-lint:disable validateIndentation
//! legacy();
//! // style-lint:enable validateIndentation
//! ```

#![forbid(unsafe_code)]

pub use style_lint_core::*;

pub use style_lint_parser::JsParser;

/// Built-in rules, the rule registry and the default configurations.
pub mod rules {
    pub use style_lint_rules::*;
}

/// Returns a checker with the ES5 parser and every built-in rule registered.
///
/// No rule is active until [`Checker::configure`] is called.
///
/// # Errors
///
/// Only fails if the built-in registry contains a duplicate option name.
pub fn checker() -> Result<Checker, ConfigError> {
    Checker::builder()
        .parser(JsParser)
        .rules(style_lint_rules::all_definitions())
        .build()
}

/// Returns a checker configured with `config`.
///
/// # Errors
///
/// Returns [`ConfigError::Unsupported`] for unknown option names and
/// [`ConfigError::Invalid`] for malformed option values.
pub fn configured(config: &Config) -> Result<Checker, ConfigError> {
    let mut checker = checker()?;
    checker.configure(config)?;
    Ok(checker)
}
