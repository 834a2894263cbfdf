//! Rule engine: registry, configuration and sequential rule execution.

use crate::config::{Config, ConfigError, UnsupportedOptionError};
use crate::diagnostics::Diagnostics;
use crate::parse::{InputSyntaxError, SourceParser};
use crate::rule::{RuleBox, RuleDefinition, RuleDefinitionBox};
use crate::source::SourceFile;
use crate::suppression::Suppressions;

use std::collections::HashSet;
use tracing::{debug, trace};

/// Builder for configuring a [`Checker`].
#[derive(Default)]
pub struct CheckerBuilder {
    parser: Option<Box<dyn SourceParser>>,
    definitions: Vec<RuleDefinitionBox>,
    suppressions: Option<bool>,
}

impl CheckerBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the parser used by [`Checker::check_string`].
    #[must_use]
    pub fn parser<P: SourceParser + 'static>(mut self, parser: P) -> Self {
        self.parser = Some(Box::new(parser));
        self
    }

    /// Registers a rule definition. Registration order is execution order.
    #[must_use]
    pub fn rule<R: RuleDefinition + 'static>(mut self, definition: R) -> Self {
        self.definitions.push(Box::new(definition));
        self
    }

    /// Registers several boxed rule definitions.
    #[must_use]
    pub fn rules<I>(mut self, definitions: I) -> Self
    where
        I: IntoIterator<Item = RuleDefinitionBox>,
    {
        self.definitions.extend(definitions);
        self
    }

    /// Sets whether `style-lint:disable` comments are honored (default: true).
    #[must_use]
    pub fn suppressions(mut self, enabled: bool) -> Self {
        self.suppressions = Some(enabled);
        self
    }

    /// Builds the checker. No rule is active until [`Checker::configure`].
    ///
    /// # Errors
    ///
    /// Returns an error if no parser was set or two definitions share an
    /// option name.
    pub fn build(self) -> Result<Checker, ConfigError> {
        let parser = self.parser.ok_or(ConfigError::MissingParser)?;

        let mut seen = HashSet::new();
        for definition in &self.definitions {
            if !seen.insert(definition.option_name()) {
                return Err(ConfigError::DuplicateRule {
                    name: definition.option_name().to_string(),
                });
            }
        }

        Ok(Checker {
            parser,
            definitions: self.definitions,
            active: Vec::new(),
            suppressions: self.suppressions.unwrap_or(true),
        })
    }
}

/// Runs configured rules against inputs.
///
/// Use [`Checker::builder()`] to construct an instance. A configured checker
/// holds only immutable rule values and can be shared across threads.
pub struct Checker {
    parser: Box<dyn SourceParser>,
    definitions: Vec<RuleDefinitionBox>,
    active: Vec<RuleBox>,
    suppressions: bool,
}

impl std::fmt::Debug for Checker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Checker")
            .field("known", &self.known_rules().collect::<Vec<_>>())
            .field("active", &self.active_rules().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

impl Checker {
    /// Creates a new builder for configuring a checker.
    #[must_use]
    pub fn builder() -> CheckerBuilder {
        CheckerBuilder::new()
    }

    /// Option names of every registered rule, in registration order.
    pub fn known_rules(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.definitions.iter().map(|d| d.option_name())
    }

    /// Registered rule definitions, in registration order.
    #[must_use]
    pub fn definitions(&self) -> &[RuleDefinitionBox] {
        &self.definitions
    }

    /// Option names of the configured rules, in execution order.
    pub fn active_rules(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.active.iter().map(|r| r.option_name())
    }

    /// Validates `config` and replaces the active rule set.
    ///
    /// Unknown keys are reported all at once, sorted. Known keys are
    /// configured in registration order; `null` leaves a rule inactive. On
    /// error the previous rule set is kept.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Unsupported`] for unknown keys and
    /// [`ConfigError::Invalid`] for the first malformed option value.
    pub fn configure(&mut self, config: &Config) -> Result<(), ConfigError> {
        let known: HashSet<&str> = self.known_rules().collect();
        let mut unknown: Vec<String> = config
            .rules
            .keys()
            .filter(|key| !known.contains(key.as_str()))
            .cloned()
            .collect();
        if !unknown.is_empty() {
            unknown.sort();
            return Err(UnsupportedOptionError { options: unknown }.into());
        }

        let mut active = Vec::new();
        for definition in &self.definitions {
            let name = definition.option_name();
            let Some(value) = config.rule_option(name) else {
                continue;
            };
            if value.is_null() {
                debug!("Rule disabled by configuration: {}", name);
                continue;
            }
            active.push(definition.configure(value)?);
            debug!("Rule enabled: {}", name);
        }

        self.active = active;
        Ok(())
    }

    /// Parses and checks `text`.
    ///
    /// # Errors
    ///
    /// Returns [`InputSyntaxError`] if `text` does not parse; no diagnostics
    /// are produced in that case.
    pub fn check_string(
        &self,
        text: &str,
        file_name: &str,
    ) -> Result<Diagnostics, InputSyntaxError> {
        let parsed = self.parser.parse(text)?;
        let file = SourceFile::new(text, parsed);
        Ok(self.check_file(&file, file_name))
    }

    /// Runs every active rule against an already built source model.
    ///
    /// Rules run in registration order, each with its own attribution scope.
    /// The result is sorted by position.
    #[must_use]
    pub fn check_file(&self, file: &SourceFile, file_name: &str) -> Diagnostics {
        let mut diagnostics = Diagnostics::new(file_name, file.text());

        for rule in &self.active {
            let before = diagnostics.count();
            {
                let mut scope = diagnostics.scope(rule.option_name());
                rule.check(file, &mut scope);
            }
            trace!(
                rule = rule.option_name(),
                reported = diagnostics.count() - before,
                "rule finished"
            );
        }

        if self.suppressions {
            Suppressions::from_comments(file.comments()).apply(&mut diagnostics);
        }
        diagnostics.finish();
        debug!("{}: {} diagnostics", file_name, diagnostics.count());
        diagnostics
    }
}
