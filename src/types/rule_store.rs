use std::fmt;

use super::error::PatternError;
use super::replacements::Replacements;
use super::rule::{Rule, RuleFlags};
use crate::config::RuleConfig;

/// Builder for constructing a [`RuleStore`].
///
/// Rules are kept in the order they are added; that order decides which rule
/// wins when several patterns match the same URL.
///
/// # Example
///
/// ```
/// use refont::RuleStoreBuilder;
///
/// let store = RuleStoreBuilder::new()
///     .rule(r"^https://gitlab\.com/", |r| {
///         r.replace("GitLab Sans", "Verdana").replace("GitLab Mono", "Courier New")
///     })
///     .rule(".*", |r| r.replace("Helvetica", "Verdana").skip_styles(true))
///     .build();
///
/// let rule = store.select("https://gitlab.com/explore").unwrap();
/// assert_eq!(rule.replacements().get("gitlab sans"), Some("Verdana"));
/// ```
#[derive(Debug, Default)]
pub struct RuleStoreBuilder {
    rules: Vec<Rule>,
}

/// Intermediate builder passed to the rule definition closure.
#[derive(Debug, Default)]
pub struct RuleBuilder {
    replacements: Replacements,
    flags: RuleFlags,
}

impl RuleStoreBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Define a rule for URLs matching `pattern`.
    #[must_use]
    pub fn rule(mut self, pattern: &str, f: impl FnOnce(RuleBuilder) -> RuleBuilder) -> Self {
        let builder = f(RuleBuilder::default());
        self.rules
            .push(Rule::new(pattern, builder.replacements, builder.flags));
        self
    }

    #[must_use]
    pub fn build(self) -> RuleStore {
        RuleStore::new(self.rules)
    }
}

impl RuleBuilder {
    #[must_use]
    pub fn replace(mut self, font: &str, replacement: &str) -> Self {
        self.replacements.insert(font, replacement);
        self
    }

    #[must_use]
    pub fn skip_body(mut self, skip: bool) -> Self {
        self.flags.skip_body = skip;
        self
    }

    #[must_use]
    pub fn skip_observer(mut self, skip: bool) -> Self {
        self.flags.skip_observer = skip;
        self
    }

    #[must_use]
    pub fn skip_styles(mut self, skip: bool) -> Self {
        self.flags.skip_styles = skip;
        self
    }

    #[must_use]
    pub fn skip_observer_css(mut self, skip: bool) -> Self {
        self.flags.skip_observer_css = skip;
        self
    }

    #[must_use]
    pub fn delay_ms(mut self, delay_ms: u64) -> Self {
        self.flags.delay_ms = delay_ms;
        self
    }

    #[must_use]
    pub fn debug(mut self, debug: bool) -> Self {
        self.flags.debug = debug;
        self
    }
}

/// An ordered, immutable list of site rules.
///
/// Reconfiguration replaces the whole store; there is no partial mutation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleStore {
    rules: Vec<Rule>,
}

impl RuleStore {
    #[must_use]
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    /// Build a store from the `fontConfig` entries of a configuration blob.
    #[must_use]
    pub fn from_config(rules: &[RuleConfig]) -> Self {
        Self::new(rules.iter().map(RuleConfig::to_rule).collect())
    }

    /// Parse a JSON `fontConfig` array and build a store from it.
    ///
    /// # Errors
    ///
    /// Returns [`RefontError`](crate::RefontError) if the text is not a valid
    /// array of rules.
    pub fn from_json(input: &str) -> Result<Self, crate::RefontError> {
        let rules = crate::config::parse_rules(input)?;
        Ok(Self::from_config(&rules))
    }

    /// Read a JSON `fontConfig` file and build a store from it.
    ///
    /// # Errors
    ///
    /// Returns [`RefontError`](crate::RefontError) on I/O or parse failure.
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self, crate::RefontError> {
        let input = std::fs::read_to_string(path)?;
        Self::from_json(&input)
    }

    /// First rule whose pattern matches `url`. See [`select_rule`](crate::select_rule).
    #[must_use]
    pub fn select(&self, url: &str) -> Option<&Rule> {
        crate::select::select_rule(url, &self.rules)
    }

    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Compile errors of every rule whose pattern can never match.
    pub fn invalid_patterns(&self) -> impl Iterator<Item = &PatternError> {
        self.rules.iter().filter_map(|r| r.pattern().error())
    }
}

impl fmt::Display for RuleStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "RuleStore({} rules, {} invalid patterns)",
            self.rules.len(),
            self.invalid_patterns().count(),
        )
    }
}
