use std::fmt;
use std::time::Duration;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::error::PatternError;
use super::replacements::Replacements;

/// A URL pattern, compiled once when the rule is built.
///
/// Patterns use the `regex` crate syntax, searched unanchored. Lookaround and
/// backreferences are not supported; a pattern using them fails to compile.
///
/// Compilation failures are kept rather than raised: the pattern simply never
/// matches and reports its error each time selection reaches it.
#[derive(Debug, Clone)]
pub struct UrlPattern {
    source: String,
    compiled: Result<Regex, PatternError>,
}

impl UrlPattern {
    pub fn new(source: &str) -> Self {
        let compiled = Regex::new(source).map_err(|e| PatternError {
            pattern: source.to_owned(),
            source: e,
        });
        Self {
            source: source.to_owned(),
            compiled,
        }
    }

    /// The pattern text as written in the configuration.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Unanchored search: the pattern may match anywhere in `url`.
    ///
    /// # Errors
    ///
    /// Returns the stored [`PatternError`] if the pattern failed to compile.
    pub fn is_match(&self, url: &str) -> Result<bool, &PatternError> {
        self.compiled.as_ref().map(|re| re.is_match(url))
    }

    #[must_use]
    pub fn error(&self) -> Option<&PatternError> {
        self.compiled.as_ref().err()
    }
}

impl PartialEq for UrlPattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

/// Per-rule behaviour switches.
///
/// Field names match the configuration blob; every flag is optional there.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleFlags {
    /// Skip the initial pass over the document body.
    #[serde(default, skip_serializing_if = "is_false")]
    pub skip_body: bool,
    /// Do not watch the body for inserted elements.
    #[serde(default, skip_serializing_if = "is_false")]
    pub skip_observer: bool,
    /// Skip the initial pass over the document's stylesheets.
    #[serde(default, skip_serializing_if = "is_false")]
    pub skip_styles: bool,
    /// Do not watch the head for inserted `<style>` and `<link>` nodes.
    #[serde(default, skip_serializing_if = "is_false")]
    pub skip_observer_css: bool,
    /// Delay before the first pass and before watchers start.
    #[serde(default, skip_serializing_if = "is_zero")]
    pub delay_ms: u64,
    #[serde(default, skip_serializing_if = "is_false")]
    pub debug: bool,
}

fn is_false(b: &bool) -> bool {
    !*b
}

fn is_zero(n: &u64) -> bool {
    *n == 0
}

impl RuleFlags {
    #[must_use]
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

/// A URL-scoped replacement mapping plus its behaviour flags.
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    pattern: UrlPattern,
    replacements: Replacements,
    flags: RuleFlags,
}

impl Rule {
    pub fn new(pattern: &str, replacements: Replacements, flags: RuleFlags) -> Self {
        Self {
            pattern: UrlPattern::new(pattern),
            replacements,
            flags,
        }
    }

    #[must_use]
    pub fn pattern(&self) -> &UrlPattern {
        &self.pattern
    }

    #[must_use]
    pub fn replacements(&self) -> &Replacements {
        &self.replacements
    }

    #[must_use]
    pub fn flags(&self) -> &RuleFlags {
        &self.flags
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} => {} replacements",
            self.pattern.source,
            self.replacements.len()
        )
    }
}
