use thiserror::Error;

/// A rule whose URL pattern is not a valid regular expression.
///
/// Such a rule stays in the [`RuleStore`](super::RuleStore) but can never be
/// selected.
#[derive(Debug, Clone, Error)]
#[error("invalid url pattern '{pattern}': {source}")]
pub struct PatternError {
    pub pattern: String,
    #[source]
    pub source: regex::Error,
}

/// A stylesheet whose rules cannot be read, typically because it was served
/// from another origin.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot read rules from {}: {reason}", href.as_deref().unwrap_or("<inline sheet>"))]
pub struct SheetAccessError {
    pub href: Option<String>,
    pub reason: String,
}

impl SheetAccessError {
    pub fn new(href: Option<&str>, reason: impl Into<String>) -> Self {
        Self {
            href: href.map(str::to_owned),
            reason: reason.into(),
        }
    }
}

/// Errors produced while loading or saving the configuration blob.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(
        "config must be an array. Example: \
         [{{\"pattern_url\":\".*\",\"replacements\":{{\"Helvetica\":\"Verdana\",\"Segoe UI\":\"Arial\"}}}}]"
    )]
    NotAnArray,

    #[error("invalid rule at index {index}: {source}")]
    InvalidRule {
        index: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("settings store error: {0}")]
    Store(String),
}
