//! The configuration blob, its compiled-in defaults, and the settings surface
//! that loads and saves it through a host key-value store.
//!
//! ```text
//! {
//!   "enabled": true,
//!   "fontConfig": [
//!     { "pattern_url": "^.*gitlab\\.com", "replacements": { "GitLab Sans": "Verdana" } },
//!     { "pattern_url": ".*", "replacements": { "Helvetica": "Verdana" }, "delay_ms": 500 }
//!   ]
//! }
//! ```

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{ConfigError, Replacements, Rule, RuleFlags, RuleStore};

/// Storage key of the global on/off switch.
pub const ENABLED_KEY: &str = "enabled";
/// Storage key of the rule list.
pub const FONT_CONFIG_KEY: &str = "fontConfig";

/// One entry of `fontConfig`, in its configuration shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleConfig {
    pub pattern_url: String,
    #[serde(default)]
    pub replacements: Replacements,
    #[serde(flatten)]
    pub flags: RuleFlags,
}

impl RuleConfig {
    pub fn new(pattern_url: &str, replacements: Replacements) -> Self {
        Self {
            pattern_url: pattern_url.to_owned(),
            replacements,
            flags: RuleFlags::default(),
        }
    }

    #[must_use]
    pub fn to_rule(&self) -> Rule {
        Rule::new(
            &self.pattern_url,
            self.replacements.clone(),
            self.flags.clone(),
        )
    }
}

/// The whole configuration blob.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
    #[serde(default = "default_rules")]
    pub font_config: Vec<RuleConfig>,
}

fn enabled_by_default() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            enabled: true,
            font_config: default_rules(),
        }
    }
}

impl Config {
    /// Parse a full configuration blob.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Json`] if the text is not a valid blob.
    pub fn from_json(input: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(input)?)
    }

    #[must_use]
    pub fn rule_store(&self) -> RuleStore {
        RuleStore::from_config(&self.font_config)
    }
}

/// The rules used when the store holds no configuration yet: a GitLab rule
/// followed by a catch-all.
#[must_use]
pub fn default_rules() -> Vec<RuleConfig> {
    vec![
        RuleConfig::new(
            r"^.*gitlab\.com",
            [
                ("GitLab", "Verdana"),
                ("GitLab Sans", "Verdana"),
                ("GitLab Mono", "Courier New"),
            ]
            .into_iter()
            .collect(),
        ),
        RuleConfig::new(
            ".*",
            [
                ("Helvetica", "Verdana"),
                ("Kaspersky Sans", "Verdana"),
                ("Verdana Neue", "Verdana"),
                ("GitLab Sans", "Verdana"),
                ("Segoe UI", "Arial"),
                ("Inter", "Arial"),
                ("Georgia", "Times New Roman"),
                ("Roboto Mono", "Courier New"),
                ("Roboto", "Verdana"),
                ("Metropolis", "Verdana"),
                ("Open Sans", "Verdana"),
                ("Manrope", "Verdana"),
                ("Lato", "Arial"),
                ("Golos", "Arial"),
                ("Golos Text", "Arial"),
                ("GitLab Mono", "Courier New"),
            ]
            .into_iter()
            .collect(),
        ),
    ]
}

fn rules_from_value(value: Value) -> Result<Vec<RuleConfig>, ConfigError> {
    let Value::Array(items) = value else {
        return Err(ConfigError::NotAnArray);
    };
    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            serde_json::from_value(item).map_err(|source| ConfigError::InvalidRule { index, source })
        })
        .collect()
}

/// Parse a JSON `fontConfig` array.
///
/// # Errors
///
/// Returns [`ConfigError`] if the text is not JSON, not an array, or holds an
/// entry without the rule shape.
pub fn parse_rules(input: &str) -> Result<Vec<RuleConfig>, ConfigError> {
    rules_from_value(serde_json::from_str(input)?)
}

// -- Host storage -----------------------------------------------------------

/// Persistent key-value storage owned by the host.
pub trait SettingsStore {
    fn get(&self, key: &str) -> Option<Value>;

    /// # Errors
    ///
    /// Returns [`ConfigError::Store`] if the host cannot persist the value.
    fn set(&mut self, key: &str, value: Value) -> Result<(), ConfigError>;
}

/// A [`SettingsStore`] kept in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, Value>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SettingsStore for MemoryStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: Value) -> Result<(), ConfigError> {
        self.values.insert(key.to_owned(), value);
        Ok(())
    }
}

fn stored_enabled<S: SettingsStore + ?Sized>(store: &S) -> bool {
    !matches!(store.get(ENABLED_KEY), Some(Value::Bool(false)))
}

fn stored_rules<S: SettingsStore + ?Sized>(store: &S) -> Option<Value> {
    store.get(FONT_CONFIG_KEY).filter(|v| !v.is_null())
}

/// Load the configuration from `store`.
///
/// Only an explicit `false` disables the crate. When no rule list is stored
/// yet, the defaults are written back together with the current `enabled`
/// value and returned.
///
/// # Errors
///
/// Returns [`ConfigError`] if the stored rule list is malformed or the
/// defaults cannot be persisted.
pub fn load_config<S: SettingsStore + ?Sized>(store: &mut S) -> Result<Config, ConfigError> {
    let enabled = stored_enabled(store);
    match stored_rules(store) {
        Some(value) => Ok(Config {
            enabled,
            font_config: rules_from_value(value)?,
        }),
        None => {
            let config = Config {
                enabled,
                font_config: default_rules(),
            };
            store.set(ENABLED_KEY, Value::Bool(enabled))?;
            store.set(FONT_CONFIG_KEY, serde_json::to_value(&config.font_config)?)?;
            Ok(config)
        }
    }
}

/// Stored rule list as pretty JSON with two-space indentation, `[]` when
/// nothing is stored.
///
/// # Errors
///
/// Returns [`ConfigError::Json`] if the stored value cannot be rendered.
pub fn settings_text<S: SettingsStore + ?Sized>(store: &S) -> Result<String, ConfigError> {
    let rules = stored_rules(store).unwrap_or_else(|| Value::Array(Vec::new()));
    Ok(serde_json::to_string_pretty(&rules)?)
}

/// Whether the store currently has the crate enabled.
#[must_use]
pub fn settings_enabled<S: SettingsStore + ?Sized>(store: &S) -> bool {
    stored_enabled(store)
}

/// Validate edited settings text and persist it.
///
/// Nothing is written unless the text is a JSON array whose entries all have
/// the rule shape. Saved changes apply to pages loaded afterwards.
///
/// # Errors
///
/// Returns [`ConfigError`] describing why the text was rejected.
pub fn save_settings_text<S: SettingsStore + ?Sized>(
    store: &mut S,
    enabled: bool,
    text: &str,
) -> Result<Config, ConfigError> {
    let value: Value = serde_json::from_str(text)?;
    let font_config = rules_from_value(value.clone())?;
    store.set(ENABLED_KEY, Value::Bool(enabled))?;
    store.set(FONT_CONFIG_KEY, value)?;
    Ok(Config {
        enabled,
        font_config,
    })
}
