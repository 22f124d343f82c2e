mod error;
mod replacements;
mod report;
mod rule;
mod rule_store;

pub use error::{ConfigError, PatternError, SheetAccessError};
pub use replacements::Replacements;
pub use report::{ElementOutcome, SheetOutcome, TraversalSummary};
pub use rule::{Rule, RuleFlags, UrlPattern};
pub use rule_store::{RuleBuilder, RuleStore, RuleStoreBuilder};
