mod apply;
pub mod config;
mod error;
pub mod host;
pub mod parse;
mod select;
mod session;
mod types;
mod watch;

pub use apply::Applier;
pub use config::{Config, RuleConfig};
pub use error::RefontError;
pub use parse::{rewrite, rewrite_optional, rewrite_with, CommentMode, RewriteOptions};
pub use select::select_rule;
pub use session::Session;
pub use types::{
    ConfigError, ElementOutcome, PatternError, Replacements, Rule, RuleBuilder, RuleFlags,
    RuleStore, RuleStoreBuilder, SheetAccessError, SheetOutcome, TraversalSummary, UrlPattern,
};
pub use watch::{HeadNode, HeadOutcome, MutationWatcher, WatchPlan};
