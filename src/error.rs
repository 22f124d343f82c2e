use thiserror::Error;

use crate::ConfigError;

/// Unified error type covering configuration parsing and I/O.
///
/// Returned by convenience constructors like
/// [`RuleStore::from_json()`](crate::RuleStore::from_json) and
/// [`RuleStore::from_file()`](crate::RuleStore::from_file).
#[derive(Debug, Error)]
pub enum RefontError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
