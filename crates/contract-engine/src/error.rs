use shared_types::Category;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading or compiling engine configuration
///
/// Analysis itself never fails; these only surface when building a
/// `ContractEngine` from user-supplied rules.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse TOML configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid risk pattern '{name}': {source}")]
    InvalidPattern {
        name: String,
        #[source]
        source: regex::Error,
    },

    #[error("Invalid summary length: {0}")]
    InvalidSummaryLength(String),

    #[error("Empty term in {0} rules")]
    EmptyTerm(Category),

    #[error("Empty keyword in {0}-risk keyword list")]
    EmptyKeyword(&'static str),
}
