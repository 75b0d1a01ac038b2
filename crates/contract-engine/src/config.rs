//! TOML configuration for the contract engine
//!
//! Every section is optional. Without a file the engine runs on the
//! built-in keyword tables from `patterns`. A config can add terms,
//! jurisdictions and risk patterns, or replace the defaults outright.
//!
//! ```toml
//! [normalizer]
//! ascii_only = false
//! extra_abbreviations = ["Pty"]
//!
//! [summary]
//! length = { sentences = 5 }
//! position_weight = 0.5
//! clause_bonus = 0.5
//!
//! [[classifier.categories]]
//! category = "payment"
//! terms = ["net 30", { term = "late fee", weight = 2 }]
//!
//! [risk]
//! medium_keywords = ["indemnify", "breach", "assignment"]
//!
//! [[risk.patterns]]
//! name = "auto renewal"
//! pattern = "(?i)automatically\\s+renew"
//! ```

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use shared_types::Category;
use std::fs;
use std::path::Path;

use crate::patterns::{
    JURISDICTION_WEIGHT, LOW_RISK_KEYWORDS, MAX_PATTERN_ELEVATION, MEDIUM_RISK_KEYWORDS,
    REQUIRED_CATEGORIES, RISK_PATTERN_SCOPE,
};

/// Top-level engine configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub normalizer: NormalizerConfig,
    #[serde(default)]
    pub classifier: ClassifierConfig,
    #[serde(default)]
    pub summary: SummaryConfig,
    #[serde(default)]
    pub risk: RiskConfig,
}

impl EngineConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = toml::from_str(s)?;
        config.summary.length.validate()?;
        Ok(config)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizerConfig {
    /// Replace non-ASCII runs with a space before segmenting
    #[serde(default)]
    pub ascii_only: bool,
    /// Abbreviations (without trailing period) that never end a sentence
    #[serde(default)]
    pub extra_abbreviations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Drop the built-in keyword tables and use only `categories`
    #[serde(default)]
    pub replace_defaults: bool,
    #[serde(default)]
    pub categories: Vec<CategoryRules>,
    /// Extra jurisdiction names for the governing-law heuristic
    #[serde(default)]
    pub jurisdictions: Vec<String>,
    #[serde(default = "default_jurisdiction_weight")]
    pub jurisdiction_weight: u32,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            replace_defaults: false,
            categories: Vec::new(),
            jurisdictions: Vec::new(),
            jurisdiction_weight: default_jurisdiction_weight(),
        }
    }
}

fn default_jurisdiction_weight() -> u32 {
    JURISDICTION_WEIGHT
}

/// Terms for one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRules {
    pub category: Category,
    #[serde(default)]
    pub terms: Vec<TermSpec>,
    /// Ignore terms directly preceded by a negator ("no", "without", ...)
    #[serde(default)]
    pub suppress_negated: Option<bool>,
}

/// A rule term, either `"term"` or `{ term = "...", weight = N }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TermSpec {
    Plain(String),
    Weighted { term: String, weight: u32 },
}

impl TermSpec {
    pub fn term(&self) -> &str {
        match self {
            TermSpec::Plain(term) => term,
            TermSpec::Weighted { term, .. } => term,
        }
    }

    pub fn weight(&self) -> u32 {
        match self {
            TermSpec::Plain(_) => 1,
            TermSpec::Weighted { weight, .. } => *weight,
        }
    }
}

/// Target summary size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SummaryLength {
    Sentences(usize),
    /// Share of the document, in (0, 1]
    Fraction(f64),
}

impl Default for SummaryLength {
    fn default() -> Self {
        SummaryLength::Sentences(5)
    }
}

impl SummaryLength {
    /// Number of sentences to select from a document of `total` sentences
    pub fn resolve(&self, total: usize) -> usize {
        match *self {
            SummaryLength::Sentences(n) => n,
            SummaryLength::Fraction(_) if total == 0 => 0,
            SummaryLength::Fraction(f) => ((f * total as f64).ceil() as usize).max(1),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        match *self {
            SummaryLength::Sentences(0) => Err(ConfigError::InvalidSummaryLength(
                "sentence count must be at least 1".to_string(),
            )),
            SummaryLength::Fraction(f) if !(f > 0.0 && f <= 1.0) => {
                Err(ConfigError::InvalidSummaryLength(format!(
                    "fraction must be in (0, 1], got {}",
                    f
                )))
            }
            _ => Ok(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryConfig {
    #[serde(default)]
    pub length: SummaryLength,
    /// Weight of the first/last-sentence bias
    #[serde(default = "default_position_weight")]
    pub position_weight: f64,
    /// Bonus for sentences that matched any clause category
    #[serde(default = "default_clause_bonus")]
    pub clause_bonus: f64,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            length: SummaryLength::default(),
            position_weight: default_position_weight(),
            clause_bonus: default_clause_bonus(),
        }
    }
}

fn default_position_weight() -> f64 {
    0.5
}

fn default_clause_bonus() -> f64 {
    0.5
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskConfig {
    /// Drop the built-in high-risk patterns and use only `patterns`
    #[serde(default)]
    pub replace_default_patterns: bool,
    #[serde(default)]
    pub patterns: Vec<PatternConfig>,
    /// Categories whose absence raises the risk level
    #[serde(default = "default_required")]
    pub required_categories: Vec<Category>,
    /// Categories whose sentences are searched for high-risk patterns
    #[serde(default = "default_scope")]
    pub pattern_scope: Vec<Category>,
    #[serde(default = "default_max_pattern_elevation")]
    pub max_pattern_elevation: u32,
    /// Keywords scored as medium risk in the per-category breakdown
    #[serde(default = "default_medium_keywords")]
    pub medium_keywords: Vec<String>,
    /// Keywords scored as low risk in the per-category breakdown
    #[serde(default = "default_low_keywords")]
    pub low_keywords: Vec<String>,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            replace_default_patterns: false,
            patterns: Vec::new(),
            required_categories: default_required(),
            pattern_scope: default_scope(),
            max_pattern_elevation: default_max_pattern_elevation(),
            medium_keywords: default_medium_keywords(),
            low_keywords: default_low_keywords(),
        }
    }
}

fn default_required() -> Vec<Category> {
    REQUIRED_CATEGORIES.to_vec()
}

fn default_scope() -> Vec<Category> {
    RISK_PATTERN_SCOPE.to_vec()
}

fn default_max_pattern_elevation() -> u32 {
    MAX_PATTERN_ELEVATION
}

fn default_medium_keywords() -> Vec<String> {
    MEDIUM_RISK_KEYWORDS.iter().map(|k| k.to_string()).collect()
}

fn default_low_keywords() -> Vec<String> {
    LOW_RISK_KEYWORDS.iter().map(|k| k.to_string()).collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternConfig {
    pub name: String,
    /// Regular expression (use `(?i)` for case-insensitive matching)
    pub pattern: String,
    #[serde(default)]
    pub message: Option<String>,
}
