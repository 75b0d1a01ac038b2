//! Contract clause extraction pipeline
//!
//! raw text -> `Normalizer` -> `ClauseClassifier` -> {`Summarizer`,
//! `RiskPolicy`, checklist}. Every stage is a pure function of its input;
//! `ContractEngine` bundles them and is safe to share across threads.
//!
//! ```
//! use contract_engine::ContractEngine;
//! use shared_types::{Category, RiskLevel};
//!
//! let engine = ContractEngine::new();
//! let report = engine.analyze(
//!     "Either party may terminate this Agreement on notice. \
//!      This Agreement is governed by the laws of Delaware.",
//! );
//! assert!(report.clauses.is_addressed(Category::Termination));
//! assert_eq!(report.risk.level, RiskLevel::Low);
//! assert_eq!(report.checklist.len(), 6);
//! ```

pub mod classifier;
pub mod config;
pub mod error;
pub mod extractors;
pub mod normalizer;
pub mod patterns;
pub mod rules;
pub mod search;
pub mod summarizer;

pub use classifier::{ClauseClassifier, RuleTable};
pub use config::{EngineConfig, SummaryLength};
pub use error::ConfigError;
pub use normalizer::Normalizer;
pub use rules::risk::RiskPolicy;
pub use summarizer::Summarizer;

use shared_types::{ContractReport, Document, Sentence};

/// ContractEngine entry point
pub struct ContractEngine {
    normalizer: Normalizer,
    classifier: ClauseClassifier,
    summarizer: Summarizer,
    risk: RiskPolicy,
}

impl ContractEngine {
    /// Engine with the built-in rule tables
    pub fn new() -> Self {
        Self {
            normalizer: Normalizer::new(),
            classifier: ClauseClassifier::default(),
            summarizer: Summarizer::new(),
            risk: RiskPolicy::builtin(),
        }
    }

    /// Engine built from a (possibly partial) configuration
    pub fn from_config(config: &EngineConfig) -> Result<Self, ConfigError> {
        config.summary.length.validate()?;
        Ok(Self {
            normalizer: Normalizer::from_config(&config.normalizer),
            classifier: ClauseClassifier::new(RuleTable::from_config(&config.classifier)?),
            summarizer: Summarizer::from_config(&config.summary),
            risk: RiskPolicy::from_config(&config.risk)?,
        })
    }

    /// Override the configured summary length
    pub fn with_summary_length(mut self, length: SummaryLength) -> Result<Self, ConfigError> {
        length.validate()?;
        self.summarizer = self.summarizer.with_length(length);
        Ok(self)
    }

    pub fn normalize(&self, text: &str) -> Document {
        self.normalizer.normalize(text)
    }

    /// Run the full pipeline on raw text
    pub fn analyze(&self, text: &str) -> ContractReport {
        let document = self.normalize(text);
        self.analyze_document(&document)
    }

    /// Run classification, summary, risk and checklist on a normalized document
    pub fn analyze_document(&self, document: &Document) -> ContractReport {
        let clauses = self.classifier.classify(&document.sentences);
        let summary = self.summarizer.summarize(document, &clauses);
        let risk = self.risk.assess(&clauses);
        let checklist = rules::checklist::build_checklist(&clauses);

        tracing::info!(
            sentences = document.len(),
            matches = clauses.total_matches(),
            risk = %risk.level,
            "analyzed contract"
        );

        ContractReport {
            sentence_count: document.len(),
            summary,
            clauses,
            risk,
            checklist,
        }
    }

    /// Case-insensitive keyword search over a normalized document
    pub fn search<'a>(&self, document: &'a Document, query: &str) -> Vec<&'a Sentence> {
        search::search(document, query)
    }
}

impl Default for ContractEngine {
    fn default() -> Self {
        Self::new()
    }
}
