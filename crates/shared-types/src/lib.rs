//! Value types shared by the contract engine, the extraction crate and the CLI.

pub mod types;

pub use types::{
    Category, CategoryRisk, ChecklistEntry, ClauseMap, ClauseMatch, ContractReport, Document,
    RiskAssessment, RiskLevel, RiskSignal, Sentence, SignalKind, SummaryResult,
};
