use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Contract clause categories recognised by the engine
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Termination,
    Liability,
    Confidentiality,
    Payment,
    GoverningLaw,
    Dispute,
}

impl Category {
    /// Every category, in checklist order
    pub const ALL: [Category; 6] = [
        Category::Termination,
        Category::Liability,
        Category::Confidentiality,
        Category::Payment,
        Category::GoverningLaw,
        Category::Dispute,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::Termination => "Termination",
            Category::Liability => "Liability",
            Category::Confidentiality => "Confidentiality",
            Category::Payment => "Payment",
            Category::GoverningLaw => "Governing Law",
            Category::Dispute => "Dispute",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Sentence {
    pub index: usize, // Position in the document, 0-based
    pub text: String,
}

/// Normalized contract text
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Document {
    pub raw_text: String,
    pub sentences: Vec<Sentence>,
}

impl Document {
    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }

    pub fn len(&self) -> usize {
        self.sentences.len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ClauseMatch {
    pub category: Category,
    pub sentence: Sentence,
    pub weight: u32,                // Sum of distinct matched term weights
    pub matched_terms: Vec<String>, // e.g., "terminate", "jurisdiction:delaware"
}

/// Category -> matches, always holding all six categories
///
/// Each list is ordered by weight (highest first); equal weights keep
/// document order.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ClauseMap {
    pub sentence_count: usize,
    pub matches: BTreeMap<Category, Vec<ClauseMatch>>,
}

impl ClauseMap {
    pub fn empty(sentence_count: usize) -> Self {
        Self {
            sentence_count,
            matches: Category::ALL.iter().map(|c| (*c, Vec::new())).collect(),
        }
    }

    pub fn get(&self, category: Category) -> &[ClauseMatch] {
        self.matches
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn is_addressed(&self, category: Category) -> bool {
        !self.get(category).is_empty()
    }

    /// Indices of every sentence that matched at least one category
    pub fn matched_sentences(&self) -> BTreeSet<usize> {
        self.matches
            .values()
            .flatten()
            .map(|m| m.sentence.index)
            .collect()
    }

    pub fn total_matches(&self) -> usize {
        self.matches.values().map(Vec::len).sum()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SummaryResult {
    pub sentences: Vec<Sentence>, // Document order
}

impl SummaryResult {
    pub fn text(&self) -> String {
        self.sentences
            .iter()
            .map(|s| s.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
pub enum RiskLevel {
    #[default]
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Raise the level by `steps`, saturating at High
    pub fn elevate(self, steps: u32) -> Self {
        match (self as u32).saturating_add(steps) {
            0 => RiskLevel::Low,
            1 => RiskLevel::Medium,
            _ => RiskLevel::High,
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskLevel::Low => f.write_str("Low"),
            RiskLevel::Medium => f.write_str("Medium"),
            RiskLevel::High => f.write_str("High"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SignalKind {
    MissingCategory { category: Category },
    HighRiskPattern { pattern: String },
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RiskSignal {
    pub kind: SignalKind,
    pub message: String,
    pub evidence: Option<String>,
    pub sentence_index: Option<usize>,
    pub elevation: u32, // Levels this signal contributed after capping
}

/// Heuristic keyword score for one addressed category
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CategoryRisk {
    pub category: Category,
    pub score: u32,
    pub reasons: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RiskAssessment {
    pub level: RiskLevel,
    pub signals: Vec<RiskSignal>,
    /// Sum of the per-category scores; informational, does not drive `level`
    pub score: u32,
    pub breakdown: Vec<CategoryRisk>,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ChecklistEntry {
    pub category: Category,
    pub addressed: bool,
    pub matches: Vec<ClauseMatch>,
    pub notes: String,
}

/// Full result bundle for one analyzed contract
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ContractReport {
    pub sentence_count: usize,
    pub summary: SummaryResult,
    pub clauses: ClauseMap,
    pub risk: RiskAssessment,
    pub checklist: Vec<ChecklistEntry>,
}
