//! Keyword tables and text helpers for clause detection
//!
//! These tables form the built-in rule set. They are plain data: the
//! classifier and risk scorer read them through `RuleTable` / `RiskPolicy`,
//! and a TOML config can extend or replace them.

use shared_types::Category;

/// Termination / expiry keywords
pub const TERMINATION_TERMS: &[&str] = &[
    "terminate",
    "expire",
    "cancel",
    "cancellation",
    "rescind",
    "right to terminate",
    "notice period",
];

/// Liability / indemnity keywords
pub const LIABILITY_TERMS: &[&str] = &[
    "liability",
    "liable",
    "indemnify",
    "indemnity",
    "indemnification",
    "damages",
    "hold harmless",
    "limitation of liability",
    "negligence",
];

/// Confidentiality / data keywords
pub const CONFIDENTIALITY_TERMS: &[&str] = &[
    "confidential",
    "disclose",
    "disclosure",
    "proprietary information",
    "trade secret",
    "privacy",
    "data protection",
];

/// Payment keywords
pub const PAYMENT_TERMS: &[&str] = &[
    "payment",
    "fee",
    "invoice",
    "price",
    "compensation",
    "remuneration",
    "royalty",
    "reimburse",
];

/// Governing law keywords
pub const GOVERNING_LAW_TERMS: &[&str] = &[
    "governing law",
    "governed by",
    "laws of",
    "choice of law",
    "jurisdiction",
    "venue",
];

/// Dispute resolution keywords
pub const DISPUTE_TERMS: &[&str] = &[
    "dispute",
    "dispute resolution",
    "arbitration",
    "mediation",
    "litigation",
    "court",
    "proceedings",
];

/// Built-in rule table: category -> terms
pub const DEFAULT_RULES: &[(Category, &[&str])] = &[
    (Category::Termination, TERMINATION_TERMS),
    (Category::Liability, LIABILITY_TERMS),
    (Category::Confidentiality, CONFIDENTIALITY_TERMS),
    (Category::Payment, PAYMENT_TERMS),
    (Category::GoverningLaw, GOVERNING_LAW_TERMS),
    (Category::Dispute, DISPUTE_TERMS),
];

/// Categories where "no termination ..." means the clause is absent
pub const NEGATION_SENSITIVE: &[Category] = &[Category::Termination];

/// Words that cancel the keyword that immediately follows them
pub const NEGATORS: &[&str] = &["no", "not", "without", "never", "nor", "neither"];

/// Phrases that introduce a choice-of-law statement
pub const GOVERNING_PHRASES: &[&str] = &[
    "governed by",
    "laws of",
    "law of",
    "construed in accordance with",
    "interpreted in accordance with",
];

/// Jurisdiction names recognised by the governing-law heuristic
pub const JURISDICTIONS: &[&str] = &[
    "england",
    "wales",
    "scotland",
    "ireland",
    "delaware",
    "new york",
    "california",
    "texas",
    "florida",
    "illinois",
    "massachusetts",
    "ontario",
    "quebec",
    "singapore",
    "hong kong",
    "germany",
    "france",
    "switzerland",
    "the netherlands",
    "india",
    "australia",
    "new south wales",
    "victoria",
];

/// Weight of a governing-law heuristic hit (phrase + jurisdiction)
pub const JURISDICTION_WEIGHT: u32 = 2;

/// Built-in high-risk patterns: (name, regex, message)
pub const HIGH_RISK_PATTERNS: &[(&str, &str, &str)] = &[
    (
        "unlimited liability",
        r"(?i)\bunlimited\s+liabilit(?:y|ies)\b|\bliabilit(?:y|ies)\b.{0,40}\bunlimited\b",
        "Liability is not capped",
    ),
    (
        "sole discretion",
        r"(?i)\bsole\s+(?:and\s+absolute\s+)?discretion\b",
        "One party decides unilaterally at its sole discretion",
    ),
    (
        "waives all rights",
        r"(?i)\bwaives?\s+(?:any\s+and\s+)?all\s+(?:of\s+(?:its|their|his|her)\s+)?rights\b",
        "A party waives all of its rights",
    ),
    (
        "no liability",
        r"(?i)\bno\s+liability\s+(?:whatsoever|at\s+all|of\s+any\s+kind)\b|\bnot\s+(?:be\s+)?liable\s+(?:whatsoever|at\s+all|for\s+anything|for\s+any\s+(?:loss|damages?|claims?|reason)|(?:in|under)\s+any\s+(?:event|circumstances?))\b",
        "A party disclaims liability entirely",
    ),
    (
        "exclusive remedy",
        r"(?i)\b(?:sole|exclusive)\s+remed(?:y|ies)\b",
        "Remedies are restricted to a single exclusive remedy",
    ),
    (
        "liquidated damages",
        r"(?i)\bliquidated\s+damages\b",
        "Pre-agreed damages apply regardless of actual loss",
    ),
    (
        "irrevocable",
        r"(?i)\birrevocabl[ey]\b",
        "Commitment cannot be withdrawn",
    ),
    (
        "penalty",
        r"(?i)\bpenalt(?:y|ies)\b",
        "Contract imposes a penalty",
    ),
];

/// Keyword score tiers for the per-category risk breakdown. High-risk
/// patterns score `HIGH_TIER_POINTS`; the keyword tables below score their
/// tier's points once per keyword found in a category's sentences.
pub const HIGH_TIER_POINTS: u32 = 3;
pub const MEDIUM_TIER_POINTS: u32 = 2;
pub const LOW_TIER_POINTS: u32 = 1;

pub const MEDIUM_RISK_KEYWORDS: &[&str] = &[
    "indemnify",
    "third party",
    "limitation of liability",
    "cap on liability",
    "breach",
];

pub const LOW_RISK_KEYWORDS: &[&str] = &["governing law", "jurisdiction", "notice", "term", "payment"];

/// Categories that must be present, otherwise the contract has a structural gap
pub const REQUIRED_CATEGORIES: &[Category] = &[Category::Termination, Category::GoverningLaw];

/// Categories whose sentences are searched for high-risk patterns
pub const RISK_PATTERN_SCOPE: &[Category] = &[Category::Liability, Category::Dispute];

/// Cap on the levels high-risk patterns may add
pub const MAX_PATTERN_ELEVATION: u32 = 2;

/// Abbreviations that end in a period without ending the sentence
pub const ABBREVIATIONS: &[&str] = &[
    "dr", "mr", "mrs", "ms", "prof", "sr", "jr", "inc", "ltd", "corp", "co", "llc", "llp",
    "plc", "pty", "e.g", "i.e", "vs", "etc", "approx", "u.s", "u.k", "p.m", "a.m", "st", "ave",
    "no", "nos", "sec", "art", "para", "cl", "sch", "fig", "dept", "viz", "cf", "al", "ibid",
];

/// Words that may precede a clause number in a heading ("Section 4.")
pub const HEADING_WORDS: &[&str] = &["section", "clause", "article", "schedule", "exhibit"];

/// Extract a snippet of at most `max_chars` characters, respecting char boundaries
pub fn extract_snippet(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars).collect();
    format!("{}...", cut.trim_end())
}
