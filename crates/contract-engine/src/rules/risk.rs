// Risk scoring over classified clauses
//
// Base level is Low. Each missing required category adds one level; each
// distinct high-risk pattern found in a scoped category's sentences adds
// one level up to `max_pattern_elevation`. The total saturates at High.
//
// Separately, every addressed category gets a keyword score: 3 per high-risk
// pattern, 2 per medium keyword, 1 per low keyword found in its sentences.
// The scores sum to `RiskAssessment::score` and never affect the level.
use crate::config::RiskConfig;
use crate::error::ConfigError;
use crate::extractors::tokens::{find_phrase, stems};
use crate::patterns::{
    extract_snippet, HIGH_RISK_PATTERNS, HIGH_TIER_POINTS, LOW_RISK_KEYWORDS, LOW_TIER_POINTS,
    MAX_PATTERN_ELEVATION, MEDIUM_RISK_KEYWORDS, MEDIUM_TIER_POINTS, REQUIRED_CATEGORIES,
    RISK_PATTERN_SCOPE,
};
use lazy_static::lazy_static;
use regex::Regex;
use shared_types::{
    Category, CategoryRisk, ClauseMap, ClauseMatch, RiskAssessment, RiskLevel, RiskSignal,
    SignalKind,
};

/// Evidence snippets are cut to this many characters
const EVIDENCE_CHARS: usize = 200;

#[derive(Debug, Clone)]
pub struct RiskPattern {
    pub name: String,
    pub message: String,
    pub regex: Regex,
}

lazy_static! {
    static ref BUILTIN_PATTERNS: Vec<RiskPattern> = HIGH_RISK_PATTERNS
        .iter()
        .map(|(name, pattern, message)| RiskPattern {
            name: name.to_string(),
            message: message.to_string(),
            regex: Regex::new(pattern).unwrap(),
        })
        .collect();
}

/// A breakdown keyword with its stemmed tokens
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RiskKeyword {
    pub label: String,
    stems: Vec<String>,
}

/// Compile a keyword tier, dropping duplicates by stem
fn keyword_tier<S: AsRef<str>>(
    keywords: &[S],
    tier: &'static str,
) -> Result<Vec<RiskKeyword>, ConfigError> {
    let mut compiled: Vec<RiskKeyword> = Vec::new();
    for keyword in keywords {
        let keyword = keyword.as_ref();
        let stems = stems(keyword);
        if stems.is_empty() {
            return Err(ConfigError::EmptyKeyword(tier));
        }
        if !compiled.iter().any(|k| k.stems == stems) {
            compiled.push(RiskKeyword {
                label: keyword.trim().to_lowercase(),
                stems,
            });
        }
    }
    Ok(compiled)
}

/// Data-driven risk rule table
#[derive(Debug, Clone)]
pub struct RiskPolicy {
    required: Vec<Category>,
    scope: Vec<Category>,
    patterns: Vec<RiskPattern>,
    max_pattern_elevation: u32,
    medium: Vec<RiskKeyword>,
    low: Vec<RiskKeyword>,
}

impl RiskPolicy {
    pub fn builtin() -> Self {
        Self {
            required: REQUIRED_CATEGORIES.to_vec(),
            scope: RISK_PATTERN_SCOPE.to_vec(),
            patterns: BUILTIN_PATTERNS.clone(),
            max_pattern_elevation: MAX_PATTERN_ELEVATION,
            medium: keyword_tier(MEDIUM_RISK_KEYWORDS, "medium").unwrap_or_default(),
            low: keyword_tier(LOW_RISK_KEYWORDS, "low").unwrap_or_default(),
        }
    }

    pub fn from_config(config: &RiskConfig) -> Result<Self, ConfigError> {
        let mut patterns = if config.replace_default_patterns {
            Vec::new()
        } else {
            BUILTIN_PATTERNS.clone()
        };

        for pattern in &config.patterns {
            let regex =
                Regex::new(&pattern.pattern).map_err(|source| ConfigError::InvalidPattern {
                    name: pattern.name.clone(),
                    source,
                })?;
            patterns.push(RiskPattern {
                name: pattern.name.clone(),
                message: pattern
                    .message
                    .clone()
                    .unwrap_or_else(|| format!("High-risk wording: {}", pattern.name)),
                regex,
            });
        }

        Ok(Self {
            required: config.required_categories.clone(),
            scope: config.pattern_scope.clone(),
            patterns,
            max_pattern_elevation: config.max_pattern_elevation,
            medium: keyword_tier(&config.medium_keywords, "medium")?,
            low: keyword_tier(&config.low_keywords, "low")?,
        })
    }

    pub fn patterns(&self) -> &[RiskPattern] {
        &self.patterns
    }

    /// Score a classified document
    ///
    /// A document with no sentences is Low with no signals.
    pub fn assess(&self, clauses: &ClauseMap) -> RiskAssessment {
        if clauses.sentence_count == 0 {
            return RiskAssessment::default();
        }

        let mut signals = self.structural_gaps(clauses);
        signals.extend(self.pattern_hits(clauses));

        let elevation: u32 = signals.iter().map(|s| s.elevation).sum();
        let level = RiskLevel::Low.elevate(elevation);

        let breakdown = self.breakdown(clauses);
        let score: u32 = breakdown.iter().map(|c| c.score).sum();

        tracing::debug!(%level, signals = signals.len(), score, "assessed risk");

        RiskAssessment {
            level,
            signals,
            score,
            breakdown,
        }
    }

    /// Keyword score and reasons for every addressed category, in category order
    pub fn breakdown(&self, clauses: &ClauseMap) -> Vec<CategoryRisk> {
        Category::ALL
            .iter()
            .filter(|c| clauses.is_addressed(**c))
            .map(|category| self.score_category(*category, clauses.get(*category)))
            .collect()
    }

    fn score_category(&self, category: Category, matches: &[ClauseMatch]) -> CategoryRisk {
        let tokens: Vec<Vec<String>> = matches.iter().map(|m| stems(&m.sentence.text)).collect();
        let mut score = 0;
        let mut reasons = Vec::new();

        for pattern in &self.patterns {
            if matches.iter().any(|m| pattern.regex.is_match(&m.sentence.text)) {
                score += HIGH_TIER_POINTS;
                reasons.push(format!("High-risk wording: \"{}\"", pattern.name));
            }
        }

        let tiers = [
            ("Medium", MEDIUM_TIER_POINTS, &self.medium),
            ("Low", LOW_TIER_POINTS, &self.low),
        ];
        for (tier, points, keywords) in tiers {
            for keyword in keywords.iter() {
                if tokens.iter().any(|t| !find_phrase(t, &keyword.stems).is_empty()) {
                    score += points;
                    reasons.push(format!("{}-risk keyword: \"{}\"", tier, keyword.label));
                }
            }
        }

        CategoryRisk {
            category,
            score,
            reasons,
        }
    }

    /// One signal per required category with no matches, in category order
    fn structural_gaps(&self, clauses: &ClauseMap) -> Vec<RiskSignal> {
        Category::ALL
            .iter()
            .filter(|c| self.required.contains(*c) && !clauses.is_addressed(**c))
            .map(|category| RiskSignal {
                kind: SignalKind::MissingCategory {
                    category: *category,
                },
                message: format!("No {} clause detected", category.label().to_lowercase()),
                evidence: None,
                sentence_index: None,
                elevation: 1,
            })
            .collect()
    }

    /// One signal per distinct pattern, evidence from its first sentence
    fn pattern_hits(&self, clauses: &ClauseMap) -> Vec<RiskSignal> {
        let mut scoped: Vec<&ClauseMatch> = self
            .scope
            .iter()
            .flat_map(|c| clauses.get(*c).iter())
            .collect();
        scoped.sort_by_key(|m| m.sentence.index);
        scoped.dedup_by_key(|m| m.sentence.index);

        let mut used = 0;
        let mut signals = Vec::new();
        for pattern in &self.patterns {
            let Some(hit) = scoped.iter().find(|m| pattern.regex.is_match(&m.sentence.text))
            else {
                continue;
            };

            let elevation = if used < self.max_pattern_elevation {
                used += 1;
                1
            } else {
                0
            };

            signals.push(RiskSignal {
                kind: SignalKind::HighRiskPattern {
                    pattern: pattern.name.clone(),
                },
                message: format!("{} ({})", pattern.message, hit.category.label()),
                evidence: Some(extract_snippet(&hit.sentence.text, EVIDENCE_CHARS)),
                sentence_index: Some(hit.sentence.index),
                elevation,
            });
        }
        signals
    }
}

impl Default for RiskPolicy {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PatternConfig;
    use shared_types::Sentence;

    fn clause(category: Category, index: usize, text: &str) -> ClauseMatch {
        ClauseMatch {
            category,
            sentence: Sentence {
                index,
                text: text.to_string(),
            },
            weight: 1,
            matched_terms: vec![],
        }
    }

    fn map_with(sentence_count: usize, matches: Vec<ClauseMatch>) -> ClauseMap {
        let mut map = ClauseMap::empty(sentence_count);
        for m in matches {
            map.matches.entry(m.category).or_default().push(m);
        }
        map
    }

    #[test]
    fn test_empty_document_is_low_without_signals() {
        let assessment = RiskPolicy::builtin().assess(&ClauseMap::empty(0));
        assert_eq!(assessment.level, RiskLevel::Low);
        assert!(assessment.signals.is_empty());
    }

    #[test]
    fn test_complete_contract_is_low() {
        let map = map_with(
            2,
            vec![
                clause(Category::Termination, 0, "Either party may terminate."),
                clause(Category::GoverningLaw, 1, "Governed by the laws of Delaware."),
            ],
        );
        let assessment = RiskPolicy::builtin().assess(&map);
        assert_eq!(assessment.level, RiskLevel::Low);
        assert!(assessment.signals.is_empty());
    }

    #[test]
    fn test_each_missing_required_category_elevates() {
        let only_termination = map_with(
            1,
            vec![clause(Category::Termination, 0, "Either party may terminate.")],
        );
        let assessment = RiskPolicy::builtin().assess(&only_termination);
        assert_eq!(assessment.level, RiskLevel::Medium);
        assert_eq!(
            assessment.signals[0].kind,
            SignalKind::MissingCategory {
                category: Category::GoverningLaw
            }
        );

        let assessment = RiskPolicy::builtin().assess(&map_with(1, vec![]));
        assert_eq!(assessment.level, RiskLevel::High);
        assert_eq!(assessment.signals.len(), 2);
    }

    #[test]
    fn test_high_risk_pattern_in_liability_clause() {
        let map = map_with(
            3,
            vec![
                clause(Category::Termination, 0, "Either party may terminate."),
                clause(Category::GoverningLaw, 1, "Governed by the laws of Delaware."),
                clause(Category::Liability, 2, "The Supplier accepts unlimited liability."),
            ],
        );
        let assessment = RiskPolicy::builtin().assess(&map);
        assert_eq!(assessment.level, RiskLevel::Medium);
        assert_eq!(assessment.signals.len(), 1);

        let signal = &assessment.signals[0];
        assert_eq!(
            signal.kind,
            SignalKind::HighRiskPattern {
                pattern: "unlimited liability".to_string()
            }
        );
        assert_eq!(signal.sentence_index, Some(2));
        assert_eq!(
            signal.evidence.as_deref(),
            Some("The Supplier accepts unlimited liability.")
        );
    }

    #[test]
    fn test_patterns_outside_scope_are_ignored() {
        let map = map_with(
            3,
            vec![
                clause(Category::Termination, 0, "We may terminate at our sole discretion."),
                clause(Category::GoverningLaw, 1, "Governed by the laws of Delaware."),
            ],
        );
        let assessment = RiskPolicy::builtin().assess(&map);
        assert_eq!(assessment.level, RiskLevel::Low);
    }

    #[test]
    fn test_pattern_elevation_is_capped_but_signals_kept() {
        let map = map_with(
            3,
            vec![
                clause(Category::Termination, 0, "Either party may terminate."),
                clause(Category::GoverningLaw, 1, "Governed by the laws of Delaware."),
                clause(
                    Category::Liability,
                    2,
                    "Liability is unlimited, liquidated damages apply and the waiver is irrevocable.",
                ),
            ],
        );
        let assessment = RiskPolicy::builtin().assess(&map);
        assert_eq!(assessment.level, RiskLevel::High);
        assert_eq!(assessment.signals.len(), 3);
        let elevations: Vec<u32> = assessment.signals.iter().map(|s| s.elevation).collect();
        assert_eq!(elevations, vec![1, 1, 0]);
    }

    #[test]
    fn test_repeated_pattern_counts_once() {
        let map = map_with(
            3,
            vec![
                clause(Category::Termination, 0, "Either party may terminate."),
                clause(Category::Liability, 1, "Supplier bears unlimited liability."),
                clause(Category::Dispute, 2, "Disputes about unlimited liability go to court."),
            ],
        );
        let assessment = RiskPolicy::builtin().assess(&map);
        let pattern_signals: Vec<_> = assessment
            .signals
            .iter()
            .filter(|s| matches!(s.kind, SignalKind::HighRiskPattern { .. }))
            .collect();
        assert_eq!(pattern_signals.len(), 1);
        assert_eq!(pattern_signals[0].sentence_index, Some(1));
    }

    #[test]
    fn test_custom_patterns_from_config() {
        let config = RiskConfig {
            replace_default_patterns: true,
            patterns: vec![PatternConfig {
                name: "auto renewal".to_string(),
                pattern: r"(?i)automatically\s+renew".to_string(),
                message: None,
            }],
            required_categories: vec![],
            pattern_scope: vec![Category::Termination],
            max_pattern_elevation: 2,
            medium_keywords: vec![],
            low_keywords: vec![],
        };
        let policy = RiskPolicy::from_config(&config).unwrap();
        assert_eq!(policy.patterns().len(), 1);

        let map = map_with(
            1,
            vec![clause(Category::Termination, 0, "This term renews Automatically  Renew.")],
        );
        let assessment = policy.assess(&map);
        assert_eq!(assessment.level, RiskLevel::Medium);
        assert_eq!(assessment.signals[0].message, "High-risk wording: auto renewal (Termination)");
    }

    #[test]
    fn test_breakdown_scores_keyword_tiers() {
        let map = map_with(
            3,
            vec![
                clause(Category::Termination, 0, "Either party may terminate on notice."),
                clause(
                    Category::Liability,
                    1,
                    "The Supplier shall indemnify the Customer and owes liquidated damages.",
                ),
                clause(Category::Liability, 2, "Any breach by a third party is excluded."),
            ],
        );
        let assessment = RiskPolicy::builtin().assess(&map);

        let categories: Vec<Category> = assessment.breakdown.iter().map(|c| c.category).collect();
        assert_eq!(categories, vec![Category::Termination, Category::Liability]);

        let termination = &assessment.breakdown[0];
        assert_eq!(termination.score, 1);
        assert_eq!(termination.reasons, vec!["Low-risk keyword: \"notice\""]);

        let liability = &assessment.breakdown[1];
        assert_eq!(
            liability.reasons,
            vec![
                "High-risk wording: \"liquidated damages\"",
                "Medium-risk keyword: \"indemnify\"",
                "Medium-risk keyword: \"third party\"",
                "Medium-risk keyword: \"breach\"",
            ]
        );
        assert_eq!(liability.score, 3 + 2 + 2 + 2);
        assert_eq!(assessment.score, 10);
    }

    #[test]
    fn test_breakdown_does_not_change_level() {
        let map = map_with(
            2,
            vec![
                clause(Category::Termination, 0, "Termination requires notice and payment."),
                clause(Category::GoverningLaw, 1, "Governing law and jurisdiction: Delaware."),
            ],
        );
        let assessment = RiskPolicy::builtin().assess(&map);
        assert_eq!(assessment.level, RiskLevel::Low);
        assert!(assessment.signals.is_empty());
        assert!(assessment.score > 0);
    }

    #[test]
    fn test_empty_document_has_zero_score() {
        let assessment = RiskPolicy::builtin().assess(&ClauseMap::empty(0));
        assert_eq!(assessment.score, 0);
        assert!(assessment.breakdown.is_empty());
    }

    #[test]
    fn test_configured_keyword_tiers() {
        let config = RiskConfig {
            medium_keywords: vec!["assignment".to_string()],
            low_keywords: vec![],
            ..RiskConfig::default()
        };
        let policy = RiskPolicy::from_config(&config).unwrap();
        let map = map_with(
            1,
            vec![clause(Category::Payment, 0, "Assignments of payment need consent.")],
        );
        let breakdown = policy.breakdown(&map);
        assert_eq!(breakdown.len(), 1);
        assert_eq!(breakdown[0].score, 2);
        assert_eq!(breakdown[0].reasons, vec!["Medium-risk keyword: \"assignment\""]);

        let config = RiskConfig {
            low_keywords: vec!["  ".to_string()],
            ..RiskConfig::default()
        };
        assert!(matches!(
            RiskPolicy::from_config(&config),
            Err(ConfigError::EmptyKeyword("low"))
        ));
    }

    #[test]
    fn test_invalid_pattern_is_config_error() {
        let config = RiskConfig {
            patterns: vec![PatternConfig {
                name: "broken".to_string(),
                pattern: "(unclosed".to_string(),
                message: None,
            }],
            ..RiskConfig::default()
        };
        let err = RiskPolicy::from_config(&config).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPattern { ref name, .. } if name == "broken"));
    }
}
