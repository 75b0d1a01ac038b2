//! Clause classification
//!
//! A `RuleTable` maps each category to a list of (term, weight) pairs.
//! Terms are stemmed once at construction and matched as contiguous token
//! runs against each stemmed sentence. Governing Law additionally fires on a
//! governing phrase ("governed by", "laws of") combined with a known
//! jurisdiction name.

use crate::config::ClassifierConfig;
use crate::error::ConfigError;
use crate::extractors::tokens::{find_phrase, stem, stems};
use crate::patterns::{
    DEFAULT_RULES, GOVERNING_PHRASES, JURISDICTIONS, JURISDICTION_WEIGHT, NEGATION_SENSITIVE,
    NEGATORS,
};
use shared_types::{Category, ClauseMap, ClauseMatch, Sentence};
use std::ops::Range;

/// A rule term with its stemmed token sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledTerm {
    pub label: String,
    pub stems: Vec<String>,
    pub weight: u32,
}

impl CompiledTerm {
    fn new(label: &str, weight: u32) -> Self {
        Self {
            label: label.trim().to_lowercase(),
            stems: stems(label),
            weight,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRule {
    pub category: Category,
    pub terms: Vec<CompiledTerm>,
    pub suppress_negated: bool,
}

impl CategoryRule {
    fn new(category: Category) -> Self {
        Self {
            category,
            terms: Vec::new(),
            suppress_negated: NEGATION_SENSITIVE.contains(&category),
        }
    }

    /// Add a term unless one with the same stems already exists
    fn push_term(&mut self, term: CompiledTerm) {
        if !self.terms.iter().any(|t| t.stems == term.stems) {
            self.terms.push(term);
        }
    }
}

/// Choice-of-law heuristic: governing phrase plus a jurisdiction name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JurisdictionRule {
    phrases: Vec<Vec<String>>,
    jurisdictions: Vec<CompiledTerm>,
    weight: u32,
}

impl JurisdictionRule {
    fn new(extra: &[String], weight: u32) -> Self {
        let mut jurisdictions: Vec<CompiledTerm> = Vec::new();
        for name in JURISDICTIONS
            .iter()
            .copied()
            .chain(extra.iter().map(String::as_str))
        {
            let term = CompiledTerm::new(name, weight);
            if !term.stems.is_empty() && !jurisdictions.iter().any(|j| j.stems == term.stems) {
                jurisdictions.push(term);
            }
        }
        Self {
            phrases: GOVERNING_PHRASES.iter().map(|p| stems(p)).collect(),
            jurisdictions,
            weight,
        }
    }

    /// Label of the first jurisdiction named in a governing sentence
    fn find(&self, tokens: &[String]) -> Option<String> {
        let governing = self
            .phrases
            .iter()
            .any(|p| !find_phrase(tokens, p).is_empty());
        if !governing {
            return None;
        }
        self.jurisdictions
            .iter()
            .find(|j| !find_phrase(tokens, &j.stems).is_empty())
            .map(|j| format!("jurisdiction:{}", j.label))
    }
}

/// Declarative category -> (term, weight) table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleTable {
    rules: Vec<CategoryRule>,
    governing: JurisdictionRule,
}

impl RuleTable {
    /// Built-in keyword tables from `patterns`
    pub fn builtin() -> Self {
        let mut rules: Vec<CategoryRule> =
            Category::ALL.iter().map(|c| CategoryRule::new(*c)).collect();
        for (category, terms) in DEFAULT_RULES {
            let rule = &mut rules[category_slot(*category)];
            for term in terms.iter() {
                rule.push_term(CompiledTerm::new(term, 1));
            }
        }
        Self {
            rules,
            governing: JurisdictionRule::new(&[], JURISDICTION_WEIGHT),
        }
    }

    /// Build a table from config, merged into or replacing the built-ins
    pub fn from_config(config: &ClassifierConfig) -> Result<Self, ConfigError> {
        let rules = if config.replace_defaults {
            Category::ALL.iter().map(|c| CategoryRule::new(*c)).collect()
        } else {
            Self::builtin().rules
        };
        let mut table = Self {
            rules,
            governing: JurisdictionRule::new(&config.jurisdictions, config.jurisdiction_weight),
        };

        for rules in &config.categories {
            let rule = &mut table.rules[category_slot(rules.category)];
            if let Some(suppress) = rules.suppress_negated {
                rule.suppress_negated = suppress;
            }
            for spec in &rules.terms {
                let term = CompiledTerm::new(spec.term(), spec.weight());
                if term.stems.is_empty() {
                    return Err(ConfigError::EmptyTerm(rules.category));
                }
                rule.push_term(term);
            }
        }
        Ok(table)
    }

    pub fn rule(&self, category: Category) -> &CategoryRule {
        &self.rules[category_slot(category)]
    }
}

impl Default for RuleTable {
    fn default() -> Self {
        Self::builtin()
    }
}

fn category_slot(category: Category) -> usize {
    Category::ALL
        .iter()
        .position(|c| *c == category)
        .unwrap_or_default()
}

pub struct ClauseClassifier {
    table: RuleTable,
    negators: Vec<String>,
}

impl ClauseClassifier {
    pub fn new(table: RuleTable) -> Self {
        Self {
            table,
            negators: NEGATORS.iter().map(|n| stem(n)).collect(),
        }
    }

    /// Classify every sentence into zero or more categories
    pub fn classify(&self, sentences: &[Sentence]) -> ClauseMap {
        let mut map = ClauseMap::empty(sentences.len());

        for sentence in sentences {
            for clause in self.match_sentence(sentence) {
                map.matches.entry(clause.category).or_default().push(clause);
            }
        }

        // Stable sort keeps document order between equal weights
        for matches in map.matches.values_mut() {
            matches.sort_by(|a, b| b.weight.cmp(&a.weight));
        }

        tracing::debug!(
            sentences = sentences.len(),
            matches = map.total_matches(),
            "classified clauses"
        );
        map
    }

    /// All category matches for a single sentence, in category order
    pub fn match_sentence(&self, sentence: &Sentence) -> Vec<ClauseMatch> {
        let tokens = stems(&sentence.text);
        let mut matches = Vec::new();

        for rule in &self.table.rules {
            let negated = if rule.suppress_negated {
                self.negated_spans(&tokens, &rule.terms)
            } else {
                Vec::new()
            };
            let mut weight = 0;
            let mut matched_terms = Vec::new();

            for term in &rule.terms {
                let hit = find_phrase(&tokens, &term.stems)
                    .into_iter()
                    .any(|start| !negated.iter().any(|span| span.contains(&start)));
                if hit {
                    weight += term.weight;
                    matched_terms.push(term.label.clone());
                }
            }

            if rule.category == Category::GoverningLaw {
                if let Some(label) = self.table.governing.find(&tokens) {
                    weight += self.table.governing.weight;
                    matched_terms.push(label);
                }
            }

            if !matched_terms.is_empty() {
                tracing::trace!(
                    sentence = sentence.index,
                    category = %rule.category,
                    weight,
                    "clause match"
                );
                matches.push(ClauseMatch {
                    category: rule.category,
                    sentence: sentence.clone(),
                    weight,
                    matched_terms,
                });
            }
        }
        matches
    }

    /// Token ranges covered by a term occurrence directly after a negator
    ///
    /// Shorter terms inside a negated span ("terminate" in "no right to
    /// terminate") are negated with it.
    fn negated_spans(&self, tokens: &[String], terms: &[CompiledTerm]) -> Vec<Range<usize>> {
        let mut spans = Vec::new();
        for term in terms {
            for start in find_phrase(tokens, &term.stems) {
                if self.is_negated(tokens, start) {
                    spans.push(start..start + term.stems.len());
                }
            }
        }
        spans
    }

    fn is_negated(&self, tokens: &[String], start: usize) -> bool {
        start > 0 && self.negators.contains(&tokens[start - 1])
    }
}

impl Default for ClauseClassifier {
    fn default() -> Self {
        Self::new(RuleTable::builtin())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CategoryRules, TermSpec};
    use pretty_assertions::assert_eq;

    fn sentence(index: usize, text: &str) -> Sentence {
        Sentence {
            index,
            text: text.to_string(),
        }
    }

    fn categories(classifier: &ClauseClassifier, text: &str) -> Vec<Category> {
        classifier
            .match_sentence(&sentence(0, text))
            .into_iter()
            .map(|m| m.category)
            .collect()
    }

    #[test]
    fn test_matches_inflected_keywords() {
        let classifier = ClauseClassifier::default();
        assert_eq!(
            categories(&classifier, "Either party may terminate this Agreement."),
            vec![Category::Termination]
        );
        assert_eq!(
            categories(&classifier, "The Agreement is terminated upon insolvency."),
            vec![Category::Termination]
        );
        assert_eq!(
            categories(&classifier, "CONFIDENTIAL information must be protected."),
            vec![Category::Confidentiality]
        );
    }

    #[test]
    fn test_sentence_may_match_multiple_categories() {
        let classifier = ClauseClassifier::default();
        let found = categories(
            &classifier,
            "Any dispute about late payment shall be settled by arbitration.",
        );
        assert_eq!(found, vec![Category::Payment, Category::Dispute]);
    }

    #[test]
    fn test_weight_counts_distinct_terms() {
        let classifier = ClauseClassifier::default();
        let matches = classifier.match_sentence(&sentence(
            0,
            "Any dispute shall go to arbitration, and every dispute to mediation.",
        ));
        let dispute = matches
            .iter()
            .find(|m| m.category == Category::Dispute)
            .unwrap();
        assert_eq!(dispute.weight, 3);
        assert_eq!(
            dispute.matched_terms,
            vec!["dispute", "arbitration", "mediation"]
        );
    }

    #[test]
    fn test_negated_termination_is_ignored() {
        let classifier = ClauseClassifier::default();
        assert!(categories(&classifier, "This Agreement has no termination clause.").is_empty());
        assert_eq!(
            categories(&classifier, "Supplier shall have no liability for delays."),
            vec![Category::Liability]
        );
    }

    #[test]
    fn test_negated_phrase_hides_inner_terms() {
        let classifier = ClauseClassifier::default();
        assert!(categories(
            &classifier,
            "The Customer has no right to terminate this Agreement."
        )
        .is_empty());

        // Only the negated occurrence is suppressed
        let matches = classifier.match_sentence(&sentence(
            0,
            "The Customer has no right to terminate, but the Supplier may terminate on notice.",
        ));
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].category, Category::Termination);
        assert_eq!(matches[0].matched_terms, vec!["terminate"]);
    }

    #[test]
    fn test_governing_law_jurisdiction_heuristic() {
        let classifier = ClauseClassifier::default();
        let matches = classifier.match_sentence(&sentence(
            0,
            "This Agreement is governed by the laws of the State of New York.",
        ));
        assert_eq!(matches.len(), 1);
        let governing = &matches[0];
        assert_eq!(governing.category, Category::GoverningLaw);
        assert_eq!(
            governing.matched_terms,
            vec!["governed by", "laws of", "jurisdiction:new york"]
        );
        assert_eq!(governing.weight, 1 + 1 + JURISDICTION_WEIGHT);
    }

    #[test]
    fn test_classify_orders_by_weight_then_document_order() {
        let classifier = ClauseClassifier::default();
        let sentences = vec![
            sentence(0, "Fees are listed in Schedule 1."),
            sentence(1, "Each invoice states the fee and the price."),
            sentence(2, "Compensation is paid yearly."),
        ];
        let map = classifier.classify(&sentences);
        let order: Vec<usize> = map
            .get(Category::Payment)
            .iter()
            .map(|m| m.sentence.index)
            .collect();
        assert_eq!(order, vec![1, 0, 2]);
        assert!(!map.is_addressed(Category::Termination));
        assert_eq!(map.sentence_count, 3);
    }

    #[test]
    fn test_classify_empty_input() {
        let map = ClauseClassifier::default().classify(&[]);
        assert_eq!(map, ClauseMap::empty(0));
    }

    #[test]
    fn test_config_extends_rule_table() {
        let config = ClassifierConfig {
            categories: vec![CategoryRules {
                category: Category::Payment,
                terms: vec![TermSpec::Weighted {
                    term: "net thirty".to_string(),
                    weight: 3,
                }],
                suppress_negated: None,
            }],
            jurisdictions: vec!["Narnia".to_string()],
            ..ClassifierConfig::default()
        };
        let classifier = ClauseClassifier::new(RuleTable::from_config(&config).unwrap());

        let matches = classifier.match_sentence(&sentence(0, "Terms are net thirty."));
        assert_eq!(matches[0].category, Category::Payment);
        assert_eq!(matches[0].weight, 3);

        assert_eq!(
            categories(&classifier, "It is construed in accordance with Narnia custom."),
            vec![Category::GoverningLaw]
        );
    }

    #[test]
    fn test_config_can_replace_defaults() {
        let config = ClassifierConfig {
            replace_defaults: true,
            categories: vec![CategoryRules {
                category: Category::Dispute,
                terms: vec![TermSpec::Plain("quarrel".to_string())],
                suppress_negated: Some(false),
            }],
            ..ClassifierConfig::default()
        };
        let table = RuleTable::from_config(&config).unwrap();
        assert!(table.rule(Category::Payment).terms.is_empty());

        let classifier = ClauseClassifier::new(table);
        assert!(categories(&classifier, "Any dispute goes to arbitration.").is_empty());
        assert_eq!(
            categories(&classifier, "Any quarrels go to the board."),
            vec![Category::Dispute]
        );
    }

    #[test]
    fn test_config_rejects_empty_term() {
        let config = ClassifierConfig {
            categories: vec![CategoryRules {
                category: Category::Liability,
                terms: vec![TermSpec::Plain(" -- ".to_string())],
                suppress_negated: None,
            }],
            ..ClassifierConfig::default()
        };
        assert!(matches!(
            RuleTable::from_config(&config),
            Err(ConfigError::EmptyTerm(Category::Liability))
        ));
    }
}
