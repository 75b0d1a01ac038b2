//! Extractive summarization
//!
//! Sentences are scored on three signals and the top N are returned in
//! document order:
//! - term significance: tf-idf of non-stopword stems, normalized so the
//!   strongest sentence scores 1.0
//! - position: the first and last sentences score highest, since contracts
//!   front-load parties/purpose and back-load governing terms
//! - clause bonus: sentences that matched any clause category

use crate::config::{SummaryConfig, SummaryLength};
use crate::extractors::tokens::{is_stopword, stem, tokenize};
use shared_types::{ClauseMap, Document, SummaryResult};
use std::collections::BTreeMap;

pub struct Summarizer {
    length: SummaryLength,
    position_weight: f64,
    clause_bonus: f64,
}

impl Summarizer {
    pub fn new() -> Self {
        Self::from_config(&SummaryConfig::default())
    }

    pub fn from_config(config: &SummaryConfig) -> Self {
        Self {
            length: config.length,
            position_weight: config.position_weight,
            clause_bonus: config.clause_bonus,
        }
    }

    pub fn length(&self) -> SummaryLength {
        self.length
    }

    pub fn with_length(mut self, length: SummaryLength) -> Self {
        self.length = length;
        self
    }

    /// Summarize using the configured target length
    pub fn summarize(&self, document: &Document, clauses: &ClauseMap) -> SummaryResult {
        self.summarize_with_length(document, clauses, self.length)
    }

    pub fn summarize_with_length(
        &self,
        document: &Document,
        clauses: &ClauseMap,
        length: SummaryLength,
    ) -> SummaryResult {
        let total = document.sentences.len();
        let target = length.resolve(total);

        if total <= target {
            return SummaryResult {
                sentences: document.sentences.clone(),
            };
        }

        let scores = self.score_sentences(document, clauses);
        let mut ranked: Vec<usize> = (0..total).collect();
        ranked.sort_by(|a, b| scores[*b].total_cmp(&scores[*a]).then(a.cmp(b)));
        ranked.truncate(target);
        ranked.sort_unstable();

        tracing::debug!(total, selected = ranked.len(), "summarized document");

        SummaryResult {
            sentences: ranked
                .into_iter()
                .map(|i| document.sentences[i].clone())
                .collect(),
        }
    }

    /// Combined score per sentence, indexed like `document.sentences`
    pub fn score_sentences(&self, document: &Document, clauses: &ClauseMap) -> Vec<f64> {
        let significance = term_significance(document);
        let total = document.sentences.len();
        let clause_sentences = clauses.matched_sentences();

        document
            .sentences
            .iter()
            .enumerate()
            .map(|(i, sentence)| {
                let mut score = significance[i] + self.position_weight * position_bias(i, total);
                if clause_sentences.contains(&sentence.index) {
                    score += self.clause_bonus;
                }
                score
            })
            .collect()
    }
}

impl Default for Summarizer {
    fn default() -> Self {
        Self::new()
    }
}

/// 1.0 for the first and last sentence, decaying towards the middle
fn position_bias(index: usize, total: usize) -> f64 {
    let from_end = total.saturating_sub(1).saturating_sub(index);
    let distance = index.min(from_end);
    1.0 / (1.0 + distance as f64)
}

/// Normalized tf-idf mass per sentence, in [0, 1]
fn term_significance(document: &Document) -> Vec<f64> {
    let bags: Vec<BTreeMap<String, usize>> = document
        .sentences
        .iter()
        .map(|s| {
            let mut bag = BTreeMap::new();
            for token in tokenize(&s.text) {
                if is_stopword(&token) || token.chars().all(|c| c.is_numeric()) {
                    continue;
                }
                *bag.entry(stem(&token)).or_insert(0) += 1;
            }
            bag
        })
        .collect();

    let mut document_frequency: BTreeMap<&str, usize> = BTreeMap::new();
    for bag in &bags {
        for term in bag.keys() {
            *document_frequency.entry(term.as_str()).or_insert(0) += 1;
        }
    }

    let n = bags.len() as f64;
    let raw: Vec<f64> = bags
        .iter()
        .map(|bag| {
            let count: usize = bag.values().sum();
            if count == 0 {
                return 0.0;
            }
            let mass: f64 = bag
                .iter()
                .map(|(term, tf)| {
                    let df = document_frequency.get(term.as_str()).copied().unwrap_or(1);
                    *tf as f64 * ((n / df as f64).ln() + 1.0)
                })
                .sum();
            mass / (count as f64).sqrt()
        })
        .collect();

    let max = raw.iter().copied().fold(0.0, f64::max);
    if max > 0.0 {
        raw.into_iter().map(|s| s / max).collect()
    } else {
        raw
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::ClauseClassifier;
    use crate::normalizer::Normalizer;
    use pretty_assertions::assert_eq;

    fn document(text: &str) -> Document {
        Normalizer::new().normalize(text)
    }

    fn indices(summary: &SummaryResult) -> Vec<usize> {
        summary.sentences.iter().map(|s| s.index).collect()
    }

    #[test]
    fn test_short_document_returns_every_sentence() {
        let doc = document("The Supplier delivers goods. The Customer pays on receipt.");
        let summary = Summarizer::new().summarize(&doc, &ClauseMap::empty(doc.len()));
        assert_eq!(summary.sentences, doc.sentences);
    }

    #[test]
    fn test_empty_document_yields_empty_summary() {
        let doc = document("");
        let summary = Summarizer::new().summarize(&doc, &ClauseMap::empty(0));
        assert!(summary.sentences.is_empty());
        assert_eq!(summary.text(), "");
    }

    #[test]
    fn test_summary_preserves_document_order() {
        let doc = document(
            "This Agreement is made between Acme and Globex. \
             The weather was mild. \
             Lunch is served at noon. \
             The office has plants. \
             Either party may terminate on thirty days notice. \
             The carpet is blue. \
             This Agreement is governed by the laws of Delaware.",
        );
        let clauses = ClauseClassifier::default().classify(&doc.sentences);
        let summary =
            Summarizer::new().summarize_with_length(&doc, &clauses, SummaryLength::Sentences(3));

        let picked = indices(&summary);
        assert_eq!(picked.len(), 3);
        assert!(picked.windows(2).all(|w| w[0] < w[1]));
        // Opening, termination and governing-law sentences win
        assert_eq!(picked, vec![0, 4, 6]);
    }

    #[test]
    fn test_fraction_length() {
        let text = (0..10)
            .map(|i| format!("Sentence number {} mentions topic {}.", i, i))
            .collect::<Vec<_>>()
            .join(" ");
        let doc = document(&text);
        assert_eq!(doc.len(), 10);
        let summary = Summarizer::new().summarize_with_length(
            &doc,
            &ClauseMap::empty(doc.len()),
            SummaryLength::Fraction(0.2),
        );
        assert_eq!(summary.sentences.len(), 2);
    }

    #[test]
    fn test_summarizer_is_deterministic() {
        let doc = document(
            "Alpha beta gamma. Beta gamma delta. Gamma delta epsilon. \
             Delta epsilon zeta. Epsilon zeta eta. Zeta eta theta. Eta theta iota.",
        );
        let clauses = ClauseMap::empty(doc.len());
        let summarizer = Summarizer::new();
        let first = summarizer.summarize(&doc, &clauses);
        for _ in 0..20 {
            assert_eq!(summarizer.summarize(&doc, &clauses), first);
        }
    }

    #[test]
    fn test_position_bias_favours_document_ends() {
        assert_eq!(position_bias(0, 5), 1.0);
        assert_eq!(position_bias(4, 5), 1.0);
        assert_eq!(position_bias(2, 5), 1.0 / 3.0);
        assert_eq!(position_bias(0, 1), 1.0);
    }
}
