//! Text normalization and sentence segmentation
//!
//! Cleans PDF extraction artifacts and splits the result into sentences:
//! - control characters and soft hyphens are removed
//! - words broken by a hyphen at a line wrap are rejoined
//! - blank lines end a paragraph, and therefore a sentence
//! - whitespace runs collapse to a single space
//! - `.`, `?`, `!` end a sentence unless they close an abbreviation
//!   ("Inc.", "e.g."), an initial ("J. Smith") or a leading clause number
//!   ("1.2. The Supplier ...")

use crate::config::NormalizerConfig;
use crate::patterns::{ABBREVIATIONS, HEADING_WORDS};
use lazy_static::lazy_static;
use regex::Regex;
use shared_types::{Document, Sentence};
use std::collections::HashSet;

lazy_static! {
    static ref LINE_WRAP_HYPHEN: Regex = Regex::new(r"(\p{L})-[ \t]*\n[ \t]*(\p{Ll})").unwrap();
    static ref PARAGRAPH_BREAK: Regex = Regex::new(r"\n[ \t]*\n\s*").unwrap();
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
    static ref NON_ASCII: Regex = Regex::new(r"[^\x00-\x7F]+").unwrap();
    static ref CLAUSE_NUMBER: Regex = Regex::new(r"^\(?\d+(?:\.\d+)*\)?$").unwrap();
    static ref HEADING_LABEL: Regex = Regex::new(r"^\(?(?:\d+(?:\.\d+)*|[A-Z])\)?$").unwrap();
}

/// Characters that may trail a sentence terminator ("... agreed.)" or '."')
const CLOSERS: &[char] = &['"', '\'', ')', ']', '\u{201D}', '\u{2019}'];

pub struct Normalizer {
    abbreviations: HashSet<String>,
    ascii_only: bool,
}

impl Normalizer {
    pub fn new() -> Self {
        Self {
            abbreviations: ABBREVIATIONS.iter().map(|a| a.to_string()).collect(),
            ascii_only: false,
        }
    }

    pub fn from_config(config: &NormalizerConfig) -> Self {
        let mut normalizer = Self::new();
        normalizer.ascii_only = config.ascii_only;
        for abbrev in &config.extra_abbreviations {
            normalizer
                .abbreviations
                .insert(abbrev.trim_end_matches('.').to_lowercase());
        }
        normalizer
    }

    /// Normalize raw extracted text into a `Document`
    ///
    /// Empty or whitespace-only input yields a document with no sentences.
    pub fn normalize(&self, raw: &str) -> Document {
        let sentences = self
            .paragraphs(raw)
            .iter()
            .flat_map(|p| self.segment(p))
            .enumerate()
            .map(|(index, text)| Sentence { index, text })
            .collect::<Vec<_>>();

        tracing::debug!(sentences = sentences.len(), "normalized document");

        Document {
            raw_text: raw.to_string(),
            sentences,
        }
    }

    /// Clean raw text into whitespace-collapsed paragraphs
    pub fn paragraphs(&self, raw: &str) -> Vec<String> {
        let mut text: String = raw
            .replace("\r\n", "\n")
            .chars()
            .filter(|c| *c != '\u{00AD}')
            .map(|c| match c {
                '\r' => '\n',
                c if c.is_control() && c != '\n' => ' ',
                c => c,
            })
            .collect();

        if self.ascii_only {
            text = NON_ASCII.replace_all(&text, " ").into_owned();
        }

        let text = LINE_WRAP_HYPHEN.replace_all(&text, "$1$2");

        PARAGRAPH_BREAK
            .split(&text)
            .map(|p| WHITESPACE.replace_all(p, " ").trim().to_string())
            .filter(|p| !p.is_empty())
            .collect()
    }

    /// Split one collapsed paragraph into sentences
    pub fn segment(&self, paragraph: &str) -> Vec<String> {
        let chars: Vec<(usize, char)> = paragraph.char_indices().collect();
        let mut sentences = Vec::new();
        let mut start = 0;

        for (i, &(pos, c)) in chars.iter().enumerate() {
            if !matches!(c, '.' | '?' | '!') {
                continue;
            }

            let mut j = i + 1;
            while j < chars.len() && CLOSERS.contains(&chars[j].1) {
                j += 1;
            }

            if j < chars.len() {
                // Terminator must be followed by a space, then a non-lowercase start
                if chars[j].1 != ' ' {
                    continue;
                }
                if chars.get(j + 1).map_or(false, |(_, next)| next.is_lowercase()) {
                    continue;
                }
            }

            let end = chars.get(j).map_or(paragraph.len(), |(p, _)| *p);
            if end <= start {
                continue;
            }

            if c == '.' && !self.ends_sentence(&paragraph[start..pos]) {
                continue;
            }

            let sentence = paragraph[start..end].trim();
            if !sentence.is_empty() {
                sentences.push(sentence.to_string());
            }
            start = end;
        }

        let rest = paragraph[start..].trim();
        if !rest.is_empty() {
            sentences.push(rest.to_string());
        }
        sentences
    }

    /// Decide whether a period closes `before`, the sentence text so far
    fn ends_sentence(&self, before: &str) -> bool {
        let before = before.trim();
        let word = before.rsplit(' ').next().unwrap_or("");
        let bare = word.trim_start_matches(|c: char| !c.is_alphanumeric());

        if bare.is_empty() {
            return true;
        }
        if self.abbreviations.contains(&bare.to_lowercase()) {
            return false;
        }
        // Initials such as "J. Smith", but not "Exhibit A."
        if bare.chars().count() == 1
            && bare.chars().all(|c| c.is_uppercase())
            && !follows_heading_word(before)
        {
            return false;
        }
        !is_clause_heading(before)
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

/// True for a leading clause marker: "1.2", "Section 4" or "Exhibit A"
fn is_clause_heading(before: &str) -> bool {
    let words: Vec<&str> = before.split(' ').collect();
    match words.as_slice() {
        [number] => CLAUSE_NUMBER.is_match(number),
        [heading, label] => is_heading_word(heading) && HEADING_LABEL.is_match(label),
        _ => false,
    }
}

/// True when the word before the last one is "Section", "Exhibit", ...
fn follows_heading_word(before: &str) -> bool {
    before
        .rsplit(' ')
        .nth(1)
        .map_or(false, |word| is_heading_word(word))
}

fn is_heading_word(word: &str) -> bool {
    HEADING_WORDS.contains(&word.to_lowercase().as_str())
}
