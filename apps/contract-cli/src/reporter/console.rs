//! Console reporter
//!
//! Plain sections: summary, detected clauses, risk, checklist, then the
//! optional search hits and raw text.

use super::AnalysisOutput;
use anyhow::Result;
use shared_types::{Category, ClauseMatch, RiskLevel};
use std::fmt::Write;

/// Longest clause excerpt printed per match
const EXCERPT_CHARS: usize = 160;

pub struct ConsoleReporter;

impl ConsoleReporter {
    pub fn format(output: &AnalysisOutput) -> Result<String> {
        let report = &output.report;
        let mut out = String::new();

        writeln!(out)?;
        writeln!(out, "CONTRACT ANALYSIS")?;
        writeln!(out, "════════════════════════════════════════════════════════════════")?;
        writeln!(out, "Source:     {}", output.source)?;
        writeln!(out, "Generated:  {}", output.generated_at.to_rfc3339())?;
        writeln!(out, "Sentences:  {}", report.sentence_count)?;
        writeln!(out)?;

        writeln!(out, "Summary")?;
        writeln!(out, "────────────────────────────────────────────────────────────────")?;
        if report.summary.sentences.is_empty() {
            writeln!(out, "  (no text)")?;
        }
        for sentence in &report.summary.sentences {
            writeln!(out, "  [{}] {}", sentence.index + 1, sentence.text)?;
        }
        writeln!(out)?;

        writeln!(out, "Clauses")?;
        writeln!(out, "────────────────────────────────────────────────────────────────")?;
        for category in Category::ALL {
            let matches = report.clauses.get(category);
            writeln!(out, "  {:<16} {}", category.label(), matches.len())?;
            for m in matches {
                Self::format_match(&mut out, m)?;
            }
        }
        writeln!(out)?;

        writeln!(out, "Risk: {}", Self::level_marker(report.risk.level))?;
        writeln!(out, "────────────────────────────────────────────────────────────────")?;
        if report.risk.signals.is_empty() {
            writeln!(out, "  No risk signals")?;
        }
        for signal in &report.risk.signals {
            write!(out, "  • {}", signal.message)?;
            if signal.elevation == 0 {
                write!(out, " (capped)")?;
            }
            writeln!(out)?;
            if let Some(evidence) = &signal.evidence {
                writeln!(out, "      \"{}\"", evidence)?;
            }
        }
        if !report.risk.breakdown.is_empty() {
            writeln!(out)?;
            writeln!(out, "  Risk score: {}", report.risk.score)?;
            for entry in &report.risk.breakdown {
                writeln!(out, "  {:<16} {}", entry.category.label(), entry.score)?;
                for reason in &entry.reasons {
                    writeln!(out, "      - {}", reason)?;
                }
            }
        }
        writeln!(out)?;

        writeln!(out, "Checklist")?;
        writeln!(out, "────────────────────────────────────────────────────────────────")?;
        for entry in &report.checklist {
            let mark = if entry.addressed { "✓" } else { "✗" };
            writeln!(out, "  {} {:<16} {}", mark, entry.category.label(), entry.notes)?;
        }

        if let Some(search) = &output.search {
            writeln!(out)?;
            writeln!(
                out,
                "Search \"{}\": {} match(es)",
                search.query,
                search.sentences.len()
            )?;
            writeln!(out, "────────────────────────────────────────────────────────────────")?;
            for sentence in &search.sentences {
                writeln!(out, "  [{}] {}", sentence.index + 1, sentence.text)?;
            }
        }

        if let Some(raw) = &output.raw_text {
            writeln!(out)?;
            writeln!(out, "Raw text")?;
            writeln!(out, "────────────────────────────────────────────────────────────────")?;
            writeln!(out, "{}", raw)?;
        }

        Ok(out)
    }

    fn format_match(out: &mut String, m: &ClauseMatch) -> Result<()> {
        let text = &m.sentence.text;
        let excerpt: String = text.chars().take(EXCERPT_CHARS).collect();
        let ellipsis = if excerpt.len() < text.len() { "..." } else { "" };
        writeln!(
            out,
            "    [{}] (weight {}) {}{}",
            m.sentence.index + 1,
            m.weight,
            excerpt,
            ellipsis
        )?;
        Ok(())
    }

    fn level_marker(level: RiskLevel) -> String {
        match level {
            RiskLevel::Low => "LOW".to_string(),
            RiskLevel::Medium => "MEDIUM ⚠".to_string(),
            RiskLevel::High => "HIGH ✗".to_string(),
        }
    }
}
