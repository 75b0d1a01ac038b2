//! Analysis report output
//!
//! - **Console**: human-readable sections for a terminal
//! - **Json** / **JsonPretty**: the full report envelope for export

mod console;
mod json;

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared_types::{ContractReport, Sentence};
use std::io::{self, Write};

pub use console::ConsoleReporter;
pub use json::JsonReporter;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Console,
    Json,
    JsonPretty,
}

/// Sentences matching a `--search` query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHits {
    pub query: String,
    pub sentences: Vec<Sentence>,
}

/// Everything printed for one analyzed file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisOutput {
    pub source: String,
    pub generated_at: DateTime<Utc>,
    pub report: ContractReport,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<SearchHits>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_text: Option<String>,
}

pub struct Reporter {
    format: OutputFormat,
}

impl Reporter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Print to stdout
    pub fn report(&self, output: &AnalysisOutput) -> Result<()> {
        let text = self.format_output(output)?;
        let mut stdout = io::stdout().lock();
        stdout.write_all(text.as_bytes())?;
        stdout.flush()?;
        Ok(())
    }

    pub fn format_output(&self, output: &AnalysisOutput) -> Result<String> {
        match self.format {
            OutputFormat::Console => ConsoleReporter::format(output),
            OutputFormat::Json => JsonReporter::format(output, false).map(|s| s + "\n"),
            OutputFormat::JsonPretty => JsonReporter::format(output, true).map(|s| s + "\n"),
        }
    }
}
