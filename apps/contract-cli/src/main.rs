//! Contract analysis CLI
//!
//! Reads a PDF or text contract, runs the clause pipeline and prints a
//! console or JSON report.

mod reporter;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use contract_engine::{ContractEngine, EngineConfig, SummaryLength};
use reporter::{AnalysisOutput, OutputFormat, Reporter, SearchHits};
use shared_types::Document;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "contract-cli")]
#[command(
    version,
    about = "Summarize a contract, detect key clauses and flag risky wording"
)]
struct Args {
    /// Contract file (.pdf, .txt, .md)
    file: PathBuf,

    /// Number of sentences in the summary
    #[arg(long, conflicts_with = "summary_fraction")]
    summary_sentences: Option<usize>,

    /// Share of the document to keep in the summary, in (0, 1]
    #[arg(long)]
    summary_fraction: Option<f64>,

    /// TOML file with extra keywords, jurisdictions and risk patterns
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Console)]
    format: OutputFormat,

    /// Also list sentences containing this text
    #[arg(short, long)]
    search: Option<String>,

    /// Include the extracted text in the output
    #[arg(long)]
    show_raw: bool,
}

impl Args {
    fn summary_length(&self) -> Option<SummaryLength> {
        match (self.summary_sentences, self.summary_fraction) {
            (Some(n), _) => Some(SummaryLength::Sentences(n)),
            (None, Some(f)) => Some(SummaryLength::Fraction(f)),
            (None, None) => None,
        }
    }
}

fn build_engine(args: &Args) -> Result<ContractEngine> {
    let config = match &args.config {
        Some(path) => EngineConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => EngineConfig::default(),
    };
    let mut engine = ContractEngine::from_config(&config).context("building engine")?;
    if let Some(length) = args.summary_length() {
        engine = engine
            .with_summary_length(length)
            .context("invalid summary length")?;
    }
    Ok(engine)
}

/// Sentences matching `query`; a blank query simply has no hits
fn search_hits(engine: &ContractEngine, document: &Document, query: &str) -> SearchHits {
    SearchHits {
        query: query.to_string(),
        sentences: engine
            .search(document, query)
            .into_iter()
            .cloned()
            .collect(),
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Logs go to stderr so JSON on stdout stays parseable
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let engine = build_engine(&args)?;

    let text = shared_pdf::extract_text(&args.file)
        .with_context(|| format!("extracting text from {}", args.file.display()))?;
    tracing::info!(path = %args.file.display(), chars = text.len(), "extracted text");

    let document = engine.normalize(&text);
    if document.is_empty() {
        tracing::warn!("no sentences found in {}", args.file.display());
    }
    let report = engine.analyze_document(&document);

    let search = args
        .search
        .as_deref()
        .map(|query| search_hits(&engine, &document, query));

    let output = AnalysisOutput {
        source: args.file.display().to_string(),
        generated_at: Utc::now(),
        report,
        search,
        raw_text: args.show_raw.then_some(text),
    };

    Reporter::new(args.format).report(&output)
}
