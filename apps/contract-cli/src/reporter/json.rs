//! JSON export of the analysis envelope

use super::AnalysisOutput;
use anyhow::Result;

pub struct JsonReporter;

impl JsonReporter {
    pub fn format(output: &AnalysisOutput, pretty: bool) -> Result<String> {
        let text = if pretty {
            serde_json::to_string_pretty(output)?
        } else {
            serde_json::to_string(output)?
        };
        Ok(text)
    }
}
