pub mod csv;
pub mod json;
pub mod md;

use crate::error::AuditError;
use crate::types::report::{ExecutiveSummary, PageReport};

#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Json,
    Md,
    Csv,
}

/// Scores are rendered as fixed two-decimal strings; downstream writers key
/// off this exact formatting.
pub fn format_score(score: f64) -> String {
    format!("{score:.2}")
}

pub fn render(
    summary: &ExecutiveSummary,
    pages: &[PageReport],
    format: OutputFormat,
) -> Result<String, AuditError> {
    match format {
        OutputFormat::Json => json::to_json(summary, pages).map_err(AuditError::Json),
        OutputFormat::Md => Ok(md::to_markdown(summary)),
        OutputFormat::Csv => csv::pages_csv(pages),
    }
}
