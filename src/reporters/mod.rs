//! Output reporters for audit results
//!
//! Supports multiple output formats:
//! - `text` - Terminal summary with colors
//! - `json` - Machine-readable JSON mirroring the audit report
//! - `markdown` - One section per check
//! - `html` - Standalone HTML report with highlighted snippets
//! - `sarif` - SARIF 2.1.0 for code scanning tools and editors

mod html;
mod json;
mod markdown;
mod sarif;
mod text;

use crate::models::AuditReport;
use anyhow::Result;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    Markdown,
    Html,
    Sarif,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Markdown => write!(f, "markdown"),
            OutputFormat::Html => write!(f, "html"),
            OutputFormat::Sarif => write!(f, "sarif"),
        }
    }
}

/// Render an audit report using an OutputFormat enum
pub fn report_with_format(report: &AuditReport, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => text::render(report),
        OutputFormat::Json => json::render(report),
        OutputFormat::Markdown => markdown::render(report),
        OutputFormat::Html => html::render(report),
        OutputFormat::Sarif => sarif::render(report),
    }
}

/// Suffix appended to the output prefix for a written report
pub fn file_suffix(format: OutputFormat) -> &'static str {
    match format {
        OutputFormat::Text => "_report.txt",
        OutputFormat::Json => "_report.json",
        OutputFormat::Markdown => "_report.md",
        OutputFormat::Html => "_report.html",
        OutputFormat::Sarif => "_report.sarif",
    }
}

/// Scores and percentages as shown to readers: `100.0`, `91.33`
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}

/// `n/a` for checks that did not score
pub(crate) fn format_points_lost(points: Option<f64>) -> String {
    points.map(format_number).unwrap_or_else(|| "n/a".to_string())
}

/// Metric values without JSON quoting for plain strings
pub(crate) fn format_metric(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Number(n) => n
            .as_f64()
            .filter(|_| n.is_f64())
            .map(format_number)
            .unwrap_or_else(|| n.to_string()),
        other => other.to_string(),
    }
}
