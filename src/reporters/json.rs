//! JSON reporter
//!
//! Mirrors the audit report as pretty-printed JSON. `points_lost` is `null`
//! for checks that were skipped or errored.

use crate::models::{AuditReport, CheckResult, CheckStatus, DocInfo, Issue, Metrics};
use anyhow::Result;
use serde::Serialize;

#[derive(Serialize)]
struct JsonReport<'a> {
    file_path: &'a str,
    language: &'a str,
    total_score: f64,
    coverage: f64,
    document: &'a DocInfo,
    checks: Vec<JsonCheck<'a>>,
}

#[derive(Serialize)]
struct JsonCheck<'a> {
    id: &'a str,
    name: &'a str,
    score: f64,
    max_score: f64,
    points_lost: Option<f64>,
    status: CheckStatus,
    metrics: &'a Metrics,
    issues: &'a [Issue],
}

impl<'a> From<&'a CheckResult> for JsonCheck<'a> {
    fn from(c: &'a CheckResult) -> Self {
        Self {
            id: &c.check_id,
            name: &c.name,
            score: c.score,
            max_score: c.max_score,
            points_lost: c.points_lost(),
            status: c.status,
            metrics: &c.metrics,
            issues: &c.issues,
        }
    }
}

fn build(report: &AuditReport) -> JsonReport<'_> {
    JsonReport {
        file_path: &report.file_path,
        language: &report.language,
        total_score: report.total_score,
        coverage: report.coverage,
        document: &report.doc_info,
        checks: report.check_results.iter().map(JsonCheck::from).collect(),
    }
}

/// Render report as JSON
pub fn render(report: &AuditReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(&build(report))?)
}
