//! Core data models for docaudit
//!
//! These models flow through the whole pipeline: extraction produces a
//! `DocumentData`, each check produces a `CheckResult`, and the engine
//! assembles an `AuditReport` that the reporters render.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Free-form per-check metrics. Sorted keys keep reports byte-stable.
pub type Metrics = BTreeMap<String, serde_json::Value>;

/// Severity levels for issues
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Info,
    Warning,
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// One located finding produced by a check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Issue {
    pub check_id: String,
    pub message: String,
    /// Human readable location, e.g. "Page 2, Line 4, Col 7: snippet"
    pub location: Option<String>,
    pub severity: Option<Severity>,
    pub line: Option<u32>,
    pub col: Option<u32>,
    pub page: Option<u32>,
    pub snippet: Option<String>,
    /// Offending substring inside `snippet`
    pub highlight: Option<String>,
}

impl Issue {
    /// An issue with no location, used for notes and summaries
    pub fn note(check_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            check_id: check_id.into(),
            message: message.into(),
            ..Default::default()
        }
    }
}

/// Outcome of a single check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    #[default]
    Ok,
    Skipped,
    Error,
}

impl std::fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CheckStatus::Ok => write!(f, "ok"),
            CheckStatus::Skipped => write!(f, "skipped"),
            CheckStatus::Error => write!(f, "error"),
        }
    }
}

/// Result of running one check against a document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckResult {
    pub check_id: String,
    pub name: String,
    pub score: f64,
    pub max_score: f64,
    pub issues: Vec<Issue>,
    pub metrics: Metrics,
    pub status: CheckStatus,
}

impl CheckResult {
    /// A scored result. The penalty is clamped to `[0, max_score]`.
    pub fn scored(
        check_id: &str,
        name: &str,
        max_score: f64,
        penalty: f64,
        issues: Vec<Issue>,
        mut metrics: Metrics,
    ) -> Self {
        let applied = penalty.clamp(0.0, max_score.max(0.0));
        metrics.insert("penalty_points".into(), round2(applied).into());
        Self {
            check_id: check_id.to_string(),
            name: name.to_string(),
            score: round2(max_score - applied).clamp(0.0, max_score.max(0.0)),
            max_score,
            issues,
            metrics,
            status: CheckStatus::Ok,
        }
    }

    /// A result that contributes nothing, with an explanatory issue
    pub fn unscored(
        check_id: &str,
        name: &str,
        max_score: f64,
        status: CheckStatus,
        issues: Vec<Issue>,
        metrics: Metrics,
    ) -> Self {
        Self {
            check_id: check_id.to_string(),
            name: name.to_string(),
            score: 0.0,
            max_score,
            issues,
            metrics,
            status,
        }
    }

    /// Points lost, only meaningful for scored results
    pub fn points_lost(&self) -> Option<f64> {
        (self.status == CheckStatus::Ok).then(|| round2(self.max_score - self.score))
    }
}

/// Text and metadata produced by the extraction step
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DocumentData {
    pub text: String,
    pub page_count: Option<usize>,
    pub ocr_used: bool,
    pub ocr_reason: Option<String>,
    pub extraction_method: Option<String>,
}

impl DocumentData {
    pub fn from_text(text: impl Into<String>, method: &str) -> Self {
        Self {
            text: text.into(),
            extraction_method: Some(method.to_string()),
            ..Default::default()
        }
    }

    /// Document info as shown in reports. Absent values are omitted.
    pub fn doc_info(&self) -> DocInfo {
        DocInfo {
            pages: self.page_count,
            extraction_method: self.extraction_method.clone(),
            ocr_used: Some(self.ocr_used),
            ocr_reason: self.ocr_reason.clone(),
        }
    }
}

/// Document facts surfaced in every report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct DocInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pages: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extraction_method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ocr_used: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ocr_reason: Option<String>,
}

impl DocInfo {
    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    /// Present fields as (key, value) pairs in a fixed order
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        let mut out = Vec::new();
        if let Some(pages) = self.pages {
            out.push(("pages", pages.to_string()));
        }
        if let Some(method) = &self.extraction_method {
            out.push(("extraction_method", method.clone()));
        }
        if let Some(ocr) = self.ocr_used {
            out.push(("ocr_used", ocr.to_string()));
        }
        if let Some(reason) = &self.ocr_reason {
            out.push(("ocr_reason", reason.clone()));
        }
        out
    }
}

/// Per-check line of the summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckSummary {
    pub score: f64,
    pub max: f64,
    pub status: CheckStatus,
}

/// Compact overview of one audit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditSummary {
    pub file: String,
    pub language: String,
    pub score: f64,
    pub coverage: f64,
    pub configured_max: f64,
    pub scored_max: f64,
    pub checks: BTreeMap<String, CheckSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document: Option<DocInfo>,
}

/// Root aggregate of one audit run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditReport {
    pub file_path: String,
    pub language: String,
    pub total_score: f64,
    pub coverage: f64,
    pub check_results: Vec<CheckResult>,
    pub summary: AuditSummary,
    pub doc_info: DocInfo,
}

impl AuditReport {
    pub fn issue_count(&self) -> usize {
        self.check_results.iter().map(|c| c.issues.len()).sum()
    }
}

/// Round to two decimals, the precision used in every report
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
