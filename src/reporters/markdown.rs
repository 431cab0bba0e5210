//! Markdown reporter
//!
//! Summary block, document info, then one section per check with points
//! lost, metrics and numbered issues.

use super::{format_metric, format_number, format_points_lost};
use crate::models::{AuditReport, CheckResult};
use anyhow::Result;

/// Render report as Markdown
pub fn render(report: &AuditReport) -> Result<String> {
    let mut md = String::new();

    md.push_str(&render_header(report));
    md.push('\n');

    for check in &report.check_results {
        md.push_str(&render_check(check));
        md.push('\n');
    }

    Ok(md)
}

fn render_header(report: &AuditReport) -> String {
    let mut out = format!(
        "# Document Audit Report\n\
         **File:** `{}`  \n\
         **Language:** {}  \n\
         **Total Score:** **{}/100**  \n\
         **Coverage:** {}%\n",
        report.file_path,
        report.language,
        format_number(report.total_score),
        format_number(report.coverage)
    );
    if !report.doc_info.is_empty() {
        out.push_str("**Document Info:**\n");
        for (key, value) in report.doc_info.entries() {
            out.push_str(&format!("- {key}: {value}\n"));
        }
    }
    out
}

fn render_check(check: &CheckResult) -> String {
    let mut out = format!(
        "## {} - {:.2}/{:.0} ({})\n**Points lost:** {}\n",
        check.name,
        check.score,
        check.max_score,
        check.status,
        format_points_lost(check.points_lost())
    );

    if !check.metrics.is_empty() {
        out.push_str("**Metrics**:\n");
        for (key, value) in &check.metrics {
            out.push_str(&format!("- {key}: {}\n", format_metric(value)));
        }
    }

    if !check.issues.is_empty() {
        out.push_str("**Issues:**\n");
        for (i, issue) in check.issues.iter().enumerate() {
            let loc = issue
                .location
                .as_deref()
                .map(|l| format!(" ({l})"))
                .unwrap_or_default();
            out.push_str(&format!("{}. {}{}\n", i + 1, issue.message, loc));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporters::tests::test_report;

    #[test]
    fn test_markdown_sections() {
        let md = render(&test_report()).expect("render markdown");
        assert!(md.starts_with("# Document Audit Report\n"));
        assert!(md.contains("**Total Score:** **90.0/100**"));
        assert!(md.contains("**Coverage:** 22.22%"));
        assert!(md.contains("- pages: 2\n- extraction_method: lopdf\n- ocr_used: false\n"));
        assert!(md.contains("## Grammar and style (LanguageTool) - 0.00/35 (skipped)"));
        assert!(md.contains("**Points lost:** n/a"));
        assert!(md.contains("## Punctuation and style - 9.00/10 (ok)"));
        assert!(md.contains("**Points lost:** 1.0"));
        assert!(md.contains("- penalty_points: 1.0"));
        assert!(md.contains("1. Repeated punctuation (sample): !! (Page 2, Line 1, Col 15:"));
    }
}
