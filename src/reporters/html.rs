//! HTML reporter with embedded styles
//!
//! Generates a standalone HTML report that can be viewed in any browser.
//! Each issue's snippet is shown with the offending text wrapped in
//! `<mark>`.

use super::{format_metric, format_number, format_points_lost};
use crate::models::{AuditReport, CheckResult, Issue};
use anyhow::Result;
use chrono::Local;

/// Render report as standalone HTML
pub fn render(report: &AuditReport) -> Result<String> {
    let mut html = String::new();

    html.push_str(&render_head());
    html.push_str("<body>\n<div class=\"container\">\n");
    html.push_str(&render_header());
    html.push_str(&render_summary(report));

    for check in &report.check_results {
        html.push_str(&render_check(check));
    }

    html.push_str(&render_footer());
    html.push_str("</div>\n</body>\n</html>\n");

    Ok(html)
}

fn render_head() -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Document Audit Report</title>
    <style>
{CSS}
    </style>
</head>
"#
    )
}

fn render_header() -> String {
    let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
    format!(
        r#"<h1>Document Audit Report</h1>
<p class="timestamp">Generated {}</p>
"#,
        timestamp
    )
}

fn render_summary(report: &AuditReport) -> String {
    let mut out = String::from("<div class=\"summary\">\n");
    out.push_str(&format!(
        "<div><strong>File:</strong> {}</div>\n",
        html_escape(&report.file_path)
    ));
    out.push_str(&format!(
        "<div><strong>Language:</strong> {}</div>\n",
        html_escape(&report.language)
    ));
    out.push_str(&format!(
        "<div><strong>Total Score:</strong> <span class=\"{}\">{}/100</span></div>\n",
        score_class(report.total_score),
        format_number(report.total_score)
    ));
    out.push_str(&format!(
        "<div><strong>Coverage:</strong> {}%</div>\n",
        format_number(report.coverage)
    ));
    if !report.doc_info.is_empty() {
        out.push_str("<div><strong>Document Info:</strong></div>\n<ul>\n");
        for (key, value) in report.doc_info.entries() {
            out.push_str(&format!(
                "<li>{}: {}</li>\n",
                html_escape(key),
                html_escape(&value)
            ));
        }
        out.push_str("</ul>\n");
    }
    out.push_str("</div>\n");
    out
}

fn render_check(check: &CheckResult) -> String {
    let mut out = String::from("<div class=\"check\">\n");
    out.push_str(&format!(
        "<h2>{} ({})</h2>\n",
        html_escape(&check.name),
        check.status
    ));
    out.push_str(&format!(
        "<div class=\"meta\">Score: {:.2}/{:.0} | Points lost: {}</div>\n",
        check.score,
        check.max_score,
        format_points_lost(check.points_lost())
    ));

    if !check.metrics.is_empty() {
        out.push_str("<div class=\"meta\"><strong>Metrics</strong></div>\n<ul>\n");
        for (key, value) in &check.metrics {
            out.push_str(&format!(
                "<li>{}: {}</li>\n",
                html_escape(key),
                html_escape(&format_metric(value))
            ));
        }
        out.push_str("</ul>\n");
    }

    if !check.issues.is_empty() {
        out.push_str("<div class=\"meta\"><strong>Issues</strong></div>\n<ol class=\"issues\">\n");
        for issue in &check.issues {
            out.push_str(&render_issue(issue));
        }
        out.push_str("</ol>\n");
    }

    out.push_str("</div>\n");
    out
}

fn render_issue(issue: &Issue) -> String {
    let loc = issue
        .location
        .as_deref()
        .map(|l| format!(" ({l})"))
        .unwrap_or_default();
    let mut out = format!("<li>{}{}", html_escape(&issue.message), html_escape(&loc));
    if let Some(snippet) = issue.snippet.as_deref().filter(|s| !s.is_empty()) {
        out.push_str(&format!(
            "<code>{}</code>",
            highlight_snippet(snippet, issue.highlight.as_deref())
        ));
    }
    out.push_str("</li>\n");
    out
}

/// Escape `snippet`, wrapping the first occurrence of `highlight` in `<mark>`
fn highlight_snippet(snippet: &str, highlight: Option<&str>) -> String {
    let Some(hl) = highlight.filter(|h| !h.is_empty()) else {
        return html_escape(snippet);
    };
    match snippet.find(hl) {
        Some(idx) => format!(
            "{}<mark>{}</mark>{}",
            html_escape(&snippet[..idx]),
            html_escape(hl),
            html_escape(&snippet[idx + hl.len()..])
        ),
        None => html_escape(snippet),
    }
}

fn render_footer() -> String {
    format!(
        "<div class=\"footer\">Generated by docaudit {}</div>\n",
        env!("CARGO_PKG_VERSION")
    )
}

fn score_class(score: f64) -> &'static str {
    if score >= 80.0 {
        "score-good"
    } else if score >= 60.0 {
        "score-moderate"
    } else {
        "score-poor"
    }
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

// Embedded CSS
const CSS: &str = r#"
body {
    font-family: Georgia, serif;
    margin: 24px;
    color: #1b1b1b;
    background: #faf8f3;
}

.container { max-width: 1000px; margin: 0 auto; }
.timestamp { color: #666; font-size: 0.9rem; }

.summary {
    padding: 16px;
    background: #fff8e7;
    border: 1px solid #f0e2be;
    border-radius: 10px;
}

.check {
    margin-top: 20px;
    padding: 14px;
    background: #ffffff;
    border: 1px solid #e8e0d0;
    border-radius: 10px;
}

.check h2 { margin: 0 0 6px 0; font-size: 18px; }
.meta { color: #444; font-size: 14px; margin: 6px 0; }
.issues { margin: 8px 0; padding-left: 18px; }

code {
    background: #f6f2ea;
    padding: 6px;
    border-radius: 6px;
    display: block;
    white-space: pre-wrap;
    margin: 4px 0;
}

mark { background: #ffdf91; padding: 0 2px; }

.score-good { color: #15803d; }
.score-moderate { color: #b45309; }
.score-poor { color: #b91c1c; }

.footer { margin-top: 24px; color: #888; font-size: 0.85rem; text-align: center; }
"#;
