//! Text (terminal) reporter
//!
//! One score line, then one line per check. Colors are applied with
//! `console`, which drops them when stdout is not a terminal.

use super::format_number;
use crate::models::{AuditReport, CheckStatus};
use anyhow::Result;
use console::style;
use std::path::Path;

/// Render the terminal summary
pub fn render(report: &AuditReport) -> Result<String> {
    let mut out = String::new();

    let name = Path::new(&report.file_path)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| report.file_path.clone());
    out.push_str(&format!(
        "Score: {} (coverage {}%) - {}\n",
        format_score(report.total_score),
        format_number(report.coverage),
        style(name).bold()
    ));

    for check in &report.check_results {
        let status = match check.status {
            CheckStatus::Ok => style(check.status.to_string()).green(),
            CheckStatus::Skipped => style(check.status.to_string()).yellow(),
            CheckStatus::Error => style(check.status.to_string()).red(),
        };
        out.push_str(&format!(
            "  - {}: {:.2}/{:.0} ({})\n",
            check.name, check.score, check.max_score, status
        ));
    }

    Ok(out)
}

fn format_score(score: f64) -> String {
    let text = format!("{}/100", format_number(score));
    if score >= 80.0 {
        style(text).green().bold().to_string()
    } else if score >= 60.0 {
        style(text).yellow().bold().to_string()
    } else {
        style(text).red().bold().to_string()
    }
}
