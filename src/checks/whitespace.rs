//! Whitespace and formatting: trailing whitespace, double spaces, tabs

use super::base::{truncate_chars, Check, CheckContext};
use crate::models::{CheckResult, Issue, Metrics};
use anyhow::Result;
use regex::Regex;
use serde_json::json;
use std::sync::OnceLock;

static DOUBLE_SPACE: OnceLock<Regex> = OnceLock::new();

fn double_space() -> &'static Regex {
    DOUBLE_SPACE.get_or_init(|| Regex::new(r" {2,}").expect("valid regex"))
}

pub struct WhitespaceCheck;

impl Check for WhitespaceCheck {
    fn id(&self) -> &'static str {
        "whitespace"
    }

    fn name(&self) -> &'static str {
        "Whitespace and formatting"
    }

    fn default_weight(&self) -> f64 {
        5.0
    }

    fn run(&self, ctx: &CheckContext, weight: f64) -> Result<CheckResult> {
        let id = self.id();
        let limit = ctx.max_issues_per_check();
        let trailing: Vec<usize> = ctx
            .lines
            .iter()
            .enumerate()
            .filter(|(_, line)| line.ends_with([' ', '\t']))
            .map(|(i, _)| i)
            .collect();
        let doubles = double_space().find_iter(&ctx.text).count();
        let tabs = ctx.text.matches('\t').count();

        let mut metrics = Metrics::new();
        metrics.insert("trailing_whitespace_lines".into(), json!(trailing.len()));
        metrics.insert("double_spaces".into(), json!(doubles));
        metrics.insert("tab_characters".into(), json!(tabs));
        metrics.insert(
            "scoring_notes".into(),
            json!("0.1 per trailing whitespace line, 0.05 per double space, 0.1 per tab."),
        );

        let mut issues = Vec::new();
        for &idx in trailing.iter().take(limit) {
            let line = &ctx.lines[idx];
            // positioned on the last character of the line
            let last = line.char_indices().last().map(|(i, _)| i).unwrap_or(0);
            issues.push(ctx.line_issue(
                id,
                "Trailing whitespace detected.",
                idx,
                last,
                Some(truncate_chars(line.trim(), 200)),
                None,
            ));
        }

        if doubles > 0 && issues.len() < limit {
            issues.push(Issue::note(
                id,
                format!("{doubles} double-space occurrence(s) detected. Consider single spacing."),
            ));
            sample_lines(ctx, &mut issues, id, "  ", "Double space detected (sample).", "  ");
        }
        if tabs > 0 && issues.len() < limit {
            issues.push(Issue::note(
                id,
                format!("{tabs} tab character(s) found. Use spaces for alignment."),
            ));
            sample_lines(ctx, &mut issues, id, "\t", "Tab character detected (sample).", "\\t");
        }

        let penalty = 0.1 * trailing.len() as f64 + 0.05 * doubles as f64 + 0.1 * tabs as f64;
        Ok(CheckResult::scored(id, self.name(), weight, penalty, issues, metrics))
    }
}

/// One issue per line containing `needle`, until the per-check limit
fn sample_lines(
    ctx: &CheckContext,
    issues: &mut Vec<Issue>,
    id: &str,
    needle: &str,
    message: &str,
    highlight: &str,
) {
    for (idx, line) in ctx.lines.iter().enumerate() {
        if issues.len() >= ctx.max_issues_per_check() {
            break;
        }
        if let Some(byte_col) = line.find(needle) {
            issues.push(ctx.line_issue(
                id,
                message,
                idx,
                byte_col,
                Some(truncate_chars(line.trim(), 80)),
                Some(highlight),
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AuditOptions;

    fn run(text: &str) -> CheckResult {
        let ctx = CheckContext::build(text, "en-US", AuditOptions::default());
        WhitespaceCheck.run(&ctx, 5.0).unwrap()
    }

    #[test]
    fn test_clean_text() {
        let r = run("Clean line.\nAnother clean line.");
        assert_eq!(r.score, 5.0);
        assert!(r.issues.is_empty());
    }

    #[test]
    fn test_double_spaces_and_tab() {
        let r = run("This is a test!! It has    double   spaces.\t\n");
        assert_eq!(r.metrics["double_spaces"], json!(2));
        assert_eq!(r.metrics["tab_characters"], json!(1));
        assert_eq!(r.metrics["trailing_whitespace_lines"], json!(1));
        assert_eq!(r.score, 4.7);

        let double = r
            .issues
            .iter()
            .find(|i| i.highlight.as_deref() == Some("  "))
            .unwrap();
        assert_eq!(double.line, Some(1));
        assert_eq!(double.col, Some(24));

        let tab = r
            .issues
            .iter()
            .find(|i| i.highlight.as_deref() == Some("\\t"))
            .unwrap();
        assert_eq!(tab.col, Some(44));
    }

    #[test]
    fn test_trailing_issue_points_at_line_end() {
        let r = run("ok\nbad  \nok");
        let trailing = &r.issues[0];
        assert_eq!(trailing.message, "Trailing whitespace detected.");
        assert_eq!(trailing.line, Some(2));
        assert_eq!(trailing.col, Some(5));
        assert_eq!(trailing.snippet.as_deref(), Some("bad"));
    }

    #[test]
    fn test_notes_respect_issue_limit() {
        let options = AuditOptions {
            max_issues_per_check: 2,
            ..AuditOptions::default()
        };
        let ctx = CheckContext::build("a  \nb\t\nc  d \n", "en-US", options);
        let r = WhitespaceCheck.run(&ctx, 5.0).unwrap();
        assert_eq!(r.issues.len(), 2);
        assert!(r.issues.iter().all(|i| i.message == "Trailing whitespace detected."));
        assert_eq!(r.metrics["tab_characters"], json!(1));

        let options = AuditOptions {
            max_issues_per_check: 1,
            ..AuditOptions::default()
        };
        let ctx = CheckContext::build("one  two\tthree", "en-US", options);
        let r = WhitespaceCheck.run(&ctx, 5.0).unwrap();
        assert_eq!(r.issues.len(), 1);
        assert!(r.issues[0].message.contains("double-space"));
    }

    #[test]
    fn test_penalty_capped() {
        let r = run(&"a\t".repeat(200));
        assert_eq!(r.score, 0.0);
        assert_eq!(r.metrics["penalty_points"], json!(5.0));
    }
}
