//! Headings and capitalization
//!
//! A line is a probable heading when it is a markdown heading, a short line
//! ending in a colon, a short all-caps line, or a line underlined with
//! `===`/`---`. Headings starting with a lowercase letter are flagged.

use super::base::{truncate_chars, Check, CheckContext};
use crate::models::{CheckResult, Metrics};
use anyhow::Result;
use regex::Regex;
use serde_json::json;
use std::sync::OnceLock;

static MD_HEADING: OnceLock<Regex> = OnceLock::new();
static MD_PREFIX: OnceLock<Regex> = OnceLock::new();
static UNDERLINE: OnceLock<Regex> = OnceLock::new();

fn md_heading() -> &'static Regex {
    MD_HEADING.get_or_init(|| Regex::new(r"^#{1,6}\s+\S").expect("valid regex"))
}

fn md_prefix() -> &'static Regex {
    MD_PREFIX.get_or_init(|| Regex::new(r"^#{1,6}\s+").expect("valid regex"))
}

fn underline() -> &'static Regex {
    UNDERLINE.get_or_init(|| Regex::new(r"^[=-]{3,}$").expect("valid regex"))
}

pub struct HeadingsCheck;

impl Check for HeadingsCheck {
    fn id(&self) -> &'static str {
        "headings"
    }

    fn name(&self) -> &'static str {
        "Headings and capitalization"
    }

    fn default_weight(&self) -> f64 {
        5.0
    }

    fn run(&self, ctx: &CheckContext, weight: f64) -> Result<CheckResult> {
        let headings = probable_headings(&ctx.lines);

        let mut issues = Vec::new();
        let mut bad = 0usize;
        for (idx, heading) in &headings {
            if heading.chars().next().is_some_and(char::is_lowercase) {
                bad += 1;
                if issues.len() >= ctx.max_issues_per_check() {
                    continue;
                }
                issues.push(ctx.line_issue(
                    self.id(),
                    "Heading may not be capitalized.",
                    *idx,
                    0,
                    Some(truncate_chars(heading, 200)),
                    None,
                ));
            }
        }

        let mut metrics = Metrics::new();
        metrics.insert("probable_headings".into(), json!(headings.len()));
        metrics.insert("lowercase_headings".into(), json!(bad));
        metrics.insert(
            "scoring_notes".into(),
            json!("0.5 points per heading starting with lowercase (capped)."),
        );

        Ok(CheckResult::scored(
            self.id(),
            self.name(),
            weight,
            0.5 * bad as f64,
            issues,
            metrics,
        ))
    }
}

/// `(0-based line index, heading text)` for every probable heading
fn probable_headings(lines: &[String]) -> Vec<(usize, String)> {
    let mut headings = Vec::new();
    for (i, line) in lines.iter().enumerate() {
        let stripped = line.trim();
        if stripped.is_empty() {
            continue;
        }
        let len = stripped.chars().count();

        if md_heading().is_match(stripped) {
            headings.push((i, md_prefix().replace(stripped, "").into_owned()));
        } else if stripped.ends_with(':') && len < 80 {
            headings.push((i, stripped[..stripped.len() - 1].trim().to_string()));
        } else if is_upper(stripped) && len < 60 {
            headings.push((i, stripped.to_string()));
        } else if lines
            .get(i + 1)
            .is_some_and(|next| underline().is_match(next.trim()))
        {
            headings.push((i, stripped.to_string()));
        }
    }
    headings
}

/// At least one cased character and no lowercase ones
fn is_upper(s: &str) -> bool {
    s.chars().any(char::is_uppercase) && !s.chars().any(char::is_lowercase)
}
