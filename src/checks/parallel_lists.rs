//! Parallel structure in bullet and numbered lists
//!
//! Each item's first word is classified as a gerund, an imperative, a noun
//! phrase or other. A block of consecutive list lines is inconsistent when
//! its items fall into more than one class.

use super::base::{format_location, Check, CheckContext};
use crate::models::{CheckResult, Issue, Metrics, Severity};
use crate::text::word_tokens;
use anyhow::Result;
use regex::Regex;
use serde_json::json;
use std::collections::BTreeSet;
use std::sync::OnceLock;

/// Smallest block that is checked
pub const DEFAULT_MIN_BLOCK: usize = 3;

/// Base verbs recognized as imperative item starts
pub const IMPERATIVE_VERBS: &[&str] = &[
    "use", "add", "ensure", "consider", "avoid", "include", "provide", "attend", "highlight",
    "outline", "emphasize", "leverage", "budget", "remember", "keep", "create", "define",
    "verify", "review",
];

const DETERMINERS: &[&str] = &["a", "an", "the", "this", "that", "these", "those"];

static BULLET: OnceLock<Regex> = OnceLock::new();

fn bullet() -> &'static Regex {
    BULLET.get_or_init(|| Regex::new(r"^\s*(?:[-*+\x{2022}]|\d+[.)])\s+").expect("valid regex"))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Start {
    Gerund,
    Imperative,
    NounPhrase,
    Other,
}

impl Start {
    fn label(self) -> &'static str {
        match self {
            Start::Gerund => "GERUND",
            Start::Imperative => "IMPERATIVE",
            Start::NounPhrase => "NOUNPHRASE",
            Start::Other => "OTHER",
        }
    }
}

fn classify(token: &str) -> Start {
    let t = token.to_lowercase();
    if t.ends_with("ing") {
        Start::Gerund
    } else if IMPERATIVE_VERBS.contains(&t.as_str()) {
        Start::Imperative
    } else if DETERMINERS.contains(&t.as_str()) {
        Start::NounPhrase
    } else {
        Start::Other
    }
}

pub struct ParallelListsCheck {
    min_block: usize,
}

impl ParallelListsCheck {
    pub fn new(min_block: usize) -> Self {
        Self {
            min_block: min_block.max(2),
        }
    }
}

impl Default for ParallelListsCheck {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_BLOCK)
    }
}

impl Check for ParallelListsCheck {
    fn id(&self) -> &'static str {
        "parallel_lists"
    }

    fn name(&self) -> &'static str {
        "Parallel structure in lists"
    }

    fn default_weight(&self) -> f64 {
        10.0
    }

    fn run(&self, ctx: &CheckContext, weight: f64) -> Result<CheckResult> {
        let blocks = list_blocks(&ctx.lines, self.min_block);

        let mut issues = Vec::new();
        let mut inconsistent = 0usize;
        for block in &blocks {
            let categories: BTreeSet<Start> = block
                .iter()
                .map(|(_, item)| {
                    let head: String = item.chars().take(60).collect();
                    classify(word_tokens(&head).first().map(String::as_str).unwrap_or(""))
                })
                .collect();
            if categories.len() < 2 {
                continue;
            }
            inconsistent += 1;
            if issues.len() < ctx.max_issues_per_check() {
                issues.push(block_issue(ctx, self.id(), block, &categories));
            }
        }

        let mut metrics = Metrics::new();
        metrics.insert("bullet_blocks_3plus".into(), json!(blocks.len()));
        metrics.insert("inconsistent_blocks".into(), json!(inconsistent));
        metrics.insert(
            "scoring_notes".into(),
            json!("2 points per inconsistent bullet block (capped)."),
        );

        Ok(CheckResult::scored(
            self.id(),
            self.name(),
            weight,
            2.0 * inconsistent as f64,
            issues,
            metrics,
        ))
    }
}

/// Runs of consecutive list lines, as `(0-based line index, trimmed line)`
fn list_blocks(lines: &[String], min_block: usize) -> Vec<Vec<(usize, String)>> {
    let mut blocks = Vec::new();
    let mut current: Vec<(usize, String)> = Vec::new();
    for (i, line) in lines.iter().enumerate() {
        if bullet().is_match(line) {
            current.push((i, line.trim().to_string()));
        } else if !current.is_empty() {
            let block = std::mem::take(&mut current);
            if block.len() >= min_block {
                blocks.push(block);
            }
        }
    }
    if current.len() >= min_block {
        blocks.push(current);
    }
    blocks
}

fn block_issue(
    ctx: &CheckContext,
    check_id: &str,
    block: &[(usize, String)],
    categories: &BTreeSet<Start>,
) -> Issue {
    let labels: Vec<&str> = categories.iter().map(|c| c.label()).collect();
    let more = if block.len() > 3 { " ..." } else { "" };
    let sample_lines: Vec<String> = block
        .iter()
        .take(3)
        .map(|(idx, _)| {
            let start = ctx.line_starts()[*idx];
            ctx.locate(start).line.to_string()
        })
        .collect();
    let sample_items: Vec<&str> = block.iter().take(3).map(|(_, item)| item.as_str()).collect();
    let snippet = format!("{}{}", sample_items.join(" | "), more);

    let first = ctx.locate(ctx.line_starts()[block[0].0]);
    Issue {
        check_id: check_id.to_string(),
        message: format!(
            "Bullet list with mixed starts ({}). Consider making items parallel.",
            labels.join(", ")
        ),
        location: Some(format_location(
            first.line,
            1,
            Some(&format!("Lines {}: {}", sample_lines.join(", "), snippet)),
            first.page,
        )),
        severity: Some(Severity::Warning),
        line: Some(first.line),
        col: Some(1),
        page: first.page,
        snippet: Some(snippet),
        highlight: None,
    }
}
