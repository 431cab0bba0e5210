//! Links and citation formatting
//!
//! Raw URLs are only penalized when the document never uses markdown-style
//! links.

use super::base::{Check, CheckContext};
use crate::models::{CheckResult, Metrics};
use anyhow::Result;
use regex::Regex;
use serde_json::json;
use std::sync::OnceLock;

static RAW_URL: OnceLock<Regex> = OnceLock::new();
static MARKDOWN_LINK: OnceLock<Regex> = OnceLock::new();

fn raw_url() -> &'static Regex {
    RAW_URL.get_or_init(|| Regex::new(r"https?://\S+|www\.\S+").expect("valid regex"))
}

fn markdown_link() -> &'static Regex {
    MARKDOWN_LINK
        .get_or_init(|| Regex::new(r"\[[^\]]+\]\(\s*https?://[^)]+\)").expect("valid regex"))
}

pub struct LinksCheck;

impl Check for LinksCheck {
    fn id(&self) -> &'static str {
        "links"
    }

    fn name(&self) -> &'static str {
        "Links and citation formatting"
    }

    fn default_weight(&self) -> f64 {
        5.0
    }

    fn run(&self, ctx: &CheckContext, weight: f64) -> Result<CheckResult> {
        let raw = raw_url().find_iter(&ctx.text).count();
        let markdown = markdown_link().find_iter(&ctx.text).count();

        let mut metrics = Metrics::new();
        metrics.insert("raw_urls".into(), json!(raw));
        metrics.insert("markdown_or_hyperlinks".into(), json!(markdown));
        metrics.insert(
            "scoring_notes".into(),
            json!("2 points if raw URLs appear without any descriptive links."),
        );

        let mut issues = Vec::new();
        let mut penalty = 0.0;
        if raw > 0 && markdown == 0 {
            penalty = 2.0;
            ctx.add_match_issues(
                &mut issues,
                self.id(),
                raw_url(),
                |m| format!("Raw URL found (sample): {m}"),
                ctx.max_issues_per_check(),
            );
        }

        Ok(CheckResult::scored(self.id(), self.name(), weight, penalty, issues, metrics))
    }
}
