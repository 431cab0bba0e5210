//! Passive voice heuristic: a form of "to be" followed by a word ending in
//! -ed or -en

use super::base::{Check, CheckContext};
use crate::models::{CheckResult, Metrics};
use anyhow::Result;
use regex::Regex;
use serde_json::json;
use std::sync::OnceLock;

static PASSIVE: OnceLock<Regex> = OnceLock::new();

fn passive() -> &'static Regex {
    PASSIVE.get_or_init(|| {
        Regex::new(r"(?i)\b(?:am|is|are|was|were|be|been|being)\b\s+\b\w+(?:ed|en)\b")
            .expect("valid regex")
    })
}

pub struct PassiveVoiceCheck;

impl Check for PassiveVoiceCheck {
    fn id(&self) -> &'static str {
        "passive_voice"
    }

    fn name(&self) -> &'static str {
        "Passive voice (heuristic)"
    }

    fn default_weight(&self) -> f64 {
        5.0
    }

    fn run(&self, ctx: &CheckContext, weight: f64) -> Result<CheckResult> {
        let matches: Vec<_> = passive().find_iter(&ctx.text).collect();

        let issues = matches
            .iter()
            .take(ctx.max_issues_per_check())
            .map(|m| {
                ctx.issue_from_span(
                    self.id(),
                    format!("Possible passive construction: '{}'", m.as_str()),
                    m.start(),
                    m.end(),
                )
            })
            .collect();

        let mut metrics = Metrics::new();
        metrics.insert("passive_like_phrases".into(), json!(matches.len()));
        metrics.insert(
            "scoring_notes".into(),
            json!("0.05 points per passive-like phrase (capped)."),
        );

        Ok(CheckResult::scored(
            self.id(),
            self.name(),
            weight,
            0.05 * matches.len() as f64,
            issues,
            metrics,
        ))
    }
}
