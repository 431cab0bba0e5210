//! Grammar and style through an external grammar service
//!
//! Long text is sent in overlapping windows; matches found twice in an
//! overlap are counted once. Penalty is half the matches per 1,000 words.

use super::base::{Check, CheckContext};
use crate::grammar::{GrammarError, GrammarService};
use crate::models::{round2, CheckResult, CheckStatus, Issue, Metrics};
use crate::text::text_chunks;
use anyhow::Result;
use serde_json::json;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, warn};

pub struct GrammarCheck {
    service: Option<Arc<dyn GrammarService>>,
}

impl GrammarCheck {
    pub fn new(service: Option<Arc<dyn GrammarService>>) -> Self {
        Self { service }
    }

    fn skipped(&self, weight: f64) -> CheckResult {
        let mut metrics = Metrics::new();
        metrics.insert("available".into(), json!(false));
        metrics.insert(
            "scoring_notes".into(),
            json!("Not scored because the grammar service is unavailable or disabled."),
        );
        CheckResult::unscored(
            self.id(),
            self.name(),
            weight,
            CheckStatus::Skipped,
            vec![Issue::note(
                self.id(),
                "Grammar service disabled or unavailable; skipping deep grammar/style checks.",
            )],
            metrics,
        )
    }

    fn failed(&self, weight: f64, err: &GrammarError) -> CheckResult {
        let hint = err.hint();
        let mut issues = vec![Issue::note(self.id(), format!("LanguageTool error: {err}"))];
        if let Some(h) = hint {
            issues.push(Issue::note(self.id(), format!("Suggested fix: {h}")));
        }

        let mut metrics = Metrics::new();
        metrics.insert("available".into(), json!(false));
        metrics.insert("error".into(), json!(err.to_string()));
        metrics.insert("suggested_fix".into(), json!(hint));
        metrics.insert(
            "scoring_notes".into(),
            json!("Not scored because the grammar service errored."),
        );
        CheckResult::unscored(
            self.id(),
            self.name(),
            weight,
            CheckStatus::Error,
            issues,
            metrics,
        )
    }
}

impl Check for GrammarCheck {
    fn id(&self) -> &'static str {
        "language_tool"
    }

    fn name(&self) -> &'static str {
        "Grammar and style (LanguageTool)"
    }

    fn default_weight(&self) -> f64 {
        35.0
    }

    fn run(&self, ctx: &CheckContext, weight: f64) -> Result<CheckResult> {
        let service = match &self.service {
            Some(s) if ctx.options.enable_grammar_tool && ctx.options.grammar_available => s,
            _ => return Ok(self.skipped(weight)),
        };

        let chunks = text_chunks(&ctx.text, ctx.options.chunk_size, ctx.options.chunk_overlap);
        debug!(
            "{}: {} chunk(s) of up to {} bytes",
            service.name(),
            chunks.len(),
            ctx.options.chunk_size
        );

        let mut issues = Vec::new();
        let mut seen: HashSet<(String, usize, Option<usize>)> = HashSet::new();
        let mut total_matches = 0usize;

        for (chunk, base) in &chunks {
            let matches = match service.check(chunk, &ctx.language) {
                Ok(m) => m,
                Err(e) => {
                    warn!("Grammar service failed: {}", e);
                    return Ok(self.failed(weight, &e));
                }
            };

            for m in matches {
                let global = base + m.offset;
                if !seen.insert((m.rule_id.clone(), global, m.length)) {
                    continue;
                }
                total_matches += 1;
                if issues.len() >= ctx.max_issues_per_check() {
                    continue;
                }
                let len = m.length.unwrap_or(1).max(1);
                issues.push(ctx.issue_from_span(self.id(), m.display_message(), global, global + len));
            }
        }

        let per_1k = 1000.0 * total_matches as f64 / ctx.word_denominator() as f64;
        let mut metrics = Metrics::new();
        metrics.insert("matches".into(), json!(total_matches));
        metrics.insert("matches_per_1000_words".into(), json!(round2(per_1k)));
        metrics.insert("chunks".into(), json!(chunks.len()));
        metrics.insert(
            "scoring_notes".into(),
            json!("Penalty = matches_per_1000_words / 2 (capped at max score)."),
        );

        Ok(CheckResult::scored(
            self.id(),
            self.name(),
            weight,
            per_1k / 2.0,
            issues,
            metrics,
        ))
    }
}
