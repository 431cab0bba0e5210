//! Punctuation and style

use super::base::{Check, CheckContext};
use crate::models::{round2, CheckResult, Metrics};
use anyhow::Result;
use regex::Regex;
use serde_json::json;
use std::sync::OnceLock;

const EM_DASH: char = '\u{2014}';
const ELLIPSIS: char = '\u{2026}';

static SEMICOLON: OnceLock<Regex> = OnceLock::new();
static ELLIPSES: OnceLock<Regex> = OnceLock::new();
static REPEATED: OnceLock<Regex> = OnceLock::new();
static SPACED_DASH: OnceLock<Regex> = OnceLock::new();
static SPACED_EM_DASH: OnceLock<Regex> = OnceLock::new();
static SPACED_DOUBLE_HYPHEN: OnceLock<Regex> = OnceLock::new();

fn semicolon() -> &'static Regex {
    SEMICOLON.get_or_init(|| Regex::new(";").expect("valid regex"))
}

fn ellipses() -> &'static Regex {
    ELLIPSES.get_or_init(|| Regex::new(r"\.\.\.|\x{2026}").expect("valid regex"))
}

fn repeated() -> &'static Regex {
    REPEATED.get_or_init(|| Regex::new(r"[!?]{2,}").expect("valid regex"))
}

fn spaced_dash() -> &'static Regex {
    SPACED_DASH.get_or_init(|| Regex::new(r"\s\x{2014}\s|\s--\s").expect("valid regex"))
}

fn spaced_em_dash() -> &'static Regex {
    SPACED_EM_DASH.get_or_init(|| Regex::new(r"\s\x{2014}\s").expect("valid regex"))
}

fn spaced_double_hyphen() -> &'static Regex {
    SPACED_DOUBLE_HYPHEN.get_or_init(|| Regex::new(r"\s--\s").expect("valid regex"))
}

pub struct PunctuationCheck;

impl Check for PunctuationCheck {
    fn id(&self) -> &'static str {
        "punctuation"
    }

    fn name(&self) -> &'static str {
        "Punctuation and style"
    }

    fn default_weight(&self) -> f64 {
        10.0
    }

    fn run(&self, ctx: &CheckContext, weight: f64) -> Result<CheckResult> {
        let text = &ctx.text;
        let words = ctx.word_denominator() as f64;
        let semicolons = text.matches(';').count();
        let semicolon_density = 1000.0 * semicolons as f64 / words;
        let ellipsis_count = text.matches("...").count() + text.matches(ELLIPSIS).count();
        let double_punct = repeated().find_iter(text).count();
        let spaced_em = spaced_em_dash().find_iter(text).count();
        let spaced_hyphens = spaced_double_hyphen().find_iter(text).count();

        let mut metrics = Metrics::new();
        metrics.insert("semicolons".into(), json!(semicolons));
        metrics.insert("semicolons_per_1000_words".into(), json!(round2(semicolon_density)));
        metrics.insert("ellipses".into(), json!(ellipsis_count));
        metrics.insert("double_punctuations".into(), json!(double_punct));
        metrics.insert("em_dashes".into(), json!(text.matches(EM_DASH).count()));
        metrics.insert("double_hyphens".into(), json!(text.matches("--").count()));
        metrics.insert("em_dashes_with_spaces".into(), json!(spaced_em));
        metrics.insert("double_hyphens_with_spaces".into(), json!(spaced_hyphens));

        let mut penalty = 0.0;
        let mut reasons = Vec::new();
        let mut issues = Vec::new();
        let id = self.id();

        if semicolons > 0 && semicolon_density > 3.0 {
            penalty += 2.5;
            reasons.push("Semicolon density > 3 per 1,000 words (-2.5).");
            ctx.add_match_issues(
                &mut issues,
                id,
                semicolon(),
                |_| "Semicolon usage (sample contributing to density penalty).".into(),
                3,
            );
        }
        if ellipsis_count > 2 {
            penalty += 1.5;
            reasons.push("Ellipses appear frequently (-1.5).");
            ctx.add_match_issues(&mut issues, id, ellipses(), |_| "Ellipsis usage (sample).".into(), 3);
        }
        if double_punct > 0 {
            penalty += 1.0;
            reasons.push("Repeated punctuation (e.g., !! or ??) (-1.0).");
            ctx.add_match_issues(
                &mut issues,
                id,
                repeated(),
                |_| "Repeated punctuation (sample).".into(),
                3,
            );
        }
        if spaced_em > 0 || spaced_hyphens > 0 {
            penalty += 0.5;
            reasons.push("Spaced em dashes or double hyphens found (-0.5).");
            ctx.add_match_issues(
                &mut issues,
                id,
                spaced_dash(),
                |_| "Spaced dash usage (sample).".into(),
                3,
            );
        }

        if !reasons.is_empty() {
            metrics.insert("penalty_reasons".into(), json!(reasons));
        }
        metrics.insert(
            "scoring_notes".into(),
            json!("Penalties applied per punctuation rule (capped at max score)."),
        );

        Ok(CheckResult::scored(id, self.name(), weight, penalty, issues, metrics))
    }
}
