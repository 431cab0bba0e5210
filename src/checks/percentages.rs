//! Numbers and percentages consistency
//!
//! Flags documents that mix `12%` with `12 percent`, or whole-number with
//! decimal percentages.

use super::base::{Check, CheckContext};
use crate::models::{CheckResult, Metrics};
use anyhow::Result;
use regex::Regex;
use serde_json::json;
use std::sync::OnceLock;

static SYMBOL: OnceLock<Regex> = OnceLock::new();
static WORD: OnceLock<Regex> = OnceLock::new();

fn symbol() -> &'static Regex {
    SYMBOL.get_or_init(|| Regex::new(r"\b\d+(?:\.\d+)?\s*%").expect("valid regex"))
}

fn word() -> &'static Regex {
    WORD.get_or_init(|| {
        Regex::new(r"(?i)\b\d+(?:\.\d+)?\s+(?:percent|per\s*cent)\b").expect("valid regex")
    })
}

pub struct PercentagesCheck;

impl Check for PercentagesCheck {
    fn id(&self) -> &'static str {
        "percentages"
    }

    fn name(&self) -> &'static str {
        "Numbers and percentages consistency"
    }

    fn default_weight(&self) -> f64 {
        5.0
    }

    fn run(&self, ctx: &CheckContext, weight: f64) -> Result<CheckResult> {
        let id = self.id();
        let text = &ctx.text;
        let symbol_spans: Vec<(usize, usize)> =
            symbol().find_iter(text).map(|m| (m.start(), m.end())).collect();
        let word_count = word().find_iter(text).count();
        let (decimal_spans, integer_spans): (Vec<(usize, usize)>, Vec<(usize, usize)>) =
            symbol_spans
                .iter()
                .copied()
                .partition(|(s, e)| text[*s..*e].contains('.'));

        let mut metrics = Metrics::new();
        metrics.insert("percent_symbol".into(), json!(symbol_spans.len()));
        metrics.insert("percent_word".into(), json!(word_count));
        metrics.insert(
            "total_percent_mentions".into(),
            json!(symbol_spans.len() + word_count),
        );
        metrics.insert("decimal_percentages".into(), json!(decimal_spans.len()));
        metrics.insert("whole_percentages".into(), json!(integer_spans.len()));

        let mut penalty = 0.0;
        let mut reasons = Vec::new();
        let mut issues = Vec::new();

        if !symbol_spans.is_empty() && word_count > 0 {
            penalty += 2.0;
            reasons.push("Mix of '%' and 'percent' styles (-2.0).");
            ctx.add_match_issues(
                &mut issues,
                id,
                symbol(),
                |m| format!("Percent symbol style used (sample): {m}"),
                3,
            );
            ctx.add_match_issues(
                &mut issues,
                id,
                word(),
                |m| format!("'Percent' word style used (sample): {m}"),
                3,
            );
        }

        if !decimal_spans.is_empty() && !integer_spans.is_empty() {
            penalty += 0.5;
            reasons.push("Mix of whole-number and decimal percentages (-0.5).");
            ctx.add_span_issues(
                &mut issues,
                id,
                decimal_spans.iter().copied(),
                |m| format!("Decimal percentage used (sample): {m}"),
                3,
            );
            ctx.add_span_issues(
                &mut issues,
                id,
                integer_spans.iter().copied(),
                |m| format!("Whole-number percentage used (sample): {m}"),
                3,
            );
        }

        if !reasons.is_empty() {
            metrics.insert("penalty_reasons".into(), json!(reasons));
        }
        metrics.insert(
            "scoring_notes".into(),
            json!("Penalties applied for inconsistent percentage styles."),
        );

        Ok(CheckResult::scored(id, self.name(), weight, penalty, issues, metrics))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AuditOptions;

    fn run(text: &str) -> CheckResult {
        let ctx = CheckContext::build(text, "en-US", AuditOptions::default());
        PercentagesCheck.run(&ctx, 5.0).unwrap()
    }

    #[test]
    fn test_consistent_symbols() {
        let r = run("Sales rose 12% and costs fell 4 %.");
        assert_eq!(r.metrics["percent_symbol"], json!(2));
        assert_eq!(r.score, 5.0);
    }

    #[test]
    fn test_single_decimal_is_not_mixed() {
        let r = run("Inflation reached 3.5% this year.");
        assert_eq!(r.metrics["decimal_percentages"], json!(1));
        assert_eq!(r.metrics["whole_percentages"], json!(0));
        assert_eq!(r.score, 5.0);
    }

    #[test]
    fn test_symbol_and_word_mixed() {
        let r = run("Up 10% in May and 20 percent in June, then 5 Per Cent.");
        assert_eq!(r.metrics["percent_word"], json!(2));
        assert_eq!(r.score, 3.0);
        assert_eq!(r.issues.len(), 3);
        assert!(r.issues[0].message.ends_with("10%"));
    }

    #[test]
    fn test_whole_and_decimal_mixed() {
        let r = run("Shares of 10% and 2.5% were reported.");
        assert_eq!(r.score, 4.5);
        assert_eq!(r.issues.len(), 2);
        assert!(r.issues[0].message.starts_with("Decimal percentage"));
    }
}
