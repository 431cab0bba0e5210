//! Acronym definitions
//!
//! Every 2-6 letter all-caps token should be introduced once, either as
//! `Long Name (ACR)` or `ACR (Long Name)`. Common acronyms in the stoplist
//! are exempt.

use super::base::{Check, CheckContext};
use crate::models::{CheckResult, Metrics};
use anyhow::Result;
use regex::Regex;
use serde_json::json;
use std::collections::BTreeSet;
use std::sync::OnceLock;

/// Undefined acronyms beyond this count add no further penalty
pub const DEFAULT_MAX_COUNTED: usize = 5;

/// Acronyms readers are expected to know
pub const DEFAULT_STOPLIST: &[&str] = &[
    "USA", "US", "U.S", "PDF", "DOCX", "CEO", "CFO", "FYI", "ETA", "HTML", "HTTP", "HTTPS",
];

static TOKEN: OnceLock<Regex> = OnceLock::new();

fn token() -> &'static Regex {
    TOKEN.get_or_init(|| Regex::new(r"\b([A-Z]{2,6})\b").expect("valid regex"))
}

pub struct AcronymsCheck {
    max_counted: usize,
    stoplist: BTreeSet<String>,
}

impl AcronymsCheck {
    pub fn new<S: AsRef<str>>(max_counted: usize, stoplist: &[S]) -> Self {
        Self {
            max_counted,
            stoplist: stoplist.iter().map(|s| s.as_ref().to_string()).collect(),
        }
    }
}

impl Default for AcronymsCheck {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_COUNTED, DEFAULT_STOPLIST)
    }
}

/// True when `acronym` is introduced somewhere in `text`
fn is_defined(text: &str, acronym: &str) -> Result<bool> {
    let acr = regex::escape(acronym);
    let name_first = Regex::new(&format!(r"\b[A-Za-z][A-Za-z&/ \-]{{2,80}}\s+\({acr}\)"))?;
    let acronym_first = Regex::new(&format!(r"\b{acr}\s+\([A-Za-z][^)]+\)"))?;
    Ok(name_first.is_match(text) || acronym_first.is_match(text))
}

impl Check for AcronymsCheck {
    fn id(&self) -> &'static str {
        "acronyms"
    }

    fn name(&self) -> &'static str {
        "Acronym definitions"
    }

    fn default_weight(&self) -> f64 {
        10.0
    }

    fn run(&self, ctx: &CheckContext, weight: f64) -> Result<CheckResult> {
        let found: BTreeSet<&str> = token()
            .captures_iter(&ctx.text)
            .filter_map(|c| c.get(1).map(|m| m.as_str()))
            .collect();

        let mut undefined = Vec::new();
        for acronym in &found {
            if self.stoplist.contains(*acronym) {
                continue;
            }
            if !is_defined(&ctx.text, acronym)? {
                undefined.push(*acronym);
            }
        }

        let mut issues = Vec::new();
        for acronym in undefined.iter().take(ctx.max_issues_per_check()) {
            let first = Regex::new(&format!(r"\b{}\b", regex::escape(acronym)))?;
            if let Some(m) = first.find(&ctx.text) {
                issues.push(ctx.issue_from_span(
                    self.id(),
                    format!(
                        "Acronym '{acronym}' appears without a nearby definition (e.g., 'Name ({acronym})')."
                    ),
                    m.start(),
                    m.end(),
                ));
            }
        }

        let mut metrics = Metrics::new();
        metrics.insert("acronyms_found".into(), json!(found.len()));
        metrics.insert("acronyms_undefined".into(), json!(undefined.len()));
        metrics.insert(
            "scoring_notes".into(),
            json!(format!(
                "1 point per undefined acronym, counting at most {}.",
                self.max_counted
            )),
        );

        let penalty = undefined.len().min(self.max_counted) as f64;
        Ok(CheckResult::scored(self.id(), self.name(), weight, penalty, issues, metrics))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AuditOptions;

    fn run(text: &str) -> CheckResult {
        let ctx = CheckContext::build(text, "en-US", AuditOptions::default());
        AcronymsCheck::default().run(&ctx, 10.0).unwrap()
    }

    #[test]
    fn test_undefined_acronym() {
        let r = run("NASA launched a rocket.");
        assert_eq!(r.metrics["acronyms_undefined"], json!(1));
        assert_eq!(r.metrics["penalty_points"], json!(1.0));
        assert_eq!(r.issues.len(), 1);
        assert_eq!(r.issues[0].highlight.as_deref(), Some("NASA"));
        assert_eq!(r.issues[0].col, Some(1));
    }

    #[test]
    fn test_defined_acronyms() {
        let r = run(
            "The World Health Organization (WHO) met. Later, WHO agreed. \
             ESA (European Space Agency) joined.",
        );
        assert_eq!(r.metrics["acronyms_found"], json!(2));
        assert_eq!(r.metrics["acronyms_undefined"], json!(0));
        assert_eq!(r.score, 10.0);
    }

    #[test]
    fn test_stoplist_exempt() {
        let r = run("Export the PDF and send it to the CEO.");
        assert_eq!(r.metrics["acronyms_undefined"], json!(0));
        assert!(r.issues.is_empty());
    }

    #[test]
    fn test_penalty_counts_at_most_five() {
        let r = run("AB CD EF GH IJ KL MN were all mentioned.");
        assert_eq!(r.metrics["acronyms_undefined"], json!(7));
        assert_eq!(r.metrics["penalty_points"], json!(5.0));
        assert_eq!(r.score, 5.0);
    }

    #[test]
    fn test_custom_stoplist() {
        let ctx = CheckContext::build("NASA launched.", "en-US", AuditOptions::default());
        let r = AcronymsCheck::new(5, &["NASA"]).run(&ctx, 10.0).unwrap();
        assert_eq!(r.score, 10.0);
    }
}
