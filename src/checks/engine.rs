//! Audit engine
//!
//! Builds the check context once, runs the selected checks in parallel and
//! aggregates their results into an `AuditReport`. A failing or panicking
//! check becomes an `error` result; it never aborts the audit.

use super::base::CheckContext;
use super::registry::{CheckSpec, Registry};
use crate::config::AuditOptions;
use crate::models::{
    AuditReport, AuditSummary, CheckResult, CheckStatus, CheckSummary, DocInfo, Issue, Metrics,
};
use crate::scoring;
use rayon::prelude::*;
use serde_json::json;
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// Runs a fixed selection of checks against documents
#[derive(Debug, Clone)]
pub struct AuditEngine {
    /// Checks to run, in registration order
    enabled: Vec<CheckSpec>,
    /// Weight of the whole registry, used as the coverage denominator
    registered_weight: f64,
}

impl AuditEngine {
    /// Engine running every registered check
    pub fn new(registry: &Registry) -> Self {
        Self::with_selection(registry, &[], &[])
    }

    /// Engine running `enable` (all when empty) minus `disable`
    pub fn with_selection(registry: &Registry, enable: &[String], disable: &[String]) -> Self {
        Self {
            enabled: registry.select(enable, disable),
            registered_weight: registry.total_weight(),
        }
    }

    pub fn enabled(&self) -> &[CheckSpec] {
        &self.enabled
    }

    pub fn registered_weight(&self) -> f64 {
        self.registered_weight
    }

    /// Audit already-normalized `text`
    pub fn audit(
        &self,
        file_path: &str,
        text: &str,
        language: &str,
        options: &AuditOptions,
        doc_info: DocInfo,
    ) -> AuditReport {
        let start = Instant::now();
        info!(
            "Auditing {} with {} checks ({} chars)",
            file_path,
            self.enabled.len(),
            text.chars().count()
        );

        let ctx = CheckContext::build(text, language, options.clone());
        let mut results: Vec<CheckResult> = self
            .enabled
            .par_iter()
            .map(|spec| run_single_check(spec, &ctx))
            .collect();

        scoring::apply_issue_budget(&mut results, options.max_issues);
        let totals = scoring::compute(&results, self.registered_weight, options.strict);

        let summary = AuditSummary {
            file: file_path.to_string(),
            language: language.to_string(),
            score: totals.total_score,
            coverage: totals.coverage,
            configured_max: totals.configured_max,
            scored_max: totals.scored_max,
            checks: results
                .iter()
                .map(|r| {
                    (
                        r.name.clone(),
                        CheckSummary {
                            score: r.score,
                            max: r.max_score,
                            status: r.status,
                        },
                    )
                })
                .collect(),
            document: (!doc_info.is_empty()).then(|| doc_info.clone()),
        };

        info!(
            "Audit of {} complete: score {:.2}, coverage {:.2}% in {:?}",
            file_path,
            totals.total_score,
            totals.coverage,
            start.elapsed()
        );

        AuditReport {
            file_path: file_path.to_string(),
            language: language.to_string(),
            total_score: totals.total_score,
            coverage: totals.coverage,
            check_results: results,
            summary,
            doc_info,
        }
    }
}

/// Run one check with error handling and timing
fn run_single_check(spec: &CheckSpec, ctx: &CheckContext) -> CheckResult {
    let id = spec.id();
    let start = Instant::now();
    debug!("Running check: {}", id);

    let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        spec.check.run(ctx, spec.weight)
    }));

    let mut result = match outcome {
        Ok(Ok(result)) => result,
        Ok(Err(e)) => {
            warn!("Check {} failed: {:#}", id, e);
            failure(spec, format!("{e:#}"))
        }
        Err(panic_info) => {
            let panic_msg = if let Some(s) = panic_info.downcast_ref::<&str>() {
                s.to_string()
            } else if let Some(s) = panic_info.downcast_ref::<String>() {
                s.clone()
            } else {
                "Unknown panic".to_string()
            };
            error!("Check {} panicked: {}", id, panic_msg);
            failure(spec, format!("Panic: {panic_msg}"))
        }
    };

    result.check_id = id.to_string();
    result.score = result.score.clamp(0.0, result.max_score.max(0.0));

    debug!(
        "Check {} finished: {} ({:.2}/{:.2}, {} issues) in {}ms",
        id,
        result.status,
        result.score,
        result.max_score,
        result.issues.len(),
        start.elapsed().as_millis()
    );
    result
}

fn failure(spec: &CheckSpec, message: String) -> CheckResult {
    let mut metrics = Metrics::new();
    metrics.insert("error".into(), json!(message));
    CheckResult::unscored(
        spec.id(),
        spec.name(),
        spec.weight,
        CheckStatus::Error,
        vec![Issue::note(spec.id(), format!("Check failed: {message}"))],
        metrics,
    )
}
