//! Coverage-normalized audit scoring
//!
//! # Scoring Formula
//!
//! ```text
//! contributing = Σ weight of ok checks            (+ skipped/error when strict)
//! total        = 100 × Σ ok scores / contributing (0 when nothing contributes)
//! coverage     = 100 × contributing / registered
//! ```
//!
//! `registered` is the weight of every check in the registry, so a check
//! that was disabled on the command line lowers coverage the same way a
//! skipped one does.
//!
//! # Issue budget
//!
//! The global issue cap is spent in registration order. The first check that
//! overruns it is truncated, every later check loses all of its issues, and
//! each affected check records how many were dropped in `issues_truncated`.

use crate::models::{round2, CheckResult, CheckStatus};
use serde_json::json;
use tracing::debug;

/// Totals derived from a set of check results
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreBreakdown {
    /// Normalized score in `[0, 100]`
    pub total_score: f64,
    /// Share of registered weight that was scored, in `[0, 100]`
    pub coverage: f64,
    /// Weight of every registered check
    pub configured_max: f64,
    /// Weight that contributed to the score
    pub scored_max: f64,
}

/// Aggregate check results into a total and a coverage figure
pub fn compute(results: &[CheckResult], registered_weight: f64, strict: bool) -> ScoreBreakdown {
    let mut contributing = 0.0;
    let mut scored = 0.0;
    for result in results {
        match result.status {
            CheckStatus::Ok => {
                contributing += result.max_score;
                scored += result.score.clamp(0.0, result.max_score.max(0.0));
            }
            CheckStatus::Skipped | CheckStatus::Error if strict => {
                contributing += result.max_score;
            }
            _ => {}
        }
    }

    let total_score = if contributing > 0.0 {
        round2((100.0 * scored / contributing).clamp(0.0, 100.0))
    } else {
        0.0
    };
    let coverage = if registered_weight > 0.0 {
        round2((100.0 * contributing / registered_weight).clamp(0.0, 100.0))
    } else {
        0.0
    };

    debug!(
        "Scored {:.2}/{:.2} weight, total {:.2}, coverage {:.2}%",
        scored, contributing, total_score, coverage
    );

    ScoreBreakdown {
        total_score,
        coverage,
        configured_max: registered_weight,
        scored_max: contributing,
    }
}

/// Enforce a global issue cap across results in order. `0` means unlimited.
pub fn apply_issue_budget(results: &mut [CheckResult], max_issues: usize) {
    if max_issues == 0 {
        return;
    }
    let mut remaining = max_issues;
    for result in results.iter_mut() {
        let count = result.issues.len();
        if remaining == 0 {
            if count > 0 {
                result.metrics.insert("issues_truncated".into(), json!(count));
                result.issues.clear();
            }
            continue;
        }
        if count > remaining {
            result
                .metrics
                .insert("issues_truncated".into(), json!(count - remaining));
            result.issues.truncate(remaining);
            remaining = 0;
        } else {
            remaining -= count;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Issue, Metrics};
    use proptest::prelude::*;

    fn ok(id: &str, max: f64, score: f64, issues: usize) -> CheckResult {
        let issues = (0..issues).map(|i| Issue::note(id, format!("issue {i}"))).collect();
        CheckResult::scored(id, id, max, max - score, issues, Metrics::new())
    }

    fn skipped(id: &str, max: f64) -> CheckResult {
        CheckResult::unscored(id, id, max, CheckStatus::Skipped, vec![], Metrics::new())
    }

    #[test]
    fn test_all_ok() {
        let results = vec![ok("a", 10.0, 8.0, 0), ok("b", 10.0, 10.0, 0)];
        let s = compute(&results, 20.0, false);
        assert_eq!(s.total_score, 90.0);
        assert_eq!(s.coverage, 100.0);
        assert_eq!(s.scored_max, 20.0);
    }

    #[test]
    fn test_skipped_lowers_coverage_not_score() {
        let results = vec![skipped("lt", 35.0), ok("a", 65.0, 65.0, 0)];
        let s = compute(&results, 100.0, false);
        assert_eq!(s.total_score, 100.0);
        assert_eq!(s.coverage, 65.0);
    }

    #[test]
    fn test_strict_counts_skipped_as_zero() {
        let results = vec![skipped("lt", 35.0), ok("a", 65.0, 65.0, 0)];
        let s = compute(&results, 100.0, true);
        assert_eq!(s.total_score, 65.0);
        assert_eq!(s.coverage, 100.0);
    }

    #[test]
    fn test_nothing_contributes() {
        let s = compute(&[skipped("lt", 35.0)], 100.0, false);
        assert_eq!(s.total_score, 0.0);
        assert_eq!(s.coverage, 0.0);
        assert_eq!(compute(&[], 0.0, false).coverage, 0.0);
    }

    #[test]
    fn test_disabled_checks_lower_coverage() {
        let results = vec![ok("punctuation", 10.0, 9.0, 0), ok("whitespace", 5.0, 4.7, 0)];
        let s = compute(&results, 100.0, false);
        assert_eq!(s.coverage, 15.0);
        assert_eq!(s.configured_max, 100.0);
        assert_eq!(s.total_score, 91.33);
    }

    #[test]
    fn test_budget_truncates_in_order() {
        let mut results = vec![ok("a", 5.0, 5.0, 3), ok("b", 5.0, 5.0, 4), ok("c", 5.0, 5.0, 2)];
        apply_issue_budget(&mut results, 5);
        assert_eq!(results[0].issues.len(), 3);
        assert_eq!(results[1].issues.len(), 2);
        assert_eq!(results[1].metrics["issues_truncated"], json!(2));
        assert!(results[2].issues.is_empty());
        assert_eq!(results[2].metrics["issues_truncated"], json!(2));
    }

    #[test]
    fn test_budget_zero_is_unlimited() {
        let mut results = vec![ok("a", 5.0, 5.0, 30)];
        apply_issue_budget(&mut results, 0);
        assert_eq!(results[0].issues.len(), 30);
        assert!(!results[0].metrics.contains_key("issues_truncated"));
    }

    proptest! {
        #[test]
        fn prop_score_bounds(
            checks in proptest::collection::vec((0.0f64..50.0, 0.0f64..1.0, any::<bool>()), 0..12),
            strict in any::<bool>(),
        ) {
            let results: Vec<CheckResult> = checks
                .iter()
                .enumerate()
                .map(|(i, (max, frac, is_ok))| {
                    let id = format!("c{i}");
                    if *is_ok { ok(&id, *max, max * frac, 0) } else { skipped(&id, *max) }
                })
                .collect();
            let registered: f64 = checks.iter().map(|(max, _, _)| max).sum();
            let s = compute(&results, registered, strict);
            prop_assert!((0.0..=100.0).contains(&s.total_score));
            prop_assert!((0.0..=100.0).contains(&s.coverage));
        }

        #[test]
        fn prop_budget_conserves_issues(
            counts in proptest::collection::vec(0usize..20, 0..8),
            budget in 0usize..60,
        ) {
            let mut results: Vec<CheckResult> = counts
                .iter()
                .enumerate()
                .map(|(i, n)| ok(&format!("c{i}"), 5.0, 5.0, *n))
                .collect();
            apply_issue_budget(&mut results, budget);

            let kept: usize = results.iter().map(|r| r.issues.len()).sum();
            let dropped: usize = results
                .iter()
                .filter_map(|r| r.metrics.get("issues_truncated").and_then(|v| v.as_u64()))
                .sum::<u64>() as usize;
            let total: usize = counts.iter().sum();
            prop_assert_eq!(kept + dropped, total);
            if budget > 0 {
                prop_assert!(kept <= budget);
            }
        }
    }
}
