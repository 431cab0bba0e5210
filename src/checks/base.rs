//! Base check trait and shared context
//!
//! This module defines the core abstractions for document checks:
//! - `Check` trait that all checks implement
//! - `CheckContext`, the read-only analysis context built once per audit
//! - Helpers that turn offsets and lines into located `Issue`s

use crate::config::AuditOptions;
use crate::models::{CheckResult, Issue, Severity};
use crate::text::{
    ceil_boundary, floor_boundary, split_lines, split_sentences, word_tokens, Location,
    OffsetIndex,
};
use anyhow::Result;
use regex::Regex;

/// Default snippet width around a span
pub const SNIPPET_WIDTH: usize = 80;

/// Shared, immutable input to every check
#[derive(Debug, Clone)]
pub struct CheckContext {
    pub text: String,
    pub language: String,
    /// Split on `\n` and `\f`
    pub lines: Vec<String>,
    pub sentences: Vec<String>,
    pub words: Vec<String>,
    pub index: OffsetIndex,
    pub options: AuditOptions,
}

impl CheckContext {
    pub fn build(text: impl Into<String>, language: &str, options: AuditOptions) -> Self {
        let text = text.into();
        Self {
            lines: split_lines(&text),
            sentences: split_sentences(&text),
            words: word_tokens(&text),
            index: OffsetIndex::build(&text),
            language: language.to_string(),
            options,
            text,
        }
    }

    pub fn line_starts(&self) -> &[usize] {
        self.index.line_starts()
    }

    pub fn page_breaks(&self) -> &[usize] {
        self.index.page_breaks()
    }

    /// Word count used as a denominator, never below 1
    pub fn word_denominator(&self) -> usize {
        self.words.len().max(1)
    }

    pub fn max_issues_per_check(&self) -> usize {
        self.options.max_issues_per_check
    }

    pub fn locate(&self, offset: usize) -> Location {
        self.index.locate(&self.text, offset)
    }

    /// Issue located at `start`, with a snippet around `start..end` and the
    /// span itself as highlight
    pub fn issue_from_span(&self, check_id: &str, message: String, start: usize, end: usize) -> Issue {
        let start = floor_boundary(&self.text, start);
        let end = ceil_boundary(&self.text, end.max(start));
        let snippet = snippet_around(&self.text, start, end, SNIPPET_WIDTH);
        let highlight = flatten(&self.text[start..end]);
        let loc = self.locate(start);

        let snippet = (!snippet.is_empty()).then_some(snippet);
        Issue {
            check_id: check_id.to_string(),
            message,
            location: Some(format_location(loc.line, loc.col, snippet.as_deref(), loc.page)),
            severity: Some(Severity::Warning),
            line: Some(loc.line),
            col: Some(loc.col),
            page: loc.page,
            snippet,
            highlight: (!highlight.is_empty()).then_some(highlight),
        }
    }

    /// Issue for a whole line (0-based `line_idx`), positioned at the byte
    /// column `byte_col` inside that line
    pub fn line_issue(
        &self,
        check_id: &str,
        message: &str,
        line_idx: usize,
        byte_col: usize,
        snippet: Option<String>,
        highlight: Option<&str>,
    ) -> Issue {
        let start = self.line_starts().get(line_idx).copied().unwrap_or(0);
        let loc = self.locate(start + byte_col);
        let snippet = snippet.filter(|s| !s.is_empty());
        Issue {
            check_id: check_id.to_string(),
            message: message.to_string(),
            location: Some(format_location(
                loc.line,
                loc.col,
                snippet.as_deref().map(|s| truncate_chars(s, SNIPPET_WIDTH)).as_deref(),
                loc.page,
            )),
            severity: Some(Severity::Warning),
            line: Some(loc.line),
            col: Some(loc.col),
            page: loc.page,
            snippet,
            highlight: highlight.map(str::to_string),
        }
    }

    /// Append up to `max_samples` issues for matches of `re`, never growing
    /// `issues` past the per-check limit. Returns how many were added.
    pub fn add_match_issues<F>(
        &self,
        issues: &mut Vec<Issue>,
        check_id: &str,
        re: &Regex,
        message: F,
        max_samples: usize,
    ) -> usize
    where
        F: Fn(&str) -> String,
    {
        let spans = re.find_iter(&self.text).map(|m| (m.start(), m.end()));
        self.add_span_issues(issues, check_id, spans, message, max_samples)
    }

    /// Like `add_match_issues` for arbitrary `(start, end)` spans
    pub fn add_span_issues<I, F>(
        &self,
        issues: &mut Vec<Issue>,
        check_id: &str,
        spans: I,
        message: F,
        max_samples: usize,
    ) -> usize
    where
        I: IntoIterator<Item = (usize, usize)>,
        F: Fn(&str) -> String,
    {
        let mut added = 0;
        for (start, end) in spans {
            if issues.len() >= self.max_issues_per_check() || added >= max_samples {
                break;
            }
            let msg = message(&self.text[start..end]);
            issues.push(self.issue_from_span(check_id, msg, start, end));
            added += 1;
        }
        added
    }
}

/// A document check
///
/// Checks are pure functions of the context and their weight. They compute
/// metrics, derive a penalty clamped to `[0, weight]`, and attach sample
/// issues located through the offset index.
///
/// # Example Implementation
///
/// ```ignore
/// pub struct ExclamationCheck;
///
/// impl Check for ExclamationCheck {
///     fn id(&self) -> &'static str { "exclamations" }
///     fn name(&self) -> &'static str { "Exclamation marks" }
///     fn default_weight(&self) -> f64 { 5.0 }
///
///     fn run(&self, ctx: &CheckContext, weight: f64) -> Result<CheckResult> {
///         let count = ctx.text.matches('!').count();
///         Ok(CheckResult::scored(self.id(), self.name(), weight, count as f64 * 0.1, vec![], Metrics::new()))
///     }
/// }
/// ```
pub trait Check: Send + Sync {
    /// Stable identifier used on the command line and in reports
    fn id(&self) -> &'static str;

    /// Human-readable name
    fn name(&self) -> &'static str;

    /// Weight in the reference configuration
    fn default_weight(&self) -> f64;

    /// Run the check. Errors become `error` results in the engine.
    fn run(&self, ctx: &CheckContext, weight: f64) -> Result<CheckResult>;
}

/// `Page P, Line L, Col C: snippet` or `Line L, Col C`
pub fn format_location(line: u32, col: u32, snippet: Option<&str>, page: Option<u32>) -> String {
    let base = match page {
        Some(p) => format!("Page {p}, Line {line}, Col {col}"),
        None => format!("Line {line}, Col {col}"),
    };
    match snippet {
        Some(s) if !s.is_empty() => format!("{base}: {s}"),
        _ => base,
    }
}

/// Text around `start..end`, `max(10, width / 2)` bytes each side, on one line
pub fn snippet_around(text: &str, start: usize, end: usize, width: usize) -> String {
    let half = (width / 2).max(10);
    let left = floor_boundary(text, start.saturating_sub(half));
    let right = ceil_boundary(text, end.saturating_add(half));
    flatten(&text[left..right])
}

/// First `n` characters of `s`
pub fn truncate_chars(s: &str, n: usize) -> String {
    s.chars().take(n).collect()
}

/// First `n` characters of `s`, with `...` appended when something was cut
pub fn ellipsize(s: &str, n: usize) -> String {
    if s.chars().count() > n {
        format!("{}...", truncate_chars(s, n))
    } else {
        s.to_string()
    }
}

fn flatten(s: &str) -> String {
    s.replace(['\n', '\x0c'], " ").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(text: &str) -> CheckContext {
        CheckContext::build(text, "en-US", AuditOptions::default())
    }

    #[test]
    fn test_format_location() {
        assert_eq!(format_location(3, 7, None, None), "Line 3, Col 7");
        assert_eq!(
            format_location(3, 7, Some("abc"), Some(2)),
            "Page 2, Line 3, Col 7: abc"
        );
        assert_eq!(format_location(1, 1, Some(""), None), "Line 1, Col 1");
    }

    #[test]
    fn test_snippet_around_flattens() {
        let text = "a".repeat(50) + "\nXYZ\x0c" + &"b".repeat(50);
        let start = text.find("XYZ").unwrap();
        let snippet = snippet_around(&text, start, start + 3, 20);
        assert_eq!(snippet, format!("{} XYZ {}", "a".repeat(9), "b".repeat(9)));
    }

    #[test]
    fn test_issue_from_span_locates() {
        let c = ctx("First line.\nSecond has an error here.");
        let start = c.text.find("error").unwrap();
        let issue = c.issue_from_span("x", "msg".into(), start, start + 5);
        assert_eq!(issue.line, Some(2));
        assert_eq!(issue.col, Some(15));
        assert_eq!(issue.page, None);
        assert_eq!(issue.highlight.as_deref(), Some("error"));
        assert!(issue.location.unwrap().starts_with("Line 2, Col 15: "));
    }

    #[test]
    fn test_issue_on_second_page() {
        let c = ctx("page one\x0cpage two\nbad thing");
        let start = c.text.find("bad").unwrap();
        let issue = c.issue_from_span("x", "msg".into(), start, start + 3);
        assert_eq!(issue.page, Some(2));
        assert_eq!(issue.line, Some(2));
        assert_eq!(issue.col, Some(1));
    }

    #[test]
    fn test_add_match_issues_respects_limits() {
        let mut options = AuditOptions::default();
        options.max_issues_per_check = 2;
        let c = CheckContext::build("a; b; c; d;", "en-US", options);
        let re = Regex::new(";").unwrap();

        let mut issues = Vec::new();
        assert_eq!(c.add_match_issues(&mut issues, "p", &re, |_| "semi".into(), 3), 2);
        assert_eq!(issues.len(), 2);

        let c = ctx("a; b; c; d;");
        let mut issues = Vec::new();
        assert_eq!(c.add_match_issues(&mut issues, "p", &re, |m| format!("got {m}"), 3), 3);
        assert_eq!(issues[0].message, "got ;");
    }

    #[test]
    fn test_line_issue_uses_char_columns() {
        let c = ctx("héllo  world");
        let byte_col = c.lines[0].find("  ").unwrap();
        let issue = c.line_issue("ws", "double", 0, byte_col, Some(c.lines[0].clone()), Some("  "));
        assert_eq!(issue.col, Some(6));
        assert_eq!(issue.highlight.as_deref(), Some("  "));
    }

    #[test]
    fn test_ellipsize() {
        assert_eq!(ellipsize("abcdef", 3), "abc...");
        assert_eq!(ellipsize("abc", 3), "abc");
    }

    #[test]
    fn test_word_denominator_guarded() {
        assert_eq!(ctx("").word_denominator(), 1);
    }
}
