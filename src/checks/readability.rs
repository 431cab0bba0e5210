//! Readability: long sentences and Flesch reading ease

use super::base::{ellipsize, Check, CheckContext};
use crate::models::{round2, CheckResult, Issue, Metrics};
use crate::text::word_tokens;
use anyhow::Result;
use regex::Regex;
use serde_json::json;

/// Sentences with more words than this are flagged
pub const LONG_SENTENCE_WORDS: usize = 30;

/// Leading words used to find a sentence again in the text
const ANCHOR_WORDS: usize = 8;

pub struct ReadabilityCheck;

impl Check for ReadabilityCheck {
    fn id(&self) -> &'static str {
        "readability"
    }

    fn name(&self) -> &'static str {
        "Readability"
    }

    fn default_weight(&self) -> f64 {
        10.0
    }

    fn run(&self, ctx: &CheckContext, weight: f64) -> Result<CheckResult> {
        let lengths: Vec<usize> = ctx.sentences.iter().map(|s| word_tokens(s).len()).collect();
        let avg = if lengths.is_empty() {
            0.0
        } else {
            lengths.iter().sum::<usize>() as f64 / lengths.len() as f64
        };
        let long: Vec<&String> = ctx
            .sentences
            .iter()
            .zip(&lengths)
            .filter(|(_, n)| **n > LONG_SENTENCE_WORDS)
            .map(|(s, _)| s)
            .collect();

        let mut metrics = Metrics::new();
        metrics.insert("avg_sentence_length_words".into(), json!(round2(avg)));
        metrics.insert("long_sentences_over_30_words".into(), json!(long.len()));
        metrics.insert("word_count".into(), json!(ctx.words.len()));
        metrics.insert("sentence_count".into(), json!(ctx.sentences.len()));
        if let Some(fre) = flesch_reading_ease(&ctx.words, ctx.sentences.len()) {
            metrics.insert("flesch_reading_ease".into(), json!(round2(fre)));
        }
        metrics.insert(
            "scoring_notes".into(),
            json!("0.5 points per sentence over 30 words (capped)."),
        );

        let mut issues = Vec::new();
        let mut cursor = 0;
        for sentence in long.iter().take(3.min(ctx.max_issues_per_check())) {
            let message = "Very long sentence (over 30 words). Consider splitting.";
            match sentence_anchor(&ctx.text, sentence, cursor)? {
                Some((start, end)) => {
                    cursor = end;
                    issues.push(ctx.issue_from_span(self.id(), message.to_string(), start, end));
                }
                None => issues.push(Issue {
                    snippet: Some(ellipsize(sentence, 200)),
                    ..Issue::note(self.id(), message)
                }),
            }
        }

        Ok(CheckResult::scored(
            self.id(),
            self.name(),
            weight,
            0.5 * long.len() as f64,
            issues,
            metrics,
        ))
    }
}

/// Span of the sentence's leading words in `text`, searching from `from`.
/// Sentences are whitespace-collapsed, so words may be separated by any
/// whitespace in the original.
fn sentence_anchor(text: &str, sentence: &str, from: usize) -> Result<Option<(usize, usize)>> {
    let words: Vec<String> = sentence
        .split_whitespace()
        .take(ANCHOR_WORDS)
        .map(regex::escape)
        .collect();
    if words.is_empty() || from > text.len() || !text.is_char_boundary(from) {
        return Ok(None);
    }
    let re = Regex::new(&words.join(r"\s+"))?;
    Ok(re.find(&text[from..]).map(|m| (from + m.start(), from + m.end())))
}

/// Flesch reading ease with a vowel-group syllable estimate
fn flesch_reading_ease(words: &[String], sentences: usize) -> Option<f64> {
    if words.is_empty() {
        return None;
    }
    let syllables: usize = words.iter().map(|w| syllables(w)).sum();
    let w = words.len() as f64;
    let s = sentences.max(1) as f64;
    Some(206.835 - 1.015 * (w / s) - 84.6 * (syllables as f64 / w))
}

fn syllables(word: &str) -> usize {
    let lower = word.to_lowercase();
    let mut count = 0;
    let mut prev_vowel = false;
    for c in lower.chars() {
        let vowel = matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'y');
        if vowel && !prev_vowel {
            count += 1;
        }
        prev_vowel = vowel;
    }
    if lower.ends_with('e') && !lower.ends_with("le") && count > 1 {
        count -= 1;
    }
    count.max(1)
}
