//! Line, sentence and word segmentation

use regex::Regex;
use std::sync::OnceLock;

/// Stand-in for a protected period while splitting sentences
const DOT: char = '\u{E000}';
/// Stand-in for a decimal point while splitting sentences
const DECIMAL: char = '\u{E001}';

const ABBREVIATIONS: &[&str] = &[
    "e.g.", "i.e.", "etc.", "vs.", "mr.", "mrs.", "ms.", "dr.", "prof.", "sr.", "jr.", "st.",
    "no.", "fig.", "al.", "inc.", "ltd.", "co.", "u.s.", "u.k.", "jan.", "feb.", "mar.", "apr.",
    "jun.", "jul.", "aug.", "sep.", "sept.", "oct.", "nov.", "dec.",
];

static WORD_RE: OnceLock<Regex> = OnceLock::new();
static WS_RE: OnceLock<Regex> = OnceLock::new();
static ABBREV_RE: OnceLock<Regex> = OnceLock::new();
static DECIMAL_RE: OnceLock<Regex> = OnceLock::new();
static INITIAL_RE: OnceLock<Regex> = OnceLock::new();

fn word_re() -> &'static Regex {
    WORD_RE.get_or_init(|| Regex::new(r"[^\W\d_]+(?:['-][^\W\d_]+)*").expect("valid regex"))
}

fn ws_re() -> &'static Regex {
    WS_RE.get_or_init(|| Regex::new(r"\s+").expect("valid regex"))
}

fn abbrev_re() -> &'static Regex {
    ABBREV_RE.get_or_init(|| {
        let alternation = ABBREVIATIONS
            .iter()
            .map(|a| regex::escape(a))
            .collect::<Vec<_>>()
            .join("|");
        Regex::new(&format!(r"(?i)\b(?:{alternation})")).expect("valid regex")
    })
}

fn decimal_re() -> &'static Regex {
    DECIMAL_RE.get_or_init(|| Regex::new(r"(\d)\.(\d)").expect("valid regex"))
}

fn initial_re() -> &'static Regex {
    INITIAL_RE.get_or_init(|| Regex::new(r"\b([A-Z])\.").expect("valid regex"))
}

/// Split on `\n` and `\f`. The result always has one more entry than there
/// are separators, so it lines up with the offset index.
pub fn split_lines(text: &str) -> Vec<String> {
    text.split(['\n', '\x0c']).map(str::to_string).collect()
}

/// Alphabetic word tokens, allowing inner apostrophes and hyphens
pub fn word_tokens(text: &str) -> Vec<String> {
    word_re()
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Heuristic sentence splitter.
///
/// Whitespace is collapsed first. A boundary is a `.`, `!` or `?` followed by
/// whitespace and then an uppercase ASCII letter or digit, optionally behind
/// an opening quote or bracket. Known abbreviations, single-letter initials
/// and decimal numbers never end a sentence.
pub fn split_sentences(text: &str) -> Vec<String> {
    let collapsed = ws_re().replace_all(text, " ");
    let collapsed = collapsed.trim();
    if collapsed.is_empty() {
        return Vec::new();
    }

    let protected = abbrev_re().replace_all(collapsed, |caps: &regex::Captures| {
        caps[0].replace('.', &DOT.to_string())
    });
    let protected = decimal_re().replace_all(&protected, format!("${{1}}{DECIMAL}${{2}}"));
    let protected = initial_re().replace_all(&protected, format!("${{1}}{DOT}"));

    let chars: Vec<char> = protected.chars().collect();
    let mut sentences = Vec::new();
    let mut current = String::new();
    for (i, &c) in chars.iter().enumerate() {
        if c == ' ' && i > 0 && matches!(chars[i - 1], '.' | '!' | '?') && starts_sentence(&chars[i + 1..]) {
            push_sentence(&mut sentences, &current);
            current.clear();
            continue;
        }
        current.push(c);
    }
    push_sentence(&mut sentences, &current);
    sentences
}

fn starts_sentence(rest: &[char]) -> bool {
    let rest = match rest.first() {
        Some('"' | '\'' | '(' | '[') => &rest[1..],
        _ => rest,
    };
    rest.first()
        .is_some_and(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
}

fn push_sentence(out: &mut Vec<String>, raw: &str) {
    let restored: String = raw
        .chars()
        .map(|c| if c == DOT || c == DECIMAL { '.' } else { c })
        .collect();
    let trimmed = restored.trim();
    if !trimmed.is_empty() {
        out.push(trimmed.to_string());
    }
}
