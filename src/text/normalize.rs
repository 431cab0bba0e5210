//! Canonical form for extracted text

use regex::Regex;
use std::sync::OnceLock;
use unicode_normalization::UnicodeNormalization;

static TRAILING_WS: OnceLock<Regex> = OnceLock::new();

fn trailing_ws() -> &'static Regex {
    TRAILING_WS.get_or_init(|| Regex::new(r"[ \t]+\n").expect("valid regex"))
}

/// Normalize raw extracted text.
///
/// Strips NUL, applies NFC, turns `\r\n` and lone `\r` into `\n`, and drops
/// spaces/tabs right before a line feed. NUL is removed before NFC runs.
pub fn normalize_text(text: &str) -> String {
    let without_nul: String = text.chars().filter(|&c| c != '\0').collect();
    let composed: String = without_nul.nfc().collect();
    let unified = composed.replace("\r\n", "\n").replace('\r', "\n");
    trailing_ws().replace_all(&unified, "\n").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_line_endings_unified() {
        assert_eq!(normalize_text("a\r\nb\rc\n"), "a\nb\nc\n");
    }

    #[test]
    fn test_trailing_whitespace_stripped() {
        assert_eq!(normalize_text("one  \t\ntwo\t\nthree  "), "one\ntwo\nthree  ");
    }

    #[test]
    fn test_nul_removed_and_composed() {
        // e + combining acute separated by NUL composes once NUL is gone
        assert_eq!(normalize_text("e\0\u{301}"), "\u{e9}");
    }

    #[test]
    fn test_form_feed_kept() {
        assert_eq!(normalize_text("page one\x0cpage two"), "page one\x0cpage two");
    }

    proptest! {
        #[test]
        fn prop_normalize_is_idempotent(s in "[ \\t\\r\\na-z\\x00\\x0c\\u{301}\\u{e9}]{0,40}") {
            let once = normalize_text(&s);
            prop_assert_eq!(normalize_text(&once), once);
        }
    }
}
