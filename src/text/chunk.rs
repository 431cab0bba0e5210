//! Overlapping windows over long text
//!
//! Sizes are in UTF-8 bytes, so a window never holds more characters than
//! `max_len`. Windows prefer to end on a newline, then on a space, as long as
//! that boundary lies in the second half of the window.

use super::{ceil_boundary, floor_boundary};

/// Split `text` into `(chunk, start_offset)` windows.
///
/// Text no longer than `max_len` (or `max_len == 0`) is a single chunk. The
/// next window starts `overlap` bytes before the previous one ended, unless
/// that would not move forward, in which case it starts where the previous
/// one ended.
pub fn text_chunks(text: &str, max_len: usize, overlap: usize) -> Vec<(&str, usize)> {
    if max_len == 0 || text.len() <= max_len {
        return vec![(text, 0)];
    }

    let mut chunks = Vec::new();
    let mut start = 0;
    while start < text.len() {
        let mut end = floor_boundary(text, start + max_len);
        if end <= start {
            end = ceil_boundary(text, start + 1);
        }

        if end < text.len() {
            let window = &text[start..end];
            let half = start + max_len / 2;
            let boundary = window
                .rfind('\n')
                .map(|i| start + i)
                .filter(|&b| b > half)
                .or_else(|| window.rfind(' ').map(|i| start + i).filter(|&b| b > half));
            if let Some(b) = boundary {
                end = b;
            }
        }

        chunks.push((&text[start..end], start));
        if end >= text.len() {
            break;
        }

        let next = floor_boundary(text, end.saturating_sub(overlap));
        start = if next > start { next } else { end };
    }
    chunks
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_short_text_is_single_chunk() {
        assert_eq!(text_chunks("hello", 10, 2), vec![("hello", 0)]);
        assert_eq!(text_chunks("hello", 0, 2), vec![("hello", 0)]);
    }

    #[test]
    fn test_prefers_newline_boundary() {
        let text = "aaaa aaaa\nbbbb bbbb cccc";
        let chunks = text_chunks(text, 12, 0);
        assert_eq!(chunks[0], ("aaaa aaaa", 0));
        assert_eq!(chunks[1].1, 9);
    }

    #[test]
    fn test_overlap_repeats_tail() {
        let text = "one two three four five six seven";
        let chunks = text_chunks(text, 10, 4);
        assert!(chunks.len() > 2);
        for pair in chunks.windows(2) {
            let (a, a_start) = pair[0];
            let (_, b_start) = pair[1];
            assert!(b_start > a_start);
            assert!(b_start <= a_start + a.len());
        }
    }

    #[test]
    fn test_oversized_overlap_still_terminates() {
        let text = "x".repeat(50);
        let chunks = text_chunks(&text, 10, 40);
        assert_eq!(chunks.len(), 5);
    }

    proptest! {
        #[test]
        fn prop_chunks_cover_text(
            text in "[a-zé \\n]{0,200}",
            max_len in 1usize..40,
            overlap in 0usize..20,
        ) {
            let chunks = text_chunks(&text, max_len, overlap);
            prop_assert_eq!(chunks[0].1, 0);
            for (chunk, start) in &chunks {
                prop_assert_eq!(&text[*start..*start + chunk.len()], *chunk);
            }
            let (last, last_start) = chunks[chunks.len() - 1];
            prop_assert_eq!(last_start + last.len(), text.len());
            for pair in chunks.windows(2) {
                prop_assert!(pair[1].1 <= pair[0].1 + pair[0].0.len());
            }
        }
    }
}
