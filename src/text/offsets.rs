//! Offset resolution
//!
//! Line starts are the offsets right after every `\n` or `\f` (plus 0).
//! Page breaks are the offsets of every `\f`. Both are sorted, which makes
//! every lookup a binary search.

use super::floor_boundary;

/// Resolved position of an offset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    /// 1-based page, `None` when the text has no page breaks
    pub page: Option<u32>,
    /// 1-based line, local to `page` when there is one
    pub line: u32,
    /// 1-based column in characters
    pub col: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OffsetIndex {
    line_starts: Vec<usize>,
    page_breaks: Vec<usize>,
}

impl OffsetIndex {
    pub fn build(text: &str) -> Self {
        let mut line_starts = vec![0];
        let mut page_breaks = Vec::new();
        for (i, b) in text.bytes().enumerate() {
            match b {
                b'\n' => line_starts.push(i + 1),
                0x0c => {
                    line_starts.push(i + 1);
                    page_breaks.push(i);
                }
                _ => {}
            }
        }
        Self {
            line_starts,
            page_breaks,
        }
    }

    pub fn line_starts(&self) -> &[usize] {
        &self.line_starts
    }

    pub fn page_breaks(&self) -> &[usize] {
        &self.page_breaks
    }

    pub fn has_pages(&self) -> bool {
        !self.page_breaks.is_empty()
    }

    /// 0-based index of the line containing `offset`
    fn line_index(&self, offset: usize) -> usize {
        self.line_starts
            .partition_point(|&s| s <= offset)
            .saturating_sub(1)
    }

    /// Global 1-based (line, column)
    pub fn line_col(&self, text: &str, offset: usize) -> (u32, u32) {
        let o = floor_boundary(text, offset);
        let idx = self.line_index(o);
        let start = self.line_starts[idx];
        let col = text[start..o].chars().count() + 1;
        (to_u32(idx + 1), to_u32(col))
    }

    /// 1-based page, counting form feeds strictly before `offset`
    pub fn page(&self, offset: usize) -> u32 {
        to_u32(self.page_breaks.partition_point(|&b| b < offset) + 1)
    }

    /// Page-aware location. Lines are counted from the start of the page.
    pub fn locate(&self, text: &str, offset: usize) -> Location {
        let o = floor_boundary(text, offset);
        let (line, col) = self.line_col(text, o);
        if self.page_breaks.is_empty() {
            return Location {
                page: None,
                line,
                col,
            };
        }

        let page_idx = self.page_breaks.partition_point(|&b| b < o);
        let page_start = if page_idx == 0 {
            0
        } else {
            self.page_breaks[page_idx - 1] + 1
        };
        let first_line = self.line_index(page_start);
        let local_line = (self.line_index(o) + 1).saturating_sub(first_line).max(1);

        Location {
            page: Some(to_u32(page_idx + 1)),
            line: to_u32(local_line),
            col,
        }
    }

    /// Offset of a global 1-based (line, column). Inverse of `line_col`.
    pub fn offset_of(&self, text: &str, line: u32, col: u32) -> Option<usize> {
        let start = *self.line_starts.get((line as usize).checked_sub(1)?)?;
        let steps = (col as usize).checked_sub(1)?;
        let mut chars = text[start..].char_indices();
        match chars.nth(steps) {
            Some((i, _)) => Some(start + i),
            None if text[start..].chars().count() == steps => Some(text.len()),
            None => None,
        }
    }
}

fn to_u32(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_line_starts_and_breaks() {
        let text = "ab\ncd\x0cef\ngh";
        let idx = OffsetIndex::build(text);
        assert_eq!(idx.line_starts(), &[0, 3, 6, 9]);
        assert_eq!(idx.page_breaks(), &[5]);
    }

    #[test]
    fn test_locate_without_pages() {
        let text = "first line\nsecond line";
        let idx = OffsetIndex::build(text);
        let loc = idx.locate(text, text.find("second").unwrap() + 7);
        assert_eq!(loc.page, None);
        assert_eq!((loc.line, loc.col), (2, 8));
    }

    #[test]
    fn test_locate_is_page_local() {
        let text = "p1 a\np1 b\x0cp2 a\np2 b";
        let idx = OffsetIndex::build(text);
        let loc = idx.locate(text, text.find("p2 b").unwrap());
        assert_eq!(loc.page, Some(2));
        assert_eq!((loc.line, loc.col), (2, 1));

        let first = idx.locate(text, 0);
        assert_eq!(first.page, Some(1));
        assert_eq!(first.line, 1);
    }

    #[test]
    fn test_columns_count_characters() {
        let text = "héllo wörld";
        let idx = OffsetIndex::build(text);
        let (_, col) = idx.line_col(text, text.find('w').unwrap());
        assert_eq!(col, 7);
    }

    #[test]
    fn test_offset_past_end_is_clamped() {
        let text = "abc";
        let idx = OffsetIndex::build(text);
        assert_eq!(idx.line_col(text, 100), (1, 4));
    }

    proptest! {
        #[test]
        fn prop_line_col_round_trips(text in "[a-zé \\n\\x0c]{0,60}", pick in 0usize..64) {
            let idx = OffsetIndex::build(&text);
            let offsets: Vec<usize> = text
                .char_indices()
                .map(|(i, _)| i)
                .chain(std::iter::once(text.len()))
                .collect();
            let o = offsets[pick % offsets.len()];
            let (line, col) = idx.line_col(&text, o);
            prop_assert_eq!(idx.offset_of(&text, line, col), Some(o));
        }
    }
}
