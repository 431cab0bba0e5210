//! Text preparation shared by every check
//!
//! - `normalize` - canonical form of extracted text
//! - `offsets` - offset to page/line/column resolution
//! - `segment` - lines, sentences and word tokens
//! - `chunk` - overlapping windows for the grammar service
//!
//! All offsets in this crate are UTF-8 byte offsets into the normalized text
//! and always fall on a char boundary. Columns are counted in characters.

pub mod chunk;
pub mod normalize;
pub mod offsets;
pub mod segment;

pub use chunk::text_chunks;
pub use normalize::normalize_text;
pub use offsets::{Location, OffsetIndex};
pub use segment::{split_lines, split_sentences, word_tokens};

/// Largest char boundary `<= offset`, clamped to the text length
pub(crate) fn floor_boundary(text: &str, offset: usize) -> usize {
    let mut o = offset.min(text.len());
    while !text.is_char_boundary(o) {
        o -= 1;
    }
    o
}

/// Smallest char boundary `>= offset`, clamped to the text length
pub(crate) fn ceil_boundary(text: &str, offset: usize) -> usize {
    let mut o = offset.min(text.len());
    while !text.is_char_boundary(o) {
        o += 1;
    }
    o
}
