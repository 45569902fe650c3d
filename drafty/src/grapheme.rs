//! Grapheme cluster arithmetic.
//!
//! Every offset and length in a Drafty document counts extended grapheme
//! clusters (user-perceived characters), never bytes or UTF-16 units. A flag,
//! a skin-toned emoji or a ZWJ family sequence is one unit, and nothing in this
//! crate cuts through one.

use unicode_segmentation::UnicodeSegmentation;

/// Number of grapheme clusters in `text`.
pub fn length(text: &str) -> usize {
    text.graphemes(true).count()
}

/// Byte offset of the grapheme at `index`, or `text.len()` when `index` is at
/// or past the end.
pub fn byte_offset(text: &str, index: usize) -> usize {
    text.grapheme_indices(true)
        .nth(index)
        .map(|(offset, _)| offset)
        .unwrap_or(text.len())
}

/// Substring of `len` clusters starting at cluster `start`. Out of range
/// bounds are clamped to the text.
pub fn slice(text: &str, start: usize, len: usize) -> &str {
    let from = byte_offset(text, start);
    let rest = &text[from..];
    &rest[..byte_offset(rest, len)]
}

/// The first `len` clusters of `text`.
pub fn prefix(text: &str, len: usize) -> &str {
    &text[..byte_offset(text, len)]
}

/// Lookup table from byte offsets to cluster indices.
///
/// Regex matches report byte ranges; the parser uses this to turn them into
/// cluster positions without rescanning the text for every match.
#[derive(Debug, Clone)]
pub struct GraphemeIndex {
    starts: Vec<usize>,
    len_bytes: usize,
}

impl GraphemeIndex {
    pub fn new(text: &str) -> Self {
        GraphemeIndex {
            starts: text.grapheme_indices(true).map(|(i, _)| i).collect(),
            len_bytes: text.len(),
        }
    }

    /// Number of clusters in the indexed text.
    pub fn len(&self) -> usize {
        self.starts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.starts.is_empty()
    }

    /// Index of the cluster containing byte `offset`. A byte offset inside a
    /// cluster maps to that cluster; `len_bytes` maps to `len()`.
    pub fn cluster_at(&self, offset: usize) -> usize {
        if offset >= self.len_bytes {
            return self.starts.len();
        }
        match self.starts.binary_search(&offset) {
            Ok(i) => i,
            Err(i) => i.saturating_sub(1),
        }
    }

    /// Index of the first cluster starting at or after byte `offset`. Used for
    /// exclusive range ends so a match ending mid-cluster still covers it.
    pub fn cluster_end(&self, offset: usize) -> usize {
        if offset >= self.len_bytes {
            return self.starts.len();
        }
        match self.starts.binary_search(&offset) {
            Ok(i) => i,
            Err(i) => i,
        }
    }
}
