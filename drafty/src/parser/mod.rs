//! Markup parser
//!
//! # The High-Level Concept
//!
//! Typed input carries a small inline grammar (`*strong*`, `_emphasized_`,
//! `~deleted~`, `` `code` ``) and literal newlines. Parsing strips the markers,
//! records the styled ranges as spans over the stripped text, and then scans
//! the result for links, mentions and hashtags.
//!
//! # The Algorithm
//!
//! 1. **Lines:**
//!    - Split the input on `\n` (a trailing `\r` is dropped)
//!    - Markup never crosses a line
//!
//! 2. **Markup pass** (see [`markup`]):
//!    - Resolve marker pairs per line into spans with line-local offsets
//!
//! 3. **Line breaks:**
//!    - Join the lines with a single space covered by a `LineBreak` span
//!
//! 4. **Entities** (see [`entities`]):
//!    - Detect URLs, `@mentions` and `#hashtags` on the joined text
//!    - Anchor spans cover the matched text; entities are listed left to right
//!
//! The parser never fails. Input without markup produces a plain document.

pub mod entities;
pub mod markup;

use crate::grapheme::GraphemeIndex;
use crate::model::{Document, Span, SpanKind};
use markup::StyledRange;
use tracing::trace;

/// Parse marked-up text into a document.
pub fn parse(content: &str) -> Document {
    let mut text = String::with_capacity(content.len());
    let mut ranges = Vec::new();

    for (index, line) in content.split('\n').enumerate() {
        let line = line.strip_suffix('\r').unwrap_or(line);
        if index > 0 {
            ranges.push(StyledRange {
                kind: SpanKind::LineBreak,
                start: text.len(),
                end: text.len() + 1,
            });
            text.push(' ');
        }

        let (line_text, line_ranges) = markup::render_line(line);
        let base = text.len();
        ranges.extend(line_ranges.into_iter().map(|range| range.shifted(base)));
        text.push_str(&line_text);
    }

    // Cluster positions are measured on the joined text: a line break or a
    // dropped marker may have merged neighbouring clusters.
    let index = GraphemeIndex::new(&text);
    let mut spans: Vec<Span> = ranges.iter().map(|range| range.to_span(&index)).collect();

    let (anchors, found) = entities::extract(&text);
    spans.extend(anchors);
    trace!(spans = spans.len(), entities = found.len(), "parsed markup");
    Document::from_parts(text, spans, found)
}
