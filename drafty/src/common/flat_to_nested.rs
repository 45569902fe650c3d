//! Converts the flat span list of a document into a nested span tree.
//!
//! # The High-Level Concept
//!
//! Spans are ranges over the text. Ordered by start, a span that lies fully
//! inside the span before it is its child; the text between spans becomes
//! unstyled leaves. Rebuilding that containment is all it takes to recover
//! the nesting the flat list encodes.
//!
//! # The Algorithm
//!
//! 1. **Resolution:**
//!    - Drop spans with an invalid entity reference or out of the text bounds
//!    - Resolve each anchor span to its entity's kind and data
//!    - Set sentinel spans aside as attachments
//!
//! 2. **Ordering:**
//!    - Sort by start (asc), then end (desc), then kind weight (desc), so a
//!      container always precedes what it contains
//!
//! 3. **Nesting:**
//!    - Walk the sorted list; every span collects the following spans that
//!      fit inside it and recurses into them
//!    - A span that starts inside its predecessor but ends past it overlaps
//!      partially and is dropped; the first span encountered wins
//!    - Zero-length spans survive nesting only for void kinds
//!
//! 4. **Completion:**
//!    - Attachments are appended to the root, after the text
//!    - A cleanup pass unwraps single-child nodes and records button titles

use crate::common::node::{top_down, Node};
use crate::model::{Document, SpanKind};
use crate::value::{EntityData, Value};
use std::cmp::Reverse;
use tracing::debug;
use unicode_segmentation::UnicodeSegmentation;

/// A span checked against the document, with its kind and data resolved.
#[derive(Debug, Clone)]
struct Resolved {
    kind: SpanKind,
    start: usize,
    end: usize,
    entity_ref: Option<usize>,
    data: EntityData,
}

/// Build the span tree of `doc`.
pub fn to_tree(doc: &Document) -> Node {
    let text_len = doc.len();
    let (mut spans, attachments) = resolve(doc, text_len);

    if spans.is_empty() && attachments.is_empty() {
        return Node::text(doc.text());
    }

    spans.sort_by_key(|s| (s.start, Reverse(s.end), Reverse(s.kind.weight())));

    let graphemes: Vec<&str> = doc.text().graphemes(true).collect();
    let mut root = Node::default();
    build(&mut root, &graphemes, 0, text_len, &spans);
    root.children.extend(attachments.into_iter().map(|a| Node {
        kind: Some(a.kind),
        data: a.data,
        entity_ref: a.entity_ref,
        attachment: true,
        ..Default::default()
    }));

    top_down(root, &mut clean).unwrap_or_default()
}

fn resolve(doc: &Document, text_len: usize) -> (Vec<Resolved>, Vec<Resolved>) {
    let mut spans = Vec::new();
    let mut attachments = Vec::new();

    // Wire encoders omit a span whose fields are all zero; a lone entity with
    // no spans is anchored at the start.
    let synthesized;
    let source = if doc.spans().is_empty() && doc.entities().len() == 1 {
        synthesized = [crate::model::Span::anchor(0, 0, 0)];
        &synthesized[..]
    } else {
        doc.spans()
    };

    for span in source {
        let (kind, entity_ref, data) = match (&span.kind, span.entity_ref) {
            (Some(kind), _) => (kind.clone(), None, EntityData::new()),
            (None, Some(key)) => match doc.entities().get(key) {
                Some(entity) => (entity.kind.clone(), Some(key), entity.data.clone()),
                None => {
                    debug!(key, "dropping span with dangling entity reference");
                    continue;
                }
            },
            (None, None) => {
                debug!(start = span.start, "dropping span with neither kind nor entity");
                continue;
            }
        };

        if span.is_sentinel() {
            if entity_ref.is_some() {
                attachments.push(Resolved {
                    kind,
                    start: 0,
                    end: 0,
                    entity_ref,
                    data,
                });
            } else {
                debug!(%kind, "dropping styled span without position");
            }
            continue;
        }

        let start = span.start as usize;
        let end = start + span.length;
        if end > text_len {
            debug!(start, end, text_len, "dropping span past the end of text");
            continue;
        }
        spans.push(Resolved {
            kind,
            start,
            end,
            entity_ref,
            data,
        });
    }
    (spans, attachments)
}

fn leaf(graphemes: &[&str], start: usize, end: usize) -> Node {
    Node::text(graphemes[start..end].concat())
}

/// Fill `parent` with the text `[start, end)` structured by `spans`, which
/// are sorted and lie within the range.
fn build(parent: &mut Node, graphemes: &[&str], start: usize, end: usize, spans: &[Resolved]) {
    if spans.is_empty() {
        if start < end {
            parent.children.push(leaf(graphemes, start, end));
        }
        return;
    }

    let mut cursor = start;
    let mut i = 0;
    while i < spans.len() {
        let span = &spans[i];
        i += 1;

        if cursor < span.start {
            parent.children.push(leaf(graphemes, cursor, span.start));
            cursor = span.start;
        }

        let mut inner = Vec::new();
        while i < spans.len() && spans[i].start < span.end {
            let candidate = &spans[i];
            if candidate.end <= span.end {
                if candidate.start < candidate.end || candidate.kind.is_void() {
                    inner.push(candidate.clone());
                }
            } else {
                debug!(
                    start = candidate.start,
                    end = candidate.end,
                    "dropping span overlapping an earlier one"
                );
            }
            i += 1;
        }

        let mut node = Node {
            kind: Some(span.kind.clone()),
            entity_ref: span.entity_ref,
            data: span.data.clone(),
            ..Default::default()
        };
        if span.start < span.end || !inner.is_empty() {
            build(&mut node, graphemes, span.start, span.end, &inner);
        }
        parent.children.push(node);
        // A partially overlapping span may start before the previous one
        // ends; never step back.
        cursor = cursor.max(span.end);
    }

    if cursor < end {
        parent.children.push(leaf(graphemes, cursor, end));
    }
}

/// Unwrap single children and give buttons their title.
fn clean(mut node: Node, _parent: Option<&SpanKind>) -> Option<Node> {
    while node.is_unstyled() && node.text.is_none() && node.children.len() == 1 {
        node = node.children.remove(0);
    }
    if !node.is_unstyled()
        && node.children.len() == 1
        && node.children[0].is_unstyled()
        && node.children[0].children.is_empty()
    {
        node.text = node.children.remove(0).text;
    }
    if node.is(&SpanKind::Button) {
        if let Some(title) = &node.text {
            node.data
                .insert("title".to_string(), Value::String(title.clone()));
        }
    }
    Some(node)
}
