//! Converts a span tree back into a flat document.
//!
//! # The High-Level Concept
//!
//! Walking the tree in document order and concatenating the text of its
//! leaves reproduces the text. Every styled node covers exactly the text its
//! subtree contributed, so its span is known once the subtree is done.
//!
//! # The Algorithm
//!
//! 1. **Walk:**
//!    - A node with text appends it; otherwise its children are walked
//!
//! 2. **Spans:**
//!    - A styled node becomes a span over what it appended
//!    - A node that appended nothing is dropped, unless it is void, an
//!      attachment, an entity anchor or a collapsed quote marker
//!    - Attachments become sentinel spans
//!
//! 3. **Entities:**
//!    - Entities are emitted on first reference and renumbered from 0; spans
//!      that shared an entity in the source still share one
//!
//! 4. **Completion:**
//!    - Spans are sorted by start, longer spans first

use crate::common::node::Node;
use crate::grapheme;
use crate::model::{Document, Entity, Span, SpanKind};
use std::cmp::Reverse;
use std::collections::HashMap;

#[derive(Default)]
struct Flattener {
    text: String,
    len: usize,
    spans: Vec<Span>,
    entities: Vec<Entity>,
    keymap: HashMap<usize, usize>,
}

impl Flattener {
    fn append(&mut self, node: &Node) {
        let start = self.len;
        match &node.text {
            Some(text) => {
                self.text.push_str(text);
                self.len += grapheme::length(text);
            }
            None => {
                for child in &node.children {
                    self.append(child);
                }
            }
        }

        let Some(kind) = &node.kind else {
            return;
        };
        let length = self.len - start;
        if length == 0 && !keeps_empty(node, kind) {
            return;
        }

        let span = match node.entity_ref {
            Some(old_key) => {
                let key = self.entity_key(old_key, kind, node);
                if node.attachment {
                    Span::sentinel(key)
                } else {
                    Span::anchor(start, length, key)
                }
            }
            None if node.attachment => Span {
                kind: Some(kind.clone()),
                start: -1,
                length: 0,
                entity_ref: None,
            },
            None => Span::styled(kind.clone(), start, length),
        };
        self.spans.push(span);
    }

    fn entity_key(&mut self, old_key: usize, kind: &SpanKind, node: &Node) -> usize {
        if let Some(&key) = self.keymap.get(&old_key) {
            return key;
        }
        let key = self.entities.len();
        self.entities.push(Entity::new(kind.clone(), node.data.clone()));
        self.keymap.insert(old_key, key);
        key
    }
}

fn keeps_empty(node: &Node, kind: &SpanKind) -> bool {
    node.attachment || node.entity_ref.is_some() || kind.is_void() || *kind == SpanKind::Quote
}

/// Rebuild a document from a span tree.
pub fn to_document(root: &Node) -> Document {
    let mut flat = Flattener::default();
    flat.append(root);
    flat.spans
        .sort_by_key(|s| (s.start, Reverse(s.length)));
    Document::from_parts(flat.text, flat.spans, flat.entities)
}
