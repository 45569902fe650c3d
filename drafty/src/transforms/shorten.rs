//! Truncation with an ellipsis.

use crate::common::{to_document, to_tree, top_down, Node};
use crate::grapheme;
use crate::model::Document;
use crate::transforms::light::LightCopy;
use tracing::trace;

/// Appended when text is cut. Counts toward the requested length.
pub const ELLIPSIS: &str = "\u{2026}";

/// Cuts the tree after a number of clusters, in document order.
struct Shortener {
    /// Clusters left before the ellipsis; `None` once the text was cut.
    budget: Option<usize>,
}

impl Shortener {
    fn clip(&mut self, mut node: Node) -> Option<Node> {
        if node.attachment {
            return Some(node);
        }
        let budget = self.budget?;

        let Some(text) = &node.text else {
            if budget == 0 && !node.is_unstyled() && !node.children.is_empty() {
                // Cut right at the start of a styled run: its span would cover
                // the ellipsis alone.
                self.budget = None;
                node.make_plain(ELLIPSIS);
                return Some(node);
            }
            let children = std::mem::take(&mut node.children);
            node.children = children
                .into_iter()
                .filter_map(|child| self.clip(child))
                .collect();
            return Some(node);
        };

        let len = grapheme::length(text);
        if len <= budget {
            self.budget = Some(budget - len);
            return Some(node);
        }

        self.budget = None;
        if budget == 0 {
            // Nothing of this node survives but the ellipsis, which is never styled.
            node.make_plain(ELLIPSIS);
        } else {
            node.text = Some(format!("{}{ELLIPSIS}", grapheme::prefix(text, budget)));
        }
        Some(node)
    }
}

/// Cut `tree` so its text is at most `len` clusters, ellipsis included.
/// Attachments are kept. A tree that already fits is returned unchanged.
pub(crate) fn shorten_tree(tree: Node, len: usize) -> Node {
    if tree.text_len() <= len {
        return tree;
    }
    let mut shortener = Shortener {
        budget: Some(len.saturating_sub(1)),
    };
    shortener.clip(tree).unwrap_or_default()
}

/// Truncate `doc` to at most `preview_len` clusters, the trailing `…` included.
///
/// Spans past the cut are dropped and spans across it are clipped; document
/// attachments always survive. Entities no longer referenced are dropped and
/// the rest renumbered from 0. With `strip_heavy_entities`, entity data is
/// reduced to small metadata fields (see [`crate::transforms::light_data`]).
///
/// A document that already fits is returned as is, apart from the stripping.
pub fn shorten(doc: &Document, preview_len: usize, strip_heavy_entities: bool) -> Document {
    trace!(preview_len, strip_heavy_entities, "shorten");
    if preview_len >= doc.len() {
        if !strip_heavy_entities {
            return doc.clone();
        }
        let (text, spans, mut entities) = doc.clone().into_parts();
        for entity in &mut entities {
            entity.data = crate::transforms::light_data(&entity.data);
        }
        return Document::from_parts(text, spans, entities);
    }

    let mut tree = shorten_tree(to_tree(doc), preview_len);
    if strip_heavy_entities {
        tree = top_down(tree, &mut LightCopy).unwrap_or_default();
    }
    to_document(&tree)
}
