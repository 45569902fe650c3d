//! Reply snippets.

use crate::common::{to_document, to_tree, top_down, Node, Transformer};
use crate::model::{Document, SpanKind, FORWARD_MARKER};
use crate::transforms::attachments::MediaBudget;
use crate::transforms::light::LightCopy;
use crate::transforms::shorten::shorten_tree;
use tracing::trace;

/// Drops quotes, flattens line breaks, and reduces the forward header to a
/// bare marker.
struct Reply;

impl Transformer for Reply {
    fn transform(&mut self, mut node: Node, parent: Option<&SpanKind>) -> Option<Node> {
        match &node.kind {
            Some(SpanKind::Quote) => return None,
            Some(SpanKind::LineBreak) => node.make_plain(" "),
            Some(SpanKind::Mention) if parent.is_none() && node.is_forward_mention() => {
                node.text = Some(FORWARD_MARKER.to_string());
                node.children.clear();
                node.data.clear();
                node.entity_ref = None;
            }
            _ => {}
        }
        Some(node)
    }
}

/// The part of `doc` quoted by a reply, at most `length` clusters long.
///
/// Quoted content is removed, line breaks become spaces and a leading
/// "forwarded from" mention becomes a `➦` marker without a target. Media and
/// file entities past the first `max_attachments` are dropped; the rest keep
/// only light metadata.
pub fn reply_content(doc: &Document, length: usize, max_attachments: usize) -> Document {
    trace!(length, max_attachments, "reply_content");
    let tree = to_tree(doc);
    let tree = top_down(tree, &mut Reply).unwrap_or_default();
    let tree = top_down(tree, &mut MediaBudget::new(max_attachments)).unwrap_or_default();
    let tree = shorten_tree(tree, length);
    let tree = top_down(tree, &mut LightCopy).unwrap_or_default();
    to_document(&tree)
}
