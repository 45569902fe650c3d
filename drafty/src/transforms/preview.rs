//! Previews for chat lists and notifications.

use crate::common::{to_document, to_tree, top_down, Node, Transformer};
use crate::model::{Document, SpanKind, FORWARD_MARKER};
use crate::transforms::attachments::MediaBudget;
use crate::transforms::light::LightCopy;
use crate::transforms::shorten::shorten_tree;
use tracing::trace;

/// Media and file entities kept by [`preview`].
pub const MAX_PREVIEW_ATTACHMENTS: usize = 3;

/// Collapses quotes and the forward header, and flattens line breaks.
struct Preview;

impl Transformer for Preview {
    fn transform(&mut self, mut node: Node, parent: Option<&SpanKind>) -> Option<Node> {
        match &node.kind {
            Some(SpanKind::Quote) => {
                node.text = None;
                node.children.clear();
            }
            Some(SpanKind::LineBreak) => node.make_plain(" "),
            Some(SpanKind::Mention) if parent.is_none() && node.is_forward_mention() => {
                node.text = Some(FORWARD_MARKER.to_string());
                node.children.clear();
            }
            _ => {}
        }
        Some(node)
    }
}

/// A one-line preview of `doc`, at most `preview_len` clusters long.
///
/// Quoted content collapses into an empty Quote marker at its position, line
/// breaks become spaces, and a leading "forwarded from" mention shrinks to
/// the bare `➦`. At most [`MAX_PREVIEW_ATTACHMENTS`] media and file
/// entities are kept, and entity data is stripped of heavy fields.
pub fn preview(doc: &Document, preview_len: usize) -> Document {
    preview_with_attachments(doc, preview_len, MAX_PREVIEW_ATTACHMENTS)
}

/// [`preview`] with an explicit attachment budget.
pub fn preview_with_attachments(
    doc: &Document,
    preview_len: usize,
    max_attachments: usize,
) -> Document {
    trace!(preview_len, max_attachments, "preview");
    let tree = to_tree(doc);
    let tree = top_down(tree, &mut Preview).unwrap_or_default();
    let tree = top_down(tree, &mut MediaBudget::new(max_attachments)).unwrap_or_default();
    let tree = shorten_tree(tree, preview_len);
    let tree = top_down(tree, &mut LightCopy).unwrap_or_default();
    to_document(&tree)
}
