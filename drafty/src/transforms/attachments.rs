//! Attachment budget.

use crate::common::{Node, Transformer};
use crate::model::{SpanKind, JSON_MIME_TYPE};
use crate::value::Value;
use std::collections::HashSet;

/// Keeps the first `max` media and file entities in document order. Spans
/// sharing an entity count once.
///
/// Inline media over the budget lose their entity and become plain text;
/// document attachments over the budget are removed. JSON attachments (form
/// responses) are always removed and do not count.
pub(crate) struct MediaBudget {
    max: usize,
    admitted: HashSet<usize>,
}

impl MediaBudget {
    pub(crate) fn new(max: usize) -> Self {
        MediaBudget {
            max,
            admitted: HashSet::new(),
        }
    }
}

fn is_json_attachment(node: &Node) -> bool {
    node.is(&SpanKind::Attachment)
        && node.data.get("mime").and_then(Value::as_str) == Some(JSON_MIME_TYPE)
}

impl Transformer for MediaBudget {
    fn transform(&mut self, mut node: Node, _parent: Option<&SpanKind>) -> Option<Node> {
        if is_json_attachment(&node) {
            return None;
        }
        let Some(key) = node.entity_ref else {
            return Some(node);
        };
        if !node.kind.as_ref().is_some_and(SpanKind::is_media) {
            return Some(node);
        }
        if self.admitted.contains(&key) {
            return Some(node);
        }
        if self.admitted.len() < self.max {
            self.admitted.insert(key);
            return Some(node);
        }
        if node.attachment {
            return None;
        }
        node.kind = None;
        node.entity_ref = None;
        node.data.clear();
        Some(node)
    }
}
