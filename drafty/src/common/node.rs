//! Span tree nodes and top-down transformation.

use crate::grapheme;
use crate::model::SpanKind;
use crate::value::EntityData;

/// A node of the span tree.
///
/// A node with no `kind` is unstyled: a plain run of text, or the root
/// container. A node holds either `text` or `children`; when both are set the
/// text wins. `entity_ref` is the index of the entity in the source document,
/// and `data` a copy of that entity's data that transforms may rewrite.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Node {
    pub kind: Option<SpanKind>,
    pub text: Option<String>,
    pub data: EntityData,
    pub entity_ref: Option<usize>,
    pub children: Vec<Node>,
    /// Document-scoped attachment (sentinel span). Always a direct child of
    /// the root, after all other children.
    pub attachment: bool,
}

impl Node {
    /// An unstyled run of text.
    pub fn text(text: impl Into<String>) -> Self {
        Node {
            text: Some(text.into()),
            ..Default::default()
        }
    }

    pub fn is_unstyled(&self) -> bool {
        self.kind.is_none()
    }

    pub fn is(&self, kind: &SpanKind) -> bool {
        self.kind.as_ref() == Some(kind)
    }

    /// Length of the rendered text under this node, in clusters.
    pub fn text_len(&self) -> usize {
        match &self.text {
            Some(text) => grapheme::length(text),
            None => self.children.iter().map(Node::text_len).sum(),
        }
    }

    /// The "forwarded from" mention that starts a forwarded message.
    pub fn is_forward_mention(&self) -> bool {
        self.is(&SpanKind::Mention)
            && self
                .text
                .as_deref()
                .is_some_and(|t| t.starts_with(crate::model::FORWARD_MARKER))
    }

    /// Turn this node into a plain run of `text`, dropping style and entity.
    pub fn make_plain(&mut self, text: impl Into<String>) {
        *self = Node::text(text);
    }

    /// Remove line breaks and whitespace at the start of the rendered text.
    pub fn trim_start(&mut self) {
        if let Some(text) = &mut self.text {
            let trimmed = text.trim_start();
            if trimmed.len() != text.len() {
                *text = trimmed.to_string();
            }
            return;
        }
        while let Some(first) = self.children.first_mut() {
            if first.is(&SpanKind::LineBreak) {
                self.children.remove(0);
                continue;
            }
            if !first.is_unstyled() {
                break;
            }
            first.trim_start();
            if first.text_len() > 0 || !first.children.is_empty() {
                break;
            }
            self.children.remove(0);
        }
    }
}

/// A top-down tree rewrite.
///
/// `transform` sees each node before its children. Returning `None` removes
/// the node with its subtree. `parent` is the kind of the nearest parent, or
/// `None` when the parent is unstyled or the node is the root.
pub trait Transformer {
    fn transform(&mut self, node: Node, parent: Option<&SpanKind>) -> Option<Node>;
}

impl<F> Transformer for F
where
    F: FnMut(Node, Option<&SpanKind>) -> Option<Node>,
{
    fn transform(&mut self, node: Node, parent: Option<&SpanKind>) -> Option<Node> {
        self(node, parent)
    }
}

/// Apply `transformer` to the tree rooted at `node`, parents before children.
pub fn top_down<T: Transformer + ?Sized>(node: Node, transformer: &mut T) -> Option<Node> {
    walk(node, transformer, None)
}

fn walk<T: Transformer + ?Sized>(
    node: Node,
    transformer: &mut T,
    parent: Option<&SpanKind>,
) -> Option<Node> {
    let mut node = transformer.transform(node, parent)?;
    if node.children.is_empty() {
        return Some(node);
    }
    let children = std::mem::take(&mut node.children);
    let kind = node.kind.clone();
    node.children = children
        .into_iter()
        .filter_map(|child| walk(child, transformer, kind.as_ref()))
        .collect();
    Some(node)
}
