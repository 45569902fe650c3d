//! Tree formatting.
//!
//!     A [`Formatter`] turns a document into any output type. [`format`] builds the span tree
//!     and walks it depth first, children before parents: text leaves go to
//!     [`Formatter::text`], styled nodes to [`Formatter::handle`] with the already formatted
//!     children. Void kinds (line breaks, attachments, hidden content) never have children and
//!     go to [`Formatter::void`]; kinds this crate does not know go to [`Formatter::unknown`].
//!
//!     Each call gets a [`NodeContext`] with the node's kind, entity data and the kinds of its
//!     styled ancestors, outermost first, so a strategy can render a link inside a quote
//!     differently from a top-level one.

use crate::common::{to_tree, Node};
use crate::model::{Document, SpanKind};
use crate::value::{EntityData, Value};

/// What a formatter knows about the node it is rendering.
#[derive(Debug, Clone, Copy)]
pub struct NodeContext<'a> {
    pub kind: &'a SpanKind,
    pub data: &'a EntityData,
    /// Index of the entity in the formatted document, for anchor spans.
    pub entity_ref: Option<usize>,
    /// Kinds of the styled ancestors, outermost first.
    pub ancestors: &'a [SpanKind],
    /// Document-scoped attachment rather than an inline span.
    pub attachment: bool,
}

impl NodeContext<'_> {
    /// String field of the entity data.
    pub fn str(&self, key: &str) -> Option<&str> {
        self.data.get(key).and_then(Value::as_str)
    }
}

/// A rendering strategy.
pub trait Formatter {
    type Output;

    /// Render a run of unstyled text.
    fn text(&mut self, text: &str) -> Self::Output;

    /// Render a styled node from its formatted children.
    fn handle(&mut self, ctx: &NodeContext<'_>, children: Vec<Self::Output>) -> Self::Output;

    /// Combine the children of an unstyled container, such as the root.
    fn group(&mut self, children: Vec<Self::Output>) -> Self::Output;

    /// Render a void node.
    fn void(&mut self, ctx: &NodeContext<'_>) -> Self::Output {
        self.handle(ctx, Vec::new())
    }

    /// Render a node of a kind this crate does not know.
    fn unknown(&mut self, ctx: &NodeContext<'_>, children: Vec<Self::Output>) -> Self::Output {
        self.handle(ctx, children)
    }
}

/// Render `doc` with `formatter`.
pub fn format<F: Formatter + ?Sized>(doc: &Document, formatter: &mut F) -> F::Output {
    let tree = to_tree(doc);
    let mut ancestors = Vec::new();
    format_node(&tree, formatter, &mut ancestors)
}

fn format_node<F: Formatter + ?Sized>(
    node: &Node,
    formatter: &mut F,
    ancestors: &mut Vec<SpanKind>,
) -> F::Output {
    let Some(kind) = &node.kind else {
        return match &node.text {
            Some(text) => formatter.text(text),
            None => {
                let children = node
                    .children
                    .iter()
                    .map(|child| format_node(child, formatter, ancestors))
                    .collect();
                formatter.group(children)
            }
        };
    };

    if kind.is_void() {
        let ctx = context(node, kind, ancestors);
        return formatter.void(&ctx);
    }

    ancestors.push(kind.clone());
    let children = match &node.text {
        Some(text) => vec![formatter.text(text)],
        None => node
            .children
            .iter()
            .map(|child| format_node(child, formatter, ancestors))
            .collect(),
    };
    ancestors.pop();

    let ctx = context(node, kind, ancestors);
    match kind {
        SpanKind::Unknown(_) => formatter.unknown(&ctx, children),
        _ => formatter.handle(&ctx, children),
    }
}

fn context<'a>(node: &'a Node, kind: &'a SpanKind, ancestors: &'a [SpanKind]) -> NodeContext<'a> {
    NodeContext {
        kind,
        data: &node.data,
        entity_ref: node.entity_ref,
        ancestors,
        attachment: node.attachment,
    }
}

/// Renders the text only. Line breaks become newlines; attachments and
/// hidden content render nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextFormatter;

impl Formatter for PlainTextFormatter {
    type Output = String;

    fn text(&mut self, text: &str) -> String {
        text.to_string()
    }

    fn handle(&mut self, _ctx: &NodeContext<'_>, children: Vec<String>) -> String {
        children.concat()
    }

    fn group(&mut self, children: Vec<String>) -> String {
        children.concat()
    }

    fn void(&mut self, ctx: &NodeContext<'_>) -> String {
        match ctx.kind {
            SpanKind::LineBreak => "\n".to_string(),
            _ => String::new(),
        }
    }
}

/// Render `doc` as plain text.
pub fn to_plain_text(doc: &Document) -> String {
    format(doc, &mut PlainTextFormatter)
}
