//! Markdown serialization
//!
//! A [`Formatter`] strategy producing strings. Children are rendered first and
//! concatenated, then wrapped in the markers of the node's kind.

use crate::formatter::{format, Formatter, NodeContext};
use crate::model::{Document, SpanKind};

/// Renders a document as Markdown-like markup.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownFormatter {
    /// Write links as their text only.
    pub plain_links: bool,
}

impl MarkdownFormatter {
    pub fn new(plain_links: bool) -> Self {
        MarkdownFormatter { plain_links }
    }

    fn link(&self, ctx: &NodeContext<'_>, content: String) -> String {
        if self.plain_links {
            return content;
        }
        let Some(url) = ctx.str("url") else {
            return content;
        };
        // Auto-detected from a bare domain: the stored url only adds the scheme.
        if url.strip_prefix("http://") == Some(content.as_str()) {
            format!("_[{content}]({url})_")
        } else {
            format!("[{content}]({url})")
        }
    }
}

fn prefixed(prefix: char, content: String) -> String {
    if content.starts_with(prefix) {
        content
    } else {
        format!("{prefix}{content}")
    }
}

impl Formatter for MarkdownFormatter {
    type Output = String;

    fn text(&mut self, text: &str) -> String {
        text.to_string()
    }

    fn handle(&mut self, ctx: &NodeContext<'_>, children: Vec<String>) -> String {
        let content = children.concat();
        match ctx.kind {
            SpanKind::Strong => format!("*{content}*"),
            SpanKind::Emphasized => format!("_{content}_"),
            SpanKind::Deleted => format!("~{content}~"),
            SpanKind::Code => format!("`{content}`"),
            SpanKind::Link => self.link(ctx, content),
            SpanKind::Mention => prefixed('@', content),
            SpanKind::Hashtag => prefixed('#', content),
            _ => content,
        }
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

/// Render `doc` as Markdown-like markup. With `plain_links`, links are written
/// as their text.
pub fn to_markdown(doc: &Document, plain_links: bool) -> String {
    format(doc, &mut MarkdownFormatter::new(plain_links))
}
