//! Forwarding.

use crate::common::{to_document, to_tree};
use crate::model::Document;
use tracing::trace;

/// `doc` without its leading "forwarded from" mention, so forwarding a
/// forwarded message does not stack headers.
///
/// The mention is removed together with the line breaks and whitespace that
/// follow it; everything after moves left accordingly. Without such a
/// mention the document is returned unchanged.
pub fn forwarded_content(doc: &Document) -> Document {
    let mut tree = to_tree(doc);
    if tree.is_forward_mention() {
        trace!("forwarded_content: document is only a forward header");
        return Document::new();
    }
    if !tree.is_unstyled() || !tree.children.first().is_some_and(|c| c.is_forward_mention()) {
        return doc.clone();
    }

    trace!("forwarded_content: removing forward header");
    tree.children.remove(0);
    tree.trim_start();
    to_document(&tree)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Entity, Span, SpanKind};

    #[test]
    fn header_is_removed_and_offsets_shift() {
        let body = crate::parser::parse("*hi* @bob");
        let doc = Document::forwarded("alice", "usrA", body.clone());
        assert_eq!(doc.text(), "➦ alice hi @bob");

        let out = forwarded_content(&doc);
        assert_eq!(out, body);
        assert_eq!(
            out.spans(),
            &[Span::styled(SpanKind::Strong, 0, 2), Span::anchor(3, 4, 0)]
        );
        assert_eq!(out.entities(), &[Entity::mention("bob")]);
    }

    #[test]
    fn without_header_is_unchanged() {
        let doc = crate::parser::parse("@bob hi");
        assert_eq!(forwarded_content(&doc), doc);
    }

    #[test]
    fn quote_elsewhere_is_kept() {
        let quoted = Document::quote("bob", "usrB", Document::from_plain_text("q"));
        let doc = Document::forwarded("alice", "usrA", quoted.clone());
        assert_eq!(forwarded_content(&doc), quoted);
    }
}
