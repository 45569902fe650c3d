//! Tests for the flat <-> nested span tree conversion.

use drafty::common::{to_document, to_tree, Node};
use drafty::{Document, Entity, Span, SpanKind};

fn styled(kind: SpanKind, text: &str) -> Node {
    Node {
        kind: Some(kind),
        text: Some(text.to_string()),
        ..Default::default()
    }
}

#[test]
fn test_nested_markup_tree() {
    let doc = drafty::parse("*bold _italic_*");
    assert_eq!(doc.text(), "bold italic");

    let tree = to_tree(&doc);
    assert_eq!(tree.kind, Some(SpanKind::Strong));
    assert_eq!(
        tree.children,
        vec![Node::text("bold "), styled(SpanKind::Emphasized, "italic")]
    );
}

#[test]
fn test_round_trip_conversion() {
    let doc = drafty::parse("hey @alice, *look* at _tinode.co_ #news\n`x` ~y~");
    assert_eq!(to_document(&to_tree(&doc)), doc);
}

#[test]
fn test_round_trip_with_attachment() {
    let doc = drafty::parse("report attached")
        .attach_file(drafty::FileSpec {
            mime: Some("application/pdf".to_string()),
            reference: Some("https://files.example.com/r.pdf".to_string()),
            name: Some("r.pdf".to_string()),
            size: Some(1024),
            ..Default::default()
        })
        .unwrap();
    let tree = to_tree(&doc);
    assert!(tree.children.last().unwrap().attachment);
    assert_eq!(to_document(&tree), doc);
}

#[test]
fn test_overlapping_spans_first_wins() {
    let doc = Document::from_parts(
        "abcdef",
        vec![
            Span::styled(SpanKind::Emphasized, 0, 3),
            Span::styled(SpanKind::Strong, 2, 4),
        ],
        vec![],
    );
    let flat = to_document(&to_tree(&doc));
    assert_eq!(flat.spans(), &[Span::styled(SpanKind::Emphasized, 0, 3)]);
}

#[test]
fn test_invalid_spans_dropped() {
    let doc = Document::from_parts(
        "abc",
        vec![
            Span::styled(SpanKind::Strong, 1, 10),
            Span::anchor(0, 1, 3),
            Span::styled(SpanKind::Code, 0, 3),
        ],
        vec![Entity::mention("x")],
    );
    let flat = to_document(&to_tree(&doc));
    assert_eq!(flat.text(), "abc");
    assert_eq!(flat.spans(), &[Span::styled(SpanKind::Code, 0, 3)]);
    assert!(flat.entities().is_empty());
}

#[test]
fn test_shared_entity_survives_round_trip() {
    let doc = drafty::parse("x.io then x.io again");
    assert_eq!(doc.entities().len(), 1);

    let flat = to_document(&to_tree(&doc));
    assert_eq!(flat.entities().len(), 1);
    assert_eq!(flat.spans(), &[Span::anchor(0, 4, 0), Span::anchor(10, 4, 0)]);
}
