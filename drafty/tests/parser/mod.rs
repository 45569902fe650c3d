//! Markup parser tests

use drafty::{parse, Document, Entity, Span, SpanKind, Value};

fn urls(doc: &Document) -> Vec<&str> {
    doc.entities()
        .iter()
        .filter_map(|e| e.get("url").and_then(Value::as_str))
        .collect()
}

#[test]
fn test_plain_text() {
    let doc = parse("abc");
    assert_eq!(doc, Document::from_plain_text("abc"));
    assert!(doc.is_plain());
}

#[test]
fn test_nested_markup() {
    let doc = parse("*bold _italic_*");
    assert_eq!(doc.text(), "bold italic");
    assert_eq!(
        doc,
        Document::from_parts(
            "bold italic",
            vec![
                Span::styled(SpanKind::Emphasized, 5, 6),
                Span::styled(SpanKind::Strong, 0, 11),
            ],
            vec![],
        )
    );
}

#[test]
fn test_mention_and_hashtag() {
    let source = "this is a @mention and a #hashtag in a string";
    let doc = parse(source);
    assert_eq!(doc.text(), source);
    assert_eq!(doc.spans(), &[Span::anchor(10, 8, 0), Span::anchor(25, 8, 1)]);
    assert_eq!(
        doc.entities(),
        &[Entity::mention("mention"), Entity::hashtag("hashtag")]
    );
}

#[test]
fn test_links() {
    let doc = parse("go to https://tinode.co/about or tinode.co");
    assert_eq!(doc.text(), "go to https://tinode.co/about or tinode.co");
    assert_eq!(urls(&doc), vec!["https://tinode.co/about", "http://tinode.co"]);
    assert_eq!(doc.spans(), &[Span::anchor(6, 23, 0), Span::anchor(33, 9, 1)]);
}

#[test]
fn test_line_breaks() {
    let doc = parse("first *line*\r\nsecond\nthird");
    assert_eq!(doc.text(), "first line second third");
    assert!(!doc.text().contains('\n'));
    assert_eq!(
        doc.spans(),
        &[
            Span::styled(SpanKind::Strong, 6, 4),
            Span::styled(SpanKind::LineBreak, 10, 1),
            Span::styled(SpanKind::LineBreak, 17, 1),
        ]
    );
}

#[test]
fn test_markup_does_not_cross_lines() {
    let doc = parse("*open\nclose*");
    assert_eq!(doc.text(), "*open close*");
    assert_eq!(doc.spans(), &[Span::styled(SpanKind::LineBreak, 5, 1)]);
}

#[test]
fn test_same_type_markers_are_greedy() {
    let doc = parse("*a*b*c*");
    assert_eq!(doc.text(), "a*b*c");
    assert_eq!(doc.spans(), &[Span::styled(SpanKind::Strong, 0, 5)]);
}

#[test]
fn test_unmatched_markers_are_literal() {
    let doc = parse("5 * 3 and _half");
    assert!(doc.is_plain());
    assert_eq!(doc.text(), "5 * 3 and _half");
}

#[test]
fn test_offsets_are_grapheme_clusters() {
    let doc = parse("👍🏽 *ok* @друг");
    assert_eq!(doc.text(), "👍🏽 ok @друг");
    assert_eq!(
        doc.spans(),
        &[Span::styled(SpanKind::Strong, 2, 2), Span::anchor(5, 5, 0)]
    );
}

#[test]
fn test_entities_inside_markup() {
    let doc = parse("*call @bob*");
    assert_eq!(doc.text(), "call @bob");
    assert_eq!(
        doc.spans(),
        &[Span::styled(SpanKind::Strong, 0, 9), Span::anchor(5, 4, 0)]
    );
}

#[test]
fn test_code_content_is_verbatim() {
    let doc = parse("`*not bold*`");
    assert_eq!(doc.text(), "*not bold*");
    assert_eq!(doc.spans(), &[Span::styled(SpanKind::Code, 0, 10)]);
}
