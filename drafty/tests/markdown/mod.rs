//! Markdown output tests
//!
//! Markdown is produced by a formatter over the span tree, so these also cover
//! how the formatter walks nested and malformed documents.

use drafty::format::Format;
use drafty::formats::markdown::MarkdownFormat;
use drafty::{parse, to_markdown, Document, Entity, FormatRegistry, Span, SpanKind};
use insta::assert_snapshot;
use std::collections::HashMap;

#[test]
fn test_markup_survives_round_trip() {
    let source = "*Hello* _there_,\n~old~ `new` plan";
    assert_eq!(to_markdown(&parse(source), false), source);
}

#[test]
fn test_links_mentions_hashtags() {
    let doc = parse("ping @alice about #release at https://tinode.co/r and tinode.co");
    assert_snapshot!(
        to_markdown(&doc, false),
        @"ping @alice about #release at [https://tinode.co/r](https://tinode.co/r) and _[tinode.co](http://tinode.co)_"
    );
    assert_snapshot!(
        to_markdown(&doc, true),
        @"ping @alice about #release at https://tinode.co/r and tinode.co"
    );
}

#[test]
fn test_mention_without_marker_gets_one() {
    let doc = Document::from_parts(
        "Alice and news",
        vec![Span::anchor(0, 5, 0), Span::anchor(10, 4, 1)],
        vec![Entity::mention("usrAlice"), Entity::hashtag("news")],
    );
    assert_eq!(to_markdown(&doc, false), "@Alice and #news");
}

#[test]
fn test_quote_renders_content() {
    let doc = Document::quote("Alice", "usrAlice", parse("*old*"))
        .append(Document::from_plain_text("reply"));
    assert_snapshot!(to_markdown(&doc, false), @r"
    @Alice
    *old*reply
    ");
}

#[test]
fn test_malformed_spans_are_skipped() {
    let doc = Document::from_parts(
        "abcdef",
        vec![
            Span::styled(SpanKind::Strong, 0, 4),
            Span::styled(SpanKind::Emphasized, 2, 4),
            Span::styled(SpanKind::Code, 4, 9),
        ],
        vec![],
    );
    assert_eq!(to_markdown(&doc, false), "*abcd*ef");
}

#[test]
fn test_format_options() {
    let doc = parse("see tinode.co");
    let mut options = HashMap::new();
    options.insert("plain-links".to_string(), "true".to_string());
    assert_eq!(
        MarkdownFormat.serialize_with_options(&doc, &options).unwrap(),
        "see tinode.co"
    );

    options.insert("theme".to_string(), "dark".to_string());
    assert!(MarkdownFormat
        .serialize_with_options(&doc, &options)
        .is_err());
}

#[test]
fn test_registry_converts_markup_to_markdown() {
    let registry = FormatRegistry::default();
    let doc = registry.parse("*hi*\nthere", "markup").unwrap();
    assert_eq!(registry.serialize(&doc, "markdown").unwrap(), "*hi*\nthere");
    assert_eq!(registry.serialize(&doc, "plain").unwrap(), "hi\nthere");
}
