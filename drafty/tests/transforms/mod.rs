//! Transform tests: shorten, preview, reply and forward.

use drafty::transforms::{preview_with_attachments, MAX_PREVIEW_DATA_SIZE};
use drafty::{
    forwarded_content, parse, preview, reply_content, shorten, Document, Entity, FileSpec,
    ImageSpec, Span, SpanKind, Value,
};
use std::collections::BTreeMap;

fn image(bits: usize) -> ImageSpec {
    ImageSpec {
        mime: Some("image/png".to_string()),
        bits: Some(vec![0x89; bits]),
        width: 640,
        height: 480,
        name: Some("cat.png".to_string()),
        ..Default::default()
    }
}

fn file(name: &str) -> FileSpec {
    FileSpec {
        mime: Some("application/pdf".to_string()),
        reference: Some(format!("/v0/file/s/{name}")),
        name: Some(name.to_string()),
        size: Some(2048),
        ..Default::default()
    }
}

#[test]
fn test_shorten_plain_text() {
    let doc = Document::from_plain_text("This is a plain text string.");
    let short = shorten(&doc, 15, false);
    assert_eq!(short.text(), "This is a plai…");
    assert!(short.is_plain());
}

#[test]
fn test_shorten_keeps_sentinel_image_and_strips_payload() {
    let mut data = BTreeMap::new();
    data.insert("mime".to_string(), Value::from("image/jpeg"));
    data.insert("val".to_string(), Value::Bytes(vec![1; 4096]));
    data.insert("width".to_string(), Value::Int(100));
    data.insert("height".to_string(), Value::Int(80));
    let doc = Document::from_parts(
        "",
        vec![Span::sentinel(0)],
        vec![Entity::new(SpanKind::Image, data)],
    );

    let short = shorten(&doc, 10, true);
    assert_eq!(short.text(), doc.text());
    assert_eq!(short.spans(), doc.spans());
    let entity = &short.entities()[0];
    assert_eq!(entity.get("val"), None);
    assert_eq!(entity.get("mime"), Some(&Value::from("image/jpeg")));
    assert_eq!(entity.get("width"), Some(&Value::Int(100)));
}

#[test]
fn test_shorten_with_entities() {
    let doc = parse("hi @alice, see *tinode.co* and #news");
    let short = shorten(&doc, 12, false);
    assert_eq!(short.text(), "hi @alice, …");
    assert_eq!(short.spans(), &[Span::anchor(3, 6, 0)]);
    assert_eq!(short.entities(), &[Entity::mention("alice")]);
}

#[test]
fn test_shorten_clips_inline_image() {
    let doc = Document::from_plain_text("photo: X and more")
        .insert_image(7, image(10))
        .unwrap();
    let short = shorten(&doc, 9, true);
    assert_eq!(short.text(), "photo: X…");
    assert_eq!(short.spans(), &[Span::anchor(7, 1, 0)]);
    assert_eq!(short.entities()[0].kind, SpanKind::Image);
    assert!(short.entities()[0].get("val").is_some());
}

#[test]
fn test_preview_collapses_quote() {
    let doc = Document::quote("Alice", "usrAlice", parse("what *time*?"))
        .append(parse("at noon"));
    let out = preview(&doc, 25);
    assert_eq!(out.text(), "at noon");
    assert_eq!(out.spans(), &[Span::styled(SpanKind::Quote, 0, 0)]);
    assert!(out.entities().is_empty());
}

#[test]
fn test_preview_limits_attachments() {
    let doc = Document::from_plain_text("files")
        .attach_file(file("a.pdf"))
        .unwrap()
        .attach_json(BTreeMap::from([("resp".to_string(), Value::from("yes"))]))
        .attach_file(file("b.pdf"))
        .unwrap()
        .attach_file(file("c.pdf"))
        .unwrap();

    let out = preview_with_attachments(&doc, 20, 2);
    assert_eq!(out.text(), "files");
    assert_eq!(out.spans(), &[Span::sentinel(0), Span::sentinel(1)]);
    let names: Vec<_> = out
        .entities()
        .iter()
        .filter_map(|e| e.get("name").and_then(Value::as_str))
        .collect();
    assert_eq!(names, vec!["a.pdf", "b.pdf"]);

    assert_eq!(preview(&doc, 20).entities().len(), 3);
}

#[test]
fn test_preview_strips_heavy_data() {
    let doc = Document::from_plain_text(" ")
        .insert_image(0, image(MAX_PREVIEW_DATA_SIZE + 1))
        .unwrap();
    let out = preview(&doc, 10);
    assert_eq!(out.entities()[0].get("val"), None);
    assert_eq!(out.entities()[0].get("name"), Some(&Value::from("cat.png")));
}

#[test]
fn test_reply_content() {
    let quoted = Document::quote("Bob", "usrBob", parse("earlier"));
    let body = parse("line one\nline *two*");
    let doc = Document::forwarded("Alice", "usrAlice", quoted.append(body));

    let out = reply_content(&doc, 14, 3);
    assert_eq!(out.text(), "➦ line one li…");
    assert_eq!(
        out.spans(),
        &[
            Span::styled(SpanKind::Mention, 0, 1),
        ]
    );
    assert!(out.entities().is_empty());
}

#[test]
fn test_reply_content_attachment_budget() {
    let doc = Document::from_plain_text("ab")
        .insert_image(0, image(8))
        .unwrap()
        .insert_image(1, image(8))
        .unwrap()
        .attach_file(file("x.pdf"))
        .unwrap();

    let out = reply_content(&doc, 30, 1);
    assert_eq!(out.text(), "ab");
    assert_eq!(out.spans(), &[Span::anchor(0, 1, 0)]);
    assert_eq!(out.entities().len(), 1);
    assert_eq!(out.entities()[0].kind, SpanKind::Image);
}

#[test]
fn test_reply_content_shared_image_uses_one_slot() {
    let doc = Document::from_parts(
        "ab",
        vec![Span::anchor(0, 1, 0), Span::anchor(1, 1, 0)],
        vec![Entity::new(SpanKind::Image, BTreeMap::new())],
    );

    let out = reply_content(&doc, 30, 1);
    assert_eq!(out.spans(), &[Span::anchor(0, 1, 0), Span::anchor(1, 1, 0)]);
    assert_eq!(out.entities().len(), 1);
}

#[test]
fn test_forwarded_content_shifts_offsets() {
    let body = parse("*see* @bob at tinode.co");
    let doc = Document::forwarded("Alice Smith", "usrAlice", body.clone());
    let prefix = drafty::grapheme::length("➦ Alice Smith") + 1;

    let out = forwarded_content(&doc);
    assert_eq!(out, body);
    for (original, shifted) in doc.canonical_spans().iter().skip(2).zip(out.spans()) {
        assert_eq!(original.start - prefix as isize, shifted.start);
        assert_eq!(original.length, shifted.length);
    }
}

#[test]
fn test_forwarded_content_without_header() {
    let doc = Document::quote("Bob", "usrBob", parse("quoted")).append(parse(" mine"));
    assert_eq!(forwarded_content(&doc), doc);
}

#[test]
fn test_transforms_leave_input_intact() {
    let doc = parse("*keep* me @intact");
    let before = doc.clone();
    let _ = shorten(&doc, 3, true);
    let _ = preview(&doc, 3);
    let _ = reply_content(&doc, 3, 0);
    let _ = forwarded_content(&doc);
    assert_eq!(doc, before);
}
