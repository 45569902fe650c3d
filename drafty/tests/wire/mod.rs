//! Wire format tests

use drafty::{parse, Document, Entity, Span, SpanKind, Value};
use serde_json::json;

#[test]
fn test_plain_document_is_raw_text() {
    let doc = Document::from_plain_text("just text");
    assert_eq!(doc.serialize(), "just text");
    assert_eq!(Document::deserialize("just text"), doc);
}

#[test]
fn test_round_trip_preserves_equality() {
    let doc = parse("*hi* @bob, see tinode.co\n`code`");
    let wire = doc.serialize();
    assert_eq!(Document::deserialize(&wire), doc);
}

#[test]
fn test_wire_shape() {
    let doc = parse("hi @bob");
    let json: serde_json::Value = serde_json::from_str(&doc.serialize()).unwrap();
    assert_eq!(
        json,
        json!({
            "txt": "hi @bob",
            "fmt": [{"at": 3, "len": 4, "key": 0}],
            "ent": [{"tp": "MN", "data": {"val": "bob"}}]
        })
    );
}

#[test]
fn test_deserialize_is_lenient() {
    assert_eq!(Document::deserialize("{broken"), Document::from_plain_text("{broken"));
    assert_eq!(Document::deserialize("42"), Document::from_plain_text("42"));
    assert_eq!(
        Document::deserialize(r#""quoted""#),
        Document::from_plain_text("quoted")
    );

    let doc = Document::deserialize(
        r#"{"txt":"abc","fmt":[{"at":0,"len":-2,"tp":"ST"},{"at":1,"len":1,"tp":"EM"}]}"#,
    );
    assert_eq!(doc.spans(), &[Span::styled(SpanKind::Emphasized, 1, 1)]);
}

#[test]
fn test_missing_fields_default() {
    let doc = Document::deserialize(r#"{"fmt":[{"len":1}],"ent":[{"tp":"LN","data":{"url":"x"}}]}"#);
    assert_eq!(doc.text(), "");
    assert_eq!(doc.spans(), &[Span::anchor(0, 1, 0)]);
    assert_eq!(doc.entities(), &[Entity::link("x")]);
}

#[test]
fn test_sentinel_attachment_and_base64_payload() {
    let doc = Document::deserialize(
        r#"{"txt":"","fmt":[{"at":-1}],"ent":[{"tp":"EX","data":{"mime":"text/plain","val":"aGVsbG8="}}]}"#,
    );
    assert_eq!(doc.spans(), &[Span::sentinel(0)]);
    assert_eq!(
        doc.entities()[0].get("val"),
        Some(&Value::Bytes(b"hello".to_vec()))
    );

    let again = Document::deserialize(&doc.serialize());
    assert_eq!(again, doc);
}

#[test]
fn test_unknown_kinds_are_kept() {
    let wire = r#"{"txt":" ","fmt":[{"at":0,"len":1}],"ent":[{"tp":"VC","data":{"state":"missed"}}]}"#;
    let doc = Document::deserialize(wire);
    assert_eq!(doc.entities()[0].kind, SpanKind::Unknown("VC".to_string()));
    assert_eq!(Document::deserialize(&doc.serialize()), doc);
}

#[test]
fn test_serde_integration() {
    let plain = Document::from_plain_text("hey");
    assert_eq!(serde_json::to_string(&plain).unwrap(), r#""hey""#);

    let rich = parse("*hey*");
    let encoded = serde_json::to_string(&rich).unwrap();
    let decoded: Document = serde_json::from_str(&encoded).unwrap();
    assert_eq!(decoded, rich);

    assert!(serde_json::from_str::<Document>("[1, 2]").is_err());
}

#[test]
fn test_references() {
    let doc = Document::from_plain_text("x")
        .attach_file(drafty::FileSpec {
            reference: Some("/v0/file/s/abc".to_string()),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(doc.references(), vec!["/v0/file/s/abc"]);
}
