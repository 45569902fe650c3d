//! Property tests for truncation.

use drafty::{parse, shorten, Document, Entity, Span, SpanKind};
use proptest::prelude::*;
use std::collections::BTreeSet;

/// Markup-ish input: words, markers, mentions, emoji and newlines.
fn markup() -> impl Strategy<Value = String> {
    let token = prop_oneof![
        "[a-z]{1,6}",
        Just(" ".to_string()),
        "[*_~`]",
        Just("\n".to_string()),
        "@[a-z]{2,5}",
        "#[a-z]{2,5}",
        Just("tinode.co".to_string()),
        Just("👨‍👩‍👧".to_string()),
    ];
    prop::collection::vec(token, 0..24).prop_map(|tokens| tokens.concat())
}

/// A parsed document, sometimes with a document-level attachment.
fn document() -> impl Strategy<Value = Document> {
    (markup(), any::<bool>()).prop_map(|(source, attach)| {
        let doc = parse(&source);
        if attach {
            doc.attach_file(drafty::FileSpec {
                mime: Some("text/plain".to_string()),
                bits: Some(vec![b'x'; 100]),
                ..Default::default()
            })
            .unwrap()
        } else {
            doc
        }
    })
}

fn referenced_keys(doc: &Document) -> BTreeSet<usize> {
    doc.spans().iter().filter_map(|s| s.entity_ref).collect()
}

proptest! {
    #[test]
    fn shortened_length_is_bounded(doc in document(), n in 0usize..40) {
        let short = shorten(&doc, n, false);
        if n < doc.len() {
            prop_assert!(short.len() <= n);
            prop_assert!(short.text().ends_with('…'));
        } else {
            prop_assert_eq!(&short, &doc);
        }
    }

    #[test]
    fn shorten_is_idempotent(doc in document(), n in 0usize..40) {
        let once = shorten(&doc, n, true);
        prop_assert_eq!(shorten(&once, n, true), once);
    }

    #[test]
    fn entity_keys_are_contiguous(doc in document(), n in 0usize..40) {
        let short = shorten(&doc, n, false);
        let keys = referenced_keys(&short);
        prop_assert_eq!(keys, (0..short.entities().len()).collect::<BTreeSet<_>>());
    }

    #[test]
    fn spans_stay_in_bounds(doc in document(), n in 0usize..40) {
        let short = shorten(&doc, n, false);
        let len = short.len() as isize;
        for span in short.spans() {
            prop_assert!(span.is_sentinel() || span.end() <= len);
        }
    }

    #[test]
    fn sentinel_always_survives(source in markup(), n in 0usize..40) {
        let doc = Document::from_parts(
            "",
            vec![Span::sentinel(0)],
            vec![Entity::new(SpanKind::Attachment, Default::default())],
        )
        .append(parse(&source));
        let short = shorten(&doc, n, true);
        prop_assert_eq!(short.spans().iter().filter(|s| s.is_sentinel()).count(), 1);
    }
}
