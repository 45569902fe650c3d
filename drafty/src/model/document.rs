//! The document value: text, spans and entities.

use crate::grapheme;
use crate::model::kind::SpanKind;
use crate::value::{EntityData, Value};

/// Mime type of serialized Drafty content.
pub const MIME_TYPE: &str = "text/x-drafty";

/// Mime type of JSON attachments (form responses), never shown to users.
pub const JSON_MIME_TYPE: &str = "application/json";

/// Glyph that starts the "forwarded from" mention of a forwarded message.
pub const FORWARD_MARKER: char = '\u{27A6}';

/// A styled range or an entity anchor.
///
/// Decorative spans have a `kind` and no `entity_ref`; anchor spans have an
/// `entity_ref` and take their kind from the entity. `start == -1` with
/// `length == 0` is the sentinel of a document-scoped attachment.
#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub kind: Option<SpanKind>,
    pub start: isize,
    pub length: usize,
    pub entity_ref: Option<usize>,
}

impl Span {
    pub fn styled(kind: SpanKind, start: usize, length: usize) -> Self {
        Span {
            kind: Some(kind),
            start: start as isize,
            length,
            entity_ref: None,
        }
    }

    pub fn anchor(start: usize, length: usize, entity_ref: usize) -> Self {
        Span {
            kind: None,
            start: start as isize,
            length,
            entity_ref: Some(entity_ref),
        }
    }

    /// Anchor of an attachment that is not tied to any text position.
    pub fn sentinel(entity_ref: usize) -> Self {
        Span {
            kind: None,
            start: -1,
            length: 0,
            entity_ref: Some(entity_ref),
        }
    }

    pub fn is_sentinel(&self) -> bool {
        self.start < 0
    }

    /// Exclusive end position. Sentinels end where they start.
    pub fn end(&self) -> isize {
        if self.is_sentinel() {
            self.start
        } else {
            self.start + self.length as isize
        }
    }
}

/// Out-of-line data referenced by anchor spans.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    pub kind: SpanKind,
    pub data: EntityData,
}

impl Entity {
    pub fn new(kind: SpanKind, data: EntityData) -> Self {
        Entity { kind, data }
    }

    pub fn link(url: impl Into<String>) -> Self {
        Self::with_field(SpanKind::Link, "url", url.into())
    }

    pub fn mention(val: impl Into<String>) -> Self {
        Self::with_field(SpanKind::Mention, "val", val.into())
    }

    pub fn hashtag(val: impl Into<String>) -> Self {
        Self::with_field(SpanKind::Hashtag, "val", val.into())
    }

    fn with_field(kind: SpanKind, key: &str, value: String) -> Self {
        let mut data = EntityData::new();
        data.insert(key.to_string(), Value::String(value));
        Entity { kind, data }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    /// Form responses are attached as JSON and are not user-visible.
    pub fn is_json_attachment(&self) -> bool {
        self.kind == SpanKind::Attachment
            && self.get("mime").and_then(Value::as_str) == Some(JSON_MIME_TYPE)
    }
}

/// A formatted message body.
///
/// Immutable once built: transforms return new documents. Equality treats
/// spans and entities as multisets (see [`PartialEq`] below), so documents
/// whose spans were produced in different orders still compare equal.
#[derive(Debug, Clone, Default)]
pub struct Document {
    text: String,
    spans: Vec<Span>,
    entities: Vec<Entity>,
}

impl Document {
    /// An empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// A document holding `text` as is, without parsing markup.
    pub fn from_plain_text(text: impl Into<String>) -> Self {
        Document {
            text: text.into(),
            spans: Vec::new(),
            entities: Vec::new(),
        }
    }

    /// Assemble a document from its parts. No validation happens here;
    /// malformed spans are skipped when the document is formatted or
    /// transformed.
    pub fn from_parts(text: impl Into<String>, spans: Vec<Span>, entities: Vec<Entity>) -> Self {
        Document {
            text: text.into(),
            spans,
            entities,
        }
    }

    pub fn into_parts(self) -> (String, Vec<Span>, Vec<Entity>) {
        (self.text, self.spans, self.entities)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Length of the text in grapheme clusters.
    pub fn len(&self) -> usize {
        grapheme::length(&self.text)
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty() && self.spans.is_empty() && self.entities.is_empty()
    }

    /// True when the document carries no formatting and can be represented by
    /// its text alone.
    pub fn is_plain(&self) -> bool {
        self.spans.is_empty() && self.entities.is_empty()
    }

    /// The entity an anchor span points to.
    pub fn entity_for(&self, span: &Span) -> Option<&Entity> {
        span.entity_ref.and_then(|key| self.entities.get(key))
    }

    /// Out-of-band references (`ref` and `preref`) of all entities, in entity
    /// order. Uploaded attachments are listed here so the message header can
    /// declare them.
    pub fn references(&self) -> Vec<&str> {
        self.entities
            .iter()
            .flat_map(|e| [e.get("ref"), e.get("preref")])
            .flatten()
            .filter_map(Value::as_str)
            .collect()
    }

    /// Spans in canonical order: ascending start, ties in original order.
    pub fn canonical_spans(&self) -> Vec<Span> {
        let mut spans = self.spans.clone();
        spans.sort_by_key(|s| if s.is_sentinel() { -1 } else { s.start });
        spans
    }

    pub(crate) fn spans_mut(&mut self) -> &mut Vec<Span> {
        &mut self.spans
    }

    pub(crate) fn entities_mut(&mut self) -> &mut Vec<Entity> {
        &mut self.entities
    }

    pub(crate) fn text_mut(&mut self) -> &mut String {
        &mut self.text
    }

    /// Spans with their entity resolved and sentinel positions normalized.
    fn resolved_spans(&self) -> Vec<ResolvedSpan<'_>> {
        self.spans
            .iter()
            .map(|span| {
                let (start, length) = if span.is_sentinel() {
                    (-1, 0)
                } else {
                    (span.start, span.length)
                };
                ResolvedSpan {
                    kind: span.kind.as_ref(),
                    start,
                    length,
                    entity: self.entity_for(span),
                }
            })
            .collect()
    }
}

#[derive(PartialEq)]
struct ResolvedSpan<'a> {
    kind: Option<&'a SpanKind>,
    start: isize,
    length: usize,
    entity: Option<&'a Entity>,
}

/// Multiset comparison. Values hold floats, so no ordering is available;
/// inputs are small enough for the quadratic match.
fn same_multiset<T: PartialEq>(left: &[T], right: &[T]) -> bool {
    if left.len() != right.len() {
        return false;
    }
    let mut used = vec![false; right.len()];
    left.iter().all(|item| {
        match (0..right.len()).find(|&j| !used[j] && right[j] == *item) {
            Some(j) => {
                used[j] = true;
                true
            }
            None => false,
        }
    })
}

impl PartialEq for Document {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
            && same_multiset(&self.resolved_spans(), &other.resolved_spans())
            && same_multiset(&self.entities, &other.entities)
    }
}

impl From<&str> for Document {
    fn from(text: &str) -> Self {
        Document::from_plain_text(text)
    }
}

impl From<String> for Document {
    fn from(text: String) -> Self {
        Document::from_plain_text(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_has_no_markup() {
        let doc = Document::from_plain_text("abc");
        assert!(doc.is_plain());
        assert_eq!(doc.len(), 3);
        assert_eq!(doc.text(), "abc");
    }

    #[test]
    fn equality_ignores_span_and_entity_order() {
        let a = Document::from_parts(
            "hi @bob #tag",
            vec![Span::anchor(3, 4, 0), Span::anchor(8, 4, 1)],
            vec![Entity::mention("bob"), Entity::hashtag("tag")],
        );
        let b = Document::from_parts(
            "hi @bob #tag",
            vec![Span::anchor(8, 4, 0), Span::anchor(3, 4, 1)],
            vec![Entity::hashtag("tag"), Entity::mention("bob")],
        );
        assert_eq!(a, b);
    }

    #[test]
    fn equality_respects_entity_correspondence() {
        let a = Document::from_parts(
            "hi @bob #tag",
            vec![Span::anchor(3, 4, 0), Span::anchor(8, 4, 1)],
            vec![Entity::mention("bob"), Entity::hashtag("tag")],
        );
        // Same spans, entity indices swapped: @bob now points at the hashtag.
        let b = Document::from_parts(
            "hi @bob #tag",
            vec![Span::anchor(3, 4, 1), Span::anchor(8, 4, 0)],
            vec![Entity::mention("bob"), Entity::hashtag("tag")],
        );
        assert_ne!(a, b);
    }

    #[test]
    fn sentinel_positions_are_normalized() {
        let mut wide = Span::sentinel(0);
        wide.length = 1;
        let a = Document::from_parts("", vec![wide], vec![Entity::link("x")]);
        let b = Document::from_parts("", vec![Span::sentinel(0)], vec![Entity::link("x")]);
        assert_eq!(a, b);
    }

    #[test]
    fn references_lists_ref_and_preref() {
        let mut data = EntityData::new();
        data.insert("ref".to_string(), Value::from("/v0/file/s/abc.jpg"));
        data.insert("preref".to_string(), Value::from("/v0/file/s/abc-thumb.jpg"));
        let doc = Document::from_parts(
            " ",
            vec![Span::anchor(0, 1, 0)],
            vec![Entity::new(SpanKind::Image, data)],
        );
        assert_eq!(
            doc.references(),
            vec!["/v0/file/s/abc.jpg", "/v0/file/s/abc-thumb.jpg"]
        );
    }

    #[test]
    fn canonical_order_is_stable() {
        let doc = Document::from_parts(
            "abcdef",
            vec![
                Span::styled(SpanKind::Emphasized, 2, 2),
                Span::styled(SpanKind::Strong, 0, 6),
                Span::styled(SpanKind::Code, 2, 1),
                Span::sentinel(0),
            ],
            vec![Entity::link("x")],
        );
        let kinds: Vec<_> = doc
            .canonical_spans()
            .into_iter()
            .map(|s| s.kind.map(|k| k.code().to_string()))
            .collect();
        assert_eq!(
            kinds,
            vec![
                None,
                Some("ST".to_string()),
                Some("EM".to_string()),
                Some("CO".to_string())
            ]
        );
    }
}
