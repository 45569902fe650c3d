//! Wire representation.
//!
//! ```text
//! { "txt": "hello @alice",
//!   "fmt": [ { "at": 0, "len": 5, "tp": "ST" }, { "at": 6, "len": 6, "key": 0 } ],
//!   "ent": [ { "tp": "MN", "data": { "val": "usrAlice" } } ] }
//! ```
//!
//! A span without `tp` anchors entity `key` (default 0); a span without `key`
//! is decorative. `at: -1` marks a document-scoped attachment. Plain documents
//! travel as a bare JSON string, and the persistence form of a plain document
//! is its text alone.
//!
//! Decoding is lenient: unusable spans and entities are skipped, and input
//! that is not a document at all becomes plain text.

use crate::error::FormatError;
use crate::model::document::{Document, Entity, Span};
use crate::model::kind::SpanKind;
use crate::value::{EntityData, Value};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value as Json};
use std::fmt;
use tracing::debug;

impl Document {
    /// Serialize for storage: raw text for plain documents, wire JSON
    /// otherwise.
    pub fn serialize(&self) -> String {
        if self.is_plain() {
            self.text().to_string()
        } else {
            self.to_json().to_string()
        }
    }

    /// Inverse of [`Document::serialize`]. Never fails: anything that does not
    /// decode as a document is taken as plain text.
    pub fn deserialize(data: &str) -> Document {
        match serde_json::from_str::<Json>(data) {
            Ok(json) => Self::from_json_value(json).unwrap_or_else(|| {
                debug!("wire payload is JSON but not a document, keeping it as text");
                Document::from_plain_text(data)
            }),
            Err(_) => Document::from_plain_text(data),
        }
    }

    /// Byte-oriented variant of [`Document::deserialize`]; invalid UTF-8 is
    /// replaced.
    pub fn deserialize_bytes(data: &[u8]) -> Document {
        Self::deserialize(&String::from_utf8_lossy(data))
    }

    /// Strict decoding of wire JSON, for callers that want to know when the
    /// input is not a document.
    pub fn from_json(data: &str) -> Result<Document, FormatError> {
        let json: Json =
            serde_json::from_str(data).map_err(|e| FormatError::ParseError(e.to_string()))?;
        Self::from_json_value(json).ok_or_else(|| {
            FormatError::ParseError("expected a string or a document object".to_string())
        })
    }

    /// Wire object with spans in canonical order. Always an object, even for
    /// plain documents.
    pub fn to_json(&self) -> Json {
        let mut object = Map::new();
        object.insert("txt".to_string(), Json::String(self.text().to_string()));

        let spans = self.canonical_spans();
        if !spans.is_empty() {
            let fmt = spans.iter().map(span_to_json).collect();
            object.insert("fmt".to_string(), Json::Array(fmt));
        }
        if !self.entities().is_empty() {
            let ent = self.entities().iter().map(entity_to_json).collect();
            object.insert("ent".to_string(), Json::Array(ent));
        }
        Json::Object(object)
    }

    fn from_json_value(json: Json) -> Option<Document> {
        match json {
            Json::String(text) => Some(Document::from_plain_text(text)),
            Json::Object(mut object) => {
                let text = match object.remove("txt") {
                    Some(Json::String(text)) => text,
                    _ => String::new(),
                };
                let spans = match object.remove("fmt") {
                    Some(Json::Array(items)) => items.iter().filter_map(span_from_json).collect(),
                    _ => Vec::new(),
                };
                let entities = match object.remove("ent") {
                    Some(Json::Array(items)) => {
                        items.into_iter().map(entity_from_json).collect()
                    }
                    _ => Vec::new(),
                };
                Some(Document::from_parts(text, spans, entities))
            }
            _ => None,
        }
    }
}

fn span_to_json(span: &Span) -> Json {
    let mut object = Map::new();
    let (at, len) = if span.is_sentinel() {
        (-1, 0)
    } else {
        (span.start as i64, span.length as i64)
    };
    object.insert("at".to_string(), Json::from(at));
    object.insert("len".to_string(), Json::from(len));
    match (&span.kind, span.entity_ref) {
        (Some(kind), _) => {
            object.insert("tp".to_string(), Json::String(kind.code().to_string()));
        }
        (None, Some(key)) => {
            object.insert("key".to_string(), Json::from(key as u64));
        }
        (None, None) => {}
    }
    Json::Object(object)
}

fn entity_to_json(entity: &Entity) -> Json {
    let data = entity
        .data
        .iter()
        .map(|(k, v)| (k.clone(), Json::from(v.clone())))
        .collect();
    let mut object = Map::new();
    object.insert("tp".to_string(), Json::String(entity.kind.code().to_string()));
    object.insert("data".to_string(), Json::Object(data));
    Json::Object(object)
}

fn span_from_json(json: &Json) -> Option<Span> {
    let object = json.as_object()?;
    let at = object.get("at").and_then(Json::as_i64).unwrap_or(0);
    let len = object.get("len").and_then(Json::as_i64).unwrap_or(0);
    let kind = object
        .get("tp")
        .and_then(Json::as_str)
        .and_then(SpanKind::from_code);
    let key = object.get("key").and_then(Json::as_i64);

    if len < 0 {
        debug!(at, len, "dropping span with negative length");
        return None;
    }
    if kind.is_none() && key.is_some_and(|k| k < 0) {
        debug!(at, ?key, "dropping span with negative entity key");
        return None;
    }

    let (start, length) = if at < 0 { (-1, 0) } else { (at as isize, len as usize) };
    let entity_ref = match kind {
        Some(_) => None,
        None => Some(key.unwrap_or(0) as usize),
    };
    Some(Span {
        kind,
        start,
        length,
        entity_ref,
    })
}

fn entity_from_json(json: Json) -> Entity {
    let (kind, data) = match json {
        Json::Object(mut object) => {
            let kind = object
                .get("tp")
                .and_then(Json::as_str)
                .and_then(SpanKind::from_code);
            let data = match object.remove("data") {
                Some(Json::Object(data)) => data
                    .into_iter()
                    .map(|(k, v)| (k, Value::from(v)))
                    .collect::<EntityData>(),
                _ => EntityData::new(),
            };
            (kind, data)
        }
        _ => (None, EntityData::new()),
    };
    // An entity without a usable type is kept (spans index into the list) but
    // renders hidden.
    let kind = kind.unwrap_or(SpanKind::Header);
    Entity::new(kind.clone(), decode_payload(&kind, data))
}

/// Inline media carry their bytes base64-encoded in `val`. Decode once here so
/// the rest of the crate sees raw bytes; a value that does not decode is
/// useless and is dropped.
fn decode_payload(kind: &SpanKind, mut data: EntityData) -> EntityData {
    if !kind.is_media() {
        return data;
    }
    if let Some(val) = data.remove("val") {
        match val.decode_base64() {
            Some(decoded) => {
                data.insert("val".to_string(), decoded);
            }
            None => debug!(%kind, "dropping undecodable entity payload"),
        }
    }
    data
}

impl Serialize for Document {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.is_plain() {
            serializer.serialize_str(self.text())
        } else {
            self.to_json().serialize(serializer)
        }
    }
}

impl<'de> Deserialize<'de> for Document {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let json = Json::deserialize(deserializer)?;
        Document::from_json_value(json)
            .ok_or_else(|| D::Error::custom("expected a string or a document object"))
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_json())
    }
}
