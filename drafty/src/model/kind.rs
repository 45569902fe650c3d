//! Span and entity kinds.

use std::fmt;

/// What a span does: decorate text, or anchor an entity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SpanKind {
    Strong,
    Emphasized,
    Deleted,
    Code,
    LineBreak,
    Link,
    Mention,
    Hashtag,
    Image,
    Audio,
    Video,
    Button,
    Form,
    FormRow,
    Quote,
    Attachment,
    /// Hidden content. Also used for spans whose kind cannot be resolved.
    Header,
    /// A kind this crate does not know, kept verbatim (e.g. `VC`).
    Unknown(String),
}

impl SpanKind {
    /// Two-letter code used on the wire.
    pub fn code(&self) -> &str {
        match self {
            SpanKind::Strong => "ST",
            SpanKind::Emphasized => "EM",
            SpanKind::Deleted => "DL",
            SpanKind::Code => "CO",
            SpanKind::LineBreak => "BR",
            SpanKind::Link => "LN",
            SpanKind::Mention => "MN",
            SpanKind::Hashtag => "HT",
            SpanKind::Image => "IM",
            SpanKind::Audio => "AU",
            SpanKind::Video => "VD",
            SpanKind::Button => "BN",
            SpanKind::Form => "FM",
            SpanKind::FormRow => "RW",
            SpanKind::Quote => "QQ",
            SpanKind::Attachment => "EX",
            SpanKind::Header => "HD",
            SpanKind::Unknown(code) => code,
        }
    }

    /// Parse a wire code. Empty codes have no kind.
    pub fn from_code(code: &str) -> Option<SpanKind> {
        let kind = match code {
            "" => return None,
            "ST" => SpanKind::Strong,
            "EM" => SpanKind::Emphasized,
            "DL" => SpanKind::Deleted,
            "CO" => SpanKind::Code,
            "BR" => SpanKind::LineBreak,
            "LN" => SpanKind::Link,
            "MN" => SpanKind::Mention,
            "HT" => SpanKind::Hashtag,
            "IM" => SpanKind::Image,
            "AU" => SpanKind::Audio,
            "VD" => SpanKind::Video,
            "BN" => SpanKind::Button,
            "FM" => SpanKind::Form,
            "RW" => SpanKind::FormRow,
            "QQ" => SpanKind::Quote,
            "EX" => SpanKind::Attachment,
            "HD" => SpanKind::Header,
            other => SpanKind::Unknown(other.to_string()),
        };
        Some(kind)
    }

    /// Kinds that never have content of their own.
    pub fn is_void(&self) -> bool {
        matches!(
            self,
            SpanKind::LineBreak | SpanKind::Attachment | SpanKind::Header
        )
    }

    /// Media and file kinds, counted against attachment budgets.
    pub fn is_media(&self) -> bool {
        matches!(
            self,
            SpanKind::Image | SpanKind::Audio | SpanKind::Video | SpanKind::Attachment
        )
    }

    /// Tie-break weight for spans covering the same range: heavier spans
    /// become the outer node.
    pub(crate) fn weight(&self) -> u32 {
        match self {
            SpanKind::Quote => 1000,
            _ => 0,
        }
    }
}

impl fmt::Display for SpanKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
