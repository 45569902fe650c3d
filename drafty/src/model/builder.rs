//! Document construction.

use crate::error::DraftyError;
use crate::grapheme;
use crate::model::document::{Document, Entity, Span, FORWARD_MARKER, JSON_MIME_TYPE};
use crate::model::kind::SpanKind;
use crate::value::{EntityData, Value};
use std::collections::BTreeMap;

/// An inline image, either as bytes or as a reference to uploaded content.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImageSpec {
    pub mime: Option<String>,
    pub bits: Option<Vec<u8>>,
    pub reference: Option<String>,
    pub width: u32,
    pub height: u32,
    pub name: Option<String>,
    /// Size hint in bytes; defaults to the length of `bits`.
    pub size: Option<usize>,
}

/// An inline audio recording, either as bytes or as a reference to uploaded
/// content.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AudioSpec {
    pub mime: Option<String>,
    pub bits: Option<Vec<u8>>,
    pub reference: Option<String>,
    /// Amplitude preview.
    pub preview: Option<Vec<u8>>,
    /// Duration in milliseconds.
    pub duration: u64,
    pub name: Option<String>,
    pub size: Option<usize>,
}

/// An inline video with an optional poster image.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VideoSpec {
    pub mime: Option<String>,
    pub bits: Option<Vec<u8>>,
    pub reference: Option<String>,
    /// Duration in milliseconds.
    pub duration: u64,
    pub width: u32,
    pub height: u32,
    pub name: Option<String>,
    pub size: Option<usize>,
    pub preview_mime: Option<String>,
    pub preview: Option<Vec<u8>>,
    pub preview_reference: Option<String>,
}

/// What a button does when clicked.
#[derive(Debug, Clone, PartialEq)]
pub enum ButtonAction {
    /// Open `reference`.
    Url,
    /// Send a response to the server.
    Publish,
}

impl ButtonAction {
    fn code(&self) -> &'static str {
        match self {
            ButtonAction::Url => "url",
            ButtonAction::Publish => "pub",
        }
    }
}

/// A button titled by the text it is anchored to.
#[derive(Debug, Clone, PartialEq)]
pub struct ButtonSpec {
    pub action: ButtonAction,
    /// Opaque id returned to the server on click.
    pub name: Option<String>,
    pub value: Option<String>,
    /// Target of a [`ButtonAction::Url`] button.
    pub reference: Option<String>,
}

/// A file attachment, either as bytes or as a reference to uploaded content.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FileSpec {
    pub mime: Option<String>,
    pub bits: Option<Vec<u8>>,
    pub reference: Option<String>,
    pub name: Option<String>,
    pub size: Option<usize>,
}

impl Document {
    /// A document consisting of a single mention of `name`.
    pub fn mention(name: &str, uid: &str) -> Document {
        Document::from_parts(
            name,
            vec![Span::anchor(0, grapheme::length(name), 0)],
            vec![Entity::mention(uid)],
        )
    }

    /// `body` decorated as forwarded from `author_name`: a `➦ name` mention,
    /// a line break, then the body.
    pub fn forwarded(author_name: &str, uid: &str, body: Document) -> Document {
        let decoration = format!("{FORWARD_MARKER} {author_name}");
        Document::mention(&decoration, uid)
            .append_line_break()
            .append(body)
    }

    /// `body` quoted under a mention of its author, wrapped in a Quote span.
    pub fn quote(header: &str, uid: &str, body: Document) -> Document {
        Document::mention(header, uid)
            .append_line_break()
            .append(body)
            .wrap_into(SpanKind::Quote)
    }

    /// Concatenate `other` after this document. Spans of `other` are shifted
    /// past this text and its entity refs past this entity list.
    pub fn append(mut self, other: Document) -> Document {
        let offset = self.len() as isize;
        let key_offset = self.entities().len();
        let (text, spans, entities) = other.into_parts();

        self.text_mut().push_str(&text);
        self.spans_mut().extend(spans.into_iter().map(|mut span| {
            if span.is_sentinel() {
                span.start = -1;
                span.length = 0;
            } else {
                span.start += offset;
            }
            span.entity_ref = span.entity_ref.map(|key| key + key_offset);
            span
        }));
        self.entities_mut().extend(entities);
        self
    }

    pub fn append_line_break(mut self) -> Document {
        let at = self.len();
        self.spans_mut()
            .push(Span::styled(SpanKind::LineBreak, at, 1));
        self.text_mut().push(' ');
        self
    }

    /// Wrap the whole text into one span of `kind`.
    pub fn wrap_into(mut self, kind: SpanKind) -> Document {
        let len = self.len();
        self.spans_mut().push(Span::styled(kind, 0, len));
        self
    }

    /// Anchor an image entity to the character at `at`, which acts as its
    /// placeholder.
    pub fn insert_image(self, at: usize, image: ImageSpec) -> Result<Document, DraftyError> {
        self.check_media(at, "image", image.bits.is_some() || image.reference.is_some())?;

        let size = image.size.or(image.bits.as_ref().map(Vec::len));
        let mut data = EntityData::new();
        put_non_empty(&mut data, "mime", image.mime);
        if let Some(bits) = image.bits {
            data.insert("val".to_string(), Value::Bytes(bits));
        }
        data.insert("width".to_string(), Value::Int(i64::from(image.width)));
        data.insert("height".to_string(), Value::Int(i64::from(image.height)));
        put_non_empty(&mut data, "name", image.name);
        put_non_empty(&mut data, "ref", image.reference);
        put_size(&mut data, size);

        Ok(self.push_anchor(at, 1, SpanKind::Image, data))
    }

    /// Anchor an audio entity to the character at `at`.
    pub fn insert_audio(self, at: usize, audio: AudioSpec) -> Result<Document, DraftyError> {
        self.check_media(at, "audio", audio.bits.is_some() || audio.reference.is_some())?;

        let size = audio.size.or(audio.bits.as_ref().map(Vec::len));
        let mut data = EntityData::new();
        put_non_empty(&mut data, "mime", audio.mime);
        if let Some(bits) = audio.bits {
            data.insert("val".to_string(), Value::Bytes(bits));
        }
        if let Some(preview) = audio.preview {
            data.insert("preview".to_string(), Value::Bytes(preview));
        }
        data.insert("duration".to_string(), Value::Int(audio.duration as i64));
        put_non_empty(&mut data, "name", audio.name);
        put_non_empty(&mut data, "ref", audio.reference);
        put_size(&mut data, size);

        Ok(self.push_anchor(at, 1, SpanKind::Audio, data))
    }

    /// Anchor a video entity to the character at `at`.
    pub fn insert_video(self, at: usize, video: VideoSpec) -> Result<Document, DraftyError> {
        self.check_media(at, "video", video.bits.is_some() || video.reference.is_some())?;

        let size = video.size.or(video.bits.as_ref().map(Vec::len));
        let mut data = EntityData::new();
        put_non_empty(&mut data, "mime", video.mime);
        if let Some(bits) = video.bits {
            data.insert("val".to_string(), Value::Bytes(bits));
        }
        put_non_empty(&mut data, "ref", video.reference);
        data.insert("duration".to_string(), Value::Int(video.duration as i64));
        data.insert("width".to_string(), Value::Int(i64::from(video.width)));
        data.insert("height".to_string(), Value::Int(i64::from(video.height)));
        put_non_empty(&mut data, "name", video.name);
        put_size(&mut data, size);
        put_non_empty(&mut data, "premime", video.preview_mime);
        if let Some(preview) = video.preview {
            data.insert("preview".to_string(), Value::Bytes(preview));
        }
        put_non_empty(&mut data, "preref", video.preview_reference);

        Ok(self.push_anchor(at, 1, SpanKind::Video, data))
    }

    /// A document consisting of a single video call placeholder.
    pub fn video_call() -> Document {
        Document::from_parts(
            " ",
            vec![Span::anchor(0, 1, 0)],
            vec![Entity::new(SpanKind::Unknown("VC".to_string()), EntityData::new())],
        )
    }

    /// Record the outcome of a video call on its entity: `webrtc` becomes
    /// `state` and `webrtc-duration` becomes `duration`. A call stored as a
    /// plain `VC` style is first turned into an entity.
    pub fn update_video_call(&mut self, params: &EntityData, incoming: bool) {
        let video_call = SpanKind::Unknown("VC".to_string());
        let key = self.entities().len();
        let Some(first) = self.spans_mut().first_mut() else {
            return;
        };
        if first.kind.as_ref() == Some(&video_call) {
            first.kind = None;
            first.entity_ref = Some(key);
            self.entities_mut()
                .push(Entity::new(video_call.clone(), EntityData::new()));
        }

        let Some(key) = self.spans().first().and_then(|span| span.entity_ref) else {
            return;
        };
        let Some(entity) = self.entities_mut().get_mut(key) else {
            return;
        };
        if entity.kind != video_call {
            return;
        }
        for (from, to) in [("webrtc", "state"), ("webrtc-duration", "duration")] {
            match params.get(from) {
                Some(value) => entity.data.insert(to.to_string(), value.clone()),
                None => entity.data.remove(to),
            };
        }
        entity
            .data
            .insert("incoming".to_string(), Value::Bool(incoming));
    }

    /// Turn `length` characters starting at `at` into a button.
    pub fn insert_button(
        self,
        at: usize,
        length: usize,
        button: ButtonSpec,
    ) -> Result<Document, DraftyError> {
        if at + length > self.len() {
            return Err(DraftyError::InvalidIndex(format!(
                "button range {at}..{} is outside the text",
                at + length
            )));
        }
        if button.action == ButtonAction::Url && button.reference.is_none() {
            return Err(DraftyError::IllegalArgument(
                "URL buttons require a reference".to_string(),
            ));
        }

        let mut data = EntityData::new();
        data.insert("act".to_string(), Value::from(button.action.code()));
        put_non_empty(&mut data, "name", button.name);
        put_non_empty(&mut data, "val", button.value);
        if button.action == ButtonAction::Url {
            put_non_empty(&mut data, "ref", button.reference);
        }

        Ok(self.push_anchor(at, length, SpanKind::Button, data))
    }

    /// Attach a file to the document as a whole.
    pub fn attach_file(self, file: FileSpec) -> Result<Document, DraftyError> {
        if file.bits.is_none() && file.reference.is_none() {
            return Err(DraftyError::IllegalArgument(
                "either file bits or a reference must be given".to_string(),
            ));
        }

        let size = file.size.or(file.bits.as_ref().map(Vec::len));
        let mut data = EntityData::new();
        put_non_empty(&mut data, "mime", file.mime);
        if let Some(bits) = file.bits {
            data.insert("val".to_string(), Value::Bytes(bits));
        }
        put_non_empty(&mut data, "name", file.name);
        put_non_empty(&mut data, "ref", file.reference);
        put_size(&mut data, size);

        Ok(self.push_attachment(data))
    }

    /// Attach a JSON payload, such as a form response. JSON attachments are
    /// never shown to users.
    pub fn attach_json(self, json: BTreeMap<String, Value>) -> Document {
        let mut data = EntityData::new();
        data.insert("mime".to_string(), Value::from(JSON_MIME_TYPE));
        data.insert("val".to_string(), Value::Map(json));
        self.push_attachment(data)
    }

    fn check_media(&self, at: usize, what: &str, has_content: bool) -> Result<(), DraftyError> {
        if !has_content {
            return Err(DraftyError::IllegalArgument(format!(
                "either {what} bits or a reference must be given"
            )));
        }
        if at >= self.len() {
            return Err(DraftyError::InvalidIndex(format!(
                "insertion position {at} is outside the text"
            )));
        }
        Ok(())
    }

    fn push_anchor(mut self, at: usize, length: usize, kind: SpanKind, data: EntityData) -> Document {
        let key = self.entities().len();
        self.spans_mut().push(Span::anchor(at, length, key));
        self.entities_mut().push(Entity::new(kind, data));
        self
    }

    fn push_attachment(mut self, data: EntityData) -> Document {
        let key = self.entities().len();
        self.spans_mut().push(Span::sentinel(key));
        self.entities_mut()
            .push(Entity::new(SpanKind::Attachment, data));
        self
    }
}

fn put_non_empty(data: &mut EntityData, key: &str, value: Option<String>) {
    if let Some(value) = value.filter(|v| !v.is_empty()) {
        data.insert(key.to_string(), Value::String(value));
    }
}

fn put_size(data: &mut EntityData, size: Option<usize>) {
    if let Some(size) = size.filter(|s| *s > 0) {
        data.insert("size".to_string(), Value::Int(size as i64));
    }
}
