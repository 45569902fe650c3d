//! Document model
//!
//!     A document is plain text plus two flat arrays: spans, which style a
//!     range of the text or anchor an entity, and entities, which carry the
//!     out-of-line data (link targets, user ids, media metadata).
//!
//!     All positions count extended grapheme clusters, see [`crate::grapheme`].
//!     Documents are values: builders consume and return them, transforms
//!     return new ones.

mod builder;
pub mod document;
pub mod kind;
pub mod wire;

pub use builder::{AudioSpec, ButtonAction, ButtonSpec, FileSpec, ImageSpec, VideoSpec};
pub use document::{Document, Entity, Span, FORWARD_MARKER, JSON_MIME_TYPE, MIME_TYPE};
pub use kind::SpanKind;
