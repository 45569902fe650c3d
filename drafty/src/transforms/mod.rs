//! Derived content transforms
//!
//!     Every transform takes a document by reference and returns a new one. They all work the
//!     same way: build the span tree (see [`crate::common`]), rewrite it with one or more
//!     [`Transformer`] passes, and flatten it back, which drops what the passes removed and
//!     renumbers the surviving entities from 0.
//!
//!     - [`shorten`]: truncate to a length with a trailing ellipsis
//!     - [`preview`]: one-line preview for chat lists and notifications
//!     - [`reply_content`]: the snippet quoted by a reply
//!     - [`forwarded_content`]: a forwarded message without its "forwarded from" header
//!     - [`to_markdown`]: back to typed markup
//!
//!     Numeric arguments are clamped rather than rejected; none of these fail.

mod attachments;
mod forward;
mod light;
mod preview;
mod reply;
mod shorten;

pub use crate::formats::markdown::to_markdown;
pub use forward::forwarded_content;
pub use light::{light_data, KNOWN_FIELDS, MAX_PREVIEW_DATA_SIZE};
pub use preview::{preview, preview_with_attachments, MAX_PREVIEW_ATTACHMENTS};
pub use reply::reply_content;
pub use shorten::{shorten, ELLIPSIS};

use crate::common::{to_document, to_tree, top_down, Transformer};
use crate::model::Document;

/// Apply a custom top-down `transformer` to the span tree of `doc`.
///
/// ```ignore
/// use drafty::common::Node;
/// use drafty::{transforms, Document, SpanKind};
///
/// let doc = drafty::parse("*loud* and ~gone~");
/// let mut no_deletions = |node: Node, _parent: Option<&SpanKind>| {
///     (!node.is(&SpanKind::Deleted)).then_some(node)
/// };
/// let out = transforms::transform(&doc, &mut no_deletions);
/// assert_eq!(out.text(), "loud and ");
/// ```
pub fn transform<T: Transformer + ?Sized>(doc: &Document, transformer: &mut T) -> Document {
    let tree = to_tree(doc);
    match top_down(tree, transformer) {
        Some(tree) => to_document(&tree),
        None => Document::new(),
    }
}
