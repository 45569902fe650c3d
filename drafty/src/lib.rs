//! Rich-text message bodies
//!
//!     Drafty is the document model of a messaging platform: the text of a message plus
//!     a flat list of styled ranges and a list of out-of-line entities (links, mentions,
//!     hashtags, images, files). It is plain-text first: a message without formatting is
//!     just its text, and every formatted message still has readable text.
//!
//!     TLDR: For users of the crate:
//!         - Build documents with [`parse`] from typed markup, or from the wire with [`Document::deserialize`]
//!         - Render them with a [`Formatter`], or pick an output by name through [`FormatRegistry`]
//!         - Derive previews and reply snippets with the functions in [`transforms`]
//!         - Documents are values: nothing mutates them, every operation returns a new one
//!
//! Architecture
//!
//!     All offsets count extended grapheme clusters, so an emoji built from several code
//!     points is one unit and no operation ever splits one (see ./grapheme.rs).
//!
//!     The file structure :
//!     .
//!     ├── error.rs
//!     ├── grapheme.rs             # Cluster-based length and slicing
//!     ├── value.rs                # JSON-like entity data
//!     ├── model                   # Document, Span, Entity, wire codec, builders
//!     ├── parser                  # Markup and auto-entity detection
//!     ├── common                  # Span tree: flat to nested and back
//!     ├── formatter.rs            # Formatter trait and tree walk
//!     ├── format.rs               # Format trait definition
//!     ├── registry.rs             # FormatRegistry for discovery and selection
//!     ├── formats
//!     │   ├── markup.rs           # Typed markup input
//!     │   ├── json.rs             # Wire JSON in and out
//!     │   ├── markdown            # Markdown-like output
//!     │   └── plain.rs            # Plain text output
//!     ├── transforms              # shorten, preview, reply, forward
//!     └── lib.rs
//!
//!     This is a pure lib: it powers the drafty cli but no code here assumes a shell,
//!     prints, or reads the environment.
//!
//! Core Algorithms
//!
//!     A document stores its structure flat, which is compact on the wire but awkward to
//!     render or edit. Everything that needs structure rebuilds the nesting from the spans
//!     (./common/flat_to_nested.rs), works on that tree, and flattens the result back
//!     (./common/nested_to_flat.rs). Rendering walks the tree bottom up through the
//!     [`Formatter`] trait; transforms rewrite it top down through
//!     [`common::Transformer`].
//!
//!     Malformed input is never an error. Spans out of bounds, pointing at missing
//!     entities, or partially overlapping an earlier span are dropped when the tree is
//!     built; the first span encountered wins.
//!
//! Formats
//!
//!     Input and output formats implement the [`Format`] trait and are listed in a
//!     [`FormatRegistry`]: `markup` (typed text, parse only), `json` (the wire form),
//!     `markdown` and `plain` (serialize only).

pub mod common;
pub mod error;
pub mod format;
pub mod formats;
pub mod formatter;
pub mod grapheme;
pub mod model;
pub mod parser;
pub mod registry;
pub mod transforms;
pub mod value;

pub use error::{DraftyError, FormatError};
pub use format::Format;
pub use formatter::{format, to_plain_text, Formatter, NodeContext, PlainTextFormatter};
pub use model::{
    AudioSpec, ButtonAction, ButtonSpec, Document, Entity, FileSpec, ImageSpec, Span, SpanKind,
    VideoSpec, FORWARD_MARKER, JSON_MIME_TYPE, MIME_TYPE,
};
pub use parser::parse;
pub use registry::FormatRegistry;
pub use transforms::{forwarded_content, preview, reply_content, shorten, to_markdown};
pub use value::{EntityData, Value};
