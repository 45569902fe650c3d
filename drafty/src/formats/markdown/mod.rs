//! Markdown output format
//!
//! Renders a document back into the markup a user would type to produce it, which is
//! close to Markdown. Used to prefill an editor when a message is edited, and to copy
//! a message to the clipboard.
//!
//! # Element Mapping Table
//!
//! | Drafty kind     | Output                | Notes                                      |
//! |-----------------|-----------------------|--------------------------------------------|
//! | Strong          | `*text*`              |                                            |
//! | Emphasized      | `_text_`              |                                            |
//! | Deleted         | `~text~`              |                                            |
//! | Code            | `` `text` ``          |                                            |
//! | LineBreak       | newline               |                                            |
//! | Link            | `[text](url)`         | text only with `plain-links`               |
//! | Link (bare)     | `_[text](url)_`       | auto-detected domain, `url = http://text`  |
//! | Mention         | `@text`               | `@` added only when missing                |
//! | Hashtag         | `#text`               | `#` added only when missing                |
//! | Other kinds     | content               |                                            |
//! | Void kinds      | nothing               | attachments, hidden content                |
//!
//! # Lossy Conversions
//!
//! Media, buttons, forms and quotes have no markup, so only their text survives. Parsing
//! the output again recovers styles and auto-detected entities, but not link targets that
//! differ from their text.
//!
//! # Options
//!
//! - `plain-links`: write links as their text only

pub mod serializer;

use crate::error::FormatError;
use crate::format::{bool_option, check_options, Format};
use crate::model::Document;
use std::collections::HashMap;

pub use serializer::{to_markdown, MarkdownFormatter};

/// Format implementation for Markdown-like markup
pub struct MarkdownFormat;

impl Format for MarkdownFormat {
    fn name(&self) -> &str {
        "markdown"
    }

    fn description(&self) -> &str {
        "Markdown-like message markup"
    }

    fn file_extensions(&self) -> &[&str] {
        &["md", "markdown"]
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        Ok(to_markdown(doc, false))
    }

    fn serialize_with_options(
        &self,
        doc: &Document,
        options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        check_options(self.name(), options, &["plain-links"])?;
        Ok(to_markdown(doc, bool_option(options, "plain-links")?))
    }
}
