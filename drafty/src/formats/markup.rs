//! Lightweight markup input format
//!
//! The text a user types into a message composer: `*strong*`, `_emphasized_`,
//! `~deleted~`, `` `code` ``, line breaks, and auto-detected links, mentions and
//! hashtags. See [`crate::parser`] for the grammar.

use crate::error::FormatError;
use crate::format::Format;
use crate::model::Document;

/// Format implementation for typed markup
pub struct MarkupFormat;

impl Format for MarkupFormat {
    fn name(&self) -> &str {
        "markup"
    }

    fn description(&self) -> &str {
        "Message markup with auto-detected links, mentions and hashtags"
    }

    fn file_extensions(&self) -> &[&str] {
        &["txt"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Document, FormatError> {
        Ok(crate::parser::parse(source))
    }
}
