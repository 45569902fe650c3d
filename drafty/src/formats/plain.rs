//! Plain text output format

use crate::error::FormatError;
use crate::format::Format;
use crate::formatter::to_plain_text;
use crate::model::Document;

/// Format implementation for plain text: styles dropped, line breaks kept
pub struct PlainFormat;

impl Format for PlainFormat {
    fn name(&self) -> &str {
        "plain"
    }

    fn description(&self) -> &str {
        "Plain text without styles or attachments"
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        Ok(to_plain_text(doc))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_text_with_newlines() {
        let doc = crate::parser::parse("*a*\nb");
        assert_eq!(PlainFormat.serialize(&doc).unwrap(), "a\nb");
    }

    #[test]
    fn does_not_parse() {
        assert!(matches!(
            PlainFormat.parse("x"),
            Err(FormatError::NotSupported(_))
        ));
    }
}
