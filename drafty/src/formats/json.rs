//! Wire JSON format
//!
//! The form documents are stored and sent in:
//!
//! ```text
//! {"txt": "hi @bob", "fmt": [{"at": 3, "len": 4, "key": 0}], "ent": [{"tp": "MN", "data": {"val": "usr1"}}]}
//! ```
//!
//! Parsing is strict: input that is not JSON, or JSON that is neither a string nor an
//! object, is an error. Use [`Document::deserialize`] for the lenient path.
//!
//! Serialization always writes the object form, even for plain documents, so that the
//! output is valid JSON. The `pretty` option indents it.

use crate::error::FormatError;
use crate::format::{bool_option, check_options, Format};
use crate::model::Document;
use std::collections::HashMap;

/// Format implementation for the wire JSON
pub struct JsonFormat;

impl JsonFormat {
    fn write(doc: &Document, pretty: bool) -> Result<String, FormatError> {
        let json = doc.to_json();
        let written = if pretty {
            serde_json::to_string_pretty(&json)
        } else {
            serde_json::to_string(&json)
        };
        written.map_err(|e| FormatError::SerializationError(e.to_string()))
    }
}

impl Format for JsonFormat {
    fn name(&self) -> &str {
        "json"
    }

    fn description(&self) -> &str {
        "Wire JSON ({txt, fmt, ent})"
    }

    fn file_extensions(&self) -> &[&str] {
        &["json"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Document, FormatError> {
        Document::from_json(source)
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        Self::write(doc, false)
    }

    fn serialize_with_options(
        &self,
        doc: &Document,
        options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        check_options(self.name(), options, &["pretty"])?;
        Self::write(doc, bool_option(options, "pretty")?)
    }
}
