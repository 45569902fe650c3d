//! Stripping heavy entity data.

use crate::common::{Node, Transformer};
use crate::model::SpanKind;
use crate::value::{EntityData, Value};

/// Entity data fields that survive stripping. Anything else is dropped.
pub const KNOWN_FIELDS: [&str; 16] = [
    "act", "duration", "height", "incoming", "mime", "name", "premime", "preview", "preref",
    "ref", "size", "state", "title", "url", "val", "width",
];

/// Strings, arrays and byte values larger than this are dropped.
pub const MAX_PREVIEW_DATA_SIZE: usize = 64;

/// Copy of `data` reduced to small metadata: known fields only, and among
/// them no maps and nothing larger than [`MAX_PREVIEW_DATA_SIZE`].
pub fn light_data(data: &EntityData) -> EntityData {
    KNOWN_FIELDS
        .iter()
        .filter_map(|&key| {
            let value = data.get(key)?;
            if matches!(value, Value::Map(_)) {
                return None;
            }
            if value
                .payload_size()
                .is_some_and(|size| size > MAX_PREVIEW_DATA_SIZE)
            {
                return None;
            }
            Some((key.to_string(), value.clone()))
        })
        .collect()
}

/// Applies [`light_data`] to every node.
pub(crate) struct LightCopy;

impl Transformer for LightCopy {
    fn transform(&mut self, mut node: Node, _parent: Option<&SpanKind>) -> Option<Node> {
        if !node.data.is_empty() {
            node.data = light_data(&node.data);
        }
        Some(node)
    }
}
