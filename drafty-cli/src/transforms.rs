//! CLI-specific transforms
//!
//! This module maps the transform subcommands onto the library's derived content
//! functions. Each subcommand reads a document, applies one transform and writes the
//! wire JSON of the result.
//!
//! ## Transforms
//!
//! - `shorten`: truncate to `--length` graphemes, ellipsis included
//! - `preview`: one-line preview, at most `--max-attachments` media entities
//! - `reply`: the snippet a reply quotes
//! - `forward`: drop the "forwarded from" header
//!
//! Parameters not given on the command line come from the `[shorten]`, `[preview]`
//! and `[reply]` sections of the configuration.
//!
//! ## Extra Parameters
//!
//! - `pretty`: "true" - indent the JSON output
//!
//! Example: `drafty preview message.json --length 20 --extra-pretty`

use drafty::transforms::{
    forwarded_content, preview_with_attachments, reply_content, shorten,
};
use drafty::Document;
use drafty_config::DraftyConfig;
use std::collections::HashMap;
use tracing::debug;

/// All transform subcommands
pub const AVAILABLE_TRANSFORMS: &[&str] = &["shorten", "preview", "reply", "forward"];

/// Command-line values that take precedence over the configuration
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransformParams {
    pub length: Option<usize>,
    pub max_attachments: Option<usize>,
    pub strip_heavy: Option<bool>,
}

/// Apply a named transform to `doc`
///
/// # Arguments
///
/// * `doc` - The document to transform
/// * `transform_name` - One of [`AVAILABLE_TRANSFORMS`]
/// * `params` - Values from the command line
/// * `config` - Defaults for anything `params` leaves unset
pub fn execute_transform(
    doc: &Document,
    transform_name: &str,
    params: &TransformParams,
    config: &DraftyConfig,
) -> Result<Document, String> {
    debug!(transform = transform_name, ?params, "applying transform");
    match transform_name {
        "shorten" => Ok(shorten(
            doc,
            params.length.unwrap_or(config.shorten.length),
            params.strip_heavy.unwrap_or(config.shorten.strip_heavy),
        )),
        "preview" => Ok(preview_with_attachments(
            doc,
            params.length.unwrap_or(config.preview.length),
            params
                .max_attachments
                .unwrap_or(config.preview.max_attachments),
        )),
        "reply" => Ok(reply_content(
            doc,
            params.length.unwrap_or(config.reply.length),
            params.max_attachments.unwrap_or(config.reply.max_attachments),
        )),
        "forward" => Ok(forwarded_content(doc)),
        other => Err(format!(
            "Unknown transform '{other}'. Available: {}",
            AVAILABLE_TRANSFORMS.join(", ")
        )),
    }
}

/// Render a transform result as wire JSON
pub fn render_wire(doc: &Document, extra_params: &HashMap<String, String>) -> Result<String, String> {
    let pretty = match extra_params.get("pretty") {
        Some(raw) => parse_bool(raw).ok_or_else(|| {
            format!("Invalid boolean value '{raw}' for --extra-pretty")
        })?,
        None => false,
    };
    let json = doc.to_json();
    let rendered = if pretty {
        serde_json::to_string_pretty(&json)
    } else {
        serde_json::to_string(&json)
    };
    rendered.map_err(|e| format!("JSON serialization failed: {e}"))
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.to_lowercase().as_str() {
        "true" | "1" | "yes" | "y" => Some(true),
        "false" | "0" | "no" | "n" => Some(false),
        _ => None,
    }
}
