//! Format implementations
//!
//! This module contains the formats the registry knows by default:
//!
//! | Name       | Parse | Serialize | Extensions        |
//! |------------|-------|-----------|-------------------|
//! | `markup`   | yes   | no        | `txt`             |
//! | `json`     | yes   | yes       | `json`            |
//! | `markdown` | no    | yes       | `md`, `markdown`  |
//! | `plain`    | no    | yes       | none              |

pub mod json;
pub mod markdown;
pub mod markup;
pub mod plain;

pub use json::JsonFormat;
pub use markdown::MarkdownFormat;
pub use markup::MarkupFormat;
pub use plain::PlainFormat;
