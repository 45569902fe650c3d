//! Error types for format and document operations

use thiserror::Error;

/// Errors that can occur during format operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormatError {
    /// Format not found in registry
    #[error("Format '{0}' not found")]
    FormatNotFound(String),
    /// Error during parsing
    #[error("Parse error: {0}")]
    ParseError(String),
    /// Error during serialization
    #[error("Serialization error: {0}")]
    SerializationError(String),
    /// Format does not support the operation
    #[error("Operation not supported: {0}")]
    NotSupported(String),
}

/// Errors raised by the document builders.
///
/// Parsing, deserialization and the transforms never fail; only explicit
/// construction with bad arguments does.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftyError {
    #[error("illegal argument: {0}")]
    IllegalArgument(String),
    #[error("invalid index: {0}")]
    InvalidIndex(String),
}
