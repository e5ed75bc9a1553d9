//! Error types for conversion operations
//!
//! The conversion pipeline is lenient by design: malformed markdown, unknown
//! HTML tags, and unrecognized node kinds all degrade to best-effort output
//! instead of failing. The variants here cover the few conditions that are
//! genuine defects (schema violations, registry misses) rather than bad
//! input.

use std::fmt;

/// Errors that can occur during conversion operations
#[derive(Debug, Clone, PartialEq)]
pub enum ConvertError {
    /// Format not found in registry
    FormatNotFound(String),
    /// Error during parsing
    ParseError(String),
    /// Error during serialization
    SerializationError(String),
    /// A node kind with no reachable schema rule; a plugin-registration
    /// defect, never a consequence of user input
    SchemaViolation(String),
    /// Format does not support the requested direction
    NotSupported(String),
}

impl fmt::Display for ConvertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConvertError::FormatNotFound(name) => write!(f, "Format '{name}' not found"),
            ConvertError::ParseError(msg) => write!(f, "Parse error: {msg}"),
            ConvertError::SerializationError(msg) => write!(f, "Serialization error: {msg}"),
            ConvertError::SchemaViolation(msg) => write!(f, "Schema violation: {msg}"),
            ConvertError::NotSupported(msg) => write!(f, "Operation not supported: {msg}"),
        }
    }
}

impl std::error::Error for ConvertError {}
