//! Error types for conversion and document loading.

use thiserror::Error;

/// Result type alias for conversion.
pub type ConvertResult<T> = Result<T, ConvertError>;

/// Result type alias for document loading.
pub type LoadResult<T> = Result<T, LoadError>;

/// Error raised by the conversion engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConvertError {
    /// A node's variant is outside the supported set.
    #[error("Zod type {type_name} is not supported (in export '{export_path}')")]
    UnsupportedSchemaKind {
        type_name: String,
        export_path: String,
    },
}

impl ConvertError {
    /// Create an unsupported-kind error. A missing tag is reported as
    /// `<unknown>`.
    pub fn unsupported(type_name: Option<&str>, export_path: impl Into<String>) -> Self {
        ConvertError::UnsupportedSchemaKind {
            type_name: type_name.unwrap_or("<unknown>").to_string(),
            export_path: export_path.into(),
        }
    }
}

/// Error raised while loading a schema document.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The document is not valid JSON or does not have the expected layout.
    #[error("Invalid schema document: {0}")]
    Json(#[from] serde_json::Error),

    /// A node has a recognized type but malformed fields.
    #[error("Invalid schema node at {path}: {message}")]
    InvalidNode { path: String, message: String },

    /// A `$ref` names a definition that does not exist.
    #[error("Reference to unknown definition '{name}'")]
    UnknownReference { name: String },

    /// Definitions reference each other in a loop.
    #[error("Circular reference detected: {}", .cycle.join(" -> "))]
    CircularReference { cycle: Vec<String> },
}

impl LoadError {
    /// Create an invalid-node error.
    pub fn invalid_node(path: impl Into<String>, message: impl Into<String>) -> Self {
        LoadError::InvalidNode {
            path: path.into(),
            message: message.into(),
        }
    }
}
