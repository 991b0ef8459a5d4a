//! Error types for rockext-core

use crate::value::ValueKind;
use thiserror::Error;

/// Result type alias using rockext-core's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Failure while merging two values of the same property.
///
/// `path` is the dotted property path (e.g. `parts.flask/dependencies.plugin`),
/// `base` and `incoming` are the rendered values that collided.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MergeError {
    /// Two layers set different scalar values for the same property
    #[error("Conflicting values for '{path}': existing {base}, incoming {incoming}")]
    Conflict {
        path: String,
        base: String,
        incoming: String,
    },

    /// The two values are of different kinds and cannot be merged
    #[error("Cannot merge {incoming_kind} into {base_kind} at '{path}'")]
    TypeMismatch {
        path: String,
        base_kind: ValueKind,
        incoming_kind: ValueKind,
    },
}

impl MergeError {
    /// Property path the error refers to
    pub fn path(&self) -> &str {
        match self {
            Self::Conflict { path, .. } | Self::TypeMismatch { path, .. } => path,
        }
    }
}

/// Core error types for rockext
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid configuration format
    #[error("Invalid configuration format: {message}")]
    InvalidConfig { message: String },

    /// Document is structurally unusable (e.g. top level is not a mapping)
    #[error("Invalid document: {message}")]
    InvalidDocument { message: String },

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    YamlParse(#[from] serde_yaml_ng::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Merge error
    #[error(transparent)]
    Merge(#[from] MergeError),
}

impl Error {
    /// Create an invalid config error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create an invalid document error
    pub fn invalid_document(message: impl Into<String>) -> Self {
        Self::InvalidDocument {
            message: message.into(),
        }
    }
}
