//! Error types for extension registration and processing

use rockext_core::MergeError;
use thiserror::Error;

/// Result type alias for extension operations
pub type Result<T> = std::result::Result<T, ExtensionError>;

/// Errors raised by the registry, by extensions, and while applying them
#[derive(Error, Debug)]
pub enum ExtensionError {
    /// An extension with this name is already registered
    #[error("Extension already registered: {name}")]
    DuplicateName { name: String },

    /// No extension with this name is registered
    #[error("Extension not found: {name}")]
    NotFound { name: String },

    /// The document's base is not one the extension supports
    #[error("Extension '{extension}' does not support base: {base} (supported: {})", .supported.join(", "))]
    UnsupportedBase {
        extension: String,
        base: String,
        supported: Vec<String>,
    },

    /// The extension is experimental and experimental extensions were not enabled
    #[error("Extension is experimental: '{extension}' (base: {base}); enable experimental extensions to use it")]
    ExperimentalNotEnabled { extension: String, base: String },

    /// A prerequisite resource of the extension is missing or invalid
    #[error("Extension '{extension}' requires {resource}: {message}")]
    Validation {
        extension: String,
        resource: String,
        message: String,
    },

    /// A snippet could not be merged into the document
    #[error("Extension '{extension}' failed to merge: {source}")]
    Merge {
        extension: String,
        #[source]
        source: MergeError,
    },

    /// Reading the project directory failed
    #[error("Extension '{extension}' failed to read the project: {source}")]
    Io {
        extension: String,
        #[source]
        source: std::io::Error,
    },

    /// The document itself is malformed
    #[error("Invalid document: {message}")]
    InvalidDocument { message: String },
}

impl ExtensionError {
    pub fn duplicate_name(name: impl Into<String>) -> Self {
        Self::DuplicateName { name: name.into() }
    }

    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound { name: name.into() }
    }

    pub fn validation(
        extension: impl Into<String>,
        resource: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Validation {
            extension: extension.into(),
            resource: resource.into(),
            message: message.into(),
        }
    }

    pub fn merge(extension: impl Into<String>, source: MergeError) -> Self {
        Self::Merge {
            extension: extension.into(),
            source,
        }
    }

    pub fn io(extension: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            extension: extension.into(),
            source,
        }
    }

    pub fn invalid_document(message: impl Into<String>) -> Self {
        Self::InvalidDocument {
            message: message.into(),
        }
    }

    /// Name of the extension the error is attributed to, if any
    pub fn extension(&self) -> Option<&str> {
        match self {
            Self::DuplicateName { name } | Self::NotFound { name } => Some(name),
            Self::UnsupportedBase { extension, .. }
            | Self::ExperimentalNotEnabled { extension, .. }
            | Self::Validation { extension, .. }
            | Self::Merge { extension, .. }
            | Self::Io { extension, .. } => Some(extension),
            Self::InvalidDocument { .. } => None,
        }
    }
}

impl From<rockext_core::Error> for ExtensionError {
    fn from(err: rockext_core::Error) -> Self {
        Self::invalid_document(err.to_string())
    }
}

/// Label used for a missing base in messages
pub(crate) fn base_label(base: Option<&str>) -> String {
    base.unwrap_or("<none>").to_string()
}
