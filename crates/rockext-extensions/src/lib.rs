//! Extension handling for rockext
//!
//! This crate handles:
//! - The extension contract (root, part and parts snippets)
//! - The extension registry and built-in extensions
//! - Applying extensions to a document in order
//! - Read-only access to the project directory

pub mod error;
pub mod extension;
pub mod flask;
pub mod processor;
pub mod registry;
pub mod source;

pub use error::{ExtensionError, Result};
pub use extension::{Extension, ExtensionContext};
pub use flask::Flask;
pub use processor::{apply_extensions, ExtensionProcessor, ProcessorOptions};
pub use registry::{register_builtins, ExtensionRegistry};
pub use source::{FsProjectSource, InMemoryProjectSource, ProjectSource};
