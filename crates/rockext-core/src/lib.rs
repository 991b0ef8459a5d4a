//! # rockext-core
//!
//! Core library for rockext providing:
//! - The configuration document model (ordered YAML mappings)
//! - Type-aware property and part merging
//! - Settings loading (experimental opt-in, accumulative properties)

pub mod config;
pub mod error;
pub mod merge;
pub mod value;

pub use config::{Settings, SettingsLoader};
pub use error::{Error, MergeError, Result};
pub use merge::{MergePolicy, PartMerger, PropertyMerger};
pub use value::{Document, Part, ValueKind};

/// Re-exported so downstream crates build values with the same YAML types
pub use serde_yaml_ng::{Mapping, Value};
