//! The extension capability contract
//!
//! An extension contributes three kinds of snippets to a document:
//! - a root snippet, merged key by key into the top level
//! - a part snippet, merged into every existing part
//! - a parts snippet, adding (or merging into) whole named parts
//!
//! Each hook receives an [`ExtensionContext`] describing the document as it
//! stands when the extension runs, so defaults injected by earlier extensions
//! are visible to later ones.
//!
//! Snippets hold only what the extension contributes. Merging them with the
//! document, including parts the user already declared, is the processor's job
//! and happens exactly once per snippet.

use crate::error::{ExtensionError, Result};
use crate::source::ProjectSource;
use rockext_core::{Document, Mapping, Part};

/// Base identifier meaning "no base image"
pub const BARE_BASE: &str = "bare";

/// State handed to extension hooks
pub struct ExtensionContext<'a> {
    /// Name the extension was requested under
    pub extension: &'a str,
    /// Document as it stands before this extension is applied
    pub document: &'a Document,
    /// Project directory listing
    pub project: &'a dyn ProjectSource,
}

impl<'a> ExtensionContext<'a> {
    pub fn new(extension: &'a str, document: &'a Document, project: &'a dyn ProjectSource) -> Self {
        Self {
            extension,
            document,
            project,
        }
    }

    /// Fail with a validation error unless `resource` exists in the project
    pub fn require_file(&self, resource: &str, message: &str) -> Result<()> {
        if self.project.exists(resource) {
            Ok(())
        } else {
            Err(ExtensionError::validation(self.extension, resource, message))
        }
    }
}

/// A named overlay that augments a document
pub trait Extension: Send + Sync {
    /// Bases this extension may be applied to
    fn supported_bases(&self) -> &[&str];

    /// Whether applying to `base` requires an explicit experimental opt-in
    fn is_experimental(&self, base: Option<&str>) -> bool;

    /// Root-level keys to merge into the document.
    ///
    /// A `parts` entry here is merged with the document's parts like any other
    /// mapping, so it should carry the generated definitions only.
    fn root_snippet(&self, ctx: &ExtensionContext<'_>) -> Result<Mapping>;

    /// Whole parts to add, keyed by part name
    fn parts_snippet(&self, _ctx: &ExtensionContext<'_>) -> Result<Mapping> {
        Ok(Mapping::new())
    }

    /// Patch for the existing part `part_name`; empty means leave it alone
    fn part_snippet(&self, _part_name: &str, _ctx: &ExtensionContext<'_>) -> Result<Part> {
        Ok(Part::new())
    }

    /// Whether `base` is supported. A document without a base counts as bare.
    fn supports_base(&self, base: Option<&str>) -> bool {
        let base = base.unwrap_or(BARE_BASE);
        self.supported_bases().iter().any(|b| *b == base)
    }
}
