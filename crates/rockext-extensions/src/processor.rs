//! Applying extensions to a document
//!
//! The processor resolves every requested extension, checks that each one
//! may be applied to the document's base, and then merges the extensions'
//! snippets in the requested order. Work happens on a copy of the input, so a
//! failure at any point leaves the caller's document as it was.

use crate::error::{base_label, ExtensionError, Result};
use crate::extension::{Extension, ExtensionContext};
use crate::registry::ExtensionRegistry;
use crate::source::ProjectSource;
use rockext_core::value::{EXTENSIONS_KEY, PARTS_KEY};
use rockext_core::{Document, Part, PartMerger, Value};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Caller-controlled processing switches
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProcessorOptions {
    /// Allow extensions that are experimental for the document's base
    pub enable_experimental: bool,
}

/// Applies registered extensions to documents
pub struct ExtensionProcessor<'r> {
    registry: &'r ExtensionRegistry,
    merger: PartMerger,
    options: ProcessorOptions,
}

impl<'r> ExtensionProcessor<'r> {
    pub fn new(registry: &'r ExtensionRegistry, merger: PartMerger) -> Self {
        Self {
            registry,
            merger,
            options: ProcessorOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ProcessorOptions) -> Self {
        self.options = options;
        self
    }

    /// Apply the named extensions, in order, returning the augmented document.
    ///
    /// Every name is resolved and checked against the document's base before
    /// any snippet is computed.
    pub fn apply<S: AsRef<str>>(
        &self,
        document: &Document,
        names: &[S],
        project: &dyn ProjectSource,
    ) -> Result<Document> {
        let resolved = self.resolve(document, names)?;

        let mut working = document.clone();
        for (name, extension) in &resolved {
            info!("Applying extension: {}", name);
            working = self.apply_one(name, extension.as_ref(), working, project)?;
        }

        Ok(working)
    }

    /// Apply the extensions declared under the document's `extensions` key.
    ///
    /// The key is removed from the result. A document that declares no
    /// extensions is returned unchanged.
    pub fn apply_declared(&self, document: &Document, project: &dyn ProjectSource) -> Result<Document> {
        let names = document.extensions()?;
        if names.is_empty() {
            debug!("No extensions declared");
            return Ok(document.clone());
        }

        let mut stripped = document.clone();
        stripped.remove(EXTENSIONS_KEY);
        self.apply(&stripped, &names, project)
    }

    fn resolve<S: AsRef<str>>(
        &self,
        document: &Document,
        names: &[S],
    ) -> Result<Vec<(String, Arc<dyn Extension>)>> {
        let base = document.base();
        let mut resolved = Vec::with_capacity(names.len());

        for name in names {
            let name = name.as_ref();
            let extension = self.registry.get(name)?;
            self.validate(name, extension.as_ref(), base)?;
            resolved.push((name.to_string(), extension));
        }

        Ok(resolved)
    }

    fn validate(&self, name: &str, extension: &dyn Extension, base: Option<&str>) -> Result<()> {
        if !extension.supports_base(base) {
            return Err(ExtensionError::UnsupportedBase {
                extension: name.to_string(),
                base: base_label(base),
                supported: extension
                    .supported_bases()
                    .iter()
                    .map(|b| b.to_string())
                    .collect(),
            });
        }

        if extension.is_experimental(base) {
            if !self.options.enable_experimental {
                return Err(ExtensionError::ExperimentalNotEnabled {
                    extension: name.to_string(),
                    base: base_label(base),
                });
            }
            warn!("Extension '{}' is experimental", name);
        }

        Ok(())
    }

    fn apply_one(
        &self,
        name: &str,
        extension: &dyn Extension,
        document: Document,
        project: &dyn ProjectSource,
    ) -> Result<Document> {
        let properties = self.merger.property_merger();
        let merge_err = |e| ExtensionError::merge(name, e);

        // Root keys, including generated parts merged with the user's own
        let root = {
            let ctx = ExtensionContext::new(name, &document, project);
            extension.root_snippet(&ctx)?
        };
        let mut document = Document::from(
            properties
                .merge_mapping("", document.as_mapping(), &root)
                .map_err(merge_err)?,
        );
        debug!("Merged {} root keys from '{}'", root.len(), name);

        // Patches for existing parts
        let mut patched: Vec<(String, Part)> = Vec::new();
        {
            let ctx = ExtensionContext::new(name, &document, project);
            for part_name in document.part_names() {
                let patch = extension.part_snippet(&part_name, &ctx)?;
                if patch.is_empty() {
                    continue;
                }
                let existing = document.part(&part_name).ok_or_else(|| {
                    ExtensionError::invalid_document(format!(
                        "part '{}' must be a mapping to apply extension '{}'",
                        part_name, name
                    ))
                })?;
                let merged = self
                    .merger
                    .merge_parts(&part_name, existing, &patch)
                    .map_err(merge_err)?;
                patched.push((part_name, merged));
            }
        }
        for (part_name, part) in patched {
            document.insert_part(part_name, part)?;
        }

        // Whole parts
        let parts = {
            let ctx = ExtensionContext::new(name, &document, project);
            extension.parts_snippet(&ctx)?
        };
        for (part_key, incoming) in parts {
            let part_name = part_key.as_str().ok_or_else(|| {
                ExtensionError::invalid_document(format!(
                    "extension '{}' produced a part with a non-string name",
                    name
                ))
            })?;
            let merged = match document.parts().and_then(|p| p.get(part_name)) {
                Some(existing) => properties
                    .merge(&format!("{}.{}", PARTS_KEY, part_name), existing, &incoming)
                    .map_err(merge_err)?,
                None => incoming,
            };
            let Value::Mapping(merged) = merged else {
                return Err(ExtensionError::invalid_document(format!(
                    "extension '{}' produced a non-mapping definition for part '{}'",
                    name, part_name
                )));
            };
            document.insert_part(part_name, merged)?;
        }

        Ok(document)
    }
}

/// Apply `names` to `document` with a default merger and options
pub fn apply_extensions<S: AsRef<str>>(
    registry: &ExtensionRegistry,
    document: &Document,
    names: &[S],
    project: &dyn ProjectSource,
    options: ProcessorOptions,
) -> Result<Document> {
    ExtensionProcessor::new(registry, PartMerger::default())
        .with_options(options)
        .apply(document, names, project)
}
