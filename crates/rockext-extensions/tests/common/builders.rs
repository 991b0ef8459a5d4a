//! Builders for documents, projects, and registries used across tests

use rockext_core::{Document, Mapping, PartMerger, Value};
use rockext_extensions::{
    Extension, ExtensionProcessor, ExtensionRegistry, InMemoryProjectSource, ProcessorOptions,
};
use std::sync::Arc;

/// Parse a document from YAML, panicking on malformed fixtures
pub fn doc(yaml: &str) -> Document {
    Document::from_yaml_str(yaml).expect("fixture document should parse")
}

/// Parse an arbitrary YAML value
pub fn value(yaml: &str) -> Value {
    serde_yaml_ng::from_str(yaml).expect("fixture value should parse")
}

/// Parse a YAML mapping
pub fn mapping(yaml: &str) -> Mapping {
    match value(yaml) {
        Value::Mapping(m) => m,
        other => panic!("fixture is not a mapping: {other:?}"),
    }
}

/// A project containing only a requirements file and an app module
pub fn flask_project() -> InMemoryProjectSource {
    InMemoryProjectSource::new(["app.py", "requirements.txt"])
}

/// Box an extension for registration
pub fn ext<E: Extension + 'static>(extension: E) -> Arc<dyn Extension> {
    Arc::new(extension)
}

/// A registry containing exactly the given extensions
pub fn registry_with(extensions: Vec<(&str, Arc<dyn Extension>)>) -> ExtensionRegistry {
    let mut registry = ExtensionRegistry::new();
    for (name, extension) in extensions {
        registry
            .register(name, extension)
            .expect("test extension names should be unique");
    }
    registry
}

/// A processor over `registry` with experimental extensions enabled
pub fn experimental_processor(registry: &ExtensionRegistry) -> ExtensionProcessor<'_> {
    ExtensionProcessor::new(registry, PartMerger::default()).with_options(ProcessorOptions {
        enable_experimental: true,
    })
}

/// A processor over `registry` with default options
pub fn processor(registry: &ExtensionRegistry) -> ExtensionProcessor<'_> {
    ExtensionProcessor::new(registry, PartMerger::default())
}
