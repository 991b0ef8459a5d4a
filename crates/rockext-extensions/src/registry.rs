//! Extension registry management
//!
//! Maps extension names to implementations. A registry is an ordinary value:
//! the host builds one at startup (usually via [`ExtensionRegistry::with_builtins`]),
//! may register or unregister extensions, and then lends it to the processor.
//! Registration failures never modify the registry.

use crate::error::{ExtensionError, Result};
use crate::extension::Extension;
use crate::flask::Flask;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// Registry of named extensions
#[derive(Default, Clone)]
pub struct ExtensionRegistry {
    extensions: HashMap<String, Arc<dyn Extension>>,
}

impl ExtensionRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the built-in extensions
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        register_builtins(&mut registry);
        registry
    }

    /// Register an implementation under `name`
    pub fn register(&mut self, name: impl Into<String>, extension: Arc<dyn Extension>) -> Result<()> {
        let name = name.into();
        if self.extensions.contains_key(&name) {
            return Err(ExtensionError::duplicate_name(name));
        }
        debug!("Registering extension: {}", name);
        self.extensions.insert(name, extension);
        Ok(())
    }

    /// Remove and return the implementation registered under `name`
    pub fn unregister(&mut self, name: &str) -> Result<Arc<dyn Extension>> {
        debug!("Unregistering extension: {}", name);
        self.extensions
            .remove(name)
            .ok_or_else(|| ExtensionError::not_found(name))
    }

    /// Get the implementation registered under `name`
    pub fn get(&self, name: &str) -> Result<Arc<dyn Extension>> {
        self.extensions
            .get(name)
            .cloned()
            .ok_or_else(|| ExtensionError::not_found(name))
    }

    /// Check if an extension exists
    pub fn contains(&self, name: &str) -> bool {
        self.extensions.contains_key(name)
    }

    /// Snapshot of all registered names, in no particular order.
    ///
    /// Later registrations are not reflected in an iterator already obtained.
    pub fn names(&self) -> impl Iterator<Item = String> {
        self.extensions.keys().cloned().collect::<Vec<_>>().into_iter()
    }

    /// All registered names, sorted
    pub fn sorted_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.names().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.extensions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }
}

impl fmt::Debug for ExtensionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtensionRegistry")
            .field("extensions", &self.sorted_names())
            .finish()
    }
}

/// Register every built-in extension.
///
/// A built-in whose name the host already registered is skipped and the
/// host's implementation is kept. Returns the names that were skipped.
pub fn register_builtins(registry: &mut ExtensionRegistry) -> Vec<String> {
    let builtins: [(&str, Arc<dyn Extension>); 1] = [(Flask::NAME, Arc::new(Flask))];
    let mut skipped = Vec::new();
    for (name, extension) in builtins {
        if let Err(e) = registry.register(name, extension) {
            warn!("Built-in extension not registered: {}", e);
            skipped.push(name.to_string());
        }
    }
    skipped
}
