//! Document value model
//!
//! Documents are ordered YAML mappings. For merging purposes every value is
//! one of three kinds: a scalar, a sequence, or a nested mapping.

use crate::error::{Error, Result};
use serde_yaml_ng::{Mapping, Value};
use std::fmt;

/// Key holding the named build parts
pub const PARTS_KEY: &str = "parts";

/// Key holding the target base identifier
pub const BASE_KEY: &str = "base";

/// Key holding the build base identifier
pub const BUILD_BASE_KEY: &str = "build-base";

/// Key holding the declared extension names
pub const EXTENSIONS_KEY: &str = "extensions";

/// A named unit of build configuration: property name to property value
pub type Part = Mapping;

/// Merge kind of a value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Scalar,
    Sequence,
    Mapping,
}

impl ValueKind {
    /// Classify a YAML value
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Sequence(_) => Self::Sequence,
            Value::Mapping(_) => Self::Mapping,
            Value::Null
            | Value::Bool(_)
            | Value::Number(_)
            | Value::String(_)
            | Value::Tagged(_) => Self::Scalar,
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Scalar => "scalar",
            Self::Sequence => "sequence",
            Self::Mapping => "mapping",
        };
        f.write_str(name)
    }
}

/// Render a value compactly for error messages
pub fn render(value: &Value) -> String {
    match value {
        Value::String(s) => format!("{:?}", s),
        other => serde_yaml_ng::to_string(other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_else(|_| format!("{:?}", other)),
    }
}

/// A full configuration document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    root: Mapping,
}

impl Document {
    /// Create an empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a document from YAML text. An empty input yields an empty document.
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let value: Value = serde_yaml_ng::from_str(content)?;
        Self::try_from(value)
    }

    /// Serialize the document back to YAML
    pub fn to_yaml_string(&self) -> Result<String> {
        Ok(serde_yaml_ng::to_string(&self.root)?)
    }

    pub fn as_mapping(&self) -> &Mapping {
        &self.root
    }

    pub fn into_mapping(self) -> Mapping {
        self.root
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.root.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.root.contains_key(key)
    }

    /// Insert a root key, returning the previous value
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.root.insert(Value::String(key.into()), value)
    }

    /// Remove a root key while preserving the order of the remaining keys
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.root.shift_remove(key)
    }

    /// Declared base, if it is a string
    pub fn base(&self) -> Option<&str> {
        self.get(BASE_KEY).and_then(Value::as_str)
    }

    /// Declared build base, if it is a string
    pub fn build_base(&self) -> Option<&str> {
        self.get(BUILD_BASE_KEY).and_then(Value::as_str)
    }

    /// The `parts` mapping; `None` when absent or not a mapping
    pub fn parts(&self) -> Option<&Mapping> {
        self.get(PARTS_KEY).and_then(Value::as_mapping)
    }

    /// Names of all parts, in document order
    pub fn part_names(&self) -> Vec<String> {
        self.parts()
            .map(|parts| {
                parts
                    .keys()
                    .filter_map(|k| k.as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// A single part definition by name
    pub fn part(&self, name: &str) -> Option<&Part> {
        self.parts()
            .and_then(|parts| parts.get(name))
            .and_then(Value::as_mapping)
    }

    /// Mutable `parts` mapping, created when absent
    pub fn parts_mut(&mut self) -> Result<&mut Mapping> {
        let key = Value::String(PARTS_KEY.to_string());
        if !self.root.contains_key(&key) {
            self.root.insert(key.clone(), Value::Mapping(Mapping::new()));
        }
        match self.root.get_mut(&key) {
            Some(Value::Mapping(parts)) => Ok(parts),
            Some(other) => Err(Error::invalid_document(format!(
                "'{}' must be a mapping, found {}",
                PARTS_KEY,
                ValueKind::of(other)
            ))),
            None => Err(Error::invalid_document(format!("'{}' is missing", PARTS_KEY))),
        }
    }

    /// Insert or replace a part definition
    pub fn insert_part(&mut self, name: impl Into<String>, part: Part) -> Result<Option<Value>> {
        let parts = self.parts_mut()?;
        Ok(parts.insert(Value::String(name.into()), Value::Mapping(part)))
    }

    /// Declared extension names from the `extensions` key
    pub fn extensions(&self) -> Result<Vec<String>> {
        let Some(value) = self.get(EXTENSIONS_KEY) else {
            return Ok(Vec::new());
        };
        let seq = value.as_sequence().ok_or_else(|| {
            Error::invalid_document(format!("'{}' must be a list of names", EXTENSIONS_KEY))
        })?;
        seq.iter()
            .map(|item| {
                item.as_str().map(str::to_string).ok_or_else(|| {
                    Error::invalid_document(format!(
                        "'{}' entries must be strings, found {}",
                        EXTENSIONS_KEY,
                        render(item)
                    ))
                })
            })
            .collect()
    }
}

impl From<Mapping> for Document {
    fn from(root: Mapping) -> Self {
        Self { root }
    }
}

impl TryFrom<Value> for Document {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Mapping(root) => Ok(Self { root }),
            Value::Null => Ok(Self::default()),
            other => Err(Error::invalid_document(format!(
                "top level must be a mapping, found {}",
                ValueKind::of(&other)
            ))),
        }
    }
}

impl From<Document> for Value {
    fn from(doc: Document) -> Self {
        Value::Mapping(doc.into_mapping())
    }
}
