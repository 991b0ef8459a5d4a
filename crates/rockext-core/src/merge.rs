//! Property and part merging
//!
//! Merge rules, dispatched on the kind shared by both operands:
//! - Scalars: equal values merge to themselves, unequal values conflict
//!   (unless the property is accumulative and both are strings)
//! - Sequences: deduplicated union, base elements first
//! - Mappings: key union, recursing on shared keys
//!
//! Mixed kinds are a type mismatch. All merges are pure: inputs are borrowed
//! and a fresh value is returned.

use crate::error::MergeError;
use crate::value::{render, Part, ValueKind, PARTS_KEY};
use serde_yaml_ng::{Mapping, Value};
use std::collections::BTreeSet;
use tracing::trace;

/// Which properties may combine unequal string values instead of conflicting
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergePolicy {
    accumulative: BTreeSet<String>,
}

impl MergePolicy {
    /// Policy with no accumulative properties
    pub fn new() -> Self {
        Self::default()
    }

    /// Policy designating the given property names as accumulative
    pub fn with_accumulative<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            accumulative: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether a property key concatenates string values
    pub fn is_accumulative(&self, key: &str) -> bool {
        self.accumulative.contains(key)
    }
}

/// Merges two values of the same property
#[derive(Debug, Clone, Default)]
pub struct PropertyMerger {
    policy: MergePolicy,
}

impl PropertyMerger {
    pub fn new(policy: MergePolicy) -> Self {
        Self { policy }
    }

    /// Merge `incoming` into `base` for the property at `path`.
    ///
    /// `path` is dotted and only used for error context and to look up the
    /// property's own key in the merge policy.
    pub fn merge(&self, path: &str, base: &Value, incoming: &Value) -> Result<Value, MergeError> {
        let key = path.rsplit('.').next().unwrap_or(path);
        self.merge_keyed(path, key, base, incoming)
    }

    /// Merge two mappings key by key.
    ///
    /// Keys only present on one side are taken unchanged; shared keys recurse.
    /// Base keys keep their order, incoming-only keys follow in their order.
    pub fn merge_mapping(
        &self,
        path: &str,
        base: &Mapping,
        incoming: &Mapping,
    ) -> Result<Mapping, MergeError> {
        let mut merged = Mapping::with_capacity(base.len() + incoming.len());

        for (key, base_value) in base {
            let value = match incoming.get(key) {
                Some(incoming_value) => {
                    let key_str = key_name(key);
                    let child = join_path(path, &key_str);
                    self.merge_keyed(&child, &key_str, base_value, incoming_value)?
                }
                None => base_value.clone(),
            };
            merged.insert(key.clone(), value);
        }

        for (key, incoming_value) in incoming {
            if !base.contains_key(key) {
                merged.insert(key.clone(), incoming_value.clone());
            }
        }

        Ok(merged)
    }

    fn merge_keyed(
        &self,
        path: &str,
        key: &str,
        base: &Value,
        incoming: &Value,
    ) -> Result<Value, MergeError> {
        match (base, incoming) {
            (Value::Sequence(b), Value::Sequence(i)) => Ok(Value::Sequence(merge_sequence(b, i))),
            (Value::Mapping(b), Value::Mapping(i)) => {
                Ok(Value::Mapping(self.merge_mapping(path, b, i)?))
            }
            _ => match (ValueKind::of(base), ValueKind::of(incoming)) {
                (ValueKind::Scalar, ValueKind::Scalar) => {
                    self.merge_scalar(path, key, base, incoming)
                }
                (base_kind, incoming_kind) => Err(MergeError::TypeMismatch {
                    path: path.to_string(),
                    base_kind,
                    incoming_kind,
                }),
            },
        }
    }

    fn merge_scalar(
        &self,
        path: &str,
        key: &str,
        base: &Value,
        incoming: &Value,
    ) -> Result<Value, MergeError> {
        if base == incoming {
            return Ok(base.clone());
        }

        if let (Value::String(b), Value::String(i)) = (base, incoming) {
            if self.policy.is_accumulative(key) {
                trace!(path = %path, "concatenating accumulative property");
                let separator = if b.is_empty() || b.ends_with('\n') {
                    ""
                } else {
                    "\n"
                };
                return Ok(Value::String(format!("{}{}{}", b, separator, i)));
            }
        }

        Err(MergeError::Conflict {
            path: path.to_string(),
            base: render(base),
            incoming: render(incoming),
        })
    }
}

/// Deduplicated union of two sequences, keeping first occurrences in order
fn merge_sequence(base: &[Value], incoming: &[Value]) -> Vec<Value> {
    let mut merged: Vec<Value> = Vec::with_capacity(base.len() + incoming.len());
    for item in base.iter().chain(incoming) {
        if !merged.contains(item) {
            merged.push(item.clone());
        }
    }
    merged
}

fn key_name(key: &Value) -> String {
    match key {
        Value::String(s) => s.clone(),
        other => render(other),
    }
}

fn join_path(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", parent, key)
    }
}

/// Merges two part definitions property by property
#[derive(Debug, Clone, Default)]
pub struct PartMerger {
    properties: PropertyMerger,
}

impl PartMerger {
    pub fn new(properties: PropertyMerger) -> Self {
        Self { properties }
    }

    pub fn with_policy(policy: MergePolicy) -> Self {
        Self::new(PropertyMerger::new(policy))
    }

    pub fn property_merger(&self) -> &PropertyMerger {
        &self.properties
    }

    /// Merge two definitions of the part `part_name`.
    ///
    /// Neither input is modified. The first failing property aborts the merge.
    pub fn merge_parts(
        &self,
        part_name: &str,
        base: &Part,
        incoming: &Part,
    ) -> Result<Part, MergeError> {
        let path = join_path(PARTS_KEY, part_name);
        self.properties.merge_mapping(&path, base, incoming)
    }
}
