//! Small extensions with predictable snippets

use rockext_core::{Mapping, Part, Value};
use rockext_extensions::{Extension, ExtensionContext, ExtensionError, Result};

/// Fills in `run_user` and `platforms` when absent and contributes an
/// `app/dependencies` part staging `pkgA`
pub struct DefaultsExtension;

impl Extension for DefaultsExtension {
    fn supported_bases(&self) -> &[&str] {
        &["bare", "ubuntu:22.04"]
    }

    fn is_experimental(&self, _base: Option<&str>) -> bool {
        false
    }

    fn root_snippet(&self, ctx: &ExtensionContext<'_>) -> Result<Mapping> {
        let mut snippet = Mapping::new();
        if !ctx.document.contains_key("run_user") {
            snippet.insert("run_user".into(), "_daemon_".into());
        }
        if !ctx.document.contains_key("platforms") {
            let mut platforms = Mapping::new();
            platforms.insert("amd64".into(), Value::Mapping(Mapping::new()));
            snippet.insert("platforms".into(), Value::Mapping(platforms));
        }
        Ok(snippet)
    }

    fn parts_snippet(&self, _ctx: &ExtensionContext<'_>) -> Result<Mapping> {
        let mut part = Part::new();
        part.insert(
            "stage-packages".into(),
            Value::Sequence(vec![Value::from("pkgA")]),
        );
        let mut parts = Mapping::new();
        parts.insert("app/dependencies".into(), Value::Mapping(part));
        Ok(parts)
    }
}

/// Returns a fixed root snippet regardless of the document
pub struct FixedRootExtension {
    pub root: Mapping,
    pub experimental: bool,
}

impl FixedRootExtension {
    pub fn new(root: Mapping) -> Self {
        Self {
            root,
            experimental: false,
        }
    }

    pub fn experimental(mut self) -> Self {
        self.experimental = true;
        self
    }
}

impl Extension for FixedRootExtension {
    fn supported_bases(&self) -> &[&str] {
        &["bare", "ubuntu:20.04", "ubuntu:22.04"]
    }

    fn is_experimental(&self, _base: Option<&str>) -> bool {
        self.experimental
    }

    fn root_snippet(&self, _ctx: &ExtensionContext<'_>) -> Result<Mapping> {
        Ok(self.root.clone())
    }
}

/// Records the `run_user` it observed under `observed-run-user`
pub struct ObserverExtension;

impl Extension for ObserverExtension {
    fn supported_bases(&self) -> &[&str] {
        &["bare", "ubuntu:22.04"]
    }

    fn is_experimental(&self, _base: Option<&str>) -> bool {
        false
    }

    fn root_snippet(&self, ctx: &ExtensionContext<'_>) -> Result<Mapping> {
        let observed = ctx
            .document
            .get("run_user")
            .cloned()
            .unwrap_or(Value::Null);
        let mut snippet = Mapping::new();
        snippet.insert("observed-run-user".into(), observed);
        Ok(snippet)
    }
}

/// Adds a build environment entry to every part using the python plugin
pub struct PythonPatchExtension;

impl Extension for PythonPatchExtension {
    fn supported_bases(&self) -> &[&str] {
        &["bare", "ubuntu:22.04"]
    }

    fn is_experimental(&self, _base: Option<&str>) -> bool {
        false
    }

    fn root_snippet(&self, _ctx: &ExtensionContext<'_>) -> Result<Mapping> {
        Ok(Mapping::new())
    }

    fn part_snippet(&self, part_name: &str, ctx: &ExtensionContext<'_>) -> Result<Part> {
        let uses_python = ctx
            .document
            .part(part_name)
            .and_then(|p| p.get("plugin"))
            .and_then(Value::as_str)
            == Some("python");

        let mut patch = Part::new();
        if uses_python {
            patch.insert(
                "build-environment".into(),
                Value::Sequence(vec![Value::from("PIP_NO_CACHE_DIR=1")]),
            );
        }
        Ok(patch)
    }
}

/// Adds a build environment entry to every part, whatever its plugin
pub struct EveryPartPatchExtension;

impl Extension for EveryPartPatchExtension {
    fn supported_bases(&self) -> &[&str] {
        &["bare", "ubuntu:22.04"]
    }

    fn is_experimental(&self, _base: Option<&str>) -> bool {
        false
    }

    fn root_snippet(&self, _ctx: &ExtensionContext<'_>) -> Result<Mapping> {
        Ok(Mapping::new())
    }

    fn part_snippet(&self, _part_name: &str, _ctx: &ExtensionContext<'_>) -> Result<Part> {
        let mut patch = Part::new();
        patch.insert(
            "build-environment".into(),
            Value::Sequence(vec![Value::from("LANG=C.UTF-8")]),
        );
        Ok(patch)
    }
}

/// Fails validation unless the project has a `manifest.json`
pub struct ManifestExtension;

impl Extension for ManifestExtension {
    fn supported_bases(&self) -> &[&str] {
        &["bare"]
    }

    fn is_experimental(&self, _base: Option<&str>) -> bool {
        false
    }

    fn root_snippet(&self, ctx: &ExtensionContext<'_>) -> Result<Mapping> {
        ctx.require_file("manifest.json", "a manifest is required")?;
        Ok(Mapping::new())
    }
}

/// Experimental only on ubuntu:20.04
pub struct LegacyBaseExtension;

impl Extension for LegacyBaseExtension {
    fn supported_bases(&self) -> &[&str] {
        &["ubuntu:20.04", "ubuntu:22.04"]
    }

    fn is_experimental(&self, base: Option<&str>) -> bool {
        base == Some("ubuntu:20.04")
    }

    fn root_snippet(&self, _ctx: &ExtensionContext<'_>) -> Result<Mapping> {
        let mut snippet = Mapping::new();
        snippet.insert("legacy".into(), true.into());
        Ok(snippet)
    }
}

/// Emits a parts snippet whose entry is not a mapping
pub struct BrokenPartsExtension;

impl Extension for BrokenPartsExtension {
    fn supported_bases(&self) -> &[&str] {
        &["bare"]
    }

    fn is_experimental(&self, _base: Option<&str>) -> bool {
        false
    }

    fn root_snippet(&self, _ctx: &ExtensionContext<'_>) -> Result<Mapping> {
        Ok(Mapping::new())
    }

    fn parts_snippet(&self, _ctx: &ExtensionContext<'_>) -> Result<Mapping> {
        let mut parts = Mapping::new();
        parts.insert("bad".into(), "not-a-part".into());
        Ok(parts)
    }
}

/// Convenience to check an error variant in assertions
pub fn is_merge_error(err: &ExtensionError) -> bool {
    matches!(err, ExtensionError::Merge { .. })
}
