//! Flask application preset
//!
//! Packs a Python Flask project served by gunicorn. Fills in root defaults
//! the user left out and contributes two parts, which are merged with any
//! same-named parts the user declared:
//! - `flask/dependencies`: installs the Python requirements
//! - `flask/install-app`: copies the project into the image

use crate::error::{ExtensionError, Result};
use crate::extension::{Extension, ExtensionContext, BARE_BASE};
use crate::source::source_files;
use rockext_core::value::{BUILD_BASE_KEY, PARTS_KEY};
use rockext_core::{Mapping, Part, Value};

const DEFAULT_RUN_USER: &str = "_daemon_";
const DEFAULT_BUILD_BASE: &str = "ubuntu:22.04";
const DEFAULT_PLATFORM: &str = "amd64";
const REQUIREMENTS_FILE: &str = "requirements.txt";
const APP_PREFIX: &str = "srv/flask/app";

pub const DEPENDENCIES_PART: &str = "flask/dependencies";
pub const INSTALL_APP_PART: &str = "flask/install-app";

/// Extension for Python applications built on Flask
#[derive(Debug, Clone, Copy, Default)]
pub struct Flask;

impl Flask {
    pub const NAME: &'static str = "flask";

    fn dependencies_part() -> Part {
        let mut part = Part::new();
        part.insert("plugin".into(), "python".into());
        part.insert("stage-packages".into(), string_list(["python3-venv"]));
        part.insert("source".into(), ".".into());
        part.insert("python-packages".into(), string_list(["gunicorn"]));
        part.insert("python-requirements".into(), string_list([REQUIREMENTS_FILE]));
        part
    }

    fn install_app_part(files: &[String]) -> Part {
        let mut organize = Mapping::new();
        let mut stage = Vec::with_capacity(files.len());
        for file in files {
            let target = format!("{}/{}", APP_PREFIX, file);
            organize.insert(file.as_str().into(), target.as_str().into());
            stage.push(Value::String(target));
        }

        let mut part = Part::new();
        part.insert("plugin".into(), "dump".into());
        part.insert("source".into(), ".".into());
        part.insert("organize".into(), Value::Mapping(organize));
        part.insert("stage".into(), Value::Sequence(stage));
        part
    }

    fn generate_parts(&self, ctx: &ExtensionContext<'_>) -> Result<Mapping> {
        ctx.require_file(
            REQUIREMENTS_FILE,
            "the flask extension requires this file with flask specified as a dependency",
        )?;

        let files = source_files(ctx.project).map_err(|e| ExtensionError::io(ctx.extension, e))?;

        let mut parts = Mapping::new();
        parts.insert(DEPENDENCIES_PART.into(), Value::Mapping(Self::dependencies_part()));
        parts.insert(INSTALL_APP_PART.into(), Value::Mapping(Self::install_app_part(&files)));
        Ok(parts)
    }
}

impl Extension for Flask {
    fn supported_bases(&self) -> &[&str] {
        &["bare", "ubuntu:20.04", "ubuntu:22.04"]
    }

    fn is_experimental(&self, _base: Option<&str>) -> bool {
        true
    }

    fn root_snippet(&self, ctx: &ExtensionContext<'_>) -> Result<Mapping> {
        let doc = ctx.document;
        let mut snippet = Mapping::new();

        if !doc.contains_key("run_user") {
            snippet.insert("run_user".into(), DEFAULT_RUN_USER.into());
        }

        if !doc.contains_key(BUILD_BASE_KEY) && doc.base().unwrap_or(BARE_BASE) == BARE_BASE {
            snippet.insert(BUILD_BASE_KEY.into(), DEFAULT_BUILD_BASE.into());
        }

        if !doc.contains_key("platforms") {
            let mut platforms = Mapping::new();
            platforms.insert(DEFAULT_PLATFORM.into(), Value::Mapping(Mapping::new()));
            snippet.insert("platforms".into(), Value::Mapping(platforms));
        }

        snippet.insert(PARTS_KEY.into(), Value::Mapping(self.generate_parts(ctx)?));

        Ok(snippet)
    }
}

fn string_list<const N: usize>(items: [&str; N]) -> Value {
    Value::Sequence(items.into_iter().map(Value::from).collect())
}
