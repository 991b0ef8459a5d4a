//! Apply command

use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use rockext_core::value::EXTENSIONS_KEY;
use rockext_core::{Document, PartMerger, Settings, SettingsLoader};
use rockext_extensions::{ExtensionProcessor, ExtensionRegistry, FsProjectSource, ProcessorOptions};
use std::fs;
use tracing::debug;

use crate::cli::ApplyArgs;
use crate::output;

pub fn run(args: ApplyArgs, config_dir: Option<&Utf8Path>) -> Result<()> {
    let settings = load_settings(config_dir)?;
    let registry = ExtensionRegistry::with_builtins();
    let document = apply_file(&args, &settings, &registry)?;

    let yaml = document
        .to_yaml_string()
        .context("Failed to serialize the resulting document")?;

    match &args.output {
        Some(path) => {
            fs::write(path, yaml).with_context(|| format!("Failed to write {}", path))?;
            output::success(&format!("Wrote {}", path));
        }
        None => print!("{}", yaml),
    }

    Ok(())
}

fn load_settings(config_dir: Option<&Utf8Path>) -> Result<Settings> {
    let loader = match config_dir {
        Some(dir) => SettingsLoader::with_dir(dir.to_owned()),
        None => SettingsLoader::new().context("Failed to locate the settings directory")?,
    };
    loader.load().context("Failed to load settings")
}

/// Load the project file and apply the requested or declared extensions
fn apply_file(args: &ApplyArgs, settings: &Settings, registry: &ExtensionRegistry) -> Result<Document> {
    let content =
        fs::read_to_string(&args.file).with_context(|| format!("Failed to read {}", args.file))?;
    let document = Document::from_yaml_str(&content)
        .with_context(|| format!("Failed to parse {}", args.file))?;

    let project = FsProjectSource::new(project_dir(args));
    let merger = PartMerger::with_policy(settings.merge_policy());
    let processor = ExtensionProcessor::new(registry, merger).with_options(ProcessorOptions {
        enable_experimental: args.enable_experimental || settings.enable_experimental,
    });

    let result = if args.extensions.is_empty() {
        processor.apply_declared(&document, &project)
    } else {
        debug!("Applying extensions from the command line: {:?}", args.extensions);
        let mut document = document;
        document.remove(EXTENSIONS_KEY);
        processor.apply(&document, args.extensions.as_slice(), &project)
    };

    result.with_context(|| format!("Failed to apply extensions to {}", args.file))
}

fn project_dir(args: &ApplyArgs) -> Utf8PathBuf {
    if let Some(dir) = &args.project_dir {
        return dir.clone();
    }
    match args.file.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent.to_owned(),
        _ => Utf8PathBuf::from("."),
    }
}
