//! Extension info command

use anyhow::{Context, Result};
use rockext_extensions::ExtensionRegistry;
use serde::Serialize;

use super::experimental_bases;
use crate::cli::InfoArgs;
use crate::output;

#[derive(Debug, Serialize)]
struct ExtensionInfo {
    name: String,
    supported_bases: Vec<String>,
    experimental_bases: Vec<String>,
}

pub fn run(args: InfoArgs) -> Result<()> {
    let registry = ExtensionRegistry::with_builtins();
    let info = describe(&registry, &args.name)?;

    if args.json {
        let json = serde_json::to_string_pretty(&info)
            .context("Failed to serialize extension info to JSON")?;
        println!("{}", json);
        return Ok(());
    }

    output::header(&info.name);
    output::kv("Supported bases", &info.supported_bases.join(", "));
    if info.experimental_bases.is_empty() {
        output::kv("Experimental", "no");
    } else {
        output::kv("Experimental on", &info.experimental_bases.join(", "));
    }

    Ok(())
}

fn describe(registry: &ExtensionRegistry, name: &str) -> Result<ExtensionInfo> {
    let extension = registry.get(name)?;
    Ok(ExtensionInfo {
        name: name.to_string(),
        supported_bases: extension
            .supported_bases()
            .iter()
            .map(|b| b.to_string())
            .collect(),
        experimental_bases: experimental_bases(extension.as_ref()),
    })
}
