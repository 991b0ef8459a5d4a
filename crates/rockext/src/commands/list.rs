//! Extension list command

use anyhow::{Context, Result};
use rockext_extensions::ExtensionRegistry;
use tabled::{settings::Style, Table, Tabled};

use super::experimental_bases;
use crate::cli::ListArgs;
use crate::output;

/// Row for a registered extension
#[derive(Debug, Tabled, serde::Serialize)]
struct ExtensionRow {
    name: String,
    #[tabled(rename = "supported bases")]
    supported_bases: String,
    #[tabled(rename = "experimental on")]
    experimental_on: String,
}

pub fn run(args: ListArgs) -> Result<()> {
    let registry = ExtensionRegistry::with_builtins();
    let rows = rows(&registry)?;

    if args.json {
        let json =
            serde_json::to_string_pretty(&rows).context("Failed to serialize extensions to JSON")?;
        println!("{}", json);
    } else if rows.is_empty() {
        output::warn("No extensions registered");
    } else {
        let mut table = Table::new(rows);
        table.with(Style::sharp());
        println!("{}", table);
    }

    Ok(())
}

fn rows(registry: &ExtensionRegistry) -> Result<Vec<ExtensionRow>> {
    registry
        .sorted_names()
        .into_iter()
        .map(|name| -> Result<ExtensionRow> {
            let extension = registry.get(&name)?;
            let experimental = experimental_bases(extension.as_ref());
            Ok(ExtensionRow {
                supported_bases: extension.supported_bases().join(", "),
                experimental_on: if experimental.is_empty() {
                    "-".to_string()
                } else {
                    experimental.join(", ")
                },
                name,
            })
        })
        .collect()
}
