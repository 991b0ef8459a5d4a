//! CLI argument parsing with clap

use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand};

/// rockext - Apply configuration extensions to rock project files
#[derive(Parser, Debug)]
#[command(name = "rockext")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Directory holding config.yaml (defaults to ~/.rockext)
    #[arg(long, global = true, env = "ROCKEXT_CONFIG_DIR")]
    pub config_dir: Option<Utf8PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Apply extensions to a project file
    Apply(ApplyArgs),

    /// List registered extensions
    List(ListArgs),

    /// Show details about an extension
    Info(InfoArgs),
}

#[derive(Args, Debug)]
pub struct ApplyArgs {
    /// Project file (e.g. rockcraft.yaml)
    pub file: Utf8PathBuf,

    /// Extension to apply; repeat to apply several in order.
    /// Overrides the file's own `extensions` list.
    #[arg(short, long = "extension", value_name = "NAME")]
    pub extensions: Vec<String>,

    /// Project directory (defaults to the file's directory)
    #[arg(long)]
    pub project_dir: Option<Utf8PathBuf>,

    /// Allow experimental extensions
    #[arg(long)]
    pub enable_experimental: bool,

    /// Write the result here instead of stdout
    #[arg(short, long)]
    pub output: Option<Utf8PathBuf>,
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct InfoArgs {
    /// Extension name
    pub name: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}
