use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(
    name = "unipatch",
    about = "Git-style unified diffs between two files",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format (overrides the config file)
    #[arg(long, global = true)]
    pub format: Option<OutputFormat>,

    /// TOML config file with `[diff]` and `[output]` tables
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorChoice {
    #[default]
    Auto,
    Always,
    Never,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print the unified diff turning OLD into NEW
    Diff(DiffArgs),
    /// Summarise the change: kind, blob ids, hunks and line counts
    Stat(DiffArgs),
}

#[derive(Args, Clone, Debug)]
pub struct DiffArgs {
    /// Old file, or /dev/null for a creation
    pub old: PathBuf,
    /// New file, or /dev/null for a deletion
    pub new: PathBuf,
    /// Label shown as a/<label> (defaults to the old path)
    #[arg(long)]
    pub old_label: Option<String>,
    /// Label shown as b/<label> (defaults to the new path)
    #[arg(long)]
    pub new_label: Option<String>,
    /// Lines of context around each change
    #[arg(short = 'U', long = "unified", allow_negative_numbers = true)]
    pub context: Option<i64>,
    /// Extra unchanged lines allowed between changes of one hunk
    #[arg(long = "inter-hunk-context", allow_negative_numbers = true)]
    pub inter_hunk_context: Option<i64>,
    #[arg(long)]
    pub color: Option<ColorChoice>,
}
