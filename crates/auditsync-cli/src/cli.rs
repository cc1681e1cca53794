use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "auditsync",
    about = "Reconcile and compare accessibility audit snapshots",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Merge an incoming snapshot into a local one and report conflicts
    Merge(MergeArgs),
    /// Merge, apply conflict decisions, and write the final snapshot
    Resolve(ResolveArgs),
    /// Report conformance changes between two audits
    Compare(CompareArgs),
}

/// Options shared by `merge` and `resolve`.
#[derive(Args, Clone, Debug, Default)]
pub struct MergeOptionArgs {
    /// TOML file with merge options
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Auto-resolve distant conflicts in favor of the newer edit
    #[arg(long)]
    pub prefer_newer: Option<bool>,
    /// Minimum gap in hours before a conflict is auto-resolved
    #[arg(long)]
    pub threshold_hours: Option<f64>,
}

#[derive(Args)]
pub struct MergeArgs {
    pub local: PathBuf,
    pub incoming: PathBuf,
    #[command(flatten)]
    pub options: MergeOptionArgs,
}

#[derive(Args)]
pub struct ResolveArgs {
    pub local: PathBuf,
    pub incoming: PathBuf,
    /// JSON object mapping item ids to "local" or "incoming"
    #[arg(short, long)]
    pub resolutions: Option<PathBuf>,
    /// Leave undecided conflicts out instead of failing
    #[arg(long)]
    pub allow_unresolved: bool,
    /// Where to write the merged snapshot (stdout if omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    #[command(flatten)]
    pub options: MergeOptionArgs,
}

#[derive(Args)]
pub struct CompareArgs {
    pub base: PathBuf,
    pub target: PathBuf,
    #[arg(long)]
    pub base_name: Option<String>,
    #[arg(long)]
    pub target_name: Option<String>,
}
