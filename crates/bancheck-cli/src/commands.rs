//! CLI command definitions using clap

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Bancheck: record named values as snapshots and verify them later
#[derive(Parser, Debug)]
#[command(name = "bancheck")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (only failures and errors)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output (auto, always, never)
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorArg,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Accept every value as the new snapshot and prune stale names
    Accept(RunArgs),

    /// Compare values with their snapshots, recording names seen for the first time
    Verify(RunArgs),

    /// List the names stored in a snapshot file
    List(ListArgs),
}

/// Arguments shared by `accept` and `verify`
#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// JSON or YAML document mapping test names to values
    pub tests: PathBuf,

    /// Snapshot file (overrides the options file)
    #[arg(short, long, env = "BANCHECK_SNAPSHOT_PATH")]
    pub snapshot_path: Option<PathBuf>,

    /// JSON or YAML document with option overrides
    #[arg(short, long)]
    pub options: Option<PathBuf>,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub format: FormatArg,
}

/// Arguments for the list command
#[derive(Args, Debug, Clone)]
pub struct ListArgs {
    /// Snapshot file
    #[arg(short, long, env = "BANCHECK_SNAPSHOT_PATH")]
    pub snapshot_path: Option<PathBuf>,
}

/// Output format argument
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormatArg {
    /// Human-readable text
    #[default]
    Text,
    /// JSON report on stdout
    Json,
}

impl From<FormatArg> for crate::output::OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => Self::Text,
            FormatArg::Json => Self::Json,
        }
    }
}

/// Color argument
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ColorArg {
    /// Automatic color detection
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl From<ColorArg> for crate::config::ColorChoice {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Auto => Self::Auto,
            ColorArg::Always => Self::Always,
            ColorArg::Never => Self::Never,
        }
    }
}
