//! Bancheck CLI Library
//!
//! Command-line interface for recording and verifying snapshots of named
//! values read from JSON or YAML documents.

#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::format_push_string)]

mod commands;
mod config;
mod error;
pub mod handlers;
pub mod logging;
pub mod output;

pub use commands::{Cli, ColorArg, Commands, FormatArg, ListArgs, RunArgs};
pub use config::{CliConfig, ColorChoice, Verbosity};
pub use error::{CliError, CliResult};
pub use output::{OutputFormat, Reporter};
