//! Command handlers - extracted from main.rs for testability
//!
//! Each handler module contains the execution logic for one CLI command.
//! Input loading shared by `accept` and `verify` lives here.

pub mod accept;
pub mod list;
pub mod verify;

pub use accept::execute_accept;
pub use list::execute_list;
pub use verify::execute_verify;

use crate::commands::RunArgs;
use crate::error::{CliError, CliResult};
use bancheck::{OptionOverrides, Options, Tests};
use std::fs;
use std::path::{Path, PathBuf};

/// Document syntax, chosen by file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    /// `.yaml` / `.yml`
    Yaml,
    /// Anything else
    Json,
}

impl DocumentKind {
    /// Pick the syntax for a path
    #[must_use]
    pub fn for_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                Self::Yaml
            }
            _ => Self::Json,
        }
    }
}

/// Parse document text into a JSON value
pub fn parse_document(path: &Path, text: &str) -> CliResult<serde_json::Value> {
    match DocumentKind::for_path(path) {
        DocumentKind::Yaml => {
            serde_yaml_ng::from_str(text).map_err(|e| CliError::parse(path, e.to_string()))
        }
        DocumentKind::Json => {
            serde_json::from_str(text).map_err(|e| CliError::parse(path, e.to_string()))
        }
    }
}

/// Read and parse a JSON or YAML document
pub fn load_document(path: &Path) -> CliResult<serde_json::Value> {
    let text = fs::read_to_string(path).map_err(|e| {
        CliError::invalid_argument(format!("cannot read {}: {e}", path.display()))
    })?;
    parse_document(path, &text)
}

/// Options from the options file with `--snapshot-path` layered on top
pub fn resolve_options(
    options_file: Option<&Path>,
    snapshot_path: Option<&PathBuf>,
) -> CliResult<Options> {
    let from_file = match options_file {
        Some(path) => bancheck::json::overrides_from_json(Some(&load_document(path)?))?,
        None => OptionOverrides::new(),
    };
    let from_flags = match snapshot_path {
        Some(path) => OptionOverrides::new().with_snapshot_path(path),
        None => OptionOverrides::new(),
    };
    Ok(from_file.or(from_flags).resolve())
}

/// Load and validate the tests document and the effective options
///
/// Nothing under the snapshot path is touched before this succeeds.
pub fn prepare_run(args: &RunArgs) -> CliResult<(Tests, Options)> {
    let document = load_document(&args.tests)?;
    let tests = bancheck::json::tests_from_json(&document)?;
    let options = resolve_options(args.options.as_deref(), args.snapshot_path.as_ref())?;
    tracing::info!(
        tests = tests.len(),
        snapshot_path = %options.snapshot_path().display(),
        "loaded tests"
    );
    Ok((tests, options))
}
