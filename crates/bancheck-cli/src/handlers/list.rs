//! List command handler

use crate::commands::ListArgs;
use crate::config::CliConfig;
use crate::error::CliResult;
use crate::output::Reporter;
use bancheck::{SnapshotStore, UpdateMode, DEFAULT_SNAPSHOT_PATH};
use std::path::PathBuf;

/// Names stored in the snapshot file, sorted
pub fn stored_names(args: &ListArgs) -> CliResult<Vec<String>> {
    let path = args
        .snapshot_path
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SNAPSHOT_PATH));
    let store = SnapshotStore::open(&path, UpdateMode::RecordNew)?;
    tracing::debug!(path = %path.display(), entries = store.len(), "listing snapshots");
    Ok(store.names().map(str::to_string).collect())
}

/// Execute the list command
pub fn execute_list(config: &CliConfig, args: &ListArgs) -> CliResult<()> {
    let names = stored_names(args)?;
    let reporter = Reporter::new(config.color.should_color(), config.verbosity.is_quiet());
    reporter.names(names.iter().map(String::as_str))
}
