//! Snapshot file persistence.
//!
//! A snapshot file is a YAML mapping from test name to the storage form of
//! its serialized value, preceded by a version comment. Names are written in
//! sorted order so the file is stable across runs and diffs well in review.

use crate::result::{BancheckError, BancheckResult};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// First line of every snapshot file
pub const SNAPSHOT_HEADER: &str = "# bancheck snapshot v1";

/// Stored entries, keyed by test name
pub type SnapshotEntries = BTreeMap<String, String>;

/// A snapshot file on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotFile {
    path: PathBuf,
}

impl SnapshotFile {
    /// Refer to a snapshot file (nothing is read yet)
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// File path
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the file exists
    #[must_use]
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Read all entries; a missing file reads as empty
    pub fn load(&self) -> BancheckResult<SnapshotEntries> {
        if !self.exists() {
            tracing::debug!(path = %self.path.display(), "no snapshot file, starting empty");
            return Ok(SnapshotEntries::new());
        }

        let text = fs::read_to_string(&self.path)?;
        if text.lines().all(|line| {
            let line = line.trim();
            line.is_empty() || line.starts_with('#')
        }) {
            return Ok(SnapshotEntries::new());
        }

        let entries: Option<SnapshotEntries> = serde_yaml_ng::from_str(&text)
            .map_err(|e| BancheckError::snapshot_format(&self.path, e.to_string()))?;
        let entries = entries.unwrap_or_default();
        tracing::debug!(path = %self.path.display(), entries = entries.len(), "loaded snapshot file");
        Ok(entries)
    }

    /// Replace the file with `entries`, creating parent directories
    pub fn save(&self, entries: &SnapshotEntries) -> BancheckResult<()> {
        let yaml = serde_yaml_ng::to_string(entries)
            .map_err(|e| BancheckError::snapshot_format(&self.path, e.to_string()))?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        fs::write(&self.path, format!("{SNAPSHOT_HEADER}\n\n{yaml}"))?;
        tracing::debug!(path = %self.path.display(), entries = entries.len(), "wrote snapshot file");
        Ok(())
    }

    /// Delete the file if present
    pub fn remove(&self) -> BancheckResult<()> {
        if self.exists() {
            fs::remove_file(&self.path)?;
            tracing::debug!(path = %self.path.display(), "removed empty snapshot file");
        }
        Ok(())
    }
}
