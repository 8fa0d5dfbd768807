//! Snapshot store: the in-memory view of one snapshot file for a session.
//!
//! The store is loaded eagerly when opened, mutated by [`SnapshotStore::check`]
//! calls, optionally pruned of entries nobody checked, and written back once
//! with [`SnapshotStore::save`].

use crate::format::{Formatter, Value};
use crate::persist::{SnapshotEntries, SnapshotFile};
use crate::result::BancheckResult;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Write policy for a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UpdateMode {
    /// Record names not seen before; compare the rest
    RecordNew,
    /// Overwrite every checked name with its current value
    UpdateAll,
}

impl UpdateMode {
    /// Whether existing entries are overwritten
    #[must_use]
    pub const fn overwrites(self) -> bool {
        matches!(self, Self::UpdateAll)
    }
}

/// Outcome of checking one name
///
/// `expected` and `actual` are in storage form; see
/// [`crate::format::unwrap_storage`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    /// Whether the name passed
    pub pass: bool,
    /// Stored text the value was compared with
    pub expected: String,
    /// Current serialized text
    pub actual: String,
}

/// Per-session counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotSummary {
    /// Entries written for names that had none
    pub added: usize,
    /// Entries equal to the current value
    pub matched: usize,
    /// Entries that differ from the current value (record-new only)
    pub unmatched: usize,
    /// Entries overwritten with a different value (update-all only)
    pub updated: usize,
    /// Unchecked entries pruned
    pub removed: usize,
}

impl SnapshotSummary {
    /// Number of names checked this session
    #[must_use]
    pub const fn checked(&self) -> usize {
        self.added + self.matched + self.unmatched + self.updated
    }
}

/// What [`SnapshotStore::save`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// File rewritten with the current entries
    Written,
    /// Store empty, file deleted
    Removed,
    /// Nothing changed since load
    Unchanged,
}

/// Entries of one snapshot file plus this session's bookkeeping
#[derive(Debug)]
pub struct SnapshotStore {
    file: SnapshotFile,
    mode: UpdateMode,
    entries: SnapshotEntries,
    checked: HashSet<String>,
    dirty: bool,
    summary: SnapshotSummary,
}

impl SnapshotStore {
    /// Load the snapshot file at `path`; a missing file gives an empty store
    pub fn open(path: impl AsRef<Path>, mode: UpdateMode) -> BancheckResult<Self> {
        let file = SnapshotFile::new(path.as_ref());
        let entries = file.load()?;
        Ok(Self {
            file,
            mode,
            entries,
            checked: HashSet::new(),
            dirty: false,
            summary: SnapshotSummary::default(),
        })
    }

    /// Serialize `value` and check it against the entry for `name`
    pub fn check(&mut self, name: &str, value: &Value, formatter: &Formatter) -> MatchResult {
        let received = formatter.serialize_for_storage(value);
        self.check_serialized(name, received)
    }

    /// Check already-serialized (storage form) text against the entry for `name`
    ///
    /// A name without an entry is recorded and passes in either mode. An
    /// existing entry is overwritten under [`UpdateMode::UpdateAll`] and
    /// passes; under [`UpdateMode::RecordNew`] it passes only if the text is
    /// byte-identical. The name is marked checked either way.
    pub fn check_serialized(&mut self, name: &str, received: String) -> MatchResult {
        self.checked.insert(name.to_string());

        let Some(stored) = self.entries.get(name) else {
            tracing::debug!(name, mode = ?self.mode, "recording new snapshot");
            self.summary.added += 1;
            self.write(name, received.clone());
            return MatchResult {
                pass: true,
                expected: received.clone(),
                actual: received,
            };
        };

        let expected = stored.clone();
        let equal = expected == received;

        if equal {
            tracing::debug!(name, "snapshot matched");
            self.summary.matched += 1;
            return MatchResult {
                pass: true,
                expected,
                actual: received,
            };
        }

        if self.mode.overwrites() {
            tracing::debug!(name, "updating snapshot");
            self.summary.updated += 1;
            self.write(name, received.clone());
            MatchResult {
                pass: true,
                expected,
                actual: received,
            }
        } else {
            tracing::debug!(name, "snapshot mismatch");
            self.summary.unmatched += 1;
            MatchResult {
                pass: false,
                expected,
                actual: received,
            }
        }
    }

    fn write(&mut self, name: &str, serialized: String) {
        self.entries.insert(name.to_string(), serialized);
        self.dirty = true;
    }

    /// Names with an entry that were not checked this session
    #[must_use]
    pub fn unchecked_names(&self) -> Vec<String> {
        self.entries
            .keys()
            .filter(|name| !self.checked.contains(*name))
            .cloned()
            .collect()
    }

    /// Drop every entry not checked this session; returns the dropped names
    pub fn remove_unchecked_keys(&mut self) -> Vec<String> {
        let stale = self.unchecked_names();
        for name in &stale {
            self.entries.remove(name);
        }
        if !stale.is_empty() {
            tracing::debug!(removed = stale.len(), "pruned unchecked snapshots");
            self.summary.removed += stale.len();
            self.dirty = true;
        }
        stale
    }

    /// Write the entries back to the snapshot file
    ///
    /// Only touches the disk when something changed; an empty store deletes
    /// an existing file instead of writing an empty one.
    pub fn save(&mut self) -> BancheckResult<SaveOutcome> {
        let outcome = if self.entries.is_empty() {
            if self.file.exists() {
                self.file.remove()?;
                SaveOutcome::Removed
            } else {
                SaveOutcome::Unchanged
            }
        } else if self.dirty {
            self.file.save(&self.entries)?;
            SaveOutcome::Written
        } else {
            SaveOutcome::Unchanged
        };
        self.dirty = false;
        Ok(outcome)
    }

    /// Stored text for `name` (storage form)
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    /// Stored names, sorted
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Number of entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store has no entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether there are unsaved changes
    #[must_use]
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Counters for this session
    #[must_use]
    pub const fn summary(&self) -> SnapshotSummary {
        self.summary
    }

    /// Write policy
    #[must_use]
    pub const fn mode(&self) -> UpdateMode {
        self.mode
    }

    /// Snapshot file path
    #[must_use]
    pub fn path(&self) -> &Path {
        self.file.path()
    }
}
