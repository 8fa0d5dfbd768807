//! Session options and default merging.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Snapshot file used when no path is given, relative to the working directory
pub const DEFAULT_SNAPSHOT_PATH: &str = "bancheck/snapshots.snap";

/// Lines of unchanged context shown around each diff hunk
pub const DEFAULT_DIFF_CONTEXT_LINES: usize = 3;

/// Effective options for one session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Options {
    /// Snapshot file for the session
    pub snapshot_path: PathBuf,
    /// Context radius of failure diffs
    pub diff_context_lines: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            snapshot_path: PathBuf::from(DEFAULT_SNAPSHOT_PATH),
            diff_context_lines: DEFAULT_DIFF_CONTEXT_LINES,
        }
    }
}

impl Options {
    /// Create default options
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the snapshot file
    #[must_use]
    pub fn with_snapshot_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.snapshot_path = path.into();
        self
    }

    /// Set the diff context radius
    #[must_use]
    pub const fn with_diff_context_lines(mut self, lines: usize) -> Self {
        self.diff_context_lines = lines;
        self
    }

    /// Snapshot file path
    #[must_use]
    pub fn snapshot_path(&self) -> &Path {
        &self.snapshot_path
    }

    /// Overlay `overrides` on `defaults`
    ///
    /// Every field present in `overrides` replaces the default; absent
    /// fields keep it. Neither input is modified.
    #[must_use]
    pub fn merge(defaults: &Self, overrides: &OptionOverrides) -> Self {
        Self {
            snapshot_path: overrides
                .snapshot_path
                .clone()
                .unwrap_or_else(|| defaults.snapshot_path.clone()),
            diff_context_lines: overrides
                .diff_context_lines
                .unwrap_or(defaults.diff_context_lines),
        }
    }
}

/// Caller-supplied options; unset fields fall back to [`Options::default`]
///
/// Deserializes from a mapping with `snapshotPath` / `snapshot_path` and
/// `diffContextLines` / `diff_context_lines` keys. Unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionOverrides {
    /// Snapshot file override
    #[serde(default, alias = "snapshotPath", skip_serializing_if = "Option::is_none")]
    pub snapshot_path: Option<PathBuf>,
    /// Diff context override
    #[serde(
        default,
        alias = "diffContextLines",
        skip_serializing_if = "Option::is_none"
    )]
    pub diff_context_lines: Option<usize>,
}

impl OptionOverrides {
    /// No overrides
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the snapshot file
    #[must_use]
    pub fn with_snapshot_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.snapshot_path = Some(path.into());
        self
    }

    /// Override the diff context radius
    #[must_use]
    pub const fn with_diff_context_lines(mut self, lines: usize) -> Self {
        self.diff_context_lines = Some(lines);
        self
    }

    /// Layer `other` on top of `self`, `other` winning where set
    #[must_use]
    pub fn or(self, other: Self) -> Self {
        Self {
            snapshot_path: other.snapshot_path.or(self.snapshot_path),
            diff_context_lines: other.diff_context_lines.or(self.diff_context_lines),
        }
    }

    /// Merge over the built-in defaults
    #[must_use]
    pub fn resolve(&self) -> Options {
        Options::merge(&Options::default(), self)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = Options::default();
        assert_eq!(options.snapshot_path(), Path::new("bancheck/snapshots.snap"));
        assert_eq!(options.diff_context_lines, 3);
    }

    #[test]
    fn test_merge_without_overrides_keeps_defaults() {
        let defaults = Options::new().with_diff_context_lines(5);
        let merged = Options::merge(&defaults, &OptionOverrides::new());
        assert_eq!(merged, defaults);
    }

    #[test]
    fn test_merge_overrides_win() {
        let defaults = Options::default();
        let overrides = OptionOverrides::new().with_snapshot_path("out/x.snap");
        let merged = Options::merge(&defaults, &overrides);
        assert_eq!(merged.snapshot_path, PathBuf::from("out/x.snap"));
        assert_eq!(merged.diff_context_lines, DEFAULT_DIFF_CONTEXT_LINES);
        // inputs untouched
        assert_eq!(defaults, Options::default());
        assert_eq!(overrides.diff_context_lines, None);
    }

    #[test]
    fn test_overrides_deserialize_both_spellings() {
        let camel: OptionOverrides =
            serde_json::from_str(r#"{"snapshotPath": "a.snap", "diffContextLines": 1}"#).unwrap();
        let snake: OptionOverrides =
            serde_json::from_str(r#"{"snapshot_path": "a.snap", "diff_context_lines": 1}"#)
                .unwrap();
        assert_eq!(camel, snake);
        assert_eq!(camel.resolve().diff_context_lines, 1);
    }

    #[test]
    fn test_overrides_ignore_unknown_keys() {
        let overrides: OptionOverrides =
            serde_json::from_str(r#"{"colour": "red", "snapshotPath": "b.snap"}"#).unwrap();
        assert_eq!(overrides.snapshot_path, Some(PathBuf::from("b.snap")));
    }

    #[test]
    fn test_overrides_layering() {
        let file = OptionOverrides::new()
            .with_snapshot_path("file.snap")
            .with_diff_context_lines(7);
        let flags = OptionOverrides::new().with_snapshot_path("flag.snap");
        let layered = file.or(flags);
        assert_eq!(layered.snapshot_path, Some(PathBuf::from("flag.snap")));
        assert_eq!(layered.diff_context_lines, Some(7));
    }
}
