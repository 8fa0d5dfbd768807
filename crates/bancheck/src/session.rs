//! Session runner: checks a batch of named values and builds the report.
//!
//! A session opens the store once, checks every name in input order, and
//! saves once at the end.
//!
//! - [`Runner::accept_all`]: the current values are correct. Every entry is
//!   overwritten, entries for names not supplied are pruned.
//! - [`Runner::verify`]: new names are recorded, known names are compared,
//!   stale entries are left alone.

use crate::config::Options;
use crate::diff::{diff_text, DiffOptions};
use crate::format::{unwrap_storage, Formatter, Value};
use crate::result::BancheckResult;
use crate::store::{MatchResult, SnapshotStore, SnapshotSummary, UpdateMode};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Named actual values, in the order they will be checked
///
/// Names are unique: inserting an existing name replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tests {
    entries: Vec<(String, Value)>,
}

impl Tests {
    /// Empty set of tests
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a named value
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    /// Add or replace a named value
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        let name = name.into();
        let value = value.into();
        if let Some(slot) = self.entries.iter_mut().find(|(n, _)| *n == name) {
            slot.1 = value;
        } else {
            self.entries.push((name, value));
        }
    }

    /// Value for `name`
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    /// Names in check order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    /// Entries in check order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Number of tests
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no tests
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Tests {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut tests = Self::new();
        for (name, value) in iter {
            tests.insert(name, value);
        }
        tests
    }
}

/// A failed comparison, with both sides unwrapped for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailedSnapshot {
    /// Stored text
    pub expected: String,
    /// Current text
    pub actual: String,
    /// Unified diff of expected against actual
    pub diff: String,
}

/// Result of [`Runner::accept_all`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcceptReport {
    /// Plain serialized value per name
    pub passes: BTreeMap<String, String>,
    /// Store counters
    pub summary: SnapshotSummary,
}

/// Result of [`Runner::verify`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyReport {
    /// Plain serialized value per passing name
    pub passes: BTreeMap<String, String>,
    /// Diagnostics per failing name
    pub fails: BTreeMap<String, FailedSnapshot>,
    /// Store counters
    pub summary: SnapshotSummary,
}

impl VerifyReport {
    /// Whether every name passed
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.fails.is_empty()
    }
}

/// Raw outcome of [`Runner::run`], before reporting
#[derive(Debug)]
pub struct SessionRun {
    /// Match result per name, in input order
    pub results: Vec<(String, MatchResult)>,
    /// Store after all checks, not yet saved
    pub store: SnapshotStore,
}

/// Runs sessions with fixed options and formatter
#[derive(Debug, Default)]
pub struct Runner {
    options: Options,
    formatter: Formatter,
}

impl Runner {
    /// Runner with the default formatter
    #[must_use]
    pub fn new(options: Options) -> Self {
        Self {
            options,
            formatter: Formatter::new(),
        }
    }

    /// Use a custom formatter (plugins, printer config)
    #[must_use]
    pub fn with_formatter(mut self, formatter: Formatter) -> Self {
        self.formatter = formatter;
        self
    }

    /// Effective options
    #[must_use]
    pub const fn options(&self) -> &Options {
        &self.options
    }

    /// Formatter in use
    #[must_use]
    pub const fn formatter(&self) -> &Formatter {
        &self.formatter
    }

    /// Open the store and check every test in order; nothing is saved
    pub fn run(&self, tests: &Tests, mode: UpdateMode) -> BancheckResult<SessionRun> {
        let mut store = SnapshotStore::open(self.options.snapshot_path(), mode)?;
        tracing::debug!(
            path = %self.options.snapshot_path().display(),
            ?mode,
            tests = tests.len(),
            "running snapshot session"
        );

        let results = tests
            .iter()
            .map(|(name, value)| {
                let result = store.check(name, value, &self.formatter);
                (name.to_string(), result)
            })
            .collect();

        Ok(SessionRun { results, store })
    }

    /// Accept the current values as correct
    ///
    /// Overwrites every supplied name, prunes entries for names not supplied
    /// and saves. Every name passes.
    pub fn accept_all(&self, tests: &Tests) -> BancheckResult<AcceptReport> {
        let SessionRun { results, mut store } = self.run(tests, UpdateMode::UpdateAll)?;
        store.remove_unchecked_keys();
        store.save()?;

        let passes = results
            .into_iter()
            .map(|(name, result)| (name, unwrap_storage(&result.actual)))
            .collect();

        Ok(AcceptReport {
            passes,
            summary: store.summary(),
        })
    }

    /// Compare against stored values, recording names seen for the first time
    ///
    /// Entries for names not supplied are kept.
    pub fn verify(&self, tests: &Tests) -> BancheckResult<VerifyReport> {
        let SessionRun { results, mut store } = self.run(tests, UpdateMode::RecordNew)?;
        store.save()?;

        let diff_options =
            DiffOptions::default().with_context_lines(self.options.diff_context_lines);
        let mut passes = BTreeMap::new();
        let mut fails = BTreeMap::new();

        for (name, result) in results {
            if result.pass {
                passes.insert(name, unwrap_storage(&result.actual));
            } else {
                let expected = unwrap_storage(&result.expected);
                let actual = unwrap_storage(&result.actual);
                let diff = diff_text(&expected, &actual, &diff_options);
                fails.insert(
                    name,
                    FailedSnapshot {
                        expected,
                        actual,
                        diff,
                    },
                );
            }
        }

        if !fails.is_empty() {
            tracing::debug!(failed = fails.len(), "snapshot verification failed");
        }

        Ok(VerifyReport {
            passes,
            fails,
            summary: store.summary(),
        })
    }
}

/// [`Runner::accept_all`] with the default formatter
pub fn accept_all(tests: &Tests, options: &Options) -> BancheckResult<AcceptReport> {
    Runner::new(options.clone()).accept_all(tests)
}

/// [`Runner::verify`] with the default formatter
pub fn verify(tests: &Tests, options: &Options) -> BancheckResult<VerifyReport> {
    Runner::new(options.clone()).verify(tests)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn options(temp: &TempDir) -> Options {
        Options::new().with_snapshot_path(temp.path().join("snapshots.snap"))
    }

    mod tests_tests {
        use super::*;

        #[test]
        fn test_insert_replaces_in_place() {
            let mut tests = Tests::new().with("a", 1).with("b", 2);
            tests.insert("a", 3);
            assert_eq!(tests.names().collect::<Vec<_>>(), vec!["a", "b"]);
            assert_eq!(tests.get("a"), Some(&Value::Int(3)));
            assert_eq!(tests.len(), 2);
        }

        #[test]
        fn test_from_iterator() {
            let tests: Tests = [("x", 1), ("y", 2)].into_iter().collect();
            assert_eq!(tests.len(), 2);
            assert!(!tests.is_empty());
        }
    }

    mod run_tests {
        use super::*;

        #[test]
        fn test_run_does_not_save() {
            let temp = TempDir::new().unwrap();
            let runner = Runner::new(options(&temp));
            let run = runner
                .run(&Tests::new().with("foo", 1), UpdateMode::RecordNew)
                .unwrap();
            assert_eq!(run.results.len(), 1);
            assert!(run.store.is_dirty());
            assert!(!temp.path().join("snapshots.snap").exists());
        }

        #[test]
        fn test_results_follow_input_order() {
            let temp = TempDir::new().unwrap();
            let runner = Runner::new(options(&temp));
            let tests = Tests::new().with("z", 1).with("a", 2).with("m", 3);
            let run = runner.run(&tests, UpdateMode::UpdateAll).unwrap();
            let names: Vec<&str> = run.results.iter().map(|(n, _)| n.as_str()).collect();
            assert_eq!(names, vec!["z", "a", "m"]);
        }
    }

    mod accept_tests {
        use super::*;

        #[test]
        fn test_accept_records_plain_passes() {
            let temp = TempDir::new().unwrap();
            let report = accept_all(
                &Tests::new().with("list", Value::array([1, 2])),
                &options(&temp),
            )
            .unwrap();
            assert_eq!(report.passes["list"], "Array [\n  1,\n  2,\n]");
            assert_eq!(report.summary.added, 1);
        }

        #[test]
        fn test_accept_prunes_and_updates() {
            let temp = TempDir::new().unwrap();
            let opts = options(&temp);
            accept_all(&Tests::new().with("a", 1).with("b", 2), &opts).unwrap();

            let report = accept_all(&Tests::new().with("a", 5), &opts).unwrap();
            assert_eq!(report.summary.updated, 1);
            assert_eq!(report.summary.removed, 1);

            let store = SnapshotStore::open(opts.snapshot_path(), UpdateMode::RecordNew).unwrap();
            assert_eq!(store.names().collect::<Vec<_>>(), vec!["a"]);
            assert_eq!(store.get("a"), Some("5"));
        }
    }

    mod verify_tests {
        use super::*;

        #[test]
        fn test_verify_unwraps_multi_line_failures() {
            let temp = TempDir::new().unwrap();
            let opts = options(&temp);
            accept_all(&Tests::new().with("list", Value::array([1])), &opts).unwrap();

            let report = verify(&Tests::new().with("list", Value::array([2])), &opts).unwrap();
            let fail = &report.fails["list"];
            assert_eq!(fail.expected, "Array [\n  1,\n]");
            assert_eq!(fail.actual, "Array [\n  2,\n]");
            assert!(fail.diff.contains("-  1,"));
            assert!(fail.diff.contains("+  2,"));
            assert!(!report.is_success());
            assert_eq!(report.summary.unmatched, 1);
        }

        #[test]
        fn test_verify_diff_context_from_options() {
            let temp = TempDir::new().unwrap();
            let opts = options(&temp).with_diff_context_lines(0);
            let long = Value::array([1, 2, 3, 4, 5]);
            accept_all(&Tests::new().with("long", long), &opts).unwrap();

            let changed = Value::array([1, 2, 30, 4, 5]);
            let report = verify(&Tests::new().with("long", changed), &opts).unwrap();
            let diff = &report.fails["long"].diff;
            assert!(diff.contains("+  30,"));
            assert!(!diff.contains("  1,\n"));
        }

        #[test]
        fn test_custom_formatter_is_used() {
            let temp = TempDir::new().unwrap();
            let formatter = Formatter::new().with_plugin(crate::format::FnPlugin::new(
                |v: &Value| matches!(v, Value::Int(_)),
                |v: &Value, _: &crate::format::Printer<'_>, _: &str, _: usize| {
                    format!("int:{}", if let Value::Int(i) = v { *i } else { 0 })
                },
            ));
            let runner = Runner::new(options(&temp)).with_formatter(formatter);
            let report = runner.verify(&Tests::new().with("n", 7)).unwrap();
            assert_eq!(report.passes["n"], "int:7");
            assert_eq!(runner.formatter().plugin_count(), 1);
        }
    }
}
