//! Bancheck: snapshot assertions for named values
//!
//! Give bancheck a set of named actual values. The first time a name is
//! seen its serialized value is recorded in a snapshot file; on later runs
//! the value is compared with the recording and mismatches come back with a
//! line diff.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────┐   ┌────────────┐   ┌─────────────────┐   ┌──────────────┐
//! │  Tests    │──►│ Formatter  │──►│ SnapshotStore   │──►│ Snapshot     │
//! │ name→Value│   │ + Plugins  │   │ check / prune   │   │ file (YAML)  │
//! └───────────┘   └────────────┘   └─────────────────┘   └──────────────┘
//!                                          │
//!                                          ▼
//!                                 ┌─────────────────┐
//!                                 │ Runner: passes, │
//!                                 │ fails + diffs   │
//!                                 └─────────────────┘
//! ```
//!
//! # Example
//!
//! ```no_run
//! use bancheck::{verify, Options, Tests, Value};
//!
//! let tests = Tests::new()
//!     .with("answer", 42)
//!     .with("greeting", "hello")
//!     .with("list", Value::array([1, 2, 3]));
//!
//! let report = verify(&tests, &Options::default())?;
//! for (name, failure) in &report.fails {
//!     eprintln!("{name}\n{}", failure.diff);
//! }
//! # Ok::<(), bancheck::BancheckError>(())
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod diff;
pub mod format;
pub mod json;
pub mod persist;
mod result;
pub mod session;
pub mod store;

pub use config::{OptionOverrides, Options, DEFAULT_SNAPSHOT_PATH};
pub use diff::{diff_text, DiffOptions};
pub use format::{FnPlugin, FormatConfig, Formatter, Plugin, Printer, Value};
pub use persist::SnapshotFile;
pub use result::{BancheckError, BancheckResult};
pub use session::{
    accept_all, verify, AcceptReport, FailedSnapshot, Runner, SessionRun, Tests, VerifyReport,
};
pub use store::{MatchResult, SaveOutcome, SnapshotStore, SnapshotSummary, UpdateMode};
