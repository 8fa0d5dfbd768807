//! Value formatting for snapshots.
//!
//! - [`Value`]: the structured data model
//! - [`Formatter`]: structural printer plus ordered [`Plugin`] chain
//! - [`serialize`]: line-break normalization and storage wrapping

pub mod plugin;
pub mod printer;
pub mod serialize;
pub mod value;

pub use plugin::{FnPlugin, Plugin};
pub use printer::{FormatConfig, Formatter, Printer};
pub use serialize::{normalize_line_breaks, unwrap_storage, wrap_for_storage};
pub use value::Value;
