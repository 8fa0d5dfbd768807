//! Snapshot text forms: plain, storage-wrapped, and unwrapped.
//!
//! Multi-line snapshots are stored with one extra `\n` on each side so the
//! persisted text starts on its own line. The wrapping is exactly reversible
//! with [`unwrap_storage`].

use super::printer::Formatter;
use super::value::Value;
use regex::Regex;
use std::sync::OnceLock;

/// Canonicalize `\r\n` and `\r` to `\n`
#[must_use]
pub fn normalize_line_breaks(input: &str) -> String {
    static BREAKS: OnceLock<Regex> = OnceLock::new();
    let breaks = BREAKS.get_or_init(|| Regex::new(r"\r\n|\r").expect("valid regex"));
    breaks.replace_all(input, "\n").into_owned()
}

/// Surround multi-line text with a leading and trailing `\n`
#[must_use]
pub fn wrap_for_storage(plain: &str) -> String {
    if plain.contains('\n') {
        format!("\n{plain}\n")
    } else {
        plain.to_string()
    }
}

/// Strip one `\n` from each end if both ends have one
#[must_use]
pub fn unwrap_storage(stored: &str) -> String {
    if stored.starts_with('\n') && stored.ends_with('\n') {
        if stored.len() == 1 {
            return String::new();
        }
        stored[1..stored.len() - 1].to_string()
    } else {
        stored.to_string()
    }
}

impl Formatter {
    /// Canonical text for a value, as shown to callers and used for diffs
    #[must_use]
    pub fn serialize_plain(&self, value: &Value) -> String {
        let plain = normalize_line_breaks(&self.format(value));
        tracing::trace!(bytes = plain.len(), "serialized value");
        plain
    }

    /// Canonical text for a value as written to the snapshot file
    #[must_use]
    pub fn serialize_for_storage(&self, value: &Value) -> String {
        wrap_for_storage(&self.serialize_plain(value))
    }
}
