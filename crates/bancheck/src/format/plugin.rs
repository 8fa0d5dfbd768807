//! Type-specific formatting plugins.
//!
//! Plugins are consulted in registration order at every nesting level,
//! before the built-in printer. The first plugin whose [`Plugin::test`]
//! accepts a value renders it; children can be handed back to the
//! [`Printer`] so they go through the same plugin chain.

use super::printer::Printer;
use super::value::Value;

/// Custom rendering for a family of values
pub trait Plugin: Send + Sync {
    /// Whether this plugin renders `value`
    fn test(&self, value: &Value) -> bool;

    /// Render `value`
    ///
    /// `indentation` is the prefix of the line the value starts on and
    /// `depth` the number of containers already entered. Multi-line output
    /// should indent nested lines with [`Printer::indent_next`].
    fn serialize(
        &self,
        value: &Value,
        printer: &Printer<'_>,
        indentation: &str,
        depth: usize,
    ) -> String;
}

/// Adapts a pair of closures into a [`Plugin`]
pub struct FnPlugin<T, S> {
    test: T,
    serialize: S,
}

impl<T, S> FnPlugin<T, S>
where
    T: Fn(&Value) -> bool + Send + Sync,
    S: Fn(&Value, &Printer<'_>, &str, usize) -> String + Send + Sync,
{
    /// Create a plugin from a test and a render function
    pub const fn new(test: T, serialize: S) -> Self {
        Self { test, serialize }
    }
}

impl<T, S> std::fmt::Debug for FnPlugin<T, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnPlugin").finish_non_exhaustive()
    }
}

impl<T, S> Plugin for FnPlugin<T, S>
where
    T: Fn(&Value) -> bool + Send + Sync,
    S: Fn(&Value, &Printer<'_>, &str, usize) -> String + Send + Sync,
{
    fn test(&self, value: &Value) -> bool {
        (self.test)(value)
    }

    fn serialize(
        &self,
        value: &Value,
        printer: &Printer<'_>,
        indentation: &str,
        depth: usize,
    ) -> String {
        (self.serialize)(value, printer, indentation, depth)
    }
}
