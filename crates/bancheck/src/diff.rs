//! Line diffs between expected and actual snapshot text.

use similar::TextDiff;

/// Returned when two inputs produce no diff lines
pub const NO_VISUAL_DIFFERENCE: &str = "Compared values have no visual difference.";

/// Labels and context for a failure diff
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffOptions {
    /// Header label for the stored side
    pub expected_label: String,
    /// Header label for the current side
    pub actual_label: String,
    /// Unchanged lines shown around each hunk
    pub context_lines: usize,
}

impl Default for DiffOptions {
    fn default() -> Self {
        Self {
            expected_label: "Expected".to_string(),
            actual_label: "Actual".to_string(),
            context_lines: crate::config::DEFAULT_DIFF_CONTEXT_LINES,
        }
    }
}

impl DiffOptions {
    /// Set the context radius
    #[must_use]
    pub const fn with_context_lines(mut self, lines: usize) -> Self {
        self.context_lines = lines;
        self
    }
}

/// Unified diff of `expected` against `actual`
///
/// Both sides get a terminating newline before diffing so a missing final
/// newline never shows up as a change.
#[must_use]
pub fn diff_text(expected: &str, actual: &str, options: &DiffOptions) -> String {
    let expected = format!("{expected}\n");
    let actual = format!("{actual}\n");
    let diff = TextDiff::from_lines(expected.as_str(), actual.as_str());
    let unified = diff
        .unified_diff()
        .context_radius(options.context_lines)
        .header(&options.expected_label, &options.actual_label)
        .to_string();

    if unified.is_empty() {
        NO_VISUAL_DIFFERENCE.to_string()
    } else {
        unified
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_single_line_change() {
        let out = diff_text("42", "43", &DiffOptions::default());
        assert!(out.contains("--- Expected"));
        assert!(out.contains("+++ Actual"));
        assert!(out.contains("-42"));
        assert!(out.contains("+43"));
    }

    #[test]
    fn test_identical_inputs() {
        let out = diff_text("same", "same", &DiffOptions::default());
        assert_eq!(out, NO_VISUAL_DIFFERENCE);
    }

    #[test]
    fn test_context_radius() {
        let expected = "a\nb\nc\nd\ne\nf\ng";
        let actual = "a\nb\nc\nD\ne\nf\ng";
        let narrow = diff_text(expected, actual, &DiffOptions::default().with_context_lines(0));
        assert!(!narrow.contains(" c"));
        let wide = diff_text(expected, actual, &DiffOptions::default().with_context_lines(3));
        assert!(wide.contains(" c"));
        assert!(wide.contains(" a"));
    }

    #[test]
    fn test_multi_line_object_diff() {
        let expected = "Object {\n  \"a\": 1,\n}";
        let actual = "Object {\n  \"a\": 2,\n}";
        let out = diff_text(expected, actual, &DiffOptions::default());
        assert!(out.contains("-  \"a\": 1,"));
        assert!(out.contains("+  \"a\": 2,"));
        assert!(out.contains(" Object {"));
    }
}
