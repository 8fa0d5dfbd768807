//! Output formatting for snapshot reports

use crate::error::CliResult;
use bancheck::{AcceptReport, SnapshotSummary, VerifyReport};
use console::{style, Style, Term};
use serde::{Deserialize, Serialize};

/// Output format for reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Text,
    /// JSON output
    Json,
}

/// Writes reports to stdout
#[derive(Debug)]
pub struct Reporter {
    term: Term,
    /// Whether to use colors
    pub use_color: bool,
    /// Quiet mode
    pub quiet: bool,
}

impl Default for Reporter {
    fn default() -> Self {
        Self::new(false, false)
    }
}

impl Reporter {
    /// Create a new reporter
    #[must_use]
    pub fn new(use_color: bool, quiet: bool) -> Self {
        Self {
            term: Term::stdout(),
            use_color,
            quiet,
        }
    }

    /// Print an accept report
    pub fn accept(&self, report: &AcceptReport, format: OutputFormat) -> CliResult<()> {
        let text = match format {
            OutputFormat::Json => render_json(report)?,
            OutputFormat::Text if self.quiet => return Ok(()),
            OutputFormat::Text => render_accept_text(report, self.use_color),
        };
        self.write(&text)
    }

    /// Print a verify report; failures are printed even in quiet mode
    pub fn verify(&self, report: &VerifyReport, format: OutputFormat) -> CliResult<()> {
        let text = match format {
            OutputFormat::Json => render_json(report)?,
            OutputFormat::Text => render_verify_text(report, self.use_color, self.quiet),
        };
        self.write(&text)
    }

    /// Print one line per stored name
    pub fn names<'a>(&self, names: impl IntoIterator<Item = &'a str>) -> CliResult<()> {
        for name in names {
            self.term.write_line(name)?;
        }
        Ok(())
    }

    fn write(&self, text: &str) -> CliResult<()> {
        if !text.is_empty() {
            self.term.write_line(text.trim_end_matches('\n'))?;
        }
        Ok(())
    }
}

/// Pretty JSON rendering of any report
pub fn render_json<T: Serialize>(report: &T) -> CliResult<String> {
    Ok(serde_json::to_string_pretty(report).map_err(bancheck::BancheckError::from)?)
}

/// Text rendering of an accept report
#[must_use]
pub fn render_accept_text(report: &AcceptReport, use_color: bool) -> String {
    let mut out = String::new();
    for name in report.passes.keys() {
        out.push_str(&status_line(true, name, use_color));
    }
    out.push('\n');
    out.push_str(&summary_line("ACCEPTED", &report.summary, 0, use_color));
    out
}

/// Text rendering of a verify report
#[must_use]
pub fn render_verify_text(report: &VerifyReport, use_color: bool, quiet: bool) -> String {
    let mut out = String::new();
    if !quiet {
        for name in report.passes.keys() {
            out.push_str(&status_line(true, name, use_color));
        }
    }
    for (name, fail) in &report.fails {
        out.push_str(&status_line(false, name, use_color));
        out.push_str(&style_diff(&fail.diff, use_color));
        if !fail.diff.ends_with('\n') {
            out.push('\n');
        }
    }
    if quiet && report.fails.is_empty() {
        return out;
    }
    out.push('\n');
    let status = if report.is_success() { "PASSED" } else { "FAILED" };
    out.push_str(&summary_line(
        status,
        &report.summary,
        report.fails.len(),
        use_color,
    ));
    out
}

/// Color `+` lines green, `-` lines red and hunk headers cyan
#[must_use]
pub fn style_diff(diff: &str, use_color: bool) -> String {
    if !use_color {
        return diff.to_string();
    }
    let mut out = String::with_capacity(diff.len());
    for line in diff.split_inclusive('\n') {
        let styled = if line.starts_with("+++") || line.starts_with("---") {
            style(line).bold().to_string()
        } else if line.starts_with('+') {
            style(line).green().to_string()
        } else if line.starts_with('-') {
            style(line).red().to_string()
        } else if line.starts_with("@@") {
            style(line).cyan().to_string()
        } else {
            line.to_string()
        };
        out.push_str(&styled);
    }
    out
}

fn status_line(pass: bool, name: &str, use_color: bool) -> String {
    let prefix = match (pass, use_color) {
        (true, true) => style("✓").green().bold().to_string(),
        (false, true) => style("✗").red().bold().to_string(),
        (true, false) => "PASS".to_string(),
        (false, false) => "FAIL".to_string(),
    };
    format!("{prefix} {name}\n")
}

fn summary_line(status: &str, summary: &SnapshotSummary, failed: usize, use_color: bool) -> String {
    let counts = format!(
        "{} snapshots ({} added, {} matched, {} updated, {} removed, {failed} failed)",
        summary.checked(),
        summary.added,
        summary.matched,
        summary.updated,
        summary.removed,
    );
    if use_color {
        let status_style = if failed > 0 {
            Style::new().red().bold()
        } else {
            Style::new().green().bold()
        };
        format!("{} {counts}\n", status_style.apply_to(status))
    } else {
        format!("{status} {counts}\n")
    }
}
