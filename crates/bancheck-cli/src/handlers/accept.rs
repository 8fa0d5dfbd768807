//! Accept command handler

use super::prepare_run;
use crate::commands::RunArgs;
use crate::config::CliConfig;
use crate::error::CliResult;
use crate::output::Reporter;
use bancheck::{AcceptReport, Runner};

/// Execute the accept command
pub fn execute_accept(config: &CliConfig, args: &RunArgs) -> CliResult<AcceptReport> {
    let (tests, options) = prepare_run(args)?;
    let report = Runner::new(options).accept_all(&tests)?;
    tracing::info!(
        accepted = report.passes.len(),
        removed = report.summary.removed,
        "accept finished"
    );

    let reporter = Reporter::new(config.color.should_color(), config.verbosity.is_quiet());
    reporter.accept(&report, args.format.into())?;
    Ok(report)
}
