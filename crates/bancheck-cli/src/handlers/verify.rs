//! Verify command handler

use super::prepare_run;
use crate::commands::RunArgs;
use crate::config::CliConfig;
use crate::error::{CliError, CliResult};
use crate::output::Reporter;
use bancheck::{Runner, VerifyReport};

/// Execute the verify command
///
/// The report is printed before mismatches are turned into
/// [`CliError::SnapshotsFailed`].
pub fn execute_verify(config: &CliConfig, args: &RunArgs) -> CliResult<VerifyReport> {
    let (tests, options) = prepare_run(args)?;
    let report = Runner::new(options).verify(&tests)?;
    tracing::info!(
        passed = report.passes.len(),
        failed = report.fails.len(),
        "verify finished"
    );

    let reporter = Reporter::new(config.color.should_color(), config.verbosity.is_quiet());
    reporter.verify(&report, args.format.into())?;
    Ok(report)
}

/// Map a verify report to the command outcome
pub fn check_report(report: &VerifyReport) -> CliResult<()> {
    if report.is_success() {
        Ok(())
    } else {
        Err(CliError::SnapshotsFailed {
            failed: report.fails.len(),
        })
    }
}
