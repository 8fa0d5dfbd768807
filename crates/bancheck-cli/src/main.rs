//! Bancheck CLI: snapshot checks from the command line
//!
//! ## Usage
//!
//! ```bash
//! bancheck verify values.json                   # Record new names, diff known ones
//! bancheck accept values.yaml                   # Accept everything, prune stale names
//! bancheck verify values.json --format json     # Machine-readable report
//! bancheck list --snapshot-path out/app.snap    # Show stored names
//! ```

use bancheck_cli::{
    handlers::{self, verify::check_report},
    logging, Cli, CliConfig, CliResult, ColorChoice, Commands, Verbosity,
};
use clap::Parser;
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();

    let config = build_config(&cli);
    logging::init(&config);

    match cli.command {
        Commands::Accept(args) => handlers::execute_accept(&config, &args).map(|_| ()),
        Commands::Verify(args) => {
            let report = handlers::execute_verify(&config, &args)?;
            check_report(&report)
        }
        Commands::List(args) => handlers::execute_list(&config, &args),
    }
}

fn build_config(cli: &Cli) -> CliConfig {
    let verbosity = Verbosity::from_flags(cli.quiet, cli.verbose);
    let color: ColorChoice = cli.color.into();

    CliConfig::new().with_verbosity(verbosity).with_color(color)
}
