//! Command-line layer: argument parsing, input discovery, command dispatch
//! and reporting.

use std::process::ExitCode;

use anyhow::Result;
use tracing::Level;

pub mod args;
pub mod commands;
mod exit_status;
pub mod report;
mod run;
pub mod scan;

pub use args::{Arguments, Command};
pub use exit_status::ExitStatus;

use commands::{CommandKind, CommandResult};

pub fn run_cli(args: Arguments) -> Result<ExitCode> {
    let verbose = args.verbose();
    init_logging(verbose);

    let Some(args) = args.with_command_or_help() else {
        return Ok(ExitStatus::Success.into());
    };

    let result = run::run(args)?;
    report::print(&result, verbose);

    Ok(exit_status_from_result(&result).into())
}

/// Route `tracing` events to stderr: warnings by default, debug with `-v`.
fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .with_target(false)
        .without_time()
        .try_init();
}

/// Lint fails on any diagnostic; the other commands fail on errors only.
pub fn exit_status_from_result(result: &CommandResult) -> ExitStatus {
    let failed = match result.kind() {
        CommandKind::Lint => result.has_problems(),
        _ => result.error_count > 0,
    };
    if failed {
        ExitStatus::Failure
    } else {
        ExitStatus::Success
    }
}
