//! Dispatches to the appropriate command handler based on the parsed arguments.
//!
//! # Returns
//! - `Ok(CommandResult)` with error/warning counts for reporting
//! - `Err` if the command cannot run (e.g. invalid config, unreadable catalog)

use anyhow::Result;

use super::{
    args::{Arguments, Command},
    commands::{
        CommandResult, extract::extract, init::init, inline::inline, lint::lint,
    },
};

pub fn run(Arguments { command }: Arguments) -> Result<CommandResult> {
    match command {
        Some(Command::Inline(cmd)) => inline(cmd),
        Some(Command::Extract(cmd)) => extract(cmd),
        Some(Command::Lint(cmd)) => lint(cmd),
        Some(Command::Init) => init(),
        None => {
            anyhow::bail!("No command provided. Use --help to see available commands.")
        }
    }
}
