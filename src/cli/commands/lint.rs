use anyhow::Result;

use super::{
    CommandResult, CommandSummary, FileFailure,
    context::{RunContext, SourceText},
    helper::finish,
};
use crate::{
    cli::args::LintCommand,
    core::Session,
    issues::Issue,
    rules::lint_source,
};

pub fn lint(cmd: LintCommand) -> Result<CommandResult> {
    let ctx = RunContext::new(&cmd.common, None)?;
    let results = ctx.process_sources(lint_file)?;
    let files_processed = results.len();

    let mut issues = Vec::new();
    let mut failures = Vec::new();
    for result in results {
        match result {
            Ok(file_issues) => issues.extend(file_issues),
            Err(failure) => failures.push(failure),
        }
    }

    Ok(finish(CommandSummary::Lint, issues, failures, files_processed))
}

fn lint_file(session: &Session, source: &SourceText) -> Result<Vec<Issue>, FileFailure> {
    Ok(lint_source(session, &source.code, &source.name))
}
