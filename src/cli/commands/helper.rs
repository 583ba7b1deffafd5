use super::{CommandResult, CommandSummary, FileFailure};
use crate::issues::{Issue, Severity};

pub fn finish(
    summary: CommandSummary,
    mut issues: Vec<Issue>,
    mut failures: Vec<FileFailure>,
    files_processed: usize,
) -> CommandResult {
    issues.sort();
    failures.sort_by(|a, b| a.file_path.cmp(&b.file_path));

    let mut error_count = issues
        .iter()
        .filter(|i| i.severity() == Severity::Error)
        .count()
        + failures.len();

    let warning_count = issues
        .iter()
        .filter(|i| i.severity() == Severity::Warning)
        .count();

    if let CommandSummary::Init(ref summary) = summary
        && summary.error.is_some()
    {
        error_count += 1;
    }

    CommandResult {
        summary,
        error_count,
        warning_count,
        issues,
        failures,
        files_processed,
    }
}
