use std::path::PathBuf;

use crate::issues::Issue;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Inline,
    Extract,
    Lint,
    Init,
}

#[derive(Debug)]
pub enum CommandSummary {
    Inline(InlineSummary),
    Extract(ExtractSummary),
    Lint,
    Init(InitSummary),
}

impl CommandSummary {
    pub fn kind(&self) -> CommandKind {
        match self {
            CommandSummary::Inline(_) => CommandKind::Inline,
            CommandSummary::Extract(_) => CommandKind::Extract,
            CommandSummary::Lint => CommandKind::Lint,
            CommandSummary::Init(_) => CommandKind::Init,
        }
    }
}

#[derive(Debug, Default)]
pub struct InlineSummary {
    pub replaced_count: usize,
    pub generated_count: usize,
    /// Files written; empty when output went to stdout.
    pub written: Vec<PathBuf>,
}

#[derive(Debug, Default)]
pub struct ExtractSummary {
    pub entry_count: usize,
    /// Catalog file written, `None` for stdout.
    pub written: Option<PathBuf>,
}

#[derive(Debug)]
pub struct InitSummary {
    pub created: bool,
    pub error: Option<String>,
}

/// A file whose pass was aborted. Other files are unaffected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFailure {
    pub file_path: String,
    /// Already carries `file:line:col` when the failure has a position.
    pub message: String,
}

/// Result of running msginline commands
#[derive(Debug)]
pub struct CommandResult {
    pub summary: CommandSummary,
    pub error_count: usize,
    pub warning_count: usize,
    /// Lint diagnostics, sorted by location.
    /// Empty for other commands.
    pub issues: Vec<Issue>,
    pub failures: Vec<FileFailure>,
    /// Number of source files that were read, stdin included.
    pub files_processed: usize,
}

impl CommandResult {
    pub fn kind(&self) -> CommandKind {
        self.summary.kind()
    }

    pub fn has_problems(&self) -> bool {
        self.error_count > 0 || self.warning_count > 0
    }
}
