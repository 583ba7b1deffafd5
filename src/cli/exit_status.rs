use std::process::ExitCode;

/// Process exit status.
///
/// - `Success` (0): every file was processed and, for `lint`, nothing was reported
/// - `Failure` (1): a file failed to inline or extract, or `lint` reported diagnostics
/// - `Error` (2): the command could not run (invalid config, unreadable catalog, etc.)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    Failure,
    Error,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::from(0),
            ExitStatus::Failure => ExitCode::from(1),
            ExitStatus::Error => ExitCode::from(2),
        }
    }
}
