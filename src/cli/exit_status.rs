use std::process::ExitCode;

/// Exit status of the CLI.
///
/// - `Success` (0): all files processed
/// - `Failure` (1): dry run found tags that would change
/// - `Error` (2): run aborted (parse error, I/O error, bad configuration)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    /// All files processed.
    Success,
    /// Dry run found pending changes.
    Failure,
    /// Run aborted by an error.
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
