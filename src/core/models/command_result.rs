use std::fmt;

/// Exit status of an external command.
///
/// Captured execution preserves the exact process exit code. Loud
/// execution inherits the caller's stdio and only a boolean success
/// survives; `Unknown` is that 2-valued indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    /// Exact exit code reported by the process.
    Exact(i32),
    /// Loud mode: the true exit code was lost, only success/failure is known.
    Unknown { success: bool },
}

impl fmt::Display for ExitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitStatus::Exact(code) => write!(f, "{code}"),
            // Placeholder statuses, matching the historical lossy behavior.
            ExitStatus::Unknown { success: true } => write!(f, "0"),
            ExitStatus::Unknown { success: false } => write!(f, "1"),
        }
    }
}

/// Normalized outcome of one external command invocation.
///
/// A nonzero exit is never raised as an error; it is reported here as
/// `success == false` for the caller to branch on. Only a failure to
/// spawn the shell at all surfaces as `NexoformError::CommandSpawn`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    pub success: bool,
    pub exit_status: ExitStatus,
    /// Captured standard output. Empty in loud mode, where output goes
    /// straight to the inherited streams instead.
    pub stdout: String,
}
