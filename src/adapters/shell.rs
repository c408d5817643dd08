//! External command execution.
//!
//! Commands run synchronously through a shell; every call blocks until
//! the subprocess exits. There is no timeout or cancellation, so a hung
//! command hangs the caller. Callers rely on this strict ordering
//! (run `plan`, then only on success run `apply`).
//!
//! A failing command is never an error here: the outcome comes back as
//! [`CommandResult`] data for the caller to branch on. Only a shell
//! that cannot be spawned at all raises.

use std::io::Write;
use std::process::{Command, Stdio};

use tracing::debug;

use crate::core::errors::{NexoformError, Result};
use crate::core::models::command_result::{CommandResult, ExitStatus};

/// Backslash-escape double quotes in a command string.
///
/// The runners embed the caller's command inside an outer
/// double-quoted `bash -c "..."` invocation; without this, a quote in
/// the command would terminate the outer wrapper early.
pub fn escape_double_quotes(command: &str) -> String {
    command.replace('"', "\\\"")
}

/// The outer invocation handed to the POSIX shell. The escaped command
/// sits inside double quotes, so the outer shell passes it to bash as
/// one word and unescapes the quotes on the way through.
fn bash_wrapper(command: &str) -> String {
    format!("bash -c \"{}\"", escape_double_quotes(command))
}

/// Run a command through bash, capturing stdout.
///
/// Returns the exact process exit code and the full captured output.
/// When `echo_stdout` is set, the captured text is also printed to the
/// caller's stdout after the command finishes.
pub fn run_command(command: &str, echo_stdout: bool) -> Result<CommandResult> {
    debug!(command, "running captured command");
    let output = Command::new("sh")
        .arg("-c")
        .arg(bash_wrapper(command))
        .output()
        .map_err(|e| NexoformError::CommandSpawn {
            command: command.to_string(),
            reason: e.to_string(),
        })?;

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    if echo_stdout {
        print!("{stdout}");
        let _ = std::io::stdout().flush();
    }

    let code = output.status.code().unwrap_or(-1);
    Ok(CommandResult {
        success: output.status.success(),
        exit_status: ExitStatus::Exact(code),
        stdout,
    })
}

/// Run a command through bash with inherited stdio.
///
/// Output streams straight to the terminal, so interactive and
/// progress output stays visible live. The tradeoff is deliberate and
/// permanent: only boolean success survives (the exact exit code comes
/// back as [`ExitStatus::Unknown`]) and `stdout` is returned empty.
/// Callers that need the real code or the output must use
/// [`run_command`] and give up live streaming.
pub fn run_command_loud(command: &str) -> Result<CommandResult> {
    debug!(command, "running loud command");
    let status = Command::new("sh")
        .arg("-c")
        .arg(bash_wrapper(command))
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .map_err(|e| NexoformError::CommandSpawn {
            command: command.to_string(),
            reason: e.to_string(),
        })?;

    let success = status.success();
    Ok(CommandResult {
        success,
        exit_status: ExitStatus::Unknown { success },
        stdout: String::new(),
    })
}

/// Run a command through the plain POSIX shell, capturing stdout.
///
/// Same contract as [`run_command`] but via `sh -c`, for commands that
/// must not assume bash is installed.
pub fn run_sh(command: &str, echo_stdout: bool) -> Result<CommandResult> {
    debug!(command, "running sh command");
    let output = Command::new("sh")
        .arg("-c")
        .arg(command)
        .output()
        .map_err(|e| NexoformError::CommandSpawn {
            command: command.to_string(),
            reason: e.to_string(),
        })?;

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    if echo_stdout {
        print!("{stdout}");
        let _ = std::io::stdout().flush();
    }

    let code = output.status.code().unwrap_or(-1);
    Ok(CommandResult {
        success: output.status.success(),
        exit_status: ExitStatus::Exact(code),
        stdout,
    })
}
