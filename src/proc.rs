//! External process execution.
//!
//! The install check is the only part of metacheck that runs external
//! commands (git and the toolkit's installer). Everything goes through
//! [`run`], which captures both output streams and never raises on a
//! non-zero exit; callers that require success use [`run_ok`].
//!
//! No timeout is enforced on child processes; every invocation runs to
//! completion. Known limitation.

use crate::error::{MetacheckError, Result};
use std::ffi::OsStr;
use std::path::Path;
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

/// Result of executing an external command.
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Exit code (None if killed by signal).
    pub exit_code: Option<i32>,

    /// Captured standard output.
    pub stdout: String,

    /// Captured standard error.
    pub stderr: String,

    /// Execution duration.
    pub duration: Duration,

    /// Whether the command exited with code 0.
    pub success: bool,
}

/// Execute a command with captured output.
///
/// Spawn failure (missing binary, permission problem) is an error; a
/// non-zero exit is a normal result the caller inspects.
pub fn run<I, S>(program: &str, args: I, cwd: Option<&Path>) -> Result<CommandResult>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let start = Instant::now();

    let mut cmd = Command::new(program);
    cmd.args(args);
    cmd.stdin(Stdio::null());
    cmd.stdout(Stdio::piped());
    cmd.stderr(Stdio::piped());

    if let Some(cwd) = cwd {
        cmd.current_dir(cwd);
    }

    let output = cmd.output().map_err(|_| MetacheckError::CommandFailed {
        command: program.to_string(),
        code: None,
    })?;

    let duration = start.elapsed();
    let result = CommandResult {
        exit_code: output.status.code(),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        duration,
        success: output.status.success(),
    };

    tracing::debug!(
        program,
        exit_code = ?result.exit_code,
        elapsed_ms = result.duration.as_millis() as u64,
        "command finished"
    );

    Ok(result)
}

/// Execute a command and require a zero exit.
///
/// Used for sandbox plumbing (git init, staging, seed commits) where a
/// failure means the check itself cannot proceed, not that the toolkit
/// under test is broken.
pub fn run_ok<I, S>(program: &str, args: I, cwd: Option<&Path>) -> Result<CommandResult>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let args: Vec<std::ffi::OsString> = args.into_iter().map(|a| a.as_ref().into()).collect();
    let command_line = args.iter().fold(program.to_string(), |mut acc, a| {
        acc.push(' ');
        acc.push_str(&a.to_string_lossy());
        acc
    });

    let result = run(program, &args, cwd)?;
    if result.success {
        Ok(result)
    } else {
        Err(MetacheckError::CommandFailed {
            command: command_line,
            code: result.exit_code,
        })
    }
}
