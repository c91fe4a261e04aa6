//! Delegation to external tools
//!
//! A `ToolCommand` is plain data so the argument templates can be checked
//! without running anything; a `ProcessRunner` turns it into a child
//! process that shares our stdio.

use crate::error::LauncherError;
use std::fmt;
use std::future::Future;
use std::process::ExitStatus;

/// A delegated invocation: program plus arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl ToolCommand {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }
}

impl fmt::Display for ToolCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            if arg.contains(' ') {
                write!(f, " '{}'", arg)?;
            } else {
                write!(f, " {}", arg)?;
            }
        }
        Ok(())
    }
}

/// Runs delegated tools to completion
pub trait ProcessRunner {
    /// Run `command` with inherited stdio and return its exit code
    fn run(&self, command: &ToolCommand) -> impl Future<Output = Result<i32, LauncherError>>;
}

/// Runs tools as real child processes
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl ProcessRunner for SystemRunner {
    async fn run(&self, command: &ToolCommand) -> Result<i32, LauncherError> {
        tracing::debug!(%command, "delegating");

        let mut child = tokio::process::Command::new(&command.program)
            .args(&command.args)
            .spawn()
            .map_err(|source| LauncherError::Spawn {
                program: command.program.clone(),
                source,
            })?;

        // Ctrl-C reaches the whole foreground group and belongs to the delegate
        let mut catch_interrupts = true;
        let status = loop {
            tokio::select! {
                status = child.wait() => break status?,
                interrupt = tokio::signal::ctrl_c(), if catch_interrupts => {
                    match interrupt {
                        Ok(()) => {
                            tracing::debug!(program = %command.program, "interrupt left to delegate")
                        }
                        Err(e) => {
                            tracing::warn!(error = %e, "cannot catch interrupts");
                            catch_interrupts = false;
                        }
                    }
                }
            }
        };

        let code = exit_code(status);
        tracing::debug!(program = %command.program, code, "delegate exited");
        Ok(code)
    }
}

/// Exit code to pass through for a finished child
///
/// Signal termination maps to the shell convention of 128 + signal.
pub fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }

    1
}
