//! Command execution port.
//!
//! Every external tool invocation is an explicit argument vector. Nothing is
//! passed through a shell, so service names and paths are never interpreted.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// A program plus its argument vector and working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    program: String,
    args: Vec<String>,
    current_dir: Option<PathBuf>,
}

impl Invocation {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            current_dir: None,
        }
    }

    #[must_use]
    pub fn arg(mut self, arg: impl AsRef<std::ffi::OsStr>) -> Self {
        self.args.push(arg.as_ref().to_string_lossy().into_owned());
        self
    }

    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<std::ffi::OsStr>,
    {
        self.args
            .extend(args.into_iter().map(|a| a.as_ref().to_string_lossy().into_owned()));
        self
    }

    #[must_use]
    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.current_dir = Some(dir.into());
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn arg_list(&self) -> &[String] {
        &self.args
    }

    pub fn working_dir(&self) -> Option<&Path> {
        self.current_dir.as_deref()
    }

    /// True when the argument vector contains `needle` as a whole argument.
    pub fn has_arg(&self, needle: &str) -> bool {
        self.args.iter().any(|a| a == needle)
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            if arg.is_empty() || arg.contains(char::is_whitespace) {
                write!(f, " '{arg}'")?;
            } else {
                write!(f, " {arg}")?;
            }
        }
        Ok(())
    }
}

/// How a command's exit status and output are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOptions {
    /// Fail with [`Error::ExternalCommand`] on a non-zero exit.
    pub check: bool,
    /// Capture stdout/stderr instead of inheriting the terminal.
    pub capture: bool,
}

impl RunOptions {
    /// Stream output to the terminal and fail on non-zero exit.
    pub const CHECKED: Self = Self {
        check: true,
        capture: false,
    };

    /// Capture output and fail on non-zero exit.
    pub const CAPTURED: Self = Self {
        check: true,
        capture: true,
    };

    /// Capture output and let the caller branch on the exit code.
    pub const PROBE: Self = Self {
        check: false,
        capture: true,
    };

    /// Stream output and let the caller branch on the exit code.
    pub const UNCHECKED: Self = Self {
        check: false,
        capture: false,
    };
}

/// Exit status and optionally captured output of a finished command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub exit_code: i32,
    pub stdout: Option<String>,
    pub stderr: Option<String>,
}

impl CommandOutput {
    /// A successful run with no captured output.
    pub fn success() -> Self {
        Self::with_code(0)
    }

    pub fn with_code(exit_code: i32) -> Self {
        Self {
            exit_code,
            stdout: None,
            stderr: None,
        }
    }

    #[must_use]
    pub fn with_stdout(mut self, stdout: impl Into<String>) -> Self {
        self.stdout = Some(stdout.into());
        self
    }

    #[must_use]
    pub fn with_stderr(mut self, stderr: impl Into<String>) -> Self {
        self.stderr = Some(stderr.into());
        self
    }

    pub fn is_success(&self) -> bool {
        self.exit_code == 0
    }

    /// Captured stdout, or an empty string when nothing was captured.
    pub fn stdout_str(&self) -> &str {
        self.stdout.as_deref().unwrap_or_default()
    }

    /// Apply the `check` option: a non-zero exit becomes an error.
    ///
    /// Every [`CommandRunner`] implementation finishes with this so the
    /// checking contract is the same for real and recorded runs.
    pub fn checked(self, invocation: &Invocation, options: RunOptions) -> Result<Self> {
        if options.check && !self.is_success() {
            return Err(Error::ExternalCommand {
                command: invocation.to_string(),
                exit_code: self.exit_code,
                stderr: self.stderr,
            });
        }
        Ok(self)
    }
}

/// Port for running external processes.
///
/// Calls block until the process exits. Implementations carry no retry
/// policy; retries belong to callers.
pub trait CommandRunner: Send + Sync {
    /// Run `invocation` to completion.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Spawn`] when the program cannot be started, and
    /// [`Error::ExternalCommand`] when `options.check` is set and the exit
    /// code is non-zero.
    fn run(&self, invocation: &Invocation, options: RunOptions) -> Result<CommandOutput>;

    /// True when `program` can be found on the execution path.
    fn is_available(&self, program: &str) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_joins_program_and_args() {
        let invocation = Invocation::new("kubectl").args(["apply", "-f", "k8s/common/"]);
        assert_eq!(invocation.to_string(), "kubectl apply -f k8s/common/");
    }

    #[test]
    fn display_quotes_args_with_spaces() {
        let invocation = Invocation::new("echo").arg("hello world");
        assert_eq!(invocation.to_string(), "echo 'hello world'");
    }

    #[test]
    fn checked_fails_on_non_zero_exit() {
        let invocation = Invocation::new("docker").arg("build");
        let output = CommandOutput::with_code(2).with_stderr("boom");
        let err = output.checked(&invocation, RunOptions::CHECKED).unwrap_err();

        match err {
            Error::ExternalCommand {
                command,
                exit_code,
                stderr,
            } => {
                assert_eq!(command, "docker build");
                assert_eq!(exit_code, 2);
                assert_eq!(stderr.as_deref(), Some("boom"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn unchecked_returns_non_zero_exit() {
        let invocation = Invocation::new("kubectl").arg("get");
        let output = CommandOutput::with_code(1)
            .checked(&invocation, RunOptions::PROBE)
            .unwrap();
        assert!(!output.is_success());
    }
}
